use calamine::{open_workbook_auto, Sheets};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::Result;

/// 打开输入工作簿 (xlsx / xls / ods 自动识别)
pub fn open_workbook(path: &Path) -> Result<Sheets<BufReader<File>>> {
    let workbook = open_workbook_auto(path)?;
    tracing::debug!("Opened workbook {}", path.display());
    Ok(workbook)
}
