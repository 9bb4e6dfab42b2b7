use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 一次运行的输出统计
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderSummary {
    pub invoices_written: usize,
    pub rows_rendered: usize,
    pub files: Vec<PathBuf>,
}
