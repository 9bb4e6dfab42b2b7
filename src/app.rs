use rand::Rng;

use crate::config::AppConfig;
use crate::error::Result;
use crate::excel::{open_workbook, read_company_profile, read_line_items};
use crate::models::RenderSummary;
use crate::service::{group_by_reference, InvoiceRenderer};

/// 读取工作簿 -> 按 Reference 分组 -> 逐张生成 PDF
pub fn run<R: Rng + ?Sized>(config: &AppConfig, rng: &mut R) -> Result<RenderSummary> {
    // 1. 开票明细
    tracing::info!("Reading Excel file...");
    let mut workbook = open_workbook(&config.input.path)?;
    let items = read_line_items(&mut workbook, &config.input.line_items_sheet)?;
    tracing::info!("Loaded {} rows of data", items.len());

    // 2. 公司信息
    tracing::info!("Getting company info...");
    let company = read_company_profile(&mut workbook, &config.input.company_sheet)?;
    let name = if company.contains("company_name") {
        company.company_name()
    } else {
        "Unknown"
    };
    tracing::info!("Company: {}", name);

    // 3. 生成发票
    tracing::info!("Creating invoices...");
    let groups = group_by_reference(items);
    let renderer = InvoiceRenderer::new(company, config);
    let summary = renderer.render_all(&groups, rng)?;
    tracing::info!("Invoices created successfully!");

    Ok(summary)
}
