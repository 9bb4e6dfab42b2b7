use rand::Rng;
use std::fs;
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::error::{InvoiceError, Result};
use crate::models::{CompanyProfile, Invoice, InvoiceGroup, LineItem, RenderSummary};
use crate::pdf::{Align, Canvas, CellContent, Font, Paragraph, Rect, Table, TableStyle, TextStyle};
use crate::service::dates::DateRule;
use crate::service::format::{format_money, format_quantity};

/// 表头列名
pub const TABLE_HEADER: [&str; 7] = ["Item", "Description", "Quantity", "Unit Price", "Subtotal", "Tax", "Amount"];
/// 固定列宽 (pt)
pub const COLUMN_WIDTHS: [f32; 7] = [50.0, 150.0, 60.0, 70.0, 70.0, 50.0, 70.0];

// 页面坐标 (距页面顶边的偏移)
const LOGO_FRAME: (f32, f32, f32, f32) = (50.0, 100.0, 200.0, 100.0);
const INVOICE_META_X: f32 = 72.0;
const INVOICE_META_TOPS: [f32; 3] = [242.0, 252.0, 262.0];
const COMPANY_X: f32 = 264.0;
const COMPANY_TOP: f32 = 48.0;
const COMPANY_SPACING: f32 = 10.0;
const BILL_TO_X: f32 = 72.0;
const BILL_TO_TOP: f32 = 165.0;
const BILL_TO_SPACING: f32 = 9.0;
const TABLE_X: f32 = 50.0;
const TABLE_TOP: f32 = 360.0;
const TERMS_X: f32 = 50.0;
const TERMS_TOP: f32 = 400.0;
const TERMS_GAP: f32 = 40.0;
const TERMS_WIDTH: f32 = 500.0;
const NOTES_STEP: f32 = 12.0;

/// 公司地址块 (province 并入 city 行, 逗号后带空格)
pub fn company_address_lines(company: &CompanyProfile) -> Vec<String> {
    vec![
        company.get("company_name").to_string(),
        company.get("address").to_string(),
        format!("{}, {}", company.get("city"), company.get("province")),
        company.get("country").to_string(),
        company.get("postal_code").to_string(),
        company.get("phone").to_string(),
    ]
}

/// 账单地址块 (取组内第一行, City 与 Province/State 之间无空格)
pub fn billing_address_lines(first: &LineItem) -> Vec<String> {
    vec![
        first.payee.clone(),
        first.street_address.clone(),
        format!("{},{}", first.city, first.province_state),
        first.country.clone(),
        first.postal_code.clone(),
    ]
}

/// 明细行 -> 表格单元格
pub fn line_item_cells(item: &LineItem) -> Vec<CellContent> {
    vec![
        CellContent::Flow(item.item_number.clone()),
        CellContent::Flow(item.description.clone()),
        CellContent::Text(format_quantity(item.quantity)),
        CellContent::Text(format_money(item.unit_price)),
        CellContent::Text(format_money(item.subtotal)),
        CellContent::Text(format_money(item.total_tax)),
        CellContent::Text(format_money(item.amount)),
    ]
}

pub fn terms_text(company_name: &str) -> String {
    format!(
        "Payment Terms: UNLESS OTHERWISE MUTUALLY AGREED IN WRITING BETWEEN YOU AND {name}, \
         THE {name} TERMS OF SALE AND POLICIES GOVERN THIS TRANSACTION",
        name = company_name
    )
}

fn table_style() -> TableStyle {
    TableStyle {
        grid_width: 0.5,
        header_gray: 0.5,
        header: TextStyle::plain(Font::HelveticaBold, 9.0),
        body: TextStyle::plain(Font::Helvetica, 9.0),
        flow: paragraph_style(),
        body_align: vec![
            Align::Left,
            Align::Left,
            Align::Center,
            Align::Right,
            Align::Right,
            Align::Right,
            Align::Right,
        ],
        padding_left: 6.0,
        padding_right: 6.0,
        padding_top: 3.0,
        padding_bottom: 3.0,
    }
}

fn paragraph_style() -> TextStyle {
    TextStyle {
        font: Font::Helvetica,
        size: 9.0,
        leading: 11.0,
    }
}

/// 明细表格: 表头 + 每行一条
pub fn build_line_item_table(group: &InvoiceGroup) -> Table {
    let mut table = Table::new(COLUMN_WIDTHS.to_vec(), table_style());
    table.push_header(&TABLE_HEADER);
    for item in group.items() {
        table.push_row(line_item_cells(item));
    }
    table
}

/// 发票渲染服务
pub struct InvoiceRenderer {
    company: CompanyProfile,
    output_dir: PathBuf,
    logo_path: PathBuf,
    date_rule: DateRule,
    currency: String,
}

impl InvoiceRenderer {
    pub fn new(company: CompanyProfile, config: &AppConfig) -> Self {
        Self {
            company,
            output_dir: config.output.dir.clone(),
            logo_path: config.output.logo_path.clone(),
            date_rule: DateRule::from(&config.invoice),
            currency: config.invoice.currency.clone(),
        }
    }

    pub fn company(&self) -> &CompanyProfile {
        &self.company
    }

    pub fn output_path(&self, reference: &str) -> PathBuf {
        self.output_dir.join(format!("invoice_{}.pdf", reference))
    }

    /// 逐组渲染; 任一组失败即中止整个批次
    pub fn render_all<R: Rng + ?Sized>(&self, groups: &[InvoiceGroup], rng: &mut R) -> Result<RenderSummary> {
        fs::create_dir_all(&self.output_dir)?;

        let mut summary = RenderSummary::default();
        for group in groups {
            let path = self.render_group(group, rng)?;
            summary.invoices_written += 1;
            summary.rows_rendered += group.len();
            summary.files.push(path);
        }

        tracing::info!(
            "渲染完成: 发票 {} 张, 明细 {} 行",
            summary.invoices_written,
            summary.rows_rendered
        );
        Ok(summary)
    }

    /// 渲染单张发票并写入 invoices/invoice_<Reference>.pdf
    pub fn render_group<R: Rng + ?Sized>(&self, group: &InvoiceGroup, rng: &mut R) -> Result<PathBuf> {
        let first = group.first().ok_or_else(|| InvoiceError::EmptyGroup {
            reference: group.reference.clone(),
        })?;
        let dates = self.date_rule.derive(&first.date, rng)?;
        let invoice = Invoice {
            number: group.reference.clone(),
            dates,
        };

        let canvas = self.compose(&invoice, group);
        let path = self.output_path(&invoice.number);
        canvas.save(&path)?;

        tracing::info!(
            "Invoice {} written to {} ({} rows)",
            invoice.number,
            path.display(),
            group.len()
        );
        Ok(path)
    }

    /// 单页排版
    pub fn compose(&self, invoice: &Invoice, group: &InvoiceGroup) -> Canvas {
        let mut canvas = Canvas::letter();
        let top = canvas.height();

        // 1. Logo (失败时静默跳过)
        let (x, offset, width, height) = LOGO_FRAME;
        self.place_logo(&mut canvas, Rect { x, y: top - offset, width, height });

        // 2. 发票号 / 开票日 / 到期日
        let meta = [
            format!("Invoice Number: {}", invoice.number),
            format!("Invoice Date: {}", invoice.dates.invoice_date_display()),
            format!("Due Date: {}", invoice.dates.due_date_display()),
        ];
        for (text, offset) in meta.iter().zip(INVOICE_META_TOPS) {
            canvas.draw_string(Font::Helvetica, 10.0, INVOICE_META_X, top - offset, text);
        }

        // 3. 公司地址
        let mut y = top - COMPANY_TOP;
        for line in company_address_lines(&self.company) {
            canvas.draw_string(Font::HelveticaOblique, 8.0, COMPANY_X, y, &line);
            y -= COMPANY_SPACING;
        }

        // 4. Bill To
        canvas.draw_string(Font::HelveticaBold, 10.0, BILL_TO_X, top - BILL_TO_TOP, "Bill To:");
        let mut y = top - BILL_TO_TOP - 10.0;
        for line in group.first().map(billing_address_lines).unwrap_or_default() {
            canvas.draw_string(Font::HelveticaBold, 10.0, BILL_TO_X, y, &line);
            y -= BILL_TO_SPACING;
        }

        // 5. 明细表格 (顶边固定, 高度取决于折行)
        let table = build_line_item_table(group);
        let table_height = table.height();
        table.draw(&mut canvas, TABLE_X, top - TABLE_TOP - table_height);

        // 6. 付款条款 + 说明
        let terms_y = top - TERMS_TOP - table_height - TERMS_GAP;
        let terms = Paragraph::wrap(&terms_text(self.company.company_name()), paragraph_style(), TERMS_WIDTH);
        terms.draw(&mut canvas, TERMS_X, terms_y);

        let notes = [
            format!(
                "Payment due within {} days of invoice date",
                self.date_rule.payment_window_days
            ),
            "Late payments subject to 1.5% monthly interest".to_string(),
            format!("All amounts in {}", self.currency),
        ];
        let mut lowest = terms_y;
        for (idx, note) in notes.iter().enumerate() {
            lowest = terms_y - terms.height() - NOTES_STEP * (idx + 1) as f32;
            canvas.draw_string(Font::Helvetica, 8.0, TERMS_X, lowest, note);
        }

        if lowest < 0.0 {
            tracing::warn!(
                "Invoice {}: content runs {:.0}pt past the bottom of the page ({} rows)",
                invoice.number,
                -lowest,
                group.len()
            );
        }

        canvas
    }

    fn place_logo(&self, canvas: &mut Canvas, frame: Rect) {
        if let Err(e) = canvas.draw_image(&self.logo_path, frame) {
            tracing::debug!("Logo {} skipped: {}", self.logo_path.display(), e);
        }
    }
}
