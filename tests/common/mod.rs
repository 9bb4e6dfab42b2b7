#![allow(dead_code)]

use invoice_forge::AppConfig;
use lopdf::content::Content;
use lopdf::{Document, Object};
use rust_xlsxwriter::{Format, Workbook};
use std::path::{Path, PathBuf};

pub const HEADER: [&str; 15] = [
    "Reference",
    "Date",
    "Payee",
    "Street Address",
    "City",
    "Province/State",
    "Country",
    "Postal Code",
    "Item Number",
    "Description",
    "Quantity",
    "Unit Price",
    "Subtotal",
    "Total Tax",
    "Amount",
];

/// 测试行的付款日期
pub enum DateCell {
    Text(&'static str),
    /// Excel 序列日期 (带日期格式)
    Serial(f64),
}

pub struct Row {
    pub reference: &'static str,
    pub date: DateCell,
    pub description: &'static str,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
    pub amount: Option<f64>,
}

impl Row {
    pub fn new(reference: &'static str, description: &'static str) -> Self {
        Self {
            reference,
            date: DateCell::Text("2024-03-15"),
            description,
            quantity: Some(1234.0),
            unit_price: Some(999.5),
            amount: None,
        }
    }

    pub fn dated(mut self, date: DateCell) -> Self {
        self.date = date;
        self
    }
}

pub fn company_pairs() -> Vec<(&'static str, &'static str)> {
    vec![
        ("company_name", "BrightDesk Consulting"),
        ("address", "100 Queen St"),
        ("city", "Toronto"),
        ("province", "ON"),
        ("country", "Canada"),
        ("postal_code", "M5H 2N2"),
        ("phone", "416-555-0100"),
    ]
}

/// 写出包含 company_invoice_data / company_info 两张表的工作簿
pub fn write_workbook(path: &Path, rows: &[Row], company: &[(&str, &str)]) {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("company_invoice_data").unwrap();
        for (col, name) in HEADER.iter().enumerate() {
            sheet.write_string(0, col as u16, *name).unwrap();
        }
        for (idx, row) in rows.iter().enumerate() {
            let r = idx as u32 + 1;
            sheet.write_string(r, 0, row.reference).unwrap();
            match row.date {
                DateCell::Text(text) => {
                    sheet.write_string(r, 1, text).unwrap();
                }
                DateCell::Serial(serial) => {
                    sheet.write_number_with_format(r, 1, serial, &date_format).unwrap();
                }
            }
            sheet.write_string(r, 2, "Acme Corp").unwrap();
            sheet.write_string(r, 3, "1 King St W").unwrap();
            sheet.write_string(r, 4, "Toronto").unwrap();
            sheet.write_string(r, 5, "ON").unwrap();
            sheet.write_string(r, 6, "Canada").unwrap();
            sheet.write_string(r, 7, "M5H 1A1").unwrap();
            sheet.write_number(r, 8, (idx + 1) as f64).unwrap();
            sheet.write_string(r, 9, row.description).unwrap();
            let numbers = [row.quantity, row.unit_price, None, None, row.amount];
            for (offset, value) in numbers.into_iter().enumerate() {
                if let Some(value) = value {
                    sheet.write_number(r, 10 + offset as u16, value).unwrap();
                }
            }
        }
    }

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("company_info").unwrap();
        for (idx, (key, value)) in company.iter().enumerate() {
            sheet.write_string(idx as u32, 0, *key).unwrap();
            sheet.write_string(idx as u32, 1, *value).unwrap();
        }
    }

    workbook.save(path).unwrap();
}

/// 指向临时目录的配置
pub fn config_in(dir: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.input.path = dir.join("ledger.xlsx");
    config.output.dir = dir.join("invoices");
    config.output.logo_path = dir.join("logo.png");
    config
}

pub fn output_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<_> = std::fs::read_dir(dir.join("invoices"))
        .map(|entries| entries.map(|e| e.unwrap().path()).collect())
        .unwrap_or_default();
    files.sort();
    files
}

fn page_content(path: &Path) -> Content {
    let doc = Document::load(path).unwrap();
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 1, "invoice must be a single page");
    let bytes = doc.get_page_content(pages[&1]).unwrap();
    Content::decode(&bytes).unwrap()
}

/// 页面上所有 Tj 文本
pub fn page_strings(path: &Path) -> Vec<String> {
    page_content(path)
        .operations
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| match op.operands.first() {
            Some(Object::String(bytes, _)) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        })
        .collect()
}

pub fn page_operators(path: &Path) -> Vec<String> {
    page_content(path)
        .operations
        .into_iter()
        .map(|op| op.operator)
        .collect()
}
