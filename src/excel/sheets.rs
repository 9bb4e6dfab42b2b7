use calamine::{Data, DataType, Range, Reader, Sheets};
use std::collections::HashMap;
use std::io::{Read, Seek};

use crate::error::{InvoiceError, Result};
use crate::models::{CompanyProfile, LineItem, PaymentDate};

static EMPTY_CELL: Data = Data::Empty;

/// 读取开票明细表
pub fn read_line_items<RS: Read + Seek>(workbook: &mut Sheets<RS>, sheet: &str) -> Result<Vec<LineItem>> {
    let range = worksheet(workbook, sheet)?;
    parse_line_items(&range, sheet)
}

/// 读取公司信息表
pub fn read_company_profile<RS: Read + Seek>(
    workbook: &mut Sheets<RS>,
    sheet: &str,
) -> Result<CompanyProfile> {
    let range = worksheet(workbook, sheet)?;
    parse_company_profile(&range)
}

fn worksheet<RS: Read + Seek>(workbook: &mut Sheets<RS>, sheet: &str) -> Result<Range<Data>> {
    workbook
        .worksheet_range(sheet)
        .map_err(|source| InvoiceError::Sheet {
            sheet: sheet.to_string(),
            source,
        })
}

/// 首行为表头, 按列名定位; 缺列在加载时即报错
pub fn parse_line_items(range: &Range<Data>, sheet: &str) -> Result<Vec<LineItem>> {
    let mut rows = range.rows();
    let header = rows.next().unwrap_or_default();

    let positions: HashMap<String, usize> = header
        .iter()
        .enumerate()
        .map(|(idx, cell)| (cell.to_string().trim().to_string(), idx))
        .collect();

    let mut columns: HashMap<&'static str, usize> = HashMap::with_capacity(LineItem::COLUMNS.len());
    for name in LineItem::COLUMNS {
        let idx = positions
            .get(name)
            .copied()
            .ok_or_else(|| InvoiceError::MissingColumn {
                sheet: sheet.to_string(),
                column: name.to_string(),
            })?;
        columns.insert(name, idx);
    }

    // 表格行号 (1 起), 用于错误信息
    let first_row = range.start().map(|(r, _)| r as usize).unwrap_or(0) + 1;

    let mut items = Vec::new();
    for (offset, row) in rows.enumerate() {
        if row.iter().all(|c| c.is_empty()) {
            continue;
        }
        let row_no = first_row + offset + 1;
        let cell = |name: &'static str| row.get(columns[name]).unwrap_or(&EMPTY_CELL);

        items.push(LineItem {
            reference: text_cell(cell(LineItem::REFERENCE), row_no, LineItem::REFERENCE)?,
            date: date_cell(cell(LineItem::DATE), row_no)?,
            payee: text_cell(cell(LineItem::PAYEE), row_no, LineItem::PAYEE)?,
            street_address: text_cell(cell(LineItem::STREET_ADDRESS), row_no, LineItem::STREET_ADDRESS)?,
            city: text_cell(cell(LineItem::CITY), row_no, LineItem::CITY)?,
            province_state: text_cell(cell(LineItem::PROVINCE_STATE), row_no, LineItem::PROVINCE_STATE)?,
            country: text_cell(cell(LineItem::COUNTRY), row_no, LineItem::COUNTRY)?,
            postal_code: text_cell(cell(LineItem::POSTAL_CODE), row_no, LineItem::POSTAL_CODE)?,
            item_number: text_cell(cell(LineItem::ITEM_NUMBER), row_no, LineItem::ITEM_NUMBER)?,
            description: text_cell(cell(LineItem::DESCRIPTION), row_no, LineItem::DESCRIPTION)?,
            quantity: number_cell(cell(LineItem::QUANTITY), row_no, LineItem::QUANTITY)?,
            unit_price: number_cell(cell(LineItem::UNIT_PRICE), row_no, LineItem::UNIT_PRICE)?,
            subtotal: number_cell(cell(LineItem::SUBTOTAL), row_no, LineItem::SUBTOTAL)?,
            total_tax: number_cell(cell(LineItem::TOTAL_TAX), row_no, LineItem::TOTAL_TAX)?,
            amount: number_cell(cell(LineItem::AMOUNT), row_no, LineItem::AMOUNT)?,
        });
    }

    Ok(items)
}

/// 两列无表头: 第 0 列为键, 第 1 列为值
pub fn parse_company_profile(range: &Range<Data>) -> Result<CompanyProfile> {
    if range.rows().next().is_none() {
        return Err(InvoiceError::EmptyCompanyProfile);
    }

    let mut profile = CompanyProfile::new();
    for row in range.rows() {
        let key = row.first().map(plain_text).unwrap_or_default();
        if key.is_empty() {
            continue;
        }
        let value = row.get(1).map(plain_text).unwrap_or_default();
        profile.insert(key, value);
    }

    Ok(profile)
}

fn text_cell(cell: &Data, row: usize, column: &'static str) -> Result<String> {
    match cell {
        Data::Error(_) => Err(InvoiceError::InvalidCell { row, column }),
        other => Ok(plain_text(other)),
    }
}

/// 单元格转为显示文本; 整数值的浮点数不带 ".0"
fn plain_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => float_text(*f),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| cell.to_string()),
        other => other.to_string(),
    }
}

fn float_text(f: f64) -> String {
    if f.is_nan() {
        String::new()
    } else if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// 空值 / NaN 视为缺失, 渲染时显示为 0
fn number_cell(cell: &Data, row: usize, column: &'static str) -> Result<Option<f64>> {
    let invalid = |value: String| InvoiceError::InvalidNumber { row, column, value };
    match cell {
        Data::Empty => Ok(None),
        Data::Int(i) => Ok(Some(*i as f64)),
        Data::Float(f) if f.is_nan() => Ok(None),
        Data::Float(f) => Ok(Some(*f)),
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
                return Ok(None);
            }
            match trimmed.replace(',', "").parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(Some(value)),
                _ => Err(invalid(s.clone())),
            }
        }
        Data::Error(_) => Err(InvoiceError::InvalidCell { row, column }),
        other => Err(invalid(other.to_string())),
    }
}

fn date_cell(cell: &Data, row: usize) -> Result<PaymentDate> {
    match cell {
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_date()
            .map(PaymentDate::Date)
            .ok_or(InvoiceError::InvalidCell {
                row,
                column: LineItem::DATE,
            }),
        Data::Error(_) => Err(InvoiceError::InvalidCell {
            row,
            column: LineItem::DATE,
        }),
        other => Ok(PaymentDate::Text(plain_text(other))),
    }
}
