use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 付款日期: 表格中的日期单元格或待解析的文本
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentDate {
    Date(NaiveDate),
    Text(String),
}

impl fmt::Display for PaymentDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentDate::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            PaymentDate::Text(s) => f.write_str(s),
        }
    }
}

/// 开票明细行 (company_invoice_data 表)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub reference: String,
    pub date: PaymentDate,
    pub payee: String,
    pub street_address: String,
    pub city: String,
    pub province_state: String,
    pub country: String,
    pub postal_code: String,
    pub item_number: String,
    pub description: String,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
    pub subtotal: Option<f64>,
    pub total_tax: Option<f64>,
    pub amount: Option<f64>,
}

impl LineItem {
    pub const REFERENCE: &'static str = "Reference";
    pub const DATE: &'static str = "Date";
    pub const PAYEE: &'static str = "Payee";
    pub const STREET_ADDRESS: &'static str = "Street Address";
    pub const CITY: &'static str = "City";
    pub const PROVINCE_STATE: &'static str = "Province/State";
    pub const COUNTRY: &'static str = "Country";
    pub const POSTAL_CODE: &'static str = "Postal Code";
    pub const ITEM_NUMBER: &'static str = "Item Number";
    pub const DESCRIPTION: &'static str = "Description";
    pub const QUANTITY: &'static str = "Quantity";
    pub const UNIT_PRICE: &'static str = "Unit Price";
    pub const SUBTOTAL: &'static str = "Subtotal";
    pub const TOTAL_TAX: &'static str = "Total Tax";
    pub const AMOUNT: &'static str = "Amount";

    /// 表头中必须出现的全部列
    pub const COLUMNS: [&'static str; 15] = [
        Self::REFERENCE,
        Self::DATE,
        Self::PAYEE,
        Self::STREET_ADDRESS,
        Self::CITY,
        Self::PROVINCE_STATE,
        Self::COUNTRY,
        Self::POSTAL_CODE,
        Self::ITEM_NUMBER,
        Self::DESCRIPTION,
        Self::QUANTITY,
        Self::UNIT_PRICE,
        Self::SUBTOTAL,
        Self::TOTAL_TAX,
        Self::AMOUNT,
    ];
}
