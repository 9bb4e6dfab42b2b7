use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::LineItem;

/// 同一 Reference 下的全部明细, 对应一张发票
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceGroup {
    pub reference: String,
    items: Vec<LineItem>,
}

impl InvoiceGroup {
    pub fn new(reference: impl Into<String>, first: LineItem) -> Self {
        Self {
            reference: reference.into(),
            items: vec![first],
        }
    }

    /// 账单地址只取第一行
    pub fn first(&self) -> Option<&LineItem> {
        self.items.first()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn push(&mut self, item: LineItem) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// 开票日与到期日
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDates {
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
}

impl InvoiceDates {
    pub const DISPLAY_FORMAT: &'static str = "%m/%d/%Y";

    pub fn invoice_date_display(&self) -> String {
        self.invoice_date.format(Self::DISPLAY_FORMAT).to_string()
    }

    pub fn due_date_display(&self) -> String {
        self.due_date.format(Self::DISPLAY_FORMAT).to_string()
    }
}

/// 渲染时生成的发票抬头, 不单独持久化
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub number: String,
    pub dates: InvoiceDates,
}
