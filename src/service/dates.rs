use chrono::{Days, NaiveDate};
use rand::Rng;

use crate::config::InvoiceTermsConfig;
use crate::error::{InvoiceError, Result};
use crate::models::{InvoiceDates, PaymentDate};

/// 接受的付款日期文本格式 (按顺序尝试)
const ACCEPTED_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// 开票日回溯规则: 开票日 = 付款日 - U[0, max_backdate_days], 到期日 = 开票日 + payment_window_days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRule {
    pub max_backdate_days: u32,
    pub payment_window_days: u32,
}

impl Default for DateRule {
    fn default() -> Self {
        Self {
            max_backdate_days: 30,
            payment_window_days: 30,
        }
    }
}

impl From<&InvoiceTermsConfig> for DateRule {
    fn from(terms: &InvoiceTermsConfig) -> Self {
        Self {
            max_backdate_days: terms.max_backdate_days,
            payment_window_days: terms.payment_window_days,
        }
    }
}

impl DateRule {
    /// 随机源由调用方传入, 测试可固定种子
    pub fn derive<R: Rng + ?Sized>(&self, payment: &PaymentDate, rng: &mut R) -> Result<InvoiceDates> {
        let payment_date = parse_payment_date(payment)?;
        let offset = rng.gen_range(0..=self.max_backdate_days);
        self.backdate(payment_date, offset).ok_or_else(|| InvoiceError::DateParse {
            value: payment.to_string(),
        })
    }

    /// 给定回溯天数的确定性部分; 日期越界时返回 None
    pub fn backdate(&self, payment_date: NaiveDate, offset_days: u32) -> Option<InvoiceDates> {
        let invoice_date = payment_date.checked_sub_days(Days::new(u64::from(offset_days)))?;
        let due_date = invoice_date.checked_add_days(Days::new(u64::from(self.payment_window_days)))?;
        Some(InvoiceDates {
            invoice_date,
            due_date,
        })
    }
}

/// 默认规则 (回溯 0..=30 天, 30 天账期)
pub fn derive_invoice_dates<R: Rng + ?Sized>(payment: &PaymentDate, rng: &mut R) -> Result<InvoiceDates> {
    DateRule::default().derive(payment, rng)
}

/// 解析付款日期; 丢弃时间部分
pub fn parse_payment_date(payment: &PaymentDate) -> Result<NaiveDate> {
    match payment {
        PaymentDate::Date(date) => Ok(*date),
        PaymentDate::Text(text) => {
            let day = text.split_whitespace().next().unwrap_or_default();
            ACCEPTED_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(day, fmt).ok())
                .ok_or_else(|| InvoiceError::DateParse { value: text.clone() })
        }
    }
}
