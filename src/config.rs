use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Result;

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub invoice: InvoiceTermsConfig,
}

/// 输入工作簿
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub path: PathBuf,
    pub line_items_sheet: String,
    pub company_sheet: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub logo_path: PathBuf,
}

/// 发票日期与条款
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceTermsConfig {
    /// 到期日 = 开票日 + payment_window_days
    pub payment_window_days: u32,
    /// 开票日在付款日之前回溯 [0, max_backdate_days] 天
    pub max_backdate_days: u32,
    pub currency: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("BrightDesk_Consulting_Ledger_Mar2022_to_Aug2025_v13.xlsx"),
            line_items_sheet: "company_invoice_data".to_string(),
            company_sheet: "company_info".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("invoices"),
            logo_path: PathBuf::from("logo.png"),
        }
    }
}

impl Default for InvoiceTermsConfig {
    fn default() -> Self {
        Self {
            payment_window_days: 30,
            max_backdate_days: 30,
            currency: "CAD".to_string(),
        }
    }
}

impl AppConfig {
    /// 加载配置: 默认值 -> invoice-forge.toml (可选) -> INVOICE_FORGE__* 环境变量
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name("invoice-forge").required(false))
            .add_source(Environment::with_prefix("INVOICE_FORGE").separator("__"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
