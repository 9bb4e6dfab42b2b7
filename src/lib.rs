pub mod app;
pub mod config;
pub mod error;
pub mod excel;
pub mod models;
pub mod pdf;
pub mod service;

pub use config::AppConfig;
pub use error::{InvoiceError, Result};
pub use service::InvoiceRenderer;
