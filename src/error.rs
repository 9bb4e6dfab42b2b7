use thiserror::Error;

/// 发票生成过程中的致命错误
#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("error reading Excel file: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("sheet `{sheet}` could not be read: {source}")]
    Sheet {
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    #[error("Company info sheet is empty.")]
    EmptyCompanyProfile,

    #[error("sheet `{sheet}` is missing column `{column}`")]
    MissingColumn { sheet: String, column: String },

    #[error("row {row}: column `{column}` holds a non-numeric value `{value}`")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: column `{column}` holds an error cell")]
    InvalidCell { row: usize, column: &'static str },

    #[error("invoice `{reference}` has no line items")]
    EmptyGroup { reference: String },

    #[error("time data `{value}` does not match format `%Y-%m-%d` or `%m/%d/%Y`")]
    DateParse { value: String },

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, InvoiceError>;
