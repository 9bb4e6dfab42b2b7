pub mod dates;
pub mod format;
pub mod grouping;
pub mod renderer;

pub use dates::{derive_invoice_dates, parse_payment_date, DateRule};
pub use grouping::group_by_reference;
pub use renderer::InvoiceRenderer;
