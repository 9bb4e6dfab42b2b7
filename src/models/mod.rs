pub mod company;
pub mod invoice;
pub mod line_item;
pub mod result;

pub use company::CompanyProfile;
pub use invoice::{Invoice, InvoiceDates, InvoiceGroup};
pub use line_item::{LineItem, PaymentDate};
pub use result::RenderSummary;
