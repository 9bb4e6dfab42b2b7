pub mod sheets;
pub mod workbook;

pub use sheets::{parse_company_profile, parse_line_items, read_company_profile, read_line_items};
pub use workbook::open_workbook;
