pub mod district;
pub mod record;
pub mod table;

pub use district::{district_code, district_name, District, ALL_DISTRICTS_LABEL, DISTRICTS};
pub use record::Record;
pub use table::{CellValue, Table};
