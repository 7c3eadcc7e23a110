pub mod catalog;
pub mod format;
pub mod record;

pub use catalog::HouseType;
pub use format::format_currency;
pub use record::PropertyRecord;
