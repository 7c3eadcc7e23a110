pub mod grouped_xlsx;

pub use grouped_xlsx::export_grouped_counts_xlsx;
