use crate::dataset::{GroupBy, GroupedCount};
use crate::errors::ServerError;
use crate::responses::{xlsx_response, ResultResp};
use rust_xlsxwriter::Workbook;

/// Build the workbook bytes for a set of grouped counts.
pub fn grouped_counts_workbook(
    counts: &[GroupedCount],
    group_by: GroupBy,
) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let headers = [group_by.key_label(), "Category", "Count"];
    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| {
                ServerError::XlsxError(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    for (i, row) in counts.iter().enumerate() {
        let r = (i + 1) as u32;

        worksheet
            .write_string(r, 0, &row.key)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write key: {}", e)))?;

        worksheet
            .write_string(r, 1, &row.category)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write category: {}", e)))?;

        worksheet
            .write_number(r, 2, row.count as f64)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write count: {}", e)))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {}", e)))
}

pub fn export_grouped_counts_xlsx(counts: &[GroupedCount], group_by: GroupBy) -> ResultResp {
    let buffer = grouped_counts_workbook(counts, group_by)?;
    xlsx_response(
        buffer,
        &format!("price_categories_by_{}.xlsx", group_by.as_param()),
    )
}
