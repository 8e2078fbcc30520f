//! Serializing a merged [`Table`] to `.xlsx` bytes.

use rust_xlsxwriter::{Workbook, XlsxError};

use crate::table::{CellValue, Table};

/// Write `table` as a single-worksheet workbook (default sheet name, header
/// row followed by data rows) and return the finished in-memory buffer.
pub fn write_table(table: &Table) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in table.columns.iter().enumerate() {
        worksheet.write_string(0, col as u16, name.as_str())?;
    }

    for (i, row) in table.rows.iter().enumerate() {
        let row_idx = (i + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col_idx = col as u16;
            match cell {
                CellValue::Empty => {}
                CellValue::Number(n) => {
                    worksheet.write_number(row_idx, col_idx, *n)?;
                }
                CellValue::Boolean(b) => {
                    worksheet.write_boolean(row_idx, col_idx, *b)?;
                }
                CellValue::Text(s) => {
                    worksheet.write_string(row_idx, col_idx, s)?;
                }
            }
        }
    }

    workbook.save_to_buffer()
}
