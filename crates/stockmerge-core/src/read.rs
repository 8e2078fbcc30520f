//! Reading one worksheet of an uploaded `.xlsx` workbook into a [`Table`].

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use crate::error::ParseError;
use crate::table::{CellValue, Table};

/// Parse `bytes` as an `.xlsx` workbook and read `sheet_name` from it.
///
/// The first row of the worksheet's used range is the header row; every
/// following row is data. A workbook without the named worksheet, a corrupt
/// archive, or a non-xlsx payload all fail with [`ParseError`]. A worksheet
/// with no cells at all yields an empty table (no columns, no rows).
pub fn read_worksheet(bytes: &[u8], sheet_name: &str) -> Result<Table, ParseError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    let range = workbook.worksheet_range(sheet_name)?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Table::new(Vec::new()));
    };

    let columns = header.iter().map(header_name).collect();
    let mut table = Table::new(columns);
    for row in rows {
        table.push_row(row.iter().map(convert_value).collect());
    }

    Ok(table)
}

fn header_name(value: &Data) -> String {
    convert_value(value).to_header_string()
}

/// Collapse calamine's cell representation into the four shapes the merge
/// pipeline works with. Date/time cells become text here; an absent
/// timestamp is simply an empty cell, never a placeholder token.
fn convert_value(value: &Data) -> CellValue {
    match value {
        Data::Empty => CellValue::Empty,
        Data::Bool(v) => CellValue::Boolean(*v),
        Data::Int(v) => CellValue::Number(*v as f64),
        Data::Float(v) => CellValue::Number(*v),
        Data::String(v) => CellValue::Text(v.clone()),
        Data::Error(e) => CellValue::Text(cell_error_literal(e).to_owned()),
        Data::DateTime(v) => match v.as_datetime() {
            Some(dt) => CellValue::Text(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
            // Out-of-range serial; fall back to the raw number.
            None => CellValue::Number(v.as_f64()),
        },
        Data::DateTimeIso(v) => CellValue::Text(v.clone()),
        Data::DurationIso(v) => CellValue::Text(v.clone()),
    }
}

fn cell_error_literal(err: &calamine::CellErrorType) -> &'static str {
    use calamine::CellErrorType;

    match err {
        CellErrorType::Div0 => "#DIV/0!",
        CellErrorType::NA => "#N/A",
        CellErrorType::Name => "#NAME?",
        CellErrorType::Null => "#NULL!",
        CellErrorType::Num => "#NUM!",
        CellErrorType::Ref => "#REF!",
        CellErrorType::Value => "#VALUE!",
        CellErrorType::GettingData => "#GETTING_DATA",
    }
}

#[cfg(test)]
mod tests {
    use calamine::{Data, ExcelDateTime, ExcelDateTimeType};

    use super::*;

    #[test]
    fn datetime_cells_convert_to_text() {
        // 2024-01-02 00:00:00 is Excel serial 45293 in the 1900 date system.
        let value = Data::DateTime(ExcelDateTime::new(
            45293.0,
            ExcelDateTimeType::DateTime,
            false,
        ));
        assert_eq!(
            convert_value(&value),
            CellValue::Text("2024-01-02 00:00:00".to_owned())
        );
    }

    #[test]
    fn empty_cells_stay_empty() {
        assert_eq!(convert_value(&Data::Empty), CellValue::Empty);
    }

    #[test]
    fn error_cells_convert_to_excel_literals() {
        let value = Data::Error(calamine::CellErrorType::Div0);
        assert_eq!(convert_value(&value), CellValue::Text("#DIV/0!".to_owned()));
    }

    #[test]
    fn garbage_bytes_fail_to_parse() {
        let err = read_worksheet(b"definitely not a zip archive", "Worksheet");
        assert!(err.is_err());
    }
}
