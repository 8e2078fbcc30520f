/// A single cell of a parsed worksheet.
///
/// Date/time cells are converted to their textual representation at read
/// time, so by the time a value reaches a [`Table`] only these four shapes
/// remain. [`CellValue::Empty`] renders as the empty string on output.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Boolean(bool),
    Text(String),
}

impl CellValue {
    /// Render the cell the way it appears in a column header row.
    ///
    /// Whole numbers drop their fractional part so a header typed as `2024`
    /// doesn't come out as `2024.0`.
    pub fn to_header_string(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) if n.fract() == 0.0 => format!("{}", *n as i64),
            CellValue::Number(n) => n.to_string(),
            CellValue::Boolean(b) => b.to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }
}

/// The parsed content of one worksheet: named columns over row-major data.
///
/// Request-scoped; never persisted. Every row holds exactly
/// `columns.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Push one row, padding or truncating to the column count.
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Empty);
        self.rows.push(row);
    }

    /// Trim surrounding whitespace from every column name. Pure renaming;
    /// cell data is untouched.
    pub fn normalize_columns(&mut self) {
        for column in &mut self.columns {
            let trimmed = column.trim();
            if trimmed.len() != column.len() {
                *column = trimmed.to_owned();
            }
        }
    }

    /// Project the table onto `target_columns`, in target order.
    ///
    /// Columns absent from the table are added with [`CellValue::Empty`] for
    /// every row rather than treated as an error; extra original columns are
    /// dropped. Returns the projected table and the list of columns that had
    /// to be filled in, in target order.
    pub fn align_to_schema(&self, target_columns: &[String]) -> (Table, Vec<String>) {
        let missing: Vec<String> = target_columns
            .iter()
            .filter(|target| !self.columns.contains(target))
            .cloned()
            .collect();

        // Index of each target column in the source, first occurrence wins.
        let source_indices: Vec<Option<usize>> = target_columns
            .iter()
            .map(|target| self.columns.iter().position(|c| c == target))
            .collect();

        let mut aligned = Table::new(target_columns.to_vec());
        for row in &self.rows {
            let projected = source_indices
                .iter()
                .map(|idx| match idx {
                    Some(i) => row[*i].clone(),
                    None => CellValue::Empty,
                })
                .collect();
            aligned.rows.push(projected);
        }

        (aligned, missing)
    }

    /// Append a provenance column holding `source_file` in every row.
    pub fn append_provenance(&mut self, column_name: &str, source_file: &str) {
        self.columns.push(column_name.to_owned());
        for row in &mut self.rows {
            row.push(CellValue::Text(source_file.to_owned()));
        }
    }

    /// Concatenate `other`'s rows onto this table, preserving row order.
    ///
    /// Callers align both tables to the same schema first; the column sets
    /// are expected to be identical.
    pub fn extend_rows(&mut self, other: Table) {
        debug_assert_eq!(self.columns, other.columns);
        self.rows.extend(other.rows);
    }
}
