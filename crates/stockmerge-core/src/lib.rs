//! Inventory workbook merging.
//!
//! Given an ordered batch of uploaded `.xlsx` workbooks, this crate reads one
//! configured worksheet from each, trims whitespace from column headers,
//! aligns every file to a fixed target schema (absent columns are added empty
//! rather than treated as errors), appends a `source_file` provenance column,
//! and concatenates everything into a single serialized workbook.
//!
//! The pipeline is intentionally forgiving per file and strict per batch: a
//! workbook that fails to parse is reported in the merge summary and skipped,
//! but a batch in which *no* workbook yielded data fails outright with
//! [`MergeError::NoValidData`].

mod config;
mod error;
mod merge;
mod read;
mod table;
mod write;

pub use config::MergeConfig;
pub use error::{MergeError, ParseError};
pub use merge::{merge_workbooks, sanitize_filename, FileDetail, MergeOutput, MergeSummary};
pub use table::{CellValue, Table};

/// Column name appended to every merged row, recording which uploaded file
/// the row came from.
pub const PROVENANCE_COLUMN: &str = "source_file";

/// Filename prefix used by spreadsheet editors for temporary lock files.
/// Such files hold no workbook data and are skipped without being reported.
pub const TEMP_LOCK_PREFIX: &str = "~$";
