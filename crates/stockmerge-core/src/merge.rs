//! The per-file orchestrator and merge executor.

use log::{info, warn};
use serde::Serialize;

use crate::config::MergeConfig;
use crate::error::MergeError;
use crate::read::read_worksheet;
use crate::table::Table;
use crate::write::write_table;
use crate::{PROVENANCE_COLUMN, TEMP_LOCK_PREFIX};

/// Per-file outcome reported in the merge summary.
///
/// Serializes exactly like the upstream JSON contract: success entries carry
/// `file`, `rows`, and `missing_columns`; failure entries carry `file` and
/// `error`. Temp-lock files produce no entry at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FileDetail {
    Merged {
        file: String,
        rows: usize,
        missing_columns: Vec<String>,
    },
    Failed {
        file: String,
        error: String,
    },
}

/// Aggregate report for one merge run, attached to the response as metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    /// Row count of the merged result (header row excluded).
    pub total_rows: usize,
    /// Number of files that contributed rows (skipped and failed files do
    /// not count).
    pub file_count: usize,
    /// One entry per processed file, in upload order, failures included.
    pub details: Vec<FileDetail>,
}

/// A finished merge: the serialized workbook plus its summary.
#[derive(Debug)]
pub struct MergeOutput {
    /// The merged workbook, fully written; ready to stream as a download.
    pub bytes: Vec<u8>,
    pub summary: MergeSummary,
}

/// Resolve an uploaded (possibly hostile) filename to a safe base name.
///
/// Directory components in either separator style are stripped and dot
/// segments rejected, so a name like `../../etc/passwd` degrades to its last
/// real component. A name with nothing usable left falls back to
/// `unknown.xlsx`. The `~$` temp-lock prefix is deliberately preserved so
/// the caller can still recognize and skip those files.
pub fn sanitize_filename(raw: &str) -> String {
    let base = raw
        .rsplit(['/', '\\'])
        .find(|segment| !segment.is_empty() && *segment != "." && *segment != "..");

    match base {
        Some(name) => name.trim().to_owned(),
        None => "unknown.xlsx".to_owned(),
    }
}

/// Merge an ordered batch of uploaded workbooks into one.
///
/// Files are processed strictly in upload order: each is parsed (only
/// `config.sheet_name` is read), column-normalized, aligned to
/// `config.target_columns`, and stamped with a `source_file` provenance
/// column. A file that fails to parse contributes a failure detail and never
/// aborts the batch; a temp-lock file (`~$` prefix) is skipped silently.
///
/// Fails only with [`MergeError::NoValidData`] when no file yielded a table,
/// or [`MergeError::Write`] if the merged workbook cannot be serialized.
pub fn merge_workbooks<I, S>(config: &MergeConfig, files: I) -> Result<MergeOutput, MergeError>
where
    I: IntoIterator<Item = (S, Vec<u8>)>,
    S: AsRef<str>,
{
    let mut tables: Vec<Table> = Vec::new();
    let mut details: Vec<FileDetail> = Vec::new();

    for (raw_name, bytes) in files {
        let filename = sanitize_filename(raw_name.as_ref());
        if filename.starts_with(TEMP_LOCK_PREFIX) {
            info!("skipping temporary workbook: {filename}");
            continue;
        }

        info!("processing workbook: {filename}");
        match process_file(config, &filename, &bytes) {
            Ok((table, missing)) => {
                details.push(FileDetail::Merged {
                    file: filename,
                    rows: table.row_count(),
                    missing_columns: missing,
                });
                tables.push(table);
            }
            Err(err) => {
                warn!("failed to process {filename}: {err}");
                details.push(FileDetail::Failed {
                    file: filename,
                    error: err.to_string(),
                });
            }
        }
    }

    if tables.is_empty() {
        return Err(MergeError::NoValidData);
    }

    let mut output_columns = config.target_columns.clone();
    output_columns.push(PROVENANCE_COLUMN.to_owned());

    let mut merged = Table::new(output_columns);
    for table in tables {
        merged.extend_rows(table);
    }

    let summary = MergeSummary {
        total_rows: merged.row_count(),
        file_count: details
            .iter()
            .filter(|d| matches!(d, FileDetail::Merged { .. }))
            .count(),
        details,
    };

    let bytes = write_table(&merged)?;
    Ok(MergeOutput { bytes, summary })
}

/// Parse and schema-align one workbook. Returns the aligned table (with the
/// provenance column already appended) and the missing-column report.
fn process_file(
    config: &MergeConfig,
    filename: &str,
    bytes: &[u8],
) -> Result<(Table, Vec<String>), crate::ParseError> {
    let mut parsed = read_worksheet(bytes, &config.sheet_name)?;
    parsed.normalize_columns();

    let (mut aligned, missing) = parsed.align_to_schema(&config.target_columns);
    if !missing.is_empty() {
        warn!("{filename} missing columns: {missing:?}");
    }

    aligned.append_provenance(PROVENANCE_COLUMN, filename);
    Ok((aligned, missing))
}
