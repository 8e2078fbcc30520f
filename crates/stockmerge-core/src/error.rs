use thiserror::Error;

/// Failure to read one uploaded workbook. Recovered per file: the batch
/// continues and the failure lands in the merge summary instead.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read `.xlsx`: {0}")]
    Xlsx(#[from] calamine::XlsxError),
}

/// Batch-level failure of a merge run.
#[derive(Debug, Error)]
pub enum MergeError {
    /// Every uploaded file was either a temp-lock file or unparsable; there
    /// is nothing to merge. The only whole-request failure mode.
    #[error("no valid workbook data to merge")]
    NoValidData,

    #[error("failed to serialize merged workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),
}
