use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::{header, HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use stockmerge_core::{merge_workbooks, MergeConfig, MergeError};

/// MIME type of an Office Open XML spreadsheet.
pub const XLSX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Response header carrying the JSON-encoded merge summary.
pub const MERGE_REPORT_HEADER: &str = "x-merge-report";

type ApiError = (StatusCode, Json<serde_json::Value>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": message.into() })),
    )
}

fn internal_error(message: impl Into<String>) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message.into() })),
    )
}

/// `POST /api/merge`: merge uploaded workbooks into one download.
///
/// File parts named `files` are collected in upload order; an empty upload
/// is rejected before the core is invoked. A batch with no usable data
/// surfaces the core's error message verbatim as HTTP 400. On success the
/// merged workbook streams back as an attachment with the merge summary in
/// [`MERGE_REPORT_HEADER`].
pub async fn merge(
    State(config): State<Arc<MergeConfig>>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut files: Vec<(String, Vec<u8>)> = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| bad_request(format!("invalid multipart request: {err}")))?
    {
        if field.name() != Some("files") {
            continue;
        }
        let filename = field.file_name().unwrap_or("unknown.xlsx").to_owned();
        let bytes = field
            .bytes()
            .await
            .map_err(|err| bad_request(format!("failed to read upload {filename}: {err}")))?;
        files.push((filename, bytes.to_vec()));
    }

    if files.is_empty() {
        return Err(bad_request("please choose at least one Excel file"));
    }

    tracing::info!(file_count = files.len(), "merging uploaded workbooks");

    // The merge is synchronous CPU-bound work; keep it off the async runtime.
    let merge_config = Arc::clone(&config);
    let result = tokio::task::spawn_blocking(move || merge_workbooks(&merge_config, files))
        .await
        .map_err(|err| {
            tracing::error!("merge task failed: {err}");
            internal_error("merge task failed")
        })?;

    let output = match result {
        Ok(output) => output,
        Err(err @ MergeError::NoValidData) => return Err(bad_request(err.to_string())),
        Err(err) => {
            tracing::error!("failed to produce merged workbook: {err}");
            return Err(internal_error(err.to_string()));
        }
    };

    let report = serde_json::to_string(&output.summary)
        .map_err(|err| internal_error(format!("failed to encode merge report: {err}")))?;

    let headers = [
        (header::CONTENT_TYPE, XLSX_MIME.to_owned()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", config.output_filename),
        ),
        (HeaderName::from_static(MERGE_REPORT_HEADER), report),
    ];
    Ok((headers, output.bytes).into_response())
}
