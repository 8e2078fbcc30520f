//! HTTP boundary for the inventory workbook merger.
//!
//! One route does the real work: `POST /api/merge` accepts a multipart
//! upload of `.xlsx` workbooks and responds with the merged workbook as a
//! file download, the per-file merge report riding along in an
//! `X-Merge-Report` header.

pub mod handlers;
pub mod routes;
