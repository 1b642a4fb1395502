//! Rendering of analysis results into report files.

mod markdown;

pub use markdown::{MarkdownReport, ReportOptions, REPORT_FILE_NAME};
