//! Report rendering in console, JSON, Markdown, and HTML formats

pub mod formatter;
pub mod report;

pub use formatter::{OutputFormatter, ReportGenerator};
pub use report::AnalysisReport;
