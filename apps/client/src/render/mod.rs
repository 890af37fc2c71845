// Presentation of analysis results: a plain-text report for the terminal and
// a styled HTML preview of the optimized resume for export.

pub mod preview;
pub mod report;
