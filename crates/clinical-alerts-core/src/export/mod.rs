//! Export functionality for alert reports.

mod report;

pub use report::*;
