//! Output module for crawl reports
//!
//! A run's only output is its sequence of page visits (each logged as it
//! happens) and the report built from them at the end.

pub mod stats;

pub use stats::{print_report, CrawlReport, VisitRecord};
