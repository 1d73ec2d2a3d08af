//! Cloud Report - State of Cloud report generator
//!
//! Turns the mapping extracts produced by a drift scan into a single markdown
//! report covering unmanaged resources, their cost, security findings,
//! drifted managed resources and the cloud actors behind the changes.

pub mod aggregate;
pub mod config;
pub mod mappings;
pub mod report;

mod error;

pub use aggregate::{Outcome, Summaries};
pub use config::{JobInfo, MappingPaths};
pub use error::ReportError;
pub use mappings::Mappings;
pub use report::{Document, MarkdownFile, ReportSink, generate_report, generate_report_at};
