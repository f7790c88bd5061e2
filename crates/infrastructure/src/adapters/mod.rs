//! Adapters implementing application ports

mod report_source_adapter;

pub use report_source_adapter::ReportSourceAdapter;
