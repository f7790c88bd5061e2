//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod report_source_port;

#[cfg(test)]
pub use report_source_port::MockReportSourcePort;
pub use report_source_port::ReportSourcePort;
