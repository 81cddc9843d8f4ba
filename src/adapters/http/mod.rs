//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.

pub mod report;
pub mod research;

// Re-export key types for convenience
pub use report::report_routes;
pub use report::ReportAppState;
pub use research::research_routes;
pub use research::ResearchAppState;
