//! Report curation domain.
//!
//! Users collect fragments of research output into an ordered report
//! cart: plain text, chart series, or a whole SWOT grid, each with a
//! title and an optional comment. [`ReportStore`] owns that sequence,
//! persists it through the key-value port, and broadcasts snapshots to
//! observers.

mod item;
mod store;

pub use item::{MoveDirection, ReportItem, ReportPayload};
pub use store::{ReportSnapshot, ReportStore, REPORT_STORAGE_KEY};
