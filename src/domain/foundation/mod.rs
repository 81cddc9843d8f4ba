//! Foundation value objects shared across the domain.
//!
//! The building blocks every other domain module leans on:
//! strongly-typed identifiers and timestamps. They carry no behavior
//! beyond what the types themselves guarantee.

mod ids;
mod timestamp;

pub use ids::ReportItemId;
pub use timestamp::Timestamp;
