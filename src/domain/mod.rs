//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps)
//! - `research` - Research flows: forms, prompts, reply extraction, result shapes
//! - `report` - Report cart curation and persistence
pub mod foundation;
pub mod report;
pub mod research;
