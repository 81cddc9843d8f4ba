//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `generation` - AI generation clients (Gemini, mock)
//! - `http` - REST API exposure for research and report flows
//! - `storage` - Key-value persistence (file-backed, in-memory)

pub mod generation;
pub mod http;
pub mod storage;

pub use generation::{GeminiClient, GeminiConfig, MockGenerationClient};
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
