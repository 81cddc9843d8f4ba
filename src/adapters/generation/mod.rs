//! Generation Adapters.
//!
//! Implementations of the GenerationClient port.
//!
//! ## Available Adapters
//!
//! - `GeminiClient` - Google Gemini API with web-search grounding
//! - `MockGenerationClient` - Configurable mock for testing

mod gemini;
mod mock;

pub use gemini::{GeminiClient, GeminiConfig};
pub use mock::{MockError, MockGenerationClient, MockReply};
