//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `GenerationClient` - Generative AI provider the research flows call
//! - `KeyValueStore` - Persisted key-value documents (the report cart)

mod generation;
mod key_value;

pub use generation::{
    GenerationClient, GenerationError, GenerationReply, GenerationRequest, GroundingLink,
    ImageAttachment,
};
pub use key_value::{KeyValueError, KeyValueStore};
