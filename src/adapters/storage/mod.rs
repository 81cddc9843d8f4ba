//! Storage adapters
//!
//! Two implementations of the `KeyValueStore` port back the report cart:
//! [`FileKeyValueStore`] writes each key as a JSON file under a data
//! directory and is what production runs; [`InMemoryKeyValueStore`] keeps
//! everything in a map for tests.

mod file_store;
mod in_memory;

pub use file_store::FileKeyValueStore;
pub use in_memory::InMemoryKeyValueStore;
