#![forbid(unsafe_code)]

pub mod documents;
pub mod gateway;
pub mod json;
pub mod memory;

pub use documents::{Documents, keys};
pub use gateway::{DocumentStore, StorageError, load_optional, load_or_default, save_doc};
pub use json::JsonFileStore;
pub use memory::InMemoryStore;
