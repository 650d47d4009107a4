//! Infrastructure adapters for evalforms.
//!
//! This crate implements the ports defined in `evalforms-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod draft_loader;
pub mod store;

// Re-export commonly used adapters
pub use draft_loader::{DraftLoadError, DraftLoader, LoadedDraft, load_draft};
pub use store::{InMemoryStore, JsonFileStore};
