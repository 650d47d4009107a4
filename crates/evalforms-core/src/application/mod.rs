//! Application layer for evalforms.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (FormTemplateService, EditSession)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All validation rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{EditSession, FormTemplateService};

// Re-export port traits (for adapter implementation)
pub use ports::FormTemplateStore;

pub use error::ApplicationError;
