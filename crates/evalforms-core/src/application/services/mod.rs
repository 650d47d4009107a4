//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "create a form" or "edit a form".

pub mod edit_session;
pub mod form_template_service;

pub use edit_session::EditSession;
pub use form_template_service::{FormSummary, FormTemplateService};
