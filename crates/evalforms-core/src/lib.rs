//! evalforms Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for managing
//! evaluation form templates, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          evalforms-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (FormTemplateService, EditSession)     │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │       (Driven: FormTemplateStore)       │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    evalforms-adapters (Infrastructure)  │
//! │     (InMemoryStore, JsonFileStore)      │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (FormTemplateDraft, FormTemplate,       │
//! │  FormTemplateValidator)                 │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use evalforms_core::prelude::*;
//!
//! # fn example(store: Box<dyn FormTemplateStore>) {
//! let draft = FormTemplateDraft::new("Suturing")
//!     .with_score(ScoreKind::Score)
//!     .with_field(FieldTemplateDraft::named("Knot tying", FieldType::Scale));
//!
//! // Offline: validate only
//! let payload = FormTemplateValidator::validate_for_create(&draft).unwrap();
//!
//! // With a store: validate and persist
//! let service = FormTemplateService::new(store);
//! let stored = service.create(&draft).unwrap();
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, EditSession, FormTemplateService, ports::FormTemplateStore,
        services::FormSummary,
    };
    pub use crate::domain::{
        DEFAULT_SCALE_DESCRIPTION, FieldId, FieldKind, FieldTemplate, FieldTemplateDraft,
        FieldType, FormId, FormTemplate, FormTemplateDraft, FormTemplateValidator, Position,
        Responder, ScoreKind, Section, StoredFormTemplate, ValidationError,
    };
    pub use crate::error::{EvalFormsError, EvalFormsResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
