pub mod common;
pub mod draft;
pub mod form_template;
pub mod stored;

pub use crate::domain::DomainError;
pub use draft::{FieldTemplateDraft, FormTemplateDraft};
pub use form_template::{FieldKind, FieldTemplate, FieldTemplateDoc, FormTemplate};
pub use stored::StoredFormTemplate;
