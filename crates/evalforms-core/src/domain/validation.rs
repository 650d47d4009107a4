//! Submit-time validation and normalization of form templates.
//!
//! ```text
//! FormTemplateDraft ──validate_for_create──▶ FormTemplate (no field ids)
//!                   ──validate_for_update──▶ FormTemplate (field ids kept)
//!                   └─────────────────────▶ ValidationError (first failing rule)
//! ```
//!
//! Rules run in a fixed order and the first failure wins:
//!
//! 1. `formName` is non-blank                       → `MISSING_NAME`
//! 2. some raw field has both a name and a type     → `NO_VALID_FIELDS` (`NoFields`)
//! 3. `score` is set                                → `MISSING_SCORE`
//! 4. `OTHER` forms carry a non-blank description   → `MISSING_SCALE_DESCRIPTION`
//! 5. the filtered field list is non-empty          → `NO_VALID_FIELDS` (`NoValidFields`)
//!
//! Surviving fields are then numbered 1..=N in their filtered order and the
//! scale description is resolved: `SCORE` always gets the standard rubric.

use tracing::debug;

use crate::domain::{
    entities::{FieldTemplate, FieldTemplateDraft, FormTemplate, FormTemplateDraft},
    error::ValidationError,
    value_objects::{FieldType, ScoreKind},
};

/// The five-level rubric every `SCORE` form carries.
pub const DEFAULT_SCALE_DESCRIPTION: &str = "The purpose of this scale is to evaluate\n\
the trainee's ability to perform this\n\
procedure safely and independently.\n\
With that in mind please use the\n\
scale below to evaluate each item,\n\
irrespective of the resident's level of\n\
training in regards to this case.\n\
Scale:\n\
1 - \"I had to do\" - Requires complete hands on guidance, did not do, or was not given the opportunity to do\n\
2 - \"I had to talk them through\" - Able to perform tasks but requires constant direction\n\
3 - \"I had to prompt them from time to time\" - Demonstrates some independence, but requires intermittent direction\n\
4 - \"I needed to be in the room just in case\" - Independence but unaware of risks and still requires supervision for safe practice\n\
5 - \"I did not need to be there\" - Complete independence, understands risks and performs safely, practice ready";

/// Stateless validator for form template drafts.
pub struct FormTemplateValidator;

impl FormTemplateValidator {
    /// Validate a new form. Field ids are never sent on create.
    pub fn validate_for_create(draft: &FormTemplateDraft) -> Result<FormTemplate, ValidationError> {
        Self::normalize(draft, false)
    }

    /// Validate an edited form. Fields keep their persisted `_id`, so the
    /// store can tell existing fields from new ones.
    pub fn validate_for_update(draft: &FormTemplateDraft) -> Result<FormTemplate, ValidationError> {
        Self::normalize(draft, true)
    }

    /// See [`FieldTemplateDraft::with_type`].
    pub fn apply_type_change(field: FieldTemplateDraft, field_type: FieldType) -> FieldTemplateDraft {
        field.with_type(field_type)
    }

    /// See [`FormTemplateDraft::with_score`].
    pub fn apply_score_change(draft: FormTemplateDraft, score: ScoreKind) -> FormTemplateDraft {
        draft.with_score(score)
    }

    fn normalize(draft: &FormTemplateDraft, keep_ids: bool) -> Result<FormTemplate, ValidationError> {
        if draft.form_name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }

        if !draft
            .field_templates
            .iter()
            .any(FieldTemplateDraft::is_submittable)
        {
            return Err(ValidationError::NoFields);
        }

        let score = draft.score.ok_or(ValidationError::MissingScore)?;

        if score == ScoreKind::Other && draft.scale_description.trim().is_empty() {
            return Err(ValidationError::MissingScaleDescription);
        }

        let field_templates: Vec<FieldTemplate> = draft
            .field_templates
            .iter()
            .filter(|f| f.is_submittable())
            .enumerate()
            .filter_map(|(i, f)| FieldTemplate::from_draft(f, i as u32 + 1, keep_ids))
            .collect();

        if field_templates.is_empty() {
            return Err(ValidationError::NoValidFields);
        }

        let dropped = draft.field_templates.len() - field_templates.len();
        if dropped > 0 {
            debug!(dropped, "Dropped fields without a name or type");
        }

        let scale_description = match score {
            ScoreKind::Other => draft.scale_description.clone(),
            ScoreKind::Score => DEFAULT_SCALE_DESCRIPTION.to_string(),
        };

        Ok(FormTemplate {
            form_name: draft.form_name.clone(),
            score,
            scale_description,
            field_templates,
        })
    }
}
