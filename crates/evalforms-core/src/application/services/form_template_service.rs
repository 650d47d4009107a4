//! Form Template Service - main application orchestrator.
//!
//! Every write goes through the validator first:
//! 1. Validate and normalize the draft
//! 2. Hand the normalized payload to the store
//!
//! A draft that fails validation never reaches the store.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ports::FormTemplateStore, services::EditSession},
    domain::{
        FieldId, FormId, FormTemplateDraft, FormTemplateValidator as validator, ScoreKind,
        StoredFormTemplate,
    },
    error::EvalFormsResult,
};

/// Information about a form template for list displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSummary {
    pub id: FormId,
    pub form_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<ScoreKind>,
    pub field_count: usize,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&StoredFormTemplate> for FormSummary {
    fn from(stored: &StoredFormTemplate) -> Self {
        Self {
            id: stored.id.clone(),
            form_name: stored.body.form_name.clone(),
            score: stored.body.score,
            field_count: stored.body.field_templates.len(),
            updated_at: stored.updated_at.or(stored.created_at),
        }
    }
}

/// Use cases over a form template store.
pub struct FormTemplateService {
    store: Box<dyn FormTemplateStore>,
}

impl FormTemplateService {
    /// Create a new service over the given store.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use evalforms_core::application::{FormTemplateService, ports::*};
    ///
    /// # fn example(store: Box<dyn FormTemplateStore>) {
    /// let service = FormTemplateService::new(store); // impl FormTemplateStore
    /// # }
    /// ```
    pub fn new(store: Box<dyn FormTemplateStore>) -> Self {
        Self { store }
    }

    /// Validate a new form and persist it.
    #[instrument(skip_all, fields(form = %draft.form_name))]
    pub fn create(&self, draft: &FormTemplateDraft) -> EvalFormsResult<StoredFormTemplate> {
        let payload = validator::validate_for_create(draft).inspect_err(|e| {
            warn!(code = e.code(), "Form rejected before submission");
        })?;

        let stored = self.store.create(payload)?;
        info!(id = %stored.id, "Form template created");
        Ok(stored)
    }

    /// Validate an edited form and replace the stored one.
    #[instrument(skip_all, fields(id = %id, form = %draft.form_name))]
    pub fn update(
        &self,
        id: &FormId,
        draft: &FormTemplateDraft,
    ) -> EvalFormsResult<StoredFormTemplate> {
        let payload = validator::validate_for_update(draft).inspect_err(|e| {
            warn!(code = e.code(), "Form rejected before submission");
        })?;
        debug!(new_fields = payload.new_fields().count(), "Submitting update");

        let stored = self.store.update(id, payload)?;
        info!("Form template updated");
        Ok(stored)
    }

    /// Get a form template by id.
    pub fn get(&self, id: &FormId) -> EvalFormsResult<StoredFormTemplate> {
        self.store.get(id)
    }

    /// List all form templates.
    pub fn list(&self) -> EvalFormsResult<Vec<StoredFormTemplate>> {
        self.store.list()
    }

    /// Forms whose name contains `query`, ignoring case. Store order is kept.
    pub fn search(&self, query: &str) -> EvalFormsResult<Vec<StoredFormTemplate>> {
        let query = query.trim();
        Ok(self
            .store
            .list()?
            .into_iter()
            .filter(|form| form.name_matches(query))
            .collect())
    }

    /// Summaries of the forms matching `query`.
    pub fn summaries(&self, query: &str) -> EvalFormsResult<Vec<FormSummary>> {
        Ok(self.search(query)?.iter().map(FormSummary::from).collect())
    }

    /// Remove a form template.
    #[instrument(skip(self))]
    pub fn delete(&self, id: &FormId) -> EvalFormsResult<()> {
        self.store.delete(id)?;
        info!("Form template deleted");
        Ok(())
    }

    /// Remove one persisted field.
    #[instrument(skip(self))]
    pub fn delete_field(&self, id: &FieldId) -> EvalFormsResult<()> {
        self.store.delete_field(id)?;
        info!("Field template deleted");
        Ok(())
    }

    /// Fetch a form and start editing a working copy of it.
    #[instrument(skip(self))]
    pub fn open_edit(&self, id: &FormId) -> EvalFormsResult<EditSession<'_>> {
        let stored = self.store.get(id)?;
        debug!(fields = stored.body.field_templates.len(), "Opened form for edit");
        Ok(EditSession::new(self.store.as_ref(), stored))
    }
}
