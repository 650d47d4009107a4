//! Normalized form templates: what a draft becomes once it passes validation.
//!
//! ```text
//! FormTemplate (payload sent to persistence)
//! ├── form_name, score, scale_description
//! └── Vec<FieldTemplate>           order = 1..=N, dense
//!      └── FieldKind               tagged by type
//!           ├── Text | TextArea | Date
//!           ├── Select   { options }
//!           ├── Checkbox { options }
//!           └── Scale    { scale_options }
//! ```
//!
//! Values here are only built by `FormTemplateValidator`, so the invariants
//! (non-blank name, at least one field, dense 1-based order, fixed rubric for
//! `SCORE`) hold for every instance. On the wire a field is still the flat
//! document the persistence API expects; [`FieldTemplateDoc`] is that shape.

use std::collections::HashSet;

use serde::Serialize;

use super::common::optional_section;
use super::draft::{FieldTemplateDraft, FormTemplateDraft};
use crate::domain::value_objects::{FieldId, FieldType, Position, Responder, ScoreKind, Section};

// ── FieldKind ────────────────────────────────────────────────────────────────

/// A field's type together with the data only that type carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Date,
    Select { options: Vec<String> },
    Checkbox { options: Vec<String> },
    Scale { scale_options: Vec<String> },
}

impl FieldKind {
    /// Build the kind for `field_type`, taking only the list that type uses.
    pub(crate) fn from_parts(
        field_type: FieldType,
        options: Option<&Vec<String>>,
        scale_options: Option<&Vec<String>>,
    ) -> Self {
        let list = |l: Option<&Vec<String>>| l.cloned().unwrap_or_default();
        match field_type {
            FieldType::Text => Self::Text,
            FieldType::TextArea => Self::TextArea,
            FieldType::Date => Self::Date,
            FieldType::Select => Self::Select {
                options: list(options),
            },
            FieldType::Checkbox => Self::Checkbox {
                options: list(options),
            },
            FieldType::Scale => Self::Scale {
                scale_options: list(scale_options),
            },
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Text => FieldType::Text,
            Self::TextArea => FieldType::TextArea,
            Self::Date => FieldType::Date,
            Self::Select { .. } => FieldType::Select,
            Self::Checkbox { .. } => FieldType::Checkbox,
            Self::Scale { .. } => FieldType::Scale,
        }
    }

    /// Choice list for select/checkbox fields; empty otherwise.
    pub fn options(&self) -> &[String] {
        match self {
            Self::Select { options } | Self::Checkbox { options } => options,
            _ => &[],
        }
    }

    /// Scale labels for scale fields; empty otherwise.
    pub fn scale_options(&self) -> &[String] {
        match self {
            Self::Scale { scale_options } => scale_options,
            _ => &[],
        }
    }
}

// ── FieldTemplate ────────────────────────────────────────────────────────────

/// A validated field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "FieldTemplateDoc")]
pub struct FieldTemplate {
    pub(crate) id: Option<FieldId>,
    pub(crate) name: String,
    pub(crate) kind: FieldKind,
    pub(crate) position: Position,
    pub(crate) response: Responder,
    pub(crate) section: Option<Section>,
    /// `Some` iff details are enabled.
    pub(crate) details: Option<String>,
    pub(crate) order: u32,
}

impl FieldTemplate {
    /// Normalize a submittable draft field into its final slot.
    ///
    /// Returns `None` for fields missing a name or a type.
    pub(crate) fn from_draft(field: &FieldTemplateDraft, order: u32, keep_id: bool) -> Option<Self> {
        if !field.is_submittable() {
            return None;
        }
        let field_type = field.field_type?;
        Some(Self {
            id: if keep_id { field.id.clone() } else { None },
            name: field.name.clone(),
            kind: FieldKind::from_parts(
                field_type,
                field.options.as_ref(),
                field.scale_options.as_ref(),
            ),
            position: field.position.unwrap_or_default(),
            response: field.response,
            section: field.section,
            details: field.has_details.then(|| field.details.clone()),
            order,
        })
    }

    pub fn id(&self) -> Option<&FieldId> {
        self.id.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn response(&self) -> Responder {
        self.response
    }

    pub fn section(&self) -> Option<Section> {
        self.section
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// 1-based position among the submitted fields.
    pub fn order(&self) -> u32 {
        self.order
    }
}

/// Flat wire document of a field.
///
/// The list the type does not use is written as `[]`; `_id` only appears for
/// fields that were already persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldTemplateDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<FieldId>,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub position: Position,
    pub response: Responder,
    #[serde(serialize_with = "optional_section::serialize")]
    pub section: Option<Section>,
    pub has_details: bool,
    pub details: String,
    pub options: Vec<String>,
    pub scale_options: Vec<String>,
    pub order: u32,
}

impl From<FieldTemplate> for FieldTemplateDoc {
    fn from(field: FieldTemplate) -> Self {
        let field_type = field.kind.field_type();
        let (options, scale_options) = match field.kind {
            FieldKind::Select { options } | FieldKind::Checkbox { options } => {
                (options, Vec::new())
            }
            FieldKind::Scale { scale_options } => (Vec::new(), scale_options),
            FieldKind::Text | FieldKind::TextArea | FieldKind::Date => (Vec::new(), Vec::new()),
        };
        Self {
            id: field.id,
            name: field.name,
            field_type,
            position: field.position,
            response: field.response,
            section: field.section,
            has_details: field.details.is_some(),
            details: field.details.unwrap_or_default(),
            options,
            scale_options,
            order: field.order,
        }
    }
}

impl From<FieldTemplate> for FieldTemplateDraft {
    fn from(field: FieldTemplate) -> Self {
        let doc = FieldTemplateDoc::from(field);
        Self {
            id: doc.id,
            name: doc.name,
            field_type: Some(doc.field_type),
            position: Some(doc.position),
            response: doc.response,
            section: doc.section,
            has_details: doc.has_details,
            details: doc.details,
            options: Some(doc.options),
            scale_options: Some(doc.scale_options),
            order: Some(doc.order),
        }
    }
}

// ── FormTemplate ─────────────────────────────────────────────────────────────

/// A validated, submittable form template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormTemplate {
    pub(crate) form_name: String,
    pub(crate) score: ScoreKind,
    pub(crate) scale_description: String,
    pub(crate) field_templates: Vec<FieldTemplate>,
}

impl FormTemplate {
    pub fn form_name(&self) -> &str {
        &self.form_name
    }

    pub fn score(&self) -> ScoreKind {
        self.score
    }

    pub fn scale_description(&self) -> &str {
        &self.scale_description
    }

    pub fn field_templates(&self) -> &[FieldTemplate] {
        &self.field_templates
    }

    /// Fields that carry no persisted id yet.
    pub fn new_fields(&self) -> impl Iterator<Item = &FieldTemplate> {
        self.field_templates.iter().filter(|f| f.id.is_none())
    }

    /// Give a fresh id to every field whose id is missing, malformed, or
    /// already used by an earlier field of this payload. Used by stores when
    /// they persist a payload, so each stored id names exactly one field.
    pub fn with_assigned_field_ids(mut self, mut next_id: impl FnMut() -> FieldId) -> Self {
        let mut seen = HashSet::new();
        for field in &mut self.field_templates {
            let keep = field
                .id
                .as_ref()
                .is_some_and(|id| id.is_well_formed() && !seen.contains(id));
            if !keep {
                field.id = Some(next_id());
            }
            if let Some(id) = &field.id {
                seen.insert(id.clone());
            }
        }
        self
    }

    /// Ids of every persisted field in this payload.
    pub fn field_ids(&self) -> impl Iterator<Item = &FieldId> {
        self.field_templates.iter().filter_map(|f| f.id.as_ref())
    }
}

impl From<FormTemplate> for FormTemplateDraft {
    fn from(form: FormTemplate) -> Self {
        Self {
            form_name: form.form_name,
            score: Some(form.score),
            scale_description: form.scale_description,
            field_templates: form.field_templates.into_iter().map(Into::into).collect(),
        }
    }
}
