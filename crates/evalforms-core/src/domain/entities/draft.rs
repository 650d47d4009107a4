//! Draft form templates: the in-memory, not-yet-validated shape an editor
//! works on.
//!
//! Every property is optional or raw. Edits are pure: each operation consumes
//! the draft and returns the new value, so the screen that owns a draft
//! replaces it wholesale on every change.

use serde::{Deserialize, Serialize};

use super::common::{
    lenient, lenient_bool, lenient_id, lenient_items, lenient_list, lenient_or_default,
    lenient_string, optional_section,
};
use crate::domain::{
    validation::DEFAULT_SCALE_DESCRIPTION,
    value_objects::{FieldId, FieldType, Position, Responder, ScoreKind, Section},
};

// ── FieldTemplateDraft ───────────────────────────────────────────────────────

/// One field of a draft, exactly as the editor holds it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldTemplateDraft {
    /// Present only for fields already persisted.
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<FieldId>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub field_type: Option<FieldType>,

    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub position: Option<Position>,

    #[serde(default, deserialize_with = "lenient_or_default")]
    pub response: Responder,

    #[serde(default, with = "optional_section")]
    pub section: Option<Section>,

    #[serde(default, deserialize_with = "lenient_bool")]
    pub has_details: bool,

    #[serde(default, deserialize_with = "lenient_string")]
    pub details: String,

    #[serde(
        default,
        deserialize_with = "lenient_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub options: Option<Vec<String>>,

    #[serde(
        default,
        deserialize_with = "lenient_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub scale_options: Option<Vec<String>>,

    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub order: Option<u32>,
}

impl FieldTemplateDraft {
    /// A freshly added field: text, left column, both option lists empty.
    pub fn blank() -> Self {
        Self {
            id: None,
            name: String::new(),
            field_type: Some(FieldType::Text),
            position: Some(Position::Left),
            response: Responder::Unassigned,
            section: None,
            has_details: false,
            details: String::new(),
            options: Some(Vec::new()),
            scale_options: Some(Vec::new()),
            order: None,
        }
    }

    /// A named field of the given type, option lists initialised for it.
    pub fn named(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
        .with_type(field_type)
    }

    /// Fields missing a name or a type are dropped on submit.
    pub fn is_submittable(&self) -> bool {
        !self.name.is_empty() && self.field_type.is_some()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Change the type. The option list the new type uses is reset to empty;
    /// the other one is unset.
    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self.options = field_type.uses_options().then(Vec::new);
        self.scale_options = field_type.uses_scale_options().then(Vec::new);
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_response(mut self, response: Responder) -> Self {
        self.response = response;
        self
    }

    pub fn with_section(mut self, section: Option<Section>) -> Self {
        self.section = section;
        self
    }

    /// Turning details off clears the text.
    pub fn with_details(mut self, has_details: bool, details: impl Into<String>) -> Self {
        self.has_details = has_details;
        self.details = if has_details {
            details.into()
        } else {
            String::new()
        };
        self
    }

    /// The option list the current type edits, if any.
    fn active_options_mut(&mut self) -> Option<&mut Vec<String>> {
        match self.field_type {
            Some(ty) if ty.uses_options() => Some(self.options.get_or_insert_with(Vec::new)),
            Some(ty) if ty.uses_scale_options() => {
                Some(self.scale_options.get_or_insert_with(Vec::new))
            }
            _ => None,
        }
    }

    /// Append to the active option list. No-op for types without options.
    pub fn with_option_added(mut self, value: impl Into<String>) -> Self {
        if let Some(list) = self.active_options_mut() {
            list.push(value.into());
        }
        self
    }

    /// Overwrite an entry of the active option list; out-of-range is a no-op.
    pub fn with_option_set(mut self, index: usize, value: impl Into<String>) -> Self {
        if let Some(slot) = self.active_options_mut().and_then(|l| l.get_mut(index)) {
            *slot = value.into();
        }
        self
    }

    /// Remove an entry of the active option list; out-of-range is a no-op.
    pub fn with_option_removed(mut self, index: usize) -> Self {
        if let Some(list) = self.active_options_mut() {
            if index < list.len() {
                list.remove(index);
            }
        }
        self
    }
}

// ── FormTemplateDraft ────────────────────────────────────────────────────────

/// A form template under edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormTemplateDraft {
    #[serde(default, deserialize_with = "lenient_string")]
    pub form_name: String,

    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub score: Option<ScoreKind>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub scale_description: String,

    /// Insertion order is display order.
    #[serde(default, deserialize_with = "lenient_items")]
    pub field_templates: Vec<FieldTemplateDraft>,
}

impl FormTemplateDraft {
    pub fn new(form_name: impl Into<String>) -> Self {
        Self {
            form_name: form_name.into(),
            ..Self::default()
        }
    }

    pub fn with_form_name(mut self, form_name: impl Into<String>) -> Self {
        self.form_name = form_name.into();
        self
    }

    /// Change the scoring scheme.
    ///
    /// Switching to `SCORE` always installs the standard rubric. Switching to
    /// `OTHER` keeps whatever text the draft holds, which may be the standard
    /// rubric left over from a previous `SCORE` selection.
    pub fn with_score(mut self, score: ScoreKind) -> Self {
        self.score = Some(score);
        if score == ScoreKind::Score {
            self.scale_description = DEFAULT_SCALE_DESCRIPTION.to_string();
        }
        self
    }

    /// Set the rubric text. Ignored while scored as `SCORE`, where the text
    /// is fixed.
    pub fn with_scale_description(mut self, text: impl Into<String>) -> Self {
        if self.score != Some(ScoreKind::Score) {
            self.scale_description = text.into();
        }
        self
    }

    pub fn with_field(mut self, field: FieldTemplateDraft) -> Self {
        self.field_templates.push(field);
        self
    }

    /// Apply `edit` to the field at `index`; out-of-range is a no-op.
    pub fn with_field_edited(
        mut self,
        index: usize,
        edit: impl FnOnce(FieldTemplateDraft) -> FieldTemplateDraft,
    ) -> Self {
        if let Some(slot) = self.field_templates.get_mut(index) {
            *slot = edit(std::mem::take(slot));
        }
        self
    }

    /// Remove the field at `index`, returning it alongside the new draft.
    pub fn without_field(mut self, index: usize) -> (Self, Option<FieldTemplateDraft>) {
        let removed = (index < self.field_templates.len()).then(|| self.field_templates.remove(index));
        (self, removed)
    }
}
