use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::lenient;
use super::draft::FormTemplateDraft;
use crate::domain::value_objects::FormId;

/// A form template as persisted: identity, timestamps, and the body.
///
/// The body is read back as a draft, never as a validated [`FormTemplate`]:
/// records written by older clients may be partial, and read-only views must
/// still be able to show them.
///
/// [`FormTemplate`]: super::form_template::FormTemplate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFormTemplate {
    #[serde(rename = "_id")]
    pub id: FormId,

    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub body: FormTemplateDraft,
}

impl StoredFormTemplate {
    pub fn form_name(&self) -> &str {
        &self.body.form_name
    }

    /// Case-insensitive substring match on the form name. An empty query
    /// matches everything.
    pub fn name_matches(&self, query: &str) -> bool {
        query.is_empty()
            || self
                .body
                .form_name
                .to_lowercase()
                .contains(&query.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ScoreKind;

    #[test]
    fn parses_record_with_flattened_body() {
        let json = r#"{
            "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
            "createdAt": "2025-01-10T09:30:00Z",
            "updatedAt": "not a date",
            "formName": "Suturing",
            "score": "SCORE",
            "fieldTemplates": []
        }"#;
        let stored: StoredFormTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(stored.id.as_str(), "65a1f0c2e4b0a1b2c3d4e5f6");
        assert!(stored.created_at.is_some());
        assert!(stored.updated_at.is_none());
        assert_eq!(stored.body.score, Some(ScoreKind::Score));
        assert_eq!(stored.form_name(), "Suturing");
    }

    #[test]
    fn malformed_field_properties_still_parse() {
        let json = r#"{
            "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
            "formName": 1999,
            "scaleDescription": null,
            "fieldTemplates": [
                { "_id": 12, "name": 42, "type": "text", "hasDetails": "true", "details": false },
                "not a field",
                { "name": "Q2", "type": "select", "options": "a,b" }
            ]
        }"#;
        let stored: StoredFormTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(stored.form_name(), "1999");
        assert_eq!(stored.body.scale_description, "");

        let fields = &stored.body.field_templates;
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].id, None);
        assert_eq!(fields[0].name, "42");
        assert!(fields[0].has_details);
        assert_eq!(fields[0].details, "false");
        assert_eq!(fields[1].name, "Q2");
        assert_eq!(fields[1].options, None);
    }

    #[test]
    fn name_search_is_case_insensitive() {
        let stored = StoredFormTemplate {
            id: FormId::generate(),
            created_at: None,
            updated_at: None,
            body: FormTemplateDraft::new("Central Line Insertion"),
        };
        assert!(stored.name_matches(""));
        assert!(stored.name_matches("line"));
        assert!(stored.name_matches("CENTRAL"));
        assert!(!stored.name_matches("lumbar"));
    }
}
