//! Integration tests for evalforms-core through its public API.

use std::sync::Mutex;

use evalforms_core::prelude::*;
use serde_json::json;

/// Minimal store: a vector of records behind a mutex.
#[derive(Default)]
struct VecStore {
    forms: Mutex<Vec<StoredFormTemplate>>,
}

impl VecStore {
    fn record(form: FormTemplate, id: FormId) -> StoredFormTemplate {
        StoredFormTemplate {
            id,
            created_at: None,
            updated_at: None,
            body: form.with_assigned_field_ids(FieldId::generate).into(),
        }
    }
}

impl FormTemplateStore for VecStore {
    fn list(&self) -> EvalFormsResult<Vec<StoredFormTemplate>> {
        Ok(self.forms.lock().unwrap().clone())
    }

    fn get(&self, id: &FormId) -> EvalFormsResult<StoredFormTemplate> {
        self.forms
            .lock()
            .unwrap()
            .iter()
            .find(|f| &f.id == id)
            .cloned()
            .ok_or_else(|| ApplicationError::FormNotFound { id: id.clone() }.into())
    }

    fn create(&self, form: FormTemplate) -> EvalFormsResult<StoredFormTemplate> {
        let mut forms = self.forms.lock().unwrap();
        if forms.iter().any(|f| f.form_name() == form.form_name()) {
            return Err(ApplicationError::DuplicateFormName {
                name: form.form_name().into(),
            }
            .into());
        }
        let record = Self::record(form, FormId::generate());
        forms.push(record.clone());
        Ok(record)
    }

    fn update(&self, id: &FormId, form: FormTemplate) -> EvalFormsResult<StoredFormTemplate> {
        let mut forms = self.forms.lock().unwrap();
        let slot = forms
            .iter_mut()
            .find(|f| &f.id == id)
            .ok_or_else(|| ApplicationError::FormNotFound { id: id.clone() })?;
        *slot = Self::record(form, id.clone());
        Ok(slot.clone())
    }

    fn delete(&self, id: &FormId) -> EvalFormsResult<()> {
        let mut forms = self.forms.lock().unwrap();
        let before = forms.len();
        forms.retain(|f| &f.id != id);
        if forms.len() == before {
            return Err(ApplicationError::FormNotFound { id: id.clone() }.into());
        }
        Ok(())
    }

    fn delete_field(&self, id: &FieldId) -> EvalFormsResult<()> {
        for form in self.forms.lock().unwrap().iter_mut() {
            let fields = &mut form.body.field_templates;
            if let Some(i) = fields.iter().position(|f| f.id.as_ref() == Some(id)) {
                fields.remove(i);
                return Ok(());
            }
        }
        Err(ApplicationError::FieldNotFound { id: id.clone() }.into())
    }
}

fn suturing() -> FormTemplateDraft {
    FormTemplateDraft::new("Suturing")
        .with_score(ScoreKind::Other)
        .with_scale_description("1 = poor, 5 = excellent")
        .with_field(
            FieldTemplateDraft::named("Grade", FieldType::Select)
                .with_option_added("Pass")
                .with_option_added("Fail"),
        )
        .with_field(FieldTemplateDraft::blank())
        .with_field(FieldTemplateDraft::named("Notes", FieldType::TextArea).with_details(true, "Optional"))
}

#[test]
fn create_edit_commit_workflow() {
    let service = FormTemplateService::new(Box::new(VecStore::default()));

    let created = service.create(&suturing()).unwrap();
    assert_eq!(created.body.field_templates.len(), 2);
    assert!(created.body.field_templates.iter().all(|f| f.id.is_some()));

    let mut session = service.open_edit(&created.id).unwrap();
    let extended = session
        .draft()
        .clone()
        .with_field(FieldTemplateDraft::named("Date", FieldType::Date));
    session.replace_draft(extended);
    let removed = session.delete_field(0).unwrap();
    assert_eq!(removed.name, "Grade");

    let saved = session.commit().unwrap();
    let names: Vec<_> = saved
        .body
        .field_templates
        .iter()
        .map(|f| (f.name.as_str(), f.order))
        .collect();
    assert_eq!(names, vec![("Notes", Some(1)), ("Date", Some(2))]);
    assert_eq!(saved.body.field_templates[0].id, created.body.field_templates[1].id);
}

#[test]
fn duplicate_names_are_rejected_by_the_store() {
    let service = FormTemplateService::new(Box::new(VecStore::default()));
    service.create(&suturing()).unwrap();

    let err = service.create(&suturing()).unwrap_err();
    assert_eq!(err.code(), Some("DUPLICATE_FORM_NAME"));
    assert_eq!(service.list().unwrap().len(), 1);
}

#[test]
fn wire_document_shape() {
    let payload = FormTemplateValidator::validate_for_create(&suturing()).unwrap();
    let doc = serde_json::to_value(&payload).unwrap();

    assert_eq!(
        doc,
        json!({
            "formName": "Suturing",
            "score": "OTHER",
            "scaleDescription": "1 = poor, 5 = excellent",
            "fieldTemplates": [
                {
                    "name": "Grade",
                    "type": "select",
                    "position": "left",
                    "response": "",
                    "section": "",
                    "hasDetails": false,
                    "details": "",
                    "options": ["Pass", "Fail"],
                    "scaleOptions": [],
                    "order": 1
                },
                {
                    "name": "Notes",
                    "type": "textArea",
                    "position": "left",
                    "response": "",
                    "section": "",
                    "hasDetails": true,
                    "details": "Optional",
                    "options": [],
                    "scaleOptions": [],
                    "order": 2
                }
            ]
        })
    );
}

#[test]
fn payload_read_back_as_draft_validates_to_the_same_payload() {
    let first = FormTemplateValidator::validate_for_create(&suturing()).unwrap();
    let text = serde_json::to_string(&first).unwrap();
    let draft: FormTemplateDraft = serde_json::from_str(&text).unwrap();

    let second = FormTemplateValidator::validate_for_create(&draft).unwrap();
    assert_eq!(first, second);
}

#[test]
fn hand_written_draft_with_junk_values() {
    let draft: FormTemplateDraft = serde_json::from_value(json!({
        "formName": "OSCE station",
        "score": "SCORE",
        "fieldTemplates": [
            { "name": "History", "type": "dropdown" },
            { "name": "Exam", "type": "scale", "section": 12, "scaleOptions": ["1", 2, "3"] },
            { "type": "text" }
        ]
    }))
    .unwrap();

    let payload = FormTemplateValidator::validate_for_create(&draft).unwrap();
    assert_eq!(payload.scale_description(), DEFAULT_SCALE_DESCRIPTION);
    assert_eq!(payload.field_templates().len(), 1);

    let exam = &payload.field_templates()[0];
    assert_eq!(exam.name(), "Exam");
    assert_eq!(exam.order(), 1);
    assert_eq!(exam.section(), None);
    assert_eq!(
        exam.kind(),
        &FieldKind::Scale {
            scale_options: vec!["1".into(), "3".into()]
        }
    );
}
