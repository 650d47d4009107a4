//! Directory-backed form template store.
//!
//! ```text
//! <root>/
//! ├── 65a1f0c2e4b0a1b2c3d4e5f6.json   ← one pretty-printed record per form
//! └── 8d2e4b1c9a0f7e6d5c4b3a29.json
//! ```
//!
//! Records that fail to parse are skipped when listing (with a `WARN` log)
//! so one bad file does not hide the rest.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use tracing::{debug, instrument, warn};

use evalforms_core::{
    application::{ApplicationError, ports::FormTemplateStore},
    domain::{FieldId, FormId, FormTemplate, StoredFormTemplate},
    error::EvalFormsResult,
};

use super::{ensure_unique_name, into_record, remove_field};

/// Form template store writing one JSON document per form.
pub struct JsonFileStore {
    root: PathBuf,
    /// Serializes read-modify-write sequences.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> EvalFormsResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| storage_error(&root, e, "create store directory"))?;
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, id: &FormId) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }

    fn read_record(&self, path: &Path) -> EvalFormsResult<StoredFormTemplate> {
        let raw = fs::read_to_string(path).map_err(|e| storage_error(path, e, "read record"))?;
        serde_json::from_str(&raw).map_err(|e| {
            ApplicationError::Storage {
                reason: format!("Corrupt record {}: {e}", path.display()),
            }
            .into()
        })
    }

    fn write_record(&self, record: &StoredFormTemplate) -> EvalFormsResult<()> {
        let path = self.record_path(&record.id);
        let json = serde_json::to_string_pretty(record).map_err(|e| ApplicationError::Storage {
            reason: format!("Failed to encode record {}: {e}", record.id),
        })?;
        fs::write(&path, json).map_err(|e| storage_error(&path, e, "write record"))
    }

    fn load_all(&self) -> EvalFormsResult<Vec<StoredFormTemplate>> {
        let entries =
            fs::read_dir(&self.root).map_err(|e| storage_error(&self.root, e, "read store"))?;

        let mut records = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| storage_error(&self.root, e, "read store entry"))?
                .path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match self.read_record(&path) {
                Ok(record) => records.push(record),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable record"),
            }
        }

        records.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(records)
    }

    fn lock(&self) -> EvalFormsResult<std::sync::MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }
}

impl FormTemplateStore for JsonFileStore {
    fn list(&self) -> EvalFormsResult<Vec<StoredFormTemplate>> {
        self.load_all()
    }

    fn get(&self, id: &FormId) -> EvalFormsResult<StoredFormTemplate> {
        let path = self.record_path(id);
        if !path.exists() {
            return Err(ApplicationError::FormNotFound { id: id.clone() }.into());
        }
        self.read_record(&path)
    }

    #[instrument(skip_all, fields(form = %form.form_name()))]
    fn create(&self, form: FormTemplate) -> EvalFormsResult<StoredFormTemplate> {
        let _guard = self.lock()?;
        ensure_unique_name(self.load_all()?.iter(), form.form_name(), None)?;

        let record = into_record(FormId::generate(), form, None);
        self.write_record(&record)?;
        debug!(id = %record.id, "Wrote new record");
        Ok(record)
    }

    #[instrument(skip(self, form))]
    fn update(&self, id: &FormId, form: FormTemplate) -> EvalFormsResult<StoredFormTemplate> {
        let _guard = self.lock()?;
        let existing = self.get(id)?;
        ensure_unique_name(self.load_all()?.iter(), form.form_name(), Some(id))?;

        let record = into_record(id.clone(), form, existing.created_at);
        self.write_record(&record)?;
        Ok(record)
    }

    fn delete(&self, id: &FormId) -> EvalFormsResult<()> {
        let _guard = self.lock()?;
        let path = self.record_path(id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ApplicationError::FormNotFound { id: id.clone() }.into())
            }
            Err(e) => Err(storage_error(&path, e, "delete record")),
        }
    }

    #[instrument(skip(self))]
    fn delete_field(&self, id: &FieldId) -> EvalFormsResult<()> {
        let _guard = self.lock()?;
        for mut record in self.load_all()? {
            if remove_field(&mut record, id) {
                return self.write_record(&record);
            }
        }
        Err(ApplicationError::FieldNotFound { id: id.clone() }.into())
    }
}

fn storage_error(path: &Path, e: io::Error, operation: &str) -> evalforms_core::error::EvalFormsError {
    ApplicationError::Storage {
        reason: format!("Failed to {} at {}: {}", operation, path.display(), e),
    }
    .into()
}
