//! Filesystem draft loader.
//!
//! Reads draft form templates from disk so they can be validated offline or
//! submitted to a store.
//!
//! # Accepted inputs
//!
//! ```text
//! drafts/
//! ├── suturing.json        ← JSON draft (same shape as the wire document)
//! ├── central-line.toml    ← TOML draft (same keys)
//! ├── .scratch.json        ← hidden: skipped
//! └── archived/
//!     └── lumbar.json      ← nested directories are walked
//! ```
//!
//! Drafts are read leniently: unknown enumeration strings and missing keys
//! become "unset" and are left for the validator to judge. Only files that
//! are not valid JSON/TOML at all fail to load.

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, instrument, warn};
use walkdir::{DirEntry, WalkDir};

use evalforms_core::domain::FormTemplateDraft;

/// Why a draft file could not be loaded.
#[derive(Debug, Error)]
pub enum DraftLoadError {
    #[error("Path not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("Unsupported draft format: {} (expected .json or .toml)", path.display())]
    UnsupportedFormat { path: PathBuf },
}

impl DraftLoadError {
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path }
            | Self::Io { path, .. }
            | Self::Parse { path, .. }
            | Self::UnsupportedFormat { path } => path,
        }
    }
}

/// Draft file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftFormat {
    Json,
    Toml,
}

impl DraftFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// One draft file and what came of reading it.
#[derive(Debug)]
pub struct LoadedDraft {
    pub path: PathBuf,
    pub draft: Result<FormTemplateDraft, DraftLoadError>,
}

/// Parse a draft from text.
pub fn parse_draft(
    raw: &str,
    format: DraftFormat,
    path: &Path,
) -> Result<FormTemplateDraft, DraftLoadError> {
    let parsed = match format {
        DraftFormat::Json => serde_json::from_str(raw).map_err(|e| e.to_string()),
        DraftFormat::Toml => toml::from_str(raw).map_err(|e| e.to_string()),
    };
    parsed.map_err(|reason| DraftLoadError::Parse {
        path: path.to_path_buf(),
        reason,
    })
}

/// Load a single draft file.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn load_draft(path: &Path) -> Result<FormTemplateDraft, DraftLoadError> {
    let format = DraftFormat::from_path(path).ok_or_else(|| DraftLoadError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let raw = fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            DraftLoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            DraftLoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let draft = parse_draft(&raw, format, path)?;
    debug!(form = %draft.form_name, fields = draft.field_templates.len(), "Loaded draft");
    Ok(draft)
}

/// Loads every draft under a file or directory.
///
/// A file path yields exactly one entry, whatever its extension. A directory
/// is walked recursively in file-name order; hidden entries and files that
/// are not `.json`/`.toml` are skipped.
pub struct DraftLoader {
    root: PathBuf,
}

impl DraftLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load all drafts. Each file's failure is reported in its own entry
    /// rather than aborting the batch.
    ///
    /// # Errors
    ///
    /// Returns [`DraftLoadError::NotFound`] if the root does not exist.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn load_all(&self) -> Result<Vec<LoadedDraft>, DraftLoadError> {
        if !self.root.exists() {
            return Err(DraftLoadError::NotFound {
                path: self.root.clone(),
            });
        }

        if self.root.is_file() {
            return Ok(vec![LoadedDraft {
                path: self.root.clone(),
                draft: load_draft(&self.root),
            }]);
        }

        let mut loaded = Vec::new();
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_hidden(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() || DraftFormat::from_path(entry.path()).is_none() {
                continue;
            }
            loaded.push(LoadedDraft {
                path: entry.path().to_path_buf(),
                draft: load_draft(entry.path()),
            });
        }

        debug!(count = loaded.len(), "Finished loading drafts");
        Ok(loaded)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use evalforms_core::domain::{FieldType, ScoreKind};
    use tempfile::TempDir;

    const JSON_DRAFT: &str = r#"{
        "formName": "Suturing",
        "score": "SCORE",
        "fieldTemplates": [{"name": "Knot", "type": "scale", "scaleOptions": ["1", "2"]}]
    }"#;

    const TOML_DRAFT: &str = r#"
formName = "Central line"
score = "OTHER"
scaleDescription = "Pass / fail"

[[fieldTemplates]]
name = "Sterile field"
type = "checkbox"
options = ["yes", "no"]
section = "2"
"#;

    fn write(dir: &Path, rel: &str, content: &str) -> PathBuf {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_json_and_toml_drafts() {
        let temp = TempDir::new().unwrap();
        let json = write(temp.path(), "a.json", JSON_DRAFT);
        let toml = write(temp.path(), "b.toml", TOML_DRAFT);

        let a = load_draft(&json).unwrap();
        assert_eq!(a.score, Some(ScoreKind::Score));
        assert_eq!(a.field_templates[0].field_type, Some(FieldType::Scale));

        let b = load_draft(&toml).unwrap();
        assert_eq!(b.form_name, "Central line");
        assert_eq!(b.field_templates[0].options, Some(vec!["yes".into(), "no".into()]));
        assert_eq!(b.field_templates[0].section.map(|s| s.get()), Some(2));
    }

    #[test]
    fn walks_directories_in_order_skipping_hidden_and_foreign_files() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "z.json", JSON_DRAFT);
        write(temp.path(), "nested/m.toml", TOML_DRAFT);
        write(temp.path(), ".hidden.json", JSON_DRAFT);
        write(temp.path(), ".cache/x.json", JSON_DRAFT);
        write(temp.path(), "README.md", "# drafts");

        let loaded = DraftLoader::new(temp.path()).load_all().unwrap();
        let names: Vec<_> = loaded
            .iter()
            .map(|l| l.path.strip_prefix(temp.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![PathBuf::from("nested/m.toml"), PathBuf::from("z.json")]
        );
        assert!(loaded.iter().all(|l| l.draft.is_ok()));
    }

    #[test]
    fn parse_failures_are_reported_per_file() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "good.json", JSON_DRAFT);
        write(temp.path(), "bad.json", "{ \"formName\": ");

        let loaded = DraftLoader::new(temp.path()).load_all().unwrap();
        assert_eq!(loaded.len(), 2);
        let bad = loaded.iter().find(|l| l.path.ends_with("bad.json")).unwrap();
        assert!(matches!(bad.draft, Err(DraftLoadError::Parse { .. })));
    }

    #[test]
    fn single_file_with_unknown_extension_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "draft.yaml", "formName: x");

        let loaded = DraftLoader::new(&path).load_all().unwrap();
        assert!(matches!(
            loaded[0].draft,
            Err(DraftLoadError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn missing_root_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = DraftLoader::new(temp.path().join("nope")).load_all().unwrap_err();
        assert!(matches!(err, DraftLoadError::NotFound { .. }));
    }
}
