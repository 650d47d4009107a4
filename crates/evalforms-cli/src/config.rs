//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `EVALFORMS__STORE__PATH`, `EVALFORMS__OUTPUT__NO_COLOR`, ...
//! 3. `./.evalforms.toml`, then the global config file (or `--config FILE` alone)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;

/// Name of the per-directory config file.
pub const LOCAL_CONFIG_FILE: &str = ".evalforms.toml";

const ENV_PREFIX: &str = "EVALFORMS";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where form templates are kept.
    pub store: StoreConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Directory of the `file` backend.
    pub path: PathBuf,
}

/// Which store implementation backs the `forms` and `fields` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// One JSON document per form under `store.path`.
    File,
    /// Process-local; nothing survives the command.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: OutputFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig {
                backend: StoreBackend::File,
                path: Self::default_store_path(),
            },
            output: OutputConfig {
                no_color: false,
                format: OutputFormat::Auto,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, config files, and the environment.
    ///
    /// `config_file` is the path the user passed via `--config`; it must
    /// exist and replaces the global and local files.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&Self::default()).context("Failed to encode default configuration")?,
        );

        builder = match config_file {
            Some(path) => builder.add_source(file_source(path).required(true)),
            None => builder
                .add_source(file_source(&Self::config_path()).required(false))
                .add_source(file_source(Path::new(LOCAL_CONFIG_FILE)).required(false)),
        };

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the global configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.evalforms.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "evalforms", "evalforms")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Default directory of the file store.
    pub fn default_store_path() -> PathBuf {
        directories::ProjectDirs::from("com", "evalforms", "evalforms")
            .map(|d| d.data_dir().join("forms"))
            .unwrap_or_else(|| PathBuf::from(".evalforms/forms"))
    }

    /// Look up a dotted key, as printed by `config get`.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "store.backend" => Some(
                match self.store.backend {
                    StoreBackend::File => "file",
                    StoreBackend::Memory => "memory",
                }
                .to_string(),
            ),
            "store.path" => Some(self.store.path.display().to_string()),
            "output.no_color" => Some(self.output.no_color.to_string()),
            "output.format" => Some(format!("{:?}", self.output.format).to_lowercase()),
            _ => None,
        }
    }
}

fn file_source(path: &Path) -> File<config::FileSourceFile, FileFormat> {
    File::from(path).format(FileFormat::Toml)
}
