//! Command handlers. One module per subcommand; shared plumbing lives here.

pub mod completions;
pub mod config;
pub mod fields;
pub mod forms;
pub mod init;
pub mod validate;

use std::io::IsTerminal as _;

use tracing::{debug, warn};

use evalforms_adapters::{InMemoryStore, JsonFileStore, load_draft};
use evalforms_core::{
    application::{FormTemplateService, FormTemplateStore},
    domain::{FormId, FormTemplateDraft},
};

use crate::{
    config::{AppConfig, StoreBackend},
    error::{CliError, CliResult},
};

/// Build the service over the store the configuration selects.
pub fn open_service(config: &AppConfig) -> CliResult<FormTemplateService> {
    let store: Box<dyn FormTemplateStore> = match config.store.backend {
        StoreBackend::File => {
            debug!(path = %config.store.path.display(), "Opening file store");
            Box::new(JsonFileStore::open(&config.store.path)?)
        }
        StoreBackend::Memory => {
            warn!("Memory store selected; nothing is kept after this command");
            Box::new(InMemoryStore::new())
        }
    };
    Ok(FormTemplateService::new(store))
}

/// Parse a form id given on the command line.
pub fn parse_form_id(raw: &str) -> CliResult<FormId> {
    FormId::parse(raw.trim()).map_err(|e| CliError::Core(e.into()))
}

/// Load a single draft file.
pub fn read_draft(path: &std::path::Path) -> CliResult<FormTemplateDraft> {
    Ok(load_draft(path)?)
}

/// Ask a yes/no question. Without a terminal on stdin the answer cannot be
/// collected, so the caller must pass `--yes`.
pub fn confirm(prompt: &str) -> CliResult<bool> {
    if !std::io::stdin().is_terminal() {
        return Err(CliError::InvalidInput {
            message: "no terminal to confirm on; pass --yes".into(),
            source: None,
        });
    }
    ask(prompt)
}

#[cfg(feature = "interactive")]
fn ask(prompt: &str) -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "Failed to read confirmation".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn ask(prompt: &str) -> CliResult<bool> {
    use std::io::Write as _;

    use crate::error::IntoCli as _;

    print!("{prompt} [y/N] ");
    std::io::stdout()
        .flush()
        .with_cli_context(|| "Failed to write prompt")?;
    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .with_cli_context(|| "Failed to read confirmation")?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
