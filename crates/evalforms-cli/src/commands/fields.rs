//! `evalforms fields`: edit the fields of a stored form.

use tracing::{info, instrument};

use evalforms_core::application::FormTemplateService;

use crate::{
    cli::{FieldsCommands, GlobalArgs},
    commands::{confirm, open_service, parse_form_id},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(
    cmd: FieldsCommands,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        FieldsCommands::Remove {
            form_id,
            position,
            yes,
        } => remove(&open_service(&config)?, &form_id, position, yes, &output),
    }
}

/// Remove the field at `position` (1-based) and save the form.
///
/// A persisted field is deleted in the store before the form is saved; if
/// the save is then rejected the field stays deleted.
#[instrument(skip(service, output))]
fn remove(
    service: &FormTemplateService,
    form_id: &str,
    position: u32,
    yes: bool,
    output: &OutputManager,
) -> CliResult<()> {
    let id = parse_form_id(form_id)?;
    let mut session = service.open_edit(&id)?;
    let index = position.saturating_sub(1) as usize;

    if let Some(field) = session.draft().field_templates.get(index) {
        let prompt = format!(
            "Remove field {position} '{}' from '{}'?",
            field.name,
            session.draft().form_name
        );
        if !yes && !confirm(&prompt)? {
            return Err(CliError::Cancelled);
        }
    }

    let removed = session.delete_field(index)?;
    let saved = session.commit()?;
    info!(field = %removed.name, "Field removed");

    output.success(&format!(
        "Removed '{}' from '{}' ({} fields left)",
        removed.name,
        saved.form_name(),
        saved.body.field_templates.len()
    ))?;
    Ok(())
}
