//! `evalforms forms`: list, inspect, create, update, and delete stored forms.

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use evalforms_core::{
    application::{FormTemplateService, services::FormSummary},
    domain::{FieldTemplateDraft, FormTemplateValidator, StoredFormTemplate},
};

use crate::{
    cli::{CreateArgs, FormsCommands, GlobalArgs, ListArgs, ListFormat},
    commands::{confirm, open_service, parse_form_id, read_draft},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli as _},
    output::OutputManager,
};

/// Dispatch to the correct `forms` subcommand.
pub fn execute(
    cmd: FormsCommands,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        FormsCommands::Create(args) if args.dry_run => dry_run(&args, &output),
        FormsCommands::Create(args) => create(&open_service(&config)?, &args, &output),
        FormsCommands::List(args) => list(&open_service(&config)?, &args, &output),
        FormsCommands::Show { id } => show(&open_service(&config)?, &id, &output),
        FormsCommands::Update { id, file } => update(&open_service(&config)?, &id, &file, &output),
        FormsCommands::Delete { id, yes } => delete(&open_service(&config)?, &id, yes, &output),
    }
}

// ── list ──────────────────────────────────────────────────────────────────────

fn list(service: &FormTemplateService, args: &ListArgs, output: &OutputManager) -> CliResult<()> {
    let summaries = service.summaries(&args.search)?;
    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            if summaries.is_empty() {
                output.info("No form templates found")?;
                return Ok(());
            }
            output.header(&format!(
                "{:<24}  {:<32}  {:<5}  {:>6}  {}",
                "ID", "NAME", "SCORE", "FIELDS", "UPDATED"
            ))?;
            for s in &summaries {
                output.print(&table_row(s))?;
            }
        }
        ListFormat::List => {
            for s in &summaries {
                output.raw(&s.form_name)?;
            }
        }
        ListFormat::Csv => {
            output.raw("id,formName,score,fieldCount,updatedAt")?;
            for s in &summaries {
                output.raw(&csv_row(s))?;
            }
        }
        ListFormat::Json => output
            .json(&summaries)
            .with_cli_context(|| "Failed to write form list")?,
    }
    Ok(())
}

fn table_row(s: &FormSummary) -> String {
    format!(
        "{:<24}  {:<32}  {:<5}  {:>6}  {}",
        s.id,
        truncate(&s.form_name, 32),
        s.score.map(|k| k.as_str()).unwrap_or("-"),
        s.field_count,
        s.updated_at.map(short_time).unwrap_or_else(|| "-".into()),
    )
}

fn csv_row(s: &FormSummary) -> String {
    format!(
        "{},{},{},{},{}",
        s.id,
        csv_escape(&s.form_name),
        s.score.map(|k| k.as_str()).unwrap_or(""),
        s.field_count,
        s.updated_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
    )
}

fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let mut cut: String = value.chars().take(width - 1).collect();
        cut.push('…');
        cut
    }
}

fn short_time(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M").to_string()
}

// ── show ──────────────────────────────────────────────────────────────────────

fn show(service: &FormTemplateService, id: &str, output: &OutputManager) -> CliResult<()> {
    let stored = service.get(&parse_form_id(id)?)?;

    if output.is_json() {
        output
            .json(&stored)
            .with_cli_context(|| "Failed to write form")?;
        return Ok(());
    }

    for line in describe(&stored, output) {
        output.raw(&line)?;
    }
    Ok(())
}

/// Read-only rendering. Stored records may be partial, so every property
/// has a placeholder.
fn describe(stored: &StoredFormTemplate, output: &OutputManager) -> Vec<String> {
    let body = &stored.body;
    let label = |text: &str| output.dimmed(&format!("{text:<18}"));
    let or_dash = |text: &str| {
        if text.trim().is_empty() {
            "-".to_string()
        } else {
            text.to_string()
        }
    };

    let mut lines = vec![
        format!("{}{}", label("Form"), or_dash(&body.form_name)),
        format!("{}{}", label("Id"), stored.id),
        format!(
            "{}{}",
            label("Score"),
            body.score.map(|k| k.as_str()).unwrap_or("-")
        ),
        format!("{}{}", label("Scale description"), or_dash(&body.scale_description)),
    ];
    if let Some(created) = stored.created_at {
        lines.push(format!("{}{}", label("Created"), short_time(created)));
    }
    if let Some(updated) = stored.updated_at {
        lines.push(format!("{}{}", label("Updated"), short_time(updated)));
    }

    lines.push(String::new());
    if body.field_templates.is_empty() {
        lines.push("No fields".into());
    }
    for (index, field) in body.field_templates.iter().enumerate() {
        lines.push(describe_field(index + 1, field));
    }
    lines
}

fn describe_field(position: usize, field: &FieldTemplateDraft) -> String {
    let mut line = format!(
        "{position:>3}. {} ({})",
        if field.name.is_empty() { "<unnamed>" } else { field.name.as_str() },
        field.field_type.map(|t| t.as_str()).unwrap_or("no type"),
    );

    let mut meta = Vec::new();
    if let Some(pos) = field.position {
        meta.push(format!("position {pos}"));
    }
    if let Some(section) = field.section {
        meta.push(format!("section {section}"));
    }
    if !field.response.as_str().is_empty() {
        meta.push(format!("by {}", field.response));
    }
    if !meta.is_empty() {
        line.push_str(&format!(" [{}]", meta.join(", ")));
    }

    let choices = field
        .options
        .as_deref()
        .filter(|o| !o.is_empty())
        .or(field.scale_options.as_deref().filter(|o| !o.is_empty()));
    if let Some(choices) = choices {
        line.push_str(&format!("\n       choices: {}", choices.join(" | ")));
    }
    if field.has_details && !field.details.is_empty() {
        line.push_str(&format!("\n       details: {}", field.details));
    }
    line
}

// ── create / update ───────────────────────────────────────────────────────────

#[instrument(skip_all, fields(file = %args.file.display()))]
fn dry_run(args: &CreateArgs, output: &OutputManager) -> CliResult<()> {
    let draft = read_draft(&args.file)?;
    let payload = FormTemplateValidator::validate_for_create(&draft)
        .map_err(|e| CliError::Core(e.into()))?;

    output
        .json(&payload)
        .with_cli_context(|| "Failed to write payload")?;
    output.info("Dry run: nothing was stored")?;
    Ok(())
}

#[instrument(skip_all, fields(file = %args.file.display()))]
fn create(service: &FormTemplateService, args: &CreateArgs, output: &OutputManager) -> CliResult<()> {
    let draft = read_draft(&args.file)?;
    let stored = service.create(&draft)?;
    info!(id = %stored.id, "Form created from draft");
    report_saved("Created", &stored, output)
}

#[instrument(skip_all, fields(id = %id, file = %file.display()))]
fn update(
    service: &FormTemplateService,
    id: &str,
    file: &Path,
    output: &OutputManager,
) -> CliResult<()> {
    let id = parse_form_id(id)?;
    let draft = read_draft(file)?;
    let stored = service.update(&id, &draft)?;
    report_saved("Updated", &stored, output)
}

fn report_saved(verb: &str, stored: &StoredFormTemplate, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output
            .json(stored)
            .with_cli_context(|| "Failed to write form")?;
    } else {
        output.success(&format!(
            "{verb} form '{}' ({} fields) with id {}",
            stored.form_name(),
            stored.body.field_templates.len(),
            stored.id
        ))?;
    }
    Ok(())
}

// ── delete ────────────────────────────────────────────────────────────────────

#[instrument(skip(service, output))]
fn delete(service: &FormTemplateService, id: &str, yes: bool, output: &OutputManager) -> CliResult<()> {
    let id = parse_form_id(id)?;
    let stored = service.get(&id)?;

    if !yes && !confirm(&format!("Delete form '{}'?", stored.form_name()))? {
        return Err(CliError::Cancelled);
    }

    service.delete(&id)?;
    output.success(&format!("Deleted form '{}'", stored.form_name()))?;
    Ok(())
}
