//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "evalforms",
    bin_name = "evalforms",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Validate and manage evaluation form templates",
    long_about = "evalforms checks draft evaluation form templates against the \
                  submission rules and manages the stored templates.",
    after_help = "EXAMPLES:\n\
        \x20 evalforms validate drafts/\n\
        \x20 evalforms forms create --file suturing.json\n\
        \x20 evalforms forms list --search suture\n\
        \x20 evalforms completions bash > /usr/share/bash-completion/completions/evalforms",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate draft files without touching the store.
    #[command(
        visible_alias = "check",
        about = "Validate draft form templates",
        after_help = "EXAMPLES:\n\
            \x20 evalforms validate suturing.json\n\
            \x20 evalforms validate drafts/ --emit\n\
            \x20 evalforms validate edited.json --update"
    )]
    Validate(ValidateArgs),

    /// Manage stored form templates.
    #[command(
        subcommand,
        about = "Manage stored form templates",
        after_help = "EXAMPLES:\n\
            \x20 evalforms forms list\n\
            \x20 evalforms forms show 65a1f0c2e4b0a1b2c3d4e5f6\n\
            \x20 evalforms forms create --file suturing.json"
    )]
    Forms(FormsCommands),

    /// Manage individual fields of a stored form.
    #[command(
        subcommand,
        about = "Manage fields of a stored form",
        after_help = "EXAMPLES:\n\
            \x20 evalforms fields remove 65a1f0c2e4b0a1b2c3d4e5f6 2"
    )]
    Fields(FieldsCommands),

    /// Initialise an evalforms configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 evalforms init           # default location\n\
            \x20 evalforms init --local   # .evalforms.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 evalforms completions bash > ~/.local/share/bash-completion/completions/evalforms\n\
            \x20 evalforms completions zsh  > ~/.zfunc/_evalforms\n\
            \x20 evalforms completions fish > ~/.config/fish/completions/evalforms.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the evalforms configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 evalforms config get store.path\n\
            \x20 evalforms config list"
    )]
    Config(ConfigCommands),
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `evalforms validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Draft files or directories of drafts (`.json` / `.toml`).
    #[arg(value_name = "PATH", required = true, num_args = 1..)]
    pub paths: Vec<PathBuf>,

    /// Apply the update rules (persisted field ids are kept).
    #[arg(long = "update", help = "Validate as an edit of a stored form")]
    pub update: bool,

    /// Print the normalized payload of every valid draft.
    #[arg(long = "emit", help = "Print normalized JSON for valid drafts")]
    pub emit: bool,
}

// ── forms ─────────────────────────────────────────────────────────────────────

/// Subcommands for `evalforms forms`.
#[derive(Debug, Subcommand)]
pub enum FormsCommands {
    /// List stored form templates.
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show one stored form template.
    Show {
        /// Form id (24 hex characters).
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Validate a draft and store it as a new form.
    Create(CreateArgs),

    /// Validate a draft and replace a stored form with it.
    Update {
        /// Form id (24 hex characters).
        #[arg(value_name = "ID")]
        id: String,

        /// Draft file (`.json` / `.toml`).
        #[arg(short = 'f', long = "file", value_name = "DRAFT")]
        file: PathBuf,
    },

    /// Delete a stored form.
    #[command(visible_alias = "rm")]
    Delete {
        /// Form id (24 hex characters).
        #[arg(value_name = "ID")]
        id: String,

        /// Skip the confirmation prompt.
        #[arg(short = 'y', long = "yes", help = "Delete without asking")]
        yes: bool,
    },
}

/// Arguments for `evalforms forms list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only forms whose name contains this text (case-insensitive).
    #[arg(short = 's', long = "search", value_name = "QUERY", default_value = "")]
    pub search: String,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

/// Arguments for `evalforms forms create`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Draft file (`.json` / `.toml`).
    #[arg(short = 'f', long = "file", value_name = "DRAFT")]
    pub file: PathBuf,

    /// Validate and print the payload without storing it.
    #[arg(long = "dry-run", help = "Show what would be stored without storing")]
    pub dry_run: bool,
}

// ── fields ────────────────────────────────────────────────────────────────────

/// Subcommands for `evalforms fields`.
#[derive(Debug, Subcommand)]
pub enum FieldsCommands {
    /// Remove one field from a stored form and save the form.
    #[command(visible_alias = "rm")]
    Remove {
        /// Form id (24 hex characters).
        #[arg(value_name = "FORM_ID")]
        form_id: String,

        /// 1-based field position, as shown by `forms show`.
        #[arg(value_name = "POSITION", value_parser = clap::value_parser!(u32).range(1..))]
        position: u32,

        /// Skip the confirmation prompt.
        #[arg(short = 'y', long = "yes", help = "Remove without asking")]
        yes: bool,
    },
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `evalforms init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.evalforms.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `evalforms completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `evalforms config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `store.path`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the global configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
