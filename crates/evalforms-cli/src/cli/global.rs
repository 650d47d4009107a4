//! Global arguments that apply to every subcommand.
//!
//! Flattened into [`super::Cli`], so every subcommand takes them.

use clap::Args;
use std::path::PathBuf;

/// Global arguments for all commands.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Logging verbosity; conflicts with `--quiet`.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)",
        long_help = "Increase logging verbosity:
    (none)  - Warnings and errors
    -v      - Stored-form changes, plus fields dropped during validation
    -vv     - Store and draft-file activity, with log targets
    -vvv    - Everything"
    )]
    pub verbose: u8,

    /// Silence status lines. Payloads (`--emit`, lists, JSON) are still
    /// written, and skipped files are still reported.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress status messages"
    )]
    pub quiet: bool,

    /// Disable ANSI colour codes.
    ///
    /// Automatically honoured when `NO_COLOR` is set in the environment
    /// (see <https://no-color.org>).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Use only this configuration file, skipping the global file and
    /// `./.evalforms.toml`.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        env = "EVALFORMS_CONFIG",
        help = "Read settings from FILE only"
    )]
    pub config: Option<PathBuf>,

    /// Output format. `auto` defers to `output.format` in the config
    /// file, then to terminal detection. `json` turns validation reports,
    /// form lists and saved forms into JSON on stdout.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Output format for reports and forms"
    )]
    pub output_format: OutputFormat,
}

/// How the CLI should render its output.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Config setting, else terminal detection.
    #[default]
    Auto,
    /// Tables and coloured status lines.
    Human,
    /// Same text, no colours.
    Plain,
    /// Machine-readable JSON on stdout.
    Json,
}
