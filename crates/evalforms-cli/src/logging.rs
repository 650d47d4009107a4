//! Tracing subscriber initialisation.
//!
//! Only the CLI crate calls [`init_logging`]. `evalforms-core` and
//! `evalforms-adapters` emit spans and events and never install subscribers.
//!
//! # Verbosity mapping
//!
//! | Flag(s)  | Filter level |
//! |----------|--------------|
//! | (none)   | WARN         |
//! | `-v`     | INFO         |
//! | `-vv`    | DEBUG        |
//! | `-vvv`   | TRACE        |
//! | `--quiet`| ERROR        |
//!
//! Two exceptions keep the output useful for form work:
//! - `-v` also turns on the validator's debug events, which name the draft
//!   fields dropped for lacking a name or type
//! - `--quiet` still lets the adapters warn about stored records and draft
//!   files they had to skip
//!
//! `RUST_LOG` overrides all of the above if set.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Initialise the global tracing subscriber.
///
/// Must be called exactly once, before any tracing macros fire. Events go to
/// stderr so stdout stays parseable for `--output-format json`.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    // RUST_LOG wins over the flags.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(args)));

    let use_ansi = !args.no_color && std::io::stderr().is_terminal();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(args.verbose >= 2)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(use_ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

/// Filter directives for the three evalforms crates.
fn filter_directives(args: &GlobalArgs) -> String {
    let level = derive_level(args);
    let adapters = if args.quiet { "warn" } else { level };

    let mut directives =
        format!("evalforms={level},evalforms_core={level},evalforms_adapters={adapters}");
    if args.verbose == 1 {
        directives.push_str(",evalforms_core::domain::validation=debug");
    }
    directives
}

/// Translate the verbosity counter + quiet flag to a level string.
fn derive_level(args: &GlobalArgs) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
