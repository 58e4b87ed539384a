//! mal CLI - a read-eval-print loop for the mal Lisp dialect.
//!
//! This is the OS-facing shell around `malc_drv::Session`: argument
//! parsing, logging setup, and wiring the session to real stdin/stdout.
//! The interpreter itself has no persisted state, no files read, and no
//! environment variables consulted — the two flags below are process
//! concerns (log verbosity, terminal color), not interpreter state.

mod error;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use error::MalError;
use malc_drv::Session;

/// mal - a read-eval-print loop for the mal Lisp dialect.
///
/// There is no subcommand here the way a build tool or converter needs
/// one: the entire CLI surface is "start a REPL", so the two flags below
/// are the whole of it.
#[derive(Parser, Debug)]
#[command(name = "mal")]
#[command(author = "Mal Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A read-eval-print loop for the mal Lisp dialect", long_about = None)]
struct Cli {
    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true, env = "MAL_VERBOSE")]
    verbose: bool,

    /// Disable color output
    #[arg(long, global = true, env = "MAL_NO_COLOR")]
    no_color: bool,
}

/// Initialize the logging system.
///
/// # Arguments
/// * `cli` - the parsed command line, for the `verbose`/`no_color` flags.
///
/// # Returns
/// `Ok(())` once the global subscriber is installed; `Err` if a
/// subscriber was already installed (should not happen — this runs once,
/// at the top of `main`).
fn init_logging(cli: &Cli) -> Result<()> {
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let subscriber = fmt::layer()
        .with_ansi(!cli.no_color)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| MalError::Logging(e.to_string()))?;

    Ok(())
}

/// Main entry point for the mal CLI.
///
/// Parses command-line arguments, initializes logging, then hands stdin
/// and stdout to a fresh [`Session`] until it sees EOF.
///
/// # Returns
/// `Ok(())` on a clean EOF; `Err` if logging setup or the session's own
/// I/O fails. A malformed or erroring mal *program* typed at the prompt
/// is not an error here — the session reports it and keeps running.
fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging must be initialized before anything else logs.
    init_logging(&cli)?;

    tracing::debug!(verbose = cli.verbose, "starting mal REPL");

    // The session owns the interpreter's entire runtime state; nothing
    // survives past this call once stdin reaches EOF.
    let session = Session::new();
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    session.run(stdin.lock(), stdout.lock())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_with_no_arguments() {
        let cli = Cli::parse_from(["mal"]);
        assert!(!cli.verbose);
        assert!(!cli.no_color);
    }

    #[test]
    fn cli_parses_verbose_flag() {
        let cli = Cli::parse_from(["mal", "--verbose"]);
        assert!(cli.verbose);
    }

    #[test]
    fn cli_parses_no_color_flag() {
        let cli = Cli::parse_from(["mal", "--no-color"]);
        assert!(cli.no_color);
    }
}
