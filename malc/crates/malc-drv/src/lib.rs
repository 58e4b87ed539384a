//! malc-drv — the REPL session driver.
//!
//! ============================================================================
//! DRIVER OVERVIEW
//! ============================================================================
//!
//! Wires the reader, evaluator, and printer together around one
//! persistent root environment and drives the read-eval-print loop
//! described by the REPL contract: a `user> ` prompt, one line of input
//! per iteration, the printed result followed by a newline, a clean stop
//! on EOF, and reader errors reported as `error: <message>` without
//! terminating the session.
//!
//! ============================================================================
//! SESSION PIPELINE
//! ============================================================================
//!
//! ```text
//! stdin (one line)
//!        |
//!        v
//!   [ malc-read :: read_str ] ──▶ Value (or ReadError)
//!        |
//!        v
//!   [ malc-eval :: eval ]     ──▶ Value (evaluation errors are themselves
//!        |                        a Value::Error, never a Rust panic)
//!        v
//!   [ malc-eval :: pr_str ]   ──▶ String
//!        |
//!        v
//! stdout (printed line) + next "user> " prompt
//! ```
//!
//! PHASES:
//! -------
//!
//! Phase 1: Read
//! - Input: one line of source text
//! - Output: a `Value` form, or a `ReadError`
//! - Tool: `malc-read::read_str`
//! - A `ReadError` is written as `error: <message>` and the loop continues;
//!   it never touches `self.env`, so a bad line cannot leave a partial
//!   definition behind.
//!
//! Phase 2: Eval
//! - Input: a `Value` form and the session's root environment
//! - Output: a `Value` (possibly `Value::Error`)
//! - Tool: `malc-eval::eval`
//! - Runtime errors (unbound symbol, wrong arity, division by zero, ...)
//!   are ordinary `Value`s flowing back through this same path, not a
//!   second error channel — see [`malc_eval`] for why.
//!
//! Phase 3: Print
//! - Input: the result `Value`
//! - Output: its `pr_str` rendering, `println`-ed to the session's writer
//! - Tool: `malc-eval::pr_str`
//!
//! There is no separate "report" phase the way a multi-file compiler needs
//! one to aggregate diagnostics across translation units: each line is
//! fully read, evaluated, and printed (or its reader error reported) before
//! the next prompt is written, so there is never more than one outstanding
//! diagnostic to show.
//!
//! `Session` is generic over `BufRead`/`Write`, mirroring this workspace's
//! convention of keeping the session's actual logic independent of the
//! real process's stdio — the CLI binary wires it to a real terminal, and
//! tests wire it to in-memory buffers.

use std::io::{BufRead, Write};

use malc_eval::{eval, pr_str, root_env};
use malc_read::read_str;
use malc_value::Env;

/// Prompt written before every line read, including the final one before
/// EOF (the REPL contract expects a trailing prompt with no newline).
const PROMPT: &str = "user> ";

/// A REPL session: owns the root environment and knows how to drive one
/// read-eval-print cycle at a time.
pub struct Session {
    /// The root environment, persistent across every line this session
    /// reads — `def!` in one line is visible to every later line.
    env: Env,
}

impl Session {
    /// Builds a new session with a fresh root environment seeded with
    /// every builtin and the `not` bootstrap binding.
    ///
    /// # Returns
    /// A `Session` ready to `run`; no I/O has happened yet.
    pub fn new() -> Self {
        Session { env: root_env() }
    }

    /// Reads, evaluates, and prints a single line of input.
    ///
    /// # Arguments
    /// * `line` — one already-trimmed line of mal source.
    /// * `out` — where the printed result (or reader error) is written,
    ///   terminated by a newline.
    ///
    /// # Returns
    /// `Ok(())` once a line (result or error message) has been written;
    /// `Err` only if the underlying writer itself fails.
    pub fn eval_line(&self, line: &str, out: &mut impl Write) -> std::io::Result<()> {
        match read_str(line) {
            Ok(form) => {
                let result = eval(&form, &self.env);
                writeln!(out, "{}", pr_str(&result, true))
            }
            Err(err) => writeln!(out, "error: {err}"),
        }
    }

    /// Runs the REPL loop over `input`/`output` until EOF. Blank lines
    /// (after skipping leading/trailing whitespace) are read and
    /// re-prompted without being evaluated, matching the conventional mal
    /// REPL's handling of an empty line.
    ///
    /// # Arguments
    /// * `input` — the source of REPL lines (stdin, or a `Cursor` in
    ///   tests).
    /// * `output` — where prompts, printed results, and error messages are
    ///   written.
    ///
    /// # Returns
    /// `Ok(())` on a clean EOF. `Err` only if reading or writing itself
    /// fails; a malformed or erroring mal *program* is not an `Err` here —
    /// it is reported to `output` and the loop continues.
    pub fn run(&self, mut input: impl BufRead, mut output: impl Write) -> std::io::Result<()> {
        loop {
            write!(output, "{PROMPT}")?;
            output.flush()?;

            let mut line = String::new();
            let bytes_read = input.read_line(&mut line)?;
            if bytes_read == 0 {
                return Ok(());
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            self.eval_line(trimmed, &mut output)?;
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}
