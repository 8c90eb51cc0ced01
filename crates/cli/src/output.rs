//! Output helpers
//!
//! Results go to stdout verbatim so scripts can capture them. Diagnostics go
//! to stderr as a single line, styled when stderr is a colour terminal.

use std::io::{self, Write};

use console::style;

/// Print a command result as its own line
pub fn result_line(out: &mut dyn Write, value: &str) -> io::Result<()> {
    writeln!(out, "{value}")
}

/// Print an error diagnostic
///
/// Multi-line messages are folded so every error stays on one line.
pub fn error_line(err: &mut dyn Write, message: &str) -> io::Result<()> {
    let message = message.lines().collect::<Vec<_>>().join(" ");
    writeln!(err, "{} {message}", style("✗").red().for_stderr())
}
