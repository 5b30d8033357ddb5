//! Handles all user-facing output for the CLI.
//!
//! Token listings, AST trees, JSON dumps, check results and error reports all
//! go through here so every command presents them the same way. Colour is
//! only used when the stream is a terminal.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::ast::Expr;
use crate::cli::diagnostics::{print_diagnostic_to_stderr, AeDiagnostic};
use crate::diagnostics::AeError;
use crate::syntax::Token;

// ============================================================================
// CORE OUTPUT FUNCTIONS
// ============================================================================

/// Prints one `line:col KIND value` line per token.
pub fn print_tokens(tokens: &[Token]) {
    let mut stdout = stdout();
    for token in tokens {
        let _ = write!(stdout, "{} ", token.location());
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)));
        let _ = write!(stdout, "{}", token.kind());
        let _ = stdout.reset();
        let _ = writeln!(stdout, " {}", token.display_value());
    }
}

/// Prints each top-level expression as an indented tree.
pub fn print_ast(program: &[Expr]) {
    write_ast(&mut stdout(), program);
}

/// Prints any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AeError> {
    write_json(&mut stdout(), value)
}

pub fn print_check_ok(path: &Path, expressions: usize) {
    let mut stdout = stdout();
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true));
    let _ = write!(stdout, "ok");
    let _ = stdout.reset();
    let _ = writeln!(stdout, "     {} ({} expressions)", path.display(), expressions);
}

pub fn print_check_failed(path: &Path) {
    let mut stdout = stdout();
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
    let _ = write!(stdout, "FAILED");
    let _ = stdout.reset();
    let _ = writeln!(stdout, " {}", path.display());
}

pub fn print_check_summary(total: usize, failed: usize) {
    write_check_summary(&mut stdout(), total, failed);
}

/// Reports an error on stderr, either as a `miette` report or as plain text.
pub fn print_error(error: AeError, plain: bool) {
    if plain {
        print_diagnostic_to_stderr(&AeDiagnostic::new(&error));
        return;
    }
    let report = miette::Report::new(error);
    eprintln!("{report:?}");
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

// Write errors (a closed pipe, typically) are dropped, as for the coloured
// listings above.

fn write_ast(out: &mut impl Write, program: &[Expr]) {
    for expr in program {
        let _ = write!(out, "{}", expr.pretty());
    }
}

fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<(), AeError> {
    let json = serde_json::to_string_pretty(value)?;
    let _ = writeln!(out, "{}", json);
    Ok(())
}

fn write_check_summary(out: &mut impl Write, total: usize, failed: usize) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{} files checked, {} failed", total, failed);
}

fn stdout() -> StandardStream {
    let choice = if atty::is(atty::Stream::Stdout) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::syntax::parse_source;

    /// A sink whose reader has gone away.
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    fn program() -> Vec<Expr> {
        parse_source("t.ae", r#"def A { "x": Url "u" } route "/a" ArrayOf A"#).unwrap()
    }

    #[test]
    fn closed_stdout_does_not_panic() {
        let program = program();
        write_ast(&mut ClosedPipe, &program);
        write_json(&mut ClosedPipe, &program).unwrap();
        write_check_summary(&mut ClosedPipe, 3, 1);
    }

    #[test]
    fn writers_produce_the_listing_text() {
        let program = program();

        let mut out = Vec::new();
        write_ast(&mut out, &program);
        assert!(String::from_utf8(out).unwrap().starts_with("DEF A\n"));

        let mut out = Vec::new();
        write_check_summary(&mut out, 3, 1);
        assert_eq!(String::from_utf8(out).unwrap(), "\n3 files checked, 1 failed\n");

        let mut out = Vec::new();
        write_json(&mut out, &program).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json[1]["kind"], "ROUTE");
    }
}
