//! Plain-text diagnostic presentation for ae errors.
//!
//! This is the `--plain` alternative to the `miette` report: one line naming
//! the location and the problem, the offending token text, and a short source
//! snippet with a caret under the offending column.

use std::fmt::{Display, Formatter, Result as FmtResult};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::diagnostics::AeError;
use crate::syntax::{Location, Span};

// === Constants ===

/// Number of lines of context to show before and after the error in code snippets.
const SNIPPET_CONTEXT_LINES: usize = 2;

// === Core Types ===

/// Wraps an [`AeError`] for plain-text rendering.
pub struct AeDiagnostic<'a> {
    error: &'a AeError,
}

impl<'a> AeDiagnostic<'a> {
    pub fn new(error: &'a AeError) -> Self {
        Self { error }
    }

    /// Everything after the leading `Error` word.
    fn body(&self) -> String {
        let mut out = String::new();
        if let Some(loc) = self.error.location() {
            out.push_str(&format!(" {}", loc));
        }
        out.push_str(&format!(": {}\n", self.error));

        if let Some(text) = self.error.offending_text() {
            out.push_str(&format!("    {}\n", text));
        }

        let ctx = self.error.ctx();
        let span = ctx.and_then(|ctx| ctx.span);
        if let (Some(loc), Some(span), Some(source)) =
            (self.error.location(), span, self.error.source_text())
        {
            if let Some(snippet) = generate_code_snippet(source, loc, span) {
                out.push('\n');
                out.push_str(&snippet);
            }
        }

        if let Some(help) = ctx.and_then(|ctx| ctx.help.as_ref()) {
            out.push_str(&format!("help: {}\n", help));
        }
        out
    }
}

impl<'a> Display for AeDiagnostic<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Error{}", self.body())
    }
}

// === Formatting Helpers ===

/// Source lines around `loc`, with a pointer line under the offending text.
fn generate_code_snippet(source: &str, loc: Location, span: Span) -> Option<String> {
    let lines: Vec<&str> = source.lines().collect();
    if loc.line == 0 || loc.line > lines.len() {
        return None;
    }

    let display_start = loc.line.saturating_sub(SNIPPET_CONTEXT_LINES).max(1);
    let display_end = (loc.line + SNIPPET_CONTEXT_LINES).min(lines.len());
    let width = display_end.to_string().len();

    let mut result = String::new();
    for line_num in display_start..=display_end {
        let line = lines[line_num - 1];
        let numbered = format!("{:width$} | {}", line_num, line, width = width);
        result.push_str(numbered.trim_end());
        result.push('\n');
        if line_num == loc.line {
            result.push_str(&format!("{:width$} | ", "", width = width));
            result.push_str(&pointer_line(loc.col, marked_width(source, span)));
        }
    }
    Some(result)
}

/// Number of characters of `span` that fall on its first line, at least one.
fn marked_width(source: &str, span: Span) -> usize {
    source
        .get(span.start..span.end)
        .map(|text| text.chars().take_while(|c| *c != '\n').count())
        .unwrap_or(0)
        .max(1)
}

fn pointer_line(col: usize, width: usize) -> String {
    let mut s = " ".repeat(col.saturating_sub(1));
    s.push('^');
    s.push_str(&"-".repeat(width - 1));
    s.push_str(" here\n");
    s
}

// === Public API ===

/// Prints a diagnostic to standard error, colouring the `Error` word when
/// stderr is a terminal.
pub fn print_diagnostic_to_stderr(diagnostic: &AeDiagnostic) {
    let choice = if atty::is(atty::Stream::Stderr) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stderr = StandardStream::stderr(choice);
    if print_diagnostic_colored(&mut stderr, diagnostic).is_err() {
        eprint!("{}", diagnostic);
    }
}

// === Internal Color Printing ===

fn print_diagnostic_colored(
    writer: &mut impl WriteColor,
    diagnostic: &AeDiagnostic,
) -> std::io::Result<()> {
    writer.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
    write!(writer, "Error")?;
    writer.reset()?;
    write!(writer, "{}", diagnostic.body())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_spans_the_marked_width() {
        assert_eq!(pointer_line(3, 4), "  ^--- here\n");
        assert_eq!(pointer_line(1, 1), "^ here\n");
    }

    #[test]
    fn marked_width_stops_at_newline() {
        let source = "\"ab\ncd\"";
        assert_eq!(marked_width(source, Span { start: 0, end: 7 }), 3);
        assert_eq!(marked_width(source, Span { start: 2, end: 2 }), 1);
    }

    #[test]
    fn snippet_is_skipped_for_out_of_range_lines() {
        let loc = Location { line: 5, col: 1 };
        assert!(generate_code_snippet("one line", loc, Span::default()).is_none());
    }
}
