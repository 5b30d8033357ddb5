//! Unified, `miette`-based diagnostics for the ae front end.
//!
//! Every failure the tokenizer or parser can produce is an [`AeError`]. The
//! front end stops at the first error: there is no recovery and no error
//! accumulation, so a single error value always describes the whole failure.
//!
//! Errors are built through the `err_loc!` and `err_tok!` macros, which take
//! care of the [`ErrorContext`] so call sites never assemble one by hand:
//!
//! - `err_loc!(Lex, loc, span, "unexpected EOF")` for character-level errors.
//! - `err_tok!(Parse, &token, "expected {}, got {}", a, b)` for token errors;
//!   the token's text is recorded as the offending text.
//!
//! Neither stage knows the name of its input. Callers that have one attach it
//! afterwards with [`AeError::with_source`], which is what lets `miette` render
//! a labelled snippet.

use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use thiserror::Error;

use crate::syntax::{Location, Span, Token};

pub type SourceArc = Arc<NamedSource<String>>;

/// Coarse classification of an [`AeError`], for callers and tests that only
/// care about which stage failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// Bad escape sequence or end of input inside a string literal.
    Lex,
    /// Token stream does not match the grammar.
    Parse,
    /// Reference to a name that has not been defined yet.
    Scope,
    /// Reading input or writing output failed.
    Io,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::Lex => "Lex",
            ErrorType::Parse => "Parse",
            ErrorType::Scope => "Scope",
            ErrorType::Io => "Io",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where an error happened and what to show alongside it.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The named source text, once a caller has attached it.
    pub source: Option<SourceArc>,
    /// 1-based line and column of the offending character or token.
    pub location: Option<Location>,
    /// Byte range of the offending character or token.
    pub span: Option<Span>,
    /// Literal text of the offending token (parser errors only).
    pub text: Option<String>,
    pub help: Option<String>,
}

impl ErrorContext {
    /// Context pointing at a single location in the source.
    pub fn at(location: Location, span: Span) -> Self {
        Self {
            location: Some(location),
            span: Some(span),
            ..Self::default()
        }
    }

    /// Context pointing at a token, recording its text as the offending text.
    pub fn at_token(token: &Token) -> Self {
        Self {
            text: Some(token.value().to_string()),
            ..Self::at(token.location(), token.span())
        }
    }
}

/// The error type for every stage of the ae front end.
#[derive(Debug, Error)]
pub enum AeError {
    #[error("{message}")]
    Lex { message: String, ctx: ErrorContext },
    #[error("{message}")]
    Parse { message: String, ctx: ErrorContext },
    #[error("unknown name `{name}`")]
    UnknownName { name: String, ctx: ErrorContext },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

impl AeError {
    pub fn ctx(&self) -> Option<&ErrorContext> {
        match self {
            AeError::Lex { ctx, .. } | AeError::Parse { ctx, .. } | AeError::UnknownName { ctx, .. } => {
                Some(ctx)
            }
            AeError::Io { .. } | AeError::Json(_) => None,
        }
    }

    fn ctx_mut(&mut self) -> Option<&mut ErrorContext> {
        match self {
            AeError::Lex { ctx, .. } | AeError::Parse { ctx, .. } | AeError::UnknownName { ctx, .. } => {
                Some(ctx)
            }
            AeError::Io { .. } | AeError::Json(_) => None,
        }
    }

    pub fn error_type(&self) -> ErrorType {
        match self {
            AeError::Lex { .. } => ErrorType::Lex,
            AeError::Parse { .. } => ErrorType::Parse,
            AeError::UnknownName { .. } => ErrorType::Scope,
            AeError::Io { .. } | AeError::Json(_) => ErrorType::Io,
        }
    }

    /// Line and column of the offending character or token, if known.
    pub fn location(&self) -> Option<Location> {
        self.ctx().and_then(|ctx| ctx.location)
    }

    /// Literal text of the offending token, for parser errors.
    pub fn offending_text(&self) -> Option<&str> {
        self.ctx().and_then(|ctx| ctx.text.as_deref())
    }

    /// The attached source text, if any.
    pub fn source_text(&self) -> Option<&str> {
        self.ctx()
            .and_then(|ctx| ctx.source.as_ref())
            .map(|source| source.inner().as_str())
    }

    /// Attaches the named source the error was produced from.
    #[must_use]
    pub fn with_source(mut self, name: &str, text: &str) -> Self {
        if let Some(ctx) = self.ctx_mut() {
            ctx.source = Some(Arc::new(NamedSource::new(name, text.to_string())));
        }
        self
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        if let Some(ctx) = self.ctx_mut() {
            ctx.help = Some(help.into());
        }
        self
    }

    fn label(&self) -> &'static str {
        match self {
            AeError::Lex { .. } => "while scanning here",
            AeError::Parse { .. } => "unexpected token",
            AeError::UnknownName { .. } => "not defined before this point",
            AeError::Io { .. } | AeError::Json(_) => "here",
        }
    }
}

impl Diagnostic for AeError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let code = match self.error_type() {
            ErrorType::Lex => "ae::lex",
            ErrorType::Parse => "ae::parse",
            ErrorType::Scope => "ae::scope",
            ErrorType::Io => "ae::io",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.ctx()
            .and_then(|ctx| ctx.help.as_ref())
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.ctx()
            .and_then(|ctx| ctx.source.as_ref())
            .map(|s| s.as_ref() as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.ctx()?.span?;
        let len = span.len().max(1);
        let label = LabeledSpan::new(Some(self.label().to_string()), span.start, len);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Constructs an `AeError` variant located at a character position.
#[macro_export]
macro_rules! err_loc {
    ($variant:ident, $loc:expr, $span:expr, $($fmt:tt)+) => {
        $crate::AeError::$variant {
            message: format!($($fmt)+),
            ctx: $crate::ErrorContext::at($loc, $span),
        }
    };
}

/// Constructs an `AeError` variant located at a token.
#[macro_export]
macro_rules! err_tok {
    ($variant:ident, $token:expr, $($fmt:tt)+) => {
        $crate::AeError::$variant {
            message: format!($($fmt)+),
            ctx: $crate::ErrorContext::at_token($token),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::TokenKind;

    fn token() -> Token {
        Token::new(
            "Foo".into(),
            TokenKind::Identifier,
            Location { line: 2, col: 7 },
            Span { start: 12, end: 15 },
        )
    }

    #[test]
    fn token_errors_record_location_and_text() {
        let err = err_tok!(Parse, &token(), "expected {}, got {}", "string", "identifier");
        assert_eq!(err.to_string(), "expected string, got identifier");
        assert_eq!(err.location(), Some(Location { line: 2, col: 7 }));
        assert_eq!(err.offending_text(), Some("Foo"));
        assert_eq!(err.error_type(), ErrorType::Parse);
    }

    #[test]
    fn source_and_help_are_attached_after_the_fact() {
        let err = err_loc!(Lex, Location { line: 1, col: 1 }, Span { start: 0, end: 1 }, "bad")
            .with_source("schema.ae", "\"\\q\"")
            .with_help("use one of \\\\ \\n \\t \\r \\\"");
        assert_eq!(err.source_text(), Some("\"\\q\""));
        assert!(err.help().is_some());
        assert_eq!(err.labels().map(|labels| labels.count()), Some(1));
    }

    #[test]
    fn io_errors_have_no_context() {
        let err = AeError::Io {
            path: "missing.ae".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.location().is_none());
        assert!(err.with_source("x", "y").source_text().is_none());
    }
}
