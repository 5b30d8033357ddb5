//! Syntax module for the ae language
//!
//! Source text flows through three stages, each fully materialized before the
//! next begins:
//!
//! ```text
//! text -> SourceCursor -> Lexer -> Vec<Token> -> Parser -> Vec<Expr>
//! ```
//!
//! The cursor yields located characters, the lexer groups them into tokens,
//! and the parser builds the AST while checking that every referenced name
//! was defined earlier in the same input.

use std::fmt;

use serde::Serialize;

use crate::ast::Expr;
use crate::diagnostics::AeError;

pub mod cursor;
pub mod lexer;
pub mod parser;
pub mod token;

pub use cursor::{LocatedChar, SourceCursor};
pub use lexer::{tokenize, Lexer};
pub use parser::{parse, DefinitionSet, Parser};
pub use token::{Keyword, Token, TokenKind};

/// 1-based line and column of a character in the source text.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    pub line: usize,
    pub col: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// A byte range in the source text.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Tokenizes and parses `text` in one go.
///
/// Any error comes back with the named source attached, ready to be rendered.
///
/// ```rust
/// let program = ae::parse_source("inline.ae", r#"def A { "x": Url "http://e" }"#).unwrap();
/// assert_eq!(program.len(), 1);
/// ```
pub fn parse_source(name: &str, text: &str) -> Result<Vec<Expr>, AeError> {
    let tokens = tokenize(text).map_err(|e| e.with_source(name, text))?;
    parse(tokens).map_err(|e| e.with_source(name, text))
}
