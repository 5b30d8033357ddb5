pub use crate::ast::{Expr, ExprType, Format, Value};
pub use crate::diagnostics::{AeError, ErrorContext, ErrorType, SourceArc};
pub use crate::syntax::{parse, parse_source, tokenize, Keyword, Location, Span, Token, TokenKind};

pub mod ast;
pub mod cli;
pub mod diagnostics;
pub mod discovery;
pub mod syntax;
