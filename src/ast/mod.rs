//! AST module for the ae language
//!
//! The parser emits a sequence of top-level [`Expr`] nodes (`def`, `route`,
//! `response`). Nodes are built bottom-up and never mutated afterwards; each
//! keeps the token that anchored it so later passes can report locations.

// ============================================================================
// IMPORTS
// ============================================================================

use std::fmt::{self, Write};

use serde::Serialize;

use crate::syntax::{Location, Token};

pub mod format;

pub use format::Format;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Tag of an [`Expr`] variant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ExprType {
    Def,
    Route,
    Response,
    LoadDef,
    Format,
    ArrayOf,
    Url,
}

impl ExprType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExprType::Def => "DEF",
            ExprType::Route => "ROUTE",
            ExprType::Response => "RESPONSE",
            ExprType::LoadDef => "LOAD_DEF",
            ExprType::Format => "FORMAT",
            ExprType::ArrayOf => "ARRAY_OF",
            ExprType::Url => "URL",
        }
    }
}

impl fmt::Display for ExprType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A nested value: either a structured expression or a bare string literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Expr(Box<Expr>),
    Str(String),
}

impl Value {
    pub fn as_expr(&self) -> Option<&Expr> {
        match self {
            Value::Expr(expr) => Some(expr),
            Value::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Expr(_) => None,
            Value::Str(s) => Some(s),
        }
    }
}

impl From<Expr> for Value {
    fn from(expr: Expr) -> Self {
        Value::Expr(Box::new(expr))
    }
}

/// An expression node.
///
/// `def`, `route` and `response` bind an [`Expr`] rather than a [`Value`]:
/// a bare string can never be bound at the top level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Expr {
    Def {
        name: String,
        value: Box<Expr>,
        #[serde(skip)]
        token: Token,
    },
    Route {
        path: String,
        value: Box<Expr>,
        #[serde(skip)]
        token: Token,
    },
    Response {
        path: String,
        /// Always in `100..=999`.
        status: u16,
        value: Box<Expr>,
        #[serde(skip)]
        token: Token,
    },
    /// Reference to an earlier `def`.
    LoadDef {
        name: String,
        #[serde(skip)]
        token: Token,
    },
    Format {
        entries: Format,
        #[serde(skip)]
        token: Token,
    },
    ArrayOf {
        element: Value,
        #[serde(skip)]
        token: Token,
    },
    /// A URL literal; its syntax is not validated.
    Url {
        literal: String,
        #[serde(skip)]
        token: Token,
    },
}

// ============================================================================
// PUBLIC API IMPLEMENTATION
// ============================================================================

impl Expr {
    pub fn kind(&self) -> ExprType {
        match self {
            Expr::Def { .. } => ExprType::Def,
            Expr::Route { .. } => ExprType::Route,
            Expr::Response { .. } => ExprType::Response,
            Expr::LoadDef { .. } => ExprType::LoadDef,
            Expr::Format { .. } => ExprType::Format,
            Expr::ArrayOf { .. } => ExprType::ArrayOf,
            Expr::Url { .. } => ExprType::Url,
        }
    }

    /// The token that anchored this node: its keyword, name, or opening brace.
    pub fn token(&self) -> &Token {
        match self {
            Expr::Def { token, .. }
            | Expr::Route { token, .. }
            | Expr::Response { token, .. }
            | Expr::LoadDef { token, .. }
            | Expr::Format { token, .. }
            | Expr::ArrayOf { token, .. }
            | Expr::Url { token, .. } => token,
        }
    }

    pub fn location(&self) -> Location {
        self.token().location()
    }

    /// Renders the node as an indented tree, one node per line.
    ///
    /// ```rust
    /// let program = ae::parse_source("inline.ae", r#"def A { "x": Url "http://e" }"#).unwrap();
    /// assert_eq!(
    ///     program[0].pretty(),
    ///     "DEF A\n  FORMAT\n    \"x\":\n      URL \"http://e\"\n"
    /// );
    /// ```
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_tree(&mut out, 0);
        out
    }

    fn write_tree(&self, out: &mut String, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            Expr::Def { name, value, .. } => {
                writeln!(out, "{indent}DEF {name}")?;
                value.write_tree(out, depth + 1)
            }
            Expr::Route { path, value, .. } => {
                writeln!(out, "{indent}ROUTE {path:?}")?;
                value.write_tree(out, depth + 1)
            }
            Expr::Response {
                path,
                status,
                value,
                ..
            } => {
                writeln!(out, "{indent}RESPONSE {path:?} {status}")?;
                value.write_tree(out, depth + 1)
            }
            Expr::LoadDef { name, .. } => writeln!(out, "{indent}LOAD_DEF {name}"),
            Expr::Format { entries, .. } => {
                writeln!(out, "{indent}FORMAT")?;
                for (key, value) in entries.iter() {
                    writeln!(out, "{indent}  {key:?}:")?;
                    write_value(value, out, depth + 2)?;
                }
                Ok(())
            }
            Expr::ArrayOf { element, .. } => {
                writeln!(out, "{indent}ARRAY_OF")?;
                write_value(element, out, depth + 1)
            }
            Expr::Url { literal, .. } => writeln!(out, "{indent}URL {literal:?}"),
        }
    }
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn write_value(value: &Value, out: &mut String, depth: usize) -> fmt::Result {
    match value {
        Value::Expr(expr) => expr.write_tree(out, depth),
        Value::Str(s) => writeln!(out, "{}{s:?}", "  ".repeat(depth)),
    }
}
