//! ae Parser - recursive descent over a token sequence
//!
//! ```text
//! Program    := TopExpr*
//! TopExpr    := 'def' IDENTIFIER NestedExpr
//!             | 'route' STRING NestedExpr
//!             | 'response' STRING IDENTIFIER NestedExpr
//! NestedExpr := STRING | IDENTIFIER | '{' FormatBody '}'
//!             | 'Url' STRING | 'ArrayOf' NestedExpr
//! FormatBody := Pair (',' Pair)*
//! Pair       := STRING ':' NestedExpr
//! ```
//!
//! One token is consumed at a time and there is no backtracking. A name may
//! only be referenced after the `def` that introduces it has been parsed in
//! full, so a definition cannot refer to itself. The first malformed
//! construct aborts the parse.

use std::collections::HashSet;

use log::debug;

use super::token::{Keyword, Token, TokenKind};
use crate::ast::{Expr, Format, Value};
use crate::diagnostics::{AeError, ErrorContext};
use crate::err_tok;

/// Deepest chain of `ArrayOf` and format objects a single value may contain.
pub const MAX_NESTING: usize = 256;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parses a complete token sequence into top-level expressions.
pub fn parse(tokens: Vec<Token>) -> Result<Vec<Expr>, AeError> {
    Parser::new(tokens).parse()
}

/// Names introduced by `def` so far in one parse, in definition order.
///
/// The set only grows. It belongs to a single [`Parser`] and is dropped with
/// it.
#[derive(Debug, Clone, Default)]
pub struct DefinitionSet {
    order: Vec<String>,
    names: HashSet<String>,
}

impl DefinitionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `name`, returning `false` if it was already defined.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.names.contains(name) {
            return false;
        }
        self.names.insert(name.to_string());
        self.order.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Single-pass parser state: the tokens, the index of the next token, and
/// the names defined so far.
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    index: usize,
    definitions: DefinitionSet,
    // Nested expressions currently being parsed.
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            index: 0,
            definitions: DefinitionSet::new(),
            depth: 0,
        }
    }

    pub fn definitions(&self) -> &DefinitionSet {
        &self.definitions
    }

    /// Parses top-level expressions until the tokens run out.
    pub fn parse(mut self) -> Result<Vec<Expr>, AeError> {
        let mut program = Vec::new();
        while self.index < self.tokens.len() {
            let expr = self.parse_top_expr()?;
            debug!("parsed {} at {}", expr.kind(), expr.location());
            program.push(expr);
        }
        debug!(
            "parsed {} top-level expressions, {} definitions",
            program.len(),
            self.definitions.len()
        );
        Ok(program)
    }

    // ========================================================================
    // TOKEN ACCESS
    // ========================================================================

    fn current(&self) -> Option<&Token> {
        self.index
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
    }

    fn next_token(&mut self) -> Result<Token, AeError> {
        match self.tokens.get(self.index) {
            Some(token) => {
                self.index += 1;
                Ok(token.clone())
            }
            None => Err(self.error("unexpected EOF")),
        }
    }

    /// A parse error located at the most recently consumed token.
    fn error(&self, message: impl Into<String>) -> AeError {
        let ctx = self.current().map(ErrorContext::at_token).unwrap_or_default();
        AeError::Parse {
            message: message.into(),
            ctx,
        }
    }

    fn expect_next(&mut self, kind: TokenKind) -> Result<Token, AeError> {
        let token = self.next_token()?;
        if token.kind() != kind {
            return Err(err_tok!(
                Parse,
                &token,
                "expected {}, got {}",
                kind.name(),
                token.kind().name()
            ));
        }
        Ok(token)
    }

    fn parse_string(&mut self) -> Result<String, AeError> {
        self.expect_next(TokenKind::String).map(Token::into_value)
    }

    // ========================================================================
    // TOP-LEVEL EXPRESSIONS
    // ========================================================================

    fn parse_top_expr(&mut self) -> Result<Expr, AeError> {
        let token = self.next_token()?;
        let Some(keyword) = token.keyword() else {
            return Err(err_tok!(
                Parse,
                &token,
                "expected keyword, got {}",
                token.kind().name()
            )
            .with_help("top-level expressions start with `def`, `route` or `response`"));
        };

        match keyword {
            Keyword::Def => self.parse_def(token),
            Keyword::Route => self.parse_route(token),
            Keyword::Response => self.parse_response(token),
            Keyword::ArrayOf | Keyword::Url => Err(err_tok!(
                Parse,
                &token,
                "keyword `{}` cannot be used on a top level",
                keyword
            )
            .with_help("bind it with `def`, `route` or `response` first")),
        }
    }

    fn parse_def(&mut self, token: Token) -> Result<Expr, AeError> {
        let name = self.expect_next(TokenKind::Identifier)?.into_value();
        let value = self.parse_bound_value("definition")?;
        // Only now is the name visible, so the value cannot refer to it.
        self.definitions.insert(&name);
        Ok(Expr::Def {
            name,
            value: Box::new(value),
            token,
        })
    }

    fn parse_route(&mut self, token: Token) -> Result<Expr, AeError> {
        let path = self.parse_string()?;
        let value = self.parse_bound_value("route")?;
        Ok(Expr::Route {
            path,
            value: Box::new(value),
            token,
        })
    }

    fn parse_response(&mut self, token: Token) -> Result<Expr, AeError> {
        let path = self.parse_string()?;
        let code = self.next_token()?;
        let status = status_code(&code).ok_or_else(|| {
            err_tok!(Parse, &code, "status code must be a 3-digit number")
                .with_help("use an HTTP status such as 200 or 404")
        })?;
        let value = self.parse_bound_value("response")?;
        Ok(Expr::Response {
            path,
            status,
            value: Box::new(value),
            token,
        })
    }

    /// A nested expression that is not a bare string.
    fn parse_bound_value(&mut self, what: &str) -> Result<Expr, AeError> {
        match self.parse_nested_expr()? {
            Value::Expr(expr) => Ok(*expr),
            Value::Str(_) => Err(self
                .error(format!("{what} value cannot be a bare string"))
                .with_help("wrap it in a format object, `Url` or `ArrayOf`")),
        }
    }

    // ========================================================================
    // NESTED EXPRESSIONS
    // ========================================================================

    fn parse_nested_expr(&mut self) -> Result<Value, AeError> {
        let token = self.next_token()?;
        if self.depth >= MAX_NESTING {
            return Err(err_tok!(Parse, &token, "expression nested too deeply")
                .with_help(format!("values may nest at most {MAX_NESTING} levels deep")));
        }
        self.depth += 1;
        let value = self.parse_nested_token(token);
        self.depth -= 1;
        value
    }

    fn parse_nested_token(&mut self, token: Token) -> Result<Value, AeError> {
        match token.kind() {
            TokenKind::String => Ok(Value::Str(token.into_value())),
            TokenKind::Identifier => self.parse_load_def(token),
            TokenKind::CurlyOpen => self.parse_format(token),
            TokenKind::Keyword => self.parse_nested_keyword(token),
            TokenKind::CurlyClose | TokenKind::Colon | TokenKind::Comma => Err(err_tok!(
                Parse,
                &token,
                "expected nested expression, got {}",
                token.kind().name()
            )),
        }
    }

    fn parse_nested_keyword(&mut self, token: Token) -> Result<Value, AeError> {
        let expr = match token.keyword() {
            Some(Keyword::ArrayOf) => Expr::ArrayOf {
                element: self.parse_nested_expr()?,
                token,
            },
            Some(Keyword::Url) => Expr::Url {
                literal: self.parse_string()?,
                token,
            },
            Some(kw) => {
                return Err(err_tok!(Parse, &token, "keyword `{}` cannot be nested", kw)
                    .with_help("`def`, `route` and `response` are only allowed at the top level"))
            }
            None => return Err(err_tok!(Parse, &token, "unknown keyword `{}`", token.value())),
        };
        Ok(expr.into())
    }

    fn parse_load_def(&mut self, token: Token) -> Result<Value, AeError> {
        if !self.definitions.contains(token.value()) {
            return Err(AeError::UnknownName {
                name: token.value().to_string(),
                ctx: ErrorContext::at_token(&token),
            }
            .with_help("names must be defined with `def` before they are used"));
        }
        Ok(Expr::LoadDef {
            name: token.value().to_string(),
            token,
        }
        .into())
    }

    fn parse_format(&mut self, open: Token) -> Result<Value, AeError> {
        let mut entries = Format::new();
        loop {
            let key = self.parse_string()?;
            self.expect_next(TokenKind::Colon)?;
            let value = self.parse_nested_expr()?;
            if entries.insert(key, value).is_some() {
                debug!("duplicate key in format object at {} overwritten", open.location());
            }

            let next = self.next_token()?;
            match next.kind() {
                TokenKind::CurlyClose => break,
                TokenKind::Comma => continue,
                kind => {
                    return Err(err_tok!(Parse, &next, "expected comma, got {}", kind.name())
                        .with_help("separate pairs with `,` and close the object with `}`"))
                }
            }
        }
        Ok(Expr::Format {
            entries,
            token: open,
        }
        .into())
    }
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

/// Status code carried by an identifier of exactly three digits, 100-999.
fn status_code(token: &Token) -> Option<u16> {
    if token.kind() != TokenKind::Identifier {
        return None;
    }
    match token.value().as_bytes() {
        [hundreds @ b'1'..=b'9', tens @ b'0'..=b'9', ones @ b'0'..=b'9'] => Some(
            u16::from(hundreds - b'0') * 100 + u16::from(tens - b'0') * 10 + u16::from(ones - b'0'),
        ),
        _ => None,
    }
}
