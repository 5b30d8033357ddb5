//! Token definitions.

use std::fmt;

use serde::Serialize;

use super::{Location, Span};

/// Lexical category of a [`Token`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Keyword,
    Identifier,
    String,
    CurlyOpen,
    CurlyClose,
    Colon,
    Comma,
}

impl TokenKind {
    /// Kind of a single-character punctuation token, if `ch` is one.
    pub fn from_punct(ch: char) -> Option<Self> {
        match ch {
            '{' => Some(TokenKind::CurlyOpen),
            '}' => Some(TokenKind::CurlyClose),
            ':' => Some(TokenKind::Colon),
            ',' => Some(TokenKind::Comma),
            _ => None,
        }
    }

    /// Upper-case name, as shown in token listings.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::String => "STRING",
            TokenKind::CurlyOpen => "CURLY_OPEN",
            TokenKind::CurlyClose => "CURLY_CLOSE",
            TokenKind::Colon => "COLON",
            TokenKind::Comma => "COMMA",
        }
    }

    /// Lower-case name, as used in "expected X, got Y" messages.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::String => "string",
            TokenKind::CurlyOpen => "curly_open",
            TokenKind::CurlyClose => "curly_close",
            TokenKind::Colon => "colon",
            TokenKind::Comma => "comma",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reserved words of the language.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Keyword {
    Def,
    Route,
    Response,
    ArrayOf,
    Url,
}

impl Keyword {
    pub const ALL: [Keyword; 5] = [
        Keyword::Def,
        Keyword::Route,
        Keyword::Response,
        Keyword::ArrayOf,
        Keyword::Url,
    ];

    pub fn from_text(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kw| kw.as_str() == text)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Def => "def",
            Keyword::Route => "route",
            Keyword::Response => "response",
            Keyword::ArrayOf => "ArrayOf",
            Keyword::Url => "Url",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lexical unit with its location.
///
/// `value` is the identifier text, the decoded string contents, or the
/// punctuation character. String values never contain escape sequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    value: String,
    kind: TokenKind,
    #[serde(flatten)]
    loc: Location,
    #[serde(skip)]
    span: Span,
}

impl Token {
    pub fn new(value: String, kind: TokenKind, loc: Location, span: Span) -> Self {
        Self {
            value,
            kind,
            loc,
            span,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn into_value(self) -> String {
        self.value
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Location of the token's first character.
    pub fn location(&self) -> Location {
        self.loc
    }

    /// Byte range the token covers, quotes included for strings.
    pub fn span(&self) -> Span {
        self.span
    }

    /// The value as shown in listings: strings are quoted and re-escaped.
    pub fn display_value(&self) -> String {
        match self.kind {
            TokenKind::String => format!("{:?}", self.value),
            _ => self.value.clone(),
        }
    }

    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword => Keyword::from_text(&self.value),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.loc, self.kind, self.display_value())
    }
}
