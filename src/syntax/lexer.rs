//! Tokenizer: groups located characters into located tokens.
//!
//! Whitespace separates tokens and is never part of one. `{ } : ,` are
//! complete tokens on their own. A `"` starts a string literal whose escapes
//! are decoded here. Anything else starts a bare word that runs until
//! whitespace or punctuation and is classified as a keyword or identifier.
//! Digit runs are plain identifiers; the parser checks them where a number
//! is expected.

use log::{debug, trace};

use super::cursor::{LocatedChar, SourceCursor};
use super::token::{Keyword, Token, TokenKind};
use super::Span;
use crate::diagnostics::AeError;
use crate::err_loc;

/// Decoded value of the character following a `\` in a string literal.
fn unescape(ch: char) -> Option<char> {
    match ch {
        '\\' => Some('\\'),
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        '"' => Some('"'),
        _ => None,
    }
}

fn ends_word(ch: char) -> bool {
    ch.is_whitespace() || TokenKind::from_punct(ch).is_some()
}

/// Pull-based tokenizer over a source text.
///
/// Yields `Err` at most once; the sequence ends after the first error.
pub struct Lexer<'s> {
    chars: SourceCursor<'s>,
    // Punctuation read past the end of a bare word, replayed on the next bump.
    pending: Option<LocatedChar>,
    done: bool,
}

impl<'s> Lexer<'s> {
    pub fn new(text: &'s str) -> Self {
        Self {
            chars: SourceCursor::new(text),
            pending: None,
            done: false,
        }
    }

    fn bump(&mut self) -> Option<LocatedChar> {
        self.pending.take().or_else(|| self.chars.next())
    }

    fn next_token(&mut self) -> Result<Option<Token>, AeError> {
        let first = loop {
            match self.bump() {
                None => return Ok(None),
                Some(c) if c.ch.is_whitespace() => continue,
                Some(c) => break c,
            }
        };

        if let Some(kind) = TokenKind::from_punct(first.ch) {
            return Ok(Some(Token::new(
                first.ch.to_string(),
                kind,
                first.loc,
                first.span(),
            )));
        }

        if first.ch == '"' {
            return self.string(first).map(Some);
        }

        Ok(Some(self.word(first)))
    }

    fn string(&mut self, open: LocatedChar) -> Result<Token, AeError> {
        let mut value = String::new();
        loop {
            let c = self.bump_in_string(&open)?;
            match c.ch {
                '"' => {
                    let span = Span {
                        start: open.offset,
                        end: c.span().end,
                    };
                    return Ok(Token::new(value, TokenKind::String, open.loc, span));
                }
                '\\' => {
                    let escaped = self.bump_in_string(&open)?;
                    let decoded = unescape(escaped.ch).ok_or_else(|| {
                        err_loc!(
                            Lex,
                            escaped.loc,
                            escaped.span(),
                            "character {:?} does not correspond to any escape sequence",
                            escaped.ch
                        )
                        .with_help(r#"supported escapes are \\ \n \t \r \""#)
                    })?;
                    value.push(decoded);
                }
                ch => value.push(ch),
            }
        }
    }

    fn bump_in_string(&mut self, open: &LocatedChar) -> Result<LocatedChar, AeError> {
        self.bump().ok_or_else(|| {
            err_loc!(
                Lex,
                open.loc,
                open.span(),
                "unexpected EOF while scanning string literal"
            )
            .with_help("close the string with `\"`")
        })
    }

    fn word(&mut self, first: LocatedChar) -> Token {
        let mut text = String::new();
        text.push(first.ch);
        let mut end = first.span().end;

        while let Some(c) = self.bump() {
            if ends_word(c.ch) {
                if !c.ch.is_whitespace() {
                    self.pending = Some(c);
                }
                break;
            }
            text.push(c.ch);
            end = c.span().end;
        }

        let kind = match Keyword::from_text(&text) {
            Some(_) => TokenKind::Keyword,
            None => TokenKind::Identifier,
        };
        let span = Span {
            start: first.offset,
            end,
        };
        Token::new(text, kind, first.loc, span)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, AeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_token() {
            Ok(Some(token)) => {
                trace!("token {}", token);
                Some(Ok(token))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Tokenizes the whole of `text`, stopping at the first error.
pub fn tokenize(text: &str) -> Result<Vec<Token>, AeError> {
    let tokens = Lexer::new(text).collect::<Result<Vec<_>, _>>()?;
    debug!(
        "tokenized {} bytes into {} tokens",
        text.len(),
        tokens.len()
    );
    Ok(tokens)
}
