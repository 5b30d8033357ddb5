//! Character cursor over raw source text.
//!
//! Lines and columns are 1-based. A newline belongs to the line it ends; the
//! character after it starts the next line at column 1.

use std::iter::FusedIterator;
use std::str::CharIndices;

use super::{Location, Span};

/// A single source character together with where it appears.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LocatedChar {
    pub ch: char,
    pub loc: Location,
    /// Byte offset of `ch` in the source text.
    pub offset: usize,
}

impl LocatedChar {
    pub fn span(&self) -> Span {
        Span {
            start: self.offset,
            end: self.offset + self.ch.len_utf8(),
        }
    }
}

/// Lazy, non-restartable sequence of [`LocatedChar`]s in source order.
///
/// Exhaustion is the only end-of-input signal.
#[derive(Debug, Clone)]
pub struct SourceCursor<'s> {
    chars: CharIndices<'s>,
    line: usize,
    col: usize,
}

impl<'s> SourceCursor<'s> {
    pub fn new(text: &'s str) -> Self {
        Self {
            chars: text.char_indices(),
            line: 1,
            col: 1,
        }
    }
}

impl Iterator for SourceCursor<'_> {
    type Item = LocatedChar;

    fn next(&mut self) -> Option<LocatedChar> {
        let (offset, ch) = self.chars.next()?;
        let located = LocatedChar {
            ch,
            loc: Location {
                line: self.line,
                col: self.col,
            },
            offset,
        };

        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }

        Some(located)
    }
}

impl FusedIterator for SourceCursor<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(text: &str) -> Vec<(char, usize, usize)> {
        SourceCursor::new(text)
            .map(|c| (c.ch, c.loc.line, c.loc.col))
            .collect()
    }

    #[test]
    fn columns_start_at_one_on_every_line() {
        assert_eq!(
            positions("ab\ncd"),
            vec![('a', 1, 1), ('b', 1, 2), ('\n', 1, 3), ('c', 2, 1), ('d', 2, 2)]
        );
    }

    #[test]
    fn consecutive_newlines_each_start_a_line() {
        assert_eq!(positions("\n\nx"), vec![('\n', 1, 1), ('\n', 2, 1), ('x', 3, 1)]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(SourceCursor::new("").next().is_none());
    }

    #[test]
    fn offsets_are_byte_offsets() {
        let chars: Vec<_> = SourceCursor::new("é{").collect();
        assert_eq!(chars[0].span(), Span { start: 0, end: 2 });
        assert_eq!(chars[1].offset, 2);
        assert_eq!(chars[1].loc.col, 2);
    }
}
