//! Cursor over a flattened token stream.

use crate::token::{BlockType, ParserToken};

static EOF_TOKEN: ParserToken = ParserToken::Eof;

/// A window `[first, last)` into a token buffer.
///
/// Ranges are cheap to copy; sub-ranges keep a reference to the full buffer so that the
/// token in front of the window stays observable through [`TokenRange::preceding_token`].
#[derive(Clone, Copy, Debug)]
pub struct TokenRange<'tokens> {
    tokens: &'tokens [ParserToken],
    first: usize,
    last: usize,
}

impl<'tokens> TokenRange<'tokens> {
    /// Range covering the whole buffer.
    pub const fn new(tokens: &'tokens [ParserToken]) -> Self {
        Self {
            tokens,
            first: 0,
            last: tokens.len(),
        }
    }

    #[inline]
    pub const fn at_end(&self) -> bool {
        self.first >= self.last
    }

    /// Index of the next token in the underlying buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.first
    }

    /// The range between a previously saved `position()` and the current one.
    pub fn range_from(&self, start: usize) -> Self {
        Self {
            tokens: self.tokens,
            first: start.min(self.first),
            last: self.first,
        }
    }

    /// Next token without consuming it; `Eof` once the range is exhausted.
    pub fn peek(&self) -> &'tokens ParserToken {
        if self.at_end() {
            return &EOF_TOKEN;
        }
        self.tokens.get(self.first).unwrap_or(&EOF_TOKEN)
    }

    /// Token just before the start of this range in the underlying buffer.
    pub fn preceding_token(&self) -> Option<&'tokens ParserToken> {
        self.first
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
    }

    /// Consume one token. Block-start tokens are consumed alone; use
    /// [`TokenRange::consume_block`] to skip an entire block.
    pub fn consume(&mut self) -> &'tokens ParserToken {
        let token = self.peek();
        if !self.at_end() {
            self.first += 1;
        }
        token
    }

    /// Consume one token and any whitespace after it.
    pub fn consume_including_whitespace(&mut self) -> &'tokens ParserToken {
        let token = self.consume();
        self.consume_whitespace();
        token
    }

    pub fn consume_whitespace(&mut self) {
        while self.peek().is_whitespace() {
            self.first += 1;
        }
    }

    /// Consume a block starting at the current token and return its contents.
    ///
    /// An unterminated block runs to the end of the range.
    pub fn consume_block(&mut self) -> Self {
        debug_assert_eq!(self.peek().block_type(), BlockType::BlockStart);
        self.first += 1;
        let start = self.first;
        let mut nesting_level = 0_usize;
        while !self.at_end() {
            let token = self.peek();
            self.first += 1;
            match token.block_type() {
                BlockType::BlockStart => nesting_level += 1,
                BlockType::BlockEnd => {
                    if nesting_level == 0 {
                        return Self {
                            tokens: self.tokens,
                            first: start,
                            last: self.first - 1,
                        };
                    }
                    nesting_level -= 1;
                }
                BlockType::NotBlock => {}
            }
        }
        Self {
            tokens: self.tokens,
            first: start,
            last: self.first,
        }
    }

    /// Consume a whole component value: one token, or one block with its contents.
    pub fn consume_component_value(&mut self) {
        if self.peek().block_type() == BlockType::BlockStart {
            self.consume_block();
        } else {
            self.consume();
        }
    }

    /// Remaining tokens of the range.
    pub fn remaining(&self) -> &'tokens [ParserToken] {
        self.tokens.get(self.first..self.last).unwrap_or(&[])
    }

    /// Serialize the remaining tokens back to CSS text.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for token in self.remaining() {
            token.serialize_into(&mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    /// # Panics
    /// Panics if a nested block is not returned whole.
    #[test]
    fn consume_block_returns_contents() {
        let tokens = tokenize("f(a (b) c) d");
        let mut range = TokenRange::new(&tokens);
        let block = range.consume_block();
        assert_eq!(block.serialize(), "a (b) c");
        range.consume_whitespace();
        assert!(range.peek().is_ident_ignoring_case("d"));
    }

    /// # Panics
    /// Panics if the preceding token is not visible from a sub-range.
    #[test]
    fn preceding_token_looks_behind_the_window() {
        let tokens = tokenize("a b");
        let mut range = TokenRange::new(&tokens);
        range.consume();
        assert!(range.preceding_token().is_some_and(|token| token.is_ident_ignoring_case("a")));
        range.consume();
        assert!(range.preceding_token().is_some_and(ParserToken::is_whitespace));
    }

    /// # Panics
    /// Panics if the range does not report `Eof` past its end.
    #[test]
    fn peek_past_end_is_eof() {
        let tokens = tokenize("x");
        let mut range = TokenRange::new(&tokens);
        range.consume();
        assert!(range.at_end());
        assert!(range.consume().is_eof());
    }
}
