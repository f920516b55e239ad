//! Settings shared by the fast paths, the property parser and the rule parser.

use css_syntax::ParserMode;

/// How a piece of CSS text should be parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParserContext {
    mode: ParserMode,
    allow_fast_paths: bool,
}

impl Default for ParserContext {
    fn default() -> Self {
        Self::new(ParserMode::HtmlStandard)
    }
}

impl ParserContext {
    pub const fn new(mode: ParserMode) -> Self {
        Self {
            mode,
            allow_fast_paths: true,
        }
    }

    /// Standards-mode context used where no document is involved, e.g. `parse_color`.
    pub const fn strict() -> Self {
        Self::new(ParserMode::HtmlStandard)
    }

    /// Disable the character-level fast paths so every value goes through the tokenizer.
    #[must_use]
    pub const fn without_fast_paths(mut self) -> Self {
        self.allow_fast_paths = false;
        self
    }

    #[inline]
    pub const fn mode(&self) -> ParserMode {
        self.mode
    }

    #[inline]
    pub const fn in_quirks_mode(&self) -> bool {
        self.mode.is_quirks()
    }

    #[inline]
    pub const fn allow_fast_paths(&self) -> bool {
        self.allow_fast_paths
    }
}
