//! CSS Custom Properties for Cascading Variables Level 1 — token streams of custom
//! property values and of declarations that reference `var()`.
//! Spec: <https://www.w3.org/TR/css-variables-1/#syntax>

use css_syntax::{ParserToken, TokenRange};

/// An unresolved token stream.
///
/// Substitution of `var()` references happens at style-building time, so a declaration
/// that is never read is never resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableData {
    tokens: Vec<ParserToken>,
    needs_variable_resolution: bool,
}

impl VariableData {
    /// Copy the tokens of `range`, trimming surrounding whitespace.
    pub fn new(range: TokenRange<'_>) -> Self {
        Self::from_tokens(range.remaining().to_vec())
    }

    pub fn from_tokens(mut tokens: Vec<ParserToken>) -> Self {
        while tokens.last().is_some_and(ParserToken::is_whitespace) {
            tokens.pop();
        }
        let leading = tokens
            .iter()
            .take_while(|token| token.is_whitespace())
            .count();
        tokens.drain(..leading);
        let needs_variable_resolution = tokens
            .iter()
            .any(|token| token.is_function_ignoring_case("var"));
        Self {
            tokens,
            needs_variable_resolution,
        }
    }

    pub fn tokens(&self) -> &[ParserToken] {
        &self.tokens
    }

    pub fn token_range(&self) -> TokenRange<'_> {
        TokenRange::new(&self.tokens)
    }

    /// Whether the stream contains a `var()` reference.
    pub const fn needs_variable_resolution(&self) -> bool {
        self.needs_variable_resolution
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn serialize(&self) -> String {
        self.token_range().serialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_syntax::tokenize;

    /// # Panics
    /// Panics if whitespace is kept or `var()` references are missed.
    #[test]
    fn trims_and_detects_references() {
        let tokens = tokenize("  10px VAR(--gap)  ");
        let data = VariableData::new(TokenRange::new(&tokens));
        assert!(data.needs_variable_resolution());
        assert_eq!(data.serialize(), "10px VAR(--gap)");
        let tokens = tokenize("red");
        assert!(!VariableData::new(TokenRange::new(&tokens)).needs_variable_resolution());
    }
}
