//! CSS Syntax Module Level 3 / CSS Properties and Values API Level 1 — parsing entry points.
//! Spec: <https://www.w3.org/TR/css-syntax-3/#parsing>
//!
//! [`CssParser`] is the front door of the CSS crates: it turns property value strings,
//! colors and whole stylesheets into values, and keeps the document's registered custom
//! properties. The value model, style builder and animation crates are re-exported for
//! callers that go further than parsing.

#![forbid(unsafe_code)]

use anyhow::{Context as _, Result, anyhow};
use css_parser::fast_paths::parse_color as fast_parse_color;
use css_parser::{
    CssProperty, MutableStylePropertySet, ParserContext, SetResult, StyleSheetContents, maybe_parse_value,
    parse_style_sheet_reporting,
};
use css_syntax::{TokenRange, tokenize};
use css_values_units::{Color, CssValue, PropertyId, consume_color, primitive_to_color};
use css_variables::PropertyRegistry;
use log::{debug, trace};

pub use css_animation as animation;
pub use css_parser as parser;
pub use css_style_builder as style_builder;
pub use css_syntax as syntax;
pub use css_values_units as values;
pub use css_variables as variables;

/// Parses CSS text in one document.
#[derive(Clone, Debug, Default)]
pub struct CssParser {
    context: ParserContext,
    registry: PropertyRegistry,
}

impl CssParser {
    pub fn new(context: ParserContext) -> Self {
        Self {
            context,
            registry: PropertyRegistry::new(),
        }
    }

    pub const fn context(&self) -> &ParserContext {
        &self.context
    }

    /// Custom properties registered with [`register_property`](Self::register_property).
    pub const fn registry(&self) -> &PropertyRegistry {
        &self.registry
    }

    /// Parse `text` as a value of `property` and store it in `declarations`.
    ///
    /// Simple values are taken by the fast path; everything else, shorthands included, goes
    /// through the tokenizer. A declaration that is already `!important` is only replaced by
    /// another `!important` one.
    pub fn parse_value(
        &self,
        declarations: &mut MutableStylePropertySet,
        property: PropertyId,
        text: &str,
        important: bool,
    ) -> SetResult {
        if self.context.allow_fast_paths()
            && let Some(value) = maybe_parse_value(property, text, self.context.mode())
        {
            trace!(target: "css::parser", "fast path parsed {}: {text}", property.name());
            return SetResult {
                did_parse: true,
                did_change: declarations.add_parsed_properties(vec![CssProperty::new(property, value, important)]),
            };
        }
        let tokens = tokenize(text);
        let mut properties = Vec::new();
        if !css_parser::parse_value(property, important, TokenRange::new(&tokens), &self.context, &mut properties) {
            return SetResult::default();
        }
        SetResult {
            did_parse: true,
            did_change: declarations.add_parsed_properties(properties),
        }
    }

    /// Parse `text` as one complete value of the longhand `property`.
    pub fn parse_single_value(&self, property: PropertyId, text: &str) -> Option<CssValue> {
        if self.context.allow_fast_paths()
            && let Some(value) = maybe_parse_value(property, text, self.context.mode())
        {
            return Some(value);
        }
        let tokens = tokenize(text);
        css_parser::parse_single_value(property, TokenRange::new(&tokens), &self.context)
    }

    /// Parse a standalone `<color>`, such as a `color` attribute or a canvas fill style.
    ///
    /// Colors that depend on the element (`currentcolor`, link colors) have no value here.
    pub fn parse_color(text: &str) -> Option<Color> {
        let text = text.trim();
        if let Some(value) = fast_parse_color(text, false) {
            return primitive_to_color(&value);
        }
        let tokens = tokenize(text);
        let mut range = TokenRange::new(&tokens);
        range.consume_whitespace();
        let value = consume_color(&mut range, false)?;
        range.consume_whitespace();
        if !range.at_end() {
            return None;
        }
        primitive_to_color(&value)
    }

    /// Parse a stylesheet, dropping invalid rules and declarations.
    pub fn parse_style_sheet(&self, text: &str) -> StyleSheetContents {
        parse_style_sheet_reporting(text, &self.context).0
    }

    /// Parse a stylesheet that must not contain invalid top-level rules.
    ///
    /// # Errors
    /// Fails when any top-level rule is dropped, naming the first one.
    pub fn parse_style_sheet_strict(&self, text: &str) -> Result<StyleSheetContents> {
        let (sheet, invalid) = parse_style_sheet_reporting(text, &self.context);
        if let Some(first) = invalid.first() {
            return Err(anyhow!(
                "{} invalid rule(s); first at line {}, column {}: {}",
                invalid.len(),
                first.line,
                first.column,
                first.text
            ));
        }
        Ok(sheet)
    }

    /// Register a custom property, as `CSS.registerProperty()` does.
    ///
    /// # Errors
    /// Fails when the name, the syntax string or the initial value is invalid, or when
    /// `name` is already registered.
    pub fn register_property(
        &mut self,
        name: &str,
        syntax: &str,
        inherits: bool,
        initial_value: Option<&str>,
    ) -> Result<()> {
        self.registry
            .register_property(name, syntax, inherits, initial_value)
            .with_context(|| format!("failed to register {name}"))?;
        debug!(target: "css::parser", "{} custom properties registered", self.registry.names().count());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// # Panics
    /// Panics if colors outside a document are not resolved or symbolic ones are.
    #[test]
    fn parses_colors() {
        assert_eq!(CssParser::parse_color("rgb(1, 2, 3)"), Some(Color::from_rgb(1, 2, 3)));
        assert_eq!(CssParser::parse_color(" red "), Some(Color::from_rgb(255, 0, 0)));
        assert_eq!(CssParser::parse_color("currentcolor"), None);
        assert_eq!(CssParser::parse_color("f00"), None);
        assert_eq!(CssParser::parse_color("red blue"), None);
    }

    /// # Panics
    /// Panics if registration errors are not surfaced or duplicates are accepted.
    #[test]
    fn registers_properties() {
        let mut parser = CssParser::default();
        assert!(matches!(parser.register_property("--gap", "<length>", false, Some("4px")), Ok(())));
        assert!(parser.registry().registration("--gap").is_some());
        let duplicate = parser.register_property("--gap", "<length>", false, Some("4px"));
        assert!(duplicate.is_err_and(|error| error.to_string().contains("--gap")));
        let font_relative = parser.register_property("--size", "<length>", false, Some("1em"));
        assert!(font_relative.is_err_and(|error| error.to_string().contains("--size")));
        let unprefixed = parser.register_property("gap", "*", true, None);
        assert!(unprefixed.is_err_and(|error| error.to_string().contains("gap")));
    }
}
