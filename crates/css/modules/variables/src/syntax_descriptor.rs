//! CSS Properties and Values API Level 1 — the `syntax` descriptor of a registered custom
//! property.
//! Spec: <https://www.w3.org/TR/css-properties-values-api-1/#syntax-strings>

use css_parser::consumers::{consume_image, consume_transform_function};
use css_syntax::{ParserMode, ParserToken, TokenRange, tokenize};
use css_values_units::{
    CssValue, PrimitiveValue, ValueId, ValueList, ValueListSeparator, ValueRange, UnitlessQuirk,
    consume_angle, consume_color, consume_custom_ident, consume_integer, consume_length,
    consume_length_or_percent, consume_number, consume_percent, consume_resolution,
    consume_time, consume_url,
};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// A `<data-type>` name or a literal identifier accepted by a syntax component.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxType {
    Ident(String),
    Length,
    Number,
    Percentage,
    LengthPercentage,
    Color,
    Image,
    Url,
    Integer,
    Angle,
    Time,
    Resolution,
    TransformFunction,
    CustomIdent,
}

static DATA_TYPES: Lazy<HashMap<&'static str, SyntaxType>> = Lazy::new(|| {
    HashMap::from([
        ("length", SyntaxType::Length),
        ("number", SyntaxType::Number),
        ("percentage", SyntaxType::Percentage),
        ("length-percentage", SyntaxType::LengthPercentage),
        ("color", SyntaxType::Color),
        ("image", SyntaxType::Image),
        ("url", SyntaxType::Url),
        ("integer", SyntaxType::Integer),
        ("angle", SyntaxType::Angle),
        ("time", SyntaxType::Time),
        ("resolution", SyntaxType::Resolution),
        ("transform-function", SyntaxType::TransformFunction),
        ("custom-ident", SyntaxType::CustomIdent),
    ])
});

/// How many values a component matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxRepeat {
    None,
    /// `+`: one or more, space separated.
    SpaceSeparated,
    /// `#`: one or more, comma separated.
    CommaSeparated,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SyntaxComponent {
    pub syntax_type: SyntaxType,
    pub repeat: SyntaxRepeat,
}

impl SyntaxComponent {
    fn consume_single(&self, range: &mut TokenRange<'_>, mode: ParserMode) -> Option<CssValue> {
        let primitive = match &self.syntax_type {
            SyntaxType::Ident(name) => {
                let ParserToken::Ident(ident) = range.peek() else {
                    return None;
                };
                if ident != name {
                    return None;
                }
                range.consume_including_whitespace();
                PrimitiveValue::custom_ident(name.clone())
            }
            SyntaxType::Length => consume_length(range, mode, ValueRange::All, UnitlessQuirk::Forbid)?,
            SyntaxType::Number => consume_number(range, ValueRange::All)?,
            SyntaxType::Percentage => consume_percent(range, ValueRange::All)?,
            SyntaxType::LengthPercentage => {
                consume_length_or_percent(range, mode, ValueRange::All, UnitlessQuirk::Forbid)?
            }
            SyntaxType::Color => consume_color(range, false)?,
            SyntaxType::Image => return consume_image(range),
            SyntaxType::Url => PrimitiveValue::uri(consume_url(range)?),
            SyntaxType::Integer => consume_integer(range, f64::MIN)?,
            SyntaxType::Angle => consume_angle(range)?,
            SyntaxType::Time => consume_time(range, ValueRange::All)?,
            SyntaxType::Resolution => consume_resolution(range)?,
            SyntaxType::TransformFunction => return consume_transform_function(range, mode),
            SyntaxType::CustomIdent => consume_custom_ident(range)?,
        };
        Some(CssValue::Primitive(primitive))
    }

    fn consume(&self, range: &mut TokenRange<'_>, mode: ParserMode) -> Option<CssValue> {
        let separator = match self.repeat {
            SyntaxRepeat::None => return self.consume_single(range, mode),
            SyntaxRepeat::SpaceSeparated => ValueListSeparator::Space,
            SyntaxRepeat::CommaSeparated => ValueListSeparator::Comma,
        };
        let mut list = ValueList::new(separator);
        loop {
            list.append(self.consume_single(range, mode)?);
            if range.at_end() {
                return Some(CssValue::ValueList(list));
            }
            if separator == ValueListSeparator::Comma
                && !matches!(range.consume_including_whitespace(), ParserToken::Comma)
            {
                return None;
            }
        }
    }
}

/// A parsed `syntax` descriptor: either `*` or alternatives separated by `|`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxDescriptor {
    components: Vec<SyntaxComponent>,
}

impl SyntaxDescriptor {
    /// The universal syntax, `*`.
    pub const fn token_stream() -> Self {
        Self {
            components: Vec::new(),
        }
    }

    /// Parse a syntax string. Returns `None` when it is not valid.
    pub fn parse(text: &str) -> Option<Self> {
        let tokens = tokenize(text);
        let mut range = TokenRange::new(&tokens);
        range.consume_whitespace();
        if matches!(range.peek(), ParserToken::Delimiter('*')) {
            range.consume_including_whitespace();
            return range.at_end().then(Self::token_stream);
        }

        let mut components = Vec::new();
        loop {
            components.push(consume_syntax_component(&mut range)?);
            range.consume_whitespace();
            if range.at_end() {
                return Some(Self { components });
            }
            if !matches!(range.consume_including_whitespace(), ParserToken::Delimiter('|')) {
                return None;
            }
        }
    }

    pub fn is_token_stream(&self) -> bool {
        self.components.is_empty()
    }

    pub fn components(&self) -> &[SyntaxComponent] {
        &self.components
    }

    /// Parse `range` against the first alternative that matches it entirely.
    ///
    /// The universal syntax has no typed value, so it never matches here.
    pub fn parse_value(&self, range: TokenRange<'_>, mode: ParserMode) -> Option<CssValue> {
        let mut range = range;
        range.consume_whitespace();
        self.components.iter().find_map(|component| {
            let mut attempt = range;
            let value = component.consume(&mut attempt, mode)?;
            attempt.at_end().then_some(value)
        })
    }
}

/// One component: `<data-type>` or an identifier, then an optional `+` or `#`.
fn consume_syntax_component(range: &mut TokenRange<'_>) -> Option<SyntaxComponent> {
    let syntax_type = match range.consume() {
        ParserToken::Delimiter('<') => {
            let ParserToken::Ident(name) = range.consume() else {
                return None;
            };
            let syntax_type = DATA_TYPES.get(name.as_str())?.clone();
            if !matches!(range.consume(), ParserToken::Delimiter('>')) {
                return None;
            }
            syntax_type
        }
        ParserToken::Ident(name) => {
            if ValueId::from_name(name).is_some_and(ValueId::is_css_wide_keyword)
                || name.eq_ignore_ascii_case("default")
            {
                return None;
            }
            SyntaxType::Ident(name.clone())
        }
        _ => return None,
    };
    let repeat = match range.peek() {
        ParserToken::Delimiter('+') => SyntaxRepeat::SpaceSeparated,
        ParserToken::Delimiter('#') => SyntaxRepeat::CommaSeparated,
        _ => SyntaxRepeat::None,
    };
    if repeat != SyntaxRepeat::None {
        range.consume();
    }
    Some(SyntaxComponent {
        syntax_type,
        repeat,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_value(syntax: &str, text: &str) -> Option<CssValue> {
        let descriptor = SyntaxDescriptor::parse(syntax)?;
        let tokens = tokenize(text);
        descriptor.parse_value(TokenRange::new(&tokens), ParserMode::HtmlStandard)
    }

    /// # Panics
    /// Panics if valid syntax strings are rejected or invalid ones accepted.
    #[test]
    fn parses_syntax_strings() {
        assert!(SyntaxDescriptor::parse(" * ").is_some_and(|syntax| syntax.is_token_stream()));
        let syntax = SyntaxDescriptor::parse("<length> | auto | <color>#").unwrap_or_else(SyntaxDescriptor::token_stream);
        assert_eq!(syntax.components().len(), 3);
        assert_eq!(
            syntax.components().get(2).map(|component| component.repeat),
            Some(SyntaxRepeat::CommaSeparated)
        );
        assert!(SyntaxDescriptor::parse("").is_none());
        assert!(SyntaxDescriptor::parse("<lenght>").is_none());
        assert!(SyntaxDescriptor::parse("< length>").is_none());
        assert!(SyntaxDescriptor::parse("<length> |").is_none());
        assert!(SyntaxDescriptor::parse("inherit").is_none());
        assert!(SyntaxDescriptor::parse("* | <length>").is_none());
    }

    /// # Panics
    /// Panics if values are not matched against the right alternative.
    #[test]
    fn matches_values() {
        assert!(parse_value("<length>", "10px").is_some_and(|value| value.css_text() == "10px"));
        assert!(parse_value("<length>", "10%").is_none());
        assert!(parse_value("<length> | auto", "auto").is_some());
        assert!(parse_value("<length> | auto", "AUTO").is_none());
        assert!(parse_value("<integer>+", "1 2 3").is_some_and(|value| value.css_text() == "1 2 3"));
        assert!(parse_value("<color>#", "red, blue").is_some_and(|value| value.css_text() == "red, blue"));
        assert!(parse_value("<color>#", "red blue").is_none());
        assert!(parse_value("*", "anything").is_none());
    }
}
