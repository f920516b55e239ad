//! Entry points for parsing one declaration's value from tokens.

use crate::context::ParserContext;
use crate::longhands::consume_longhand;
use crate::property_set::CssProperty;
use crate::shorthands::{add_css_wide_keyword_to_longhands, consume_css_wide_keyword, parse_shorthand};
use crate::variable_parser::contains_valid_variable_references;
use css_syntax::TokenRange;
use css_values_units::{CssValue, PropertyId, VariableData};
use log::debug;
use std::sync::Arc;

/// Parse `range` as the value of `property` and append the resulting longhands to `out`.
///
/// Returns false, leaving `out` untouched, when the value is invalid. A value that fails to
/// parse but holds well-formed `var()` references is kept unresolved, on every longhand of
/// a shorthand.
pub fn parse_value(
    property: PropertyId,
    important: bool,
    mut range: TokenRange<'_>,
    context: &ParserContext,
    out: &mut Vec<CssProperty>,
) -> bool {
    if property == PropertyId::Variable {
        return false;
    }
    range.consume_whitespace();
    let original_range = range;

    if let Some(keyword) = consume_css_wide_keyword(&mut range) {
        if property.is_shorthand() {
            add_css_wide_keyword_to_longhands(property, &keyword, important, out);
        } else {
            out.push(CssProperty::new(property, keyword, important));
        }
        return true;
    }

    let parsed = if property.is_shorthand() {
        parse_shorthand(property, important, &mut range, context, out)
    } else if let Some(value) = consume_longhand(property, &mut range, context)
        && range.at_end()
    {
        out.push(CssProperty::new(property, value, important));
        true
    } else {
        false
    };
    if parsed {
        return true;
    }

    if contains_valid_variable_references(original_range) {
        let variable_data = Arc::new(VariableData::new(original_range));
        if property.is_shorthand() {
            let reference = CssValue::VariableReference(variable_data);
            for longhand in property.longhands() {
                out.push(CssProperty::expanded(
                    *longhand,
                    Some(property),
                    reference.clone(),
                    important,
                    false,
                ));
            }
        } else {
            out.push(CssProperty::new(
                property,
                CssValue::VariableReference(variable_data),
                important,
            ));
        }
        return true;
    }

    debug!(
        target: "css::parser",
        "dropping invalid value for {}: {}",
        property.name(),
        original_range.serialize()
    );
    false
}

/// Parse `range` as a complete value of the longhand `property`, CSS-wide keywords included.
///
/// The whole range must be consumed; `var()` references are not accepted here.
pub fn parse_single_value(
    property: PropertyId,
    mut range: TokenRange<'_>,
    context: &ParserContext,
) -> Option<CssValue> {
    range.consume_whitespace();
    if let Some(keyword) = consume_css_wide_keyword(&mut range) {
        return Some(keyword);
    }
    let value = consume_longhand(property, &mut range, context)?;
    range.at_end().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_syntax::tokenize;

    fn parse(property: PropertyId, text: &str) -> Option<Vec<CssProperty>> {
        let tokens = tokenize(text);
        let mut out = Vec::new();
        parse_value(property, false, TokenRange::new(&tokens), &ParserContext::default(), &mut out)
            .then_some(out)
    }

    /// # Panics
    /// Panics if CSS-wide keywords are not expanded onto every longhand.
    #[test]
    fn css_wide_keywords_expand() {
        let parsed = parse(PropertyId::Margin, " inherit ").unwrap_or_default();
        assert_eq!(parsed.len(), 4);
        assert!(parsed.iter().all(|property| *property.value() == CssValue::Inherit));
        assert!(parse(PropertyId::Margin, "inherit 1px").is_none());
    }

    /// # Panics
    /// Panics if `var()` values are not kept for later substitution.
    #[test]
    fn keeps_variable_references() {
        let parsed = parse(PropertyId::Width, "var(--w)").unwrap_or_default();
        assert!(parsed.first().is_some_and(|property| property.value().is_variable_reference()));
        let parsed = parse(PropertyId::Padding, "var(--p) 2px").unwrap_or_default();
        assert_eq!(parsed.len(), 4);
        assert!(parsed.iter().all(|property| {
            property.value().is_variable_reference()
                && property.shorthand_id() == Some(PropertyId::Padding)
        }));
        assert!(parse(PropertyId::Width, "var(w)").is_none());
    }

    /// # Panics
    /// Panics if trailing garbage is accepted.
    #[test]
    fn single_values_consume_everything() {
        let tokens = tokenize("10px 20px");
        let context = ParserContext::default();
        assert!(parse_single_value(PropertyId::Width, TokenRange::new(&tokens), &context).is_none());
        let tokens = tokenize("unset");
        assert_eq!(
            parse_single_value(PropertyId::Width, TokenRange::new(&tokens), &context),
            Some(CssValue::Unset)
        );
    }
}
