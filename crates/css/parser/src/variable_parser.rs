//! CSS Custom Properties Level 1 — validation of custom property values and `var()`
//! references at parse time.
//! Spec: <https://www.w3.org/TR/css-variables-1/#using-variables>

use css_syntax::{BlockType, ParserToken, TokenRange};
use css_values_units::{
    CustomPropertyDeclaration, CustomPropertyValue, ValueId, VariableData, token_value_id,
};
use std::sync::Arc;

/// Whether `name` is a custom property name (`--` followed by anything).
pub fn is_valid_variable_name(name: &str) -> bool {
    name.len() > 2 && name.starts_with("--")
}

fn is_valid_variable_name_token(token: &ParserToken) -> bool {
    matches!(token, ParserToken::Ident(name) if is_valid_variable_name(name))
}

/// Arguments of a `var()` function: a name and an optional, non-empty fallback.
fn is_valid_variable_reference(mut range: TokenRange<'_>, has_references: &mut bool) -> bool {
    *has_references = true;
    range.consume_whitespace();
    if !is_valid_variable_name_token(range.consume_including_whitespace()) {
        return false;
    }
    if range.at_end() {
        return true;
    }
    if !matches!(range.consume(), ParserToken::Comma) {
        return false;
    }
    if range.at_end() {
        return false;
    }
    classify_block(range, has_references, false)
}

/// Validate a `<declaration-value>`, recording whether it references variables.
fn classify_block(mut range: TokenRange<'_>, has_references: &mut bool, is_top_level_block: bool) -> bool {
    while !range.at_end() {
        let token = range.peek();
        if token.block_type() == BlockType::BlockStart {
            let block = range.consume_block();
            let valid = if token.is_function_ignoring_case("var") {
                is_valid_variable_reference(block, has_references)
            } else {
                classify_block(block, has_references, false)
            };
            if !valid {
                return false;
            }
            continue;
        }
        match range.consume() {
            ParserToken::Delimiter('!') | ParserToken::Semicolon if is_top_level_block => {
                return false;
            }
            ParserToken::RightParenthesis
            | ParserToken::RightBrace
            | ParserToken::RightBracket
            | ParserToken::BadString
            | ParserToken::BadUrl => return false,
            _ => {}
        }
    }
    true
}

/// Whether `range` holds at least one `var()` and every reference is well formed.
pub fn contains_valid_variable_references(range: TokenRange<'_>) -> bool {
    let mut has_references = false;
    classify_block(range, &mut has_references, true) && has_references
}

/// Parse the value of a `--name` declaration.
///
/// The value is kept as tokens; a lone CSS-wide keyword is recorded as such. Empty values
/// are invalid.
pub fn parse_declaration_value(name: &str, mut range: TokenRange<'_>) -> Option<CustomPropertyDeclaration> {
    range.consume_whitespace();
    if range.at_end() {
        return None;
    }
    let mut keyword_range = range;
    if let Some(id) = token_value_id(keyword_range.consume_including_whitespace())
        && keyword_range.at_end()
        && ValueId::is_css_wide_keyword(id)
    {
        return Some(CustomPropertyDeclaration {
            name: name.to_owned(),
            value: CustomPropertyValue::CssWide(id),
        });
    }
    let mut has_references = false;
    if !classify_block(range, &mut has_references, true) {
        return None;
    }
    Some(CustomPropertyDeclaration {
        name: name.to_owned(),
        value: CustomPropertyValue::Tokens(Arc::new(VariableData::new(range))),
    })
}
