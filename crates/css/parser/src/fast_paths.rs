//! Character-level fast paths for common declarations.
//!
//! Each recognizer accepts a narrow grammar straight from the source text and builds the
//! value the tokenizing parser builds for the same text. Anything outside that grammar
//! yields `None` and the caller falls back to the general parser.

use crate::property_tables::{
    allows_quirky_color, is_color_property_id, is_keyword_property_id,
    is_valid_keyword_property_and_value,
};
use css_syntax::ParserMode;
use css_values_units::{
    Color, CssValue, FunctionValue, PrimitiveValue, PropertyId, UnitType, ValueId, ValueList,
    alpha_to_u8, clamp_rgb_component,
};

/// Strings shorter than this cannot hold a fast-path transform function.
const SHORTEST_VALID_TRANSFORM_STRING_LENGTH: usize = 12;

/// `alpha_to_u8` of `0.0`, `0.1`, ... `0.9`.
const TENTH_ALPHA_VALUES: [u8; 10] = [0, 26, 51, 77, 102, 128, 153, 179, 204, 230];

/// Longest integer part accepted for an `rgb()` component.
const MAX_COLOR_COMPONENT_DIGITS: usize = 10;

/// Try every fast path that applies to `property`.
pub fn maybe_parse_value(property: PropertyId, text: &str, mode: ParserMode) -> Option<CssValue> {
    if text.is_empty() || property == PropertyId::Variable {
        return None;
    }
    if let Some(length) = parse_simple_length_value(property, text, mode) {
        return Some(length);
    }
    if is_color_property_id(property) {
        let accept_quirky_colors = mode.is_quirks() && allows_quirky_color(property);
        return parse_color(text, accept_quirky_colors).map(CssValue::Primitive);
    }
    if let Some(keyword) = parse_keyword_value(property, text) {
        return Some(keyword);
    }
    if property == PropertyId::Transform && !mode.is_svg_attribute() {
        return parse_simple_transform_list(text);
    }
    None
}

#[inline]
const fn is_css_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | b'\x0C')
}

fn is_css_space_char(character: char) -> bool {
    u8::try_from(character).is_ok_and(is_css_space)
}

fn skip_spaces(bytes: &[u8], mut index: usize) -> usize {
    while bytes.get(index).copied().is_some_and(is_css_space) {
        index += 1;
    }
    index
}

fn count_digits(bytes: &[u8], start: usize) -> usize {
    bytes
        .get(start..)
        .map_or(0, |rest| rest.iter().take_while(|byte| byte.is_ascii_digit()).count())
}

fn strip_prefix_ignore_case<'text>(text: &'text str, prefix: &str) -> Option<&'text str> {
    let head = text.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }
    text.get(prefix.len()..)
}

fn strip_suffix_ignore_case<'text>(text: &'text str, suffix: &str) -> Option<&'text str> {
    let split = text.len().checked_sub(suffix.len())?;
    let tail = text.get(split..)?;
    if !tail.eq_ignore_ascii_case(suffix) {
        return None;
    }
    text.get(..split)
}

/// Parse `text` when the whole of it is a single CSS `<number>`.
///
/// Values are clamped to the `f32` range exactly as the tokenizer clamps them.
fn parse_css_number(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut index = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer_digits = count_digits(bytes, index);
    index += integer_digits;
    let mut fraction_digits = 0;
    if bytes.get(index) == Some(&b'.') {
        fraction_digits = count_digits(bytes, index + 1);
        if fraction_digits == 0 {
            return None;
        }
        index += 1 + fraction_digits;
    }
    if integer_digits == 0 && fraction_digits == 0 {
        return None;
    }
    if matches!(bytes.get(index), Some(b'e' | b'E')) {
        let mut exponent = index + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let exponent_digits = count_digits(bytes, exponent);
        if exponent_digits == 0 {
            return None;
        }
        index = exponent + exponent_digits;
    }
    if index != bytes.len() {
        return None;
    }
    let value = text.parse::<f64>().ok()?;
    value
        .is_finite()
        .then(|| value.clamp(-f64::from(f32::MAX), f64::from(f32::MAX)))
}

/// Properties with a simple `<length-percentage>` fast path, and whether they take negatives.
const fn simple_length_property(property: PropertyId) -> Option<bool> {
    match property {
        PropertyId::FontSize
        | PropertyId::Height
        | PropertyId::Width
        | PropertyId::MinHeight
        | PropertyId::MinWidth
        | PropertyId::PaddingTop
        | PropertyId::PaddingRight
        | PropertyId::PaddingBottom
        | PropertyId::PaddingLeft => Some(false),
        PropertyId::Top
        | PropertyId::Right
        | PropertyId::Bottom
        | PropertyId::Left
        | PropertyId::MarginTop
        | PropertyId::MarginRight
        | PropertyId::MarginBottom
        | PropertyId::MarginLeft => Some(true),
        _ => None,
    }
}

/// `<number>px`, `<number>%` or a bare number for the simple length properties.
///
/// A bare number is accepted as pixels only when it is zero, and as a user unit in SVG
/// attributes.
fn parse_simple_length_value(property: PropertyId, text: &str, mode: ParserMode) -> Option<CssValue> {
    let accepts_negative = simple_length_property(property)?;
    let (number_text, unit) = if let Some(number) = strip_suffix_ignore_case(text, "px") {
        (number, UnitType::Pixels)
    } else if let Some(number) = text.strip_suffix('%') {
        (number, UnitType::Percentage)
    } else {
        (text, UnitType::Number)
    };
    let number = parse_css_number(number_text)?;
    let unit = match unit {
        UnitType::Number if mode.is_svg_attribute() => UnitType::Number,
        UnitType::Number if number == 0.0 => UnitType::Pixels,
        UnitType::Number => return None,
        other => other,
    };
    if number < 0.0 && !accepts_negative {
        return None;
    }
    Some(CssValue::Primitive(PrimitiveValue::numeric(number, unit)))
}

/// Color keywords, `#hex`, `rgb()` and `rgba()`.
pub fn parse_color(text: &str, accept_quirky_colors: bool) -> Option<PrimitiveValue> {
    if let Some(id) = ValueId::from_name(text)
        && id.is_color_keyword()
    {
        return Some(PrimitiveValue::identifier(id));
    }
    fast_parse_color(text, accept_quirky_colors).map(PrimitiveValue::color)
}

fn fast_parse_color(text: &str, accept_quirky_colors: bool) -> Option<Color> {
    let bytes = text.as_bytes();
    if bytes.len() >= 4
        && let Some(digits) = text.strip_prefix('#')
    {
        return Color::from_hex(digits);
    }
    // Hashless digits only when they would tokenize as an identifier; numeric tokens are
    // zero-padded by the general parser.
    if accept_quirky_colors
        && matches!(bytes.len(), 3 | 6)
        && bytes.first().is_some_and(u8::is_ascii_alphabetic)
        && let Some(color) = Color::from_hex(text)
    {
        return Some(color);
    }
    if let Some(arguments) = strip_prefix_ignore_case(text, "rgba(") {
        return parse_rgb_arguments(arguments, true);
    }
    if let Some(arguments) = strip_prefix_ignore_case(text, "rgb(") {
        return parse_rgb_arguments(arguments, false);
    }
    None
}

fn parse_rgb_arguments(text: &str, with_alpha: bool) -> Option<Color> {
    let mut rest = text;
    let mut expect_percentage = None;
    let mut channels = [0_u8; 3];
    for (index, channel) in channels.iter_mut().enumerate() {
        let terminator = if index == 2 && !with_alpha { b')' } else { b',' };
        let (value, is_percentage, remaining) =
            parse_color_int_or_percentage(rest, terminator, expect_percentage)?;
        expect_percentage = Some(is_percentage);
        *channel = clamp_rgb_component(value, is_percentage);
        rest = remaining;
    }
    let alpha = if with_alpha {
        let (alpha, remaining) = parse_alpha_value(rest)?;
        rest = remaining;
        alpha
    } else {
        u8::MAX
    };
    if !rest.is_empty() {
        return None;
    }
    let [red, green, blue] = channels;
    Some(Color::from_rgba(red, green, blue, alpha))
}

/// One `rgb()` component followed by `terminator`.
///
/// Integers and percentages cannot be mixed; fractions are only allowed on percentages.
fn parse_color_int_or_percentage(
    text: &str,
    terminator: u8,
    expect_percentage: Option<bool>,
) -> Option<(f64, bool, &str)> {
    let bytes = text.as_bytes();
    let number_start = skip_spaces(bytes, 0);
    let mut index = number_start + usize::from(bytes.get(number_start) == Some(&b'-'));
    let integer_digits = count_digits(bytes, index);
    if integer_digits == 0 || integer_digits > MAX_COLOR_COMPONENT_DIGITS {
        return None;
    }
    index += integer_digits;
    if bytes.get(index) == Some(&b'.') {
        let fraction_digits = count_digits(bytes, index + 1);
        if fraction_digits == 0 {
            return None;
        }
        index += 1 + fraction_digits;
        if bytes.get(index) != Some(&b'%') {
            return None;
        }
    }
    let value = text.get(number_start..index)?.parse::<f64>().ok()?;
    let is_percentage = bytes.get(index) == Some(&b'%');
    if expect_percentage.is_some_and(|expected| expected != is_percentage) {
        return None;
    }
    index = skip_spaces(bytes, index + usize::from(is_percentage));
    if bytes.get(index) != Some(&terminator) {
        return None;
    }
    Some((value, is_percentage, text.get(index + 1..)?))
}

/// The alpha argument of `rgba()` up to and including the closing parenthesis.
fn parse_alpha_value(text: &str) -> Option<(u8, &str)> {
    let close = text.find(')')?;
    let argument = text.get(..close)?.trim_matches(is_css_space_char);
    let alpha = match argument.as_bytes() {
        [b'0', b'.', digit] | [b'.', digit] if digit.is_ascii_digit() => {
            TENTH_ALPHA_VALUES.get(usize::from(digit - b'0')).copied()
        }
        _ => parse_css_number(argument).map(alpha_to_u8),
    }?;
    Some((alpha, text.get(close + 1..)?))
}

/// A bare keyword valid for `property`, or a CSS-wide keyword.
fn parse_keyword_value(property: PropertyId, text: &str) -> Option<CssValue> {
    let id = ValueId::from_name(text)?;
    if !is_keyword_property_id(property) && (!id.is_css_wide_keyword() || property.is_shorthand()) {
        return None;
    }
    if let Some(css_wide) = CssValue::css_wide(id) {
        return Some(css_wide);
    }
    is_valid_keyword_property_and_value(property, id).then_some(CssValue::identifier(id))
}

/// Quick scan rejecting transform lists that cannot be parsed by the fast path, before any
/// number is converted.
fn transform_can_likely_use_fast_path(bytes: &[u8]) -> bool {
    let lowercase_at = |index: usize| bytes.get(index).map(u8::to_ascii_lowercase);
    let mut index = 0;
    while let Some(&byte) = bytes.get(index) {
        if is_css_space(byte) {
            index += 1;
            continue;
        }
        if bytes.len() - index < SHORTEST_VALID_TRANSFORM_STRING_LENGTH {
            return false;
        }
        index += match byte.to_ascii_lowercase() {
            // translate, translatex, translatey, translatez, translate3d
            b't' if lowercase_at(index + 8) == Some(b'e') => 9,
            // matrix3d
            b'm' if lowercase_at(index + 7) == Some(b'd') => 8,
            // scale3d
            b's' if lowercase_at(index + 6) == Some(b'd') => 7,
            _ => return false,
        };
        let Some(close) = bytes
            .get(index..)
            .and_then(|rest| rest.iter().position(|candidate| *candidate == b')'))
        else {
            return false;
        };
        index += close + 1;
    }
    true
}

fn parse_translate_argument(argument: &str) -> Option<PrimitiveValue> {
    if let Some(number) = strip_suffix_ignore_case(argument, "px") {
        return Some(PrimitiveValue::numeric(parse_css_number(number)?, UnitType::Pixels));
    }
    let number = parse_css_number(argument)?;
    (number == 0.0).then(|| PrimitiveValue::numeric(number, UnitType::Pixels))
}

fn parse_number_argument(argument: &str) -> Option<PrimitiveValue> {
    Some(PrimitiveValue::numeric(parse_css_number(argument)?, UnitType::Number))
}

/// Parse `count` comma-separated arguments and the closing parenthesis.
fn parse_transform_arguments(
    text: &str,
    count: usize,
    parse_argument: fn(&str) -> Option<PrimitiveValue>,
) -> Option<(Vec<CssValue>, usize)> {
    let mut arguments = Vec::with_capacity(count);
    let mut position = 0;
    for remaining in (1..=count).rev() {
        let terminator = if remaining == 1 { ')' } else { ',' };
        let rest = text.get(position..)?;
        let delimiter = rest.find(terminator)?;
        let argument = rest.get(..delimiter)?.trim_matches(is_css_space_char);
        arguments.push(CssValue::Primitive(parse_argument(argument)?));
        position += delimiter + 1;
    }
    Some((arguments, position))
}

/// One transform function at the start of `text` and the number of bytes it spans.
fn parse_simple_transform_value(text: &str) -> Option<(FunctionValue, usize)> {
    if text.len() < SHORTEST_VALID_TRANSFORM_STRING_LENGTH {
        return None;
    }
    let (name, count, start, parse_argument): (ValueId, usize, usize, fn(&str) -> Option<PrimitiveValue>) =
        if let Some(rest) = strip_prefix_ignore_case(text, "translate") {
            let (name, count, start) = if strip_prefix_ignore_case(rest, "x(").is_some() {
                (ValueId::TranslateX, 1, 11)
            } else if strip_prefix_ignore_case(rest, "y(").is_some() {
                (ValueId::TranslateY, 1, 11)
            } else if strip_prefix_ignore_case(rest, "z(").is_some() {
                (ValueId::TranslateZ, 1, 11)
            } else if rest.starts_with('(') {
                (ValueId::Translate, 2, 10)
            } else if strip_prefix_ignore_case(rest, "3d(").is_some() {
                (ValueId::Translate3d, 3, 12)
            } else {
                return None;
            };
            (name, count, start, parse_translate_argument)
        } else if strip_prefix_ignore_case(text, "matrix3d(").is_some() {
            (ValueId::Matrix3d, 16, 9, parse_number_argument)
        } else if strip_prefix_ignore_case(text, "scale3d(").is_some() {
            (ValueId::Scale3d, 3, 8, parse_number_argument)
        } else {
            return None;
        };
    let (arguments, consumed) = parse_transform_arguments(text.get(start..)?, count, parse_argument)?;
    Some((FunctionValue::with_arguments(name, arguments), start + consumed))
}

fn parse_simple_transform_list(text: &str) -> Option<CssValue> {
    let bytes = text.as_bytes();
    if !transform_can_likely_use_fast_path(bytes) {
        return None;
    }
    let mut list = ValueList::space_separated();
    let mut position = 0;
    while position < bytes.len() {
        position = skip_spaces(bytes, position);
        if position >= bytes.len() {
            break;
        }
        let (function, consumed) = parse_simple_transform_value(text.get(position..)?)?;
        list.append(CssValue::Function(function));
        position += consumed;
    }
    (!list.is_empty()).then_some(CssValue::ValueList(list))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard(property: PropertyId, text: &str) -> Option<String> {
        maybe_parse_value(property, text, ParserMode::HtmlStandard).map(|value| value.css_text())
    }

    /// # Panics
    /// Panics if the length fast path accepts something outside its grammar.
    #[test]
    fn simple_lengths() {
        assert_eq!(standard(PropertyId::Width, "10px").as_deref(), Some("10px"));
        assert_eq!(standard(PropertyId::Width, "12.5%").as_deref(), Some("12.5%"));
        assert_eq!(standard(PropertyId::Width, "0").as_deref(), Some("0px"));
        assert_eq!(standard(PropertyId::MarginLeft, "-4PX").as_deref(), Some("-4px"));
        assert!(standard(PropertyId::Width, "-4px").is_none());
        assert!(standard(PropertyId::Width, "10").is_none());
        assert!(standard(PropertyId::Width, "10.px").is_none());
        assert!(standard(PropertyId::Width, "10em").is_none());
        assert!(standard(PropertyId::Width, " 10px").is_none());
        let svg = maybe_parse_value(PropertyId::Width, "10", ParserMode::SvgAttribute);
        assert!(svg.is_some_and(|value| value.css_text() == "10"));
    }

    /// # Panics
    /// Panics if hex, `rgb()` or `rgba()` colors are misread.
    #[test]
    fn colors() {
        assert_eq!(standard(PropertyId::Color, "#ff0000").as_deref(), Some("rgb(255, 0, 0)"));
        assert_eq!(standard(PropertyId::Color, "Red").as_deref(), Some("red"));
        assert_eq!(
            standard(PropertyId::Color, "rgb(10%, 50.5%, 300%)").as_deref(),
            Some("rgb(25, 129, 255)")
        );
        assert_eq!(
            standard(PropertyId::Color, "rgba(0,0,0,0.1)").as_deref(),
            Some("rgba(0, 0, 0, 0.101961)")
        );
        assert!(standard(PropertyId::Color, "rgb(10%, 5, 5)").is_none());
        assert!(standard(PropertyId::Color, "rgb(1.5, 5, 5)").is_none());
        assert!(standard(PropertyId::Color, "rgb(1, 2, 3) ").is_none());
        assert!(standard(PropertyId::Color, "abc").is_none());
        let quirky = maybe_parse_value(PropertyId::Color, "abc", ParserMode::HtmlQuirks);
        assert!(quirky.is_some_and(|value| value.css_text() == "rgb(170, 187, 204)"));
        let numeric = maybe_parse_value(PropertyId::Color, "123", ParserMode::HtmlQuirks);
        assert!(numeric.is_none());
    }

    /// # Panics
    /// Panics if the tenth-step alpha table drifts from the general alpha conversion.
    #[test]
    fn tenth_alpha_table_matches_general_rounding() {
        for (tenth, expected) in TENTH_ALPHA_VALUES.iter().enumerate() {
            assert_eq!(alpha_to_u8(tenth as f64 / 10.0), *expected);
        }
    }

    /// # Panics
    /// Panics if keywords are accepted for the wrong property.
    #[test]
    fn keywords() {
        assert_eq!(standard(PropertyId::Display, "inline-block").as_deref(), Some("inline-block"));
        assert!(standard(PropertyId::Display, "absolute").is_none());
        assert!(matches!(
            maybe_parse_value(PropertyId::Width, "inherit", ParserMode::HtmlStandard),
            Some(CssValue::Inherit)
        ));
        assert!(maybe_parse_value(PropertyId::Margin, "inherit", ParserMode::HtmlStandard).is_none());
        assert!(standard(PropertyId::Width, "auto").is_none());
    }

    /// # Panics
    /// Panics if the transform fast path accepts an unsupported function.
    #[test]
    fn transforms() {
        assert_eq!(
            standard(PropertyId::Transform, "translateX(10px) scale3d(1, 2, 3)").as_deref(),
            Some("translatex(10px) scale3d(1, 2, 3)")
        );
        assert_eq!(
            standard(PropertyId::Transform, "translate(0, 5px)").as_deref(),
            Some("translate(0px, 5px)")
        );
        assert!(standard(PropertyId::Transform, "rotate(45deg)").is_none());
        assert!(standard(PropertyId::Transform, "translate(5%, 5px)").is_none());
        assert!(standard(PropertyId::Transform, "translate(5px)").is_none());
        assert!(standard(PropertyId::Transform, "scale3d(1,1)").is_none());
    }
}
