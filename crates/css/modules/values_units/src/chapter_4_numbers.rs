//! CSS Values & Units Level 3 — §4 Numeric data types: integers and numbers.
//! Spec: <https://www.w3.org/TR/css-values-3/#numeric-types>

use crate::chapter_10_calc::{CalcParser, CalculationCategory};
use crate::chapter_6_dimensions::UnitType;
use crate::primitive_value::PrimitiveValue;
use css_syntax::{ParserToken, TokenRange};

/// Range restriction a property places on its numeric values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ValueRange {
    #[default]
    All,
    NonNegative,
}

impl ValueRange {
    #[inline]
    pub fn allows(self, value: f64) -> bool {
        self == Self::All || value >= 0.0
    }

    /// Clamp a computed value into the range.
    #[inline]
    pub fn clamp(self, value: f64) -> f64 {
        if self == Self::NonNegative && value < 0.0 {
            return 0.0;
        }
        value
    }
}

/// Format a number with six significant digits and no trailing zeros (`%.6g`).
pub fn format_number(number: f64) -> String {
    if number == 0.0 || !number.is_finite() {
        return "0".to_owned();
    }
    let scientific = format!("{number:.5e}");
    let (mantissa, exponent_text) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent = exponent_text.parse::<i32>().unwrap_or(0);
    if (-4..6).contains(&exponent) {
        let decimals = usize::try_from(5 - exponent).unwrap_or(0);
        return trim_trailing_zeros(format!("{number:.decimals$}"));
    }
    let sign = if exponent < 0 { '-' } else { '+' };
    format!(
        "{}e{sign}{:02}",
        trim_trailing_zeros(mantissa.to_owned()),
        exponent.unsigned_abs()
    )
}

fn trim_trailing_zeros(mut text: String) -> String {
    if text.contains('.') {
        let trimmed_len = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed_len);
    }
    text
}

/// Consume a `<number>`.
///
/// Spec: <https://www.w3.org/TR/css-values-3/#numbers>
pub fn consume_number(range: &mut TokenRange<'_>, value_range: ValueRange) -> Option<PrimitiveValue> {
    if let ParserToken::Number(numeric) = range.peek() {
        if !value_range.allows(numeric.value) {
            return None;
        }
        range.consume_including_whitespace();
        return Some(PrimitiveValue::numeric(numeric.value, UnitType::Number));
    }
    let calc = CalcParser::new(range, value_range);
    if calc.category() == Some(CalculationCategory::Number) {
        return calc.consume_value(range);
    }
    None
}

/// Consume an `<integer>` no smaller than `minimum`.
///
/// Spec: <https://www.w3.org/TR/css-values-3/#integers>
pub fn consume_integer(range: &mut TokenRange<'_>, minimum: f64) -> Option<PrimitiveValue> {
    if let ParserToken::Number(numeric) = range.peek() {
        if !numeric.is_integer() || numeric.value < minimum {
            return None;
        }
        range.consume_including_whitespace();
        return Some(PrimitiveValue::numeric(numeric.value, UnitType::Integer));
    }
    let calc = CalcParser::new(range, ValueRange::All);
    let is_integer_calc = calc.value().is_some_and(|value| {
        value.category() == CalculationCategory::Number
            && value.is_int()
            && value.double_value() >= minimum
    });
    if is_integer_calc {
        return calc.consume_value(range);
    }
    None
}

/// Consume an `<integer>` of at least one.
pub fn consume_positive_integer(range: &mut TokenRange<'_>) -> Option<PrimitiveValue> {
    consume_integer(range, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_syntax::tokenize;

    /// # Panics
    /// Panics if number formatting diverges from `%.6g`.
    #[test]
    fn formats_like_printf_g() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(7.5), "7.5");
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(-3.25), "-3.25");
        assert_eq!(format_number(1.0 / 3.0), "0.333333");
        assert_eq!(format_number(123_456.7), "123457");
        assert_eq!(format_number(1_234_567.0), "1.23457e+06");
        assert_eq!(format_number(0.000_012_5), "1.25e-05");
        assert_eq!(format_number(-0.0), "0");
    }

    /// # Panics
    /// Panics if real numbers are accepted as integers.
    #[test]
    fn integers_reject_fractions() {
        let tokens = tokenize("2.5");
        assert!(consume_integer(&mut TokenRange::new(&tokens), f64::MIN).is_none());
        let tokens = tokenize("3");
        let value = consume_integer(&mut TokenRange::new(&tokens), f64::MIN);
        assert_eq!(value.map(|number| number.css_text()), Some("3".to_owned()));
    }

    /// # Panics
    /// Panics if calc() numbers are not accepted.
    #[test]
    fn numbers_accept_calc() {
        let tokens = tokenize("calc(1 + 2)");
        let value = consume_number(&mut TokenRange::new(&tokens), ValueRange::All);
        assert_eq!(value.map(|number| number.css_text()), Some("calc(3)".to_owned()));
    }
}
