//! CSS Values & Units Level 3 — §4.3 Percentages
//! Spec: <https://www.w3.org/TR/css-values-3/#percentages>

use crate::chapter_10_calc::{CalcParser, CalculationCategory};
use crate::chapter_4_numbers::{ValueRange, consume_number};
use crate::chapter_6_dimensions::UnitType;
use crate::primitive_value::PrimitiveValue;
use css_syntax::{ParserToken, TokenRange};

/// Consume a `<percentage>`; the stored number is the value before the `%` sign.
pub fn consume_percent(range: &mut TokenRange<'_>, value_range: ValueRange) -> Option<PrimitiveValue> {
    if let ParserToken::Percentage(numeric) = range.peek() {
        if !value_range.allows(numeric.value) {
            return None;
        }
        range.consume_including_whitespace();
        return Some(PrimitiveValue::numeric(numeric.value, UnitType::Percentage));
    }
    let calc = CalcParser::new(range, value_range);
    if calc.category() == Some(CalculationCategory::Percent) {
        return calc.consume_value(range);
    }
    None
}

/// Consume a `<number>` or a `<percentage>`.
pub fn consume_number_or_percent(
    range: &mut TokenRange<'_>,
    value_range: ValueRange,
) -> Option<PrimitiveValue> {
    consume_number(range, value_range)
        .or_else(|| consume_percent(range, value_range))
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_syntax::tokenize;

    /// # Panics
    /// Panics if percentages lose their sign check or serialization.
    #[test]
    fn consumes_percentages() {
        let tokens = tokenize("12.5%");
        let value = consume_percent(&mut TokenRange::new(&tokens), ValueRange::NonNegative);
        assert_eq!(value.map(|percent| percent.css_text()), Some("12.5%".to_owned()));
        let tokens = tokenize("-1%");
        assert!(consume_percent(&mut TokenRange::new(&tokens), ValueRange::NonNegative).is_none());
    }
}
