//! CSS Text Module Level 3 — animating `text-indent`.
//! Spec: <https://www.w3.org/TR/css-text-3/#text-indent-property>
//!
//! The length blends; `each-line` and `hanging` must match on both sides.

use super::{depends_on_conversion_data, interpolable_to_length, length_to_interpolable};
use crate::conversion_checker::{ConversionChecker, ConversionCheckers};
use crate::interpolable::{InterpolableValue, InterpolationValue, NonInterpolableValue};
use crate::interpolation_type::InterpolationType;
use css_style_builder::converters::typography::convert_text_indent;
use css_style_builder::{ComputedStyle, StyleResolverState, TextIndent};
use css_values_units::{CssValue, PropertyId, ValueRange};

fn indent_to_value(indent: TextIndent) -> Option<InterpolationValue> {
    Some(InterpolationValue::new(
        length_to_interpolable(indent.length)?,
        Some(NonInterpolableValue::TextIndentModes {
            each_line: indent.each_line,
            hanging: indent.hanging,
        }),
    ))
}

#[derive(Clone, Copy, Debug)]
pub struct TextIndentInterpolationType;

impl InterpolationType for TextIndentInterpolationType {
    fn property(&self) -> PropertyId {
        PropertyId::TextIndent
    }

    fn maybe_convert_style(&self, style: &ComputedStyle, _state: &StyleResolverState<'_>) -> Option<InterpolationValue> {
        indent_to_value(style.text_indent)
    }

    fn maybe_convert_value(
        &self,
        value: &CssValue,
        state: &StyleResolverState<'_>,
        checkers: &mut ConversionCheckers,
    ) -> Option<InterpolationValue> {
        let converted = indent_to_value(convert_text_indent(value, state)?)?;
        if depends_on_conversion_data(value) {
            checkers.push(ConversionChecker::conversion_data(state));
        }
        Some(converted)
    }

    fn apply(
        &self,
        interpolable: &InterpolableValue,
        non_interpolable: Option<&NonInterpolableValue>,
        state: &mut StyleResolverState<'_>,
    ) {
        let (each_line, hanging) = match non_interpolable {
            Some(NonInterpolableValue::TextIndentModes { each_line, hanging }) => (*each_line, *hanging),
            _ => (false, false),
        };
        state.style_mut().text_indent = TextIndent {
            length: interpolable_to_length(interpolable, ValueRange::All),
            each_line,
            hanging,
        };
    }
}
