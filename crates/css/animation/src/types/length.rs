//! Interpolation of every property whose computed value is a single `<length-percentage>`.

use super::{depends_on_conversion_data, interpolable_to_length, length_to_interpolable};
use crate::conversion_checker::{ConversionChecker, ConversionCheckers};
use crate::interpolable::{InterpolableValue, InterpolationValue, NonInterpolableValue};
use crate::interpolation_type::InterpolationType;
use css_style_builder::converters::convert_length_or_keyword;
use css_style_builder::converters::lengths::{convert_border_width, convert_computed_length, convert_spacing};
use css_style_builder::converters::typography::convert_font_size;
use css_style_builder::{ComputedStyle, INITIAL_STYLE, Length, StyleResolverState};
use css_values_units::{CssValue, PropertyId, ValueId, ValueRange};

#[derive(Clone, Copy, Debug)]
pub struct LengthInterpolationType {
    property: PropertyId,
}

impl LengthInterpolationType {
    pub const fn new(property: PropertyId) -> Self {
        Self { property }
    }

    /// Properties stored as a [`Length`]. `text-indent` carries modes and has its own type.
    pub fn handles(property: PropertyId) -> bool {
        property != PropertyId::TextIndent && INITIAL_STYLE.length(property).is_some()
    }

    const fn value_range(&self) -> ValueRange {
        match self.property {
            PropertyId::Width
            | PropertyId::Height
            | PropertyId::MinWidth
            | PropertyId::MinHeight
            | PropertyId::MaxWidth
            | PropertyId::MaxHeight
            | PropertyId::PaddingTop
            | PropertyId::PaddingRight
            | PropertyId::PaddingBottom
            | PropertyId::PaddingLeft
            | PropertyId::BorderTopWidth
            | PropertyId::BorderRightWidth
            | PropertyId::BorderBottomWidth
            | PropertyId::BorderLeftWidth
            | PropertyId::OutlineWidth
            | PropertyId::FontSize => ValueRange::NonNegative,
            _ => ValueRange::All,
        }
    }

    fn convert_length(&self, value: &CssValue, state: &StyleResolverState<'_>) -> Option<Length> {
        match self.property {
            PropertyId::FontSize => convert_font_size(value, state).map(Length::Fixed),
            PropertyId::BorderTopWidth
            | PropertyId::BorderRightWidth
            | PropertyId::BorderBottomWidth
            | PropertyId::BorderLeftWidth
            | PropertyId::OutlineWidth => convert_border_width(value, state).map(Length::Fixed),
            PropertyId::OutlineOffset => convert_computed_length(value, state).map(Length::Fixed),
            PropertyId::LetterSpacing | PropertyId::WordSpacing => convert_spacing(value, state).map(Length::Fixed),
            _ => convert_length_or_keyword(value, state),
        }
    }
}

/// Whether a `font-size` value is relative to the parent's font size.
fn is_relative_font_size(value: &CssValue) -> bool {
    value.as_primitive().is_some_and(|primitive| {
        matches!(primitive.value_id(), Some(ValueId::Larger | ValueId::Smaller))
            || primitive.is_font_relative_length()
            || primitive.is_percentage()
            || primitive.is_calc()
    })
}

impl InterpolationType for LengthInterpolationType {
    fn property(&self) -> PropertyId {
        self.property
    }

    fn maybe_convert_style(&self, style: &ComputedStyle, _state: &StyleResolverState<'_>) -> Option<InterpolationValue> {
        let length = style.length(self.property)?;
        length_to_interpolable(length).map(InterpolationValue::interpolable)
    }

    fn maybe_convert_value(
        &self,
        value: &CssValue,
        state: &StyleResolverState<'_>,
        checkers: &mut ConversionCheckers,
    ) -> Option<InterpolationValue> {
        let length = self.convert_length(value, state)?;
        let interpolable = length_to_interpolable(length)?;
        if self.property == PropertyId::FontSize && is_relative_font_size(value) {
            checkers.push(ConversionChecker::inherited(PropertyId::FontSize, state));
        }
        if depends_on_conversion_data(value) {
            checkers.push(ConversionChecker::conversion_data(state));
        }
        Some(InterpolationValue::interpolable(interpolable))
    }

    fn apply(
        &self,
        interpolable: &InterpolableValue,
        _non_interpolable: Option<&NonInterpolableValue>,
        state: &mut StyleResolverState<'_>,
    ) {
        let length = interpolable_to_length(interpolable, self.value_range());
        state.style_mut().set_length(self.property, length);
        if self.property == PropertyId::FontSize {
            state.update_font_size();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_values_units::{LengthConversionData, PrimitiveValue, UnitType};

    fn px(value: f64) -> CssValue {
        CssValue::Primitive(PrimitiveValue::numeric(value, UnitType::Pixels))
    }

    /// # Panics
    /// Panics if keywords convert or em lengths skip the conversion data checker.
    #[test]
    fn converts_lengths() {
        let state = StyleResolverState::new(None, LengthConversionData::default());
        let width = LengthInterpolationType::new(PropertyId::Width);
        let mut checkers = ConversionCheckers::new();
        assert!(width
            .maybe_convert_value(&CssValue::identifier(ValueId::Auto), &state, &mut checkers)
            .is_none());
        let em = CssValue::Primitive(PrimitiveValue::numeric(2.0, UnitType::Ems));
        let converted = width.maybe_convert_value(&em, &state, &mut checkers);
        assert_eq!(
            converted.map(|value| value.interpolable),
            Some(InterpolableValue::numbers([32.0, 0.0]))
        );
        assert_eq!(checkers.len(), 1);
    }

    /// # Panics
    /// Panics if negative blends of non-negative properties are not clamped.
    #[test]
    fn clamps_padding() {
        let mut state = StyleResolverState::new(None, LengthConversionData::default());
        let padding = LengthInterpolationType::new(PropertyId::PaddingTop);
        let mut checkers = ConversionCheckers::new();
        let start = padding.maybe_convert_value(&px(10.0), &state, &mut checkers);
        let end = padding.maybe_convert_value(&px(20.0), &state, &mut checkers);
        let pair = start.zip(end).and_then(|(start, end)| padding.maybe_merge_singles(start, end));
        let extrapolated = pair.map(|pair| pair.at(-2.0));
        if let Some(value) = extrapolated {
            padding.apply(&value.interpolable, None, &mut state);
        }
        assert_eq!(state.style().padding.top, Length::Fixed(0.0));
    }

    /// # Panics
    /// Panics if `handles` disagrees with the properties stored as lengths.
    #[test]
    fn handled_properties() {
        assert!(LengthInterpolationType::handles(PropertyId::MarginLeft));
        assert!(LengthInterpolationType::handles(PropertyId::FontSize));
        assert!(!LengthInterpolationType::handles(PropertyId::TextIndent));
        assert!(!LengthInterpolationType::handles(PropertyId::Opacity));
    }
}
