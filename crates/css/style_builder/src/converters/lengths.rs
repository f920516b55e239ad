//! Box model lengths, border widths, spacing and stacking.

use super::{compute_px, convert_length_or_keyword, convert_length_percentage};
use crate::resolver_state::StyleResolverState;
use crate::style_model::{BorderSpacing, Length, MEDIUM_BORDER_WIDTH, VerticalAlign};
use css_values_units::{CssValue, ValueId};

/// `<line-width>`: the keywords or a length, in pixels.
pub fn convert_border_width(value: &CssValue, state: &StyleResolverState<'_>) -> Option<f32> {
    let primitive = value.as_primitive()?;
    match primitive.value_id() {
        Some(ValueId::Thin) => Some(1.0),
        Some(ValueId::Medium) => Some(MEDIUM_BORDER_WIDTH),
        Some(ValueId::Thick) => Some(5.0),
        Some(_) => None,
        None => primitive
            .is_length()
            .then(|| compute_px(primitive, state.conversion_data()).max(0.0)),
    }
}

/// `letter-spacing` and `word-spacing`: `normal` is zero.
pub fn convert_spacing(value: &CssValue, state: &StyleResolverState<'_>) -> Option<f32> {
    let primitive = value.as_primitive()?;
    if primitive.value_id() == Some(ValueId::Normal) {
        return Some(0.0);
    }
    primitive
        .is_length()
        .then(|| compute_px(primitive, state.conversion_data()))
}

/// A plain length in pixels, as used by `outline-offset` and `perspective`.
pub fn convert_computed_length(value: &CssValue, state: &StyleResolverState<'_>) -> Option<f32> {
    let primitive = value.as_primitive()?;
    primitive
        .is_length()
        .then(|| compute_px(primitive, state.conversion_data()))
}

/// `column-gap` and `row-gap`: `None` for `normal`.
pub fn convert_gap(value: &CssValue, state: &StyleResolverState<'_>) -> Option<Option<Length>> {
    if value.value_id() == Some(ValueId::Normal) {
        return Some(None);
    }
    convert_length_or_keyword(value, state).map(Some)
}

pub fn convert_vertical_align(value: &CssValue, state: &StyleResolverState<'_>) -> Option<VerticalAlign> {
    let primitive = value.as_primitive()?;
    if let Some(keyword) = primitive.value_id() {
        return Some(VerticalAlign::Keyword(keyword));
    }
    convert_length_percentage(primitive, state.conversion_data()).map(VerticalAlign::Length)
}

/// `z-index`: `None` for `auto`.
pub fn convert_z_index(value: &CssValue) -> Option<Option<i32>> {
    let primitive = value.as_primitive()?;
    if primitive.value_id() == Some(ValueId::Auto) {
        return Some(None);
    }
    primitive.is_number().then(|| Some(primitive.int_value()))
}

pub fn convert_border_spacing(value: &CssValue, state: &StyleResolverState<'_>) -> Option<BorderSpacing> {
    let (horizontal, vertical) = match value {
        CssValue::ValuePair(pair) => (pair.first.as_primitive()?, pair.second.as_primitive()?),
        CssValue::Primitive(primitive) => (primitive, primitive),
        _ => return None,
    };
    let conversion_data = state.conversion_data();
    Some(BorderSpacing {
        horizontal: compute_px(horizontal, conversion_data),
        vertical: compute_px(vertical, conversion_data),
    })
}

/// `perspective`: `None` for `none`.
pub fn convert_perspective(value: &CssValue, state: &StyleResolverState<'_>) -> Option<Option<f32>> {
    if value.value_id() == Some(ValueId::None) {
        return Some(None);
    }
    convert_computed_length(value, state).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_values_units::{LengthConversionData, PrimitiveValue, UnitType};

    fn number(value: f64, unit: UnitType) -> CssValue {
        CssValue::Primitive(PrimitiveValue::numeric(value, unit))
    }

    /// # Panics
    /// Panics if border width keywords or lengths are converted incorrectly.
    #[test]
    fn border_widths() {
        let state = StyleResolverState::new(None, LengthConversionData::default());
        assert_eq!(convert_border_width(&CssValue::identifier(ValueId::Thick), &state), Some(5.0));
        assert_eq!(convert_border_width(&number(2.0, UnitType::Ems), &state), Some(32.0));
    }

    /// # Panics
    /// Panics if `auto` and integers are not told apart.
    #[test]
    fn z_index() {
        assert_eq!(convert_z_index(&CssValue::identifier(ValueId::Auto)), Some(None));
        assert_eq!(convert_z_index(&number(-3.0, UnitType::Integer)), Some(Some(-3)));
    }

    /// # Panics
    /// Panics if gaps do not keep `normal` apart from zero.
    #[test]
    fn gaps() {
        let state = StyleResolverState::new(None, LengthConversionData::default());
        assert_eq!(convert_gap(&CssValue::identifier(ValueId::Normal), &state), Some(None));
        assert_eq!(
            convert_gap(&number(10.0, UnitType::Percentage), &state),
            Some(Some(Length::Percent(10.0)))
        );
    }
}
