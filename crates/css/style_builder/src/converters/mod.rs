//! Conversions from parsed values to computed values.
//!
//! Each submodule covers one family of properties. Converters return `None` for values the
//! parser never produces for that property; callers then leave the property untouched.

pub mod colors;
pub mod effects;
pub mod grid;
pub mod lengths;
pub mod transforms;
pub mod typography;

use crate::resolver_state::StyleResolverState;
use crate::style_model::Length;
use css_values_units::{CssValue, LengthConversionData, PrimitiveValue, ValueId};

/// Pixels for a length, as stored in computed values.
#[allow(clippy::cast_possible_truncation, reason = "Computed lengths are f32")]
pub fn compute_px(primitive: &PrimitiveValue, conversion_data: &LengthConversionData) -> f32 {
    primitive.compute_length_px(conversion_data) as f32
}

/// A `<length-percentage>`, including `calc()` mixing both.
#[allow(clippy::cast_possible_truncation, reason = "Computed lengths are f32")]
pub fn convert_length_percentage(primitive: &PrimitiveValue, conversion_data: &LengthConversionData) -> Option<Length> {
    if let Some(calc) = primitive.calc_value()
        && primitive.is_length_or_percentage()
    {
        return Some(Length::from_pixels_and_percent(calc.to_pixels_and_percent(conversion_data)));
    }
    if primitive.is_percentage() {
        return Some(Length::Percent(primitive.double_value() as f32));
    }
    primitive
        .is_length()
        .then(|| Length::Fixed(compute_px(primitive, conversion_data)))
}

/// A length or one of the keywords `auto`, `none` and the sizing keywords.
pub fn convert_length_or_keyword(value: &CssValue, state: &StyleResolverState<'_>) -> Option<Length> {
    let primitive = value.as_primitive()?;
    match primitive.value_id() {
        Some(ValueId::Auto) => Some(Length::Auto),
        Some(ValueId::None) => Some(Length::None),
        Some(ValueId::MinContent) => Some(Length::MinContent),
        Some(ValueId::MaxContent) => Some(Length::MaxContent),
        Some(ValueId::FitContent) => Some(Length::FitContent),
        Some(ValueId::WebkitFillAvailable) => Some(Length::FillAvailable),
        Some(_) => None,
        None => convert_length_percentage(primitive, state.conversion_data()),
    }
}

/// A plain number, or `None` for anything else.
#[allow(clippy::cast_possible_truncation, reason = "Computed numbers are f32")]
pub fn convert_number(value: &CssValue) -> Option<f32> {
    let primitive = value.as_primitive()?;
    primitive.is_number().then(|| primitive.double_value() as f32)
}
