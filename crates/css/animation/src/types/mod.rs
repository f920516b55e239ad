//! The interpolation types of each animatable property.

pub mod clip;
pub mod color;
pub mod filter_list;
pub mod image_list;
pub mod length;
pub mod length_list;
pub mod number;
pub mod rotate;
pub mod scale;
pub mod shadow_list;
pub mod text_indent;
pub mod value;

use crate::interpolable::InterpolableValue;
use crate::interpolation_type::InterpolationType;
use css_parser::property_tables::is_color_property_id;
use css_style_builder::Length;
use css_values_units::{CssValue, PixelsAndPercent, PropertyId, ValueRange};
use css_variables::SyntaxDescriptor;

pub use clip::ClipInterpolationType;
pub use color::ColorInterpolationType;
pub use filter_list::FilterListInterpolationType;
pub use image_list::ImageListInterpolationType;
pub use length::LengthInterpolationType;
pub use length_list::LengthListInterpolationType;
pub use number::NumberInterpolationType;
pub use rotate::RotateInterpolationType;
pub use scale::ScaleInterpolationType;
pub use shadow_list::ShadowListInterpolationType;
pub use text_indent::TextIndentInterpolationType;
pub use value::CssValueInterpolationType;

pub type InterpolationTypes = Vec<Box<dyn InterpolationType>>;

/// The types tried, in order, for keyframes of `property`. The catch-all type is always
/// last, so every value can at least flip discretely.
pub fn interpolation_types_for_property(property: PropertyId) -> InterpolationTypes {
    let mut types: InterpolationTypes = Vec::with_capacity(2);
    if is_color_property_id(property) || property == PropertyId::CaretColor {
        types.push(Box::new(ColorInterpolationType::new(property)));
    } else if LengthInterpolationType::handles(property) {
        types.push(Box::new(LengthInterpolationType::new(property)));
    } else if NumberInterpolationType::handles(property) {
        types.push(Box::new(NumberInterpolationType::new(property)));
    } else {
        match property {
            PropertyId::TransformOrigin | PropertyId::BorderSpacing => {
                types.push(Box::new(LengthListInterpolationType::new(property)));
            }
            PropertyId::BoxShadow | PropertyId::TextShadow => {
                types.push(Box::new(ShadowListInterpolationType::new(property)));
            }
            PropertyId::Filter => types.push(Box::new(FilterListInterpolationType)),
            PropertyId::Clip => types.push(Box::new(ClipInterpolationType)),
            PropertyId::TextIndent => types.push(Box::new(TextIndentInterpolationType)),
            PropertyId::Scale => types.push(Box::new(ScaleInterpolationType)),
            PropertyId::Rotate => types.push(Box::new(RotateInterpolationType)),
            PropertyId::BackgroundImage => types.push(Box::new(ImageListInterpolationType)),
            _ => {}
        }
    }
    types.push(Box::new(CssValueInterpolationType::new(property)));
    types
}

/// The types tried for a registered custom property. Every syntax currently animates
/// discretely through the catch-all type.
pub fn interpolation_types_for_syntax(name: &str, _syntax: &SyntaxDescriptor) -> InterpolationTypes {
    vec![Box::new(CssValueInterpolationType::custom(name))]
}

/// `[pixels, percent]` of a length; keywords have no numeric form.
pub fn length_to_interpolable(length: Length) -> Option<InterpolableValue> {
    let value = length.pixels_and_percent()?;
    Some(InterpolableValue::numbers([
        f64::from(value.pixels),
        f64::from(value.percent),
    ]))
}

/// The length a `[pixels, percent]` pair blends to, clamped for non-negative properties.
#[allow(clippy::cast_possible_truncation, reason = "Computed lengths are f32")]
pub fn interpolable_to_length(value: &InterpolableValue, range: ValueRange) -> Length {
    let mut pixels = value.number_at(0) as f32;
    let mut percent = value.number_at(1) as f32;
    if range == ValueRange::NonNegative {
        pixels = pixels.max(0.0);
        percent = percent.max(0.0);
    }
    Length::from_pixels_and_percent(PixelsAndPercent::new(pixels, percent))
}

/// Whether converting `value` read the font sizes, viewport or zoom.
pub fn depends_on_conversion_data(value: &CssValue) -> bool {
    match value {
        CssValue::Primitive(primitive) => {
            primitive.is_calc() || primitive.is_font_relative_length() || primitive.is_viewport_percentage_length()
        }
        CssValue::ValueList(list) => list.iter().any(depends_on_conversion_data),
        CssValue::ValuePair(pair) => depends_on_conversion_data(&pair.first) || depends_on_conversion_data(&pair.second),
        CssValue::Function(function) => function.arguments.iter().any(depends_on_conversion_data),
        CssValue::Shadow(shadow) => [Some(&shadow.x), Some(&shadow.y), shadow.blur.as_ref(), shadow.spread.as_ref()]
            .into_iter()
            .flatten()
            .any(|length| length.is_font_relative_length() || length.is_viewport_percentage_length() || length.is_calc()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// # Panics
    /// Panics if a property is missing its specific type or the catch-all.
    #[test]
    fn types_end_with_catch_all() {
        assert_eq!(interpolation_types_for_property(PropertyId::Width).len(), 2);
        assert_eq!(interpolation_types_for_property(PropertyId::Display).len(), 1);
        let types = interpolation_types_for_property(PropertyId::Filter);
        assert!(types.iter().all(|kind| kind.property() == PropertyId::Filter));
    }

    /// # Panics
    /// Panics if non-negative lengths are not clamped.
    #[test]
    fn clamps_non_negative_lengths() {
        let value = InterpolableValue::numbers([-5.0, 20.0]);
        assert_eq!(interpolable_to_length(&value, ValueRange::NonNegative), Length::Percent(20.0));
        assert_eq!(
            interpolable_to_length(&value, ValueRange::All),
            Length::Calculated(PixelsAndPercent::new(-5.0, 20.0))
        );
    }
}
