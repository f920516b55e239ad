//! Interpolation of fixed-size groups of lengths: `transform-origin` and `border-spacing`.

use super::{depends_on_conversion_data, interpolable_to_length, length_to_interpolable};
use crate::conversion_checker::{ConversionChecker, ConversionCheckers};
use crate::interpolable::{InterpolableValue, InterpolationValue, NonInterpolableValue};
use crate::interpolation_type::InterpolationType;
use css_style_builder::converters::lengths::convert_border_spacing;
use css_style_builder::converters::transforms::convert_transform_origin;
use css_style_builder::{BorderSpacing, ComputedStyle, StyleResolverState, TransformOrigin};
use css_values_units::{CssValue, PropertyId, ValueRange};

#[derive(Clone, Copy, Debug)]
pub struct LengthListInterpolationType {
    property: PropertyId,
}

impl LengthListInterpolationType {
    pub const fn new(property: PropertyId) -> Self {
        Self { property }
    }
}

fn origin_to_interpolable(origin: TransformOrigin) -> Option<InterpolableValue> {
    Some(InterpolableValue::List(vec![
        length_to_interpolable(origin.x)?,
        length_to_interpolable(origin.y)?,
        InterpolableValue::Number(f64::from(origin.z)),
    ]))
}

fn spacing_to_interpolable(spacing: BorderSpacing) -> InterpolableValue {
    InterpolableValue::numbers([f64::from(spacing.horizontal), f64::from(spacing.vertical)])
}

fn list_item(value: &InterpolableValue, index: usize) -> InterpolableValue {
    value
        .as_list()
        .and_then(|items| items.get(index))
        .cloned()
        .unwrap_or_default()
}

impl InterpolationType for LengthListInterpolationType {
    fn property(&self) -> PropertyId {
        self.property
    }

    fn maybe_convert_style(&self, style: &ComputedStyle, _state: &StyleResolverState<'_>) -> Option<InterpolationValue> {
        let interpolable = match self.property {
            PropertyId::TransformOrigin => origin_to_interpolable(style.transform_origin)?,
            PropertyId::BorderSpacing => spacing_to_interpolable(style.border_spacing),
            _ => return None,
        };
        Some(InterpolationValue::interpolable(interpolable))
    }

    fn maybe_convert_value(
        &self,
        value: &CssValue,
        state: &StyleResolverState<'_>,
        checkers: &mut ConversionCheckers,
    ) -> Option<InterpolationValue> {
        let interpolable = match self.property {
            PropertyId::TransformOrigin => origin_to_interpolable(convert_transform_origin(value, state)?)?,
            PropertyId::BorderSpacing => spacing_to_interpolable(convert_border_spacing(value, state)?),
            _ => return None,
        };
        if depends_on_conversion_data(value) {
            checkers.push(ConversionChecker::conversion_data(state));
        }
        Some(InterpolationValue::interpolable(interpolable))
    }

    #[allow(clippy::cast_possible_truncation, reason = "Computed lengths are f32")]
    fn apply(
        &self,
        interpolable: &InterpolableValue,
        _non_interpolable: Option<&NonInterpolableValue>,
        state: &mut StyleResolverState<'_>,
    ) {
        match self.property {
            PropertyId::TransformOrigin => {
                state.style_mut().transform_origin = TransformOrigin {
                    x: interpolable_to_length(&list_item(interpolable, 0), ValueRange::All),
                    y: interpolable_to_length(&list_item(interpolable, 1), ValueRange::All),
                    z: list_item(interpolable, 2).as_number().unwrap_or_default() as f32,
                };
            }
            PropertyId::BorderSpacing => {
                state.style_mut().border_spacing = BorderSpacing {
                    horizontal: interpolable.number_at(0).max(0.0) as f32,
                    vertical: interpolable.number_at(1).max(0.0) as f32,
                };
            }
            _ => {}
        }
    }
}
