//! CSS Transforms Module Level 2 — animating the `scale` property.
//! Spec: <https://www.w3.org/TR/css-transforms-2/#interpolation-of-individual-transforms>
//!
//! Scales blend per axis. `none` blends as `1 1 1`, and adding a scale onto the
//! underlying one multiplies the two.

use crate::conversion_checker::ConversionCheckers;
use crate::interpolable::{InterpolableValue, InterpolationValue, NonInterpolableValue, PairwiseInterpolationValue};
use crate::interpolation_type::InterpolationType;
use css_style_builder::converters::transforms::convert_scale;
use css_style_builder::{ComputedStyle, ScaleTransform, StyleResolverState};
use css_values_units::{CssValue, PropertyId};

fn identity() -> InterpolableValue {
    InterpolableValue::numbers([1.0, 1.0, 1.0])
}

fn scale_to_interpolable(scale: Option<ScaleTransform>) -> InterpolableValue {
    scale.map_or_else(InterpolableValue::default, |scale| {
        InterpolableValue::numbers([f64::from(scale.x), f64::from(scale.y), f64::from(scale.z)])
    })
}

#[derive(Clone, Copy, Debug)]
pub struct ScaleInterpolationType;

impl InterpolationType for ScaleInterpolationType {
    fn property(&self) -> PropertyId {
        PropertyId::Scale
    }

    fn maybe_convert_style(&self, style: &ComputedStyle, _state: &StyleResolverState<'_>) -> Option<InterpolationValue> {
        Some(InterpolationValue::interpolable(scale_to_interpolable(style.scale)))
    }

    fn maybe_convert_value(
        &self,
        value: &CssValue,
        _state: &StyleResolverState<'_>,
        _checkers: &mut ConversionCheckers,
    ) -> Option<InterpolationValue> {
        Some(InterpolationValue::interpolable(scale_to_interpolable(convert_scale(value)?)))
    }

    fn maybe_convert_neutral(
        &self,
        _underlying: &InterpolationValue,
        _checkers: &mut ConversionCheckers,
    ) -> Option<InterpolationValue> {
        Some(InterpolationValue::interpolable(identity()))
    }

    fn maybe_merge_singles(
        &self,
        start: InterpolationValue,
        end: InterpolationValue,
    ) -> Option<PairwiseInterpolationValue> {
        let mut start = start.interpolable;
        let mut end = end.interpolable;
        if start.is_empty() && !end.is_empty() {
            start = identity();
        } else if end.is_empty() && !start.is_empty() {
            end = identity();
        }
        Some(PairwiseInterpolationValue {
            start,
            end,
            non_interpolable: None,
        })
    }

    /// `value * (underlying * underlying_fraction + (1 - underlying_fraction))`.
    fn composite(
        &self,
        underlying: &mut InterpolationValue,
        underlying_fraction: f64,
        value: &InterpolationValue,
        _interpolation_fraction: f64,
    ) {
        if value.interpolable.is_empty() {
            underlying.clone_from(value);
            return;
        }
        if underlying.interpolable.is_empty() {
            underlying.interpolable = identity();
        }
        let composited = (0..3).map(|axis| {
            let weighted = underlying.interpolable.number_at(axis) * underlying_fraction + (1.0 - underlying_fraction);
            value.interpolable.number_at(axis) * weighted
        });
        underlying.interpolable = InterpolableValue::numbers(composited.collect::<Vec<_>>());
        underlying.non_interpolable = None;
    }

    #[allow(clippy::cast_possible_truncation, reason = "Scale factors are f32")]
    fn apply(
        &self,
        interpolable: &InterpolableValue,
        _non_interpolable: Option<&NonInterpolableValue>,
        state: &mut StyleResolverState<'_>,
    ) {
        state.style_mut().scale = (!interpolable.is_empty()).then(|| ScaleTransform {
            x: interpolable.number_at(0) as f32,
            y: interpolable.number_at(1) as f32,
            z: interpolable.number_at(2) as f32,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_values_units::LengthConversionData;

    /// # Panics
    /// Panics if `none` does not blend as the identity scale.
    #[test]
    fn none_blends_as_identity() {
        let mut state = StyleResolverState::new(None, LengthConversionData::default());
        let none = InterpolationValue::interpolable(scale_to_interpolable(None));
        let double = InterpolationValue::interpolable(InterpolableValue::numbers([3.0, 3.0, 1.0]));
        if let Some(pair) = ScaleInterpolationType.maybe_merge_singles(none, double) {
            ScaleInterpolationType.apply(&pair.at(0.5).interpolable, None, &mut state);
        }
        assert_eq!(
            state.style().scale,
            Some(ScaleTransform {
                x: 2.0,
                y: 2.0,
                z: 1.0
            })
        );
    }

    /// # Panics
    /// Panics if additive scales are summed instead of multiplied.
    #[test]
    fn composite_multiplies() {
        let mut underlying = InterpolationValue::interpolable(InterpolableValue::numbers([2.0, 3.0, 1.0]));
        let value = InterpolationValue::interpolable(InterpolableValue::numbers([2.0, 2.0, 1.0]));
        ScaleInterpolationType.composite(&mut underlying, 1.0, &value, 1.0);
        assert_eq!(underlying.interpolable, InterpolableValue::numbers([4.0, 6.0, 1.0]));
    }
}
