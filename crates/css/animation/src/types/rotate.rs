//! CSS Transforms Module Level 2 — animating the `rotate` property.
//! Spec: <https://www.w3.org/TR/css-transforms-2/#interpolation-of-individual-transforms>
//!
//! Rotations blend their angle when both sides turn about the same normalized axis. `none`
//! has no axis and takes the axis of the other side.

use crate::conversion_checker::ConversionCheckers;
use crate::interpolable::{InterpolableValue, InterpolationValue, NonInterpolableValue, PairwiseInterpolationValue};
use crate::interpolation_type::InterpolationType;
use css_style_builder::converters::transforms::convert_rotate;
use css_style_builder::{ComputedStyle, RotateTransform, StyleResolverState};
use css_values_units::{CssValue, PropertyId};

const AXIS_TOLERANCE: f64 = 1e-6;

/// Unit vector of an axis; a zero-length axis turns about z.
fn normalized_axis(rotate: &RotateTransform) -> [f64; 3] {
    let [x, y, z] = [f64::from(rotate.x), f64::from(rotate.y), f64::from(rotate.z)];
    let length = (x * x + y * y + z * z).sqrt();
    if length < AXIS_TOLERANCE {
        return [0.0, 0.0, 1.0];
    }
    [x / length, y / length, z / length]
}

fn same_axis(left: [f64; 3], right: [f64; 3]) -> bool {
    left.iter()
        .zip(right)
        .all(|(component, other)| (component - other).abs() < AXIS_TOLERANCE)
}

fn rotate_to_value(rotate: Option<RotateTransform>) -> InterpolationValue {
    let (angle, axis) = rotate.map_or((0.0, None), |rotate| {
        (f64::from(rotate.angle), Some(normalized_axis(&rotate)))
    });
    InterpolationValue::new(
        InterpolableValue::numbers([angle]),
        Some(NonInterpolableValue::RotationAxis(axis)),
    )
}

const fn axis_of(value: &InterpolationValue) -> Option<[f64; 3]> {
    match &value.non_interpolable {
        Some(NonInterpolableValue::RotationAxis(axis)) => *axis,
        _ => None,
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RotateInterpolationType;

impl InterpolationType for RotateInterpolationType {
    fn property(&self) -> PropertyId {
        PropertyId::Rotate
    }

    fn maybe_convert_style(&self, style: &ComputedStyle, _state: &StyleResolverState<'_>) -> Option<InterpolationValue> {
        Some(rotate_to_value(style.rotate))
    }

    fn maybe_convert_value(
        &self,
        value: &CssValue,
        _state: &StyleResolverState<'_>,
        _checkers: &mut ConversionCheckers,
    ) -> Option<InterpolationValue> {
        Some(rotate_to_value(convert_rotate(value)?))
    }

    fn maybe_merge_singles(
        &self,
        start: InterpolationValue,
        end: InterpolationValue,
    ) -> Option<PairwiseInterpolationValue> {
        let axis = match (axis_of(&start), axis_of(&end)) {
            (Some(start_axis), Some(end_axis)) => {
                if !same_axis(start_axis, end_axis) {
                    return None;
                }
                Some(start_axis)
            }
            (start_axis, end_axis) => start_axis.or(end_axis),
        };
        Some(PairwiseInterpolationValue {
            start: start.interpolable,
            end: end.interpolable,
            non_interpolable: Some(NonInterpolableValue::RotationAxis(axis)),
        })
    }

    #[allow(clippy::cast_possible_truncation, reason = "Computed angles are f32")]
    fn apply(
        &self,
        interpolable: &InterpolableValue,
        non_interpolable: Option<&NonInterpolableValue>,
        state: &mut StyleResolverState<'_>,
    ) {
        let axis = match non_interpolable {
            Some(NonInterpolableValue::RotationAxis(axis)) => *axis,
            _ => None,
        };
        state.style_mut().rotate = axis.map(|[x, y, z]| RotateTransform {
            x: x as f32,
            y: y as f32,
            z: z as f32,
            angle: interpolable.number_at(0) as f32,
        });
    }
}
