//! Filter Effects Module Level 1 — interpolation of filters.
//! Spec: <https://www.w3.org/TR/filter-effects-1/#interpolation-of-filters>

use super::depends_on_conversion_data;
use super::shadow_list::{interpolable_to_shadow, shadow_to_interpolable};
use crate::conversion_checker::{ConversionChecker, ConversionCheckers};
use crate::interpolable::{InterpolableValue, InterpolationValue, NonInterpolableValue, PairwiseInterpolationValue};
use crate::interpolation_type::InterpolationType;
use css_style_builder::converters::effects::convert_filter_operations;
use css_style_builder::{
    ComputedStyle, FilterOperation, FilterOperationType, ShadowData, ShadowStyle, StyleColor, StyleResolverState,
};
use css_values_units::{Color, CssValue, PropertyId};

fn operation_to_interpolable(operation: &FilterOperation) -> Option<InterpolableValue> {
    match operation {
        FilterOperation::Reference(_) => None,
        FilterOperation::DropShadow(shadow) => Some(shadow_to_interpolable(shadow)),
        _ => operation
            .amount()
            .map(|amount| InterpolableValue::Number(f64::from(amount))),
    }
}

fn operations_to_value(operations: &[FilterOperation]) -> Option<InterpolationValue> {
    let interpolable = operations
        .iter()
        .map(operation_to_interpolable)
        .collect::<Option<Vec<_>>>()?;
    let types = operations
        .iter()
        .map(|operation| Some(NonInterpolableValue::Filter(operation.operation_type())))
        .collect();
    Some(InterpolationValue::new(
        InterpolableValue::List(interpolable),
        Some(NonInterpolableValue::List(types)),
    ))
}

/// The value a missing filter function blends from or to: no blur, no shift, full amount
/// for the multiplicative functions and a transparent zero-offset drop shadow.
fn identity_interpolable(operation_type: FilterOperationType) -> Option<InterpolableValue> {
    let amount = match operation_type {
        FilterOperationType::Reference => return None,
        FilterOperationType::DropShadow => {
            return Some(shadow_to_interpolable(&ShadowData {
                color: StyleColor::Color(Color::TRANSPARENT),
                ..ShadowData::default()
            }));
        }
        FilterOperationType::Brightness
        | FilterOperationType::Contrast
        | FilterOperationType::Opacity
        | FilterOperationType::Saturate => 1.0,
        FilterOperationType::Blur
        | FilterOperationType::Grayscale
        | FilterOperationType::HueRotate
        | FilterOperationType::Invert
        | FilterOperationType::Sepia => 0.0,
    };
    Some(InterpolableValue::Number(amount))
}

/// Clamp a blended amount to the range its function accepts.
fn clamp_amount(operation_type: FilterOperationType, amount: f64) -> f64 {
    match operation_type {
        FilterOperationType::Blur
        | FilterOperationType::Brightness
        | FilterOperationType::Contrast
        | FilterOperationType::Saturate => amount.max(0.0),
        FilterOperationType::Grayscale
        | FilterOperationType::Invert
        | FilterOperationType::Opacity
        | FilterOperationType::Sepia => amount.clamp(0.0, 1.0),
        FilterOperationType::HueRotate | FilterOperationType::Reference | FilterOperationType::DropShadow => amount,
    }
}

#[allow(clippy::cast_possible_truncation, reason = "Filter amounts are f32")]
fn interpolable_to_operation(
    value: &InterpolableValue,
    operation_type: FilterOperationType,
    state: &StyleResolverState<'_>,
) -> Option<FilterOperation> {
    if operation_type == FilterOperationType::DropShadow {
        return Some(FilterOperation::DropShadow(interpolable_to_shadow(
            value,
            ShadowStyle::Normal,
            state,
        )));
    }
    let amount = clamp_amount(operation_type, value.as_number()?);
    FilterOperation::from_amount(operation_type, amount as f32)
}

#[derive(Clone, Copy, Debug)]
pub struct FilterListInterpolationType;

impl InterpolationType for FilterListInterpolationType {
    fn property(&self) -> PropertyId {
        PropertyId::Filter
    }

    fn maybe_convert_style(&self, style: &ComputedStyle, _state: &StyleResolverState<'_>) -> Option<InterpolationValue> {
        operations_to_value(&style.filter)
    }

    fn maybe_convert_value(
        &self,
        value: &CssValue,
        state: &StyleResolverState<'_>,
        checkers: &mut ConversionCheckers,
    ) -> Option<InterpolationValue> {
        let operations = convert_filter_operations(value, state)?;
        let converted = operations_to_value(&operations)?;
        if depends_on_conversion_data(value) {
            checkers.push(ConversionChecker::conversion_data(state));
        }
        Some(converted)
    }

    /// Lists merge when their shared prefix uses the same functions; the shorter list is
    /// padded with the identity of each function it lacks.
    fn maybe_merge_singles(
        &self,
        start: InterpolationValue,
        end: InterpolationValue,
    ) -> Option<PairwiseInterpolationValue> {
        let (Some(NonInterpolableValue::List(start_types)), Some(NonInterpolableValue::List(end_types))) =
            (&start.non_interpolable, &end.non_interpolable)
        else {
            return None;
        };
        if start_types.iter().zip(end_types).any(|(from, to)| from != to) {
            return None;
        }
        let mut start_items = start.interpolable.as_list()?.to_vec();
        let mut end_items = end.interpolable.as_list()?.to_vec();
        let (types, shorter) = if start_types.len() >= end_types.len() {
            (start_types, &mut end_items)
        } else {
            (end_types, &mut start_items)
        };
        for operation_type in types.get(shorter.len()..).unwrap_or_default() {
            let Some(NonInterpolableValue::Filter(operation_type)) = operation_type else {
                return None;
            };
            shorter.push(identity_interpolable(*operation_type)?);
        }
        Some(PairwiseInterpolationValue {
            start: InterpolableValue::List(start_items),
            end: InterpolableValue::List(end_items),
            non_interpolable: Some(NonInterpolableValue::List(types.clone())),
        })
    }

    fn apply(
        &self,
        interpolable: &InterpolableValue,
        non_interpolable: Option<&NonInterpolableValue>,
        state: &mut StyleResolverState<'_>,
    ) {
        let Some(NonInterpolableValue::List(types)) = non_interpolable else {
            return;
        };
        let items = interpolable.as_list().unwrap_or_default();
        let operations = items
            .iter()
            .zip(types)
            .filter_map(|(item, operation_type)| match operation_type {
                Some(NonInterpolableValue::Filter(operation_type)) => {
                    interpolable_to_operation(item, *operation_type, state)
                }
                _ => None,
            })
            .collect();
        state.style_mut().filter = operations;
    }
}
