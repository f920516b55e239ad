//! CSS Masking Module Level 1 — animating the deprecated `clip` property.
//! Spec: <https://www.w3.org/TR/css-masking-1/#clip-property>
//!
//! `auto` never blends with a rectangle. Inside `rect()`, each edge records whether it is
//! `auto`; an edge that is `auto` on both sides stays `auto`, and an edge that is `auto` on
//! one side only blends from or to zero.

use super::{depends_on_conversion_data, interpolable_to_length, length_to_interpolable};
use crate::conversion_checker::{ConversionChecker, ConversionCheckers};
use crate::interpolable::{InterpolableValue, InterpolationValue, NonInterpolableValue, PairwiseInterpolationValue};
use crate::interpolation_type::InterpolationType;
use css_style_builder::converters::effects::convert_clip;
use css_style_builder::{ClipRect, ComputedStyle, Length, StyleResolverState};
use css_values_units::{CssValue, PropertyId, ValueRange};

fn clip_to_value(clip: Option<ClipRect>) -> InterpolationValue {
    let Some(rect) = clip else {
        return InterpolationValue::new(InterpolableValue::default(), Some(NonInterpolableValue::ClipAuto));
    };
    let mut autos = [false; 4];
    let mut edges = Vec::with_capacity(4);
    for (edge, is_auto) in rect.edges().into_iter().zip(autos.iter_mut()) {
        *is_auto = edge.is_auto();
        let edge = length_to_interpolable(edge).unwrap_or_else(|| InterpolableValue::numbers([0.0, 0.0]));
        edges.push(edge);
    }
    InterpolationValue::new(
        InterpolableValue::List(edges),
        Some(NonInterpolableValue::ClipAutos(autos)),
    )
}

#[derive(Clone, Copy, Debug)]
pub struct ClipInterpolationType;

impl InterpolationType for ClipInterpolationType {
    fn property(&self) -> PropertyId {
        PropertyId::Clip
    }

    fn maybe_convert_style(&self, style: &ComputedStyle, _state: &StyleResolverState<'_>) -> Option<InterpolationValue> {
        Some(clip_to_value(style.clip))
    }

    fn maybe_convert_value(
        &self,
        value: &CssValue,
        state: &StyleResolverState<'_>,
        checkers: &mut ConversionCheckers,
    ) -> Option<InterpolationValue> {
        let clip = convert_clip(value, state)?;
        if depends_on_conversion_data(value) {
            checkers.push(ConversionChecker::conversion_data(state));
        }
        Some(clip_to_value(clip))
    }

    fn maybe_merge_singles(
        &self,
        start: InterpolationValue,
        end: InterpolationValue,
    ) -> Option<PairwiseInterpolationValue> {
        let non_interpolable = match (&start.non_interpolable, &end.non_interpolable) {
            (Some(NonInterpolableValue::ClipAuto), Some(NonInterpolableValue::ClipAuto)) => {
                NonInterpolableValue::ClipAuto
            }
            (Some(NonInterpolableValue::ClipAutos(start_autos)), Some(NonInterpolableValue::ClipAutos(end_autos))) => {
                let mut autos = [false; 4];
                for ((auto, start_auto), end_auto) in autos.iter_mut().zip(start_autos).zip(end_autos) {
                    *auto = *start_auto && *end_auto;
                }
                NonInterpolableValue::ClipAutos(autos)
            }
            _ => return None,
        };
        Some(PairwiseInterpolationValue {
            start: start.interpolable,
            end: end.interpolable,
            non_interpolable: Some(non_interpolable),
        })
    }

    fn apply(
        &self,
        interpolable: &InterpolableValue,
        non_interpolable: Option<&NonInterpolableValue>,
        state: &mut StyleResolverState<'_>,
    ) {
        let Some(NonInterpolableValue::ClipAutos(autos)) = non_interpolable else {
            state.style_mut().clip = None;
            return;
        };
        let items = interpolable.as_list().unwrap_or_default();
        let mut edges = [Length::Auto; 4];
        for ((edge, is_auto), item) in edges.iter_mut().zip(autos).zip(items) {
            if !*is_auto {
                *edge = interpolable_to_length(item, ValueRange::All);
            }
        }
        state.style_mut().clip = Some(ClipRect::from_edges(edges));
    }
}
