//! CSS Backgrounds and Borders Module Level 3 — animating `box-shadow` and `text-shadow`.
//! Spec: <https://www.w3.org/TR/css-backgrounds-3/#box-shadow>
//!
//! Shadow lists blend item by item. Both lists must have the same length and every pair of
//! items must agree on `inset`; otherwise the lists do not merge at all.

use super::color::{interpolable_to_style_color, style_color_to_interpolable};
use super::depends_on_conversion_data;
use crate::conversion_checker::{ConversionChecker, ConversionCheckers};
use crate::interpolable::{InterpolableValue, InterpolationValue, NonInterpolableValue};
use crate::interpolation_type::InterpolationType;
use css_style_builder::converters::effects::convert_shadow_list;
use css_style_builder::{ComputedStyle, ShadowData, ShadowStyle, StyleColor, StyleResolverState};
use css_values_units::{CssValue, PropertyId};

const X: usize = 0;
const Y: usize = 1;
const BLUR: usize = 2;
const SPREAD: usize = 3;
const COLOR: usize = 4;

/// `[x, y, blur, spread, color]`.
pub fn shadow_to_interpolable(shadow: &ShadowData) -> InterpolableValue {
    InterpolableValue::List(vec![
        InterpolableValue::Number(f64::from(shadow.x)),
        InterpolableValue::Number(f64::from(shadow.y)),
        InterpolableValue::Number(f64::from(shadow.blur)),
        InterpolableValue::Number(f64::from(shadow.spread)),
        style_color_to_interpolable(shadow.color),
    ])
}

#[allow(clippy::cast_possible_truncation, reason = "Computed lengths are f32")]
pub fn interpolable_to_shadow(
    value: &InterpolableValue,
    style: ShadowStyle,
    state: &StyleResolverState<'_>,
) -> ShadowData {
    let color = value
        .as_list()
        .and_then(|items| items.get(COLOR))
        .map_or_else(StyleColor::default, |color| interpolable_to_style_color(color, state));
    ShadowData {
        x: value.number_at(X) as f32,
        y: value.number_at(Y) as f32,
        blur: value.number_at(BLUR).max(0.0) as f32,
        spread: value.number_at(SPREAD) as f32,
        color,
        style,
    }
}

fn shadows_to_value(shadows: &[ShadowData]) -> InterpolationValue {
    InterpolationValue::new(
        InterpolableValue::List(shadows.iter().map(shadow_to_interpolable).collect()),
        Some(NonInterpolableValue::List(
            shadows
                .iter()
                .map(|shadow| Some(NonInterpolableValue::Shadow(shadow.style)))
                .collect(),
        )),
    )
}

#[derive(Clone, Copy, Debug)]
pub struct ShadowListInterpolationType {
    property: PropertyId,
}

impl ShadowListInterpolationType {
    pub const fn new(property: PropertyId) -> Self {
        Self { property }
    }
}

impl InterpolationType for ShadowListInterpolationType {
    fn property(&self) -> PropertyId {
        self.property
    }

    fn maybe_convert_style(&self, style: &ComputedStyle, _state: &StyleResolverState<'_>) -> Option<InterpolationValue> {
        match self.property {
            PropertyId::BoxShadow => Some(shadows_to_value(&style.box_shadow)),
            PropertyId::TextShadow => Some(shadows_to_value(&style.text_shadow)),
            _ => None,
        }
    }

    fn maybe_convert_value(
        &self,
        value: &CssValue,
        state: &StyleResolverState<'_>,
        checkers: &mut ConversionCheckers,
    ) -> Option<InterpolationValue> {
        let shadows = convert_shadow_list(value, state)?;
        if depends_on_conversion_data(value) {
            checkers.push(ConversionChecker::conversion_data(state));
        }
        Some(shadows_to_value(&shadows))
    }

    fn apply(
        &self,
        interpolable: &InterpolableValue,
        non_interpolable: Option<&NonInterpolableValue>,
        state: &mut StyleResolverState<'_>,
    ) {
        let Some(NonInterpolableValue::List(styles)) = non_interpolable else {
            return;
        };
        let items = interpolable.as_list().unwrap_or_default();
        let shadows: Vec<ShadowData> = items
            .iter()
            .zip(styles)
            .map(|(item, style)| {
                let style = match style {
                    Some(NonInterpolableValue::Shadow(style)) => *style,
                    _ => ShadowStyle::Normal,
                };
                interpolable_to_shadow(item, style, state)
            })
            .collect();
        match self.property {
            PropertyId::BoxShadow => state.style_mut().box_shadow = shadows,
            PropertyId::TextShadow => state.style_mut().text_shadow = shadows,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_values_units::{Color, LengthConversionData};

    fn shadow(x: f32, style: ShadowStyle) -> ShadowData {
        ShadowData {
            x,
            y: x,
            blur: 2.0,
            spread: 0.0,
            color: StyleColor::Color(Color::BLACK),
            style,
        }
    }

    /// # Panics
    /// Panics if shadows of different `inset` merge.
    #[test]
    fn inset_mismatch_does_not_merge() {
        let kind = ShadowListInterpolationType::new(PropertyId::BoxShadow);
        let start = shadows_to_value(&[shadow(1.0, ShadowStyle::Normal)]);
        let end = shadows_to_value(&[shadow(3.0, ShadowStyle::Inset)]);
        assert!(kind.maybe_merge_singles(start, end).is_none());
        let start = shadows_to_value(&[shadow(1.0, ShadowStyle::Normal)]);
        let longer = shadows_to_value(&[shadow(1.0, ShadowStyle::Normal), shadow(2.0, ShadowStyle::Normal)]);
        assert!(kind.maybe_merge_singles(start, longer).is_none());
    }

    /// # Panics
    /// Panics if matching shadows do not blend per component.
    #[test]
    fn blends_offsets() {
        let mut state = StyleResolverState::new(None, LengthConversionData::default());
        let kind = ShadowListInterpolationType::new(PropertyId::TextShadow);
        let start = shadows_to_value(&[shadow(0.0, ShadowStyle::Inset)]);
        let end = shadows_to_value(&[shadow(10.0, ShadowStyle::Inset)]);
        if let Some(pair) = kind.maybe_merge_singles(start, end) {
            let value = pair.at(0.5);
            kind.apply(&value.interpolable, value.non_interpolable.as_ref(), &mut state);
        }
        assert_eq!(state.style().text_shadow, vec![shadow(5.0, ShadowStyle::Inset)]);
    }
}
