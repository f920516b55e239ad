//! CSS Color Module Level 4 — interpolating colors.
//! Spec: <https://www.w3.org/TR/css-color-4/#interpolation-alpha>
//!
//! Colors blend as premultiplied RGBA followed by four weights for the symbolic colors
//! (`currentcolor`, `-webkit-activelink`, `-webkit-link` and `-internal-quirk-inherit`).
//! The symbolic weights are only resolved when the blended color is applied, so
//! `currentcolor` can blend against a concrete color before the current color is known.

use crate::conversion_checker::ConversionCheckers;
use crate::interpolable::{InterpolableValue, InterpolationValue, NonInterpolableValue};
use crate::interpolation_type::InterpolationType;
use css_style_builder::{ComputedStyle, StyleColor, StyleResolverState};
use css_values_units::{Color, CssValue, PropertyId, ValueId, primitive_to_color};

const RED: usize = 0;
const GREEN: usize = 1;
const BLUE: usize = 2;
const ALPHA: usize = 3;
const CURRENT_COLOR: usize = 4;
const ACTIVE_LINK: usize = 5;
const LINK: usize = 6;
const QUIRK_INHERIT: usize = 7;
const CHANNELS: usize = 8;

fn symbolic(channel: usize) -> InterpolableValue {
    InterpolableValue::numbers((0..CHANNELS).map(|index| if index == channel { 1.0 } else { 0.0 }))
}

pub fn color_to_interpolable(color: Color) -> InterpolableValue {
    let alpha = f64::from(color.alpha()) / 255.0;
    let mut channels = [0.0; CHANNELS];
    channels[RED] = f64::from(color.red()) * alpha;
    channels[GREEN] = f64::from(color.green()) * alpha;
    channels[BLUE] = f64::from(color.blue()) * alpha;
    channels[ALPHA] = alpha;
    InterpolableValue::numbers(channels)
}

pub fn style_color_to_interpolable(color: StyleColor) -> InterpolableValue {
    match color {
        StyleColor::Color(color) => color_to_interpolable(color),
        StyleColor::CurrentColor => symbolic(CURRENT_COLOR),
    }
}

/// A `<color>` keyframe value. Returns `None` for anything that is not a color.
pub fn css_value_to_interpolable(value: &CssValue) -> Option<InterpolableValue> {
    let primitive = value.as_primitive()?;
    match primitive.value_id() {
        Some(ValueId::Currentcolor) => Some(symbolic(CURRENT_COLOR)),
        Some(ValueId::WebkitActivelink) => Some(symbolic(ACTIVE_LINK)),
        Some(ValueId::WebkitLink) => Some(symbolic(LINK)),
        Some(ValueId::InternalQuirkInherit) => Some(symbolic(QUIRK_INHERIT)),
        _ => primitive_to_color(primitive).map(color_to_interpolable),
    }
}

/// Whether a blended color is exactly `currentcolor`.
fn is_pure_current_color(value: &InterpolableValue) -> bool {
    (0..CHANNELS).all(|index| {
        let expected = if index == CURRENT_COLOR { 1.0 } else { 0.0 };
        (value.number_at(index) - expected).abs() < f64::EPSILON
    })
}

/// Resolve a blended color. The symbolic weights add the premultiplied contribution of
/// the color they stand for.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Channels are clamped to 0..=255 first"
)]
pub fn resolve_interpolable_color(
    value: &InterpolableValue,
    current_color: Color,
    state: &StyleResolverState<'_>,
) -> Color {
    let links = state.text_link_colors();
    let link = if state.is_link_visited() {
        links.visited_link
    } else {
        links.link
    };
    let mut red = value.number_at(RED);
    let mut green = value.number_at(GREEN);
    let mut blue = value.number_at(BLUE);
    let mut alpha = value.number_at(ALPHA);
    for (channel, color) in [
        (CURRENT_COLOR, current_color),
        (ACTIVE_LINK, links.active_link),
        (LINK, link),
        (QUIRK_INHERIT, links.text),
    ] {
        let weight = value.number_at(channel);
        if weight.abs() < f64::EPSILON {
            continue;
        }
        let color_alpha = f64::from(color.alpha()) / 255.0;
        red += weight * f64::from(color.red()) * color_alpha;
        green += weight * f64::from(color.green()) * color_alpha;
        blue += weight * f64::from(color.blue()) * color_alpha;
        alpha += weight * color_alpha;
    }
    if alpha <= 0.0 {
        return Color::TRANSPARENT;
    }
    let alpha = alpha.min(1.0);
    let channel = |premultiplied: f64| (premultiplied / alpha).round().clamp(0.0, 255.0) as u8;
    Color::from_rgba(
        channel(red),
        channel(green),
        channel(blue),
        (alpha * 255.0).round().clamp(0.0, 255.0) as u8,
    )
}

/// A blended color as stored on a property other than `color`.
pub fn interpolable_to_style_color(value: &InterpolableValue, state: &StyleResolverState<'_>) -> StyleColor {
    if is_pure_current_color(value) {
        return StyleColor::CurrentColor;
    }
    StyleColor::Color(resolve_interpolable_color(value, state.style().color, state))
}

#[derive(Clone, Copy, Debug)]
pub struct ColorInterpolationType {
    property: PropertyId,
}

impl ColorInterpolationType {
    pub const fn new(property: PropertyId) -> Self {
        Self { property }
    }
}

impl InterpolationType for ColorInterpolationType {
    fn property(&self) -> PropertyId {
        self.property
    }

    fn maybe_convert_style(&self, style: &ComputedStyle, _state: &StyleResolverState<'_>) -> Option<InterpolationValue> {
        let color = style.style_color(self.property)?;
        Some(InterpolationValue::interpolable(style_color_to_interpolable(color)))
    }

    fn maybe_convert_value(
        &self,
        value: &CssValue,
        state: &StyleResolverState<'_>,
        checkers: &mut ConversionCheckers,
    ) -> Option<InterpolationValue> {
        // On `color` itself `currentcolor` means the inherited color.
        if self.property == PropertyId::Color
            && matches!(
                value.value_id(),
                Some(ValueId::Currentcolor | ValueId::InternalQuirkInherit)
            )
        {
            return self.maybe_convert_inherit(state, checkers);
        }
        css_value_to_interpolable(value).map(InterpolationValue::interpolable)
    }

    fn apply(
        &self,
        interpolable: &InterpolableValue,
        _non_interpolable: Option<&NonInterpolableValue>,
        state: &mut StyleResolverState<'_>,
    ) {
        if self.property == PropertyId::Color {
            let parent_color = state.parent_style().map_or(Color::BLACK, |parent| parent.color);
            let color = resolve_interpolable_color(interpolable, parent_color, state);
            state.style_mut().color = color;
            return;
        }
        let color = interpolable_to_style_color(interpolable, state);
        state.style_mut().set_style_color(self.property, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_values_units::{LengthConversionData, PrimitiveValue};

    /// # Panics
    /// Panics if `currentcolor` is resolved before the blend is applied.
    #[test]
    fn blends_current_color_lazily() {
        let state = StyleResolverState::new(None, LengthConversionData::default());
        let current = style_color_to_interpolable(StyleColor::CurrentColor);
        let white = color_to_interpolable(Color::WHITE);
        let halfway = current.interpolate(&white, 0.5);
        let black_current = resolve_interpolable_color(&halfway, Color::BLACK, &state);
        assert_eq!(black_current, Color::from_rgb(128, 128, 128));
        let red_current = resolve_interpolable_color(&halfway, Color::from_rgb(255, 0, 0), &state);
        assert_eq!(red_current, Color::from_rgb(255, 128, 128));
    }

    /// # Panics
    /// Panics if a transparent blend keeps channel noise or alpha is not premultiplied.
    #[test]
    fn premultiplies_alpha() {
        let state = StyleResolverState::new(None, LengthConversionData::default());
        let transparent = color_to_interpolable(Color::TRANSPARENT);
        let red = color_to_interpolable(Color::from_rgb(255, 0, 0));
        let blended = transparent.interpolate(&red, 0.5);
        assert_eq!(
            resolve_interpolable_color(&blended, Color::BLACK, &state),
            Color::from_rgba(255, 0, 0, 128)
        );
        assert_eq!(
            resolve_interpolable_color(&transparent, Color::BLACK, &state),
            Color::TRANSPARENT
        );
    }

    /// # Panics
    /// Panics if symbolic keywords do not convert to their channels.
    #[test]
    fn converts_keywords() {
        let current = CssValue::Primitive(PrimitiveValue::identifier(ValueId::Currentcolor));
        let converted = css_value_to_interpolable(&current);
        assert!(converted.as_ref().is_some_and(is_pure_current_color));
        let state = StyleResolverState::new(None, LengthConversionData::default());
        assert_eq!(
            converted.map(|value| interpolable_to_style_color(&value, &state)),
            Some(StyleColor::CurrentColor)
        );
    }
}
