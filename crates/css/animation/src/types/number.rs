//! Interpolation of plain numbers: `opacity`, the flex factors, `z-index`, `order` and
//! `font-weight`.

use crate::conversion_checker::{ConversionChecker, ConversionCheckers};
use crate::interpolable::{InterpolableValue, InterpolationValue, NonInterpolableValue};
use crate::interpolation_type::InterpolationType;
use css_style_builder::converters::convert_number;
use css_style_builder::converters::lengths::convert_z_index;
use css_style_builder::converters::typography::convert_font_weight;
use css_style_builder::{ComputedStyle, StyleResolverState};
use css_values_units::{CssValue, PropertyId, ValueId};

#[derive(Clone, Copy, Debug)]
pub struct NumberInterpolationType {
    property: PropertyId,
}

impl NumberInterpolationType {
    pub const fn new(property: PropertyId) -> Self {
        Self { property }
    }

    pub const fn handles(property: PropertyId) -> bool {
        matches!(
            property,
            PropertyId::Opacity
                | PropertyId::FlexGrow
                | PropertyId::FlexShrink
                | PropertyId::ZIndex
                | PropertyId::Order
                | PropertyId::FontWeight
        )
    }
}

impl InterpolationType for NumberInterpolationType {
    fn property(&self) -> PropertyId {
        self.property
    }

    fn maybe_convert_style(&self, style: &ComputedStyle, _state: &StyleResolverState<'_>) -> Option<InterpolationValue> {
        let number = match self.property {
            PropertyId::Opacity => f64::from(style.opacity),
            PropertyId::FlexGrow => f64::from(style.flex_grow),
            PropertyId::FlexShrink => f64::from(style.flex_shrink),
            PropertyId::ZIndex => f64::from(style.z_index?),
            PropertyId::Order => f64::from(style.order),
            PropertyId::FontWeight => f64::from(style.font_weight),
            _ => return None,
        };
        Some(InterpolationValue::interpolable(InterpolableValue::Number(number)))
    }

    fn maybe_convert_value(
        &self,
        value: &CssValue,
        state: &StyleResolverState<'_>,
        checkers: &mut ConversionCheckers,
    ) -> Option<InterpolationValue> {
        let number = match self.property {
            PropertyId::ZIndex => f64::from(convert_z_index(value)??),
            PropertyId::Order => {
                let primitive = value.as_primitive()?;
                if !primitive.is_number() {
                    return None;
                }
                f64::from(primitive.int_value())
            }
            PropertyId::FontWeight => {
                if matches!(value.value_id(), Some(ValueId::Bolder | ValueId::Lighter)) {
                    checkers.push(ConversionChecker::inherited(PropertyId::FontWeight, state));
                }
                f64::from(convert_font_weight(value, state)?)
            }
            _ => f64::from(convert_number(value)?),
        };
        Some(InterpolationValue::interpolable(InterpolableValue::Number(number)))
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Values are clamped or rounded into range first"
    )]
    fn apply(
        &self,
        interpolable: &InterpolableValue,
        _non_interpolable: Option<&NonInterpolableValue>,
        state: &mut StyleResolverState<'_>,
    ) {
        let Some(number) = interpolable.as_number() else {
            return;
        };
        let style = state.style_mut();
        match self.property {
            PropertyId::Opacity => style.opacity = number.clamp(0.0, 1.0) as f32,
            PropertyId::FlexGrow => style.flex_grow = number.max(0.0) as f32,
            PropertyId::FlexShrink => style.flex_shrink = number.max(0.0) as f32,
            PropertyId::ZIndex => style.z_index = Some(number.round() as i32),
            PropertyId::Order => style.order = number.round() as i32,
            PropertyId::FontWeight => style.font_weight = number.round().clamp(1.0, 1000.0) as u16,
            _ => {}
        }
    }
}
