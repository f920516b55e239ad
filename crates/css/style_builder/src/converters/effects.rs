//! Shadows, filters, clipping and images.

use super::{compute_px, convert_length_percentage};
use crate::converters::colors::convert_style_color;
use crate::resolver_state::StyleResolverState;
use crate::style_model::{ClipRect, FilterOperation, Length, ShadowData, ShadowStyle, StyleColor, StyleImage};
use css_values_units::{CssValue, PrimitiveValue, ShadowValue, UnitType, ValueId};

pub fn convert_shadow(shadow: &ShadowValue, state: &StyleResolverState<'_>) -> Option<ShadowData> {
    let conversion_data = state.conversion_data();
    let optional_px = |value: Option<&PrimitiveValue>| value.map_or(0.0, |length| compute_px(length, conversion_data));
    let color = match &shadow.color {
        Some(color) => convert_style_color(color, state)?,
        None => StyleColor::CurrentColor,
    };
    Some(ShadowData {
        x: compute_px(&shadow.x, conversion_data),
        y: compute_px(&shadow.y, conversion_data),
        blur: optional_px(shadow.blur.as_ref()),
        spread: optional_px(shadow.spread.as_ref()),
        color,
        style: if shadow.inset {
            ShadowStyle::Inset
        } else {
            ShadowStyle::Normal
        },
    })
}

/// `box-shadow` and `text-shadow`: `none` is an empty list.
pub fn convert_shadow_list(value: &CssValue, state: &StyleResolverState<'_>) -> Option<Vec<ShadowData>> {
    if value.value_id() == Some(ValueId::None) {
        return Some(Vec::new());
    }
    value
        .as_list()?
        .iter()
        .map(|item| match item {
            CssValue::Shadow(shadow) => convert_shadow(shadow, state),
            _ => None,
        })
        .collect()
}

/// A filter amount as a fraction; omitted amounts take `default`.
#[allow(clippy::cast_possible_truncation, reason = "Computed numbers are f32")]
fn filter_amount(argument: Option<&CssValue>, default: f32) -> Option<f32> {
    let Some(argument) = argument else {
        return Some(default);
    };
    let primitive = argument.as_primitive()?;
    if primitive.is_percentage() {
        return Some(primitive.double_value() as f32 / 100.0);
    }
    primitive.is_number().then(|| primitive.double_value() as f32)
}

#[allow(clippy::cast_possible_truncation, reason = "Computed angles are f32")]
fn convert_filter_function(value: &CssValue, state: &StyleResolverState<'_>) -> Option<FilterOperation> {
    if let Some(primitive) = value.as_primitive() {
        let url = primitive.string_value()?;
        return (primitive.unit_type() == UnitType::Uri).then(|| FilterOperation::Reference(url.to_owned()));
    }
    let function = value.as_function()?;
    let argument = function.arguments.item(0);
    Some(match function.name {
        ValueId::Blur => FilterOperation::Blur(
            argument
                .and_then(CssValue::as_primitive)
                .map_or(0.0, |length| compute_px(length, state.conversion_data())),
        ),
        ValueId::HueRotate => FilterOperation::HueRotate(
            argument
                .and_then(CssValue::as_primitive)
                .map_or(0.0, |angle| angle.compute_degrees() as f32),
        ),
        ValueId::DropShadow => match argument? {
            CssValue::Shadow(shadow) => FilterOperation::DropShadow(convert_shadow(shadow, state)?),
            _ => return None,
        },
        ValueId::Brightness => FilterOperation::Brightness(filter_amount(argument, 1.0)?),
        ValueId::Contrast => FilterOperation::Contrast(filter_amount(argument, 1.0)?),
        ValueId::Grayscale => FilterOperation::Grayscale(filter_amount(argument, 1.0)?),
        ValueId::Invert => FilterOperation::Invert(filter_amount(argument, 1.0)?),
        ValueId::Opacity => FilterOperation::Opacity(filter_amount(argument, 1.0)?),
        ValueId::Saturate => FilterOperation::Saturate(filter_amount(argument, 1.0)?),
        ValueId::Sepia => FilterOperation::Sepia(filter_amount(argument, 1.0)?),
        _ => return None,
    })
}

/// `filter`: `none` is an empty list.
pub fn convert_filter_operations(value: &CssValue, state: &StyleResolverState<'_>) -> Option<Vec<FilterOperation>> {
    if value.value_id() == Some(ValueId::None) {
        return Some(Vec::new());
    }
    value
        .as_list()?
        .iter()
        .map(|function| convert_filter_function(function, state))
        .collect()
}

/// `clip`: `None` for `auto`; `auto` edges become [`Length::Auto`].
pub fn convert_clip(value: &CssValue, state: &StyleResolverState<'_>) -> Option<Option<ClipRect>> {
    let primitive = value.as_primitive()?;
    if primitive.value_id() == Some(ValueId::Auto) {
        return Some(None);
    }
    let rect = primitive.rect_value()?;
    let mut edges = [Length::Auto; 4];
    for (edge, slot) in rect.edges().into_iter().zip(edges.iter_mut()) {
        if edge.value_id() != Some(ValueId::Auto) {
            *slot = convert_length_percentage(edge, state.conversion_data())?;
        }
    }
    Some(Some(ClipRect::from_edges(edges)))
}

#[allow(clippy::cast_possible_truncation, reason = "Blend amounts are f32")]
pub fn convert_image(value: &CssValue) -> Option<StyleImage> {
    match value {
        CssValue::Image(image) => Some(StyleImage::Url(image.url.clone())),
        CssValue::CrossFade(cross_fade) => Some(StyleImage::CrossFade {
            from: Box::new(convert_image(&cross_fade.from)?),
            to: Box::new(convert_image(&cross_fade.to)?),
            percentage: cross_fade.percentage.double_value() as f32,
        }),
        _ => None,
    }
}

/// `background-image`: a lone `none` is an empty list; `none` inside a list keeps its layer.
pub fn convert_image_list(value: &CssValue) -> Option<Vec<StyleImage>> {
    if value.value_id() == Some(ValueId::None) {
        return Some(Vec::new());
    }
    value
        .as_list()?
        .iter()
        .map(|layer| {
            if layer.value_id() == Some(ValueId::None) {
                Some(StyleImage::None)
            } else {
                convert_image(layer)
            }
        })
        .collect()
}
