//! Color and paint conversion.

use crate::resolver_state::StyleResolverState;
use crate::style_model::{Paint, StyleColor};
use css_values_units::{Color, CssValue, PrimitiveValue, UnitType, ValueId, primitive_to_color};

/// A `<color>`. `currentcolor` stays symbolic; the link keywords use the document's colors.
pub fn convert_style_color(primitive: &PrimitiveValue, state: &StyleResolverState<'_>) -> Option<StyleColor> {
    let links = state.text_link_colors();
    let color = match primitive.value_id() {
        Some(ValueId::Currentcolor) => return Some(StyleColor::CurrentColor),
        Some(ValueId::WebkitLink) if state.is_link_visited() => links.visited_link,
        Some(ValueId::WebkitLink) => links.link,
        Some(ValueId::WebkitActivelink) => links.active_link,
        Some(ValueId::InternalQuirkInherit) => links.text,
        _ => primitive_to_color(primitive)?,
    };
    Some(StyleColor::Color(color))
}

/// The `color` property, where `currentcolor` means the inherited color.
pub fn convert_color(value: &CssValue, state: &StyleResolverState<'_>) -> Option<Color> {
    let primitive = value.as_primitive()?;
    let inherited = state.parent_style().map_or(Color::BLACK, |parent| parent.color);
    if primitive.value_id() == Some(ValueId::InternalQuirkInherit) {
        return Some(inherited);
    }
    convert_style_color(primitive, state).map(|color| color.resolve(inherited))
}

/// `caret-color`: `None` for `auto`.
pub fn convert_caret_color(value: &CssValue, state: &StyleResolverState<'_>) -> Option<Option<StyleColor>> {
    let primitive = value.as_primitive()?;
    if primitive.value_id() == Some(ValueId::Auto) {
        return Some(None);
    }
    convert_style_color(primitive, state).map(Some)
}

/// `fill` and `stroke`.
pub fn convert_paint(value: &CssValue, state: &StyleResolverState<'_>) -> Option<Paint> {
    let fallback = |value: &CssValue| -> Option<Option<StyleColor>> {
        let primitive = value.as_primitive()?;
        if primitive.value_id() == Some(ValueId::None) {
            return Some(None);
        }
        convert_style_color(primitive, state).map(Some)
    };
    match value {
        CssValue::Primitive(primitive) => {
            if primitive.value_id() == Some(ValueId::None) {
                return Some(Paint::None);
            }
            if primitive.unit_type() == UnitType::Uri
                && let Some(url) = primitive.string_value()
            {
                return Some(Paint::Url {
                    url: url.to_owned(),
                    fallback: None,
                });
            }
            convert_style_color(primitive, state).map(Paint::Color)
        }
        CssValue::ValueList(list) => {
            let url = list.item(0).and_then(CssValue::as_primitive)?.string_value()?.to_owned();
            let fallback = fallback(list.item(1)?)?;
            Some(Paint::Url { url, fallback })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver_state::TextLinkColors;
    use crate::style_model::ComputedStyle;
    use css_values_units::{LengthConversionData, ValueList};

    /// # Panics
    /// Panics if `currentcolor` or the link keywords resolve to the wrong colors.
    #[test]
    fn resolves_color_keywords() {
        let mut parent = ComputedStyle::default();
        parent.color = Color::from_rgb(1, 2, 3);
        let links = TextLinkColors {
            link: Color::from_rgb(0, 0, 1),
            ..TextLinkColors::default()
        };
        let state = StyleResolverState::new(Some(&parent), LengthConversionData::default())
            .with_text_link_colors(links);
        let current = PrimitiveValue::identifier(ValueId::Currentcolor);
        assert_eq!(convert_style_color(&current, &state), Some(StyleColor::CurrentColor));
        assert_eq!(
            convert_color(&CssValue::Primitive(current), &state),
            Some(Color::from_rgb(1, 2, 3))
        );
        let link = PrimitiveValue::identifier(ValueId::WebkitLink);
        assert_eq!(
            convert_style_color(&link, &state),
            Some(StyleColor::Color(Color::from_rgb(0, 0, 1)))
        );
        let visited = StyleResolverState::new(None, LengthConversionData::default()).with_link_visited(true);
        assert_eq!(
            convert_style_color(&link, &visited),
            Some(StyleColor::Color(TextLinkColors::default().visited_link))
        );
    }

    /// # Panics
    /// Panics if paint servers lose their fallback.
    #[test]
    fn converts_paint() {
        let state = StyleResolverState::new(None, LengthConversionData::default());
        let mut list = ValueList::space_separated();
        list.append(CssValue::Primitive(PrimitiveValue::uri("#grad".to_owned())));
        list.append(CssValue::identifier(ValueId::None));
        assert_eq!(
            convert_paint(&CssValue::ValueList(list), &state),
            Some(Paint::Url {
                url: "#grad".to_owned(),
                fallback: None
            })
        );
        assert_eq!(convert_paint(&CssValue::identifier(ValueId::None), &state), Some(Paint::None));
    }
}
