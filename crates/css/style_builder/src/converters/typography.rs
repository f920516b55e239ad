//! CSS Fonts Module Level 4 and CSS Text Module Level 3 — font and text values.
//! Spec: <https://www.w3.org/TR/css-fonts-4/#font-size-prop>

use super::convert_length_percentage;
use crate::resolver_state::StyleResolverState;
use crate::style_model::{Length, LineHeight, TextDecorationLine, TextIndent};
use css_values_units::{CssValue, ValueId};

/// Ratio between adjacent steps of `larger` and `smaller`.
const FONT_SIZE_SCALE: f32 = 1.2;

/// Pixel size of an absolute-size keyword with a 16px medium.
const fn absolute_font_size(keyword: ValueId) -> Option<f32> {
    Some(match keyword {
        ValueId::XxSmall => 9.0,
        ValueId::XSmall => 10.0,
        ValueId::Small => 13.0,
        ValueId::Medium => 16.0,
        ValueId::Large => 18.0,
        ValueId::XLarge => 24.0,
        ValueId::XxLarge => 32.0,
        _ => return None,
    })
}

/// `font-size`. Font-relative units and percentages refer to the parent's font size.
pub fn convert_font_size(value: &CssValue, state: &StyleResolverState<'_>) -> Option<f32> {
    let primitive = value.as_primitive()?;
    let parent_size = state.parent_font_size();
    if let Some(keyword) = primitive.value_id() {
        return match keyword {
            ValueId::Larger => Some(parent_size * FONT_SIZE_SCALE),
            ValueId::Smaller => Some(parent_size / FONT_SIZE_SCALE),
            _ => absolute_font_size(keyword),
        };
    }
    let conversion_data = state.font_size_conversion_data();
    let size = match convert_length_percentage(primitive, &conversion_data)? {
        Length::Fixed(pixels) => pixels,
        length => length.value_for(parent_size),
    };
    Some(size.max(0.0))
}

/// `bolder` relative to an inherited weight.
const fn bolder_weight(weight: u16) -> u16 {
    if weight < 350 {
        400
    } else if weight < 550 {
        700
    } else if weight < 900 {
        900
    } else {
        weight
    }
}

/// `lighter` relative to an inherited weight.
const fn lighter_weight(weight: u16) -> u16 {
    if weight < 100 {
        weight
    } else if weight < 550 {
        100
    } else if weight < 750 {
        400
    } else {
        700
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "Weights are 100 to 900")]
pub fn convert_font_weight(value: &CssValue, state: &StyleResolverState<'_>) -> Option<u16> {
    let primitive = value.as_primitive()?;
    let parent_weight = state.parent_style().map_or(400, |parent| parent.font_weight);
    match primitive.value_id() {
        Some(ValueId::Normal) => Some(400),
        Some(ValueId::Bold) => Some(700),
        Some(ValueId::Bolder) => Some(bolder_weight(parent_weight)),
        Some(ValueId::Lighter) => Some(lighter_weight(parent_weight)),
        Some(_) => None,
        None => primitive
            .is_number()
            .then(|| primitive.double_value().clamp(1.0, 1000.0) as u16),
    }
}

/// `line-height`. Numbers inherit as numbers; lengths and percentages become pixels.
#[allow(clippy::cast_possible_truncation, reason = "Computed numbers are f32")]
pub fn convert_line_height(value: &CssValue, state: &StyleResolverState<'_>) -> Option<LineHeight> {
    let primitive = value.as_primitive()?;
    if primitive.value_id() == Some(ValueId::Normal) {
        return Some(LineHeight::Normal);
    }
    if primitive.is_number() {
        return Some(LineHeight::Number(primitive.double_value() as f32));
    }
    let font_size = state.style().font_size;
    let length = convert_length_percentage(primitive, state.conversion_data())?;
    Some(LineHeight::Fixed(length.value_for(font_size)))
}

/// `text-indent`: a length followed by the optional `each-line` and `hanging` keywords.
pub fn convert_text_indent(value: &CssValue, state: &StyleResolverState<'_>) -> Option<TextIndent> {
    let list = value.as_list()?;
    let mut values = list.iter();
    let length = convert_length_percentage(values.next()?.as_primitive()?, state.conversion_data())?;
    let mut indent = TextIndent {
        length,
        each_line: false,
        hanging: false,
    };
    for keyword in values {
        match keyword.value_id()? {
            ValueId::EachLine => indent.each_line = true,
            ValueId::Hanging => indent.hanging = true,
            _ => return None,
        }
    }
    Some(indent)
}

pub fn convert_text_decoration_line(value: &CssValue) -> Option<TextDecorationLine> {
    if value.value_id() == Some(ValueId::None) {
        return Some(TextDecorationLine::NONE);
    }
    value.as_list()?.iter().try_fold(TextDecorationLine::NONE, |lines, line| {
        let flag = match line.value_id()? {
            ValueId::Underline => TextDecorationLine::UNDERLINE,
            ValueId::Overline => TextDecorationLine::OVERLINE,
            ValueId::LineThrough => TextDecorationLine::LINE_THROUGH,
            _ => return None,
        };
        Some(lines.union(flag))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style_model::ComputedStyle;
    use css_values_units::{LengthConversionData, PrimitiveValue, UnitType, ValueList};

    fn number(value: f64, unit: UnitType) -> CssValue {
        CssValue::Primitive(PrimitiveValue::numeric(value, unit))
    }

    /// # Panics
    /// Panics if font sizes do not resolve against the parent.
    #[test]
    fn font_sizes() {
        let mut parent = ComputedStyle::default();
        parent.font_size = 20.0;
        let state = StyleResolverState::new(Some(&parent), LengthConversionData::default());
        assert_eq!(convert_font_size(&number(2.0, UnitType::Ems), &state), Some(40.0));
        assert_eq!(convert_font_size(&number(50.0, UnitType::Percentage), &state), Some(10.0));
        assert_eq!(convert_font_size(&CssValue::identifier(ValueId::Larger), &state), Some(24.0));
        assert_eq!(convert_font_size(&CssValue::identifier(ValueId::XxLarge), &state), Some(32.0));
    }

    /// # Panics
    /// Panics if relative weights do not follow the inherited weight.
    #[test]
    fn font_weights() {
        let mut parent = ComputedStyle::default();
        parent.font_weight = 600;
        let state = StyleResolverState::new(Some(&parent), LengthConversionData::default());
        assert_eq!(convert_font_weight(&CssValue::identifier(ValueId::Bolder), &state), Some(900));
        assert_eq!(convert_font_weight(&CssValue::identifier(ValueId::Lighter), &state), Some(400));
        assert_eq!(convert_font_weight(&number(300.0, UnitType::Integer), &state), Some(300));
    }

    /// # Panics
    /// Panics if line heights lose the number/length distinction.
    #[test]
    fn line_heights() {
        let state = StyleResolverState::new(None, LengthConversionData::default());
        assert_eq!(
            convert_line_height(&number(1.5, UnitType::Number), &state),
            Some(LineHeight::Number(1.5))
        );
        assert_eq!(
            convert_line_height(&number(150.0, UnitType::Percentage), &state),
            Some(LineHeight::Fixed(24.0))
        );
    }

    /// # Panics
    /// Panics if text-indent keywords are dropped.
    #[test]
    fn text_indents() {
        let state = StyleResolverState::new(None, LengthConversionData::default());
        let mut list = ValueList::space_separated();
        list.append(number(1.0, UnitType::Ems));
        list.append(CssValue::identifier(ValueId::Hanging));
        let indent = convert_text_indent(&CssValue::ValueList(list), &state);
        assert_eq!(
            indent,
            Some(TextIndent {
                length: Length::Fixed(16.0),
                each_line: false,
                hanging: true,
            })
        );
    }
}
