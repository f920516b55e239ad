//! Grammars of individual longhand properties.

use crate::consumers::{
    consume_clip, consume_filter, consume_function, consume_image_list, consume_shadow,
    consume_transform, consume_transform_origin, peek_id,
};
use crate::context::ParserContext;
use crate::grid::consume_grid_track_list;
use crate::property_tables::{
    allows_quirky_color, allows_unitless_quirk, is_color_property_id, keyword_values,
};
use css_syntax::{ParserMode, ParserToken, TokenRange};
use css_values_units::{
    CssValue, IdenticalValuesPolicy, PathValue, PrimitiveValue, PropertyId, UnitType,
    UnitlessQuirk, ValueId, ValueList, ValuePair, ValueRange, consume_angle, consume_color,
    consume_ident, consume_ident_in, consume_integer, consume_length, consume_length_or_percent,
    consume_number, consume_url, function_value_id,
};
use log::trace;

const FONT_SIZE_KEYWORDS: &[ValueId] = &[
    ValueId::XxSmall,
    ValueId::XSmall,
    ValueId::Small,
    ValueId::Medium,
    ValueId::Large,
    ValueId::XLarge,
    ValueId::XxLarge,
    ValueId::Larger,
    ValueId::Smaller,
];

const VERTICAL_ALIGN_KEYWORDS: &[ValueId] = &[
    ValueId::Baseline,
    ValueId::Sub,
    ValueId::Super,
    ValueId::TextTop,
    ValueId::TextBottom,
    ValueId::Middle,
    ValueId::Top,
    ValueId::Bottom,
];

const SIZING_KEYWORDS: &[ValueId] = &[
    ValueId::MinContent,
    ValueId::MaxContent,
    ValueId::FitContent,
    ValueId::WebkitFillAvailable,
];

const LINE_WIDTH_KEYWORDS: &[ValueId] = &[ValueId::Thin, ValueId::Medium, ValueId::Thick];

const TEXT_DECORATION_LINES: &[ValueId] = &[
    ValueId::Underline,
    ValueId::Overline,
    ValueId::LineThrough,
];

/// Per-property parsing state: the mode and whether the unitless quirk applies.
struct LonghandParser<'context> {
    property: PropertyId,
    context: &'context ParserContext,
}

impl LonghandParser<'_> {
    const fn mode(&self) -> ParserMode {
        self.context.mode()
    }

    fn unitless(&self) -> UnitlessQuirk {
        if allows_unitless_quirk(self.property) {
            UnitlessQuirk::Allow
        } else {
            UnitlessQuirk::Forbid
        }
    }

    fn length(&self, range: &mut TokenRange<'_>, value_range: ValueRange) -> Option<PrimitiveValue> {
        consume_length(range, self.mode(), value_range, self.unitless())
    }

    fn length_or_percent(&self, range: &mut TokenRange<'_>, value_range: ValueRange) -> Option<PrimitiveValue> {
        consume_length_or_percent(range, self.mode(), value_range, self.unitless())
    }

    fn color(&self, range: &mut TokenRange<'_>) -> Option<PrimitiveValue> {
        let accept_quirky = self.context.in_quirks_mode() && allows_quirky_color(self.property);
        consume_color(range, accept_quirky)
    }

    /// A keyword from `keywords`, or whatever `otherwise` accepts.
    fn ident_or(
        range: &mut TokenRange<'_>,
        keywords: &[ValueId],
        otherwise: impl FnOnce(&mut TokenRange<'_>) -> Option<PrimitiveValue>,
    ) -> Option<CssValue> {
        consume_ident_in(range, keywords)
            .or_else(|| otherwise(range))
            .map(CssValue::Primitive)
    }

    fn font_weight(range: &mut TokenRange<'_>) -> Option<CssValue> {
        if let Some(keyword) = consume_ident_in(
            range,
            &[ValueId::Normal, ValueId::Bold, ValueId::Bolder, ValueId::Lighter],
        ) {
            return Some(CssValue::Primitive(keyword));
        }
        let ParserToken::Number(numeric) = range.peek() else {
            return None;
        };
        let weight = numeric.value;
        if !numeric.is_integer() || !(100.0..=900.0).contains(&weight) || weight % 100.0 != 0.0 {
            return None;
        }
        range.consume_including_whitespace();
        Some(CssValue::Primitive(PrimitiveValue::numeric(weight, UnitType::Integer)))
    }

    /// `<length-percentage> && each-line? && hanging?`, stored in that order.
    fn text_indent(&self, range: &mut TokenRange<'_>) -> Option<CssValue> {
        let mut length = None;
        let mut each_line = None;
        let mut hanging = None;
        while !range.at_end() {
            if length.is_none()
                && let Some(value) = self.length_or_percent(range, ValueRange::All)
            {
                length = Some(value);
                continue;
            }
            match peek_id(range) {
                Some(ValueId::EachLine) if each_line.is_none() => each_line = consume_ident(range),
                Some(ValueId::Hanging) if hanging.is_none() => hanging = consume_ident(range),
                _ => return None,
            }
        }
        let mut list = ValueList::space_separated();
        list.append(CssValue::Primitive(length?));
        for keyword in [each_line, hanging].into_iter().flatten() {
            list.append(CssValue::Primitive(keyword));
        }
        Some(CssValue::ValueList(list))
    }

    /// `none | [ underline || overline || line-through ]`.
    fn text_decoration_line(range: &mut TokenRange<'_>) -> Option<CssValue> {
        if peek_id(range) == Some(ValueId::None) {
            return consume_ident(range).map(CssValue::Primitive);
        }
        let mut list = ValueList::space_separated();
        while let Some(line) = consume_ident_in(range, TEXT_DECORATION_LINES) {
            let line = CssValue::Primitive(line);
            if list.has_value(&line) {
                return None;
            }
            list.append(line);
        }
        (!list.is_empty()).then_some(CssValue::ValueList(list))
    }

    /// `none | <color> | <url> [ none | <color> ]?`.
    fn paint(&self, range: &mut TokenRange<'_>) -> Option<CssValue> {
        if peek_id(range) == Some(ValueId::None) {
            return consume_ident(range).map(CssValue::Primitive);
        }
        let Some(url) = consume_url(range) else {
            return self.color(range).map(CssValue::Primitive);
        };
        let url = CssValue::Primitive(PrimitiveValue::uri(url));
        let fallback = if peek_id(range) == Some(ValueId::None) {
            consume_ident(range)
        } else {
            self.color(range)
        };
        let Some(fallback) = fallback else {
            return Some(url);
        };
        let mut list = ValueList::space_separated();
        list.append(url);
        list.append(CssValue::Primitive(fallback));
        Some(CssValue::ValueList(list))
    }

    /// `<length [0,∞]>{1,2}`.
    fn border_spacing(&self, range: &mut TokenRange<'_>) -> Option<CssValue> {
        let horizontal = self.length(range, ValueRange::NonNegative)?;
        let vertical = if range.at_end() {
            horizontal.clone()
        } else {
            self.length(range, ValueRange::NonNegative)?
        };
        Some(CssValue::ValuePair(ValuePair::new(
            CssValue::Primitive(horizontal),
            CssValue::Primitive(vertical),
            IdenticalValuesPolicy::DropIdenticalValues,
        )))
    }

    /// `none | <number>{1,3}`.
    fn scale(range: &mut TokenRange<'_>) -> Option<CssValue> {
        if peek_id(range) == Some(ValueId::None) {
            return consume_ident(range).map(CssValue::Primitive);
        }
        let mut list = ValueList::space_separated();
        while list.len() < 3
            && let Some(factor) = consume_number(range, ValueRange::All)
        {
            list.append(CssValue::Primitive(factor));
        }
        (!list.is_empty()).then_some(CssValue::ValueList(list))
    }

    /// `none | <angle> | <number>{3} <angle>`.
    fn rotate(range: &mut TokenRange<'_>) -> Option<CssValue> {
        if peek_id(range) == Some(ValueId::None) {
            return consume_ident(range).map(CssValue::Primitive);
        }
        let mut list = ValueList::space_separated();
        if let Some(angle) = consume_angle(range) {
            list.append(CssValue::Primitive(angle));
            return Some(CssValue::ValueList(list));
        }
        for _ in 0..3 {
            list.append(CssValue::Primitive(consume_number(range, ValueRange::All)?));
        }
        list.append(CssValue::Primitive(consume_angle(range)?));
        Some(CssValue::ValueList(list))
    }

    /// `none | <length-percentage> [ <length-percentage> <length>? ]?`.
    fn translate(&self, range: &mut TokenRange<'_>) -> Option<CssValue> {
        if peek_id(range) == Some(ValueId::None) {
            return consume_ident(range).map(CssValue::Primitive);
        }
        let mut list = ValueList::space_separated();
        list.append(CssValue::Primitive(self.length_or_percent(range, ValueRange::All)?));
        if let Some(y) = self.length_or_percent(range, ValueRange::All) {
            list.append(CssValue::Primitive(y));
            if let Some(z) = self.length(range, ValueRange::All) {
                list.append(CssValue::Primitive(z));
            }
        }
        Some(CssValue::ValueList(list))
    }

    /// `none | path(<string>)`.
    fn offset_path(range: &mut TokenRange<'_>) -> Option<CssValue> {
        if peek_id(range) == Some(ValueId::None) {
            return consume_ident(range).map(CssValue::Primitive);
        }
        if function_value_id(range.peek()) != Some(ValueId::Path) {
            return None;
        }
        let mut after = *range;
        let mut arguments = consume_function(&mut after);
        let ParserToken::String(path_data) = arguments.consume_including_whitespace() else {
            return None;
        };
        if !arguments.at_end() {
            return None;
        }
        *range = after;
        Some(CssValue::Path(PathValue {
            path_data: path_data.clone(),
        }))
    }

    #[allow(clippy::too_many_lines, reason = "One arm per property")]
    fn parse(&self, range: &mut TokenRange<'_>) -> Option<CssValue> {
        let keywords = keyword_values(self.property);
        if !keywords.is_empty() {
            return consume_ident_in(range, keywords).map(CssValue::Primitive);
        }
        if is_color_property_id(self.property) {
            return self.color(range).map(CssValue::Primitive);
        }
        let mode = self.mode();
        match self.property {
            PropertyId::CaretColor => Self::ident_or(range, &[ValueId::Auto], |range| self.color(range)),
            PropertyId::Fill | PropertyId::Stroke => self.paint(range),
            PropertyId::BackgroundImage => consume_image_list(range),
            PropertyId::BoxShadow => consume_shadow(range, mode, true),
            PropertyId::TextShadow => consume_shadow(range, mode, false),
            PropertyId::BorderTopWidth
            | PropertyId::BorderRightWidth
            | PropertyId::BorderBottomWidth
            | PropertyId::BorderLeftWidth
            | PropertyId::OutlineWidth => Self::ident_or(range, LINE_WIDTH_KEYWORDS, |range| {
                self.length(range, ValueRange::NonNegative)
            }),
            PropertyId::BorderSpacing => self.border_spacing(range),
            PropertyId::OutlineOffset => self.length(range, ValueRange::All).map(CssValue::Primitive),
            PropertyId::Width | PropertyId::Height | PropertyId::MinWidth | PropertyId::MinHeight => {
                if peek_id(range) == Some(ValueId::Auto) {
                    return consume_ident(range).map(CssValue::Primitive);
                }
                Self::ident_or(range, SIZING_KEYWORDS, |range| {
                    self.length_or_percent(range, ValueRange::NonNegative)
                })
            }
            PropertyId::MaxWidth | PropertyId::MaxHeight => {
                if peek_id(range) == Some(ValueId::None) {
                    return consume_ident(range).map(CssValue::Primitive);
                }
                Self::ident_or(range, SIZING_KEYWORDS, |range| {
                    self.length_or_percent(range, ValueRange::NonNegative)
                })
            }
            PropertyId::MarginTop
            | PropertyId::MarginRight
            | PropertyId::MarginBottom
            | PropertyId::MarginLeft
            | PropertyId::Top
            | PropertyId::Right
            | PropertyId::Bottom
            | PropertyId::Left => Self::ident_or(range, &[ValueId::Auto], |range| {
                self.length_or_percent(range, ValueRange::All)
            }),
            PropertyId::PaddingTop
            | PropertyId::PaddingRight
            | PropertyId::PaddingBottom
            | PropertyId::PaddingLeft => self
                .length_or_percent(range, ValueRange::NonNegative)
                .map(CssValue::Primitive),
            PropertyId::ZIndex => Self::ident_or(range, &[ValueId::Auto], |range| {
                consume_integer(range, f64::NEG_INFINITY)
            }),
            PropertyId::Order => consume_integer(range, f64::NEG_INFINITY).map(CssValue::Primitive),
            PropertyId::Clip => consume_clip(range, mode),
            PropertyId::VerticalAlign => Self::ident_or(range, VERTICAL_ALIGN_KEYWORDS, |range| {
                self.length_or_percent(range, ValueRange::All)
            }),
            PropertyId::FontSize => Self::ident_or(range, FONT_SIZE_KEYWORDS, |range| {
                self.length_or_percent(range, ValueRange::NonNegative)
            }),
            PropertyId::FontWeight => Self::font_weight(range),
            PropertyId::LineHeight => Self::ident_or(range, &[ValueId::Normal], |range| {
                consume_number(range, ValueRange::NonNegative)
                    .or_else(|| self.length_or_percent(range, ValueRange::NonNegative))
            }),
            PropertyId::LetterSpacing | PropertyId::WordSpacing => {
                Self::ident_or(range, &[ValueId::Normal], |range| self.length(range, ValueRange::All))
            }
            PropertyId::TextIndent => self.text_indent(range),
            PropertyId::TextDecorationLine => Self::text_decoration_line(range),
            PropertyId::FlexGrow | PropertyId::FlexShrink => {
                consume_number(range, ValueRange::NonNegative).map(CssValue::Primitive)
            }
            PropertyId::Opacity => consume_number(range, ValueRange::All).map(CssValue::Primitive),
            PropertyId::ColumnGap | PropertyId::RowGap => Self::ident_or(range, &[ValueId::Normal], |range| {
                self.length_or_percent(range, ValueRange::NonNegative)
            }),
            PropertyId::GridTemplateColumns | PropertyId::GridTemplateRows => {
                consume_grid_track_list(range, mode)
            }
            PropertyId::Filter => consume_filter(range, mode),
            PropertyId::Transform => consume_transform(range, mode),
            PropertyId::TransformOrigin => consume_transform_origin(range, mode),
            PropertyId::Perspective => Self::ident_or(range, &[ValueId::None], |range| {
                self.length(range, ValueRange::NonNegative)
            }),
            PropertyId::Scale => Self::scale(range),
            PropertyId::Rotate => Self::rotate(range),
            PropertyId::Translate => self.translate(range),
            PropertyId::OffsetPath => Self::offset_path(range),
            _ => None,
        }
    }
}

/// Parse the value of a longhand, consuming as much of `range` as its grammar allows.
///
/// Shorthands and custom properties are not handled here.
pub fn consume_longhand(
    property: PropertyId,
    range: &mut TokenRange<'_>,
    context: &ParserContext,
) -> Option<CssValue> {
    if property.is_shorthand() || property == PropertyId::Variable {
        return None;
    }
    let value = LonghandParser { property, context }.parse(range);
    trace!(
        target: "css::parser",
        "longhand {} -> {:?}",
        property.name(),
        value.as_ref().map(CssValue::css_text)
    );
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_syntax::tokenize;

    fn longhand(property: PropertyId, text: &str, context: &ParserContext) -> Option<String> {
        let tokens = tokenize(text);
        let mut range = TokenRange::new(&tokens);
        range.consume_whitespace();
        let value = consume_longhand(property, &mut range, context)?;
        range.at_end().then(|| value.css_text())
    }

    fn standard(property: PropertyId, text: &str) -> Option<String> {
        longhand(property, text, &ParserContext::default())
    }

    /// # Panics
    /// Panics if length properties accept values outside their ranges.
    #[test]
    fn length_ranges() {
        assert_eq!(standard(PropertyId::Width, "10px").as_deref(), Some("10px"));
        assert_eq!(standard(PropertyId::Width, "auto").as_deref(), Some("auto"));
        assert!(standard(PropertyId::Width, "-1px").is_none());
        assert!(standard(PropertyId::MaxWidth, "auto").is_none());
        assert_eq!(standard(PropertyId::MarginLeft, "-1em").as_deref(), Some("-1em"));
        assert!(standard(PropertyId::Width, "10").is_none());
        let quirks = ParserContext::new(ParserMode::HtmlQuirks);
        assert_eq!(longhand(PropertyId::Width, "10", &quirks).as_deref(), Some("10px"));
        assert!(longhand(PropertyId::OutlineOffset, "10", &quirks).is_none());
    }

    /// # Panics
    /// Panics if font weights outside the hundreds are accepted.
    #[test]
    fn font_weight() {
        assert_eq!(standard(PropertyId::FontWeight, "700").as_deref(), Some("700"));
        assert_eq!(standard(PropertyId::FontWeight, "bolder").as_deref(), Some("bolder"));
        assert!(standard(PropertyId::FontWeight, "750").is_none());
        assert!(standard(PropertyId::FontWeight, "1000").is_none());
    }

    /// # Panics
    /// Panics if text-indent keywords are not normalized.
    #[test]
    fn text_indent() {
        assert_eq!(
            standard(PropertyId::TextIndent, "hanging 2em each-line").as_deref(),
            Some("2em each-line hanging")
        );
        assert!(standard(PropertyId::TextIndent, "hanging").is_none());
        assert!(standard(PropertyId::TextIndent, "1px 2px").is_none());
    }

    /// # Panics
    /// Panics if individual transform properties are misparsed.
    #[test]
    fn individual_transforms() {
        assert_eq!(standard(PropertyId::Scale, "1 2").as_deref(), Some("1 2"));
        assert_eq!(standard(PropertyId::Rotate, "0 0 1 45deg").as_deref(), Some("0 0 1 45deg"));
        assert_eq!(
            standard(PropertyId::Translate, "10px 20% 5px").as_deref(),
            Some("10px 20% 5px")
        );
        assert!(standard(PropertyId::Scale, "1 2 3 4").is_none());
    }

    /// # Panics
    /// Panics if paint and decoration values are misparsed.
    #[test]
    fn paints_and_decorations() {
        assert_eq!(
            standard(PropertyId::Fill, "url(#grad) red").as_deref(),
            Some("url(\"#grad\") rgb(255, 0, 0)")
        );
        assert_eq!(
            standard(PropertyId::TextDecorationLine, "underline overline").as_deref(),
            Some("underline overline")
        );
        assert!(standard(PropertyId::TextDecorationLine, "underline underline").is_none());
        assert_eq!(standard(PropertyId::BorderSpacing, "2px 2px").as_deref(), Some("2px"));
        assert_eq!(
            standard(PropertyId::OffsetPath, "path('M 0 0 L 10 10')").as_deref(),
            Some("path(\"M 0 0 L 10 10\")")
        );
    }

    /// # Panics
    /// Panics if hashless colors are accepted where they should not be.
    #[test]
    fn quirky_colors_are_per_property() {
        let quirks = ParserContext::new(ParserMode::HtmlQuirks);
        assert_eq!(
            longhand(PropertyId::Color, "ff0000", &quirks).as_deref(),
            Some("rgb(255, 0, 0)")
        );
        assert!(longhand(PropertyId::OutlineColor, "ff0000", &quirks).is_none());
        assert!(standard(PropertyId::Color, "ff0000").is_none());
    }
}
