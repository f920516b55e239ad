//! Consumers for multi-token values shared by several properties: shadows, images,
//! transform and filter functions, positions and `rect()`.

use css_syntax::{ParserMode, ParserToken, TokenRange};
use css_values_units::{
    CrossFadeValue, CssValue, FunctionValue, ImageValue, PrimitiveValue, RectValue, ShadowValue,
    UnitType, UnitlessQuirk, ValueId, ValueList, ValueListSeparator, ValueRange, consume_angle, consume_color,
    consume_ident, consume_ident_in, consume_length, consume_length_or_percent, consume_number,
    consume_percent, consume_url, function_value_id, token_value_id,
};

/// Consume a comma and the whitespace after it.
pub fn consume_comma_including_whitespace(range: &mut TokenRange<'_>) -> bool {
    if !matches!(range.peek(), ParserToken::Comma) {
        return false;
    }
    range.consume_including_whitespace();
    true
}

/// Consume a function token and its block, returning the arguments with leading whitespace
/// skipped.
pub fn consume_function<'tokens>(range: &mut TokenRange<'tokens>) -> TokenRange<'tokens> {
    let mut arguments = range.consume_block();
    arguments.consume_whitespace();
    range.consume_whitespace();
    arguments
}

pub fn peek_id(range: &TokenRange<'_>) -> Option<ValueId> {
    token_value_id(range.peek())
}

/// One `<shadow>`: `inset? && <length>{2,4} && <color>?`.
///
/// `text-shadow` and `drop-shadow()` allow neither `inset` nor a spread distance.
pub fn consume_single_shadow(
    range: &mut TokenRange<'_>,
    mode: ParserMode,
    allow_inset_and_spread: bool,
) -> Option<ShadowValue> {
    if range.at_end() {
        return None;
    }
    let mut inset = false;
    if peek_id(range) == Some(ValueId::Inset) {
        if !allow_inset_and_spread {
            return None;
        }
        range.consume_including_whitespace();
        inset = true;
    }
    let mut color = consume_color(range, false);
    let x = consume_length(range, mode, ValueRange::All, UnitlessQuirk::Forbid)?;
    let y = consume_length(range, mode, ValueRange::All, UnitlessQuirk::Forbid)?;
    let blur = consume_length(range, mode, ValueRange::All, UnitlessQuirk::Forbid);
    let mut spread = None;
    if let Some(blur_radius) = &blur {
        if blur_radius.double_value() < 0.0 {
            return None;
        }
        if allow_inset_and_spread {
            spread = consume_length(range, mode, ValueRange::All, UnitlessQuirk::Forbid);
        }
    }
    if !range.at_end() {
        if color.is_none() {
            color = consume_color(range, false);
        }
        if peek_id(range) == Some(ValueId::Inset) {
            if !allow_inset_and_spread || inset {
                return None;
            }
            range.consume_including_whitespace();
            inset = true;
        }
    }
    Some(ShadowValue {
        x,
        y,
        blur,
        spread,
        color,
        inset,
    })
}

/// `none | <shadow>#`.
pub fn consume_shadow(range: &mut TokenRange<'_>, mode: ParserMode, is_box_shadow: bool) -> Option<CssValue> {
    if peek_id(range) == Some(ValueId::None) {
        return consume_ident(range).map(CssValue::Primitive);
    }
    let mut shadows = ValueList::comma_separated();
    loop {
        let shadow = consume_single_shadow(range, mode, is_box_shadow)?;
        shadows.append(CssValue::Shadow(Box::new(shadow)));
        if !consume_comma_including_whitespace(range) {
            break;
        }
    }
    Some(CssValue::ValueList(shadows))
}

/// `-webkit-cross-fade(<image>, <image>, <percentage> | <number>)`.
///
/// The blend amount is stored as a number in `[0, 1]`.
fn consume_cross_fade(range: &mut TokenRange<'_>) -> Option<CssValue> {
    let mut after = *range;
    let mut arguments = consume_function(&mut after);
    let from = consume_image(&mut arguments)?;
    if !consume_comma_including_whitespace(&mut arguments) {
        return None;
    }
    let to = consume_image(&mut arguments)?;
    if !consume_comma_including_whitespace(&mut arguments) {
        return None;
    }
    let amount = if let Some(percent) = consume_percent(&mut arguments, ValueRange::All) {
        percent.double_value() / 100.0
    } else {
        consume_number(&mut arguments, ValueRange::All)?.double_value()
    };
    if !arguments.at_end() {
        return None;
    }
    *range = after;
    Some(CssValue::CrossFade(Box::new(CrossFadeValue {
        from,
        to,
        percentage: PrimitiveValue::numeric(amount.clamp(0.0, 1.0), UnitType::Number),
    })))
}

/// `<image>`: a URL or a cross-fade of two images.
pub fn consume_image(range: &mut TokenRange<'_>) -> Option<CssValue> {
    if function_value_id(range.peek()) == Some(ValueId::WebkitCrossFade) {
        return consume_cross_fade(range);
    }
    consume_url(range).map(|url| CssValue::Image(ImageValue { url }))
}

/// `[ none | <image> ]#`; a lone `none` stays a keyword.
pub fn consume_image_list(range: &mut TokenRange<'_>) -> Option<CssValue> {
    let mut images = ValueList::comma_separated();
    loop {
        let layer = if peek_id(range) == Some(ValueId::None) {
            CssValue::Primitive(consume_ident(range)?)
        } else {
            consume_image(range)?
        };
        images.append(layer);
        if !consume_comma_including_whitespace(range) {
            break;
        }
    }
    if let [layer] = images.values()
        && layer.value_id() == Some(ValueId::None)
    {
        return Some(layer.clone());
    }
    Some(CssValue::ValueList(images))
}

fn consume_numbers(arguments: &mut TokenRange<'_>, values: &mut Vec<CssValue>, count: usize) -> Option<()> {
    for remaining in (0..count).rev() {
        values.push(CssValue::Primitive(consume_number(arguments, ValueRange::All)?));
        if remaining > 0 && !consume_comma_including_whitespace(arguments) {
            return None;
        }
    }
    Some(())
}

/// Consume `first` and, for the two-argument form, a comma and `second`.
fn consume_one_or_two(
    arguments: &mut TokenRange<'_>,
    values: &mut Vec<CssValue>,
    allow_second: bool,
    mut consume: impl FnMut(&mut TokenRange<'_>) -> Option<PrimitiveValue>,
) -> Option<()> {
    values.push(CssValue::Primitive(consume(arguments)?));
    if allow_second && consume_comma_including_whitespace(arguments) {
        values.push(CssValue::Primitive(consume(arguments)?));
    }
    Some(())
}

/// One `<transform-function>`.
///
/// Spec: <https://www.w3.org/TR/css-transforms-1/#transform-functions>
pub fn consume_transform_function(range: &mut TokenRange<'_>, mode: ParserMode) -> Option<CssValue> {
    let name = function_value_id(range.peek())?;
    let mut after = *range;
    let mut arguments = consume_function(&mut after);
    if arguments.at_end() {
        return None;
    }
    let length_or_percent = |arguments: &mut TokenRange<'_>| {
        consume_length_or_percent(arguments, mode, ValueRange::All, UnitlessQuirk::Forbid)
    };
    let mut values = Vec::new();
    match name {
        ValueId::Rotate
        | ValueId::RotateX
        | ValueId::RotateY
        | ValueId::RotateZ
        | ValueId::SkewX
        | ValueId::SkewY
        | ValueId::Skew => {
            consume_one_or_two(&mut arguments, &mut values, name == ValueId::Skew, consume_angle)?;
        }
        ValueId::ScaleX | ValueId::ScaleY | ValueId::ScaleZ | ValueId::Scale => {
            consume_one_or_two(&mut arguments, &mut values, name == ValueId::Scale, |arguments| {
                consume_number(arguments, ValueRange::All)
            })?;
        }
        ValueId::Perspective => {
            let depth = consume_length(&mut arguments, mode, ValueRange::NonNegative, UnitlessQuirk::Forbid)?;
            values.push(CssValue::Primitive(depth));
        }
        ValueId::TranslateX | ValueId::TranslateY | ValueId::Translate => {
            consume_one_or_two(
                &mut arguments,
                &mut values,
                name == ValueId::Translate,
                length_or_percent,
            )?;
        }
        ValueId::TranslateZ => {
            let depth = consume_length(&mut arguments, mode, ValueRange::All, UnitlessQuirk::Forbid)?;
            values.push(CssValue::Primitive(depth));
        }
        ValueId::Matrix => consume_numbers(&mut arguments, &mut values, 6)?,
        ValueId::Matrix3d => consume_numbers(&mut arguments, &mut values, 16)?,
        ValueId::Scale3d => consume_numbers(&mut arguments, &mut values, 3)?,
        ValueId::Rotate3d => {
            consume_numbers(&mut arguments, &mut values, 3)?;
            if !consume_comma_including_whitespace(&mut arguments) {
                return None;
            }
            values.push(CssValue::Primitive(consume_angle(&mut arguments)?));
        }
        ValueId::Translate3d => {
            values.push(CssValue::Primitive(length_or_percent(&mut arguments)?));
            if !consume_comma_including_whitespace(&mut arguments) {
                return None;
            }
            values.push(CssValue::Primitive(length_or_percent(&mut arguments)?));
            if !consume_comma_including_whitespace(&mut arguments) {
                return None;
            }
            let depth = consume_length(&mut arguments, mode, ValueRange::All, UnitlessQuirk::Forbid)?;
            values.push(CssValue::Primitive(depth));
        }
        _ => return None,
    }
    if !arguments.at_end() {
        return None;
    }
    *range = after;
    Some(CssValue::Function(FunctionValue::with_arguments(name, values)))
}

/// `none | <transform-function>+`.
pub fn consume_transform(range: &mut TokenRange<'_>, mode: ParserMode) -> Option<CssValue> {
    if peek_id(range) == Some(ValueId::None) {
        return consume_ident(range).map(CssValue::Primitive);
    }
    let mut functions = ValueList::space_separated();
    while !range.at_end() {
        functions.append(consume_transform_function(range, mode)?);
    }
    (!functions.is_empty()).then_some(CssValue::ValueList(functions))
}

/// Whether a filter amount above one (or 100%) is clamped down to it.
const fn filter_amount_is_capped(filter: ValueId) -> bool {
    matches!(
        filter,
        ValueId::Grayscale | ValueId::Invert | ValueId::Opacity | ValueId::Sepia
    )
}

/// One `<filter-function>`. Omitted arguments are left empty and take the function's
/// default at computed-value time.
///
/// Spec: <https://www.w3.org/TR/filter-effects-1/#filter-functions>
pub fn consume_filter_function(range: &mut TokenRange<'_>, mode: ParserMode) -> Option<CssValue> {
    let name = function_value_id(range.peek())?;
    if !matches!(
        name,
        ValueId::Blur
            | ValueId::Brightness
            | ValueId::Contrast
            | ValueId::DropShadow
            | ValueId::Grayscale
            | ValueId::HueRotate
            | ValueId::Invert
            | ValueId::Opacity
            | ValueId::Saturate
            | ValueId::Sepia
    ) {
        return None;
    }
    let mut after = *range;
    let mut arguments = consume_function(&mut after);
    let mut values = Vec::with_capacity(1);
    if name == ValueId::DropShadow {
        let shadow = consume_single_shadow(&mut arguments, mode, false)?;
        values.push(CssValue::Shadow(Box::new(shadow)));
    } else if !arguments.at_end() {
        let amount = match name {
            ValueId::HueRotate => consume_angle(&mut arguments)?,
            ValueId::Blur => consume_length(
                &mut arguments,
                ParserMode::HtmlStandard,
                ValueRange::NonNegative,
                UnitlessQuirk::Forbid,
            )?,
            _ => {
                let amount = consume_percent(&mut arguments, ValueRange::NonNegative)
                    .or_else(|| consume_number(&mut arguments, ValueRange::NonNegative))?;
                let maximum = if amount.is_percentage() { 100.0 } else { 1.0 };
                if filter_amount_is_capped(name) && amount.double_value() > maximum {
                    PrimitiveValue::numeric(maximum, amount.unit_type())
                } else {
                    amount
                }
            }
        };
        values.push(CssValue::Primitive(amount));
    }
    if !arguments.at_end() {
        return None;
    }
    *range = after;
    Some(CssValue::Function(FunctionValue::with_arguments(name, values)))
}

/// `none | [ <filter-function> | <url> ]+`.
pub fn consume_filter(range: &mut TokenRange<'_>, mode: ParserMode) -> Option<CssValue> {
    if peek_id(range) == Some(ValueId::None) {
        return consume_ident(range).map(CssValue::Primitive);
    }
    let mut filters = ValueList::space_separated();
    while !range.at_end() {
        let filter = match consume_url(range) {
            Some(url) => CssValue::Primitive(PrimitiveValue::uri(url)),
            None => consume_filter_function(range, mode)?,
        };
        filters.append(filter);
    }
    (!filters.is_empty()).then_some(CssValue::ValueList(filters))
}

fn consume_position_component(range: &mut TokenRange<'_>, mode: ParserMode) -> Option<PrimitiveValue> {
    consume_ident_in(
        range,
        &[
            ValueId::Left,
            ValueId::Right,
            ValueId::Top,
            ValueId::Bottom,
            ValueId::Center,
        ],
    )
    .or_else(|| consume_length_or_percent(range, mode, ValueRange::All, UnitlessQuirk::Forbid))
}

const fn is_vertical_keyword(value: &PrimitiveValue) -> bool {
    matches!(value.value_id(), Some(ValueId::Top | ValueId::Bottom))
}

const fn is_horizontal_keyword(value: &PrimitiveValue) -> bool {
    matches!(value.value_id(), Some(ValueId::Left | ValueId::Right))
}

/// One or two position components, returned as `(x, y)` with `center` filled in.
pub fn consume_one_or_two_valued_position(
    range: &mut TokenRange<'_>,
    mode: ParserMode,
) -> Option<(PrimitiveValue, PrimitiveValue)> {
    let first = consume_position_component(range, mode)?;
    let Some(second) = consume_position_component(range, mode) else {
        let center = PrimitiveValue::identifier(ValueId::Center);
        if is_vertical_keyword(&first) {
            return Some((center, first));
        }
        return Some((first, center));
    };
    let (x, y) = if is_vertical_keyword(&first) || is_horizontal_keyword(&second) {
        (second, first)
    } else {
        (first, second)
    };
    if is_vertical_keyword(&x) || is_horizontal_keyword(&y) {
        return None;
    }
    Some((x, y))
}

/// `transform-origin`: a position and an optional depth, always stored as three values.
pub fn consume_transform_origin(range: &mut TokenRange<'_>, mode: ParserMode) -> Option<CssValue> {
    let (x, y) = consume_one_or_two_valued_position(range, mode)?;
    let z = consume_length(range, mode, ValueRange::All, UnitlessQuirk::Forbid)
        .unwrap_or_else(|| PrimitiveValue::numeric(0.0, UnitType::Pixels));
    let values = [x, y, z].into_iter().map(CssValue::Primitive).collect();
    Some(CssValue::ValueList(ValueList::from_values(ValueListSeparator::Space, values)))
}

fn consume_clip_component(range: &mut TokenRange<'_>, mode: ParserMode) -> Option<PrimitiveValue> {
    if peek_id(range) == Some(ValueId::Auto) {
        return consume_ident(range);
    }
    consume_length(range, mode, ValueRange::All, UnitlessQuirk::Allow)
}

/// `auto | rect(<top>, <right>, <bottom>, <left>)`; the commas may be omitted.
pub fn consume_clip(range: &mut TokenRange<'_>, mode: ParserMode) -> Option<CssValue> {
    if peek_id(range) == Some(ValueId::Auto) {
        return consume_ident(range).map(CssValue::Primitive);
    }
    if function_value_id(range.peek()) != Some(ValueId::Rect) {
        return None;
    }
    let mut after = *range;
    let mut arguments = consume_function(&mut after);
    let top = consume_clip_component(&mut arguments, mode)?;
    let needs_comma = consume_comma_including_whitespace(&mut arguments);
    let right = consume_clip_component(&mut arguments, mode)?;
    if needs_comma && !consume_comma_including_whitespace(&mut arguments) {
        return None;
    }
    let bottom = consume_clip_component(&mut arguments, mode)?;
    if needs_comma && !consume_comma_including_whitespace(&mut arguments) {
        return None;
    }
    let left = consume_clip_component(&mut arguments, mode)?;
    if !arguments.at_end() {
        return None;
    }
    *range = after;
    Some(CssValue::Primitive(PrimitiveValue::rect(RectValue {
        top,
        right,
        bottom,
        left,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_syntax::tokenize;

    fn parse_whole(text: &str, consume: impl Fn(&mut TokenRange<'_>) -> Option<CssValue>) -> Option<String> {
        let tokens = tokenize(text);
        let mut range = TokenRange::new(&tokens);
        let value = consume(&mut range)?;
        range.at_end().then(|| value.css_text())
    }

    /// # Panics
    /// Panics if shadow components are accepted in the wrong places.
    #[test]
    fn shadows() {
        let box_shadow = |range: &mut TokenRange<'_>| consume_shadow(range, ParserMode::HtmlStandard, true);
        assert_eq!(
            parse_whole("inset 1px 2px 3px 4px red, 0 0 blue", box_shadow).as_deref(),
            Some("red 1px 2px 3px 4px inset, blue 0px 0px")
        );
        assert!(parse_whole("1px 2px -3px", box_shadow).is_none());
        assert!(parse_whole("inset 1px 2px inset", box_shadow).is_none());
        let text_shadow = |range: &mut TokenRange<'_>| consume_shadow(range, ParserMode::HtmlStandard, false);
        assert!(parse_whole("1px 2px 3px 4px", text_shadow).is_none());
    }

    /// # Panics
    /// Panics if transform functions take the wrong argument shapes.
    #[test]
    fn transform_functions() {
        let transform = |range: &mut TokenRange<'_>| consume_transform(range, ParserMode::HtmlStandard);
        assert_eq!(
            parse_whole("rotate(45deg) skew(10deg, 0) translate( 10px )", transform).as_deref(),
            Some("rotate(45deg) skew(10deg, 0deg) translate(10px)")
        );
        assert_eq!(
            parse_whole("rotate3d(0, 0, 1, 0.25turn)", transform).as_deref(),
            Some("rotate3d(0, 0, 1, 0.25turn)")
        );
        assert!(parse_whole("matrix(1, 0, 0, 1, 0)", transform).is_none());
        assert!(parse_whole("translatez(10%)", transform).is_none());
        assert!(parse_whole("rotate()", transform).is_none());
    }

    /// # Panics
    /// Panics if filter amounts are not clamped or defaults are filled in at parse time.
    #[test]
    fn filter_functions() {
        let filter = |range: &mut TokenRange<'_>| consume_filter(range, ParserMode::HtmlStandard);
        assert_eq!(
            parse_whole("grayscale(150%) brightness(2) blur()", filter).as_deref(),
            Some("grayscale(100%) brightness(2) blur()")
        );
        assert_eq!(
            parse_whole("drop-shadow(1px 1px red)", filter).as_deref(),
            Some("drop-shadow(red 1px 1px)")
        );
        assert!(parse_whole("blur(-1px)", filter).is_none());
        assert!(parse_whole("drop-shadow(1px 1px 1px 1px)", filter).is_none());
    }

    /// # Panics
    /// Panics if `rect()` forms are misparsed.
    #[test]
    fn clip_rect() {
        let clip = |range: &mut TokenRange<'_>| consume_clip(range, ParserMode::HtmlStandard);
        assert_eq!(
            parse_whole("rect(auto, 10px, auto, 5px)", clip).as_deref(),
            Some("rect(auto, 10px, auto, 5px)")
        );
        assert_eq!(
            parse_whole("rect(1px 2px 3px 4px)", clip).as_deref(),
            Some("rect(1px, 2px, 3px, 4px)")
        );
        assert!(parse_whole("rect(1px, 2px 3px, 4px)", clip).is_none());
    }

    /// # Panics
    /// Panics if position keywords are not ordered into x and y.
    #[test]
    fn transform_origin_order() {
        let origin = |range: &mut TokenRange<'_>| consume_transform_origin(range, ParserMode::HtmlStandard);
        assert_eq!(parse_whole("top left", origin).as_deref(), Some("left top 0px"));
        assert_eq!(parse_whole("bottom", origin).as_deref(), Some("center bottom 0px"));
        assert_eq!(parse_whole("10px 20% 3px", origin).as_deref(), Some("10px 20% 3px"));
        assert!(parse_whole("left right", origin).is_none());
    }

    /// # Panics
    /// Panics if cross-fade amounts are not normalized.
    #[test]
    fn cross_fade_images() {
        let images = consume_image_list;
        assert_eq!(
            parse_whole("-webkit-cross-fade(url(a.png), url(b.png), 25%)", images).as_deref(),
            Some("-webkit-cross-fade(url(\"a.png\"), url(\"b.png\"), 0.25)")
        );
        assert_eq!(
            parse_whole("url(a.png), none", images).as_deref(),
            Some("url(\"a.png\"), none")
        );
        assert_eq!(parse_whole("none", images).as_deref(), Some("none"));
        assert!(parse_whole("none none", images).is_none());
        assert!(parse_whole("url(a.png),", images).is_none());
    }
}
