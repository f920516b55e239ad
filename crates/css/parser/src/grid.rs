//! CSS Grid Layout Module Level 1 — `grid-template-rows` / `grid-template-columns` track lists.
//! Spec: <https://www.w3.org/TR/css-grid-1/#track-sizing>

use crate::consumers::{consume_comma_including_whitespace, consume_function, peek_id};
use css_syntax::{ParserMode, ParserToken, TokenRange};
use css_values_units::{
    CssValue, FunctionValue, GridLineNames, PrimitiveValue, UnitType, UnitlessQuirk, ValueId,
    ValueList, ValueRange, consume_flex, consume_ident, consume_ident_in,
    consume_length_or_percent, consume_positive_integer, function_value_id,
};

/// Upper bound on the number of tracks a grid may hold.
pub const GRID_MAX_TRACKS: u32 = 1_000_000;

/// `[ <custom-ident>* ]`. `span` and `auto` cannot name a line.
fn consume_grid_line_names(range: &mut TokenRange<'_>) -> Option<GridLineNames> {
    if !matches!(range.peek(), ParserToken::LeftBracket) {
        return None;
    }
    let mut after = *range;
    let mut block = after.consume_block();
    block.consume_whitespace();
    let mut names = Vec::new();
    while !block.at_end() {
        let ParserToken::Ident(name) = block.consume_including_whitespace() else {
            return None;
        };
        if name.eq_ignore_ascii_case("span")
            || name.eq_ignore_ascii_case("auto")
            || name.eq_ignore_ascii_case("default")
            || ValueId::from_name(name).is_some_and(ValueId::is_css_wide_keyword)
        {
            return None;
        }
        names.push(name.clone());
    }
    after.consume_whitespace();
    *range = after;
    Some(GridLineNames { names })
}

/// `<track-breadth>`; `fr` values are refused when `allow_flex` is false.
fn consume_grid_breadth(range: &mut TokenRange<'_>, mode: ParserMode, allow_flex: bool) -> Option<PrimitiveValue> {
    if let Some(keyword) = consume_ident_in(range, &[ValueId::MinContent, ValueId::MaxContent, ValueId::Auto]) {
        return Some(keyword);
    }
    if let ParserToken::Dimension { unit, .. } = range.peek()
        && unit.eq_ignore_ascii_case(UnitType::Fraction.suffix())
    {
        return if allow_flex { consume_flex(range) } else { None };
    }
    consume_length_or_percent(range, mode, ValueRange::NonNegative, UnitlessQuirk::Allow)
}

/// `<track-size>`: a breadth or `minmax(<inflexible-breadth>, <track-breadth>)`.
fn consume_grid_track_size(range: &mut TokenRange<'_>, mode: ParserMode) -> Option<CssValue> {
    if function_value_id(range.peek()) != Some(ValueId::Minmax) {
        return consume_grid_breadth(range, mode, true).map(CssValue::Primitive);
    }
    let mut after = *range;
    let mut arguments = consume_function(&mut after);
    let min = consume_grid_breadth(&mut arguments, mode, false)?;
    if !consume_comma_including_whitespace(&mut arguments) {
        return None;
    }
    let max = consume_grid_breadth(&mut arguments, mode, true)?;
    if !arguments.at_end() {
        return None;
    }
    *range = after;
    Some(CssValue::Function(FunctionValue::with_arguments(
        ValueId::Minmax,
        vec![CssValue::Primitive(min), CssValue::Primitive(max)],
    )))
}

/// Track sizes interleaved with optional line names, appended to `list`.
///
/// Returns the number of track sizes consumed.
fn consume_tracks_with_names(range: &mut TokenRange<'_>, mode: ParserMode, list: &mut ValueList) -> Option<u32> {
    if let Some(names) = consume_grid_line_names(range) {
        list.append(CssValue::GridLineNames(names));
    }
    let mut track_count = 0_u32;
    while !range.at_end() && !matches!(range.peek(), ParserToken::Comma) {
        if function_value_id(range.peek()) == Some(ValueId::Repeat) {
            return None;
        }
        list.append(consume_grid_track_size(range, mode)?);
        track_count += 1;
        if let Some(names) = consume_grid_line_names(range) {
            list.append(CssValue::GridLineNames(names));
        }
    }
    Some(track_count)
}

/// `repeat(<positive-integer>, <line-names>? [<track-size> <line-names>?]+)`.
///
/// The repetition count is clamped to the track limit; expansion happens when the style is
/// built.
fn consume_grid_repeat(range: &mut TokenRange<'_>, mode: ParserMode) -> Option<CssValue> {
    let mut after = *range;
    let mut arguments = consume_function(&mut after);
    let count = consume_positive_integer(&mut arguments)?;
    if !consume_comma_including_whitespace(&mut arguments) {
        return None;
    }
    let mut tracks = ValueList::space_separated();
    let track_count = consume_tracks_with_names(&mut arguments, mode, &mut tracks)?;
    if track_count == 0 || !arguments.at_end() {
        return None;
    }
    let repetitions = count.double_value().min(f64::from(GRID_MAX_TRACKS));
    *range = after;
    Some(CssValue::Function(FunctionValue::with_arguments(
        ValueId::Repeat,
        vec![
            CssValue::Primitive(PrimitiveValue::numeric(repetitions, UnitType::Integer)),
            CssValue::ValueList(tracks),
        ],
    )))
}

/// `none | <track-list>`.
pub fn consume_grid_track_list(range: &mut TokenRange<'_>, mode: ParserMode) -> Option<CssValue> {
    if peek_id(range) == Some(ValueId::None) {
        return consume_ident(range).map(CssValue::Primitive);
    }
    let mut list = ValueList::space_separated();
    if let Some(names) = consume_grid_line_names(range) {
        list.append(CssValue::GridLineNames(names));
    }
    let mut seen_track = false;
    while !range.at_end() {
        let track = if function_value_id(range.peek()) == Some(ValueId::Repeat) {
            consume_grid_repeat(range, mode)?
        } else {
            consume_grid_track_size(range, mode)?
        };
        list.append(track);
        seen_track = true;
        if let Some(names) = consume_grid_line_names(range) {
            list.append(CssValue::GridLineNames(names));
        }
    }
    seen_track.then_some(CssValue::ValueList(list))
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_syntax::tokenize;

    fn track_list(text: &str) -> Option<String> {
        let tokens = tokenize(text);
        let mut range = TokenRange::new(&tokens);
        let value = consume_grid_track_list(&mut range, ParserMode::HtmlStandard)?;
        range.at_end().then(|| value.css_text())
    }

    /// # Panics
    /// Panics if track lists are misparsed.
    #[test]
    fn parses_track_lists() {
        assert_eq!(
            track_list("[a] 100px [b c] 1fr minmax(10px, auto)").as_deref(),
            Some("[a] 100px [b c] 1fr minmax(10px, auto)")
        );
        assert_eq!(
            track_list("repeat(2, [x] 10px 20%)").as_deref(),
            Some("repeat(2, [x] 10px 20%)")
        );
        assert!(track_list("minmax(1fr, 10px)").is_none());
        assert!(track_list("[span] 10px").is_none());
        assert!(track_list("repeat(0, 10px)").is_none());
        assert!(track_list("[a]").is_none());
    }

    /// # Panics
    /// Panics if large repetition counts are not clamped.
    #[test]
    fn clamps_repetitions() {
        assert_eq!(
            track_list("repeat(99999999, 1px)").as_deref(),
            Some("repeat(1000000, 1px)")
        );
    }
}
