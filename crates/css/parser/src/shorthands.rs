//! Shorthand properties and their expansion into longhands.

use crate::context::ParserContext;
use crate::longhands::consume_longhand;
use crate::property_set::CssProperty;
use css_syntax::TokenRange;
use css_values_units::{CssValue, PropertyId, ValueId, consume_ident_in};
use log::trace;
use smallvec::SmallVec;

/// Longhand slots filled while a shorthand is parsed, in `longhands()` order.
type LonghandSlots = SmallVec<Option<CssValue>, 4>;

/// Accumulates the longhands a shorthand expands to.
struct ShorthandExpansion<'out> {
    shorthand: PropertyId,
    important: bool,
    out: &'out mut Vec<CssProperty>,
}

impl ShorthandExpansion<'_> {
    fn add(&mut self, longhand: PropertyId, value: CssValue, implicit: bool) {
        self.out.push(CssProperty::expanded(
            longhand,
            Some(self.shorthand),
            value,
            self.important,
            implicit,
        ));
    }

    /// Add every slot, falling back to an implicit `initial` for the ones left empty.
    fn add_slots(&mut self, longhands: &[PropertyId], slots: LonghandSlots) {
        for (longhand, slot) in longhands.iter().zip(slots) {
            match slot {
                Some(value) => self.add(*longhand, value, false),
                None => self.add(*longhand, CssValue::Initial, true),
            }
        }
    }
}

/// Try `property` on a copy of `range`, committing only on success.
fn try_consume_longhand(
    property: PropertyId,
    range: &mut TokenRange<'_>,
    context: &ParserContext,
) -> Option<CssValue> {
    let mut attempt = *range;
    let value = consume_longhand(property, &mut attempt, context)?;
    *range = attempt;
    Some(value)
}

/// One to four side values, expanded with the usual box rules.
///
/// Spec: <https://www.w3.org/TR/css-box-3/#margin-shorthand>
fn consume_4_values(
    longhands: &[PropertyId],
    range: &mut TokenRange<'_>,
    context: &ParserContext,
) -> Option<[CssValue; 4]> {
    let [top_id, right_id, bottom_id, left_id] = longhands else {
        return None;
    };
    let top = consume_longhand(*top_id, range, context)?;
    let Some(right) = consume_longhand(*right_id, range, context) else {
        return Some([top.clone(), top.clone(), top.clone(), top]);
    };
    let Some(bottom) = consume_longhand(*bottom_id, range, context) else {
        return Some([top.clone(), right.clone(), top, right]);
    };
    let left = consume_longhand(*left_id, range, context).unwrap_or_else(|| right.clone());
    Some([top, right, bottom, left])
}

/// Longhands in any order, each at most once. Missing ones are left empty.
fn consume_greedy(
    longhands: &[PropertyId],
    range: &mut TokenRange<'_>,
    context: &ParserContext,
) -> Option<LonghandSlots> {
    let mut slots: LonghandSlots = longhands.iter().map(|_| None).collect();
    while !range.at_end() {
        let mut found = false;
        for (longhand, slot) in longhands.iter().zip(slots.iter_mut()) {
            if slot.is_some() {
                continue;
            }
            if let Some(value) = try_consume_longhand(*longhand, range, context) {
                *slot = Some(value);
                found = true;
                break;
            }
        }
        if !found {
            return None;
        }
    }
    slots.iter().any(Option::is_some).then_some(slots)
}

/// `border`: one side's width, style and color, applied to all four sides.
fn consume_border(
    range: &mut TokenRange<'_>,
    context: &ParserContext,
    expansion: &mut ShorthandExpansion<'_>,
) -> Option<()> {
    let slots = consume_greedy(PropertyId::BorderTop.longhands(), range, context)?;
    let sides = [
        PropertyId::BorderTop,
        PropertyId::BorderRight,
        PropertyId::BorderBottom,
        PropertyId::BorderLeft,
    ];
    let mut per_longhand: [Vec<(PropertyId, Option<CssValue>)>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    for side in sides {
        for ((group, longhand), slot) in per_longhand
            .iter_mut()
            .zip(side.longhands())
            .zip(slots.iter())
        {
            group.push((*longhand, slot.clone()));
        }
    }
    // Widths first, then styles, then colors, matching the longhand table.
    for (longhand, slot) in per_longhand.into_iter().flatten() {
        match slot {
            Some(value) => expansion.add(longhand, value, false),
            None => expansion.add(longhand, CssValue::Initial, true),
        }
    }
    Some(())
}

/// `overflow: <overflow-x> <overflow-y>?`.
fn consume_overflow(
    range: &mut TokenRange<'_>,
    context: &ParserContext,
    expansion: &mut ShorthandExpansion<'_>,
) -> Option<()> {
    let x = consume_longhand(PropertyId::OverflowX, range, context)?;
    let y = if range.at_end() {
        x.clone()
    } else {
        consume_longhand(PropertyId::OverflowY, range, context)?
    };
    expansion.add(PropertyId::OverflowX, x, false);
    expansion.add(PropertyId::OverflowY, y, false);
    Some(())
}

/// Parse `shorthand` from `range` and append its longhands to `out`.
///
/// CSS-wide keywords and `var()` references are handled by the caller. Nothing is appended
/// when the value is invalid.
pub fn parse_shorthand(
    shorthand: PropertyId,
    important: bool,
    range: &mut TokenRange<'_>,
    context: &ParserContext,
    out: &mut Vec<CssProperty>,
) -> bool {
    let mut parsed = Vec::new();
    let mut expansion = ShorthandExpansion {
        shorthand,
        important,
        out: &mut parsed,
    };
    let longhands = shorthand.longhands();
    let result = match shorthand {
        PropertyId::Margin
        | PropertyId::Padding
        | PropertyId::BorderWidth
        | PropertyId::BorderStyle
        | PropertyId::BorderColor => consume_4_values(longhands, range, context).map(|sides| {
            for (longhand, value) in longhands.iter().zip(sides) {
                expansion.add(*longhand, value, false);
            }
        }),
        PropertyId::BorderTop
        | PropertyId::BorderRight
        | PropertyId::BorderBottom
        | PropertyId::BorderLeft
        | PropertyId::Outline => consume_greedy(longhands, range, context)
            .map(|slots| expansion.add_slots(longhands, slots)),
        PropertyId::Border => consume_border(range, context, &mut expansion),
        PropertyId::Overflow => consume_overflow(range, context, &mut expansion),
        _ => None,
    };
    if result.is_none() || !range.at_end() {
        trace!(target: "css::parser", "invalid value for shorthand {}", shorthand.name());
        return false;
    }
    out.append(&mut parsed);
    true
}

/// Expand a CSS-wide keyword to every longhand of `shorthand`.
pub fn add_css_wide_keyword_to_longhands(
    shorthand: PropertyId,
    keyword: &CssValue,
    important: bool,
    out: &mut Vec<CssProperty>,
) {
    let mut expansion = ShorthandExpansion {
        shorthand,
        important,
        out,
    };
    for longhand in shorthand.longhands() {
        expansion.add(*longhand, keyword.clone(), false);
    }
}

/// Whether `range` is exactly one CSS-wide keyword, and which one.
pub fn consume_css_wide_keyword(range: &mut TokenRange<'_>) -> Option<CssValue> {
    let mut attempt = *range;
    let keyword = consume_ident_in(&mut attempt, &[ValueId::Initial, ValueId::Inherit, ValueId::Unset])?;
    if !attempt.at_end() {
        return None;
    }
    *range = attempt;
    keyword.value_id().and_then(CssValue::css_wide)
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_syntax::tokenize;

    fn expand(shorthand: PropertyId, text: &str) -> Option<Vec<(String, String, bool)>> {
        let tokens = tokenize(text);
        let mut range = TokenRange::new(&tokens);
        let mut out = Vec::new();
        if !parse_shorthand(shorthand, false, &mut range, &ParserContext::default(), &mut out) {
            return None;
        }
        Some(
            out.iter()
                .map(|property| {
                    (
                        property.name().to_owned(),
                        property.value().css_text(),
                        property.is_implicit(),
                    )
                })
                .collect(),
        )
    }

    fn values(expanded: Option<Vec<(String, String, bool)>>) -> Vec<String> {
        expanded
            .unwrap_or_default()
            .into_iter()
            .map(|(_, value, _)| value)
            .collect()
    }

    /// # Panics
    /// Panics if the box expansion rules are not applied.
    #[test]
    fn four_value_expansion() {
        assert_eq!(values(expand(PropertyId::Margin, "1px")), ["1px"; 4]);
        assert_eq!(
            values(expand(PropertyId::Margin, "1px 2px")),
            ["1px", "2px", "1px", "2px"]
        );
        assert_eq!(
            values(expand(PropertyId::Padding, "1px 2px 3px")),
            ["1px", "2px", "3px", "2px"]
        );
        assert!(expand(PropertyId::Padding, "1px 2px 3px 4px 5px").is_none());
        assert!(expand(PropertyId::Padding, "-1px").is_none());
    }

    /// # Panics
    /// Panics if omitted border components are not implicit initial values.
    #[test]
    fn border_side_is_order_independent() {
        let expanded = expand(PropertyId::BorderTop, "red 2px").unwrap_or_default();
        assert_eq!(expanded.len(), 3);
        assert!(expanded.iter().any(|(name, value, implicit)| {
            name == "border-top-style" && value == "initial" && *implicit
        }));
        assert!(expanded.iter().any(|(name, value, implicit)| {
            name == "border-top-color" && value == "rgb(255, 0, 0)" && !*implicit
        }));
        assert!(expand(PropertyId::BorderTop, "solid solid").is_none());
    }

    /// # Panics
    /// Panics if `border` does not expand to all twelve longhands.
    #[test]
    fn border_applies_to_every_side() {
        let expanded = expand(PropertyId::Border, "1px solid").unwrap_or_default();
        assert_eq!(expanded.len(), 12);
        assert_eq!(
            expanded.iter().filter(|(_, value, _)| value == "solid").count(),
            4
        );
        assert_eq!(expanded.iter().filter(|(_, _, implicit)| *implicit).count(), 4);
    }

    /// # Panics
    /// Panics if `overflow` does not duplicate a single keyword.
    #[test]
    fn overflow_pair() {
        assert_eq!(values(expand(PropertyId::Overflow, "hidden")), ["hidden", "hidden"]);
        assert_eq!(values(expand(PropertyId::Overflow, "auto scroll")), ["auto", "scroll"]);
    }
}
