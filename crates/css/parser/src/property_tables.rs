//! Per-property tables shared by the fast paths and the general property parser.
//!
//! Both parsers consult the same tables, which keeps the fast paths a strict subset of the
//! general grammar for keyword and color properties.

use css_values_units::{PropertyId, ValueId};

const LINE_STYLES: &[ValueId] = &[
    ValueId::None,
    ValueId::Hidden,
    ValueId::Inset,
    ValueId::Groove,
    ValueId::Outset,
    ValueId::Ridge,
    ValueId::Dotted,
    ValueId::Dashed,
    ValueId::Solid,
    ValueId::Double,
];

const OUTLINE_STYLES: &[ValueId] = &[
    ValueId::Auto,
    ValueId::None,
    ValueId::Inset,
    ValueId::Groove,
    ValueId::Outset,
    ValueId::Ridge,
    ValueId::Dotted,
    ValueId::Dashed,
    ValueId::Solid,
    ValueId::Double,
];

const OVERFLOW_VALUES: &[ValueId] = &[
    ValueId::Visible,
    ValueId::Hidden,
    ValueId::Scroll,
    ValueId::Auto,
];

const BLEND_MODES: &[ValueId] = &[
    ValueId::Normal,
    ValueId::Multiply,
    ValueId::Screen,
    ValueId::Overlay,
    ValueId::Darken,
    ValueId::Lighten,
    ValueId::ColorDodge,
    ValueId::ColorBurn,
    ValueId::HardLight,
    ValueId::SoftLight,
    ValueId::Difference,
    ValueId::Exclusion,
    ValueId::Hue,
    ValueId::Saturation,
    ValueId::Color,
    ValueId::Luminosity,
];

/// Keywords accepted by a keyword-only property, CSS-wide keywords excluded.
///
/// Empty for every property whose grammar is more than a single keyword.
pub const fn keyword_values(property: PropertyId) -> &'static [ValueId] {
    match property {
        PropertyId::Display => &[
            ValueId::Inline,
            ValueId::Block,
            ValueId::ListItem,
            ValueId::InlineBlock,
            ValueId::Table,
            ValueId::InlineTable,
            ValueId::TableRowGroup,
            ValueId::TableHeaderGroup,
            ValueId::TableFooterGroup,
            ValueId::TableRow,
            ValueId::TableColumnGroup,
            ValueId::TableColumn,
            ValueId::TableCell,
            ValueId::TableCaption,
            ValueId::Flex,
            ValueId::InlineFlex,
            ValueId::Grid,
            ValueId::InlineGrid,
            ValueId::Contents,
            ValueId::FlowRoot,
            ValueId::None,
        ],
        PropertyId::Position => &[
            ValueId::Static,
            ValueId::Relative,
            ValueId::Absolute,
            ValueId::Fixed,
            ValueId::Sticky,
        ],
        PropertyId::Float => &[ValueId::Left, ValueId::Right, ValueId::None],
        PropertyId::Clear => &[ValueId::None, ValueId::Left, ValueId::Right, ValueId::Both],
        PropertyId::BoxSizing => &[ValueId::ContentBox, ValueId::BorderBox],
        PropertyId::OverflowX | PropertyId::OverflowY => OVERFLOW_VALUES,
        PropertyId::Visibility => &[ValueId::Visible, ValueId::Hidden, ValueId::Collapse],
        PropertyId::BorderTopStyle
        | PropertyId::BorderRightStyle
        | PropertyId::BorderBottomStyle
        | PropertyId::BorderLeftStyle => LINE_STYLES,
        PropertyId::OutlineStyle => OUTLINE_STYLES,
        PropertyId::BorderCollapse => &[ValueId::Separate, ValueId::Collapse],
        PropertyId::TextAlign => &[
            ValueId::Left,
            ValueId::Right,
            ValueId::Center,
            ValueId::Justify,
            ValueId::Start,
            ValueId::End,
        ],
        PropertyId::TextTransform => &[
            ValueId::Capitalize,
            ValueId::Uppercase,
            ValueId::Lowercase,
            ValueId::None,
        ],
        PropertyId::TextOverflow => &[ValueId::Clip, ValueId::Ellipsis],
        PropertyId::TextDecorationStyle => &[
            ValueId::Solid,
            ValueId::Double,
            ValueId::Dotted,
            ValueId::Dashed,
            ValueId::Wavy,
        ],
        PropertyId::WhiteSpace => &[
            ValueId::Normal,
            ValueId::Pre,
            ValueId::PreWrap,
            ValueId::PreLine,
            ValueId::Nowrap,
        ],
        PropertyId::WordBreak => &[
            ValueId::Normal,
            ValueId::BreakAll,
            ValueId::KeepAll,
            ValueId::BreakWord,
        ],
        PropertyId::OverflowWrap => &[ValueId::Normal, ValueId::BreakWord],
        PropertyId::Direction => &[ValueId::Ltr, ValueId::Rtl],
        PropertyId::WritingMode => &[
            ValueId::HorizontalTb,
            ValueId::VerticalRl,
            ValueId::VerticalLr,
        ],
        PropertyId::FontStyle => &[ValueId::Normal, ValueId::Italic, ValueId::Oblique],
        PropertyId::ListStylePosition => &[ValueId::Inside, ValueId::Outside],
        PropertyId::EmptyCells => &[ValueId::Show, ValueId::Hide],
        PropertyId::CaptionSide => &[ValueId::Top, ValueId::Bottom],
        PropertyId::TableLayout => &[ValueId::Auto, ValueId::Fixed],
        PropertyId::FlexDirection => &[
            ValueId::Row,
            ValueId::RowReverse,
            ValueId::Column,
            ValueId::ColumnReverse,
        ],
        PropertyId::FlexWrap => &[ValueId::Nowrap, ValueId::Wrap, ValueId::WrapReverse],
        PropertyId::MixBlendMode => BLEND_MODES,
        PropertyId::Isolation => &[ValueId::Auto, ValueId::Isolate],
        PropertyId::ObjectFit => &[
            ValueId::Fill,
            ValueId::Contain,
            ValueId::Cover,
            ValueId::None,
            ValueId::ScaleDown,
        ],
        PropertyId::Resize => &[
            ValueId::None,
            ValueId::Both,
            ValueId::Horizontal,
            ValueId::Vertical,
        ],
        PropertyId::TransformStyle => &[ValueId::Flat, ValueId::Preserve3d],
        PropertyId::BackfaceVisibility => &[ValueId::Visible, ValueId::Hidden],
        _ => &[],
    }
}

/// Whether the whole grammar of `property` is a single keyword.
pub const fn is_keyword_property_id(property: PropertyId) -> bool {
    !keyword_values(property).is_empty()
}

pub fn is_valid_keyword_property_and_value(property: PropertyId, value: ValueId) -> bool {
    keyword_values(property).contains(&value)
}

/// Properties whose grammar is exactly `<color>`.
pub const fn is_color_property_id(property: PropertyId) -> bool {
    matches!(
        property,
        PropertyId::Color
            | PropertyId::BackgroundColor
            | PropertyId::BorderTopColor
            | PropertyId::BorderRightColor
            | PropertyId::BorderBottomColor
            | PropertyId::BorderLeftColor
            | PropertyId::ColumnRuleColor
            | PropertyId::OutlineColor
            | PropertyId::TextDecorationColor
            | PropertyId::StopColor
            | PropertyId::FloodColor
            | PropertyId::LightingColor
    )
}

/// Color properties that take hashless hex digits in quirks mode.
pub const fn allows_quirky_color(property: PropertyId) -> bool {
    matches!(
        property,
        PropertyId::Color
            | PropertyId::BackgroundColor
            | PropertyId::BorderTopColor
            | PropertyId::BorderRightColor
            | PropertyId::BorderBottomColor
            | PropertyId::BorderLeftColor
    )
}

/// Length properties that take a unitless number as pixels in quirks mode.
pub const fn allows_unitless_quirk(property: PropertyId) -> bool {
    matches!(
        property,
        PropertyId::Width
            | PropertyId::Height
            | PropertyId::MinWidth
            | PropertyId::MinHeight
            | PropertyId::MaxWidth
            | PropertyId::MaxHeight
            | PropertyId::MarginTop
            | PropertyId::MarginRight
            | PropertyId::MarginBottom
            | PropertyId::MarginLeft
            | PropertyId::PaddingTop
            | PropertyId::PaddingRight
            | PropertyId::PaddingBottom
            | PropertyId::PaddingLeft
            | PropertyId::Top
            | PropertyId::Right
            | PropertyId::Bottom
            | PropertyId::Left
            | PropertyId::BorderTopWidth
            | PropertyId::BorderRightWidth
            | PropertyId::BorderBottomWidth
            | PropertyId::BorderLeftWidth
            | PropertyId::FontSize
            | PropertyId::LetterSpacing
            | PropertyId::WordSpacing
            | PropertyId::TextIndent
            | PropertyId::VerticalAlign
            | PropertyId::Clip
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    /// # Panics
    /// Panics if the keyword tables stop matching their property grammars.
    #[test]
    fn keyword_tables_are_per_property() {
        assert!(is_keyword_property_id(PropertyId::Display));
        assert!(!is_keyword_property_id(PropertyId::Width));
        assert!(is_valid_keyword_property_and_value(
            PropertyId::Display,
            ValueId::InlineBlock
        ));
        assert!(!is_valid_keyword_property_and_value(
            PropertyId::Position,
            ValueId::InlineBlock
        ));
        assert!(!is_valid_keyword_property_and_value(
            PropertyId::OutlineStyle,
            ValueId::Hidden
        ));
    }
}
