//! Property identifiers, inheritance and shorthand expansion tables.

use once_cell::sync::Lazy;
use std::collections::HashMap;

// Generates the property enum with its name and inherited flag.
macro_rules! property_ids {
    ($($property:ident => $name:literal, $inherited:literal;)*) => {
        /// Every property the parser and style builder know about.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum PropertyId {
            $($property,)*
        }

        impl PropertyId {
            pub const ALL: &'static [Self] = &[$(Self::$property,)*];

            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$property => $name,)*
                }
            }

            /// Whether the property inherits by default.
            pub const fn is_inherited(self) -> bool {
                match self {
                    $(Self::$property => $inherited,)*
                }
            }
        }
    };
}

property_ids! {
    // Custom properties (`--*`) share one id; the declaration carries the name.
    Variable => "--*", true;

    // Colors
    Color => "color", true;
    BackgroundColor => "background-color", false;
    BorderTopColor => "border-top-color", false;
    BorderRightColor => "border-right-color", false;
    BorderBottomColor => "border-bottom-color", false;
    BorderLeftColor => "border-left-color", false;
    CaretColor => "caret-color", true;
    ColumnRuleColor => "column-rule-color", false;
    OutlineColor => "outline-color", false;
    TextDecorationColor => "text-decoration-color", false;
    Fill => "fill", true;
    Stroke => "stroke", true;
    StopColor => "stop-color", false;
    FloodColor => "flood-color", false;
    LightingColor => "lighting-color", false;

    // Backgrounds and borders
    BackgroundImage => "background-image", false;
    BorderTopStyle => "border-top-style", false;
    BorderRightStyle => "border-right-style", false;
    BorderBottomStyle => "border-bottom-style", false;
    BorderLeftStyle => "border-left-style", false;
    BorderTopWidth => "border-top-width", false;
    BorderRightWidth => "border-right-width", false;
    BorderBottomWidth => "border-bottom-width", false;
    BorderLeftWidth => "border-left-width", false;
    BorderSpacing => "border-spacing", true;
    BorderCollapse => "border-collapse", true;
    OutlineStyle => "outline-style", false;
    OutlineWidth => "outline-width", false;
    OutlineOffset => "outline-offset", false;
    BoxShadow => "box-shadow", false;

    // Box model and positioning
    Width => "width", false;
    Height => "height", false;
    MinWidth => "min-width", false;
    MinHeight => "min-height", false;
    MaxWidth => "max-width", false;
    MaxHeight => "max-height", false;
    MarginTop => "margin-top", false;
    MarginRight => "margin-right", false;
    MarginBottom => "margin-bottom", false;
    MarginLeft => "margin-left", false;
    PaddingTop => "padding-top", false;
    PaddingRight => "padding-right", false;
    PaddingBottom => "padding-bottom", false;
    PaddingLeft => "padding-left", false;
    Top => "top", false;
    Right => "right", false;
    Bottom => "bottom", false;
    Left => "left", false;
    Display => "display", false;
    Position => "position", false;
    Float => "float", false;
    Clear => "clear", false;
    BoxSizing => "box-sizing", false;
    OverflowX => "overflow-x", false;
    OverflowY => "overflow-y", false;
    Visibility => "visibility", true;
    ZIndex => "z-index", false;
    Clip => "clip", false;
    VerticalAlign => "vertical-align", false;

    // Fonts and text
    FontSize => "font-size", true;
    FontWeight => "font-weight", true;
    FontStyle => "font-style", true;
    LineHeight => "line-height", true;
    LetterSpacing => "letter-spacing", true;
    WordSpacing => "word-spacing", true;
    TextIndent => "text-indent", true;
    TextAlign => "text-align", true;
    TextTransform => "text-transform", true;
    TextShadow => "text-shadow", true;
    TextOverflow => "text-overflow", false;
    TextDecorationLine => "text-decoration-line", false;
    TextDecorationStyle => "text-decoration-style", false;
    WhiteSpace => "white-space", true;
    WordBreak => "word-break", true;
    OverflowWrap => "overflow-wrap", true;
    Direction => "direction", true;
    WritingMode => "writing-mode", true;

    // Lists and tables
    ListStylePosition => "list-style-position", true;
    EmptyCells => "empty-cells", true;
    CaptionSide => "caption-side", true;
    TableLayout => "table-layout", false;

    // Flexbox and grid
    FlexDirection => "flex-direction", false;
    FlexWrap => "flex-wrap", false;
    FlexGrow => "flex-grow", false;
    FlexShrink => "flex-shrink", false;
    Order => "order", false;
    ColumnGap => "column-gap", false;
    RowGap => "row-gap", false;
    GridTemplateColumns => "grid-template-columns", false;
    GridTemplateRows => "grid-template-rows", false;

    // Effects and transforms
    Opacity => "opacity", false;
    Filter => "filter", false;
    MixBlendMode => "mix-blend-mode", false;
    Isolation => "isolation", false;
    ObjectFit => "object-fit", false;
    Resize => "resize", false;
    Transform => "transform", false;
    TransformOrigin => "transform-origin", false;
    TransformStyle => "transform-style", false;
    BackfaceVisibility => "backface-visibility", false;
    Perspective => "perspective", false;
    Scale => "scale", false;
    Rotate => "rotate", false;
    Translate => "translate", false;
    OffsetPath => "offset-path", false;

    // Shorthands
    Margin => "margin", false;
    Padding => "padding", false;
    BorderWidth => "border-width", false;
    BorderStyle => "border-style", false;
    BorderColor => "border-color", false;
    Border => "border", false;
    BorderTop => "border-top", false;
    BorderRight => "border-right", false;
    BorderBottom => "border-bottom", false;
    BorderLeft => "border-left", false;
    Outline => "outline", false;
    Overflow => "overflow", false;
}

static PROPERTY_IDS_BY_NAME: Lazy<HashMap<&'static str, PropertyId>> = Lazy::new(|| {
    PropertyId::ALL
        .iter()
        .filter(|id| **id != PropertyId::Variable)
        .map(|id| (id.name(), *id))
        .collect()
});

impl PropertyId {
    /// Case-insensitive property lookup. Custom properties are not looked up here.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.bytes().any(|byte_val| byte_val.is_ascii_uppercase()) {
            return PROPERTY_IDS_BY_NAME
                .get(name.to_ascii_lowercase().as_str())
                .copied();
        }
        PROPERTY_IDS_BY_NAME.get(name).copied()
    }

    /// Dense index, used by the packed declaration metadata.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn is_shorthand(self) -> bool {
        !self.longhands().is_empty()
    }

    /// Longhands set by a shorthand, in serialization order. Empty for longhands.
    pub const fn longhands(self) -> &'static [Self] {
        match self {
            Self::Margin => &[
                Self::MarginTop,
                Self::MarginRight,
                Self::MarginBottom,
                Self::MarginLeft,
            ],
            Self::Padding => &[
                Self::PaddingTop,
                Self::PaddingRight,
                Self::PaddingBottom,
                Self::PaddingLeft,
            ],
            Self::BorderWidth => &[
                Self::BorderTopWidth,
                Self::BorderRightWidth,
                Self::BorderBottomWidth,
                Self::BorderLeftWidth,
            ],
            Self::BorderStyle => &[
                Self::BorderTopStyle,
                Self::BorderRightStyle,
                Self::BorderBottomStyle,
                Self::BorderLeftStyle,
            ],
            Self::BorderColor => &[
                Self::BorderTopColor,
                Self::BorderRightColor,
                Self::BorderBottomColor,
                Self::BorderLeftColor,
            ],
            Self::Border => &[
                Self::BorderTopWidth,
                Self::BorderRightWidth,
                Self::BorderBottomWidth,
                Self::BorderLeftWidth,
                Self::BorderTopStyle,
                Self::BorderRightStyle,
                Self::BorderBottomStyle,
                Self::BorderLeftStyle,
                Self::BorderTopColor,
                Self::BorderRightColor,
                Self::BorderBottomColor,
                Self::BorderLeftColor,
            ],
            Self::BorderTop => &[Self::BorderTopWidth, Self::BorderTopStyle, Self::BorderTopColor],
            Self::BorderRight => &[
                Self::BorderRightWidth,
                Self::BorderRightStyle,
                Self::BorderRightColor,
            ],
            Self::BorderBottom => &[
                Self::BorderBottomWidth,
                Self::BorderBottomStyle,
                Self::BorderBottomColor,
            ],
            Self::BorderLeft => &[
                Self::BorderLeftWidth,
                Self::BorderLeftStyle,
                Self::BorderLeftColor,
            ],
            Self::Outline => &[Self::OutlineColor, Self::OutlineStyle, Self::OutlineWidth],
            Self::Overflow => &[Self::OverflowX, Self::OverflowY],
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// # Panics
    /// Panics if names and indices do not round-trip.
    #[test]
    fn names_and_indices_round_trip() {
        for id in PropertyId::ALL {
            assert_eq!(PropertyId::from_index(id.index()), Some(*id));
            if *id != PropertyId::Variable {
                assert_eq!(PropertyId::from_name(id.name()), Some(*id));
            }
        }
        assert_eq!(PropertyId::from_name("Background-Color"), Some(PropertyId::BackgroundColor));
    }

    /// # Panics
    /// Panics if shorthand tables change shape.
    #[test]
    fn shorthands_expand() {
        assert!(PropertyId::Margin.is_shorthand());
        assert!(!PropertyId::Width.is_shorthand());
        assert_eq!(PropertyId::Border.longhands().len(), 12);
        assert!(PropertyId::Color.is_inherited());
        assert!(!PropertyId::Width.is_inherited());
    }
}
