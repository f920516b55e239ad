//! CSS Values and Units Module Level 3 — §3 Textual data types: keywords and identifiers.
//! Spec: <https://www.w3.org/TR/css-values-3/#textual-values>

use crate::primitive_value::PrimitiveValue;
use css_syntax::{ParserToken, TokenRange};
use once_cell::sync::Lazy;
use std::collections::HashMap;

// Generates the keyword enum, its canonical names and the RGB payload of named colors.
macro_rules! value_ids {
    (
        keywords { $($keyword:ident => $keyword_name:literal,)* }
        colors { $($color:ident => $color_name:literal : $rgb:literal,)* }
    ) => {
        /// Every keyword the parser recognizes. Names are lowercase.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum ValueId {
            $($keyword,)*
            $($color,)*
        }

        impl ValueId {
            pub const ALL: &'static [Self] = &[$(Self::$keyword,)* $(Self::$color,)*];

            /// Canonical (lowercase) spelling.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$keyword => $keyword_name,)*
                    $(Self::$color => $color_name,)*
                }
            }

            /// `0xRRGGBB` for named color keywords.
            pub const fn named_color_rgb(self) -> Option<u32> {
                match self {
                    $(Self::$color => Some($rgb),)*
                    _ => None,
                }
            }
        }
    };
}

value_ids! {
    keywords {
        // CSS-wide
        Initial => "initial",
        Inherit => "inherit",
        Unset => "unset",

        // Common
        Auto => "auto",
        None => "none",
        Normal => "normal",

        // Display
        Inline => "inline",
        Block => "block",
        ListItem => "list-item",
        InlineBlock => "inline-block",
        Table => "table",
        InlineTable => "inline-table",
        TableRowGroup => "table-row-group",
        TableHeaderGroup => "table-header-group",
        TableFooterGroup => "table-footer-group",
        TableRow => "table-row",
        TableColumnGroup => "table-column-group",
        TableColumn => "table-column",
        TableCell => "table-cell",
        TableCaption => "table-caption",
        Flex => "flex",
        InlineFlex => "inline-flex",
        Grid => "grid",
        InlineGrid => "inline-grid",
        Contents => "contents",
        FlowRoot => "flow-root",

        // Position
        Static => "static",
        Relative => "relative",
        Absolute => "absolute",
        Fixed => "fixed",
        Sticky => "sticky",

        // Sides and alignment
        Left => "left",
        Right => "right",
        Top => "top",
        Bottom => "bottom",
        Center => "center",
        Both => "both",
        Start => "start",
        End => "end",
        Justify => "justify",

        // Visibility and overflow
        Visible => "visible",
        Hidden => "hidden",
        Collapse => "collapse",
        Scroll => "scroll",

        // Boxes
        ContentBox => "content-box",
        PaddingBox => "padding-box",
        BorderBox => "border-box",
        Text => "text",

        // Line styles
        Inset => "inset",
        Groove => "groove",
        Outset => "outset",
        Ridge => "ridge",
        Dotted => "dotted",
        Dashed => "dashed",
        Solid => "solid",
        Double => "double",
        Wavy => "wavy",

        // Line widths
        Thin => "thin",
        Medium => "medium",
        Thick => "thick",

        // Text
        Pre => "pre",
        PreWrap => "pre-wrap",
        PreLine => "pre-line",
        Nowrap => "nowrap",
        Capitalize => "capitalize",
        Uppercase => "uppercase",
        Lowercase => "lowercase",
        Ltr => "ltr",
        Rtl => "rtl",
        BreakAll => "break-all",
        KeepAll => "keep-all",
        BreakWord => "break-word",
        Underline => "underline",
        Overline => "overline",
        LineThrough => "line-through",
        Ellipsis => "ellipsis",
        Clip => "clip",
        EachLine => "each-line",
        Hanging => "hanging",

        // Vertical alignment
        Baseline => "baseline",
        Sub => "sub",
        Super => "super",
        TextTop => "text-top",
        TextBottom => "text-bottom",
        Middle => "middle",

        // Fonts
        Italic => "italic",
        Oblique => "oblique",
        Bold => "bold",
        Bolder => "bolder",
        Lighter => "lighter",
        XxSmall => "xx-small",
        XSmall => "x-small",
        Small => "small",
        Large => "large",
        XLarge => "x-large",
        XxLarge => "xx-large",
        Larger => "larger",
        Smaller => "smaller",

        // Lists and tables
        Inside => "inside",
        Outside => "outside",
        Show => "show",
        Hide => "hide",
        Separate => "separate",

        // Flexbox
        Row => "row",
        RowReverse => "row-reverse",
        Column => "column",
        ColumnReverse => "column-reverse",
        Wrap => "wrap",
        WrapReverse => "wrap-reverse",

        // Replaced content, 3D and writing modes
        Fill => "fill",
        Contain => "contain",
        Cover => "cover",
        ScaleDown => "scale-down",
        Flat => "flat",
        Preserve3d => "preserve-3d",
        Isolate => "isolate",
        Horizontal => "horizontal",
        Vertical => "vertical",
        HorizontalTb => "horizontal-tb",
        VerticalRl => "vertical-rl",
        VerticalLr => "vertical-lr",

        // Blend modes
        Multiply => "multiply",
        Screen => "screen",
        Overlay => "overlay",
        Darken => "darken",
        Lighten => "lighten",
        ColorDodge => "color-dodge",
        ColorBurn => "color-burn",
        HardLight => "hard-light",
        SoftLight => "soft-light",
        Difference => "difference",
        Exclusion => "exclusion",
        Hue => "hue",
        Saturation => "saturation",
        Color => "color",
        Luminosity => "luminosity",

        // Intrinsic sizing
        MinContent => "min-content",
        MaxContent => "max-content",
        FitContent => "fit-content",
        WebkitFillAvailable => "-webkit-fill-available",

        // Symbolic colors
        Currentcolor => "currentcolor",
        Transparent => "transparent",
        WebkitLink => "-webkit-link",
        WebkitActivelink => "-webkit-activelink",
        InternalQuirkInherit => "-internal-quirk-inherit",

        // Functions
        Calc => "calc",
        WebkitCalc => "-webkit-calc",
        Rgb => "rgb",
        Rgba => "rgba",
        Hsl => "hsl",
        Hsla => "hsla",
        Rect => "rect",
        Minmax => "minmax",
        Repeat => "repeat",
        Path => "path",
        WebkitCrossFade => "-webkit-cross-fade",

        // Transform functions
        Translate => "translate",
        TranslateX => "translatex",
        TranslateY => "translatey",
        TranslateZ => "translatez",
        Translate3d => "translate3d",
        Scale => "scale",
        ScaleX => "scalex",
        ScaleY => "scaley",
        ScaleZ => "scalez",
        Scale3d => "scale3d",
        Rotate => "rotate",
        RotateX => "rotatex",
        RotateY => "rotatey",
        RotateZ => "rotatez",
        Rotate3d => "rotate3d",
        Skew => "skew",
        SkewX => "skewx",
        SkewY => "skewy",
        Matrix => "matrix",
        Matrix3d => "matrix3d",
        Perspective => "perspective",

        // Filter functions
        Blur => "blur",
        Brightness => "brightness",
        Contrast => "contrast",
        DropShadow => "drop-shadow",
        Grayscale => "grayscale",
        HueRotate => "hue-rotate",
        Invert => "invert",
        Opacity => "opacity",
        Saturate => "saturate",
        Sepia => "sepia",
    }
    colors {
        AliceBlue => "aliceblue" : 0xF0F8FF,
        AntiqueWhite => "antiquewhite" : 0xFAEBD7,
        Aqua => "aqua" : 0x00FFFF,
        Aquamarine => "aquamarine" : 0x7FFFD4,
        Azure => "azure" : 0xF0FFFF,
        Beige => "beige" : 0xF5F5DC,
        Bisque => "bisque" : 0xFFE4C4,
        Black => "black" : 0x000000,
        BlanchedAlmond => "blanchedalmond" : 0xFFEBCD,
        Blue => "blue" : 0x0000FF,
        BlueViolet => "blueviolet" : 0x8A2BE2,
        Brown => "brown" : 0xA52A2A,
        BurlyWood => "burlywood" : 0xDEB887,
        CadetBlue => "cadetblue" : 0x5F9EA0,
        Chartreuse => "chartreuse" : 0x7FFF00,
        Chocolate => "chocolate" : 0xD2691E,
        Coral => "coral" : 0xFF7F50,
        CornflowerBlue => "cornflowerblue" : 0x6495ED,
        Cornsilk => "cornsilk" : 0xFFF8DC,
        Crimson => "crimson" : 0xDC143C,
        Cyan => "cyan" : 0x00FFFF,
        DarkBlue => "darkblue" : 0x00008B,
        DarkCyan => "darkcyan" : 0x008B8B,
        DarkGoldenrod => "darkgoldenrod" : 0xB8860B,
        DarkGray => "darkgray" : 0xA9A9A9,
        DarkGreen => "darkgreen" : 0x006400,
        DarkGrey => "darkgrey" : 0xA9A9A9,
        DarkKhaki => "darkkhaki" : 0xBDB76B,
        DarkMagenta => "darkmagenta" : 0x8B008B,
        DarkOliveGreen => "darkolivegreen" : 0x556B2F,
        DarkOrange => "darkorange" : 0xFF8C00,
        DarkOrchid => "darkorchid" : 0x9932CC,
        DarkRed => "darkred" : 0x8B0000,
        DarkSalmon => "darksalmon" : 0xE9967A,
        DarkSeaGreen => "darkseagreen" : 0x8FBC8F,
        DarkSlateBlue => "darkslateblue" : 0x483D8B,
        DarkSlateGray => "darkslategray" : 0x2F4F4F,
        DarkSlateGrey => "darkslategrey" : 0x2F4F4F,
        DarkTurquoise => "darkturquoise" : 0x00CED1,
        DarkViolet => "darkviolet" : 0x9400D3,
        DeepPink => "deeppink" : 0xFF1493,
        DeepSkyBlue => "deepskyblue" : 0x00BFFF,
        DimGray => "dimgray" : 0x696969,
        DimGrey => "dimgrey" : 0x696969,
        DodgerBlue => "dodgerblue" : 0x1E90FF,
        FireBrick => "firebrick" : 0xB22222,
        FloralWhite => "floralwhite" : 0xFFFAF0,
        ForestGreen => "forestgreen" : 0x228B22,
        Fuchsia => "fuchsia" : 0xFF00FF,
        Gainsboro => "gainsboro" : 0xDCDCDC,
        GhostWhite => "ghostwhite" : 0xF8F8FF,
        Gold => "gold" : 0xFFD700,
        Goldenrod => "goldenrod" : 0xDAA520,
        Gray => "gray" : 0x808080,
        Green => "green" : 0x008000,
        GreenYellow => "greenyellow" : 0xADFF2F,
        Grey => "grey" : 0x808080,
        Honeydew => "honeydew" : 0xF0FFF0,
        HotPink => "hotpink" : 0xFF69B4,
        IndianRed => "indianred" : 0xCD5C5C,
        Indigo => "indigo" : 0x4B0082,
        Ivory => "ivory" : 0xFFFFF0,
        Khaki => "khaki" : 0xF0E68C,
        Lavender => "lavender" : 0xE6E6FA,
        LavenderBlush => "lavenderblush" : 0xFFF0F5,
        LawnGreen => "lawngreen" : 0x7CFC00,
        LemonChiffon => "lemonchiffon" : 0xFFFACD,
        LightBlue => "lightblue" : 0xADD8E6,
        LightCoral => "lightcoral" : 0xF08080,
        LightCyan => "lightcyan" : 0xE0FFFF,
        LightGoldenrodYellow => "lightgoldenrodyellow" : 0xFAFAD2,
        LightGray => "lightgray" : 0xD3D3D3,
        LightGreen => "lightgreen" : 0x90EE90,
        LightGrey => "lightgrey" : 0xD3D3D3,
        LightPink => "lightpink" : 0xFFB6C1,
        LightSalmon => "lightsalmon" : 0xFFA07A,
        LightSeaGreen => "lightseagreen" : 0x20B2AA,
        LightSkyBlue => "lightskyblue" : 0x87CEFA,
        LightSlateGray => "lightslategray" : 0x778899,
        LightSlateGrey => "lightslategrey" : 0x778899,
        LightSteelBlue => "lightsteelblue" : 0xB0C4DE,
        LightYellow => "lightyellow" : 0xFFFFE0,
        Lime => "lime" : 0x00FF00,
        LimeGreen => "limegreen" : 0x32CD32,
        Linen => "linen" : 0xFAF0E6,
        Magenta => "magenta" : 0xFF00FF,
        Maroon => "maroon" : 0x800000,
        MediumAquamarine => "mediumaquamarine" : 0x66CDAA,
        MediumBlue => "mediumblue" : 0x0000CD,
        MediumOrchid => "mediumorchid" : 0xBA55D3,
        MediumPurple => "mediumpurple" : 0x9370DB,
        MediumSeaGreen => "mediumseagreen" : 0x3CB371,
        MediumSlateBlue => "mediumslateblue" : 0x7B68EE,
        MediumSpringGreen => "mediumspringgreen" : 0x00FA9A,
        MediumTurquoise => "mediumturquoise" : 0x48D1CC,
        MediumVioletRed => "mediumvioletred" : 0xC71585,
        MidnightBlue => "midnightblue" : 0x191970,
        MintCream => "mintcream" : 0xF5FFFA,
        MistyRose => "mistyrose" : 0xFFE4E1,
        Moccasin => "moccasin" : 0xFFE4B5,
        NavajoWhite => "navajowhite" : 0xFFDEAD,
        Navy => "navy" : 0x000080,
        OldLace => "oldlace" : 0xFDF5E6,
        Olive => "olive" : 0x808000,
        OliveDrab => "olivedrab" : 0x6B8E23,
        Orange => "orange" : 0xFFA500,
        OrangeRed => "orangered" : 0xFF4500,
        Orchid => "orchid" : 0xDA70D6,
        PaleGoldenrod => "palegoldenrod" : 0xEEE8AA,
        PaleGreen => "palegreen" : 0x98FB98,
        PaleTurquoise => "paleturquoise" : 0xAFEEEE,
        PaleVioletRed => "palevioletred" : 0xDB7093,
        PapayaWhip => "papayawhip" : 0xFFEFD5,
        PeachPuff => "peachpuff" : 0xFFDAB9,
        Peru => "peru" : 0xCD853F,
        Pink => "pink" : 0xFFC0CB,
        Plum => "plum" : 0xDDA0DD,
        PowderBlue => "powderblue" : 0xB0E0E6,
        Purple => "purple" : 0x800080,
        RebeccaPurple => "rebeccapurple" : 0x663399,
        Red => "red" : 0xFF0000,
        RosyBrown => "rosybrown" : 0xBC8F8F,
        RoyalBlue => "royalblue" : 0x4169E1,
        SaddleBrown => "saddlebrown" : 0x8B4513,
        Salmon => "salmon" : 0xFA8072,
        SandyBrown => "sandybrown" : 0xF4A460,
        SeaGreen => "seagreen" : 0x2E8B57,
        Seashell => "seashell" : 0xFFF5EE,
        Sienna => "sienna" : 0xA0522D,
        Silver => "silver" : 0xC0C0C0,
        SkyBlue => "skyblue" : 0x87CEEB,
        SlateBlue => "slateblue" : 0x6A5ACD,
        SlateGray => "slategray" : 0x708090,
        SlateGrey => "slategrey" : 0x708090,
        Snow => "snow" : 0xFFFAFA,
        SpringGreen => "springgreen" : 0x00FF7F,
        SteelBlue => "steelblue" : 0x4682B4,
        Tan => "tan" : 0xD2B48C,
        Teal => "teal" : 0x008080,
        Thistle => "thistle" : 0xD8BFD8,
        Tomato => "tomato" : 0xFF6347,
        Turquoise => "turquoise" : 0x40E0D0,
        Violet => "violet" : 0xEE82EE,
        Wheat => "wheat" : 0xF5DEB3,
        White => "white" : 0xFFFFFF,
        WhiteSmoke => "whitesmoke" : 0xF5F5F5,
        Yellow => "yellow" : 0xFFFF00,
        YellowGreen => "yellowgreen" : 0x9ACD32,    }
}

static VALUE_IDS_BY_NAME: Lazy<HashMap<&'static str, ValueId>> =
    Lazy::new(|| ValueId::ALL.iter().map(|id| (id.name(), *id)).collect());

impl ValueId {
    /// Case-insensitive keyword lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.bytes().any(|byte_val| byte_val.is_ascii_uppercase()) {
            return VALUE_IDS_BY_NAME
                .get(name.to_ascii_lowercase().as_str())
                .copied();
        }
        VALUE_IDS_BY_NAME.get(name).copied()
    }

    /// `initial`, `inherit` or `unset`.
    pub const fn is_css_wide_keyword(self) -> bool {
        matches!(self, Self::Initial | Self::Inherit | Self::Unset)
    }

    /// Keywords accepted where a `<color>` is expected.
    pub const fn is_color_keyword(self) -> bool {
        self.named_color_rgb().is_some()
            || matches!(
                self,
                Self::Currentcolor
                    | Self::Transparent
                    | Self::WebkitLink
                    | Self::WebkitActivelink
                    | Self::InternalQuirkInherit
            )
    }
}

/// Keyword id of an identifier token.
pub fn token_value_id(token: &ParserToken) -> Option<ValueId> {
    match token {
        ParserToken::Ident(name) => ValueId::from_name(name),
        _ => None,
    }
}

/// Keyword id of a function token's name.
pub fn function_value_id(token: &ParserToken) -> Option<ValueId> {
    match token {
        ParserToken::Function(name) => ValueId::from_name(name),
        _ => None,
    }
}

/// Consume any recognized keyword.
pub fn consume_ident(range: &mut TokenRange<'_>) -> Option<PrimitiveValue> {
    let id = token_value_id(range.peek())?;
    range.consume_including_whitespace();
    Some(PrimitiveValue::identifier(id))
}

/// Consume a keyword from `allowed`.
pub fn consume_ident_in(range: &mut TokenRange<'_>, allowed: &[ValueId]) -> Option<PrimitiveValue> {
    let id = token_value_id(range.peek())?;
    if !allowed.contains(&id) {
        return None;
    }
    range.consume_including_whitespace();
    Some(PrimitiveValue::identifier(id))
}

/// Consume a `<custom-ident>`. CSS-wide keywords and `default` are reserved.
///
/// Spec: <https://www.w3.org/TR/css-values-3/#custom-idents>
pub fn consume_custom_ident(range: &mut TokenRange<'_>) -> Option<PrimitiveValue> {
    let ParserToken::Ident(name) = range.peek() else {
        return None;
    };
    if token_value_id(range.peek()).is_some_and(ValueId::is_css_wide_keyword)
        || name.eq_ignore_ascii_case("default")
    {
        return None;
    }
    range.consume_including_whitespace();
    Some(PrimitiveValue::custom_ident(name.clone()))
}

/// Consume a `<url>` and return its contents.
///
/// Spec: <https://www.w3.org/TR/css-values-3/#urls>
pub fn consume_url(range: &mut TokenRange<'_>) -> Option<String> {
    match range.peek() {
        ParserToken::Url(url) => {
            range.consume_including_whitespace();
            Some(url.clone())
        }
        token if token.is_function_ignoring_case("url") => {
            let mut probe = *range;
            let mut arguments = probe.consume_block();
            arguments.consume_whitespace();
            let ParserToken::String(url) = arguments.consume_including_whitespace() else {
                return None;
            };
            if !arguments.at_end() {
                return None;
            }
            probe.consume_whitespace();
            *range = probe;
            Some(url.clone())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_syntax::tokenize;

    /// # Panics
    /// Panics if keyword lookup is case-sensitive.
    #[test]
    fn lookup_ignores_ascii_case() {
        assert_eq!(ValueId::from_name("Inline-Block"), Some(ValueId::InlineBlock));
        assert_eq!(ValueId::from_name("REBECCAPURPLE"), Some(ValueId::RebeccaPurple));
        assert_eq!(ValueId::from_name("not-a-keyword"), None);
    }

    /// # Panics
    /// Panics if a named color loses its RGB payload.
    #[test]
    fn named_colors_carry_rgb() {
        assert_eq!(ValueId::Orange.named_color_rgb(), Some(0x00FF_A500));
        assert_eq!(ValueId::Auto.named_color_rgb(), None);
        assert!(ValueId::Currentcolor.is_color_keyword());
    }

    /// # Panics
    /// Panics if `url()` forms are not both accepted.
    #[test]
    fn consumes_both_url_forms() {
        let unquoted = tokenize("url(a.png)");
        assert_eq!(consume_url(&mut TokenRange::new(&unquoted)).as_deref(), Some("a.png"));
        let quoted = tokenize("url( \"b.png\" )");
        assert_eq!(consume_url(&mut TokenRange::new(&quoted)).as_deref(), Some("b.png"));
    }

    /// # Panics
    /// Panics if reserved words are accepted as custom identifiers.
    #[test]
    fn custom_ident_rejects_reserved_words() {
        let tokens = tokenize("inherit");
        assert!(consume_custom_ident(&mut TokenRange::new(&tokens)).is_none());
        let tokens = tokenize("sidebar");
        assert!(consume_custom_ident(&mut TokenRange::new(&tokens)).is_some());
    }
}
