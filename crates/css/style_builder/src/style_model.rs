//! Computed values, the sink the style builder and animations write into.

use css_values_units::{Color, PixelsAndPercent, PropertyId, ValueId};
use css_variables::ComputedCustomProperties;
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// A computed `<length-percentage>` or sizing keyword.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Length {
    #[default]
    Auto,
    /// Absolute pixels.
    Fixed(f32),
    /// Percentage in `0..=100` units.
    Percent(f32),
    /// `calc()` mixing pixels and percentages.
    Calculated(PixelsAndPercent),
    MinContent,
    MaxContent,
    FitContent,
    FillAvailable,
    /// `none` for max sizes.
    None,
}

impl Length {
    pub const ZERO: Self = Self::Fixed(0.0);

    /// Smallest form holding `pixels + percent%`.
    pub fn from_pixels_and_percent(value: PixelsAndPercent) -> Self {
        if value.percent == 0.0 {
            Self::Fixed(value.pixels)
        } else if value.pixels == 0.0 {
            Self::Percent(value.percent)
        } else {
            Self::Calculated(value)
        }
    }

    /// Decomposition of a length or percentage; keywords have none.
    pub const fn pixels_and_percent(self) -> Option<PixelsAndPercent> {
        match self {
            Self::Fixed(pixels) => Some(PixelsAndPercent::new(pixels, 0.0)),
            Self::Percent(percent) => Some(PixelsAndPercent::new(0.0, percent)),
            Self::Calculated(value) => Some(value),
            _ => None,
        }
    }

    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    pub const fn is_specified(self) -> bool {
        matches!(self, Self::Fixed(_) | Self::Percent(_) | Self::Calculated(_))
    }

    /// Resolve against the size percentages refer to; keywords resolve to zero.
    pub fn value_for(self, reference: f32) -> f32 {
        self.pixels_and_percent()
            .map_or(0.0, |value| value.pixels + reference * value.percent / 100.0)
    }
}

/// Per-side values of a box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoxSides<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

impl<T: Copy> BoxSides<T> {
    pub const fn uniform(value: T) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// A color that may depend on the element's `color`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleColor {
    Color(Color),
    CurrentColor,
}

impl Default for StyleColor {
    fn default() -> Self {
        Self::CurrentColor
    }
}

impl StyleColor {
    pub const fn resolve(self, current_color: Color) -> Color {
        match self {
            Self::Color(color) => color,
            Self::CurrentColor => current_color,
        }
    }
}

/// `fill` and `stroke`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Paint {
    None,
    Color(StyleColor),
    /// A paint server with the color used when it cannot be loaded; `None` paints nothing.
    Url {
        url: String,
        fallback: Option<StyleColor>,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShadowStyle {
    #[default]
    Normal,
    Inset,
}

/// One computed `box-shadow`, `text-shadow` or `drop-shadow()` entry.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShadowData {
    pub x: f32,
    pub y: f32,
    pub blur: f32,
    pub spread: f32,
    pub color: StyleColor,
    pub style: ShadowStyle,
}

/// A computed `<image>`.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleImage {
    /// A `none` layer of a multi-layer list.
    None,
    Url(String),
    /// `-webkit-cross-fade()`; `percentage` is the weight of `to` in `0..=1`.
    CrossFade {
        from: Box<StyleImage>,
        to: Box<StyleImage>,
        percentage: f32,
    },
}

/// Kind of a filter function; two operations only blend when their kinds match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterOperationType {
    Reference,
    Blur,
    Brightness,
    Contrast,
    DropShadow,
    Grayscale,
    HueRotate,
    Invert,
    Opacity,
    Saturate,
    Sepia,
}

/// A computed filter function. Amounts are fractions, `hue-rotate` is in degrees and
/// `blur` in pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterOperation {
    Reference(String),
    Blur(f32),
    Brightness(f32),
    Contrast(f32),
    DropShadow(ShadowData),
    Grayscale(f32),
    HueRotate(f32),
    Invert(f32),
    Opacity(f32),
    Saturate(f32),
    Sepia(f32),
}

impl FilterOperation {
    pub const fn operation_type(&self) -> FilterOperationType {
        match self {
            Self::Reference(_) => FilterOperationType::Reference,
            Self::Blur(_) => FilterOperationType::Blur,
            Self::Brightness(_) => FilterOperationType::Brightness,
            Self::Contrast(_) => FilterOperationType::Contrast,
            Self::DropShadow(_) => FilterOperationType::DropShadow,
            Self::Grayscale(_) => FilterOperationType::Grayscale,
            Self::HueRotate(_) => FilterOperationType::HueRotate,
            Self::Invert(_) => FilterOperationType::Invert,
            Self::Opacity(_) => FilterOperationType::Opacity,
            Self::Saturate(_) => FilterOperationType::Saturate,
            Self::Sepia(_) => FilterOperationType::Sepia,
        }
    }

    /// The single numeric amount, for every kind but references and drop shadows.
    pub const fn amount(&self) -> Option<f32> {
        match self {
            Self::Blur(amount)
            | Self::Brightness(amount)
            | Self::Contrast(amount)
            | Self::Grayscale(amount)
            | Self::HueRotate(amount)
            | Self::Invert(amount)
            | Self::Opacity(amount)
            | Self::Saturate(amount)
            | Self::Sepia(amount) => Some(*amount),
            Self::Reference(_) | Self::DropShadow(_) => None,
        }
    }

    /// Rebuild an operation of kind `operation_type` from an amount.
    pub fn from_amount(operation_type: FilterOperationType, amount: f32) -> Option<Self> {
        Some(match operation_type {
            FilterOperationType::Blur => Self::Blur(amount),
            FilterOperationType::Brightness => Self::Brightness(amount),
            FilterOperationType::Contrast => Self::Contrast(amount),
            FilterOperationType::Grayscale => Self::Grayscale(amount),
            FilterOperationType::HueRotate => Self::HueRotate(amount),
            FilterOperationType::Invert => Self::Invert(amount),
            FilterOperationType::Opacity => Self::Opacity(amount),
            FilterOperationType::Saturate => Self::Saturate(amount),
            FilterOperationType::Sepia => Self::Sepia(amount),
            FilterOperationType::Reference | FilterOperationType::DropShadow => return None,
        })
    }
}

/// A computed transform function. Angles are in degrees.
#[derive(Clone, Debug, PartialEq)]
pub enum TransformOperation {
    Translate { x: Length, y: Length, z: f32 },
    Scale { x: f32, y: f32, z: f32 },
    Rotate { x: f32, y: f32, z: f32, angle: f32 },
    Skew { x: f32, y: f32 },
    Matrix([f64; 6]),
    Matrix3d([f64; 16]),
    Perspective(f32),
}

pub type TransformOperations = SmallVec<TransformOperation, 2>;

/// `transform-origin`; the depth is always a length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformOrigin {
    pub x: Length,
    pub y: Length,
    pub z: f32,
}

impl Default for TransformOrigin {
    fn default() -> Self {
        Self {
            x: Length::Percent(50.0),
            y: Length::Percent(50.0),
            z: 0.0,
        }
    }
}

/// The `scale` property.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTransform {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// The `rotate` property: an axis and an angle in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotateTransform {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub angle: f32,
}

/// The `translate` property.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TranslateTransform {
    pub x: Length,
    pub y: Length,
    pub z: f32,
}

/// `clip: rect(...)`. Edges that are `auto` hold [`Length::Auto`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipRect {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl ClipRect {
    pub const fn edges(&self) -> [Length; 4] {
        [self.top, self.right, self.bottom, self.left]
    }

    pub const fn from_edges(edges: [Length; 4]) -> Self {
        let [top, right, bottom, left] = edges;
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// `text-indent`: the length and the two modes are kept apart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextIndent {
    pub length: Length,
    pub each_line: bool,
    pub hanging: bool,
}

impl Default for TextIndent {
    fn default() -> Self {
        Self {
            length: Length::ZERO,
            each_line: false,
            hanging: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LineHeight {
    #[default]
    Normal,
    /// Multiple of the font size, inherited as a number.
    Number(f32),
    Fixed(f32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VerticalAlign {
    Keyword(ValueId),
    Length(Length),
}

impl Default for VerticalAlign {
    fn default() -> Self {
        Self::Keyword(ValueId::Baseline)
    }
}

/// `text-decoration-line` flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextDecorationLine(u8);

impl TextDecorationLine {
    pub const NONE: Self = Self(0);
    pub const UNDERLINE: Self = Self(1);
    pub const OVERLINE: Self = Self(1 << 1);
    pub const LINE_THROUGH: Self = Self(1 << 2);

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

/// Size of one grid track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GridTrackBreadth {
    /// A length, percentage, `auto`, `min-content` or `max-content`.
    Length(Length),
    /// Flexible size in `fr`.
    Flex(f32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GridTrackSize {
    Breadth(GridTrackBreadth),
    MinMax(GridTrackBreadth, GridTrackBreadth),
}

/// `grid-template-columns` or `grid-template-rows` with `repeat()` expanded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridTrackList {
    pub tracks: Vec<GridTrackSize>,
    /// Line indices each name was given at.
    pub named_lines: BTreeMap<String, Vec<usize>>,
}

/// `border-spacing`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BorderSpacing {
    pub horizontal: f32,
    pub vertical: f32,
}

/// The computed style of one element.
#[derive(Clone, Debug, PartialEq)]
pub struct ComputedStyle {
    // Colors
    pub color: Color,
    pub background_color: StyleColor,
    pub border_colors: BoxSides<StyleColor>,
    /// `None` is `auto`.
    pub caret_color: Option<StyleColor>,
    pub column_rule_color: StyleColor,
    pub outline_color: StyleColor,
    pub text_decoration_color: StyleColor,
    pub fill: Paint,
    pub stroke: Paint,
    pub stop_color: StyleColor,
    pub flood_color: StyleColor,
    pub lighting_color: StyleColor,

    // Backgrounds and borders
    pub background_images: Vec<StyleImage>,
    pub border_widths: BoxSides<f32>,
    pub border_spacing: BorderSpacing,
    pub outline_width: f32,
    pub outline_offset: f32,
    pub box_shadow: Vec<ShadowData>,

    // Box model and positioning
    pub width: Length,
    pub height: Length,
    pub min_width: Length,
    pub min_height: Length,
    pub max_width: Length,
    pub max_height: Length,
    pub margin: BoxSides<Length>,
    pub padding: BoxSides<Length>,
    pub offsets: BoxSides<Length>,
    /// `None` is `auto`.
    pub z_index: Option<i32>,
    /// `None` is `auto`.
    pub clip: Option<ClipRect>,
    pub vertical_align: VerticalAlign,

    // Fonts and text
    pub font_size: f32,
    pub font_weight: u16,
    pub line_height: LineHeight,
    pub letter_spacing: f32,
    pub word_spacing: f32,
    pub text_indent: TextIndent,
    pub text_shadow: Vec<ShadowData>,
    pub text_decoration_line: TextDecorationLine,

    // Flexbox and grid
    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub order: i32,
    /// `None` is `normal`.
    pub column_gap: Option<Length>,
    pub row_gap: Option<Length>,
    pub grid_template_columns: GridTrackList,
    pub grid_template_rows: GridTrackList,

    // Effects and transforms
    pub opacity: f32,
    pub filter: Vec<FilterOperation>,
    pub transform: TransformOperations,
    pub transform_origin: TransformOrigin,
    /// `None` is `none`.
    pub perspective: Option<f32>,
    pub scale: Option<ScaleTransform>,
    pub rotate: Option<RotateTransform>,
    pub translate: Option<TranslateTransform>,
    /// SVG path data of `offset-path: path(...)`.
    pub offset_path: Option<String>,

    /// Keyword-only properties that differ from their initial keyword.
    keywords: BTreeMap<PropertyId, ValueId>,

    pub custom_properties: ComputedCustomProperties,
}

/// Initial keyword of each keyword-only property.
pub const fn initial_keyword(property: PropertyId) -> Option<ValueId> {
    Some(match property {
        PropertyId::Display => ValueId::Inline,
        PropertyId::Position => ValueId::Static,
        PropertyId::Float | PropertyId::Clear => ValueId::None,
        PropertyId::BoxSizing => ValueId::ContentBox,
        PropertyId::OverflowX | PropertyId::OverflowY => ValueId::Visible,
        PropertyId::Visibility | PropertyId::BackfaceVisibility => ValueId::Visible,
        PropertyId::BorderTopStyle
        | PropertyId::BorderRightStyle
        | PropertyId::BorderBottomStyle
        | PropertyId::BorderLeftStyle
        | PropertyId::OutlineStyle => ValueId::None,
        PropertyId::BorderCollapse => ValueId::Separate,
        PropertyId::TextAlign => ValueId::Start,
        PropertyId::TextTransform => ValueId::None,
        PropertyId::TextOverflow => ValueId::Clip,
        PropertyId::TextDecorationStyle => ValueId::Solid,
        PropertyId::WhiteSpace
        | PropertyId::WordBreak
        | PropertyId::OverflowWrap
        | PropertyId::FontStyle
        | PropertyId::MixBlendMode => ValueId::Normal,
        PropertyId::Direction => ValueId::Ltr,
        PropertyId::WritingMode => ValueId::HorizontalTb,
        PropertyId::ListStylePosition => ValueId::Outside,
        PropertyId::EmptyCells => ValueId::Show,
        PropertyId::CaptionSide => ValueId::Top,
        PropertyId::TableLayout | PropertyId::Isolation => ValueId::Auto,
        PropertyId::FlexDirection => ValueId::Row,
        PropertyId::FlexWrap => ValueId::Nowrap,
        PropertyId::ObjectFit => ValueId::Fill,
        PropertyId::Resize => ValueId::None,
        PropertyId::TransformStyle => ValueId::Flat,
        _ => return None,
    })
}

/// Default medium border width, in pixels.
pub const MEDIUM_BORDER_WIDTH: f32 = 3.0;

/// Default font size, in pixels.
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            background_color: StyleColor::Color(Color::TRANSPARENT),
            border_colors: BoxSides::uniform(StyleColor::CurrentColor),
            caret_color: None,
            column_rule_color: StyleColor::CurrentColor,
            outline_color: StyleColor::CurrentColor,
            text_decoration_color: StyleColor::CurrentColor,
            fill: Paint::Color(StyleColor::Color(Color::BLACK)),
            stroke: Paint::None,
            stop_color: StyleColor::Color(Color::BLACK),
            flood_color: StyleColor::Color(Color::BLACK),
            lighting_color: StyleColor::Color(Color::WHITE),
            background_images: Vec::new(),
            border_widths: BoxSides::uniform(MEDIUM_BORDER_WIDTH),
            border_spacing: BorderSpacing::default(),
            outline_width: MEDIUM_BORDER_WIDTH,
            outline_offset: 0.0,
            box_shadow: Vec::new(),
            width: Length::Auto,
            height: Length::Auto,
            min_width: Length::Auto,
            min_height: Length::Auto,
            max_width: Length::None,
            max_height: Length::None,
            margin: BoxSides::uniform(Length::ZERO),
            padding: BoxSides::uniform(Length::ZERO),
            offsets: BoxSides::uniform(Length::Auto),
            z_index: None,
            clip: None,
            vertical_align: VerticalAlign::default(),
            font_size: DEFAULT_FONT_SIZE,
            font_weight: 400,
            line_height: LineHeight::Normal,
            letter_spacing: 0.0,
            word_spacing: 0.0,
            text_indent: TextIndent::default(),
            text_shadow: Vec::new(),
            text_decoration_line: TextDecorationLine::NONE,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            order: 0,
            column_gap: None,
            row_gap: None,
            grid_template_columns: GridTrackList::default(),
            grid_template_rows: GridTrackList::default(),
            opacity: 1.0,
            filter: Vec::new(),
            transform: TransformOperations::new(),
            transform_origin: TransformOrigin::default(),
            perspective: None,
            scale: None,
            rotate: None,
            translate: None,
            offset_path: None,
            keywords: BTreeMap::new(),
            custom_properties: ComputedCustomProperties::default(),
        }
    }
}

impl ComputedStyle {
    /// Computed value of a keyword-only property.
    pub fn keyword(&self, property: PropertyId) -> Option<ValueId> {
        self.keywords
            .get(&property)
            .copied()
            .or_else(|| initial_keyword(property))
    }

    /// Set a keyword-only property. Returns false for any other property.
    pub fn set_keyword(&mut self, property: PropertyId, keyword: ValueId) -> bool {
        let Some(initial) = initial_keyword(property) else {
            return false;
        };
        if keyword == initial {
            self.keywords.remove(&property);
        } else {
            self.keywords.insert(property, keyword);
        }
        true
    }

    pub fn display(&self) -> ValueId {
        self.keyword(PropertyId::Display).unwrap_or(ValueId::Inline)
    }

    /// Resolve a color property against this style's `color`.
    pub fn visited_dependent_color(&self, color: StyleColor) -> Color {
        color.resolve(self.color)
    }

    /// The [`Length`] stored for a length-valued property.
    pub const fn length(&self, property: PropertyId) -> Option<Length> {
        Some(match property {
            PropertyId::Width => self.width,
            PropertyId::Height => self.height,
            PropertyId::MinWidth => self.min_width,
            PropertyId::MinHeight => self.min_height,
            PropertyId::MaxWidth => self.max_width,
            PropertyId::MaxHeight => self.max_height,
            PropertyId::MarginTop => self.margin.top,
            PropertyId::MarginRight => self.margin.right,
            PropertyId::MarginBottom => self.margin.bottom,
            PropertyId::MarginLeft => self.margin.left,
            PropertyId::PaddingTop => self.padding.top,
            PropertyId::PaddingRight => self.padding.right,
            PropertyId::PaddingBottom => self.padding.bottom,
            PropertyId::PaddingLeft => self.padding.left,
            PropertyId::Top => self.offsets.top,
            PropertyId::Right => self.offsets.right,
            PropertyId::Bottom => self.offsets.bottom,
            PropertyId::Left => self.offsets.left,
            PropertyId::BorderTopWidth => Length::Fixed(self.border_widths.top),
            PropertyId::BorderRightWidth => Length::Fixed(self.border_widths.right),
            PropertyId::BorderBottomWidth => Length::Fixed(self.border_widths.bottom),
            PropertyId::BorderLeftWidth => Length::Fixed(self.border_widths.left),
            PropertyId::OutlineWidth => Length::Fixed(self.outline_width),
            PropertyId::OutlineOffset => Length::Fixed(self.outline_offset),
            PropertyId::FontSize => Length::Fixed(self.font_size),
            PropertyId::LetterSpacing => Length::Fixed(self.letter_spacing),
            PropertyId::WordSpacing => Length::Fixed(self.word_spacing),
            PropertyId::TextIndent => self.text_indent.length,
            _ => return None,
        })
    }

    /// Store a [`Length`] into a length-valued property. Properties kept in pixels take the
    /// pixel part only. Returns false for any other property.
    pub fn set_length(&mut self, property: PropertyId, length: Length) -> bool {
        let pixels = || length.pixels_and_percent().map_or(0.0, |value| value.pixels);
        match property {
            PropertyId::Width => self.width = length,
            PropertyId::Height => self.height = length,
            PropertyId::MinWidth => self.min_width = length,
            PropertyId::MinHeight => self.min_height = length,
            PropertyId::MaxWidth => self.max_width = length,
            PropertyId::MaxHeight => self.max_height = length,
            PropertyId::MarginTop => self.margin.top = length,
            PropertyId::MarginRight => self.margin.right = length,
            PropertyId::MarginBottom => self.margin.bottom = length,
            PropertyId::MarginLeft => self.margin.left = length,
            PropertyId::PaddingTop => self.padding.top = length,
            PropertyId::PaddingRight => self.padding.right = length,
            PropertyId::PaddingBottom => self.padding.bottom = length,
            PropertyId::PaddingLeft => self.padding.left = length,
            PropertyId::Top => self.offsets.top = length,
            PropertyId::Right => self.offsets.right = length,
            PropertyId::Bottom => self.offsets.bottom = length,
            PropertyId::Left => self.offsets.left = length,
            PropertyId::BorderTopWidth => self.border_widths.top = pixels(),
            PropertyId::BorderRightWidth => self.border_widths.right = pixels(),
            PropertyId::BorderBottomWidth => self.border_widths.bottom = pixels(),
            PropertyId::BorderLeftWidth => self.border_widths.left = pixels(),
            PropertyId::OutlineWidth => self.outline_width = pixels(),
            PropertyId::OutlineOffset => self.outline_offset = pixels(),
            PropertyId::FontSize => self.font_size = pixels().max(0.0),
            PropertyId::LetterSpacing => self.letter_spacing = pixels(),
            PropertyId::WordSpacing => self.word_spacing = pixels(),
            PropertyId::TextIndent => self.text_indent.length = length,
            _ => return false,
        }
        true
    }

    /// The color stored for a color-valued property. `color` itself is never symbolic.
    pub const fn style_color(&self, property: PropertyId) -> Option<StyleColor> {
        Some(match property {
            PropertyId::Color => StyleColor::Color(self.color),
            PropertyId::BackgroundColor => self.background_color,
            PropertyId::BorderTopColor => self.border_colors.top,
            PropertyId::BorderRightColor => self.border_colors.right,
            PropertyId::BorderBottomColor => self.border_colors.bottom,
            PropertyId::BorderLeftColor => self.border_colors.left,
            PropertyId::ColumnRuleColor => self.column_rule_color,
            PropertyId::OutlineColor => self.outline_color,
            PropertyId::TextDecorationColor => self.text_decoration_color,
            PropertyId::StopColor => self.stop_color,
            PropertyId::FloodColor => self.flood_color,
            PropertyId::LightingColor => self.lighting_color,
            PropertyId::CaretColor => match self.caret_color {
                Some(color) => color,
                None => StyleColor::CurrentColor,
            },
            _ => return None,
        })
    }

    /// Store a color into a color-valued property. Returns false for any other property.
    pub fn set_style_color(&mut self, property: PropertyId, color: StyleColor) -> bool {
        match property {
            PropertyId::Color => self.color = color.resolve(self.color),
            PropertyId::BackgroundColor => self.background_color = color,
            PropertyId::BorderTopColor => self.border_colors.top = color,
            PropertyId::BorderRightColor => self.border_colors.right = color,
            PropertyId::BorderBottomColor => self.border_colors.bottom = color,
            PropertyId::BorderLeftColor => self.border_colors.left = color,
            PropertyId::ColumnRuleColor => self.column_rule_color = color,
            PropertyId::OutlineColor => self.outline_color = color,
            PropertyId::TextDecorationColor => self.text_decoration_color = color,
            PropertyId::StopColor => self.stop_color = color,
            PropertyId::FloodColor => self.flood_color = color,
            PropertyId::LightingColor => self.lighting_color = color,
            PropertyId::CaretColor => self.caret_color = Some(color),
            _ => return false,
        }
        true
    }

    /// Copy the computed value of `property` from `from`.
    ///
    /// Shorthands and custom properties are ignored.
    pub fn copy_property_from(&mut self, property: PropertyId, from: &Self) {
        match property {
            PropertyId::Fill => self.fill = from.fill.clone(),
            PropertyId::Stroke => self.stroke = from.stroke.clone(),
            PropertyId::CaretColor => self.caret_color = from.caret_color,
            PropertyId::BackgroundImage => self.background_images = from.background_images.clone(),
            PropertyId::BorderSpacing => self.border_spacing = from.border_spacing,
            PropertyId::BoxShadow => self.box_shadow = from.box_shadow.clone(),
            PropertyId::ZIndex => self.z_index = from.z_index,
            PropertyId::Clip => self.clip = from.clip,
            PropertyId::VerticalAlign => self.vertical_align = from.vertical_align,
            PropertyId::FontWeight => self.font_weight = from.font_weight,
            PropertyId::LineHeight => self.line_height = from.line_height,
            PropertyId::TextIndent => self.text_indent = from.text_indent,
            PropertyId::TextShadow => self.text_shadow = from.text_shadow.clone(),
            PropertyId::TextDecorationLine => self.text_decoration_line = from.text_decoration_line,
            PropertyId::FlexGrow => self.flex_grow = from.flex_grow,
            PropertyId::FlexShrink => self.flex_shrink = from.flex_shrink,
            PropertyId::Order => self.order = from.order,
            PropertyId::ColumnGap => self.column_gap = from.column_gap,
            PropertyId::RowGap => self.row_gap = from.row_gap,
            PropertyId::GridTemplateColumns => {
                self.grid_template_columns = from.grid_template_columns.clone();
            }
            PropertyId::GridTemplateRows => self.grid_template_rows = from.grid_template_rows.clone(),
            PropertyId::Opacity => self.opacity = from.opacity,
            PropertyId::Filter => self.filter = from.filter.clone(),
            PropertyId::Transform => self.transform = from.transform.clone(),
            PropertyId::TransformOrigin => self.transform_origin = from.transform_origin,
            PropertyId::Perspective => self.perspective = from.perspective,
            PropertyId::Scale => self.scale = from.scale,
            PropertyId::Rotate => self.rotate = from.rotate,
            PropertyId::Translate => self.translate = from.translate,
            PropertyId::OffsetPath => self.offset_path = from.offset_path.clone(),
            _ => {
                if let Some(keyword) = from.keyword(property) {
                    self.set_keyword(property, keyword);
                } else if let Some(length) = from.length(property) {
                    self.set_length(property, length);
                } else if let Some(color) = from.style_color(property) {
                    self.set_style_color(property, color);
                }
            }
        }
    }

    /// A style whose inherited properties come from `parent` and the rest are initial.
    pub fn inherit_from(parent: &Self) -> Self {
        let mut style = Self::default();
        for property in PropertyId::ALL {
            if property.is_inherited() && !property.is_shorthand() && *property != PropertyId::Variable {
                style.copy_property_from(*property, parent);
            }
        }
        style
    }
}
