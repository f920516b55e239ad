//! Per-element state threaded through the style builder.

use crate::style_model::{ComputedStyle, DEFAULT_FONT_SIZE};
use css_syntax::ParserMode;
use css_values_units::{Color, LengthConversionData};
use css_variables::PropertyRegistry;

/// Colors the `-webkit-link`, `-webkit-activelink` and quirky-inherit keywords resolve to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextLinkColors {
    pub text: Color,
    pub link: Color,
    pub visited_link: Color,
    pub active_link: Color,
}

impl Default for TextLinkColors {
    fn default() -> Self {
        Self {
            text: Color::BLACK,
            link: Color::from_rgb(0x00, 0x00, 0xEE),
            visited_link: Color::from_rgb(0x55, 0x1A, 0x8B),
            active_link: Color::from_rgb(0xFF, 0x00, 0x00),
        }
    }
}

/// Everything needed to turn specified values into computed values for one element.
pub struct StyleResolverState<'resolve> {
    style: ComputedStyle,
    parent_style: Option<&'resolve ComputedStyle>,
    conversion_data: LengthConversionData,
    text_link_colors: TextLinkColors,
    registry: Option<&'resolve PropertyRegistry>,
    mode: ParserMode,
    /// Whether the element is a visited link.
    is_link_visited: bool,
}

impl<'resolve> StyleResolverState<'resolve> {
    /// Start from the parent's inherited values, or from initial values for a root.
    pub fn new(parent_style: Option<&'resolve ComputedStyle>, conversion_data: LengthConversionData) -> Self {
        let style = parent_style.map_or_else(ComputedStyle::default, ComputedStyle::inherit_from);
        let conversion_data = conversion_data.with_font_size(f64::from(style.font_size));
        Self {
            style,
            parent_style,
            conversion_data,
            text_link_colors: TextLinkColors::default(),
            registry: None,
            mode: ParserMode::HtmlStandard,
            is_link_visited: false,
        }
    }

    #[must_use]
    pub const fn with_text_link_colors(mut self, colors: TextLinkColors) -> Self {
        self.text_link_colors = colors;
        self
    }

    #[must_use]
    pub const fn with_registry(mut self, registry: &'resolve PropertyRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: ParserMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub const fn with_link_visited(mut self, visited: bool) -> Self {
        self.is_link_visited = visited;
        self
    }

    pub const fn style(&self) -> &ComputedStyle {
        &self.style
    }

    pub const fn style_mut(&mut self) -> &mut ComputedStyle {
        &mut self.style
    }

    pub fn take_style(self) -> ComputedStyle {
        self.style
    }

    pub const fn parent_style(&self) -> Option<&'resolve ComputedStyle> {
        self.parent_style
    }

    /// Font size the parent passes down, used by `em` and `%` in `font-size`.
    pub fn parent_font_size(&self) -> f32 {
        self.parent_style
            .map_or(DEFAULT_FONT_SIZE, |parent| parent.font_size)
    }

    pub const fn conversion_data(&self) -> &LengthConversionData {
        &self.conversion_data
    }

    pub const fn set_conversion_data(&mut self, conversion_data: LengthConversionData) {
        self.conversion_data = conversion_data;
    }

    /// Conversion data for `font-size`, where font-relative units refer to the parent.
    pub fn font_size_conversion_data(&self) -> LengthConversionData {
        self.conversion_data
            .with_font_size(f64::from(self.parent_font_size()))
    }

    /// Re-derive font-relative units after `font-size` changed.
    pub fn update_font_size(&mut self) {
        self.conversion_data = self.conversion_data.with_font_size(f64::from(self.style.font_size));
    }

    pub const fn text_link_colors(&self) -> &TextLinkColors {
        &self.text_link_colors
    }

    pub const fn registry(&self) -> Option<&'resolve PropertyRegistry> {
        self.registry
    }

    pub const fn mode(&self) -> ParserMode {
        self.mode
    }

    pub const fn is_link_visited(&self) -> bool {
        self.is_link_visited
    }
}
