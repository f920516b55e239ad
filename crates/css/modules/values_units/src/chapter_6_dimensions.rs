//! CSS Values & Units Level 3 — §5-7 Distance, other quantities and their units.
//! Spec: <https://www.w3.org/TR/css-values-3/#lengths>

use crate::chapter_10_calc::{CalcParser, CalculationCategory};
use crate::chapter_4_numbers::ValueRange;
use crate::chapter_5_percentages::consume_percent;
use crate::primitive_value::PrimitiveValue;
use core::f64::consts::PI;
use css_syntax::{ParserMode, ParserToken, TokenRange};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// CSS reference pixels per inch.
pub const CSS_PIXELS_PER_INCH: f64 = 96.0;
pub const CSS_PIXELS_PER_CENTIMETER: f64 = CSS_PIXELS_PER_INCH / 2.54;
pub const CSS_PIXELS_PER_MILLIMETER: f64 = CSS_PIXELS_PER_INCH / 25.4;
pub const CSS_PIXELS_PER_POINT: f64 = CSS_PIXELS_PER_INCH / 72.0;
pub const CSS_PIXELS_PER_PICA: f64 = CSS_PIXELS_PER_INCH / 6.0;

/// Discriminant of a primitive value: a numeric unit or the kind of non-numeric payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnitType {
    Unknown,
    Number,
    Integer,
    Percentage,
    Ems,
    Exs,
    Pixels,
    Centimeters,
    Millimeters,
    Inches,
    Points,
    Picas,
    QuirkyEms,
    Degrees,
    Radians,
    Gradians,
    Turns,
    Milliseconds,
    Seconds,
    Hertz,
    Kilohertz,
    ViewportWidth,
    ViewportHeight,
    ViewportMin,
    ViewportMax,
    DotsPerPixel,
    DotsPerInch,
    DotsPerCentimeter,
    Fraction,
    Rems,
    Chs,
    Calc,
    CalcPercentageWithNumber,
    CalcPercentageWithLength,
    ValueId,
    CustomIdent,
    Uri,
    Rect,
    RgbColor,
}

/// Coarse grouping of units that can be converted into one another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnitCategory {
    Number,
    Percent,
    Length,
    Angle,
    Time,
    Frequency,
    Resolution,
    Other,
}

static UNIT_TABLE: Lazy<HashMap<&'static str, UnitType>> = Lazy::new(|| {
    [
        ("em", UnitType::Ems),
        ("ex", UnitType::Exs),
        ("px", UnitType::Pixels),
        ("cm", UnitType::Centimeters),
        ("mm", UnitType::Millimeters),
        ("in", UnitType::Inches),
        ("pt", UnitType::Points),
        ("pc", UnitType::Picas),
        ("deg", UnitType::Degrees),
        ("rad", UnitType::Radians),
        ("grad", UnitType::Gradians),
        ("ms", UnitType::Milliseconds),
        ("s", UnitType::Seconds),
        ("hz", UnitType::Hertz),
        ("khz", UnitType::Kilohertz),
        ("dpi", UnitType::DotsPerInch),
        ("dpcm", UnitType::DotsPerCentimeter),
        ("dppx", UnitType::DotsPerPixel),
        ("vw", UnitType::ViewportWidth),
        ("vh", UnitType::ViewportHeight),
        ("vmin", UnitType::ViewportMin),
        ("vmax", UnitType::ViewportMax),
        ("rem", UnitType::Rems),
        ("fr", UnitType::Fraction),
        ("turn", UnitType::Turns),
        ("ch", UnitType::Chs),
        ("__qem", UnitType::QuirkyEms),
    ]
    .into_iter()
    .collect()
});

impl UnitType {
    /// Case-insensitive unit lookup. Unknown suffixes map to `UnitType::Unknown`.
    pub fn from_name(unit: &str) -> Self {
        let found = if unit.bytes().any(|byte_val| byte_val.is_ascii_uppercase()) {
            UNIT_TABLE.get(unit.to_ascii_lowercase().as_str()).copied()
        } else {
            UNIT_TABLE.get(unit).copied()
        };
        found.unwrap_or(Self::Unknown)
    }

    /// Unit of a numeric token.
    pub fn from_token(token: &ParserToken) -> Self {
        match token {
            ParserToken::Number(numeric) => {
                if numeric.is_integer() {
                    Self::Integer
                } else {
                    Self::Number
                }
            }
            ParserToken::Percentage(_) => Self::Percentage,
            ParserToken::Dimension { unit, .. } => Self::from_name(unit),
            _ => Self::Unknown,
        }
    }

    /// Serialization suffix of a numeric unit.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Percentage => "%",
            Self::Ems | Self::QuirkyEms => "em",
            Self::Exs => "ex",
            Self::Pixels => "px",
            Self::Centimeters => "cm",
            Self::Millimeters => "mm",
            Self::Inches => "in",
            Self::Points => "pt",
            Self::Picas => "pc",
            Self::Degrees => "deg",
            Self::Radians => "rad",
            Self::Gradians => "grad",
            Self::Turns => "turn",
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
            Self::Hertz => "hz",
            Self::Kilohertz => "khz",
            Self::ViewportWidth => "vw",
            Self::ViewportHeight => "vh",
            Self::ViewportMin => "vmin",
            Self::ViewportMax => "vmax",
            Self::DotsPerPixel => "dppx",
            Self::DotsPerInch => "dpi",
            Self::DotsPerCentimeter => "dpcm",
            Self::Fraction => "fr",
            Self::Rems => "rem",
            Self::Chs => "ch",
            Self::Unknown
            | Self::Number
            | Self::Integer
            | Self::Calc
            | Self::CalcPercentageWithNumber
            | Self::CalcPercentageWithLength
            | Self::ValueId
            | Self::CustomIdent
            | Self::Uri
            | Self::Rect
            | Self::RgbColor => "",
        }
    }

    pub const fn category(self) -> UnitCategory {
        match self {
            Self::Number | Self::Integer => UnitCategory::Number,
            Self::Percentage => UnitCategory::Percent,
            Self::Pixels
            | Self::Centimeters
            | Self::Millimeters
            | Self::Inches
            | Self::Points
            | Self::Picas => UnitCategory::Length,
            Self::Degrees | Self::Radians | Self::Gradians | Self::Turns => UnitCategory::Angle,
            Self::Milliseconds | Self::Seconds => UnitCategory::Time,
            Self::Hertz | Self::Kilohertz => UnitCategory::Frequency,
            Self::DotsPerPixel | Self::DotsPerInch | Self::DotsPerCentimeter => {
                UnitCategory::Resolution
            }
            _ => UnitCategory::Other,
        }
    }

    /// Whether values of this type carry a plain number.
    pub const fn has_double_value(self) -> bool {
        !matches!(
            self,
            Self::Unknown
                | Self::Calc
                | Self::CalcPercentageWithNumber
                | Self::CalcPercentageWithLength
                | Self::ValueId
                | Self::CustomIdent
                | Self::Uri
                | Self::Rect
                | Self::RgbColor
        )
    }

    pub const fn is_length(self) -> bool {
        matches!(
            self,
            Self::Ems
                | Self::Exs
                | Self::Pixels
                | Self::Centimeters
                | Self::Millimeters
                | Self::Inches
                | Self::Points
                | Self::Picas
                | Self::QuirkyEms
                | Self::Rems
                | Self::Chs
        ) || self.is_viewport_percentage_length()
    }

    pub const fn is_font_relative_length(self) -> bool {
        matches!(
            self,
            Self::Ems | Self::Exs | Self::Rems | Self::Chs | Self::QuirkyEms
        )
    }

    pub const fn is_viewport_percentage_length(self) -> bool {
        matches!(
            self,
            Self::ViewportWidth | Self::ViewportHeight | Self::ViewportMin | Self::ViewportMax
        )
    }

    pub const fn is_angle(self) -> bool {
        matches!(self.category(), UnitCategory::Angle)
    }

    pub const fn is_time(self) -> bool {
        matches!(self.category(), UnitCategory::Time)
    }

    pub const fn is_resolution(self) -> bool {
        matches!(self.category(), UnitCategory::Resolution)
    }

    /// Canonical unit values of `category` are converted to, if any.
    pub const fn canonical_unit_for_category(category: UnitCategory) -> Self {
        match category {
            UnitCategory::Number => Self::Number,
            UnitCategory::Length => Self::Pixels,
            UnitCategory::Angle => Self::Degrees,
            UnitCategory::Time => Self::Milliseconds,
            UnitCategory::Frequency => Self::Hertz,
            UnitCategory::Resolution => Self::DotsPerPixel,
            UnitCategory::Percent | UnitCategory::Other => Self::Unknown,
        }
    }

    /// Factor that converts a value in this unit into its category's canonical unit.
    pub fn conversion_to_canonical_units_scale_factor(self) -> f64 {
        match self {
            Self::Seconds | Self::Kilohertz => 1000.0,
            Self::Centimeters => CSS_PIXELS_PER_CENTIMETER,
            Self::DotsPerCentimeter => 1.0 / CSS_PIXELS_PER_CENTIMETER,
            Self::Millimeters => CSS_PIXELS_PER_MILLIMETER,
            Self::Inches => CSS_PIXELS_PER_INCH,
            Self::DotsPerInch => 1.0 / CSS_PIXELS_PER_INCH,
            Self::Points => CSS_PIXELS_PER_POINT,
            Self::Picas => CSS_PIXELS_PER_PICA,
            Self::Radians => 180.0 / PI,
            Self::Gradians => 0.9,
            Self::Turns => 360.0,
            _ => 1.0,
        }
    }

    /// Slot of a `CssLengthArray` that values of this unit accumulate into.
    pub const fn length_unit_type(self) -> Option<LengthUnitType> {
        match self {
            Self::Pixels
            | Self::Centimeters
            | Self::Millimeters
            | Self::Inches
            | Self::Points
            | Self::Picas => Some(LengthUnitType::Pixels),
            Self::Ems | Self::QuirkyEms => Some(LengthUnitType::FontSize),
            Self::Exs => Some(LengthUnitType::FontXSize),
            Self::Rems => Some(LengthUnitType::RootFontSize),
            Self::Chs => Some(LengthUnitType::ZeroCharacterWidth),
            Self::Percentage => Some(LengthUnitType::Percentage),
            Self::ViewportWidth => Some(LengthUnitType::ViewportWidth),
            Self::ViewportHeight => Some(LengthUnitType::ViewportHeight),
            Self::ViewportMin => Some(LengthUnitType::ViewportMin),
            Self::ViewportMax => Some(LengthUnitType::ViewportMax),
            _ => None,
        }
    }
}

/// Slots of a decomposed length, one per unit that scales independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LengthUnitType {
    Pixels,
    Percentage,
    FontSize,
    FontXSize,
    RootFontSize,
    ZeroCharacterWidth,
    ViewportWidth,
    ViewportHeight,
    ViewportMin,
    ViewportMax,
}

impl LengthUnitType {
    pub const COUNT: usize = 10;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Pixels,
        Self::Percentage,
        Self::FontSize,
        Self::FontXSize,
        Self::RootFontSize,
        Self::ZeroCharacterWidth,
        Self::ViewportWidth,
        Self::ViewportHeight,
        Self::ViewportMin,
        Self::ViewportMax,
    ];

    /// Unit a slot is expressed in when rebuilt into a value.
    pub const fn unit_type(self) -> UnitType {
        match self {
            Self::Pixels => UnitType::Pixels,
            Self::Percentage => UnitType::Percentage,
            Self::FontSize => UnitType::Ems,
            Self::FontXSize => UnitType::Exs,
            Self::RootFontSize => UnitType::Rems,
            Self::ZeroCharacterWidth => UnitType::Chs,
            Self::ViewportWidth => UnitType::ViewportWidth,
            Self::ViewportHeight => UnitType::ViewportHeight,
            Self::ViewportMin => UnitType::ViewportMin,
            Self::ViewportMax => UnitType::ViewportMax,
        }
    }
}

/// A length decomposed into one summand per `LengthUnitType`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CssLengthArray {
    values: [f64; LengthUnitType::COUNT],
    present: u16,
}

impl CssLengthArray {
    pub const fn at(&self, unit: LengthUnitType) -> f64 {
        self.values[unit as usize]
    }

    /// Whether any value was accumulated into `unit`, even if it summed to zero.
    pub const fn has(&self, unit: LengthUnitType) -> bool {
        self.present & (1 << unit as u16) != 0
    }

    pub fn add(&mut self, unit: LengthUnitType, value: f64) {
        if let Some(slot) = self.values.get_mut(unit as usize) {
            *slot += value;
            self.present |= 1 << unit as u16;
        }
    }
}

/// Inputs needed to resolve relative lengths to pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LengthConversionData {
    /// Computed (zoomed) font size, the value of `1em`.
    pub font_size: f64,
    pub root_font_size: f64,
    /// x-height of the first available font.
    pub ex_size: f64,
    /// Advance of the `0` glyph.
    pub ch_size: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub zoom: f64,
}

impl Default for LengthConversionData {
    fn default() -> Self {
        Self::new(16.0, 16.0, 0.0, 0.0)
    }
}

impl LengthConversionData {
    /// Conversion data with font metrics estimated from the font sizes and zoom 1.
    pub fn new(
        font_size: f64,
        root_font_size: f64,
        viewport_width: f64,
        viewport_height: f64,
    ) -> Self {
        Self {
            font_size,
            root_font_size,
            ex_size: font_size / 2.0,
            ch_size: font_size / 2.0,
            viewport_width,
            viewport_height,
            zoom: 1.0,
        }
    }

    #[must_use]
    pub const fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    #[must_use]
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self.ex_size = font_size / 2.0;
        self.ch_size = font_size / 2.0;
        self
    }

    pub fn viewport_width_percent(&self) -> f64 {
        self.viewport_width / 100.0
    }

    pub fn viewport_height_percent(&self) -> f64 {
        self.viewport_height / 100.0
    }

    /// Pixel size of one unit. Absolute units are zoomed here; font-relative units are
    /// based on font metrics that already include zoom.
    pub fn compute_length_px(&self, value: f64, unit: UnitType) -> f64 {
        let factor = match unit {
            UnitType::Ems | UnitType::QuirkyEms => self.font_size,
            UnitType::Exs => self.ex_size,
            UnitType::Rems => self.root_font_size,
            UnitType::Chs => self.ch_size,
            UnitType::Pixels => 1.0,
            UnitType::Centimeters => CSS_PIXELS_PER_CENTIMETER,
            UnitType::Millimeters => CSS_PIXELS_PER_MILLIMETER,
            UnitType::Inches => CSS_PIXELS_PER_INCH,
            UnitType::Points => CSS_PIXELS_PER_POINT,
            UnitType::Picas => CSS_PIXELS_PER_PICA,
            UnitType::ViewportWidth => self.viewport_width_percent(),
            UnitType::ViewportHeight => self.viewport_height_percent(),
            UnitType::ViewportMin => self
                .viewport_width_percent()
                .min(self.viewport_height_percent()),
            UnitType::ViewportMax => self
                .viewport_width_percent()
                .max(self.viewport_height_percent()),
            _ => {
                debug_assert!(false, "{unit:?} is not a length unit");
                return 0.0;
            }
        };
        let result = value * factor;
        if unit.is_font_relative_length() {
            return result;
        }
        result * self.zoom
    }

    /// Pixel value of a `CssLengthArray`, percentages excluded.
    pub fn resolve_length_array(&self, array: &CssLengthArray) -> f64 {
        LengthUnitType::ALL
            .iter()
            .filter(|slot| **slot != LengthUnitType::Percentage)
            .map(|slot| self.compute_length_px(array.at(*slot), slot.unit_type()))
            .sum()
    }
}

/// Whether a unitless number may stand in for a length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnitlessQuirk {
    Allow,
    #[default]
    Forbid,
}

fn should_accept_unitless_values(value: f64, mode: ParserMode, unitless: UnitlessQuirk) -> bool {
    value == 0.0
        || mode.is_svg_attribute()
        || (mode.is_quirks() && unitless == UnitlessQuirk::Allow)
}

/// Consume a `<length>`.
///
/// Spec: <https://www.w3.org/TR/css-values-3/#lengths>
pub fn consume_length(
    range: &mut TokenRange<'_>,
    mode: ParserMode,
    value_range: ValueRange,
    unitless: UnitlessQuirk,
) -> Option<PrimitiveValue> {
    let token = range.peek();
    match token {
        ParserToken::Dimension { numeric, .. } => {
            let unit = UnitType::from_token(token);
            if unit == UnitType::QuirkyEms && !mode.is_ua_sheet() {
                return None;
            }
            if !unit.is_length() || !value_range.allows(numeric.value) {
                return None;
            }
            range.consume_including_whitespace();
            Some(PrimitiveValue::numeric(numeric.value, unit))
        }
        ParserToken::Number(numeric) => {
            if !should_accept_unitless_values(numeric.value, mode, unitless)
                || !value_range.allows(numeric.value)
            {
                return None;
            }
            let unit = if mode.is_svg_attribute() {
                UnitType::Number
            } else {
                UnitType::Pixels
            };
            range.consume_including_whitespace();
            Some(PrimitiveValue::numeric(numeric.value, unit))
        }
        _ => {
            if mode.is_svg_attribute() {
                return None;
            }
            let calc = CalcParser::new(range, value_range);
            if calc.category() == Some(CalculationCategory::Length) {
                return calc.consume_value(range);
            }
            None
        }
    }
}

/// Consume a `<length-percentage>`.
pub fn consume_length_or_percent(
    range: &mut TokenRange<'_>,
    mode: ParserMode,
    value_range: ValueRange,
    unitless: UnitlessQuirk,
) -> Option<PrimitiveValue> {
    match range.peek() {
        ParserToken::Dimension { .. } | ParserToken::Number(_) => {
            consume_length(range, mode, value_range, unitless)
        }
        ParserToken::Percentage(_) => consume_percent(range, value_range),
        _ => {
            let calc = CalcParser::new(range, value_range);
            if matches!(
                calc.category(),
                Some(
                    CalculationCategory::Length
                        | CalculationCategory::Percent
                        | CalculationCategory::PercentLength
                )
            ) {
                return calc.consume_value(range);
            }
            None
        }
    }
}

/// Consume an `<angle>`. A unitless zero is accepted as `0deg`.
pub fn consume_angle(range: &mut TokenRange<'_>) -> Option<PrimitiveValue> {
    let token = range.peek();
    match token {
        ParserToken::Dimension { numeric, .. } => {
            let unit = UnitType::from_token(token);
            if !unit.is_angle() {
                return None;
            }
            range.consume_including_whitespace();
            Some(PrimitiveValue::numeric(numeric.value, unit))
        }
        ParserToken::Number(numeric) if numeric.value == 0.0 => {
            range.consume_including_whitespace();
            Some(PrimitiveValue::numeric(0.0, UnitType::Degrees))
        }
        _ => {
            let calc = CalcParser::new(range, ValueRange::All);
            if calc.category() == Some(CalculationCategory::Angle) {
                return calc.consume_value(range);
            }
            None
        }
    }
}

/// Consume a `<time>`.
pub fn consume_time(range: &mut TokenRange<'_>, value_range: ValueRange) -> Option<PrimitiveValue> {
    let token = range.peek();
    if let ParserToken::Dimension { numeric, .. } = token {
        let unit = UnitType::from_token(token);
        if !unit.is_time() || !value_range.allows(numeric.value) {
            return None;
        }
        range.consume_including_whitespace();
        return Some(PrimitiveValue::numeric(numeric.value, unit));
    }
    let calc = CalcParser::new(range, value_range);
    if calc.category() == Some(CalculationCategory::Time) {
        return calc.consume_value(range);
    }
    None
}

/// Consume a `<resolution>`.
pub fn consume_resolution(range: &mut TokenRange<'_>) -> Option<PrimitiveValue> {
    let token = range.peek();
    let ParserToken::Dimension { numeric, .. } = token else {
        return None;
    };
    let unit = UnitType::from_token(token);
    if !unit.is_resolution() || numeric.value <= 0.0 {
        return None;
    }
    range.consume_including_whitespace();
    Some(PrimitiveValue::numeric(numeric.value, unit))
}

/// Consume a `<flex>` (`fr`) value.
pub fn consume_flex(range: &mut TokenRange<'_>) -> Option<PrimitiveValue> {
    let token = range.peek();
    let ParserToken::Dimension { numeric, .. } = token else {
        return None;
    };
    if UnitType::from_token(token) != UnitType::Fraction || numeric.value < 0.0 {
        return None;
    }
    range.consume_including_whitespace();
    Some(PrimitiveValue::numeric(numeric.value, UnitType::Fraction))
}
