//! Primitive values: one number-with-unit, keyword, identifier, URL, rect, color or
//! `calc()` expression.

use crate::chapter_10_calc::{CalcValue, CalculationCategory};
use crate::chapter_3_identifiers::ValueId;
use crate::chapter_4_numbers::format_number;
use crate::chapter_6_dimensions::{
    CssLengthArray, LengthConversionData, LengthUnitType, UnitCategory, UnitType,
};
use crate::chapter_9_colors::Color;
use css_syntax::{serialize_identifier, serialize_url};
use once_cell::sync::OnceCell;

/// `rect(top, right, bottom, left)`; each edge is a length or `auto`.
#[derive(Clone, Debug, PartialEq)]
pub struct RectValue {
    pub top: PrimitiveValue,
    pub right: PrimitiveValue,
    pub bottom: PrimitiveValue,
    pub left: PrimitiveValue,
}

impl RectValue {
    pub fn edges(&self) -> [&PrimitiveValue; 4] {
        [&self.top, &self.right, &self.bottom, &self.left]
    }

    pub fn css_text(&self) -> String {
        format!(
            "rect({}, {}, {}, {})",
            self.top.css_text(),
            self.right.css_text(),
            self.bottom.css_text(),
            self.left.css_text()
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Payload {
    Numeric { value: f64, unit: UnitType },
    Calc(Box<CalcValue>),
    ValueId(ValueId),
    CustomIdent(String),
    Uri(String),
    Rect(Box<RectValue>),
    RgbColor(Color),
}

/// An immutable primitive value. Exactly one payload is active, named by [`UnitType`].
///
/// The serialized text is computed on first use and kept with the value, so it is freed
/// together with it.
#[derive(Clone, Debug)]
pub struct PrimitiveValue {
    payload: Payload,
    css_text_cache: OnceCell<String>,
}

impl PartialEq for PrimitiveValue {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl PrimitiveValue {
    const fn from_payload(payload: Payload) -> Self {
        Self {
            payload,
            css_text_cache: OnceCell::new(),
        }
    }

    /// A number in `unit`. Non-finite numbers are stored as zero.
    pub fn numeric(value: f64, unit: UnitType) -> Self {
        let value = if value.is_finite() {
            value
        } else {
            log::trace!(target: "css::values", "non-finite {unit:?} replaced by 0");
            0.0
        };
        Self::from_payload(Payload::Numeric { value, unit })
    }

    pub const fn identifier(id: ValueId) -> Self {
        Self::from_payload(Payload::ValueId(id))
    }

    pub fn custom_ident(name: String) -> Self {
        Self::from_payload(Payload::CustomIdent(name))
    }

    pub fn uri(url: String) -> Self {
        Self::from_payload(Payload::Uri(url))
    }

    pub fn calc(value: CalcValue) -> Self {
        Self::from_payload(Payload::Calc(Box::new(value)))
    }

    pub fn rect(rect: RectValue) -> Self {
        Self::from_payload(Payload::Rect(Box::new(rect)))
    }

    pub const fn color(color: Color) -> Self {
        Self::from_payload(Payload::RgbColor(color))
    }

    pub fn unit_type(&self) -> UnitType {
        match &self.payload {
            Payload::Numeric { unit, .. } => *unit,
            Payload::Calc(calc) => calc.primitive_unit_type(),
            Payload::ValueId(_) => UnitType::ValueId,
            Payload::CustomIdent(_) => UnitType::CustomIdent,
            Payload::Uri(_) => UnitType::Uri,
            Payload::Rect(_) => UnitType::Rect,
            Payload::RgbColor(_) => UnitType::RgbColor,
        }
    }

    pub const fn is_calc(&self) -> bool {
        matches!(self.payload, Payload::Calc(_))
    }

    pub fn calc_value(&self) -> Option<&CalcValue> {
        match &self.payload {
            Payload::Calc(calc) => Some(calc),
            _ => None,
        }
    }

    fn calc_category(&self) -> Option<CalculationCategory> {
        self.calc_value().map(CalcValue::category)
    }

    pub fn is_number(&self) -> bool {
        matches!(self.unit_type(), UnitType::Number | UnitType::Integer)
            || self.calc_category() == Some(CalculationCategory::Number)
    }

    pub fn is_percentage(&self) -> bool {
        self.unit_type() == UnitType::Percentage
            || self.calc_category() == Some(CalculationCategory::Percent)
    }

    pub fn is_length(&self) -> bool {
        self.unit_type().is_length() || self.calc_category() == Some(CalculationCategory::Length)
    }

    /// A length, a percentage, or a `calc()` mixing both.
    pub fn is_length_or_percentage(&self) -> bool {
        self.is_length()
            || self.is_percentage()
            || self.calc_category() == Some(CalculationCategory::PercentLength)
    }

    pub fn is_angle(&self) -> bool {
        self.unit_type().is_angle() || self.calc_category() == Some(CalculationCategory::Angle)
    }

    pub fn is_time(&self) -> bool {
        self.unit_type().is_time() || self.calc_category() == Some(CalculationCategory::Time)
    }

    pub fn is_flex(&self) -> bool {
        self.unit_type() == UnitType::Fraction
    }

    pub const fn is_value_id(&self) -> bool {
        matches!(self.payload, Payload::ValueId(_))
    }

    pub const fn value_id(&self) -> Option<ValueId> {
        match self.payload {
            Payload::ValueId(id) => Some(id),
            _ => None,
        }
    }

    /// Custom identifier or URL text.
    pub fn string_value(&self) -> Option<&str> {
        match &self.payload {
            Payload::CustomIdent(text) | Payload::Uri(text) => Some(text),
            _ => None,
        }
    }

    pub fn rect_value(&self) -> Option<&RectValue> {
        match &self.payload {
            Payload::Rect(rect) => Some(rect),
            _ => None,
        }
    }

    pub const fn color_value(&self) -> Option<Color> {
        match self.payload {
            Payload::RgbColor(color) => Some(color),
            _ => None,
        }
    }

    /// Number in the value's own unit; `calc()` values are evaluated and clamped.
    pub fn double_value(&self) -> f64 {
        match &self.payload {
            Payload::Numeric { value, .. } => *value,
            Payload::Calc(calc) => calc.double_value(),
            _ => 0.0,
        }
    }

    /// Number rounded to the nearest integer, saturating at the `i32` range.
    pub fn int_value(&self) -> i32 {
        self.double_value().round() as i32
    }

    fn double_value_in_canonical_unit(&self) -> f64 {
        let unit = match &self.payload {
            Payload::Calc(calc) => calc.expression().type_with_calc_resolved(),
            _ => self.unit_type(),
        };
        self.double_value() * unit.conversion_to_canonical_units_scale_factor()
    }

    pub fn compute_degrees(&self) -> f64 {
        debug_assert!(self.is_angle(), "{:?} is not an angle", self.unit_type());
        self.double_value_in_canonical_unit()
    }

    pub fn compute_seconds(&self) -> f64 {
        debug_assert!(self.is_time(), "{:?} is not a time", self.unit_type());
        self.double_value_in_canonical_unit() / 1000.0
    }

    /// Dots per CSS pixel of a `<resolution>`.
    pub fn compute_dots_per_pixel(&self) -> f64 {
        self.double_value_in_canonical_unit()
    }

    /// Pixels for a length; plain numbers are taken as pixels.
    pub fn compute_length_px(&self, conversion_data: &LengthConversionData) -> f64 {
        match &self.payload {
            Payload::Numeric { value, unit } => {
                if matches!(unit.category(), UnitCategory::Number) {
                    return *value * conversion_data.zoom;
                }
                conversion_data.compute_length_px(*value, *unit)
            }
            Payload::Calc(calc) => calc.compute_length_px(conversion_data),
            _ => {
                debug_assert!(false, "{:?} is not a length", self.unit_type());
                0.0
            }
        }
    }

    /// Add this length (or percentage) into the per-unit slots of `array`.
    pub fn accumulate_length_array(&self, array: &mut CssLengthArray, multiplier: f64) {
        match &self.payload {
            Payload::Numeric { value, unit } => {
                if let Some(slot) = unit.length_unit_type() {
                    let scale = unit.conversion_to_canonical_units_scale_factor();
                    array.add(slot, value * scale * multiplier);
                }
            }
            Payload::Calc(calc) => calc.accumulate_length_array(array, multiplier),
            _ => {}
        }
    }

    /// Whether the value depends on font metrics.
    pub fn is_font_relative_length(&self) -> bool {
        self.relative_length_slots(UnitType::is_font_relative_length)
    }

    /// Whether the value depends on the viewport size.
    pub fn is_viewport_percentage_length(&self) -> bool {
        self.relative_length_slots(UnitType::is_viewport_percentage_length)
    }

    fn relative_length_slots(&self, predicate: fn(UnitType) -> bool) -> bool {
        match &self.payload {
            Payload::Numeric { unit, .. } => predicate(*unit),
            Payload::Calc(calc) => {
                let mut array = CssLengthArray::default();
                calc.accumulate_length_array(&mut array, 1.0);
                LengthUnitType::ALL
                    .iter()
                    .any(|slot| array.has(*slot) && predicate(slot.unit_type()))
            }
            _ => false,
        }
    }

    /// Structural equality; the serialization cache is not compared.
    pub fn equals(&self, other: &Self) -> bool {
        self.payload == other.payload
    }

    /// Serialization, cached after the first call.
    pub fn css_text(&self) -> String {
        self.css_text_cache
            .get_or_init(|| self.compute_css_text())
            .clone()
    }

    fn compute_css_text(&self) -> String {
        match &self.payload {
            Payload::Numeric {
                value,
                unit: UnitType::Integer,
            } => (*value as i64).to_string(),
            Payload::Numeric { value, unit } => format!("{}{}", format_number(*value), unit.suffix()),
            Payload::Calc(calc) => calc.css_text(),
            Payload::ValueId(id) => id.name().to_owned(),
            Payload::CustomIdent(name) => serialize_identifier(name),
            Payload::Uri(url) => serialize_url(url),
            Payload::Rect(rect) => rect.css_text(),
            Payload::RgbColor(color) => color.serialized(),
        }
    }
}
