//! CSS Color Module Level 3 — §4 Color units: keywords, `#hex`, `rgb[a]()` and `hsl[a]()`.
//! Spec: <https://www.w3.org/TR/css-color-3/>

use crate::chapter_3_identifiers::ValueId;
use crate::chapter_4_numbers::{ValueRange, consume_integer, consume_number, format_number};
use crate::chapter_5_percentages::consume_percent;
use crate::chapter_6_dimensions::UnitType;
use crate::primitive_value::PrimitiveValue;
use css_syntax::{ParserToken, TokenRange};

/// Bit count used to duplicate a single hex nibble into a full byte.
const NIBBLE_SHIFT: u32 = 4;

/// Just under 256, so `[0, 1]` maps evenly onto the 256 byte values when truncated.
const HSL_SCALE_FACTOR: f64 = 255.999_999_999_999_97;

/// A packed 8-bit-per-channel color, `0xAARRGGBB`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    pub const TRANSPARENT: Self = Self(0);
    pub const BLACK: Self = Self(0xFF00_0000);
    pub const WHITE: Self = Self(0xFFFF_FFFF);

    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }

    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::from_rgba(red, green, blue, u8::MAX)
    }

    pub const fn from_rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self(((alpha as u32) << 24) | ((red as u32) << 16) | ((green as u32) << 8) | (blue as u32))
    }

    pub const fn argb(self) -> u32 {
        self.0
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// True unless fully opaque.
    pub const fn has_alpha(self) -> bool {
        self.alpha() < u8::MAX
    }

    /// Color of a named color keyword (`transparent` included). Symbolic keywords such as
    /// `currentcolor` have no fixed color.
    pub fn from_value_id(id: ValueId) -> Option<Self> {
        if id == ValueId::Transparent {
            return Some(Self::TRANSPARENT);
        }
        id.named_color_rgb().map(|rgb| Self(0xFF00_0000 | rgb))
    }

    /// Parse 3, 4, 6 or 8 hex digits (no leading `#`).
    pub fn from_hex(digits: &str) -> Option<Self> {
        let bytes = digits.as_bytes();
        let mut nibbles = [0_u8; 8];
        for (slot, byte_val) in nibbles.iter_mut().zip(bytes) {
            *slot = hex_value(*byte_val)?;
        }
        let expand = |nibble: u8| nibble << NIBBLE_SHIFT | nibble;
        let pair = |high: u8, low: u8| high << NIBBLE_SHIFT | low;
        match (bytes.len(), nibbles) {
            (3, [red, green, blue, ..]) => {
                Some(Self::from_rgb(expand(red), expand(green), expand(blue)))
            }
            (4, [red, green, blue, alpha, ..]) => Some(Self::from_rgba(
                expand(red),
                expand(green),
                expand(blue),
                expand(alpha),
            )),
            (6, [red_high, red_low, green_high, green_low, blue_high, blue_low, ..]) => {
                Some(Self::from_rgb(
                    pair(red_high, red_low),
                    pair(green_high, green_low),
                    pair(blue_high, blue_low),
                ))
            }
            (8, [red_high, red_low, green_high, green_low, blue_high, blue_low, alpha_high, alpha_low]) => {
                Some(Self::from_rgba(
                    pair(red_high, red_low),
                    pair(green_high, green_low),
                    pair(blue_high, blue_low),
                    pair(alpha_high, alpha_low),
                ))
            }
            _ => None,
        }
    }

    /// Color from HSL components, hue in turns and the rest in `[0, 1]`.
    pub fn from_hsla(hue: f64, saturation: f64, lightness: f64, alpha: f64) -> Self {
        let alpha_byte = alpha_to_u8(alpha);
        if saturation == 0.0 {
            let grey = (lightness * HSL_SCALE_FACTOR) as u8;
            return Self::from_rgba(grey, grey, grey, alpha_byte);
        }
        let high = if lightness < 0.5 {
            lightness * (1.0 + saturation)
        } else {
            lightness + saturation - lightness * saturation
        };
        let low = 2.0 * lightness - high;
        let channel = |offset: f64| (hue_to_channel(low, high, hue + offset) * HSL_SCALE_FACTOR) as u8;
        Self::from_rgba(
            channel(1.0 / 3.0),
            channel(0.0),
            channel(-1.0 / 3.0),
            alpha_byte,
        )
    }

    /// `rgb(r, g, b)` when opaque, `rgba(r, g, b, a)` otherwise.
    pub fn serialized(self) -> String {
        let (red, green, blue) = (self.red(), self.green(), self.blue());
        if self.has_alpha() {
            let alpha = format_number(f64::from(self.alpha()) / 255.0);
            return format!("rgba({red}, {green}, {blue}, {alpha})");
        }
        format!("rgb({red}, {green}, {blue})")
    }
}

fn hue_to_channel(low: f64, high: f64, hue: f64) -> f64 {
    let wrapped = if hue < 0.0 {
        hue + 1.0
    } else if hue > 1.0 {
        hue - 1.0
    } else {
        hue
    };
    if wrapped * 6.0 < 1.0 {
        return low + (high - low) * wrapped * 6.0;
    }
    if wrapped * 2.0 < 1.0 {
        return high;
    }
    if wrapped * 3.0 < 2.0 {
        return low + (high - low) * (2.0 / 3.0 - wrapped) * 6.0;
    }
    low
}

/// Convert an ASCII hex digit to its numeric value.
pub const fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Alpha byte for an alpha value; out-of-range values clamp to `[0, 1]`.
pub fn alpha_to_u8(alpha: f64) -> u8 {
    ((alpha.clamp(0.0, 1.0) as f32) * 255.0f32).round() as u8
}

/// Byte value of one `rgb()` component. Percentages scale by 2.56; the result is truncated.
pub fn clamp_rgb_component(value: f64, is_percentage: bool) -> u8 {
    let scaled = if is_percentage { value * 2.56 } else { value };
    scaled.clamp(0.0, 255.0) as u8
}

fn consume_comma_including_whitespace(range: &mut TokenRange<'_>) -> bool {
    if !matches!(range.peek(), ParserToken::Comma) {
        return false;
    }
    range.consume_including_whitespace();
    true
}

fn consume_alpha(args: &mut TokenRange<'_>) -> Option<u8> {
    if !consume_comma_including_whitespace(args) {
        return None;
    }
    let alpha = consume_number(args, ValueRange::All)?;
    Some(alpha_to_u8(alpha.double_value()))
}

fn parse_rgb_parameters(mut args: TokenRange<'_>, with_alpha: bool) -> Option<Color> {
    args.consume_whitespace();
    let first = consume_integer(&mut args, f64::MIN)
        .or_else(|| consume_percent(&mut args, ValueRange::All))?;
    let is_percentage = first.is_percentage();
    let mut channels = [clamp_rgb_component(first.double_value(), is_percentage), 0, 0];
    for channel in channels.iter_mut().skip(1) {
        if !consume_comma_including_whitespace(&mut args) {
            return None;
        }
        let component = if is_percentage {
            consume_percent(&mut args, ValueRange::All)
        } else {
            consume_integer(&mut args, f64::MIN)
        }?;
        *channel = clamp_rgb_component(component.double_value(), is_percentage);
    }
    let alpha = if with_alpha {
        consume_alpha(&mut args)?
    } else {
        u8::MAX
    };
    if !args.at_end() {
        return None;
    }
    let [red, green, blue] = channels;
    Some(Color::from_rgba(red, green, blue, alpha))
}

fn parse_hsl_parameters(mut args: TokenRange<'_>, with_alpha: bool) -> Option<Color> {
    args.consume_whitespace();
    let hue_value = consume_number(&mut args, ValueRange::All)?;
    let hue = f64::from((hue_value.double_value() as i32).rem_euclid(360)) / 360.0;
    let mut fractions = [0.0_f64; 2];
    for fraction in &mut fractions {
        if !consume_comma_including_whitespace(&mut args) {
            return None;
        }
        let percent = consume_percent(&mut args, ValueRange::All)?;
        *fraction = percent.double_value().clamp(0.0, 100.0) / 100.0;
    }
    let alpha = if with_alpha {
        if !consume_comma_including_whitespace(&mut args) {
            return None;
        }
        consume_number(&mut args, ValueRange::All)?.double_value()
    } else {
        1.0
    };
    if !args.at_end() {
        return None;
    }
    let [saturation, lightness] = fractions;
    Some(Color::from_hsla(hue, saturation, lightness, alpha))
}

fn parse_color_function(range: &mut TokenRange<'_>) -> Option<Color> {
    let ParserToken::Function(name) = range.peek() else {
        return None;
    };
    let function = ValueId::from_name(name)?;
    let mut after = *range;
    let args = after.consume_block();
    after.consume_whitespace();
    let color = match function {
        ValueId::Rgb => parse_rgb_parameters(args, false),
        ValueId::Rgba => parse_rgb_parameters(args, true),
        ValueId::Hsl => parse_hsl_parameters(args, false),
        ValueId::Hsla => parse_hsl_parameters(args, true),
        _ => None,
    }?;
    *range = after;
    Some(color)
}

/// Hex digits a quirks-mode document may write without the `#`, e.g. `color: ff0000`.
fn quirky_hex_digits(token: &ParserToken) -> Option<String> {
    let digits = match token {
        ParserToken::Number(numeric) | ParserToken::Dimension { numeric, .. } => {
            if !numeric.is_integer() || !(0.0..1_000_000.0).contains(&numeric.value) {
                return None;
            }
            let mut digits = (numeric.value as i32).to_string();
            if let ParserToken::Dimension { unit, .. } = token {
                digits.push_str(unit);
            }
            while digits.len() < 6 {
                digits.insert(0, '0');
            }
            digits
        }
        ParserToken::Ident(value) => value.clone(),
        _ => return None,
    };
    matches!(digits.len(), 3 | 6).then_some(digits)
}

fn parse_hex_color(range: &mut TokenRange<'_>, accept_quirky_colors: bool) -> Option<Color> {
    let token = range.peek();
    let color = match token {
        ParserToken::Hash { value, .. } => Color::from_hex(value)?,
        _ if accept_quirky_colors => Color::from_hex(&quirky_hex_digits(token)?)?,
        _ => return None,
    };
    range.consume_including_whitespace();
    Some(color)
}

/// Consume a `<color>`.
///
/// Color keywords (named, `transparent`, `currentcolor` and the link colors) stay
/// identifiers so that computed-value time can resolve the symbolic ones; everything else
/// becomes an RGBA primitive.
pub fn consume_color(range: &mut TokenRange<'_>, accept_quirky_colors: bool) -> Option<PrimitiveValue> {
    if let ParserToken::Ident(name) = range.peek()
        && let Some(id) = ValueId::from_name(name)
        && id.is_color_keyword()
    {
        range.consume_including_whitespace();
        return Some(PrimitiveValue::identifier(id));
    }
    let color = parse_hex_color(range, accept_quirky_colors).or_else(|| parse_color_function(range))?;
    Some(PrimitiveValue::color(color))
}

/// Resolve a parsed `<color>` to a concrete color, when it does not depend on context.
pub fn primitive_to_color(value: &PrimitiveValue) -> Option<Color> {
    match value.unit_type() {
        UnitType::RgbColor => value.color_value(),
        UnitType::ValueId => value.value_id().and_then(Color::from_value_id),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_syntax::tokenize;

    fn parse(text: &str, quirks: bool) -> Option<PrimitiveValue> {
        let tokens = tokenize(text);
        let mut range = TokenRange::new(&tokens);
        let value = consume_color(&mut range, quirks)?;
        range.at_end().then_some(value)
    }

    fn parse_rgba(text: &str) -> Option<Color> {
        parse(text, false).as_ref().and_then(primitive_to_color)
    }

    /// # Panics
    /// Panics if hex forms are decoded incorrectly.
    #[test]
    fn hex_forms() {
        assert_eq!(Color::from_hex("abc"), Some(Color::from_rgb(0xAA, 0xBB, 0xCC)));
        assert_eq!(Color::from_hex("abcd"), Some(Color::from_rgba(0xAA, 0xBB, 0xCC, 0xDD)));
        assert_eq!(Color::from_hex("102030"), Some(Color::from_rgb(0x10, 0x20, 0x30)));
        assert_eq!(
            Color::from_hex("10203040"),
            Some(Color::from_rgba(0x10, 0x20, 0x30, 0x40))
        );
        assert_eq!(Color::from_hex("12345"), None);
        assert_eq!(Color::from_hex("ggg"), None);
    }

    /// # Panics
    /// Panics if alpha bytes drift from the tenths table.
    #[test]
    fn alpha_tenths() {
        let expected = [0, 26, 51, 77, 102, 128, 153, 179, 204, 230];
        for (tenth, byte_val) in expected.iter().enumerate() {
            assert_eq!(alpha_to_u8(tenth as f64 / 10.0), *byte_val);
        }
        assert_eq!(alpha_to_u8(1.5), 255);
        assert_eq!(alpha_to_u8(-0.5), 0);
    }

    /// # Panics
    /// Panics if `rgb()` components are not clamped or scaled.
    #[test]
    fn rgb_functions() {
        assert_eq!(parse_rgba("rgb(255, 0, 0)"), Some(Color::from_rgb(255, 0, 0)));
        assert_eq!(parse_rgba("rgb(300, -5, 10)"), Some(Color::from_rgb(255, 0, 10)));
        assert_eq!(parse_rgba("rgb(50%, 100%, 0%)"), Some(Color::from_rgb(128, 255, 0)));
        assert_eq!(parse_rgba("rgba(0, 0, 0, 0.1)"), Some(Color::from_rgba(0, 0, 0, 26)));
        assert_eq!(parse_rgba("RGBA(0,0,0,2)"), Some(Color::BLACK));
        assert!(parse_rgba("rgb(50%, 0, 0)").is_none());
        assert!(parse_rgba("rgb(1.5, 0, 0)").is_none());
        assert!(parse_rgba("rgb(0, 0)").is_none());
        assert!(parse_rgba("rgb(0, 0, 0, 1)").is_none());
    }

    /// # Panics
    /// Panics if `hsl()` conversion drifts.
    #[test]
    fn hsl_functions() {
        assert_eq!(parse_rgba("hsl(0, 100%, 50%)"), Some(Color::from_rgb(255, 0, 0)));
        assert_eq!(parse_rgba("hsl(120, 100%, 25%)"), Some(Color::from_rgb(0, 127, 0)));
        assert_eq!(parse_rgba("hsla(480, 0%, 100%, 0.5)"), Some(Color::from_rgba(255, 255, 255, 128)));
    }

    /// # Panics
    /// Panics if keywords are resolved at parse time or quirks leak into standards mode.
    #[test]
    fn keywords_and_quirks() {
        let value = parse("CurrentColor", false);
        assert_eq!(value.and_then(|color| color.value_id()), Some(ValueId::Currentcolor));
        assert_eq!(parse_rgba("Red"), Some(Color::from_rgb(255, 0, 0)));
        assert!(parse("ff0000", false).is_none());
        let quirky = parse("ff0000", true);
        assert_eq!(quirky.as_ref().and_then(primitive_to_color), Some(Color::from_rgb(255, 0, 0)));
        let quirky = parse("112233", true);
        assert_eq!(quirky.as_ref().and_then(primitive_to_color), Some(Color::from_rgb(0x11, 0x22, 0x33)));
    }

    /// # Panics
    /// Panics if serialization does not reparse to the same color.
    #[test]
    fn serialization_round_trips() {
        let color = Color::from_rgba(1, 2, 3, 26);
        assert_eq!(color.serialized(), "rgba(1, 2, 3, 0.101961)");
        assert_eq!(parse_rgba(&color.serialized()), Some(color));
        assert_eq!(Color::from_rgb(4, 5, 6).serialized(), "rgb(4, 5, 6)");
    }
}
