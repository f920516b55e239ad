//! CSS Values and Units Module Level 3 — Value model, unit types and `calc()`.
//! Spec: <https://www.w3.org/TR/css-values-3/>

#![forbid(unsafe_code)]

// Per-chapter modules mirroring the spec table of contents.
pub mod chapter_10_calc;
pub mod chapter_3_identifiers;
pub mod chapter_4_numbers;
pub mod chapter_5_percentages;
pub mod chapter_6_dimensions;
pub mod chapter_9_colors;

// The value model shared by the parser, the style builder and animations.
pub mod primitive_value;
pub mod property_id;
pub mod value;
pub mod variable_data;

pub use chapter_10_calc::{
    CalcExpressionNode, CalcOperator, CalcParser, CalcValue, CalculationCategory,
    MAX_EXPRESSION_DEPTH, PixelsAndPercent, is_calc_function,
};
pub use chapter_3_identifiers::{
    ValueId, consume_custom_ident, consume_ident, consume_ident_in, consume_url,
    function_value_id, token_value_id,
};
pub use chapter_4_numbers::{
    ValueRange, consume_integer, consume_number, consume_positive_integer, format_number,
};
pub use chapter_5_percentages::{consume_number_or_percent, consume_percent};
pub use chapter_6_dimensions::{
    CssLengthArray, LengthConversionData, LengthUnitType, UnitCategory, UnitType,
    UnitlessQuirk, consume_angle, consume_flex, consume_length, consume_length_or_percent,
    consume_resolution, consume_time,
};
pub use chapter_9_colors::{
    Color, alpha_to_u8, clamp_rgb_component, consume_color, hex_value, primitive_to_color,
};
pub use primitive_value::{PrimitiveValue, RectValue};
pub use property_id::PropertyId;
pub use value::{
    ClassType, CrossFadeValue, CssValue, CustomPropertyDeclaration, CustomPropertyValue,
    FunctionValue, GridLineNames, IdenticalValuesPolicy, ImageValue, PathValue, QuadValue,
    ShadowValue, ValueList, ValueListSeparator, ValuePair,
};
pub use variable_data::VariableData;
