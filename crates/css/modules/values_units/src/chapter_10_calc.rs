//! CSS Values & Units Level 3 — §8.1 Mathematical expressions: `calc()`.
//! Spec: <https://www.w3.org/TR/css-values-3/#calc-notation>
//!
//! Expressions are type-checked while they are built: every node computes its
//! [`CalculationCategory`] once, and a combination that lands in
//! [`CalculationCategory::Other`] is never constructed. Constant sub-expressions are
//! folded into single leaves as the tree is assembled.

use crate::chapter_4_numbers::{ValueRange, format_number};
use crate::chapter_6_dimensions::{CssLengthArray, LengthConversionData, UnitType};
use crate::primitive_value::PrimitiveValue;
use css_syntax::{ParserToken, TokenRange};

/// Deepest nesting of `calc()`/parenthesised groups accepted, counting the outer `calc()`.
pub const MAX_EXPRESSION_DEPTH: usize = 100;

/// Result type of a (sub-)expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CalculationCategory {
    Number,
    Length,
    Percent,
    PercentNumber,
    PercentLength,
    Angle,
    Time,
    Frequency,
    Other,
}

impl CalculationCategory {
    pub const ALL: [Self; 9] = [
        Self::Number,
        Self::Length,
        Self::Percent,
        Self::PercentNumber,
        Self::PercentLength,
        Self::Angle,
        Self::Time,
        Self::Frequency,
        Self::Other,
    ];

    /// Category of a leaf in `unit`.
    pub const fn from_unit(unit: UnitType) -> Self {
        match unit {
            UnitType::Number | UnitType::Integer => Self::Number,
            UnitType::Percentage => Self::Percent,
            UnitType::Ems
            | UnitType::Exs
            | UnitType::Pixels
            | UnitType::Centimeters
            | UnitType::Millimeters
            | UnitType::Inches
            | UnitType::Points
            | UnitType::Picas
            | UnitType::Rems
            | UnitType::Chs
            | UnitType::ViewportWidth
            | UnitType::ViewportHeight
            | UnitType::ViewportMin
            | UnitType::ViewportMax => Self::Length,
            UnitType::Degrees | UnitType::Radians | UnitType::Gradians | UnitType::Turns => {
                Self::Angle
            }
            UnitType::Milliseconds | UnitType::Seconds => Self::Time,
            UnitType::Hertz | UnitType::Kilohertz => Self::Frequency,
            _ => Self::Other,
        }
    }

    /// Category of `left <operator> right`. `Other` absorbs everything.
    ///
    /// Division by a zero-valued number is rejected by the expression builder, which can
    /// see the operand value.
    pub const fn combine(left: Self, right: Self, operator: CalcOperator) -> Self {
        if matches!(left, Self::Other) || matches!(right, Self::Other) {
            return Self::Other;
        }
        match operator {
            CalcOperator::Add | CalcOperator::Subtract => Self::add_subtract_result(left, right),
            CalcOperator::Multiply => match (left, right) {
                (Self::Number, other) | (other, Self::Number) => other,
                _ => Self::Other,
            },
            CalcOperator::Divide => match right {
                Self::Number => left,
                _ => Self::Other,
            },
        }
    }

    const fn add_subtract_result(left: Self, right: Self) -> Self {
        match (left, right) {
            (Self::Number, Self::Number) => Self::Number,
            (Self::Length, Self::Length) => Self::Length,
            (Self::Percent, Self::Percent) => Self::Percent,
            (Self::Angle, Self::Angle) => Self::Angle,
            (Self::Time, Self::Time) => Self::Time,
            (Self::Frequency, Self::Frequency) => Self::Frequency,
            (
                Self::Number | Self::Percent | Self::PercentNumber,
                Self::Number | Self::Percent | Self::PercentNumber,
            ) => Self::PercentNumber,
            (
                Self::Length | Self::Percent | Self::PercentLength,
                Self::Length | Self::Percent | Self::PercentLength,
            ) => Self::PercentLength,
            _ => Self::Other,
        }
    }
}

/// Arithmetic operator of a binary node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CalcOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl CalcOperator {
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    fn from_token(token: &ParserToken) -> Option<Self> {
        match token {
            ParserToken::Delimiter('+') => Some(Self::Add),
            ParserToken::Delimiter('-') => Some(Self::Subtract),
            ParserToken::Delimiter('*') => Some(Self::Multiply),
            ParserToken::Delimiter('/') => Some(Self::Divide),
            _ => None,
        }
    }

    fn evaluate(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Subtract => left - right,
            Self::Multiply => left * right,
            Self::Divide => {
                if right == 0.0 {
                    f64::NAN
                } else {
                    left / right
                }
            }
        }
    }
}

/// A length split into an absolute and a percentage part.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PixelsAndPercent {
    pub pixels: f32,
    pub percent: f32,
}

impl PixelsAndPercent {
    pub const fn new(pixels: f32, percent: f32) -> Self {
        Self { pixels, percent }
    }
}

/// Leaf of an expression tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalcPrimitiveValue {
    value: f64,
    unit: UnitType,
    is_integer: bool,
}

impl CalcPrimitiveValue {
    pub const fn value(&self) -> f64 {
        self.value
    }

    pub const fn unit(&self) -> UnitType {
        self.unit
    }
}

/// Interior node of an expression tree.
#[derive(Clone, Debug, PartialEq)]
pub struct CalcBinaryOperation {
    left: CalcExpressionNode,
    right: CalcExpressionNode,
    operator: CalcOperator,
    category: CalculationCategory,
    is_integer: bool,
}

impl CalcBinaryOperation {
    pub const fn left(&self) -> &CalcExpressionNode {
        &self.left
    }

    pub const fn right(&self) -> &CalcExpressionNode {
        &self.right
    }

    pub const fn operator(&self) -> CalcOperator {
        self.operator
    }
}

/// A type-checked `calc()` expression tree.
#[derive(Clone, Debug, PartialEq)]
pub enum CalcExpressionNode {
    Primitive(CalcPrimitiveValue),
    BinaryOperation(Box<CalcBinaryOperation>),
}

impl CalcExpressionNode {
    /// Leaf for a finite number in a unit `calc()` understands.
    pub fn leaf(value: f64, unit: UnitType, is_integer: bool) -> Option<Self> {
        let unit = if unit == UnitType::Integer {
            UnitType::Number
        } else {
            unit
        };
        if !value.is_finite() || CalculationCategory::from_unit(unit) == CalculationCategory::Other
        {
            return None;
        }
        Some(Self::Primitive(CalcPrimitiveValue {
            value,
            unit,
            is_integer,
        }))
    }

    /// Binary node without folding; `None` when the operand types do not combine.
    pub fn binary(left: Self, right: Self, operator: CalcOperator) -> Option<Self> {
        let category = determine_category(&left, &right, operator);
        if category == CalculationCategory::Other {
            return None;
        }
        let is_integer = is_integer_result(&left, &right, operator);
        Some(Self::BinaryOperation(Box::new(CalcBinaryOperation {
            left,
            right,
            operator,
            category,
            is_integer,
        })))
    }

    /// Binary node with constant folding.
    pub fn simplified(operator: CalcOperator, left: Self, right: Self) -> Option<Self> {
        let left_category = left.category();
        let right_category = right.category();
        let is_integer = is_integer_result(&left, &right, operator);

        if left_category == CalculationCategory::Number
            && right_category == CalculationCategory::Number
        {
            let folded = operator.evaluate(left.double_value(), right.double_value());
            return Self::leaf(folded, UnitType::Number, is_integer);
        }

        match operator {
            CalcOperator::Add | CalcOperator::Subtract => {
                if left_category == right_category {
                    let left_type = left.type_with_calc_resolved();
                    let right_type = right.type_with_calc_resolved();
                    if left_type.has_double_value() && right_type.has_double_value() {
                        if left_type == right_type {
                            let folded =
                                operator.evaluate(left.double_value(), right.double_value());
                            return Self::leaf(folded, left_type, is_integer);
                        }
                        let unit_category = left_type.category();
                        let canonical = UnitType::canonical_unit_for_category(unit_category);
                        if unit_category == right_type.category()
                            && canonical != UnitType::Unknown
                        {
                            let left_value = left.double_value()
                                * left_type.conversion_to_canonical_units_scale_factor();
                            let right_value = right.double_value()
                                * right_type.conversion_to_canonical_units_scale_factor();
                            let folded = operator.evaluate(left_value, right_value);
                            return Self::leaf(folded, canonical, is_integer);
                        }
                    }
                }
            }
            CalcOperator::Multiply | CalcOperator::Divide => {
                let number_on_left = left_category == CalculationCategory::Number;
                let number_on_right = right_category == CalculationCategory::Number;
                if !number_on_left && !number_on_right {
                    return None;
                }
                if number_on_left && !number_on_right && operator == CalcOperator::Divide {
                    return None;
                }
                let (number_side, other_side) = if number_on_left {
                    (&left, &right)
                } else {
                    (&right, &left)
                };
                let number = number_side.double_value();
                if !number.is_finite() || (operator == CalcOperator::Divide && number == 0.0) {
                    return None;
                }
                let other_type = other_side.type_with_calc_resolved();
                if other_type.has_double_value() {
                    let folded = operator.evaluate(other_side.double_value(), number);
                    return Self::leaf(folded, other_type, is_integer);
                }
            }
        }

        Self::binary(left, right, operator)
    }

    pub fn category(&self) -> CalculationCategory {
        match self {
            Self::Primitive(leaf) => CalculationCategory::from_unit(leaf.unit),
            Self::BinaryOperation(operation) => operation.category,
        }
    }

    pub fn is_integer(&self) -> bool {
        match self {
            Self::Primitive(leaf) => leaf.is_integer,
            Self::BinaryOperation(operation) => operation.is_integer,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.double_value() == 0.0
    }

    /// The single unit this expression resolves to, or `Unknown` when it mixes units.
    pub fn type_with_calc_resolved(&self) -> UnitType {
        match self {
            Self::Primitive(leaf) => leaf.unit,
            Self::BinaryOperation(operation) => match operation.category {
                CalculationCategory::Number => UnitType::Number,
                CalculationCategory::Length | CalculationCategory::Percent => {
                    if operation.left.category() == CalculationCategory::Number {
                        return operation.right.type_with_calc_resolved();
                    }
                    if operation.right.category() == CalculationCategory::Number {
                        return operation.left.type_with_calc_resolved();
                    }
                    let left_type = operation.left.type_with_calc_resolved();
                    if left_type == operation.right.type_with_calc_resolved() {
                        return left_type;
                    }
                    UnitType::Unknown
                }
                CalculationCategory::Angle => UnitType::Degrees,
                CalculationCategory::Time => UnitType::Milliseconds,
                CalculationCategory::Frequency => UnitType::Hertz,
                CalculationCategory::PercentLength
                | CalculationCategory::PercentNumber
                | CalculationCategory::Other => UnitType::Unknown,
            },
        }
    }

    /// Value of the expression in the units of its leaves.
    pub fn double_value(&self) -> f64 {
        match self {
            Self::Primitive(leaf) => leaf.value,
            Self::BinaryOperation(operation) => operation.operator.evaluate(
                operation.left.double_value(),
                operation.right.double_value(),
            ),
        }
    }

    pub fn compute_length_px(&self, conversion_data: &LengthConversionData) -> f64 {
        match self {
            Self::Primitive(leaf) => match CalculationCategory::from_unit(leaf.unit) {
                CalculationCategory::Length => {
                    conversion_data.compute_length_px(leaf.value, leaf.unit)
                }
                CalculationCategory::Number | CalculationCategory::Percent => leaf.value,
                _ => {
                    debug_assert!(false, "non-length leaf in a length expression");
                    0.0
                }
            },
            Self::BinaryOperation(operation) => operation.operator.evaluate(
                operation.left.compute_length_px(conversion_data),
                operation.right.compute_length_px(conversion_data),
            ),
        }
    }

    /// Add `multiplier` times this expression into `value`.
    pub fn accumulate_pixels_and_percent(
        &self,
        conversion_data: &LengthConversionData,
        value: &mut PixelsAndPercent,
        multiplier: f64,
    ) {
        match self {
            Self::Primitive(leaf) => match CalculationCategory::from_unit(leaf.unit) {
                CalculationCategory::Length => {
                    let pixels = conversion_data.compute_length_px(leaf.value, leaf.unit);
                    value.pixels += (pixels * multiplier) as f32;
                }
                CalculationCategory::Percent => {
                    value.percent += (leaf.value * multiplier) as f32;
                }
                _ => debug_assert!(false, "unexpected leaf in a length expression"),
            },
            Self::BinaryOperation(operation) => {
                let (left, right) = (&operation.left, &operation.right);
                match operation.operator {
                    CalcOperator::Add => {
                        left.accumulate_pixels_and_percent(conversion_data, value, multiplier);
                        right.accumulate_pixels_and_percent(conversion_data, value, multiplier);
                    }
                    CalcOperator::Subtract => {
                        left.accumulate_pixels_and_percent(conversion_data, value, multiplier);
                        right.accumulate_pixels_and_percent(conversion_data, value, -multiplier);
                    }
                    CalcOperator::Multiply => {
                        if left.category() == CalculationCategory::Number {
                            right.accumulate_pixels_and_percent(
                                conversion_data,
                                value,
                                multiplier * left.double_value(),
                            );
                        } else {
                            left.accumulate_pixels_and_percent(
                                conversion_data,
                                value,
                                multiplier * right.double_value(),
                            );
                        }
                    }
                    CalcOperator::Divide => {
                        left.accumulate_pixels_and_percent(
                            conversion_data,
                            value,
                            multiplier / right.double_value(),
                        );
                    }
                }
            }
        }
    }

    /// Add `multiplier` times this expression into the per-unit slots of `array`.
    pub fn accumulate_length_array(&self, array: &mut CssLengthArray, multiplier: f64) {
        match self {
            Self::Primitive(leaf) => {
                let Some(slot) = leaf.unit.length_unit_type() else {
                    debug_assert!(false, "{:?} has no length array slot", leaf.unit);
                    return;
                };
                let scale = leaf.unit.conversion_to_canonical_units_scale_factor();
                array.add(slot, leaf.value * scale * multiplier);
            }
            Self::BinaryOperation(operation) => {
                let (left, right) = (&operation.left, &operation.right);
                match operation.operator {
                    CalcOperator::Add => {
                        left.accumulate_length_array(array, multiplier);
                        right.accumulate_length_array(array, multiplier);
                    }
                    CalcOperator::Subtract => {
                        left.accumulate_length_array(array, multiplier);
                        right.accumulate_length_array(array, -multiplier);
                    }
                    CalcOperator::Multiply => {
                        if left.category() == CalculationCategory::Number {
                            right.accumulate_length_array(array, multiplier * left.double_value());
                        } else {
                            left.accumulate_length_array(array, multiplier * right.double_value());
                        }
                    }
                    CalcOperator::Divide => {
                        left.accumulate_length_array(array, multiplier / right.double_value());
                    }
                }
            }
        }
    }

    /// Serialization; binary nodes are parenthesised.
    pub fn css_text(&self) -> String {
        match self {
            Self::Primitive(leaf) => format!("{}{}", format_number(leaf.value), leaf.unit.suffix()),
            Self::BinaryOperation(_) => format!("({})", self.css_text_unparenthesized()),
        }
    }

    fn css_text_unparenthesized(&self) -> String {
        match self {
            Self::Primitive(_) => self.css_text(),
            Self::BinaryOperation(operation) => format!(
                "{} {} {}",
                operation.left.css_text(),
                operation.operator.symbol(),
                operation.right.css_text()
            ),
        }
    }
}

fn determine_category(
    left: &CalcExpressionNode,
    right: &CalcExpressionNode,
    operator: CalcOperator,
) -> CalculationCategory {
    if operator == CalcOperator::Divide
        && right.category() == CalculationCategory::Number
        && right.is_zero()
    {
        return CalculationCategory::Other;
    }
    CalculationCategory::combine(left.category(), right.category(), operator)
}

fn is_integer_result(
    left: &CalcExpressionNode,
    right: &CalcExpressionNode,
    operator: CalcOperator,
) -> bool {
    operator != CalcOperator::Divide && left.is_integer() && right.is_integer()
}

/// True for `calc(` and the legacy `-webkit-calc(` function tokens.
pub fn is_calc_function(token: &ParserToken) -> bool {
    token.is_function_ignoring_case("calc") || token.is_function_ignoring_case("-webkit-calc")
}

/// Parse the contents of a `calc()` block.
pub fn parse_calc_expression(range: TokenRange<'_>) -> Option<CalcExpressionNode> {
    let mut tokens = range;
    tokens.consume_whitespace();
    let expression = parse_additive_expression(&mut tokens, 1)?;
    if !tokens.at_end() {
        return None;
    }
    Some(expression)
}

fn parse_value(tokens: &mut TokenRange<'_>) -> Option<CalcExpressionNode> {
    let token = tokens.peek();
    let numeric = token.numeric()?;
    let node = CalcExpressionNode::leaf(
        numeric.value,
        UnitType::from_token(token),
        numeric.is_integer(),
    )?;
    tokens.consume_including_whitespace();
    Some(node)
}

fn parse_value_term(tokens: &mut TokenRange<'_>, depth: usize) -> Option<CalcExpressionNode> {
    if tokens.at_end() {
        return None;
    }
    let token = tokens.peek();
    if matches!(token, ParserToken::LeftParenthesis) || is_calc_function(token) {
        if depth >= MAX_EXPRESSION_DEPTH {
            log::debug!(
                target: "css::calc",
                "calc() nesting deeper than {MAX_EXPRESSION_DEPTH} levels rejected"
            );
            return None;
        }
        let mut inner = tokens.consume_block();
        tokens.consume_whitespace();
        inner.consume_whitespace();
        let expression = parse_additive_expression(&mut inner, depth + 1)?;
        if !inner.at_end() {
            return None;
        }
        return Some(expression);
    }
    parse_value(tokens)
}

fn parse_multiplicative_expression(
    tokens: &mut TokenRange<'_>,
    depth: usize,
) -> Option<CalcExpressionNode> {
    let mut result = parse_value_term(tokens, depth)?;
    while !tokens.at_end() {
        let operator = match CalcOperator::from_token(tokens.peek()) {
            Some(operator @ (CalcOperator::Multiply | CalcOperator::Divide)) => operator,
            _ => break,
        };
        tokens.consume_including_whitespace();
        let right = parse_value_term(tokens, depth)?;
        result = CalcExpressionNode::simplified(operator, result, right)?;
    }
    Some(result)
}

fn parse_additive_expression(
    tokens: &mut TokenRange<'_>,
    depth: usize,
) -> Option<CalcExpressionNode> {
    let mut result = parse_multiplicative_expression(tokens, depth)?;
    while !tokens.at_end() {
        let operator = match CalcOperator::from_token(tokens.peek()) {
            Some(operator @ (CalcOperator::Add | CalcOperator::Subtract)) => operator,
            _ => break,
        };
        // `+` and `-` must be surrounded by whitespace.
        if !tokens.preceding_token().is_some_and(ParserToken::is_whitespace) {
            return None;
        }
        tokens.consume();
        if !tokens.peek().is_whitespace() {
            return None;
        }
        tokens.consume_including_whitespace();
        let right = parse_multiplicative_expression(tokens, depth)?;
        result = CalcExpressionNode::simplified(operator, result, right)?;
    }
    Some(result)
}

/// A complete `calc()` value: an expression plus the range its result is clamped to.
#[derive(Clone, Debug, PartialEq)]
pub struct CalcValue {
    expression: CalcExpressionNode,
    non_negative: bool,
}

impl CalcValue {
    pub fn new(expression: CalcExpressionNode, value_range: ValueRange) -> Self {
        Self {
            expression,
            non_negative: value_range == ValueRange::NonNegative,
        }
    }

    /// Parse the contents of a `calc()` block.
    pub fn parse(range: TokenRange<'_>, value_range: ValueRange) -> Option<Self> {
        parse_calc_expression(range).map(|expression| Self::new(expression, value_range))
    }

    /// `pixels + percent%` as an expression, used to turn blended lengths back into values.
    pub fn from_pixels_and_percent(value: PixelsAndPercent, value_range: ValueRange) -> Option<Self> {
        let pixels = CalcExpressionNode::leaf(f64::from(value.pixels), UnitType::Pixels, false)?;
        let percent =
            CalcExpressionNode::leaf(f64::from(value.percent), UnitType::Percentage, false)?;
        CalcExpressionNode::binary(pixels, percent, CalcOperator::Add)
            .map(|expression| Self::new(expression, value_range))
    }

    pub const fn expression(&self) -> &CalcExpressionNode {
        &self.expression
    }

    pub fn category(&self) -> CalculationCategory {
        self.expression.category()
    }

    pub fn is_int(&self) -> bool {
        self.expression.is_integer()
    }

    pub const fn value_range(&self) -> ValueRange {
        if self.non_negative {
            ValueRange::NonNegative
        } else {
            ValueRange::All
        }
    }

    fn clamp_to_permitted_range(&self, value: f64) -> f64 {
        self.value_range().clamp(value)
    }

    pub fn double_value(&self) -> f64 {
        self.clamp_to_permitted_range(self.expression.double_value())
    }

    pub fn compute_length_px(&self, conversion_data: &LengthConversionData) -> f64 {
        self.clamp_to_permitted_range(self.expression.compute_length_px(conversion_data))
    }

    pub fn to_pixels_and_percent(&self, conversion_data: &LengthConversionData) -> PixelsAndPercent {
        let mut value = PixelsAndPercent::default();
        self.expression
            .accumulate_pixels_and_percent(conversion_data, &mut value, 1.0);
        value
    }

    /// Add the per-unit slots of a length or percentage expression into `array`; other
    /// categories contribute nothing.
    pub fn accumulate_length_array(&self, array: &mut CssLengthArray, multiplier: f64) {
        if matches!(
            self.category(),
            CalculationCategory::Length | CalculationCategory::Percent | CalculationCategory::PercentLength
        ) {
            self.expression.accumulate_length_array(array, multiplier);
        }
    }

    /// Unit type a primitive holding this value reports.
    pub fn primitive_unit_type(&self) -> UnitType {
        match self.category() {
            CalculationCategory::PercentNumber => UnitType::CalcPercentageWithNumber,
            CalculationCategory::PercentLength => UnitType::CalcPercentageWithLength,
            _ => UnitType::Calc,
        }
    }

    pub fn css_text(&self) -> String {
        format!("calc({})", self.expression.css_text_unparenthesized())
    }
}

/// Parses a leading `calc()` without committing the caller's range until asked to.
pub struct CalcParser<'tokens> {
    value: Option<CalcValue>,
    range_after: TokenRange<'tokens>,
}

impl<'tokens> CalcParser<'tokens> {
    pub fn new(range: &TokenRange<'tokens>, value_range: ValueRange) -> Self {
        let mut range_after = *range;
        let value = if is_calc_function(range.peek()) {
            let block = range_after.consume_block();
            range_after.consume_whitespace();
            CalcValue::parse(block, value_range)
        } else {
            None
        };
        Self { value, range_after }
    }

    pub const fn value(&self) -> Option<&CalcValue> {
        self.value.as_ref()
    }

    pub fn category(&self) -> Option<CalculationCategory> {
        self.value.as_ref().map(CalcValue::category)
    }

    /// Commit: advance `range` past the `calc()` and return it as a primitive.
    pub fn consume_value(self, range: &mut TokenRange<'tokens>) -> Option<PrimitiveValue> {
        let value = self.value?;
        *range = self.range_after;
        Some(PrimitiveValue::calc(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chapter_6_dimensions::LengthUnitType;
    use css_syntax::tokenize;

    const EPSILON: f64 = 1e-9;

    fn parse(text: &str) -> Option<CalcValue> {
        let tokens = tokenize(text);
        let mut range = TokenRange::new(&tokens);
        let parser = CalcParser::new(&range, ValueRange::All);
        let value = parser.value().cloned();
        parser.consume_value(&mut range)?;
        if !range.at_end() {
            return None;
        }
        value
    }

    fn nested(levels: usize) -> String {
        format!("{}1px{}", "calc(".repeat(levels), ")".repeat(levels))
    }

    /// # Panics
    /// Panics if the category table is not total or `Other` is not absorbing.
    #[test]
    fn category_table_is_total_and_other_absorbs() {
        for left in CalculationCategory::ALL {
            for right in CalculationCategory::ALL {
                for operator in CalcOperator::ALL {
                    let result = CalculationCategory::combine(left, right, operator);
                    if left == CalculationCategory::Other || right == CalculationCategory::Other {
                        assert_eq!(result, CalculationCategory::Other);
                    }
                    assert_eq!(
                        CalculationCategory::combine(CalculationCategory::Other, result, operator),
                        CalculationCategory::Other
                    );
                }
            }
        }
        assert_eq!(
            CalculationCategory::combine(
                CalculationCategory::Length,
                CalculationCategory::Percent,
                CalcOperator::Add
            ),
            CalculationCategory::PercentLength
        );
        assert_eq!(
            CalculationCategory::combine(
                CalculationCategory::Number,
                CalculationCategory::Length,
                CalcOperator::Add
            ),
            CalculationCategory::Other
        );
        assert_eq!(
            CalculationCategory::combine(
                CalculationCategory::Length,
                CalculationCategory::Length,
                CalcOperator::Multiply
            ),
            CalculationCategory::Other
        );
    }

    /// # Panics
    /// Panics if `+`/`-` whitespace rules are not enforced.
    #[test]
    fn additive_operators_need_whitespace() {
        assert!(parse("calc(1px+2px)").is_none());
        assert!(parse("calc(1px+ 2px)").is_none());
        assert!(parse("calc(1px +2px)").is_none());
        let value = parse("calc(1px + 2px)");
        assert_eq!(value.as_ref().map(CalcValue::css_text).as_deref(), Some("calc(3px)"));
        let data = LengthConversionData::default();
        let pixels = value.map_or(f64::NAN, |calc| calc.compute_length_px(&data));
        assert!((pixels - 3.0).abs() < EPSILON);
    }

    /// # Panics
    /// Panics if the nesting limit moves.
    #[test]
    fn nesting_depth_is_capped() {
        assert!(parse(&nested(MAX_EXPRESSION_DEPTH)).is_some());
        assert!(parse(&nested(MAX_EXPRESSION_DEPTH + 1)).is_none());
    }

    /// # Panics
    /// Panics if units of one category are not folded into the canonical unit.
    #[test]
    fn folds_compatible_units() {
        let value = parse("calc(1in + 4px)").map(|calc| calc.css_text());
        assert_eq!(value.as_deref(), Some("calc(100px)"));
        let value = parse("calc(2 * 3deg)").map(|calc| calc.css_text());
        assert_eq!(value.as_deref(), Some("calc(6deg)"));
        let value = parse("calc(10px + 50%)").map(|calc| calc.css_text());
        assert_eq!(value.as_deref(), Some("calc(10px + 50%)"));
    }

    /// # Panics
    /// Panics if type errors are accepted.
    #[test]
    fn rejects_type_errors() {
        assert!(parse("calc(1px * 2px)").is_none());
        assert!(parse("calc(1px / 0)").is_none());
        assert!(parse("calc(2 / 1px)").is_none());
        assert!(parse("calc(1px + 2)").is_none());
        assert!(parse("calc(1fr + 1px)").is_none());
        assert!(parse("calc(1px 2px)").is_none());
    }

    /// # Panics
    /// Panics if integer-ness is not tracked through folding.
    #[test]
    fn integer_results() {
        assert!(parse("calc(1 + 2)").is_some_and(|value| value.is_int()));
        assert!(parse("calc(4 / 2)").is_some_and(|value| !value.is_int()));
        assert!(parse("calc(1.5 + 2)").is_some_and(|value| !value.is_int()));
    }

    /// # Panics
    /// Panics if subtraction or scaling is not distributed over the parts.
    #[test]
    fn pixels_and_percent_decomposition() {
        let data = LengthConversionData::new(10.0, 16.0, 0.0, 0.0);
        let value = parse("calc(10px + 1em - (2 * 5%))");
        let parts = value.map(|calc| calc.to_pixels_and_percent(&data));
        assert_eq!(parts, Some(PixelsAndPercent::new(20.0, -10.0)));
    }

    /// # Panics
    /// Panics if length arrays lose their per-unit slots.
    #[test]
    fn length_array_keeps_units_apart() {
        let value = parse("calc((1em + 2vw) * 2 - 1in)");
        assert!(value.is_some());
        let mut array = CssLengthArray::default();
        if let Some(calc) = value {
            calc.accumulate_length_array(&mut array, 1.0);
        }
        assert!((array.at(LengthUnitType::FontSize) - 2.0).abs() < EPSILON);
        assert!((array.at(LengthUnitType::ViewportWidth) - 4.0).abs() < EPSILON);
        assert!((array.at(LengthUnitType::Pixels) + 96.0).abs() < EPSILON);
    }

    /// # Panics
    /// Panics if a number or angle expression writes into the length slots.
    #[test]
    fn non_length_expressions_have_no_length_slots() {
        for text in ["calc(2 * 3)", "calc(10deg * 2)", "calc(50% * 2 + 1)"] {
            let mut array = CssLengthArray::default();
            if let Some(calc) = parse(text) {
                calc.accumulate_length_array(&mut array, 1.0);
            }
            assert!(LengthUnitType::ALL.iter().all(|slot| !array.has(*slot)), "{text}");
        }
    }

    /// # Panics
    /// Panics if non-negative ranges clamp anywhere but the top level.
    #[test]
    fn clamps_only_at_the_top() {
        let tokens = tokenize("calc(1px - 5px)");
        let parser = CalcParser::new(&TokenRange::new(&tokens), ValueRange::NonNegative);
        let data = LengthConversionData::default();
        let value = parser.value().map(|calc| calc.compute_length_px(&data));
        assert_eq!(value, Some(0.0));
        let inner = parser.value().map(|calc| calc.expression().compute_length_px(&data));
        assert_eq!(inner, Some(-4.0));
    }
}
