//! The parsed value model: an immutable tree of [`CssValue`] nodes.
//!
//! Lists, pairs, quads and functions own their children. Values that must outlive the
//! parse that produced them (token streams of custom properties) are reference counted.

use crate::chapter_3_identifiers::ValueId;
use crate::primitive_value::PrimitiveValue;
use crate::variable_data::VariableData;
use css_syntax::{serialize_identifier, serialize_string, serialize_url};
use std::sync::Arc;

/// Concrete kind of a [`CssValue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClassType {
    Primitive,
    ValueList,
    ValuePair,
    Quad,
    Function,
    Shadow,
    Image,
    CrossFade,
    Path,
    GridLineNames,
    Initial,
    Inherit,
    Unset,
    VariableReference,
    CustomPropertyDeclaration,
}

/// Separator printed between list items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueListSeparator {
    Space,
    Comma,
    Slash,
}

impl ValueListSeparator {
    const fn text(self) -> &'static str {
        match self {
            Self::Space => " ",
            Self::Comma => ", ",
            Self::Slash => " / ",
        }
    }
}

/// An ordered list of values.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueList {
    separator: ValueListSeparator,
    values: Vec<CssValue>,
}

impl ValueList {
    pub const fn new(separator: ValueListSeparator) -> Self {
        Self {
            separator,
            values: Vec::new(),
        }
    }

    pub const fn space_separated() -> Self {
        Self::new(ValueListSeparator::Space)
    }

    pub const fn comma_separated() -> Self {
        Self::new(ValueListSeparator::Comma)
    }

    pub const fn slash_separated() -> Self {
        Self::new(ValueListSeparator::Slash)
    }

    pub fn from_values(separator: ValueListSeparator, values: Vec<CssValue>) -> Self {
        Self { separator, values }
    }

    /// Append while the list is still being built.
    pub fn append(&mut self, value: CssValue) {
        self.values.push(value);
    }

    pub const fn separator(&self) -> ValueListSeparator {
        self.separator
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<&CssValue> {
        self.values.get(index)
    }

    pub fn values(&self) -> &[CssValue] {
        &self.values
    }

    pub fn iter(&self) -> core::slice::Iter<'_, CssValue> {
        self.values.iter()
    }

    pub fn has_value(&self, value: &CssValue) -> bool {
        self.values.contains(value)
    }

    pub fn css_text(&self) -> String {
        self.values
            .iter()
            .map(CssValue::css_text)
            .collect::<Vec<_>>()
            .join(self.separator.text())
    }
}

impl<'list> IntoIterator for &'list ValueList {
    type Item = &'list CssValue;
    type IntoIter = core::slice::Iter<'list, CssValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Whether a pair whose halves are equal prints one value or two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IdenticalValuesPolicy {
    DropIdenticalValues,
    KeepIdenticalValues,
}

/// Two values, e.g. the horizontal and vertical `border-spacing`.
#[derive(Clone, Debug, PartialEq)]
pub struct ValuePair {
    pub first: Box<CssValue>,
    pub second: Box<CssValue>,
    pub policy: IdenticalValuesPolicy,
}

impl ValuePair {
    pub fn new(first: CssValue, second: CssValue, policy: IdenticalValuesPolicy) -> Self {
        Self {
            first: Box::new(first),
            second: Box::new(second),
            policy,
        }
    }

    pub fn css_text(&self) -> String {
        let first = self.first.css_text();
        if self.policy == IdenticalValuesPolicy::DropIdenticalValues && self.first == self.second
        {
            return first;
        }
        format!("{first} {}", self.second.css_text())
    }
}

/// Four sides in top, right, bottom, left order.
#[derive(Clone, Debug, PartialEq)]
pub struct QuadValue {
    pub top: Box<CssValue>,
    pub right: Box<CssValue>,
    pub bottom: Box<CssValue>,
    pub left: Box<CssValue>,
}

impl QuadValue {
    pub fn new(top: CssValue, right: CssValue, bottom: CssValue, left: CssValue) -> Self {
        Self {
            top: Box::new(top),
            right: Box::new(right),
            bottom: Box::new(bottom),
            left: Box::new(left),
        }
    }

    /// Shortest of the one- to four-value forms.
    pub fn css_text(&self) -> String {
        let top = self.top.css_text();
        let right = self.right.css_text();
        if self.left != self.right {
            return format!(
                "{top} {right} {} {}",
                self.bottom.css_text(),
                self.left.css_text()
            );
        }
        if self.bottom != self.top {
            return format!("{top} {right} {}", self.bottom.css_text());
        }
        if self.right != self.top {
            return format!("{top} {right}");
        }
        top
    }
}

/// A functional notation whose arguments are kept as values, e.g. `translatex(10px)`,
/// `blur(2px)` or an unexpanded grid `repeat(3, 10px)`.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionValue {
    pub name: ValueId,
    pub arguments: ValueList,
}

impl FunctionValue {
    pub const fn new(name: ValueId) -> Self {
        Self {
            name,
            arguments: ValueList::comma_separated(),
        }
    }

    pub fn with_arguments(name: ValueId, arguments: Vec<CssValue>) -> Self {
        Self {
            name,
            arguments: ValueList::from_values(ValueListSeparator::Comma, arguments),
        }
    }

    pub fn css_text(&self) -> String {
        format!("{}({})", self.name.name(), self.arguments.css_text())
    }
}

/// One `<shadow>`.
#[derive(Clone, Debug, PartialEq)]
pub struct ShadowValue {
    pub x: PrimitiveValue,
    pub y: PrimitiveValue,
    pub blur: Option<PrimitiveValue>,
    pub spread: Option<PrimitiveValue>,
    pub color: Option<PrimitiveValue>,
    pub inset: bool,
}

impl ShadowValue {
    pub fn css_text(&self) -> String {
        let mut parts = Vec::with_capacity(6);
        if let Some(color) = &self.color {
            parts.push(color.css_text());
        }
        parts.push(self.x.css_text());
        parts.push(self.y.css_text());
        if let Some(blur) = &self.blur {
            parts.push(blur.css_text());
        }
        if let Some(spread) = &self.spread {
            parts.push(spread.css_text());
        }
        if self.inset {
            parts.push(ValueId::Inset.name().to_owned());
        }
        parts.join(" ")
    }
}

/// An image referenced by URL. Loading is left to the embedder.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageValue {
    pub url: String,
}

/// `-webkit-cross-fade(<image>, <image>, <percentage>)`.
#[derive(Clone, Debug, PartialEq)]
pub struct CrossFadeValue {
    pub from: CssValue,
    pub to: CssValue,
    pub percentage: PrimitiveValue,
}

/// `path("<svg path data>")`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathValue {
    pub path_data: String,
}

/// `[name name ...]` inside a grid track list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridLineNames {
    pub names: Vec<String>,
}

impl GridLineNames {
    pub fn css_text(&self) -> String {
        let names = self
            .names
            .iter()
            .map(|name| serialize_identifier(name))
            .collect::<Vec<_>>();
        format!("[{}]", names.join(" "))
    }
}

/// Value of a custom property declaration.
#[derive(Clone, Debug, PartialEq)]
pub enum CustomPropertyValue {
    Tokens(Arc<VariableData>),
    /// `initial`, `inherit` or `unset`.
    CssWide(ValueId),
}

/// A `--name: value` declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomPropertyDeclaration {
    pub name: String,
    pub value: CustomPropertyValue,
}

impl CustomPropertyDeclaration {
    pub fn css_text(&self) -> String {
        match &self.value {
            CustomPropertyValue::Tokens(data) => data.serialize(),
            CustomPropertyValue::CssWide(keyword) => keyword.name().to_owned(),
        }
    }
}

/// A parsed CSS value.
///
/// Keywords, URIs, colors and `calc()` expressions are all [`PrimitiveValue`] payloads.
#[derive(Clone, Debug, PartialEq)]
pub enum CssValue {
    Primitive(PrimitiveValue),
    ValueList(ValueList),
    ValuePair(ValuePair),
    Quad(QuadValue),
    Function(FunctionValue),
    Shadow(Box<ShadowValue>),
    Image(ImageValue),
    CrossFade(Box<CrossFadeValue>),
    Path(PathValue),
    GridLineNames(GridLineNames),
    Initial,
    Inherit,
    Unset,
    VariableReference(Arc<VariableData>),
    CustomPropertyDeclaration(CustomPropertyDeclaration),
}

impl From<PrimitiveValue> for CssValue {
    fn from(value: PrimitiveValue) -> Self {
        Self::Primitive(value)
    }
}

impl From<ValueList> for CssValue {
    fn from(list: ValueList) -> Self {
        Self::ValueList(list)
    }
}

impl CssValue {
    /// Keyword value.
    pub const fn identifier(id: ValueId) -> Self {
        Self::Primitive(PrimitiveValue::identifier(id))
    }

    /// The CSS-wide keyword value for `id`, if it is one.
    pub const fn css_wide(id: ValueId) -> Option<Self> {
        match id {
            ValueId::Initial => Some(Self::Initial),
            ValueId::Inherit => Some(Self::Inherit),
            ValueId::Unset => Some(Self::Unset),
            _ => None,
        }
    }

    pub const fn class_type(&self) -> ClassType {
        match self {
            Self::Primitive(_) => ClassType::Primitive,
            Self::ValueList(_) => ClassType::ValueList,
            Self::ValuePair(_) => ClassType::ValuePair,
            Self::Quad(_) => ClassType::Quad,
            Self::Function(_) => ClassType::Function,
            Self::Shadow(_) => ClassType::Shadow,
            Self::Image(_) => ClassType::Image,
            Self::CrossFade(_) => ClassType::CrossFade,
            Self::Path(_) => ClassType::Path,
            Self::GridLineNames(_) => ClassType::GridLineNames,
            Self::Initial => ClassType::Initial,
            Self::Inherit => ClassType::Inherit,
            Self::Unset => ClassType::Unset,
            Self::VariableReference(_) => ClassType::VariableReference,
            Self::CustomPropertyDeclaration(_) => ClassType::CustomPropertyDeclaration,
        }
    }

    pub const fn as_primitive(&self) -> Option<&PrimitiveValue> {
        match self {
            Self::Primitive(primitive) => Some(primitive),
            _ => None,
        }
    }

    pub const fn as_list(&self) -> Option<&ValueList> {
        match self {
            Self::ValueList(list) => Some(list),
            _ => None,
        }
    }

    pub const fn as_function(&self) -> Option<&FunctionValue> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Keyword of an identifier value.
    pub const fn value_id(&self) -> Option<ValueId> {
        match self {
            Self::Primitive(primitive) => primitive.value_id(),
            _ => None,
        }
    }

    pub const fn is_css_wide_keyword(&self) -> bool {
        matches!(self, Self::Initial | Self::Inherit | Self::Unset)
    }

    pub const fn is_variable_reference(&self) -> bool {
        matches!(self, Self::VariableReference(_))
    }

    /// Deep structural equality.
    pub fn equals(&self, other: &Self) -> bool {
        self == other
    }

    pub fn css_text(&self) -> String {
        match self {
            Self::Primitive(primitive) => primitive.css_text(),
            Self::ValueList(list) => list.css_text(),
            Self::ValuePair(pair) => pair.css_text(),
            Self::Quad(quad) => quad.css_text(),
            Self::Function(function) => function.css_text(),
            Self::Shadow(shadow) => shadow.css_text(),
            Self::Image(image) => serialize_url(&image.url),
            Self::CrossFade(cross_fade) => format!(
                "-webkit-cross-fade({}, {}, {})",
                cross_fade.from.css_text(),
                cross_fade.to.css_text(),
                cross_fade.percentage.css_text()
            ),
            Self::Path(path) => format!("path({})", serialize_string(&path.path_data)),
            Self::GridLineNames(names) => names.css_text(),
            Self::Initial => ValueId::Initial.name().to_owned(),
            Self::Inherit => ValueId::Inherit.name().to_owned(),
            Self::Unset => ValueId::Unset.name().to_owned(),
            Self::VariableReference(data) => data.serialize(),
            Self::CustomPropertyDeclaration(declaration) => declaration.css_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chapter_6_dimensions::UnitType;
    use crate::chapter_9_colors::Color;

    fn px(value: f64) -> CssValue {
        CssValue::Primitive(PrimitiveValue::numeric(value, UnitType::Pixels))
    }

    /// # Panics
    /// Panics if quads do not collapse to their shortest form.
    #[test]
    fn quads_collapse() {
        assert_eq!(QuadValue::new(px(1.0), px(1.0), px(1.0), px(1.0)).css_text(), "1px");
        assert_eq!(QuadValue::new(px(1.0), px(2.0), px(1.0), px(2.0)).css_text(), "1px 2px");
        assert_eq!(
            QuadValue::new(px(1.0), px(2.0), px(3.0), px(2.0)).css_text(),
            "1px 2px 3px"
        );
        assert_eq!(
            QuadValue::new(px(1.0), px(2.0), px(3.0), px(4.0)).css_text(),
            "1px 2px 3px 4px"
        );
    }

    /// # Panics
    /// Panics if list separators or pair policies serialize wrongly.
    #[test]
    fn lists_and_pairs() {
        let list = ValueList::from_values(ValueListSeparator::Comma, vec![px(1.0), px(2.0)]);
        assert_eq!(CssValue::from(list).css_text(), "1px, 2px");
        let pair = ValuePair::new(px(3.0), px(3.0), IdenticalValuesPolicy::DropIdenticalValues);
        assert_eq!(pair.css_text(), "3px");
        let pair = ValuePair::new(px(3.0), px(3.0), IdenticalValuesPolicy::KeepIdenticalValues);
        assert_eq!(pair.css_text(), "3px 3px");
    }

    /// # Panics
    /// Panics if shadow components are printed out of order.
    #[test]
    fn shadow_order() {
        let shadow = ShadowValue {
            x: PrimitiveValue::numeric(1.0, UnitType::Pixels),
            y: PrimitiveValue::numeric(2.0, UnitType::Pixels),
            blur: Some(PrimitiveValue::numeric(3.0, UnitType::Pixels)),
            spread: None,
            color: Some(PrimitiveValue::color(Color::BLACK)),
            inset: true,
        };
        let value = CssValue::Shadow(Box::new(shadow));
        assert_eq!(value.css_text(), "rgb(0, 0, 0) 1px 2px 3px inset");
        assert_eq!(value.class_type(), ClassType::Shadow);
    }

    /// # Panics
    /// Panics if equality is not structural.
    #[test]
    fn structural_equality() {
        let first = FunctionValue::with_arguments(ValueId::Blur, vec![px(2.0)]);
        let second = FunctionValue::with_arguments(ValueId::Blur, vec![px(2.0)]);
        assert!(CssValue::Function(first.clone()).equals(&CssValue::Function(second)));
        assert_eq!(CssValue::Function(first).css_text(), "blur(2px)");
        assert_ne!(CssValue::Initial, CssValue::Inherit);
        let names = GridLineNames {
            names: vec!["a".to_owned(), "b".to_owned()],
        };
        assert_eq!(names.css_text(), "[a b]");
    }
}
