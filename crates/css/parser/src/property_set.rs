//! Parsed declarations and the mutable declaration block they are stored in.

use css_syntax::ParserMode;
use css_values_units::{CssValue, PropertyId, QuadValue, ValueId};

const PROPERTY_BITS: u32 = 10;
const PROPERTY_MASK: u32 = (1 << PROPERTY_BITS) - 1;
const SHORTHAND_SHIFT: u32 = PROPERTY_BITS;
const IMPORTANT_BIT: u32 = 1 << (2 * PROPERTY_BITS);
const IMPLICIT_BIT: u32 = IMPORTANT_BIT << 1;
const INHERITED_BIT: u32 = IMPORTANT_BIT << 2;

/// Property id, originating shorthand and flags of one declaration, packed into a word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StylePropertyMetadata(u32);

impl StylePropertyMetadata {
    pub fn new(
        property: PropertyId,
        shorthand: Option<PropertyId>,
        important: bool,
        implicit: bool,
    ) -> Self {
        let mut bits = property.index() as u32 & PROPERTY_MASK;
        if let Some(shorthand) = shorthand {
            bits |= ((shorthand.index() as u32 + 1) & PROPERTY_MASK) << SHORTHAND_SHIFT;
        }
        if important {
            bits |= IMPORTANT_BIT;
        }
        if implicit {
            bits |= IMPLICIT_BIT;
        }
        if property.is_inherited() {
            bits |= INHERITED_BIT;
        }
        Self(bits)
    }

    pub fn property_id(self) -> PropertyId {
        PropertyId::from_index((self.0 & PROPERTY_MASK) as usize).unwrap_or(PropertyId::Variable)
    }

    /// The shorthand this longhand was expanded from.
    pub fn shorthand_id(self) -> Option<PropertyId> {
        let stored = (self.0 >> SHORTHAND_SHIFT) & PROPERTY_MASK;
        stored
            .checked_sub(1)
            .and_then(|index| PropertyId::from_index(index as usize))
    }

    pub const fn important(self) -> bool {
        self.0 & IMPORTANT_BIT != 0
    }

    /// Set for longhands a shorthand left out, which receive their initial value.
    pub const fn implicit(self) -> bool {
        self.0 & IMPLICIT_BIT != 0
    }

    pub const fn inherited(self) -> bool {
        self.0 & INHERITED_BIT != 0
    }
}

/// One parsed declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct CssProperty {
    metadata: StylePropertyMetadata,
    value: CssValue,
}

impl CssProperty {
    pub fn new(property: PropertyId, value: CssValue, important: bool) -> Self {
        Self::expanded(property, None, value, important, false)
    }

    /// A longhand produced by expanding `shorthand`.
    pub fn expanded(
        property: PropertyId,
        shorthand: Option<PropertyId>,
        value: CssValue,
        important: bool,
        implicit: bool,
    ) -> Self {
        Self {
            metadata: StylePropertyMetadata::new(property, shorthand, important, implicit),
            value,
        }
    }

    pub const fn metadata(&self) -> StylePropertyMetadata {
        self.metadata
    }

    pub fn id(&self) -> PropertyId {
        self.metadata.property_id()
    }

    pub fn shorthand_id(&self) -> Option<PropertyId> {
        self.metadata.shorthand_id()
    }

    pub const fn is_important(&self) -> bool {
        self.metadata.important()
    }

    pub const fn is_implicit(&self) -> bool {
        self.metadata.implicit()
    }

    pub const fn value(&self) -> &CssValue {
        &self.value
    }

    /// Name of a custom property declaration.
    pub fn custom_property_name(&self) -> Option<&str> {
        match &self.value {
            CssValue::CustomPropertyDeclaration(declaration) => Some(&declaration.name),
            _ => None,
        }
    }

    /// Property name as written in CSS text.
    pub fn name(&self) -> &str {
        self.custom_property_name().unwrap_or_else(|| self.id().name())
    }

    fn same_slot(&self, other: &Self) -> bool {
        self.id() == other.id() && self.custom_property_name() == other.custom_property_name()
    }
}

/// Outcome of setting a property from text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SetResult {
    pub did_parse: bool,
    pub did_change: bool,
}

/// An ordered declaration block, as found in a style rule or a `style` attribute.
///
/// Each longhand (and each custom property name) appears at most once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MutableStylePropertySet {
    mode: ParserMode,
    properties: Vec<CssProperty>,
}

impl MutableStylePropertySet {
    pub const fn new(mode: ParserMode) -> Self {
        Self {
            mode,
            properties: Vec::new(),
        }
    }

    pub const fn mode(&self) -> ParserMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn property_at(&self, index: usize) -> Option<&CssProperty> {
        self.properties.get(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, CssProperty> {
        self.properties.iter()
    }

    fn find_property_index(&self, property: PropertyId) -> Option<usize> {
        self.properties.iter().position(|candidate| candidate.id() == property)
    }

    pub fn get_property(&self, property: PropertyId) -> Option<&CssProperty> {
        self.find_property_index(property)
            .and_then(|index| self.properties.get(index))
    }

    pub fn get_property_value(&self, property: PropertyId) -> Option<&CssValue> {
        self.get_property(property).map(CssProperty::value)
    }

    pub fn get_custom_property(&self, name: &str) -> Option<&CssProperty> {
        self.properties
            .iter()
            .find(|candidate| candidate.custom_property_name() == Some(name))
    }

    pub fn property_is_important(&self, property: PropertyId) -> bool {
        let longhands = property.longhands();
        if longhands.is_empty() {
            return self.get_property(property).is_some_and(CssProperty::is_important);
        }
        longhands.iter().all(|longhand| {
            self.get_property(*longhand)
                .is_some_and(CssProperty::is_important)
        })
    }

    /// Store `property`, replacing an existing declaration of the same longhand. Returns
    /// whether the block changed.
    pub fn set_property(&mut self, property: CssProperty) -> bool {
        if let Some(existing) = self
            .properties
            .iter_mut()
            .find(|candidate| candidate.same_slot(&property))
        {
            if *existing == property {
                return false;
            }
            *existing = property;
            return true;
        }
        self.properties.push(property);
        true
    }

    /// Add freshly parsed declarations; a declaration never overrides an `!important` one
    /// unless it is `!important` itself.
    pub fn add_parsed_properties(&mut self, properties: Vec<CssProperty>) -> bool {
        let mut changed = false;
        self.properties.reserve(properties.len());
        for property in properties {
            changed |= self.add_respecting_cascade(property);
        }
        changed
    }

    fn add_respecting_cascade(&mut self, property: CssProperty) -> bool {
        let existing_important = self
            .properties
            .iter()
            .find(|candidate| candidate.same_slot(&property))
            .is_some_and(CssProperty::is_important);
        if existing_important && !property.is_important() {
            return false;
        }
        self.set_property(property)
    }

    /// Remove a longhand, or every longhand of a shorthand.
    pub fn remove_property(&mut self, property: PropertyId) -> bool {
        let longhands = property.longhands();
        let before = self.properties.len();
        if longhands.is_empty() {
            self.properties.retain(|candidate| candidate.id() != property);
        } else {
            self.properties
                .retain(|candidate| !longhands.contains(&candidate.id()));
        }
        self.properties.len() != before
    }

    pub fn remove_custom_property(&mut self, name: &str) -> bool {
        let before = self.properties.len();
        self.properties
            .retain(|candidate| candidate.custom_property_name() != Some(name));
        self.properties.len() != before
    }

    pub fn clear(&mut self) {
        self.properties.clear();
    }

    /// Serialized value of a longhand or shorthand; empty when it cannot be represented.
    pub fn get_property_text(&self, property: PropertyId) -> String {
        if property.is_shorthand() {
            return self.shorthand_value(property).unwrap_or_default();
        }
        self.get_property_value(property)
            .map(CssValue::css_text)
            .unwrap_or_default()
    }

    fn longhand_values(&self, shorthand: PropertyId) -> Option<Vec<&CssProperty>> {
        shorthand
            .longhands()
            .iter()
            .map(|longhand| self.get_property(*longhand))
            .collect()
    }

    fn shorthand_value(&self, shorthand: PropertyId) -> Option<String> {
        let longhands = self.longhand_values(shorthand)?;
        let first = longhands.first()?;
        if longhands
            .iter()
            .any(|longhand| longhand.is_important() != first.is_important())
        {
            return None;
        }
        // Pending `var()` substitution and CSS-wide keywords only serialize when shared.
        if first.value().is_variable_reference() || first.value().is_css_wide_keyword() {
            return longhands
                .iter()
                .all(|longhand| longhand.value() == first.value())
                .then(|| first.value().css_text());
        }
        if longhands.iter().any(|longhand| {
            longhand.value().is_variable_reference() || longhand.value().is_css_wide_keyword()
        }) {
            return None;
        }
        let values = longhands.iter().map(|longhand| longhand.value()).collect::<Vec<_>>();
        match shorthand {
            PropertyId::Margin
            | PropertyId::Padding
            | PropertyId::BorderWidth
            | PropertyId::BorderStyle
            | PropertyId::BorderColor => {
                let [top, right, bottom, left] = values.as_slice() else {
                    return None;
                };
                let quad = QuadValue::new(
                    (*top).clone(),
                    (*right).clone(),
                    (*bottom).clone(),
                    (*left).clone(),
                );
                Some(quad.css_text())
            }
            PropertyId::Overflow => {
                let [horizontal, vertical] = values.as_slice() else {
                    return None;
                };
                if horizontal == vertical {
                    return Some(horizontal.css_text());
                }
                Some(format!("{} {}", horizontal.css_text(), vertical.css_text()))
            }
            PropertyId::Border => {
                let sides = [
                    PropertyId::BorderTop,
                    PropertyId::BorderRight,
                    PropertyId::BorderBottom,
                    PropertyId::BorderLeft,
                ]
                .map(|side| self.shorthand_value(side));
                let [Some(top), rest @ ..] = &sides else {
                    return None;
                };
                rest.iter()
                    .all(|side| side.as_ref() == Some(top))
                    .then(|| top.clone())
            }
            _ => Some(join_component_values(&longhands)),
        }
    }

    /// Serialize the whole block as `name: value;` pairs, folding complete shorthands.
    pub fn as_text(&self) -> String {
        let mut parts = Vec::with_capacity(self.properties.len());
        let mut serialized_shorthands: Vec<PropertyId> = Vec::new();
        for property in &self.properties {
            if let Some(shorthand) = property.shorthand_id() {
                if serialized_shorthands.contains(&shorthand) {
                    continue;
                }
                if let Some(value) = self.shorthand_value(shorthand) {
                    serialized_shorthands.push(shorthand);
                    parts.push(declaration_text(shorthand.name(), &value, property.is_important()));
                    continue;
                }
            }
            parts.push(declaration_text(
                property.name(),
                &property.value().css_text(),
                property.is_important(),
            ));
        }
        parts.join(" ")
    }
}

impl<'set> IntoIterator for &'set MutableStylePropertySet {
    type Item = &'set CssProperty;
    type IntoIter = core::slice::Iter<'set, CssProperty>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}

/// Components of a greedy shorthand (`border-top`, `outline`), leaving out implicit ones.
fn join_component_values(longhands: &[&CssProperty]) -> String {
    let explicit = longhands
        .iter()
        .filter(|longhand| !longhand.is_implicit())
        .map(|longhand| longhand.value().css_text())
        .collect::<Vec<_>>();
    if explicit.is_empty() {
        return ValueId::Initial.name().to_owned();
    }
    explicit.join(" ")
}

fn declaration_text(name: &str, value: &str, important: bool) -> String {
    if important {
        return format!("{name}: {value} !important;");
    }
    format!("{name}: {value};")
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_values_units::{PrimitiveValue, UnitType};

    fn px(value: f64) -> CssValue {
        CssValue::Primitive(PrimitiveValue::numeric(value, UnitType::Pixels))
    }

    /// # Panics
    /// Panics if the packed metadata loses a field.
    #[test]
    fn metadata_round_trips() {
        let metadata = StylePropertyMetadata::new(
            PropertyId::MarginTop,
            Some(PropertyId::Margin),
            true,
            false,
        );
        assert_eq!(metadata.property_id(), PropertyId::MarginTop);
        assert_eq!(metadata.shorthand_id(), Some(PropertyId::Margin));
        assert!(metadata.important());
        assert!(!metadata.implicit());
        assert!(!metadata.inherited());
        let plain = StylePropertyMetadata::new(PropertyId::Color, None, false, true);
        assert_eq!(plain.shorthand_id(), None);
        assert!(plain.implicit());
        assert!(plain.inherited());
    }

    /// # Panics
    /// Panics if replacing a declaration reports the wrong change state.
    #[test]
    fn set_property_reports_changes() {
        let mut set = MutableStylePropertySet::new(ParserMode::HtmlStandard);
        assert!(set.set_property(CssProperty::new(PropertyId::Width, px(10.0), false)));
        assert!(!set.set_property(CssProperty::new(PropertyId::Width, px(10.0), false)));
        assert!(set.set_property(CssProperty::new(PropertyId::Width, px(12.0), false)));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get_property_text(PropertyId::Width), "12px");
    }

    /// # Panics
    /// Panics if a normal declaration overrides an important one.
    #[test]
    fn important_declarations_win() {
        let mut set = MutableStylePropertySet::new(ParserMode::HtmlStandard);
        assert!(set.add_parsed_properties(vec![CssProperty::new(PropertyId::Width, px(1.0), true)]));
        assert!(!set.add_parsed_properties(vec![CssProperty::new(PropertyId::Width, px(2.0), false)]));
        assert_eq!(set.get_property_text(PropertyId::Width), "1px");
        assert!(set.property_is_important(PropertyId::Width));
    }

    /// # Panics
    /// Panics if quad shorthands do not collapse when serialized.
    #[test]
    fn serializes_quad_shorthands() {
        let mut set = MutableStylePropertySet::new(ParserMode::HtmlStandard);
        for (longhand, value) in PropertyId::Margin.longhands().iter().zip([1.0, 2.0, 1.0, 2.0]) {
            set.set_property(CssProperty::expanded(
                *longhand,
                Some(PropertyId::Margin),
                px(value),
                false,
                false,
            ));
        }
        assert_eq!(set.get_property_text(PropertyId::Margin), "1px 2px");
        assert_eq!(set.as_text(), "margin: 1px 2px;");
        assert!(set.remove_property(PropertyId::Margin));
        assert!(set.is_empty());
    }
}
