//! CSS Properties and Values API Level 1 — registration of custom properties.
//! Spec: <https://www.w3.org/TR/css-properties-values-api-1/#registering-custom-properties>

use crate::syntax_descriptor::SyntaxDescriptor;
use core::fmt;
use css_parser::{contains_valid_variable_references, is_valid_variable_name};
use css_syntax::{ParserMode, TokenRange, tokenize};
use css_values_units::{CssValue, PrimitiveValue, VariableData};
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// Why a registration was refused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistrationError {
    /// The name, syntax string or initial value is malformed.
    Syntax(String),
    /// The name is already registered.
    InvalidModification(String),
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(message) => write!(formatter, "syntax error: {message}"),
            Self::InvalidModification(message) => {
                write!(formatter, "invalid modification: {message}")
            }
        }
    }
}

impl std::error::Error for RegistrationError {}

/// A registered custom property.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyRegistration {
    pub name: String,
    pub syntax: SyntaxDescriptor,
    pub inherits: bool,
    /// Initial value parsed against `syntax`; absent for the universal syntax.
    pub initial: Option<CssValue>,
    /// Tokens of the initial value, substituted when the property is unset or invalid.
    pub initial_variable_data: Option<Arc<VariableData>>,
}

/// Whether `value` computes the same regardless of the element it is applied to.
///
/// Font-relative and viewport-relative lengths and `var()` references all depend on the
/// element.
pub fn is_computationally_independent(value: &CssValue) -> bool {
    fn primitive_is_independent(primitive: &PrimitiveValue) -> bool {
        !primitive.is_font_relative_length() && !primitive.is_viewport_percentage_length()
    }

    match value {
        CssValue::Primitive(primitive) => primitive_is_independent(primitive),
        CssValue::ValueList(list) => list.iter().all(is_computationally_independent),
        CssValue::ValuePair(pair) => {
            is_computationally_independent(&pair.first) && is_computationally_independent(&pair.second)
        }
        CssValue::Quad(quad) => [&quad.top, &quad.right, &quad.bottom, &quad.left]
            .into_iter()
            .all(|edge| is_computationally_independent(edge)),
        CssValue::Function(function) => function.arguments.iter().all(is_computationally_independent),
        CssValue::Shadow(shadow) => [Some(&shadow.x), Some(&shadow.y), shadow.blur.as_ref(), shadow.spread.as_ref()]
            .into_iter()
            .flatten()
            .all(primitive_is_independent),
        CssValue::CrossFade(cross_fade) => {
            is_computationally_independent(&cross_fade.from) && is_computationally_independent(&cross_fade.to)
        }
        CssValue::VariableReference(_) | CssValue::CustomPropertyDeclaration(_) => false,
        CssValue::Image(_)
        | CssValue::Path(_)
        | CssValue::GridLineNames(_)
        | CssValue::Initial
        | CssValue::Inherit
        | CssValue::Unset => true,
    }
}

/// The registered custom properties of a document.
#[derive(Clone, Debug, Default)]
pub struct PropertyRegistry {
    registrations: HashMap<String, Arc<PropertyRegistration>>,
}

impl PropertyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` with a syntax string, an inheritance flag and an initial value.
    ///
    /// # Errors
    /// Returns [`RegistrationError::Syntax`] for a malformed name or syntax string, a
    /// missing or unparsable initial value, or an initial value that depends on the element.
    /// Returns [`RegistrationError::InvalidModification`] when `name` is already registered.
    pub fn register_property(
        &mut self,
        name: &str,
        syntax: &str,
        inherits: bool,
        initial_value: Option<&str>,
    ) -> Result<(), RegistrationError> {
        if !is_valid_variable_name(name) {
            return Err(RegistrationError::Syntax(format!("{name} is not a custom property name")));
        }
        if self.registrations.contains_key(name) {
            return Err(RegistrationError::InvalidModification(format!(
                "{name} is already registered"
            )));
        }
        let descriptor = SyntaxDescriptor::parse(syntax)
            .ok_or_else(|| RegistrationError::Syntax(format!("invalid syntax string {syntax:?}")))?;

        let tokens = initial_value.map(tokenize).unwrap_or_default();
        let initial_range = TokenRange::new(&tokens);
        let has_initial = initial_value.is_some_and(|text| !text.trim().is_empty());

        let (initial, initial_variable_data) = if descriptor.is_token_stream() {
            if has_initial && contains_valid_variable_references(initial_range) {
                return Err(RegistrationError::Syntax(format!(
                    "initial value of {name} references a variable"
                )));
            }
            let data = has_initial.then(|| Arc::new(VariableData::new(initial_range)));
            (None, data)
        } else {
            if !has_initial {
                return Err(RegistrationError::Syntax(format!(
                    "{name} needs an initial value for syntax {syntax:?}"
                )));
            }
            let value = descriptor
                .parse_value(initial_range, ParserMode::HtmlStandard)
                .ok_or_else(|| {
                    RegistrationError::Syntax(format!(
                        "initial value of {name} does not match {syntax:?}"
                    ))
                })?;
            if !is_computationally_independent(&value) {
                return Err(RegistrationError::Syntax(format!(
                    "initial value of {name} is not computationally independent"
                )));
            }
            (Some(value), Some(Arc::new(VariableData::new(initial_range))))
        };

        debug!(target: "css::parser", "registered {name} with syntax {syntax:?}");
        self.registrations.insert(
            name.to_owned(),
            Arc::new(PropertyRegistration {
                name: name.to_owned(),
                syntax: descriptor,
                inherits,
                initial,
                initial_variable_data,
            }),
        );
        Ok(())
    }

    pub fn registration(&self, name: &str) -> Option<&Arc<PropertyRegistration>> {
        self.registrations.get(name)
    }

    /// Registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registrations.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// # Panics
    /// Panics if a valid registration is refused or its initial value is lost.
    #[test]
    fn registers_properties() {
        let mut registry = PropertyRegistry::new();
        assert_eq!(registry.register_property("--gap", "<length>", false, Some("4px")), Ok(()));
        assert!(registry
            .registration("--gap")
            .is_some_and(|registration| registration
                .initial
                .as_ref()
                .is_some_and(|value| value.css_text() == "4px")));
        assert_eq!(registry.register_property("--any", "*", true, None), Ok(()));
        assert_eq!(registry.len(), 2);
    }

    /// # Panics
    /// Panics if calc initial values outside the length category are refused.
    #[test]
    fn registers_non_length_calc_initial_values() {
        let mut registry = PropertyRegistry::new();
        assert_eq!(registry.register_property("--turn", "<angle>", false, Some("calc(10deg * 2)")), Ok(()));
        assert_eq!(registry.register_property("--count", "<number>", false, Some("calc(2 * 3)")), Ok(()));
        assert_eq!(registry.register_property("--inset", "<length>", false, Some("calc(2 * 3px)")), Ok(()));
        assert!(matches!(
            registry.register_property("--wide", "<length>", false, Some("calc(2 * 3em)")),
            Err(RegistrationError::Syntax(_))
        ));
        assert_eq!(registry.len(), 3);
    }

    /// # Panics
    /// Panics if invalid registrations are accepted or reported with the wrong kind.
    #[test]
    fn rejects_invalid_registrations() {
        let mut registry = PropertyRegistry::new();
        assert!(matches!(
            registry.register_property("gap", "<length>", false, Some("4px")),
            Err(RegistrationError::Syntax(_))
        ));
        assert!(matches!(
            registry.register_property("--gap", "<length>", false, None),
            Err(RegistrationError::Syntax(_))
        ));
        assert!(matches!(
            registry.register_property("--gap", "<length>", false, Some("red")),
            Err(RegistrationError::Syntax(_))
        ));
        assert!(matches!(
            registry.register_property("--gap", "<length>", false, Some("2em")),
            Err(RegistrationError::Syntax(_))
        ));
        assert!(matches!(
            registry.register_property("--gap", "<length>", false, Some("calc(10vw + 1px)")),
            Err(RegistrationError::Syntax(_))
        ));
        assert!(matches!(
            registry.register_property("--any", "*", false, Some("var(--gap)")),
            Err(RegistrationError::Syntax(_))
        ));
        assert!(registry.is_empty());
        assert_eq!(registry.register_property("--gap", "<length>", false, Some("1px")), Ok(()));
        assert!(matches!(
            registry.register_property("--gap", "<number>", true, Some("1")),
            Err(RegistrationError::InvalidModification(_))
        ));
    }
}
