//! CSS Custom Properties for Cascading Variables Module Level 1 — CSS variables.
//! Spec: <https://www.w3.org/TR/css-variables-1/>
//!
//! Custom property values are parsed into token streams by `css_parser`; this crate
//! substitutes `var()` references at style-building time and keeps the registrations made
//! through the Properties and Values API.

#![forbid(unsafe_code)]

pub mod registration;
pub mod resolver;
pub mod syntax_descriptor;

pub use registration::{
    PropertyRegistration, PropertyRegistry, RegistrationError, is_computationally_independent,
};
pub use resolver::{
    ComputedCustomProperties, ComputedCustomProperty, CssVariableResolver, MAX_REFERENCE_DEPTH,
    resolve_variable_references,
};
pub use syntax_descriptor::{SyntaxComponent, SyntaxDescriptor, SyntaxRepeat, SyntaxType};
