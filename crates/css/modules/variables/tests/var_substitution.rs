//! `var()` substitution over declarations parsed from a stylesheet.

#![allow(
    clippy::tests_outside_test_module,
    clippy::let_underscore_must_use,
    reason = "Integration test crate"
)]

use css_parser::{ParserContext, parse_inline_style_declaration};
use css_syntax::{ParserMode, TokenRange, tokenize};
use css_values_units::{CssValue, VariableData};
use css_variables::{
    ComputedCustomProperties, CssVariableResolver, PropertyRegistry, resolve_variable_references,
};

fn computed_for(text: &str, parent: &ComputedCustomProperties, registry: Option<&PropertyRegistry>) -> ComputedCustomProperties {
    let declarations = parse_inline_style_declaration(text, &ParserContext::default());
    let mut resolver = CssVariableResolver::new(parent, registry, ParserMode::HtmlStandard);
    for property in declarations.iter() {
        if let CssValue::CustomPropertyDeclaration(declaration) = property.value() {
            resolver.apply_declaration(declaration);
        }
    }
    resolver.compute()
}

fn resolve(value: &str, custom_properties: &ComputedCustomProperties) -> Option<String> {
    let tokens = tokenize(value);
    let data = VariableData::new(TokenRange::new(&tokens));
    resolve_variable_references(&data, custom_properties).map(|resolved| TokenRange::new(&resolved).serialize())
}

#[test]
fn declarations_and_fallbacks() {
    let _ = env_logger::builder().is_test(true).try_init();
    let computed = computed_for(
        "--pad: 10px; --b: var(--pad); padding: var(--b)",
        &ComputedCustomProperties::default(),
        None,
    );
    assert_eq!(resolve("var(--b)", &computed).as_deref(), Some("10px"));
    assert_eq!(resolve("var(--mt, 2px)", &computed).as_deref(), Some("2px"));
    assert_eq!(resolve("var(--mt)", &computed), None);
}

#[test]
fn cycles_fall_back_in_regular_properties() {
    let _ = env_logger::builder().is_test(true).try_init();
    let computed = computed_for(
        "--x: var(--y); --y: var(--x)",
        &ComputedCustomProperties::default(),
        None,
    );
    assert!(computed.is_empty());
    assert_eq!(resolve("var(--x, 5px)", &computed).as_deref(), Some("5px"));
}

#[test]
fn registered_non_inherited_properties_reset() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut registry = PropertyRegistry::new();
    assert!(registry.register_property("--size", "<length>", false, Some("1px")).is_ok());
    assert!(registry.register_property("--tone", "*", true, None).is_ok());
    let parent = computed_for("--size: 8px; --tone: warm", &ComputedCustomProperties::default(), Some(&registry));
    let child = computed_for("", &parent, Some(&registry));
    assert_eq!(resolve("var(--size)", &child).as_deref(), Some("1px"));
    assert_eq!(resolve("var(--tone)", &child).as_deref(), Some("warm"));
    let child = computed_for("--size: inherit", &parent, Some(&registry));
    assert_eq!(resolve("var(--size)", &child).as_deref(), Some("8px"));
}
