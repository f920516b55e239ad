//! CSS Custom Properties for Cascading Variables Module Level 1 — `var()` substitution.
//! Spec: <https://www.w3.org/TR/css-variables-1/#using-variables>
//!
//! Substitution works on token streams. Custom properties are resolved on first use, and
//! every property taking part in a reference cycle becomes invalid at computed-value time.

use crate::registration::{PropertyRegistration, PropertyRegistry};
use css_syntax::{BlockType, ParserMode, ParserToken, TokenRange};
use css_values_units::{CssValue, CustomPropertyDeclaration, CustomPropertyValue, ValueId, VariableData};
use log::{debug, trace};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Longest chain of custom properties referencing one another that is still resolved.
pub const MAX_REFERENCE_DEPTH: usize = 128;

/// Computed value of one custom property.
#[derive(Clone, Debug, PartialEq)]
pub struct ComputedCustomProperty {
    /// Substituted tokens; never contains `var()`.
    pub tokens: Arc<VariableData>,
    /// Typed value for registered properties whose syntax is not `*`.
    pub value: Option<CssValue>,
}

/// Computed custom properties of one element, keyed by name including the leading `--`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComputedCustomProperties {
    values: HashMap<String, ComputedCustomProperty>,
}

impl ComputedCustomProperties {
    pub fn get(&self, name: &str) -> Option<&ComputedCustomProperty> {
        self.values.get(name)
    }

    pub fn tokens(&self, name: &str) -> Option<&Arc<VariableData>> {
        self.values.get(name).map(|property| &property.tokens)
    }

    pub fn insert(&mut self, name: String, property: ComputedCustomProperty) {
        self.values.insert(name, property);
    }

    /// Make `name` guaranteed-invalid.
    pub fn remove(&mut self, name: &str) -> Option<ComputedCustomProperty> {
        self.values.remove(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.values.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Substitute every `var()` in `range` into `out`, looking names up through `lookup`.
///
/// Returns false when a reference can be resolved neither through `lookup` nor through its
/// fallback.
fn substitute<F>(mut range: TokenRange<'_>, lookup: &mut F, out: &mut Vec<ParserToken>) -> bool
where
    F: FnMut(&str) -> Option<Arc<VariableData>>,
{
    while !range.at_end() {
        let token = range.peek();
        if token.block_type() != BlockType::BlockStart {
            out.push(range.consume().clone());
            continue;
        }
        let opening = token.clone();
        let block = range.consume_block();
        if opening.is_function_ignoring_case("var") {
            if !substitute_reference(block, lookup, out) {
                return false;
            }
            continue;
        }
        let closing = opening.closing_token();
        out.push(opening);
        if !substitute(block, lookup, out) {
            return false;
        }
        out.extend(closing);
    }
    true
}

fn substitute_reference<F>(mut arguments: TokenRange<'_>, lookup: &mut F, out: &mut Vec<ParserToken>) -> bool
where
    F: FnMut(&str) -> Option<Arc<VariableData>>,
{
    arguments.consume_whitespace();
    let ParserToken::Ident(name) = arguments.consume_including_whitespace() else {
        return false;
    };
    if let Some(value) = lookup(name) {
        out.extend_from_slice(value.tokens());
        return true;
    }
    if !matches!(arguments.consume(), ParserToken::Comma) {
        trace!(target: "css::parser", "{name} is invalid and has no fallback");
        return false;
    }
    substitute(arguments, lookup, out)
}

/// Substitute the `var()` references of a regular property value against computed
/// custom properties.
///
/// Returns `None` when the value is invalid at computed-value time.
pub fn resolve_variable_references(
    data: &VariableData,
    custom_properties: &ComputedCustomProperties,
) -> Option<Vec<ParserToken>> {
    let mut out = Vec::with_capacity(data.tokens().len());
    let mut lookup = |name: &str| custom_properties.tokens(name).cloned();
    substitute(data.token_range(), &mut lookup, &mut out).then_some(out)
}

/// Computes the custom properties of one element from its declarations and its parent's
/// computed custom properties.
pub struct CssVariableResolver<'registry> {
    registry: Option<&'registry PropertyRegistry>,
    mode: ParserMode,
    specified: HashMap<String, Arc<VariableData>>,
    parent: HashMap<String, ComputedCustomProperty>,
    inherited: HashSet<String>,
    resolved: HashMap<String, Option<ComputedCustomProperty>>,
    variables_seen: Vec<String>,
    cycle_start_points: HashSet<String>,
}

impl<'registry> CssVariableResolver<'registry> {
    /// Start from the values `parent` passes down: unregistered and inheriting registered
    /// properties.
    pub fn new(
        parent: &ComputedCustomProperties,
        registry: Option<&'registry PropertyRegistry>,
        mode: ParserMode,
    ) -> Self {
        let inherited = parent
            .values
            .keys()
            .filter(|name| {
                registry
                    .and_then(|registrations| registrations.registration(name))
                    .is_none_or(|registration| registration.inherits)
            })
            .cloned()
            .collect();
        Self {
            registry,
            mode,
            specified: HashMap::new(),
            parent: parent.values.clone(),
            inherited,
            resolved: HashMap::new(),
            variables_seen: Vec::new(),
            cycle_start_points: HashSet::new(),
        }
    }

    fn registration(&self, name: &str) -> Option<&'registry Arc<PropertyRegistration>> {
        self.registry.and_then(|registrations| registrations.registration(name))
    }

    /// Apply one declaration; later declarations win.
    pub fn apply_declaration(&mut self, declaration: &CustomPropertyDeclaration) {
        let name = declaration.name.clone();
        match &declaration.value {
            CustomPropertyValue::Tokens(data) => {
                self.inherited.remove(&name);
                self.specified.insert(name, Arc::clone(data));
            }
            CustomPropertyValue::CssWide(keyword) => {
                let inherits = self
                    .registration(&name)
                    .is_none_or(|registration| registration.inherits);
                let use_inherited = match keyword {
                    ValueId::Inherit => true,
                    ValueId::Unset => inherits,
                    _ => false,
                };
                self.specified.remove(&name);
                if use_inherited {
                    self.inherited.insert(name);
                } else {
                    self.inherited.remove(&name);
                }
            }
        }
    }

    /// The computed value of `name`, substituting its references first.
    pub fn value_for_custom_property(&mut self, name: &str) -> Option<ComputedCustomProperty> {
        if let Some(resolved) = self.resolved.get(name) {
            return resolved.clone();
        }
        if self.variables_seen.iter().any(|seen| seen == name) {
            self.cycle_start_points.insert(name.to_owned());
            trace!(target: "css::parser", "reference cycle through {name}");
            return None;
        }
        if self.inherited.contains(name) {
            return self
                .parent
                .get(name)
                .cloned()
                .or_else(|| self.initial_value(name));
        }
        let Some(data) = self.specified.get(name).cloned() else {
            return self.initial_value(name);
        };

        if data.needs_variable_resolution() && self.variables_seen.len() >= MAX_REFERENCE_DEPTH {
            debug!(target: "css::parser", "{name} is referenced through too long a chain");
            return None;
        }

        let computed = if data.needs_variable_resolution() {
            self.variables_seen.push(name.to_owned());
            let mut tokens = Vec::with_capacity(data.tokens().len());
            let mut lookup =
                |reference: &str| self.value_for_custom_property(reference).map(|property| property.tokens);
            let substituted = substitute(data.token_range(), &mut lookup, &mut tokens);
            self.variables_seen.pop();

            let in_cycle = !self.cycle_start_points.is_empty();
            self.cycle_start_points.remove(name);
            (substituted && !in_cycle).then(|| Arc::new(VariableData::from_tokens(tokens)))
        } else {
            Some(data)
        };

        let result = match computed {
            Some(tokens) => self.validate_registered(name, tokens),
            None => {
                debug!(target: "css::parser", "{name} is invalid at computed-value time");
                self.registration(name).and_then(|_| self.initial_value(name))
            }
        };
        self.resolved.insert(name.to_owned(), result.clone());
        result
    }

    /// Parse substituted tokens against a registered syntax; a mismatch falls back to the
    /// registered initial value.
    fn validate_registered(&self, name: &str, tokens: Arc<VariableData>) -> Option<ComputedCustomProperty> {
        let Some(registration) = self.registration(name) else {
            return Some(ComputedCustomProperty { tokens, value: None });
        };
        if registration.syntax.is_token_stream() {
            return Some(ComputedCustomProperty { tokens, value: None });
        }
        match registration.syntax.parse_value(tokens.token_range(), self.mode) {
            Some(value) => Some(ComputedCustomProperty {
                tokens,
                value: Some(value),
            }),
            None => {
                debug!(target: "css::parser", "{name} does not match its registered syntax");
                self.initial_value(name)
            }
        }
    }

    fn initial_value(&self, name: &str) -> Option<ComputedCustomProperty> {
        let registration = self.registration(name)?;
        Some(ComputedCustomProperty {
            tokens: Arc::clone(registration.initial_variable_data.as_ref()?),
            value: registration.initial.clone(),
        })
    }

    /// Resolve every custom property: declared, inherited and registered initial values.
    pub fn compute(mut self) -> ComputedCustomProperties {
        let mut names: Vec<String> = self
            .specified
            .keys()
            .chain(self.inherited.iter())
            .cloned()
            .collect();
        if let Some(registry) = self.registry {
            names.extend(registry.names().map(str::to_owned));
        }
        names.sort_unstable();
        names.dedup();

        let mut computed = ComputedCustomProperties::default();
        for name in names {
            if let Some(property) = self.value_for_custom_property(&name) {
                computed.insert(name, property);
            }
        }
        computed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_parser::variable_parser::parse_declaration_value;
    use css_syntax::tokenize;

    fn declaration(name: &str, text: &str) -> CustomPropertyDeclaration {
        let tokens = tokenize(text);
        parse_declaration_value(name, TokenRange::new(&tokens))
            .unwrap_or_else(|| CustomPropertyDeclaration {
                name: name.to_owned(),
                value: CustomPropertyValue::CssWide(ValueId::Initial),
            })
    }

    fn compute(parent: &ComputedCustomProperties, declarations: &[(&str, &str)]) -> ComputedCustomProperties {
        let mut resolver = CssVariableResolver::new(parent, None, ParserMode::HtmlStandard);
        for (name, text) in declarations {
            resolver.apply_declaration(&declaration(name, text));
        }
        resolver.compute()
    }

    fn text(properties: &ComputedCustomProperties, name: &str) -> Option<String> {
        properties.tokens(name).map(|tokens| tokens.serialize())
    }

    /// # Panics
    /// Panics if references, nested blocks or fallbacks are not substituted.
    #[test]
    fn substitutes_references() {
        let computed = compute(
            &ComputedCustomProperties::default(),
            &[
                ("--a", "10px"),
                ("--b", "calc(var(--a) * 2)"),
                ("--c", "var(--missing, var(--a))"),
            ],
        );
        assert_eq!(text(&computed, "--b").as_deref(), Some("calc(10px * 2)"));
        assert_eq!(text(&computed, "--c").as_deref(), Some("10px"));
    }

    /// # Panics
    /// Panics if cycle members stay valid or a property outside the cycle loses its fallback.
    #[test]
    fn cycles_invalidate_members() {
        let computed = compute(
            &ComputedCustomProperties::default(),
            &[
                ("--a", "var(--b)"),
                ("--b", "var(--a, 1px)"),
                ("--c", "var(--a, 2px)"),
                ("--self", "var(--self)"),
            ],
        );
        assert!(computed.get("--a").is_none());
        assert!(computed.get("--b").is_none());
        assert!(computed.get("--self").is_none());
        assert_eq!(text(&computed, "--c").as_deref(), Some("2px"));
    }

    /// # Panics
    /// Panics if a long reference chain is not cut off at the depth limit.
    #[test]
    fn long_reference_chains_are_cut_off() {
        let links = 10_000;
        let mut declarations: Vec<(String, String)> = (0..links)
            .map(|index| (format!("--v{index}"), format!("var(--v{})", index + 1)))
            .collect();
        declarations.push((format!("--v{links}"), "1px".to_owned()));
        let borrowed: Vec<(&str, &str)> = declarations
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        let computed = compute(&ComputedCustomProperties::default(), &borrowed);
        assert!(computed.get("--v0").is_none());
        assert_eq!(text(&computed, &format!("--v{links}")).as_deref(), Some("1px"));

        let short: Vec<(String, String)> = (0..MAX_REFERENCE_DEPTH)
            .map(|index| (format!("--s{index}"), format!("var(--s{})", index + 1)))
            .chain([(format!("--s{MAX_REFERENCE_DEPTH}"), "2px".to_owned())])
            .collect();
        let short_borrowed: Vec<(&str, &str)> = short
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        let within = compute(&ComputedCustomProperties::default(), &short_borrowed);
        assert_eq!(text(&within, "--s0").as_deref(), Some("2px"));
    }

    /// # Panics
    /// Panics if inheritance or CSS-wide keywords are not honoured.
    #[test]
    fn inherits_from_parent() {
        let parent = compute(&ComputedCustomProperties::default(), &[("--color", "red"), ("--size", "1px")]);
        let child = compute(&parent, &[("--size", "initial"), ("--own", "var(--color)")]);
        assert_eq!(text(&child, "--color").as_deref(), Some("red"));
        assert_eq!(text(&child, "--own").as_deref(), Some("red"));
        assert!(child.get("--size").is_none());
    }

    /// # Panics
    /// Panics if registered syntax is not enforced after substitution.
    #[test]
    fn registered_values_are_typed() {
        let mut registry = PropertyRegistry::new();
        assert!(registry.register_property("--gap", "<length>", false, Some("4px")).is_ok());
        let parent = ComputedCustomProperties::default();
        let mut resolver = CssVariableResolver::new(&parent, Some(&registry), ParserMode::HtmlStandard);
        resolver.apply_declaration(&declaration("--other", "12px"));
        resolver.apply_declaration(&declaration("--gap", "var(--other)"));
        let computed = resolver.compute();
        assert!(computed
            .get("--gap")
            .and_then(|property| property.value.as_ref())
            .is_some_and(|value| value.css_text() == "12px"));

        let mut resolver = CssVariableResolver::new(&computed, Some(&registry), ParserMode::HtmlStandard);
        resolver.apply_declaration(&declaration("--gap", "red"));
        let computed = resolver.compute();
        assert_eq!(text(&computed, "--gap").as_deref(), Some("4px"));
    }

    /// # Panics
    /// Panics if regular values are not substituted or invalid references are kept.
    #[test]
    fn resolves_regular_values() {
        let computed = compute(&ComputedCustomProperties::default(), &[("--w", "5px")]);
        let tokens = tokenize("var(--w) var(--h, 1px)");
        let data = VariableData::new(TokenRange::new(&tokens));
        let resolved = resolve_variable_references(&data, &computed).unwrap_or_default();
        assert_eq!(TokenRange::new(&resolved).serialize(), "5px 1px");
        let tokens = tokenize("var(--h)");
        assert!(resolve_variable_references(&VariableData::new(TokenRange::new(&tokens)), &computed).is_none());
    }
}
