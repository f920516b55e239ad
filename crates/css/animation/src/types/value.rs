//! The catch-all interpolation type: values no other type understands flip discretely.
//!
//! It converts any keyframe, never merges two of them, and applies the chosen endpoint
//! through the style builder. Registered and unregistered custom properties animate
//! through this type as well.

use crate::conversion_checker::{ConversionChecker, ConversionCheckers};
use crate::interpolable::{InterpolableValue, InterpolationValue, NonInterpolableValue, PairwiseInterpolationValue};
use crate::interpolation_type::{InterpolationType, convert_css_value};
use css_style_builder::{ComputedStyle, StyleResolverState, apply_property};
use css_values_units::{CssValue, CustomPropertyValue, PropertyId, ValueId, VariableData};
use css_variables::{ComputedCustomProperty, resolve_variable_references};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct CssValueInterpolationType {
    property: PropertyId,
    /// Name of the custom property, including `--`.
    custom_name: Option<String>,
}

impl CssValueInterpolationType {
    pub const fn new(property: PropertyId) -> Self {
        Self {
            property,
            custom_name: None,
        }
    }

    pub fn custom(name: &str) -> Self {
        Self {
            property: PropertyId::Variable,
            custom_name: Some(name.to_owned()),
        }
    }

    pub fn custom_name(&self) -> Option<&str> {
        self.custom_name.as_deref()
    }

    fn discrete(value: CssValue) -> InterpolationValue {
        InterpolationValue::new(InterpolableValue::default(), Some(NonInterpolableValue::Value(value)))
    }
}

/// Apply a CSS-wide keyword to a custom property.
fn apply_custom_keyword(name: &str, keyword: ValueId, inherits: bool, state: &mut StyleResolverState<'_>) {
    let inherit = keyword == ValueId::Inherit || (keyword == ValueId::Unset && inherits);
    if inherit {
        let parent_value = state
            .parent_style()
            .and_then(|parent| parent.custom_properties.get(name))
            .cloned();
        let properties = &mut state.style_mut().custom_properties;
        match parent_value {
            Some(value) => properties.insert(name.to_owned(), value),
            None => {
                properties.remove(name);
            }
        }
        return;
    }
    let initial = state
        .registry()
        .and_then(|registry| registry.registration(name))
        .and_then(|registration| {
            let tokens = registration.initial_variable_data.clone()?;
            Some(ComputedCustomProperty {
                tokens,
                value: registration.initial.clone(),
            })
        });
    let properties = &mut state.style_mut().custom_properties;
    match initial {
        Some(value) => properties.insert(name.to_owned(), value),
        None => {
            properties.remove(name);
        }
    }
}

/// Store token data on a custom property, substituting any `var()` first.
fn apply_custom_tokens(name: &str, data: &Arc<VariableData>, state: &mut StyleResolverState<'_>) {
    let tokens = if data.needs_variable_resolution() {
        match resolve_variable_references(data, &state.style().custom_properties) {
            Some(tokens) => Arc::new(VariableData::from_tokens(tokens)),
            None => {
                state.style_mut().custom_properties.remove(name);
                return;
            }
        }
    } else {
        Arc::clone(data)
    };
    state
        .style_mut()
        .custom_properties
        .insert(name.to_owned(), ComputedCustomProperty { tokens, value: None });
}

impl InterpolationType for CssValueInterpolationType {
    fn property(&self) -> PropertyId {
        self.property
    }

    /// Computed values cannot be turned back into specified ones.
    fn maybe_convert_style(&self, _style: &ComputedStyle, _state: &StyleResolverState<'_>) -> Option<InterpolationValue> {
        None
    }

    fn maybe_convert_value(
        &self,
        value: &CssValue,
        _state: &StyleResolverState<'_>,
        _checkers: &mut ConversionCheckers,
    ) -> Option<InterpolationValue> {
        Some(Self::discrete(value.clone()))
    }

    /// Custom property keyframes keep their tokens; `var()` is substituted when applied.
    fn maybe_convert_css_value(
        &self,
        value: &CssValue,
        state: &StyleResolverState<'_>,
        checkers: &mut ConversionCheckers,
    ) -> Option<InterpolationValue> {
        if self.custom_name.is_some() {
            return Some(Self::discrete(value.clone()));
        }
        convert_css_value(self, value, state, checkers)
    }

    fn maybe_convert_neutral(
        &self,
        _underlying: &InterpolationValue,
        _checkers: &mut ConversionCheckers,
    ) -> Option<InterpolationValue> {
        None
    }

    fn maybe_convert_initial(
        &self,
        _state: &StyleResolverState<'_>,
        _checkers: &mut ConversionCheckers,
    ) -> Option<InterpolationValue> {
        Some(Self::discrete(CssValue::Initial))
    }

    fn maybe_convert_inherit(
        &self,
        state: &StyleResolverState<'_>,
        checkers: &mut ConversionCheckers,
    ) -> Option<InterpolationValue> {
        if self.custom_name.is_none() {
            checkers.push(ConversionChecker::inherited(self.property, state));
        }
        Some(Self::discrete(CssValue::Inherit))
    }

    fn maybe_convert_underlying_value(&self, _state: &StyleResolverState<'_>) -> Option<InterpolationValue> {
        None
    }

    fn is_inherited(&self, state: &StyleResolverState<'_>) -> bool {
        match &self.custom_name {
            Some(name) => state
                .registry()
                .and_then(|registry| registry.registration(name))
                .is_none_or(|registration| registration.inherits),
            None => self.property.is_inherited(),
        }
    }

    fn maybe_merge_singles(
        &self,
        _start: InterpolationValue,
        _end: InterpolationValue,
    ) -> Option<PairwiseInterpolationValue> {
        None
    }

    fn apply(
        &self,
        _interpolable: &InterpolableValue,
        non_interpolable: Option<&NonInterpolableValue>,
        state: &mut StyleResolverState<'_>,
    ) {
        let Some(NonInterpolableValue::Value(value)) = non_interpolable else {
            return;
        };
        let Some(name) = &self.custom_name else {
            apply_property(self.property, value, state);
            return;
        };
        let inherits = self.is_inherited(state);
        match value {
            CssValue::Initial => apply_custom_keyword(name, ValueId::Initial, inherits, state),
            CssValue::Inherit => apply_custom_keyword(name, ValueId::Inherit, inherits, state),
            CssValue::Unset => apply_custom_keyword(name, ValueId::Unset, inherits, state),
            CssValue::CustomPropertyDeclaration(declaration) => match &declaration.value {
                CustomPropertyValue::Tokens(data) => apply_custom_tokens(name, data, state),
                CustomPropertyValue::CssWide(keyword) => apply_custom_keyword(name, *keyword, inherits, state),
            },
            CssValue::VariableReference(data) => apply_custom_tokens(name, data, state),
            _ => {}
        }
    }
}
