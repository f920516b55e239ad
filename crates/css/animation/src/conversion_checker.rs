//! Guards that decide whether a cached keyframe conversion is still valid.
//!
//! A conversion that read anything besides the keyframe itself (the parent's value, the
//! font size, custom properties, the underlying value) records a checker for that input.
//! The driver re-runs every checker before reusing the conversion.

use crate::interpolable::InterpolationValue;
use core::fmt;
use css_style_builder::{ComputedStyle, StyleResolverState};
use css_values_units::PropertyId;

type CheckFn = dyn Fn(&StyleResolverState<'_>, Option<&InterpolationValue>) -> bool;

pub struct ConversionChecker {
    kind: &'static str,
    check: Box<CheckFn>,
}

pub type ConversionCheckers = Vec<ConversionChecker>;

impl fmt::Debug for ConversionChecker {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("ConversionChecker").field(&self.kind).finish()
    }
}

impl ConversionChecker {
    pub fn new(
        kind: &'static str,
        check: impl Fn(&StyleResolverState<'_>, Option<&InterpolationValue>) -> bool + 'static,
    ) -> Self {
        Self {
            kind,
            check: Box::new(check),
        }
    }

    pub const fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn is_valid(&self, state: &StyleResolverState<'_>, underlying: Option<&InterpolationValue>) -> bool {
        (self.check)(state, underlying)
    }

    /// The parent's computed value of `property` is unchanged.
    pub fn inherited(property: PropertyId, state: &StyleResolverState<'_>) -> Self {
        let snapshot = move |parent: Option<&ComputedStyle>| {
            let mut style = ComputedStyle::default();
            if let Some(parent) = parent {
                style.copy_property_from(property, parent);
            }
            style
        };
        let expected = snapshot(state.parent_style());
        Self::new("inherited", move |current, _| snapshot(current.parent_style()) == expected)
    }

    /// Font sizes, viewport and zoom are unchanged.
    pub fn conversion_data(state: &StyleResolverState<'_>) -> Self {
        let expected = *state.conversion_data();
        Self::new("conversion data", move |current, _| *current.conversion_data() == expected)
    }

    /// The element's computed custom properties are unchanged.
    pub fn custom_properties(state: &StyleResolverState<'_>) -> Self {
        let expected = state.style().custom_properties.clone();
        Self::new("custom properties", move |current, _| current.style().custom_properties == expected)
    }

    /// The underlying value still has the structure a neutral keyframe was shaped after.
    pub fn underlying(underlying: &InterpolationValue) -> Self {
        let expected = underlying.clone();
        Self::new("underlying", move |_, current| {
            current.is_some_and(|value| value.is_compatible_with(&expected))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolable::InterpolableValue;
    use css_values_units::LengthConversionData;

    /// # Panics
    /// Panics if a changed parent value is not detected.
    #[test]
    fn inherited_checker_tracks_parent() {
        let mut parent = ComputedStyle::default();
        parent.opacity = 0.5;
        let state = StyleResolverState::new(Some(&parent), LengthConversionData::default());
        let checker = ConversionChecker::inherited(PropertyId::Opacity, &state);
        assert!(checker.is_valid(&state, None));

        let mut other_parent = ComputedStyle::default();
        other_parent.opacity = 0.25;
        let other_state = StyleResolverState::new(Some(&other_parent), LengthConversionData::default());
        assert!(!checker.is_valid(&other_state, None));
    }

    /// # Panics
    /// Panics if an underlying value of a new shape is accepted.
    #[test]
    fn underlying_checker_tracks_shape() {
        let state = StyleResolverState::new(None, LengthConversionData::default());
        let underlying = InterpolationValue::interpolable(InterpolableValue::numbers([1.0, 2.0]));
        let checker = ConversionChecker::underlying(&underlying);
        let reshaped = InterpolationValue::interpolable(InterpolableValue::numbers([1.0]));
        let rescaled = InterpolationValue::interpolable(InterpolableValue::numbers([3.0, 4.0]));
        assert!(checker.is_valid(&state, Some(&rescaled)));
        assert!(!checker.is_valid(&state, Some(&reshaped)));
        assert!(!checker.is_valid(&state, None));
    }
}
