//! CSS Animations Level 1 / Web Animations — per-property interpolation strategies.
//! Spec: <https://drafts.csswg.org/web-animations-1/#animating-properties>
//!
//! An [`InterpolationType`] converts keyframes of one property into
//! [`InterpolationValue`]s, merges two of them into a blendable pair, composites a blended
//! value onto the underlying one and writes the result into the computed style.

use crate::conversion_checker::{ConversionChecker, ConversionCheckers};
use crate::interpolable::{
    InterpolableValue, InterpolationValue, NonInterpolableValue, PairwiseInterpolationValue,
};
use css_parser::{ParserContext, parse_single_value};
use css_style_builder::{ComputedStyle, INITIAL_STYLE, StyleResolverState};
use css_syntax::TokenRange;
use css_values_units::{CssValue, PropertyId, VariableData};
use css_variables::resolve_variable_references;

/// How a keyframe combines with the underlying value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompositeOperation {
    #[default]
    Replace,
    Add,
}

/// One end of an interpolation.
#[derive(Clone, Debug, PartialEq)]
pub enum Keyframe {
    /// No value: the underlying value is used.
    Neutral,
    Value {
        value: CssValue,
        composite: CompositeOperation,
    },
}

impl Keyframe {
    pub const fn replace(value: CssValue) -> Self {
        Self::Value {
            value,
            composite: CompositeOperation::Replace,
        }
    }

    pub const fn add(value: CssValue) -> Self {
        Self::Value {
            value,
            composite: CompositeOperation::Add,
        }
    }

    pub const fn is_neutral(&self) -> bool {
        matches!(self, Self::Neutral)
    }

    /// Whether the underlying value contributes to this keyframe.
    pub const fn depends_on_underlying(&self) -> bool {
        matches!(
            self,
            Self::Neutral
                | Self::Value {
                    composite: CompositeOperation::Add,
                    ..
                }
        )
    }
}

/// Substitute the `var()` references of a keyframe value and re-parse it for `property`.
pub fn resolve_keyframe_variables(
    property: PropertyId,
    data: &VariableData,
    state: &StyleResolverState<'_>,
) -> Option<CssValue> {
    let tokens = resolve_variable_references(data, &state.style().custom_properties)?;
    parse_single_value(property, TokenRange::new(&tokens), &ParserContext::new(state.mode()))
}

pub trait InterpolationType {
    fn property(&self) -> PropertyId;

    /// The value of this property held by `style`.
    fn maybe_convert_style(&self, style: &ComputedStyle, state: &StyleResolverState<'_>) -> Option<InterpolationValue>;

    /// A literal keyframe value; `None` when this type cannot animate it.
    fn maybe_convert_value(
        &self,
        value: &CssValue,
        state: &StyleResolverState<'_>,
        checkers: &mut ConversionCheckers,
    ) -> Option<InterpolationValue>;

    /// Write a blended value into the computed style.
    fn apply(
        &self,
        interpolable: &InterpolableValue,
        non_interpolable: Option<&NonInterpolableValue>,
        state: &mut StyleResolverState<'_>,
    );

    /// The identity for addition, shaped like `underlying`.
    fn maybe_convert_neutral(
        &self,
        underlying: &InterpolationValue,
        checkers: &mut ConversionCheckers,
    ) -> Option<InterpolationValue> {
        checkers.push(ConversionChecker::underlying(underlying));
        Some(InterpolationValue::new(
            underlying.interpolable.zeroed(),
            underlying.non_interpolable.clone(),
        ))
    }

    fn maybe_convert_initial(
        &self,
        state: &StyleResolverState<'_>,
        _checkers: &mut ConversionCheckers,
    ) -> Option<InterpolationValue> {
        self.maybe_convert_style(&INITIAL_STYLE, state)
    }

    /// The parent's value, or the initial value at the root.
    fn maybe_convert_inherit(
        &self,
        state: &StyleResolverState<'_>,
        checkers: &mut ConversionCheckers,
    ) -> Option<InterpolationValue> {
        checkers.push(ConversionChecker::inherited(self.property(), state));
        match state.parent_style() {
            Some(parent) => self.maybe_convert_style(parent, state),
            None => self.maybe_convert_initial(state, checkers),
        }
    }

    /// The value the element would have without this animation.
    fn maybe_convert_underlying_value(&self, state: &StyleResolverState<'_>) -> Option<InterpolationValue> {
        self.maybe_convert_style(state.style(), state)
    }

    fn is_inherited(&self, _state: &StyleResolverState<'_>) -> bool {
        self.property().is_inherited()
    }

    /// Merge two keyframes into a blendable pair when their non-interpolable data agree.
    fn maybe_merge_singles(
        &self,
        start: InterpolationValue,
        end: InterpolationValue,
    ) -> Option<PairwiseInterpolationValue> {
        start.is_compatible_with(&end).then(|| PairwiseInterpolationValue {
            start: start.interpolable,
            end: end.interpolable,
            non_interpolable: start.non_interpolable,
        })
    }

    /// `underlying = underlying * underlying_fraction + value`, or replace the underlying
    /// value when the two cannot be added.
    fn composite(
        &self,
        underlying: &mut InterpolationValue,
        underlying_fraction: f64,
        value: &InterpolationValue,
        _interpolation_fraction: f64,
    ) {
        if underlying.is_compatible_with(value) {
            underlying.interpolable.scale_and_add(underlying_fraction, &value.interpolable);
        } else {
            underlying.clone_from(value);
        }
    }

    /// A keyframe value with the CSS-wide keywords and `var()` resolved.
    fn maybe_convert_css_value(
        &self,
        value: &CssValue,
        state: &StyleResolverState<'_>,
        checkers: &mut ConversionCheckers,
    ) -> Option<InterpolationValue> {
        convert_css_value(self, value, state, checkers)
    }

    /// Convert one keyframe. Neutral keyframes need the underlying value.
    fn maybe_convert_single(
        &self,
        keyframe: &Keyframe,
        state: &StyleResolverState<'_>,
        underlying: Option<&InterpolationValue>,
        checkers: &mut ConversionCheckers,
    ) -> Option<InterpolationValue> {
        match keyframe {
            Keyframe::Neutral => self.maybe_convert_neutral(underlying?, checkers),
            Keyframe::Value { value, .. } => self.maybe_convert_css_value(value, state, checkers),
        }
    }
}

/// Resolve the CSS-wide keywords and `var()` of a keyframe value, then convert it with
/// `kind`.
pub fn convert_css_value<Kind: InterpolationType + ?Sized>(
    kind: &Kind,
    value: &CssValue,
    state: &StyleResolverState<'_>,
    checkers: &mut ConversionCheckers,
) -> Option<InterpolationValue> {
    match value {
        CssValue::Initial => kind.maybe_convert_initial(state, checkers),
        CssValue::Inherit => kind.maybe_convert_inherit(state, checkers),
        CssValue::Unset if kind.is_inherited(state) => kind.maybe_convert_inherit(state, checkers),
        CssValue::Unset => kind.maybe_convert_initial(state, checkers),
        CssValue::VariableReference(data) => {
            checkers.push(ConversionChecker::custom_properties(state));
            let resolved = resolve_keyframe_variables(kind.property(), data, state)?;
            kind.maybe_convert_css_value(&resolved, state, checkers)
        }
        _ => kind.maybe_convert_value(value, state, checkers),
    }
}
