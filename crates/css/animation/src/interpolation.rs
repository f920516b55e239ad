//! CSS Animations Level 1 — sampling keyframes of one property.
//! Spec: <https://drafts.csswg.org/css-animations-1/#keyframes>
//!
//! An [`InvalidatableInterpolation`] converts its two keyframes once and keeps the
//! conversion until one of the recorded [`ConversionChecker`]s fails. When no
//! interpolation type can merge the keyframes, the start value is used below a fraction of
//! 0.5 and the end value from 0.5 on.
//!
//! [`ConversionChecker`]: crate::conversion_checker::ConversionChecker

use crate::conversion_checker::ConversionCheckers;
use crate::interpolable::{InterpolationValue, PairwiseInterpolationValue};
use crate::interpolation_type::{InterpolationType, Keyframe};
use crate::types::{InterpolationTypes, interpolation_types_for_property, interpolation_types_for_syntax};
use css_parser::KeyframesRule;
use css_style_builder::StyleResolverState;
use css_values_units::PropertyId;
use css_variables::SyntaxDescriptor;
use log::{debug, trace};

/// Fraction from which a discrete interpolation shows its end value.
pub const DISCRETE_FLIP_FRACTION: f64 = 0.5;

/// One side of a discrete interpolation: the type that converted it and the value.
type ConvertedSide = Option<(usize, InterpolationValue)>;

#[derive(Debug)]
enum CachedConversion {
    Pairwise {
        type_index: usize,
        value: PairwiseInterpolationValue,
    },
    Flip {
        start: ConvertedSide,
        end: ConvertedSide,
    },
}

pub struct InvalidatableInterpolation {
    property: PropertyId,
    types: InterpolationTypes,
    start: Keyframe,
    end: Keyframe,
    fraction: f64,
    cached: Option<CachedConversion>,
    /// Checkers of the cached conversion, with the index of the type that recorded them.
    checkers: Vec<(usize, ConversionCheckers)>,
}

impl InvalidatableInterpolation {
    pub fn new(property: PropertyId, start: Keyframe, end: Keyframe) -> Self {
        Self::with_types(property, interpolation_types_for_property(property), start, end)
    }

    /// An interpolation of the custom property `name`, registered with `syntax`.
    pub fn for_custom_property(name: &str, syntax: &SyntaxDescriptor, start: Keyframe, end: Keyframe) -> Self {
        Self::with_types(
            PropertyId::Variable,
            interpolation_types_for_syntax(name, syntax),
            start,
            end,
        )
    }

    fn with_types(property: PropertyId, types: InterpolationTypes, start: Keyframe, end: Keyframe) -> Self {
        Self {
            property,
            types,
            start,
            end,
            fraction: 0.0,
            cached: None,
            checkers: Vec::new(),
        }
    }

    pub const fn property(&self) -> PropertyId {
        self.property
    }

    pub const fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Set the fraction the next [`apply`](Self::apply) samples at. Fractions outside
    /// `[0, 1]` extrapolate.
    pub const fn interpolate(&mut self, fraction: f64) {
        self.fraction = fraction;
    }

    /// Whether the keyframes merged into a smoothly blending pair. Only meaningful after
    /// a conversion has been made.
    pub const fn is_smooth(&self) -> bool {
        matches!(self.cached, Some(CachedConversion::Pairwise { .. }))
    }

    fn depends_on_underlying(&self) -> bool {
        self.start.depends_on_underlying() || self.end.depends_on_underlying()
    }

    fn underlying_value(&self, type_index: usize, state: &StyleResolverState<'_>) -> Option<InterpolationValue> {
        self.types
            .get(type_index)
            .and_then(|kind| kind.maybe_convert_underlying_value(state))
    }

    fn is_cache_valid(&self, state: &StyleResolverState<'_>) -> bool {
        if self.cached.is_none() {
            return false;
        }
        self.checkers.iter().all(|(type_index, checkers)| {
            let underlying = self.underlying_value(*type_index, state);
            checkers.iter().all(|checker| {
                let valid = checker.is_valid(state, underlying.as_ref());
                if !valid {
                    debug!(
                        target: "css::animation",
                        "{}: {} checker invalidated the cached conversion",
                        self.property.name(),
                        checker.kind()
                    );
                }
                valid
            })
        })
    }

    /// Convert one keyframe with the first type that accepts it.
    fn convert_side(
        &self,
        keyframe: &Keyframe,
        state: &StyleResolverState<'_>,
        checkers: &mut Vec<(usize, ConversionCheckers)>,
    ) -> ConvertedSide {
        self.types.iter().enumerate().find_map(|(type_index, kind)| {
            let underlying = keyframe
                .is_neutral()
                .then(|| kind.maybe_convert_underlying_value(state))
                .flatten();
            let mut type_checkers = ConversionCheckers::new();
            let value = kind.maybe_convert_single(keyframe, state, underlying.as_ref(), &mut type_checkers)?;
            checkers.push((type_index, type_checkers));
            Some((type_index, value))
        })
    }

    fn convert(&self, state: &StyleResolverState<'_>) -> (Option<CachedConversion>, Vec<(usize, ConversionCheckers)>) {
        let needs_underlying = self.start.is_neutral() || self.end.is_neutral();
        for (type_index, kind) in self.types.iter().enumerate() {
            let underlying = needs_underlying
                .then(|| kind.maybe_convert_underlying_value(state))
                .flatten();
            let mut type_checkers = ConversionCheckers::new();
            let Some(start) = kind.maybe_convert_single(&self.start, state, underlying.as_ref(), &mut type_checkers)
            else {
                continue;
            };
            let Some(end) = kind.maybe_convert_single(&self.end, state, underlying.as_ref(), &mut type_checkers) else {
                continue;
            };
            if let Some(value) = kind.maybe_merge_singles(start, end) {
                trace!(
                    target: "css::animation",
                    "{}: keyframes merged by interpolation type {type_index}",
                    self.property.name()
                );
                return (
                    Some(CachedConversion::Pairwise { type_index, value }),
                    vec![(type_index, type_checkers)],
                );
            }
            debug!(
                target: "css::animation",
                "{}: keyframes do not merge under interpolation type {type_index}",
                self.property.name()
            );
        }
        let mut checkers = Vec::new();
        let start = self.convert_side(&self.start, state, &mut checkers);
        let end = self.convert_side(&self.end, state, &mut checkers);
        if start.is_none() && end.is_none() {
            debug!(target: "css::animation", "{}: neither keyframe converts", self.property.name());
            return (None, checkers);
        }
        debug!(
            target: "css::animation",
            "{}: falling back to a discrete interpolation",
            self.property.name()
        );
        (Some(CachedConversion::Flip { start, end }), checkers)
    }

    fn ensure_converted(&mut self, state: &StyleResolverState<'_>) {
        if self.is_cache_valid(state) {
            return;
        }
        let (cached, checkers) = self.convert(state);
        self.cached = cached;
        self.checkers = checkers;
    }

    /// Composite `value` onto the underlying value of `kind`, or return it unchanged when
    /// there is none.
    fn composite_with_underlying(
        kind: &dyn InterpolationType,
        value: InterpolationValue,
        underlying_fraction: f64,
        fraction: f64,
        state: &StyleResolverState<'_>,
    ) -> InterpolationValue {
        match kind.maybe_convert_underlying_value(state) {
            Some(mut underlying) => {
                kind.composite(&mut underlying, underlying_fraction, &value, fraction);
                underlying
            }
            None => value,
        }
    }

    /// Write the value at the current fraction into `state`.
    pub fn apply(&mut self, state: &mut StyleResolverState<'_>) {
        self.ensure_converted(state);
        let fraction = self.fraction;
        let weight = |keyframe: &Keyframe| if keyframe.depends_on_underlying() { 1.0 } else { 0.0 };
        let (kind, value) = match &self.cached {
            None => return,
            Some(CachedConversion::Pairwise { type_index, value }) => {
                let Some(kind) = self.types.get(*type_index) else {
                    return;
                };
                let mut result = value.at(fraction);
                if self.depends_on_underlying() {
                    let underlying_fraction = (1.0 - fraction) * weight(&self.start) + fraction * weight(&self.end);
                    result = Self::composite_with_underlying(kind.as_ref(), result, underlying_fraction, fraction, state);
                }
                (kind, result)
            }
            Some(CachedConversion::Flip { start, end }) => {
                let (side, keyframe) = if fraction < DISCRETE_FLIP_FRACTION {
                    (start, &self.start)
                } else {
                    (end, &self.end)
                };
                let Some((type_index, value)) = side else {
                    return;
                };
                let Some(kind) = self.types.get(*type_index) else {
                    return;
                };
                let mut result = value.clone();
                if keyframe.depends_on_underlying() {
                    result = Self::composite_with_underlying(kind.as_ref(), result, 1.0, fraction, state);
                }
                (kind, result)
            }
        };
        kind.apply(&value.interpolable, value.non_interpolable.as_ref(), state);
    }
}

/// The keyframes of one property across an `@keyframes` rule, with implicit neutral
/// keyframes at offsets 0 and 1 when the rule leaves them out.
pub struct PropertyKeyframes {
    property: PropertyId,
    offsets: Vec<f64>,
    segments: Vec<InvalidatableInterpolation>,
}

impl PropertyKeyframes {
    /// `keyframes` are `(offset, keyframe)` pairs in any order.
    pub fn new(property: PropertyId, keyframes: impl IntoIterator<Item = (f64, Keyframe)>) -> Self {
        let mut keyframes: Vec<(f64, Keyframe)> = keyframes.into_iter().collect();
        keyframes.sort_by(|(left, _), (right, _)| left.total_cmp(right));
        if keyframes.first().is_none_or(|(offset, _)| *offset > 0.0) {
            keyframes.insert(0, (0.0, Keyframe::Neutral));
        }
        if keyframes.last().is_none_or(|(offset, _)| *offset < 1.0) {
            keyframes.push((1.0, Keyframe::Neutral));
        }
        let offsets = keyframes.iter().map(|(offset, _)| *offset).collect();
        let segments = keyframes
            .windows(2)
            .map(|pair| match pair {
                [(_, start), (_, end)] => InvalidatableInterpolation::new(property, start.clone(), end.clone()),
                _ => InvalidatableInterpolation::new(property, Keyframe::Neutral, Keyframe::Neutral),
            })
            .collect();
        Self {
            property,
            offsets,
            segments,
        }
    }

    /// The keyframes of `property` declared in `rule`.
    pub fn from_rule(property: PropertyId, rule: &KeyframesRule) -> Self {
        let keyframes = rule.keyframes.iter().flat_map(|keyframe| {
            let value = keyframe.properties.get_property_value(property).cloned();
            keyframe
                .keys
                .iter()
                .filter_map(move |key| value.clone().map(|declared| (*key, Keyframe::replace(declared))))
        });
        Self::new(property, keyframes)
    }

    pub const fn property(&self) -> PropertyId {
        self.property
    }

    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    /// Apply the value at `progress` into `state`. Progress is clamped to `[0, 1]`.
    pub fn sample(&mut self, progress: f64, state: &mut StyleResolverState<'_>) {
        let progress = progress.clamp(0.0, 1.0);
        let index = self
            .offsets
            .windows(2)
            .position(|pair| matches!(pair, [_, end] if progress <= *end))
            .unwrap_or_default();
        let (Some(start), Some(end)) = (self.offsets.get(index), self.offsets.get(index + 1)) else {
            return;
        };
        let span = end - start;
        let local = if span > f64::EPSILON {
            (progress - start) / span
        } else {
            1.0
        };
        if let Some(segment) = self.segments.get_mut(index) {
            segment.interpolate(local);
            segment.apply(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_style_builder::Length;
    use css_values_units::{CssValue, LengthConversionData, PrimitiveValue, UnitType, ValueId};

    fn px(value: f64) -> CssValue {
        CssValue::Primitive(PrimitiveValue::numeric(value, UnitType::Pixels))
    }

    fn em(value: f64) -> CssValue {
        CssValue::Primitive(PrimitiveValue::numeric(value, UnitType::Ems))
    }

    /// # Panics
    /// Panics if lengths do not blend smoothly.
    #[test]
    fn blends_lengths() {
        let mut state = StyleResolverState::new(None, LengthConversionData::default());
        let mut interpolation =
            InvalidatableInterpolation::new(PropertyId::Width, Keyframe::replace(px(10.0)), Keyframe::replace(px(30.0)));
        interpolation.interpolate(0.25);
        interpolation.apply(&mut state);
        assert!(interpolation.is_smooth());
        assert_eq!(state.style().width, Length::Fixed(15.0));
    }

    /// # Panics
    /// Panics if values that cannot blend do not flip at the halfway point.
    #[test]
    fn flips_discrete_values() {
        let mut interpolation = InvalidatableInterpolation::new(
            PropertyId::Width,
            Keyframe::replace(CssValue::identifier(ValueId::Auto)),
            Keyframe::replace(px(30.0)),
        );
        for (fraction, expected) in [(0.49, Length::Auto), (0.5, Length::Fixed(30.0))] {
            let mut state = StyleResolverState::new(None, LengthConversionData::default());
            state.style_mut().width = Length::Fixed(1.0);
            interpolation.interpolate(fraction);
            interpolation.apply(&mut state);
            assert!(!interpolation.is_smooth());
            assert_eq!(state.style().width, expected);
        }
    }

    /// # Panics
    /// Panics if neutral keyframes do not start from the underlying value.
    #[test]
    fn neutral_keyframes_use_underlying_value() {
        let mut state = StyleResolverState::new(None, LengthConversionData::default());
        state.style_mut().width = Length::Fixed(100.0);
        let mut interpolation =
            InvalidatableInterpolation::new(PropertyId::Width, Keyframe::Neutral, Keyframe::replace(px(200.0)));
        interpolation.interpolate(0.5);
        interpolation.apply(&mut state);
        assert_eq!(state.style().width, Length::Fixed(150.0));
    }

    /// # Panics
    /// Panics if additive keyframes replace instead of adding to the underlying value.
    #[test]
    fn additive_keyframes_add() {
        let mut state = StyleResolverState::new(None, LengthConversionData::default());
        state.style_mut().margin.left = Length::Fixed(10.0);
        let mut interpolation = InvalidatableInterpolation::new(
            PropertyId::MarginLeft,
            Keyframe::add(px(0.0)),
            Keyframe::add(px(20.0)),
        );
        interpolation.interpolate(0.5);
        interpolation.apply(&mut state);
        assert_eq!(state.style().margin.left, Length::Fixed(20.0));
    }

    /// # Panics
    /// Panics if a change of font size does not invalidate em conversions.
    #[test]
    fn reconverts_when_font_size_changes() {
        let mut interpolation =
            InvalidatableInterpolation::new(PropertyId::Width, Keyframe::replace(em(1.0)), Keyframe::replace(em(3.0)));
        interpolation.interpolate(0.5);

        let mut default_state = StyleResolverState::new(None, LengthConversionData::default());
        interpolation.apply(&mut default_state);
        assert_eq!(default_state.style().width, Length::Fixed(32.0));

        let mut small_state = StyleResolverState::new(None, LengthConversionData::default().with_font_size(10.0));
        interpolation.apply(&mut small_state);
        assert_eq!(small_state.style().width, Length::Fixed(20.0));
    }

    /// # Panics
    /// Panics if keyframe segments or implicit keyframes are sampled incorrectly.
    #[test]
    fn samples_keyframe_segments() {
        let mut keyframes = PropertyKeyframes::new(
            PropertyId::Height,
            [(0.5, Keyframe::replace(px(50.0))), (0.0, Keyframe::replace(px(0.0)))],
        );
        assert_eq!(keyframes.offsets(), &[0.0, 0.5, 1.0]);

        let mut first_half = StyleResolverState::new(None, LengthConversionData::default());
        keyframes.sample(0.25, &mut first_half);
        assert_eq!(first_half.style().height, Length::Fixed(25.0));

        let mut second_half = StyleResolverState::new(None, LengthConversionData::default());
        second_half.style_mut().height = Length::Fixed(150.0);
        keyframes.sample(0.75, &mut second_half);
        assert_eq!(second_half.style().height, Length::Fixed(100.0));
    }
}
