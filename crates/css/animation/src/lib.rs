//! CSS Animations Level 1 / Web Animations — interpolating computed values.
//! Spec: <https://drafts.csswg.org/web-animations-1/#animating-properties>
//!
//! Keyframe values are converted by per-property [`InterpolationType`]s into blendable
//! numbers plus the data that has to match for two values to blend. An
//! [`InvalidatableInterpolation`] caches that conversion and redoes it only when the
//! inputs it depended on change.

#![forbid(unsafe_code)]

pub mod conversion_checker;
pub mod interpolable;
pub mod interpolation;
pub mod interpolation_type;
pub mod types;

pub use conversion_checker::{ConversionChecker, ConversionCheckers};
pub use interpolable::{InterpolableValue, InterpolationValue, NonInterpolableValue, PairwiseInterpolationValue};
pub use interpolation::{DISCRETE_FLIP_FRACTION, InvalidatableInterpolation, PropertyKeyframes};
pub use interpolation_type::{CompositeOperation, InterpolationType, Keyframe};
pub use types::{InterpolationTypes, interpolation_types_for_property, interpolation_types_for_syntax};
