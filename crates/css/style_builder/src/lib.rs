//! CSS Cascading and Inheritance Level 4 — computed values.
//! Spec: <https://www.w3.org/TR/css-cascade-4/#computed>
//!
//! Turns parsed declarations into a [`ComputedStyle`]: resolves custom properties and
//! `var()` references, applies the CSS-wide keywords, and converts each specified value to
//! its computed form.

#![forbid(unsafe_code)]

pub mod builder;
pub mod converters;
pub mod resolver_state;
pub mod style_model;

pub use builder::{
    INITIAL_STYLE, apply_declaration, apply_declarations, apply_inherit, apply_initial, apply_property,
    resolve_style,
};
pub use resolver_state::{StyleResolverState, TextLinkColors};
pub use style_model::{
    BorderSpacing, BoxSides, ClipRect, ComputedStyle, FilterOperation, FilterOperationType, GridTrackBreadth,
    GridTrackList, GridTrackSize, Length, LineHeight, Paint, RotateTransform, ScaleTransform, ShadowData,
    ShadowStyle, StyleColor, StyleImage, TextDecorationLine, TextIndent, TransformOperation, TransformOperations,
    TransformOrigin, TranslateTransform, VerticalAlign,
};
