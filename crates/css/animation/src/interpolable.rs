//! The numeric and non-numeric halves of an animated value.

use css_style_builder::{FilterOperationType, ShadowStyle, StyleImage};
use css_values_units::CssValue;

/// A tree of numbers that can be blended component by component.
#[derive(Clone, Debug, PartialEq)]
pub enum InterpolableValue {
    Number(f64),
    List(Vec<InterpolableValue>),
}

impl Default for InterpolableValue {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl InterpolableValue {
    /// A flat list of numbers.
    pub fn numbers(values: impl IntoIterator<Item = f64>) -> Self {
        Self::List(values.into_iter().map(Self::Number).collect())
    }

    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            Self::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            Self::Number(_) => None,
        }
    }

    /// The number at `index` of a list, or zero.
    pub fn number_at(&self, index: usize) -> f64 {
        self.as_list()
            .and_then(|items| items.get(index))
            .and_then(Self::as_number)
            .unwrap_or_default()
    }

    /// Number of list items; numbers have none.
    pub fn len(&self) -> usize {
        self.as_list().map_or(0, <[Self]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether both trees have the same structure, ignoring the numbers.
    pub fn same_shape(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(_), Self::Number(_)) => true,
            (Self::List(left), Self::List(right)) => {
                left.len() == right.len()
                    && left.iter().zip(right).all(|(item, other_item)| item.same_shape(other_item))
            }
            _ => false,
        }
    }

    /// `self` at `fraction` of the way to `to`. Trees of different shapes return `self`.
    #[must_use]
    pub fn interpolate(&self, to: &Self, fraction: f64) -> Self {
        debug_assert!(self.same_shape(to), "interpolating values of different shapes");
        match (self, to) {
            (Self::Number(from), Self::Number(to_number)) => Self::Number(from + (to_number - from) * fraction),
            (Self::List(from), Self::List(to_items)) if from.len() == to_items.len() => Self::List(
                from.iter()
                    .zip(to_items)
                    .map(|(item, to_item)| item.interpolate(to_item, fraction))
                    .collect(),
            ),
            _ => self.clone(),
        }
    }

    /// `self = self * scale + other`.
    pub fn scale_and_add(&mut self, scale: f64, other: &Self) {
        debug_assert!(self.same_shape(other), "adding values of different shapes");
        match (self, other) {
            (Self::Number(number), Self::Number(addend)) => *number = *number * scale + addend,
            (Self::List(items), Self::List(addends)) => {
                for (item, addend) in items.iter_mut().zip(addends) {
                    item.scale_and_add(scale, addend);
                }
            }
            _ => {}
        }
    }

    /// Same shape, every number zero.
    #[must_use]
    pub fn zeroed(&self) -> Self {
        match self {
            Self::Number(_) => Self::Number(0.0),
            Self::List(items) => Self::List(items.iter().map(Self::zeroed).collect()),
        }
    }

    /// Whether every number is within `tolerance` of its counterpart.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        match (self, other) {
            (Self::Number(left), Self::Number(right)) => (left - right).abs() <= tolerance,
            (Self::List(left), Self::List(right)) => {
                left.len() == right.len()
                    && left
                        .iter()
                        .zip(right)
                        .all(|(item, other_item)| item.approx_eq(other_item, tolerance))
            }
            _ => false,
        }
    }
}

/// Data that must match exactly for two values to blend.
#[derive(Clone, Debug, PartialEq)]
pub enum NonInterpolableValue {
    /// Per-item data of a list value.
    List(Vec<Option<NonInterpolableValue>>),
    Shadow(ShadowStyle),
    Filter(FilterOperationType),
    /// `clip: auto`.
    ClipAuto,
    /// Which edges of `clip: rect()` are `auto`, in top, right, bottom, left order.
    ClipAutos([bool; 4]),
    TextIndentModes { each_line: bool, hanging: bool },
    /// Normalized axis of a `rotate` value; `None` for a zero rotation.
    RotationAxis(Option<[f64; 3]>),
    Image(StyleImage),
    /// The images a merged image pair blends between.
    ImagePair { start: StyleImage, end: StyleImage },
    /// A value only the catch-all type understands.
    Value(CssValue),
}

/// One converted keyframe.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InterpolationValue {
    pub interpolable: InterpolableValue,
    pub non_interpolable: Option<NonInterpolableValue>,
}

impl InterpolationValue {
    pub const fn new(interpolable: InterpolableValue, non_interpolable: Option<NonInterpolableValue>) -> Self {
        Self {
            interpolable,
            non_interpolable,
        }
    }

    pub const fn interpolable(interpolable: InterpolableValue) -> Self {
        Self::new(interpolable, None)
    }

    /// Whether `other` can be blended into this value by addition.
    pub fn is_compatible_with(&self, other: &Self) -> bool {
        self.non_interpolable == other.non_interpolable && self.interpolable.same_shape(&other.interpolable)
    }
}

/// Two keyframes merged into a blendable pair.
#[derive(Clone, Debug, PartialEq)]
pub struct PairwiseInterpolationValue {
    pub start: InterpolableValue,
    pub end: InterpolableValue,
    pub non_interpolable: Option<NonInterpolableValue>,
}

impl PairwiseInterpolationValue {
    /// The blended value at `fraction`.
    pub fn at(&self, fraction: f64) -> InterpolationValue {
        InterpolationValue::new(
            self.start.interpolate(&self.end, fraction),
            self.non_interpolable.clone(),
        )
    }
}
