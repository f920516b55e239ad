//! CSS Images Module Level 4 — interpolating `background-image` lists.
//! Spec: <https://www.w3.org/TR/css-images-4/#interpolating-images>
//!
//! Two lists of the same length blend image by image as `cross-fade()`s. Each item's
//! progress runs from 0 to 1; the images themselves sit in the non-interpolable half.
//! A `none` layer only blends with another `none` layer.

use crate::conversion_checker::ConversionCheckers;
use crate::interpolable::{InterpolableValue, InterpolationValue, NonInterpolableValue, PairwiseInterpolationValue};
use crate::interpolation_type::InterpolationType;
use css_style_builder::converters::effects::convert_image_list;
use css_style_builder::{ComputedStyle, StyleImage, StyleResolverState};
use css_values_units::{CssValue, PropertyId};

fn images_to_value(images: &[StyleImage]) -> InterpolationValue {
    InterpolationValue::new(
        InterpolableValue::numbers(images.iter().map(|_| 0.0)),
        Some(NonInterpolableValue::List(
            images
                .iter()
                .map(|image| Some(NonInterpolableValue::Image(image.clone())))
                .collect(),
        )),
    )
}

fn images_of(value: &InterpolationValue) -> Option<Vec<StyleImage>> {
    let Some(NonInterpolableValue::List(items)) = &value.non_interpolable else {
        return None;
    };
    items
        .iter()
        .map(|item| match item {
            Some(NonInterpolableValue::Image(image)) => Some(image.clone()),
            _ => None,
        })
        .collect()
}

/// The image shown at `progress` between `start` and `end`.
#[allow(clippy::cast_possible_truncation, reason = "Blend amounts are f32")]
fn blend_images(start: &StyleImage, end: &StyleImage, progress: f64) -> StyleImage {
    if progress <= 0.0 || start == end {
        return start.clone();
    }
    if progress >= 1.0 {
        return end.clone();
    }
    StyleImage::CrossFade {
        from: Box::new(start.clone()),
        to: Box::new(end.clone()),
        percentage: progress as f32,
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ImageListInterpolationType;

impl InterpolationType for ImageListInterpolationType {
    fn property(&self) -> PropertyId {
        PropertyId::BackgroundImage
    }

    fn maybe_convert_style(&self, style: &ComputedStyle, _state: &StyleResolverState<'_>) -> Option<InterpolationValue> {
        Some(images_to_value(&style.background_images))
    }

    fn maybe_convert_value(
        &self,
        value: &CssValue,
        _state: &StyleResolverState<'_>,
        _checkers: &mut ConversionCheckers,
    ) -> Option<InterpolationValue> {
        Some(images_to_value(&convert_image_list(value)?))
    }

    /// Images have no additive identity.
    fn maybe_convert_neutral(
        &self,
        _underlying: &InterpolationValue,
        _checkers: &mut ConversionCheckers,
    ) -> Option<InterpolationValue> {
        None
    }

    fn maybe_merge_singles(
        &self,
        start: InterpolationValue,
        end: InterpolationValue,
    ) -> Option<PairwiseInterpolationValue> {
        let start_images = images_of(&start)?;
        let end_images = images_of(&end)?;
        if start_images.len() != end_images.len()
            || start_images
                .iter()
                .zip(&end_images)
                .any(|(from, to)| (*from == StyleImage::None) != (*to == StyleImage::None))
        {
            return None;
        }
        let count = start_images.len();
        let pairs = start_images
            .into_iter()
            .zip(end_images)
            .map(|(start, end)| Some(NonInterpolableValue::ImagePair { start, end }))
            .collect();
        Some(PairwiseInterpolationValue {
            start: InterpolableValue::numbers(vec![0.0; count]),
            end: InterpolableValue::numbers(vec![1.0; count]),
            non_interpolable: Some(NonInterpolableValue::List(pairs)),
        })
    }

    fn composite(
        &self,
        underlying: &mut InterpolationValue,
        _underlying_fraction: f64,
        value: &InterpolationValue,
        _interpolation_fraction: f64,
    ) {
        underlying.clone_from(value);
    }

    fn apply(
        &self,
        interpolable: &InterpolableValue,
        non_interpolable: Option<&NonInterpolableValue>,
        state: &mut StyleResolverState<'_>,
    ) {
        let Some(NonInterpolableValue::List(items)) = non_interpolable else {
            return;
        };
        let images = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match item {
                Some(NonInterpolableValue::Image(image)) => Some(image.clone()),
                Some(NonInterpolableValue::ImagePair { start, end }) => {
                    Some(blend_images(start, end, interpolable.number_at(index)))
                }
                _ => None,
            })
            .collect();
        state.style_mut().background_images = images;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_values_units::LengthConversionData;

    fn url(name: &str) -> StyleImage {
        StyleImage::Url(name.to_owned())
    }

    /// # Panics
    /// Panics if images do not cross-fade or the endpoints are not exact.
    #[test]
    fn cross_fades_images() {
        let kind = ImageListInterpolationType;
        let pair = kind.maybe_merge_singles(images_to_value(&[url("a.png")]), images_to_value(&[url("b.png")]));
        for (fraction, expected) in [
            (0.0, url("a.png")),
            (
                0.25,
                StyleImage::CrossFade {
                    from: Box::new(url("a.png")),
                    to: Box::new(url("b.png")),
                    percentage: 0.25,
                },
            ),
            (1.0, url("b.png")),
        ] {
            let mut state = StyleResolverState::new(None, LengthConversionData::default());
            if let Some(pair) = &pair {
                let value = pair.at(fraction);
                kind.apply(&value.interpolable, value.non_interpolable.as_ref(), &mut state);
            }
            assert_eq!(state.style().background_images, vec![expected]);
        }
    }

    /// # Panics
    /// Panics if a `none` layer merges with an image or loses its place in the list.
    #[test]
    fn none_layers_only_match_none() {
        let kind = ImageListInterpolationType;
        let with_gap = images_to_value(&[url("a.png"), StyleImage::None]);
        let filled = images_to_value(&[url("a.png"), url("b.png")]);
        assert!(kind.maybe_merge_singles(with_gap.clone(), filled).is_none());

        let other_gap = images_to_value(&[url("c.png"), StyleImage::None]);
        let mut state = StyleResolverState::new(None, LengthConversionData::default());
        if let Some(pair) = kind.maybe_merge_singles(with_gap, other_gap) {
            let value = pair.at(1.0);
            kind.apply(&value.interpolable, value.non_interpolable.as_ref(), &mut state);
        }
        assert_eq!(state.style().background_images, vec![url("c.png"), StyleImage::None]);
    }

    /// # Panics
    /// Panics if lists of different lengths merge.
    #[test]
    fn lengths_must_match() {
        let kind = ImageListInterpolationType;
        let single = images_to_value(&[url("a.png")]);
        let double = images_to_value(&[url("a.png"), url("b.png")]);
        assert!(kind.maybe_merge_singles(single, double).is_none());
    }
}
