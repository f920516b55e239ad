//! Parsed values animated onto computed styles.

#![allow(
    clippy::tests_outside_test_module,
    clippy::let_underscore_must_use,
    reason = "Integration test crate"
)]

use css::CssParser;
use css::animation::{InvalidatableInterpolation, Keyframe};
use css::parser::parse_inline_style_declaration;
use css::style_builder::{ClipRect, ComputedStyle, FilterOperation, Length, StyleResolverState, resolve_style};
use css::values::{LengthConversionData, PropertyId};

fn keyframes(parser: &CssParser, property: PropertyId, from: &str, to: &str) -> Option<InvalidatableInterpolation> {
    let start = parser.parse_single_value(property, from)?;
    let end = parser.parse_single_value(property, to)?;
    Some(InvalidatableInterpolation::new(
        property,
        Keyframe::replace(start),
        Keyframe::replace(end),
    ))
}

fn sample_onto(interpolation: &mut InvalidatableInterpolation, base: &ComputedStyle, fraction: f64) -> ComputedStyle {
    let mut state = StyleResolverState::new(None, LengthConversionData::default());
    *state.style_mut() = base.clone();
    interpolation.interpolate(fraction);
    interpolation.apply(&mut state);
    state.take_style()
}

#[test]
fn clip_rects_blend_edge_by_edge() {
    let _ = env_logger::builder().is_test(true).try_init();
    let parser = CssParser::default();
    let mut clip = keyframes(&parser, PropertyId::Clip, "rect(auto, 10px, auto, 5px)", "rect(0, 20px, 0, 10px)");
    let style = clip
        .as_mut()
        .map(|rect| sample_onto(rect, &ComputedStyle::default(), 0.5));
    assert_eq!(
        style.and_then(|style| style.clip),
        Some(ClipRect {
            top: Length::Fixed(0.0),
            right: Length::Fixed(15.0),
            bottom: Length::Fixed(0.0),
            left: Length::Fixed(7.5),
        })
    );
}

#[test]
fn filters_blend_or_flip() {
    let _ = env_logger::builder().is_test(true).try_init();
    let parser = CssParser::default();
    let base = ComputedStyle::default();

    let mut blur = keyframes(&parser, PropertyId::Filter, "blur(4px)", "blur(10px)");
    let blended = blur.as_mut().map(|filter| sample_onto(filter, &base, 0.5).filter);
    assert_eq!(blended, Some(vec![FilterOperation::Blur(7.0)]));

    let mut mixed = keyframes(&parser, PropertyId::Filter, "blur(4px)", "grayscale(50%)");
    let before = mixed.as_mut().map(|filter| sample_onto(filter, &base, 0.4999).filter);
    let after = mixed.as_mut().map(|filter| sample_onto(filter, &base, 0.5).filter);
    assert_eq!(before, Some(vec![FilterOperation::Blur(4.0)]));
    assert_eq!(after, Some(vec![FilterOperation::Grayscale(0.5)]));
}

#[test]
fn animations_layer_over_resolved_styles() {
    let _ = env_logger::builder().is_test(true).try_init();
    let parser = CssParser::default();
    let declarations = parse_inline_style_declaration("font-size: 20px; width: 100px", parser.context());
    let base = resolve_style(&declarations, StyleResolverState::new(None, LengthConversionData::default()));

    let mut width = keyframes(&parser, PropertyId::Width, "inherit", "2em");
    let mut neutral = parser
        .parse_single_value(PropertyId::Width, "300px")
        .map(|end| InvalidatableInterpolation::new(PropertyId::Width, Keyframe::Neutral, Keyframe::replace(end)));
    let from_underlying = neutral.as_mut().map(|animation| sample_onto(animation, &base, 0.5).width);
    assert_eq!(from_underlying, Some(Length::Fixed(200.0)));

    let at_end = width.as_mut().map(|animation| sample_onto(animation, &base, 1.0).width);
    assert_eq!(at_end, Some(Length::Fixed(32.0)));
}
