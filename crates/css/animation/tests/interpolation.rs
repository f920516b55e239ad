//! Interpolations driven by parsed keyframe values.

#![allow(
    clippy::tests_outside_test_module,
    clippy::let_underscore_must_use,
    reason = "Integration test crate"
)]

use css_animation::{InvalidatableInterpolation, Keyframe, PropertyKeyframes};
use css_parser::{ParserContext, StyleRuleBase, parse_single_value, parse_style_sheet};
use css_style_builder::{
    ClipRect, ComputedStyle, FilterOperation, Length, ShadowStyle, StyleColor, StyleResolverState, apply_property,
};
use css_syntax::{TokenRange, tokenize};
use css_values_units::{Color, LengthConversionData, PropertyId};

/// A keyframe holding `text`; unparsable text becomes a neutral keyframe.
fn keyframe(property: PropertyId, text: &str) -> Keyframe {
    let tokens = tokenize(text);
    parse_single_value(property, TokenRange::new(&tokens), &ParserContext::default())
        .map_or(Keyframe::Neutral, Keyframe::replace)
}

fn interpolation(property: PropertyId, from: &str, to: &str) -> InvalidatableInterpolation {
    InvalidatableInterpolation::new(property, keyframe(property, from), keyframe(property, to))
}

fn sample(interpolation: &mut InvalidatableInterpolation, fraction: f64) -> ComputedStyle {
    let mut state = StyleResolverState::new(None, LengthConversionData::default());
    interpolation.interpolate(fraction);
    interpolation.apply(&mut state);
    state.take_style()
}

/// The computed field `property` writes, printed for comparison.
fn field(style: &ComputedStyle, property: PropertyId) -> String {
    match property {
        PropertyId::Color => format!("{:?}", style.color),
        PropertyId::Width => format!("{:?}", style.width),
        PropertyId::BoxShadow => format!("{:?}", style.box_shadow),
        PropertyId::Filter => format!("{:?}", style.filter),
        PropertyId::Clip => format!("{:?}", style.clip),
        PropertyId::TextIndent => format!("{:?}", style.text_indent),
        PropertyId::TransformOrigin => format!("{:?}", style.transform_origin),
        _ => String::new(),
    }
}

/// The field `text` produces when applied without animating.
fn applied(property: PropertyId, text: &str) -> Option<String> {
    let tokens = tokenize(text);
    let value = parse_single_value(property, TokenRange::new(&tokens), &ParserContext::default())?;
    let mut state = StyleResolverState::new(None, LengthConversionData::default());
    apply_property(property, &value, &mut state);
    Some(field(state.style(), property))
}

fn sampled(interpolation: &mut InvalidatableInterpolation, fraction: f64) -> String {
    let property = interpolation.property();
    field(&sample(interpolation, fraction), property)
}

const PAIRS: [(PropertyId, &str, &str); 7] = [
    (PropertyId::Color, "rgb(10, 20, 30)", "rgb(200, 100, 50)"),
    (PropertyId::Width, "10px", "30px"),
    (PropertyId::BoxShadow, "2px 3px 4px rgb(1, 2, 3)", "6px 7px 8px rgb(9, 8, 7)"),
    (PropertyId::Filter, "blur(2px) sepia(0.5)", "blur(6px) sepia(1)"),
    (PropertyId::Clip, "rect(1px, 2px, 3px, 4px)", "rect(5px, 6px, 7px, 8px)"),
    (PropertyId::TextIndent, "5px each-line", "15px each-line"),
    (PropertyId::TransformOrigin, "10px 20px", "30px 40px"),
];

#[test]
fn blending_a_value_with_itself_is_constant() {
    let _ = env_logger::builder().is_test(true).try_init();
    for (property, text, _) in PAIRS {
        let expected = applied(property, text);
        assert!(expected.is_some(), "{text} should parse");
        let mut constant = interpolation(property, text, text);
        for fraction in [0.0, 0.25, 0.5, 0.75, 1.0] {
            assert_eq!(Some(sampled(&mut constant, fraction)), expected, "{text} at {fraction}");
        }
        assert!(constant.is_smooth(), "{text}");
    }
}

#[test]
fn endpoints_reproduce_the_keyframes() {
    let _ = env_logger::builder().is_test(true).try_init();
    for (property, from, to) in PAIRS {
        let mut blended = interpolation(property, from, to);
        assert_eq!(Some(sampled(&mut blended, 0.0)), applied(property, from), "{from}");
        assert_eq!(Some(sampled(&mut blended, 1.0)), applied(property, to), "{to}");
        assert!(blended.is_smooth(), "{from} -> {to}");
    }
}

#[test]
fn missing_filters_blend_from_their_identity() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut appearing = interpolation(PropertyId::Filter, "none", "blur(10px)");
    assert_eq!(sample(&mut appearing, 0.5).filter, vec![FilterOperation::Blur(5.0)]);
    assert!(appearing.is_smooth());

    let mut extended = interpolation(PropertyId::Filter, "blur(4px)", "blur(10px) grayscale(1)");
    assert_eq!(
        sample(&mut extended, 0.5).filter,
        vec![FilterOperation::Blur(7.0), FilterOperation::Grayscale(0.5)]
    );

    let mut fading = interpolation(PropertyId::Filter, "brightness(2)", "none");
    assert_eq!(sample(&mut fading, 0.5).filter, vec![FilterOperation::Brightness(1.5)]);
}

#[test]
fn deeply_nested_keyframe_values_are_rejected() {
    let _ = env_logger::builder().is_test(true).try_init();
    let levels = 100_000;
    let deep = format!("{}10px{}", "calc(".repeat(levels), ")".repeat(levels));
    let tokens = tokenize(&deep);
    let parsed = parse_single_value(PropertyId::Width, TokenRange::new(&tokens), &ParserContext::default());
    assert!(parsed.is_none());
}

#[test]
fn clip_keeps_shared_auto_edges() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut clip = interpolation(PropertyId::Clip, "rect(auto, 10px, auto, 5px)", "rect(0, 20px, 0, 10px)");
    let style = sample(&mut clip, 0.5);
    assert!(clip.is_smooth());
    assert_eq!(
        style.clip,
        Some(ClipRect {
            top: Length::Fixed(0.0),
            right: Length::Fixed(15.0),
            bottom: Length::Fixed(0.0),
            left: Length::Fixed(7.5),
        })
    );

    let mut autos = interpolation(
        PropertyId::Clip,
        "rect(auto, 10px, auto, 5px)",
        "rect(auto, 20px, auto, 10px)",
    );
    let shared = sample(&mut autos, 0.5);
    assert_eq!(shared.clip.map(|rect| rect.top), Some(Length::Auto));
}

#[test]
fn clip_auto_flips() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut clip = interpolation(PropertyId::Clip, "auto", "rect(0, 20px, 0, 10px)");
    assert_eq!(sample(&mut clip, 0.4).clip, None);
    assert!(!clip.is_smooth());
    assert!(sample(&mut clip, 0.6).clip.is_some());
}

#[test]
fn matching_filters_blend() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut blur = interpolation(PropertyId::Filter, "blur(4px)", "blur(10px)");
    assert_eq!(sample(&mut blur, 0.5).filter, vec![FilterOperation::Blur(7.0)]);
    assert_eq!(sample(&mut blur, 0.0).filter, vec![FilterOperation::Blur(4.0)]);
    assert_eq!(sample(&mut blur, 1.0).filter, vec![FilterOperation::Blur(10.0)]);
}

#[test]
fn mismatched_filters_flip_at_half() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut filter = interpolation(PropertyId::Filter, "blur(4px)", "grayscale(50%)");
    assert_eq!(sample(&mut filter, 0.49).filter, vec![FilterOperation::Blur(4.0)]);
    assert!(!filter.is_smooth());
    assert_eq!(sample(&mut filter, 0.5).filter, vec![FilterOperation::Grayscale(0.5)]);
}

#[test]
fn identical_keyframes_are_constant() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut width = interpolation(PropertyId::Width, "40px", "40px");
    for fraction in [0.0, 0.3, 0.7, 1.0] {
        assert_eq!(sample(&mut width, fraction).width, Length::Fixed(40.0));
    }
}

#[test]
fn endpoints_and_extrapolation() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut width = interpolation(PropertyId::Width, "10px", "20px");
    assert_eq!(sample(&mut width, 0.0).width, Length::Fixed(10.0));
    assert_eq!(sample(&mut width, 1.0).width, Length::Fixed(20.0));
    assert_eq!(sample(&mut width, 1.5).width, Length::Fixed(25.0));
    assert_eq!(sample(&mut width, -1.0).width, Length::Fixed(0.0));
}

#[test]
fn inset_mismatch_flips() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut shadow = interpolation(PropertyId::BoxShadow, "1px 1px red", "inset 5px 5px red");
    let start = sample(&mut shadow, 0.25);
    assert!(!shadow.is_smooth());
    assert_eq!(start.box_shadow.first().map(|first| first.style), Some(ShadowStyle::Normal));
    let end = sample(&mut shadow, 0.75);
    assert_eq!(end.box_shadow.first().map(|first| first.x), Some(5.0));
}

#[test]
fn current_color_blends_against_color() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut background = interpolation(PropertyId::BackgroundColor, "currentcolor", "rgb(255, 0, 0)");
    let mut state = StyleResolverState::new(None, LengthConversionData::default());
    state.style_mut().color = Color::from_rgb(0, 0, 255);
    background.interpolate(0.5);
    background.apply(&mut state);
    assert_eq!(
        state.style().style_color(PropertyId::BackgroundColor),
        Some(StyleColor::Color(Color::from_rgb(128, 0, 128)))
    );
    assert_eq!(
        sample(&mut background, 0.0).style_color(PropertyId::BackgroundColor),
        Some(StyleColor::CurrentColor)
    );
}

fn parent_with_padding(left: f32) -> ComputedStyle {
    let mut parent = ComputedStyle::default();
    parent.padding.left = Length::Fixed(left);
    parent
}

#[test]
fn inherit_tracks_parent_changes() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut padding = interpolation(PropertyId::PaddingLeft, "inherit", "20px");
    padding.interpolate(0.5);

    let narrow = parent_with_padding(10.0);
    let mut narrow_state = StyleResolverState::new(Some(&narrow), LengthConversionData::default());
    padding.apply(&mut narrow_state);
    assert_eq!(narrow_state.style().padding.left, Length::Fixed(15.0));

    let wide = parent_with_padding(30.0);
    let mut wide_state = StyleResolverState::new(Some(&wide), LengthConversionData::default());
    padding.apply(&mut wide_state);
    assert_eq!(wide_state.style().padding.left, Length::Fixed(25.0));
}

#[test]
fn samples_parsed_keyframes() {
    let _ = env_logger::builder().is_test(true).try_init();
    let sheet = parse_style_sheet(
        "@keyframes grow { from { width: 0px } 50% { width: 100px } to { width: 50px } }",
        &ParserContext::default(),
    );
    assert!(matches!(sheet.child_rules.first(), Some(StyleRuleBase::Keyframes(_))));
    let Some(StyleRuleBase::Keyframes(rule)) = sheet.child_rules.first() else {
        return;
    };
    let mut keyframes = PropertyKeyframes::from_rule(PropertyId::Width, rule);
    assert_eq!(keyframes.offsets(), &[0.0, 0.5, 1.0]);

    for (progress, expected) in [(0.25, 50.0), (0.5, 100.0), (0.75, 75.0)] {
        let mut state = StyleResolverState::new(None, LengthConversionData::default());
        keyframes.sample(progress, &mut state);
        assert_eq!(state.style().width, Length::Fixed(expected));
    }
}
