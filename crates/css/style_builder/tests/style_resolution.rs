//! Computed styles built from inline declaration blocks.

#![allow(
    clippy::tests_outside_test_module,
    clippy::let_underscore_must_use,
    reason = "Integration test crate"
)]

use css_parser::{ParserContext, parse_inline_style_declaration};
use css_style_builder::{
    ComputedStyle, Length, LineHeight, StyleColor, StyleResolverState, TextLinkColors, resolve_style,
};
use css_values_units::{Color, LengthConversionData, PropertyId, ValueId};
use css_variables::PropertyRegistry;

fn build(text: &str, state: StyleResolverState<'_>) -> ComputedStyle {
    let declarations = parse_inline_style_declaration(text, &ParserContext::default());
    resolve_style(&declarations, state)
}

fn root() -> StyleResolverState<'static> {
    StyleResolverState::new(None, LengthConversionData::default())
}

#[test]
fn substitutes_variables_into_longhands_and_shorthands() {
    let _ = env_logger::builder().is_test(true).try_init();
    let style = build(
        "--pad: 10px; --b: var(--pad); padding-top: var(--b); margin: var(--pad) auto; width: var(--missing, 3em)",
        root(),
    );
    assert_eq!(style.padding.top, Length::Fixed(10.0));
    assert_eq!(style.margin.top, Length::Fixed(10.0));
    assert_eq!(style.margin.right, Length::Auto);
    assert_eq!(style.width, Length::Fixed(48.0));
}

#[test]
fn cyclic_variables_make_references_invalid() {
    let _ = env_logger::builder().is_test(true).try_init();
    let style = build(
        "--x: var(--y); --y: var(--x); height: var(--x); min-height: var(--y, 4px)",
        root(),
    );
    assert!(style.custom_properties.is_empty());
    assert_eq!(style.height, Length::Auto);
    assert_eq!(style.min_height, Length::Fixed(4.0));
}

#[test]
fn custom_properties_inherit() {
    let _ = env_logger::builder().is_test(true).try_init();
    let parent = build("--accent: rgb(255, 0, 0)", root());
    let child = build(
        "border-top-color: var(--accent)",
        StyleResolverState::new(Some(&parent), LengthConversionData::default()),
    );
    assert_eq!(child.border_colors.top, StyleColor::Color(Color::from_rgb(255, 0, 0)));
}

#[test]
fn registered_lengths_compute_to_pixels() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut registry = PropertyRegistry::new();
    assert!(registry.register_property("--gap", "<length>", false, Some("0px")).is_ok());
    let state = root().with_registry(&registry);
    let style = build("--gap: 2em; font-size: 20px; margin-left: var(--gap)", state);
    assert_eq!(
        style
            .custom_properties
            .tokens("--gap")
            .map(|data| data.serialize())
            .as_deref(),
        Some("40px")
    );
    assert_eq!(style.margin.left, Length::Fixed(40.0));
}

#[test]
fn css_wide_keywords_follow_inheritance() {
    let _ = env_logger::builder().is_test(true).try_init();
    let parent = build("color: blue; line-height: 2; width: 50px; font-weight: bold", root());
    let child = build(
        "color: unset; line-height: initial; width: inherit; font-weight: unset",
        StyleResolverState::new(Some(&parent), LengthConversionData::default()),
    );
    assert_eq!(child.color, Color::from_rgb(0, 0, 255));
    assert_eq!(child.line_height, LineHeight::Normal);
    assert_eq!(child.width, Length::Fixed(50.0));
    assert_eq!(child.font_weight, 700);
}

#[test]
fn link_colors_depend_on_visited_state() {
    let _ = env_logger::builder().is_test(true).try_init();
    let colors = TextLinkColors::default();
    let unvisited = build("color: -webkit-link", root().with_text_link_colors(colors));
    let visited = build("color: -webkit-link", root().with_link_visited(true));
    assert_eq!(unvisited.color, colors.link);
    assert_eq!(visited.color, colors.visited_link);
}

#[test]
fn keywords_and_em_lengths() {
    let _ = env_logger::builder().is_test(true).try_init();
    let parent = build("font-size: 10px", root());
    let child = build(
        "display: flex; font-size: 2em; padding-left: 1em; border-top-width: thick",
        StyleResolverState::new(Some(&parent), LengthConversionData::default()),
    );
    assert_eq!(child.keyword(PropertyId::Display), Some(ValueId::Flex));
    assert!((child.font_size - 20.0).abs() < f32::EPSILON);
    assert_eq!(child.padding.left, Length::Fixed(20.0));
    assert!((child.border_widths.top - 5.0).abs() < f32::EPSILON);
}
