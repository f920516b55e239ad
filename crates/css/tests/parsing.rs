//! Property values and stylesheets parsed through the facade.

#![allow(
    clippy::tests_outside_test_module,
    clippy::let_underscore_must_use,
    reason = "Integration test crate"
)]

use css::CssParser;
use css::parser::{MutableStylePropertySet, ParserContext, SetResult, StyleRuleBase};
use css::style_builder::{StyleImage, StyleResolverState, resolve_style};
use css::syntax::ParserMode;
use css::values::{Color, LengthConversionData, PropertyId};

fn fresh_set() -> MutableStylePropertySet {
    MutableStylePropertySet::new(ParserMode::HtmlStandard)
}

#[test]
fn sets_width_from_text() {
    let _ = env_logger::builder().is_test(true).try_init();
    let parser = CssParser::default();
    let mut declarations = fresh_set();
    let result = parser.parse_value(&mut declarations, PropertyId::Width, "10px", false);
    assert_eq!(
        result,
        SetResult {
            did_parse: true,
            did_change: true
        }
    );
    assert_eq!(declarations.get_property_text(PropertyId::Width), "10px");

    let again = parser.parse_value(&mut declarations, PropertyId::Width, "10px", false);
    assert!(again.did_parse && !again.did_change);
    let invalid = parser.parse_value(&mut declarations, PropertyId::Width, "10 pixels", false);
    assert_eq!(invalid, SetResult::default());
    assert_eq!(declarations.get_property_text(PropertyId::Width), "10px");
}

#[test]
fn important_declarations_resist_normal_ones() {
    let _ = env_logger::builder().is_test(true).try_init();
    let parser = CssParser::default();
    let mut declarations = fresh_set();
    let _ = parser.parse_value(&mut declarations, PropertyId::Color, "red", true);
    let result = parser.parse_value(&mut declarations, PropertyId::Color, "blue", false);
    assert!(result.did_parse && !result.did_change);
    assert!(declarations.property_is_important(PropertyId::Color));
}

#[test]
fn shorthands_expand_through_the_general_path() {
    let _ = env_logger::builder().is_test(true).try_init();
    let parser = CssParser::default();
    let mut declarations = fresh_set();
    let result = parser.parse_value(&mut declarations, PropertyId::Margin, "1px 2px", false);
    assert!(result.did_parse && result.did_change);
    assert_eq!(declarations.len(), 4);
    assert_eq!(declarations.get_property_text(PropertyId::MarginRight), "2px");
    assert_eq!(declarations.get_property_text(PropertyId::Margin), "1px 2px");
}

#[test]
fn fast_path_matches_general_path() {
    let _ = env_logger::builder().is_test(true).try_init();
    let fast = CssParser::default();
    let general = CssParser::new(ParserContext::default().without_fast_paths());
    for (property, text) in [
        (PropertyId::Width, "10px"),
        (PropertyId::Width, "50%"),
        (PropertyId::PaddingLeft, "0"),
        (PropertyId::Color, "#abc"),
        (PropertyId::Color, "rgba(0,0,0,0.1)"),
        (PropertyId::Color, "rgb(10, 20, 30)"),
        (PropertyId::BackgroundColor, "transparent"),
        (PropertyId::Display, "block"),
        (PropertyId::Opacity, "0.5"),
    ] {
        let quick = fast.parse_single_value(property, text);
        assert!(quick.is_some(), "{text} should parse");
        assert_eq!(quick, general.parse_single_value(property, text), "{text}");
    }
}

#[test]
fn serialized_values_reparse() {
    let _ = env_logger::builder().is_test(true).try_init();
    let parser = CssParser::default();
    for (property, text) in [
        (PropertyId::Width, "calc(10px + 2em)"),
        (PropertyId::Color, "rgba(0, 0, 0, 0.1)"),
        (PropertyId::BoxShadow, "inset 1px 2px 3px red"),
        (PropertyId::Filter, "blur(2px) grayscale(50%)"),
        (PropertyId::Clip, "rect(1px, 2px, 3px, 4px)"),
        (PropertyId::FontWeight, "bold"),
    ] {
        let parsed = parser.parse_single_value(property, text);
        let reparsed = parsed
            .as_ref()
            .and_then(|value| parser.parse_single_value(property, &value.css_text()));
        assert!(parsed.is_some(), "{text} should parse");
        assert_eq!(parsed, reparsed, "{text}");
    }
}

#[test]
fn alpha_survives_serialization() {
    let _ = env_logger::builder().is_test(true).try_init();
    let parser = CssParser::default();
    let color = CssParser::parse_color("rgba(0,0,0,0.1)");
    assert_eq!(color.map(Color::alpha), Some(26));
    let text = parser
        .parse_single_value(PropertyId::Color, "rgba(0,0,0,0.1)")
        .map(|value| value.css_text())
        .unwrap_or_default();
    assert_eq!(CssParser::parse_color(&text), color);
}

#[test]
fn calc_operators_need_whitespace() {
    let _ = env_logger::builder().is_test(true).try_init();
    let parser = CssParser::default();
    assert!(parser.parse_single_value(PropertyId::Width, "calc(1px + 2px)").is_some());
    for text in ["calc(1px+2px)", "calc(1px+ 2px)", "calc(1px +2px)"] {
        assert!(parser.parse_single_value(PropertyId::Width, text).is_none(), "{text}");
    }
}

#[test]
fn calc_nesting_is_capped() {
    let _ = env_logger::builder().is_test(true).try_init();
    let nested = |levels: usize| format!("{}1px{}", "calc(".repeat(levels), ")".repeat(levels));
    let parser = CssParser::default();
    assert!(parser.parse_single_value(PropertyId::Width, &nested(100)).is_some());
    assert!(parser.parse_single_value(PropertyId::Width, &nested(101)).is_none());
    assert!(parser.parse_single_value(PropertyId::Width, &nested(100_000)).is_none());

    let mut declarations = fresh_set();
    let deep = parser.parse_value(&mut declarations, PropertyId::Width, &nested(100_000), false);
    assert_eq!(deep, SetResult::default());
}

#[test]
fn strict_style_sheets_reject_dropped_rules() {
    let _ = env_logger::builder().is_test(true).try_init();
    let parser = CssParser::default();
    let sheet = parser.parse_style_sheet_strict("p { color: red } @keyframes fade { to { opacity: 0 } }");
    assert!(sheet.is_ok_and(|contents| {
        contents.rule_count() == 2 && matches!(contents.child_rules.get(1), Some(StyleRuleBase::Keyframes(_)))
    }));

    let text = "p { color: red }\n@namespace late url(x);";
    assert_eq!(parser.parse_style_sheet(text).rule_count(), 1);
    let strict = parser.parse_style_sheet_strict(text);
    assert!(strict.is_err_and(|error| error.to_string().contains("line 2")));
}

#[test]
fn none_is_a_background_layer() {
    let _ = env_logger::builder().is_test(true).try_init();
    let parser = CssParser::default();
    let mut declarations = fresh_set();
    let result = parser.parse_value(&mut declarations, PropertyId::BackgroundImage, "url(a.png), none", false);
    assert!(result.did_parse);
    assert_eq!(
        declarations.get_property_text(PropertyId::BackgroundImage),
        "url(\"a.png\"), none"
    );

    let style = resolve_style(&declarations, StyleResolverState::new(None, LengthConversionData::default()));
    assert_eq!(
        style.background_images,
        vec![StyleImage::Url("a.png".to_owned()), StyleImage::None]
    );
}
