//! The fast paths against the tokenizing property parser.

#![allow(
    clippy::tests_outside_test_module,
    clippy::let_underscore_must_use,
    reason = "Integration test crate"
)]

use css_parser::{ParserContext, maybe_parse_value, parse_single_value, parse_value};
use css_syntax::{ParserMode, TokenRange, tokenize};
use css_values_units::{CssValue, PropertyId};

fn general(property: PropertyId, text: &str, mode: ParserMode) -> Option<CssValue> {
    let tokens = tokenize(text);
    parse_single_value(property, TokenRange::new(&tokens), &ParserContext::new(mode))
}

#[test]
fn accepted_fast_path_values_match_the_general_parser() {
    let _ = env_logger::builder().is_test(true).try_init();
    let inputs = [
        (PropertyId::Width, "0"),
        (PropertyId::Width, "12.5px"),
        (PropertyId::Height, "40%"),
        (PropertyId::MarginTop, "-3px"),
        (PropertyId::PaddingRight, "2em"),
        (PropertyId::Color, "red"),
        (PropertyId::Color, "#0f0"),
        (PropertyId::Color, "#00ff0080"),
        (PropertyId::Color, "rgb(1,2,3)"),
        (PropertyId::Color, "rgba(0, 0, 0, 0.3)"),
        (PropertyId::BackgroundColor, "currentcolor"),
        (PropertyId::Display, "inline-block"),
        (PropertyId::Position, "absolute"),
    ];
    let mut accepted = 0;
    for (property, text) in inputs {
        let Some(fast) = maybe_parse_value(property, text, ParserMode::HtmlStandard) else {
            continue;
        };
        accepted += 1;
        assert_eq!(Some(fast), general(property, text, ParserMode::HtmlStandard), "{text}");
    }
    assert!(accepted > inputs.len() / 2);
}

#[test]
fn rejected_fast_path_values_are_left_to_the_general_parser() {
    let _ = env_logger::builder().is_test(true).try_init();
    for (property, text) in [
        (PropertyId::Width, "calc(1px + 2px)"),
        (PropertyId::Width, "-1px"),
        (PropertyId::Color, "rgb(1 2 3 / 50%)"),
        (PropertyId::Margin, "1px"),
    ] {
        assert!(maybe_parse_value(property, text, ParserMode::HtmlStandard).is_none(), "{text}");
    }
    assert!(general(PropertyId::Width, "calc(1px + 2px)", ParserMode::HtmlStandard).is_some());
    assert!(general(PropertyId::Width, "-1px", ParserMode::HtmlStandard).is_none());
}

#[test]
fn quirks_mode_accepts_unitless_lengths() {
    let _ = env_logger::builder().is_test(true).try_init();
    assert!(general(PropertyId::Width, "10", ParserMode::HtmlStandard).is_none());
    let quirky = general(PropertyId::Width, "10", ParserMode::HtmlQuirks);
    assert_eq!(quirky.map(|value| value.css_text()).as_deref(), Some("10px"));
}

#[test]
fn border_shorthand_fills_every_side() {
    let _ = env_logger::builder().is_test(true).try_init();
    let tokens = tokenize("2px solid red");
    let mut out = Vec::new();
    assert!(parse_value(
        PropertyId::Border,
        true,
        TokenRange::new(&tokens),
        &ParserContext::default(),
        &mut out
    ));
    assert!(out.iter().all(|property| property.is_important()));
    assert!(out.iter().all(|property| property.shorthand_id() == Some(PropertyId::Border)));
    assert!(out.iter().any(|property| property.id() == PropertyId::BorderLeftColor));
    assert!(out.iter().any(|property| property.id() == PropertyId::BorderTopWidth));
}

#[test]
fn var_references_are_kept_for_style_building() {
    let _ = env_logger::builder().is_test(true).try_init();
    let tokens = tokenize("var(--gap) 4px");
    let mut out = Vec::new();
    assert!(parse_value(
        PropertyId::Padding,
        false,
        TokenRange::new(&tokens),
        &ParserContext::default(),
        &mut out
    ));
    assert_eq!(out.len(), 4);
    assert!(out
        .iter()
        .all(|property| matches!(property.value(), CssValue::VariableReference(_))));
}
