//! CSS Syntax Module Level 3 — Property value and stylesheet parsing.
//! Spec: <https://www.w3.org/TR/css-syntax-3/#parsing>
//!
//! Declarations are parsed into [`CssProperty`] values either through a character-level
//! fast path or through the token-based property parser. Both produce the same values for
//! the inputs the fast paths accept.

#![forbid(unsafe_code)]

pub mod consumers;
pub mod context;
pub mod fast_paths;
pub mod grid;
pub mod longhands;
pub mod parser_impl;
pub mod property_parser;
pub mod property_set;
pub mod property_tables;
pub mod shorthands;
pub mod style_sheet;
pub mod variable_parser;

pub use context::ParserContext;
pub use fast_paths::maybe_parse_value;
pub use grid::GRID_MAX_TRACKS;
pub use parser_impl::{
    AllowedRulesType, InvalidRule, MAX_GROUPING_RULE_DEPTH, parse_inline_style_declaration, parse_rule,
    parse_style_sheet, parse_style_sheet_reporting,
};
pub use property_parser::{parse_single_value, parse_value};
pub use property_set::{CssProperty, MutableStylePropertySet, SetResult, StylePropertyMetadata};
pub use style_sheet::{
    FontFaceRule, ImportRule, KeyframesRule, MediaRule, NamespaceRule, StyleRule,
    StyleRuleBase, StyleRuleKeyframe, StyleSheetContents,
};
pub use variable_parser::{contains_valid_variable_references, is_valid_variable_name};
