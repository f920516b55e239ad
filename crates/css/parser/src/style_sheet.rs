//! Parsed stylesheet contents and the rule types it holds.

use crate::property_set::MutableStylePropertySet;
use css_syntax::{ParserMode, serialize_string, serialize_url};
use css_values_units::format_number;
use smallvec::SmallVec;

/// A style rule with its selector kept as trimmed source text.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleRule {
    pub selector_text: String,
    pub properties: MutableStylePropertySet,
}

impl StyleRule {
    pub fn css_text(&self) -> String {
        let declarations = self.properties.as_text();
        if declarations.is_empty() {
            return format!("{} {{ }}", self.selector_text);
        }
        format!("{} {{ {declarations} }}", self.selector_text)
    }
}

/// `@media <condition> { ... }`. The condition is not evaluated here.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaRule {
    pub media: String,
    pub child_rules: Vec<StyleRuleBase>,
}

/// `@font-face { ... }` with its descriptors kept as raw name/value pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontFaceRule {
    pub descriptors: SmallVec<(String, String), 4>,
}

impl FontFaceRule {
    pub fn descriptor(&self, name: &str) -> Option<&str> {
        self.descriptors
            .iter()
            .find(|(descriptor, _)| descriptor.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// One keyframe of an `@keyframes` rule. Offsets are fractions in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleRuleKeyframe {
    pub keys: Vec<f64>,
    pub properties: MutableStylePropertySet,
}

impl StyleRuleKeyframe {
    /// Keys as written back out, e.g. `0%, 50%`.
    pub fn key_text(&self) -> String {
        self.keys
            .iter()
            .map(|key| format!("{}%", format_number(key * 100.0)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// `@keyframes <name> { ... }`.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyframesRule {
    pub name: String,
    pub keyframes: Vec<StyleRuleKeyframe>,
}

impl KeyframesRule {
    /// The last keyframe listing `key`, which wins over earlier ones.
    pub fn find_keyframe(&self, key: f64) -> Option<&StyleRuleKeyframe> {
        self.keyframes
            .iter()
            .rev()
            .find(|keyframe| keyframe.keys.iter().any(|candidate| (candidate - key).abs() < f64::EPSILON))
    }
}

/// `@import <url> <media>?;`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportRule {
    pub href: String,
    pub media: String,
}

impl ImportRule {
    pub fn css_text(&self) -> String {
        if self.media.is_empty() {
            return format!("@import {};", serialize_url(&self.href));
        }
        format!("@import {} {};", serialize_url(&self.href), self.media)
    }
}

/// `@namespace <prefix>? <url>;`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamespaceRule {
    pub prefix: Option<String>,
    pub uri: String,
}

/// Rules that may appear in the body of a stylesheet or a grouping rule.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleRuleBase {
    Style(StyleRule),
    Media(MediaRule),
    FontFace(FontFaceRule),
    Keyframes(KeyframesRule),
}

impl StyleRuleBase {
    pub const fn as_style_rule(&self) -> Option<&StyleRule> {
        match self {
            Self::Style(rule) => Some(rule),
            _ => None,
        }
    }
}

/// Everything parsed out of one stylesheet, in source order per rule kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleSheetContents {
    pub mode: ParserMode,
    pub charset: Option<String>,
    pub import_rules: Vec<ImportRule>,
    pub namespace_rules: Vec<NamespaceRule>,
    pub child_rules: Vec<StyleRuleBase>,
}

impl StyleSheetContents {
    pub fn new(mode: ParserMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Number of rules, counting `@charset`, imports and namespaces.
    pub fn rule_count(&self) -> usize {
        usize::from(self.charset.is_some())
            + self.import_rules.len()
            + self.namespace_rules.len()
            + self.child_rules.len()
    }

    /// Top-level style rules, skipping grouping and at-rules.
    pub fn style_rules(&self) -> impl Iterator<Item = &StyleRule> {
        self.child_rules.iter().filter_map(StyleRuleBase::as_style_rule)
    }

    pub fn charset_text(&self) -> Option<String> {
        self.charset
            .as_deref()
            .map(|charset| format!("@charset {};", serialize_string(charset)))
    }
}
