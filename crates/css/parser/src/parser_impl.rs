//! CSS Syntax Module Level 3 — §5 Parsing stylesheets and declaration lists.
//! Spec: <https://www.w3.org/TR/css-syntax-3/#parsing>
//!
//! Rule structure is walked with `cssparser`; declaration values are flattened into
//! [`ParserToken`]s and handed to the property parser.

use crate::context::ParserContext;
use crate::property_parser::parse_value;
use crate::property_set::{CssProperty, MutableStylePropertySet};
use crate::style_sheet::{
    FontFaceRule, ImportRule, KeyframesRule, MediaRule, NamespaceRule, StyleRule,
    StyleRuleBase, StyleRuleKeyframe, StyleSheetContents,
};
use crate::variable_parser::{is_valid_variable_name, parse_declaration_value};
use css_syntax::{ParserToken, TokenRange, collect_tokens};
use css_values_units::{CssValue, PropertyId};
use cssparser::AtRuleParser as CssAtRuleParser;
use cssparser::BasicParseErrorKind;
use cssparser::CowRcStr;
use cssparser::DeclarationParser as CssDeclarationParser;
use cssparser::ParseError;
use cssparser::Parser;
use cssparser::ParserInput;
use cssparser::ParserState;
use cssparser::QualifiedRuleParser as CssQualifiedRuleParser;
use cssparser::RuleBodyItemParser as CssRuleBodyItemParser;
use cssparser::RuleBodyParser as CssRuleBodyParser;
use cssparser::StyleSheetParser;
use cssparser::parse_one_rule;
use cssparser::Token;
use log::{debug, trace};

/// Deepest `@media` nesting kept; a grouping rule nested further is dropped.
pub const MAX_GROUPING_RULE_DEPTH: usize = 32;

/// Which rules may still appear at the current point of a rule list.
///
/// The order matters: `@charset` must come first, then `@import`, then `@namespace`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum AllowedRulesType {
    AllowCharsetRules,
    AllowImportRules,
    AllowNamespaceRules,
    RegularRules,
    KeyframeRules,
    NoRules,
}

/// A top-level or nested rule before it is filed into the stylesheet.
enum ParsedRule {
    Charset(String),
    Import(ImportRule),
    Namespace(NamespaceRule),
    Child(StyleRuleBase),
}

enum AtRulePrelude {
    Charset(String),
    Import(ImportRule),
    Namespace(NamespaceRule),
    Media(String),
    FontFace,
    Keyframes(String),
}

/// Remove a trailing `! important` from `tokens`, reporting whether it was there.
fn strip_important(tokens: &mut Vec<ParserToken>) -> bool {
    while tokens.last().is_some_and(ParserToken::is_whitespace) {
        tokens.pop();
    }
    if !tokens
        .last()
        .is_some_and(|token| token.is_ident_ignoring_case("important"))
    {
        return false;
    }
    let before_ident = tokens.len() - 1;
    let Some(bang) = tokens
        .get(..before_ident)
        .and_then(|head| head.iter().rposition(|token| !token.is_whitespace()))
    else {
        return false;
    };
    if !tokens.get(bang).is_some_and(|token| token.is_delimiter('!')) {
        return false;
    }
    tokens.truncate(bang);
    while tokens.last().is_some_and(ParserToken::is_whitespace) {
        tokens.pop();
    }
    true
}

/// Parse one `name: value` declaration into the properties it sets.
fn parse_declaration(
    name: &str,
    input: &mut Parser<'_, '_>,
    context: &ParserContext,
    in_keyframe: bool,
) -> Option<Vec<CssProperty>> {
    let mut tokens = Vec::new();
    collect_tokens(input, &mut tokens);
    let important = strip_important(&mut tokens);
    if important && in_keyframe {
        debug!(target: "css::parser", "ignoring !important declaration {name} in keyframe");
        return None;
    }
    let range = TokenRange::new(&tokens);
    if is_valid_variable_name(name) {
        let declaration = parse_declaration_value(name, range)?;
        return Some(vec![CssProperty::new(
            PropertyId::Variable,
            CssValue::CustomPropertyDeclaration(declaration),
            important,
        )]);
    }
    let Some(property) = PropertyId::from_name(name) else {
        debug!(target: "css::parser", "dropping unknown property {name}");
        return None;
    };
    let mut properties = Vec::new();
    parse_value(property, important, range, context, &mut properties).then_some(properties)
}

/// Declarations of a style rule, a keyframe or a `style` attribute.
struct DeclarationListParser<'context> {
    context: &'context ParserContext,
    in_keyframe: bool,
}

impl CssDeclarationParser<'_> for DeclarationListParser<'_> {
    type Declaration = Vec<CssProperty>;
    type Error = ();

    fn parse_value<'input>(
        &mut self,
        name: CowRcStr<'input>,
        input: &mut Parser<'input, '_>,
        _decl_start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'input, Self::Error>> {
        parse_declaration(&name, input, self.context, self.in_keyframe)
            .ok_or_else(|| input.new_custom_error(()))
    }
}

impl CssAtRuleParser<'_> for DeclarationListParser<'_> {
    type Prelude = ();
    type AtRule = Vec<CssProperty>;
    type Error = ();
}

impl CssQualifiedRuleParser<'_> for DeclarationListParser<'_> {
    type Prelude = ();
    type QualifiedRule = Vec<CssProperty>;
    type Error = ();
}

impl CssRuleBodyItemParser<'_, Vec<CssProperty>, ()> for DeclarationListParser<'_> {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}

fn parse_declaration_block(
    block: &mut Parser<'_, '_>,
    context: &ParserContext,
    in_keyframe: bool,
) -> MutableStylePropertySet {
    let mut properties = MutableStylePropertySet::new(context.mode());
    let mut body = DeclarationListParser {
        context,
        in_keyframe,
    };
    for declaration in CssRuleBodyParser::new(block, &mut body).flatten() {
        properties.add_parsed_properties(declaration);
    }
    properties
}

/// `@font-face` descriptors, kept as raw text.
struct FontFaceDescriptorParser;

impl CssDeclarationParser<'_> for FontFaceDescriptorParser {
    type Declaration = (String, String);
    type Error = ();

    fn parse_value<'input>(
        &mut self,
        name: CowRcStr<'input>,
        input: &mut Parser<'input, '_>,
        _decl_start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'input, Self::Error>> {
        let start = input.position();
        while input.next_including_whitespace_and_comments().is_ok() {}
        let value = input.slice_from(start).trim().to_owned();
        Ok((name.to_ascii_lowercase(), value))
    }
}

impl CssAtRuleParser<'_> for FontFaceDescriptorParser {
    type Prelude = ();
    type AtRule = (String, String);
    type Error = ();
}

impl CssQualifiedRuleParser<'_> for FontFaceDescriptorParser {
    type Prelude = ();
    type QualifiedRule = (String, String);
    type Error = ();
}

impl CssRuleBodyItemParser<'_, (String, String), ()> for FontFaceDescriptorParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}

/// The keyframes inside an `@keyframes` block.
struct KeyframeListParser<'context> {
    context: &'context ParserContext,
}

impl CssAtRuleParser<'_> for KeyframeListParser<'_> {
    type Prelude = ();
    type AtRule = StyleRuleKeyframe;
    type Error = ();
}

impl CssQualifiedRuleParser<'_> for KeyframeListParser<'_> {
    type Prelude = Vec<f64>;
    type QualifiedRule = StyleRuleKeyframe;
    type Error = ();

    /// `[ from | to | <percentage [0,100]> ]#`, stored as fractions.
    fn parse_prelude<'input>(
        &mut self,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        let mut keys = Vec::new();
        loop {
            let key = match input.next()?.clone() {
                Token::Ident(name) if name.eq_ignore_ascii_case("from") => 0.0,
                Token::Ident(name) if name.eq_ignore_ascii_case("to") => 1.0,
                Token::Percentage { unit_value, .. } if (0.0..=1.0).contains(&unit_value) => {
                    f64::from(unit_value)
                }
                _ => return Err(input.new_custom_error(())),
            };
            keys.push(key);
            if input.is_exhausted() {
                return Ok(keys);
            }
            input.expect_comma()?;
        }
    }

    fn parse_block<'input>(
        &mut self,
        prelude: Self::Prelude,
        _state: &ParserState,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::QualifiedRule, ParseError<'input, Self::Error>> {
        Ok(StyleRuleKeyframe {
            keys: prelude,
            properties: parse_declaration_block(input, self.context, true),
        })
    }
}

/// A stylesheet body or the body of a grouping rule.
struct RuleListParser<'context> {
    context: &'context ParserContext,
    allowed_rules: AllowedRulesType,
    /// Grouping rules enclosing this rule list.
    depth: usize,
}

impl RuleListParser<'_> {
    /// Advance the allowed-rules state past a rule that was accepted.
    fn rule_accepted(&mut self, rule: &ParsedRule) {
        if self.allowed_rules > AllowedRulesType::RegularRules {
            return;
        }
        self.allowed_rules = match rule {
            ParsedRule::Charset(_) | ParsedRule::Import(_) => AllowedRulesType::AllowImportRules,
            ParsedRule::Namespace(_) => AllowedRulesType::AllowNamespaceRules,
            ParsedRule::Child(_) => AllowedRulesType::RegularRules,
        };
    }

    fn rejected<'input>(input: &Parser<'input, '_>, name: &str) -> ParseError<'input, ()> {
        debug!(target: "css::parser", "dropping @{name} rule");
        input.new_custom_error(())
    }
}

impl CssAtRuleParser<'_> for RuleListParser<'_> {
    type Prelude = AtRulePrelude;
    type AtRule = ParsedRule;
    type Error = ();

    fn parse_prelude<'input>(
        &mut self,
        name: CowRcStr<'input>,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        let lowered = name.to_ascii_lowercase();
        match lowered.as_str() {
            "charset" if self.allowed_rules == AllowedRulesType::AllowCharsetRules => {
                let charset = input.expect_string()?.to_string();
                input.expect_exhausted()?;
                Ok(AtRulePrelude::Charset(charset))
            }
            "import" if self.allowed_rules <= AllowedRulesType::AllowImportRules => {
                let href = input.expect_url_or_string()?.to_string();
                let start = input.position();
                while input.next().is_ok() {}
                let media = input.slice_from(start).trim().to_owned();
                Ok(AtRulePrelude::Import(ImportRule { href, media }))
            }
            "namespace" if self.allowed_rules <= AllowedRulesType::AllowNamespaceRules => {
                let prefix = input
                    .try_parse(|prefix_input| prefix_input.expect_ident_cloned())
                    .ok()
                    .map(|prefix| prefix.to_string());
                let uri = input.expect_url_or_string()?.to_string();
                input.expect_exhausted()?;
                Ok(AtRulePrelude::Namespace(NamespaceRule { prefix, uri }))
            }
            "media" if self.allowed_rules <= AllowedRulesType::RegularRules && self.depth < MAX_GROUPING_RULE_DEPTH => {
                let start = input.position();
                while input.next().is_ok() {}
                Ok(AtRulePrelude::Media(input.slice_from(start).trim().to_owned()))
            }
            "font-face" if self.allowed_rules <= AllowedRulesType::RegularRules => {
                input.expect_exhausted()?;
                Ok(AtRulePrelude::FontFace)
            }
            "keyframes" | "-webkit-keyframes" if self.allowed_rules <= AllowedRulesType::RegularRules => {
                let keyframes_name = match input.next()?.clone() {
                    Token::Ident(ident) => ident.to_string(),
                    Token::QuotedString(string) => string.to_string(),
                    _ => return Err(Self::rejected(input, &lowered)),
                };
                input.expect_exhausted()?;
                Ok(AtRulePrelude::Keyframes(keyframes_name))
            }
            _ => Err(Self::rejected(input, &lowered)),
        }
    }

    fn parse_block<'input>(
        &mut self,
        prelude: Self::Prelude,
        _state: &ParserState,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::AtRule, ParseError<'input, Self::Error>> {
        let rule = match prelude {
            AtRulePrelude::Media(media) => {
                let mut nested = RuleListParser {
                    context: self.context,
                    allowed_rules: AllowedRulesType::RegularRules,
                    depth: self.depth + 1,
                };
                let child_rules = StyleSheetParser::new(input, &mut nested)
                    .flatten()
                    .filter_map(|rule| match rule {
                        ParsedRule::Child(child) => Some(child),
                        ParsedRule::Charset(_) | ParsedRule::Import(_) | ParsedRule::Namespace(_) => {
                            None
                        }
                    })
                    .collect();
                StyleRuleBase::Media(MediaRule { media, child_rules })
            }
            AtRulePrelude::FontFace => {
                let mut descriptors = FontFaceDescriptorParser;
                let mut rule = FontFaceRule::default();
                for descriptor in CssRuleBodyParser::new(input, &mut descriptors).flatten() {
                    rule.descriptors.push(descriptor);
                }
                StyleRuleBase::FontFace(rule)
            }
            AtRulePrelude::Keyframes(name) => {
                let mut keyframe_list = KeyframeListParser {
                    context: self.context,
                };
                let keyframes = StyleSheetParser::new(input, &mut keyframe_list)
                    .flatten()
                    .collect();
                StyleRuleBase::Keyframes(KeyframesRule { name, keyframes })
            }
            AtRulePrelude::Charset(_) | AtRulePrelude::Import(_) | AtRulePrelude::Namespace(_) => {
                return Err(input.new_error(BasicParseErrorKind::AtRuleBodyInvalid));
            }
        };
        let parsed = ParsedRule::Child(rule);
        self.rule_accepted(&parsed);
        Ok(parsed)
    }

    fn rule_without_block(
        &mut self,
        prelude: Self::Prelude,
        _state: &ParserState,
    ) -> Result<Self::AtRule, Self::Error> {
        let parsed = match prelude {
            AtRulePrelude::Charset(charset) => ParsedRule::Charset(charset),
            AtRulePrelude::Import(import) => ParsedRule::Import(import),
            AtRulePrelude::Namespace(namespace) => ParsedRule::Namespace(namespace),
            AtRulePrelude::Media(_) | AtRulePrelude::FontFace | AtRulePrelude::Keyframes(_) => {
                return Err(());
            }
        };
        self.rule_accepted(&parsed);
        Ok(parsed)
    }
}

impl CssQualifiedRuleParser<'_> for RuleListParser<'_> {
    type Prelude = String;
    type QualifiedRule = ParsedRule;
    type Error = ();

    fn parse_prelude<'input>(
        &mut self,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        let start = input.state();
        while input.next_including_whitespace_and_comments().is_ok() {}
        let selector_text = input.slice_from(start.position()).trim().to_owned();
        if selector_text.is_empty() {
            return Err(input.new_error(BasicParseErrorKind::QualifiedRuleInvalid));
        }
        Ok(selector_text)
    }

    fn parse_block<'input>(
        &mut self,
        prelude: Self::Prelude,
        _state: &ParserState,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::QualifiedRule, ParseError<'input, Self::Error>> {
        let parsed = ParsedRule::Child(StyleRuleBase::Style(StyleRule {
            selector_text: prelude,
            properties: parse_declaration_block(input, self.context, false),
        }));
        self.rule_accepted(&parsed);
        Ok(parsed)
    }
}

/// A top-level rule dropped by the parser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidRule {
    /// 1-based line of the rule's start.
    pub line: u32,
    /// 1-based column of the rule's start.
    pub column: u32,
    pub text: String,
}

/// Parse a complete stylesheet.
pub fn parse_style_sheet(text: &str, context: &ParserContext) -> StyleSheetContents {
    parse_style_sheet_reporting(text, context).0
}

/// Parse a complete stylesheet, also returning the top-level rules that were dropped.
pub fn parse_style_sheet_reporting(text: &str, context: &ParserContext) -> (StyleSheetContents, Vec<InvalidRule>) {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let mut top = RuleListParser {
        context,
        allowed_rules: AllowedRulesType::AllowCharsetRules,
        depth: 0,
    };
    let mut sheet = StyleSheetContents::new(context.mode());
    let mut invalid = Vec::new();
    for rule in StyleSheetParser::new(&mut parser, &mut top) {
        match rule {
            Ok(ParsedRule::Charset(charset)) => sheet.charset = Some(charset),
            Ok(ParsedRule::Import(import)) => sheet.import_rules.push(import),
            Ok(ParsedRule::Namespace(namespace)) => sheet.namespace_rules.push(namespace),
            Ok(ParsedRule::Child(child)) => sheet.child_rules.push(child),
            Err((error, slice)) => {
                trace!(target: "css::parser", "invalid rule at {}:{}", error.location.line + 1, error.location.column);
                invalid.push(InvalidRule {
                    line: error.location.line + 1,
                    column: error.location.column,
                    text: slice.trim().to_owned(),
                });
            }
        }
    }
    debug!(
        target: "css::parser",
        "parsed stylesheet with {} rules, dropped {}",
        sheet.rule_count(),
        invalid.len()
    );
    (sheet, invalid)
}

/// Parse a single rule into `sheet`, as `insertRule` does.
///
/// The rules already in `sheet` decide which rule kinds are still legal; `@charset` never is.
/// Returns `false` when the text is not exactly one acceptable rule.
pub fn parse_rule(text: &str, context: &ParserContext, sheet: &mut StyleSheetContents) -> bool {
    let allowed_rules = match (sheet.child_rules.is_empty(), sheet.namespace_rules.is_empty()) {
        (false, _) => AllowedRulesType::RegularRules,
        (true, false) => AllowedRulesType::AllowNamespaceRules,
        (true, true) => AllowedRulesType::AllowImportRules,
    };
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let mut top = RuleListParser {
        context,
        allowed_rules,
        depth: 0,
    };
    match parse_one_rule(&mut parser, &mut top) {
        Ok(ParsedRule::Import(import)) => sheet.import_rules.push(import),
        Ok(ParsedRule::Namespace(namespace)) => sheet.namespace_rules.push(namespace),
        Ok(ParsedRule::Child(child)) => sheet.child_rules.push(child),
        Ok(ParsedRule::Charset(_)) | Err(_) => {
            trace!(target: "css::parser", "rejected inserted rule {text:?}");
            return false;
        }
    }
    true
}

/// Parse the contents of a `style` attribute.
pub fn parse_inline_style_declaration(text: &str, context: &ParserContext) -> MutableStylePropertySet {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    parse_declaration_block(&mut parser, context, false)
}
