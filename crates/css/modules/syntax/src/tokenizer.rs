//! CSS Syntax Module Level 3 — §4 Tokenization, adapted from `cssparser`.
//! Spec: <https://www.w3.org/TR/css-syntax-3/#tokenizer-algorithms>
//!
//! `cssparser` hands out nested blocks through closures; value parsing here needs a flat,
//! indexable token stream (the `+`/`-` whitespace rule inside `calc()` looks one token
//! behind), so blocks are flattened with explicit closing tokens.

use crate::token::{NumericSign, NumericToken, NumericValueType, ParserToken};
use cssparser::{ParseError, Parser, ParserInput, Token};

/// Deepest block nesting the tokenizer descends into.
///
/// A block opened past this depth is skipped and its contents are replaced by a single
/// bad-string token, so any value containing it fails to parse.
pub const MAX_BLOCK_NESTING: usize = 256;

/// Tokenize a complete CSS source string.
pub fn tokenize(text: &str) -> Vec<ParserToken> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let mut tokens = Vec::new();
    collect_tokens(&mut parser, &mut tokens);
    tokens
}

/// Drain every remaining token of `parser` (including nested blocks) into `out`.
pub fn collect_tokens(parser: &mut Parser<'_, '_>, out: &mut Vec<ParserToken>) {
    collect_nested(parser, out, 0);
}

fn collect_nested(parser: &mut Parser<'_, '_>, out: &mut Vec<ParserToken>, depth: usize) {
    loop {
        let start = parser.position();
        let token = match parser.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        let source = parser.slice_from(start);
        let Some(converted) = convert_token(&token, source) else {
            continue;
        };
        let closing = converted.closing_token();
        let merges_whitespace =
            converted.is_whitespace() && out.last().is_some_and(ParserToken::is_whitespace);
        if !merges_whitespace {
            out.push(converted);
        }
        let Some(closing) = closing else {
            continue;
        };
        if depth >= MAX_BLOCK_NESTING {
            // The next call to `next_*` skips the unentered block without recursing.
            log::debug!(target: "css::syntax", "block nesting deeper than {MAX_BLOCK_NESTING}");
            out.push(ParserToken::BadString);
        } else {
            let nested: Result<(), ParseError<'_, ()>> = parser.parse_nested_block(|block| {
                collect_nested(block, out, depth + 1);
                Ok(())
            });
            if nested.is_err() {
                log::trace!(target: "css::syntax", "unterminated block while tokenizing");
            }
        }
        out.push(closing);
    }
}

fn convert_token(token: &Token<'_>, source: &str) -> Option<ParserToken> {
    let converted = match token {
        Token::Ident(name) => ParserToken::Ident(name.to_string()),
        Token::AtKeyword(name) => ParserToken::AtKeyword(name.to_string()),
        Token::Hash(value) => ParserToken::Hash {
            value: value.to_string(),
            is_identifier: false,
        },
        Token::IDHash(value) => ParserToken::Hash {
            value: value.to_string(),
            is_identifier: true,
        },
        Token::QuotedString(value) => ParserToken::String(value.to_string()),
        Token::UnquotedUrl(value) => ParserToken::Url(value.to_string()),
        Token::Delim(delimiter) => ParserToken::Delimiter(*delimiter),
        Token::Number {
            has_sign,
            value,
            int_value,
        } => ParserToken::Number(numeric_token(
            source,
            f64::from(*value),
            *has_sign,
            int_value.is_some(),
        )),
        Token::Percentage {
            has_sign,
            unit_value,
            int_value,
        } => {
            let digits = source.strip_suffix('%').unwrap_or(source);
            ParserToken::Percentage(numeric_token(
                digits,
                f64::from(*unit_value) * 100.0,
                *has_sign,
                int_value.is_some(),
            ))
        }
        Token::Dimension {
            has_sign,
            value,
            int_value,
            unit,
        } => {
            let digits = source.get(..numeric_prefix_len(source)).unwrap_or(source);
            ParserToken::Dimension {
                numeric: numeric_token(digits, f64::from(*value), *has_sign, int_value.is_some()),
                unit: unit.to_string(),
            }
        }
        Token::WhiteSpace(_) => ParserToken::Whitespace,
        Token::Comment(_) => return None,
        Token::Colon => ParserToken::Colon,
        Token::Semicolon => ParserToken::Semicolon,
        Token::Comma => ParserToken::Comma,
        Token::IncludeMatch => ParserToken::IncludeMatch,
        Token::DashMatch => ParserToken::DashMatch,
        Token::PrefixMatch => ParserToken::PrefixMatch,
        Token::SuffixMatch => ParserToken::SuffixMatch,
        Token::SubstringMatch => ParserToken::SubstringMatch,
        Token::CDO => ParserToken::Cdo,
        Token::CDC => ParserToken::Cdc,
        Token::Function(name) => ParserToken::Function(name.to_string()),
        Token::ParenthesisBlock => ParserToken::LeftParenthesis,
        Token::SquareBracketBlock => ParserToken::LeftBracket,
        Token::CurlyBracketBlock => ParserToken::LeftBrace,
        Token::BadUrl(_) => ParserToken::BadUrl,
        Token::BadString(_) => ParserToken::BadString,
        Token::CloseParenthesis => ParserToken::RightParenthesis,
        Token::CloseSquareBracket => ParserToken::RightBracket,
        Token::CloseCurlyBracket => ParserToken::RightBrace,
    };
    Some(converted)
}

/// Build a numeric token, re-reading the digits at double precision.
///
/// `cssparser` stores numbers as `f32`; the character-level fast paths read doubles, and both
/// must agree, so the source digits are parsed again here. Values are clamped to the `f32`
/// range in either case.
fn numeric_token(digits: &str, fallback: f64, has_sign: bool, is_integer: bool) -> NumericToken {
    let value = digits
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .unwrap_or(fallback);
    let value = if value.is_finite() {
        value.clamp(-f64::from(f32::MAX), f64::from(f32::MAX))
    } else {
        0.0
    };
    let sign = match (has_sign, value.is_sign_negative()) {
        (false, _) => NumericSign::NoSign,
        (true, true) => NumericSign::Minus,
        (true, false) => NumericSign::Plus,
    };
    NumericToken {
        value,
        value_type: if is_integer {
            NumericValueType::Integer
        } else {
            NumericValueType::Number
        },
        sign,
    }
}

/// Length of the leading `<number>` in a dimension's source text.
fn numeric_prefix_len(source: &str) -> usize {
    let bytes = source.as_bytes();
    let mut index = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        index += 1;
    }
    while bytes.get(index).is_some_and(u8::is_ascii_digit) {
        index += 1;
    }
    if bytes.get(index) == Some(&b'.') && bytes.get(index + 1).is_some_and(u8::is_ascii_digit) {
        index += 1;
        while bytes.get(index).is_some_and(u8::is_ascii_digit) {
            index += 1;
        }
    }
    if matches!(bytes.get(index), Some(b'e' | b'E')) {
        let mut exponent = index + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        if bytes.get(exponent).is_some_and(u8::is_ascii_digit) {
            index = exponent;
            while bytes.get(index).is_some_and(u8::is_ascii_digit) {
                index += 1;
            }
        }
    }
    index
}
