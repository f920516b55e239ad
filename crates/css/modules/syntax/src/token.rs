//! CSS Syntax Module Level 3 — §4 Tokens, as owned values.
//! Spec: <https://www.w3.org/TR/css-syntax-3/#tokenization>

use crate::serialize::{serialize_identifier, serialize_string};
use core::fmt::Write as _;

/// Whether a numeric token was written as an integer (`12`) or a real number (`12.0`, `1e2`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumericValueType {
    Integer,
    Number,
}

/// Explicit sign written in front of a numeric token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumericSign {
    NoSign,
    Plus,
    Minus,
}

/// Payload shared by `<number-token>`, `<percentage-token>` and `<dimension-token>`.
///
/// `value` is always finite and within the range of an `f32`. For percentages it holds the
/// number in front of the `%` sign (so `50%` stores `50.0`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumericToken {
    pub value: f64,
    pub value_type: NumericValueType,
    pub sign: NumericSign,
}

impl NumericToken {
    /// True when the token was written as an integer.
    #[inline]
    pub fn is_integer(&self) -> bool {
        self.value_type == NumericValueType::Integer
    }
}

/// Whether a token opens a block, closes one, or neither.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockType {
    NotBlock,
    BlockStart,
    BlockEnd,
}

/// A single CSS token with owned payloads.
///
/// Blocks are flattened: a `Function`/`LeftParenthesis`/`LeftBracket`/`LeftBrace` token is
/// followed by the block contents and the matching closing token. Comments are dropped and
/// runs of whitespace collapse into one `Whitespace` token.
#[derive(Clone, Debug, PartialEq)]
pub enum ParserToken {
    Ident(String),
    Function(String),
    AtKeyword(String),
    Hash { value: String, is_identifier: bool },
    String(String),
    Url(String),
    Delimiter(char),
    Number(NumericToken),
    Percentage(NumericToken),
    Dimension { numeric: NumericToken, unit: String },
    Whitespace,
    Colon,
    Semicolon,
    Comma,
    IncludeMatch,
    DashMatch,
    PrefixMatch,
    SuffixMatch,
    SubstringMatch,
    Cdo,
    Cdc,
    LeftParenthesis,
    LeftBracket,
    LeftBrace,
    RightParenthesis,
    RightBracket,
    RightBrace,
    BadString,
    BadUrl,
    Eof,
}

impl ParserToken {
    /// Block role of the token.
    pub fn block_type(&self) -> BlockType {
        match self {
            Self::Function(_) | Self::LeftParenthesis | Self::LeftBracket | Self::LeftBrace => {
                BlockType::BlockStart
            }
            Self::RightParenthesis | Self::RightBracket | Self::RightBrace => BlockType::BlockEnd,
            Self::Ident(_)
            | Self::AtKeyword(_)
            | Self::Hash { .. }
            | Self::String(_)
            | Self::Url(_)
            | Self::Delimiter(_)
            | Self::Number(_)
            | Self::Percentage(_)
            | Self::Dimension { .. }
            | Self::Whitespace
            | Self::Colon
            | Self::Semicolon
            | Self::Comma
            | Self::IncludeMatch
            | Self::DashMatch
            | Self::PrefixMatch
            | Self::SuffixMatch
            | Self::SubstringMatch
            | Self::Cdo
            | Self::Cdc
            | Self::BadString
            | Self::BadUrl
            | Self::Eof => BlockType::NotBlock,
        }
    }

    /// Closing token that ends a block opened by `self`.
    pub fn closing_token(&self) -> Option<Self> {
        match self {
            Self::Function(_) | Self::LeftParenthesis => Some(Self::RightParenthesis),
            Self::LeftBracket => Some(Self::RightBracket),
            Self::LeftBrace => Some(Self::RightBrace),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_whitespace(&self) -> bool {
        matches!(self, Self::Whitespace)
    }

    #[inline]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }

    /// Numeric payload of number, percentage and dimension tokens.
    pub const fn numeric(&self) -> Option<&NumericToken> {
        match self {
            Self::Number(numeric) | Self::Percentage(numeric) | Self::Dimension { numeric, .. } => {
                Some(numeric)
            }
            _ => None,
        }
    }

    /// Name of an identifier, function or at-keyword token.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Ident(name) | Self::Function(name) | Self::AtKeyword(name) => Some(name),
            _ => None,
        }
    }

    /// True for an identifier token matching `expected` ASCII case-insensitively.
    pub fn is_ident_ignoring_case(&self, expected: &str) -> bool {
        matches!(self, Self::Ident(name) if name.eq_ignore_ascii_case(expected))
    }

    /// True for a function token whose name matches `expected` ASCII case-insensitively.
    pub fn is_function_ignoring_case(&self, expected: &str) -> bool {
        matches!(self, Self::Function(name) if name.eq_ignore_ascii_case(expected))
    }

    #[inline]
    pub const fn is_delimiter(&self, expected: char) -> bool {
        matches!(self, Self::Delimiter(found) if *found == expected)
    }

    /// Append the CSS serialization of this token to `dest`.
    pub fn serialize_into(&self, dest: &mut String) {
        match self {
            Self::Ident(name) => dest.push_str(&serialize_identifier(name)),
            Self::Function(name) => {
                dest.push_str(&serialize_identifier(name));
                dest.push('(');
            }
            Self::AtKeyword(name) => {
                dest.push('@');
                dest.push_str(&serialize_identifier(name));
            }
            Self::Hash { value, .. } => {
                dest.push('#');
                dest.push_str(value);
            }
            Self::String(value) => dest.push_str(&serialize_string(value)),
            Self::Url(value) => {
                dest.push_str("url(");
                dest.push_str(&serialize_string(value));
                dest.push(')');
            }
            Self::Delimiter(delimiter) => dest.push(*delimiter),
            Self::Number(numeric) => push_numeric(dest, numeric),
            Self::Percentage(numeric) => {
                push_numeric(dest, numeric);
                dest.push('%');
            }
            Self::Dimension { numeric, unit } => {
                push_numeric(dest, numeric);
                dest.push_str(&serialize_identifier(unit));
            }
            Self::Whitespace => dest.push(' '),
            Self::Colon => dest.push(':'),
            Self::Semicolon => dest.push(';'),
            Self::Comma => dest.push(','),
            Self::IncludeMatch => dest.push_str("~="),
            Self::DashMatch => dest.push_str("|="),
            Self::PrefixMatch => dest.push_str("^="),
            Self::SuffixMatch => dest.push_str("$="),
            Self::SubstringMatch => dest.push_str("*="),
            Self::Cdo => dest.push_str("<!--"),
            Self::Cdc => dest.push_str("-->"),
            Self::LeftParenthesis => dest.push('('),
            Self::LeftBracket => dest.push('['),
            Self::LeftBrace => dest.push('{'),
            Self::RightParenthesis => dest.push(')'),
            Self::RightBracket => dest.push(']'),
            Self::RightBrace => dest.push('}'),
            Self::BadString | Self::BadUrl | Self::Eof => {}
        }
    }
}

fn push_numeric(dest: &mut String, numeric: &NumericToken) {
    if numeric.sign == NumericSign::Plus {
        dest.push('+');
    }
    if write!(dest, "{}", numeric.value).is_err() {
        log::trace!(target: "css::syntax", "failed to serialize numeric token");
    }
}
