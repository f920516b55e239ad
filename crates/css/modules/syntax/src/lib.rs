//! CSS Syntax Module Level 3 — Tokenization into an owned, flattened token stream.
//! Spec: <https://www.w3.org/TR/css-syntax-3/>
//!
//! Tokenizing is delegated to `cssparser`; the resulting tokens are copied into
//! [`ParserToken`]s so value parsers can walk them with a [`TokenRange`], look behind the
//! current position, and keep them around as unresolved variable data.

#![forbid(unsafe_code)]

pub mod mode;
pub mod range;
pub mod serialize;
pub mod token;
pub mod tokenizer;

pub use mode::ParserMode;
pub use range::TokenRange;
pub use serialize::{serialize_identifier, serialize_string, serialize_url};
pub use token::{BlockType, NumericSign, NumericToken, NumericValueType, ParserToken};
pub use tokenizer::{MAX_BLOCK_NESTING, collect_tokens, tokenize};
