//! CSS Object Model — §2.1 Common serializing idioms.
//! Spec: <https://drafts.csswg.org/cssom/#common-serializing-idioms>

/// Serialize `value` as a CSS identifier, escaping where required.
pub fn serialize_identifier(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    match cssparser::serialize_identifier(value, &mut out) {
        Ok(()) => out,
        Err(_) => value.to_owned(),
    }
}

/// Serialize `value` as a double-quoted CSS string.
pub fn serialize_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    match cssparser::serialize_string(value, &mut out) {
        Ok(()) => out,
        Err(_) => format!("\"{value}\""),
    }
}

/// Serialize `value` as a `url()` with a quoted argument.
pub fn serialize_url(value: &str) -> String {
    format!("url({})", serialize_string(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// # Panics
    /// Panics if quoting or escaping changes.
    #[test]
    fn quotes_and_escapes() {
        assert_eq!(serialize_string("a\"b"), "\"a\\\"b\"");
        assert_eq!(serialize_identifier("1st"), "\\31 st");
        assert_eq!(serialize_url("img.png"), "url(\"img.png\")");
    }
}
