//! HTML encoding helpers.

use std::borrow::Cow;

/// Encode a value for use inside a double-quoted attribute.
pub fn html_attribute_encode(value: &str) -> Cow<'_, str> {
    encode(value, true)
}

/// Encode text content (`&`, `<`, `>`, `"`).
pub fn html_encode(value: &str) -> Cow<'_, str> {
    encode(value, false)
}

fn encode(value: &str, attribute: bool) -> Cow<'_, str> {
    let needs_encoding = value
        .chars()
        .any(|c| matches!(c, '&' | '<' | '>' | '"') || (attribute && c == '\''));
    if !needs_encoding {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' if attribute => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_values_are_borrowed() {
        assert!(matches!(html_attribute_encode("/Category/MyTest"), Cow::Borrowed(_)));
        assert!(matches!(html_encode("hello"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_attribute_encoding() {
        assert_eq!(
            html_attribute_encode(r#"a"b'<c>&"#),
            "a&quot;b&#39;&lt;c&gt;&amp;"
        );
    }

    #[test]
    fn test_text_encoding_keeps_apostrophe() {
        assert_eq!(html_encode("it's <b>"), "it's &lt;b&gt;");
    }
}
