//! HTML escaping for text and attribute values.

/// Escape text content for HTML output.
///
/// Non-breaking spaces are written as plain spaces so that sanitized
/// markup never carries `&nbsp;`.
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    push_text(&mut result, s);
    result
}

/// Append escaped text content to `out`.
pub(crate) fn push_text(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push(' '),
            _ => out.push(c),
        }
    }
}

/// Escape a string for use inside a double-quoted attribute value.
pub fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert_eq!(escape_text("say \"hi\""), "say \"hi\"");
    }

    #[test]
    fn test_escape_text_nbsp() {
        assert_eq!(escape_text("a\u{a0}b"), "a b");
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(
            escape_attr(r#""><script>"#),
            "&quot;&gt;&lt;script&gt;"
        );
        assert_eq!(escape_attr("it's"), "it&#39;s");
    }
}
