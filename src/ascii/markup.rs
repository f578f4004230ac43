//! Inline markup for rendered grids and XML escaping.

use std::borrow::Cow;
use std::fmt;

/// Escape text content for embedding in HTML/XML: `&`, `<` and `>`.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    escape(text, false)
}

/// Escape an attribute value: text escapes plus `"`.
pub fn escape_attr(value: &str) -> Cow<'_, str> {
    escape(value, true)
}

fn escape(input: &str, quotes: bool) -> Cow<'_, str> {
    let needs = |c: char| matches!(c, '&' | '<' | '>') || (quotes && c == '"');
    if !input.chars().any(needs) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 8);
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quotes => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Push a single escaped glyph.
pub(crate) fn push_escaped_char(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        _ => out.push(c),
    }
}

/// Styled markup of a rendered grid: one `<span>` per cell, a newline after
/// every row.
///
/// Only the grid renderer builds these, so glyph text inside is always
/// escaped and the markup can be embedded as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyledText(String);

impl StyledText {
    pub(crate) fn from_escaped(markup: String) -> Self {
        StyledText(markup)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for StyledText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StyledText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a<b>&c"), "a&lt;b&gt;&amp;c");
        assert_eq!(escape_text("\"quoted\""), "\"quoted\"");
    }

    #[test]
    fn test_escape_attr_quotes() {
        assert_eq!(
            escape_attr("\"Courier New\", monospace"),
            "&quot;Courier New&quot;, monospace"
        );
    }

    #[test]
    fn test_escape_borrows_clean_input() {
        assert!(matches!(escape_text("plain @#%"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_already_escaped_is_escaped_again() {
        assert_eq!(escape_text("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_push_escaped_char() {
        let mut out = String::new();
        for c in ['<', '@', '&', '>'] {
            push_escaped_char(&mut out, c);
        }
        assert_eq!(out, "&lt;@&amp;&gt;");
    }
}
