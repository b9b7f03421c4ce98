//! Utility functions.

/// Escape the five HTML-reserved characters in slide text.
///
/// Only `& < > " '` are replaced; everything else passes through untouched,
/// so already-plain text comes back unchanged.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#039;"),
            _ => result.push(c),
        }
    }
    result
}

/// Return the value unless it is empty.
///
/// Optional slide fields treat an empty string the same as a missing one.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
