//! HTML escaping for untrusted text.
//!
//! Everything that reaches a rendered page from the outside (form input,
//! environment, request headers, config values) goes through [`escape_html`].

/// Escape a string for safe insertion into HTML text or attribute values.
///
/// Replaces `&`, `<`, `>`, `"` and `'` with entities, so the output can never
/// open a tag or break out of a quoted attribute.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#039;"),
            _ => output.push(ch),
        }
    }
    output
}
