//! The submitted name: the only piece of user input the service accepts.

use crate::security::escape_html;

/// Characters stripped from both ends of a submitted name. Other Unicode
/// spacing (NBSP and friends) is kept as part of the name.
const TRIMMED: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

/// The `name` field of a form submission.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NameForm {
    pub name: Option<String>,
}

impl NameForm {
    /// Pick `name` out of decoded form pairs. When the field repeats, the
    /// last occurrence wins.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let name = pairs
            .into_iter()
            .filter(|(key, _)| key == "name")
            .map(|(_, value)| value)
            .last();
        Self { name }
    }
}

/// A name that has been trimmed and HTML-escaped, and is known to be
/// non-empty. Safe to interpolate into markup as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedName(String);

impl SubmittedName {
    /// Trim surrounding whitespace and escape the input.
    ///
    /// Returns `None` when nothing is left, which callers render as the
    /// validation message rather than an error.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let sanitized = escape_html(raw.unwrap_or_default().trim_matches(TRIMMED));
        if sanitized.is_empty() {
            None
        } else {
            Some(Self(sanitized))
        }
    }
}

impl AsRef<str> for SubmittedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
