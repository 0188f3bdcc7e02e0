//! Masking of sensitive values in the diagnostics dump.

use crate::config::DiagnosticsConfig;

/// Replacement shown instead of a sensitive value.
pub const MASK: &str = "********";

/// Decides which names carry secrets, by case-insensitive substring match.
#[derive(Debug, Clone)]
pub struct Redactor {
    patterns: Vec<String>,
}

impl Redactor {
    pub fn new(config: &DiagnosticsConfig) -> Self {
        Self {
            patterns: config
                .redact_patterns
                .iter()
                .map(|p| p.trim().to_ascii_uppercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    pub fn is_sensitive(&self, name: &str) -> bool {
        let name = name.to_ascii_uppercase();
        self.patterns.iter().any(|p| name.contains(p.as_str()))
    }

    /// The value to display for `name`.
    pub fn apply(&self, name: &str, value: String) -> String {
        if self.is_sensitive(name) {
            MASK.to_string()
        } else {
            value
        }
    }
}
