//! Collection of the diagnostics sections.
//!
//! Each section is a flat list of key/value pairs. Values are raw here;
//! escaping happens in `render.rs`.

use std::time::Instant;

use axum::http::{HeaderMap, Method, Uri, Version};

use crate::config::GreeterConfig;
use crate::diagnostics::redact::Redactor;

/// One row of a diagnostics table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A titled table of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub entries: Vec<Entry>,
}

#[cfg(test)]
impl Section {
    fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }
}

/// The full dump appended to every page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticsReport {
    pub sections: Vec<Section>,
}

#[cfg(test)]
impl DiagnosticsReport {
    fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title == title)
    }
}

/// The parts of the current request shown in the dump.
#[derive(Debug, Clone, Copy)]
pub struct RequestInfo<'a> {
    pub method: &'a Method,
    pub uri: &'a Uri,
    pub version: Version,
    pub headers: &'a HeaderMap,
}

/// Build, version, platform and process facts.
pub fn general_section(started_at: Instant) -> Section {
    let working_directory = std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|e| format!("unavailable ({e})"));
    let executable = std::env::current_exe()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|e| format!("unavailable ({e})"));

    Section {
        title: "General",
        entries: vec![
            Entry::new("package", env!("CARGO_PKG_NAME")),
            Entry::new("version", env!("CARGO_PKG_VERSION")),
            Entry::new("os", std::env::consts::OS),
            Entry::new("arch", std::env::consts::ARCH),
            Entry::new("family", std::env::consts::FAMILY),
            Entry::new("pid", std::process::id().to_string()),
            Entry::new("working_directory", working_directory),
            Entry::new("executable", executable),
            Entry::new("uptime_secs", started_at.elapsed().as_secs().to_string()),
        ],
    }
}

/// Every effective configuration value, as dotted keys.
pub fn configuration_section(config: &GreeterConfig) -> Section {
    let mut entries = Vec::new();
    match toml::Value::try_from(config) {
        Ok(value) => flatten("", &value, &mut entries),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to serialize configuration for diagnostics");
            entries.push(Entry::new("error", e.to_string()));
        }
    }
    Section {
        title: "Configuration",
        entries,
    }
}

fn flatten(prefix: &str, value: &toml::Value, out: &mut Vec<Entry>) {
    match value {
        toml::Value::Table(table) => {
            for (key, child) in table {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, child, out);
            }
        }
        toml::Value::String(s) => out.push(Entry::new(prefix, s.clone())),
        other => out.push(Entry::new(prefix, other.to_string())),
    }
}

/// Environment variables sorted by name, sensitive values masked.
pub fn environment_section<I>(vars: I, redactor: &Redactor) -> Section
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut entries: Vec<Entry> = vars
        .into_iter()
        .map(|(name, value)| {
            let value = redactor.apply(&name, value);
            Entry::new(name, value)
        })
        .collect();
    entries.sort_by(|a, b| a.key.cmp(&b.key));
    Section {
        title: "Environment",
        entries,
    }
}

/// Request line, request id and headers, sensitive header values masked.
pub fn request_section(request: RequestInfo<'_>, redactor: &Redactor) -> Section {
    let request_id = request
        .headers
        .get("x-request-id")
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_else(|| "unknown".to_string());

    let mut entries = vec![
        Entry::new("method", request.method.as_str()),
        Entry::new("uri", request.uri.to_string()),
        Entry::new("version", format!("{:?}", request.version)),
        Entry::new("request_id", request_id),
    ];

    for (name, value) in request.headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        entries.push(Entry::new(
            format!("header.{}", name.as_str()),
            redactor.apply(name.as_str(), value),
        ));
    }

    Section {
        title: "Request",
        entries,
    }
}

/// Collect every section for the current request.
pub fn collect(
    config: &GreeterConfig,
    started_at: Instant,
    request: RequestInfo<'_>,
) -> DiagnosticsReport {
    let redactor = Redactor::new(&config.diagnostics);
    let vars = std::env::vars_os().map(|(k, v)| {
        (
            k.to_string_lossy().into_owned(),
            v.to_string_lossy().into_owned(),
        )
    });

    DiagnosticsReport {
        sections: vec![
            general_section(started_at),
            configuration_section(config),
            environment_section(vars, &redactor),
            request_section(request, &redactor),
        ],
    }
}
