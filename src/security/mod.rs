//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → body limit (tower-http, configured in http/server.rs)
//!     → handler renders untrusted text through escape.rs
//!     → headers.rs adds hardening headers to the response
//! ```
//!
//! # Design Decisions
//! - No trust in client input: every echoed string is escaped at render time
//! - Diagnostics values are escaped too; they come from the environment

pub mod escape;
pub mod headers;

pub use escape::escape_html;
