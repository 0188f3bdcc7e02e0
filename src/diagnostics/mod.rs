//! Diagnostics subsystem.
//!
//! # Data Flow
//! ```text
//! every request:
//!     → report.rs (collect General / Configuration / Environment / Request)
//!     → redact.rs (mask values whose name looks secret)
//!     → render.rs (escaped HTML tables)
//!     → appended to the page by the form handler
//! ```
//!
//! The dump exposes process configuration to anyone who can reach the
//! endpoint. Redaction hides obvious secrets; it is not access control.

pub mod redact;
pub mod render;
pub mod report;

pub use redact::Redactor;
pub use render::render_html;
pub use report::{collect, DiagnosticsReport, Entry, RequestInfo, Section};
