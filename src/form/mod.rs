//! Form subsystem: the one endpoint the service exposes.
//!
//! # Data Flow
//! ```text
//! GET  /  → empty form
//! POST /  → name.rs (trim, escape) → greeting or validation message
//!         → page.rs (message + form + diagnostics fragment)
//! ```

pub mod handler;
pub mod name;
pub mod page;

pub use handler::form_handler;
pub use name::{NameForm, SubmittedName};
pub use page::{render_page, FormOutcome, VALIDATION_MESSAGE};
