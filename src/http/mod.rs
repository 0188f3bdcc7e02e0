//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request ID, trace span, timeout, body limit
//!     → form::handler (page rendering)
//!     → security headers added on the way out
//!     → Send to client
//! ```

pub mod server;

pub use server::{build_router, AppState, HttpServer, ServerError};
