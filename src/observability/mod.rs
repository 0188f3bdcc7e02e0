//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handlers and middleware produce:
//!     → logging.rs (structured log events, request spans)
//!     → metrics.rs (request counters)
//!
//! Consumers:
//!     → stdout
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;
