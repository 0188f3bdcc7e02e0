//! Greeter form service library.
//!
//! One page at `/`: a name form that greets on submission, followed by a
//! diagnostics dump of the running process.

pub mod config;
pub mod diagnostics;
pub mod form;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::GreeterConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
