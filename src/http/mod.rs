//! HTTP adapter subsystem.
//!
//! # Data Flow
//! ```text
//! incoming request
//!     → middleware.rs (record request facts: XHR, HEAD)
//!     → downstream handlers produce the response
//!     → middleware.rs (eligibility check, snippet insertion)
//!     → Send to client
//! ```

pub mod middleware;
pub mod server;

pub use middleware::{inject_tracking, TrackingState};
pub use server::HttpServer;
