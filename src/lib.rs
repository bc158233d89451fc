//! HTTP middleware that injects analytics tracking markup into outgoing
//! HTML responses.
//!
//! The layer runs after the rest of the stack has produced the response,
//! decides eligibility (enabled, non-XHR, HTML content type, not 304,
//! rendering to the client, has a body), and splices the configured markup
//! at the top or bottom of the `<body>` element.

pub mod config;
pub mod filter;
pub mod http;
pub mod observability;
pub mod snippet;

pub use config::AppConfig;
pub use filter::{InsertPosition, RenderMode};
pub use http::{inject_tracking, HttpServer, TrackingState};
pub use snippet::{SnippetSource, StaticSnippet};
