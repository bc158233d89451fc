//! Core injection logic: eligibility and insertion strategies.
//!
//! # Design Decisions
//! - Everything here is a pure function over plain data; no framework types
//!   leak in, so the logic is testable without spinning up a server
//! - Insertion positions are a closed enum resolved from configuration at
//!   load time, so an unrecognized name is rejected before the first request

pub mod eligibility;
pub mod insertion;

pub use eligibility::{is_trackable, RenderMode, ResponseFacts};
pub use insertion::{InsertPosition, UnrecognizedPosition};
