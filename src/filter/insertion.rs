//! Insertion position strategies.
//!
//! # Design Decisions
//! - Positions are a closed enum, not a name-to-method lookup; configuration
//!   strings resolve through [`FromStr`] and unknown names fail there
//! - Tag search is ASCII-case-insensitive and touches only the first match
//! - A body without the expected tag gets the markup appended at the end

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The configured insertion position named no known strategy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized insertion position \"{0}\"")]
pub struct UnrecognizedPosition(pub String);

/// Where the tracking markup is spliced into the HTML body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Immediately after the opening `<body>` tag.
    Top,
    /// Immediately before the closing `</body>` tag.
    Bottom,
}

impl InsertPosition {
    /// Apply this strategy to `body`, returning the new body text.
    ///
    /// Falls back to appending `markup` at the end when the anchor tag is
    /// not present.
    pub fn apply(self, body: &str, markup: &str) -> String {
        match self {
            InsertPosition::Top => match find_ascii_ci(body, "<body>") {
                Some(at) => splice(body, at + "<body>".len(), markup),
                None => append(body, markup),
            },
            InsertPosition::Bottom => match find_ascii_ci(body, "</body>") {
                Some(at) => splice(body, at, markup),
                None => append(body, markup),
            },
        }
    }
}

impl FromStr for InsertPosition {
    type Err = UnrecognizedPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(InsertPosition::Top),
            "bottom" => Ok(InsertPosition::Bottom),
            other => Err(UnrecognizedPosition(other.to_string())),
        }
    }
}

impl fmt::Display for InsertPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertPosition::Top => f.write_str("top"),
            InsertPosition::Bottom => f.write_str("bottom"),
        }
    }
}

/// Byte offset of the first ASCII-case-insensitive occurrence of `needle`.
fn find_ascii_ci(haystack: &str, needle: &str) -> Option<usize> {
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

fn splice(body: &str, at: usize, markup: &str) -> String {
    let mut out = String::with_capacity(body.len() + markup.len());
    out.push_str(&body[..at]);
    out.push_str(markup);
    out.push_str(&body[at..]);
    out
}

fn append(body: &str, markup: &str) -> String {
    let mut out = String::with_capacity(body.len() + markup.len());
    out.push_str(body);
    out.push_str(markup);
    out
}
