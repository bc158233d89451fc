//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Resolve the configured insertion position against the known strategies
//! - Reject an enabled tracker with nothing to insert
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::filter::insertion::{InsertPosition, UnrecognizedPosition};

/// A semantic problem with an otherwise well-formed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Insertion(#[from] UnrecognizedPosition),

    #[error("tracking is enabled but no snippet is configured")]
    EmptySnippet,
}

/// Validate a deserialized configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.tracking.insertion.parse::<InsertPosition>() {
        errors.push(ValidationError::Insertion(e));
    }

    if config.tracking.enabled && config.tracking.snippet.is_empty() {
        errors.push(ValidationError::EmptySnippet);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
