//! Crate-wide error type.
//!
//! Only the boundaries that can genuinely fail in a way the caller must
//! react to are represented here: malformed scenario input and Lambert
//! non-convergence. Numerical degeneracies inside the propagators are
//! recovered locally (see the acceleration composer and Kepler solver)
//! and never surface as an `MCError`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MCError {
    #[error("input error on entity {entity_id:?}, field `{field}`: {message}")]
    InputError {
        entity_id: Option<String>,
        field: String,
        message: String,
    },

    #[error("lambert solver did not converge after {iterations} iterations")]
    LambertDidNotConverge { iterations: u32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl MCError {
    pub fn input(entity_id: impl Into<Option<String>>, field: &str, message: impl Into<String>) -> Self {
        MCError::InputError {
            entity_id: entity_id.into(),
            field: field.to_string(),
            message: message.into(),
        }
    }
}

pub type MCResult<T> = Result<T, MCError>;
