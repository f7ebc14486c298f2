//! Error types for parsing configuration, catalogs and action frames.
//!
//! Planning itself never fails: missing paths, empty distributions and wall
//! conflicts are ordinary outcomes. Only input decoding produces errors.

use thiserror::Error;

use crate::location::Position;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("JSON decode failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Game config has no unit information at index {index}")]
    MissingUnit { index: usize },

    #[error("Invalid interceptor plan starting at {start:?}: {reason}")]
    InvalidPlan { start: Position, reason: String },
}

pub type Result<T> = std::result::Result<T, PlannerError>;
