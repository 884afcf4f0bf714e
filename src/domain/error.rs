//! Domain error types for comparisons.
//!
//! The alignment itself is total; these are the only ways a comparison can
//! fail, and both are reported before any alignment work starts.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which input of a comparison an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Original,
    Suggested,
    /// A JSON document of code changes, before it is parsed.
    Document,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => write!(f, "original"),
            Self::Suggested => write!(f, "suggested"),
            Self::Document => write!(f, "document"),
        }
    }
}

/// Domain errors related to diff operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    #[error("Input too large: {total_lines} lines exceed the limit of {max_lines}")]
    InputTooLarge { total_lines: usize, max_lines: usize },

    #[error("Invalid UTF-8 in {side} input at byte {valid_up_to}")]
    Encoding { side: Side, valid_up_to: usize },
}

impl DiffError {
    /// Suggested remediation shown to callers.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::InputTooLarge { .. } => {
                "split the inputs into smaller chunks or raise max_total_lines"
            }
            Self::Encoding { .. } => "re-encode the input as UTF-8",
        }
    }
}
