//! Order lifecycle phases.
//!
//! ```text
//! Empty      --add line-->          Filled
//! Filled     --remove last line-->  Empty
//! Filled     --submit-->            Submitting
//! Submitting --server ok-->         Succeeded --acknowledge--> Empty
//! Submitting --server error-->      Failed    --acknowledge--> Empty
//! ```

use serde::{Deserialize, Serialize};

/// Where a cart is in its order lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderPhase {
    /// No lines.
    Empty,
    /// At least one line, nothing in flight.
    Filled,
    /// Waiting on the order endpoint.
    Submitting,
    /// Server accepted the order; awaiting acknowledgement.
    Succeeded,
    /// Server or transport rejected the order; awaiting acknowledgement.
    Failed,
}

impl OrderPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderPhase::Empty => "empty",
            OrderPhase::Filled => "filled",
            OrderPhase::Submitting => "submitting",
            OrderPhase::Succeeded => "succeeded",
            OrderPhase::Failed => "failed",
        }
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        matches!(self, OrderPhase::Filled)
    }

    /// Whether lines and payment method may change.
    pub fn accepts_mutations(&self) -> bool {
        matches!(self, OrderPhase::Empty | OrderPhase::Filled)
    }
}

/// Outcome of a finished submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// Carries the server confirmation text.
    Succeeded(String),
    /// Carries the failure reason.
    Failed(String),
}

impl SubmissionOutcome {
    pub fn message(&self) -> &str {
        match self {
            SubmissionOutcome::Succeeded(m) | SubmissionOutcome::Failed(m) => m,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Succeeded(_))
    }
}
