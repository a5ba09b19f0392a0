//! Document lifecycle status.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status shared by claims and payroll corrections.
///
/// Documents move `Draft -> Validated -> Submitted`, and a submitted
/// document may later be `Cancelled`. Validation may be repeated while a
/// document is still `Validated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocStatus {
    /// Created, not yet validated.
    #[default]
    Draft,
    /// Passed validation against the current ledger.
    Validated,
    /// Finalized; its ledger entries are posted.
    Submitted,
    /// Withdrawn after submission; its ledger entries were removed.
    Cancelled,
}

impl DocStatus {
    /// Returns true if the document may be (re)validated.
    pub fn can_validate(&self) -> bool {
        matches!(self, DocStatus::Draft | DocStatus::Validated)
    }

    /// Returns true if the document may be submitted.
    pub fn can_submit(&self) -> bool {
        *self == DocStatus::Validated
    }

    /// Returns true if the document may be cancelled.
    pub fn can_cancel(&self) -> bool {
        *self == DocStatus::Submitted
    }
}

impl fmt::Display for DocStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DocStatus::Draft => "draft",
            DocStatus::Validated => "validated",
            DocStatus::Submitted => "submitted",
            DocStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}
