//! Leave-request state machine.
//!
//! ```text
//! Pending ──approve──▶ Approved
//!    │
//!    └─────reject────▶ Rejected
//! ```
//!
//! `Approved` and `Rejected` are terminal.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a leave request.
///
/// Wire and storage format: `"Pending"`, `"Approved"`, `"Rejected"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub const ALL: [Self; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    /// Next state after `decision`, or `None` when the transition is not allowed.
    pub fn apply(self, decision: LeaveDecision) -> Option<Self> {
        match self {
            Self::Pending => Some(decision.target()),
            Self::Approved | Self::Rejected => None,
        }
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid leave status: {0}")]
pub struct InvalidLeaveStatus(pub String);

impl FromStr for LeaveStatus {
    type Err = InvalidLeaveStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            other => Err(InvalidLeaveStatus(other.to_owned())),
        }
    }
}

/// Approver action on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveDecision {
    Approve,
    Reject,
}

impl LeaveDecision {
    pub fn target(self) -> LeaveStatus {
        match self {
            Self::Approve => LeaveStatus::Approved,
            Self::Reject => LeaveStatus::Rejected,
        }
    }

    /// States from which this decision is allowed. Storage guards conditional
    /// updates on exactly this set.
    pub fn sources(self) -> impl Iterator<Item = LeaveStatus> {
        LeaveStatus::ALL
            .into_iter()
            .filter(move |status| status.apply(self).is_some())
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("end date cannot be earlier than start date")]
pub struct InvalidDateRange;

/// A leave period must not end before it starts. Single-day leave is allowed.
pub fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<(), InvalidDateRange> {
    if end < start {
        return Err(InvalidDateRange);
    }
    Ok(())
}
