//! Registration transaction phases.
//!
//! ```text
//! Started ──► Validated ──► Committed ──► NotifyAttempted
//!    │            │
//!    └────────────┴──► Rejected(reason)
//! ```
//!
//! Once `Committed`, the only way forward is `NotifyAttempted`: there is no
//! rollback after the pass unit has been spent.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Why a registration attempt stopped before committing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    EventNotFound,
    PassExhaustedOrInvalid,
    StoreFailure,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RejectionReason::EventNotFound => "event_not_found",
            RejectionReason::PassExhaustedOrInvalid => "pass_exhausted_or_invalid",
            RejectionReason::StoreFailure => "store_failure",
        };
        write!(f, "{}", s)
    }
}

/// Phase of a single registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "phase", content = "reason")]
pub enum RegistrationPhase {
    Started,
    Validated,
    Committed,
    NotifyAttempted,
    Rejected(RejectionReason),
}

impl RegistrationPhase {
    /// True once the pass unit has been spent.
    pub fn is_committed(&self) -> bool {
        matches!(
            self,
            RegistrationPhase::Committed | RegistrationPhase::NotifyAttempted
        )
    }
}

impl StateMachine for RegistrationPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use RegistrationPhase::*;
        matches!(
            (self, target),
            (Started, Validated)
                | (Started, Rejected(_))
                | (Validated, Committed)
                | (Validated, Rejected(_))
                | (Committed, NotifyAttempted)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use RegistrationPhase::*;
        use RejectionReason::*;
        match self {
            Started => vec![
                Validated,
                Rejected(EventNotFound),
                Rejected(PassExhaustedOrInvalid),
                Rejected(StoreFailure),
            ],
            Validated => vec![
                Committed,
                Rejected(PassExhaustedOrInvalid),
                Rejected(StoreFailure),
            ],
            Committed => vec![NotifyAttempted],
            NotifyAttempted | Rejected(_) => vec![],
        }
    }
}
