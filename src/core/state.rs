//! Calculator phases.
//!
//! The phase is never stored. It is derived from the session fields so
//! that it can not drift out of sync with them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the calculator is in a chained calculation.
///
/// # Example
///
/// ```rust
/// use reckon::core::Phase;
///
/// assert_eq!(Phase::derive(false, false), Phase::Idle);
/// assert_eq!(Phase::derive(true, true), Phase::OperandPending);
/// assert_eq!(Phase::derive(true, false), Phase::Accumulating);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Phase {
    /// No pending operation. The buffer holds a fresh number or a result.
    Idle,
    /// An operation was chosen and no digit of the second operand typed yet.
    OperandPending,
    /// The second operand is being typed.
    Accumulating,
}

impl Phase {
    /// Derive the phase from whether a chain is pending and whether the
    /// machine is waiting for an operand.
    pub fn derive(chain_pending: bool, waiting_for_operand: bool) -> Self {
        match (chain_pending, waiting_for_operand) {
            (false, _) => Self::Idle,
            (true, true) => Self::OperandPending,
            (true, false) => Self::Accumulating,
        }
    }

    /// Get the phase's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::OperandPending => "OperandPending",
            Self::Accumulating => "Accumulating",
        }
    }

    /// Whether an operation is waiting to be applied.
    pub fn has_pending_operation(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
