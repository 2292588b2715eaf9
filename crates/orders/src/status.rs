use core::str::FromStr;

use serde::{Deserialize, Serialize};

use tuckshop_core::{DomainError, DomainResult};

/// Order status lifecycle: NEW → PREPARING → READY → COMPLETED.
///
/// COMPLETED is terminal: completed orders drop out of the active queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    New,
    Preparing,
    Ready,
    Completed,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::New,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
    ];

    /// Wire/storage representation (stored as TEXT).
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::New => "NEW",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::Completed => "COMPLETED",
        }
    }

    /// The immediate successor in the forward-only lifecycle.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::New => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Completed),
            OrderStatus::Completed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == OrderStatus::Completed
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(OrderStatus::New),
            "PREPARING" => Ok(OrderStatus::Preparing),
            "READY" => Ok(OrderStatus::Ready),
            "COMPLETED" => Ok(OrderStatus::Completed),
            other => Err(DomainError::invalid_status(other)),
        }
    }
}

/// How strictly status transitions are policed.
///
/// `Permissive` reproduces the historical behavior: any status in the
/// enumerated set is accepted as a target regardless of the current state,
/// including backward moves. `ForwardOnly` tightens this to the strict
/// lifecycle — only the immediate successor is legal, no skipping, no
/// reversal, no self-transition. Permissive is the default; strictness is a
/// deployment choice (`STATUS_POLICY`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransitionPolicy {
    #[default]
    Permissive,
    ForwardOnly,
}

impl TransitionPolicy {
    /// Validate a transition from `from` to `to`.
    ///
    /// Membership in the enumerated set is established before this point (the
    /// target already parsed into [`OrderStatus`]); this only polices
    /// ordering.
    pub fn check(self, from: OrderStatus, to: OrderStatus) -> DomainResult<()> {
        match self {
            TransitionPolicy::Permissive => Ok(()),
            TransitionPolicy::ForwardOnly => {
                if from.next() == Some(to) {
                    Ok(())
                } else {
                    Err(DomainError::invalid_transition(format!("{from} -> {to}")))
                }
            }
        }
    }
}

impl FromStr for TransitionPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "permissive" => Ok(TransitionPolicy::Permissive),
            "forward-only" => Ok(TransitionPolicy::ForwardOnly),
            other => Err(DomainError::validation(format!(
                "unknown status policy: {other} (expected permissive or forward-only)"
            ))),
        }
    }
}
