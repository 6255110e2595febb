// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while computing liveness and planning the arena.

use crate::planner::TrackerState;
use thiserror::Error;

/// Errors that can occur while populating or planning an allocation tracker.
///
/// Every variant is a caller-side precondition violation or a resource failure.
/// None of them are transient: retrying the same call with the same input
/// fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    /// A value id is not below the tracker's (or descriptor's) value count
    #[error("value {value_id} is out of range for {value_count} values")]
    ValueOutOfRange { value_id: usize, value_count: usize },

    /// A usage record whose interval is reversed
    #[error("invalid usage for value {value_id}: first node {first_node} is after last node {last_node}")]
    InvalidUsage {
        value_id: usize,
        first_node: usize,
        last_node: usize,
    },

    /// `add_size` was called for a value that has no usage record yet
    #[error("size recorded for value {value_id} before its usage")]
    SizeBeforeUsage { value_id: usize },

    /// The descriptor declares a different value count than the tracker was initialized with
    #[error("descriptor declares {declared} values but tracker holds {expected}")]
    ValueCountMismatch { declared: usize, expected: usize },

    /// The tracker's per-value arrays could not be reserved
    #[error("unable to reserve tracker storage for {value_count} values")]
    ResourceExhausted { value_count: usize },

    /// An offset plus size does not fit in `usize`
    #[error("arena offset overflow while placing value {value_id}")]
    ArenaOverflow { value_id: usize },

    /// An operation was called in a state that does not allow it
    #[error("cannot {operation} a tracker in the {state:?} state")]
    InvalidState {
        operation: &'static str,
        state: TrackerState,
    },
}
