// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for allocation tracker lifecycle and placement events.
//!
//! This module contains message types for logging events related to:
//! * Planning start and completion
//! * Individual value placement and skipping
//! * Rejected tracker operations

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Planning started with the configured strategy.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use memplan::observability::messages::planner::PlanningStarted;
///
/// let msg = PlanningStarted {
///     strategy: "coalescing",
///     value_count: 8,
///     planned_count: 8,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct PlanningStarted<'a> {
    pub strategy: &'a str,
    pub value_count: usize,
    pub planned_count: usize,
}

impl Display for PlanningStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Planning arena with {} strategy: {} of {} values need storage",
            self.strategy, self.planned_count, self.value_count
        )
    }
}

impl StructuredLog for PlanningStarted<'_> {
    fn log(&self) {
        tracing::info!(
            strategy = self.strategy,
            value_count = self.value_count,
            planned_count = self.planned_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "planning",
            span_name = name,
            strategy = self.strategy,
            value_count = self.value_count,
            planned_count = self.planned_count,
        )
    }
}

/// Planning finished and the arena size is fixed.
///
/// `lower_bound` is the peak number of bytes simultaneously live at any node;
/// no strategy can produce a smaller arena.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use memplan::observability::messages::planner::PlanningCompleted;
/// use std::time::Duration;
///
/// let msg = PlanningCompleted {
///     strategy: "coalescing",
///     arena_size: 124,
///     total_bytes: 234,
///     lower_bound: 124,
///     duration: Duration::from_micros(12),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct PlanningCompleted<'a> {
    pub strategy: &'a str,
    pub arena_size: usize,
    pub total_bytes: usize,
    pub lower_bound: usize,
    pub duration: std::time::Duration,
}

impl Display for PlanningCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Arena planned with {} strategy: {} bytes for {} bytes of values (peak live {}) in {:?}",
            self.strategy, self.arena_size, self.total_bytes, self.lower_bound, self.duration
        )
    }
}

impl StructuredLog for PlanningCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            strategy = self.strategy,
            arena_size = self.arena_size,
            total_bytes = self.total_bytes,
            lower_bound = self.lower_bound,
            duration_us = self.duration.as_micros() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "planning_completed",
            span_name = name,
            strategy = self.strategy,
            arena_size = self.arena_size,
            total_bytes = self.total_bytes,
            lower_bound = self.lower_bound,
            duration = ?self.duration,
        )
    }
}

/// A value received its arena offset.
///
/// # Log Level
/// `trace!` - One event per planned value
pub struct ValuePlaced {
    pub value_id: usize,
    pub offset: usize,
    pub size: usize,
}

impl Display for ValuePlaced {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Value {} placed at [{}, {})",
            self.value_id,
            self.offset,
            self.offset + self.size
        )
    }
}

impl StructuredLog for ValuePlaced {
    fn log(&self) {
        tracing::trace!(
            value_id = self.value_id,
            offset = self.offset,
            size = self.size,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "value_placed",
            span_name = name,
            value_id = self.value_id,
            offset = self.offset,
            size = self.size,
        )
    }
}

/// A value was left out of the arena.
///
/// # Log Level
/// `debug!` - Diagnostic detail
///
/// # Example
/// ```
/// use memplan::observability::messages::planner::ValueSkipped;
///
/// let msg = ValueSkipped {
///     value_id: 2,
///     reason: "no usage",
/// };
///
/// assert_eq!(msg.to_string(), "Value 2 not planned: no usage");
/// ```
pub struct ValueSkipped<'a> {
    pub value_id: usize,
    pub reason: &'a str,
}

impl Display for ValueSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Value {} not planned: {}", self.value_id, self.reason)
    }
}

impl StructuredLog for ValueSkipped<'_> {
    fn log(&self) {
        tracing::debug!(
            value_id = self.value_id,
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "value_skipped",
            span_name = name,
            value_id = self.value_id,
            reason = self.reason,
        )
    }
}

/// A tracker operation was refused.
///
/// # Log Level
/// `warn!` - Caller misuse or malformed input
pub struct PlanningRejected<'a> {
    pub operation: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for PlanningRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Tracker {} rejected: {}", self.operation, self.error)
    }
}

impl StructuredLog for PlanningRejected<'_> {
    fn log(&self) {
        tracing::warn!(
            operation = self.operation,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "planning_rejected",
            span_name = name,
            operation = self.operation,
            error = %self.error,
        )
    }
}
