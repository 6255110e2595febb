// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] to emit that line at its level together with the
//! message's fields.
//!
//! # Organization
//!
//! * `planner` - Tracker lifecycle and allocation events
//! * `liveness` - Liveness analysis results
//! * `validation` - Graph precondition failures
//!
//! # Usage Pattern
//!
//! ```rust
//! use memplan::observability::messages::planner::PlanningStarted;
//! use memplan::observability::messages::StructuredLog;
//!
//! let msg = PlanningStarted {
//!     strategy: "coalescing",
//!     value_count: 8,
//!     planned_count: 6,
//! };
//!
//! let _span = msg.span("plan").entered();
//! msg.log();
//! ```

use tracing::Span;

pub mod liveness;
pub mod planner;
pub mod validation;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a tracing event at its level
    fn log(&self);

    /// Build a span carrying the message's fields
    fn span(&self, name: &str) -> Span;
}
