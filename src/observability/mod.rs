// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for all diagnostic and operational
//! logging in the planner. Message types follow a struct-based pattern with a
//! `Display` implementation so that:
//!
//! * Log text is defined once, next to its fields
//! * Every event carries the same structured fields wherever it is emitted
//! * Call sites stay a single `msg.log()` line
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::planner` - Tracker lifecycle and allocation events
//! * `messages::liveness` - Liveness analysis results
//! * `messages::validation` - Graph precondition failures
//!
//! # Usage
//!
//! ```rust
//! use memplan::observability::messages::planner::ValueSkipped;
//! use memplan::observability::messages::StructuredLog;
//!
//! let msg = ValueSkipped {
//!     value_id: 3,
//!     reason: "zero size",
//! };
//!
//! msg.log();
//! ```

pub mod messages;
