// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for liveness analysis.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Liveness intervals computed for a graph.
///
/// # Log Level
/// `debug!` - Diagnostic detail
///
/// # Example
/// ```
/// use memplan::observability::messages::liveness::LivenessComputed;
///
/// let msg = LivenessComputed {
///     node_count: 2,
///     referenced_values: 4,
///     unreferenced_values: 0,
/// };
///
/// assert_eq!(
///     msg.to_string(),
///     "Computed liveness over 2 nodes: 4 values referenced, 0 unreferenced"
/// );
/// ```
pub struct LivenessComputed {
    pub node_count: usize,
    pub referenced_values: usize,
    pub unreferenced_values: usize,
}

impl Display for LivenessComputed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Computed liveness over {} nodes: {} values referenced, {} unreferenced",
            self.node_count, self.referenced_values, self.unreferenced_values
        )
    }
}

impl StructuredLog for LivenessComputed {
    fn log(&self) {
        tracing::debug!(
            node_count = self.node_count,
            referenced_values = self.referenced_values,
            unreferenced_values = self.unreferenced_values,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "liveness",
            span_name = name,
            node_count = self.node_count,
            referenced_values = self.referenced_values,
            unreferenced_values = self.unreferenced_values,
        )
    }
}
