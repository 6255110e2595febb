// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for graph precondition failures.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Graph descriptor failed its precondition checks.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use memplan::observability::messages::validation::GraphValidationFailed;
///
/// let msg = GraphValidationFailed {
///     error_count: 2,
///     node_count: 10,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct GraphValidationFailed {
    pub error_count: usize,
    pub node_count: usize,
}

impl Display for GraphValidationFailed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Graph validation failed with {} errors across {} nodes",
            self.error_count, self.node_count
        )
    }
}

impl StructuredLog for GraphValidationFailed {
    fn log(&self) {
        tracing::error!(
            error_count = self.error_count,
            node_count = self.node_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "graph_validation_failed",
            span_name = name,
            error_count = self.error_count,
            node_count = self.node_count,
        )
    }
}
