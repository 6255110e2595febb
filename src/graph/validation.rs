// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Precondition checks for graph descriptors handed to the planner.
//!
//! The planner assumes a well-formed graph: every referenced value id is
//! declared, each value has at most one producing node, and (when an executor
//! needs it) no node exceeds a fixed arity. This module checks those
//! assumptions up front and reports every violation at once, so callers can
//! reject a malformed graph before any planning state exists.
//!
//! # Checks
//!
//! 1. **Reference check**: every input and output id is below the value count
//! 2. **Producer check**: no value is an output of two different nodes
//! 3. **Arity check**: input and output counts stay within [`GraphLimits`], if set
//!
//! All three run in a single pass over the nodes; total cost is O(N + R) where
//! R is the number of value references.
//!
//! # Examples
//!
//! ```rust
//! use memplan::config::GraphLimits;
//! use memplan::errors::ValidationError;
//! use memplan::graph::{validate_graph, GraphDescriptor, Node};
//!
//! let mut graph = GraphDescriptor::new(2);
//! graph.push_node(Node::new(vec![0], vec![1]));
//! graph.push_node(Node::new(vec![1], vec![5]));
//!
//! let errors = validate_graph(&graph, &GraphLimits::default()).unwrap_err();
//! assert_eq!(
//!     errors,
//!     vec![ValidationError::UnknownValue { node: 1, value_id: 5, value_count: 2 }]
//! );
//! ```

use crate::config::GraphLimits;
use crate::errors::ValidationError;
use crate::graph::{GraphDescriptor, NodeIndex};
use crate::observability::messages::validation::GraphValidationFailed;
use crate::observability::messages::StructuredLog;

/// Validates a graph descriptor against the planner's topology preconditions.
///
/// # Arguments
///
/// * `graph` - The descriptor to check
/// * `limits` - Optional arity bounds from the planner config
///
/// # Returns
///
/// * `Ok(())` - The graph satisfies every precondition
/// * `Err(Vec<ValidationError>)` - Every violation found, in node order
pub fn validate_graph(
    graph: &GraphDescriptor,
    limits: &GraphLimits,
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let value_count = graph.value_count();
    let mut producers: Vec<Option<NodeIndex>> = vec![None; value_count];

    for (node_index, node) in graph.nodes().iter().enumerate() {
        if let Some(limit) = limits.max_node_inputs {
            if node.inputs().len() > limit {
                errors.push(ValidationError::TooManyInputs {
                    node: node_index,
                    count: node.inputs().len(),
                    limit,
                });
            }
        }
        if let Some(limit) = limits.max_node_outputs {
            if node.outputs().len() > limit {
                errors.push(ValidationError::TooManyOutputs {
                    node: node_index,
                    count: node.outputs().len(),
                    limit,
                });
            }
        }

        for value_id in node.inputs() {
            if *value_id >= value_count {
                errors.push(ValidationError::UnknownValue {
                    node: node_index,
                    value_id: *value_id,
                    value_count,
                });
            }
        }

        for value_id in node.outputs() {
            let Some(producer) = producers.get_mut(*value_id) else {
                errors.push(ValidationError::UnknownValue {
                    node: node_index,
                    value_id: *value_id,
                    value_count,
                });
                continue;
            };
            match producer {
                // a node listing the same output twice is still a single producer
                Some(first) if *first != node_index => {
                    errors.push(ValidationError::MultipleProducers {
                        value_id: *value_id,
                        first_producer: *first,
                        second_producer: node_index,
                    });
                }
                Some(_) => {}
                None => *producer = Some(node_index),
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        GraphValidationFailed {
            error_count: errors.len(),
            node_count: graph.node_count(),
        }
        .log();
        Err(errors)
    }
}
