// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Liveness analysis over the node execution order.
//!
//! Node indices act as the clock: a value is live from the first node that
//! references it to the last, inclusive. Inputs and outputs count the same.

use crate::errors::PlannerError;
use crate::graph::GraphDescriptor;
use crate::observability::messages::liveness::LivenessComputed;
use crate::observability::messages::StructuredLog;
use crate::planner::ValueUsage;
use crate::traits::AllocationRequest;

/// Compute the usage interval of every value in a single pass over the nodes.
///
/// The result is indexed by value id. Values no node references are `None`
/// and take no part in planning.
///
/// # Errors
/// `PlannerError::ValueOutOfRange` if a node references an id that is not
/// below `graph.value_count()`.
///
/// # Example
/// ```
/// use memplan::graph::{GraphDescriptor, Node};
/// use memplan::planner::{analyze_liveness, ValueUsage};
///
/// let graph = GraphDescriptor::from_nodes(3, vec![Node::new(vec![0], vec![1])]);
/// let usage = analyze_liveness(&graph).unwrap();
///
/// assert_eq!(usage, vec![Some(ValueUsage::at(0)), Some(ValueUsage::at(0)), None]);
/// ```
pub fn analyze_liveness(graph: &GraphDescriptor) -> Result<Vec<Option<ValueUsage>>, PlannerError> {
    let value_count = graph.value_count();
    let mut usage: Vec<Option<ValueUsage>> = vec![None; value_count];

    for (node_index, node) in graph.nodes().iter().enumerate() {
        for value_id in node.values() {
            let slot = usage
                .get_mut(value_id)
                .ok_or(PlannerError::ValueOutOfRange {
                    value_id,
                    value_count,
                })?;
            *slot = Some(match *slot {
                Some(mut existing) => {
                    existing.extend_to(node_index);
                    existing
                }
                None => ValueUsage::at(node_index),
            });
        }
    }

    let referenced_values = usage.iter().filter(|u| u.is_some()).count();
    LivenessComputed {
        node_count: graph.node_count(),
        referenced_values,
        unreferenced_values: value_count - referenced_values,
    }
    .log();

    Ok(usage)
}

/// Peak number of bytes live at any single node.
///
/// This is the lower bound on the arena size of any valid plan for
/// `requests`: all values live at the peak node need distinct bytes.
pub fn peak_live_bytes(requests: &[AllocationRequest]) -> usize {
    // (node, is_start, size); removals sort before additions at the same node
    let mut events: Vec<(usize, bool, usize)> = Vec::with_capacity(requests.len() * 2);
    for request in requests {
        events.push((request.usage.first_node, true, request.size));
        if let Some(after_last) = request.usage.last_node.checked_add(1) {
            events.push((after_last, false, request.size));
        }
    }
    events.sort_unstable();

    let mut live = 0usize;
    let mut peak = 0usize;
    for (_, is_start, size) in events {
        if is_start {
            live = live.saturating_add(size);
            peak = peak.max(live);
        } else {
            live = live.saturating_sub(size);
        }
    }
    peak
}
