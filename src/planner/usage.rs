// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::graph::NodeIndex;

/// Inclusive range of nodes during which a value must keep a stable address.
///
/// Two usages overlap when they share at least one node, including a single
/// shared endpoint: a value consumed by node `n` and a value produced by node
/// `n` are live at the same time.
///
/// # Examples
/// ```
/// use memplan::planner::ValueUsage;
///
/// let input = ValueUsage::new(0, 1);
/// let output = ValueUsage::new(1, 1);
/// let later = ValueUsage::new(2, 4);
///
/// assert!(input.overlaps(&output));
/// assert!(!input.overlaps(&later));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueUsage {
    pub first_node: NodeIndex,
    pub last_node: NodeIndex,
}

impl ValueUsage {
    pub fn new(first_node: NodeIndex, last_node: NodeIndex) -> Self {
        Self {
            first_node,
            last_node,
        }
    }

    /// Usage of a value referenced by a single node
    pub fn at(node: NodeIndex) -> Self {
        Self::new(node, node)
    }

    /// `first_node <= last_node`
    pub fn is_valid(&self) -> bool {
        self.first_node <= self.last_node
    }

    pub fn contains(&self, node: NodeIndex) -> bool {
        self.first_node <= node && node <= self.last_node
    }

    pub fn overlaps(&self, other: &ValueUsage) -> bool {
        self.first_node <= other.last_node && other.first_node <= self.last_node
    }

    /// Extend the usage to a later node
    pub(crate) fn extend_to(&mut self, node: NodeIndex) {
        self.last_node = self.last_node.max(node);
    }
}
