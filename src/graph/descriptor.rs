// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Identifier of a value (tensor buffer) in `[0, value_count)`
pub type ValueId = usize;

/// Position of a node in execution order; doubles as the liveness clock
pub type NodeIndex = usize;

/// One execution step: the values it reads and the values it writes.
///
/// # Examples
/// ```
/// use memplan::graph::Node;
///
/// let node = Node::new(vec![0, 1], vec![2]);
/// assert_eq!(node.inputs(), &[0, 1]);
/// assert_eq!(node.outputs(), &[2]);
/// assert_eq!(node.values().collect::<Vec<_>>(), vec![0, 1, 2]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    inputs: Vec<ValueId>,
    outputs: Vec<ValueId>,
}

impl Node {
    pub fn new(inputs: Vec<ValueId>, outputs: Vec<ValueId>) -> Self {
        Self { inputs, outputs }
    }

    pub fn inputs(&self) -> &[ValueId] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[ValueId] {
        &self.outputs
    }

    /// Every value this node references, inputs first
    pub fn values(&self) -> impl Iterator<Item = ValueId> + '_ {
        self.inputs.iter().chain(self.outputs.iter()).copied()
    }
}

/// Nodes in execution order plus the number of values they may reference.
///
/// The descriptor is built by the graph layer and handed to the planner by
/// shared reference; the planner never mutates it.
///
/// # Examples
/// ```
/// use memplan::graph::{GraphDescriptor, Node};
///
/// let mut graph = GraphDescriptor::new(4);
/// graph.push_node(Node::new(vec![0, 1], vec![2]));
/// graph.push_node(Node::new(vec![1, 2], vec![3]));
///
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.value_count(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphDescriptor {
    nodes: Vec<Node>,
    value_count: usize,
}

impl GraphDescriptor {
    /// Create an empty descriptor declaring `value_count` values
    pub fn new(value_count: usize) -> Self {
        Self {
            nodes: Vec::new(),
            value_count,
        }
    }

    /// Build a descriptor from nodes already in execution order
    pub fn from_nodes(value_count: usize, nodes: Vec<Node>) -> Self {
        Self { nodes, value_count }
    }

    /// Append the next node in execution order and return its index
    pub fn push_node(&mut self, node: Node) -> NodeIndex {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn value_count(&self) -> usize {
        self.value_count
    }
}

impl From<(usize, Vec<Node>)> for GraphDescriptor {
    fn from((value_count, nodes): (usize, Vec<Node>)) -> Self {
        Self::from_nodes(value_count, nodes)
    }
}
