// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Read-only view of the computation graph consumed by the planner.

mod descriptor;
mod validation;

pub use descriptor::{GraphDescriptor, Node, NodeIndex, ValueId};
pub use validation::validate_graph;
