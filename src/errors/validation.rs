// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

/// Errors that can occur during graph descriptor precondition checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A node references a value id that the descriptor does not declare
    UnknownValue {
        /// Index of the referencing node
        node: usize,
        /// The out-of-range value id
        value_id: usize,
        /// The declared number of values
        value_count: usize,
    },
    /// A value is listed as an output of more than one node
    MultipleProducers {
        /// The value produced twice
        value_id: usize,
        /// The node that produced it first
        first_producer: usize,
        /// The node that produced it again
        second_producer: usize,
    },
    /// A node has more inputs than the configured limit
    TooManyInputs {
        node: usize,
        count: usize,
        limit: usize,
    },
    /// A node has more outputs than the configured limit
    TooManyOutputs {
        node: usize,
        count: usize,
        limit: usize,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UnknownValue {
                node,
                value_id,
                value_count,
            } => {
                write!(
                    f,
                    "Node {} references value {} but only {} values are declared",
                    node, value_id, value_count
                )
            }
            ValidationError::MultipleProducers {
                value_id,
                first_producer,
                second_producer,
            } => {
                write!(
                    f,
                    "Value {} is produced by node {} and again by node {}",
                    value_id, first_producer, second_producer
                )
            }
            ValidationError::TooManyInputs { node, count, limit } => {
                write!(f, "Node {} has {} inputs (limit {})", node, count, limit)
            }
            ValidationError::TooManyOutputs { node, count, limit } => {
                write!(f, "Node {} has {} outputs (limit {})", node, count, limit)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
