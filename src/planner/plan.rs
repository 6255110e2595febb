// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::Strategy;
use crate::graph::ValueId;
use serde::{Deserialize, Serialize};

/// Byte range a planned value occupies inside the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArenaSpan {
    pub offset: usize,
    /// Aligned size; may exceed the size the value was registered with
    pub size: usize,
}

impl ArenaSpan {
    pub fn end(&self) -> usize {
        self.offset + self.size
    }
}

/// Result of planning: the arena size and where each value lives in it.
///
/// This is an owned copy of the tracker's final state. It stays valid after
/// the tracker is released and can be shared read-only by every thread that
/// binds `arena_base + offset` at inference time.
///
/// # Examples
/// ```
/// use memplan::config::Strategy;
/// use memplan::planner::{ArenaPlan, ArenaSpan};
///
/// let plan = ArenaPlan {
///     strategy: Strategy::Coalescing,
///     alignment: 1,
///     arena_size: 48,
///     spans: vec![Some(ArenaSpan { offset: 0, size: 32 }), None, Some(ArenaSpan { offset: 32, size: 16 })],
/// };
///
/// assert_eq!(plan.offset(2), Some(32));
/// assert_eq!(plan.offset(1), None);
/// assert_eq!(plan.planned_values().count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaPlan {
    pub strategy: Strategy,
    pub alignment: usize,
    pub arena_size: usize,
    /// Indexed by value id; `None` for values that were not planned
    pub spans: Vec<Option<ArenaSpan>>,
}

impl ArenaPlan {
    pub fn value_count(&self) -> usize {
        self.spans.len()
    }

    pub fn span(&self, value_id: ValueId) -> Option<ArenaSpan> {
        self.spans.get(value_id).copied().flatten()
    }

    pub fn offset(&self, value_id: ValueId) -> Option<usize> {
        self.span(value_id).map(|span| span.offset)
    }

    /// Planned values in ascending id order
    pub fn planned_values(&self) -> impl Iterator<Item = (ValueId, ArenaSpan)> + '_ {
        self.spans
            .iter()
            .enumerate()
            .filter_map(|(value_id, span)| span.map(|span| (value_id, span)))
    }

    /// Sum of all planned (aligned) sizes; what the arena would be without reuse
    pub fn total_planned_bytes(&self) -> usize {
        self.planned_values().map(|(_, span)| span.size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ArenaPlan {
        ArenaPlan {
            strategy: Strategy::Coalescing,
            alignment: 1,
            arena_size: 64,
            spans: vec![
                Some(ArenaSpan { offset: 0, size: 64 }),
                None,
                Some(ArenaSpan { offset: 0, size: 32 }),
            ],
        }
    }

    #[test]
    fn test_lookup_out_of_range_is_none() {
        let plan = sample();
        assert_eq!(plan.span(7), None);
        assert_eq!(plan.offset(0), Some(0));
    }

    #[test]
    fn test_total_planned_bytes_counts_reuse_twice() {
        let plan = sample();
        assert_eq!(plan.total_planned_bytes(), 96);
        assert!(plan.total_planned_bytes() > plan.arena_size);
    }

    #[test]
    fn test_plan_serializes_to_json() {
        let plan = sample();
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["strategy"], "coalescing");
        assert_eq!(json["arena_size"], 64);
        assert_eq!(json["spans"][1], serde_json::Value::Null);
        assert_eq!(json["spans"][2]["size"], 32);

        let restored: ArenaPlan = serde_json::from_value(json).unwrap();
        assert_eq!(restored, plan);
    }
}
