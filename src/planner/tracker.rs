// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::time::Instant;

use crate::config::consts::DEFAULT_ALIGNMENT;
use crate::config::PlannerConfig;
use crate::engine::StrategyFactory;
use crate::errors::{ConfigError, PlannerError};
use crate::graph::{GraphDescriptor, ValueId};
use crate::observability::messages::planner::{
    PlanningCompleted, PlanningRejected, PlanningStarted, ValuePlaced, ValueSkipped,
};
use crate::observability::messages::StructuredLog;
use crate::planner::{analyze_liveness, peak_live_bytes, ArenaPlan, ArenaSpan, ValueUsage};
use crate::traits::{AllocationRequest, AllocationStrategy};

/// Lifecycle of an [`AllocationTracker`].
///
/// `Empty → Populated → Planned → Released`. `release` is allowed from every
/// state; everything else moves strictly forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackerState {
    /// Created, no per-value storage yet
    Empty,
    /// Storage allocated; usages and sizes are being recorded
    Populated,
    /// Offsets and arena size are final
    Planned,
    /// Storage freed; only the state can be queried
    Released,
}

/// Planning state for one graph compilation.
///
/// Holds, per value id, the usage interval, the byte size and (after
/// [`plan`](Self::plan)) the assigned offset, plus the arena size. The
/// allocation strategy is fixed when the tracker is built.
///
/// A tracker is meant to be driven by one compiling thread: it is mutated only
/// through `&mut self`, and the [`ArenaPlan`] it returns is the piece that gets
/// shared afterwards.
///
/// # Examples
/// ```
/// use memplan::config::PlannerConfig;
/// use memplan::graph::{GraphDescriptor, Node};
/// use memplan::planner::AllocationTracker;
///
/// let mut graph = GraphDescriptor::new(3);
/// graph.push_node(Node::new(vec![0], vec![1]));
/// graph.push_node(Node::new(vec![1], vec![2]));
///
/// let mut tracker = AllocationTracker::from_config(&PlannerConfig::default()).unwrap();
/// tracker.init_from_graph(&graph).unwrap();
/// tracker.add_size(0, 64).unwrap();
/// tracker.add_size(1, 32).unwrap();
/// tracker.add_size(2, 64).unwrap();
///
/// let plan = tracker.plan().unwrap();
/// tracker.release();
///
/// // value 0 and value 2 are never live together
/// assert_eq!(plan.offset(0), plan.offset(2));
/// assert_eq!(plan.arena_size, 96);
/// ```
pub struct AllocationTracker {
    strategy: Box<dyn AllocationStrategy>,
    alignment: usize,
    state: TrackerState,
    usage: Vec<Option<ValueUsage>>,
    sizes: Vec<usize>,
    offsets: Vec<Option<usize>>,
    arena_size: usize,
}

impl AllocationTracker {
    /// Create an empty tracker that plans with `strategy` and no size padding
    pub fn new(strategy: Box<dyn AllocationStrategy>) -> Self {
        Self {
            strategy,
            alignment: DEFAULT_ALIGNMENT,
            state: TrackerState::Empty,
            usage: Vec::new(),
            sizes: Vec::new(),
            offsets: Vec::new(),
            arena_size: 0,
        }
    }

    /// Create an empty tracker with the strategy and alignment from `cfg`
    pub fn from_config(cfg: &PlannerConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let mut tracker = Self::new(StrategyFactory::from_config(cfg));
        tracker.alignment = cfg.alignment;
        Ok(tracker)
    }

    /// Allocate per-value storage for `value_count` values.
    ///
    /// Moves the tracker from `Empty` to `Populated`. Storage is reserved
    /// fallibly; a failed reservation leaves the tracker `Empty`.
    pub fn init(&mut self, value_count: usize) -> Result<(), PlannerError> {
        self.expect_state("init", TrackerState::Empty)?;

        let reserved = self
            .usage
            .try_reserve_exact(value_count)
            .and_then(|_| self.sizes.try_reserve_exact(value_count))
            .and_then(|_| self.offsets.try_reserve_exact(value_count));
        if reserved.is_err() {
            self.usage = Vec::new();
            self.sizes = Vec::new();
            self.offsets = Vec::new();
            return Err(self.reject("init", PlannerError::ResourceExhausted { value_count }));
        }

        self.usage.resize(value_count, None);
        self.sizes.resize(value_count, 0);
        self.offsets.resize(value_count, None);
        self.arena_size = 0;
        self.state = TrackerState::Populated;
        Ok(())
    }

    /// Initialize storage for `graph` and record the usage of every value it references
    pub fn init_from_graph(&mut self, graph: &GraphDescriptor) -> Result<(), PlannerError> {
        self.expect_state("init", TrackerState::Empty)?;
        let usage = analyze_liveness(graph).map_err(|e| self.reject("init", e))?;
        self.init(graph.value_count())?;
        self.install_usage(usage);
        Ok(())
    }

    /// Record the usage of every value `graph` references.
    ///
    /// The graph must declare exactly as many values as the tracker was
    /// initialized with.
    pub fn record_graph_usage(&mut self, graph: &GraphDescriptor) -> Result<(), PlannerError> {
        self.expect_state("record usage on", TrackerState::Populated)?;
        if graph.value_count() != self.usage.len() {
            let error = PlannerError::ValueCountMismatch {
                declared: graph.value_count(),
                expected: self.usage.len(),
            };
            return Err(self.reject("record usage on", error));
        }
        let usage = analyze_liveness(graph).map_err(|e| self.reject("record usage on", e))?;
        self.install_usage(usage);
        Ok(())
    }

    fn install_usage(&mut self, usage: Vec<Option<ValueUsage>>) {
        for (slot, computed) in self.usage.iter_mut().zip(usage) {
            if computed.is_some() {
                *slot = computed;
            }
        }
    }

    /// Install the usage interval for one value
    pub fn record_usage(&mut self, value_id: ValueId, usage: ValueUsage) -> Result<(), PlannerError> {
        self.expect_state("record usage on", TrackerState::Populated)?;
        self.check_value(value_id, "record usage on")?;
        if !usage.is_valid() {
            let error = PlannerError::InvalidUsage {
                value_id,
                first_node: usage.first_node,
                last_node: usage.last_node,
            };
            return Err(self.reject("record usage on", error));
        }
        self.usage[value_id] = Some(usage);
        Ok(())
    }

    /// Record how many bytes a value needs.
    ///
    /// The value must already have a usage. A size of zero is accepted and
    /// simply leaves the value out of the arena.
    pub fn add_size(&mut self, value_id: ValueId, byte_size: usize) -> Result<(), PlannerError> {
        self.expect_state("add size to", TrackerState::Populated)?;
        self.check_value(value_id, "add size to")?;
        if self.usage[value_id].is_none() {
            return Err(self.reject("add size to", PlannerError::SizeBeforeUsage { value_id }));
        }
        self.sizes[value_id] = byte_size;
        Ok(())
    }

    /// Assign offsets to every value with a usage and a non-zero size.
    ///
    /// Runs the configured strategy once, fixes the arena size and returns an
    /// owned copy of the result. Only valid from `Populated`; a tracker is
    /// planned at most once.
    pub fn plan(&mut self) -> Result<ArenaPlan, PlannerError> {
        self.expect_state("plan", TrackerState::Populated)?;
        let started = Instant::now();

        let requests = self.collect_requests().map_err(|e| self.reject("plan", e))?;

        let started_msg = PlanningStarted {
            strategy: self.strategy.name(),
            value_count: self.usage.len(),
            planned_count: requests.len(),
        };
        let _span = started_msg.span("plan").entered();
        started_msg.log();

        let offsets = self
            .strategy
            .allocate(&requests)
            .map_err(|e| self.reject("plan", e))?;

        let mut arena_size = 0usize;
        let mut spans: Vec<Option<ArenaSpan>> = vec![None; self.usage.len()];
        for (request, offset) in requests.iter().zip(offsets) {
            let span = ArenaSpan {
                offset,
                size: request.size,
            };
            ValuePlaced {
                value_id: request.value_id,
                offset,
                size: request.size,
            }
            .log();
            arena_size = arena_size.max(span.end());
            self.offsets[request.value_id] = Some(offset);
            spans[request.value_id] = Some(span);
        }
        self.arena_size = arena_size;
        self.state = TrackerState::Planned;

        PlanningCompleted {
            strategy: self.strategy.name(),
            arena_size,
            total_bytes: requests.iter().fold(0usize, |total, r| total.saturating_add(r.size)),
            lower_bound: peak_live_bytes(&requests),
            duration: started.elapsed(),
        }
        .log();

        Ok(ArenaPlan {
            strategy: self.strategy.kind(),
            alignment: self.alignment,
            arena_size,
            spans,
        })
    }

    /// Requests for every plannable value, in ascending id order, sizes aligned
    fn collect_requests(&self) -> Result<Vec<AllocationRequest>, PlannerError> {
        let mut requests = Vec::with_capacity(self.usage.len());
        for (value_id, (usage, &size)) in self.usage.iter().zip(&self.sizes).enumerate() {
            let Some(usage) = usage else {
                ValueSkipped {
                    value_id,
                    reason: "no usage",
                }
                .log();
                continue;
            };
            if size == 0 {
                ValueSkipped {
                    value_id,
                    reason: "zero size",
                }
                .log();
                continue;
            }
            let size = align_up(size, self.alignment).ok_or(PlannerError::ArenaOverflow { value_id })?;
            requests.push(AllocationRequest::new(value_id, *usage, size));
        }
        Ok(requests)
    }

    /// Free all per-value storage. Valid from every state.
    pub fn release(&mut self) {
        self.usage = Vec::new();
        self.sizes = Vec::new();
        self.offsets = Vec::new();
        self.arena_size = 0;
        self.state = TrackerState::Released;
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn value_count(&self) -> usize {
        self.usage.len()
    }

    pub fn alignment(&self) -> usize {
        self.alignment
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn usage(&self, value_id: ValueId) -> Option<ValueUsage> {
        self.usage.get(value_id).copied().flatten()
    }

    /// Size as recorded by `add_size`, before alignment
    pub fn size(&self, value_id: ValueId) -> Option<usize> {
        self.sizes.get(value_id).copied()
    }

    /// Assigned offset; `None` before planning or for values left out of the arena
    pub fn offset(&self, value_id: ValueId) -> Option<usize> {
        self.offsets.get(value_id).copied().flatten()
    }

    /// Arena size; zero until the tracker is planned
    pub fn arena_size(&self) -> usize {
        self.arena_size
    }

    fn expect_state(&self, operation: &'static str, expected: TrackerState) -> Result<(), PlannerError> {
        if self.state == expected {
            return Ok(());
        }
        Err(self.reject(
            operation,
            PlannerError::InvalidState {
                operation,
                state: self.state,
            },
        ))
    }

    fn check_value(&self, value_id: ValueId, operation: &'static str) -> Result<(), PlannerError> {
        if value_id < self.usage.len() {
            return Ok(());
        }
        Err(self.reject(
            operation,
            PlannerError::ValueOutOfRange {
                value_id,
                value_count: self.usage.len(),
            },
        ))
    }

    fn reject(&self, operation: &str, error: PlannerError) -> PlannerError {
        PlanningRejected {
            operation,
            error: &error,
        }
        .log();
        error
    }
}

impl std::fmt::Debug for AllocationTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AllocationTracker")
            .field("strategy", &self.strategy.name())
            .field("alignment", &self.alignment)
            .field("state", &self.state)
            .field("value_count", &self.usage.len())
            .field("arena_size", &self.arena_size)
            .finish()
    }
}

/// Round `size` up to a multiple of `alignment` (a power of two)
fn align_up(size: usize, alignment: usize) -> Option<usize> {
    let mask = alignment - 1;
    size.checked_add(mask).map(|padded| padded & !mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Strategy;
    use crate::graph::Node;

    fn tracker(strategy: Strategy) -> AllocationTracker {
        AllocationTracker::new(StrategyFactory::from_strategy(strategy))
    }

    #[test]
    fn test_new_tracker_is_empty() {
        let tracker = tracker(Strategy::Coalescing);
        assert_eq!(tracker.state(), TrackerState::Empty);
        assert_eq!(tracker.value_count(), 0);
        assert_eq!(tracker.arena_size(), 0);
        assert_eq!(tracker.strategy_name(), "coalescing");
    }

    #[test]
    fn test_init_allocates_unassigned_slots() {
        let mut tracker = tracker(Strategy::Coalescing);
        tracker.init(3).unwrap();
        assert_eq!(tracker.state(), TrackerState::Populated);
        assert_eq!(tracker.value_count(), 3);
        for value_id in 0..3 {
            assert_eq!(tracker.usage(value_id), None);
            assert_eq!(tracker.size(value_id), Some(0));
            assert_eq!(tracker.offset(value_id), None);
        }
    }

    #[test]
    fn test_init_twice_is_rejected() {
        let mut tracker = tracker(Strategy::Coalescing);
        tracker.init(1).unwrap();
        assert_eq!(
            tracker.init(1),
            Err(PlannerError::InvalidState {
                operation: "init",
                state: TrackerState::Populated
            })
        );
    }

    #[test]
    fn test_init_reports_exhaustion() {
        let mut tracker = tracker(Strategy::Coalescing);
        let result = tracker.init(usize::MAX);
        assert_eq!(
            result,
            Err(PlannerError::ResourceExhausted {
                value_count: usize::MAX
            })
        );
        assert_eq!(tracker.state(), TrackerState::Empty);
        tracker.init(2).unwrap();
    }

    #[test]
    fn test_operations_before_init_are_rejected() {
        let mut tracker = tracker(Strategy::Naive);
        assert!(matches!(
            tracker.record_usage(0, ValueUsage::at(0)),
            Err(PlannerError::InvalidState { .. })
        ));
        assert!(matches!(tracker.add_size(0, 8), Err(PlannerError::InvalidState { .. })));
        assert!(matches!(tracker.plan(), Err(PlannerError::InvalidState { .. })));
    }

    #[test]
    fn test_record_usage_validates_input() {
        let mut tracker = tracker(Strategy::Coalescing);
        tracker.init(2).unwrap();
        assert_eq!(
            tracker.record_usage(2, ValueUsage::at(0)),
            Err(PlannerError::ValueOutOfRange {
                value_id: 2,
                value_count: 2
            })
        );
        assert_eq!(
            tracker.record_usage(1, ValueUsage::new(3, 1)),
            Err(PlannerError::InvalidUsage {
                value_id: 1,
                first_node: 3,
                last_node: 1
            })
        );
        tracker.record_usage(1, ValueUsage::new(1, 3)).unwrap();
        assert_eq!(tracker.usage(1), Some(ValueUsage::new(1, 3)));
    }

    #[test]
    fn test_add_size_requires_usage() {
        let mut tracker = tracker(Strategy::Coalescing);
        tracker.init(2).unwrap();
        assert_eq!(
            tracker.add_size(0, 16),
            Err(PlannerError::SizeBeforeUsage { value_id: 0 })
        );
        tracker.record_usage(0, ValueUsage::at(0)).unwrap();
        tracker.add_size(0, 16).unwrap();
        assert_eq!(tracker.size(0), Some(16));
    }

    #[test]
    fn test_zero_size_and_unused_values_are_not_planned() {
        let mut tracker = tracker(Strategy::Coalescing);
        tracker.init(3).unwrap();
        tracker.record_usage(0, ValueUsage::at(0)).unwrap();
        tracker.record_usage(1, ValueUsage::at(0)).unwrap();
        tracker.add_size(0, 0).unwrap();
        tracker.add_size(1, 24).unwrap();

        let plan = tracker.plan().unwrap();
        assert_eq!(plan.offset(0), None);
        assert_eq!(plan.offset(1), Some(0));
        assert_eq!(plan.offset(2), None);
        assert_eq!(plan.arena_size, 24);
        assert_eq!(tracker.offset(0), None);
        assert_eq!(tracker.offset(1), Some(0));
    }

    #[test]
    fn test_empty_tracker_plans_zero_arena() {
        let mut tracker = tracker(Strategy::Coalescing);
        tracker.init(0).unwrap();
        let plan = tracker.plan().unwrap();
        assert_eq!(plan.arena_size, 0);
        assert!(plan.spans.is_empty());
    }

    #[test]
    fn test_plan_twice_is_rejected() {
        let mut tracker = tracker(Strategy::Naive);
        tracker.init(1).unwrap();
        tracker.record_usage(0, ValueUsage::at(0)).unwrap();
        tracker.add_size(0, 4).unwrap();
        tracker.plan().unwrap();
        assert_eq!(tracker.state(), TrackerState::Planned);
        assert_eq!(
            tracker.plan(),
            Err(PlannerError::InvalidState {
                operation: "plan",
                state: TrackerState::Planned
            })
        );
        assert!(matches!(tracker.add_size(0, 8), Err(PlannerError::InvalidState { .. })));
    }

    #[test]
    fn test_release_from_any_state() {
        let mut empty = tracker(Strategy::Coalescing);
        empty.release();
        assert_eq!(empty.state(), TrackerState::Released);

        let mut planned = tracker(Strategy::Coalescing);
        planned.init(1).unwrap();
        planned.record_usage(0, ValueUsage::at(0)).unwrap();
        planned.add_size(0, 8).unwrap();
        let plan = planned.plan().unwrap();
        planned.release();

        assert_eq!(planned.state(), TrackerState::Released);
        assert_eq!(planned.value_count(), 0);
        assert_eq!(planned.arena_size(), 0);
        assert_eq!(planned.offset(0), None);
        // the copied-out plan survives release
        assert_eq!(plan.arena_size, 8);
        assert!(matches!(planned.init(1), Err(PlannerError::InvalidState { .. })));
    }

    #[test]
    fn test_init_from_graph_rejects_undeclared_value() {
        let graph = GraphDescriptor::from_nodes(2, vec![Node::new(vec![0], vec![4])]);
        let mut tracker = tracker(Strategy::Coalescing);
        assert_eq!(
            tracker.init_from_graph(&graph),
            Err(PlannerError::ValueOutOfRange {
                value_id: 4,
                value_count: 2
            })
        );
        assert_eq!(tracker.state(), TrackerState::Empty);
    }

    #[test]
    fn test_record_graph_usage_checks_value_count() {
        let graph = GraphDescriptor::from_nodes(3, vec![Node::new(vec![0], vec![1])]);
        let mut tracker = tracker(Strategy::Coalescing);
        tracker.init(5).unwrap();
        assert_eq!(
            tracker.record_graph_usage(&graph),
            Err(PlannerError::ValueCountMismatch {
                declared: 3,
                expected: 5
            })
        );
    }

    #[test]
    fn test_record_graph_usage_keeps_manual_usage_of_unreferenced_values() {
        let graph = GraphDescriptor::from_nodes(3, vec![Node::new(vec![0], vec![1])]);
        let mut tracker = tracker(Strategy::Coalescing);
        tracker.init(3).unwrap();
        tracker.record_usage(2, ValueUsage::new(4, 6)).unwrap();
        tracker.record_graph_usage(&graph).unwrap();
        assert_eq!(tracker.usage(0), Some(ValueUsage::at(0)));
        assert_eq!(tracker.usage(2), Some(ValueUsage::new(4, 6)));
    }

    #[test]
    fn test_alignment_pads_sizes() {
        let cfg = PlannerConfig {
            strategy: Strategy::Naive,
            alignment: 16,
            ..PlannerConfig::default()
        };
        let mut tracker = AllocationTracker::from_config(&cfg).unwrap();
        tracker.init(3).unwrap();
        for value_id in 0..3 {
            tracker.record_usage(value_id, ValueUsage::at(0)).unwrap();
        }
        tracker.add_size(0, 1).unwrap();
        tracker.add_size(1, 16).unwrap();
        tracker.add_size(2, 17).unwrap();

        let plan = tracker.plan().unwrap();
        assert_eq!(plan.alignment, 16);
        assert_eq!(plan.offset(0), Some(0));
        assert_eq!(plan.offset(1), Some(16));
        assert_eq!(plan.offset(2), Some(32));
        assert_eq!(plan.span(2).unwrap().size, 32);
        assert_eq!(plan.arena_size, 64);
        assert_eq!(tracker.size(2), Some(17));
    }

    #[test]
    fn test_from_config_rejects_invalid_alignment() {
        let cfg = PlannerConfig {
            alignment: 3,
            ..PlannerConfig::default()
        };
        assert!(matches!(
            AllocationTracker::from_config(&cfg),
            Err(ConfigError::InvalidAlignment { .. })
        ));
    }

    #[test]
    fn test_align_up() {
        assert_eq!(align_up(0, 8), Some(0));
        assert_eq!(align_up(1, 8), Some(8));
        assert_eq!(align_up(8, 8), Some(8));
        assert_eq!(align_up(9, 1), Some(9));
        assert_eq!(align_up(usize::MAX, 2), None);
    }

    #[test]
    fn test_tracker_can_move_to_another_thread() {
        fn assert_send<T: Send>() {}
        assert_send::<AllocationTracker>();
    }
}
