// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::{PlannerConfig, Strategy};
use crate::engine::coalescing::CoalescingAllocator;
use crate::engine::naive::NaiveAllocator;
use crate::traits::AllocationStrategy;

/// Factory for creating interval allocators from configuration
pub struct StrategyFactory;

impl StrategyFactory {
    /// Create the allocator selected by the configuration
    pub fn from_config(cfg: &PlannerConfig) -> Box<dyn AllocationStrategy> {
        Self::from_strategy(cfg.strategy)
    }

    pub fn from_strategy(strategy: Strategy) -> Box<dyn AllocationStrategy> {
        match strategy {
            Strategy::Coalescing => Box::new(CoalescingAllocator::new()),
            Strategy::Naive => Box::new(NaiveAllocator::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_honours_strategy() {
        let cfg = PlannerConfig {
            strategy: Strategy::Naive,
            ..PlannerConfig::default()
        };
        let allocator = StrategyFactory::from_config(&cfg);
        assert_eq!(allocator.kind(), Strategy::Naive);
        assert_eq!(allocator.name(), "naive");

        let allocator = StrategyFactory::from_config(&PlannerConfig::default());
        assert_eq!(allocator.kind(), Strategy::Coalescing);
    }
}
