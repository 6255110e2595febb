pub mod coalescing;
pub mod factory;
pub mod naive;

pub use coalescing::CoalescingAllocator;
pub use factory::StrategyFactory;
pub use naive::NaiveAllocator;
