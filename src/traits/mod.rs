pub mod strategy;

pub use strategy::{AllocationRequest, AllocationStrategy};
