use crate::config::Strategy;
use crate::errors::PlannerError;
use crate::graph::ValueId;
use crate::planner::ValueUsage;

/// One value that needs arena storage.
///
/// `size` is already rounded up to the tracker's alignment and is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationRequest {
    pub value_id: ValueId,
    pub usage: ValueUsage,
    pub size: usize,
}

impl AllocationRequest {
    pub fn new(value_id: ValueId, usage: ValueUsage, size: usize) -> Self {
        Self {
            value_id,
            usage,
            size,
        }
    }
}

pub trait AllocationStrategy: Send + Sync {
    /// Assign an arena offset to every request.
    ///
    /// - `requests`: values to place, in ascending value id order
    ///
    /// Returns one offset per request, index-aligned with `requests`.
    /// Implementations must be deterministic: the same requests always
    /// produce the same offsets.
    fn allocate(&self, requests: &[AllocationRequest]) -> Result<Vec<usize>, PlannerError>;

    /// Which configured strategy this is
    fn kind(&self) -> Strategy;

    fn name(&self) -> &'static str;
}
