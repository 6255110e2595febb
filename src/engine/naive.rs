// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::Strategy;
use crate::errors::PlannerError;
use crate::traits::{AllocationRequest, AllocationStrategy};

/// Sequential allocator that never reuses bytes.
///
/// Values are laid out back to back in ascending value id order, each starting
/// where the previous one ends. Lifetimes are ignored, so the arena is exactly
/// the sum of all planned (aligned) sizes. Offsets depend only on the sizes of
/// lower-numbered values, which makes them trivially reproducible.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveAllocator;

impl NaiveAllocator {
    pub fn new() -> Self {
        Self
    }
}

impl AllocationStrategy for NaiveAllocator {
    fn allocate(&self, requests: &[AllocationRequest]) -> Result<Vec<usize>, PlannerError> {
        let mut cursor = 0usize;
        let mut offsets = Vec::with_capacity(requests.len());
        for request in requests {
            offsets.push(cursor);
            cursor = cursor
                .checked_add(request.size)
                .ok_or(PlannerError::ArenaOverflow {
                    value_id: request.value_id,
                })?;
        }
        Ok(offsets)
    }

    fn kind(&self) -> Strategy {
        Strategy::Naive
    }

    fn name(&self) -> &'static str {
        "naive"
    }
}
