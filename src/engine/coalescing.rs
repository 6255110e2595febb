// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::Strategy;
use crate::errors::PlannerError;
use crate::traits::{AllocationRequest, AllocationStrategy};

/// Coalescing allocator that lets values with disjoint lifetimes share bytes.
///
/// Values are placed largest first (ties broken by ascending value id). Each
/// value takes the lowest offset whose span does not collide with any
/// already-placed value that is live at the same time. Values that are never
/// live together do not constrain each other at all, so they are free to land
/// on the same bytes.
///
/// ## Placement Search
///
/// For each value, the already-placed spans are filtered down to those whose
/// lifetime overlaps the value's lifetime, sorted by offset, and scanned left
/// to right starting at offset 0. The first gap wide enough wins; if none is,
/// the value goes right after the furthest conflicting span.
///
/// ## Complexity
/// - **Time**: O(V² log V) in the worst case, where every value conflicts with every other
/// - **Space**: O(V) for the placed spans and per-value conflict list
///
/// The result is usually close to the peak number of simultaneously live
/// bytes, which is a lower bound for any valid plan.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoalescingAllocator;

/// A value that already has an offset
#[derive(Debug, Clone, Copy)]
struct PlacedSpan {
    request: AllocationRequest,
    offset: usize,
    end: usize,
}

impl CoalescingAllocator {
    pub fn new() -> Self {
        Self
    }

    /// Indices into `requests` in placement order: size descending, then value id ascending
    fn placement_order(requests: &[AllocationRequest]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..requests.len()).collect();
        order.sort_by(|&a, &b| {
            requests[b]
                .size
                .cmp(&requests[a].size)
                .then(requests[a].value_id.cmp(&requests[b].value_id))
        });
        order
    }

    /// Lowest offset where `size` bytes fit between `conflicts`.
    ///
    /// `conflicts` must be sorted by start offset; spans may overlap each other.
    fn first_fit(conflicts: &[(usize, usize)], size: usize) -> Option<usize> {
        let mut cursor = 0usize;
        for &(start, end) in conflicts {
            if cursor.checked_add(size)? <= start {
                break;
            }
            cursor = cursor.max(end);
        }
        Some(cursor)
    }
}

impl AllocationStrategy for CoalescingAllocator {
    fn allocate(&self, requests: &[AllocationRequest]) -> Result<Vec<usize>, PlannerError> {
        let mut offsets = vec![0usize; requests.len()];
        let mut placed: Vec<PlacedSpan> = Vec::with_capacity(requests.len());
        let mut conflicts: Vec<(usize, usize)> = Vec::with_capacity(requests.len());

        for index in Self::placement_order(requests) {
            let request = requests[index];

            conflicts.clear();
            conflicts.extend(
                placed
                    .iter()
                    .filter(|span| span.request.usage.overlaps(&request.usage))
                    .map(|span| (span.offset, span.end)),
            );
            conflicts.sort_unstable();

            let overflow = PlannerError::ArenaOverflow {
                value_id: request.value_id,
            };
            let offset = Self::first_fit(&conflicts, request.size).ok_or(overflow.clone())?;
            let end = offset.checked_add(request.size).ok_or(overflow)?;

            offsets[index] = offset;
            placed.push(PlacedSpan {
                request,
                offset,
                end,
            });
        }

        Ok(offsets)
    }

    fn kind(&self) -> Strategy {
        Strategy::Coalescing
    }

    fn name(&self) -> &'static str {
        "coalescing"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::ValueUsage;

    fn request(value_id: usize, first: usize, last: usize, size: usize) -> AllocationRequest {
        AllocationRequest::new(value_id, ValueUsage::new(first, last), size)
    }

    #[test]
    fn test_empty_request_list() {
        let offsets = CoalescingAllocator::new().allocate(&[]).unwrap();
        assert!(offsets.is_empty());
    }

    #[test]
    fn test_disjoint_lifetimes_share_offset_zero() {
        let requests = [request(0, 0, 0, 64), request(1, 1, 1, 32), request(2, 2, 2, 16)];
        let offsets = CoalescingAllocator::new().allocate(&requests).unwrap();
        assert_eq!(offsets, vec![0, 0, 0]);
    }

    #[test]
    fn test_touching_lifetimes_do_not_alias() {
        // both live at node 1
        let requests = [request(0, 0, 1, 16), request(1, 1, 2, 16)];
        let offsets = CoalescingAllocator::new().allocate(&requests).unwrap();
        assert_eq!(offsets, vec![0, 16]);
    }

    #[test]
    fn test_equal_sizes_place_lower_id_first() {
        let requests = [request(0, 0, 3, 8), request(1, 0, 3, 8), request(2, 0, 3, 8)];
        let offsets = CoalescingAllocator::new().allocate(&requests).unwrap();
        assert_eq!(offsets, vec![0, 8, 16]);
    }

    #[test]
    fn test_fills_gap_between_conflicting_spans() {
        // 0 and 2 are placed first at [0,40) and [40,80); 1 only overlaps 2, so it drops into [0,20)
        let requests = [request(0, 0, 1, 40), request(1, 2, 3, 20), request(2, 1, 2, 40)];
        let offsets = CoalescingAllocator::new().allocate(&requests).unwrap();
        assert_eq!(offsets, vec![0, 0, 40]);
    }

    #[test]
    fn test_first_fit_skips_nested_spans() {
        let conflicts = [(0, 100), (10, 20), (100, 110)];
        assert_eq!(CoalescingAllocator::first_fit(&conflicts, 5), Some(110));
        assert_eq!(CoalescingAllocator::first_fit(&[(10, 20)], 10), Some(0));
        assert_eq!(CoalescingAllocator::first_fit(&[(10, 20)], 11), Some(20));
        assert_eq!(CoalescingAllocator::first_fit(&[], 4), Some(0));
    }

    #[test]
    fn test_overflow_is_reported() {
        let requests = [request(0, 0, 0, usize::MAX), request(1, 0, 0, 2)];
        let result = CoalescingAllocator::new().allocate(&requests);
        assert_eq!(result, Err(PlannerError::ArenaOverflow { value_id: 1 }));
    }
}
