// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod liveness;
mod plan;
mod tracker;
mod usage;


pub use liveness::{analyze_liveness, peak_live_bytes};
pub use plan::{ArenaPlan, ArenaSpan};
pub use tracker::{AllocationTracker, TrackerState};
pub use usage::ValueUsage;
