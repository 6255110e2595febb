// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;     // planner config + loader
pub mod engine;     // interval allocation strategies
pub mod errors;     // error handling
pub mod graph;      // graph descriptor + precondition checks
pub mod observability;
pub mod planner;    // liveness + allocation tracker
pub mod traits;     // strategy abstraction
