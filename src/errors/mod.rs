// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod planner;
mod validation;

pub use config::ConfigError;
pub use planner::PlannerError;
pub use validation::ValidationError;
