// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{DEFAULT_ALIGNMENT, MAX_ALIGNMENT};
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Start-up configuration for the memory planner.
///
/// The strategy is chosen once, when the planner is configured, and applies to
/// every tracker built from this config. It is typically loaded from a YAML or
/// TOML file next to the rest of the runtime configuration.
///
/// # Fields
/// * `strategy` - Which interval allocator to run (optional, defaults to coalescing)
/// * `alignment` - Byte multiple every planned size is rounded up to (optional, defaults to 1)
/// * `limits` - Optional upper bounds on node arity
///
/// # Example
/// ```yaml
/// strategy: coalescing
/// alignment: 16
/// limits:
///   max_node_inputs: 5
///   max_node_outputs: 4
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default = "default_alignment")]
    pub alignment: usize,
    #[serde(default)]
    pub limits: GraphLimits,
}

fn default_alignment() -> usize {
    DEFAULT_ALIGNMENT
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            alignment: DEFAULT_ALIGNMENT,
            limits: GraphLimits::default(),
        }
    }
}

impl PlannerConfig {
    /// Check the config values that serde cannot express.
    ///
    /// Alignment must be a power of two no larger than [`MAX_ALIGNMENT`], and
    /// arity limits, when present, must be non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.alignment.is_power_of_two() || self.alignment > MAX_ALIGNMENT {
            return Err(ConfigError::InvalidAlignment {
                alignment: self.alignment,
                maximum: MAX_ALIGNMENT,
            });
        }
        if self.limits.max_node_inputs == Some(0) {
            return Err(ConfigError::InvalidLimit {
                name: "max_node_inputs",
            });
        }
        if self.limits.max_node_outputs == Some(0) {
            return Err(ConfigError::InvalidLimit {
                name: "max_node_outputs",
            });
        }
        Ok(())
    }
}

/// Interval allocation strategy.
///
/// # Variants
/// * `Coalescing` - Largest values first, first-fit reuse of offsets across disjoint lifetimes
/// * `Naive` - Values laid out back to back in id order, no reuse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    Coalescing,
    Naive,
}

/// Optional upper bounds on how many values a single node may reference.
///
/// Nodes are stored with growable input and output lists; these limits exist
/// for executors that still need a fixed bound per node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GraphLimits {
    pub max_node_inputs: Option<usize>,
    pub max_node_outputs: Option<usize>,
}

/// Load a config from a YAML or TOML file, picked by extension
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PlannerConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let cfg = match extension.as_deref() {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
        Some("toml") => toml::from_str(&content)?,
        _ => {
            return Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };
    Ok(cfg)
}

/// Load a config and check its values before handing it to the planner
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<PlannerConfig, ConfigError> {
    let cfg = load_config(path)?;
    cfg.validate()?;
    Ok(cfg)
}
