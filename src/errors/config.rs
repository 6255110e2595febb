// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for loading and validating planner configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a [`PlannerConfig`](crate::config::PlannerConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The YAML document did not match the config schema
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The TOML document did not match the config schema
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// The file extension is not one of the supported formats
    #[error("unsupported config format for '{path}' (expected .yaml, .yml or .toml)")]
    UnsupportedFormat { path: PathBuf },

    /// Alignment must be a power of two within the supported bounds
    #[error("alignment {alignment} must be a power of two between 1 and {maximum}")]
    InvalidAlignment { alignment: usize, maximum: usize },

    /// A node arity limit was configured as zero
    #[error("limit '{name}' must be greater than zero")]
    InvalidLimit { name: &'static str },
}
