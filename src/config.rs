// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh generation configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const CONFIG_FILE: &str = "citymesh.toml";

/// Mesh generation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Regenerate objects on the rayon thread pool
    pub parallel: bool,
    /// Emit wireframe edges for interior rings too
    pub hole_edges: bool,
    /// Log filter used by the command line when RUST_LOG is unset
    pub log_level: String,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            hole_edges: false,
            log_level: "warn".to_string(),
        }
    }
}

impl MeshConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: MeshConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load `citymesh.toml` if present, then apply environment variable overrides
    pub fn load() -> Result<Self> {
        let config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        Ok(config.with_env_overrides())
    }

    /// Apply `CITYMESH_PARALLEL`, `CITYMESH_HOLE_EDGES` and `CITYMESH_LOG`
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(parallel) = std::env::var("CITYMESH_PARALLEL") {
            self.parallel = parallel.parse().unwrap_or(false);
        }

        if let Ok(hole_edges) = std::env::var("CITYMESH_HOLE_EDGES") {
            self.hole_edges = hole_edges.parse().unwrap_or(false);
        }

        if let Ok(level) = std::env::var("CITYMESH_LOG") {
            self.log_level = level;
        }

        self
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }
}
