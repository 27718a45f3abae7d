//! `roadmap.toml` configuration
//!
//! Every field is optional. Command-line flags override whatever the file
//! sets.
//!
//! ```toml
//! granularity = "quarter"
//! width = 1280
//! zoom = 1.5
//!
//! [filters]
//! status = "active"
//! team = "web"
//! assignee = "unassigned"
//!
//! [export]
//! bom = true
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use roadmap_core::Granularity;
use roadmap_layout::RoadmapFilters;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "roadmap.toml";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoadmapConfig {
    pub granularity: Option<Granularity>,
    /// Viewport width in pixels
    pub width: Option<f64>,
    /// Explicit timeline container width in pixels
    pub container_width: Option<f64>,
    pub zoom: Option<f64>,
    pub filters: RoadmapFilters,
    pub export: ExportConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Prefix CSV output with a UTF-8 byte-order mark
    pub bom: bool,
}

impl RoadmapConfig {
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).context("invalid roadmap configuration")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        let config = Self::from_toml(&source).with_context(|| format!("in {}", path.display()))?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load `explicit` if given, else `roadmap.toml` from `dir` when it
    /// exists, else the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let fallback: PathBuf = dir.join(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            Self::load(&fallback)
        } else {
            Ok(Self::default())
        }
    }
}
