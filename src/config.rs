//! Layout files.
//!
//! A layout file is JSON describing the viewport defaults and the surfaces
//! to add, in order:
//!
//! ```json
//! {
//!   "width": 1280,
//!   "height": 720,
//!   "surfaces": [
//!     { "id": "main", "kind": "raster2d", "width": { "a": 1, "b": -20 } }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::surface::SurfaceConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read layout file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid layout: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate surface id: {0:?}")]
    DuplicateId(String),

    #[error("surface id must not be empty")]
    EmptyId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    /// Initial viewport width, also the default surface width.
    pub width: f64,
    /// Initial viewport height, also the default surface height.
    pub height: f64,
    #[serde(default)]
    pub surfaces: Vec<SurfaceConfig>,
}

impl LayoutConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: LayoutConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Surface ids are element ids on the host and must be unique.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for surface in &self.surfaces {
            if surface.id.is_empty() {
                return Err(ConfigError::EmptyId);
            }
            if !seen.insert(surface.id.as_str()) {
                return Err(ConfigError::DuplicateId(surface.id.clone()));
            }
        }
        Ok(())
    }
}
