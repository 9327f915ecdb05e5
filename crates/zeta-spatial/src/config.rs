//! Hash grid configuration.
//!
//! Parameters that control bucket count and voxel size. Loadable from
//! TOML so the CLI can share grid settings between runs.

use std::path::Path;

use serde::{Deserialize, Serialize};
use zeta_types::constants::{DEFAULT_NUM_BUCKETS, DEFAULT_VOXEL_SIZE, MIN_VOXEL_SIZE};
use zeta_types::{ZetaError, ZetaResult};

/// Configuration for a [`PointsHashGrid`](crate::PointsHashGrid).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashGridConfig {
    /// Number of hash buckets.
    pub num_buckets: usize,

    /// Voxel edge length. Should be on the order of the typical query radius;
    /// a radius many times larger than the voxel makes queries scan a large
    /// cube of voxels.
    pub voxel_size: f32,
}

impl Default for HashGridConfig {
    fn default() -> Self {
        Self {
            num_buckets: DEFAULT_NUM_BUCKETS,
            voxel_size: DEFAULT_VOXEL_SIZE,
        }
    }
}

impl HashGridConfig {
    /// Few large voxels, for sparse point sets and wide queries.
    pub fn coarse() -> Self {
        Self {
            num_buckets: 1024,
            voxel_size: 1.0,
        }
    }

    /// Many small voxels, for dense point sets and tight queries.
    pub fn fine() -> Self {
        Self {
            num_buckets: 65_536,
            voxel_size: 0.01,
        }
    }

    /// Checks the values a grid would otherwise silently coerce.
    pub fn validate(&self) -> ZetaResult<()> {
        if self.num_buckets == 0 {
            return Err(ZetaError::InvalidConfig(
                "num_buckets must be >= 1".into(),
            ));
        }
        if !self.voxel_size.is_finite() || self.voxel_size < MIN_VOXEL_SIZE {
            return Err(ZetaError::InvalidConfig(format!(
                "voxel_size must be a finite value >= {}, got {}",
                MIN_VOXEL_SIZE, self.voxel_size
            )));
        }
        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> ZetaResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| ZetaError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ZetaResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Renders as TOML.
    pub fn to_toml_string(&self) -> ZetaResult<String> {
        toml::to_string(self).map_err(|e| ZetaError::Serialization(e.to_string()))
    }
}
