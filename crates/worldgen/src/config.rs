//! Generation constants and the serializable settings consumed by both
//! pipelines.
//!
//! Defaults mirror the values the island and voxel generators were tuned
//! with. Every config struct validates itself before a pipeline samples any
//! noise.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, GenerationError};
use crate::regions::RegionTable;

// ---------------------------------------------------------------------------
// Heightmap island defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_BASE_SIZE: usize = 200;
pub const DEFAULT_RESOLUTION: usize = 1;
pub const DEFAULT_NOISE_SCALE: f32 = 0.1;
pub const DEFAULT_FALLOFF_A: f32 = 3.0;
pub const DEFAULT_FALLOFF_B: f32 = 2.2;
pub const DEFAULT_REGION_HEIGHT_SCALE: f32 = 0.5;

/// Region name that carries water semantics.
pub const WATER_REGION_NAME: &str = "Water";

/// Extra depth applied to a water neighbor when building edge walls, so the
/// wall reaches below the water surface quad.
pub const WATER_WALL_DEPTH: f32 = 1.0;

/// Vertical offset the host applies to the water mesh relative to the terrain.
pub const WATER_SURFACE_OFFSET: f32 = -0.5;

/// Noise offsets are drawn uniformly from `[-NOISE_OFFSET_RANGE, NOISE_OFFSET_RANGE)`.
pub const NOISE_OFFSET_RANGE: f32 = 10_000.0;

// ---------------------------------------------------------------------------
// Voxel terrain defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_VOXEL_RESOLUTION: usize = 1;
pub const DEFAULT_VOXEL_WIDTH: usize = 32;
pub const DEFAULT_VOXEL_WORLD_HEIGHT: usize = 8;
pub const DEFAULT_TERRACE_HEIGHT: f32 = 2.0;
pub const DEFAULT_VOXEL_NOISE_SCALE: f32 = 0.2;
pub const DEFAULT_ISO_LEVEL: f32 = 0.5;

/// Fraction subtracted from the interpolation parameter in smooth mode. Part of
/// the expected geometry, not a numerical guard.
pub const DEFAULT_SMOOTHING_BIAS: f32 = 0.01;

// ---------------------------------------------------------------------------
// Region configuration
// ---------------------------------------------------------------------------

/// One configured terrain band. World height is derived from its position in
/// the list, see [`RegionTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionConfig {
    pub name: String,
    /// Upper bound (inclusive) of the normalized height band.
    pub threshold: f32,
    /// sRGB color used for the region color map.
    pub color: [f32; 3],
}

impl RegionConfig {
    pub fn new(name: impl Into<String>, threshold: f32, color: [f32; 3]) -> Self {
        Self {
            name: name.into(),
            threshold,
            color,
        }
    }
}

pub fn default_regions() -> Vec<RegionConfig> {
    vec![
        RegionConfig::new(WATER_REGION_NAME, 0.4, [0.21, 0.45, 0.78]),
        RegionConfig::new("Sand", 0.45, [0.87, 0.82, 0.58]),
        RegionConfig::new("Grass", 0.7, [0.36, 0.62, 0.24]),
        RegionConfig::new("Forest", 0.85, [0.2, 0.42, 0.16]),
        RegionConfig::new("Rock", 1.0, [0.5, 0.47, 0.44]),
    ]
}

// ---------------------------------------------------------------------------
// Heightmap grid configuration
// ---------------------------------------------------------------------------

/// Parameters of the heightmap island pipeline.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Side length of the island in world units.
    pub base_size: usize,
    /// Cells per world unit along each axis.
    pub resolution: usize,
    pub noise_scale: f32,
    /// Ordered by ascending threshold.
    pub regions: Vec<RegionConfig>,
    /// Falloff curve exponent.
    pub falloff_a: f32,
    /// Falloff curve shoulder.
    pub falloff_b: f32,
    /// World-space height step between consecutive regions.
    pub region_height_scale: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            base_size: DEFAULT_BASE_SIZE,
            resolution: DEFAULT_RESOLUTION,
            noise_scale: DEFAULT_NOISE_SCALE,
            regions: default_regions(),
            falloff_a: DEFAULT_FALLOFF_A,
            falloff_b: DEFAULT_FALLOFF_B,
            region_height_scale: DEFAULT_REGION_HEIGHT_SCALE,
        }
    }
}

impl GridConfig {
    /// Number of cells along one side of the grid.
    pub fn side_length(&self) -> usize {
        self.base_size * self.resolution
    }

    /// Check every parameter and build the region table.
    pub fn validate(&self) -> Result<RegionTable, GenerationError> {
        require_extent("base_size", self.base_size)?;
        require_extent("resolution", self.resolution)?;
        require_finite("noise_scale", self.noise_scale)?;
        require_positive("falloff_a", self.falloff_a)?;
        require_finite("falloff_b", self.falloff_b)?;
        require_finite("region_height_scale", self.region_height_scale)?;
        RegionTable::new(&self.regions, self.region_height_scale)
    }
}

// ---------------------------------------------------------------------------
// Voxel configuration
// ---------------------------------------------------------------------------

/// Parameters of the marching-cubes pipeline.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoxelConfig {
    /// Voxel layers per world unit of height.
    pub resolution: usize,
    pub terrace_height: f32,
    pub noise_scale: f32,
    /// Cubes along the X and Z axes.
    pub width: usize,
    /// Terrain height in world units.
    pub world_height: usize,
    pub iso_level: f32,
    pub smooth_terrain: bool,
    pub smoothing_bias: f32,
}

impl Default for VoxelConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_VOXEL_RESOLUTION,
            terrace_height: DEFAULT_TERRACE_HEIGHT,
            noise_scale: DEFAULT_VOXEL_NOISE_SCALE,
            width: DEFAULT_VOXEL_WIDTH,
            world_height: DEFAULT_VOXEL_WORLD_HEIGHT,
            iso_level: DEFAULT_ISO_LEVEL,
            smooth_terrain: false,
            smoothing_bias: DEFAULT_SMOOTHING_BIAS,
        }
    }
}

impl VoxelConfig {
    /// Number of voxel layers the extractor walks (world height times resolution).
    pub fn voxel_height(&self) -> usize {
        self.world_height * self.resolution
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        require_extent("resolution", self.resolution)?;
        require_extent("width", self.width)?;
        require_extent("world_height", self.world_height)?;
        require_positive("terrace_height", self.terrace_height)?;
        require_finite("noise_scale", self.noise_scale)?;
        require_finite("iso_level", self.iso_level)?;
        require_finite("smoothing_bias", self.smoothing_bias)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Settings file
// ---------------------------------------------------------------------------

/// Everything a host needs to run both pipelines, loadable from JSON.
///
/// A missing `seed` means the noise offsets are drawn from entropy.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenSettings {
    pub seed: Option<u64>,
    pub grid: GridConfig,
    pub voxel: VoxelConfig,
}

impl WorldGenSettings {
    /// Parse and validate settings from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.grid.validate()?;
        settings.voxel.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn require_extent(field: &'static str, value: usize) -> Result<(), GenerationError> {
    if value == 0 {
        return Err(GenerationError::ZeroExtent { field });
    }
    Ok(())
}

fn require_finite(field: &'static str, value: f32) -> Result<(), GenerationError> {
    if !value.is_finite() {
        return Err(GenerationError::NonFinite { field, value });
    }
    Ok(())
}

fn require_positive(field: &'static str, value: f32) -> Result<(), GenerationError> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(GenerationError::NotPositive { field, value });
    }
    Ok(())
}
