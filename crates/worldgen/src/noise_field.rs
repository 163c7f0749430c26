//! Coherent noise fields for both pipelines.
//!
//! Each sampling call draws a fresh pair of offsets so successive fields are
//! decorrelated. The `*_with_offsets` variants take explicit offsets and are
//! fully deterministic.

use fastnoise_lite::{FastNoiseLite, NoiseType};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::NOISE_OFFSET_RANGE;
use crate::voxel_field::VoxelField;

/// Translation applied to the sampling coordinates of one field.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NoiseOffsets {
    pub x: f32,
    pub y: f32,
}

impl NoiseOffsets {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Square 2D field of `f32` values, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseMap {
    size: usize,
    values: Vec<f32>,
}

impl NoiseMap {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            values: vec![0.0; size * size],
        }
    }

    /// Build a map by evaluating `f(x, y)` for every sample.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut values = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                values.push(f(x, y));
            }
        }
        Self { size, values }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        assert!(
            x < self.size && y < self.size,
            "noise sample ({x}, {y}) outside {0}x{0} map",
            self.size
        );
        self.values[y * self.size + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        assert!(
            x < self.size && y < self.size,
            "noise sample ({x}, {y}) outside {0}x{0} map",
            self.size
        );
        self.values[y * self.size + x] = value;
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

/// Source of noise fields. Owns the RNG that picks per-call offsets.
pub struct ScalarFieldGenerator {
    noise: FastNoiseLite,
    rng: ChaCha8Rng,
    last_offsets: Option<NoiseOffsets>,
}

impl Default for ScalarFieldGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScalarFieldGenerator {
    /// Generator whose offsets come from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }

    /// Generator whose sequence of offsets is reproducible from `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(rng: ChaCha8Rng) -> Self {
        let mut noise = FastNoiseLite::new();
        noise.set_noise_type(Some(NoiseType::Perlin));
        // Callers pre-scale coordinates, so sample the lattice directly.
        noise.set_frequency(Some(1.0));
        Self {
            noise,
            rng,
            last_offsets: None,
        }
    }

    /// Offsets used by the most recent sampling call.
    pub fn last_offsets(&self) -> Option<NoiseOffsets> {
        self.last_offsets
    }

    /// Draw a fresh pair of offsets.
    pub fn next_offsets(&mut self) -> NoiseOffsets {
        NoiseOffsets::new(
            self.rng.gen_range(-NOISE_OFFSET_RANGE..NOISE_OFFSET_RANGE),
            self.rng.gen_range(-NOISE_OFFSET_RANGE..NOISE_OFFSET_RANGE),
        )
    }

    /// Noise in `[0, 1]` at an already scaled and offset coordinate.
    #[inline]
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        ((self.noise.get_noise_2d(x, y) + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    /// `size`x`size` map sampled at `(x * scale + ox, y * scale + oy)` with
    /// freshly drawn offsets.
    pub fn noise_2d(&mut self, scale: f32, size: usize) -> NoiseMap {
        let offsets = self.next_offsets();
        self.noise_2d_with_offsets(scale, size, offsets)
    }

    pub fn noise_2d_with_offsets(
        &mut self,
        scale: f32,
        size: usize,
        offsets: NoiseOffsets,
    ) -> NoiseMap {
        self.last_offsets = Some(offsets);
        NoiseMap::from_fn(size, |x, y| {
            self.sample(
                x as f32 * scale + offsets.x,
                y as f32 * scale + offsets.y,
            )
        })
    }

    /// Terraced density field for the marching-cubes pipeline, with freshly
    /// drawn offsets. `height` is the voxel layer count of the terrain.
    pub fn noise_3d(
        &mut self,
        resolution: usize,
        terrace_height: f32,
        scale: f32,
        width: usize,
        height: usize,
    ) -> VoxelField {
        let offsets = self.next_offsets();
        self.noise_3d_with_offsets(resolution, terrace_height, scale, width, height, offsets)
    }

    /// Density at `(x, y, z)` is `y - height * noise(x, z) + y % terrace_height`.
    ///
    /// The field only varies in X and Z through the 2D noise; Y enters through
    /// the height and terrace terms, so this is an extruded height field.
    /// `offsets.y` shifts the Z axis of the noise lookup.
    pub fn noise_3d_with_offsets(
        &mut self,
        resolution: usize,
        terrace_height: f32,
        scale: f32,
        width: usize,
        height: usize,
        offsets: NoiseOffsets,
    ) -> VoxelField {
        self.last_offsets = Some(offsets);

        let size_x = width + 1;
        let size_y = height + resolution;
        let size_z = width + 1;
        let mut field = VoxelField::new(size_x, size_y, size_z);

        for x in 0..size_x {
            for z in 0..size_z {
                let surface = height as f32
                    * self.sample(x as f32 * scale + offsets.x, z as f32 * scale + offsets.y);
                for y in 0..size_y {
                    let yf = y as f32;
                    field.set(x, y, z, yf - surface + yf % terrace_height);
                }
            }
        }
        field
    }
}
