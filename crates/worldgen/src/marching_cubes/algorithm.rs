//! Cube-by-cube isosurface extraction over a [`VoxelField`].

use bevy::prelude::*;

use crate::config::VoxelConfig;
use crate::mesh_buffers::{MeshBuffers, TerrainMesh};
use crate::voxel_field::VoxelField;

use super::tables::{triangulation, CORNER_OFFSETS, EDGE_CORNERS};

/// Configuration with no corner above the iso level.
pub const EMPTY_CONFIGURATION: u8 = 0;
/// Configuration with every corner above the iso level.
pub const FULL_CONFIGURATION: u8 = 255;

/// 8-bit code of a cube: bit `i` is set when `cube[i] > iso_level`.
#[inline]
pub fn cube_configuration(cube: &[f32; 8], iso_level: f32) -> u8 {
    let mut configuration = 0u8;
    for (i, &density) in cube.iter().enumerate() {
        if density > iso_level {
            configuration |= 1 << i;
        }
    }
    configuration
}

/// Marching-cubes extractor for one voxel terrain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarchingCubes {
    /// Cubes along X and Z.
    pub width: usize,
    /// Cube layers along Y.
    pub height: usize,
    /// Voxel layers per world unit; corner Y is divided by this.
    pub resolution: usize,
    pub iso_level: f32,
    /// Interpolate along edges instead of taking midpoints.
    pub smooth: bool,
    /// Subtracted from the interpolation parameter in smooth mode.
    pub smoothing_bias: f32,
}

impl MarchingCubes {
    pub fn from_config(config: &VoxelConfig) -> Self {
        Self {
            width: config.width,
            height: config.voxel_height(),
            resolution: config.resolution,
            iso_level: config.iso_level,
            smooth: config.smooth_terrain,
            smoothing_bias: config.smoothing_bias,
        }
    }

    /// Walk every cube (x outer, y middle, z inner) and collect the surface.
    ///
    /// Panics if `field` does not cover `(width + 1) x (height + 1) x (width + 1)`
    /// lattice points.
    pub fn extract(&self, field: &VoxelField) -> TerrainMesh {
        let (size_x, size_y, size_z) = field.dimensions();
        assert!(
            size_x > self.width && size_y > self.height && size_z > self.width,
            "voxel field {size_x}x{size_y}x{size_z} too small for {}x{}x{} cubes",
            self.width,
            self.height,
            self.width
        );

        let mut buffers = MeshBuffers::new();
        for x in 0..self.width {
            for y in 0..self.height {
                for z in 0..self.width {
                    self.march_cube(field, UVec3::new(x as u32, y as u32, z as u32), &mut buffers);
                }
            }
        }
        buffers.finish()
    }

    /// Emit the triangles of the cube whose lowest corner is `origin`.
    pub fn march_cube(&self, field: &VoxelField, origin: UVec3, buffers: &mut MeshBuffers) {
        let corners = CORNER_OFFSETS.map(|[dx, dy, dz]| {
            [
                origin.x as usize + dx,
                origin.y as usize + dy,
                origin.z as usize + dz,
            ]
        });
        let cube = corners.map(|[x, y, z]| field.sample(x, y, z));

        let configuration = cube_configuration(&cube, self.iso_level);
        if configuration == EMPTY_CONFIGURATION || configuration == FULL_CONFIGURATION {
            return;
        }

        for &edge in triangulation(configuration) {
            let [first, second] = EDGE_CORNERS[edge as usize];
            let p1 = self.corner_position(corners[first]);
            let p2 = self.corner_position(corners[second]);
            let vertex = self.edge_vertex(p1, p2, cube[first], cube[second]);
            buffers.push_vertex(vertex, self.planar_uv(vertex));
        }
    }

    /// World position of a lattice point, with Y compressed by the resolution.
    #[inline]
    fn corner_position(&self, [x, y, z]: [usize; 3]) -> Vec3 {
        Vec3::new(x as f32, y as f32 / self.resolution as f32, z as f32)
    }

    /// Surface crossing between two corners.
    ///
    /// Flat mode takes the midpoint. Smooth mode uses
    /// `t = (iso - d1) / (d2 - d1)` and places the vertex at
    /// `p1 + (p2 - p1) * (t - smoothing_bias)`; when `d1 == d2`, `t` is the
    /// iso level itself.
    pub fn edge_vertex(&self, p1: Vec3, p2: Vec3, d1: f32, d2: f32) -> Vec3 {
        if !self.smooth {
            return (p1 + p2) / 2.0;
        }

        let difference = d2 - d1;
        let t = if difference == 0.0 {
            self.iso_level
        } else {
            (self.iso_level - d1) / difference
        };
        p1 + (p2 - p1) * (t - self.smoothing_bias)
    }

    /// Top-down projection onto the `[0, 1]` square of the terrain footprint.
    #[inline]
    fn planar_uv(&self, vertex: Vec3) -> Vec2 {
        Vec2::new(vertex.x, vertex.z) / self.width as f32
    }
}
