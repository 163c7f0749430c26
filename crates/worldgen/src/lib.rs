//! Procedural terrain meshing: heightmap islands with stepped regions, and
//! terraced voxel terrain through marching cubes.

use bevy::prelude::*;

pub mod config;
pub mod drawers;
pub mod error;
pub mod height_grid;
pub mod marching_cubes;
pub mod mesh_buffers;
pub mod noise_field;
pub mod regions;
pub mod voxel_field;

pub use config::{GridConfig, VoxelConfig, WorldGenSettings};
pub use drawers::HeightmapDrawer;
pub use error::{ConfigError, GenerationError};
pub use height_grid::HeightGrid;
pub use marching_cubes::MarchingCubes;
pub use mesh_buffers::{MeshBuffers, TerrainMesh};
pub use noise_field::ScalarFieldGenerator;

use config::WATER_SURFACE_OFFSET;

/// The three meshes of one island plus the data to paint its texture.
#[derive(Debug, Clone)]
pub struct IslandMeshes {
    pub terrain: TerrainMesh,
    pub water: TerrainMesh,
    pub edges: TerrainMesh,
    /// Per-cell region colors, row-major over `side_length x side_length`.
    pub color_map: Vec<[f32; 4]>,
    pub side_length: usize,
}

impl IslandMeshes {
    /// Placement of the water mesh relative to the terrain, which sits at the
    /// origin.
    pub fn water_transform(&self) -> Transform {
        Transform::from_xyz(0.0, WATER_SURFACE_OFFSET, 0.0)
    }

    pub fn total_vertices(&self) -> usize {
        self.terrain.vertex_count() + self.water.vertex_count() + self.edges.vertex_count()
    }
}

/// Heightmap pipeline: noise, falloff, classification, then the terrain,
/// water and edge drawers over the same grid.
pub fn generate_island(
    config: &GridConfig,
    generator: &mut ScalarFieldGenerator,
) -> Result<IslandMeshes, GenerationError> {
    let grid = HeightGrid::generate(config, generator)?;
    Ok(draw_island(&grid))
}

/// Run every heightmap drawer over an already classified grid.
pub fn draw_island(grid: &HeightGrid) -> IslandMeshes {
    let meshes = IslandMeshes {
        terrain: HeightmapDrawer::Terrain.draw(grid),
        water: HeightmapDrawer::Water.draw(grid),
        edges: HeightmapDrawer::EdgeWall.draw(grid),
        color_map: grid.color_map(),
        side_length: grid.side_length(),
    };
    info!(
        "Island {}x{}: terrain {} tris, water {} tris, edges {} tris",
        grid.side_length(),
        grid.side_length(),
        meshes.terrain.triangle_count(),
        meshes.water.triangle_count(),
        meshes.edges.triangle_count()
    );
    meshes
}

/// Voxel pipeline: terraced 3D density field, then marching cubes.
pub fn generate_voxel_terrain(
    config: &VoxelConfig,
    generator: &mut ScalarFieldGenerator,
) -> Result<TerrainMesh, GenerationError> {
    config.validate()?;

    let field = generator.noise_3d(
        config.resolution,
        config.terrace_height,
        config.noise_scale,
        config.width,
        config.voxel_height(),
    );
    let (sx, sy, sz) = field.dimensions();
    debug!("Voxel field {}x{}x{} sampled", sx, sy, sz);

    let mesh = MarchingCubes::from_config(config).extract(&field);
    info!(
        "Voxel terrain {}x{}x{} ({}): {} tris",
        config.width,
        config.voxel_height(),
        config.width,
        if config.smooth_terrain { "smooth" } else { "flat" },
        mesh.triangle_count()
    );
    Ok(mesh)
}
