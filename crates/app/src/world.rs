//! Runs both generation pipelines and spawns their meshes.

use bevy::prelude::*;

use worldgen::{
    generate_island, generate_voxel_terrain, GenerationError, IslandMeshes,
    ScalarFieldGenerator, TerrainMesh, WorldGenSettings,
};

/// Marker for entities carrying generated terrain.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerrainPart {
    IslandTerrain,
    IslandWater,
    IslandEdges,
    VoxelTerrain,
}

impl TerrainPart {
    pub fn label(self) -> &'static str {
        match self {
            TerrainPart::IslandTerrain => "Terrain",
            TerrainPart::IslandWater => "Water",
            TerrainPart::IslandEdges => "Terrain Edges",
            TerrainPart::VoxelTerrain => "Voxel Terrain",
        }
    }
}

/// Region colors of the generated island, for texture painting.
#[derive(Resource, Debug, Clone, Default)]
pub struct IslandColorMap {
    pub side_length: usize,
    pub colors: Vec<[f32; 4]>,
}

/// Both pipelines with one generator, so a seed fixes the whole world.
pub fn build_world(
    settings: &WorldGenSettings,
) -> Result<(IslandMeshes, TerrainMesh), GenerationError> {
    let mut generator = match settings.seed {
        Some(seed) => ScalarFieldGenerator::from_seed(seed),
        None => ScalarFieldGenerator::new(),
    };
    let island = generate_island(&settings.grid, &mut generator)?;
    let voxels = generate_voxel_terrain(&settings.voxel, &mut generator)?;
    Ok((island, voxels))
}

pub fn generate_world(
    mut commands: Commands,
    settings: Option<Res<WorldGenSettings>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut exit: EventWriter<AppExit>,
) {
    // Settings failed to load; the exit is already queued.
    let Some(settings) = settings else {
        return;
    };

    let (island, voxels) = match build_world(&settings) {
        Ok(world) => world,
        Err(e) => {
            error!("World generation failed: {}", e);
            exit.send(AppExit::error());
            return;
        }
    };

    let water_transform = island.water_transform();
    let total_vertices = island.total_vertices() + voxels.vertex_count();
    let parts = [
        (TerrainPart::IslandTerrain, island.terrain, Transform::IDENTITY),
        (TerrainPart::IslandWater, island.water, water_transform),
        (TerrainPart::IslandEdges, island.edges, Transform::IDENTITY),
        (TerrainPart::VoxelTerrain, voxels, Transform::IDENTITY),
    ];
    for (part, mesh, transform) in parts {
        if mesh.is_empty() {
            warn!("{} mesh is empty", part.label());
        }
        commands.spawn((
            Name::new(part.label()),
            part,
            Mesh3d(meshes.add(Mesh::from(mesh))),
            transform,
        ));
    }

    commands.insert_resource(IslandColorMap {
        side_length: island.side_length,
        colors: island.color_map,
    });
    info!("World generated: {} vertices", total_vertices);
}

/// Headless runs stop once the world exists.
pub fn exit_when_generated(
    color_map: Option<Res<IslandColorMap>>,
    parts: Query<&TerrainPart>,
    mut exit: EventWriter<AppExit>,
) {
    if let Some(color_map) = color_map {
        debug!(
            "Color map {}x{} ready ({} cells), {} terrain entities",
            color_map.side_length,
            color_map.side_length,
            color_map.colors.len(),
            parts.iter().count()
        );
    }
    exit.send(AppExit::Success);
}
