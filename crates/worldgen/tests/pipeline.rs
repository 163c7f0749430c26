//! End-to-end tests for both generation pipelines.
//!
//! - Seeded islands are reproducible and well-formed
//! - Every mesh keeps vertices, uvs, normals and indices in lockstep
//! - Invalid configurations are rejected before any geometry is built
//! - Voxel terrain produces a closed-off surface in both vertex modes
//!
//! Run: cargo test -p worldgen --test pipeline

use bevy::prelude::*;

use worldgen::config::{default_regions, RegionConfig, WATER_SURFACE_OFFSET};
use worldgen::noise_field::NoiseMap;
use worldgen::regions::RegionTable;
use worldgen::{
    draw_island, generate_island, generate_voxel_terrain, GenerationError, GridConfig,
    HeightGrid, ScalarFieldGenerator, TerrainMesh, VoxelConfig, WorldGenSettings,
};

fn small_grid() -> GridConfig {
    GridConfig {
        base_size: 24,
        ..Default::default()
    }
}

fn small_voxels() -> VoxelConfig {
    VoxelConfig {
        width: 8,
        world_height: 6,
        ..Default::default()
    }
}

fn assert_well_formed(mesh: &TerrainMesh) {
    let n = mesh.vertex_count();
    assert_eq!(mesh.uvs.len(), n);
    assert_eq!(mesh.normals.len(), n);
    assert_eq!(mesh.indices.len() % 3, 0);
    assert_eq!(mesh.indices, (0..n as u32).collect::<Vec<_>>());
    for normal in &mesh.normals {
        let len = Vec3::from_array(*normal).length();
        assert!((len - 1.0).abs() < 1e-4, "normal {normal:?} not unit length");
    }
}

// ---------------------------------------------------------------------------
// Heightmap pipeline
// ---------------------------------------------------------------------------

#[test]
fn test_seeded_island_is_reproducible() {
    let config = small_grid();
    let first = generate_island(&config, &mut ScalarFieldGenerator::from_seed(7))
        .expect("default config is valid");
    let second = generate_island(&config, &mut ScalarFieldGenerator::from_seed(7))
        .expect("default config is valid");

    assert_eq!(first.terrain, second.terrain);
    assert_eq!(first.water, second.water);
    assert_eq!(first.edges, second.edges);
    assert_eq!(first.color_map, second.color_map);
}

#[test]
fn test_island_meshes_are_well_formed() {
    let config = small_grid();
    let island = generate_island(&config, &mut ScalarFieldGenerator::from_seed(42))
        .expect("default config is valid");

    assert_well_formed(&island.terrain);
    assert_well_formed(&island.water);
    assert_well_formed(&island.edges);

    let cells = config.side_length() * config.side_length();
    assert_eq!(island.side_length, config.side_length());
    assert_eq!(island.color_map.len(), cells);
    // Terrain and water between them cover every cell exactly once.
    assert_eq!(
        island.terrain.vertex_count() + island.water.vertex_count(),
        cells * 6
    );
    assert_eq!(island.water_transform().translation.y, WATER_SURFACE_OFFSET);
    assert_eq!(
        island.total_vertices(),
        cells * 6 + island.edges.vertex_count()
    );
}

#[test]
fn test_island_rim_sinks_into_water() {
    // The falloff reaches 1 at the border, so every border cell is water.
    let config = small_grid();
    let mut generator = ScalarFieldGenerator::from_seed(3);
    let grid = HeightGrid::generate(&config, &mut generator).expect("valid config");

    let side = grid.side_length();
    for i in 0..side {
        for (x, y) in [(i, 0), (0, i)] {
            assert!(grid.cell(x, y).is_water, "border cell ({x}, {y}) is land");
        }
    }
}

#[test]
fn test_higher_resolution_shrinks_cells() {
    let config = GridConfig {
        base_size: 8,
        resolution: 2,
        ..Default::default()
    };
    let grid = HeightGrid::generate(&config, &mut ScalarFieldGenerator::from_seed(1))
        .expect("valid config");
    assert_eq!(grid.cells().len(), 16 * 16);
    assert_eq!(grid.cell_size(), 0.5);

    let cell = grid.cell_at_world(Vec2::new(3.74, 1.2));
    assert_eq!((cell.x, cell.y), (7, 2));
}

#[test]
fn test_stepped_grid_edges_match_height_differences() {
    // Two columns of land above a column of sand: one wall per row.
    let regions = RegionTable::new(
        &[
            RegionConfig::new("Sand", 0.5, [1.0, 1.0, 0.0]),
            RegionConfig::new("Grass", 1.0, [0.0, 1.0, 0.0]),
        ],
        0.5,
    )
    .expect("valid table");
    let values = NoiseMap::from_fn(3, |x, _| if x == 2 { 0.2 } else { 0.9 });
    let grid = HeightGrid::classify(regions, 3, 1, &values).expect("valid grid");

    let island = draw_island(&grid);
    assert_eq!(island.edges.triangle_count(), 3 * 2);
    for normal in &island.edges.normals {
        assert!((Vec3::from_array(*normal) - Vec3::X).length() < 1e-5);
    }
    assert!(island.water.is_empty());
}

#[test]
fn test_invalid_grid_config_builds_nothing() {
    let mut generator = ScalarFieldGenerator::from_seed(5);

    let empty = GridConfig {
        regions: Vec::new(),
        ..small_grid()
    };
    assert_eq!(
        generate_island(&empty, &mut generator).unwrap_err(),
        GenerationError::NoRegions
    );

    let mut reversed = default_regions();
    reversed.reverse();
    let reversed = GridConfig {
        regions: reversed,
        ..small_grid()
    };
    assert!(matches!(
        generate_island(&reversed, &mut generator),
        Err(GenerationError::ThresholdsNotAscending { .. })
    ));

    // Validation runs before sampling, so no offsets were drawn.
    assert_eq!(generator.last_offsets(), None);
}

// ---------------------------------------------------------------------------
// Voxel pipeline
// ---------------------------------------------------------------------------

#[test]
fn test_voxel_terrain_flat_and_smooth() {
    for smooth_terrain in [false, true] {
        let config = VoxelConfig {
            smooth_terrain,
            ..small_voxels()
        };
        let mesh = generate_voxel_terrain(&config, &mut ScalarFieldGenerator::from_seed(11))
            .expect("valid config");

        assert!(!mesh.is_empty(), "smooth={smooth_terrain} produced no surface");
        assert_well_formed(&mesh);
        for p in &mesh.positions {
            assert!(p.iter().all(|v| v.is_finite()));
            assert!(p[0] >= -0.5 && p[0] <= 8.5, "x out of range: {p:?}");
            assert!(p[2] >= -0.5 && p[2] <= 8.5, "z out of range: {p:?}");
        }
    }
}

#[test]
fn test_voxel_terrain_is_reproducible() {
    let config = small_voxels();
    let a = generate_voxel_terrain(&config, &mut ScalarFieldGenerator::from_seed(9))
        .expect("valid config");
    let b = generate_voxel_terrain(&config, &mut ScalarFieldGenerator::from_seed(9))
        .expect("valid config");
    assert_eq!(a, b);
}

#[test]
fn test_invalid_voxel_config_rejected() {
    let config = VoxelConfig {
        terrace_height: 0.0,
        ..small_voxels()
    };
    assert!(matches!(
        generate_voxel_terrain(&config, &mut ScalarFieldGenerator::from_seed(0)),
        Err(GenerationError::NotPositive { field: "terrace_height", .. })
    ));
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[test]
fn test_settings_drive_both_pipelines() {
    let settings = WorldGenSettings::from_json(
        r#"{
            "seed": 1234,
            "grid": { "base_size": 16 },
            "voxel": { "width": 6, "world_height": 4, "smooth_terrain": true }
        }"#,
    )
    .expect("settings parse");

    let seed = settings.seed.expect("seed set");
    let mut generator = ScalarFieldGenerator::from_seed(seed);
    let island = generate_island(&settings.grid, &mut generator).expect("valid grid");
    let voxels = generate_voxel_terrain(&settings.voxel, &mut generator).expect("valid voxels");

    assert_eq!(island.color_map.len(), 16 * 16);
    assert!(!voxels.is_empty());
}
