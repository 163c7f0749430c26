use bevy::prelude::*;

use crate::config::RegionConfig;
use crate::noise_field::NoiseMap;
use crate::regions::RegionTable;

use super::*;

/// Sand sits one step below Grass at height 0.
fn sand_and_grass() -> RegionTable {
    RegionTable::new(
        &[
            RegionConfig::new("Sand", 0.5, [1.0, 1.0, 0.0]),
            RegionConfig::new("Grass", 1.0, [0.0, 1.0, 0.0]),
        ],
        1.0,
    )
    .expect("valid table")
}

/// Water at -1, Grass at 0.
fn water_and_grass() -> RegionTable {
    RegionTable::new(
        &[
            RegionConfig::new("Water", 0.4, [0.0, 0.0, 1.0]),
            RegionConfig::new("Grass", 1.0, [0.0, 1.0, 0.0]),
        ],
        1.0,
    )
    .expect("valid table")
}

fn grid(
    regions: RegionTable,
    base_size: usize,
    resolution: usize,
    f: impl FnMut(usize, usize) -> f32,
) -> HeightGrid {
    let side = base_size * resolution;
    HeightGrid::classify(regions, base_size, resolution, &NoiseMap::from_fn(side, f))
        .expect("valid grid")
}

fn quad_normal(quad: &Quad) -> Vec3 {
    (quad[1] - quad[0]).cross(quad[2] - quad[0]).normalize()
}

fn assert_vec3_near(actual: Vec3, expected: Vec3) {
    assert!(
        (actual - expected).length() < 1e-5,
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn test_flat_two_by_two_terrain() {
    let grid = grid(sand_and_grass(), 2, 1, |_, _| 0.9);
    let mesh = HeightmapDrawer::Terrain.draw(&grid);

    assert_eq!(mesh.vertex_count(), 24);
    assert_eq!(mesh.indices, (0..24).collect::<Vec<u32>>());
    assert_eq!(mesh.uvs.len(), 24);
    for p in &mesh.positions {
        assert_eq!(p[1], 0.0);
    }
    for n in &mesh.normals {
        assert_vec3_near(Vec3::from_array(*n), Vec3::Y);
    }
}

#[test]
fn test_single_region_two_by_two_terrain() {
    let single = RegionTable::new(&[RegionConfig::new("Grass", 1.0, [0.0, 1.0, 0.0])], 0.0)
        .expect("valid table");
    let grid = grid(single, 2, 1, |x, y| (x + y) as f32 * 0.3);
    let mesh = HeightmapDrawer::Terrain.draw(&grid);

    assert_eq!(mesh.vertex_count(), 24);
    assert_eq!(mesh.indices.len(), 24);
    assert_eq!(mesh.indices, (0..24).collect::<Vec<u32>>());
    for p in &mesh.positions {
        assert_eq!(p[1], 0.0);
    }
    assert!(HeightmapDrawer::EdgeWall.draw(&grid).is_empty());
    assert!(HeightmapDrawer::Water.draw(&grid).is_empty());
}

#[test]
fn test_flat_grid_has_no_walls_or_water() {
    let grid = grid(sand_and_grass(), 3, 1, |_, _| 0.9);
    assert!(HeightmapDrawer::EdgeWall.draw(&grid).is_empty());
    assert!(HeightmapDrawer::Water.draw(&grid).is_empty());
}

#[test]
fn test_terrain_and_water_partition_cells() {
    let grid = grid(water_and_grass(), 4, 1, |x, y| if (x + y) % 3 == 0 { 0.1 } else { 0.8 });
    let water_cells = grid.cells().iter().filter(|c| c.is_water).count();
    let land_cells = grid.cells().len() - water_cells;
    assert!(water_cells > 0 && land_cells > 0);

    let terrain = HeightmapDrawer::Terrain.draw(&grid);
    let water = HeightmapDrawer::Water.draw(&grid);
    assert_eq!(terrain.vertex_count(), land_cells * 6);
    assert_eq!(water.vertex_count(), water_cells * 6);
    assert_eq!(
        terrain.vertex_count() + water.vertex_count(),
        grid.cells().len() * 6
    );
    for p in &water.positions {
        assert_eq!(p[1], -1.0);
    }
}

#[test]
fn test_region_predicates() {
    let table = water_and_grass();
    let water = table.get(0);
    let grass = table.get(1);

    assert!(HeightmapDrawer::Water.is_valid_region(water));
    assert!(!HeightmapDrawer::Water.is_valid_region(grass));
    assert!(HeightmapDrawer::Terrain.is_valid_region(grass));
    assert!(!HeightmapDrawer::Terrain.is_valid_region(water));
    assert!(HeightmapDrawer::EdgeWall.is_valid_region(water));
    assert!(HeightmapDrawer::EdgeWall.is_valid_region(grass));
}

#[test]
fn test_top_quad_layout() {
    let grid = grid(sand_and_grass(), 1, 2, |_, _| 0.9);
    let cell = grid.cell(1, 0);
    let quad = top_quad(&grid, cell);

    // Cell center (0.5, 0.0), half-width 0.25.
    let a = Vec3::new(0.25, 0.0, 0.25);
    let b = Vec3::new(0.75, 0.0, 0.25);
    let c = Vec3::new(0.25, 0.0, -0.25);
    let d = Vec3::new(0.75, 0.0, -0.25);
    assert_eq!(quad, [a, b, c, b, d, c]);
    assert_vec3_near(quad_normal(&quad), Vec3::Y);
}

#[test]
fn test_terrain_uvs_cover_cell_footprint() {
    let grid = grid(sand_and_grass(), 2, 1, |_, _| 0.9);
    let uvs = terrain_uvs(&grid, grid.cell(1, 0));

    let a = Vec2::new(0.5, 0.0);
    let b = Vec2::new(1.0, 0.0);
    let c = Vec2::new(0.5, 0.5);
    let d = Vec2::new(1.0, 0.5);
    assert_eq!(uvs, [a, b, c, b, d, c]);
}

#[test]
fn test_water_uvs_use_quad_corners() {
    let grid = grid(water_and_grass(), 2, 1, |_, _| 0.1);
    let uvs = HeightmapDrawer::Water.cell_uvs(&grid, grid.cell(1, 1));

    let a = Vec2::new(0.25, 0.75);
    let b = Vec2::new(0.75, 0.75);
    let c = Vec2::new(0.25, 0.25);
    let d = Vec2::new(0.75, 0.25);
    assert_eq!(uvs, [a, b, c, b, d, c]);
}

#[test]
fn test_edge_walls_use_terrain_uvs() {
    let grid = grid(sand_and_grass(), 2, 1, |_, _| 0.9);
    let cell = grid.cell(0, 1);
    assert_eq!(
        HeightmapDrawer::EdgeWall.cell_uvs(&grid, cell),
        terrain_uvs(&grid, cell)
    );
}

#[test]
fn test_raised_center_gets_four_walls() {
    let grid = grid(sand_and_grass(), 3, 1, |x, y| if (x, y) == (1, 1) { 0.9 } else { 0.2 });
    let center = grid.cell(1, 1);

    let quads = HeightmapDrawer::EdgeWall.cell_quads(&grid, center);
    assert_eq!(quads.len(), 4);
    for (x, y) in [(0, 1), (2, 1), (1, 0), (1, 2)] {
        assert!(HeightmapDrawer::EdgeWall
            .cell_quads(&grid, grid.cell(x, y))
            .is_empty());
    }

    let mesh = HeightmapDrawer::EdgeWall.draw(&grid);
    assert_eq!(mesh.vertex_count(), 24);
    for p in &mesh.positions {
        assert!(p[1] == 0.0 || p[1] == -1.0, "wall vertex {p:?}");
    }
}

#[test]
fn test_walls_face_away_from_upper_cell() {
    let grid = grid(sand_and_grass(), 3, 1, |x, y| if (x, y) == (1, 1) { 0.9 } else { 0.2 });
    let center = grid.cell(1, 1);
    let expected = [
        (EdgeDirection::Left, Vec3::NEG_X),
        (EdgeDirection::Right, Vec3::X),
        (EdgeDirection::Down, Vec3::NEG_Z),
        (EdgeDirection::Up, Vec3::Z),
    ];

    for (direction, outward) in expected {
        let (nx, ny) = direction
            .neighbor(center.x, center.y, grid.side_length())
            .expect("center has all neighbors");
        let quad = edge_wall(&grid, direction, center, grid.cell(nx, ny));
        assert_vec3_near(quad_normal(&quad), outward);

        // The wall lies on the shared edge, half a cell from the center.
        let offset = Vec3::new(quad[0].x - 1.0, 0.0, quad[0].z - 1.0);
        assert!((offset.dot(outward) - 0.5).abs() < 1e-6, "{direction:?}");
    }
}

#[test]
fn test_water_neighbor_wall_drops_below_surface() {
    // Only (1, 0) is water; every other cell is grass.
    let grid = grid(water_and_grass(), 2, 1, |x, y| if (x, y) == (1, 0) { 0.1 } else { 0.9 });
    let mesh = HeightmapDrawer::EdgeWall.draw(&grid);

    // Grass (0, 0) to its right and grass (1, 1) below.
    assert_eq!(mesh.vertex_count(), 12);
    let lowest = mesh.positions.iter().map(|p| p[1]).fold(f32::INFINITY, f32::min);
    let highest = mesh.positions.iter().map(|p| p[1]).fold(f32::NEG_INFINITY, f32::max);
    assert_eq!(lowest, -2.0);
    assert_eq!(highest, 0.0);
}

#[test]
fn test_neighbor_skips_boundary() {
    assert_eq!(EdgeDirection::Left.neighbor(0, 0, 3), None);
    assert_eq!(EdgeDirection::Down.neighbor(0, 0, 3), None);
    assert_eq!(EdgeDirection::Right.neighbor(2, 1, 3), None);
    assert_eq!(EdgeDirection::Up.neighbor(1, 2, 3), None);
    assert_eq!(EdgeDirection::Right.neighbor(1, 1, 3), Some((2, 1)));
    assert_eq!(EdgeDirection::Up.neighbor(1, 1, 3), Some((1, 2)));
}
