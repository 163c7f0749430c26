use bevy::prelude::*;

use crate::config::WATER_WALL_DEPTH;
use crate::height_grid::{Cell, EdgeDirection, HeightGrid};

/// Two triangles per quad, `{a, b, c, b, d, c}`.
pub type Quad = [Vec3; 6];
pub type QuadUvs = [Vec2; 6];

#[inline]
fn quad(a: Vec3, b: Vec3, c: Vec3, d: Vec3) -> Quad {
    [a, b, c, b, d, c]
}

/// Flat quad centered on the cell at its region height.
pub fn top_quad(grid: &HeightGrid, cell: &Cell) -> Quad {
    let Vec2 { x, y: z } = cell.world_position;
    let h = grid.cell_size() / 2.0;
    let height = grid.region_of(cell).world_height;

    quad(
        Vec3::new(x - h, height, z + h),
        Vec3::new(x + h, height, z + h),
        Vec3::new(x - h, height, z - h),
        Vec3::new(x + h, height, z - h),
    )
}

/// Terrain texture coordinates: the cell's footprint over the island's world
/// size.
pub fn terrain_uvs(grid: &HeightGrid, cell: &Cell) -> QuadUvs {
    let Vec2 { x, y } = cell.world_position;
    let size = grid.cell_size();
    let world = grid.base_size() as f32;

    let a = Vec2::new(x / world, y / world);
    let b = Vec2::new((x + size) / world, y / world);
    let c = Vec2::new(x / world, (y + size) / world);
    let d = Vec2::new((x + size) / world, (y + size) / world);
    [a, b, c, b, d, c]
}

/// Water texture coordinates: quad corners (half a cell around the center)
/// over the grid side length in cells.
pub fn water_uvs(grid: &HeightGrid, cell: &Cell) -> QuadUvs {
    let Vec2 { x, y } = cell.world_position;
    let h = grid.cell_size() / 2.0;
    let side = grid.side_length() as f32;

    let a = Vec2::new((x - h) / side, (y + h) / side);
    let b = Vec2::new((x + h) / side, (y + h) / side);
    let c = Vec2::new((x - h) / side, (y - h) / side);
    let d = Vec2::new((x + h) / side, (y - h) / side);
    [a, b, c, b, d, c]
}

/// Vertical quad on the edge between `upper` and the lower cell in
/// `direction`. Every layout winds so the face points away from `upper`.
pub fn edge_wall(grid: &HeightGrid, direction: EdgeDirection, upper: &Cell, lower: &Cell) -> Quad {
    let Vec2 { x, y: z } = upper.world_position;
    let h = grid.cell_size() / 2.0;
    let top = grid.region_of(upper).world_height;
    let lower_region = grid.region_of(lower);
    let bottom = if lower_region.is_water() {
        lower_region.world_height - WATER_WALL_DEPTH
    } else {
        lower_region.world_height
    };

    // (x, z) of the two edge endpoints, in winding order.
    let (first, second) = match direction {
        EdgeDirection::Left => ((x - h, z + h), (x - h, z - h)),
        EdgeDirection::Right => ((x + h, z - h), (x + h, z + h)),
        EdgeDirection::Down => ((x - h, z - h), (x + h, z - h)),
        EdgeDirection::Up => ((x + h, z + h), (x - h, z + h)),
    };

    quad(
        Vec3::new(first.0, top, first.1),
        Vec3::new(second.0, top, second.1),
        Vec3::new(first.0, bottom, first.1),
        Vec3::new(second.0, bottom, second.1),
    )
}
