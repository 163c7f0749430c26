//! Heightmap mesh extractors.
//!
//! Each [`HeightmapDrawer`] variant walks the classified grid, keeps the
//! cells its predicate accepts and emits quads for them:
//!
//! - [`HeightmapDrawer::Terrain`]: flat tops of land cells
//! - [`HeightmapDrawer::Water`]: flat tops of water cells
//! - [`HeightmapDrawer::EdgeWall`]: vertical sides where a cell drops to a
//!   lower neighbor

mod quads;
#[cfg(test)]
mod tests;

use bevy::prelude::*;

use crate::height_grid::{Cell, HeightGrid};
use crate::mesh_buffers::{MeshBuffers, TerrainMesh};
use crate::regions::Region;

pub use crate::height_grid::EdgeDirection;
pub use quads::{edge_wall, terrain_uvs, top_quad, water_uvs, Quad, QuadUvs};

/// Heightmap extractor variants sharing one traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeightmapDrawer {
    Terrain,
    Water,
    EdgeWall,
}

impl HeightmapDrawer {
    pub const ALL: [HeightmapDrawer; 3] = [
        HeightmapDrawer::Terrain,
        HeightmapDrawer::Water,
        HeightmapDrawer::EdgeWall,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HeightmapDrawer::Terrain => "terrain",
            HeightmapDrawer::Water => "water",
            HeightmapDrawer::EdgeWall => "edges",
        }
    }

    /// Whether cells of `region` contribute geometry to this drawer.
    pub fn is_valid_region(self, region: &Region) -> bool {
        match self {
            HeightmapDrawer::Terrain => !region.is_water(),
            HeightmapDrawer::Water => region.is_water(),
            HeightmapDrawer::EdgeWall => true,
        }
    }

    /// Texture coordinates for one quad of `cell`. Edge walls share the
    /// terrain mapping.
    pub fn cell_uvs(self, grid: &HeightGrid, cell: &Cell) -> QuadUvs {
        match self {
            HeightmapDrawer::Water => water_uvs(grid, cell),
            HeightmapDrawer::Terrain | HeightmapDrawer::EdgeWall => terrain_uvs(grid, cell),
        }
    }

    /// Quads contributed by `cell`: one top for terrain and water, zero to
    /// four walls for edges.
    pub fn cell_quads(self, grid: &HeightGrid, cell: &Cell) -> Vec<Quad> {
        match self {
            HeightmapDrawer::Terrain | HeightmapDrawer::Water => vec![top_quad(grid, cell)],
            HeightmapDrawer::EdgeWall => {
                let height = grid.region_of(cell).world_height;
                grid
                    .neighbors(cell.x, cell.y)
                    .filter(|(_, neighbor)| grid.region_of(neighbor).world_height < height)
                    .map(|(direction, neighbor)| edge_wall(grid, direction, cell, neighbor))
                    .collect()
            }
        }
    }

    /// Build this drawer's mesh over the whole grid.
    pub fn draw(self, grid: &HeightGrid) -> TerrainMesh {
        let mut buffers = MeshBuffers::with_capacity(self.estimated_vertices(grid));
        let mut quad_count = 0usize;

        for cell in grid.cells() {
            if !self.is_valid_region(grid.region_of(cell)) {
                continue;
            }
            let quads = self.cell_quads(grid, cell);
            if quads.is_empty() {
                continue;
            }
            let uvs = self.cell_uvs(grid, cell);
            for quad in &quads {
                buffers.push_primitive(quad, &uvs);
            }
            quad_count += quads.len();
        }

        debug!(
            "{} drawer: {} quads from {} cells",
            self.name(),
            quad_count,
            grid.cells().len()
        );
        buffers.finish()
    }

    fn estimated_vertices(self, grid: &HeightGrid) -> usize {
        match self {
            HeightmapDrawer::Terrain | HeightmapDrawer::Water => grid.cells().len() * 6,
            // Walls only appear along region boundaries.
            HeightmapDrawer::EdgeWall => grid.side_length() * 6,
        }
    }
}
