//! Table-driven marching cubes.
//!
//! - Static corner, edge and triangulation tables, checked at compile time
//! - Per-cube configuration and vertex placement (flat or smooth)
//! - Whole-field extraction into a [`crate::mesh_buffers::TerrainMesh`]

mod algorithm;
mod tables;

pub use algorithm::{cube_configuration, MarchingCubes, EMPTY_CONFIGURATION, FULL_CONFIGURATION};
pub use tables::{
    tables_are_well_formed, triangulation, CORNER_OFFSETS, EDGE_CORNERS, SENTINEL, TRIANGLE_TABLE,
};
