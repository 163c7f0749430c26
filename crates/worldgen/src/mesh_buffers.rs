//! Triangle-soup accumulation shared by every extractor.
//!
//! Vertices are never shared: each emitted vertex gets the next index, so the
//! mesh is a flat list of triangles and normals are rebuilt from it in
//! [`MeshBuffers::finish`].

use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

/// Vertex, index and uv lists being filled by one extraction pass.
#[derive(Debug, Clone, Default)]
pub struct MeshBuffers {
    vertices: Vec<Vec3>,
    triangles: Vec<u32>,
    uvs: Vec<Vec2>,
}

impl MeshBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(vertices),
            uvs: Vec::with_capacity(vertices),
        }
    }

    /// Append one vertex with its uv and give it the next sequential index.
    #[inline]
    pub fn push_vertex(&mut self, vertex: Vec3, uv: Vec2) {
        self.triangles.push(self.triangles.len() as u32);
        self.vertices.push(vertex);
        self.uvs.push(uv);
    }

    /// Append a primitive (triangle or quad as two triangles). `vertices` and
    /// `uvs` pair up element by element.
    pub fn push_primitive(&mut self, vertices: &[Vec3], uvs: &[Vec2]) {
        assert_eq!(
            vertices.len(),
            uvs.len(),
            "primitive has {} vertices but {} uvs",
            vertices.len(),
            uvs.len()
        );
        for (&vertex, &uv) in vertices.iter().zip(uvs) {
            self.push_vertex(vertex, uv);
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Consume the buffers into a mesh with recomputed vertex normals.
    pub fn finish(self) -> TerrainMesh {
        debug_assert_eq!(self.vertices.len() % 3, 0, "incomplete triangle in buffers");

        let mut normals = vec![Vec3::ZERO; self.vertices.len()];
        for tri in self.triangles.chunks_exact(3) {
            let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let n = face_normal(self.vertices[i0], self.vertices[i1], self.vertices[i2]);
            normals[i0] += n;
            normals[i1] += n;
            normals[i2] += n;
        }

        TerrainMesh {
            positions: self.vertices.iter().map(|v| v.to_array()).collect(),
            normals: normals
                .into_iter()
                .map(|n| n.try_normalize().unwrap_or(Vec3::Y).to_array())
                .collect(),
            uvs: self.uvs.iter().map(|uv| uv.to_array()).collect(),
            indices: self.triangles,
        }
    }
}

/// Unit face normal of a counter-clockwise triangle, or zero when degenerate.
fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalize_or_zero()
}

/// Finished triangle list ready for a renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerrainMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl From<TerrainMesh> for Mesh {
    fn from(mesh: TerrainMesh) -> Self {
        Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, mesh.positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, mesh.normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, mesh.uvs)
        .with_inserted_indices(Indices::U32(mesh.indices))
    }
}
