//! # Mesh Buffers
//!
//! The finished geometry handed to the renderer: an ordered sequence of
//! vertex records (position + smooth normal), a flat triangle index list
//! into that sequence, and a bounding box kept in sync with the positions.

use cgmath::Vector3;

use super::bounds::{self, Aabb};

/// One (position, normal) pair in a finished mesh buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexRecord {
    pub position: Vector3<f32>,
    pub normal: Vector3<f32>,
}

/// A renderable triangle mesh.
///
/// Invariants: the index count is always a multiple of three and every index
/// is within bounds of the vertex sequence. Both are established by the
/// import pipeline and the scene deserializer before construction, so they
/// are checked here with debug assertions only.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<VertexRecord>,
    indices: Vec<u32>,
    bounds: Aabb,
}

impl Mesh {
    pub fn new(vertices: Vec<VertexRecord>, indices: Vec<u32>) -> Self {
        debug_assert!(
            indices.len() % 3 == 0,
            "index count must be a multiple of 3"
        );
        debug_assert!(
            indices.iter().all(|&i| (i as usize) < vertices.len()),
            "triangle index out of bounds"
        );

        let mut mesh = Mesh {
            vertices,
            indices,
            bounds: Aabb::default(),
        };
        mesh.recompute_bounds();
        mesh
    }

    pub fn vertices(&self) -> &[VertexRecord] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Mutable access to the vertex records for live editing.
    ///
    /// Callers that move positions must call [`Mesh::recompute_bounds`]
    /// afterwards.
    pub fn vertices_mut(&mut self) -> &mut [VertexRecord] {
        &mut self.vertices
    }

    /// Recomputes the bounding box from the current vertex positions.
    pub fn recompute_bounds(&mut self) {
        let positions: Vec<Vector3<f32>> =
            self.vertices.iter().map(|record| record.position).collect();
        self.bounds = bounds::extents(&positions).unwrap_or_default();
    }

    /// Flattens the vertex records into the interleaved
    /// `[px, py, pz, nx, ny, nz, ...]` layout the renderer uploads.
    pub fn interleaved(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.vertices.len() * 6);
        for record in &self.vertices {
            data.extend_from_slice(&[
                record.position.x,
                record.position.y,
                record.position.z,
                record.normal.x,
                record.normal.y,
                record.normal.z,
            ]);
        }
        data
    }
}
