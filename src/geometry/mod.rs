//! # Geometry Module
//!
//! Mesh buffers and the math that prepares them for rendering: bounding-box
//! computation, center-and-scale normalization, and smooth vertex normal
//! synthesis.

pub mod bounds;
pub mod mesh;
pub mod normals;

pub use bounds::Aabb;
pub use mesh::{Mesh, VertexRecord};
