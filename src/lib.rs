// src/lib.rs
//! Meshview Scene Core
//!
//! The import and persistence pipeline behind a 3D model viewer: parses
//! OBJ/MTL files into renderable meshes with synthesized smooth normals,
//! stores them in an entity-component scene graph, and saves/restores whole
//! scenes losslessly as YAML.
//!
//! The renderer and UI layers sit outside this crate. The renderer consumes
//! finished interleaved vertex buffers, index buffers, bounding boxes and
//! transform matrices; the UI calls [`import_obj`], [`save_scene`] and
//! [`load_scene`] and edits component fields through the [`Scene`] accessors.
//!
//! ```no_run
//! use meshview::{import_obj, save_scene, Scene};
//!
//! let mut scene = Scene::new();
//! let entities = import_obj(&mut scene, "models/teapot.obj")?;
//! println!("imported {} mesh groups", entities.len());
//! save_scene(&scene, "scenes/teapot.yaml")?;
//! # Ok::<(), meshview::Error>(())
//! ```

pub mod error;
pub mod geometry;
pub mod import;
pub mod scene;
pub mod uuid;

// Re-export the main types for convenience
pub use error::{Error, Result};
pub use geometry::{Aabb, Mesh, VertexRecord};
pub use import::{import_obj, import_obj_with, GroupPolicy, ImportOptions, NgonPolicy};
pub use scene::{
    load_scene, save_scene, Entity, IdComponent, MaterialComponent, MeshComponent, Scene,
    TagComponent, TransformComponent,
};
pub use uuid::Uuid;
