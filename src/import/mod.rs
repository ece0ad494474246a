//! # Import Module
//!
//! Turns an OBJ file into scene entities: parse geometry and materials,
//! synthesize smooth normals over the merged vertex buffer, normalize the
//! model into a unit box, then create one entity per mesh group. All
//! entities from one call share a freshly generated group identifier.
//!
//! Parsing runs to completion before the first entity is created, so a
//! failed import leaves the scene exactly as it was.

pub mod mtl;
pub mod obj;

use std::collections::HashMap;
use std::path::Path;

use cgmath::Vector3;
use log::{debug, info};

use crate::error::Result;
use crate::geometry::{bounds, normals, Mesh, VertexRecord};
use crate::import::mtl::Material;
use crate::scene::{Entity, MaterialComponent, MeshComponent, Scene};
use crate::uuid::Uuid;

/// How the parser decides where one mesh group ends and the next begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupPolicy {
    /// `o`/`g` markers open a new group; `usemtl` binds the material of the
    /// current group. The default, and the data-preserving choice.
    #[default]
    Markers,
    /// Every `usemtl` opens a new group carrying the latest marker name.
    MaterialSwitch,
}

/// How faces with more than three references are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NgonPolicy {
    /// Fan-triangulate around the first referenced vertex (default).
    #[default]
    FanTriangulate,
    /// Fail the import on any non-triangular face.
    Reject,
}

/// Policy knobs for an import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportOptions {
    pub grouping: GroupPolicy,
    pub ngons: NgonPolicy,
}

/// Imports an OBJ file into the scene with default options.
pub fn import_obj(scene: &mut Scene, path: impl AsRef<Path>) -> Result<Vec<Entity>> {
    import_obj_with(scene, path, &ImportOptions::default())
}

/// Imports an OBJ file into the scene, returning the created entities in
/// file order.
pub fn import_obj_with(
    scene: &mut Scene,
    path: impl AsRef<Path>,
    options: &ImportOptions,
) -> Result<Vec<Entity>> {
    let path = path.as_ref();
    let mut model = obj::parse_file(path, options)?;

    // Normals are accumulated across every group so shared vertices smooth
    // over group boundaries.
    let vertex_normals = normals::synthesize(
        &model.positions,
        model.nodes.iter().map(|node| node.indices.as_slice()),
    );
    bounds::center_and_scale(&mut model.positions, 1.0);

    let group = Uuid::new();
    let mut created = Vec::with_capacity(model.nodes.len());

    for node in &model.nodes {
        let mesh = build_mesh(&model.positions, &vertex_normals, &node.indices);
        debug!(
            "group '{}': {} vertices, {} triangles, material {:?}",
            node.name,
            mesh.vertex_count(),
            mesh.triangle_count(),
            node.material
        );

        let entity = scene.create_entity_with_group(&node.name, group);
        scene.add_component(
            entity,
            MeshComponent::new(mesh, node.name.clone(), path.to_path_buf()),
        );
        scene.add_component(
            entity,
            resolve_material(node.material.as_deref(), &model.materials),
        );
        created.push(entity);
    }

    info!(
        "imported {} entities from '{}'",
        created.len(),
        path.display()
    );
    Ok(created)
}

/// Compacts the vertices one group references into a dedicated mesh buffer,
/// in first-occurrence order, remapping the triangle indices to match.
fn build_mesh(
    positions: &[Vector3<f32>],
    vertex_normals: &[Vector3<f32>],
    indices: &[u32],
) -> Mesh {
    let mut remap: HashMap<u32, u32> = HashMap::new();
    let mut vertices = Vec::new();
    let mut local_indices = Vec::with_capacity(indices.len());

    for &index in indices {
        let slot = match remap.get(&index) {
            Some(&slot) => slot,
            None => {
                let slot = vertices.len() as u32;
                vertices.push(VertexRecord {
                    position: positions[index as usize],
                    normal: vertex_normals[index as usize],
                });
                remap.insert(index, slot);
                slot
            }
        };
        local_indices.push(slot);
    }

    Mesh::new(vertices, local_indices)
}

/// Looks the group's material name up in the library table, falling back to
/// the default mid-gray material when the name is absent or was never bound.
fn resolve_material(
    name: Option<&str>,
    table: &HashMap<String, Material>,
) -> MaterialComponent {
    match name.and_then(|n| table.get(n)) {
        Some(material) => MaterialComponent {
            color: material.diffuse,
            name: material.name.clone(),
        },
        None => {
            if let Some(name) = name {
                debug!("no material entry for '{name}', using default");
            }
            MaterialComponent::default()
        }
    }
}
