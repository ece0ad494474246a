//! # Scene Serialization
//!
//! Saves and restores a whole scene as a YAML document. The document is a
//! single `Entities` sequence; each entry carries the entity's identifier
//! and one block per attached component. Mesh geometry is inlined in full
//! (interleaved position/normal triples plus the index list), so a saved
//! scene is self-contained and never re-reads the imported source file.
//!
//! Floats are written in serde_yaml's shortest round-trip representation,
//! so numeric fields survive save/load cycles exactly.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use cgmath::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{Mesh, VertexRecord};
use crate::scene::components::{
    IdComponent, MaterialComponent, MeshComponent, TagComponent, TransformComponent,
};
use crate::scene::Scene;
use crate::uuid::Uuid;

#[derive(Serialize, Deserialize)]
struct SceneFile {
    #[serde(rename = "Entities")]
    entities: Vec<EntityRecord>,
}

#[derive(Serialize, Deserialize)]
struct EntityRecord {
    #[serde(rename = "Entity")]
    uuid: u64,
    #[serde(rename = "TagComponent", default, skip_serializing_if = "Option::is_none")]
    tag: Option<TagRecord>,
    #[serde(
        rename = "TransformComponent",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    transform: Option<TransformRecord>,
    #[serde(rename = "MeshComponent", default, skip_serializing_if = "Option::is_none")]
    mesh: Option<MeshRecord>,
    #[serde(
        rename = "MaterialComponent",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    material: Option<MaterialRecord>,
}

#[derive(Serialize, Deserialize)]
struct TagRecord {
    #[serde(rename = "Tag")]
    tag: String,
}

#[derive(Serialize, Deserialize)]
struct TransformRecord {
    #[serde(rename = "Translation")]
    translation: [f32; 3],
    #[serde(rename = "Rotation")]
    rotation: [f32; 3],
    #[serde(rename = "Scale")]
    scale: [f32; 3],
}

/// `vertices` interleaves position and normal triples: entry `2k` is the
/// position of vertex record `k`, entry `2k + 1` its normal.
///
/// `path` is informational only and stored as UTF-8 text; a non-UTF-8
/// source path is written lossily and will not round-trip byte-for-byte.
#[derive(Serialize, Deserialize)]
struct MeshRecord {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Path", default)]
    path: String,
    #[serde(rename = "Vertices")]
    vertices: Vec<[f32; 3]>,
    #[serde(rename = "Indexes")]
    indices: Vec<u32>,
}

#[derive(Serialize, Deserialize)]
struct MaterialRecord {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Color")]
    color: [f32; 3],
}

fn triple(v: Vector3<f32>) -> [f32; 3] {
    [v.x, v.y, v.z]
}

fn vector(t: [f32; 3]) -> Vector3<f32> {
    Vector3::new(t[0], t[1], t[2])
}

fn encode(scene: &Scene) -> SceneFile {
    let entities = scene
        .entities()
        .map(|entity| {
            let id = scene
                .get_component::<IdComponent>(entity)
                .expect("live entity without identity");

            EntityRecord {
                uuid: id.uuid().as_u64(),
                tag: scene
                    .get_component::<TagComponent>(entity)
                    .map(|tag| TagRecord {
                        tag: tag.tag.clone(),
                    }),
                transform: scene.get_component::<TransformComponent>(entity).map(
                    |transform| TransformRecord {
                        translation: triple(transform.translation),
                        rotation: triple(transform.rotation),
                        scale: triple(transform.scale),
                    },
                ),
                mesh: scene
                    .get_component::<MeshComponent>(entity)
                    .map(|mesh| MeshRecord {
                        name: mesh.name.clone(),
                        path: mesh.path.to_string_lossy().into_owned(),
                        vertices: mesh
                            .mesh
                            .vertices()
                            .iter()
                            .flat_map(|record| [triple(record.position), triple(record.normal)])
                            .collect(),
                        indices: mesh.mesh.indices().to_vec(),
                    }),
                material: scene
                    .get_component::<MaterialComponent>(entity)
                    .map(|material| MaterialRecord {
                        name: material.name.clone(),
                        color: triple(material.color),
                    }),
            }
        })
        .collect();

    SceneFile { entities }
}

fn corrupt(reason: impl Into<String>) -> Error {
    Error::CorruptScene {
        reason: reason.into(),
    }
}

fn decode_mesh(record: MeshRecord) -> Result<MeshComponent> {
    if record.vertices.len() % 2 != 0 {
        return Err(corrupt(
            "mesh vertex list must hold position/normal pairs",
        ));
    }
    if record.indices.len() % 3 != 0 {
        return Err(corrupt("mesh index count is not a multiple of 3"));
    }

    let vertices: Vec<VertexRecord> = record
        .vertices
        .chunks_exact(2)
        .map(|pair| VertexRecord {
            position: vector(pair[0]),
            normal: vector(pair[1]),
        })
        .collect();

    if let Some(&out_of_range) = record
        .indices
        .iter()
        .find(|&&index| index as usize >= vertices.len())
    {
        return Err(corrupt(format!(
            "mesh index {} out of bounds ({} vertices)",
            out_of_range,
            vertices.len()
        )));
    }

    Ok(MeshComponent::new(
        Mesh::new(vertices, record.indices),
        record.name,
        record.path.into(),
    ))
}

fn decode(file: SceneFile) -> Result<Scene> {
    let mut scene = Scene::new();
    let mut seen_ids = HashSet::new();

    for record in file.entities {
        // Identifier uniqueness is a scene invariant; a hand-edited file
        // can violate it and must fail before the entity is created.
        if !seen_ids.insert(record.uuid) {
            return Err(corrupt(format!(
                "duplicate entity identifier {}",
                record.uuid
            )));
        }

        let name = record.tag.map(|tag| tag.tag).unwrap_or_default();
        // Group membership is not persisted; reloaded entities stand alone.
        let entity = scene.create_entity_with_uuid(&name, Uuid::from(record.uuid), Uuid::NIL);

        if let Some(transform) = record.transform {
            let component = scene
                .get_component_mut::<TransformComponent>(entity)
                .expect("fresh entity always has a transform");
            component.translation = vector(transform.translation);
            component.rotation = vector(transform.rotation);
            component.scale = vector(transform.scale);
        }

        if let Some(mesh) = record.mesh {
            let component = decode_mesh(mesh)?;
            scene.add_component(entity, component);
        }

        if let Some(material) = record.material {
            scene.add_component(
                entity,
                MaterialComponent {
                    color: vector(material.color),
                    name: material.name,
                },
            );
        }
    }

    Ok(scene)
}

/// Serializes the scene to a YAML string, entities in creation order.
pub fn to_string(scene: &Scene) -> Result<String> {
    serde_yaml::to_string(&encode(scene)).map_err(|err| corrupt(err.to_string()))
}

/// Reconstructs a scene from a YAML string.
///
/// A document that does not parse as the expected tree fails with
/// [`Error::CorruptScene`]; a missing component block simply leaves that
/// component absent.
pub fn from_str(text: &str) -> Result<Scene> {
    let file: SceneFile =
        serde_yaml::from_str(text).map_err(|err| corrupt(err.to_string()))?;
    decode(file)
}

/// Writes the scene to `path` as YAML.
pub fn save_scene(scene: &Scene, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let text = to_string(scene)?;
    fs::write(path, text)?;
    log::info!(
        "saved scene with {} entities to '{}'",
        scene.entity_count(),
        path.display()
    );
    Ok(())
}

/// Reads a scene back from `path`.
///
/// On failure the caller's current scene is untouched, because the result
/// is a fresh [`Scene`] the caller only adopts on success.
pub fn load_scene(path: impl AsRef<Path>) -> Result<Scene> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::FileUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let scene = from_str(&text)?;
    log::info!(
        "loaded scene with {} entities from '{}'",
        scene.entity_count(),
        path.display()
    );
    Ok(scene)
}
