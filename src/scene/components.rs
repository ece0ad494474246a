//! # Scene Components
//!
//! The component kinds a scene entity can carry. Entities always hold an
//! identity, tag and transform (attached at creation); mesh and material
//! components are added by the import pipeline or the deserializer.

use std::path::PathBuf;

use cgmath::{Euler, Matrix4, Quaternion, Rad, Vector3};

use crate::geometry::Mesh;
use crate::uuid::Uuid;

/// Stable identity: a process-unique identifier plus the group identifier
/// shared by every entity created from the same import operation.
///
/// Both values are fixed at creation and never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdComponent {
    uuid: Uuid,
    group: Uuid,
}

impl IdComponent {
    pub(crate) fn new(uuid: Uuid, group: Uuid) -> Self {
        IdComponent { uuid, group }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// [`Uuid::NIL`] for entities that were not created by an import.
    pub fn group(&self) -> Uuid {
        self.group
    }
}

/// Display name shown in the entity list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagComponent {
    pub tag: String,
}

impl TagComponent {
    /// Builds a tag, substituting the default name for an empty one.
    pub fn named(name: &str) -> Self {
        if name.is_empty() {
            TagComponent::default()
        } else {
            TagComponent {
                tag: name.to_string(),
            }
        }
    }
}

impl Default for TagComponent {
    fn default() -> Self {
        TagComponent {
            tag: "Unnamed Entity".to_string(),
        }
    }
}

/// Translation, Euler rotation (radians) and scale of an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformComponent {
    pub translation: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl TransformComponent {
    /// The affine matrix `translate * rotate * scale`.
    ///
    /// Rotation goes through a single quaternion built from the Euler
    /// angles, not through sequential axis matrices; the serializer relies
    /// on this for numerical parity across save/load cycles.
    pub fn matrix(&self) -> Matrix4<f32> {
        let rotation = Matrix4::from(Quaternion::from(Euler::new(
            Rad(self.rotation.x),
            Rad(self.rotation.y),
            Rad(self.rotation.z),
        )));

        Matrix4::from_translation(self.translation)
            * rotation
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

impl Default for TransformComponent {
    fn default() -> Self {
        TransformComponent {
            translation: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

/// A finished mesh buffer plus where it came from.
///
/// `path` records the originating file for display purposes only; a saved
/// scene inlines the full geometry and never re-reads the source file.
#[derive(Debug, Clone)]
pub struct MeshComponent {
    pub mesh: Mesh,
    pub name: String,
    pub path: PathBuf,
}

impl MeshComponent {
    pub fn new(mesh: Mesh, name: String, path: PathBuf) -> Self {
        MeshComponent { mesh, name, path }
    }
}

/// The resolved material of a mesh group: diffuse color and source name.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialComponent {
    pub color: Vector3<f32>,
    pub name: String,
}

impl Default for MaterialComponent {
    fn default() -> Self {
        MaterialComponent {
            color: Vector3::new(0.7, 0.7, 0.7),
            name: "Unnamed Mesh".to_string(),
        }
    }
}
