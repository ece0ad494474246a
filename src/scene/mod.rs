//! # Scene Module
//!
//! The entity-component scene graph and its YAML persistence layer.
//!
//! - **Entities** ([`entity`]) - index/generation handles and sparse-set
//!   component storage
//! - **Components** ([`components`]) - identity, tag, transform, mesh and
//!   material data
//! - **Scene** ([`scene`]) - the store itself, the only way entities are
//!   created or destroyed
//! - **Serialization** ([`serializer`]) - lossless save/load of an entire
//!   scene, geometry included

pub mod components;
pub mod entity;
pub mod scene;
pub mod serializer;

pub use components::{
    IdComponent, MaterialComponent, MeshComponent, TagComponent, TransformComponent,
};
pub use entity::Entity;
pub use scene::{Component, Scene};
pub use serializer::{load_scene, save_scene};
