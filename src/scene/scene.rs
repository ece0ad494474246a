//! # Scene Graph
//!
//! The entity-component store. Entities are created and destroyed only
//! through this type; each component kind has its own sparse-set storage so
//! kinds coexist freely per entity. Access is single-threaded by design --
//! mutation requires `&mut Scene`, which the borrow checker makes exclusive.

use crate::scene::components::{
    IdComponent, MaterialComponent, MeshComponent, TagComponent, TransformComponent,
};
use crate::scene::entity::{Entity, SparseSet};
use crate::uuid::Uuid;

/// A component kind that can be attached to scene entities.
///
/// Implemented for the fixed set of component types this crate knows about;
/// the trait only wires a type to its storage field inside [`Scene`].
pub trait Component: Sized {
    fn storage(scene: &Scene) -> &SparseSet<Self>;
    fn storage_mut(scene: &mut Scene) -> &mut SparseSet<Self>;
}

macro_rules! impl_component {
    ($component:ty, $field:ident) => {
        impl Component for $component {
            fn storage(scene: &Scene) -> &SparseSet<Self> {
                &scene.$field
            }
            fn storage_mut(scene: &mut Scene) -> &mut SparseSet<Self> {
                &mut scene.$field
            }
        }
    };
}

impl_component!(IdComponent, ids);
impl_component!(TagComponent, tags);
impl_component!(TransformComponent, transforms);
impl_component!(MeshComponent, meshes);
impl_component!(MaterialComponent, materials);

/// The scene graph: a dense entity arena plus one sparse set per component
/// kind.
///
/// Entity identifiers (UUIDs) are never recycled; arena slots are, with a
/// bumped generation so stale handles cannot alias a new entity.
#[derive(Default)]
pub struct Scene {
    generations: Vec<u32>,
    free_slots: Vec<u32>,
    ids: SparseSet<IdComponent>,
    tags: SparseSet<TagComponent>,
    transforms: SparseSet<TransformComponent>,
    meshes: SparseSet<MeshComponent>,
    materials: SparseSet<MaterialComponent>,
}

impl Scene {
    pub fn new() -> Self {
        Scene::default()
    }

    /// Creates an entity with a fresh random identifier and no group.
    pub fn create_entity(&mut self, name: &str) -> Entity {
        self.create_entity_with_uuid(name, Uuid::new(), Uuid::NIL)
    }

    /// Creates an entity with a fresh identifier sharing the given import
    /// group.
    pub fn create_entity_with_group(&mut self, name: &str, group: Uuid) -> Entity {
        self.create_entity_with_uuid(name, Uuid::new(), group)
    }

    /// Creates an entity with a caller-supplied identifier, as needed by
    /// deserialization.
    ///
    /// Every entity starts with identity, tag and a default transform.
    /// Supplying a UUID already present in this scene is a caller bug.
    pub fn create_entity_with_uuid(&mut self, name: &str, uuid: Uuid, group: Uuid) -> Entity {
        debug_assert!(
            self.ids.iter().all(|(_, id)| id.uuid() != uuid),
            "duplicate entity uuid {uuid}"
        );

        let entity = self.allocate();
        self.ids.insert(entity, IdComponent::new(uuid, group));
        self.tags.insert(entity, TagComponent::named(name));
        self.transforms.insert(entity, TransformComponent::default());
        entity
    }

    fn allocate(&mut self) -> Entity {
        if let Some(index) = self.free_slots.pop() {
            Entity::new(index, self.generations[index as usize])
        } else {
            let index = self.generations.len() as u32;
            self.generations.push(0);
            Entity::new(index, 0)
        }
    }

    /// Removes the entity and all of its components atomically.
    ///
    /// Returns false for an entity that is not alive (already destroyed or
    /// from another scene); lookups through the stale handle keep failing
    /// cleanly afterwards.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }

        self.ids.remove(entity);
        self.tags.remove(entity);
        self.transforms.remove(entity);
        self.meshes.remove(entity);
        self.materials.remove(entity);

        let index = entity.index() as usize;
        self.generations[index] = self.generations[index].wrapping_add(1);
        self.free_slots.push(entity.index());
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.generations
            .get(entity.index() as usize)
            .is_some_and(|&generation| generation == entity.generation())
            && self.ids.contains(entity)
    }

    /// Attaches a component, replacing any previous one of the same kind.
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> &mut T {
        debug_assert!(self.is_alive(entity), "adding component to dead entity");
        T::storage_mut(self).insert(entity, component)
    }

    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        T::storage(self).get(entity)
    }

    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        T::storage_mut(self).get_mut(entity)
    }

    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        T::storage(self).contains(entity)
    }

    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        T::storage_mut(self).remove(entity)
    }

    /// Iterates all live entities in creation order.
    ///
    /// The identity storage is inserted into exactly once per entity and
    /// keeps insertion order, so its dense sequence is the creation order
    /// the serializer needs.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.ids.iter().map(|(entity, _)| entity)
    }

    /// Iterates entities that carry a component of kind `T`, with the
    /// component, in attach order.
    pub fn entities_with<'a, T: Component + 'a>(
        &'a self,
    ) -> impl Iterator<Item = (Entity, &'a T)> {
        T::storage(self).iter()
    }

    pub fn entity_count(&self) -> usize {
        self.ids.len()
    }
}
