//! # Entity Handles and Component Storage
//!
//! Entities are plain index/generation pairs into a dense arena, never
//! pointers: a handle to a destroyed entity fails every lookup because its
//! generation no longer matches the slot. Each component kind lives in its
//! own sparse set, so heterogeneous kinds coexist per entity and iteration
//! stays in insertion order.

use std::fmt;

/// A lightweight, copyable handle to an entity in a [`Scene`].
///
/// All entity state lives in components indexed by this handle. Handles
/// remain valid only while the entity is alive; after destruction every
/// lookup cleanly reports "not found", even if the arena slot was reused.
///
/// [`Scene`]: super::Scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    index: u32,
    generation: u32,
}

impl Entity {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Entity { index, generation }
    }

    pub(crate) fn index(&self) -> u32 {
        self.index
    }

    pub(crate) fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Sparse-set storage for one component kind.
///
/// `sparse` maps an entity's arena index to a position in `dense`; `dense`
/// holds `(Entity, T)` pairs in insertion order. Removal uses a shifting
/// remove rather than swap-remove so the insertion order survives, which is
/// what gives the serializer its stable creation-order enumeration. Scenes
/// are small (one entry per scene entity), so the O(n) shift is irrelevant.
pub struct SparseSet<T> {
    sparse: Vec<Option<u32>>,
    dense: Vec<(Entity, T)>,
}

impl<T> SparseSet<T> {
    pub fn new() -> Self {
        SparseSet {
            sparse: Vec::new(),
            dense: Vec::new(),
        }
    }

    fn dense_position(&self, entity: Entity) -> Option<usize> {
        let slot = *self.sparse.get(entity.index() as usize)?;
        let position = slot? as usize;
        // Stale handle: the slot was reused by a newer generation.
        if self.dense[position].0 == entity {
            Some(position)
        } else {
            None
        }
    }

    /// Inserts a component, replacing any existing one for this entity.
    pub fn insert(&mut self, entity: Entity, value: T) -> &mut T {
        if let Some(position) = self.dense_position(entity) {
            self.dense[position].1 = value;
            return &mut self.dense[position].1;
        }

        let index = entity.index() as usize;
        if index >= self.sparse.len() {
            self.sparse.resize(index + 1, None);
        }
        self.sparse[index] = Some(self.dense.len() as u32);
        self.dense.push((entity, value));
        &mut self.dense.last_mut().unwrap().1
    }

    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let position = self.dense_position(entity)?;
        self.sparse[entity.index() as usize] = None;
        let (_, value) = self.dense.remove(position);
        // Everything after the removed entry shifted down by one.
        for (offset, (shifted, _)) in self.dense[position..].iter().enumerate() {
            self.sparse[shifted.index() as usize] = Some((position + offset) as u32);
        }
        Some(value)
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        let position = self.dense_position(entity)?;
        Some(&self.dense[position].1)
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let position = self.dense_position(entity)?;
        Some(&mut self.dense[position].1)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.dense_position(entity).is_some()
    }

    /// Iterates `(Entity, &T)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.dense.iter().map(|(entity, value)| (*entity, value))
    }

    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }
}

impl<T> Default for SparseSet<T> {
    fn default() -> Self {
        SparseSet::new()
    }
}
