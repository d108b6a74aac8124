//! Item collections and the containers generated for them.
//!
//! A gallery never owns its items. It reads them through [`ItemCollection`]
//! and asks an [`ItemContainerGenerator`] which visual, if any, currently
//! renders a given item.

use std::collections::HashMap;
use std::hash::Hash;

use lattice_gallery_core::{ObjectId, ObjectResult};

use super::traits::Visual;
use super::tree::VisualTree;

/// Read access to an ordered sequence of items.
pub trait ItemCollection {
    /// The item type.
    type Item;

    /// Number of items.
    fn count(&self) -> usize;

    /// The item at `index`.
    fn at(&self, index: usize) -> Option<&Self::Item>;

    /// Whether the collection has no items.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

impl<T> ItemCollection for [T] {
    type Item = T;

    fn count(&self) -> usize {
        self.len()
    }

    fn at(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<T> ItemCollection for Vec<T> {
    type Item = T;

    fn count(&self) -> usize {
        self.len()
    }

    fn at(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

/// Maps items to the visuals that render them.
pub trait ItemContainerGenerator<I> {
    /// The realized container for `item`, if one exists.
    fn container_for(&self, item: &I) -> Option<ObjectId>;

    /// Bring the containers under `panel` in line with `items`.
    ///
    /// Returns the number of containers created. The default realizes
    /// nothing, for generators whose containers are managed elsewhere.
    fn realize<C>(
        &mut self,
        tree: &mut VisualTree,
        panel: ObjectId,
        items: &C,
    ) -> ObjectResult<usize>
    where
        C: ItemCollection<Item = I> + ?Sized,
    {
        let _ = (tree, panel, items);
        Ok(0)
    }
}

type ContainerFactory<K> = Box<dyn Fn(&K) -> Box<dyn Visual> + Send + Sync>;

/// A keyed [`ItemContainerGenerator`].
///
/// Containers are looked up by item key. Without a factory the map only
/// answers lookups for containers inserted by hand; with one, [`realize`]
/// creates a container for every item that lacks one and removes containers
/// whose item has left the collection.
///
/// [`realize`]: ItemContainerGenerator::realize
pub struct ContainerMap<K> {
    containers: HashMap<K, ObjectId>,
    factory: Option<ContainerFactory<K>>,
}

impl<K: Eq + Hash + Clone> Default for ContainerMap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone> ContainerMap<K> {
    /// Create an empty map without a factory.
    pub fn new() -> Self {
        Self {
            containers: HashMap::new(),
            factory: None,
        }
    }

    /// Create an empty map that builds containers with `factory`.
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn(&K) -> Box<dyn Visual> + Send + Sync + 'static,
    {
        Self {
            containers: HashMap::new(),
            factory: Some(Box::new(factory)),
        }
    }

    /// Record `container` as the visual for `key`, returning the previous one.
    pub fn insert(&mut self, key: K, container: ObjectId) -> Option<ObjectId> {
        self.containers.insert(key, container)
    }

    /// Forget the container for `key`.
    pub fn remove(&mut self, key: &K) -> Option<ObjectId> {
        self.containers.remove(key)
    }

    /// The container recorded for `key`.
    pub fn get(&self, key: &K) -> Option<ObjectId> {
        self.containers.get(key).copied()
    }

    /// Number of recorded containers.
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    /// Whether no containers are recorded.
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Forget every container.
    pub fn clear(&mut self) {
        self.containers.clear();
    }
}

impl<K: Eq + Hash + Clone> ItemContainerGenerator<K> for ContainerMap<K> {
    fn container_for(&self, item: &K) -> Option<ObjectId> {
        self.get(item)
    }

    fn realize<C>(
        &mut self,
        tree: &mut VisualTree,
        panel: ObjectId,
        items: &C,
    ) -> ObjectResult<usize>
    where
        C: ItemCollection<Item = K> + ?Sized,
    {
        let Some(factory) = &self.factory else {
            return Ok(0);
        };

        // Containers removed from the tree by someone else.
        self.containers.retain(|_, id| tree.contains(*id));

        let mut live = HashMap::with_capacity(items.count());
        let mut created = 0;
        for index in 0..items.count() {
            let Some(key) = items.at(index) else {
                continue;
            };
            let id = match self.containers.remove(key) {
                Some(id) => id,
                None => {
                    created += 1;
                    tree.insert_child_boxed(panel, factory(key))?
                }
            };
            live.insert(key.clone(), id);
        }

        for (_, stale) in self.containers.drain() {
            tree.remove(stale)?;
        }
        self.containers = live;
        Ok(created)
    }
}

impl<K> std::fmt::Debug for ContainerMap<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerMap")
            .field("len", &self.containers.len())
            .field("has_factory", &self.factory.is_some())
            .finish()
    }
}
