//! Registry of the scene's live containers.
//!
//! [`ContainerStore`] plays the part of the scene's update list: containers
//! built through the scene-bound factory
//! ([`add_container`](crate::factory::add_container)) are registered here and
//! addressed by [`ContainerId`]. The store also hands out ids for containers
//! built by the creator ([`make_container`](crate::factory::make_container)),
//! which are not registered.
//!
//! Systems that need to touch every container (for example
//! [`prune_despawned_children`](crate::systems::containerprune::prune_despawned_children))
//! iterate the store.

use bevy_ecs::prelude::*;
use rustc_hash::FxHashMap;

use crate::container::{Container, ContainerId};

/// Map of container ids to containers over ECS entities.
#[derive(Resource, Debug, Default)]
pub struct ContainerStore {
    pub map: FxHashMap<ContainerId, Container<Entity>>,
    next_id: u32,
}

impl ContainerStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a fresh container id.
    pub fn next_id(&mut self) -> ContainerId {
        let id = ContainerId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register a container under its own id.
    pub fn insert(&mut self, container: Container<Entity>) -> ContainerId {
        let id = container.id();
        self.map.insert(id, container);
        id
    }

    pub fn get(&self, id: ContainerId) -> Option<&Container<Entity>> {
        self.map.get(&id)
    }

    pub fn get_mut(&mut self, id: ContainerId) -> Option<&mut Container<Entity>> {
        self.map.get_mut(&id)
    }

    pub fn remove(&mut self, id: ContainerId) -> Option<Container<Entity>> {
        self.map.remove(&id)
    }

    /// The container that holds `child`, if any.
    pub fn owner_of(&self, child: Entity) -> Option<ContainerId> {
        self.map
            .iter()
            .find(|(_, container)| container.contains(child))
            .map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
