//! Container maintenance system.
//!
//! Children are normally removed through
//! [`Container::remove_child`](crate::container::Container::remove_child),
//! which discards their record first. When gameplay code despawns a child
//! directly (TTL, collisions, scene teardown) the container would keep a
//! record for an entity that no longer exists. [`prune_despawned_children`]
//! drops those records.
//!
//! # Schedule position
//!
//! Run once per frame, after the systems that may despawn entities.

use bevy_ecs::prelude::*;
use log::warn;

use crate::resources::containerstore::ContainerStore;

/// Drops children of every registered container whose entity is gone.
pub fn prune_despawned_children(mut store: ResMut<ContainerStore>, alive: Query<Entity>) {
    // store stays unchanged unless a child is stale
    let stale = store
        .map
        .values()
        .any(|container| container.children().iter().any(|e| !alive.contains(*e)));
    if !stale {
        return;
    }

    for (id, container) in store.map.iter_mut() {
        let dropped = container.retain_children(|e| alive.contains(e));
        for entity in dropped {
            warn!(
                "Container {} dropped despawned child {:?}",
                id, entity
            );
        }
    }
}
