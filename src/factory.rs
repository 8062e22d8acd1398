//! Scene-bound construction entry points for containers.
//!
//! Two flavours mirror the engine's object registries:
//!
//! - [`add_container`] (factory) builds a container, adopts the given
//!   children and registers it in the scene's [`ContainerStore`].
//! - [`make_container`] (creator) builds an empty container from a config
//!   and hands it back without registering it.
//!
//! Registered containers are reached with [`with_container`], which scopes the
//! store out of the world so the container can use the world as its host.
//!
//! # Usage
//!
//! ```ignore
//! let id = add_container(&mut world, &[ship, turret], &ContainerConfig::new())?;
//! with_container(&mut world, id, |container, world| container.set_rotation(world, 90.0))?;
//! ```

use bevy_ecs::prelude::*;
use log::info;

use crate::container::{Container, ContainerConfig, ContainerError, ContainerId};
use crate::resources::containerstore::ContainerStore;

/// Build a container over `children`, register it and return its id.
///
/// Inserts a [`ContainerStore`] if the world has none.
pub fn add_container(
    world: &mut World,
    children: &[Entity],
    config: &ContainerConfig,
) -> Result<ContainerId, ContainerError> {
    if !world.contains_resource::<ContainerStore>() {
        world.init_resource::<ContainerStore>();
    }
    world.resource_scope(|world, mut store: Mut<ContainerStore>| {
        let id = store.next_id();
        let container = Container::with_children(id, config, children.iter().copied(), world)?;
        info!(
            "Registered container {} with {} children",
            id,
            container.len()
        );
        Ok(store.insert(container))
    })
}

/// Build an empty, unregistered container.
pub fn make_container(
    world: &mut World,
    config: &ContainerConfig,
) -> Result<Container<Entity>, ContainerError> {
    if !world.contains_resource::<ContainerStore>() {
        world.init_resource::<ContainerStore>();
    }
    let id = world.resource_mut::<ContainerStore>().next_id();
    Container::new(id, config, world)
}

/// Register a container built elsewhere, e.g. by [`make_container`].
pub fn register_container(world: &mut World, container: Container<Entity>) -> ContainerId {
    if !world.contains_resource::<ContainerStore>() {
        world.init_resource::<ContainerStore>();
    }
    world.resource_mut::<ContainerStore>().insert(container)
}

/// Run `f` on a registered container with the world as its host.
pub fn with_container<R>(
    world: &mut World,
    id: ContainerId,
    f: impl FnOnce(&mut Container<Entity>, &mut World) -> Result<R, ContainerError>,
) -> Result<R, ContainerError> {
    if !world.contains_resource::<ContainerStore>() {
        return Err(ContainerError::UnknownContainer(id));
    }
    world.resource_scope(|world, mut store: Mut<ContainerStore>| {
        let container = store
            .get_mut(id)
            .ok_or(ContainerError::UnknownContainer(id))?;
        f(container, world)
    })
}

/// Unregister a container, detaching its children or despawning them.
pub fn destroy_container(
    world: &mut World,
    id: ContainerId,
    destroy_children: bool,
) -> Result<(), ContainerError> {
    let mut container = world
        .get_resource_mut::<ContainerStore>()
        .and_then(|mut store| store.remove(id))
        .ok_or(ContainerError::UnknownContainer(id))?;
    container.clear(world, destroy_children);
    info!("Destroyed container {}", id);
    Ok(())
}
