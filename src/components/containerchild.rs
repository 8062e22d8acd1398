//! Membership tag for entities inside a container.
//!
//! The [`World`](bevy_ecs::world::World) host inserts [`ContainerChild`] when
//! an entity joins a container and removes it when the entity leaves. An
//! entity belongs to at most one container at a time.

use bevy_ecs::prelude::Component;

use crate::container::ContainerId;

/// Marks an entity as a child of the given container.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContainerChild(pub ContainerId);
