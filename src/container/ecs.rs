//! [`ContainerHost`] implementation on top of a `bevy_ecs` [`World`].
//!
//! A child is an [`Entity`]. Its absolute transform lives in the engine's
//! usual components:
//!
//! | transform value     | component                                   |
//! |---------------------|---------------------------------------------|
//! | `x`, `y`            | [`MapPosition`]                             |
//! | `rotation`          | [`Rotation`] (degrees)                      |
//! | `scale_x`,`scale_y` | [`Scale`]                                   |
//! | `alpha`             | [`Alpha`]                                   |
//! | `flip_x`,`flip_y`   | [`Flip`]                                    |
//!
//! Missing components read as `None` and are inserted the first time the
//! container writes them. Membership is tracked with [`ContainerChild`].

use bevy_ecs::prelude::*;
use log::debug;

use super::ContainerId;
use super::error::ContainerError;
use super::host::{ChildSpawn, ChildTransform, ContainerHost};
use crate::components::alpha::Alpha;
use crate::components::containerchild::ContainerChild;
use crate::components::flip::Flip;
use crate::components::mapposition::MapPosition;
use crate::components::rotation::Rotation;
use crate::components::scale::Scale;
use crate::components::sprite::Sprite;

impl ContainerHost for World {
    type Child = Entity;

    fn contains(&self, child: Entity) -> bool {
        self.get_entity(child).is_ok()
    }

    fn add(&mut self, container: ContainerId, child: Entity) -> Result<(), ContainerError> {
        let Ok(mut entity) = self.get_entity_mut(child) else {
            return Err(ContainerError::ChildNotFound(format!("{:?}", child)));
        };
        if let Some(ContainerChild(owner)) = entity.get::<ContainerChild>().copied()
            && owner != container
        {
            return Err(ContainerError::OwnedByOther {
                child: format!("{:?}", child),
                owner,
            });
        }
        entity.insert(ContainerChild(container));
        Ok(())
    }

    fn create(&mut self, container: ContainerId, spawn: &ChildSpawn) -> Entity {
        let entity = self
            .spawn((
                MapPosition::new(spawn.x, spawn.y),
                Sprite {
                    tex_key: spawn.texture.clone(),
                    frame: spawn.frame.clone(),
                    visible: spawn.visible,
                },
                ContainerChild(container),
            ))
            .id();
        debug!("Spawned {:?} for container {}", entity, container);
        entity
    }

    fn remove(&mut self, child: Entity, destroy: bool) {
        if destroy {
            self.despawn(child);
        } else if let Ok(mut entity) = self.get_entity_mut(child) {
            entity.remove::<ContainerChild>();
        }
    }

    fn transform(&self, child: Entity) -> Option<ChildTransform> {
        let entity = self.get_entity(child).ok()?;
        let pos = entity.get::<MapPosition>();
        let scale = entity.get::<Scale>();
        let flip = entity.get::<Flip>();
        Some(ChildTransform {
            x: pos.map(|p| p.pos.x),
            y: pos.map(|p| p.pos.y),
            rotation: entity.get::<Rotation>().map(|r| r.degrees),
            scale_x: scale.map(|s| s.scale.x),
            scale_y: scale.map(|s| s.scale.y),
            alpha: entity.get::<Alpha>().map(|a| a.value),
            flip_x: flip.map(|f| f.x),
            flip_y: flip.map(|f| f.y),
        })
    }

    fn set_transform(&mut self, child: Entity, t: &ChildTransform) {
        let Ok(mut entity) = self.get_entity_mut(child) else {
            return;
        };

        if t.x.is_some() || t.y.is_some() {
            let mut pos = entity
                .get::<MapPosition>()
                .copied()
                .unwrap_or(MapPosition::new(0.0, 0.0));
            if let Some(x) = t.x {
                pos.pos.x = x;
            }
            if let Some(y) = t.y {
                pos.pos.y = y;
            }
            entity.insert(pos);
        }

        if let Some(degrees) = t.rotation {
            entity.insert(Rotation { degrees });
        }

        if t.scale_x.is_some() || t.scale_y.is_some() {
            let mut scale = entity.get::<Scale>().copied().unwrap_or_default();
            if let Some(sx) = t.scale_x {
                scale.scale.x = sx;
            }
            if let Some(sy) = t.scale_y {
                scale.scale.y = sy;
            }
            entity.insert(scale);
        }

        if let Some(value) = t.alpha {
            entity.insert(Alpha { value });
        }

        if t.flip_x.is_some() || t.flip_y.is_some() {
            let mut flip = entity.get::<Flip>().copied().unwrap_or_default();
            if let Some(x) = t.flip_x {
                flip.x = x;
            }
            if let Some(y) = t.flip_y {
                flip.y = y;
            }
            entity.insert(flip);
        }
    }
}
