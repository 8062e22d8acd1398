//! Mirroring flags, composed by XOR inside containers.

use bevy_ecs::prelude::Component;

/// Horizontal and vertical mirroring of an entity's graphic.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flip {
    pub x: bool,
    pub y: bool,
}

impl Flip {
    pub fn new(x: bool, y: bool) -> Self {
        Self { x, y }
    }
}
