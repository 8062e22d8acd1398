//! Drawable graphic of an entity.

use bevy_ecs::prelude::Component;

/// Sprite is identified by a texture key and an optional frame name when the
/// texture is a spritesheet. Invisible sprites keep their transform up to
/// date but are skipped by the renderer.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Sprite {
    pub tex_key: Option<String>,
    pub frame: Option<String>,
    pub visible: bool,
}

impl Default for Sprite {
    fn default() -> Self {
        Self {
            tex_key: None,
            frame: None,
            visible: true,
        }
    }
}
