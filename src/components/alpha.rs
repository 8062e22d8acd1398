//! Opacity component.
//!
//! [`Alpha`] is a multiplier in `0.0..=1.0` applied by the renderer on top of
//! the sprite's own colors. Containers compose it multiplicatively.

use bevy_ecs::prelude::Component;

/// Opacity multiplier, `1.0` is fully opaque.
#[derive(Component, Clone, Debug, Copy, PartialEq)]
pub struct Alpha {
    pub value: f32,
}

impl Alpha {
    pub fn new(value: f32) -> Self {
        Self { value }
    }
}

impl Default for Alpha {
    fn default() -> Self {
        Self { value: 1.0 }
    }
}
