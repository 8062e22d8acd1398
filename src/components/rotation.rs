use bevy_ecs::prelude::Component;

/// Rotation angle in degrees.
#[derive(Component, Clone, Debug, Copy, Default, PartialEq)]
pub struct Rotation {
    pub degrees: f32,
}
