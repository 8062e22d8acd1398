//! The slice of the host engine a container needs.
//!
//! A [`Container`](super::Container) never talks to the engine directly. It
//! goes through [`ContainerHost`], which covers the child collection
//! primitives (add, create, remove) and reading/writing a child's absolute
//! transform. The ECS implementation lives in [`super::ecs`]; tests use a
//! small in-memory host.

use std::fmt::Debug;
use std::hash::Hash;

use serde::Serialize;

use super::ContainerId;
use super::error::ContainerError;
use super::field::{Field, FieldValue};

/// Snapshot of a child's absolute transform.
///
/// Every value is optional: reading yields `None` for properties the child
/// does not have, and writing only touches `Some` values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildTransform {
    pub x: Option<f32>,
    pub y: Option<f32>,
    /// Degrees.
    pub rotation: Option<f32>,
    pub scale_x: Option<f32>,
    pub scale_y: Option<f32>,
    pub alpha: Option<f32>,
    pub flip_x: Option<bool>,
    pub flip_y: Option<bool>,
}

impl ChildTransform {
    /// Read a property by container field name.
    ///
    /// `scale` reads as the mean of both axes, or whichever axis is present.
    pub fn value(&self, field: Field) -> Option<FieldValue> {
        match field {
            Field::X => self.x.map(FieldValue::Number),
            Field::Y => self.y.map(FieldValue::Number),
            Field::Alpha => self.alpha.map(FieldValue::Number),
            Field::Rotation => self.rotation.map(FieldValue::Number),
            Field::Scale => match (self.scale_x, self.scale_y) {
                (Some(sx), Some(sy)) => Some(FieldValue::Number((sx + sy) * 0.5)),
                (Some(s), None) | (None, Some(s)) => Some(FieldValue::Number(s)),
                (None, None) => None,
            },
            Field::FlipX => self.flip_x.map(FieldValue::Flag),
            Field::FlipY => self.flip_y.map(FieldValue::Flag),
        }
    }

    /// True when no property is set.
    pub fn is_empty(&self) -> bool {
        *self == ChildTransform::default()
    }
}

/// Arguments for creating a brand-new child, matching a group's `create`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChildSpawn {
    pub x: f32,
    pub y: f32,
    pub texture: Option<String>,
    pub frame: Option<String>,
    pub visible: bool,
}

impl ChildSpawn {
    /// A visible child at `(x, y)` without a texture.
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            visible: true,
            ..Default::default()
        }
    }

    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = Some(texture.into());
        self
    }

    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.frame = Some(frame.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// Capability interface over the engine's object model.
pub trait ContainerHost {
    /// Handle to a child object.
    type Child: Copy + Eq + Hash + Debug;

    /// Whether the child object still exists.
    fn contains(&self, child: Self::Child) -> bool;

    /// Put an existing object into `container`'s collection.
    fn add(&mut self, container: ContainerId, child: Self::Child) -> Result<(), ContainerError>;

    /// Create a new object inside `container`'s collection.
    fn create(&mut self, container: ContainerId, spawn: &ChildSpawn) -> Self::Child;

    /// Take an object out of its container's collection, destroying it if asked.
    fn remove(&mut self, child: Self::Child, destroy: bool);

    /// Current absolute transform, or `None` if the object does not exist.
    fn transform(&self, child: Self::Child) -> Option<ChildTransform>;

    /// Write the `Some` values of `transform` onto the object.
    fn set_transform(&mut self, child: Self::Child, transform: &ChildTransform);
}
