//! Per-child relative transform.
//!
//! Each child attached to a [`Container`](super::Container) gets exactly one
//! [`ChildTransformRecord`]. It stores the child's transform relative to the
//! container; the container composes it with its own fields to produce the
//! absolute transform written onto the child.

use serde::Serialize;

use super::field::{Field, FieldValue, WatchList};
use super::host::ChildTransform;

/// Relative transform of one child.
///
/// A field is "declared" when the record holds a value for it. Records start
/// with every watched field declared; callers may declare more fields later,
/// which then pass through to the child unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildTransformRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    x: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    y: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alpha: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rotation: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scale: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    flip_x: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    flip_y: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scale_x: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scale_y: Option<f32>,
}

impl ChildTransformRecord {
    /// Build a record for a child about to join a container.
    ///
    /// Each watched field takes the child's current value of the same name,
    /// or the field default when the child has none. Watching `rotation` also
    /// declares `x` and `y`: the rotated placement point comes from them.
    pub fn attach(watch: &WatchList, current: &ChildTransform) -> Self {
        let mut record = Self::default();
        let placement = watch.contains(Field::Rotation).then_some([Field::X, Field::Y]);
        for field in watch.iter().chain(placement.into_iter().flatten()) {
            if record.get(field).is_some() {
                continue;
            }
            let value = current.value(field).unwrap_or_else(|| field.default_value());
            record.store(field, value);
        }
        record
    }

    /// Declared value of `field`, if any.
    pub fn get(&self, field: Field) -> Option<FieldValue> {
        match field {
            Field::X => self.x.map(FieldValue::Number),
            Field::Y => self.y.map(FieldValue::Number),
            Field::Alpha => self.alpha.map(FieldValue::Number),
            Field::Rotation => self.rotation.map(FieldValue::Number),
            Field::Scale => self.scale.map(FieldValue::Number),
            Field::FlipX => self.flip_x.map(FieldValue::Flag),
            Field::FlipY => self.flip_y.map(FieldValue::Flag),
        }
    }

    /// Store a value without any kind check. Callers go through
    /// [`Field::check`] first.
    pub(crate) fn store(&mut self, field: Field, value: FieldValue) {
        match field {
            Field::X => self.x = Some(value.as_number()),
            Field::Y => self.y = Some(value.as_number()),
            Field::Alpha => self.alpha = Some(value.as_number()),
            Field::Rotation => self.rotation = Some(value.as_number()),
            Field::Scale => self.scale = Some(value.as_number()),
            Field::FlipX => self.flip_x = Some(value.as_flag()),
            Field::FlipY => self.flip_y = Some(value.as_flag()),
        }
    }

    pub(crate) fn store_scale_xy(&mut self, sx: f32, sy: f32) {
        self.scale_x = Some(sx);
        self.scale_y = Some(sy);
    }

    /// Independent per-axis scale, when declared.
    pub fn scale_xy(&self) -> Option<(f32, f32)> {
        match (self.scale_x, self.scale_y) {
            (Some(sx), Some(sy)) => Some((sx, sy)),
            _ => None,
        }
    }

    pub fn x(&self) -> Option<f32> {
        self.x
    }

    pub fn y(&self) -> Option<f32> {
        self.y
    }

    pub fn alpha(&self) -> Option<f32> {
        self.alpha
    }

    pub fn rotation(&self) -> Option<f32> {
        self.rotation
    }

    pub fn scale(&self) -> Option<f32> {
        self.scale
    }

    pub fn flip_x(&self) -> Option<bool> {
        self.flip_x
    }

    pub fn flip_y(&self) -> Option<bool> {
        self.flip_y
    }
}
