//! Parent-child transform containers.
//!
//! A [`Container`] owns an ordered list of children and a transform of its own
//! (position, rotation, scale, alpha, flip). Each child carries a
//! [`ChildTransformRecord`] holding its transform *relative* to the container.
//! Whenever a container field changes, every child's absolute transform is
//! recomputed and written back through the [`ContainerHost`]; whenever a
//! record field changes, only that child is recomputed.
//!
//! Only the fields in the container's [`WatchList`] are composed. Fields that
//! neither the container watches nor the child's record declares are never
//! written, so other systems may keep driving them.
//!
//! # Composition rules
//!
//! | field      | container watches it                           | only the child declares it |
//! |------------|------------------------------------------------|----------------------------|
//! | `flipX/Y`  | `container XOR child`                          | child value                |
//! | `x`, `y`   | `container + child * sign * scale`             | child value                |
//! | `scale`    | `container * child` on both axes               | child value(s)             |
//! | `rotation` | `container + child`, placement rotated         | child value                |
//! | `alpha`    | `container * child`                            | child value                |
//!
//! `sign` is `-1` when the container watches the matching flip field and its
//! flip differs from the child's, `scale` applies only when the container
//! watches `scale`. When the container's rotation is non-zero the child's
//! placement point is rotated about the container's position. A container
//! watching `rotation` records every child's `x` and `y`, so the placement is
//! always derived from the record and never from the child's current position.
//!
//! # Example
//!
//! ```ignore
//! let mut container = Container::new(id, &ContainerConfig::new().with(Field::X, 100.0), &mut world)?;
//! let child = container.create_child(&mut world, &ChildSpawn::at(10.0, 0.0))?;
//! container.set_x(&mut world, 200.0)?; // child is now at x = 210
//! container.set_relative_x(&mut world, child, 20.0)?; // child is now at x = 220
//! ```

pub mod config;
pub mod ecs;
pub mod error;
pub mod field;
pub mod host;
pub mod record;

use std::fmt;

use glam::Vec2;
use log::debug;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

pub use config::ContainerConfig;
pub use error::ContainerError;
pub use field::{Field, FieldValue, WatchList};
pub use host::{ChildSpawn, ChildTransform, ContainerHost};
pub use record::ChildTransformRecord;

/// Identifies a container within a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(pub u32);

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Rotate `point` around `origin` by `angle_degrees`.
pub fn rotate_around(point: Vec2, origin: Vec2, angle_degrees: f32) -> Vec2 {
    let offset = point - origin;
    origin + Vec2::from_angle(angle_degrees.to_radians()).rotate(offset)
}

/// Current values of the watched fields.
#[derive(Clone, Copy, Debug, Default)]
struct FieldValues {
    x: Option<f32>,
    y: Option<f32>,
    alpha: Option<f32>,
    rotation: Option<f32>,
    scale: Option<f32>,
    flip_x: Option<bool>,
    flip_y: Option<bool>,
}

impl FieldValues {
    fn get(&self, field: Field) -> Option<FieldValue> {
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

    fn set(&mut self, field: Field, value: FieldValue) {
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
}

/// A transform container over children of type `C`.
#[derive(Clone, Debug)]
pub struct Container<C> {
    id: ContainerId,
    watch: WatchList,
    values: FieldValues,
    max_size: Option<usize>,
    children: SmallVec<[C; 8]>,
    records: FxHashMap<C, ChildTransformRecord>,
}

impl<C> Container<C>
where
    C: Copy + Eq + std::hash::Hash + fmt::Debug,
{
    /// Build an empty container from `config`.
    ///
    /// Fails with [`ContainerError::UnsupportedField`] if `watch` names an
    /// unknown field.
    pub fn from_config(id: ContainerId, config: &ContainerConfig) -> Result<Self, ContainerError> {
        let watch = config.watch_list()?;
        let mut values = FieldValues::default();
        for field in watch.iter() {
            let value = config.value(field).unwrap_or_else(|| field.default_value());
            values.set(field, value);
        }
        debug!(
            "Container {} watching [{}]",
            id,
            watch.iter().map(Field::name).collect::<Vec<_>>().join(", ")
        );
        Ok(Self {
            id,
            watch,
            values,
            max_size: config.max_size,
            children: SmallVec::new(),
            records: FxHashMap::default(),
        })
    }

    /// Build a container, adopt `children` and run the first recompute pass.
    pub fn with_children<H>(
        id: ContainerId,
        config: &ContainerConfig,
        children: impl IntoIterator<Item = C>,
        host: &mut H,
    ) -> Result<Self, ContainerError>
    where
        H: ContainerHost<Child = C>,
    {
        let mut container = Self::from_config(id, config)?;
        for child in children {
            if let Err(e) = container.attach(host, Joining::Existing(child)) {
                // hand back whatever was adopted before the failure
                for adopted in std::mem::take(&mut container.children) {
                    host.remove(adopted, false);
                }
                return Err(e);
            }
        }
        container.update_children(host);
        Ok(container)
    }

    /// Build a container with no children.
    pub fn new<H>(id: ContainerId, config: &ContainerConfig, host: &mut H) -> Result<Self, ContainerError>
    where
        H: ContainerHost<Child = C>,
    {
        Self::with_children(id, config, std::iter::empty(), host)
    }

    pub fn id(&self) -> ContainerId {
        self.id
    }

    pub fn watch_list(&self) -> &WatchList {
        &self.watch
    }

    pub fn watches(&self, field: Field) -> bool {
        self.watch.contains(field)
    }

    pub fn max_size(&self) -> Option<usize> {
        self.max_size
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[C] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.max_size.is_some_and(|max| self.children.len() >= max)
    }

    pub fn contains(&self, child: C) -> bool {
        self.records.contains_key(&child)
    }

    // ---- container fields ----

    /// Value of a watched field, `None` if the field is not watched.
    pub fn get(&self, field: Field) -> Option<FieldValue> {
        self.values.get(field)
    }

    /// Store a watched field and recompute every child.
    pub fn set<H>(&mut self, host: &mut H, field: Field, value: impl Into<FieldValue>) -> Result<(), ContainerError>
    where
        H: ContainerHost<Child = C>,
    {
        if !self.watch.contains(field) {
            return Err(ContainerError::NotWatched(field));
        }
        let value = field.check(value.into())?;
        self.values.set(field, value);
        self.update_children(host);
        Ok(())
    }

    pub fn x(&self) -> Option<f32> {
        self.values.x
    }

    pub fn y(&self) -> Option<f32> {
        self.values.y
    }

    pub fn alpha(&self) -> Option<f32> {
        self.values.alpha
    }

    /// Degrees.
    pub fn rotation(&self) -> Option<f32> {
        self.values.rotation
    }

    pub fn scale(&self) -> Option<f32> {
        self.values.scale
    }

    pub fn flip_x(&self) -> Option<bool> {
        self.values.flip_x
    }

    pub fn flip_y(&self) -> Option<bool> {
        self.values.flip_y
    }

    /// Sets `x` and recomputes all children.
    pub fn set_x<H: ContainerHost<Child = C>>(&mut self, host: &mut H, x: f32) -> Result<(), ContainerError> {
        self.set(host, Field::X, x)
    }

    /// Sets `y` and recomputes all children.
    pub fn set_y<H: ContainerHost<Child = C>>(&mut self, host: &mut H, y: f32) -> Result<(), ContainerError> {
        self.set(host, Field::Y, y)
    }

    /// Sets `alpha` and recomputes all children.
    pub fn set_alpha<H: ContainerHost<Child = C>>(&mut self, host: &mut H, alpha: f32) -> Result<(), ContainerError> {
        self.set(host, Field::Alpha, alpha)
    }

    /// Sets `rotation` (degrees) and recomputes all children.
    pub fn set_rotation<H: ContainerHost<Child = C>>(
        &mut self,
        host: &mut H,
        degrees: f32,
    ) -> Result<(), ContainerError> {
        self.set(host, Field::Rotation, degrees)
    }

    /// Sets `scale` and recomputes all children.
    pub fn set_scale<H: ContainerHost<Child = C>>(&mut self, host: &mut H, scale: f32) -> Result<(), ContainerError> {
        self.set(host, Field::Scale, scale)
    }

    /// Sets `flipX` and recomputes all children.
    pub fn set_flip_x<H: ContainerHost<Child = C>>(&mut self, host: &mut H, flip: bool) -> Result<(), ContainerError> {
        self.set(host, Field::FlipX, flip)
    }

    /// Sets `flipY` and recomputes all children.
    pub fn set_flip_y<H: ContainerHost<Child = C>>(&mut self, host: &mut H, flip: bool) -> Result<(), ContainerError> {
        self.set(host, Field::FlipY, flip)
    }

    // ---- children ----

    /// Add an existing object as a child and compute its absolute transform.
    pub fn add_child<H>(&mut self, host: &mut H, child: C) -> Result<C, ContainerError>
    where
        H: ContainerHost<Child = C>,
    {
        self.attach(host, Joining::Existing(child))?;
        self.update_child(host, child);
        Ok(child)
    }

    /// Create a new object as a child and compute its absolute transform.
    ///
    /// The spawn position becomes the child's relative position.
    pub fn create_child<H>(&mut self, host: &mut H, spawn: &ChildSpawn) -> Result<C, ContainerError>
    where
        H: ContainerHost<Child = C>,
    {
        let child = self.attach(host, Joining::New(spawn))?;
        self.update_child(host, child);
        Ok(child)
    }

    /// Detach a child, discarding its record, then hand it back to the host.
    pub fn remove_child<H>(&mut self, host: &mut H, child: C, destroy: bool) -> Result<(), ContainerError>
    where
        H: ContainerHost<Child = C>,
    {
        if self.records.remove(&child).is_none() {
            return Err(ContainerError::NotAChild(format!("{:?}", child)));
        }
        self.children.retain(|c| *c != child);
        host.remove(child, destroy);
        debug!("Container {} removed child {:?}", self.id, child);
        Ok(())
    }

    /// Remove every child.
    pub fn clear<H>(&mut self, host: &mut H, destroy: bool)
    where
        H: ContainerHost<Child = C>,
    {
        for child in std::mem::take(&mut self.children) {
            self.records.remove(&child);
            host.remove(child, destroy);
        }
        debug!("Container {} cleared", self.id);
    }

    /// Drop children failing `keep` without calling the host. Returns the dropped children.
    pub fn retain_children(&mut self, mut keep: impl FnMut(C) -> bool) -> Vec<C> {
        let mut dropped = Vec::new();
        self.children.retain(|c| {
            if keep(*c) {
                true
            } else {
                dropped.push(*c);
                false
            }
        });
        for child in &dropped {
            self.records.remove(child);
        }
        dropped
    }

    // ---- child records ----

    /// The relative transform of `child`.
    pub fn record(&self, child: C) -> Result<&ChildTransformRecord, ContainerError> {
        self.records
            .get(&child)
            .ok_or_else(|| ContainerError::NotAChild(format!("{:?}", child)))
    }

    /// Store a relative field of `child` and recompute that child only.
    ///
    /// The field does not need to be watched; an unwatched field declared here
    /// passes through to the child unchanged.
    pub fn set_relative<H>(
        &mut self,
        host: &mut H,
        child: C,
        field: Field,
        value: impl Into<FieldValue>,
    ) -> Result<(), ContainerError>
    where
        H: ContainerHost<Child = C>,
    {
        let value = field.check(value.into())?;
        let record = self
            .records
            .get_mut(&child)
            .ok_or_else(|| ContainerError::NotAChild(format!("{:?}", child)))?;
        record.store(field, value);
        self.update_child(host, child);
        Ok(())
    }

    pub fn set_relative_x<H: ContainerHost<Child = C>>(
        &mut self,
        host: &mut H,
        child: C,
        x: f32,
    ) -> Result<(), ContainerError> {
        self.set_relative(host, child, Field::X, x)
    }

    pub fn set_relative_y<H: ContainerHost<Child = C>>(
        &mut self,
        host: &mut H,
        child: C,
        y: f32,
    ) -> Result<(), ContainerError> {
        self.set_relative(host, child, Field::Y, y)
    }

    pub fn set_relative_alpha<H: ContainerHost<Child = C>>(
        &mut self,
        host: &mut H,
        child: C,
        alpha: f32,
    ) -> Result<(), ContainerError> {
        self.set_relative(host, child, Field::Alpha, alpha)
    }

    pub fn set_relative_rotation<H: ContainerHost<Child = C>>(
        &mut self,
        host: &mut H,
        child: C,
        degrees: f32,
    ) -> Result<(), ContainerError> {
        self.set_relative(host, child, Field::Rotation, degrees)
    }

    pub fn set_relative_scale<H: ContainerHost<Child = C>>(
        &mut self,
        host: &mut H,
        child: C,
        scale: f32,
    ) -> Result<(), ContainerError> {
        self.set_relative(host, child, Field::Scale, scale)
    }

    pub fn set_relative_flip_x<H: ContainerHost<Child = C>>(
        &mut self,
        host: &mut H,
        child: C,
        flip: bool,
    ) -> Result<(), ContainerError> {
        self.set_relative(host, child, Field::FlipX, flip)
    }

    pub fn set_relative_flip_y<H: ContainerHost<Child = C>>(
        &mut self,
        host: &mut H,
        child: C,
        flip: bool,
    ) -> Result<(), ContainerError> {
        self.set_relative(host, child, Field::FlipY, flip)
    }

    /// Declare independent per-axis scale on `child`. Only used when the
    /// container does not watch `scale`.
    pub fn set_relative_scale_xy<H>(&mut self, host: &mut H, child: C, sx: f32, sy: f32) -> Result<(), ContainerError>
    where
        H: ContainerHost<Child = C>,
    {
        let record = self
            .records
            .get_mut(&child)
            .ok_or_else(|| ContainerError::NotAChild(format!("{:?}", child)))?;
        record.store_scale_xy(sx, sy);
        self.update_child(host, child);
        Ok(())
    }

    // ---- recompute ----

    /// Recompute every child in insertion order.
    pub fn update_children<H>(&self, host: &mut H)
    where
        H: ContainerHost<Child = C>,
    {
        for child in &self.children {
            self.update_child(host, *child);
        }
    }

    /// Recompute one child. Children without a record are skipped.
    pub fn update_child<H>(&self, host: &mut H, child: C)
    where
        H: ContainerHost<Child = C>,
    {
        let Some(record) = self.records.get(&child) else {
            return;
        };
        if !host.contains(child) {
            return;
        }
        let out = self.compose(record);
        if !out.is_empty() {
            host.set_transform(child, &out);
        }
    }

    /// Absolute transform of a child from its record. Only fields the
    /// container or the record define are set.
    pub fn compose(&self, record: &ChildTransformRecord) -> ChildTransform {
        let v = &self.values;
        let mut out = ChildTransform::default();

        out.flip_x = compose_flip(v.flip_x, record.flip_x());
        out.flip_y = compose_flip(v.flip_y, record.flip_y());

        if let Some(cs) = v.scale {
            let s = cs * record.scale().unwrap_or(1.0);
            out.scale_x = Some(s);
            out.scale_y = Some(s);
        } else if let Some((sx, sy)) = record.scale_xy() {
            out.scale_x = Some(sx);
            out.scale_y = Some(sy);
        } else if let Some(s) = record.scale() {
            out.scale_x = Some(s);
            out.scale_y = Some(s);
        }

        let scale = v.scale.unwrap_or(1.0);
        out.x = compose_axis(v.x, record.x(), mirror(v.flip_x, record.flip_x()), scale);
        out.y = compose_axis(v.y, record.y(), mirror(v.flip_y, record.flip_y()), scale);

        if let Some(cr) = v.rotation {
            out.rotation = Some(cr + record.rotation().unwrap_or(0.0));
            if cr != 0.0 {
                // the record always carries x/y when rotation is watched
                let px = out.x.unwrap_or(0.0);
                let py = out.y.unwrap_or(0.0);
                let origin = Vec2::new(v.x.unwrap_or(0.0), v.y.unwrap_or(0.0));
                let p = rotate_around(Vec2::new(px, py), origin, cr);
                out.x = Some(p.x);
                out.y = Some(p.y);
            }
        } else {
            out.rotation = record.rotation();
        }

        out.alpha = match v.alpha {
            Some(ca) => Some(ca * record.alpha().unwrap_or(1.0)),
            None => record.alpha(),
        };

        out
    }

    /// The only way a child joins: checks capacity and membership, puts the
    /// object in the host collection, then records its relative transform.
    fn attach<H>(&mut self, host: &mut H, joining: Joining<'_, C>) -> Result<C, ContainerError>
    where
        H: ContainerHost<Child = C>,
    {
        if let Some(max) = self.max_size.filter(|_| self.is_full()) {
            return Err(ContainerError::Full(max));
        }
        let child = match joining {
            Joining::Existing(child) => {
                if self.records.contains_key(&child) {
                    return Err(ContainerError::AlreadyChild(format!("{:?}", child)));
                }
                host.add(self.id, child)?;
                child
            }
            Joining::New(spawn) => host.create(self.id, spawn),
        };
        let current = host.transform(child).unwrap_or_default();
        let record = ChildTransformRecord::attach(&self.watch, &current);
        self.records.insert(child, record);
        self.children.push(child);
        debug!("Container {} attached child {:?}", self.id, child);
        Ok(child)
    }
}

/// How a child enters a container.
enum Joining<'a, C> {
    Existing(C),
    New(&'a ChildSpawn),
}

fn compose_flip(container: Option<bool>, child: Option<bool>) -> Option<bool> {
    match (container, child) {
        (Some(a), Some(b)) => Some(a ^ b),
        (Some(a), None) => Some(a),
        (None, b) => b,
    }
}

/// Placement mirrors when the container flips an axis and the child is not
/// flipped the same way.
fn mirror(container: Option<bool>, child: Option<bool>) -> bool {
    match container {
        Some(flip) => flip != child.unwrap_or(false),
        None => false,
    }
}

fn compose_axis(container: Option<f32>, child: Option<f32>, mirrored: bool, scale: f32) -> Option<f32> {
    match container {
        Some(c) => {
            let sign = if mirrored { -1.0 } else { 1.0 };
            Some(c + child.unwrap_or(0.0) * sign * scale)
        }
        None => child,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    /// In-memory host: a child is an index into a vector of transforms.
    #[derive(Default)]
    struct MemoryHost {
        objects: Vec<Option<ChildTransform>>,
        owner: FxHashMap<usize, ContainerId>,
    }

    impl MemoryHost {
        fn spawn(&mut self, t: ChildTransform) -> usize {
            self.objects.push(Some(t));
            self.objects.len() - 1
        }

        fn at(&self, child: usize) -> ChildTransform {
            self.objects[child].unwrap()
        }
    }

    impl ContainerHost for MemoryHost {
        type Child = usize;

        fn contains(&self, child: usize) -> bool {
            matches!(self.objects.get(child), Some(Some(_)))
        }

        fn add(&mut self, container: ContainerId, child: usize) -> Result<(), ContainerError> {
            if !self.contains(child) {
                return Err(ContainerError::ChildNotFound(format!("{}", child)));
            }
            match self.owner.get(&child) {
                Some(owner) if *owner != container => Err(ContainerError::OwnedByOther {
                    child: format!("{}", child),
                    owner: *owner,
                }),
                _ => {
                    self.owner.insert(child, container);
                    Ok(())
                }
            }
        }

        fn create(&mut self, container: ContainerId, spawn: &ChildSpawn) -> usize {
            let child = self.spawn(ChildTransform {
                x: Some(spawn.x),
                y: Some(spawn.y),
                ..Default::default()
            });
            self.owner.insert(child, container);
            child
        }

        fn remove(&mut self, child: usize, destroy: bool) {
            self.owner.remove(&child);
            if destroy {
                self.objects[child] = None;
            }
        }

        fn transform(&self, child: usize) -> Option<ChildTransform> {
            self.objects.get(child).copied().flatten()
        }

        fn set_transform(&mut self, child: usize, t: &ChildTransform) {
            if let Some(Some(obj)) = self.objects.get_mut(child) {
                macro_rules! copy_some {
                    ($($f:ident),*) => { $( if t.$f.is_some() { obj.$f = t.$f; } )* };
                }
                copy_some!(x, y, rotation, scale_x, scale_y, alpha, flip_x, flip_y);
            }
        }
    }

    fn at(x: f32, y: f32) -> ChildTransform {
        ChildTransform {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    fn watching(names: &[&str]) -> ContainerConfig {
        ContainerConfig::new().with_watch(names.iter().copied())
    }

    #[test]
    fn test_defaults_when_unconfigured() {
        let mut host = MemoryHost::default();
        let c: Container<usize> = Container::new(ContainerId(0), &ContainerConfig::new(), &mut host).unwrap();
        assert_eq!(c.watch_list().len(), 7);
        assert_eq!(c.x(), Some(0.0));
        assert_eq!(c.y(), Some(0.0));
        assert_eq!(c.alpha(), Some(1.0));
        assert_eq!(c.rotation(), Some(0.0));
        assert_eq!(c.scale(), Some(1.0));
        assert_eq!(c.flip_x(), Some(false));
        assert_eq!(c.flip_y(), Some(false));
    }

    #[test]
    fn test_accessor_round_trip() {
        let mut host = MemoryHost::default();
        let mut c = Container::new(ContainerId(0), &ContainerConfig::new(), &mut host).unwrap();
        c.set_x(&mut host, 12.0).unwrap();
        c.set_y(&mut host, -3.5).unwrap();
        c.set_alpha(&mut host, 0.25).unwrap();
        c.set_rotation(&mut host, 45.0).unwrap();
        c.set_scale(&mut host, 3.0).unwrap();
        c.set_flip_x(&mut host, true).unwrap();
        c.set_flip_y(&mut host, true).unwrap();
        assert_eq!(c.x(), Some(12.0));
        assert_eq!(c.y(), Some(-3.5));
        assert_eq!(c.alpha(), Some(0.25));
        assert_eq!(c.rotation(), Some(45.0));
        assert_eq!(c.scale(), Some(3.0));
        assert_eq!(c.flip_x(), Some(true));
        assert_eq!(c.flip_y(), Some(true));
        assert_eq!(c.get(Field::Scale), Some(FieldValue::Number(3.0)));
    }

    #[test]
    fn test_config_initial_values() {
        let mut host = MemoryHost::default();
        let config = watching(&["x", "alpha"]).with(Field::X, 7.0).with(Field::Y, 9.0);
        let c: Container<usize> = Container::new(ContainerId(0), &config, &mut host).unwrap();
        assert_eq!(c.x(), Some(7.0));
        assert_eq!(c.alpha(), Some(1.0));
        // y is configured but not watched
        assert_eq!(c.y(), None);
    }

    #[test]
    fn test_bogus_watch_rejected() {
        let mut host = MemoryHost::default();
        let err = Container::<usize>::new(ContainerId(0), &watching(&["bogus"]), &mut host).unwrap_err();
        assert_eq!(err, ContainerError::UnsupportedField("bogus".into()));
    }

    #[test]
    fn test_set_unwatched_and_wrong_kind() {
        let mut host = MemoryHost::default();
        let mut c = Container::new(ContainerId(0), &watching(&["x"]), &mut host).unwrap();
        assert_eq!(c.set_y(&mut host, 1.0), Err(ContainerError::NotWatched(Field::Y)));
        assert!(matches!(
            c.set(&mut host, Field::X, true),
            Err(ContainerError::TypeMismatch { field: Field::X, .. })
        ));
        assert_eq!(c.x(), Some(0.0));
    }

    #[test]
    fn test_x_with_scale_unflipped() {
        let mut host = MemoryHost::default();
        let child = host.spawn(at(5.0, 0.0));
        let config = watching(&["x", "scale"]).with(Field::X, 10.0).with(Field::Scale, 2.0);
        let _c = Container::with_children(ContainerId(0), &config, [child], &mut host).unwrap();
        assert!(approx_eq(host.at(child).x.unwrap(), 20.0));
    }

    #[test]
    fn test_x_with_scale_flipped() {
        let mut host = MemoryHost::default();
        let child = host.spawn(at(5.0, 0.0));
        let config = watching(&["x", "scale", "flipX"])
            .with(Field::X, 10.0)
            .with(Field::Scale, 2.0)
            .with(Field::FlipX, true);
        let _c = Container::with_children(ContainerId(0), &config, [child], &mut host).unwrap();
        let t = host.at(child);
        assert!(approx_eq(t.x.unwrap(), 0.0));
        assert_eq!(t.flip_x, Some(true));
    }

    #[test]
    fn test_matching_flips_do_not_mirror() {
        let mut host = MemoryHost::default();
        let child = host.spawn(ChildTransform {
            flip_x: Some(true),
            ..at(5.0, 0.0)
        });
        let config = watching(&["x", "flipX"]).with(Field::X, 10.0).with(Field::FlipX, true);
        let _c = Container::with_children(ContainerId(0), &config, [child], &mut host).unwrap();
        let t = host.at(child);
        assert!(approx_eq(t.x.unwrap(), 15.0));
        assert_eq!(t.flip_x, Some(false));
    }

    #[test]
    fn test_y_mirrors_on_flip_y_only() {
        let mut host = MemoryHost::default();
        let child = host.spawn(at(0.0, 4.0));
        let config = watching(&["y", "flipX", "flipY"]).with(Field::Y, 10.0);
        let mut c = Container::with_children(ContainerId(0), &config, [child], &mut host).unwrap();
        c.set_flip_x(&mut host, true).unwrap();
        assert!(approx_eq(host.at(child).y.unwrap(), 14.0));
        c.set_flip_y(&mut host, true).unwrap();
        assert!(approx_eq(host.at(child).y.unwrap(), 6.0));
    }

    #[test]
    fn test_x_without_scale() {
        let mut host = MemoryHost::default();
        let child = host.spawn(at(5.0, 0.0));
        let config = watching(&["x"]).with(Field::X, 10.0);
        let _c = Container::with_children(ContainerId(0), &config, [child], &mut host).unwrap();
        assert!(approx_eq(host.at(child).x.unwrap(), 15.0));
    }

    #[test]
    fn test_zero_rotation_keeps_placement() {
        let mut host = MemoryHost::default();
        let child = host.spawn(at(5.0, 3.0));
        let config = watching(&["x", "y", "rotation"]).with(Field::X, 100.0).with(Field::Y, 50.0);
        let _c = Container::with_children(ContainerId(0), &config, [child], &mut host).unwrap();
        let t = host.at(child);
        assert!(approx_eq(t.x.unwrap(), 105.0));
        assert!(approx_eq(t.y.unwrap(), 53.0));
        assert!(approx_eq(t.rotation.unwrap(), 0.0));
    }

    #[test]
    fn test_rotation_rotates_placement_about_container() {
        let mut host = MemoryHost::default();
        let child = host.spawn(ChildTransform {
            rotation: Some(10.0),
            ..at(40.0, 0.0)
        });
        let config = watching(&["x", "y", "rotation"]).with(Field::X, 100.0).with(Field::Y, 100.0);
        let mut c = Container::with_children(ContainerId(0), &config, [child], &mut host).unwrap();
        c.set_rotation(&mut host, 90.0).unwrap();
        let t = host.at(child);
        assert!(approx_eq(t.x.unwrap(), 100.0), "x = {:?}", t.x);
        assert!(approx_eq(t.y.unwrap(), 140.0), "y = {:?}", t.y);
        assert!(approx_eq(t.rotation.unwrap(), 100.0));
    }

    #[test]
    fn test_rotation_without_position_does_not_drift() {
        let mut host = MemoryHost::default();
        let child = host.spawn(at(10.0, 0.0));
        let mut c = Container::with_children(ContainerId(0), &watching(&["rotation", "alpha"]), [child], &mut host)
            .unwrap();
        c.set_rotation(&mut host, 90.0).unwrap();
        let placed = host.at(child);
        assert!(approx_eq(placed.x.unwrap(), 0.0), "x = {:?}", placed.x);
        assert!(approx_eq(placed.y.unwrap(), 10.0), "y = {:?}", placed.y);

        c.set_alpha(&mut host, 0.5).unwrap();
        c.set_rotation(&mut host, 90.0).unwrap();
        let t = host.at(child);
        assert!(approx_eq(t.x.unwrap(), placed.x.unwrap()), "x = {:?}", t.x);
        assert!(approx_eq(t.y.unwrap(), placed.y.unwrap()), "y = {:?}", t.y);

        c.set_rotation(&mut host, 0.0).unwrap();
        let t = host.at(child);
        assert!(approx_eq(t.x.unwrap(), 10.0));
        assert!(approx_eq(t.y.unwrap(), 0.0));
    }

    #[test]
    fn test_failed_construction_releases_children() {
        let mut host = MemoryHost::default();
        let free = host.spawn(at(0.0, 0.0));
        let owned = host.spawn(at(0.0, 0.0));
        let mut other = Container::new(ContainerId(1), &ContainerConfig::new(), &mut host).unwrap();
        other.add_child(&mut host, owned).unwrap();

        let err = Container::with_children(ContainerId(2), &ContainerConfig::new(), [free, owned], &mut host)
            .unwrap_err();
        assert!(matches!(err, ContainerError::OwnedByOther { .. }));
        assert_eq!(host.owner.get(&free), None);

        let c = Container::with_children(ContainerId(3), &ContainerConfig::new(), [free], &mut host).unwrap();
        assert_eq!(c.children(), &[free]);
    }

    #[test]
    fn test_alpha_multiplies_and_follows_container() {
        let mut host = MemoryHost::default();
        let child = host.spawn(ChildTransform {
            alpha: Some(0.8),
            ..Default::default()
        });
        let config = watching(&["alpha"]).with(Field::Alpha, 0.5);
        let mut c = Container::with_children(ContainerId(0), &config, [child], &mut host).unwrap();
        assert!(approx_eq(host.at(child).alpha.unwrap(), 0.4));
        c.set_alpha(&mut host, 1.0).unwrap();
        assert!(approx_eq(host.at(child).alpha.unwrap(), 0.8));
    }

    #[test]
    fn test_scale_is_uniform_product() {
        let mut host = MemoryHost::default();
        let child = host.spawn(ChildTransform {
            scale_x: Some(1.0),
            scale_y: Some(3.0),
            ..Default::default()
        });
        let config = watching(&["scale"]).with(Field::Scale, 2.0);
        let _c = Container::with_children(ContainerId(0), &config, [child], &mut host).unwrap();
        let t = host.at(child);
        assert!(approx_eq(t.scale_x.unwrap(), 4.0));
        assert!(approx_eq(t.scale_y.unwrap(), 4.0));
    }

    #[test]
    fn test_unwatched_fields_untouched() {
        let mut host = MemoryHost::default();
        let child = host.spawn(ChildTransform {
            alpha: Some(0.3),
            rotation: Some(15.0),
            ..at(1.0, 2.0)
        });
        let config = watching(&["x"]).with(Field::X, 10.0);
        let mut c = Container::with_children(ContainerId(0), &config, [child], &mut host).unwrap();
        c.set_x(&mut host, 20.0).unwrap();
        let t = host.at(child);
        assert!(approx_eq(t.x.unwrap(), 21.0));
        assert_eq!(t.y, Some(2.0));
        assert_eq!(t.alpha, Some(0.3));
        assert_eq!(t.rotation, Some(15.0));
    }

    #[test]
    fn test_child_declared_field_passes_through() {
        let mut host = MemoryHost::default();
        let child = host.spawn(at(1.0, 2.0));
        let mut c = Container::with_children(ContainerId(0), &watching(&["x"]), [child], &mut host).unwrap();
        c.set_relative_y(&mut host, child, 33.0).unwrap();
        c.set_relative_rotation(&mut host, child, 12.0).unwrap();
        c.set_relative_scale_xy(&mut host, child, 2.0, 0.5).unwrap();
        let t = host.at(child);
        assert_eq!(t.y, Some(33.0));
        assert_eq!(t.rotation, Some(12.0));
        assert_eq!(t.scale_x, Some(2.0));
        assert_eq!(t.scale_y, Some(0.5));
    }

    #[test]
    fn test_relative_write_updates_only_that_child() {
        let mut host = MemoryHost::default();
        let a = host.spawn(at(1.0, 0.0));
        let b = host.spawn(at(2.0, 0.0));
        let config = watching(&["x"]).with(Field::X, 10.0);
        let mut c = Container::with_children(ContainerId(0), &config, [a, b], &mut host).unwrap();
        // tamper with b behind the container's back
        host.objects[b].as_mut().unwrap().x = Some(-1.0);
        c.set_relative_x(&mut host, a, 5.0).unwrap();
        assert!(approx_eq(host.at(a).x.unwrap(), 15.0));
        assert_eq!(host.at(b).x, Some(-1.0));
        assert_eq!(c.record(a).unwrap().x(), Some(5.0));
    }

    #[test]
    fn test_create_child_uses_spawn_as_relative() {
        let mut host = MemoryHost::default();
        let config = watching(&["x", "y"]).with(Field::X, 100.0).with(Field::Y, 10.0);
        let mut c = Container::new(ContainerId(3), &config, &mut host).unwrap();
        let child = c.create_child(&mut host, &ChildSpawn::at(5.0, 6.0)).unwrap();
        let t = host.at(child);
        assert!(approx_eq(t.x.unwrap(), 105.0));
        assert!(approx_eq(t.y.unwrap(), 16.0));
        assert_eq!(host.owner.get(&child), Some(&ContainerId(3)));
    }

    #[test]
    fn test_remove_and_readd_gets_fresh_record() {
        let mut host = MemoryHost::default();
        let first = host.spawn(at(5.0, 0.0));
        let second = host.spawn(at(1.0, 0.0));
        let config = watching(&["x", "alpha"]).with(Field::X, 10.0);
        let mut c = Container::with_children(ContainerId(0), &config, [first], &mut host).unwrap();
        c.set_relative_alpha(&mut host, first, 0.2).unwrap();
        c.remove_child(&mut host, first, false).unwrap();
        assert!(c.record(first).is_err());
        c.add_child(&mut host, second).unwrap();
        let record = c.record(second).unwrap();
        assert_eq!(record.x(), Some(1.0));
        assert_eq!(record.alpha(), Some(1.0));
        assert!(approx_eq(host.at(second).x.unwrap(), 11.0));
        assert_eq!(c.children(), &[second]);
    }

    #[test]
    fn test_remove_non_child() {
        let mut host = MemoryHost::default();
        let stray = host.spawn(at(0.0, 0.0));
        let mut c = Container::new(ContainerId(0), &ContainerConfig::new(), &mut host).unwrap();
        assert!(matches!(
            c.remove_child(&mut host, stray, false),
            Err(ContainerError::NotAChild(_))
        ));
    }

    #[test]
    fn test_relative_write_on_stray_child_is_reported() {
        let mut host = MemoryHost::default();
        let stray = host.spawn(at(0.0, 0.0));
        let mut c = Container::new(ContainerId(0), &ContainerConfig::new(), &mut host).unwrap();
        assert!(matches!(
            c.set_relative_x(&mut host, stray, 1.0),
            Err(ContainerError::NotAChild(_))
        ));
        assert_eq!(host.at(stray).x, Some(0.0));
    }

    #[test]
    fn test_duplicate_child_rejected() {
        let mut host = MemoryHost::default();
        let child = host.spawn(at(0.0, 0.0));
        let mut c = Container::new(ContainerId(0), &ContainerConfig::new(), &mut host).unwrap();
        c.add_child(&mut host, child).unwrap();
        assert!(matches!(
            c.add_child(&mut host, child),
            Err(ContainerError::AlreadyChild(_))
        ));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_child_of_other_container_rejected() {
        let mut host = MemoryHost::default();
        let child = host.spawn(at(0.0, 0.0));
        let mut a = Container::new(ContainerId(1), &ContainerConfig::new(), &mut host).unwrap();
        let mut b = Container::new(ContainerId(2), &ContainerConfig::new(), &mut host).unwrap();
        a.add_child(&mut host, child).unwrap();
        assert_eq!(
            b.add_child(&mut host, child),
            Err(ContainerError::OwnedByOther {
                child: "0".into(),
                owner: ContainerId(1)
            })
        );
        assert!(b.is_empty());
    }

    #[test]
    fn test_max_size() {
        let mut host = MemoryHost::default();
        let config = ContainerConfig::new().with_max_size(1);
        let mut c = Container::new(ContainerId(0), &config, &mut host).unwrap();
        c.create_child(&mut host, &ChildSpawn::at(0.0, 0.0)).unwrap();
        assert!(c.is_full());
        assert_eq!(
            c.create_child(&mut host, &ChildSpawn::at(1.0, 0.0)),
            Err(ContainerError::Full(1))
        );
        let other = host.spawn(at(0.0, 0.0));
        assert_eq!(c.add_child(&mut host, other), Err(ContainerError::Full(1)));
        assert_eq!(host.owner.get(&other), None);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_clear_and_destroy() {
        let mut host = MemoryHost::default();
        let mut c = Container::new(ContainerId(0), &ContainerConfig::new(), &mut host).unwrap();
        let a = c.create_child(&mut host, &ChildSpawn::at(0.0, 0.0)).unwrap();
        let b = c.create_child(&mut host, &ChildSpawn::at(1.0, 0.0)).unwrap();
        c.clear(&mut host, true);
        assert!(c.is_empty());
        assert!(!host.contains(a));
        assert!(!host.contains(b));
    }

    #[test]
    fn test_retain_children() {
        let mut host = MemoryHost::default();
        let mut c = Container::new(ContainerId(0), &ContainerConfig::new(), &mut host).unwrap();
        let a = c.create_child(&mut host, &ChildSpawn::at(0.0, 0.0)).unwrap();
        let b = c.create_child(&mut host, &ChildSpawn::at(1.0, 0.0)).unwrap();
        let dropped = c.retain_children(|child| child != a);
        assert_eq!(dropped, vec![a]);
        assert_eq!(c.children(), &[b]);
        assert!(c.record(a).is_err());
    }

    #[test]
    fn test_rotate_around() {
        let p = rotate_around(Vec2::new(2.0, 1.0), Vec2::new(1.0, 1.0), 180.0);
        assert!(approx_eq(p.x, 0.0));
        assert!(approx_eq(p.y, 1.0));
    }
}
