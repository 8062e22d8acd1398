//! Transform fields a container can watch.
//!
//! A [`Field`] names one of the seven transform properties a
//! [`Container`](super::Container) knows how to compose into its children.
//! Values travel as [`FieldValue`], either a number or a flag, and the set of
//! fields a container manages is an ordered [`WatchList`].

use std::fmt;
use std::str::FromStr;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::error::ContainerError;

/// One transform property managed by a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "x")]
    X,
    #[serde(rename = "y")]
    Y,
    #[serde(rename = "alpha")]
    Alpha,
    #[serde(rename = "rotation")]
    Rotation,
    #[serde(rename = "scale")]
    Scale,
    #[serde(rename = "flipX")]
    FlipX,
    #[serde(rename = "flipY")]
    FlipY,
}

impl Field {
    /// Every supported field, in declaration order.
    pub const ALL: [Field; 7] = [
        Field::X,
        Field::Y,
        Field::Alpha,
        Field::Rotation,
        Field::Scale,
        Field::FlipX,
        Field::FlipY,
    ];

    /// Name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Field::X => "x",
            Field::Y => "y",
            Field::Alpha => "alpha",
            Field::Rotation => "rotation",
            Field::Scale => "scale",
            Field::FlipX => "flipX",
            Field::FlipY => "flipY",
        }
    }

    /// Built-in default used when neither the config nor the child supplies a value.
    pub fn default_value(self) -> FieldValue {
        match self {
            Field::X | Field::Y | Field::Rotation => FieldValue::Number(0.0),
            Field::Alpha | Field::Scale => FieldValue::Number(1.0),
            Field::FlipX | Field::FlipY => FieldValue::Flag(false),
        }
    }

    /// Whether this field holds a flag rather than a number.
    pub fn is_flag(self) -> bool {
        matches!(self, Field::FlipX | Field::FlipY)
    }

    /// Check that `value` has the right kind for this field.
    pub fn check(self, value: FieldValue) -> Result<FieldValue, ContainerError> {
        if self.is_flag() == value.is_flag() {
            Ok(value)
        } else {
            Err(ContainerError::TypeMismatch { field: self, value })
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = ContainerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| ContainerError::UnsupportedField(s.to_string()))
    }
}

/// Value stored in a watched field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f32),
    Flag(bool),
}

impl FieldValue {
    pub fn is_flag(self) -> bool {
        matches!(self, FieldValue::Flag(_))
    }

    /// Numeric view. Flags read as 0 or 1.
    pub fn as_number(self) -> f32 {
        match self {
            FieldValue::Number(v) => v,
            FieldValue::Flag(b) => {
                if b {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Flag view. Numbers are true when non-zero.
    pub fn as_flag(self) -> bool {
        match self {
            FieldValue::Number(v) => v != 0.0,
            FieldValue::Flag(b) => b,
        }
    }

    /// Parse a command-line style value (`true`, `false` or a number) for `field`.
    pub fn parse_for(field: Field, raw: &str) -> Result<Self, ContainerError> {
        let raw = raw.trim();
        if field.is_flag() {
            raw.parse::<bool>()
                .map(FieldValue::Flag)
                .map_err(|e| ContainerError::Config(format!("{field}: {e}")))
        } else {
            raw.parse::<f32>()
                .map(FieldValue::Number)
                .map_err(|e| ContainerError::Config(format!("{field}: {e}")))
        }
    }
}

impl From<f32> for FieldValue {
    fn from(v: f32) -> Self {
        FieldValue::Number(v)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Flag(b)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(v) => write!(f, "{v}"),
            FieldValue::Flag(b) => write!(f, "{b}"),
        }
    }
}

/// Ordered, duplicate-free set of watched fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WatchList {
    fields: ArrayVec<Field, 7>,
}

impl WatchList {
    /// Watch every supported field.
    pub fn all() -> Self {
        Self {
            fields: ArrayVec::from(Field::ALL),
        }
    }

    /// Watch nothing.
    pub fn empty() -> Self {
        Self {
            fields: ArrayVec::new(),
        }
    }

    /// Build from configuration names. Repeated names are kept once, at
    /// their first position. Any unknown name fails the whole list.
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self, ContainerError> {
        let mut list = Self::empty();
        for name in names {
            let field: Field = name.as_ref().trim().parse()?;
            list.push(field);
        }
        Ok(list)
    }

    fn push(&mut self, field: Field) {
        if !self.fields.contains(&field) {
            self.fields.push(field);
        }
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for WatchList {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<Field> for WatchList {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        let mut list = Self::empty();
        for field in iter {
            list.push(field);
        }
        list
    }
}
