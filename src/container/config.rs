//! Container configuration.
//!
//! A [`ContainerConfig`] carries the optional `watch` list, an initial value
//! for any supported field, and an optional maximum child count. It can be
//! built in code, parsed from JSON, or read from a section of an INI file.
//!
//! # JSON
//!
//! ```json
//! { "watch": ["x", "y", "scale"], "x": 100, "y": 50, "scale": 2, "maxSize": 16 }
//! ```
//!
//! # INI
//!
//! ```ini
//! [container]
//! watch = x, y, scale
//! x = 100
//! y = 50
//! scale = 2
//! maxsize = 16
//! ```

use configparser::ini::Ini;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::ContainerError;
use super::field::{Field, FieldValue, WatchList};

/// Construction options for a container. Every key is optional.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ContainerConfig {
    /// Fields the container manages. `None` watches every field.
    pub watch: Option<Vec<String>>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub alpha: Option<f32>,
    /// Degrees.
    pub rotation: Option<f32>,
    pub scale: Option<f32>,
    pub flip_x: Option<bool>,
    pub flip_y: Option<bool>,
    /// Largest number of children the container accepts.
    pub max_size: Option<usize>,
}

impl ContainerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the watched fields.
    pub fn with_watch<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.watch = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Set the initial value of `field`.
    pub fn with(mut self, field: Field, value: impl Into<FieldValue>) -> Self {
        let value = value.into();
        match field {
            Field::X => self.x = Some(value.as_number()),
            Field::Y => self.y = Some(value.as_number()),
            Field::Alpha => self.alpha = Some(value.as_number()),
            Field::Rotation => self.rotation = Some(value.as_number()),
            Field::Scale => self.scale = Some(value.as_number()),
            Field::FlipX => self.flip_x = Some(value.as_flag()),
            Field::FlipY => self.flip_y = Some(value.as_flag()),
        }
        self
    }

    pub fn with_max_size(mut self, max: usize) -> Self {
        self.max_size = Some(max);
        self
    }

    /// Configured initial value of `field`, if any.
    pub fn value(&self, field: Field) -> Option<FieldValue> {
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

    /// Resolve the watch list; absent means every field.
    pub fn watch_list(&self) -> Result<WatchList, ContainerError> {
        match &self.watch {
            Some(names) => WatchList::parse(names.as_slice()),
            None => Ok(WatchList::all()),
        }
    }

    /// Parse a JSON object.
    pub fn from_json_str(json: &str) -> Result<Self, ContainerError> {
        serde_json::from_str(json).map_err(|e| ContainerError::Config(e.to_string()))
    }

    /// Load a JSON config file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ContainerError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ContainerError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json_str(&content)?;
        info!("Loaded container config from {}", path.display());
        Ok(config)
    }

    /// Parse one section of an INI document.
    pub fn from_ini_str(ini: &str, section: &str) -> Result<Self, ContainerError> {
        let mut parser = Ini::new();
        parser
            .read(ini.to_string())
            .map_err(|e| ContainerError::Config(format!("Failed to parse config: {}", e)))?;
        Self::from_ini(&parser, section)
    }

    /// Load one section of an INI file.
    pub fn load_from_ini(path: impl AsRef<Path>, section: &str) -> Result<Self, ContainerError> {
        let path = path.as_ref();
        let mut parser = Ini::new();
        parser
            .load(path)
            .map_err(|e| ContainerError::Config(format!("Failed to load config file: {}", e)))?;
        let config = Self::from_ini(&parser, section)?;
        info!(
            "Loaded container config from {} [{}]",
            path.display(),
            section
        );
        Ok(config)
    }

    fn from_ini(parser: &Ini, section: &str) -> Result<Self, ContainerError> {
        // the parser lowercases section and key names
        let section = section.to_lowercase();
        let float = |key: &str| -> Result<Option<f32>, ContainerError> {
            parser
                .getfloat(&section, key)
                .map(|v| v.map(|v| v as f32))
                .map_err(|e| ContainerError::Config(format!("{}: {}", key, e)))
        };
        let flag = |key: &str| -> Result<Option<bool>, ContainerError> {
            parser
                .getbool(&section, key)
                .map_err(|e| ContainerError::Config(format!("{}: {}", key, e)))
        };

        let watch = parser.get(&section, "watch").map(|list| {
            list.split(',')
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect::<Vec<_>>()
        });
        let max_size = parser
            .getuint(&section, "maxsize")
            .map_err(|e| ContainerError::Config(format!("maxsize: {}", e)))?
            .map(|v| v as usize);

        Ok(Self {
            watch,
            x: float("x")?,
            y: float("y")?,
            alpha: float("alpha")?,
            rotation: float("rotation")?,
            scale: float("scale")?,
            flip_x: flag("flipx")?,
            flip_y: flag("flipy")?,
            max_size,
        })
    }
}
