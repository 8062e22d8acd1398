//! Errors reported by container operations.

use std::fmt;

use super::ContainerId;
use super::field::{Field, FieldValue};

/// Everything a container operation can reject.
#[derive(Clone, Debug, PartialEq)]
pub enum ContainerError {
    /// A `watch` entry names a field the container does not support.
    UnsupportedField(String),
    /// The field exists but this container does not watch it.
    NotWatched(Field),
    /// A flag was written to a numeric field, or the other way round.
    TypeMismatch { field: Field, value: FieldValue },
    /// The child was not added through this container, so it has no record.
    NotAChild(String),
    /// The child is already in this container.
    AlreadyChild(String),
    /// The host has no such child object.
    ChildNotFound(String),
    /// The child already belongs to another container.
    OwnedByOther { child: String, owner: ContainerId },
    /// The container reached its configured maximum size.
    Full(usize),
    /// No container is registered under this id.
    UnknownContainer(ContainerId),
    /// Configuration could not be read or parsed.
    Config(String),
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerError::UnsupportedField(name) => {
                write!(f, "unsupported container field '{}'", name)
            }
            ContainerError::NotWatched(field) => {
                write!(f, "container does not watch field '{}'", field)
            }
            ContainerError::TypeMismatch { field, value } => {
                write!(f, "value {} has the wrong type for field '{}'", value, field)
            }
            ContainerError::NotAChild(child) => {
                write!(f, "{} is not a child of this container", child)
            }
            ContainerError::AlreadyChild(child) => {
                write!(f, "{} is already a child of this container", child)
            }
            ContainerError::ChildNotFound(child) => write!(f, "{} does not exist", child),
            ContainerError::OwnedByOther { child, owner } => {
                write!(f, "{} already belongs to container {}", child, owner)
            }
            ContainerError::Full(max) => write!(f, "container is full ({} children)", max),
            ContainerError::UnknownContainer(id) => write!(f, "no container with id {}", id),
            ContainerError::Config(msg) => write!(f, "container config error: {}", msg),
        }
    }
}

impl std::error::Error for ContainerError {}
