//! ECS components for entities.
//!
//! These are the transform components a container writes onto its children,
//! plus the sprite data and the membership tag.
//!
//! Submodules overview:
//! - [`alpha`] – opacity multiplier
//! - [`containerchild`] – tag naming the container an entity belongs to
//! - [`flip`] – horizontal/vertical mirroring
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`rotation`] – rotation angle in degrees
//! - [`scale`] – 2D scale factor for sprites
//! - [`sprite`] – texture key, frame and visibility

pub mod alpha;
pub mod containerchild;
pub mod flip;
pub mod mapposition;
pub mod rotation;
pub mod scale;
pub mod sprite;
