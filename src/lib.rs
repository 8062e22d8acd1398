//! Interim transform containers.
//!
//! A container groups entities and gives them a shared, parent-relative
//! transform: moving, rotating, scaling, fading or flipping the container
//! recomputes every child's absolute [`MapPosition`], [`Rotation`], [`Scale`],
//! [`Alpha`] and [`Flip`].
//!
//! This module exposes the container core, the ECS components it writes, the
//! scene registry resource and its maintenance system.
//!
//! [`MapPosition`]: components::mapposition::MapPosition
//! [`Rotation`]: components::rotation::Rotation
//! [`Scale`]: components::scale::Scale
//! [`Alpha`]: components::alpha::Alpha
//! [`Flip`]: components::flip::Flip

pub mod components;
pub mod container;
pub mod factory;
pub mod resources;
pub mod systems;
