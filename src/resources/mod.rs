//! ECS resources.
//!
//! - [`containerstore`] – registry of the scene's containers (the update list)

pub mod containerstore;
