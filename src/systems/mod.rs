//! ECS systems.
//!
//! - [`containerprune`] – discards container records of despawned children

pub mod containerprune;
