//! Domain layer - Pure business abstractions
//!
//! This layer contains NO framework dependencies (no SeaORM, no Axum).
//! Entities, the in-memory association graph, repository traits and
//! domain error types.

pub mod associations;
pub mod entities;
pub mod errors;
pub mod page;
pub mod repositories;

pub use associations::{CourseKey, EntityGraph, JoinIndex, SchoolKey, StudentKey, TaskKey};
pub use entities::*;
pub use errors::DomainError;
pub use page::{DEFAULT_PAGE_SIZE, Direction, MAX_PAGE_SIZE, Page, PageRequest, Sort};
pub use repositories::*;
