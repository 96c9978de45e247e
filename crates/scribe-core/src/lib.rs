//! # Scribe Core
//!
//! The domain layer of the Scribe blog service.
//! This crate contains pure business logic with zero infrastructure
//! dependencies: the entities, the post visibility rules, pagination,
//! the author-only mutation gate, and the port traits that the
//! infrastructure layer implements.

pub mod access;
pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod validate;
pub mod visibility;

pub use error::RepoError;

/// Upper bound shared by title-like text fields.
pub const MAX_FIELD_LENGTH: usize = 256;
