//! SeaORM entities mirroring the domain model.

pub mod category;
pub mod comment;
pub mod location;
pub mod post;
pub mod user;
