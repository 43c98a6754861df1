//! Entity to model mappers
//!
//! - `From<Model> for Entity` where every column maps infallibly
//! - `TryFrom<Model> for Entity` where a TEXT column must parse into a domain enum

mod notification;
mod post;
mod reaction;

pub use post::counts_from_rows;
