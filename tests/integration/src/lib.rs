//! Integration test utilities for the Lonkind API
//!
//! Spawns the REST API on a local port and drives it over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
