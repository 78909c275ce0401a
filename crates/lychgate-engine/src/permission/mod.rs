//! Permission evaluation: role matrix, override sets, and role hierarchy.

mod engine;
mod matrix;

pub use engine::PermissionEngine;
pub use matrix::{MatrixBuilder, PermissionMatrix};
