//! Geometry primitives shared by every other layer.
//!
//! This module has no dependencies on the rest of the crate.

mod pose;
pub mod spline;
mod vector;

pub use pose::Pose;
pub use spline::{catmull_rom, catmull_rom_weights, SplineValue};
pub use vector::{Float2, Float3, Matrix3, Quaternion};

/// Default finite-difference step used for tangent and orientation estimates.
pub const DEFAULT_EPSILON: f32 = 0.05;
