//! Editing limits for cross-section parameters.
//!
//! These are applied by the setters on each shape. Sampling never clamps.

pub const MIN_WIDTH: f32 = 0.2;
pub const MAX_WIDTH: f32 = 10.0;

pub const MIN_RADIUS: f32 = 0.5;
pub const MAX_RADIUS: f32 = 10.0;

pub const FULL_CIRCLE: f32 = 360.0;

/// Degrees within which arc ends snap apart to a full circle.
pub const ARC_SNAP_THRESHOLD: f32 = 30.0;

/// Which end of a circular arc is being edited.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArcEnd {
    Min,
    Max,
}
