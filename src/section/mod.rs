//! Cross-section profiles swept along the track.
//!
//! Every shape answers a single question: where, in the owning node's local
//! frame, is the point at parameter `u` across the profile? `u = 0` is the left
//! edge and `u = 1` the right edge.

mod circular;
pub mod limits;
mod linear;

pub use circular::CircularSection;
pub use limits::ArcEnd;
pub use linear::LinearSection;

use crate::math::Float3;

/// Discriminant of [`CrossSection`], used by hosts to switch shapes.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CrossSectionKind {
    Linear,
    Circular,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CrossSection {
    Linear(LinearSection),
    Circular(CircularSection),
}

impl CrossSection {
    pub fn default_for(kind: CrossSectionKind) -> Self {
        match kind {
            CrossSectionKind::Linear => Self::Linear(LinearSection::DEFAULT),
            CrossSectionKind::Circular => Self::Circular(CircularSection::DEFAULT),
        }
    }

    pub fn kind(&self) -> CrossSectionKind {
        match self {
            Self::Linear(_) => CrossSectionKind::Linear,
            Self::Circular(_) => CrossSectionKind::Circular,
        }
    }

    /// Replaces the shape with the defaults of `kind`. Keeps the current
    /// parameters when the kind is unchanged. Returns whether anything changed.
    pub fn convert_to(&mut self, kind: CrossSectionKind) -> bool {
        if self.kind() == kind {
            return false;
        }
        *self = Self::default_for(kind);
        true
    }

    pub fn sample_local_position(&self, u: f32) -> Float3 {
        match self {
            Self::Linear(s) => s.sample_local_position(u),
            Self::Circular(s) => s.sample_local_position(u),
        }
    }

    /// Central-difference tangent across the profile.
    ///
    /// Returns `Float3::ZERO` when the two samples coincide (zero width, zero
    /// radius or an empty arc); callers must check before using it as a direction.
    pub fn sample_local_tangent(&self, u: f32, epsilon: f32) -> Float3 {
        (self.sample_local_position(u + epsilon) - self.sample_local_position(u - epsilon))
            .normalize()
    }
}

impl Default for CrossSection {
    fn default() -> Self {
        Self::Linear(LinearSection::DEFAULT)
    }
}

impl From<LinearSection> for CrossSection {
    fn from(section: LinearSection) -> Self {
        Self::Linear(section)
    }
}

impl From<CircularSection> for CrossSection {
    fn from(section: CircularSection) -> Self {
        Self::Circular(section)
    }
}
