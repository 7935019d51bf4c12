use crate::math::{Float2, Float3};

use super::limits::{MAX_WIDTH, MIN_WIDTH};

/// Straight-line profile centred on `offset`, spanning `width` along local X.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LinearSection {
    pub offset: Float2,
    pub width: f32,
}

impl LinearSection {
    pub const fn new(offset: Float2, width: f32) -> Self {
        Self { offset, width }
    }

    pub const DEFAULT: Self = Self::new(Float2::ZERO, 2.0);

    pub fn sample_local_position(&self, u: f32) -> Float3 {
        Float3::new(
            self.offset.x - self.width * 0.5 + self.width * u,
            self.offset.y,
            0.0,
        )
    }

    /// Sets the width, clamped to the editor range.
    pub fn set_width(&mut self, width: f32) {
        self.width = width.clamp(MIN_WIDTH, MAX_WIDTH);
    }
}

impl Default for LinearSection {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_endpoints() {
        let section = LinearSection::new(Float2::new(1.0, 0.5), 4.0);
        assert_eq!(section.sample_local_position(0.0), Float3::new(-1.0, 0.5, 0.0));
        assert_eq!(section.sample_local_position(1.0), Float3::new(3.0, 0.5, 0.0));
    }

    #[test]
    fn test_affine_in_u() {
        let section = LinearSection::new(Float2::new(-0.3, 2.0), 3.0);
        let a = section.sample_local_position(0.0);
        let b = section.sample_local_position(1.0);
        for i in 0..=10 {
            let u = i as f32 / 10.0;
            let p = section.sample_local_position(u);
            let expected = a.lerp(b, u);
            assert_relative_eq!(p.x, expected.x, epsilon = 1e-5);
            assert_relative_eq!(p.y, expected.y, epsilon = 1e-6);
            assert_relative_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn test_sampler_does_not_clamp() {
        let section = LinearSection::new(Float2::ZERO, 0.01);
        assert_relative_eq!(section.sample_local_position(1.0).x, 0.005, epsilon = 1e-7);
    }

    #[test]
    fn test_set_width_clamps() {
        let mut section = LinearSection::DEFAULT;
        section.set_width(0.0);
        assert_eq!(section.width, MIN_WIDTH);
        section.set_width(25.0);
        assert_eq!(section.width, MAX_WIDTH);
        section.set_width(3.5);
        assert_eq!(section.width, 3.5);
    }
}
