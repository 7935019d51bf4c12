use crate::math::{Float2, Float3};

use super::limits::{ArcEnd, ARC_SNAP_THRESHOLD, FULL_CIRCLE, MAX_RADIUS, MIN_RADIUS};

/// Arc of a circle resting on the local origin.
///
/// Arc bounds are in degrees, measured from the top of the circle. The default
/// 90..270 arc is the lower half, a half-pipe.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CircularSection {
    pub offset: Float2,
    pub radius: f32,
    pub arc_min: f32,
    pub arc_max: f32,
}

impl CircularSection {
    pub const fn new(offset: Float2, radius: f32, arc_min: f32, arc_max: f32) -> Self {
        Self {
            offset,
            radius,
            arc_min,
            arc_max,
        }
    }

    pub const DEFAULT: Self = Self::new(Float2::ZERO, 1.5, 90.0, 270.0);

    pub fn arc_angle(&self) -> f32 {
        self.arc_max - self.arc_min
    }

    /// Centre of the circle in the node's local frame.
    pub fn center(&self) -> Float3 {
        Float3::new(self.offset.x, self.offset.y + self.radius, 0.0)
    }

    pub fn sample_local_position(&self, u: f32) -> Float3 {
        let theta = (self.arc_min + u * self.arc_angle() + 90.0).to_radians();
        Float3::new(
            self.offset.x + self.radius * theta.cos(),
            self.offset.y + self.radius * theta.sin() + self.radius,
            0.0,
        )
    }

    /// Sets the radius, clamped to the editor range.
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius.clamp(MIN_RADIUS, MAX_RADIUS);
    }

    /// Sets both arc ends at once, clamped to a full turn and ordered so that
    /// `arc_min <= arc_max`. No snapping.
    pub fn set_arc(&mut self, min: f32, max: f32) {
        let a = min.clamp(0.0, FULL_CIRCLE);
        let b = max.clamp(0.0, FULL_CIRCLE);
        self.arc_min = a.min(b);
        self.arc_max = a.max(b);
    }

    /// Moves one end of the arc, snapping to a full circle when the ends come
    /// within `ARC_SNAP_THRESHOLD` degrees of each other.
    pub fn set_arc_end(&mut self, end: ArcEnd, degrees: f32) {
        let degrees = degrees.clamp(0.0, FULL_CIRCLE);
        match end {
            ArcEnd::Min => {
                self.arc_min = degrees;
                if self.arc_min > self.arc_max - ARC_SNAP_THRESHOLD {
                    self.arc_min = 0.0;
                }
            }
            ArcEnd::Max => {
                self.arc_max = degrees;
                if self.arc_max < self.arc_min + ARC_SNAP_THRESHOLD {
                    self.arc_max = FULL_CIRCLE;
                }
            }
        }
    }
}

impl Default for CircularSection {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_full_circle_closes() {
        let section = CircularSection::new(Float2::ZERO, 2.0, 0.0, 360.0);
        let start = section.sample_local_position(0.0);
        let end = section.sample_local_position(1.0);
        assert_relative_eq!(start.x, end.x, epsilon = 1e-5);
        assert_relative_eq!(start.y, end.y, epsilon = 1e-5);
    }

    #[test]
    fn test_constant_distance_from_center() {
        let section = CircularSection::new(Float2::ZERO, 2.5, 0.0, 360.0);
        let center = section.center();
        for i in 0..=32 {
            let u = i as f32 / 32.0;
            let d = (section.sample_local_position(u) - center).magnitude();
            assert_relative_eq!(d, 2.5, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_default_arc_is_lower_half() {
        let section = CircularSection::DEFAULT;
        // u = 0 at theta 180 (left), u = 0.5 at the bottom, u = 1 at theta 360 (right)
        let left = section.sample_local_position(0.0);
        let bottom = section.sample_local_position(0.5);
        let right = section.sample_local_position(1.0);

        assert_relative_eq!(left.x, -1.5, epsilon = 1e-5);
        assert_relative_eq!(left.y, 1.5, epsilon = 1e-5);
        assert_relative_eq!(bottom.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(bottom.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(right.x, 1.5, epsilon = 1e-5);
        assert_relative_eq!(right.y, 1.5, epsilon = 1e-5);
    }

    #[test]
    fn test_offset_translates_samples() {
        let base = CircularSection::DEFAULT;
        let moved = CircularSection {
            offset: Float2::new(1.0, -2.0),
            ..base
        };
        let a = base.sample_local_position(0.3);
        let b = moved.sample_local_position(0.3);
        assert_relative_eq!(b.x - a.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(b.y - a.y, -2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_set_arc_keeps_narrow_arcs() {
        let mut section = CircularSection::DEFAULT;
        section.set_arc(340.0, 359.0);
        assert_eq!((section.arc_min, section.arc_max), (340.0, 359.0));

        section.set_arc(0.0, 20.0);
        assert_eq!((section.arc_min, section.arc_max), (0.0, 20.0));
    }

    #[test]
    fn test_set_arc_clamps_and_orders() {
        let mut section = CircularSection::DEFAULT;
        section.set_arc(-10.0, 400.0);
        assert_eq!((section.arc_min, section.arc_max), (0.0, 360.0));

        section.set_arc(200.0, 100.0);
        assert_eq!((section.arc_min, section.arc_max), (100.0, 200.0));
    }

    #[test]
    fn test_arc_min_snaps_to_zero() {
        let mut section = CircularSection::DEFAULT;
        section.set_arc_end(ArcEnd::Min, 250.0);
        assert_eq!(section.arc_min, 0.0);

        section.set_arc_end(ArcEnd::Min, 100.0);
        assert_eq!(section.arc_min, 100.0);
    }

    #[test]
    fn test_arc_max_snaps_to_full_circle() {
        let mut section = CircularSection::DEFAULT;
        section.set_arc_end(ArcEnd::Max, 110.0);
        assert_eq!(section.arc_max, FULL_CIRCLE);

        section.set_arc_end(ArcEnd::Max, 400.0);
        assert_eq!(section.arc_max, FULL_CIRCLE);
    }

    #[test]
    fn test_set_radius_clamps() {
        let mut section = CircularSection::DEFAULT;
        section.set_radius(0.1);
        assert_eq!(section.radius, MIN_RADIUS);
        section.set_radius(50.0);
        assert_eq!(section.radius, MAX_RADIUS);
    }
}
