use super::vector::{Float3, Quaternion};

/// Rigid placement of a node: world position plus orientation.
///
/// The local frame follows the editor convention:
/// - `forward` (+Z): along the track
/// - `up` (+Y): away from the driving surface
/// - `right` (+X): across the track, the direction cross-sections sweep in
///
/// C-compatible layout for FFI.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pose {
    pub position: Float3,
    pub rotation: Quaternion,
}

impl Pose {
    pub const fn new(position: Float3, rotation: Quaternion) -> Self {
        Self { position, rotation }
    }

    pub const fn at(position: Float3) -> Self {
        Self::new(position, Quaternion::IDENTITY)
    }

    pub fn forward(&self) -> Float3 {
        self.rotation.mul_vec(Float3::FORWARD)
    }

    pub fn up(&self) -> Float3 {
        self.rotation.mul_vec(Float3::UP)
    }

    pub fn right(&self) -> Float3 {
        self.rotation.mul_vec(Float3::RIGHT)
    }

    /// Local point to world space.
    pub fn transform_point(&self, local: Float3) -> Float3 {
        self.position + self.rotation.mul_vec(local)
    }

    /// World point to local space.
    pub fn inverse_transform_point(&self, world: Float3) -> Float3 {
        self.rotation.conjugate().mul_vec(world - self.position)
    }

    /// Local direction to world space (rotation only).
    pub fn transform_direction(&self, local: Float3) -> Float3 {
        self.rotation.mul_vec(local)
    }

    /// World direction to local space (rotation only).
    pub fn inverse_transform_direction(&self, world: Float3) -> Float3 {
        self.rotation.conjugate().mul_vec(world)
    }

    pub const DEFAULT: Self = Self::at(Float3::ZERO);
}

impl Default for Pose {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    #[test]
    fn test_identity_pose_axes() {
        let pose = Pose::DEFAULT;
        assert_eq!(pose.forward(), Float3::FORWARD);
        assert_eq!(pose.up(), Float3::UP);
        assert_eq!(pose.right(), Float3::RIGHT);
    }

    #[test]
    fn test_point_round_trip() {
        let pose = Pose::new(
            Float3::new(4.0, -1.0, 7.0),
            Quaternion::from_axis_angle(Float3::new(0.2, 1.0, 0.1), 1.3),
        );
        let local = Float3::new(1.5, 0.25, -3.0);
        let back = pose.inverse_transform_point(pose.transform_point(local));

        assert_relative_eq!(back.x, local.x, epsilon = 1e-5);
        assert_relative_eq!(back.y, local.y, epsilon = 1e-5);
        assert_relative_eq!(back.z, local.z, epsilon = 1e-5);
    }

    #[test]
    fn test_direction_ignores_translation() {
        let pose = Pose::new(
            Float3::new(100.0, 50.0, -20.0),
            Quaternion::from_axis_angle(Float3::UP, PI / 2.0),
        );
        let dir = pose.transform_direction(Float3::RIGHT);

        assert_relative_eq!(dir.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(dir.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(dir.z, -1.0, epsilon = 1e-6);
    }
}
