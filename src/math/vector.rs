use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// 2D vector with f32 components, used for cross-section offsets and UVs.
/// C-compatible layout for FFI.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Float2 {
    pub x: f32,
    pub y: f32,
}

impl Float2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Self = Self::new(0.0, 0.0);
}

impl Default for Float2 {
    fn default() -> Self {
        Self::ZERO
    }
}

/// 3D vector with f32 components.
/// C-compatible layout for FFI.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Float3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Float3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    pub const LEFT: Self = Self::new(-1.0, 0.0, 0.0);
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);
    pub const BACK: Self = Self::new(0.0, 0.0, -1.0);

    pub fn magnitude(self) -> f32 {
        self.sqr_magnitude().sqrt()
    }

    pub fn sqr_magnitude(self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns the unit vector, or `ZERO` when the magnitude is below `f32::EPSILON`.
    pub fn normalize(self) -> Self {
        self.try_normalize().unwrap_or(Self::ZERO)
    }

    /// Returns `None` instead of a zero vector for degenerate input.
    pub fn try_normalize(self) -> Option<Self> {
        let mag = self.magnitude();
        if mag < f32::EPSILON {
            return None;
        }
        Some(self * (1.0 / mag))
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
            self.z + (other.z - self.z) * t,
        )
    }

    /// Some unit vector perpendicular to `self`. `self` must be non-zero.
    pub fn any_orthogonal(self) -> Self {
        let axis = if self.x.abs() < 0.9 {
            Self::RIGHT
        } else {
            Self::UP
        };
        self.cross(axis).normalize()
    }

    /// Spherical interpolation treating both vectors as directions with magnitudes.
    ///
    /// The direction is rotated along the great arc while the magnitude is
    /// interpolated linearly. Falls back to `lerp` when either input is zero.
    pub fn slerp(self, other: Self, t: f32) -> Self {
        let mag_a = self.magnitude();
        let mag_b = other.magnitude();
        if mag_a < f32::EPSILON || mag_b < f32::EPSILON {
            return self.lerp(other, t);
        }

        let dir_a = self * (1.0 / mag_a);
        let dir_b = other * (1.0 / mag_b);
        let magnitude = mag_a + (mag_b - mag_a) * t;

        let cos_theta = dir_a.dot(dir_b).clamp(-1.0, 1.0);
        if cos_theta > 0.9995 {
            return dir_a.lerp(dir_b, t).normalize() * magnitude;
        }

        let theta = cos_theta.acos() * t;
        let relative = (dir_b - dir_a * cos_theta)
            .try_normalize()
            .unwrap_or_else(|| dir_a.any_orthogonal());

        (dir_a * theta.cos() + relative * theta.sin()) * magnitude
    }

    pub fn min(self, other: Self) -> Self {
        Self::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }

    pub fn max(self, other: Self) -> Self {
        Self::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
        )
    }
}

impl Add for Float3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl AddAssign for Float3 {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Float3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f32> for Float3 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Neg for Float3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Default for Float3 {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Unit quaternion for 3D rotations.
/// C-compatible layout for FFI.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub fn from_axis_angle(axis: Float3, angle: f32) -> Self {
        let half_angle = angle * 0.5;
        let s = half_angle.sin();
        let c = half_angle.cos();
        let normalized = axis.normalize();

        Self::new(normalized.x * s, normalized.y * s, normalized.z * s, c)
    }

    /// Builds the rotation whose columns are the given orthonormal basis.
    pub fn from_rotation_matrix(m: &Matrix3) -> Self {
        let (m00, m10, m20) = (m.c0.x, m.c0.y, m.c0.z);
        let (m01, m11, m21) = (m.c1.x, m.c1.y, m.c1.z);
        let (m02, m12, m22) = (m.c2.x, m.c2.y, m.c2.z);

        let trace = m00 + m11 + m22;
        let q = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Self::new((m21 - m12) / s, (m02 - m20) / s, (m10 - m01) / s, 0.25 * s)
        } else if m00 > m11 && m00 > m22 {
            let s = (1.0 + m00 - m11 - m22).sqrt() * 2.0;
            Self::new(0.25 * s, (m01 + m10) / s, (m02 + m20) / s, (m21 - m12) / s)
        } else if m11 > m22 {
            let s = (1.0 + m11 - m00 - m22).sqrt() * 2.0;
            Self::new((m01 + m10) / s, 0.25 * s, (m12 + m21) / s, (m02 - m20) / s)
        } else {
            let s = (1.0 + m22 - m00 - m11).sqrt() * 2.0;
            Self::new((m02 + m20) / s, (m12 + m21) / s, 0.25 * s, (m10 - m01) / s)
        };
        q.normalize()
    }

    /// Rotation that maps `Float3::FORWARD` onto `forward` and keeps `Float3::UP`
    /// as close to `up` as possible.
    ///
    /// A zero `forward` yields `IDENTITY`. An `up` parallel to `forward` is
    /// replaced by an arbitrary perpendicular axis.
    pub fn look_rotation(forward: Float3, up: Float3) -> Self {
        let Some(f) = forward.try_normalize() else {
            return Self::IDENTITY;
        };
        let r = up.cross(f).try_normalize().unwrap_or_else(|| f.any_orthogonal());
        let u = f.cross(r);
        Self::from_rotation_matrix(&Matrix3::from_columns(r, u, f))
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn normalize(self) -> Self {
        let mag = self.dot(self).sqrt();
        if mag < f32::EPSILON {
            return Self::IDENTITY;
        }
        let inv = 1.0 / mag;
        Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
    }

    /// Inverse of a unit quaternion.
    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Shortest-path spherical interpolation.
    pub fn slerp(self, other: Self, t: f32) -> Self {
        let mut cos_theta = self.dot(other);
        let mut target = other;
        if cos_theta < 0.0 {
            cos_theta = -cos_theta;
            target = Self::new(-other.x, -other.y, -other.z, -other.w);
        }

        let (wa, wb) = if cos_theta > 0.9995 {
            (1.0 - t, t)
        } else {
            let theta = cos_theta.acos();
            let sin_theta = theta.sin();
            (
                ((1.0 - t) * theta).sin() / sin_theta,
                (t * theta).sin() / sin_theta,
            )
        };

        Self::new(
            self.x * wa + target.x * wb,
            self.y * wa + target.y * wb,
            self.z * wa + target.z * wb,
            self.w * wa + target.w * wb,
        )
        .normalize()
    }

    pub fn mul_vec(self, v: Float3) -> Float3 {
        let qv = Float3::new(self.x, self.y, self.z);
        let uv = qv.cross(v);
        let uuv = qv.cross(uv);
        v + (uv * (2.0 * self.w)) + (uuv * 2.0)
    }
}

impl Mul for Quaternion {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        Self::new(
            self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
            self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
        )
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// 3x3 matrix stored as three column vectors.
#[derive(Debug, Clone, Copy)]
pub struct Matrix3 {
    pub c0: Float3,
    pub c1: Float3,
    pub c2: Float3,
}

impl Matrix3 {
    pub fn from_columns(c0: Float3, c1: Float3, c2: Float3) -> Self {
        Self { c0, c1, c2 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    fn assert_float3_eq(a: Float3, b: Float3) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-5);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-5);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-5);
    }

    #[test]
    fn test_float3_normalize() {
        let v = Float3::new(3.0, 4.0, 0.0);
        let normalized = v.normalize();
        assert_relative_eq!(normalized.x, 0.6, epsilon = 1e-6);
        assert_relative_eq!(normalized.y, 0.8, epsilon = 1e-6);
        assert_relative_eq!(normalized.magnitude(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_normalize_degenerate_is_zero() {
        assert_eq!(Float3::ZERO.normalize(), Float3::ZERO);
        assert_eq!(Float3::new(1e-9, 0.0, 0.0).try_normalize(), None);
    }

    #[test]
    fn test_float3_cross() {
        let c = Float3::RIGHT.cross(Float3::UP);
        assert_float3_eq(c, Float3::FORWARD);
    }

    #[test]
    fn test_slerp_colinear_points_interpolates_magnitude() {
        let a = Float3::new(10.0, 0.0, 0.0);
        let b = Float3::new(20.0, 0.0, 0.0);
        assert_float3_eq(a.slerp(b, 0.5), Float3::new(15.0, 0.0, 0.0));
    }

    #[test]
    fn test_slerp_quarter_turn_keeps_radius() {
        let a = Float3::new(2.0, 0.0, 0.0);
        let b = Float3::new(0.0, 0.0, 2.0);
        let mid = a.slerp(b, 0.5);
        assert_relative_eq!(mid.magnitude(), 2.0, epsilon = 1e-5);
        assert_relative_eq!(mid.x, mid.z, epsilon = 1e-5);
    }

    #[test]
    fn test_slerp_with_origin_falls_back_to_lerp() {
        let b = Float3::new(0.0, 4.0, 0.0);
        assert_float3_eq(Float3::ZERO.slerp(b, 0.25), Float3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_quaternion_axis_angle() {
        let q = Quaternion::from_axis_angle(Float3::UP, PI / 2.0);
        let rotated = q.mul_vec(Float3::RIGHT);
        assert_float3_eq(rotated, Float3::BACK);
    }

    #[test]
    fn test_look_rotation_identity() {
        let q = Quaternion::look_rotation(Float3::FORWARD, Float3::UP);
        assert_relative_eq!(q.w.abs(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_look_rotation_matches_axis_angle() {
        let q = Quaternion::look_rotation(Float3::RIGHT, Float3::UP);
        assert_float3_eq(q.mul_vec(Float3::FORWARD), Float3::RIGHT);
        assert_float3_eq(q.mul_vec(Float3::UP), Float3::UP);

        let expected = Quaternion::from_axis_angle(Float3::UP, PI / 2.0);
        assert_relative_eq!(q.dot(expected).abs(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_look_rotation_degenerate_inputs() {
        assert_eq!(
            Quaternion::look_rotation(Float3::ZERO, Float3::UP),
            Quaternion::IDENTITY
        );

        let q = Quaternion::look_rotation(Float3::UP, Float3::UP);
        assert_float3_eq(q.mul_vec(Float3::FORWARD), Float3::UP);
    }

    #[test]
    fn test_quaternion_slerp_halfway() {
        let a = Quaternion::IDENTITY;
        let b = Quaternion::from_axis_angle(Float3::UP, PI / 2.0);
        let mid = a.slerp(b, 0.5);
        let expected = Quaternion::from_axis_angle(Float3::UP, PI / 4.0);
        assert_relative_eq!(mid.dot(expected).abs(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_conjugate_inverts_rotation() {
        let q = Quaternion::from_axis_angle(Float3::new(1.0, 1.0, 0.0), 0.7);
        let v = Float3::new(0.3, -2.0, 5.0);
        assert_float3_eq(q.conjugate().mul_vec(q.mul_vec(v)), v);
    }

    #[test]
    fn test_quaternion_multiplication_order() {
        let q_yaw = Quaternion::from_axis_angle(Float3::UP, PI / 4.0);
        let q_pitch = Quaternion::from_axis_angle(Float3::RIGHT, PI / 6.0);

        let v = Float3::BACK;
        let combined = (q_yaw * q_pitch).mul_vec(v);
        let sequential = q_yaw.mul_vec(q_pitch.mul_vec(v));

        assert_float3_eq(combined, sequential);
    }
}
