use super::vector::Float3;

/// Values that can be blended by the Catmull-Rom basis.
///
/// Implementors only supply the weighted sum; the weights themselves come from
/// [`catmull_rom_weights`] so every instantiation shares the same coefficients.
pub trait SplineValue: Copy {
    fn weighted_sum(weights: [f32; 4], points: [Self; 4]) -> Self;
}

impl SplineValue for f32 {
    fn weighted_sum(w: [f32; 4], p: [Self; 4]) -> Self {
        w[0] * p[0] + w[1] * p[1] + w[2] * p[2] + w[3] * p[3]
    }
}

impl SplineValue for Float3 {
    fn weighted_sum(w: [f32; 4], p: [Self; 4]) -> Self {
        Float3::new(
            f32::weighted_sum(w, [p[0].x, p[1].x, p[2].x, p[3].x]),
            f32::weighted_sum(w, [p[0].y, p[1].y, p[2].y, p[3].y]),
            f32::weighted_sum(w, [p[0].z, p[1].z, p[2].z, p[3].z]),
        )
    }
}

/// Uniform Catmull-Rom basis weights for `p0..p3` at parameter `t`.
pub fn catmull_rom_weights(t: f32) -> [f32; 4] {
    let t2 = t * t;
    let t3 = t2 * t;

    [
        0.5 * (-t3 + 2.0 * t2 - t),
        0.5 * (3.0 * t3 - 5.0 * t2 + 2.0),
        0.5 * (-3.0 * t3 + 4.0 * t2 + t),
        0.5 * (t3 - t2),
    ]
}

/// Interpolates between `p1` (t = 0) and `p2` (t = 1) using `p0` and `p3` as
/// outer control points. `t` outside [0, 1] extrapolates.
pub fn catmull_rom<T: SplineValue>(t: f32, p0: T, p1: T, p2: T, p3: T) -> T {
    T::weighted_sum(catmull_rom_weights(t), [p0, p1, p2, p3])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const P: [Float3; 4] = [
        Float3::new(-1.0, 2.0, 0.5),
        Float3::new(0.0, 0.0, 0.0),
        Float3::new(3.0, 1.0, -2.0),
        Float3::new(4.0, -5.0, 1.0),
    ];

    #[test]
    fn test_passes_through_inner_points() {
        assert_eq!(catmull_rom(0.0, P[0], P[1], P[2], P[3]), P[1]);
        assert_eq!(catmull_rom(1.0, P[0], P[1], P[2], P[3]), P[2]);
        assert_eq!(catmull_rom(0.0, 7.0f32, 1.5, -2.0, 9.0), 1.5);
        assert_eq!(catmull_rom(1.0, 7.0f32, 1.5, -2.0, 9.0), -2.0);
    }

    #[test]
    fn test_weights_sum_to_one() {
        for i in 0..=20 {
            let t = i as f32 / 20.0;
            let sum: f32 = catmull_rom_weights(t).iter().sum();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_vector_matches_scalar_componentwise() {
        for &t in &[0.0, 0.13, 0.5, 0.77, 1.0, 1.4, -0.3] {
            let v = catmull_rom(t, P[0], P[1], P[2], P[3]);
            assert_eq!(v.x, catmull_rom(t, P[0].x, P[1].x, P[2].x, P[3].x));
            assert_eq!(v.y, catmull_rom(t, P[0].y, P[1].y, P[2].y, P[3].y));
            assert_eq!(v.z, catmull_rom(t, P[0].z, P[1].z, P[2].z, P[3].z));
        }
    }

    #[test]
    fn test_evenly_spaced_line_stays_linear() {
        let v = catmull_rom(
            0.5,
            Float3::new(10.0, 0.0, 0.0),
            Float3::new(20.0, 0.0, 0.0),
            Float3::new(30.0, 0.0, 0.0),
            Float3::new(40.0, 0.0, 0.0),
        );
        assert_relative_eq!(v.x, 25.0, epsilon = 1e-5);
        assert_relative_eq!(v.y, 0.0);
    }

    #[test]
    fn test_extrapolates_outside_unit_interval() {
        let v = catmull_rom(2.0, 0.0f32, 1.0, 2.0, 3.0);
        assert_relative_eq!(v, 3.0, epsilon = 1e-5);
    }
}
