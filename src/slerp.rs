use nalgebra::{Quaternion, Scalar};
use num_traits::{Float, FromPrimitive};

use crate::quat::{constant, parts};

/// At or above this dot product the rotations are treated as coincident and blended linearly.
pub const SLERP_LINEAR_THRESHOLD: f64 = 0.9999;

/// Spherical linear interpolation from `a` (at `t = 0`) to `b` (at `t = 1`).
///
/// `d` is the dot product of `a` and `b`, supplied by the caller who usually already has it.
/// No double-cover correction happens here: flip one of the inputs beforehand if `d` is negative
/// and the short arc is wanted.
///
/// ```
/// use embedded_squad::slerp;
/// use embedded_squad::quat::dot;
/// use nalgebra::{UnitQuaternion, Vector3};
/// use approx::assert_abs_diff_eq;
///
/// let a = UnitQuaternion::identity().into_inner();
/// let b = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 1.2).into_inner();
///
/// let half = slerp(0.5, &a, &b, dot(&a, &b));
/// let expected = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.6).into_inner();
/// assert_abs_diff_eq!(half, expected, epsilon = 1e-12);
/// ```
pub fn slerp<T>(t: T, a: &Quaternion<T>, b: &Quaternion<T>, d: T) -> Quaternion<T>
where
    T: Float + FromPrimitive + Scalar,
{
    let (aw, ax, ay, az) = parts(a);
    let (bw, bx, by, bz) = parts(b);

    let (t0, t1) = if d < constant(SLERP_LINEAR_THRESHOLD) {
        // Vector part of a * conj(b), its length is sin(theta)
        let d0 = ax * bw - aw * bx - ay * bz + az * by;
        let d1 = ay * bw - aw * by - az * bx + ax * bz;
        let d2 = az * bw - aw * bz - ax * by + ay * bx;

        let theta = (d0 * d0 + d1 * d1 + d2 * d2).sqrt().atan2(d);
        let rsa = theta.sin();
        (((T::one() - t) * theta).sin() / rsa, (t * theta).sin() / rsa)
    } else {
        (T::one() - t, t)
    };

    Quaternion::new(
        t0 * aw + t1 * bw,
        t0 * ax + t1 * bx,
        t0 * ay + t1 * by,
        t0 * az + t1 * bz,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quat::{dot, norm};
    use approx::assert_abs_diff_eq;
    use nalgebra::{Unit, UnitQuaternion, Vector3};

    fn rotation(axis: Vector3<f64>, angle: f64) -> Quaternion<f64> {
        UnitQuaternion::from_axis_angle(&Unit::new_normalize(axis), angle).into_inner()
    }

    #[test]
    fn it_hits_both_endpoints() {
        let a = rotation(Vector3::new(1., 1., 0.), 0.4);
        let b = rotation(Vector3::new(0., -1., 2.), 1.3);
        let d = dot(&a, &b);

        assert_abs_diff_eq!(slerp(0., &a, &b, d), a, epsilon = 1e-12);
        assert_abs_diff_eq!(slerp(1., &a, &b, d), b, epsilon = 1e-12);
    }

    #[test]
    fn it_moves_at_constant_angular_velocity() {
        let a = rotation(Vector3::new(0., 0., 1.), 0.);
        let b = rotation(Vector3::new(0., 0., 1.), 2.);
        let d = dot(&a, &b);

        for step in 0..=10 {
            let t = step as f64 / 10.;
            let q = slerp(t, &a, &b, d);
            assert_abs_diff_eq!(q, rotation(Vector3::new(0., 0., 1.), 2. * t), epsilon = 1e-12);
            assert_abs_diff_eq!(norm(&q), 1., epsilon = 1e-12);
        }
    }

    #[test]
    fn it_takes_the_long_arc_when_asked() {
        // Same rotation, opposite sign: d < 0 and no correction inside slerp
        let a = rotation(Vector3::new(1., 0., 0.), 0.5);
        let b = -rotation(Vector3::new(1., 0., 0.), 1.);
        let d = dot(&a, &b);
        assert!(d < 0.);

        let q = slerp(0.5, &a, &b, d);
        assert_abs_diff_eq!(norm(&q), 1., epsilon = 1e-12);
        assert!(dot(&q, &a) > 0.);
        assert!(dot(&q, &b) > 0.);
    }

    #[test]
    fn it_blends_linearly_for_coincident_inputs() {
        let a = rotation(Vector3::new(0., 1., 0.), 0.3);
        let q = slerp(0.25, &a, &a, 1.);
        assert_abs_diff_eq!(q, a, epsilon = 1e-15);
    }

    #[test]
    fn linear_branch_matches_closed_form_at_threshold() {
        let a = Quaternion::identity();
        let below = (SLERP_LINEAR_THRESHOLD * 0.999_999_99).acos();
        let above = (SLERP_LINEAR_THRESHOLD * 1.000_000_01).acos();

        let exact_b = rotation(Vector3::new(1., 0., 0.), 2. * below);
        let linear_b = rotation(Vector3::new(1., 0., 0.), 2. * above);
        assert!(dot(&a, &exact_b) < SLERP_LINEAR_THRESHOLD);
        assert!(dot(&a, &linear_b) >= SLERP_LINEAR_THRESHOLD);

        for step in 0..=8 {
            let t = step as f64 / 8.;
            let exact = slerp(t, &a, &exact_b, dot(&a, &exact_b));
            let linear = slerp(t, &a, &linear_b, dot(&a, &linear_b));

            // The linear branch leaves the sphere by at most (1 - cos(θ/2)) ~ 2.5e-5
            assert_abs_diff_eq!(exact, linear, epsilon = 1e-4);
            assert_abs_diff_eq!(norm(&linear), 1., epsilon = 3e-5);
        }
    }
}
