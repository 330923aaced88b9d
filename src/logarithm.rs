use nalgebra::{Quaternion, Scalar, Vector3};
use num_traits::{Float, FromPrimitive};

use crate::quat::{constant, parts};

/// Below this vector magnitude the series approximation replaces `atan2(v, w) / 4v`.
pub const LOG_SERIES_THRESHOLD: f64 = 1e-4;

/// Calculate a quarter of the logarithm vector of the relative rotation `a * b⁻¹`.
///
/// `a` and `b` must be unit quaternions, so the conjugate of `b` is used as its inverse.
/// For `w = cos(θ/2)` the result is `axis * θ/8`.
///
/// ```
/// use embedded_squad::log_relative;
/// use nalgebra::{Quaternion, Vector3};
/// use approx::assert_abs_diff_eq;
///
/// let identity = Quaternion::new(1.0, 0.0, 0.0, 0.0);
/// let half_angle = core::f64::consts::FRAC_PI_4;
/// let about_z = Quaternion::new(half_angle.cos(), 0.0, 0.0, half_angle.sin());
///
/// let v = log_relative(&about_z, &identity);
/// assert_abs_diff_eq!(v, Vector3::new(0.0, 0.0, core::f64::consts::FRAC_PI_2 / 8.0), epsilon = 1e-12);
/// ```
pub fn log_relative<T>(a: &Quaternion<T>, b: &Quaternion<T>) -> Vector3<T>
where
    T: Float + FromPrimitive + Scalar,
{
    let (aw, ax, ay, az) = parts(a);
    let (bw, bx, by, bz) = parts(b);

    // a * conj(b)
    let w = aw * bw + ax * bx + ay * by + az * bz;
    let x = ax * bw - aw * bx - ay * bz + az * by;
    let y = ay * bw - aw * by - az * bx + ax * bz;
    let z = az * bw - aw * bz - ax * by + ay * bx;

    let v = (x * x + y * y + z * z).sqrt();
    let t = if v > constant(LOG_SERIES_THRESHOLD) {
        v.atan2(w) / (constant::<T>(4.) * v)
    } else {
        constant::<T>(8. / 21.)
            + w * (constant::<T>(-27. / 140.)
                + w * (constant::<T>(8. / 105.) - w / constant(70.)))
    };

    Vector3::new(x * t, y * t, z * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use core::f64::consts::FRAC_PI_2;
    use nalgebra::{UnitQuaternion, Vector3};

    fn rotation(axis: Vector3<f64>, angle: f64) -> Quaternion<f64> {
        UnitQuaternion::from_axis_angle(&nalgebra::Unit::new_normalize(axis), angle).into_inner()
    }

    #[test]
    fn it_is_zero_for_identical_rotations() {
        let q = rotation(Vector3::new(1., 2., 3.), 0.7);
        assert_abs_diff_eq!(log_relative(&q, &q), Vector3::zeros(), epsilon = 1e-12);
    }

    #[test]
    fn it_scales_the_axis_by_an_eighth_of_the_angle() {
        let base = rotation(Vector3::new(0., 1., 0.), 0.3);
        let a = rotation(Vector3::new(1., 0., 0.), FRAC_PI_2) * base;

        // a * base⁻¹ is a quarter turn about x
        let v = log_relative(&a, &base);
        assert_abs_diff_eq!(v, Vector3::new(FRAC_PI_2 / 8., 0., 0.), epsilon = 1e-12);
    }

    #[test]
    fn it_is_antisymmetric() {
        let a = rotation(Vector3::new(1., -1., 0.5), 0.9);
        let b = rotation(Vector3::new(0., 0., 1.), -0.4);
        assert_abs_diff_eq!(log_relative(&a, &b), -log_relative(&b, &a), epsilon = 1e-12);
    }

    #[test]
    fn series_branch_matches_closed_form_at_threshold() {
        let axis = Vector3::new(0.3, -0.5, 0.8).normalize();
        // |vector part| = sin(θ/2) lands just either side of the threshold
        let below = 2. * (LOG_SERIES_THRESHOLD * 0.999_999).asin();
        let above = 2. * (LOG_SERIES_THRESHOLD * 1.000_001).asin();

        let identity = Quaternion::identity();
        let series = log_relative(&rotation(axis, below), &identity);
        let exact = log_relative(&rotation(axis, above), &identity);

        assert_abs_diff_eq!(series, exact, epsilon = 1e-6);
        assert_abs_diff_eq!(series.norm(), below / 8., epsilon = 1e-9);
    }

    #[test]
    fn series_is_a_quarter_at_identity() {
        let identity = Quaternion::<f32>::identity();
        let q = Quaternion::new(1., 1e-6, 0., 0.);
        let v = log_relative(&q, &identity);
        assert_abs_diff_eq!(v.x, 0.25e-6, epsilon = 1e-12);
    }
}
