use nalgebra::{Quaternion, Scalar};
use num_traits::{Float, FromPrimitive};

use crate::logarithm::log_relative;
use crate::quat::{constant, dot, negate, parts};

/// Below this magnitude `sin(n) / n` is replaced by its Taylor expansion.
pub const SINC_SERIES_THRESHOLD: f64 = 1e-4;

/// Calculate the control (tangent) rotation anchored at `q1` from its neighbours `q0` and `q2`.
///
/// Neighbours on the far hemisphere from `q1` are flipped first so both arcs are the short ones.
/// The result is `exp(-(log(q0 * q1⁻¹) + log(q2 * q1⁻¹)) / 4) * q1`, which keeps the angular velocity
/// continuous where two segments share `q1`.
///
/// ```
/// use embedded_squad::control_rotation;
/// use nalgebra::{UnitQuaternion, Vector3};
/// use approx::assert_abs_diff_eq;
///
/// // Keys evenly spaced on one great circle need no correction.
/// let step = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.4);
/// let q1 = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 0.2);
/// let q0 = step.inverse() * q1;
/// let q2 = step * q1;
///
/// let p = control_rotation(q0.quaternion(), q1.quaternion(), q2.quaternion());
/// assert_abs_diff_eq!(p, *q1.quaternion(), epsilon = 1e-12);
/// ```
pub fn control_rotation<T>(q0: &Quaternion<T>, q1: &Quaternion<T>, q2: &Quaternion<T>) -> Quaternion<T>
where
    T: Float + FromPrimitive + Scalar,
{
    let q0 = if dot(q0, q1) < T::zero() { negate(q0) } else { *q0 };
    let q2 = if dot(q2, q1) < T::zero() { negate(q2) } else { *q2 };

    let b0 = log_relative(&q0, q1);
    let b1 = log_relative(&q2, q1);

    // Negated so the tangent leaving q1 matches the one arriving at it.
    let mx = -(b0[0] + b1[0]);
    let my = -(b0[1] + b1[1]);
    let mz = -(b0[2] + b1[2]);

    let n = (mx * mx + my * my + mz * mz).sqrt();
    let k = if n > constant(SINC_SERIES_THRESHOLD) {
        n.sin() / n
    } else {
        let n2 = n * n;
        T::one() + n2 * (n2 / constant(120.) - T::one() / constant(6.))
    };

    // exp(m)
    let ew = n.cos();
    let ex = k * mx;
    let ey = k * my;
    let ez = k * mz;

    // exp(m) * q1
    let (w1, x1, y1, z1) = parts(q1);
    Quaternion::new(
        ew * w1 - ex * x1 - ey * y1 - ez * z1,
        ex * w1 + ew * x1 - ez * y1 + ey * z1,
        ey * w1 + ez * x1 + ew * y1 - ex * z1,
        ez * w1 - ey * x1 + ex * y1 + ew * z1,
    )
}
