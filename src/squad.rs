//! Spherical quadrangle interpolation between two keyframes.
//!
//! A segment from `q1` to `q2` also needs the keyframes on either side (`q0` and `q3`)
//! to build the control rotations that keep consecutive segments tangent-continuous.
//! ```
//! use embedded_squad::SquadSegment;
//! use nalgebra::{UnitQuaternion, Vector3};
//!
//! let keys = [0.0, 0.5, 1.2, 1.4].map(|angle| {
//!     UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angle).into_inner()
//! });
//!
//! let segment = SquadSegment::new(&keys[0], &keys[1], &keys[2], &keys[3]);
//! for step in 0..=4 {
//!     let attitude = segment.evaluate(step as f64 / 4.0);
//!     // Drive the camera or actuator with `attitude`
//!     # let _ = attitude;
//! }
//! ```

use log::{debug, trace};
use nalgebra::{Quaternion, Scalar};
use num_traits::{Float, FromPrimitive};

use crate::control::control_rotation;
use crate::quat::{constant, dot, negate, norm};
use crate::slerp::slerp;
use crate::Error;

/// Precomputed SQUAD state for the segment between two keyframes.
///
/// Evaluation only reads this state, so a segment can be shared between threads
/// and evaluated any number of times.
#[derive(Clone, Copy, Debug)]
pub struct SquadSegment<T: Scalar> {
    /// Start keyframe (`q1`).
    q1: Quaternion<T>,
    /// End keyframe (`q2`), on the same hemisphere as `q1`.
    q2: Quaternion<T>,
    /// Control rotation anchored at `q1`.
    p0: Quaternion<T>,
    /// Control rotation anchored at `q2`, flipped together with `q2`.
    p1: Quaternion<T>,
    dq: T,
    dp: T,
}

impl<T> SquadSegment<T>
where
    T: Float + FromPrimitive + Scalar,
{
    /// Create the segment from `q1` to `q2`, using `q0` and `q3` as neighbours.
    ///
    /// All four inputs must be unit quaternions. This is not checked, see [`Self::try_new`].
    pub fn new(
        q0: &Quaternion<T>,
        q1: &Quaternion<T>,
        q2: &Quaternion<T>,
        q3: &Quaternion<T>,
    ) -> Self {
        let p0 = control_rotation(q0, q1, q2);
        let mut p1 = control_rotation(q1, q2, q3);

        let mut dq = dot(q1, q2);
        let dp = dot(&p0, &p1).abs();

        let mut q2 = *q2;
        if dq < T::zero() {
            trace!("flipping q2 and p1 onto the hemisphere of q1 (dot = {:?})", dq);
            p1 = negate(&p1);
            q2 = negate(&q2);
            dq = -dq;
        }

        Self {
            q1: *q1,
            q2,
            p0,
            p1,
            dq,
            dp,
        }
    }

    /// Create the segment after checking every keyframe norm is within `tolerance` of one.
    ///
    /// ```
    /// use embedded_squad::{Error, SquadSegment};
    /// use nalgebra::Quaternion;
    ///
    /// let identity = Quaternion::identity();
    /// let scaled = Quaternion::new(2.0, 0.0, 0.0, 0.0);
    ///
    /// let err = SquadSegment::try_new(&identity, &scaled, &identity, &identity, 1e-6).unwrap_err();
    /// assert_eq!(err, Error::NotNormalized { index: 1, norm: 2.0 });
    /// ```
    pub fn try_new(
        q0: &Quaternion<T>,
        q1: &Quaternion<T>,
        q2: &Quaternion<T>,
        q3: &Quaternion<T>,
        tolerance: T,
    ) -> Result<Self, Error<T>> {
        for (index, q) in [q0, q1, q2, q3].into_iter().enumerate() {
            let norm = norm(q);
            // Negated comparison so a NaN norm is rejected too
            if !((norm - T::one()).abs() <= tolerance) {
                debug!("rejecting keyframe q{} with norm {:?}", index, norm);
                return Err(Error::NotNormalized { index, norm });
            }
        }

        Ok(Self::new(q0, q1, q2, q3))
    }

    /// Calculate the orientation at `t` in `[0, 1]`, from `q1` at `t = 0` to `q2` at `t = 1`.
    pub fn evaluate(&self, t: T) -> Quaternion<T> {
        let w0 = slerp(t, &self.q1, &self.q2, self.dq);
        let w1 = slerp(t, &self.p0, &self.p1, self.dp);

        let blend = constant::<T>(2.) * t * (T::one() - t);
        slerp(blend, &w0, &w1, dot(&w0, &w1))
    }

    /// Convert this segment into a function of `t`.
    pub fn interpolator(self) -> impl Fn(T) -> Quaternion<T> {
        move |t| self.evaluate(t)
    }

    /// The keyframe at `t = 0`.
    pub fn start(&self) -> &Quaternion<T> {
        &self.q1
    }

    /// The keyframe at `t = 1`, sign-corrected onto the hemisphere of [`Self::start`].
    pub fn end(&self) -> &Quaternion<T> {
        &self.q2
    }

    /// The control rotations anchored at the start and end keyframes.
    pub fn controls(&self) -> (&Quaternion<T>, &Quaternion<T>) {
        (&self.p0, &self.p1)
    }
}

/// Build the interpolator between `q1` and `q2`, with `q0` and `q3` as neighbouring keyframes.
///
/// ```
/// use embedded_squad::build_interpolator;
/// use nalgebra::{UnitQuaternion, Vector3};
/// use approx::assert_abs_diff_eq;
///
/// let identity = UnitQuaternion::identity().into_inner();
/// let quarter = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), core::f64::consts::FRAC_PI_2).into_inner();
///
/// let f = build_interpolator(&identity, &identity, &quarter, &quarter);
/// assert_abs_diff_eq!(f(0.0), identity, epsilon = 1e-6);
/// assert_abs_diff_eq!(f(1.0), quarter, epsilon = 1e-6);
/// ```
pub fn build_interpolator<T>(
    q0: &Quaternion<T>,
    q1: &Quaternion<T>,
    q2: &Quaternion<T>,
    q3: &Quaternion<T>,
) -> impl Fn(T) -> Quaternion<T>
where
    T: Float + FromPrimitive + Scalar,
{
    SquadSegment::new(q0, q1, q2, q3).interpolator()
}
