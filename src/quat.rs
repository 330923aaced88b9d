//! Component-level helpers shared by the interpolation routines.
//!
//! Quaternions are [`nalgebra::Quaternion`] values: `w` is the scalar part and
//! `i`, `j`, `k` hold x, y and z. nalgebra stores them as `[i, j, k, w]`, so the
//! routines unpack them with [`parts`] and work on plain scalars.

use nalgebra::{Quaternion, Scalar};
use num_traits::{Float, FromPrimitive};

/// Create a quaternion from a positional `[w, x, y, z]` array.
///
/// ```
/// use embedded_squad::quat::{from_wxyz, to_wxyz};
///
/// let q = from_wxyz([1.0, 0.0, 0.0, 0.0]);
/// assert_eq!(q.w, 1.0);
/// assert_eq!(to_wxyz(&q), [1.0, 0.0, 0.0, 0.0]);
/// ```
pub fn from_wxyz<T: Scalar>(wxyz: [T; 4]) -> Quaternion<T> {
    let [w, x, y, z] = wxyz;
    Quaternion::new(w, x, y, z)
}

/// Return the positional `[w, x, y, z]` array of `q`.
pub fn to_wxyz<T: Scalar + Copy>(q: &Quaternion<T>) -> [T; 4] {
    let (w, x, y, z) = parts(q);
    [w, x, y, z]
}

/// Unpack `q` into `(w, x, y, z)`.
pub fn parts<T: Scalar + Copy>(q: &Quaternion<T>) -> (T, T, T, T) {
    let c = &q.coords;
    (c[3], c[0], c[1], c[2])
}

/// 4D dot product of two quaternions.
pub fn dot<T: Float + Scalar>(a: &Quaternion<T>, b: &Quaternion<T>) -> T {
    let (aw, ax, ay, az) = parts(a);
    let (bw, bx, by, bz) = parts(b);
    aw * bw + ax * bx + ay * by + az * bz
}

/// Negate every component of `q`. `q` and `-q` represent the same rotation.
pub fn negate<T: Float + Scalar>(q: &Quaternion<T>) -> Quaternion<T> {
    let (w, x, y, z) = parts(q);
    Quaternion::new(-w, -x, -y, -z)
}

/// Euclidean norm of `q`.
pub fn norm<T: Float + Scalar>(q: &Quaternion<T>) -> T {
    dot(q, q).sqrt()
}

/// Lift a literal coefficient into `T`.
pub(crate) fn constant<T: Float + FromPrimitive>(value: f64) -> T {
    T::from_f64(value).unwrap_or_else(T::nan)
}
