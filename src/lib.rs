//! # embedded-squad
//! A `#![no_std]` spherical quadrangle (SQUAD) interpolation library for embedded rust
//!
//! SQUAD moves through a sequence of keyframe orientations with continuous angular velocity,
//! avoiding the kinks of chaining plain slerps.
//!
//! # Interpolation
//! [`SquadSegment`] precomputes one segment between two keyframes from their neighbours
//! and evaluates it at any `t` in `[0, 1]`
//! (see [`build_interpolator`] for the same thing as a closure).
//!
//! # Building blocks
//! [`control_rotation`] computes the tangent quaternion at a keyframe.
//!
//! [`slerp`] interpolates two quaternions given their dot product.
//!
//! [`log_relative`] computes the scaled logarithm of a relative rotation.
//!
//! [`quat`] contains helpers for working with raw `[w, x, y, z]` arrays.
//!
//! All inputs are assumed to be unit quaternions.

#![cfg_attr(not(test), no_std)]

pub mod control;
pub use control::control_rotation;

mod error;
pub use error::Error;

pub mod logarithm;
pub use logarithm::log_relative;

pub mod quat;

pub mod slerp;
pub use slerp::slerp;

pub mod squad;
pub use squad::{build_interpolator, SquadSegment};
