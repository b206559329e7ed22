//! Numeric policy shared by the adaptive integrators.
//!
//! Both integrators agree on one working real type, its machine epsilon,
//! a floor below which a panel is considered degenerate, and a quiet NaN
//! used as the only "invalid result" value.

use std::fmt::Debug;

use num_traits::{Float, FloatConst, NumCast};

/// Working real type for quadrature.
///
/// Implemented for every float that supports the operations the
/// integrators need (`f32` and `f64` out of the box). The working
/// precision is picked at compile time by choosing `T`.
pub trait Real: Float + FloatConst + Debug {}

impl<T> Real for T where T: Float + FloatConst + Debug {}

/// Working type used when the caller has no preference.
pub type DefaultReal = f64;

/// Default absolute tolerance for both integrators.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Simpson tolerances are clamped to this multiple of machine epsilon.
///
/// The tolerance is halved at every refinement level, so the floor keeps
/// some levels available even for a zero request.
pub const SIMPSON_TOLERANCE_FLOOR_FACTOR: f64 = 512.0;

/// Convert an `f64` constant into the working type.
///
/// Values that cannot be represented come back as NaN.
#[inline]
pub fn constant<T: Real>(value: f64) -> T {
    <T as NumCast>::from(value).unwrap_or_else(T::nan)
}

/// Smallest value such that `1 + machine_epsilon() != 1`.
#[inline]
pub fn machine_epsilon<T: Real>() -> T {
    T::epsilon()
}

/// Smallest panel width worth evaluating.
///
/// Tied to `f64` precision even when `T` is wider, which stops pointless
/// subdivision of very narrow panels.
#[inline]
pub fn min_interval<T: Real>() -> T {
    constant(f64::EPSILON)
}

/// Quiet NaN returned for integrands that are not finite where sampled.
#[inline]
pub fn nan<T: Real>() -> T {
    T::nan()
}

/// π in the working type.
#[inline]
pub fn pi<T: Real>() -> T {
    T::PI()
}

/// Clamp a requested tolerance to `floor`.
///
/// `Float::max` ignores NaN, so a NaN request falls back to the floor.
#[inline]
pub(crate) fn clamp_tolerance<T: Real>(tolerance: T, floor: T) -> T {
    tolerance.max(floor)
}

/// A sampled abscissa together with its function value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SamplePoint<T> {
    pub x: T,
    pub y: T,
}

impl<T: Real> SamplePoint<T> {
    #[inline]
    pub fn sample<F>(f: &F, x: T) -> Self
    where
        F: Fn(T) -> T,
    {
        Self { x, y: f(x) }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.y.is_finite()
    }
}
