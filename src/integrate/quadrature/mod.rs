//! Adaptive quadrature of scalar functions.
//!
//! Both integrators take a closure `Fn(T) -> T`, two bounds in either
//! order, and an options value, and return a single number. A NaN result
//! means the integrand was not finite somewhere it was sampled.
//!
//! # Available Methods
//!
//! | Method | Rule | Panel split | Tolerance per level | Depth (default / cap) |
//! |--------|------|-------------|---------------------|-----------------------|
//! | [`adaptive_simpson`] | 3-point vs 5-point Simpson | 2 | halved | 8 / 22 |
//! | [`adaptive_lobatto`] | 4-point Lobatto vs 7-point Kronrod | 6 | unchanged | 2 / 8 |
//!
//! # Choosing a Method
//!
//! - **Smooth functions**: [`adaptive_lobatto`] is exact for polynomials up
//!   to degree 9 and usually needs far fewer evaluations
//! - **Rough or piecewise functions**: [`adaptive_simpson`] refines more
//!   gradually and spends evaluations only where panels fail
//! - **Errors instead of NaN**: use [`integrate`]

mod checked;
mod lobatto;
mod numeric;
mod simpson;

pub use checked::{QuadratureMethod, QuadratureOptions, integrate, integrate_signed};
pub use lobatto::{LOBATTO_DEFAULT_DEPTH, LOBATTO_MAX_DEPTH, LobattoOptions, adaptive_lobatto};
pub use numeric::{
    DEFAULT_TOLERANCE, DefaultReal, Real, SIMPSON_TOLERANCE_FLOOR_FACTOR, constant,
    machine_epsilon, min_interval, nan, pi,
};
pub use simpson::{SIMPSON_DEFAULT_DEPTH, SIMPSON_MAX_DEPTH, SimpsonOptions, adaptive_simpson};
