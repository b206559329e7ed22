//! Numerical integration for adaptive-quadrature.
//!
//! This module provides adaptive quadrature of scalar, single-variable
//! real functions over a finite interval:
//! - **Simpson**: adaptive composite Simpson's rule with Richardson correction
//! - **Lobatto**: adaptive Gauss-Lobatto rule with a Kronrod extension
//!
//! # Architecture
//!
//! The integrators are plain generic functions over the working real type
//! `T: Real` and a closure `Fn(T) -> T`. They hold no state between calls
//! and report a non-finite integrand by returning NaN. [`integrate`] wraps
//! both and turns that sentinel into an [`IntegrateError`].
//!
//! # Example
//!
//! ```
//! use adaptive_quadrature::integrate::{
//!     LobattoOptions, SimpsonOptions, adaptive_lobatto, adaptive_simpson,
//! };
//! use std::f64::consts::PI;
//!
//! let simpson = adaptive_simpson(f64::sin, 0.0, PI, &SimpsonOptions::default());
//! let lobatto = adaptive_lobatto(f64::sin, 0.0, PI, &LobattoOptions::default());
//! assert!((simpson - 2.0).abs() < 1e-10);
//! assert!((lobatto - 2.0).abs() < 1e-10);
//!
//! // The integrand is not finite at x = 0
//! assert!(adaptive_lobatto(|x: f64| 1.0 / x, 0.0, 1.0, &LobattoOptions::default()).is_nan());
//! ```

pub mod error;
mod quadrature;

// Re-export error types
pub use error::{IntegrateError, IntegrateResult};

pub use quadrature::*;
