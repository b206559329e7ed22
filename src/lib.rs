//! Adaptive quadrature for scalar real functions.
//!
//! Computes definite integrals of `f: T -> T` over a finite interval to a
//! requested absolute tolerance without the caller choosing sample points.
//! See [`integrate`] for the available methods.

pub mod integrate;

pub use integrate::{
    IntegrateError, IntegrateResult, LobattoOptions, QuadratureMethod, QuadratureOptions, Real,
    SimpsonOptions, adaptive_lobatto, adaptive_simpson,
};
