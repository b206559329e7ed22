//! `Result`-returning front end over the adaptive integrators.

use std::fmt;

use log::debug;

use crate::integrate::error::{IntegrateError, IntegrateResult};

use super::lobatto::{LOBATTO_DEFAULT_DEPTH, LOBATTO_MAX_DEPTH, LobattoOptions, adaptive_lobatto};
use super::numeric::{DEFAULT_TOLERANCE, Real, constant};
use super::simpson::{SIMPSON_DEFAULT_DEPTH, SIMPSON_MAX_DEPTH, SimpsonOptions, adaptive_simpson};

/// Adaptive rule used by [`integrate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuadratureMethod {
    /// Adaptive Simpson's rule, bisecting failing panels
    Simpson,
    /// Adaptive seven-point Gauss-Lobatto/Kronrod, splitting failing panels six ways
    #[default]
    Lobatto,
}

impl QuadratureMethod {
    pub fn default_max_depth(self) -> u8 {
        match self {
            Self::Simpson => SIMPSON_DEFAULT_DEPTH,
            Self::Lobatto => LOBATTO_DEFAULT_DEPTH,
        }
    }

    /// Largest depth the method will honour.
    pub fn depth_limit(self) -> u8 {
        match self {
            Self::Simpson => SIMPSON_MAX_DEPTH,
            Self::Lobatto => LOBATTO_MAX_DEPTH,
        }
    }
}

impl fmt::Display for QuadratureMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simpson => write!(f, "simpson"),
            Self::Lobatto => write!(f, "lobatto"),
        }
    }
}

/// Options for [`integrate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureOptions<T> {
    /// Integration rule (default: Lobatto)
    pub method: QuadratureMethod,
    /// Absolute tolerance (default: 1e-10)
    pub tolerance: T,
    /// Maximum refinement depth (default: the method's default)
    pub max_depth: u8,
}

impl<T: Real> Default for QuadratureOptions<T> {
    fn default() -> Self {
        Self::for_method(QuadratureMethod::default())
    }
}

impl<T: Real> QuadratureOptions<T> {
    /// Default tolerance and depth for `method`.
    pub fn for_method(method: QuadratureMethod) -> Self {
        Self {
            method,
            tolerance: constant(DEFAULT_TOLERANCE),
            max_depth: method.default_max_depth(),
        }
    }

    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u8) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl<T: Real> From<SimpsonOptions<T>> for QuadratureOptions<T> {
    fn from(options: SimpsonOptions<T>) -> Self {
        Self {
            method: QuadratureMethod::Simpson,
            tolerance: options.tolerance,
            max_depth: options.max_depth,
        }
    }
}

impl<T: Real> From<LobattoOptions<T>> for QuadratureOptions<T> {
    fn from(options: LobattoOptions<T>) -> Self {
        Self {
            method: QuadratureMethod::Lobatto,
            tolerance: options.tolerance,
            max_depth: options.max_depth,
        }
    }
}

fn to_f64<T: Real>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Integrate a function over `[a, b]`, reporting failures as errors.
///
/// Runs the integrator selected by `options.method`. Bounds may be given in
/// either order and the positive-direction integral is returned, as with
/// the underlying integrators.
///
/// # Errors
///
/// - [`IntegrateError::InvalidInterval`] if a bound is infinite or NaN
/// - [`IntegrateError::InvalidParameter`] if the tolerance is NaN or negative
/// - [`IntegrateError::NonFiniteIntegrand`] if `f` was not finite at a sampled point
///
/// # Example
///
/// ```
/// use adaptive_quadrature::integrate::{QuadratureMethod, QuadratureOptions, integrate};
///
/// let options = QuadratureOptions::for_method(QuadratureMethod::Simpson);
/// let result = integrate(|x: f64| x.sin(), 0.0, std::f64::consts::PI, &options).unwrap();
/// assert!((result - 2.0).abs() < 1e-10);
///
/// assert!(integrate(|x: f64| x.ln(), -1.0, 1.0, &options).is_err());
/// ```
pub fn integrate<T, F>(f: F, a: T, b: T, options: &QuadratureOptions<T>) -> IntegrateResult<T>
where
    T: Real,
    F: Fn(T) -> T,
{
    if !a.is_finite() || !b.is_finite() {
        debug!("integrate: rejected bounds [{:?}, {:?}]", a, b);
        return Err(IntegrateError::InvalidInterval {
            a: to_f64(a),
            b: to_f64(b),
            context: options.method.to_string(),
        });
    }

    if options.tolerance.is_nan() || options.tolerance < T::zero() {
        debug!("integrate: rejected tolerance {:?}", options.tolerance);
        return Err(IntegrateError::InvalidParameter {
            parameter: "tolerance".to_string(),
            message: format!(
                "must be a non-negative number (got {:?})",
                options.tolerance
            ),
        });
    }

    let value = match options.method {
        QuadratureMethod::Simpson => {
            let simpson = SimpsonOptions {
                tolerance: options.tolerance,
                max_depth: options.max_depth,
            };
            adaptive_simpson(f, a, b, &simpson)
        }
        QuadratureMethod::Lobatto => {
            let lobatto = LobattoOptions {
                tolerance: options.tolerance,
                max_depth: options.max_depth,
            };
            adaptive_lobatto(f, a, b, &lobatto)
        }
    };

    if !value.is_finite() {
        return Err(IntegrateError::NonFiniteIntegrand {
            method: options.method.to_string(),
            context: format!("[{}, {}]", to_f64(a.min(b)), to_f64(a.max(b))),
        });
    }

    Ok(value)
}

/// Like [`integrate`], but negates the result when `b < a`.
///
/// # Example
///
/// ```
/// use adaptive_quadrature::integrate::{QuadratureOptions, integrate_signed};
///
/// let options = QuadratureOptions::default();
/// let result = integrate_signed(|x: f64| x * x, 3.0, 0.0, &options).unwrap();
/// assert!((result + 9.0).abs() < 1e-10);
/// ```
pub fn integrate_signed<T, F>(
    f: F,
    a: T,
    b: T,
    options: &QuadratureOptions<T>,
) -> IntegrateResult<T>
where
    T: Real,
    F: Fn(T) -> T,
{
    let value = integrate(f, a, b, options)?;
    Ok(if b < a { -value } else { value })
}
