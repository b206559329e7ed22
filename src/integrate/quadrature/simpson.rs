//! Adaptive Simpson's rule.
//!
//! Guy F. Kuncir, Algorithm 103, with the error estimate and Richardson
//! correction from J. N. Lyness, "Notes on the Adaptive Simpson Quadrature
//! Routine". Every panel compares a three-point estimate against a
//! five-point estimate and only failing panels are bisected.

use log::{debug, trace};

use super::numeric::{
    DEFAULT_TOLERANCE, Real, SIMPSON_TOLERANCE_FLOOR_FACTOR, SamplePoint, clamp_tolerance,
    constant, machine_epsilon, min_interval, nan,
};

/// Hard cap on refinement depth, at most 2^22 panels.
pub const SIMPSON_MAX_DEPTH: u8 = 22;

/// Default refinement depth.
pub const SIMPSON_DEFAULT_DEPTH: u8 = 8;

/// Options for adaptive Simpson integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpsonOptions<T> {
    /// Absolute tolerance (default: 1e-10, floored at 512 machine epsilons)
    pub tolerance: T,
    /// Maximum refinement depth (default: 8, capped at 22)
    pub max_depth: u8,
}

impl<T: Real> Default for SimpsonOptions<T> {
    fn default() -> Self {
        Self {
            tolerance: constant(DEFAULT_TOLERANCE),
            max_depth: SIMPSON_DEFAULT_DEPTH,
        }
    }
}

impl<T: Real> SimpsonOptions<T> {
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u8) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Tolerance after applying the floor.
    pub fn effective_tolerance(&self) -> T {
        let floor = constant::<T>(SIMPSON_TOLERANCE_FLOOR_FACTOR) * machine_epsilon::<T>();
        clamp_tolerance(self.tolerance, floor)
    }

    /// Depth after applying [`SIMPSON_MAX_DEPTH`].
    pub fn effective_max_depth(&self) -> u8 {
        self.max_depth.min(SIMPSON_MAX_DEPTH)
    }
}

/// Midpoint of a panel annotated with the three-point area of that panel.
#[derive(Debug, Clone, Copy)]
struct PanelEstimate<T> {
    point: SamplePoint<T>,
    area: T,
}

/// Simpson's three-point rule over `[start, end]`.
///
/// Samples the midpoint once and returns it together with
/// `|end - start| * (f(start) + 4 f(mid) + f(end)) / 6`.
fn three_point<T, F>(f: &F, start: &SamplePoint<T>, end: &SamplePoint<T>) -> PanelEstimate<T>
where
    T: Real,
    F: Fn(T) -> T,
{
    let two = constant::<T>(2.0);
    let point = SamplePoint::sample(f, (start.x + end.x) / two);
    let area = (end.x - start.x).abs() * (start.y + constant::<T>(4.0) * point.y + end.y)
        / constant::<T>(6.0);
    PanelEstimate { point, area }
}

/// Read-only state shared by every level of one top-level call.
struct Refinement<'a, F> {
    f: &'a F,
    max_depth: u8,
}

impl<F> Refinement<'_, F> {
    fn refine<T>(
        &self,
        start: &SamplePoint<T>,
        middle: &PanelEstimate<T>,
        end: &SamplePoint<T>,
        tolerance: T,
        depth: u8,
    ) -> T
    where
        T: Real,
        F: Fn(T) -> T,
    {
        if tolerance < machine_epsilon::<T>() || (end.x - start.x).abs() < min_interval::<T>() {
            trace!(
                "simpson: panel [{:?}, {:?}] hit the precision floor at depth {}",
                start.x, end.x, depth
            );
            return middle.area;
        }

        //    start  left  middle  right  end
        //      |-----*------|------*-----|
        let left = three_point(self.f, start, &middle.point);
        let right = three_point(self.f, &middle.point, end);

        if !left.point.is_finite() || !right.point.is_finite() {
            return nan();
        }

        let fine = left.area + right.area;
        let error = (fine - middle.area) / constant::<T>(15.0);
        if error.abs() < tolerance {
            return fine + error;
        }

        let depth = depth + 1;
        if depth > self.max_depth {
            trace!(
                "simpson: depth cap reached on [{:?}, {:?}], error estimate {:?}",
                start.x, end.x, error
            );
            return fine + error;
        }

        let half = tolerance / constant::<T>(2.0);
        self.refine(start, &left, &middle.point, half, depth)
            + self.refine(&middle.point, &right, end, half, depth)
    }
}

/// Integrate a function over `[a, b]` with adaptive Simpson's rule.
///
/// Each panel's three-point estimate is compared with the five-point
/// estimate from its two halves. A panel is accepted when
/// `|(fine - coarse) / 15|` is below its share of the tolerance, which is
/// halved at every level, or when the depth cap is reached. The accepted
/// value includes the `(fine - coarse) / 15` correction.
///
/// Bounds may be given in either order; the integral is always taken in
/// the positive direction, so negate the result yourself if you need a
/// signed integral over reversed bounds.
///
/// # Arguments
///
/// * `f` - Function to integrate
/// * `a` - One bound
/// * `b` - The other bound
/// * `options` - Tolerance and depth (see [`SimpsonOptions`])
///
/// # Returns
///
/// The integral estimate, or NaN when `f` is not finite at a sampled point.
///
/// # Example
///
/// ```
/// use adaptive_quadrature::integrate::{SimpsonOptions, adaptive_simpson};
///
/// let result = adaptive_simpson(|x: f64| 6.0 * x * x - 8.0 * x + 5.0, 1.0, 4.0, &SimpsonOptions::default());
/// assert!((result - 81.0).abs() < 1e-10);
/// ```
pub fn adaptive_simpson<T, F>(f: F, a: T, b: T, options: &SimpsonOptions<T>) -> T
where
    T: Real,
    F: Fn(T) -> T,
{
    let (a, b) = if b < a { (b, a) } else { (a, b) };

    let start = SamplePoint::sample(&f, a);
    let end = SamplePoint::sample(&f, b);
    let middle = three_point(&f, &start, &end);

    if !start.is_finite() || !end.is_finite() || !middle.point.is_finite() {
        debug!("simpson: integrand not finite on [{:?}, {:?}]", a, b);
        return nan();
    }

    let refinement = Refinement {
        f: &f,
        max_depth: options.effective_max_depth(),
    };
    let result = refinement.refine(&start, &middle, &end, options.effective_tolerance(), 0);

    if result.is_nan() {
        debug!("simpson: integrand not finite inside [{:?}, {:?}]", a, b);
    }
    result
}
