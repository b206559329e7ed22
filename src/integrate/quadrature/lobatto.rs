//! Adaptive Gauss-Lobatto quadrature with a Kronrod extension.
//!
//! Walter Gander and Walter Gautschi, "Adaptive Quadrature - Revisited".
//! Each panel is sampled at seven points: the two endpoints, the midpoint,
//! two Lobatto nodes and two Kronrod nodes. The seven-point Kronrod rule
//! gives the estimate; the embedded four-point Lobatto rule is used only to
//! judge it.

use log::{debug, trace};

use super::numeric::{
    DEFAULT_TOLERANCE, Real, SamplePoint, clamp_tolerance, constant, machine_epsilon,
    min_interval, nan,
};

/// Hard cap on refinement depth, at most 7^8 panels.
pub const LOBATTO_MAX_DEPTH: u8 = 8;

/// Default refinement depth.
pub const LOBATTO_DEFAULT_DEPTH: u8 = 2;

/// Options for adaptive Gauss-Lobatto integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LobattoOptions<T> {
    /// Absolute tolerance per panel (default: 1e-10, floored at machine epsilon)
    pub tolerance: T,
    /// Maximum refinement depth (default: 2, capped at 8)
    pub max_depth: u8,
}

impl<T: Real> Default for LobattoOptions<T> {
    fn default() -> Self {
        Self {
            tolerance: constant(DEFAULT_TOLERANCE),
            max_depth: LOBATTO_DEFAULT_DEPTH,
        }
    }
}

impl<T: Real> LobattoOptions<T> {
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u8) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Tolerance after applying the machine epsilon floor.
    pub fn effective_tolerance(&self) -> T {
        clamp_tolerance(self.tolerance, machine_epsilon())
    }

    /// Depth after applying [`LOBATTO_MAX_DEPTH`].
    pub fn effective_max_depth(&self) -> u8 {
        self.max_depth.min(LOBATTO_MAX_DEPTH)
    }
}

/// Node ratios relative to the panel half-width.
struct Nodes<T> {
    /// sqrt(1/5), the interior four-point Lobatto nodes
    lobatto: T,
    /// sqrt(2/3), the added Kronrod nodes
    kronrod: T,
}

impl<T: Real> Nodes<T> {
    fn new() -> Self {
        Self {
            lobatto: (T::one() / constant::<T>(5.0)).sqrt(),
            kronrod: (constant::<T>(2.0) / constant::<T>(3.0)).sqrt(),
        }
    }
}

/// Read-only state shared by every panel of one top-level call.
struct Refinement<'a, T, F> {
    f: &'a F,
    nodes: Nodes<T>,
    tolerance: T,
    max_depth: u8,
}

impl<T, F> Refinement<'_, T, F>
where
    T: Real,
    F: Fn(T) -> T,
{
    /// Integrate the panel between `p1` and `p7`.
    ///
    /// Failing panels are split at their interior points into six
    /// sub-panels, each tested against the same absolute tolerance.
    fn panel(&self, p1: &SamplePoint<T>, p7: &SamplePoint<T>, depth: u8) -> T {
        let f = self.f;
        let h = (p7.x - p1.x) / constant::<T>(2.0);
        let mid = (p1.x + p7.x) / constant::<T>(2.0);

        let p2 = SamplePoint::sample(f, mid - self.nodes.kronrod * h);
        let p3 = SamplePoint::sample(f, mid - self.nodes.lobatto * h);
        let p4 = SamplePoint::sample(f, mid);
        let p5 = SamplePoint::sample(f, mid + self.nodes.lobatto * h);
        let p6 = SamplePoint::sample(f, mid + self.nodes.kronrod * h);

        let kronrod = h / constant::<T>(1470.0)
            * ((p1.y + p7.y) * constant::<T>(77.0)
                + (p2.y + p6.y) * constant::<T>(432.0)
                + (p3.y + p5.y) * constant::<T>(625.0)
                + p4.y * constant::<T>(672.0));

        if !kronrod.is_finite() {
            return nan();
        }

        if h.abs() < min_interval::<T>() {
            trace!("lobatto: panel [{:?}, {:?}] below the minimum width", p1.x, p7.x);
            return kronrod;
        }

        let depth = depth + 1;
        if depth > self.max_depth {
            trace!("lobatto: depth cap reached on [{:?}, {:?}]", p1.x, p7.x);
            return kronrod;
        }

        let lobatto = h / constant::<T>(6.0) * (p1.y + p7.y + (p3.y + p5.y) * constant::<T>(5.0));

        if (kronrod - lobatto).abs() < self.tolerance {
            return kronrod;
        }

        self.panel(p1, &p2, depth)
            + self.panel(&p2, &p3, depth)
            + self.panel(&p3, &p4, depth)
            + self.panel(&p4, &p5, depth)
            + self.panel(&p5, &p6, depth)
            + self.panel(&p6, p7, depth)
    }
}

/// Integrate a function over `[a, b]` with adaptive Gauss-Lobatto quadrature.
///
/// A panel is accepted when its seven-point Kronrod estimate and its
/// four-point Lobatto estimate differ by less than the tolerance, when it
/// becomes narrower than the minimum interval, or when the depth cap is
/// reached. Unlike [`adaptive_simpson`](super::adaptive_simpson), the
/// tolerance is not divided among sub-panels.
///
/// Bounds may be given in either order; the integral is always taken in
/// the positive direction.
///
/// # Arguments
///
/// * `f` - Function to integrate
/// * `a` - One bound
/// * `b` - The other bound
/// * `options` - Tolerance and depth (see [`LobattoOptions`])
///
/// # Returns
///
/// The integral estimate, or NaN when `f` is not finite at a sampled point.
///
/// # Example
///
/// ```
/// use adaptive_quadrature::integrate::{LobattoOptions, adaptive_lobatto};
///
/// let result = adaptive_lobatto(f64::ln, 1.0, 2.0, &LobattoOptions::default());
/// assert!((result - (2.0 * 2.0_f64.ln() - 1.0)).abs() < 1e-10);
/// ```
pub fn adaptive_lobatto<T, F>(f: F, a: T, b: T, options: &LobattoOptions<T>) -> T
where
    T: Real,
    F: Fn(T) -> T,
{
    let (a, b) = if b < a { (b, a) } else { (a, b) };

    let start = SamplePoint::sample(&f, a);
    let end = SamplePoint::sample(&f, b);

    if !start.is_finite() || !end.is_finite() {
        debug!("lobatto: integrand not finite at [{:?}, {:?}]", a, b);
        return nan();
    }

    let refinement = Refinement {
        f: &f,
        nodes: Nodes::new(),
        tolerance: options.effective_tolerance(),
        max_depth: options.effective_max_depth(),
    };
    let result = refinement.panel(&start, &end, 0);

    if result.is_nan() {
        debug!("lobatto: integrand not finite inside [{:?}, {:?}]", a, b);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::cell::Cell;
    use std::f64::consts::PI;

    fn lobatto_default<F: Fn(f64) -> f64>(f: F, a: f64, b: f64) -> f64 {
        adaptive_lobatto(f, a, b, &LobattoOptions::default())
    }

    #[test]
    fn test_options_default_and_clamping() {
        let options = LobattoOptions::<f64>::default();
        assert_eq!(options.tolerance, 1e-10);
        assert_eq!(options.max_depth, 2);

        let options = options.with_tolerance(-3.0).with_max_depth(9);
        assert_eq!(options.effective_tolerance(), f64::EPSILON);
        assert_eq!(options.effective_max_depth(), LOBATTO_MAX_DEPTH);
    }

    #[test]
    fn test_nodes() {
        let nodes = Nodes::<f64>::new();
        assert_relative_eq!(nodes.lobatto * nodes.lobatto, 0.2, epsilon = 1e-15);
        assert_relative_eq!(nodes.kronrod * nodes.kronrod, 2.0 / 3.0, epsilon = 1e-15);
    }

    #[test]
    fn test_lobatto_monomials() {
        // x^i on [0, 1] = 1 / (i + 1), exact up to degree 9
        for i in 0..=9 {
            let result = lobatto_default(|x| x.powi(i), 0.0, 1.0);
            assert_abs_diff_eq!(result, 1.0 / (i as f64 + 1.0), epsilon = 1e-13);
        }
    }

    #[test]
    fn test_lobatto_low_degree_single_panel() {
        // Both rules are exact up to degree 5, so the first panel is accepted
        let calls = Cell::new(0usize);
        let f = |x: f64| {
            calls.set(calls.get() + 1);
            x.powi(5) - 3.0 * x * x
        };
        let result = lobatto_default(f, -1.0, 2.0);
        // x^6/6 - x^3 => (64/6 - 8) - (1/6 + 1) = 1.5
        assert_abs_diff_eq!(result, 1.5, epsilon = 1e-12);
        assert_eq!(calls.get(), 7);
    }

    #[test]
    fn test_lobatto_sin() {
        let result = lobatto_default(f64::sin, 0.0, PI);
        assert_abs_diff_eq!(result, 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_lobatto_transcendental() {
        let result = lobatto_default(f64::ln, 1.0, 2.0);
        assert_abs_diff_eq!(result, 2.0 * 2.0_f64.ln() - 1.0, epsilon = 1e-10);

        let result = lobatto_default(|x| x.sqrt() + 1.0 / (3.0 * x.sqrt()), 4.0, 9.0);
        assert_abs_diff_eq!(result, 40.0 / 3.0, epsilon = 1e-10);

        let result = lobatto_default(|x| 6.0 * x * x - 8.0 * x + 5.0, 1.0, 4.0);
        assert_abs_diff_eq!(result, 81.0, epsilon = 1e-10);
    }

    #[test]
    fn test_lobatto_bound_order() {
        let forward = lobatto_default(|x| x.cos() * x, -2.0, 5.0);
        let backward = lobatto_default(|x| x.cos() * x, 5.0, -2.0);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_lobatto_empty_interval() {
        let result = lobatto_default(f64::exp, 1.0, 1.0);
        assert_eq!(result, 0.0);
    }

    #[test]
    fn test_lobatto_nan_at_midpoint() {
        let result = lobatto_default(|x| if x == 0.5 { f64::NAN } else { x }, 0.0, 1.0);
        assert!(result.is_nan());
    }

    #[test]
    fn test_lobatto_nan_at_endpoint() {
        let result = lobatto_default(|x| 1.0 / x, 0.0, 1.0);
        assert!(result.is_nan());
    }

    #[test]
    fn test_lobatto_nan_in_sub_panel() {
        // None of the seven top-level points lies in (0, 0.05); the second
        // level samples -0.0410 and 0.0410 inside the two middle sub-panels
        let f = |x: f64| {
            if x > 0.0 && x < 0.05 {
                f64::NAN
            } else {
                (10.0 * x).exp()
            }
        };
        let result = lobatto_default(f, -1.0, 1.0);
        assert!(result.is_nan());

        let single = adaptive_lobatto(f, -1.0, 1.0, &LobattoOptions::default().with_max_depth(0));
        assert!(single.is_finite());
    }

    #[test]
    fn test_lobatto_discontinuity_terminates() {
        let step = |x: f64| if x < 0.3 { -1.0 } else { 2.0 };

        let options = LobattoOptions::default().with_max_depth(0);
        assert!(adaptive_lobatto(step, 0.0, 1.0, &options).is_finite());

        let result = lobatto_default(step, 0.0, 1.0);
        assert!(result.is_finite());
        assert_abs_diff_eq!(result, 1.1, epsilon = 0.2);

        let options = LobattoOptions::default().with_max_depth(LOBATTO_MAX_DEPTH);
        let result = adaptive_lobatto(step, 0.0, 1.0, &options);
        assert!(result.is_finite());
        assert_abs_diff_eq!(result, 1.1, epsilon = 1e-3);
    }

    #[test]
    fn test_lobatto_oscillator_terminates() {
        let result = lobatto_default(|x| (500.0 * x).sin() * x, 0.0, 20.0);
        assert!(result.is_finite());
    }

    #[test]
    fn test_lobatto_f32() {
        let options = LobattoOptions::<f32>::default();
        let result = adaptive_lobatto(|x: f32| x.exp(), 0.0, 1.0, &options);
        assert!((result - (std::f32::consts::E - 1.0)).abs() < 1e-5);
    }
}
