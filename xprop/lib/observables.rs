//! Observables computed from recorded probability densities.
//!
//! Expectation values are discrete, grid-weighted sums
//! ```text
//! E[f] = Σ f(x[j]) ρ[j] dx
//! ```
//! taken over the density *as recorded*. When an absorbing potential has
//! removed probability, `E[1] < 1` and the "raw" quantities below describe the
//! surviving, un-renormalized density. This is intended: the raw spread of an
//! absorbed packet shrinks along with its norm. The `conditional_*` variants
//! renormalize each sample first.

use ndarray as nd;
use crate::{ Arr1, utils::integrate };

// (E[1], E[x], E[x²]) for a single density
fn moments<S, T>(x: &Arr1<S>, dx: f64, rho: &Arr1<T>) -> (f64, f64, f64)
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    let (m0, m1, m2)
        = x.iter().zip(rho)
        .fold((0.0, 0.0, 0.0), |(m0, m1, m2), (xj, rj)| {
            (m0 + rj, m1 + xj * rj, m2 + xj * xj * rj)
        });
    (m0 * dx, m1 * dx, m2 * dx)
}

/// Compute the positional spread `sqrt(E[x²] - E[x]²)` of a single density,
/// without renormalizing it.
///
/// The variance is clamped at zero before taking the square root.
///
/// *Panics if the arrays have unequal length*.
pub fn spread<S, T>(x: &Arr1<S>, dx: f64, rho: &Arr1<T>) -> f64
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    assert_eq!(x.len(), rho.len(), "spread: length mismatch");
    let (_, m1, m2) = moments(x, dx, rho);
    (m2 - m1.powi(2)).max(0.0).sqrt()
}

/// Compute the positional spread of a single density after renormalizing it to
/// unit total probability.
///
/// Returns `NaN` for a density with zero total probability.
///
/// *Panics if the arrays have unequal length*.
pub fn conditional_spread<S, T>(x: &Arr1<S>, dx: f64, rho: &Arr1<T>) -> f64
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    assert_eq!(x.len(), rho.len(), "conditional_spread: length mismatch");
    let (m0, m1, m2) = moments(x, dx, rho);
    if m0 <= 0.0 { return f64::NAN; }
    (m2 / m0 - (m1 / m0).powi(2)).max(0.0).sqrt()
}

/// Ordered record of probability densities sampled over a single propagation
/// run.
///
/// Densities are stored in a 2D array whose first axis indexes time.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    t: nd::Array1<f64>,
    x: nd::Array1<f64>,
    dx: f64,
    rho: nd::Array2<f64>,
}

impl Trajectory {
    /// Create a new record.
    ///
    /// *Panics if the shape of `rho` is not `(t.len(), x.len())`*.
    pub fn new(
        t: nd::Array1<f64>,
        x: nd::Array1<f64>,
        dx: f64,
        rho: nd::Array2<f64>,
    ) -> Self
    {
        assert_eq!(
            rho.dim(), (t.len(), x.len()),
            "Trajectory::new: density shape does not match times and positions",
        );
        Self { t, x, dx, rho }
    }

    /// Number of recorded samples.
    pub fn len(&self) -> usize { self.t.len() }

    /// `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool { self.t.is_empty() }

    /// Sample times.
    pub fn t(&self) -> &nd::Array1<f64> { &self.t }

    /// Grid positions.
    pub fn x(&self) -> &nd::Array1<f64> { &self.x }

    /// Grid spacing.
    pub fn dx(&self) -> f64 { self.dx }

    /// All densities, indexed by `[sample, position]`.
    pub fn densities(&self) -> &nd::Array2<f64> { &self.rho }

    /// Density at the `n`-th sample.
    ///
    /// *Panics if `n` is out of bounds*.
    pub fn density(&self, n: usize) -> nd::ArrayView1<'_, f64> {
        self.rho.row(n)
    }

    /// Total probability `Σ ρ dx` at each sample.
    pub fn norms(&self) -> nd::Array1<f64> {
        self.rho.outer_iter()
            .map(|rhok| integrate(&rhok, self.dx))
            .collect()
    }

    /// Mean position `Σ x ρ dx` at each sample, without renormalization.
    pub fn means(&self) -> nd::Array1<f64> {
        self.rho.outer_iter()
            .map(|rhok| moments(&self.x, self.dx, &rhok).1)
            .collect()
    }

    /// Positional spread at each sample, without renormalization.
    ///
    /// See [`spread`].
    pub fn spreads(&self) -> nd::Array1<f64> {
        self.rho.outer_iter()
            .map(|rhok| spread(&self.x, self.dx, &rhok))
            .collect()
    }

    /// Positional spread at each sample, after renormalizing each density to
    /// unit total probability.
    ///
    /// See [`conditional_spread`].
    pub fn conditional_spreads(&self) -> nd::Array1<f64> {
        self.rho.outer_iter()
            .map(|rhok| conditional_spread(&self.x, self.dx, &rhok))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn gaussian(x: &nd::Array1<f64>, x0: f64, s: f64, weight: f64)
        -> nd::Array1<f64>
    {
        let norm = weight / (s * std::f64::consts::TAU.sqrt());
        x.mapv(|xj| norm * (-(xj - x0).powi(2) / (2.0 * s * s)).exp())
    }

    fn grid() -> (nd::Array1<f64>, f64) {
        let n = 4000;
        let dx = 40.0 / n as f64;
        ((0..n).map(|j| -20.0 + j as f64 * dx).collect(), dx)
    }

    #[test]
    fn spread_of_normalized_gaussian() {
        let (x, dx) = grid();
        let rho = gaussian(&x, 1.5, 0.8, 1.0);
        assert_abs_diff_eq!(spread(&x, dx, &rho), 0.8, epsilon = 1e-10);
        assert_abs_diff_eq!(conditional_spread(&x, dx, &rho), 0.8, epsilon = 1e-10);
    }

    #[test]
    fn raw_spread_is_not_renormalized() {
        let (x, dx) = grid();
        let w = 0.25;
        let rho = gaussian(&x, 0.0, 2.0, w);
        // E[x²] - E[x]² = w s² for a centered packet
        assert_abs_diff_eq!(spread(&x, dx, &rho), (w * 4.0).sqrt(), epsilon = 1e-10);
        assert_abs_diff_eq!(conditional_spread(&x, dx, &rho), 2.0, epsilon = 1e-10);
    }

    #[test]
    fn conditional_spread_of_empty_density() {
        let (x, dx) = grid();
        let rho: nd::Array1<f64> = nd::Array1::zeros(x.len());
        assert!(conditional_spread(&x, dx, &rho).is_nan());
        assert_eq!(spread(&x, dx, &rho), 0.0);
    }

    #[test]
    fn trajectory_observables() {
        let (x, dx) = grid();
        let frames = [
            gaussian(&x, 0.0, 1.0, 1.0),
            gaussian(&x, 1.0, 1.5, 0.5),
        ];
        let mut rho: nd::Array2<f64> = nd::Array2::zeros((2, x.len()));
        rho.outer_iter_mut().zip(&frames)
            .for_each(|(mut row, f)| row.assign(f));
        let traj = Trajectory::new(nd::array![0.0, 0.1], x, dx, rho);
        assert_eq!(traj.len(), 2);

        let norms = traj.norms();
        assert_abs_diff_eq!(norms[0], 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(norms[1], 0.5, epsilon = 1e-10);

        let means = traj.means();
        assert_abs_diff_eq!(means[0], 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!(means[1], 0.5, epsilon = 1e-10);

        let cond = traj.conditional_spreads();
        assert_abs_diff_eq!(cond[0], 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(cond[1], 1.5, epsilon = 1e-10);

        // w (s² + μ²) - w² μ²
        let raw = traj.spreads();
        let expected = (0.5 * (2.25 + 1.0) - 0.25_f64).sqrt();
        assert_abs_diff_eq!(raw[1], expected, epsilon = 1e-10);
    }

    #[test]
    #[should_panic]
    fn trajectory_shape_is_checked() {
        let x = nd::Array1::linspace(0.0, 1.0, 4);
        let rho: nd::Array2<f64> = nd::Array2::zeros((3, 5));
        Trajectory::new(nd::array![0.0, 1.0, 2.0], x, 0.25, rho);
    }
}
