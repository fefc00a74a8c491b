//! Miscellaneous tools for wavefunctions sampled on periodic grids.
//!
//! Integrals over the grid are plain Riemann sums (`Σ f[j] dx`), which are
//! exact for band-limited periodic functions and consistent with the discrete
//! Fourier transform used for propagation.

use ndarray::{ self as nd, Ix1 };
use num_complex::Complex64 as C64;

/// Integrate a real, sampled function over the grid.
pub fn integrate<S>(y: &nd::ArrayBase<S, Ix1>, dx: f64) -> f64
where S: nd::Data<Elem = f64>
{
    y.sum() * dx
}

/// Calculate the norm (total probability) `Σ |q|² dx` of a wavefunction.
pub fn wf_norm<S>(q: &nd::ArrayBase<S, Ix1>, dx: f64) -> f64
where S: nd::Data<Elem = C64>
{
    q.iter().map(|qk| qk.norm_sqr()).sum::<f64>() * dx
}

/// Renormalize a wavefunction in place.
///
/// A wavefunction of zero norm is left untouched.
pub fn wf_renormalize<S>(q: &mut nd::ArrayBase<S, Ix1>, dx: f64)
where S: nd::DataMut<Elem = C64>
{
    let norm = wf_norm(q, dx).sqrt();
    if norm > 0.0 {
        q.map_inplace(|qk| { *qk /= norm; });
    }
}

/// Compute the probability density `|q|²` of a wavefunction.
pub fn density<S>(q: &nd::ArrayBase<S, Ix1>) -> nd::Array1<f64>
where S: nd::Data<Elem = C64>
{
    q.mapv(|qk| qk.norm_sqr())
}
