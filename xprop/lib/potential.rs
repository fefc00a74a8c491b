//! Optical (absorbing) potentials.
//!
//! A finite periodic grid reflects, or wraps around, any amplitude that reaches
//! its edges. Adding a purely imaginary potential `V = -i W(x)` with `W ≥ 0`
//! localized at the edges removes probability density from those regions at a
//! rate `2 W(x)`, emulating an open boundary. Setting the strength to zero
//! recovers the plain periodic grid.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::Arr1;

// unnormalized Gaussian bump
fn bump(x: f64, center: f64, width: f64) -> f64 {
    (-(x - center).powi(2) / (2.0 * width.powi(2))).exp()
}

/// Sample the optical potential
/// ```text
/// V(x) = -i V_opt (exp(-(x + x_max)² / (2 σ²)) + exp(-(x - x_max)² / (2 σ²)))
/// ```
/// over `x`, with strength `V_opt = strength` and width `σ = width`.
///
/// The result is purely imaginary with non-positive imaginary part.
pub fn optical_potential<S>(x: &Arr1<S>, strength: f64, width: f64, x_max: f64)
    -> nd::Array1<C64>
where S: nd::Data<Elem = f64>
{
    x.mapv(|xk| {
        let w = strength * (bump(xk, -x_max, width) + bump(xk, x_max, width));
        C64::new(0.0, -w)
    })
}
