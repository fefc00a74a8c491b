//! Initial states.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{ Arr1, utils::wf_renormalize };

/// Build a normalized Gaussian wave packet centered at `x0` with density
/// standard deviation `sigma` and central wavenumber `k0`,
/// ```text
/// ψ(x) ∝ exp(-(x - x0)² / (4 σ²) + i k0 x)
/// ```
/// normalized so that `Σ |ψ|² dx = 1`.
pub fn gaussian_packet<S>(x: &Arr1<S>, dx: f64, x0: f64, sigma: f64, k0: f64)
    -> nd::Array1<C64>
where S: nd::Data<Elem = f64>
{
    let mut q: nd::Array1<C64>
        = x.mapv(|xk| {
            C64::from_polar(
                (-(xk - x0).powi(2) / (4.0 * sigma.powi(2))).exp(),
                k0 * xk,
            )
        });
    wf_renormalize(&mut q, dx);
    q
}

/// Build the normalized Gaussian wave packet `exp(-x²/4 + i k0 x)`, which has
/// unit positional spread at `t = 0`.
///
/// ```
/// use xprop::{ grid::Grid, state::initial_state, utils::wf_norm };
///
/// let grid = Grid::new(15.0, 4096).unwrap();
/// let q0 = initial_state(grid.x(), grid.dx(), 5.0);
/// assert!((wf_norm(&q0, grid.dx()) - 1.0).abs() < 1e-8);
/// ```
pub fn initial_state<S>(x: &Arr1<S>, dx: f64, k0: f64) -> nd::Array1<C64>
where S: nd::Data<Elem = f64>
{
    gaussian_packet(x, dx, 0.0, 1.0, k0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::{ grid::Grid, observables::spread, utils::{ density, wf_norm } };

    #[test]
    fn normalized_for_any_k0() {
        for (x_max, n) in [(15.0, 4096), (8.0, 1000), (30.0, 8192)] {
            let grid = Grid::new(x_max, n).unwrap();
            for k0 in [0.0, 1.0, 15.0, -7.5] {
                let q0 = initial_state(grid.x(), grid.dx(), k0);
                assert_abs_diff_eq!(wf_norm(&q0, grid.dx()), 1.0, epsilon = 1e-8);
            }
        }
    }

    #[test]
    fn unit_spread_at_origin() {
        let grid = Grid::new(15.0, 4096).unwrap();
        let q0 = initial_state(grid.x(), grid.dx(), 3.0);
        let s = spread(grid.x(), grid.dx(), &density(&q0));
        assert_abs_diff_eq!(s, 1.0, epsilon = 1e-8);
    }

    #[test]
    fn carries_plane_wave_phase() {
        let grid = Grid::new(10.0, 2048).unwrap();
        let k0 = 2.0;
        let q0 = initial_state(grid.x(), grid.dx(), k0);
        let j = 1024; // x = 0
        let dphase = (q0[j + 1] / q0[j]).arg();
        assert_abs_diff_eq!(dphase, k0 * grid.dx(), epsilon = 1e-12);
    }

    #[test]
    fn shifted_packet_is_centered() {
        let grid = Grid::new(15.0, 4096).unwrap();
        let q = gaussian_packet(grid.x(), grid.dx(), -4.0, 0.5, 0.0);
        let rho = density(&q);
        let mean: f64 = grid.x().iter().zip(&rho)
            .map(|(xk, rk)| xk * rk * grid.dx())
            .sum();
        assert_abs_diff_eq!(mean, -4.0, epsilon = 1e-10);
        let s = spread(grid.x(), grid.dx(), &rho);
        assert_abs_diff_eq!(s, 0.5, epsilon = 1e-8);
    }
}
