//! Discrete Fourier transform pair between position and momentum space.
//!
//! The forward transform is the unnormalized DFT; the inverse carries the
//! `1/n` factor, so that `ifft(fft(a)) == a` up to rounding. Frequencies follow
//! the transform's own output layout: non-negative frequencies first, then
//! negative frequencies in increasing order (see [`fft_freq`]).
//!
//! ```
//! use ndarray as nd;
//! use num_complex::Complex64 as C64;
//! use xprop::spectral::{ fft, ifft };
//!
//! let a: nd::Array1<C64>
//!     = (0..64).map(|k| C64::new((k as f64).sin(), (k as f64).cos())).collect();
//! let b = ifft(&fft(&a));
//! assert!(a.iter().zip(&b).all(|(ak, bk)| (ak - bk).norm() < 1e-12));
//! ```

use std::{ f64::consts::TAU, fmt, sync::Arc };
use ndarray::{ self as nd, Ix1, concatenate };
use num_complex::Complex64 as C64;
use rustfft as fft;
use crate::{ Arr1, utils::density };

// run a planned transform over an array, going through a temporary buffer if
// the array is not contiguous
fn process<S>(plan: &dyn fft::Fft<f64>, x: &mut nd::ArrayBase<S, Ix1>)
where S: nd::DataMut<Elem = C64>
{
    match x.as_slice_mut() {
        Some(buf) => plan.process(buf),
        None => {
            let mut buf: Vec<C64> = x.iter().copied().collect();
            plan.process(&mut buf);
            x.iter_mut().zip(buf)
                .for_each(|(xk, bk)| { *xk = bk; });
        },
    }
}

/// Forward and inverse FFT plans for a fixed array length.
///
/// Planning is done once on construction; the plans are shared behind [`Arc`]s
/// so that clones are cheap and the pair can be used from multiple threads.
#[derive(Clone)]
pub struct Spectral {
    n: usize,
    forward: Arc<dyn fft::Fft<f64>>,
    inverse: Arc<dyn fft::Fft<f64>>,
}

impl fmt::Debug for Spectral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spectral").field("n", &self.n).finish()
    }
}

impl Spectral {
    /// Plan transforms for arrays of length `n`.
    pub fn new(n: usize) -> Self {
        let mut planner = fft::FftPlanner::new();
        let forward = planner.plan_fft_forward(n);
        let inverse = planner.plan_fft_inverse(n);
        Self { n, forward, inverse }
    }

    /// Length of the arrays this pair was planned for.
    pub fn len(&self) -> usize { self.n }

    /// `true` if planned for zero-length arrays.
    pub fn is_empty(&self) -> bool { self.n == 0 }

    /// Apply the forward transform in place.
    ///
    /// *Panics if `x` does not have the planned length*.
    pub fn forward<S>(&self, x: &mut Arr1<S>)
    where S: nd::DataMut<Elem = C64>
    {
        assert_eq!(x.len(), self.n, "Spectral::forward: length mismatch");
        process(self.forward.as_ref(), x);
    }

    /// Apply the (normalized) inverse transform in place.
    ///
    /// *Panics if `x` does not have the planned length*.
    pub fn inverse<S>(&self, x: &mut Arr1<S>)
    where S: nd::DataMut<Elem = C64>
    {
        assert_eq!(x.len(), self.n, "Spectral::inverse: length mismatch");
        process(self.inverse.as_ref(), x);
        let n = self.n as f64;
        x.map_inplace(|xk| { *xk /= n; });
    }
}

/// Generate an array of frequency-space coordinates to accompany a FFT of `n`
/// points for sampling interval `d`.
pub fn fft_freq(n: usize, d: f64) -> nd::Array1<f64> {
    let m = if n % 2 == 0 { n / 2 } else { (n + 1) / 2 };
    let fp: nd::Array1<f64>
        = (0..m)
        .map(|k| k as f64 / (n as f64 * d))
        .collect();
    let fm: nd::Array1<f64>
        = (1..n - m + 1).rev()
        .map(|k| -(k as f64) / (n as f64 * d))
        .collect();
    concatenate!(nd::Axis(0), fp, fm)
}

/// Generate the angular wavenumbers (`2π` times [`fft_freq`]) accompanying a
/// grid of `n` points with spacing `dx`.
pub fn wavenumbers(n: usize, dx: f64) -> nd::Array1<f64> {
    fft_freq(n, dx) * TAU
}

/// Perform the one-dimensional, complex-valued FFT.
pub fn fft<S>(x: &Arr1<S>) -> nd::Array1<C64>
where S: nd::Data<Elem = C64>
{
    let mut f = x.to_owned();
    fft_inplace(&mut f);
    f
}

/// Perform the one-dimensional, complex-valued FFT in place.
pub fn fft_inplace<S>(f: &mut Arr1<S>)
where S: nd::DataMut<Elem = C64>
{
    let mut planner = fft::FftPlanner::new();
    let plan = planner.plan_fft_forward(f.len());
    process(plan.as_ref(), f);
}

/// Perform the one-dimensional, complex-valued inverse FFT.
pub fn ifft<S>(f: &Arr1<S>) -> nd::Array1<C64>
where S: nd::Data<Elem = C64>
{
    let mut x = f.to_owned();
    ifft_inplace(&mut x);
    x
}

/// Perform the one-dimensional, complex-valued inverse FFT in place.
pub fn ifft_inplace<S>(x: &mut Arr1<S>)
where S: nd::DataMut<Elem = C64>
{
    let n: usize = x.len();
    let mut planner = fft::FftPlanner::new();
    let plan = planner.plan_fft_inverse(n);
    process(plan.as_ref(), x);
    let n = n as f64;
    x.map_inplace(|xk| { *xk /= n; });
}

/// Return a copy of `x` with indices shifted to map super-Nyquist frequency
/// components to negative frequencies, i.e. into ascending frequency order.
pub fn fft_shift<S, A>(x: &Arr1<S>) -> nd::Array1<A>
where
    S: nd::Data<Elem = A>,
    A: Clone,
{
    // rotate the non-negative half (including Nyquist for even n) to the back
    let m = (x.len() + 1) / 2;
    x.iter().skip(m).chain(x.iter().take(m)).cloned().collect()
}

/// Compute the momentum-space probability density of a wavefunction sampled
/// with spacing `dx`, returning `(k, ρ(k))` in ascending wavenumber order.
///
/// `ρ(k)` is scaled so that `Σ ρ(k) dk` with `dk = 2π / (n dx)` equals the
/// position-space norm `Σ |q|² dx`.
pub fn momentum_density<S>(q: &Arr1<S>, dx: f64)
    -> (nd::Array1<f64>, nd::Array1<f64>)
where S: nd::Data<Elem = C64>
{
    let scale = dx.powi(2) / TAU;
    let rho_k = density(&fft(q)) * scale;
    (fft_shift(&wavenumbers(q.len(), dx)), fft_shift(&rho_k))
}
