//! Lazy eigenvalue bracketing for the one-dimensional, time-independent
//! Schrödinger equation
//! ```text
//! -(1/2) ψ'' + V(x) ψ = E ψ
//! ```
//! via shooting.
//!
//! A mismatch function `f(E)` is evaluated over an ascending scan of trial
//! energies; every sign change between adjacent scan points brackets a root,
//! which can then be refined by bisection. [`Brackets`] walks the scan one
//! point at a time, so only as many evaluations are made as brackets are
//! requested.
//!
//! ```
//! use ndarray as nd;
//! use xprop::brackets::Brackets;
//!
//! let e: nd::Array1<f64> = nd::Array1::linspace(0.1, 10.0, 100);
//! let f = |x: f64| x.sin();
//! let roots: Vec<f64>
//!     = Brackets::new(f, &e)
//!     .map(|b| b.refine(f, 1e-10, 100).unwrap())
//!     .collect();
//! assert_eq!(roots.len(), 3);
//! assert!((roots[0] - std::f64::consts::PI).abs() < 1e-9);
//! ```

use ndarray as nd;
use crate::{
    Arr1,
    error::XError,
    DEF_EPSILON,
    DEF_MAXITERS,
};

pub type XResult<T> = Result<T, XError>;

#[derive(Copy, Clone, Debug)]
struct Window(f64, f64);

impl Window {
    fn push(&mut self, val: f64) { self.0 = self.1; self.1 = val; }
}

/// Perform a Numerov integration of `ψ'' = -2 (E - V) ψ`, starting on the left
/// with `ψ[0] = 0` and `ψ[1] = dx`, for fixed energy.
///
/// Assumes `V` is sampled over even intervals. The result is not normalized.
pub fn numerov<S>(dx: f64, V: &Arr1<S>, E: f64) -> nd::Array1<f64>
where S: nd::Data<Elem = f64>
{
    let n = V.len();
    let mut q: nd::Array1<f64> = nd::Array1::zeros(n);
    if n < 2 { return q; }
    // w = 1 + (dx² / 12) Q with Q = 2 (E - V)
    let a = dx.powi(2) / 6.0;
    q[1] = dx;
    let mut qprev = Window(0.0, dx);
    let mut wprev = Window(1.0 + a * (E - V[0]), 1.0 + a * (E - V[1]));
    let mut wnext: f64;
    let mut qnext: f64;
    for (qk, &Vk) in q.iter_mut().zip(V).skip(2) {
        wnext = 1.0 + a * (E - Vk);
        qnext = ((12.0 - 10.0 * wprev.1) * qprev.1 - wprev.0 * qprev.0) / wnext;
        *qk = qnext;
        qprev.push(qnext);
        wprev.push(wnext);
    }
    q
}

/// Return the value at the right edge of the left-started [`numerov`]
/// solution.
///
/// Bound-state energies of `V` (with the wavefunction vanishing at both ends
/// of the grid) are the zeros of this function of `E`.
pub fn shoot<S>(dx: f64, V: &Arr1<S>, E: f64) -> f64
where S: nd::Data<Elem = f64>
{
    numerov(dx, V, E).last().copied().unwrap_or(0.0)
}

/// An interval `[lo, hi]` over which a mismatch function changes sign.
///
/// `lo == hi` when a scan point landed exactly on a root.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bracket {
    /// Lower bound.
    pub lo: f64,
    /// Upper bound.
    pub hi: f64,
    /// Mismatch at the lower bound.
    pub f_lo: f64,
    /// Mismatch at the upper bound.
    pub f_hi: f64,
}

impl Bracket {
    /// `true` if `e` lies within the bracket.
    pub fn contains(&self, e: f64) -> bool {
        (self.lo..=self.hi).contains(&e)
    }

    /// Width of the bracket.
    pub fn width(&self) -> f64 { self.hi - self.lo }

    /// Narrow the bracket by bisection until it is smaller than `epsilon`,
    /// returning its midpoint.
    pub fn refine<F>(&self, mut f: F, epsilon: f64, maxiters: usize)
        -> XResult<f64>
    where F: FnMut(f64) -> f64
    {
        XError::check_epsilon(epsilon)?;
        XError::check_maxiters(maxiters)?;
        if self.f_lo == 0.0 { return Ok(self.lo); }
        if self.f_hi == 0.0 { return Ok(self.hi); }
        let mut lo = self.lo;
        let mut hi = self.hi;
        let mut f_lo = self.f_lo;
        let mut mid: f64;
        let mut f_mid: f64;
        for _ in 0..maxiters {
            if hi - lo < epsilon { return Ok((lo + hi) / 2.0); }
            mid = (lo + hi) / 2.0;
            f_mid = f(mid);
            if f_mid == 0.0 { return Ok(mid); }
            if f_lo * f_mid < 0.0 {
                hi = mid;
            } else {
                lo = mid;
                f_lo = f_mid;
            }
        }
        (hi - lo < epsilon)
            .then_some((lo + hi) / 2.0)
            .ok_or(XError::BisectMaxiters(lo, hi))
    }

    /// Like [`Self::refine`], with `epsilon = 1e-6` and `maxiters = 1000`.
    pub fn refine_default<F>(&self, f: F) -> XResult<f64>
    where F: FnMut(f64) -> f64
    {
        self.refine(f, DEF_EPSILON, DEF_MAXITERS)
    }
}

/// Lazy, finite, restartable sequence of [`Bracket`]s of a mismatch function
/// over an ascending scan of trial energies.
///
/// The mismatch function is evaluated once per scan point, only as the
/// iterator advances. Restarting re-evaluates from the first scan point.
#[derive(Clone, Debug)]
pub struct Brackets<F> {
    f: F,
    e: nd::Array1<f64>,
    k: usize,
    prev: Option<(f64, f64)>,
}

impl<F> Brackets<F>
where F: FnMut(f64) -> f64
{
    /// Create a new bracket sequence over the scan `e`.
    pub fn new<S>(f: F, e: &Arr1<S>) -> Self
    where S: nd::Data<Elem = f64>
    {
        Self { f, e: e.to_owned(), k: 0, prev: None }
    }

    /// Rewind to the start of the scan.
    pub fn restart(&mut self) {
        self.k = 0;
        self.prev = None;
    }

    /// The scan of trial energies.
    pub fn energies(&self) -> &nd::Array1<f64> { &self.e }

    /// Number of scan points evaluated so far.
    pub fn evaluated(&self) -> usize { self.k }
}

impl<F> Iterator for Brackets<F>
where F: FnMut(f64) -> f64
{
    type Item = Bracket;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&ek) = self.e.get(self.k) {
            self.k += 1;
            let fk = (self.f)(ek);
            let prev = self.prev.replace((ek, fk));
            if fk == 0.0 {
                return Some(Bracket { lo: ek, hi: ek, f_lo: fk, f_hi: fk });
            }
            match prev {
                Some((ep, fp)) if fp * fk < 0.0 => {
                    return Some(Bracket { lo: ep, hi: ek, f_lo: fp, f_hi: fk });
                },
                _ => { },
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.e.len() - self.k))
    }
}

impl<F> std::iter::FusedIterator for Brackets<F>
where F: FnMut(f64) -> f64
{ }

/// Bracket bound-state energies of `V` over the scan `e` via [`shoot`].
pub fn shooting<S, T>(dx: f64, V: &Arr1<S>, e: &Arr1<T>)
    -> Brackets<impl Fn(f64) -> f64 + Clone>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    let V = V.to_owned();
    let f = move |E: f64| shoot(dx, &V, E);
    Brackets::new(f, e)
}

/// Lazily find and refine bound-state energies of `V` over the scan `e`, in
/// ascending order.
pub fn eigenvalues<S, T>(
    dx: f64,
    V: &Arr1<S>,
    e: &Arr1<T>,
    epsilon: f64,
    maxiters: usize,
) -> impl Iterator<Item = XResult<f64>>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    let V = V.to_owned();
    let f = move |E: f64| shoot(dx, &V, E);
    let g = f.clone();
    Brackets::new(f, e)
        .map(move |b| b.refine(&g, epsilon, maxiters))
}
