//! Time propagation of the one-dimensional Schrödinger equation
//! ```text
//! i ∂ψ/∂t = -(1/2) ∂²ψ/∂x² + V(x) ψ
//! ```
//! via the symmetric split-step operator method, for a static, possibly
//! complex-valued (absorbing) potential.
//!
//! In all 2D arrays, the first (or zero-th) axis indexes time.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    Arr1,
    error::{ LengthError, TError },
    grid::Grid,
    observables::Trajectory,
    spectral::Spectral,
    utils::wf_norm,
};

pub type TResult<T> = Result<T, TError>;

// largest step-to-step growth in total probability tolerated before warning;
// every stage of a step is either unitary or contracting
const NORM_GROWTH_TOL: f64 = 1e-10;

// relative tolerance on the spacing of user-supplied sample times
const SAMPLE_SPACING_RTOL: f64 = 1e-9;

/// Build `nsamples` evenly spaced sample times over `[0, t_end]`.
///
/// The spacing `t_end / (nsamples - 1)` is the time step to use with
/// [`SplitStep::run_times`]. A single sample gives `[0]`.
pub fn sample_times(t_end: f64, nsamples: usize) -> nd::Array1<f64> {
    match nsamples {
        0 => nd::Array1::zeros(0),
        1 => nd::array![0.0],
        _ => {
            let dt = t_end / (nsamples - 1) as f64;
            (0..nsamples).map(|k| k as f64 * dt).collect()
        },
    }
}

/// Symmetric split-step propagator for a fixed grid, potential, and time step.
///
/// All phase factors are computed once on construction:
/// ```text
/// P[j] = exp(-i V[j] dt / 2)      (half-step potential, position space)
/// K[j] = exp(-i k[j]² dt / 2)     (full-step kinetic, momentum space)
/// ```
/// and each step applies `P`, the forward transform, `K`, the inverse
/// transform, and `P` again. With `V = -i W`, `|P| = exp(-W dt / 2) ≤ 1`, so a
/// step never increases the total probability.
///
/// The propagator holds no wavefunction: states are owned by the caller (for
/// [`step`][Self::step] and [`evolve`][Self::evolve]) or by a single
/// [`run`][Self::run] invocation.
#[derive(Clone, Debug)]
pub struct SplitStep {
    grid: Grid,
    dt: f64,
    potential_half: nd::Array1<C64>,
    kinetic: nd::Array1<C64>,
    spectral: Spectral,
}

impl SplitStep {
    /// Set up propagation over `grid` in the potential `V` with time step `dt`.
    pub fn new<S>(grid: &Grid, V: &Arr1<S>, dt: f64) -> TResult<Self>
    where S: nd::Data<Elem = C64>
    {
        LengthError::check(grid.x(), V)?;
        TError::check_dt(dt)?;
        let phase = C64::new(0.0, -dt / 2.0);
        let potential_half: nd::Array1<C64> = V.mapv(|Vj| (phase * Vj).exp());
        let kinetic: nd::Array1<C64>
            = grid.wavenumbers().mapv(|kj| C64::cis(-kj.powi(2) * dt / 2.0));
        let spectral = Spectral::new(grid.len());
        Ok(Self { grid: grid.clone(), dt, potential_half, kinetic, spectral })
    }

    /// Like [`Self::new`], but for a real-valued potential.
    pub fn new_real<S>(grid: &Grid, V: &Arr1<S>, dt: f64) -> TResult<Self>
    where S: nd::Data<Elem = f64>
    {
        Self::new(grid, &V.mapv(C64::from), dt)
    }

    /// The grid states are sampled over.
    pub fn grid(&self) -> &Grid { &self.grid }

    /// The fixed time step.
    pub fn dt(&self) -> f64 { self.dt }

    fn apply_potential<S>(&self, q: &mut Arr1<S>)
    where S: nd::DataMut<Elem = C64>
    {
        nd::Zip::from(q).and(&self.potential_half)
            .for_each(|qj, Pj| { *qj *= Pj; });
    }

    fn apply_kinetic<S>(&self, q: &mut Arr1<S>)
    where S: nd::DataMut<Elem = C64>
    {
        self.spectral.forward(q);
        nd::Zip::from(&mut *q).and(&self.kinetic)
            .for_each(|qj, Kj| { *qj *= Kj; });
        self.spectral.inverse(q);
    }

    /// Advance a state by one time step *in place*.
    ///
    /// *Panics if `q` does not have the same length as the grid*.
    pub fn step<S>(&self, q: &mut Arr1<S>)
    where S: nd::DataMut<Elem = C64>
    {
        self.apply_potential(q);
        self.apply_kinetic(q);
        self.apply_potential(q);
    }

    /// Advance a state by `nsteps` time steps *in place*, without recording
    /// anything.
    ///
    /// *Panics if `q` does not have the same length as the grid*.
    pub fn evolve<S>(&self, q: &mut Arr1<S>, nsteps: usize)
    where S: nd::DataMut<Elem = C64>
    {
        (0..nsteps).for_each(|_| self.step(q));
    }

    /// Propagate a copy of `q0`, recording the probability density before the
    /// first step and after each of `nsamples - 1` steps.
    ///
    /// Sample `n` of the returned trajectory is the density after exactly `n`
    /// steps, at time `n dt`.
    pub fn run<S>(&self, q0: &Arr1<S>, nsamples: usize) -> TResult<Trajectory>
    where S: nd::Data<Elem = C64>
    {
        TError::check_nsamples(nsamples)?;
        let t: nd::Array1<f64>
            = (0..nsamples).map(|k| k as f64 * self.dt).collect();
        self.record(q0, t)
    }

    /// Like [`Self::run`], but for an explicit array of sample times, which
    /// must begin at zero and be evenly spaced by the propagator's time step.
    pub fn run_times<S, T>(&self, q0: &Arr1<S>, t: &Arr1<T>)
        -> TResult<Trajectory>
    where
        S: nd::Data<Elem = C64>,
        T: nd::Data<Elem = f64>,
    {
        TError::check_nsamples(t.len())?;
        if t[0] != 0.0 { return Err(TError::NonzeroStart(t[0])); }
        let tol = SAMPLE_SPACING_RTOL * self.dt.abs().max(f64::MIN_POSITIVE);
        let bad
            = t.iter().zip(t.iter().skip(1)).enumerate()
            .map(|(k, (tk, tkp1))| (k, tkp1 - tk))
            .find(|(_, dtk)| (dtk - self.dt).abs() > tol);
        if let Some((index, got)) = bad {
            return Err(TError::UnevenSamples { index, expected: self.dt, got });
        }
        self.record(q0, t.to_owned())
    }

    fn record<S>(&self, q0: &Arr1<S>, t: nd::Array1<f64>)
        -> TResult<Trajectory>
    where S: nd::Data<Elem = C64>
    {
        LengthError::check(self.grid.x(), q0)?;
        let dx = self.grid.dx();
        let nsamples = t.len();
        log::debug!(
            "split-step run: {} points, dt = {:.3e}, {} samples",
            self.grid.len(), self.dt, nsamples,
        );
        let mut q: nd::Array1<C64> = q0.to_owned();
        let mut rho: nd::Array2<f64>
            = nd::Array2::zeros((nsamples, self.grid.len()));
        let mut norm_prev = wf_norm(&q, dx);
        let norm_init = norm_prev;
        let mut frames = rho.axis_iter_mut(nd::Axis(0));
        if let Some(rho0) = frames.next() {
            nd::Zip::from(rho0).and(&q)
                .for_each(|rj, qj| { *rj = qj.norm_sqr(); });
        }
        for (k, rhok) in frames.enumerate() {
            self.step(&mut q);
            nd::Zip::from(rhok).and(&q)
                .for_each(|rj, qj| { *rj = qj.norm_sqr(); });
            let norm_cur = wf_norm(&q, dx);
            if norm_cur - norm_prev > NORM_GROWTH_TOL {
                log::warn!(
                    "total probability grew from {:.12} to {:.12} at step {}",
                    norm_prev, norm_cur, k + 1,
                );
            }
            log::trace!("step {}: norm = {:.12}", k + 1, norm_cur);
            norm_prev = norm_cur;
        }
        log::debug!(
            "split-step run finished: norm {:.6e} -> {:.6e}",
            norm_init, norm_prev,
        );
        Ok(Trajectory::new(t, self.grid.x().clone(), dx, rho))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{ assert_abs_diff_eq, assert_relative_eq };
    use crate::{
        potential::optical_potential,
        state::{ gaussian_packet, initial_state },
        utils::{ density, wf_norm },
    };

    fn free(x_max: f64, n: usize, dt: f64) -> SplitStep {
        let grid = Grid::new(x_max, n).unwrap();
        let v: nd::Array1<C64> = nd::Array1::zeros(n);
        SplitStep::new(&grid, &v, dt).unwrap()
    }

    #[test]
    fn sample_times_are_even() {
        let t = sample_times(2.0, 201);
        assert_eq!(t.len(), 201);
        assert_abs_diff_eq!(t[200], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t[1] - t[0], 0.01, epsilon = 1e-15);
        assert_eq!(sample_times(1.0, 1), nd::array![0.0]);
        assert!(sample_times(1.0, 0).is_empty());
    }

    #[test]
    fn rejects_mismatched_potential() {
        let grid = Grid::new(1.0, 16).unwrap();
        let v: nd::Array1<C64> = nd::Array1::zeros(15);
        assert!(matches!(
            SplitStep::new(&grid, &v, 0.1),
            Err(TError::Length(LengthError(16, 15))),
        ));
    }

    #[test]
    fn rejects_bad_dt() {
        let grid = Grid::new(1.0, 16).unwrap();
        let v: nd::Array1<f64> = nd::Array1::zeros(16);
        assert!(matches!(
            SplitStep::new_real(&grid, &v, f64::NAN),
            Err(TError::BadTimeStep(_)),
        ));
    }

    #[test]
    fn step_is_deterministic() {
        let grid = Grid::new(15.0, 1024).unwrap();
        let v = optical_potential(grid.x(), 20.0, 5.0, grid.x_max());
        let prop = SplitStep::new(&grid, &v, 0.01).unwrap();
        let q0 = initial_state(grid.x(), grid.dx(), 15.0);
        let mut a = q0.clone();
        let mut b = q0.clone();
        prop.step(&mut a);
        prop.step(&mut b);
        assert_eq!(a, b);
        assert_ne!(a, q0);
    }

    #[test]
    fn plane_wave_picks_up_kinetic_phase() {
        let prop = free(std::f64::consts::PI, 64, 0.1);
        let k = prop.grid().wavenumbers();
        let x = prop.grid().x().clone();
        let mut q: nd::Array1<C64> = x.mapv(|xj| C64::cis(k[5] * xj));
        let q0 = q.clone();
        prop.step(&mut q);
        let expected = C64::cis(-k[5].powi(2) / 2.0 * 0.1);
        q.iter().zip(&q0)
            .for_each(|(qj, q0j)| {
                assert_abs_diff_eq!((qj / q0j - expected).norm(), 0.0, epsilon = 1e-10);
            });
    }

    #[test]
    fn constant_potential_is_a_global_phase() {
        let grid = Grid::new(10.0, 512).unwrap();
        let v: nd::Array1<f64> = nd::Array1::from_elem(512, 3.0);
        let prop = SplitStep::new_real(&grid, &v, 0.05).unwrap();
        let free = SplitStep::new_real(&grid, &nd::Array1::<f64>::zeros(512), 0.05).unwrap();
        let q0 = initial_state(grid.x(), grid.dx(), 1.0);
        let mut a = q0.clone();
        let mut b = q0.clone();
        prop.evolve(&mut a, 10);
        free.evolve(&mut b, 10);
        let phase = C64::cis(-3.0 * 0.5);
        a.iter().zip(&b)
            .for_each(|(aj, bj)| {
                assert_abs_diff_eq!((aj - phase * bj).norm(), 0.0, epsilon = 1e-10);
            });
    }

    #[test]
    fn splitting_is_second_order_in_dt() {
        // displaced, mis-matched packet in a harmonic well: position and
        // momentum parts do not commute
        let grid = Grid::new(10.0, 256).unwrap();
        let v = grid.x().mapv(|xj| 0.5 * xj.powi(2));
        let q0 = gaussian_packet(grid.x(), grid.dx(), 2.0, 1.0, 0.5);
        let t_end = 1.0;
        let propagate = |nsteps: usize| {
            let prop = SplitStep::new_real(&grid, &v, t_end / nsteps as f64)
                .unwrap();
            let mut q = q0.clone();
            prop.evolve(&mut q, nsteps);
            q
        };
        let reference = propagate(1280);
        let error = |q: nd::Array1<C64>| wf_norm(&(q - &reference), grid.dx()).sqrt();
        let coarse = error(propagate(20));
        let fine = error(propagate(40));
        assert!(coarse > 1e-6);
        assert_relative_eq!(coarse / fine, 4.0, max_relative = 0.1);
    }

    #[test]
    fn run_records_every_step() {
        let grid = Grid::new(15.0, 512).unwrap();
        let v = optical_potential(grid.x(), 2.0, 3.0, grid.x_max());
        let prop = SplitStep::new(&grid, &v, 0.02).unwrap();
        let q0 = initial_state(grid.x(), grid.dx(), 4.0);
        let traj = prop.run(&q0, 11).unwrap();
        assert_eq!(traj.len(), 11);
        assert_abs_diff_eq!(traj.t()[10], 0.2, epsilon = 1e-12);
        let mut q = q0.clone();
        for n in 0..11 {
            let expected = density(&q);
            traj.density(n).iter().zip(&expected)
                .for_each(|(r, e)| assert_relative_eq!(*r, *e, max_relative = 1e-12));
            prop.step(&mut q);
        }
    }

    #[test]
    fn run_leaves_initial_state_alone() {
        let prop = free(5.0, 128, 0.1);
        let q0 = initial_state(prop.grid().x(), prop.grid().dx(), 2.0);
        let copy = q0.clone();
        prop.run(&q0, 5).unwrap();
        assert_eq!(q0, copy);
    }

    #[test]
    fn single_sample_is_initial_density() {
        let prop = free(5.0, 128, 0.1);
        let q0 = initial_state(prop.grid().x(), prop.grid().dx(), 0.0);
        let traj = prop.run(&q0, 1).unwrap();
        assert_eq!(traj.len(), 1);
        assert_eq!(traj.density(0), density(&q0));
        assert!(matches!(prop.run(&q0, 0), Err(TError::NoSamples)));
    }

    #[test]
    fn run_times_checks_spacing() {
        let prop = free(5.0, 128, 0.1);
        let q0 = initial_state(prop.grid().x(), prop.grid().dx(), 0.0);
        let good = sample_times(1.0, 11);
        assert_eq!(prop.run_times(&q0, &good).unwrap().len(), 11);

        let coarse = sample_times(1.0, 6);
        assert!(matches!(
            prop.run_times(&q0, &coarse),
            Err(TError::UnevenSamples { index: 0, .. }),
        ));

        let late = good.mapv(|tk| tk + 0.5);
        assert!(matches!(
            prop.run_times(&q0, &late),
            Err(TError::NonzeroStart(_)),
        ));

        let empty: nd::Array1<f64> = nd::Array1::zeros(0);
        assert!(matches!(prop.run_times(&q0, &empty), Err(TError::NoSamples)));
    }

    #[test]
    fn run_rejects_mismatched_state() {
        let prop = free(5.0, 128, 0.1);
        let q0: nd::Array1<C64> = nd::Array1::zeros(64);
        assert!(matches!(prop.run(&q0, 3), Err(TError::Length(_))));
    }
}
