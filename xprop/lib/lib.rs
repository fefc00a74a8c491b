#![allow(non_snake_case)]

//! Provides functions and higher-level constructs for the time propagation of
//! one-dimensional wavefunctions under the free-particle Schrödinger equation
//! on a finite periodic grid, via the symmetric split-step operator method
//! with an optional absorbing (optical) potential at the domain edges.
//!
//! Natural units ħ = m = 1 are used throughout, so that the Hamiltonian reads
//! `H = -(1/2) ∂²/∂x² + V(x)`.
//!
//! Provides implementations for the following:
//! - Grid construction and the accompanying angular-wavenumber grid
//! - Gaussian wave packet initial states
//! - Optical (purely imaginary) absorbing potentials
//! - A plan-caching FFT pair for moving between position and momentum space
//! - Symmetric (Strang) split-step time propagation, with a driver recording
//!   the probability density at every step
//! - Observables over recorded densities (total probability, mean, spread)
//! - Lazy eigenvalue bracketing for the time-independent equation via Numerov
//!   shooting
//!
//! ```
//! use xprop::{ config::{ RunParams, simulate } };
//!
//! let params = RunParams {
//!     npoints: 1024,
//!     t_end: 0.5,
//!     nsamples: 51,
//!     ..RunParams::default()
//! };
//! let traj = simulate(&params).unwrap();
//! assert_eq!(traj.len(), 51);
//! ```
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod grid;
pub mod spectral;
pub mod state;
pub mod potential;
pub mod timedep;
pub mod observables;
pub mod brackets;
pub mod config;
pub mod utils;

pub mod docs;

pub(crate) const DEF_EPSILON: f64 = 1e-6;
pub(crate) const DEF_MAXITERS: usize = 1000;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
