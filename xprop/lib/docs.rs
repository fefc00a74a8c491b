//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Split-step propagation](#split-step-propagation)
//! - [Optical potentials](#optical-potentials)
//! - [Observables](#observables)
//! - [Shooting](#shooting)
//!
//! # Background
//! The time-dependent Schrödinger equation for a particle in one dimension, in
//! units where ħ = m = 1, reads
//! ```text
//!   ∂ψ         1 ∂²ψ
//! i -- = H ψ = - - --- + V(x) ψ
//!   ∂t         2 ∂x²
//! ```
//! For a time-independent *V*, the formal solution over one step *δt* is
//! *ψ*(*t* + *δt*) = exp(-*i* *H* *δt*) *ψ*(*t*). The difficulty is that *H*
//! is a sum of two operators, *T* = -(1/2) ∂²/∂x² and *V*, each of which is
//! diagonal in a different representation: *V* in position space, *T* in
//! momentum space, where it acts as multiplication by *k*²/2.
//!
//! The wavefunction is sampled over a grid
//! ```text
//! x[j] = -x_max + j δx,  j ∊ {0, ..., N - 1},  δx = 2 x_max / N
//! ```
//! which, through the discrete Fourier transform, is implicitly periodic with
//! period 2 *x*<sub>max</sub>. The accompanying angular wavenumbers are
//! ```text
//! k[m] = 2π m / (N δx)         for m < ⌈N/2⌉
//! k[m] = 2π (m - N) / (N δx)   otherwise
//! ```
//! matching the output ordering of the transform.
//!
//! # Split-step propagation
//! Since *T* and *V* do not commute, exp(-*i* *H* *δt*) ≠
//! exp(-*i* *T* *δt*) exp(-*i* *V* *δt*), but the symmetric (Strang)
//! factorization
//! ```text
//! exp(-i H δt) = exp(-i V δt/2) exp(-i T δt) exp(-i V δt/2) + O(δt³)
//! ```
//! is accurate to second order globally. Each factor is applied exactly in the
//! representation where it is diagonal:
//! 1. multiply by exp(-*i* *V*\[*j*\] *δt*/2) in position space;
//! 2. transform to momentum space;
//! 3. multiply by exp(-*i* *k*\[*m*\]² *δt*/2);
//! 4. transform back to position space;
//! 5. multiply by exp(-*i* *V*\[*j*\] *δt*/2).
//!
//! For *V* = 0 the scheme is exact for any *δt* (up to the grid's
//! band-limit), and for real *V* every factor is unitary, so the norm
//! Σ |*ψ*|² *δx* is conserved to rounding. The time step is otherwise
//! limited by the phase accumulated per step: *k*<sub>max</sub>² *δt*/2 and
//! |*V*| *δt* should stay well below π for the dynamics to be resolved.
//!
//! # Optical potentials
//! A wave packet reaching the edge of a periodic grid re-enters from the other
//! side. To emulate an open domain, a purely imaginary potential
//! ```text
//! V(x) = -i V_opt (exp(-(x + x_max)² / (2 σ²)) + exp(-(x - x_max)² / (2 σ²)))
//! ```
//! is placed at the edges. The potential factor then becomes
//! exp(-*V*<sub>opt</sub> *g*(*x*) *δt*/2) ≤ 1, a real attenuation that
//! removes amplitude from the boundary layers. The Hamiltonian is no longer
//! Hermitian and the norm decays monotonically once the packet reaches the
//! absorbing region; the wider and stronger the layer, the smaller the
//! reflected fraction, at the cost of usable domain.
//!
//! # Observables
//! Expectation values over a density *ρ* = |*ψ*|² are grid-weighted sums
//! ```text
//! E[f] = Σ f(x[j]) ρ[j] δx
//! ```
//! and the positional spread is sqrt(E\[*x*²\] - E\[*x*\]²). For the initial
//! packet exp(-*x*²/4 + *i* *k*<sub>0</sub> *x*) the density has unit
//! standard deviation, and under free evolution the spread grows as
//! ```text
//! σ(t) = sqrt(1 + t²/4)
//! ```
//! independently of *k*<sub>0</sub>. After absorption the raw spread refers
//! to the surviving, un-renormalized density; dividing by E\[1\] gives the
//! conditional spread of the packet that remains.
//!
//! # Shooting
//! Bound states of the time-independent equation
//! ```text
//! ψ'' = -Q(x) ψ,  Q(x) = 2 (E - V(x))
//! ```
//! are found by integrating from the left edge with Numerov's three-point
//! scheme
//! ```text
//! w[i] = 1 + (δx²/12) Q[i]
//! w[i + 1] ψ[i + 1] = (12 - 10 w[i]) ψ[i] - w[i - 1] ψ[i - 1]
//! ```
//! (error *O*(*δx*⁶) per step) and examining the value at the right edge as a
//! function of *E*. Between eigenvalues this value diverges with a sign fixed
//! by the number of nodes, so each sign change across a scan of trial
//! energies brackets one eigenvalue, which bisection then refines.
