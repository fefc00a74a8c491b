//! Evenly spaced, periodic position grids.
//!
//! A [`Grid`] of `n` points spanning `[-x_max, x_max)` has spacing
//! `dx = 2 x_max / n`, so that the point at `+x_max` is identified with the
//! first point at `-x_max` under the periodic boundary implied by the discrete
//! Fourier transform.

use ndarray as nd;
use crate::{
    error::GridError,
    spectral::wavenumbers,
};

pub type GResult<T> = Result<T, GridError>;

/// A fixed, evenly spaced set of positions.
///
/// Immutable once constructed; all arrays sampled over the grid for a single
/// propagation run share its length and spacing.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    x: nd::Array1<f64>,
    dx: f64,
    x_max: f64,
}

impl Grid {
    /// Construct a grid of `n` points over `[-x_max, x_max)`.
    ///
    /// Powers of two for `n` make the spectral transform fastest, but any
    /// `n ≥ 2` is accepted.
    pub fn new(x_max: f64, n: usize) -> GResult<Self> {
        GridError::check_half_width(x_max)?;
        GridError::check_npoints(n)?;
        let dx = 2.0 * x_max / n as f64;
        let x: nd::Array1<f64>
            = (0..n).map(|j| -x_max + j as f64 * dx).collect();
        Ok(Self { x, dx, x_max })
    }

    /// Grid positions.
    pub fn x(&self) -> &nd::Array1<f64> { &self.x }

    /// Spacing between adjacent points.
    pub fn dx(&self) -> f64 { self.dx }

    /// Half-width of the domain.
    pub fn x_max(&self) -> f64 { self.x_max }

    /// Number of points.
    pub fn len(&self) -> usize { self.x.len() }

    /// Always `false`; grids hold at least two points.
    pub fn is_empty(&self) -> bool { self.x.is_empty() }

    /// Angular wavenumbers accompanying the grid under the spectral transform,
    /// in the transform's own output ordering.
    pub fn wavenumbers(&self) -> nd::Array1<f64> {
        wavenumbers(self.len(), self.dx)
    }
}
