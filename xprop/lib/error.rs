//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use thiserror::Error;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let na = a.len();
        let nb = b.len();
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }
}

/// Returned from [`Grid`][crate::grid::Grid] constructors.
#[derive(Debug, Error)]
pub enum GridError {
    /// Returned when fewer than two grid points are requested.
    #[error("grids must have at least 2 points; got {0}")]
    TooFewPoints(usize),

    /// Returned when the domain half-width is non-positive or non-finite.
    #[error("domain half-width must be positive and finite; got {0}")]
    BadHalfWidth(f64),
}

impl GridError {
    pub(crate) fn check_npoints(n: usize) -> Result<(), Self> {
        (n >= 2).then_some(()).ok_or(Self::TooFewPoints(n))
    }

    pub(crate) fn check_half_width(x_max: f64) -> Result<(), Self> {
        (x_max.is_finite() && x_max > 0.0)
            .then_some(()).ok_or(Self::BadHalfWidth(x_max))
    }
}

/// Returned from time-dependent wavefunction propagation.
#[derive(Debug, Error)]
pub enum TError {
    /// Returned when a non-finite time step is encountered.
    #[error("time step must be finite; got {0}")]
    BadTimeStep(f64),

    /// Returned when a run is requested with zero samples.
    #[error("at least one sample must be requested")]
    NoSamples,

    /// Returned when sample times do not begin at zero.
    #[error("sample times must begin at t = 0; got {0}")]
    NonzeroStart(f64),

    /// Returned when the spacing between adjacent sample times does not match
    /// the propagator's time step.
    #[error("sample spacing must equal the time step {expected}; got {got} after sample {index}")]
    UnevenSamples { index: usize, expected: f64, got: f64 },

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),
}

impl TError {
    pub(crate) fn check_dt(dt: f64) -> Result<(), Self> {
        dt.is_finite().then_some(()).ok_or(Self::BadTimeStep(dt))
    }

    pub(crate) fn check_nsamples(nsamples: usize) -> Result<(), Self> {
        (nsamples != 0).then_some(()).ok_or(Self::NoSamples)
    }
}

/// Returned from eigenvalue bracketing and refinement.
#[derive(Debug, Error)]
pub enum XError {
    /// Returned when a non-positive `epsilon` value is encountered.
    #[error("epsilon values must be greater than 0; got {0}")]
    BadEpsilon(f64),

    /// Returned when a non-positive `maxiters` value is encountered.
    #[error("maxiters must be greater than 0; got {0}")]
    BadMaxiters(usize),

    /// Returned when bisection fails to shrink a bracket below `epsilon`
    /// within `maxiters` iterations.
    #[error("brackets::refine: bracket [{0}, {1}] did not converge")]
    BisectMaxiters(f64, f64),

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),
}

impl XError {
    pub(crate) fn check_epsilon(epsilon: f64) -> Result<(), Self> {
        (epsilon > 0.0).then_some(()).ok_or(Self::BadEpsilon(epsilon))
    }

    pub(crate) fn check_maxiters(maxiters: usize) -> Result<(), Self> {
        (maxiters != 0).then_some(()).ok_or(Self::BadMaxiters(maxiters))
    }
}

/// Returned from loading and validating run parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when a parameter file cannot be read.
    #[error("unable to read parameter file {path}: {source}")]
    Io { path: String, source: std::io::Error },

    /// Returned when a parameter file cannot be parsed.
    #[error("unable to parse parameters: {0}")]
    Toml(#[from] toml::de::Error),

    /// Returned when parameters cannot be written out as TOML.
    #[error("unable to serialize parameters: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Returned when a parameter is outside its allowed range.
    #[error("bad parameter `{name}`: {reason}; got {value}")]
    BadParam { name: &'static str, reason: &'static str, value: f64 },

    /// [`GridError`]
    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    /// [`TError`]
    #[error("propagation error: {0}")]
    Time(#[from] TError),
}

impl ConfigError {
    pub(crate) fn check(
        ok: bool,
        name: &'static str,
        reason: &'static str,
        value: f64,
    ) -> Result<(), Self>
    {
        ok.then_some(()).ok_or(Self::BadParam { name, reason, value })
    }
}
