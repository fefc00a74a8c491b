//! Run parameters and a one-call simulation driver.
//!
//! Parameters can be built in code or deserialized from TOML; keys missing from
//! a file take their [default][RunParams::default] values.
//!
//! ```
//! use xprop::config::RunParams;
//!
//! let params = RunParams::from_toml("k0 = 5.0\nv_opt = 0.0").unwrap();
//! assert_eq!(params.k0, 5.0);
//! assert_eq!(params.npoints, 8192);
//! ```

use std::path::Path;
use serde::{ Deserialize, Serialize };
use crate::{
    error::ConfigError,
    grid::Grid,
    observables::Trajectory,
    potential::optical_potential,
    state::initial_state,
    timedep::SplitStep,
};

pub type CResult<T> = Result<T, ConfigError>;

/// Parameters for a single propagation run.
///
/// The run propagates the packet `exp(-x²/4 + i k0 x)` on a grid of `npoints`
/// points over `[-x_max, x_max)`, under the optical potential of strength
/// `v_opt` and width `sigma_opt`, recording `nsamples` evenly spaced densities
/// over `[0, t_end]`. The time step is `t_end / (nsamples - 1)`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunParams {
    /// Half-width of the domain.
    pub x_max: f64,
    /// Number of grid points.
    pub npoints: usize,
    /// Total simulated time.
    pub t_end: f64,
    /// Number of recorded samples, including `t = 0`.
    pub nsamples: usize,
    /// Central wavenumber of the initial packet.
    pub k0: f64,
    /// Strength of the optical potential.
    pub v_opt: f64,
    /// Width of the optical potential.
    pub sigma_opt: f64,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            x_max: 15.0,
            npoints: 8192,
            t_end: 2.0,
            nsamples: 201,
            k0: 15.0,
            v_opt: 20.0,
            sigma_opt: 5.0,
        }
    }
}

impl RunParams {
    /// Parse parameters from a TOML string.
    pub fn from_toml(s: &str) -> CResult<Self> {
        let params: Self = toml::from_str(s)?;
        Ok(params)
    }

    /// Serialize parameters to a TOML string.
    pub fn to_toml(&self) -> CResult<String> {
        let s = toml::to_string(self)?;
        Ok(s)
    }

    /// Check that all parameters are in range.
    pub fn validate(&self) -> CResult<()> {
        let finite = [
            ("x_max", self.x_max),
            ("t_end", self.t_end),
            ("k0", self.k0),
            ("v_opt", self.v_opt),
            ("sigma_opt", self.sigma_opt),
        ];
        for (name, value) in finite {
            ConfigError::check(value.is_finite(), name, "must be finite", value)?;
        }
        ConfigError::check(
            self.x_max > 0.0, "x_max", "must be positive", self.x_max)?;
        ConfigError::check(
            self.npoints >= 2, "npoints", "must be at least 2",
            self.npoints as f64)?;
        ConfigError::check(
            self.nsamples >= 1, "nsamples", "must be at least 1",
            self.nsamples as f64)?;
        ConfigError::check(
            self.t_end >= 0.0, "t_end", "must be non-negative", self.t_end)?;
        ConfigError::check(
            self.nsamples == 1 || self.t_end > 0.0,
            "t_end", "must be positive for more than one sample", self.t_end)?;
        ConfigError::check(
            self.v_opt >= 0.0, "v_opt", "must be non-negative", self.v_opt)?;
        ConfigError::check(
            self.sigma_opt > 0.0, "sigma_opt", "must be positive",
            self.sigma_opt)?;
        Ok(())
    }

    /// Time step implied by `t_end` and `nsamples`.
    pub fn dt(&self) -> f64 {
        if self.nsamples > 1 {
            self.t_end / (self.nsamples - 1) as f64
        } else {
            0.0
        }
    }

    /// Build the grid for this run.
    pub fn grid(&self) -> CResult<Grid> {
        Ok(Grid::new(self.x_max, self.npoints)?)
    }

    /// Build the propagator for this run over `grid`.
    pub fn propagator(&self, grid: &Grid) -> CResult<SplitStep> {
        let v = optical_potential(
            grid.x(), self.v_opt, self.sigma_opt, grid.x_max());
        Ok(SplitStep::new(grid, &v, self.dt())?)
    }
}

/// Load run parameters from a TOML file.
pub fn read_toml<P>(path: P) -> CResult<RunParams>
where P: AsRef<Path>
{
    let path = path.as_ref();
    let contents: String
        = std::fs::read_to_string(path)
        .map_err(|source| {
            ConfigError::Io { path: path.display().to_string(), source }
        })?;
    RunParams::from_toml(&contents)
}

/// Validate `params`, then build the grid, optical potential, initial state,
/// and propagator they describe and run the propagation.
pub fn simulate(params: &RunParams) -> CResult<Trajectory> {
    params.validate()?;
    let grid = params.grid()?;
    let prop = params.propagator(&grid)?;
    let q0 = initial_state(grid.x(), grid.dx(), params.k0);
    log::info!(
        "propagating k0 = {} over [-{}, {}) ({} points) to t = {} with dt = {:.3e}",
        params.k0, params.x_max, params.x_max, params.npoints, params.t_end,
        params.dt(),
    );
    Ok(prop.run(&q0, params.nsamples)?)
}
