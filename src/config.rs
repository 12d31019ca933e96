// Copyright (c) 2026
// License: MIT

//! Exports [CoreConfig], the explicit configuration value consumed by every entry point in this
//! crate, and its nested [BoundaryMode].

pub mod boundarymode;

use color_eyre::{eyre::ensure, Result};
pub use boundarymode::BoundaryMode;

use crate::errorhandling::Validation;

/// Carries the full numeric configuration for a single stepper call.
///
/// Unlike a process-wide configuration singleton, a [CoreConfig] is an explicit value threaded
/// into [crate::godunov_lagrange] or [crate::grp_euler] by the caller, so that repeated or
/// concurrent runs never share hidden state.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CoreConfig {
    /// Ratio of specific heats, must be > 1.
    pub gamma: f64,

    /// Total physical time to integrate to. May be [f64::INFINITY] to run until `n_max` steps
    /// have been taken, in which case `tau` supplies a fixed step width.
    pub t_final: f64,

    /// Threshold below which a quantity that must be positive is instead treated as having
    /// failed; also used as the Newton-iteration zero tolerance.
    pub eps: f64,

    /// Maximum number of time steps to take. Overwritten with the index of the last valid step
    /// if a stepper terminates early because of a [crate::errorhandling::StepError].
    pub n_max: usize,

    /// Courant number, must lie in `(0, 1]`.
    pub cfl: f64,

    /// Initial uniform spatial cell width.
    pub h: f64,

    /// Fixed time step width, used only when `t_final` is not finite.
    pub tau: f64,

    /// Selects how ghost states are refreshed at each step.
    pub bound: BoundaryMode,

    /// Slope-limiter compression parameter used by the GRP stepper's `minmod3`, supported
    /// domain `[1, 2]`.
    pub alpha: f64,
}

impl Validation for CoreConfig {
    fn validate(&self) -> Result<()> {
        ensure!(self.gamma.is_finite() && self.gamma > 1.0, "gamma must be > 1! Got gamma = {}", self.gamma);
        ensure!(self.eps.is_finite() && self.eps > 0.0, "eps must be > 0! Got eps = {}", self.eps);
        ensure!(self.n_max > 0, "n_max must be > 0! Got n_max = {}", self.n_max);
        ensure!(
            self.cfl.is_finite() && self.cfl > 0.0 && self.cfl <= 1.0,
            "cfl must lie in (0, 1]! Got cfl = {}",
            self.cfl
        );
        ensure!(self.h.is_finite() && self.h > 0.0, "h must be > 0! Got h = {}", self.h);
        ensure!(
            self.t_final.is_finite() || (self.tau.is_finite() && self.tau > 0.0),
            "tau must be a finite, positive fixed time step when t_final is not finite! Got t_final = {}, tau = {}",
            self.t_final,
            self.tau
        );
        ensure!(
            self.alpha.is_finite() && (1.0..=2.0).contains(&self.alpha),
            "alpha must lie in [1, 2]! Got alpha = {}",
            self.alpha
        );
        return Ok(());
    }
}
