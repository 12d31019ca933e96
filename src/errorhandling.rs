// Copyright (c) 2026
// License: MIT

//! Contains everything regarding error handling, and exports the [Validation] trait, the
//! [checks] module of finiteness/positivity macros, and the typed [StepError] enum.

use color_eyre::Result;

#[macro_use]
pub mod checks;

/// Trait for all structs that can validate themselves.
///
/// These structs need to implement the `validate(&self) -> color_eyre::Result<()>` method. This
/// method's purpose is to make sure the fields of a given struct are coherent and adhere to
/// rules specific to this struct.
///
/// For example, a mesh config's extents should satisfy `xi_in < xi_out`, so its `validate`
/// method should check for that.
pub trait Validation {
    /// Make sure that the fields of `&self` are coherent and adhere to struct specific internal rules.
    fn validate(&self) -> Result<()>;
}

/// The error kinds a time stepper can surface, as specified by the error handling design: a
/// single termination code plus a diagnostic identifying the step (and, where applicable, the
/// cell) that triggered it.
///
/// Every variant is fatal for the run that raised it: the stepping loop does not retry, it
/// records `step` into `config.n_max` and returns.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    /// A missing required field, an invalid boundary tag, or some other configuration
    /// inconsistency discovered before or during stepping.
    #[error("configuration error: {0}")]
    Config(String),

    /// Density or pressure fell to or below `eps` in a cell or on an interface.
    #[error("step {step}: non-positive density or pressure{}: {msg}", fmt_cell(*cell))]
    NonPositive {
        /// The step index at which the failure was observed.
        step: usize,
        /// The offending cell index, if the failure is cell-local rather than interface-local.
        cell: Option<usize>,
        /// Human-readable detail naming the offending quantity and its value.
        msg: String,
    },

    /// A `NaN` or `±∞` was encountered in a fluid quantity.
    #[error("step {step}: non-finite quantity{}: {msg}", fmt_cell(*cell))]
    NonFinite {
        /// The step index at which the failure was observed.
        step: usize,
        /// The offending cell index, if the failure is cell-local rather than interface-local.
        cell: Option<usize>,
        /// Human-readable detail naming the offending quantity and its value.
        msg: String,
    },

    /// Newton iteration failed to converge, or the star pressure fell below `eps`, in the exact
    /// Riemann solver or the linear GRP solver.
    #[error("step {step}: Riemann/GRP solve failed{}", fmt_cell(*cell))]
    RiemannFail {
        /// The step index at which the failure was observed.
        step: usize,
        /// The interface index at which the failure was observed.
        cell: Option<usize>,
    },

    /// `h_S_max` (or its Lagrangian-mass-coordinate analogue) was non-positive: the observed
    /// wave speeds degenerated and no admissible time step could be chosen.
    #[error("step {step}: CFL time step degenerated to zero or a non-finite value")]
    CflZero {
        /// The step index at which the failure was observed.
        step: usize,
    },
}

fn fmt_cell(cell: Option<usize>) -> String {
    match cell {
        Some(j) => format!(" at cell {j}"),
        None => String::new(),
    }
}
