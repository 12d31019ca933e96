// Copyright (c) 2026
// License: MIT

#![warn(missing_docs)]

//! gas1d - numerical core of a 1D compressible-fluid Euler solver.
//!
//! Provides the two explicit time steppers ([godunov_lagrange], [grp_euler]), the exact Riemann
//! solver ([riemann_exact], [riemann_exact_toro]), and the linear GRP solver ([linear_grp]). File
//! I/O, CLI parsing, directory conventions, progress printing, and a multi-dimensional driver are
//! out of scope; this crate communicates exclusively through `Result` and the returned step
//! count.

pub mod boundaryconditions;
pub mod config;
#[macro_use]
pub mod errorhandling;
pub mod grp;
pub mod limiters;
pub mod riemann;
pub mod state;
pub mod timeintegration;

pub use grp::linear_grp;
pub use riemann::{riemann_exact, riemann_exact_toro};
pub use timeintegration::godunov::godunov_lagrange;
pub use timeintegration::grp_euler::grp_euler;
