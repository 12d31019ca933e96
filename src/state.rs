// Copyright (c) 2026
// License: MIT

//! Exports the cell-state containers consumed by the two time steppers: [LagrangianState] and
//! [EulerianState] for the per-cell arrays, [Snapshots] for the row-accumulating history buffer
//! handed in by the driver, and [BoundaryState]/[BoundarySlopes] for the six-scalar ghost records
//! [crate::boundaryconditions::refresh] recomputes every step.

use color_eyre::{eyre::ensure, Result};
use ndarray::Array1;

use crate::errorhandling::Validation;

/// Per-cell state on the Lagrangian mass-coordinate mesh used by
/// [crate::timeintegration::godunov::godunov_lagrange].
#[derive(Debug, Clone)]
pub struct LagrangianState<const S: usize> {
    /// Density, length `S`.
    pub rho: Array1<f64>,
    /// Velocity, length `S`.
    pub u: Array1<f64>,
    /// Pressure, length `S`.
    pub p: Array1<f64>,
    /// Specific total energy `e = u^2/2 + p/((gamma-1)*rho)`, length `S`.
    pub e: Array1<f64>,
    /// Interface positions, length `S + 1`; `x[j]` is the left interface of cell `j`, `x[S]` the
    /// rightmost interface.
    pub x: Array1<f64>,
    /// Lagrangian cell mass `h * rho_0[j]`, length `S`, constant for the run.
    pub mass: Array1<f64>,
}

impl<const S: usize> LagrangianState<S> {
    /// Builds a [LagrangianState] from the initial primitive fields and uniform cell width `h`;
    /// derives `e`, `x` (uniform mesh starting at `x0`), and the invariant `mass` array.
    pub fn from_primitive(rho: Array1<f64>, u: Array1<f64>, p: Array1<f64>, gamma: f64, h: f64, x0: f64) -> Self {
        let e = Array1::from_iter(
            rho.iter().zip(u.iter()).zip(p.iter()).map(|((r, v), pr)| 0.5 * v * v + pr / ((gamma - 1.0) * r)),
        );
        let x = Array1::from_iter((0..=S).map(|j| x0 + (j as f64) * h));
        let mass = rho.mapv(|r| h * r);
        return LagrangianState { rho, u, p, e, x, mass };
    }
}

impl<const S: usize> Validation for LagrangianState<S> {
    fn validate(&self) -> Result<()> {
        check_nonempty_finite_multiple_array1!(self.rho, self.u, self.p, self.e, self.x, self.mass);
        check_positive_array1!(self.rho);
        check_positive_array1!(self.p);
        check_positive_array1!(self.mass);
        ensure!(self.rho.len() == S, "rho must have length S = {S}! Got len = {}", self.rho.len());
        ensure!(self.x.len() == S + 1, "x must have length S + 1 = {}! Got len = {}", S + 1, self.x.len());
        return Ok(());
    }
}

/// Per-cell state on the fixed Eulerian spatial mesh used by
/// [crate::timeintegration::grp_euler::grp_euler], plus the per-cell primitive slopes carried
/// between steps per §4.6's "memory" term in `minmod3`.
#[derive(Debug, Clone)]
pub struct EulerianState<const S: usize> {
    /// Density, length `S`.
    pub rho: Array1<f64>,
    /// Velocity, length `S`.
    pub u: Array1<f64>,
    /// Pressure, length `S`.
    pub p: Array1<f64>,
    /// Specific total energy, length `S`.
    pub e: Array1<f64>,
    /// Stored slope of density from the previous step, length `S`.
    pub slope_rho: Array1<f64>,
    /// Stored slope of velocity from the previous step, length `S`.
    pub slope_u: Array1<f64>,
    /// Stored slope of pressure from the previous step, length `S`.
    pub slope_p: Array1<f64>,
}

impl<const S: usize> EulerianState<S> {
    /// Builds an [EulerianState] from the initial primitive fields; slopes start at zero, as
    /// required by §4.6 step 2's `k = 1` branch (`minmod2`, no third argument yet).
    pub fn from_primitive(rho: Array1<f64>, u: Array1<f64>, p: Array1<f64>, gamma: f64) -> Self {
        let e = Array1::from_iter(
            rho.iter().zip(u.iter()).zip(p.iter()).map(|((r, v), pr)| 0.5 * v * v + pr / ((gamma - 1.0) * r)),
        );
        return EulerianState {
            rho,
            u,
            p,
            e,
            slope_rho: Array1::zeros(S),
            slope_u: Array1::zeros(S),
            slope_p: Array1::zeros(S),
        };
    }
}

impl<const S: usize> Validation for EulerianState<S> {
    fn validate(&self) -> Result<()> {
        check_nonempty_finite_multiple_array1!(self.rho, self.u, self.p, self.e, self.slope_rho, self.slope_u, self.slope_p);
        check_positive_array1!(self.rho);
        check_positive_array1!(self.p);
        ensure!(self.rho.len() == S, "rho must have length S = {S}! Got len = {}", self.rho.len());
        return Ok(());
    }
}

/// The six ghost-state scalars refreshed each step by [crate::boundaryconditions::refresh].
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundaryState {
    /// Left ghost velocity.
    pub u_l: f64,
    /// Left ghost pressure.
    pub p_l: f64,
    /// Left ghost density.
    pub rho_l: f64,
    /// Right ghost velocity.
    pub u_r: f64,
    /// Right ghost pressure.
    pub p_r: f64,
    /// Right ghost density.
    pub rho_r: f64,
}

/// The six ghost-slope scalars the GRP stepper additionally needs, refreshed alongside
/// [BoundaryState].
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundarySlopes {
    /// Left ghost slope of velocity.
    pub s_u_l: f64,
    /// Left ghost slope of pressure.
    pub s_p_l: f64,
    /// Left ghost slope of density.
    pub s_rho_l: f64,
    /// Right ghost slope of velocity.
    pub s_u_r: f64,
    /// Right ghost slope of pressure.
    pub s_p_r: f64,
    /// Right ghost slope of density.
    pub s_rho_r: f64,
}

/// The `N x m` (`N x (m+1)` for `x`) row-accumulating history buffer owned by the driver and
/// handed in by `&mut` reference, per spec's "N=2 suffices with a two-row ping-pong" design note.
///
/// Row 0 is expected to already hold the initial state when the stepper is called; each
/// subsequent call to [Snapshots::push] writes into the next row, wrapping back to row 1 once the
/// buffer is full so that only the most recent `rows - 1` steps are retained (a genuine ping-pong
/// when `rows == 2`).
#[derive(Debug, Clone)]
pub struct Snapshots<const S: usize> {
    /// Density history, `rows` x `S`.
    pub rho: Array1<Array1<f64>>,
    /// Velocity history, `rows` x `S`.
    pub u: Array1<Array1<f64>>,
    /// Pressure history, `rows` x `S`.
    pub p: Array1<Array1<f64>>,
    /// Specific total energy history, `rows` x `S`.
    pub e: Array1<Array1<f64>>,
    /// Interface-position history, `rows` x `(S + 1)`; empty rows (`len == 0`) for the Eulerian
    /// stepper, which has no moving mesh to snapshot.
    pub x: Array1<Array1<f64>>,
    next_row: usize,
    rows: usize,
}

impl<const S: usize> Snapshots<S> {
    /// Allocates a buffer with `rows` rows, each of length `S` (`S + 1` for `x`). Row 0 is left
    /// zeroed; the caller is expected to seed it from the initial state before the first stepper
    /// call.
    pub fn new(rows: usize, with_x: bool) -> Self {
        let x_len = if with_x { S + 1 } else { 0 };
        return Snapshots {
            rho: Array1::from_iter((0..rows).map(|_| Array1::zeros(S))),
            u: Array1::from_iter((0..rows).map(|_| Array1::zeros(S))),
            p: Array1::from_iter((0..rows).map(|_| Array1::zeros(S))),
            e: Array1::from_iter((0..rows).map(|_| Array1::zeros(S))),
            x: Array1::from_iter((0..rows).map(|_| Array1::zeros(x_len))),
            next_row: 1,
            rows,
        };
    }

    /// Number of rows this buffer was allocated with.
    pub fn rows(&self) -> usize {
        return self.rows;
    }

    /// Copies the initial state into row 0.
    pub fn seed(&mut self, rho: &Array1<f64>, u: &Array1<f64>, p: &Array1<f64>, e: &Array1<f64>, x: Option<&Array1<f64>>) {
        self.rho[0].assign(rho);
        self.u[0].assign(u);
        self.p[0].assign(p);
        self.e[0].assign(e);
        if let Some(x) = x {
            self.x[0].assign(x);
        }
        self.next_row = 1;
    }

    /// Writes the current state into the next row, wrapping back to row 1 when the buffer is
    /// full (so row 0 is always the run's initial state and the last written row is always the
    /// most recent one).
    pub fn push(&mut self, rho: &Array1<f64>, u: &Array1<f64>, p: &Array1<f64>, e: &Array1<f64>, x: Option<&Array1<f64>>) -> usize {
        let row = self.next_row;
        self.rho[row].assign(rho);
        self.u[row].assign(u);
        self.p[row].assign(p);
        self.e[row].assign(e);
        if let Some(x) = x {
            self.x[row].assign(x);
        }
        self.next_row = if row + 1 >= self.rows { 1 } else { row + 1 };
        return row;
    }
}
