// Copyright (c) 2026
// License: MIT

//! Exports [grp_euler], the second-order Eulerian GRP time stepper (§4.6).

use std::time::Instant;

use color_eyre::{
    eyre::{ensure, Context},
    Result,
};
use ndarray::Array1;

use crate::boundaryconditions::{capture_initial_state, refresh_slopes, refresh_state};
use crate::config::CoreConfig;
use crate::errorhandling::{StepError, Validation};
use crate::grp::{linear_grp, OneSidedState};
use crate::limiters::{minmod2, minmod3};
use crate::riemann::sound_speed;
use crate::state::{BoundarySlopes, EulerianState, Snapshots};

/// Evaluates a cell's one-sided left/right spatial slopes for one primitive variable, using the
/// ghost value at the relevant end instead of a missing neighbour.
fn one_sided_slopes(values: &Array1<f64>, ghost_l: f64, ghost_r: f64, j: usize, h: f64) -> (f64, f64) {
    let m = values.len();
    let left_neighbour = if j == 0 { ghost_l } else { values[j - 1] };
    let right_neighbour = if j + 1 == m { ghost_r } else { values[j + 1] };
    let s_l = (values[j] - left_neighbour) / h;
    let s_r = (right_neighbour - values[j]) / h;
    return (s_l, s_r);
}

/// Advances `state` by explicit Eulerian GRP steps until `time_c >= t_final - eps` or
/// `config.n_max` steps have been taken, whichever comes first.
///
/// Returns the number of steps actually taken, with the same early-termination contract as
/// [crate::timeintegration::godunov::godunov_lagrange].
pub fn grp_euler<const S: usize>(
    config: &mut CoreConfig,
    state: &mut EulerianState<S>,
    snapshots: &mut Snapshots<S>,
    cpu_time: &mut Array1<f64>,
) -> Result<usize> {
    config.validate().context("Validating CoreConfig in grp_euler")?;
    state.validate().context("Validating EulerianState in grp_euler")?;
    ensure!(
        cpu_time.len() == snapshots.rows(),
        "cpu_time must have the same length as snapshots ({})! Got len = {}",
        snapshots.rows(),
        cpu_time.len()
    );

    let frozen_state = capture_initial_state(&state.rho, &state.u, &state.p);
    let frozen_slopes = BoundarySlopes::default();
    let h = config.h;
    let mut time_c = 0.0f64;

    let mut k = 0usize;
    while k < config.n_max {
        k += 1;
        let started = Instant::now();

        let boundary = refresh_state(config.bound, &state.rho, &state.u, &state.p, &frozen_state);
        let ghost_slopes = refresh_slopes(config.bound, &state.slope_rho, &state.slope_u, &state.slope_p, &frozen_slopes);

        let prev_slope_rho = state.slope_rho.clone();
        let prev_slope_u = state.slope_u.clone();
        let prev_slope_p = state.slope_p.clone();

        let mut slope_rho = Array1::<f64>::zeros(S);
        let mut slope_u = Array1::<f64>::zeros(S);
        let mut slope_p = Array1::<f64>::zeros(S);
        for j in 0..S {
            let (s_l_rho, s_r_rho) = one_sided_slopes(&state.rho, boundary.rho_l, boundary.rho_r, j, h);
            let (s_l_u, s_r_u) = one_sided_slopes(&state.u, boundary.u_l, boundary.u_r, j, h);
            let (s_l_p, s_r_p) = one_sided_slopes(&state.p, boundary.p_l, boundary.p_r, j, h);

            if k == 1 {
                slope_rho[j] = minmod2(s_l_rho, s_r_rho);
                slope_u[j] = minmod2(s_l_u, s_r_u);
                slope_p[j] = minmod2(s_l_p, s_r_p);
            } else {
                slope_rho[j] = minmod3(config.alpha * s_l_rho, config.alpha * s_r_rho, prev_slope_rho[j]);
                slope_u[j] = minmod3(config.alpha * s_l_u, config.alpha * s_r_u, prev_slope_u[j]);
                slope_p[j] = minmod3(config.alpha * s_l_p, config.alpha * s_r_p, prev_slope_p[j]);
            }
        }

        let mut mid_rho = Array1::<f64>::zeros(S + 1);
        let mut mid_u = Array1::<f64>::zeros(S + 1);
        let mut mid_p = Array1::<f64>::zeros(S + 1);
        let mut dire_rho = Array1::<f64>::zeros(S + 1);
        let mut dire_u = Array1::<f64>::zeros(S + 1);
        let mut dire_p = Array1::<f64>::zeros(S + 1);
        let mut s_max = 0.0f64;

        for j in 0..=S {
            let left = if j == 0 {
                OneSidedState {
                    rho: boundary.rho_l + 0.5 * h * ghost_slopes.s_rho_l,
                    u: boundary.u_l + 0.5 * h * ghost_slopes.s_u_l,
                    p: boundary.p_l + 0.5 * h * ghost_slopes.s_p_l,
                    s_rho: ghost_slopes.s_rho_l,
                    s_u: ghost_slopes.s_u_l,
                    s_p: ghost_slopes.s_p_l,
                }
            } else {
                OneSidedState {
                    rho: state.rho[j - 1] + 0.5 * h * slope_rho[j - 1],
                    u: state.u[j - 1] + 0.5 * h * slope_u[j - 1],
                    p: state.p[j - 1] + 0.5 * h * slope_p[j - 1],
                    s_rho: slope_rho[j - 1],
                    s_u: slope_u[j - 1],
                    s_p: slope_p[j - 1],
                }
            };
            let right = if j == S {
                OneSidedState {
                    rho: boundary.rho_r - 0.5 * h * ghost_slopes.s_rho_r,
                    u: boundary.u_r - 0.5 * h * ghost_slopes.s_u_r,
                    p: boundary.p_r - 0.5 * h * ghost_slopes.s_p_r,
                    s_rho: ghost_slopes.s_rho_r,
                    s_u: ghost_slopes.s_u_r,
                    s_p: ghost_slopes.s_p_r,
                }
            } else {
                OneSidedState {
                    rho: state.rho[j] - 0.5 * h * slope_rho[j],
                    u: state.u[j] - 0.5 * h * slope_u[j],
                    p: state.p[j] - 0.5 * h * slope_p[j],
                    s_rho: slope_rho[j],
                    s_u: slope_u[j],
                    s_p: slope_p[j],
                }
            };

            if left.rho <= config.eps || left.p <= config.eps || right.rho <= config.eps || right.p <= config.eps {
                config.n_max = k - 1;
                return Err(StepError::NonPositive {
                    step: k,
                    cell: Some(j),
                    msg: "half-cell extrapolated state fell to or below eps".to_string(),
                }
                .into());
            }

            let c_l = sound_speed(config.gamma, left.rho, left.p);
            let c_r = sound_speed(config.gamma, right.rho, right.p);
            s_max = s_max.max(left.u.abs() + c_l).max(right.u.abs() + c_r);

            let sol = match linear_grp(config.gamma, left, right, config.eps) {
                Ok(sol) => sol,
                Err(_) => {
                    config.n_max = k - 1;
                    return Err(StepError::RiemannFail { step: k, cell: Some(j) }).context("Interface GRP solve failed in grp_euler");
                },
            };
            mid_rho[j] = sol.mid.rho;
            mid_u[j] = sol.mid.u;
            mid_p[j] = sol.mid.p;
            dire_rho[j] = sol.dire.rho;
            dire_u[j] = sol.dire.u;
            dire_p[j] = sol.dire.p;
        }

        if !(s_max.is_finite()) || s_max <= 0.0 {
            config.n_max = k - 1;
            return Err(StepError::CflZero { step: k }).context("Maximum wave speed degenerated in grp_euler");
        }

        let tau_unclamped = config.cfl * h / s_max;
        let tau = if config.t_final.is_finite() { tau_unclamped.min(config.t_final - time_c) } else { config.tau };
        if !(tau.is_finite()) || tau <= 0.0 {
            config.n_max = k - 1;
            return Err(StepError::CflZero { step: k }).context("Time step degenerated to zero or non-finite in grp_euler");
        }

        let mut f1 = Array1::<f64>::zeros(S + 1);
        let mut f2 = Array1::<f64>::zeros(S + 1);
        let mut f3 = Array1::<f64>::zeros(S + 1);
        for j in 0..=S {
            let rho_bar = mid_rho[j] + 0.5 * tau * dire_rho[j];
            let u_bar = mid_u[j] + 0.5 * tau * dire_u[j];
            let p_bar = mid_p[j] + 0.5 * tau * dire_p[j];
            f1[j] = rho_bar * u_bar;
            f2[j] = f1[j] * u_bar + p_bar;
            f3[j] = (config.gamma / (config.gamma - 1.0)) * p_bar * u_bar + 0.5 * f1[j] * u_bar * u_bar;
        }

        let nu = tau / h;
        let mut rho_new = Array1::<f64>::zeros(S);
        let mut u_new = Array1::<f64>::zeros(S);
        let mut p_new = Array1::<f64>::zeros(S);
        let mut e_new = Array1::<f64>::zeros(S);
        for j in 0..S {
            let mom = state.rho[j] * state.u[j];
            let energy = state.rho[j] * state.e[j];
            let rho_n = state.rho[j] - nu * (f1[j + 1] - f1[j]);
            let mom_n = mom - nu * (f2[j + 1] - f2[j]);
            let energy_n = energy - nu * (f3[j + 1] - f3[j]);

            if !(rho_n.is_finite() && mom_n.is_finite() && energy_n.is_finite()) {
                config.n_max = k - 1;
                return Err(StepError::NonFinite { step: k, cell: Some(j), msg: "non-finite conservative update in grp_euler".to_string() }.into());
            }
            if rho_n <= config.eps {
                config.n_max = k - 1;
                return Err(StepError::NonPositive { step: k, cell: Some(j), msg: format!("rho = {rho_n}") }.into());
            }
            let u_n = mom_n / rho_n;
            let e_n = energy_n / rho_n;
            let p_n = (config.gamma - 1.0) * (energy_n - 0.5 * mom_n * u_n);
            if !(p_n.is_finite()) || p_n <= config.eps {
                config.n_max = k - 1;
                return Err(StepError::NonPositive { step: k, cell: Some(j), msg: format!("p = {p_n}") }.into());
            }
            rho_new[j] = rho_n;
            u_new[j] = u_n;
            p_new[j] = p_n;
            e_new[j] = e_n;
        }

        state.rho = rho_new;
        state.u = u_new;
        state.p = p_new;
        state.e = e_new;
        // slope refresh uses this step's full-step (t_{n+1}) interface states, not the mid
        // (t=0+) states and not a finite difference of the cell averages just computed, per
        // §4.6 step 7 and the ordering constraint in §5.
        let mut next_rho = Array1::<f64>::zeros(S + 1);
        let mut next_u = Array1::<f64>::zeros(S + 1);
        let mut next_p = Array1::<f64>::zeros(S + 1);
        for j in 0..=S {
            next_rho[j] = mid_rho[j] + tau * dire_rho[j];
            next_u[j] = mid_u[j] + tau * dire_u[j];
            next_p[j] = mid_p[j] + tau * dire_p[j];
        }
        for j in 0..S {
            state.slope_rho[j] = (next_rho[j + 1] - next_rho[j]) / h;
            state.slope_u[j] = (next_u[j + 1] - next_u[j]) / h;
            state.slope_p[j] = (next_p[j + 1] - next_p[j]) / h;
        }
        time_c += tau;

        let row = snapshots.push(&state.rho, &state.u, &state.p, &state.e, None);
        cpu_time[row] = started.elapsed().as_secs_f64();

        if time_c >= config.t_final - config.eps {
            break;
        }
    }

    config.n_max = k;
    return Ok(k);
}
