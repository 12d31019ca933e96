// Copyright (c) 2026
// License: MIT

//! Exports [godunov_lagrange], the first-order Lagrangian Godunov time stepper (§4.5).

use std::time::Instant;

use color_eyre::{
    eyre::{ensure, Context},
    Result,
};
use ndarray::Array1;

use crate::boundaryconditions::{capture_initial_state, refresh_state};
use crate::config::CoreConfig;
use crate::errorhandling::{StepError, Validation};
use crate::riemann::{riemann_exact, sound_speed, PrimitiveState};
use crate::state::{LagrangianState, Snapshots};

/// Advances `state` by explicit Lagrangian Godunov steps until `time_c >= t_final - eps` or
/// `config.n_max` steps have been taken, whichever comes first.
///
/// Returns the number of steps actually taken. On a [StepError], `config.n_max` is overwritten
/// with the index of the last valid step and the error is returned; `snapshots` and `state` still
/// hold the last state that validated successfully.
///
/// # Arguments
///
/// * `config` - numeric configuration, mutated in place on early termination
/// * `state` - current cell-averaged state, updated in place each step
/// * `snapshots` - row-accumulating history buffer; row 0 must already hold `state`'s initial values
/// * `cpu_time` - receives the wall-clock duration of each step, indexed like `snapshots`
pub fn godunov_lagrange<const S: usize>(
    config: &mut CoreConfig,
    state: &mut LagrangianState<S>,
    snapshots: &mut Snapshots<S>,
    cpu_time: &mut Array1<f64>,
) -> Result<usize> {
    config.validate().context("Validating CoreConfig in godunov_lagrange")?;
    state.validate().context("Validating LagrangianState in godunov_lagrange")?;
    ensure!(
        cpu_time.len() == snapshots.rows(),
        "cpu_time must have the same length as snapshots ({})! Got len = {}",
        snapshots.rows(),
        cpu_time.len()
    );

    let frozen = capture_initial_state(&state.rho, &state.u, &state.p);
    let mut time_c = 0.0f64;
    let mut u_star = Array1::<f64>::zeros(S + 1);
    let mut p_star = Array1::<f64>::zeros(S + 1);

    let mut k = 0usize;
    while k < config.n_max {
        k += 1;
        let started = Instant::now();

        let boundary = refresh_state(config.bound, &state.rho, &state.u, &state.p, &frozen);

        let mut s_max = 0.0f64;
        for j in 0..=S {
            let left = if j == 0 {
                PrimitiveState { rho: boundary.rho_l, u: boundary.u_l, p: boundary.p_l }
            } else {
                PrimitiveState { rho: state.rho[j - 1], u: state.u[j - 1], p: state.p[j - 1] }
            };
            let right = if j == S {
                PrimitiveState { rho: boundary.rho_r, u: boundary.u_r, p: boundary.p_r }
            } else {
                PrimitiveState { rho: state.rho[j], u: state.u[j], p: state.p[j] }
            };
            let c_l = sound_speed(config.gamma, left.rho, left.p);
            let c_r = sound_speed(config.gamma, right.rho, right.p);
            let sol = match riemann_exact(config.gamma, left, right, c_l, c_r, config.eps, 1e-10, 100) {
                Ok(sol) => sol,
                Err(_) => {
                    config.n_max = k - 1;
                    return Err(StepError::RiemannFail { step: k, cell: Some(j) })
                        .context("Interface Riemann solve failed in godunov_lagrange");
                },
            };
            u_star[j] = sol.u_star;
            p_star[j] = sol.p_star;
            s_max = s_max.max(sol.u_star.abs() + c_l.max(c_r));
        }
        if !(s_max.is_finite()) || s_max <= 0.0 {
            config.n_max = k - 1;
            return Err(StepError::CflZero { step: k }).context("Maximum wave speed degenerated in godunov_lagrange");
        }

        let tau = if config.t_final.is_finite() {
            let mut tau_candidate = f64::INFINITY;
            for j in 0..S {
                let s_local = u_star[j].abs().max(u_star[j + 1].abs()) + s_max;
                // S_local must bound the wave speed in mass coordinates (§4.5 step 3): the
                // Lagrangian characteristic speed there is the acoustic impedance rho*(|u|+c),
                // not the bare velocity-domain speed, so dividing the mass increment by it alone
                // leaves a stray factor of rho[j] in tau_candidate.
                tau_candidate = tau_candidate.min(config.cfl * state.mass[j] / (state.rho[j] * s_local));
            }
            tau_candidate.min(config.t_final - time_c)
        } else {
            config.tau
        };
        if !(tau.is_finite()) || tau <= 0.0 {
            config.n_max = k - 1;
            return Err(StepError::CflZero { step: k }).context("Time step degenerated to zero or non-finite in godunov_lagrange");
        }

        let mut x_new = state.x.clone();
        for j in 0..S {
            x_new[j] = state.x[j] + tau * u_star[j];
        }
        x_new[S] = state.x[S] + tau * u_star[S];

        let mut u_new = Array1::<f64>::zeros(S);
        let mut e_new = Array1::<f64>::zeros(S);
        let mut rho_new = Array1::<f64>::zeros(S);
        let mut p_new = Array1::<f64>::zeros(S);
        for j in 0..S {
            u_new[j] = state.u[j] - (tau / state.mass[j]) * (p_star[j + 1] - p_star[j]);
            e_new[j] = state.e[j]
                - (tau / state.mass[j]) * (p_star[j + 1] * u_star[j + 1] - p_star[j] * u_star[j]);
            let width = x_new[j + 1] - x_new[j];
            if !(width.is_finite()) || width <= 0.0 {
                config.n_max = k - 1;
                return Err(StepError::NonPositive { step: k, cell: Some(j), msg: format!("cell width collapsed to {width}") }.into());
            }
            rho_new[j] = state.mass[j] / width;
            p_new[j] = (config.gamma - 1.0) * rho_new[j] * (e_new[j] - 0.5 * u_new[j] * u_new[j]);

            if !(rho_new[j].is_finite() && u_new[j].is_finite() && p_new[j].is_finite() && e_new[j].is_finite()) {
                config.n_max = k - 1;
                return Err(StepError::NonFinite {
                    step: k,
                    cell: Some(j),
                    msg: "non-finite fluid quantity after Lagrangian update".to_string(),
                }
                .into());
            }
            if rho_new[j] <= config.eps || p_new[j] <= config.eps {
                config.n_max = k - 1;
                return Err(StepError::NonPositive {
                    step: k,
                    cell: Some(j),
                    msg: format!("rho = {}, p = {}", rho_new[j], p_new[j]),
                }
                .into());
            }
        }

        state.u = u_new;
        state.e = e_new;
        state.rho = rho_new;
        state.p = p_new;
        state.x = x_new;
        time_c += tau;

        let row = snapshots.push(&state.rho, &state.u, &state.p, &state.e, Some(&state.x));
        cpu_time[row] = started.elapsed().as_secs_f64();

        if time_c >= config.t_final - config.eps {
            break;
        }
    }

    config.n_max = k;
    return Ok(k);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoundaryMode;
    use ndarray::Array1;

    const S: usize = 8;

    fn sod_config() -> CoreConfig {
        return CoreConfig {
            gamma: 1.4,
            t_final: 0.01,
            eps: 1e-9,
            n_max: 1000,
            cfl: 0.45,
            h: 0.1,
            tau: f64::NAN,
            bound: BoundaryMode::Reflective,
            alpha: 1.5,
        };
    }

    #[test]
    fn mass_is_conserved_across_steps() {
        let mut config = sod_config();
        let rho = Array1::from_iter((0..S).map(|j| if j < S / 2 { 1.0 } else { 0.125 }));
        let u = Array1::zeros(S);
        let p = Array1::from_iter((0..S).map(|j| if j < S / 2 { 1.0 } else { 0.1 }));
        let mut state = LagrangianState::<S>::from_primitive(rho, u, p, config.gamma, config.h, 0.0);
        let mass_before: f64 = state.mass.sum();

        let mut snapshots = Snapshots::<S>::new(2, true);
        snapshots.seed(&state.rho, &state.u, &state.p, &state.e, Some(&state.x));
        let mut cpu_time = Array1::<f64>::zeros(2);

        let steps = godunov_lagrange(&mut config, &mut state, &mut snapshots, &mut cpu_time).unwrap();
        assert!(steps > 0);
        let mass_after: f64 = state.mass.sum();
        assert!((mass_after - mass_before).abs() < 1e-12);
        assert!(state.rho.iter().all(|r| *r > 0.0));
        assert!(state.p.iter().all(|p| *p > 0.0));
    }

    #[test]
    fn stationary_uniform_state_stays_stationary() {
        let mut config = sod_config();
        config.t_final = 0.05;
        let rho = Array1::from_elem(S, 1.0);
        let u = Array1::zeros(S);
        let p = Array1::from_elem(S, 1.0);
        let mut state = LagrangianState::<S>::from_primitive(rho, u, p, config.gamma, config.h, 0.0);

        let mut snapshots = Snapshots::<S>::new(2, true);
        snapshots.seed(&state.rho, &state.u, &state.p, &state.e, Some(&state.x));
        let mut cpu_time = Array1::<f64>::zeros(2);

        godunov_lagrange(&mut config, &mut state, &mut snapshots, &mut cpu_time).unwrap();
        for u in state.u.iter() {
            assert!(u.abs() < 1e-9);
        }
        for p in state.p.iter() {
            assert!((p - 1.0).abs() < 1e-9);
        }
    }
}
