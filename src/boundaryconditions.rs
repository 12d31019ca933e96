// Copyright (c) 2026
// License: MIT

//! Exports [refresh_state] and [refresh_slopes], which recompute the six-scalar ghost records
//! ([crate::state::BoundaryState], [crate::state::BoundarySlopes]) each step according to the
//! [BoundaryMode](crate::config::BoundaryMode) tag, per §4.4.

use ndarray::Array1;

use crate::config::BoundaryMode;
use crate::state::{BoundarySlopes, BoundaryState};

/// Captures the ghost state once from cells `0` and `m-1` at `t=0`, for later reuse by
/// [BoundaryMode::FrozenInitial].
pub fn capture_initial_state(rho: &Array1<f64>, u: &Array1<f64>, p: &Array1<f64>) -> BoundaryState {
    let last = rho.len() - 1;
    return BoundaryState {
        u_l: u[0],
        p_l: p[0],
        rho_l: rho[0],
        u_r: u[last],
        p_r: p[last],
        rho_r: rho[last],
    };
}

/// Refreshes the ghost state for the current step.
///
/// `frozen` must be the value captured once by [capture_initial_state]; it is only read when
/// `bound` is [BoundaryMode::FrozenInitial] or the frozen side of a mixed tag.
pub fn refresh_state(bound: BoundaryMode, rho: &Array1<f64>, u: &Array1<f64>, p: &Array1<f64>, frozen: &BoundaryState) -> BoundaryState {
    let last = rho.len() - 1;
    return match bound {
        BoundaryMode::FrozenInitial => *frozen,
        BoundaryMode::Reflective => BoundaryState {
            u_l: -u[0],
            p_l: p[0],
            rho_l: rho[0],
            u_r: -u[last],
            p_r: p[last],
            rho_r: rho[last],
        },
        BoundaryMode::Free => BoundaryState { u_l: u[0], p_l: p[0], rho_l: rho[0], u_r: u[last], p_r: p[last], rho_r: rho[last] },
        BoundaryMode::Periodic => BoundaryState {
            u_l: u[last],
            p_l: p[last],
            rho_l: rho[last],
            u_r: u[0],
            p_r: p[0],
            rho_r: rho[0],
        },
        BoundaryMode::ReflectiveLeftFreeRight => {
            BoundaryState { u_l: -u[0], p_l: p[0], rho_l: rho[0], u_r: u[last], p_r: p[last], rho_r: rho[last] }
        },
    };
}

/// Refreshes the ghost slopes for the current step, used only by the GRP stepper.
///
/// `frozen` must be captured once (mirroring [capture_initial_state]) from the initial per-cell
/// slopes at cells `0` and `m-1`.
pub fn refresh_slopes(
    bound: BoundaryMode,
    slope_rho: &Array1<f64>,
    slope_u: &Array1<f64>,
    slope_p: &Array1<f64>,
    frozen: &BoundarySlopes,
) -> BoundarySlopes {
    let last = slope_rho.len() - 1;
    return match bound {
        BoundaryMode::FrozenInitial => *frozen,
        BoundaryMode::Reflective => BoundarySlopes {
            s_u_l: -slope_u[0],
            s_p_l: slope_p[0],
            s_rho_l: slope_rho[0],
            s_u_r: -slope_u[last],
            s_p_r: slope_p[last],
            s_rho_r: slope_rho[last],
        },
        BoundaryMode::Free => BoundarySlopes::default(),
        BoundaryMode::Periodic => BoundarySlopes {
            s_u_l: slope_u[last],
            s_p_l: slope_p[last],
            s_rho_l: slope_rho[last],
            s_u_r: slope_u[0],
            s_p_r: slope_p[0],
            s_rho_r: slope_rho[0],
        },
        BoundaryMode::ReflectiveLeftFreeRight => BoundarySlopes {
            s_u_l: -slope_u[0],
            s_p_l: slope_p[0],
            s_rho_l: slope_rho[0],
            s_u_r: 0.0,
            s_p_r: 0.0,
            s_rho_r: 0.0,
        },
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrs() -> (Array1<f64>, Array1<f64>, Array1<f64>) {
        return (Array1::from_vec(vec![1.0, 2.0, 3.0]), Array1::from_vec(vec![0.5, -0.5, 1.5]), Array1::from_vec(vec![1.0, 1.0, 1.0]));
    }

    #[test]
    fn reflective_flips_velocity_only() {
        let (rho, u, p) = arrs();
        let frozen = capture_initial_state(&rho, &u, &p);
        let bs = refresh_state(BoundaryMode::Reflective, &rho, &u, &p, &frozen);
        assert_eq!(bs.u_l, -0.5);
        assert_eq!(bs.u_r, -1.5);
        assert_eq!(bs.rho_l, 1.0);
        assert_eq!(bs.p_r, 1.0);
    }

    #[test]
    fn periodic_swaps_ends() {
        let (rho, u, p) = arrs();
        let frozen = capture_initial_state(&rho, &u, &p);
        let bs = refresh_state(BoundaryMode::Periodic, &rho, &u, &p, &frozen);
        assert_eq!(bs.rho_l, 3.0);
        assert_eq!(bs.rho_r, 1.0);
        assert_eq!(bs.u_l, 1.5);
        assert_eq!(bs.u_r, 0.5);
    }

    #[test]
    fn free_zero_gradient_and_zero_slopes() {
        let (rho, u, p) = arrs();
        let slope_rho = Array1::from_vec(vec![0.1, 0.2, 0.3]);
        let slope_u = Array1::from_vec(vec![0.1, 0.2, 0.3]);
        let slope_p = Array1::from_vec(vec![0.1, 0.2, 0.3]);
        let frozen = capture_initial_state(&rho, &u, &p);
        let bs = refresh_state(BoundaryMode::Free, &rho, &u, &p, &frozen);
        assert_eq!(bs.rho_l, rho[0]);
        assert_eq!(bs.rho_r, rho[2]);

        let frozen_slopes = BoundarySlopes::default();
        let slopes = refresh_slopes(BoundaryMode::Free, &slope_rho, &slope_u, &slope_p, &frozen_slopes);
        assert_eq!(slopes.s_u_l, 0.0);
        assert_eq!(slopes.s_rho_r, 0.0);
    }

    #[test]
    fn mixed_tag_is_reflective_west_free_east() {
        let (rho, u, p) = arrs();
        let frozen = capture_initial_state(&rho, &u, &p);
        let bs = refresh_state(BoundaryMode::ReflectiveLeftFreeRight, &rho, &u, &p, &frozen);
        assert_eq!(bs.u_l, -0.5);
        assert_eq!(bs.u_r, 1.5);
    }

    #[test]
    fn frozen_initial_ignores_current_state() {
        let (rho, u, p) = arrs();
        let frozen = capture_initial_state(&rho, &u, &p);
        let rho2 = Array1::from_vec(vec![9.0, 9.0, 9.0]);
        let u2 = Array1::from_vec(vec![9.0, 9.0, 9.0]);
        let p2 = Array1::from_vec(vec![9.0, 9.0, 9.0]);
        let bs = refresh_state(BoundaryMode::FrozenInitial, &rho2, &u2, &p2, &frozen);
        assert_eq!(bs.rho_l, 1.0);
        assert_eq!(bs.rho_r, 3.0);
    }
}
