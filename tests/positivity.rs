// Copyright (c) 2026
// License: MIT

//! P7, §8: for every admissible initial state, rho and p remain strictly positive across a
//! CFL-compliant step, for both the Lagrangian Godunov and Eulerian GRP steppers.

use color_eyre::Result;
use gas1d::config::{BoundaryMode, CoreConfig};
use gas1d::state::{EulerianState, LagrangianState, Snapshots};
use gas1d::timeintegration::godunov::godunov_lagrange;
use gas1d::timeintegration::grp_euler::grp_euler;
use ndarray::Array1;
use proptest::prelude::*;

const S: usize = 12;

fn lagrangian_config(h: f64) -> CoreConfig {
    return CoreConfig {
        gamma: 1.4,
        t_final: 0.01,
        eps: 1e-9,
        n_max: 200,
        cfl: 0.4,
        h,
        tau: f64::NAN,
        bound: BoundaryMode::Reflective,
        alpha: 1.5,
    };
}

fn eulerian_config(h: f64) -> CoreConfig {
    return CoreConfig {
        gamma: 1.4,
        t_final: 0.01,
        eps: 1e-9,
        n_max: 200,
        cfl: 0.4,
        h,
        tau: f64::NAN,
        bound: BoundaryMode::Reflective,
        alpha: 1.5,
    };
}

proptest! {
    #[test]
    fn lagrangian_stays_positive_for_admissible_initial_states(
        rho0 in 0.2f64..3.0, rho1 in 0.2f64..3.0,
        u0 in -1.0f64..1.0, u1 in -1.0f64..1.0,
        p0 in 0.2f64..3.0, p1 in 0.2f64..3.0,
    ) {
        let h = 0.02;
        let mut config = lagrangian_config(h);
        let rho = Array1::from_iter((0..S).map(|j| if j < S / 2 { rho0 } else { rho1 }));
        let u = Array1::from_iter((0..S).map(|j| if j < S / 2 { u0 } else { u1 }));
        let p = Array1::from_iter((0..S).map(|j| if j < S / 2 { p0 } else { p1 }));
        let mut state = LagrangianState::<S>::from_primitive(rho, u, p, config.gamma, h, 0.0);
        let mut snapshots = Snapshots::<S>::new(2, true);
        snapshots.seed(&state.rho, &state.u, &state.p, &state.e, Some(&state.x));
        let mut cpu_time = Array1::<f64>::zeros(2);

        let result: Result<usize> = godunov_lagrange(&mut config, &mut state, &mut snapshots, &mut cpu_time);
        prop_assert!(result.is_ok());
        prop_assert!(state.rho.iter().all(|r| *r > 0.0));
        prop_assert!(state.p.iter().all(|p| *p > 0.0));
    }

    #[test]
    fn eulerian_stays_positive_for_admissible_initial_states(
        rho0 in 0.2f64..3.0, rho1 in 0.2f64..3.0,
        u0 in -1.0f64..1.0, u1 in -1.0f64..1.0,
        p0 in 0.2f64..3.0, p1 in 0.2f64..3.0,
    ) {
        let h = 0.02;
        let mut config = eulerian_config(h);
        let rho = Array1::from_iter((0..S).map(|j| if j < S / 2 { rho0 } else { rho1 }));
        let u = Array1::from_iter((0..S).map(|j| if j < S / 2 { u0 } else { u1 }));
        let p = Array1::from_iter((0..S).map(|j| if j < S / 2 { p0 } else { p1 }));
        let mut state = EulerianState::<S>::from_primitive(rho, u, p, config.gamma);
        let mut snapshots = Snapshots::<S>::new(2, false);
        snapshots.seed(&state.rho, &state.u, &state.p, &state.e, None);
        let mut cpu_time = Array1::<f64>::zeros(2);

        let result: Result<usize> = grp_euler(&mut config, &mut state, &mut snapshots, &mut cpu_time);
        prop_assert!(result.is_ok());
        prop_assert!(state.rho.iter().all(|r| *r > 0.0));
        prop_assert!(state.p.iter().all(|p| *p > 0.0));
    }
}
