// Copyright (c) 2026
// License: MIT

use color_eyre::Result;
use gas1d::config::{BoundaryMode, CoreConfig};
use gas1d::state::{LagrangianState, Snapshots};
use gas1d::timeintegration::godunov::godunov_lagrange;
use ndarray::Array1;

const S: usize = 100;

fn sod_initial_state(h: f64) -> LagrangianState<S> {
    let rho = Array1::from_iter((0..S).map(|j| if j < 50 { 1.0 } else { 0.125 }));
    let u = Array1::zeros(S);
    let p = Array1::from_iter((0..S).map(|j| if j < 50 { 1.0 } else { 0.1 }));
    return LagrangianState::<S>::from_primitive(rho, u, p, 1.4, h, 0.0);
}

/// S1: Sod shock tube, §8. Checked against the classic exact-solution landmarks at t=0.2, with a
/// tolerance wide enough to accommodate the first-order scheme's shock smearing.
#[test]
fn sod_shock_tube_reaches_expected_landmarks() -> Result<()> {
    let h = 0.01;
    let mut config = CoreConfig {
        gamma: 1.4,
        t_final: 0.2,
        eps: 1e-9,
        n_max: 100_000,
        cfl: 0.45,
        h,
        tau: f64::NAN,
        bound: BoundaryMode::Reflective,
        alpha: 1.5,
    };
    let mut state = sod_initial_state(h);
    let mut snapshots = Snapshots::<S>::new(2, true);
    snapshots.seed(&state.rho, &state.u, &state.p, &state.e, Some(&state.x));
    let mut cpu_time = Array1::<f64>::zeros(2);

    godunov_lagrange(&mut config, &mut state, &mut snapshots, &mut cpu_time)?;

    assert!(state.rho.iter().all(|r| *r > 0.0));
    assert!(state.p.iter().all(|p| *p > 0.0));

    // contact discontinuity: density jumps from the post-shock plateau to the expanded-left
    // plateau somewhere near x = 0.685.
    let contact_cell = (0.685 / h) as usize;
    let post_shock_density = state.rho[contact_cell.saturating_sub(2)];
    assert!((post_shock_density - 0.266).abs() < 0.266 * 0.1, "post-shock density was {post_shock_density}");

    // head of the left rarefaction: density should still be close to 1.0 well to the left of it.
    assert!((state.rho[10] - 1.0).abs() < 0.05);

    Ok(())
}

/// S4: stationary contact, §8. A density jump at equal pressure and zero velocity should stay
/// put under the first-order Lagrangian scheme.
#[test]
fn stationary_contact_does_not_drift() -> Result<()> {
    let h = 0.01;
    let mut config = CoreConfig {
        gamma: 1.4,
        t_final: 2.0,
        eps: 1e-9,
        n_max: 1_000_000,
        cfl: 0.45,
        h,
        tau: f64::NAN,
        bound: BoundaryMode::Free,
        alpha: 1.5,
    };
    let rho = Array1::from_iter((0..S).map(|j| if j < 50 { 1.4 } else { 1.0 }));
    let u = Array1::zeros(S);
    let p = Array1::from_elem(S, 1.0);
    let mut state = LagrangianState::<S>::from_primitive(rho, u, p, config.gamma, h, 0.0);
    let rho_before = state.rho.clone();

    let mut snapshots = Snapshots::<S>::new(2, true);
    snapshots.seed(&state.rho, &state.u, &state.p, &state.e, Some(&state.x));
    let mut cpu_time = Array1::<f64>::zeros(2);

    godunov_lagrange(&mut config, &mut state, &mut snapshots, &mut cpu_time)?;

    for u in state.u.iter() {
        assert!(u.abs() < 1e-6, "velocity drifted to {u}");
    }
    for p in state.p.iter() {
        assert!((p - 1.0).abs() < 1e-6, "pressure drifted to {p}");
    }
    for (before, after) in rho_before.iter().zip(state.rho.iter()) {
        assert!((before - after).abs() < before * 0.01, "density profile changed by more than 1%");
    }
    Ok(())
}
