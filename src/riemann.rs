// Copyright (c) 2026
// License: MIT

//! Exports the exact Riemann solver for the 1D Euler equations of an ideal polytropic gas: the
//! primary Newton iteration seeded from the two-rarefaction approximation
//! ([riemann_exact]), and the Toro/PVRS-seeded variant ([riemann_exact_toro]), which implement
//! the same contract and must be behaviourally interchangeable.

use color_eyre::{eyre::Context, Result};

use crate::errorhandling::StepError;

/// One side's constant primitive state, as consumed by [riemann_exact] and [linear_grp](crate::grp::linear_grp).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimitiveState {
    /// Density, must be strictly positive.
    pub rho: f64,
    /// Velocity.
    pub u: f64,
    /// Pressure, must be strictly positive.
    pub p: f64,
}

/// Identifies whether a non-linear wave resolved to a shock or a rarefaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveKind {
    /// The star pressure exceeds the adjacent constant state's pressure.
    Shock,
    /// The star pressure is at most the adjacent constant state's pressure.
    Rarefaction,
}

/// The star-region velocity and pressure, plus the wave kind on each side, returned by the exact
/// Riemann solver.
#[derive(Debug, Clone, Copy)]
pub struct RiemannSolution {
    /// Star-region velocity `u*`.
    pub u_star: f64,
    /// Star-region pressure `p*`.
    pub p_star: f64,
    /// `wave_kind[0]` classifies the left wave, `wave_kind[1]` the right wave.
    pub wave_kind: [WaveKind; 2],
}

/// Sound speed `c = sqrt(gamma * p / rho)` of an ideal polytropic gas.
pub fn sound_speed(gamma: f64, rho: f64, p: f64) -> f64 {
    return (gamma * p / rho).sqrt();
}

/// `A_K = 2 / ((gamma + 1) * rho_K)`, the shock-branch coefficient of the wave function.
fn wave_coeff_a(gamma: f64, rho_k: f64) -> f64 {
    return 2.0 / ((gamma + 1.0) * rho_k);
}

/// `B_K = p_K * (gamma - 1) / (gamma + 1)`, the shock-branch coefficient of the wave function.
fn wave_coeff_b(gamma: f64, p_k: f64) -> f64 {
    return p_k * (gamma - 1.0) / (gamma + 1.0);
}

/// Evaluates the non-linear wave function `f_K(p)` and its derivative `f_K'(p)` for one side.
///
/// `pub(crate)` so [crate::grp::linear_grp] can share the exact nonlinear wave functions of
/// §4.1 for its own one-step Newton update, per §4.2's contract.
pub(crate) fn wave_function(gamma: f64, p: f64, side: PrimitiveState, c_k: f64) -> (f64, f64) {
    let PrimitiveState { rho: rho_k, p: p_k, .. } = side;
    if p > p_k {
        // shock branch
        let a_k = wave_coeff_a(gamma, rho_k);
        let b_k = wave_coeff_b(gamma, p_k);
        let sqrt_term = (a_k / (p + b_k)).sqrt();
        let f = (p - p_k) * sqrt_term;
        let df = sqrt_term * (1.0 - 0.5 * (p - p_k) / (b_k + p));
        return (f, df);
    }
    // rarefaction branch
    let power = (gamma - 1.0) / (2.0 * gamma);
    let f = (2.0 * c_k / (gamma - 1.0)) * ((p / p_k).powf(power) - 1.0);
    let df = 1.0 / (rho_k * c_k) * (p / p_k).powf(-(gamma + 1.0) / (2.0 * gamma));
    return (f, df);
}

/// Two-rarefaction approximation to the star pressure, used to seed [riemann_exact]'s Newton
/// iteration, and [crate::grp::linear_grp]'s single Newton update.
pub(crate) fn two_rarefaction_guess(gamma: f64, l: PrimitiveState, r: PrimitiveState, c_l: f64, c_r: f64) -> f64 {
    let power = (gamma - 1.0) / (2.0 * gamma);
    let numerator = c_l + c_r - 0.5 * (gamma - 1.0) * (r.u - l.u);
    let denominator = c_l / l.p.powf(power) + c_r / r.p.powf(power);
    return (numerator / denominator).powf(2.0 * gamma / (gamma - 1.0));
}

/// Primitive Variable Riemann Solver estimate of the star pressure, used to seed
/// [riemann_exact_toro]'s Newton iteration.
fn pvrs_guess(l: PrimitiveState, r: PrimitiveState, c_l: f64, c_r: f64) -> f64 {
    return 0.5 * (l.p + r.p) - 0.125 * (r.u - l.u) * (l.rho + r.rho) * (c_l + c_r);
}

/// Runs the shared Newton iteration for the star pressure, starting from `p0`.
///
/// Returns `(p_star, iterations)` on convergence; an `Err` wraps a [StepError::RiemannFail] when
/// Newton diverges, fails to converge within `n`, or the result is non-finite or at/below `eps`.
fn newton_iterate(
    gamma: f64,
    l: PrimitiveState,
    r: PrimitiveState,
    c_l: f64,
    c_r: f64,
    p0: f64,
    eps: f64,
    tol: f64,
    n: usize,
) -> Result<f64> {
    let mut p = p0.max(eps);
    for _ in 0..n {
        let (f_l, df_l) = wave_function(gamma, p, l, c_l);
        let (f_r, df_r) = wave_function(gamma, p, r, c_r);
        let f_total = f_l + f_r + (r.u - l.u);
        let df_total = df_l + df_r;
        if !df_total.is_finite() || df_total == 0.0 {
            return Err(StepError::RiemannFail { step: 0, cell: None }).context("Newton derivative degenerated in riemann solve");
        }
        let mut p_next = p - f_total / df_total;
        if !p_next.is_finite() {
            return Err(StepError::RiemannFail { step: 0, cell: None }).context("Newton iterate turned non-finite in riemann solve");
        }
        if p_next <= eps {
            p_next = 0.5 * (p + eps);
        }
        let relative_change = (p_next - p).abs() / (0.5 * (p_next + p));
        p = p_next;
        if relative_change < tol {
            if p <= eps {
                return Err(StepError::RiemannFail { step: 0, cell: None }).context("star pressure at or below eps in riemann solve");
            }
            return Ok(p);
        }
    }
    return Err(StepError::RiemannFail { step: 0, cell: None }).context("Newton iteration failed to converge within N steps in riemann solve");
}

/// Classifies the wave on one side from the sign of `p_star - p_k`, per the contract in §4.1:
/// strictly greater is a shock, at most equal is a rarefaction.
pub(crate) fn classify_wave(p_star: f64, p_k: f64) -> WaveKind {
    if p_star > p_k {
        return WaveKind::Shock;
    }
    return WaveKind::Rarefaction;
}

fn finish(gamma: f64, l: PrimitiveState, r: PrimitiveState, c_l: f64, c_r: f64, p_star: f64) -> Result<RiemannSolution> {
    let (f_l, _) = wave_function(gamma, p_star, l, c_l);
    let (f_r, _) = wave_function(gamma, p_star, r, c_r);
    let u_star = 0.5 * (l.u + r.u) + 0.5 * (f_r - f_l);
    if !u_star.is_finite() {
        return Err(StepError::RiemannFail { step: 0, cell: None }).context("u_star turned non-finite in riemann solve");
    }
    return Ok(RiemannSolution {
        u_star,
        p_star,
        wave_kind: [classify_wave(p_star, l.p), classify_wave(p_star, r.p)],
    });
}

fn validate_inputs(gamma: f64, l: PrimitiveState, r: PrimitiveState, c_l: f64, c_r: f64, eps: f64, tol: f64, n: usize) -> Result<()> {
    if !(gamma.is_finite() && gamma > 1.0) {
        return Err(StepError::Config(format!("gamma must be > 1, got {gamma}")).into());
    }
    if n == 0 {
        return Err(StepError::Config("N (Newton iteration cap) must be > 0".to_string()).into());
    }
    if !(tol.is_finite() && tol > 0.0) {
        return Err(StepError::Config(format!("tol must be > 0, got {tol}")).into());
    }
    let all_finite = [l.rho, l.u, l.p, r.rho, r.u, r.p, c_l, c_r, eps].iter().all(|x| x.is_finite());
    if !all_finite || l.rho <= 0.0 || l.p <= 0.0 || r.rho <= 0.0 || r.p <= 0.0 || c_l <= 0.0 || c_r <= 0.0 {
        return Err(StepError::RiemannFail { step: 0, cell: None }).context("non-finite or non-positive input to riemann solve");
    }
    return Ok(());
}

/// Solves the exact Riemann problem for two constant states of an ideal polytropic gas, seeding
/// Newton's method from the two-rarefaction approximation.
///
/// # Arguments
///
/// * `gamma` - ratio of specific heats
/// * `l`, `r` - left/right primitive states
/// * `c_l`, `c_r` - precomputed sound speeds for `l`, `r`
/// * `eps` - positivity/zero threshold
/// * `tol` - Newton relative-change convergence tolerance
/// * `n` - maximum number of Newton iterations
pub fn riemann_exact(
    gamma: f64,
    l: PrimitiveState,
    r: PrimitiveState,
    c_l: f64,
    c_r: f64,
    eps: f64,
    tol: f64,
    n: usize,
) -> Result<RiemannSolution> {
    validate_inputs(gamma, l, r, c_l, c_r, eps, tol, n)?;
    let p0 = two_rarefaction_guess(gamma, l, r, c_l, c_r).max(eps);
    let p_star = newton_iterate(gamma, l, r, c_l, c_r, p0, eps, tol, n)
        .context("Calling newton_iterate in riemann_exact")?;
    return finish(gamma, l, r, c_l, c_r, p_star);
}

/// Solves the same contract as [riemann_exact], but seeds Newton's method from the Primitive
/// Variable Riemann Solver (PVRS) estimate instead of the two-rarefaction approximation. Must be
/// behaviourally interchangeable with [riemann_exact].
pub fn riemann_exact_toro(
    gamma: f64,
    l: PrimitiveState,
    r: PrimitiveState,
    c_l: f64,
    c_r: f64,
    eps: f64,
    tol: f64,
    n: usize,
) -> Result<RiemannSolution> {
    validate_inputs(gamma, l, r, c_l, c_r, eps, tol, n)?;
    let p0 = pvrs_guess(l, r, c_l, c_r).max(eps);
    let p_star = newton_iterate(gamma, l, r, c_l, c_r, p0, eps, tol, n)
        .context("Calling newton_iterate in riemann_exact_toro")?;
    return finish(gamma, l, r, c_l, c_r, p_star);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    const GAMMA: f64 = 1.4;
    const EPS: f64 = 1e-9;
    const TOL: f64 = 1e-10;
    const NMAX: usize = 100;

    fn sound_speed(gamma: f64, state: PrimitiveState) -> f64 {
        return (gamma * state.p / state.rho).sqrt();
    }

    proptest! {
        // P1: equal velocity and pressure on both sides -> trivial contact, both waves rarefaction.
        #[test]
        fn p1_trivial_contact(rho_l in 0.1f64..10.0, rho_r in 0.1f64..10.0, u in -5.0f64..5.0, p in 0.1f64..10.0) {
            let l = PrimitiveState { rho: rho_l, u, p };
            let r = PrimitiveState { rho: rho_r, u, p };
            let c_l = sound_speed(GAMMA, l);
            let c_r = sound_speed(GAMMA, r);
            let sol = riemann_exact(GAMMA, l, r, c_l, c_r, EPS, TOL, NMAX).unwrap();
            prop_assert!((sol.u_star - u).abs() < 1e-6);
            prop_assert!((sol.p_star - p).abs() < 1e-6 * p.max(1.0));
            prop_assert_eq!(sol.wave_kind[0], WaveKind::Rarefaction);
            prop_assert_eq!(sol.wave_kind[1], WaveKind::Rarefaction);
        }
    }

    #[test]
    fn p2_strong_shock_tube() {
        let l = PrimitiveState { rho: 1.0, u: 0.0, p: 1000.0 };
        let r = PrimitiveState { rho: 1.0, u: 0.0, p: 0.01 };
        let c_l = sound_speed(GAMMA, l);
        let c_r = sound_speed(GAMMA, r);
        let sol = riemann_exact(GAMMA, l, r, c_l, c_r, EPS, TOL, NMAX).unwrap();
        assert_eq!(sol.wave_kind[0], WaveKind::Rarefaction);
        assert_eq!(sol.wave_kind[1], WaveKind::Shock);
        assert!(r.p < sol.p_star && sol.p_star < l.p);
    }

    #[test]
    fn primary_and_toro_variant_agree() {
        let l = PrimitiveState { rho: 1.0, u: 0.0, p: 1.0 };
        let r = PrimitiveState { rho: 0.125, u: 0.0, p: 0.1 };
        let c_l = sound_speed(GAMMA, l);
        let c_r = sound_speed(GAMMA, r);
        let a = riemann_exact(GAMMA, l, r, c_l, c_r, EPS, TOL, NMAX).unwrap();
        let b = riemann_exact_toro(GAMMA, l, r, c_l, c_r, EPS, TOL, NMAX).unwrap();
        assert_relative_eq!(a.u_star, b.u_star, max_relative = 1e-6);
        assert_relative_eq!(a.p_star, b.p_star, max_relative = 1e-6);
        assert_eq!(a.wave_kind, b.wave_kind);
    }

    #[test]
    fn sod_shock_tube_post_shock_density() {
        let l = PrimitiveState { rho: 1.0, u: 0.0, p: 1.0 };
        let r = PrimitiveState { rho: 0.125, u: 0.0, p: 0.1 };
        let c_l = sound_speed(GAMMA, l);
        let c_r = sound_speed(GAMMA, r);
        let sol = riemann_exact(GAMMA, l, r, c_l, c_r, EPS, TOL, NMAX).unwrap();
        // classic Sod star pressure is ~0.30313
        assert_relative_eq!(sol.p_star, 0.30313, max_relative = 1e-3);
        assert_relative_eq!(sol.u_star, 0.92745, max_relative = 1e-3);
    }
}
