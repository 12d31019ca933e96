// Copyright (c) 2026
// License: MIT

//! Exports the linear Generalized Riemann Problem (GRP) solver: given two one-sided states and
//! their spatial slopes, [linear_grp] returns both the instantaneous interface state and its
//! material time-derivative, which is what lets the Eulerian GRP stepper reach second order in
//! time without a Runge-Kutta substepping scheme.

use color_eyre::{eyre::Context, Result};

use crate::errorhandling::StepError;
use crate::riemann::{classify_wave, sound_speed, two_rarefaction_guess, wave_function, PrimitiveState, WaveKind};

/// One side of a GRP: the primitive state at the interface together with its one-sided spatial
/// slope for each primitive variable.
#[derive(Debug, Clone, Copy)]
pub struct OneSidedState {
    /// Density at the interface.
    pub rho: f64,
    /// Velocity at the interface.
    pub u: f64,
    /// Pressure at the interface.
    pub p: f64,
    /// One-sided spatial slope of density.
    pub s_rho: f64,
    /// One-sided spatial slope of velocity.
    pub s_u: f64,
    /// One-sided spatial slope of pressure.
    pub s_p: f64,
}

impl OneSidedState {
    fn primitive(&self) -> PrimitiveState {
        return PrimitiveState { rho: self.rho, u: self.u, p: self.p };
    }
}

/// A primitive-variable triple, used for both the instantaneous interface state `mid` and its
/// material time-derivative `dire`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrpTriple {
    /// Density (or its time-derivative).
    pub rho: f64,
    /// Velocity (or its time-derivative).
    pub u: f64,
    /// Pressure (or its time-derivative).
    pub p: f64,
}

/// The result of a linear GRP solve: the instantaneous interface state at `t = 0+`, and its
/// material time-derivative along the contact.
#[derive(Debug, Clone, Copy)]
pub struct GrpSolution {
    /// Instantaneous interface state `(rho*, u*, p*)`.
    pub mid: GrpTriple,
    /// Material time-derivative `(d(rho)/dt, du/dt, dp/dt)` evaluated along the contact.
    pub dire: GrpTriple,
}

/// Post-wave density on one side, given the resolved star pressure and the wave classification.
fn star_density(gamma: f64, side: PrimitiveState, p_star: f64, kind: WaveKind) -> f64 {
    return match kind {
        WaveKind::Shock => {
            let ratio = p_star / side.p;
            let gp1 = (gamma + 1.0) / (gamma - 1.0);
            side.rho * (ratio * gp1 + 1.0) / (gp1 + ratio)
        },
        WaveKind::Rarefaction => side.rho * (p_star / side.p).powf(1.0 / gamma),
    };
}

/// Left-moving shock speed, Toro (1997) eq. 4.52.
fn shock_speed_left(gamma: f64, l: PrimitiveState, c_l: f64, p_star: f64) -> f64 {
    return l.u - c_l * (((gamma + 1.0) / (2.0 * gamma)) * (p_star / l.p) + (gamma - 1.0) / (2.0 * gamma)).sqrt();
}

/// Right-moving shock speed, mirrored from [shock_speed_left].
fn shock_speed_right(gamma: f64, r: PrimitiveState, c_r: f64, p_star: f64) -> f64 {
    return r.u + c_r * (((gamma + 1.0) / (2.0 * gamma)) * (p_star / r.p) + (gamma - 1.0) / (2.0 * gamma)).sqrt();
}

/// Samples the left-wave structure (between the left state and the star-left state) at `S=0`,
/// following Toro (1997) §4.5's exact-solver sampling procedure.
fn sample_left(gamma: f64, l: PrimitiveState, c_l: f64, u_star: f64, p_star: f64, kind: WaveKind) -> GrpTriple {
    match kind {
        WaveKind::Shock => {
            let s_shock = shock_speed_left(gamma, l, c_l, p_star);
            if 0.0 < s_shock {
                return GrpTriple { rho: l.rho, u: l.u, p: l.p };
            }
            let rho_star = star_density(gamma, l, p_star, kind);
            return GrpTriple { rho: rho_star, u: u_star, p: p_star };
        },
        WaveKind::Rarefaction => {
            let c_star = c_l * (p_star / l.p).powf((gamma - 1.0) / (2.0 * gamma));
            let s_head = l.u - c_l;
            let s_tail = u_star - c_star;
            if 0.0 < s_head {
                return GrpTriple { rho: l.rho, u: l.u, p: l.p };
            }
            if 0.0 > s_tail {
                let rho_star = star_density(gamma, l, p_star, kind);
                return GrpTriple { rho: rho_star, u: u_star, p: p_star };
            }
            // sonic/transonic point inside the fan, Toro (1997) eq. 4.56.
            let base = 2.0 / (gamma + 1.0) + (gamma - 1.0) / ((gamma + 1.0) * c_l) * l.u;
            let rho = l.rho * base.powf(2.0 / (gamma - 1.0));
            let u = (2.0 / (gamma + 1.0)) * (c_l + 0.5 * (gamma - 1.0) * l.u);
            let p = l.p * base.powf(2.0 * gamma / (gamma - 1.0));
            return GrpTriple { rho, u, p };
        },
    }
}

/// Samples the right-wave structure at `S=0`, mirrored from [sample_left].
fn sample_right(gamma: f64, r: PrimitiveState, c_r: f64, u_star: f64, p_star: f64, kind: WaveKind) -> GrpTriple {
    match kind {
        WaveKind::Shock => {
            let s_shock = shock_speed_right(gamma, r, c_r, p_star);
            if 0.0 > s_shock {
                return GrpTriple { rho: r.rho, u: r.u, p: r.p };
            }
            let rho_star = star_density(gamma, r, p_star, kind);
            return GrpTriple { rho: rho_star, u: u_star, p: p_star };
        },
        WaveKind::Rarefaction => {
            let c_star = c_r * (p_star / r.p).powf((gamma - 1.0) / (2.0 * gamma));
            let s_head = r.u + c_r;
            let s_tail = u_star + c_star;
            if 0.0 < s_tail {
                let rho_star = star_density(gamma, r, p_star, kind);
                return GrpTriple { rho: rho_star, u: u_star, p: p_star };
            }
            if 0.0 > s_head {
                return GrpTriple { rho: r.rho, u: r.u, p: r.p };
            }
            let base = 2.0 / (gamma + 1.0) - (gamma - 1.0) / ((gamma + 1.0) * c_r) * r.u;
            let rho = r.rho * base.powf(2.0 / (gamma - 1.0));
            let u = (2.0 / (gamma + 1.0)) * (-c_r + 0.5 * (gamma - 1.0) * r.u);
            let p = r.p * base.powf(2.0 * gamma / (gamma - 1.0));
            return GrpTriple { rho, u, p };
        },
    }
}

/// Generalized acoustic impedance of one wave: `rho_K * c_K` in the linear limit, the
/// Rankine-Hugoniot mass flux for a finite shock. Shared with the exact solver's Newton
/// derivative, since `f_K'(p) = 1/z_K`.
fn impedance(gamma: f64, side: PrimitiveState, c_k: f64, p_star: f64, kind: WaveKind) -> f64 {
    return match kind {
        WaveKind::Shock => {
            let ratio = p_star / side.p;
            side.rho * c_k * (((gamma + 1.0) / (2.0 * gamma)) * ratio + (gamma - 1.0) / (2.0 * gamma)).sqrt()
        },
        WaveKind::Rarefaction => side.rho * c_k,
    };
}

/// Characteristic speed used to translate the upstream spatial slope into a time derivative:
/// the shock's own trajectory speed for a shock wave, the fan's tail characteristic for a
/// rarefaction.
fn closure_speed_left(gamma: f64, l: PrimitiveState, c_l: f64, u_star: f64, p_star: f64, kind: WaveKind) -> f64 {
    return match kind {
        WaveKind::Shock => shock_speed_left(gamma, l, c_l, p_star),
        WaveKind::Rarefaction => u_star - c_l * (p_star / l.p).powf((gamma - 1.0) / (2.0 * gamma)),
    };
}

fn closure_speed_right(gamma: f64, r: PrimitiveState, c_r: f64, u_star: f64, p_star: f64, kind: WaveKind) -> f64 {
    return match kind {
        WaveKind::Shock => shock_speed_right(gamma, r, c_r, p_star),
        WaveKind::Rarefaction => u_star + c_r * (p_star / r.p).powf((gamma - 1.0) / (2.0 * gamma)),
    };
}

/// Solves the linear GRP problem: a one-step Newton star state from the exact nonlinear wave
/// functions, a wave-pattern-aware density sample, and a linearized-characteristic closure for
/// the material time-derivatives.
///
/// # Arguments
///
/// * `gamma` - ratio of specific heats
/// * `l`, `r` - left/right one-sided states and their spatial slopes
/// * `eps` - positivity/zero threshold
pub fn linear_grp(gamma: f64, l: OneSidedState, r: OneSidedState, eps: f64) -> Result<GrpSolution> {
    let c_l = sound_speed(gamma, l.rho, l.p);
    let c_r = sound_speed(gamma, r.rho, r.p);

    // one-step Newton star state, per §4.2: a single Newton update from the two-rarefaction
    // initial guess using the exact nonlinear wave functions of §4.1, not iterated to
    // convergence the way riemann_exact's own Newton loop is.
    let p0 = two_rarefaction_guess(gamma, l.primitive(), r.primitive(), c_l, c_r).max(eps);
    let (f_l0, df_l0) = wave_function(gamma, p0, l.primitive(), c_l);
    let (f_r0, df_r0) = wave_function(gamma, p0, r.primitive(), c_r);
    let df_total = df_l0 + df_r0;
    if !df_total.is_finite() || df_total == 0.0 {
        return Err(StepError::RiemannFail { step: 0, cell: None }).context("Newton derivative degenerated in linear_grp");
    }
    let p_star = (p0 - (f_l0 + f_r0 + (r.u - l.u)) / df_total).max(eps);
    if !p_star.is_finite() || p_star <= eps {
        return Err(StepError::RiemannFail { step: 0, cell: None }).context("star pressure at or below eps in linear_grp");
    }
    let kind_l = classify_wave(p_star, l.p);
    let kind_r = classify_wave(p_star, r.p);
    let (f_l, _) = wave_function(gamma, p_star, l.primitive(), c_l);
    let (f_r, _) = wave_function(gamma, p_star, r.primitive(), c_r);
    let u_star = 0.5 * (l.u + r.u) + 0.5 * (f_r - f_l);
    if !u_star.is_finite() {
        return Err(StepError::RiemannFail { step: 0, cell: None }).context("u_star turned non-finite in linear_grp");
    }

    let mid = if u_star >= 0.0 {
        sample_left(gamma, l.primitive(), c_l, u_star, p_star, kind_l)
    } else {
        sample_right(gamma, r.primitive(), c_r, u_star, p_star, kind_r)
    };
    if !(mid.rho.is_finite() && mid.u.is_finite() && mid.p.is_finite()) || mid.rho <= eps || mid.p <= eps {
        return Err(StepError::RiemannFail { step: 0, cell: None }).context("non-finite or non-positive mid state in linear_grp");
    }

    let z_l = impedance(gamma, l.primitive(), c_l, p_star, kind_l);
    let z_r = impedance(gamma, r.primitive(), c_r, p_star, kind_r);
    let lambda_l = closure_speed_left(gamma, l.primitive(), c_l, u_star, p_star, kind_l);
    let lambda_r = closure_speed_right(gamma, r.primitive(), c_r, u_star, p_star, kind_r);

    // linearised Riemann-invariant derivative system:
    //   dp/dt + z_l * du/dt = -lambda_l * (s_p_l + z_l * s_u_l)
    //   dp/dt - z_r * du/dt = -lambda_r * (s_p_r - z_r * s_u_r)
    let rhs_l = -lambda_l * (l.s_p + z_l * l.s_u);
    let rhs_r = -lambda_r * (r.s_p - z_r * r.s_u);
    let z_sum = z_l + z_r;
    if !(z_sum.is_finite()) || z_sum <= 0.0 {
        return Err(StepError::RiemannFail { step: 0, cell: None }).context("degenerate acoustic impedance sum in linear_grp");
    }
    let du_dt = (rhs_l - rhs_r) / z_sum;
    let dp_dt = rhs_l - z_l * du_dt;

    // density time-derivative follows the side the mid state was sampled from, via the
    // one-sided continuity equation d(rho)/dt = -lambda*(s_rho) - rho*(s_u), evaluated at the
    // side's own slopes so that it is consistent with an isentropic/shock-consistent mid.rho.
    let d_rho_dt = if u_star >= 0.0 {
        -lambda_l * l.s_rho - mid.rho * l.s_u
    } else {
        -lambda_r * r.s_rho - mid.rho * r.s_u
    };

    let dire = GrpTriple { rho: d_rho_dt, u: du_dt, p: dp_dt };
    if !(dire.rho.is_finite() && dire.u.is_finite() && dire.p.is_finite()) {
        return Err(StepError::RiemannFail { step: 0, cell: None }).context("non-finite material derivative in linear_grp");
    }
    return Ok(GrpSolution { mid, dire });
}
