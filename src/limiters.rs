// Copyright (c) 2026
// License: MIT

//! Exports the slope-limiter primitives [minmod2] and [minmod3] used by the GRP stepper's slope
//! reconstruction.

/// Two-argument minmod limiter.
///
/// Returns `0.0` when `a` and `b` disagree in sign (or either is exactly zero with the other
/// nonzero); otherwise returns the argument of smallest magnitude, carrying the common sign.
pub fn minmod2(a: f64, b: f64) -> f64 {
    if a * b <= 0.0 {
        return 0.0;
    }
    return a.signum() * a.abs().min(b.abs());
}

/// Three-argument minmod limiter.
///
/// Returns `0.0` unless `a`, `b`, and `c` all share the same sign, in which case it returns the
/// argument of smallest magnitude, carrying that common sign.
pub fn minmod3(a: f64, b: f64, c: f64) -> f64 {
    if a > 0.0 && b > 0.0 && c > 0.0 {
        return a.min(b).min(c);
    }
    if a < 0.0 && b < 0.0 && c < 0.0 {
        return a.max(b).max(c);
    }
    return 0.0;
}
