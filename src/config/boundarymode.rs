// Copyright (c) 2026
// License: MIT

//! Exports [BoundaryMode], the tag selecting how ghost states are refreshed each step.

use crate::errorhandling::StepError;

/// Selects the rule used to refresh ghost states (and, for the GRP stepper, ghost slopes) on
/// both ends of the mesh every step.
///
/// Mirrors the five boundary tags a conforming driver may pass in, keyed on the same integer
/// codes the original Fortran/C implementation used, so that [BoundaryMode::try_from] can parse
/// an externally-supplied tag and reject anything else as a configuration error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BoundaryMode {
    /// Tag -1: ghost states are captured once from cells `0` and `m-1` at `t=0` and never
    /// refreshed again.
    FrozenInitial,

    /// Tag -2: ghost velocity is the negated interior velocity; pressure and density are
    /// copied; the velocity slope (if any) is sign-flipped.
    Reflective,

    /// Tag -4: zero-gradient; ghost state equals the adjacent interior state, slopes are zero.
    Free,

    /// Tag -5: left ghost state is drawn from the rightmost interior cell and vice versa.
    Periodic,

    /// Tag -24: [BoundaryMode::Reflective] on the west/left end, [BoundaryMode::Free] on the
    /// east/right end.
    ReflectiveLeftFreeRight,
}

impl TryFrom<i32> for BoundaryMode {
    type Error = StepError;

    fn try_from(tag: i32) -> Result<Self, Self::Error> {
        return match tag {
            -1 => Ok(BoundaryMode::FrozenInitial),
            -2 => Ok(BoundaryMode::Reflective),
            -4 => Ok(BoundaryMode::Free),
            -5 => Ok(BoundaryMode::Periodic),
            -24 => Ok(BoundaryMode::ReflectiveLeftFreeRight),
            _ => Err(StepError::Config(format!(
                "unrecognised boundary tag {tag}; expected one of -1, -2, -4, -5, -24"
            ))),
        };
    }
}
