//! Double-precision 2D vectors.
//!
//! Add, subtract, scale and length come straight from [`glam::DVec2`]; this
//! module only adds the checked normalization the caster relies on.

use crate::error::{Error, Result};

pub type Vec2 = glam::DVec2;

/// Unit vector, or [`Error::DegenerateDirection`] for a zero (or non-finite)
/// input.
pub fn normalize(v: Vec2) -> Result<Vec2> {
    v.try_normalize().ok_or(Error::DegenerateDirection)
}

/// Unit vector pointing along `angle` (radians).
#[inline]
pub fn from_angle(angle: f64) -> Vec2 {
    Vec2::from_angle(angle)
}
