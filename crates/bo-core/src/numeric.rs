/// Floating point type used throughout the PVT crates
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

/// Relative tolerance of the saturated/undersaturated branch selection.
pub const SATURATION_EPSILON: Real = 1e-10;

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// `true` if `r` is within the saturation tolerance of (or above) `r_sat`.
#[inline]
pub fn at_saturation(r: Real, r_sat: Real) -> bool {
    r >= (1.0 - SATURATION_EPSILON) * r_sat
}
