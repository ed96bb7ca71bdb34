use crate::error::{PvtError, PvtResult};
use bo_core::Real;

/// Per-region lookup with a defined error instead of a panic.
#[inline]
pub(crate) fn region<T>(items: &[T], region: usize) -> PvtResult<&T> {
    items.get(region).ok_or(PvtError::RegionOutOfRange {
        region,
        num_regions: items.len(),
    })
}

#[inline]
pub(crate) fn region_mut<T>(items: &mut [T], region: usize) -> PvtResult<&mut T> {
    let num_regions = items.len();
    items.get_mut(region).ok_or(PvtError::RegionOutOfRange {
        region,
        num_regions,
    })
}

pub(crate) fn validate_positive(value: Real, what: &'static str) -> PvtResult<Real> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PvtError::NonPhysical { what })
    }
}

pub(crate) fn validate_finite(value: Real, what: &'static str) -> PvtResult<Real> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PvtError::NonPhysical { what })
    }
}
