//! `(p, B, mu)` tables of the dead phases (PVDO, PVDG).

use crate::error::{PvtError, PvtResult};
use crate::tabulated::Tabulated1D;
use bo_core::Real;

/// One row of a dead oil or dry gas table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PvdRow {
    pub p: Real,
    pub b: Real,
    pub mu: Real,
}

impl PvdRow {
    pub fn new(p: Real, b: Real, mu: Real) -> Self {
        Self { p, b, mu }
    }
}

/// `1/B(p)`, `mu(p)` and `1/(B mu)(p)` for one region.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PressureTable {
    pub inverse_b: Tabulated1D,
    pub mu: Tabulated1D,
    pub inverse_b_mu: Tabulated1D,
}

impl PressureTable {
    pub fn from_rows(rows: &[PvdRow]) -> PvtResult<Self> {
        if rows.is_empty() {
            return Err(PvtError::invalid_table("pressure table has no rows"));
        }
        if rows.iter().any(|r| !(r.b > 0.0) || !(r.mu > 0.0)) {
            return Err(PvtError::invalid_table(
                "pressure table has a non-positive formation volume factor or viscosity",
            ));
        }
        let ps: Vec<Real> = rows.iter().map(|r| r.p).collect();
        let inv_b: Vec<Real> = rows.iter().map(|r| 1.0 / r.b).collect();
        let mu: Vec<Real> = rows.iter().map(|r| r.mu).collect();
        let inv_b_mu: Vec<Real> = rows.iter().map(|r| 1.0 / (r.b * r.mu)).collect();
        Ok(Self {
            inverse_b: Tabulated1D::from_samples(&ps, &inv_b)?,
            mu: Tabulated1D::from_samples(&ps, &mu)?,
            inverse_b_mu: Tabulated1D::from_samples(&ps, &inv_b_mu)?,
        })
    }

    pub fn inverse_b(&self, p: Real) -> PvtResult<Real> {
        self.inverse_b.eval(p, true)
    }

    /// Viscosity interpolated as `(1/B) / (1/(B mu))`.
    pub fn viscosity(&self, p: Real) -> PvtResult<Real> {
        Ok(self.inverse_b.eval(p, true)? / self.inverse_b_mu.eval(p, true)?)
    }
}
