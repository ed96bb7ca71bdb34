//! Dead brine (PVTWSALT): PVTW coefficients as functions of the salt
//! concentration.

use crate::error::{PvtError, PvtResult};
use crate::law::WaterPvtLaw;
use crate::tabulated::Tabulated1D;
use crate::validation::{region, validate_finite, validate_positive};
use bo_core::Real;
use std::sync::Arc;

/// One PVTWSALT row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrineRow {
    /// Salt concentration [kg/m³].
    pub salt: Real,
    pub b_ref: Real,
    pub compressibility: Real,
    pub mu_ref: Real,
    pub viscosibility: Real,
}

#[derive(Debug, Clone)]
struct BrineRegion {
    p_ref: Real,
    b_ref: Tabulated1D,
    compressibility: Tabulated1D,
    mu_ref: Tabulated1D,
    viscosibility: Tabulated1D,
}

struct BrineCoefficients {
    b_ref: Real,
    compressibility: Real,
    mu_ref: Real,
    viscosibility: Real,
}

#[derive(Debug, Clone, Default)]
pub struct ConstantCompressibilityBrinePvt {
    regions: Arc<Vec<BrineRegion>>,
}

impl ConstantCompressibilityBrinePvt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_regions(regions: &[(Real, Vec<BrineRow>)]) -> PvtResult<Self> {
        let mut law = Self::new();
        for (p_ref, rows) in regions {
            law.add_region(*p_ref, rows)?;
        }
        Ok(law)
    }

    /// Reference pressure and rows ordered by increasing salt concentration.
    pub fn add_region(&mut self, p_ref: Real, rows: &[BrineRow]) -> PvtResult<usize> {
        validate_finite(p_ref, "reference pressure")?;
        if rows.is_empty() {
            return Err(PvtError::invalid_table("PVTWSALT table needs at least one row"));
        }
        for row in rows {
            validate_positive(row.b_ref, "reference formation volume factor")?;
            validate_positive(row.mu_ref, "reference viscosity")?;
        }
        let column = |f: fn(&BrineRow) -> Real| Tabulated1D::from_pairs(rows.iter().map(|r| (r.salt, f(r))));
        let region = BrineRegion {
            p_ref,
            b_ref: column(|r| r.b_ref)?,
            compressibility: column(|r| r.compressibility)?,
            mu_ref: column(|r| r.mu_ref)?,
            viscosibility: column(|r| r.viscosibility)?,
        };
        let regions = Arc::make_mut(&mut self.regions);
        regions.push(region);
        Ok(regions.len() - 1)
    }

    pub fn reference_pressure(&self, reg: usize) -> PvtResult<Real> {
        Ok(region(&self.regions, reg)?.p_ref)
    }

    fn coefficients(&self, reg: usize, salt: Real) -> PvtResult<(Real, BrineCoefficients)> {
        let r = region(&self.regions, reg)?;
        Ok((
            r.p_ref,
            BrineCoefficients {
                b_ref: r.b_ref.eval(salt, true)?,
                compressibility: r.compressibility.eval(salt, true)?,
                mu_ref: r.mu_ref.eval(salt, true)?,
                viscosibility: r.viscosibility.eval(salt, true)?,
            },
        ))
    }

    fn inverse_b(&self, reg: usize, p: Real, salt: Real) -> PvtResult<Real> {
        let (p_ref, c) = self.coefficients(reg, salt)?;
        let x = c.compressibility * (p - p_ref);
        Ok((1.0 + x * (1.0 + x / 2.0)) / c.b_ref)
    }

    fn brine_viscosity(&self, reg: usize, p: Real, salt: Real) -> PvtResult<Real> {
        let (p_ref, c) = self.coefficients(reg, salt)?;
        let y = (c.compressibility - c.viscosibility) * (p - p_ref);
        let b = self.inverse_b(reg, p, salt)?;
        Ok(c.mu_ref * c.b_ref * b / (1.0 + y * (1.0 + y / 2.0)))
    }
}

impl WaterPvtLaw for ConstantCompressibilityBrinePvt {
    fn num_regions(&self) -> usize {
        self.regions.len()
    }

    fn inverse_formation_volume_factor(
        &self,
        reg: usize,
        _t: Real,
        p: Real,
        _rsw: Real,
        salt: Real,
    ) -> PvtResult<Real> {
        self.inverse_b(reg, p, salt)
    }

    fn saturated_inverse_formation_volume_factor(
        &self,
        reg: usize,
        _t: Real,
        p: Real,
        salt: Real,
    ) -> PvtResult<Real> {
        self.inverse_b(reg, p, salt)
    }

    fn viscosity(&self, reg: usize, _t: Real, p: Real, _rsw: Real, salt: Real) -> PvtResult<Real> {
        self.brine_viscosity(reg, p, salt)
    }

    fn saturated_viscosity(&self, reg: usize, _t: Real, p: Real, salt: Real) -> PvtResult<Real> {
        self.brine_viscosity(reg, p, salt)
    }

    fn saturated_gas_dissolution_factor(
        &self,
        reg: usize,
        _t: Real,
        _p: Real,
        _salt: Real,
    ) -> PvtResult<Real> {
        region(&self.regions, reg)?;
        Ok(0.0)
    }

    fn saturation_pressure(&self, reg: usize, _t: Real, _rsw: Real, _salt: Real) -> PvtResult<Real> {
        region(&self.regions, reg)?;
        Ok(0.0)
    }
}
