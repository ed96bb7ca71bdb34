//! Live oil (PVTO): dissolved gas ratio Rs with undersaturated branches.
//!
//! The two-dimensional tables use Rs as the column axis and oil pressure as
//! the sample axis. The first sample of every column is the saturated state,
//! so interpolation between columns follows the offset of the first samples.

use crate::error::{PvtError, PvtResult};
use crate::law::OilPvtLaw;
use crate::saturation::{apply_vap_par, invert_saturated_ratio, saturation_pressure_guess};
use crate::tabulated::{InterpolationPolicy, Tabulated1D, UniformXTabulated2D};
use crate::undersaturated::{PvtxRecord, build_undersaturated};
use crate::validation::region;
use bo_core::Real;
use std::sync::Arc;

/// Tables of one PVTO region.
#[derive(Debug, Clone)]
struct LiveOilRegion {
    inverse_b: UniformXTabulated2D,
    inverse_b_mu: UniformXTabulated2D,
    saturated_inverse_b: Tabulated1D,
    saturated_inverse_b_mu: Tabulated1D,
    /// Rs_sat(p).
    saturated_rs: Tabulated1D,
    /// Starting guess of the bubble point inversion, p(Rs).
    saturation_pressure: Tabulated1D,
}

impl LiveOilRegion {
    fn from_records(records: &[PvtxRecord]) -> PvtResult<Self> {
        if records.len() < 2 {
            return Err(PvtError::invalid_table(
                "Saturated PVTO must have at least two rows.",
            ));
        }

        let mut sat_p = Vec::with_capacity(records.len());
        let mut sat_rs = Vec::with_capacity(records.len());
        let mut sat_inv_b = Vec::with_capacity(records.len());
        let mut sat_inv_b_mu = Vec::with_capacity(records.len());
        for record in records {
            let sat = record.saturated()?;
            sat_p.push(sat.y);
            sat_rs.push(record.x);
            sat_inv_b.push(1.0 / sat.b);
            sat_inv_b_mu.push(1.0 / (sat.b * sat.mu));
        }

        let tables = build_undersaturated(
            records,
            InterpolationPolicy::LeftExtreme,
            "PVTO tables are invalid: The last table must exhibit at least one entry for undersaturated oil!",
        )?;
        let inverse_b_mu = tables.inverse_b_mu()?;

        let saturated_rs = Tabulated1D::from_samples(&sat_p, &sat_rs)?;
        let saturation_pressure = saturation_pressure_guess(&saturated_rs)?;

        Ok(Self {
            inverse_b: tables.inverse_b,
            inverse_b_mu,
            saturated_inverse_b: Tabulated1D::from_samples(&sat_p, &sat_inv_b)?,
            saturated_inverse_b_mu: Tabulated1D::from_samples(&sat_p, &sat_inv_b_mu)?,
            saturated_rs,
            saturation_pressure,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct LiveOilPvt {
    regions: Arc<Vec<LiveOilRegion>>,
    vap_par2: Real,
}

impl LiveOilPvt {
    pub fn new() -> Self {
        Self::default()
    }

    /// One list of PVTO records per region, ordered by increasing Rs.
    pub fn from_regions(regions: &[Vec<PvtxRecord>]) -> PvtResult<Self> {
        let mut law = Self::new();
        for records in regions {
            law.add_region(records)?;
        }
        Ok(law)
    }

    pub fn add_region(&mut self, records: &[PvtxRecord]) -> PvtResult<usize> {
        let table = LiveOilRegion::from_records(records)?;
        let regions = Arc::make_mut(&mut self.regions);
        regions.push(table);
        Ok(regions.len() - 1)
    }

    pub fn vap_par2(&self) -> Real {
        self.vap_par2
    }

    fn region(&self, reg: usize) -> PvtResult<&LiveOilRegion> {
        region(&self.regions, reg)
    }
}

impl OilPvtLaw for LiveOilPvt {
    fn num_regions(&self) -> usize {
        self.regions.len()
    }

    fn inverse_formation_volume_factor(&self, reg: usize, _t: Real, p: Real, rs: Real) -> PvtResult<Real> {
        self.region(reg)?.inverse_b.eval(rs, p, true)
    }

    fn saturated_inverse_formation_volume_factor(&self, reg: usize, _t: Real, p: Real) -> PvtResult<Real> {
        self.region(reg)?.saturated_inverse_b.eval(p, true)
    }

    fn viscosity(&self, reg: usize, _t: Real, p: Real, rs: Real) -> PvtResult<Real> {
        let r = self.region(reg)?;
        Ok(r.inverse_b.eval(rs, p, true)? / r.inverse_b_mu.eval(rs, p, true)?)
    }

    fn saturated_viscosity(&self, reg: usize, _t: Real, p: Real) -> PvtResult<Real> {
        let r = self.region(reg)?;
        Ok(r.saturated_inverse_b.eval(p, true)? / r.saturated_inverse_b_mu.eval(p, true)?)
    }

    fn saturated_gas_dissolution_factor(&self, reg: usize, _t: Real, p: Real) -> PvtResult<Real> {
        self.region(reg)?.saturated_rs.eval(p, true)
    }

    fn saturated_gas_dissolution_factor_with_history(
        &self,
        reg: usize,
        t: Real,
        p: Real,
        so: Real,
        max_so: Real,
    ) -> PvtResult<Real> {
        let rs_sat = self.saturated_gas_dissolution_factor(reg, t, p)?;
        Ok(apply_vap_par(rs_sat, so, max_so, self.vap_par2))
    }

    fn saturation_pressure(&self, reg: usize, _t: Real, rs: Real) -> PvtResult<Real> {
        let r = self.region(reg)?;
        invert_saturated_ratio(&r.saturated_rs, &r.saturation_pressure, rs, "Rs")
    }

    fn set_vap_pars(&mut self, _par1: Real, par2: Real) {
        self.vap_par2 = par2;
    }
}
