//! Wet gas (PVTG): gas with vaporized oil Rv.

use super::tables::VaporizedRatioTables;
use crate::error::PvtResult;
use crate::law::GasPvtLaw;
use crate::saturation::apply_vap_par;
use crate::undersaturated::PvtxRecord;
use crate::validation::region;
use bo_core::Real;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct WetGasPvt {
    regions: Arc<Vec<VaporizedRatioTables>>,
    vap_par1: Real,
}

impl WetGasPvt {
    pub fn new() -> Self {
        Self::default()
    }

    /// One list of PVTG records per region, ordered by increasing pressure.
    pub fn from_regions(regions: &[Vec<PvtxRecord>]) -> PvtResult<Self> {
        let mut law = Self::new();
        for records in regions {
            law.add_region(records)?;
        }
        Ok(law)
    }

    pub fn add_region(&mut self, records: &[PvtxRecord]) -> PvtResult<usize> {
        let tables = VaporizedRatioTables::from_records(records, "PVTG")?;
        let regions = Arc::make_mut(&mut self.regions);
        regions.push(tables);
        Ok(regions.len() - 1)
    }

    pub fn vap_par1(&self) -> Real {
        self.vap_par1
    }

    fn tables(&self, reg: usize) -> PvtResult<&VaporizedRatioTables> {
        region(&self.regions, reg)
    }
}

impl GasPvtLaw for WetGasPvt {
    fn num_regions(&self) -> usize {
        self.regions.len()
    }

    fn inverse_formation_volume_factor(
        &self,
        reg: usize,
        _t: Real,
        p: Real,
        rv: Real,
        _rvw: Real,
    ) -> PvtResult<Real> {
        self.tables(reg)?.inverse_b(p, rv)
    }

    fn saturated_inverse_formation_volume_factor(&self, reg: usize, _t: Real, p: Real) -> PvtResult<Real> {
        self.tables(reg)?.saturated_inverse_b(p)
    }

    fn viscosity(&self, reg: usize, _t: Real, p: Real, rv: Real, _rvw: Real) -> PvtResult<Real> {
        self.tables(reg)?.viscosity(p, rv)
    }

    fn saturated_viscosity(&self, reg: usize, _t: Real, p: Real) -> PvtResult<Real> {
        self.tables(reg)?.saturated_viscosity(p)
    }

    fn saturated_oil_vaporization_factor(&self, reg: usize, _t: Real, p: Real) -> PvtResult<Real> {
        self.tables(reg)?.saturated_ratio(p)
    }

    fn saturated_oil_vaporization_factor_with_history(
        &self,
        reg: usize,
        t: Real,
        p: Real,
        so: Real,
        max_so: Real,
    ) -> PvtResult<Real> {
        let rv_sat = self.saturated_oil_vaporization_factor(reg, t, p)?;
        Ok(apply_vap_par(rv_sat, so, max_so, self.vap_par1))
    }

    fn saturated_water_vaporization_factor(&self, reg: usize, _t: Real, _p: Real) -> PvtResult<Real> {
        self.tables(reg)?;
        Ok(0.0)
    }

    fn saturation_pressure(&self, reg: usize, _t: Real, rv: Real) -> PvtResult<Real> {
        self.tables(reg)?.saturation_pressure(rv, "Rv")
    }

    fn set_vap_pars(&mut self, par1: Real, _par2: Real) {
        self.vap_par1 = par1;
    }
}
