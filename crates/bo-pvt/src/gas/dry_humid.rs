//! Dry humid gas (PVTGW): gas with vaporized water Rvw but no vaporized oil.

use super::tables::{RwgSaltRecord, VaporizedRatioTables, salt_dependent_rvw};
use crate::error::PvtResult;
use crate::law::GasPvtLaw;
use crate::tabulated::UniformXTabulated2D;
use crate::undersaturated::PvtxRecord;
use crate::validation::{region, region_mut};
use bo_core::Real;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct DryHumidGasRegion {
    tables: VaporizedRatioTables,
    /// RWGSALT, saturated Rvw over (p, salt).
    salt_rvw: Option<UniformXTabulated2D>,
}

#[derive(Debug, Clone, Default)]
pub struct DryHumidGasPvt {
    regions: Arc<Vec<DryHumidGasRegion>>,
}

impl DryHumidGasPvt {
    pub fn new() -> Self {
        Self::default()
    }

    /// One list of PVTGW records per region, ordered by increasing pressure.
    pub fn from_regions(regions: &[Vec<PvtxRecord>]) -> PvtResult<Self> {
        let mut law = Self::new();
        for records in regions {
            law.add_region(records)?;
        }
        Ok(law)
    }

    pub fn add_region(&mut self, records: &[PvtxRecord]) -> PvtResult<usize> {
        let tables = VaporizedRatioTables::from_records(records, "PVTGW")?;
        let regions = Arc::make_mut(&mut self.regions);
        regions.push(DryHumidGasRegion {
            tables,
            salt_rvw: None,
        });
        Ok(regions.len() - 1)
    }

    /// Make the saturated Rvw of one region depend on the salt concentration.
    pub fn set_salt_dependent_rvw(&mut self, reg: usize, records: &[RwgSaltRecord]) -> PvtResult<()> {
        let table = salt_dependent_rvw(records)?;
        region_mut(Arc::make_mut(&mut self.regions).as_mut_slice(), reg)?.salt_rvw = Some(table);
        Ok(())
    }

    fn region(&self, reg: usize) -> PvtResult<&DryHumidGasRegion> {
        region(&self.regions, reg)
    }
}

impl GasPvtLaw for DryHumidGasPvt {
    fn num_regions(&self) -> usize {
        self.regions.len()
    }

    fn inverse_formation_volume_factor(
        &self,
        reg: usize,
        _t: Real,
        p: Real,
        _rv: Real,
        rvw: Real,
    ) -> PvtResult<Real> {
        self.region(reg)?.tables.inverse_b(p, rvw)
    }

    fn saturated_inverse_formation_volume_factor(&self, reg: usize, _t: Real, p: Real) -> PvtResult<Real> {
        self.region(reg)?.tables.saturated_inverse_b(p)
    }

    fn viscosity(&self, reg: usize, _t: Real, p: Real, _rv: Real, rvw: Real) -> PvtResult<Real> {
        self.region(reg)?.tables.viscosity(p, rvw)
    }

    fn saturated_viscosity(&self, reg: usize, _t: Real, p: Real) -> PvtResult<Real> {
        self.region(reg)?.tables.saturated_viscosity(p)
    }

    fn saturated_oil_vaporization_factor(&self, reg: usize, _t: Real, _p: Real) -> PvtResult<Real> {
        self.region(reg)?;
        Ok(0.0)
    }

    fn saturated_water_vaporization_factor(&self, reg: usize, _t: Real, p: Real) -> PvtResult<Real> {
        self.region(reg)?.tables.saturated_ratio(p)
    }

    fn saturated_water_vaporization_factor_salt(
        &self,
        reg: usize,
        _t: Real,
        p: Real,
        salt: Real,
    ) -> PvtResult<Real> {
        let r = self.region(reg)?;
        match &r.salt_rvw {
            Some(table) => table.eval(p, salt, true),
            None => r.tables.saturated_ratio(p),
        }
    }

    /// Pressure at which `rvw` is the saturated water vaporization factor.
    fn saturation_pressure(&self, reg: usize, _t: Real, rvw: Real) -> PvtResult<Real> {
        self.region(reg)?.tables.saturation_pressure(rvw, "Rw")
    }
}
