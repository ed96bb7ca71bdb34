//! Wet humid gas (PVTGW + PVTG): vaporized oil and water.
//!
//! PVTGW describes the gas at saturated Rv as a function of Rvw, PVTG the gas
//! at saturated Rvw as a function of Rv. Gas with saturated Rv uses the first,
//! everything else the second.

use super::tables::{RwgSaltRecord, VaporizedRatioTables, salt_dependent_rvw};
use crate::error::{PvtError, PvtResult};
use crate::law::GasPvtLaw;
use crate::saturation::apply_vap_par;
use crate::tabulated::UniformXTabulated2D;
use crate::undersaturated::PvtxRecord;
use crate::validation::{region, region_mut};
use bo_core::{Real, SATURATION_EPSILON};
use std::sync::Arc;

#[derive(Debug, Clone)]
struct WetHumidGasRegion {
    /// PVTGW: at saturated Rv, inner axis Rvw.
    rv_saturated: VaporizedRatioTables,
    /// PVTG: at saturated Rvw, inner axis Rv.
    rvw_saturated: VaporizedRatioTables,
    salt_rvw: Option<UniformXTabulated2D>,
}

#[derive(Debug, Clone, Default)]
pub struct WetHumidGasPvt {
    regions: Arc<Vec<WetHumidGasRegion>>,
    vap_par1: Real,
}

impl WetHumidGasPvt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matching PVTGW and PVTG record lists, one pair per region.
    pub fn from_regions(pvtgw: &[Vec<PvtxRecord>], pvtg: &[Vec<PvtxRecord>]) -> PvtResult<Self> {
        if pvtgw.len() != pvtg.len() {
            return Err(PvtError::invalid_table(format!(
                "Table sizes mismatch. PVTGW: {}, PVTG: {}",
                pvtgw.len(),
                pvtg.len()
            )));
        }
        let mut law = Self::new();
        for (gw, g) in pvtgw.iter().zip(pvtg) {
            law.add_region(gw, g)?;
        }
        Ok(law)
    }

    pub fn add_region(&mut self, pvtgw: &[PvtxRecord], pvtg: &[PvtxRecord]) -> PvtResult<usize> {
        let rv_saturated = VaporizedRatioTables::from_records(pvtgw, "PVTGW")?;
        let rvw_saturated = VaporizedRatioTables::from_records(pvtg, "PVTG")?;
        let regions = Arc::make_mut(&mut self.regions);
        regions.push(WetHumidGasRegion {
            rv_saturated,
            rvw_saturated,
            salt_rvw: None,
        });
        Ok(regions.len() - 1)
    }

    pub fn set_salt_dependent_rvw(&mut self, reg: usize, records: &[RwgSaltRecord]) -> PvtResult<()> {
        let table = salt_dependent_rvw(records)?;
        region_mut(Arc::make_mut(&mut self.regions).as_mut_slice(), reg)?.salt_rvw = Some(table);
        Ok(())
    }

    pub fn vap_par1(&self) -> Real {
        self.vap_par1
    }

    fn region(&self, reg: usize) -> PvtResult<&WetHumidGasRegion> {
        region(&self.regions, reg)
    }

    fn rv_is_saturated(r: &WetHumidGasRegion, p: Real, rv: Real) -> PvtResult<bool> {
        let rv_sat = r.rvw_saturated.saturated_ratio(p)?;
        Ok(rv >= (1.0 - SATURATION_EPSILON) * rv_sat)
    }
}

impl GasPvtLaw for WetHumidGasPvt {
    fn num_regions(&self) -> usize {
        self.regions.len()
    }

    fn inverse_formation_volume_factor(
        &self,
        reg: usize,
        _t: Real,
        p: Real,
        rv: Real,
        rvw: Real,
    ) -> PvtResult<Real> {
        let r = self.region(reg)?;
        if Self::rv_is_saturated(r, p, rv)? {
            r.rv_saturated.inverse_b(p, rvw)
        } else {
            r.rvw_saturated.inverse_b(p, rv)
        }
    }

    fn saturated_inverse_formation_volume_factor(&self, reg: usize, _t: Real, p: Real) -> PvtResult<Real> {
        self.region(reg)?.rvw_saturated.saturated_inverse_b(p)
    }

    fn viscosity(&self, reg: usize, _t: Real, p: Real, rv: Real, rvw: Real) -> PvtResult<Real> {
        let r = self.region(reg)?;
        if Self::rv_is_saturated(r, p, rv)? {
            r.rv_saturated.viscosity(p, rvw)
        } else {
            r.rvw_saturated.viscosity(p, rv)
        }
    }

    fn saturated_viscosity(&self, reg: usize, _t: Real, p: Real) -> PvtResult<Real> {
        self.region(reg)?.rvw_saturated.saturated_viscosity(p)
    }

    fn saturated_oil_vaporization_factor(&self, reg: usize, _t: Real, p: Real) -> PvtResult<Real> {
        self.region(reg)?.rvw_saturated.saturated_ratio(p)
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

    fn saturated_water_vaporization_factor(&self, reg: usize, _t: Real, p: Real) -> PvtResult<Real> {
        self.region(reg)?.rv_saturated.saturated_ratio(p)
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
            None => r.rv_saturated.saturated_ratio(p),
        }
    }

    /// Dew point of gas with vaporized oil ratio `rv`.
    fn saturation_pressure(&self, reg: usize, _t: Real, rv: Real) -> PvtResult<Real> {
        self.region(reg)?.rvw_saturated.saturation_pressure(rv, "Rv")
    }

    fn set_vap_pars(&mut self, par1: Real, _par2: Real) {
        self.vap_par1 = par1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gas::tables::tests::pvtg;
    use crate::undersaturated::PvtxSample;

    fn pvtgw() -> Vec<PvtxRecord> {
        vec![
            PvtxRecord::new(
                5e6,
                vec![PvtxSample::new(2e-5, 0.0245, 1.42e-5), PvtxSample::new(0.0, 0.0247, 1.4e-5)],
            ),
            PvtxRecord::new(
                3e7,
                vec![PvtxSample::new(6e-5, 0.0044, 2.55e-5), PvtxSample::new(0.0, 0.0045, 2.5e-5)],
            ),
        ]
    }

    fn law() -> WetHumidGasPvt {
        WetHumidGasPvt::from_regions(&[pvtgw()], &[pvtg()]).unwrap()
    }

    #[test]
    fn branch_follows_rv_saturation() {
        let law = law();
        // saturated Rv: PVTGW over Rvw
        let wet = law.inverse_formation_volume_factor(0, 350.0, 3e7, 2.5e-4, 6e-5).unwrap();
        assert!((wet - 1.0 / 0.0044).abs() < 1e-9);
        // undersaturated Rv: PVTG over Rv
        let lean = law.inverse_formation_volume_factor(0, 350.0, 3e7, 0.0, 6e-5).unwrap();
        assert!((lean - 1.0 / 0.0046).abs() < 1e-9);
        let mu = law.viscosity(0, 350.0, 3e7, 0.0, 0.0).unwrap();
        assert!((mu - 2.3e-5).abs() < 1e-15);
    }

    #[test]
    fn saturated_ratios_come_from_both_tables() {
        let law = law();
        assert!((law.saturated_oil_vaporization_factor(0, 350.0, 3e7).unwrap() - 2.5e-4).abs() < 1e-16);
        assert!((law.saturated_water_vaporization_factor(0, 350.0, 3e7).unwrap() - 6e-5).abs() < 1e-16);
        let inv_b = law.saturated_inverse_formation_volume_factor(0, 350.0, 3e7).unwrap();
        assert!((inv_b - 1.0 / 0.0045).abs() < 1e-9);
    }

    #[test]
    fn dew_point_inverts_rv() {
        let law = law();
        let p = law.saturation_pressure(0, 350.0, 1.8e-4).unwrap();
        assert!((law.saturated_oil_vaporization_factor(0, 350.0, p).unwrap() - 1.8e-4).abs() < 1e-12);
    }

    #[test]
    fn salt_table_applies_to_the_copy_only() {
        let original = law();
        let mut salty = original.clone();
        salty
            .set_salt_dependent_rvw(
                0,
                &[
                    RwgSaltRecord::new(5e6, vec![(0.0, 2e-5), (100.0, 1e-5)]),
                    RwgSaltRecord::new(3e7, vec![(0.0, 6e-5), (100.0, 3e-5)]),
                ],
            )
            .unwrap();
        let rvw = salty.saturated_water_vaporization_factor_salt(0, 350.0, 3e7, 50.0).unwrap();
        assert!((rvw - 4.5e-5).abs() < 1e-16);
        let unchanged = original.saturated_water_vaporization_factor_salt(0, 350.0, 3e7, 50.0).unwrap();
        assert!((unchanged - 6e-5).abs() < 1e-16);
        assert!(salty.set_salt_dependent_rvw(2, &[]).is_err());
    }

    #[test]
    fn region_counts_must_match() {
        assert!(WetHumidGasPvt::from_regions(&[pvtgw()], &[]).is_err());
    }
}
