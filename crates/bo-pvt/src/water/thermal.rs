//! Temperature dependence on top of an isothermal water law (WATDENT,
//! WATVISCT with VISCREF, SPECHEAT, WATJT).
//!
//! Density and the viscosity reference both use the PVTW record of the
//! region, whatever the isothermal law is.

use super::WaterPvt;
use crate::error::{PvtError, PvtResult};
use crate::law::WaterPvtLaw;
use crate::oil::ConstantCompressibilityParams;
use crate::tabulated::Tabulated1D;
use crate::thermal::{
    JouleThomson, ThermalExpansion, internal_energy_curve, internal_energy_disabled,
    joule_thomson_internal_energy,
};
use crate::validation::{region, region_mut, validate_positive};
use bo_core::{CompIdx, Real};

#[derive(Debug, Clone, Default)]
struct ThermalWaterRegion {
    /// WATVISCT curve and the PVTW viscosity at the VISCREF pressure.
    viscosity: Option<(Tabulated1D, Real)>,
    /// WATDENT with the PVTW record it applies to.
    density: Option<(ThermalExpansion, ConstantCompressibilityParams)>,
    internal_energy: Option<Tabulated1D>,
    /// Joule-Thomson input with the water surface density.
    joule_thomson: Option<(JouleThomson, Real)>,
    hvap: Real,
}

#[derive(Debug, Clone, Default)]
pub struct ThermalWaterPvt {
    isothermal: Box<WaterPvt>,
    regions: Vec<ThermalWaterRegion>,
}

impl ThermalWaterPvt {
    pub fn new(isothermal: WaterPvt) -> PvtResult<Self> {
        if matches!(isothermal, WaterPvt::ThermalWater(_)) {
            return Err(PvtError::invalid_arg(
                "the isothermal water law of a thermal wrapper cannot be thermal",
            ));
        }
        let regions = vec![ThermalWaterRegion::default(); isothermal.num_regions()];
        Ok(Self {
            isothermal: Box::new(isothermal),
            regions,
        })
    }

    pub fn isothermal(&self) -> &WaterPvt {
        &self.isothermal
    }

    /// WATVISCT curve of one region; `p_viscref` is the VISCREF pressure.
    pub fn set_viscosity_curve(
        &mut self,
        reg: usize,
        temperatures: &[Real],
        viscosities: &[Real],
        p_viscref: Real,
        pvtw: ConstantCompressibilityParams,
    ) -> PvtResult<()> {
        let curve = Tabulated1D::from_samples(temperatures, viscosities)?;
        let pvtw = pvtw.validated()?;
        let x = -pvtw.viscosibility * (p_viscref - pvtw.p_ref);
        let mu_ref = validate_positive(pvtw.mu_ref / (1.0 + x + 0.5 * x * x), "reference viscosity")?;
        region_mut(&mut self.regions, reg)?.viscosity = Some((curve, mu_ref));
        Ok(())
    }

    /// WATDENT of one region.
    pub fn set_thermal_density(
        &mut self,
        reg: usize,
        expansion: ThermalExpansion,
        pvtw: ConstantCompressibilityParams,
    ) -> PvtResult<()> {
        let pvtw = pvtw.validated()?;
        region_mut(&mut self.regions, reg)?.density = Some((expansion, pvtw));
        Ok(())
    }

    /// SPECHEAT columns (temperature, cv of water).
    pub fn set_specific_heat(&mut self, reg: usize, temperatures: &[Real], cv: &[Real]) -> PvtResult<()> {
        let curve = internal_energy_curve(temperatures, cv, 0.0)?;
        region_mut(&mut self.regions, reg)?.internal_energy = Some(curve);
        Ok(())
    }

    pub fn set_joule_thomson(&mut self, reg: usize, jt: JouleThomson, rho_water_ref: Real) -> PvtResult<()> {
        let rho_water_ref = validate_positive(rho_water_ref, "water reference density")?;
        region_mut(&mut self.regions, reg)?.joule_thomson = Some((jt, rho_water_ref));
        Ok(())
    }

    pub fn set_hvap(&mut self, reg: usize, hvap: Real) -> PvtResult<()> {
        region_mut(&mut self.regions, reg)?.hvap = hvap;
        Ok(())
    }

    fn thermal_inverse_b(&self, reg: usize, t: Real, p: Real) -> PvtResult<Option<Real>> {
        Ok(region(&self.regions, reg)?.density.map(|(expansion, pvtw)| {
            let x = pvtw.compressibility * (p - pvtw.p_ref);
            1.0 / ((1.0 - x) * expansion.volume_factor(t) * pvtw.b_ref)
        }))
    }

    fn scale_viscosity(&self, reg: usize, t: Real, mu: Real) -> PvtResult<Real> {
        match &region(&self.regions, reg)?.viscosity {
            Some((curve, mu_ref)) => Ok(mu * curve.eval(t, true)? / mu_ref),
            None => Ok(mu),
        }
    }
}

impl WaterPvtLaw for ThermalWaterPvt {
    fn num_regions(&self) -> usize {
        self.regions.len()
    }

    fn inverse_formation_volume_factor(
        &self,
        reg: usize,
        t: Real,
        p: Real,
        rsw: Real,
        salt: Real,
    ) -> PvtResult<Real> {
        match self.thermal_inverse_b(reg, t, p)? {
            Some(b) => Ok(b),
            None => self.isothermal.inverse_formation_volume_factor(reg, t, p, rsw, salt),
        }
    }

    fn saturated_inverse_formation_volume_factor(
        &self,
        reg: usize,
        t: Real,
        p: Real,
        salt: Real,
    ) -> PvtResult<Real> {
        self.inverse_formation_volume_factor(reg, t, p, 0.0, salt)
    }

    fn viscosity(&self, reg: usize, t: Real, p: Real, rsw: Real, salt: Real) -> PvtResult<Real> {
        let mu = self.isothermal.viscosity(reg, t, p, rsw, salt)?;
        self.scale_viscosity(reg, t, mu)
    }

    fn saturated_viscosity(&self, reg: usize, t: Real, p: Real, salt: Real) -> PvtResult<Real> {
        let mu = self.isothermal.saturated_viscosity(reg, t, p, salt)?;
        self.scale_viscosity(reg, t, mu)
    }

    fn saturated_gas_dissolution_factor(
        &self,
        reg: usize,
        t: Real,
        p: Real,
        salt: Real,
    ) -> PvtResult<Real> {
        self.isothermal.saturated_gas_dissolution_factor(reg, t, p, salt)
    }

    fn saturation_pressure(&self, reg: usize, t: Real, rsw: Real, salt: Real) -> PvtResult<Real> {
        self.isothermal.saturation_pressure(reg, t, rsw, salt)
    }

    fn internal_energy(&self, reg: usize, t: Real, p: Real, rsw: Real, salt: Real) -> PvtResult<Real> {
        let r = region(&self.regions, reg)?;
        let u = r
            .internal_energy
            .as_ref()
            .ok_or_else(|| internal_energy_disabled("water"))?;
        let Some((jt, rho_w)) = r.joule_thomson else {
            return u.eval(t, true);
        };
        let expansion = r.density.map(|(e, _)| e);
        let t_ref = expansion.map_or(0.0, |e| e.t_ref);
        joule_thomson_internal_energy(u, t, p, t_ref, jt, expansion, "water", |pi| {
            Ok(self.inverse_formation_volume_factor(reg, t, pi, rsw, salt)? * rho_w)
        })
    }

    fn diffusion_coefficient(&self, t: Real, p: Real, comp: CompIdx) -> PvtResult<Real> {
        self.isothermal.diffusion_coefficient(t, p, comp)
    }

    fn hvap(&self, reg: usize) -> PvtResult<Real> {
        Ok(region(&self.regions, reg)?.hvap)
    }

    fn set_vap_pars(&mut self, par1: Real, par2: Real) {
        self.isothermal.set_vap_pars(par1, par2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::water::ConstantCompressibilityWaterPvt;
    use crate::water::constant_compressibility::tests::pvtw;

    fn iso() -> WaterPvt {
        ConstantCompressibilityWaterPvt::from_regions(&[pvtw()]).unwrap().into()
    }

    #[test]
    fn watdent_density() {
        let mut law = ThermalWaterPvt::new(iso()).unwrap();
        law.set_thermal_density(0, ThermalExpansion::new(293.15, 3e-4, 3e-6), pvtw())
            .unwrap();
        let t = 353.15;
        let p = 3e7;
        let x = 4.5e-10 * 1e7;
        let y: Real = 60.0;
        let expected = 1.0 / ((1.0 - x) * (1.0 + 3e-4 * y + 3e-6 * y * y) * 1.02);
        let b = law.inverse_formation_volume_factor(0, t, p, 0.0, 0.0).unwrap();
        assert!((b - expected).abs() < 1e-12);
        assert_eq!(b, law.saturated_inverse_formation_volume_factor(0, t, p, 0.0).unwrap());
    }

    #[test]
    fn watvisct_scales_isothermal_viscosity() {
        let iso = iso();
        let mut law = ThermalWaterPvt::new(iso.clone()).unwrap();
        law.set_viscosity_curve(0, &[293.15, 373.15], &[1e-3, 3e-4], 2e7, pvtw())
            .unwrap();
        // VISCREF at the PVTW reference pressure: muRef is the PVTW viscosity
        let mu_iso = iso.viscosity(0, 373.15, 2.5e7, 0.0, 0.0).unwrap();
        let mu = law.viscosity(0, 373.15, 2.5e7, 0.0, 0.0).unwrap();
        assert!((mu - mu_iso * 3e-4 / 5e-4).abs() < 1e-15);
    }

    #[test]
    fn internal_energy_and_flags() {
        let mut law = ThermalWaterPvt::new(iso()).unwrap();
        let err = law.internal_energy(0, 350.0, 1e7, 0.0, 0.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Not implemented: Requested the internal energy of water but it is disabled"
        );
        law.set_specific_heat(0, &[300.0, 400.0], &[4000.0, 4000.0]).unwrap();
        assert_eq!(law.internal_energy(0, 350.0, 1e7, 0.0, 0.0).unwrap(), 1_400_000.0);
        assert!(!law.mixing_energy());
        assert_eq!(law.saturated_gas_dissolution_factor(0, 350.0, 1e7, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn joule_thomson_needs_density_or_coefficient() {
        let mut law = ThermalWaterPvt::new(iso()).unwrap();
        law.set_specific_heat(0, &[300.0, 400.0], &[4000.0, 4000.0]).unwrap();
        law.set_joule_thomson(0, JouleThomson { p_ref: 1e5, coefficient: 0.0 }, 1000.0)
            .unwrap();
        assert!(law.internal_energy(0, 350.0, 1e7, 0.0, 0.0).unwrap_err().is_not_implemented());
        law.set_thermal_density(0, ThermalExpansion::new(293.15, 3e-4, 0.0), pvtw())
            .unwrap();
        assert!(law.internal_energy(0, 350.0, 1e7, 0.0, 0.0).unwrap().is_finite());
    }
}
