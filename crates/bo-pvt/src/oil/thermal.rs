//! Temperature dependence on top of an isothermal oil law (OILVISCT,
//! THERMEX1/OILDENT, SPECHEAT, OILJT).

use super::OilPvt;
use crate::error::{PvtError, PvtResult};
use crate::law::OilPvtLaw;
use crate::tabulated::Tabulated1D;
use crate::thermal::{
    JouleThomson, ThermalExpansion, internal_energy_curve, internal_energy_disabled,
    joule_thomson_internal_energy,
};
use crate::validation::{region, region_mut, validate_positive};
use bo_core::{CompIdx, Real};

/// Temperature at which the reference viscosity of OILVISCT is taken [K].
const VISCREF_TEMPERATURE: Real = 273.15 + 20.0;

#[derive(Debug, Clone, Default)]
struct ThermalOilRegion {
    /// OILVISCT curve and the isothermal viscosity at the VISCREF state.
    viscosity: Option<(Tabulated1D, Real)>,
    expansion: Option<ThermalExpansion>,
    internal_energy: Option<Tabulated1D>,
    /// Joule-Thomson input with the oil and gas surface densities.
    joule_thomson: Option<(JouleThomson, Real, Real)>,
    hvap: Real,
}

#[derive(Debug, Clone, Default)]
pub struct ThermalOilPvt {
    isothermal: Box<OilPvt>,
    regions: Vec<ThermalOilRegion>,
}

impl ThermalOilPvt {
    /// Wrap `isothermal`; every thermal effect starts disabled.
    pub fn new(isothermal: OilPvt) -> PvtResult<Self> {
        if matches!(isothermal, OilPvt::ThermalOil(_)) {
            return Err(PvtError::invalid_arg(
                "the isothermal oil law of a thermal wrapper cannot be thermal",
            ));
        }
        let regions = vec![ThermalOilRegion::default(); isothermal.num_regions()];
        Ok(Self {
            isothermal: Box::new(isothermal),
            regions,
        })
    }

    pub fn isothermal(&self) -> &OilPvt {
        &self.isothermal
    }

    /// OILVISCT curve of one region with its VISCREF pressure and Rs.
    pub fn set_viscosity_curve(
        &mut self,
        reg: usize,
        temperatures: &[Real],
        viscosities: &[Real],
        p_ref: Real,
        rs_ref: Real,
    ) -> PvtResult<()> {
        let curve = Tabulated1D::from_samples(temperatures, viscosities)?;
        let mu_ref = self
            .isothermal
            .viscosity(reg, VISCREF_TEMPERATURE, p_ref, rs_ref)?;
        let mu_ref = validate_positive(mu_ref, "reference viscosity")?;
        region_mut(&mut self.regions, reg)?.viscosity = Some((curve, mu_ref));
        Ok(())
    }

    pub fn set_thermal_expansion(&mut self, reg: usize, expansion: ThermalExpansion) -> PvtResult<()> {
        region_mut(&mut self.regions, reg)?.expansion = Some(expansion);
        Ok(())
    }

    /// SPECHEAT columns (temperature, cv of oil).
    pub fn set_specific_heat(&mut self, reg: usize, temperatures: &[Real], cv: &[Real]) -> PvtResult<()> {
        let curve = internal_energy_curve(temperatures, cv, 0.0)?;
        region_mut(&mut self.regions, reg)?.internal_energy = Some(curve);
        Ok(())
    }

    pub fn set_joule_thomson(
        &mut self,
        reg: usize,
        jt: JouleThomson,
        rho_oil_ref: Real,
        rho_gas_ref: Real,
    ) -> PvtResult<()> {
        let rho_oil_ref = validate_positive(rho_oil_ref, "oil reference density")?;
        region_mut(&mut self.regions, reg)?.joule_thomson = Some((jt, rho_oil_ref, rho_gas_ref));
        Ok(())
    }

    pub fn set_hvap(&mut self, reg: usize, hvap: Real) -> PvtResult<()> {
        region_mut(&mut self.regions, reg)?.hvap = hvap;
        Ok(())
    }

    fn scale_density(&self, reg: usize, t: Real, b: Real) -> PvtResult<Real> {
        Ok(match region(&self.regions, reg)?.expansion {
            Some(e) => b / e.volume_factor(t),
            None => b,
        })
    }

    fn scale_viscosity(&self, reg: usize, t: Real, mu: Real) -> PvtResult<Real> {
        match &region(&self.regions, reg)?.viscosity {
            Some((curve, mu_ref)) => Ok(curve.eval(t, true)? / mu_ref * mu),
            None => Ok(mu),
        }
    }
}

impl OilPvtLaw for ThermalOilPvt {
    fn num_regions(&self) -> usize {
        self.regions.len()
    }

    fn inverse_formation_volume_factor(&self, reg: usize, t: Real, p: Real, rs: Real) -> PvtResult<Real> {
        let b = self.isothermal.inverse_formation_volume_factor(reg, t, p, rs)?;
        self.scale_density(reg, t, b)
    }

    fn saturated_inverse_formation_volume_factor(&self, reg: usize, t: Real, p: Real) -> PvtResult<Real> {
        let b = self.isothermal.saturated_inverse_formation_volume_factor(reg, t, p)?;
        self.scale_density(reg, t, b)
    }

    fn viscosity(&self, reg: usize, t: Real, p: Real, rs: Real) -> PvtResult<Real> {
        let mu = self.isothermal.viscosity(reg, t, p, rs)?;
        self.scale_viscosity(reg, t, mu)
    }

    fn saturated_viscosity(&self, reg: usize, t: Real, p: Real) -> PvtResult<Real> {
        let mu = self.isothermal.saturated_viscosity(reg, t, p)?;
        self.scale_viscosity(reg, t, mu)
    }

    fn saturated_gas_dissolution_factor(&self, reg: usize, t: Real, p: Real) -> PvtResult<Real> {
        self.isothermal.saturated_gas_dissolution_factor(reg, t, p)
    }

    fn saturated_gas_dissolution_factor_with_history(
        &self,
        reg: usize,
        t: Real,
        p: Real,
        so: Real,
        max_so: Real,
    ) -> PvtResult<Real> {
        self.isothermal
            .saturated_gas_dissolution_factor_with_history(reg, t, p, so, max_so)
    }

    fn saturation_pressure(&self, reg: usize, t: Real, rs: Real) -> PvtResult<Real> {
        self.isothermal.saturation_pressure(reg, t, rs)
    }

    fn internal_energy(&self, reg: usize, t: Real, p: Real, rs: Real) -> PvtResult<Real> {
        let r = region(&self.regions, reg)?;
        let u = r
            .internal_energy
            .as_ref()
            .ok_or_else(|| internal_energy_disabled("oil"))?;
        let Some((jt, rho_o, rho_g)) = r.joule_thomson else {
            return u.eval(t, true);
        };
        let t_ref = r.expansion.map_or(0.0, |e| e.t_ref);
        joule_thomson_internal_energy(u, t, p, t_ref, jt, r.expansion, "oil", |pi| {
            Ok(self.inverse_formation_volume_factor(reg, t, pi, rs)? * (rho_o + rs * rho_g))
        })
    }

    fn diffusion_coefficient(&self, t: Real, p: Real, comp: CompIdx) -> PvtResult<Real> {
        self.isothermal.diffusion_coefficient(t, p, comp)
    }

    fn hvap(&self, reg: usize) -> PvtResult<Real> {
        Ok(region(&self.regions, reg)?.hvap)
    }

    fn mixing_energy(&self) -> bool {
        true
    }

    fn set_vap_pars(&mut self, par1: Real, par2: Real) {
        self.isothermal.set_vap_pars(par1, par2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oil::{DeadOilPvt, LiveOilPvt};
    use crate::pressure_table::PvdRow;

    fn dead() -> OilPvt {
        DeadOilPvt::from_regions(&[vec![PvdRow::new(1e5, 1.2, 1e-3), PvdRow::new(3e7, 1.1, 1.5e-3)]])
            .unwrap()
            .into()
    }

    #[test]
    fn disabled_effects_pass_through() {
        let iso = dead();
        let law = ThermalOilPvt::new(iso.clone()).unwrap();
        assert_eq!(law.num_regions(), 1);
        assert_eq!(
            law.inverse_formation_volume_factor(0, 400.0, 1e7, 0.0).unwrap(),
            iso.inverse_formation_volume_factor(0, 400.0, 1e7, 0.0).unwrap()
        );
        assert_eq!(
            law.viscosity(0, 400.0, 1e7, 0.0).unwrap(),
            iso.viscosity(0, 400.0, 1e7, 0.0).unwrap()
        );
        let err = law.internal_energy(0, 400.0, 1e7, 0.0).unwrap_err();
        assert!(err.is_not_implemented());
        assert!(law.mixing_energy());
        assert_eq!(law.hvap(0).unwrap(), 0.0);
    }

    #[test]
    fn viscosity_follows_the_curve() {
        let iso = dead();
        let mut law = ThermalOilPvt::new(iso.clone()).unwrap();
        law.set_viscosity_curve(0, &[293.15, 393.15], &[4e-3, 1e-3], 1e7, 0.0)
            .unwrap();
        let mu_iso = iso.viscosity(0, 393.15, 2e7, 0.0).unwrap();
        let mu_ref = iso.viscosity(0, 293.15, 1e7, 0.0).unwrap();
        let mu = law.viscosity(0, 393.15, 2e7, 0.0).unwrap();
        assert!((mu - 1e-3 / mu_ref * mu_iso).abs() < 1e-15);
        // the VISCREF state maps onto the curve value
        let at_ref = law.saturated_viscosity(0, 293.15, 1e7).unwrap();
        assert!((at_ref - 4e-3).abs() < 1e-15);
    }

    #[test]
    fn density_expands_with_temperature() {
        let mut law = ThermalOilPvt::new(dead()).unwrap();
        law.set_thermal_expansion(0, ThermalExpansion::new(293.15, 8e-4, 0.0))
            .unwrap();
        let cold = law.saturated_inverse_formation_volume_factor(0, 293.15, 1e7).unwrap();
        let hot = law.saturated_inverse_formation_volume_factor(0, 393.15, 1e7).unwrap();
        assert!((hot - cold / 1.08).abs() < 1e-14);
    }

    #[test]
    fn internal_energy_from_specific_heat() {
        let mut law = ThermalOilPvt::new(dead()).unwrap();
        law.set_specific_heat(0, &[300.0, 400.0], &[2000.0, 2000.0]).unwrap();
        assert_eq!(law.internal_energy(0, 350.0, 1e7, 0.0).unwrap(), 700_000.0);
        law.set_hvap(0, 3e5).unwrap();
        assert_eq!(law.hvap(0).unwrap(), 3e5);
        assert!(law.set_hvap(2, 1.0).is_err());

        law.set_joule_thomson(0, JouleThomson { p_ref: 1e5, coefficient: 1e-7 }, 800.0, 1.0)
            .unwrap();
        let u = law.internal_energy(0, 350.0, 1e7, 0.0).unwrap();
        assert!(u.is_finite() && u != 700_000.0);
    }

    #[test]
    fn vap_pars_reach_the_isothermal_law() {
        let live = LiveOilPvt::from_regions(&[crate::oil::live::tests::pvto()]).unwrap();
        let mut law = ThermalOilPvt::new(live.into()).unwrap();
        let plain = law.saturated_gas_dissolution_factor(0, 350.0, 2e7).unwrap();
        law.set_vap_pars(0.0, 1.0);
        let damped = law
            .saturated_gas_dissolution_factor_with_history(0, 350.0, 2e7, 0.2, 0.8)
            .unwrap();
        assert!((damped - 0.25 * plain).abs() < 1e-10);
    }

    #[test]
    fn nested_thermal_is_rejected() {
        let inner = ThermalOilPvt::new(dead()).unwrap();
        assert!(ThermalOilPvt::new(inner.into()).is_err());
    }
}
