//! Temperature dependence on top of an isothermal gas law (GASVISCT,
//! GASDENT, SPECHEAT).

use super::GasPvt;
use crate::error::{PvtError, PvtResult};
use crate::law::GasPvtLaw;
use crate::tabulated::Tabulated1D;
use crate::thermal::{ThermalExpansion, internal_energy_curve, internal_energy_disabled};
use crate::validation::{region, region_mut};
use bo_core::{CompIdx, Real};

/// Latent heat folded into the SPECHEAT integral of the gas [J/kg].
pub const GAS_LATENT_HEAT: Real = 480.6e3;

#[derive(Debug, Clone, Default)]
struct ThermalGasRegion {
    viscosity: Option<Tabulated1D>,
    expansion: Option<ThermalExpansion>,
    internal_energy: Option<Tabulated1D>,
    hvap: Real,
}

#[derive(Debug, Clone, Default)]
pub struct ThermalGasPvt {
    isothermal: Box<GasPvt>,
    regions: Vec<ThermalGasRegion>,
}

impl ThermalGasPvt {
    pub fn new(isothermal: GasPvt) -> PvtResult<Self> {
        if matches!(isothermal, GasPvt::ThermalGas(_)) {
            return Err(PvtError::invalid_arg(
                "the isothermal gas law of a thermal wrapper cannot be thermal",
            ));
        }
        let regions = vec![ThermalGasRegion::default(); isothermal.num_regions()];
        Ok(Self {
            isothermal: Box::new(isothermal),
            regions,
        })
    }

    pub fn isothermal(&self) -> &GasPvt {
        &self.isothermal
    }

    /// GASVISCT: the gas viscosity as a function of temperature only.
    pub fn set_viscosity_curve(&mut self, reg: usize, temperatures: &[Real], viscosities: &[Real]) -> PvtResult<()> {
        let curve = Tabulated1D::from_samples(temperatures, viscosities)?;
        region_mut(&mut self.regions, reg)?.viscosity = Some(curve);
        Ok(())
    }

    pub fn set_thermal_expansion(&mut self, reg: usize, expansion: ThermalExpansion) -> PvtResult<()> {
        region_mut(&mut self.regions, reg)?.expansion = Some(expansion);
        Ok(())
    }

    /// SPECHEAT columns (temperature, cv of gas).
    pub fn set_specific_heat(&mut self, reg: usize, temperatures: &[Real], cv: &[Real]) -> PvtResult<()> {
        let curve = internal_energy_curve(temperatures, cv, GAS_LATENT_HEAT)?;
        region_mut(&mut self.regions, reg)?.internal_energy = Some(curve);
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

    fn thermal_viscosity(&self, reg: usize, t: Real) -> PvtResult<Option<Real>> {
        match &region(&self.regions, reg)?.viscosity {
            Some(curve) => Ok(Some(curve.eval(t, true)?)),
            None => Ok(None),
        }
    }
}

impl GasPvtLaw for ThermalGasPvt {
    fn num_regions(&self) -> usize {
        self.regions.len()
    }

    fn inverse_formation_volume_factor(
        &self,
        reg: usize,
        t: Real,
        p: Real,
        rv: Real,
        rvw: Real,
    ) -> PvtResult<Real> {
        let b = self.isothermal.inverse_formation_volume_factor(reg, t, p, rv, rvw)?;
        self.scale_density(reg, t, b)
    }

    fn saturated_inverse_formation_volume_factor(&self, reg: usize, t: Real, p: Real) -> PvtResult<Real> {
        let b = self.isothermal.saturated_inverse_formation_volume_factor(reg, t, p)?;
        self.scale_density(reg, t, b)
    }

    fn viscosity(&self, reg: usize, t: Real, p: Real, rv: Real, rvw: Real) -> PvtResult<Real> {
        match self.thermal_viscosity(reg, t)? {
            Some(mu) => Ok(mu),
            None => self.isothermal.viscosity(reg, t, p, rv, rvw),
        }
    }

    fn saturated_viscosity(&self, reg: usize, t: Real, p: Real) -> PvtResult<Real> {
        match self.thermal_viscosity(reg, t)? {
            Some(mu) => Ok(mu),
            None => self.isothermal.saturated_viscosity(reg, t, p),
        }
    }

    fn saturated_oil_vaporization_factor(&self, reg: usize, t: Real, p: Real) -> PvtResult<Real> {
        self.isothermal.saturated_oil_vaporization_factor(reg, t, p)
    }

    fn saturated_oil_vaporization_factor_with_history(
        &self,
        reg: usize,
        t: Real,
        p: Real,
        so: Real,
        max_so: Real,
    ) -> PvtResult<Real> {
        self.isothermal
            .saturated_oil_vaporization_factor_with_history(reg, t, p, so, max_so)
    }

    fn saturated_water_vaporization_factor(&self, reg: usize, t: Real, p: Real) -> PvtResult<Real> {
        self.isothermal.saturated_water_vaporization_factor(reg, t, p)
    }

    fn saturated_water_vaporization_factor_salt(
        &self,
        reg: usize,
        t: Real,
        p: Real,
        salt: Real,
    ) -> PvtResult<Real> {
        self.isothermal
            .saturated_water_vaporization_factor_salt(reg, t, p, salt)
    }

    fn saturation_pressure(&self, reg: usize, t: Real, rv: Real) -> PvtResult<Real> {
        self.isothermal.saturation_pressure(reg, t, rv)
    }

    fn internal_energy(&self, reg: usize, t: Real, _p: Real, _rv: Real, _rvw: Real) -> PvtResult<Real> {
        region(&self.regions, reg)?
            .internal_energy
            .as_ref()
            .ok_or_else(|| internal_energy_disabled("gas"))?
            .eval(t, true)
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
