//! Storage gas (CO2STORE / H2STORE) with vaporized water.

use crate::binary::SaltActivityModel;
use crate::brine_gas::{Co2InBrine, H2InBrine, REFERENCE_PRESSURE, REFERENCE_TEMPERATURE, SolubleGas};
use crate::components::{Brine, H2o};
use crate::error::{PvtError, PvtResult};
use crate::law::GasPvtLaw;
use crate::validation::{region, region_mut, validate_finite, validate_positive};
use bo_core::{CompIdx, Real};
use std::marker::PhantomData;

/// Water vapour contribution to the gas internal energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GasMixing {
    /// Pure gas.
    #[default]
    None,
    /// Mass weighted mix of gas and water vapour.
    Ideal,
}

impl TryFrom<i32> for GasMixing {
    type Error = PvtError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Ideal),
            _ => Err(PvtError::invalid_arg(
                "The thermal mixing model option for gas are 0 or 1",
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct StorageGasRegion {
    salinity: Real,
    brine_reference_density: Real,
    gas_reference_density: Real,
}

/// Gas phase of a brine-gas storage system.
#[derive(Debug, Clone)]
pub struct StorageGasPvt<G: SolubleGas> {
    regions: Vec<StorageGasRegion>,
    enable_vaporization: bool,
    activity_model: SaltActivityModel,
    gas_mixing: GasMixing,
    gas: PhantomData<G>,
}

pub type Co2GasPvt = StorageGasPvt<Co2InBrine>;
pub type H2GasPvt = StorageGasPvt<H2InBrine>;

impl<G: SolubleGas> Default for StorageGasPvt<G> {
    fn default() -> Self {
        Self {
            regions: Vec::new(),
            enable_vaporization: true,
            activity_model: SaltActivityModel::default(),
            gas_mixing: GasMixing::default(),
            gas: PhantomData,
        }
    }
}

impl<G: SolubleGas> StorageGasPvt<G> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_salinities(salinities: &[Real]) -> PvtResult<Self> {
        let mut law = Self::new();
        for &s in salinities {
            law.add_region(s)?;
        }
        Ok(law)
    }

    /// Add a region and compute its surface densities at the reference state.
    pub fn add_region(&mut self, salinity: Real) -> PvtResult<usize> {
        let salinity = validate_finite(salinity, "salinity")?;
        if !(0.0..1.0).contains(&salinity) {
            return Err(PvtError::invalid_arg(format!(
                "salinity must be a mass fraction in [0, 1), got {salinity}"
            )));
        }
        self.regions.push(StorageGasRegion {
            salinity,
            brine_reference_density: Brine::liquid_density(
                REFERENCE_TEMPERATURE,
                REFERENCE_PRESSURE,
                salinity,
                true,
            )?,
            gas_reference_density: G::gas_density(REFERENCE_TEMPERATURE, REFERENCE_PRESSURE)?,
        });
        Ok(self.regions.len() - 1)
    }

    pub fn set_reference_densities(&mut self, reg: usize, rho_brine: Real, rho_gas: Real) -> PvtResult<()> {
        let r = region_mut(&mut self.regions, reg)?;
        r.brine_reference_density = validate_positive(rho_brine, "brine reference density")?;
        r.gas_reference_density = validate_positive(rho_gas, "gas reference density")?;
        Ok(())
    }

    pub fn set_enable_vaporization_water(&mut self, yes: bool) {
        self.enable_vaporization = yes;
    }

    pub fn set_activity_model_salt(&mut self, model: i32) -> PvtResult<()> {
        self.activity_model = SaltActivityModel::try_from(model)?;
        Ok(())
    }

    pub fn set_thermal_mixing_model(&mut self, model: i32) -> PvtResult<()> {
        self.gas_mixing = GasMixing::try_from(model)?;
        Ok(())
    }

    pub fn salinity(&self, reg: usize) -> PvtResult<Real> {
        Ok(region(&self.regions, reg)?.salinity)
    }

    pub fn gas_reference_density(&self, reg: usize) -> PvtResult<Real> {
        Ok(region(&self.regions, reg)?.gas_reference_density)
    }

    pub fn brine_reference_density(&self, reg: usize) -> PvtResult<Real> {
        Ok(region(&self.regions, reg)?.brine_reference_density)
    }

    pub fn gas_mixing(&self) -> GasMixing {
        self.gas_mixing
    }

    /// Saturated Rvw for a brine of salt mass fraction `salinity`.
    pub fn rvw_sat(&self, reg: usize, t: Real, p: Real, salinity: Real) -> PvtResult<Real> {
        let r = region(&self.regions, reg)?;
        if !self.enable_vaporization {
            return Ok(0.0);
        }
        let y = G::vapor_mole_fraction(t, p, salinity, self.activity_model)?.clamp(0.0, 1.0);
        let m_brine = Brine::molar_mass(salinity);
        let mass_fraction = y * m_brine / (y * (m_brine - G::MOLAR_MASS) + G::MOLAR_MASS);
        Ok(mass_fraction / (1.0 - mass_fraction) * (r.gas_reference_density / r.brine_reference_density))
    }

    fn water_mass_fraction(r: &StorageGasRegion, rvw: Real) -> Real {
        let rho_water = rvw * r.brine_reference_density;
        rho_water / (r.gas_reference_density + rho_water)
    }
}

impl<G: SolubleGas> GasPvtLaw for StorageGasPvt<G> {
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
        let r = region(&self.regions, reg)?;
        let rho_gas = G::gas_density(t, p)?;
        if !self.enable_vaporization {
            return Ok(rho_gas / r.gas_reference_density);
        }
        Ok(rho_gas / (r.gas_reference_density + rvw.max(rv) * r.brine_reference_density))
    }

    fn saturated_inverse_formation_volume_factor(&self, reg: usize, t: Real, p: Real) -> PvtResult<Real> {
        let rvw = self.rvw_sat(reg, t, p, self.salinity(reg)?)?;
        self.inverse_formation_volume_factor(reg, t, p, 0.0, rvw)
    }

    fn viscosity(&self, reg: usize, t: Real, p: Real, _rv: Real, _rvw: Real) -> PvtResult<Real> {
        self.saturated_viscosity(reg, t, p)
    }

    fn saturated_viscosity(&self, reg: usize, t: Real, p: Real) -> PvtResult<Real> {
        region(&self.regions, reg)?;
        G::gas_viscosity(t, p)
    }

    /// The oil slot holds brine, so its vaporization factor is the water one.
    fn saturated_oil_vaporization_factor(&self, reg: usize, t: Real, p: Real) -> PvtResult<Real> {
        self.rvw_sat(reg, t, p, self.salinity(reg)?)
    }

    fn saturated_water_vaporization_factor(&self, reg: usize, t: Real, p: Real) -> PvtResult<Real> {
        self.rvw_sat(reg, t, p, self.salinity(reg)?)
    }

    fn saturated_water_vaporization_factor_salt(
        &self,
        reg: usize,
        t: Real,
        p: Real,
        salt: Real,
    ) -> PvtResult<Real> {
        let salinity = salt / H2o::liquid_density(t, p, true)?;
        self.rvw_sat(reg, t, p, salinity)
    }

    fn saturation_pressure(&self, reg: usize, _t: Real, _rv: Real) -> PvtResult<Real> {
        region(&self.regions, reg)?;
        Ok(0.0)
    }

    fn internal_energy(&self, reg: usize, t: Real, p: Real, rv: Real, rvw: Real) -> PvtResult<Real> {
        let r = region(&self.regions, reg)?;
        let u_gas = G::gas_internal_energy(t, p)?;
        match self.gas_mixing {
            GasMixing::None => Ok(u_gas),
            GasMixing::Ideal => {
                let x_water = Self::water_mass_fraction(r, rvw.max(rv));
                Ok(x_water * H2o::gas_internal_energy(t, p) + (1.0 - x_water) * u_gas)
            }
        }
    }

    fn diffusion_coefficient(&self, t: Real, p: Real, _comp: CompIdx) -> PvtResult<Real> {
        G::gas_diffusion_coefficient(t, p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dry_storage_gas_follows_component_density() {
        let mut law = Co2GasPvt::from_salinities(&[0.05]).unwrap();
        law.set_enable_vaporization_water(false);
        let rho_ref = law.gas_reference_density(0).unwrap();
        let inv_b = law.inverse_formation_volume_factor(0, 323.15, 1e7, 0.0, 1e-3).unwrap();
        let rho = Co2InBrine::gas_density(323.15, 1e7).unwrap();
        assert!((inv_b - rho / rho_ref).abs() < 1e-12 * inv_b);
        assert_eq!(law.saturated_water_vaporization_factor(0, 323.15, 1e7).unwrap(), 0.0);
    }

    #[test]
    fn vaporized_water_lowers_inverse_b() {
        let law = Co2GasPvt::from_salinities(&[0.0]).unwrap();
        let rvw = law.saturated_water_vaporization_factor(0, 323.15, 1e7).unwrap();
        assert!(rvw > 0.0 && rvw < 1e-2, "rvw = {rvw}");
        let dry = law.inverse_formation_volume_factor(0, 323.15, 1e7, 0.0, 0.0).unwrap();
        let sat = law.saturated_inverse_formation_volume_factor(0, 323.15, 1e7).unwrap();
        assert!(sat < dry);
        assert_eq!(law.saturated_oil_vaporization_factor(0, 323.15, 1e7).unwrap(), rvw);
        assert_eq!(law.saturation_pressure(0, 323.15, rvw).unwrap(), 0.0);
    }

    #[test]
    fn hydrogen_vapour_follows_raoult() {
        let law = H2GasPvt::from_salinities(&[0.0]).unwrap();
        let low = law.saturated_water_vaporization_factor(0, 330.0, 5e6).unwrap();
        let high = law.saturated_water_vaporization_factor(0, 330.0, 2e7).unwrap();
        assert!(high < low);
        let mu = law.viscosity(0, 330.0, 1e7, 0.0, low).unwrap();
        assert!(mu > 5e-6 && mu < 2e-5, "mu = {mu}");
    }

    #[test]
    fn ideal_mixing_adds_water_vapour_energy() {
        let mut law = Co2GasPvt::from_salinities(&[0.0]).unwrap();
        let pure = law.internal_energy(0, 350.0, 1e7, 0.0, 1e-3).unwrap();
        assert_eq!(pure, Co2InBrine::gas_internal_energy(350.0, 1e7).unwrap());
        law.set_thermal_mixing_model(1).unwrap();
        assert_eq!(law.gas_mixing(), GasMixing::Ideal);
        let mixed = law.internal_energy(0, 350.0, 1e7, 0.0, 1e-3).unwrap();
        let rho_w = law.brine_reference_density(0).unwrap() * 1e-3;
        let x = rho_w / (law.gas_reference_density(0).unwrap() + rho_w);
        let expected = x * H2o::gas_internal_energy(350.0, 1e7) + (1.0 - x) * pure;
        assert!((mixed - expected).abs() < 1e-9 * expected.abs());
        assert!(law.set_thermal_mixing_model(2).is_err());
    }

    #[test]
    fn gas_diffusion_is_available() {
        let law = H2GasPvt::from_salinities(&[0.0]).unwrap();
        let d = law.diffusion_coefficient(330.0, 1e7, CompIdx::Water).unwrap();
        assert!(d > 0.0);
    }
}
