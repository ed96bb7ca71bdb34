//! Brine with a dissolved storage gas (CO2STORE / H2STORE).
//!
//! The same law serves the oil slot (brine stands in for oil, salinity from
//! the region) and the water slot (salinity from the salt concentration when
//! brine tracking is enabled). The gas specific pieces live behind
//! [`SolubleGas`]; [`BrineCo2Pvt`] and [`BrineH2Pvt`] are the two instances.

use crate::binary::{BrineCo2, BrineH2, SaltActivityModel};
use crate::components::brine::{SALT_MOLAR_MASS, michaelides_enthalpy};
use crate::components::{Brine, Co2, H2, H2o};
use crate::error::{PvtError, PvtResult};
use crate::law::{OilPvtLaw, WaterPvtLaw};
use crate::validation::{region, region_mut, validate_finite, validate_positive};
use bo_core::{CompIdx, Real};
use std::fmt::Debug;
use std::marker::PhantomData;

/// Temperature of the surface reference state [K].
pub const REFERENCE_TEMPERATURE: Real = 288.71;
/// Pressure of the surface reference state [Pa].
pub const REFERENCE_PRESSURE: Real = 101_325.0;

/// Salt contribution to the liquid enthalpy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaltMixing {
    None,
    #[default]
    Michaelides,
}

/// Gas contribution to the liquid enthalpy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiquidMixing {
    None,
    Ideal,
    /// Ideal mixing plus the heat of dissolution.
    DuanSun,
}

impl TryFrom<i32> for SaltMixing {
    type Error = PvtError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Michaelides),
            _ => Err(PvtError::invalid_arg(
                "The thermal mixing model option for salt are 0 or 1",
            )),
        }
    }
}

impl TryFrom<i32> for LiquidMixing {
    type Error = PvtError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Ideal),
            2 => Ok(Self::DuanSun),
            _ => Err(PvtError::invalid_arg(
                "The thermal mixing model option for liquid are 0, 1 and 2",
            )),
        }
    }
}

/// Ezrokhi coefficients `c0 + c1 T + c2 T²` (T in °C).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EzrokhiCoefficients(pub [Real; 3]);

impl EzrokhiCoefficients {
    pub fn exponent(&self, t: Real) -> Real {
        let tc = t - 273.15;
        let [c0, c1, c2] = self.0;
        c0 + tc * (c1 + c2 * tc)
    }
}

/// Gas specific properties of a brine-gas system.
pub trait SolubleGas: Debug + Clone + Copy + Default + Send + Sync + 'static {
    const NAME: &'static str;
    const MOLAR_MASS: Real;
    const DEFAULT_LIQUID_MIXING: LiquidMixing;
    const SATURATION_PRESSURE_MESSAGE: &'static str;

    fn gas_density(t: Real, p: Real) -> PvtResult<Real>;

    fn gas_enthalpy(t: Real, p: Real) -> PvtResult<Real>;

    /// Mole fraction of dissolved gas in brine of salt mass fraction `salinity`.
    fn dissolved_mole_fraction(
        t: Real,
        p: Real,
        salinity: Real,
        activity: SaltActivityModel,
    ) -> PvtResult<Real>;

    /// Apparent molar volume of the dissolved gas [m³/mol].
    fn partial_molar_volume(t: Real, p: Real) -> Real;

    /// Heat of dissolution [kJ/kg].
    fn heat_of_dissolution(t: Real) -> Real;

    /// Diffusion coefficient of the gas in brine [m²/s] from the pure water
    /// and brine viscosities [Pa·s].
    fn liquid_diffusion_coefficient(t: Real, mu_water: Real, mu_brine: Real) -> Real;

    fn gas_viscosity(t: Real, p: Real) -> PvtResult<Real>;

    fn gas_internal_energy(t: Real, p: Real) -> PvtResult<Real>;

    /// Mole fraction of water vapour in the gas phase.
    fn vapor_mole_fraction(
        t: Real,
        p: Real,
        salinity: Real,
        activity: SaltActivityModel,
    ) -> PvtResult<Real>;

    /// Diffusion coefficient of water vapour in the gas [m²/s].
    fn gas_diffusion_coefficient(t: Real, p: Real) -> PvtResult<Real>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Co2InBrine;

impl SolubleGas for Co2InBrine {
    const NAME: &'static str = Co2::NAME;
    const MOLAR_MASS: Real = Co2::MOLAR_MASS;
    const DEFAULT_LIQUID_MIXING: LiquidMixing = LiquidMixing::DuanSun;
    const SATURATION_PRESSURE_MESSAGE: &'static str =
        "Requested the saturation pressure for the brine-co2 pvt module. Not yet implemented.";

    fn gas_density(t: Real, p: Real) -> PvtResult<Real> {
        Co2::gas_density(t, p, true)
    }

    fn gas_enthalpy(t: Real, p: Real) -> PvtResult<Real> {
        Co2::gas_enthalpy(t, p, true)
    }

    fn dissolved_mole_fraction(
        t: Real,
        p: Real,
        salinity: Real,
        activity: SaltActivityModel,
    ) -> PvtResult<Real> {
        Ok(BrineCo2::mole_fractions(t, p, salinity, activity, true)?.x_co2)
    }

    /// Garcia (2001).
    fn partial_molar_volume(t: Real, _p: Real) -> Real {
        let tc = t - 273.15;
        (37.51 + tc * (-9.585e-2 + tc * (8.74e-4 - tc * 5.044e-7))) / 1e6
    }

    /// Duan and Sun; exothermic in the relevant range.
    fn heat_of_dissolution(t: Real) -> Real {
        (-57.4375 + t * 0.1325) * 1000.0 / 44.0
    }

    fn liquid_diffusion_coefficient(t: Real, mu_water: Real, mu_brine: Real) -> Real {
        let log_d_water = -4.1764 + 712.52 / t - 2.5907e5 / (t * t);
        let log_d_brine = log_d_water - 0.87 * (mu_brine / mu_water).log10();
        // cm²/s -> m²/s
        10f64.powf(log_d_brine) * 1e-4
    }

    fn gas_viscosity(t: Real, p: Real) -> PvtResult<Real> {
        Co2::gas_viscosity(t, p, true)
    }

    fn gas_internal_energy(t: Real, p: Real) -> PvtResult<Real> {
        Co2::gas_internal_energy(t, p, true)
    }

    fn vapor_mole_fraction(
        t: Real,
        p: Real,
        salinity: Real,
        activity: SaltActivityModel,
    ) -> PvtResult<Real> {
        Ok(BrineCo2::mole_fractions(t, p, salinity, activity, true)?.y_h2o)
    }

    fn gas_diffusion_coefficient(t: Real, p: Real) -> PvtResult<Real> {
        BrineCo2::gas_diffusion_coefficient(t, p, true)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct H2InBrine;

impl SolubleGas for H2InBrine {
    const NAME: &'static str = H2::NAME;
    const MOLAR_MASS: Real = H2::MOLAR_MASS;
    const DEFAULT_LIQUID_MIXING: LiquidMixing = LiquidMixing::Ideal;
    const SATURATION_PRESSURE_MESSAGE: &'static str =
        "Saturation pressure for the Brine-H2 PVT module has not been implemented yet!";

    fn gas_density(t: Real, p: Real) -> PvtResult<Real> {
        H2::gas_density(t, p, true)
    }

    fn gas_enthalpy(t: Real, p: Real) -> PvtResult<Real> {
        H2::gas_enthalpy(t, p, true)
    }

    fn dissolved_mole_fraction(
        t: Real,
        p: Real,
        salinity: Real,
        _activity: SaltActivityModel,
    ) -> PvtResult<Real> {
        let molality = salinity / ((1.0 - salinity) * SALT_MOLAR_MASS);
        BrineH2::mole_fraction_h2(t, p, molality)
    }

    /// Sharqawy et al., pressure in MPa.
    fn partial_molar_volume(t: Real, p: Real) -> Real {
        (51.1904 - 0.208062 * t + 3.4427e-4 * t * t - 0.022 * (p / 1e6)) / 1e6
    }

    fn heat_of_dissolution(_t: Real) -> Real {
        0.0
    }

    /// Stokes-Einstein type correlation of Rahbari et al. with the brine
    /// correction of Jähne et al.
    fn liquid_diffusion_coefficient(t: Real, mu_water: Real, mu_brine: Real) -> Real {
        const MOLAR_VOLUME: Real = 28.45;
        const SIGMA: Real = 2.96e-8;
        const AVOGADRO: Real = 6.022e23;
        const LAMBDA: Real = 1.729;
        let alpha = SIGMA / (MOLAR_VOLUME / AVOGADRO).powf(1.0 / 3.0);
        let mu_w_cp = mu_water * 1e3;
        let mu_b_cp = mu_brine * 1e3;
        let d_pure = 4.8e-7 * t / mu_w_cp.powf(alpha)
            * ((1.0 + LAMBDA * LAMBDA) / MOLAR_VOLUME).powf(0.6);
        let log_d_brine = d_pure.log10() - 0.637 * (mu_b_cp / mu_w_cp).log10();
        10f64.powf(log_d_brine) * 1e-4
    }

    fn gas_viscosity(t: Real, p: Real) -> PvtResult<Real> {
        Ok(H2::gas_viscosity(t, p))
    }

    fn gas_internal_energy(t: Real, p: Real) -> PvtResult<Real> {
        H2::gas_internal_energy(t, p, true)
    }

    /// Raoult's law with a unit activity of water.
    fn vapor_mole_fraction(
        t: Real,
        p: Real,
        _salinity: Real,
        _activity: SaltActivityModel,
    ) -> PvtResult<Real> {
        Ok(H2o::vapor_pressure(t) / p)
    }

    fn gas_diffusion_coefficient(t: Real, p: Real) -> PvtResult<Real> {
        Ok(BrineH2::gas_diffusion_coefficient(t, p))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct BrineGasRegion {
    salinity: Real,
    brine_reference_density: Real,
    gas_reference_density: Real,
}

/// Brine with dissolved gas `G`.
#[derive(Debug, Clone)]
pub struct BrineGasPvt<G: SolubleGas> {
    regions: Vec<BrineGasRegion>,
    enable_dissolution: bool,
    enable_salt_concentration: bool,
    activity_model: SaltActivityModel,
    salt_mixing: SaltMixing,
    liquid_mixing: LiquidMixing,
    /// NaCl and gas coefficients.
    ezrokhi_density: Option<(EzrokhiCoefficients, EzrokhiCoefficients)>,
    ezrokhi_viscosity: Option<EzrokhiCoefficients>,
    gas: PhantomData<G>,
}

pub type BrineCo2Pvt = BrineGasPvt<Co2InBrine>;
pub type BrineH2Pvt = BrineGasPvt<H2InBrine>;

impl<G: SolubleGas> Default for BrineGasPvt<G> {
    fn default() -> Self {
        Self {
            regions: Vec::new(),
            enable_dissolution: true,
            enable_salt_concentration: false,
            activity_model: SaltActivityModel::default(),
            salt_mixing: SaltMixing::default(),
            liquid_mixing: G::DEFAULT_LIQUID_MIXING,
            ezrokhi_density: None,
            ezrokhi_viscosity: None,
            gas: PhantomData,
        }
    }
}

impl<G: SolubleGas> BrineGasPvt<G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// One region per salt mass fraction.
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
        self.regions.push(BrineGasRegion {
            salinity,
            brine_reference_density: self.brine_reference_density_for(salinity)?,
            gas_reference_density: G::gas_density(REFERENCE_TEMPERATURE, REFERENCE_PRESSURE)?,
        });
        Ok(self.regions.len() - 1)
    }

    fn brine_reference_density_for(&self, salinity: Real) -> PvtResult<Real> {
        match &self.ezrokhi_density {
            Some((nacl, _)) => {
                let rho_pure = H2o::liquid_density(REFERENCE_TEMPERATURE, REFERENCE_PRESSURE, true)?;
                Ok(rho_pure * 10f64.powf(nacl.exponent(REFERENCE_TEMPERATURE) * salinity))
            }
            None => Brine::liquid_density(REFERENCE_TEMPERATURE, REFERENCE_PRESSURE, salinity, true),
        }
    }

    /// Override the surface densities of one region.
    pub fn set_reference_densities(&mut self, reg: usize, rho_brine: Real, rho_gas: Real) -> PvtResult<()> {
        let r = region_mut(&mut self.regions, reg)?;
        r.brine_reference_density = validate_positive(rho_brine, "brine reference density")?;
        r.gas_reference_density = validate_positive(rho_gas, "gas reference density")?;
        Ok(())
    }

    pub fn set_enable_dissolved_gas(&mut self, yes: bool) {
        self.enable_dissolution = yes;
    }

    pub fn set_enable_salt_concentration(&mut self, yes: bool) {
        self.enable_salt_concentration = yes;
    }

    pub fn set_activity_model_salt(&mut self, model: i32) -> PvtResult<()> {
        self.activity_model = SaltActivityModel::try_from(model)?;
        Ok(())
    }

    pub fn set_thermal_mixing_model(&mut self, salt: i32, liquid: i32) -> PvtResult<()> {
        let salt = SaltMixing::try_from(salt)?;
        let liquid = LiquidMixing::try_from(liquid)?;
        self.salt_mixing = salt;
        self.liquid_mixing = liquid;
        Ok(())
    }

    pub fn num_regions(&self) -> usize {
        self.regions.len()
    }

    pub fn salinity(&self, reg: usize) -> PvtResult<Real> {
        Ok(region(&self.regions, reg)?.salinity)
    }

    pub fn brine_reference_density(&self, reg: usize) -> PvtResult<Real> {
        Ok(region(&self.regions, reg)?.brine_reference_density)
    }

    pub fn gas_reference_density(&self, reg: usize) -> PvtResult<Real> {
        Ok(region(&self.regions, reg)?.gas_reference_density)
    }

    pub fn activity_model(&self) -> SaltActivityModel {
        self.activity_model
    }

    pub fn mixing_models(&self) -> (SaltMixing, LiquidMixing) {
        (self.salt_mixing, self.liquid_mixing)
    }

    /// Salt mass fraction from a salt concentration [kg/m³] when brine
    /// tracking is enabled, the region salinity otherwise.
    pub fn salinity_from_concentration(&self, reg: usize, t: Real, p: Real, salt: Real) -> PvtResult<Real> {
        if self.enable_salt_concentration {
            Ok(salt / H2o::liquid_density(t, p, true)?)
        } else {
            self.salinity(reg)
        }
    }

    /// Saturated dissolved gas ratio.
    pub fn rs_sat(&self, reg: usize, t: Real, p: Real, salinity: Real) -> PvtResult<Real> {
        let r = region(&self.regions, reg)?;
        if !self.enable_dissolution {
            return Ok(0.0);
        }
        let x = G::dissolved_mole_fraction(t, p, salinity, self.activity_model)?.clamp(0.0, 1.0);
        let mass_fraction = mole_to_mass_fraction(x, salinity, G::MOLAR_MASS);
        Ok(mass_fraction / (1.0 - mass_fraction) * (r.brine_reference_density / r.gas_reference_density))
    }

    /// Mass fraction of dissolved gas for the ratio `rs`.
    fn mass_fraction(r: &BrineGasRegion, rs: Real) -> Real {
        let rho_dissolved = rs * r.gas_reference_density;
        rho_dissolved / (r.brine_reference_density + rho_dissolved)
    }

    /// Density of brine carrying `rs` of dissolved gas.
    pub fn density(&self, reg: usize, t: Real, p: Real, rs: Real, salinity: Real) -> PvtResult<Real> {
        let r = region(&self.regions, reg)?;
        let mass_fraction = Self::mass_fraction(r, rs);
        let mole_fraction = mass_to_mole_fraction(mass_fraction, salinity, G::MOLAR_MASS);
        self.liquid_density(t, p, mole_fraction, mass_fraction, salinity)
    }

    fn liquid_density(&self, t: Real, p: Real, x: Real, mass_fraction: Real, salinity: Real) -> PvtResult<Real> {
        let rho_pure = H2o::liquid_density(t, p, true)?;
        if let Some((nacl, gas)) = &self.ezrokhi_density {
            let exponent = nacl.exponent(t) * salinity + gas.exponent(t) * mass_fraction;
            return Ok(rho_pure * 10f64.powf(exponent));
        }
        let rho_brine = Brine::liquid_density(t, p, salinity, true)?;
        let m_h2o = H2o::MOLAR_MASS;
        let m_t = m_h2o * (1.0 - x) + G::MOLAR_MASS * x;
        let v_phi = G::partial_molar_volume(t, p);
        let rho_aq = 1.0 / (x * v_phi / m_t + m_h2o * (1.0 - x) / (rho_pure * m_t));
        Ok(rho_brine + (rho_aq - rho_pure))
    }

    fn inverse_b(&self, reg: usize, t: Real, p: Real, rs: Real, salinity: Real) -> PvtResult<Real> {
        let r = region(&self.regions, reg)?;
        let rho = self.density(reg, t, p, rs, salinity)?;
        Ok((1.0 - Self::mass_fraction(r, rs)) * rho / r.brine_reference_density)
    }

    fn saturated_inverse_b(&self, reg: usize, t: Real, p: Real, salinity: Real) -> PvtResult<Real> {
        let rs = self.rs_sat(reg, t, p, salinity)?;
        self.inverse_b(reg, t, p, rs, salinity)
    }

    fn brine_viscosity(&self, t: Real, p: Real, salinity: Real) -> PvtResult<Real> {
        match &self.ezrokhi_viscosity {
            Some(nacl) => {
                let mu_pure = H2o::liquid_viscosity(t, p, true)?;
                Ok(mu_pure * 10f64.powf(nacl.exponent(t) * salinity))
            }
            None => Ok(Brine::liquid_viscosity(t, p, salinity)),
        }
    }

    /// Specific enthalpy of the liquid [J/kg]; `mass_fraction` of dissolved gas.
    fn liquid_enthalpy(&self, t: Real, p: Real, salinity: Real, mass_fraction: Real) -> PvtResult<Real> {
        let h_water = H2o::liquid_enthalpy(t, p);
        if self.liquid_mixing == LiquidMixing::None && self.salt_mixing == SaltMixing::None {
            return Ok(h_water);
        }
        let hw = h_water / 1e3;
        let h_brine = match self.salt_mixing {
            SaltMixing::Michaelides => michaelides_enthalpy(t, hw, salinity),
            SaltMixing::None => hw,
        };
        let dissolution = match self.liquid_mixing {
            LiquidMixing::None => return Ok(h_brine * 1e3),
            LiquidMixing::Ideal => 0.0,
            LiquidMixing::DuanSun => G::heat_of_dissolution(t),
        };
        let hg = G::gas_enthalpy(t, p)? / 1e3 + dissolution;
        Ok((h_brine - mass_fraction * hw + hg * mass_fraction) * 1e3)
    }

    fn internal_energy_at(&self, reg: usize, t: Real, p: Real, rs: Real, salinity: Real) -> PvtResult<Real> {
        let r = region(&self.regions, reg)?;
        let h = self.liquid_enthalpy(t, p, salinity, Self::mass_fraction(r, rs))?;
        Ok(h - p / self.density(reg, t, p, rs, salinity)?)
    }

    fn diffusion(&self, t: Real, p: Real) -> PvtResult<Real> {
        let salinity = self.salinity(0)?;
        let mu_water = H2o::liquid_viscosity(t, p, true)?;
        let mu_brine = self.brine_viscosity(t, p, salinity)?;
        Ok(G::liquid_diffusion_coefficient(t, mu_water, mu_brine))
    }
}

impl BrineCo2Pvt {
    /// Ezrokhi density coefficients for NaCl and CO2. Reference densities of
    /// existing regions are recomputed.
    pub fn set_ezrokhi_density(&mut self, nacl: EzrokhiCoefficients, co2: EzrokhiCoefficients) -> PvtResult<()> {
        self.ezrokhi_density = Some((nacl, co2));
        for i in 0..self.regions.len() {
            let rho = self.brine_reference_density_for(self.regions[i].salinity)?;
            self.regions[i].brine_reference_density = rho;
        }
        Ok(())
    }

    pub fn set_ezrokhi_viscosity(&mut self, nacl: EzrokhiCoefficients) {
        self.ezrokhi_viscosity = Some(nacl);
    }
}

/// Mass fraction of gas in brine from its mole fraction.
fn mole_to_mass_fraction(x: Real, salinity: Real, gas_molar_mass: Real) -> Real {
    let m_brine = Brine::molar_mass(salinity);
    x * gas_molar_mass / (x * (gas_molar_mass - m_brine) + m_brine)
}

fn mass_to_mole_fraction(mass_fraction: Real, salinity: Real, gas_molar_mass: Real) -> Real {
    let m_brine = Brine::molar_mass(salinity);
    mass_fraction * m_brine / (gas_molar_mass * (1.0 - mass_fraction) + mass_fraction * m_brine)
}

impl<G: SolubleGas> OilPvtLaw for BrineGasPvt<G> {
    fn num_regions(&self) -> usize {
        self.regions.len()
    }

    fn inverse_formation_volume_factor(&self, reg: usize, t: Real, p: Real, rs: Real) -> PvtResult<Real> {
        self.inverse_b(reg, t, p, rs, self.salinity(reg)?)
    }

    fn saturated_inverse_formation_volume_factor(&self, reg: usize, t: Real, p: Real) -> PvtResult<Real> {
        self.saturated_inverse_b(reg, t, p, self.salinity(reg)?)
    }

    fn viscosity(&self, reg: usize, t: Real, p: Real, _rs: Real) -> PvtResult<Real> {
        OilPvtLaw::saturated_viscosity(self, reg, t, p)
    }

    fn saturated_viscosity(&self, reg: usize, t: Real, p: Real) -> PvtResult<Real> {
        self.brine_viscosity(t, p, self.salinity(reg)?)
    }

    fn saturated_gas_dissolution_factor(&self, reg: usize, t: Real, p: Real) -> PvtResult<Real> {
        self.rs_sat(reg, t, p, self.salinity(reg)?)
    }

    fn saturation_pressure(&self, _reg: usize, _t: Real, _rs: Real) -> PvtResult<Real> {
        Err(PvtError::not_implemented(G::SATURATION_PRESSURE_MESSAGE))
    }

    fn internal_energy(&self, reg: usize, t: Real, p: Real, rs: Real) -> PvtResult<Real> {
        self.internal_energy_at(reg, t, p, rs, self.salinity(reg)?)
    }

    fn diffusion_coefficient(&self, t: Real, p: Real, _comp: CompIdx) -> PvtResult<Real> {
        self.diffusion(t, p)
    }
}

impl<G: SolubleGas> WaterPvtLaw for BrineGasPvt<G> {
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
        let salinity = self.salinity_from_concentration(reg, t, p, salt)?;
        self.inverse_b(reg, t, p, rsw, salinity)
    }

    fn saturated_inverse_formation_volume_factor(
        &self,
        reg: usize,
        t: Real,
        p: Real,
        salt: Real,
    ) -> PvtResult<Real> {
        let salinity = self.salinity_from_concentration(reg, t, p, salt)?;
        self.saturated_inverse_b(reg, t, p, salinity)
    }

    fn viscosity(&self, reg: usize, t: Real, p: Real, _rsw: Real, salt: Real) -> PvtResult<Real> {
        WaterPvtLaw::saturated_viscosity(self, reg, t, p, salt)
    }

    fn saturated_viscosity(&self, reg: usize, t: Real, p: Real, salt: Real) -> PvtResult<Real> {
        let salinity = self.salinity_from_concentration(reg, t, p, salt)?;
        self.brine_viscosity(t, p, salinity)
    }

    fn saturated_gas_dissolution_factor(
        &self,
        reg: usize,
        t: Real,
        p: Real,
        salt: Real,
    ) -> PvtResult<Real> {
        let salinity = self.salinity_from_concentration(reg, t, p, salt)?;
        self.rs_sat(reg, t, p, salinity)
    }

    fn saturation_pressure(&self, _reg: usize, _t: Real, _rsw: Real, _salt: Real) -> PvtResult<Real> {
        Err(PvtError::not_implemented(G::SATURATION_PRESSURE_MESSAGE))
    }

    fn internal_energy(
        &self,
        reg: usize,
        t: Real,
        p: Real,
        rsw: Real,
        salt: Real,
    ) -> PvtResult<Real> {
        let salinity = self.salinity_from_concentration(reg, t, p, salt)?;
        self.internal_energy_at(reg, t, p, rsw, salinity)
    }

    fn diffusion_coefficient(&self, t: Real, p: Real, _comp: CompIdx) -> PvtResult<Real> {
        self.diffusion(t, p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: Real = 323.15;
    const P: Real = 2e7;

    fn co2(salinity: Real) -> BrineCo2Pvt {
        BrineCo2Pvt::from_salinities(&[salinity]).unwrap()
    }

    #[test]
    fn reference_state_densities() {
        let law = co2(0.0);
        let rho_g = law.gas_reference_density(0).unwrap();
        assert!(rho_g > 1.8 && rho_g < 1.95, "rho_g = {rho_g}");
        let rho_b = law.brine_reference_density(0).unwrap();
        assert!(rho_b > 990.0 && rho_b < 1005.0, "rho_b = {rho_b}");
        assert!(co2(0.1).brine_reference_density(0).unwrap() > rho_b);
    }

    #[test]
    fn dissolution_grows_with_pressure_and_drops_with_salt() {
        let law = co2(0.0);
        let low = OilPvtLaw::saturated_gas_dissolution_factor(&law, 0, T, 5e6).unwrap();
        let high = OilPvtLaw::saturated_gas_dissolution_factor(&law, 0, T, P).unwrap();
        assert!(low > 0.0 && high > low);
        let salty = OilPvtLaw::saturated_gas_dissolution_factor(&co2(0.1), 0, T, P).unwrap();
        assert!(salty < high);
    }

    #[test]
    fn disabled_dissolution_gives_zero_ratio() {
        let mut law = co2(0.05);
        law.set_enable_dissolved_gas(false);
        assert_eq!(OilPvtLaw::saturated_gas_dissolution_factor(&law, 0, T, P).unwrap(), 0.0);
        let sat = OilPvtLaw::saturated_inverse_formation_volume_factor(&law, 0, T, P).unwrap();
        let general = OilPvtLaw::inverse_formation_volume_factor(&law, 0, T, P, 0.0).unwrap();
        assert_eq!(sat, general);
    }

    #[test]
    fn saturated_state_matches_general_evaluation() {
        let law = co2(0.02);
        let rs = OilPvtLaw::saturated_gas_dissolution_factor(&law, 0, T, P).unwrap();
        let sat = OilPvtLaw::saturated_inverse_formation_volume_factor(&law, 0, T, P).unwrap();
        let general = OilPvtLaw::inverse_formation_volume_factor(&law, 0, T, P, rs).unwrap();
        assert!((sat - general).abs() < 1e-12 * sat);
        // dissolved CO2 makes the brine slightly denser
        assert!(law.density(0, T, P, rs, 0.02).unwrap() > law.density(0, T, P, 0.0, 0.02).unwrap());
    }

    #[test]
    fn saturation_pressure_is_not_implemented() {
        let law = co2(0.0);
        let err = OilPvtLaw::saturation_pressure(&law, 0, T, 10.0).unwrap_err();
        assert!(err.is_not_implemented());
        assert!(err.to_string().contains("brine-co2"));
        let err = WaterPvtLaw::saturation_pressure(&law, 0, T, 10.0, 0.0).unwrap_err();
        assert!(err.is_not_implemented());
        let err = OilPvtLaw::saturation_pressure(&BrineH2Pvt::from_salinities(&[0.0]).unwrap(), 0, T, 1.0)
            .unwrap_err();
        assert!(err.to_string().contains("Brine-H2"));
    }

    #[test]
    fn salt_concentration_overrides_region_salinity() {
        let mut law = co2(0.1);
        let from_region = WaterPvtLaw::saturated_viscosity(&law, 0, T, P, 0.0).unwrap();
        law.set_enable_salt_concentration(true);
        let fresh = WaterPvtLaw::saturated_viscosity(&law, 0, T, P, 0.0).unwrap();
        assert!(fresh < from_region);
        let salinity = law.salinity_from_concentration(0, T, P, 50.0).unwrap();
        let rho_w = H2o::liquid_density(T, P, true).unwrap();
        assert!((salinity - 50.0 / rho_w).abs() < 1e-15);
    }

    #[test]
    fn mixing_model_selectors() {
        let mut law = co2(0.0);
        assert_eq!(law.mixing_models(), (SaltMixing::Michaelides, LiquidMixing::DuanSun));
        let err = law.set_thermal_mixing_model(2, 0).unwrap_err();
        assert!(err.to_string().contains("for salt are 0 or 1"));
        let err = law.set_thermal_mixing_model(0, 3).unwrap_err();
        assert!(err.to_string().contains("for liquid are 0, 1 and 2"));
        assert!(law.set_activity_model_salt(4).is_err());
        assert_eq!(BrineH2Pvt::new().mixing_models().1, LiquidMixing::Ideal);
    }

    #[test]
    fn internal_energy_without_mixing_is_water() {
        let mut law = co2(0.0);
        law.set_thermal_mixing_model(0, 0).unwrap();
        let u = OilPvtLaw::internal_energy(&law, 0, T, P, 0.0).unwrap();
        let rho = law.density(0, T, P, 0.0, 0.0).unwrap();
        let expected = H2o::liquid_enthalpy(T, P) - P / rho;
        assert!((u - expected).abs() < 1e-9 * expected.abs());

        law.set_thermal_mixing_model(1, 2).unwrap();
        let rs = OilPvtLaw::saturated_gas_dissolution_factor(&law, 0, T, P).unwrap();
        assert!(OilPvtLaw::internal_energy(&law, 0, T, P, rs).unwrap().is_finite());
    }

    #[test]
    fn ezrokhi_density_and_viscosity() {
        let mut law = co2(0.05);
        let nacl = EzrokhiCoefficients([0.2, 0.0, 0.0]);
        law.set_ezrokhi_density(nacl, EzrokhiCoefficients([0.1, 0.0, 0.0])).unwrap();
        law.set_ezrokhi_viscosity(nacl);
        let rho_pure = H2o::liquid_density(T, P, true).unwrap();
        let rho = law.density(0, T, P, 0.0, 0.05).unwrap();
        assert!((rho - rho_pure * 10f64.powf(0.2 * 0.05)).abs() < 1e-9);
        let mu_pure = H2o::liquid_viscosity(T, P, true).unwrap();
        let mu = OilPvtLaw::saturated_viscosity(&law, 0, T, P).unwrap();
        assert!((mu - mu_pure * 10f64.powf(0.01)).abs() < 1e-15);
    }

    #[test]
    fn diffusion_coefficients_are_physical() {
        let d = OilPvtLaw::diffusion_coefficient(&co2(0.0), T, P, CompIdx::Gas).unwrap();
        assert!(d > 1e-9 && d < 1e-8, "D_co2 = {d}");
        let d_salty = OilPvtLaw::diffusion_coefficient(&co2(0.1), T, P, CompIdx::Gas).unwrap();
        assert!(d_salty < d);
        let d_h2 = OilPvtLaw::diffusion_coefficient(&BrineH2Pvt::from_salinities(&[0.0]).unwrap(), T, P, CompIdx::Gas)
            .unwrap();
        assert!(d_h2 > 1e-9 && d_h2 < 1e-7, "D_h2 = {d_h2}");
        assert!(matches!(
            OilPvtLaw::diffusion_coefficient(&BrineCo2Pvt::new(), T, P, CompIdx::Gas),
            Err(PvtError::RegionOutOfRange { .. })
        ));
    }

    #[test]
    fn hydrogen_is_sparingly_soluble() {
        let law = BrineH2Pvt::from_salinities(&[0.0]).unwrap();
        let rs = WaterPvtLaw::saturated_gas_dissolution_factor(&law, 0, T, 5e6, 0.0).unwrap();
        let rs_co2 = WaterPvtLaw::saturated_gas_dissolution_factor(&co2(0.0), 0, T, 5e6, 0.0).unwrap();
        assert!(rs > 0.0 && rs < rs_co2);
    }

    #[test]
    fn rejects_invalid_salinity() {
        assert!(BrineCo2Pvt::from_salinities(&[1.5]).is_err());
        assert!(BrineCo2Pvt::from_salinities(&[Real::NAN]).is_err());
    }
}
