//! The per-phase law contracts.
//!
//! Every method takes the PVT region first, then temperature [K] and
//! pressure [Pa]. Dissolution/vaporization ratios are surface volume ratios.

use crate::error::{PvtError, PvtResult};
use bo_core::{CompIdx, Real};

pub(crate) fn no_diffusion() -> PvtError {
    PvtError::not_implemented("The PVT model does not provide a diffusionCoefficient()")
}

pub(crate) fn thermal_disabled(phase: &str) -> PvtError {
    PvtError::not_implemented(format!(
        "Requested the enthalpy of {phase} but the thermal option is not enabled"
    ))
}

/// Oil phase behaviour as a function of the dissolved gas ratio Rs.
pub trait OilPvtLaw: Send + Sync {
    fn num_regions(&self) -> usize;

    fn inverse_formation_volume_factor(&self, region: usize, t: Real, p: Real, rs: Real) -> PvtResult<Real>;

    fn saturated_inverse_formation_volume_factor(&self, region: usize, t: Real, p: Real) -> PvtResult<Real>;

    fn viscosity(&self, region: usize, t: Real, p: Real, rs: Real) -> PvtResult<Real>;

    fn saturated_viscosity(&self, region: usize, t: Real, p: Real) -> PvtResult<Real>;

    fn saturated_gas_dissolution_factor(&self, region: usize, t: Real, p: Real) -> PvtResult<Real>;

    /// Saturated Rs damped by the oil saturation history (VAPPARS).
    fn saturated_gas_dissolution_factor_with_history(
        &self,
        region: usize,
        t: Real,
        p: Real,
        _so: Real,
        _max_so: Real,
    ) -> PvtResult<Real> {
        self.saturated_gas_dissolution_factor(region, t, p)
    }

    /// Pressure at which oil with dissolved gas ratio `rs` is saturated.
    fn saturation_pressure(&self, region: usize, t: Real, rs: Real) -> PvtResult<Real>;

    fn internal_energy(&self, _region: usize, _t: Real, _p: Real, _rs: Real) -> PvtResult<Real> {
        Err(thermal_disabled("oil"))
    }

    fn diffusion_coefficient(&self, _t: Real, _p: Real, _comp: CompIdx) -> PvtResult<Real> {
        Err(no_diffusion())
    }

    /// Heat of vaporization [J/kg].
    fn hvap(&self, _region: usize) -> PvtResult<Real> {
        Ok(0.0)
    }

    /// `true` if the fluid system has to add the mixing energy of the
    /// dissolved component itself.
    fn mixing_energy(&self) -> bool {
        false
    }

    fn set_vap_pars(&mut self, _par1: Real, _par2: Real) {}
}

/// Gas phase behaviour as a function of the vaporized oil ratio Rv and the
/// vaporized water ratio Rvw.
pub trait GasPvtLaw: Send + Sync {
    fn num_regions(&self) -> usize;

    fn inverse_formation_volume_factor(
        &self,
        region: usize,
        t: Real,
        p: Real,
        rv: Real,
        rvw: Real,
    ) -> PvtResult<Real>;

    fn saturated_inverse_formation_volume_factor(&self, region: usize, t: Real, p: Real) -> PvtResult<Real>;

    fn viscosity(&self, region: usize, t: Real, p: Real, rv: Real, rvw: Real) -> PvtResult<Real>;

    fn saturated_viscosity(&self, region: usize, t: Real, p: Real) -> PvtResult<Real>;

    fn saturated_oil_vaporization_factor(&self, region: usize, t: Real, p: Real) -> PvtResult<Real>;

    /// Saturated Rv damped by the oil saturation history (VAPPARS).
    fn saturated_oil_vaporization_factor_with_history(
        &self,
        region: usize,
        t: Real,
        p: Real,
        _so: Real,
        _max_so: Real,
    ) -> PvtResult<Real> {
        self.saturated_oil_vaporization_factor(region, t, p)
    }

    fn saturated_water_vaporization_factor(&self, region: usize, t: Real, p: Real) -> PvtResult<Real>;

    fn saturated_water_vaporization_factor_salt(
        &self,
        region: usize,
        t: Real,
        p: Real,
        _salt: Real,
    ) -> PvtResult<Real> {
        self.saturated_water_vaporization_factor(region, t, p)
    }

    /// Dew point pressure of gas with vaporized oil ratio `rv`.
    fn saturation_pressure(&self, region: usize, t: Real, rv: Real) -> PvtResult<Real>;

    fn internal_energy(
        &self,
        _region: usize,
        _t: Real,
        _p: Real,
        _rv: Real,
        _rvw: Real,
    ) -> PvtResult<Real> {
        Err(thermal_disabled("gas"))
    }

    fn diffusion_coefficient(&self, _t: Real, _p: Real, _comp: CompIdx) -> PvtResult<Real> {
        Err(no_diffusion())
    }

    fn hvap(&self, _region: usize) -> PvtResult<Real> {
        Ok(0.0)
    }

    fn mixing_energy(&self) -> bool {
        false
    }

    fn set_vap_pars(&mut self, _par1: Real, _par2: Real) {}
}

/// Water phase behaviour as a function of the dissolved gas ratio Rsw and
/// the salt concentration [kg/m³].
pub trait WaterPvtLaw: Send + Sync {
    fn num_regions(&self) -> usize;

    fn inverse_formation_volume_factor(
        &self,
        region: usize,
        t: Real,
        p: Real,
        rsw: Real,
        salt: Real,
    ) -> PvtResult<Real>;

    fn saturated_inverse_formation_volume_factor(
        &self,
        region: usize,
        t: Real,
        p: Real,
        salt: Real,
    ) -> PvtResult<Real>;

    fn viscosity(&self, region: usize, t: Real, p: Real, rsw: Real, salt: Real) -> PvtResult<Real>;

    fn saturated_viscosity(&self, region: usize, t: Real, p: Real, salt: Real) -> PvtResult<Real>;

    fn saturated_gas_dissolution_factor(
        &self,
        region: usize,
        t: Real,
        p: Real,
        salt: Real,
    ) -> PvtResult<Real>;

    fn saturation_pressure(&self, region: usize, t: Real, rsw: Real, salt: Real) -> PvtResult<Real>;

    fn internal_energy(
        &self,
        _region: usize,
        _t: Real,
        _p: Real,
        _rsw: Real,
        _salt: Real,
    ) -> PvtResult<Real> {
        Err(thermal_disabled("water"))
    }

    fn diffusion_coefficient(&self, _t: Real, _p: Real, _comp: CompIdx) -> PvtResult<Real> {
        Err(no_diffusion())
    }

    fn hvap(&self, _region: usize) -> PvtResult<Real> {
        Ok(0.0)
    }

    fn mixing_energy(&self) -> bool {
        false
    }

    fn set_vap_pars(&mut self, _par1: Real, _par2: Real) {}
}
