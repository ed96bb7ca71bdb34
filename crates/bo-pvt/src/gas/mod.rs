//! Gas phase laws and the [`GasPvt`] multiplexer.

pub mod dry;
pub mod dry_humid;
pub mod storage;
pub(crate) mod tables;
pub mod thermal;
pub mod wet;
pub mod wet_humid;

pub use dry::DryGasPvt;
pub use dry_humid::DryHumidGasPvt;
pub use storage::{Co2GasPvt, GasMixing, H2GasPvt, StorageGasPvt};
pub use tables::RwgSaltRecord;
pub use thermal::ThermalGasPvt;
pub use wet::WetGasPvt;
pub use wet_humid::WetHumidGasPvt;

use crate::error::{PvtError, PvtResult};
use crate::law::GasPvtLaw;
use bo_core::{CompIdx, Real};

/// Tag of the active gas law.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GasPvtApproach {
    #[default]
    NoGas,
    DryGas,
    DryHumidGas,
    WetHumidGas,
    WetGas,
    ThermalGas,
    Co2Gas,
    H2Gas,
}

impl GasPvtApproach {
    pub const ALL: [GasPvtApproach; 8] = [
        GasPvtApproach::NoGas,
        GasPvtApproach::DryGas,
        GasPvtApproach::DryHumidGas,
        GasPvtApproach::WetHumidGas,
        GasPvtApproach::WetGas,
        GasPvtApproach::ThermalGas,
        GasPvtApproach::Co2Gas,
        GasPvtApproach::H2Gas,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GasPvtApproach::NoGas => "NoGas",
            GasPvtApproach::DryGas => "DryGas",
            GasPvtApproach::DryHumidGas => "DryHumidGas",
            GasPvtApproach::WetHumidGas => "WetHumidGas",
            GasPvtApproach::WetGas => "WetGas",
            GasPvtApproach::ThermalGas => "ThermalGas",
            GasPvtApproach::Co2Gas => "Co2Gas",
            GasPvtApproach::H2Gas => "H2Gas",
        }
    }
}

/// The gas law selected for a deck.
#[derive(Debug, Clone, Default)]
pub enum GasPvt {
    #[default]
    NoGas,
    DryGas(DryGasPvt),
    DryHumidGas(DryHumidGasPvt),
    WetHumidGas(WetHumidGasPvt),
    WetGas(WetGasPvt),
    ThermalGas(ThermalGasPvt),
    Co2Gas(Co2GasPvt),
    H2Gas(H2GasPvt),
}

macro_rules! dispatch {
    ($pvt:expr, $law:ident => $body:expr, $none:expr) => {
        match $pvt {
            GasPvt::NoGas => $none,
            GasPvt::DryGas($law) => $body,
            GasPvt::DryHumidGas($law) => $body,
            GasPvt::WetHumidGas($law) => $body,
            GasPvt::WetGas($law) => $body,
            GasPvt::ThermalGas($law) => $body,
            GasPvt::Co2Gas($law) => $body,
            GasPvt::H2Gas($law) => $body,
        }
    };
}

fn no_gas() -> PvtError {
    PvtError::not_implemented("Gas PVT of this deck!")
}

impl GasPvt {
    pub fn with_approach(approach: GasPvtApproach) -> Self {
        match approach {
            GasPvtApproach::NoGas => GasPvt::NoGas,
            GasPvtApproach::DryGas => GasPvt::DryGas(DryGasPvt::default()),
            GasPvtApproach::DryHumidGas => GasPvt::DryHumidGas(DryHumidGasPvt::default()),
            GasPvtApproach::WetHumidGas => GasPvt::WetHumidGas(WetHumidGasPvt::default()),
            GasPvtApproach::WetGas => GasPvt::WetGas(WetGasPvt::default()),
            GasPvtApproach::ThermalGas => GasPvt::ThermalGas(ThermalGasPvt::default()),
            GasPvtApproach::Co2Gas => GasPvt::Co2Gas(Co2GasPvt::default()),
            GasPvtApproach::H2Gas => GasPvt::H2Gas(H2GasPvt::default()),
        }
    }

    pub fn approach(&self) -> GasPvtApproach {
        match self {
            GasPvt::NoGas => GasPvtApproach::NoGas,
            GasPvt::DryGas(_) => GasPvtApproach::DryGas,
            GasPvt::DryHumidGas(_) => GasPvtApproach::DryHumidGas,
            GasPvt::WetHumidGas(_) => GasPvtApproach::WetHumidGas,
            GasPvt::WetGas(_) => GasPvtApproach::WetGas,
            GasPvt::ThermalGas(_) => GasPvtApproach::ThermalGas,
            GasPvt::Co2Gas(_) => GasPvtApproach::Co2Gas,
            GasPvt::H2Gas(_) => GasPvtApproach::H2Gas,
        }
    }

    pub fn set_approach(&mut self, approach: GasPvtApproach) {
        *self = Self::with_approach(approach);
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, GasPvt::NoGas)
    }

    pub fn real_pvt<T: GasPvtVariant>(&self) -> PvtResult<&T> {
        let active = self.approach();
        T::get(self).ok_or(PvtError::WrongApproach {
            requested: T::APPROACH.name(),
            active: active.name(),
        })
    }

    pub fn real_pvt_mut<T: GasPvtVariant>(&mut self) -> PvtResult<&mut T> {
        let active = self.approach();
        T::get_mut(self).ok_or(PvtError::WrongApproach {
            requested: T::APPROACH.name(),
            active: active.name(),
        })
    }
}

/// A concrete gas law that can sit inside [`GasPvt`].
pub trait GasPvtVariant: GasPvtLaw + Sized {
    const APPROACH: GasPvtApproach;

    fn get(pvt: &GasPvt) -> Option<&Self>;

    fn get_mut(pvt: &mut GasPvt) -> Option<&mut Self>;
}

macro_rules! gas_variants {
    ($($variant:ident => $law:ty),+ $(,)?) => {
        $(
            impl GasPvtVariant for $law {
                const APPROACH: GasPvtApproach = GasPvtApproach::$variant;

                fn get(pvt: &GasPvt) -> Option<&Self> {
                    match pvt {
                        GasPvt::$variant(law) => Some(law),
                        _ => None,
                    }
                }

                fn get_mut(pvt: &mut GasPvt) -> Option<&mut Self> {
                    match pvt {
                        GasPvt::$variant(law) => Some(law),
                        _ => None,
                    }
                }
            }

            impl From<$law> for GasPvt {
                fn from(law: $law) -> Self {
                    GasPvt::$variant(law)
                }
            }
        )+
    };
}

gas_variants! {
    DryGas => DryGasPvt,
    DryHumidGas => DryHumidGasPvt,
    WetHumidGas => WetHumidGasPvt,
    WetGas => WetGasPvt,
    ThermalGas => ThermalGasPvt,
    Co2Gas => Co2GasPvt,
    H2Gas => H2GasPvt,
}

impl GasPvtLaw for GasPvt {
    fn num_regions(&self) -> usize {
        dispatch!(self, law => law.num_regions(), 0)
    }

    fn inverse_formation_volume_factor(
        &self,
        reg: usize,
        t: Real,
        p: Real,
        rv: Real,
        rvw: Real,
    ) -> PvtResult<Real> {
        dispatch!(self, law => law.inverse_formation_volume_factor(reg, t, p, rv, rvw), Err(no_gas()))
    }

    fn saturated_inverse_formation_volume_factor(&self, reg: usize, t: Real, p: Real) -> PvtResult<Real> {
        dispatch!(self, law => law.saturated_inverse_formation_volume_factor(reg, t, p), Err(no_gas()))
    }

    fn viscosity(&self, reg: usize, t: Real, p: Real, rv: Real, rvw: Real) -> PvtResult<Real> {
        dispatch!(self, law => law.viscosity(reg, t, p, rv, rvw), Err(no_gas()))
    }

    fn saturated_viscosity(&self, reg: usize, t: Real, p: Real) -> PvtResult<Real> {
        dispatch!(self, law => law.saturated_viscosity(reg, t, p), Err(no_gas()))
    }

    fn saturated_oil_vaporization_factor(&self, reg: usize, t: Real, p: Real) -> PvtResult<Real> {
        dispatch!(self, law => law.saturated_oil_vaporization_factor(reg, t, p), Err(no_gas()))
    }

    fn saturated_oil_vaporization_factor_with_history(
        &self,
        reg: usize,
        t: Real,
        p: Real,
        so: Real,
        max_so: Real,
    ) -> PvtResult<Real> {
        dispatch!(
            self,
            law => law.saturated_oil_vaporization_factor_with_history(reg, t, p, so, max_so),
            Err(no_gas())
        )
    }

    fn saturated_water_vaporization_factor(&self, reg: usize, t: Real, p: Real) -> PvtResult<Real> {
        dispatch!(self, law => law.saturated_water_vaporization_factor(reg, t, p), Err(no_gas()))
    }

    fn saturated_water_vaporization_factor_salt(
        &self,
        reg: usize,
        t: Real,
        p: Real,
        salt: Real,
    ) -> PvtResult<Real> {
        dispatch!(
            self,
            law => law.saturated_water_vaporization_factor_salt(reg, t, p, salt),
            Err(no_gas())
        )
    }

    fn saturation_pressure(&self, reg: usize, t: Real, rv: Real) -> PvtResult<Real> {
        dispatch!(self, law => law.saturation_pressure(reg, t, rv), Err(no_gas()))
    }

    fn internal_energy(&self, reg: usize, t: Real, p: Real, rv: Real, rvw: Real) -> PvtResult<Real> {
        dispatch!(self, law => law.internal_energy(reg, t, p, rv, rvw), Err(no_gas()))
    }

    fn diffusion_coefficient(&self, t: Real, p: Real, comp: CompIdx) -> PvtResult<Real> {
        dispatch!(self, law => law.diffusion_coefficient(t, p, comp), Err(no_gas()))
    }

    fn hvap(&self, reg: usize) -> PvtResult<Real> {
        dispatch!(self, law => law.hvap(reg), Err(no_gas()))
    }

    fn mixing_energy(&self) -> bool {
        dispatch!(self, law => law.mixing_energy(), false)
    }

    fn set_vap_pars(&mut self, par1: Real, par2: Real) {
        dispatch!(self, law => law.set_vap_pars(par1, par2), ())
    }
}
