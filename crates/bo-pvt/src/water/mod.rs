//! Water phase laws and the [`WaterPvt`] multiplexer.

pub mod brine;
pub mod constant_compressibility;
pub mod thermal;

pub use brine::{BrineRow, ConstantCompressibilityBrinePvt};
pub use constant_compressibility::ConstantCompressibilityWaterPvt;
pub use thermal::ThermalWaterPvt;

use crate::brine_gas::{BrineCo2Pvt, BrineH2Pvt};
use crate::error::{PvtError, PvtResult};
use crate::law::WaterPvtLaw;
use bo_core::{CompIdx, Real};

/// Tag of the active water law.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WaterPvtApproach {
    #[default]
    NoWater,
    ConstantCompressibilityBrine,
    ConstantCompressibilityWater,
    ThermalWater,
    BrineCo2,
    BrineH2,
}

impl WaterPvtApproach {
    pub const ALL: [WaterPvtApproach; 6] = [
        WaterPvtApproach::NoWater,
        WaterPvtApproach::ConstantCompressibilityBrine,
        WaterPvtApproach::ConstantCompressibilityWater,
        WaterPvtApproach::ThermalWater,
        WaterPvtApproach::BrineCo2,
        WaterPvtApproach::BrineH2,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WaterPvtApproach::NoWater => "NoWater",
            WaterPvtApproach::ConstantCompressibilityBrine => "ConstantCompressibilityBrine",
            WaterPvtApproach::ConstantCompressibilityWater => "ConstantCompressibilityWater",
            WaterPvtApproach::ThermalWater => "ThermalWater",
            WaterPvtApproach::BrineCo2 => "BrineCo2",
            WaterPvtApproach::BrineH2 => "BrineH2",
        }
    }
}

/// The water law selected for a deck.
#[derive(Debug, Clone, Default)]
pub enum WaterPvt {
    #[default]
    NoWater,
    ConstantCompressibilityBrine(ConstantCompressibilityBrinePvt),
    ConstantCompressibilityWater(ConstantCompressibilityWaterPvt),
    ThermalWater(ThermalWaterPvt),
    BrineCo2(BrineCo2Pvt),
    BrineH2(BrineH2Pvt),
}

macro_rules! dispatch {
    ($pvt:expr, $law:ident => $body:expr, $none:expr) => {
        match $pvt {
            WaterPvt::NoWater => $none,
            WaterPvt::ConstantCompressibilityBrine($law) => $body,
            WaterPvt::ConstantCompressibilityWater($law) => $body,
            WaterPvt::ThermalWater($law) => $body,
            WaterPvt::BrineCo2($law) => $body,
            WaterPvt::BrineH2($law) => $body,
        }
    };
}

fn no_water() -> PvtError {
    PvtError::not_implemented("Water PVT of this deck!")
}

impl WaterPvt {
    pub fn with_approach(approach: WaterPvtApproach) -> Self {
        match approach {
            WaterPvtApproach::NoWater => WaterPvt::NoWater,
            WaterPvtApproach::ConstantCompressibilityBrine => {
                WaterPvt::ConstantCompressibilityBrine(ConstantCompressibilityBrinePvt::default())
            }
            WaterPvtApproach::ConstantCompressibilityWater => {
                WaterPvt::ConstantCompressibilityWater(ConstantCompressibilityWaterPvt::default())
            }
            WaterPvtApproach::ThermalWater => WaterPvt::ThermalWater(ThermalWaterPvt::default()),
            WaterPvtApproach::BrineCo2 => WaterPvt::BrineCo2(BrineCo2Pvt::default()),
            WaterPvtApproach::BrineH2 => WaterPvt::BrineH2(BrineH2Pvt::default()),
        }
    }

    pub fn approach(&self) -> WaterPvtApproach {
        match self {
            WaterPvt::NoWater => WaterPvtApproach::NoWater,
            WaterPvt::ConstantCompressibilityBrine(_) => WaterPvtApproach::ConstantCompressibilityBrine,
            WaterPvt::ConstantCompressibilityWater(_) => WaterPvtApproach::ConstantCompressibilityWater,
            WaterPvt::ThermalWater(_) => WaterPvtApproach::ThermalWater,
            WaterPvt::BrineCo2(_) => WaterPvtApproach::BrineCo2,
            WaterPvt::BrineH2(_) => WaterPvtApproach::BrineH2,
        }
    }

    pub fn set_approach(&mut self, approach: WaterPvtApproach) {
        *self = Self::with_approach(approach);
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, WaterPvt::NoWater)
    }

    pub fn real_pvt<T: WaterPvtVariant>(&self) -> PvtResult<&T> {
        let active = self.approach();
        T::get(self).ok_or(PvtError::WrongApproach {
            requested: T::APPROACH.name(),
            active: active.name(),
        })
    }

    pub fn real_pvt_mut<T: WaterPvtVariant>(&mut self) -> PvtResult<&mut T> {
        let active = self.approach();
        T::get_mut(self).ok_or(PvtError::WrongApproach {
            requested: T::APPROACH.name(),
            active: active.name(),
        })
    }
}

/// A concrete water law that can sit inside [`WaterPvt`].
pub trait WaterPvtVariant: WaterPvtLaw + Sized {
    const APPROACH: WaterPvtApproach;

    fn get(pvt: &WaterPvt) -> Option<&Self>;

    fn get_mut(pvt: &mut WaterPvt) -> Option<&mut Self>;
}

macro_rules! water_variants {
    ($($variant:ident => $law:ty),+ $(,)?) => {
        $(
            impl WaterPvtVariant for $law {
                const APPROACH: WaterPvtApproach = WaterPvtApproach::$variant;

                fn get(pvt: &WaterPvt) -> Option<&Self> {
                    match pvt {
                        WaterPvt::$variant(law) => Some(law),
                        _ => None,
                    }
                }

                fn get_mut(pvt: &mut WaterPvt) -> Option<&mut Self> {
                    match pvt {
                        WaterPvt::$variant(law) => Some(law),
                        _ => None,
                    }
                }
            }

            impl From<$law> for WaterPvt {
                fn from(law: $law) -> Self {
                    WaterPvt::$variant(law)
                }
            }
        )+
    };
}

water_variants! {
    ConstantCompressibilityBrine => ConstantCompressibilityBrinePvt,
    ConstantCompressibilityWater => ConstantCompressibilityWaterPvt,
    ThermalWater => ThermalWaterPvt,
    BrineCo2 => BrineCo2Pvt,
    BrineH2 => BrineH2Pvt,
}

impl WaterPvtLaw for WaterPvt {
    fn num_regions(&self) -> usize {
        dispatch!(self, law => WaterPvtLaw::num_regions(law), 0)
    }

    fn inverse_formation_volume_factor(
        &self,
        reg: usize,
        t: Real,
        p: Real,
        rsw: Real,
        salt: Real,
    ) -> PvtResult<Real> {
        dispatch!(
            self,
            law => WaterPvtLaw::inverse_formation_volume_factor(law, reg, t, p, rsw, salt),
            Err(no_water())
        )
    }

    fn saturated_inverse_formation_volume_factor(
        &self,
        reg: usize,
        t: Real,
        p: Real,
        salt: Real,
    ) -> PvtResult<Real> {
        dispatch!(
            self,
            law => WaterPvtLaw::saturated_inverse_formation_volume_factor(law, reg, t, p, salt),
            Err(no_water())
        )
    }

    fn viscosity(&self, reg: usize, t: Real, p: Real, rsw: Real, salt: Real) -> PvtResult<Real> {
        dispatch!(self, law => WaterPvtLaw::viscosity(law, reg, t, p, rsw, salt), Err(no_water()))
    }

    fn saturated_viscosity(&self, reg: usize, t: Real, p: Real, salt: Real) -> PvtResult<Real> {
        dispatch!(self, law => WaterPvtLaw::saturated_viscosity(law, reg, t, p, salt), Err(no_water()))
    }

    fn saturated_gas_dissolution_factor(
        &self,
        reg: usize,
        t: Real,
        p: Real,
        salt: Real,
    ) -> PvtResult<Real> {
        dispatch!(
            self,
            law => WaterPvtLaw::saturated_gas_dissolution_factor(law, reg, t, p, salt),
            Err(no_water())
        )
    }

    fn saturation_pressure(&self, reg: usize, t: Real, rsw: Real, salt: Real) -> PvtResult<Real> {
        dispatch!(
            self,
            law => WaterPvtLaw::saturation_pressure(law, reg, t, rsw, salt),
            Err(no_water())
        )
    }

    fn internal_energy(&self, reg: usize, t: Real, p: Real, rsw: Real, salt: Real) -> PvtResult<Real> {
        dispatch!(
            self,
            law => WaterPvtLaw::internal_energy(law, reg, t, p, rsw, salt),
            Err(no_water())
        )
    }

    fn diffusion_coefficient(&self, t: Real, p: Real, comp: CompIdx) -> PvtResult<Real> {
        dispatch!(self, law => WaterPvtLaw::diffusion_coefficient(law, t, p, comp), Err(no_water()))
    }

    fn hvap(&self, reg: usize) -> PvtResult<Real> {
        dispatch!(self, law => WaterPvtLaw::hvap(law, reg), Err(no_water()))
    }

    fn mixing_energy(&self) -> bool {
        dispatch!(self, law => WaterPvtLaw::mixing_energy(law), false)
    }

    fn set_vap_pars(&mut self, par1: Real, par2: Real) {
        dispatch!(self, law => WaterPvtLaw::set_vap_pars(law, par1, par2), ())
    }
}
