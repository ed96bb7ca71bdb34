//! Oil phase laws and the [`OilPvt`] multiplexer.
//!
//! The multiplexer is a closed enum over every oil law. The approach tag is
//! derived from the active variant, so tag and payload cannot disagree.

pub mod constant_compressibility;
pub mod constant_rs_dead;
pub mod dead;
pub mod live;
pub mod thermal;

pub use constant_compressibility::{ConstantCompressibilityOilPvt, ConstantCompressibilityParams};
pub use constant_rs_dead::ConstantRsDeadOilPvt;
pub use dead::DeadOilPvt;
pub use live::LiveOilPvt;
pub use thermal::ThermalOilPvt;

use crate::brine_gas::{BrineCo2Pvt, BrineH2Pvt};
use crate::error::{PvtError, PvtResult};
use crate::law::OilPvtLaw;
use bo_core::{CompIdx, Real};

/// Tag of the active oil law.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OilPvtApproach {
    #[default]
    NoOil,
    LiveOil,
    DeadOil,
    ConstantCompressibilityOil,
    ConstantRsDeadOil,
    ThermalOil,
    BrineCo2,
    BrineH2,
}

impl OilPvtApproach {
    pub const ALL: [OilPvtApproach; 8] = [
        OilPvtApproach::NoOil,
        OilPvtApproach::LiveOil,
        OilPvtApproach::DeadOil,
        OilPvtApproach::ConstantCompressibilityOil,
        OilPvtApproach::ConstantRsDeadOil,
        OilPvtApproach::ThermalOil,
        OilPvtApproach::BrineCo2,
        OilPvtApproach::BrineH2,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OilPvtApproach::NoOil => "NoOil",
            OilPvtApproach::LiveOil => "LiveOil",
            OilPvtApproach::DeadOil => "DeadOil",
            OilPvtApproach::ConstantCompressibilityOil => "ConstantCompressibilityOil",
            OilPvtApproach::ConstantRsDeadOil => "ConstantRsDeadOil",
            OilPvtApproach::ThermalOil => "ThermalOil",
            OilPvtApproach::BrineCo2 => "BrineCo2",
            OilPvtApproach::BrineH2 => "BrineH2",
        }
    }
}

/// The oil law selected for a deck.
#[derive(Debug, Clone, Default)]
pub enum OilPvt {
    #[default]
    NoOil,
    LiveOil(LiveOilPvt),
    DeadOil(DeadOilPvt),
    ConstantCompressibilityOil(ConstantCompressibilityOilPvt),
    ConstantRsDeadOil(ConstantRsDeadOilPvt),
    ThermalOil(ThermalOilPvt),
    BrineCo2(BrineCo2Pvt),
    BrineH2(BrineH2Pvt),
}

/// Run `$body` with `$law` bound to the active law, `$none` for `NoOil`.
macro_rules! dispatch {
    ($pvt:expr, $law:ident => $body:expr, $none:expr) => {
        match $pvt {
            OilPvt::NoOil => $none,
            OilPvt::LiveOil($law) => $body,
            OilPvt::DeadOil($law) => $body,
            OilPvt::ConstantCompressibilityOil($law) => $body,
            OilPvt::ConstantRsDeadOil($law) => $body,
            OilPvt::ThermalOil($law) => $body,
            OilPvt::BrineCo2($law) => $body,
            OilPvt::BrineH2($law) => $body,
        }
    };
}

fn no_oil() -> PvtError {
    PvtError::not_implemented("Oil PVT of this deck!")
}

impl OilPvt {
    /// Default-constructed law for `approach`.
    pub fn with_approach(approach: OilPvtApproach) -> Self {
        match approach {
            OilPvtApproach::NoOil => OilPvt::NoOil,
            OilPvtApproach::LiveOil => OilPvt::LiveOil(LiveOilPvt::default()),
            OilPvtApproach::DeadOil => OilPvt::DeadOil(DeadOilPvt::default()),
            OilPvtApproach::ConstantCompressibilityOil => {
                OilPvt::ConstantCompressibilityOil(ConstantCompressibilityOilPvt::default())
            }
            OilPvtApproach::ConstantRsDeadOil => {
                OilPvt::ConstantRsDeadOil(ConstantRsDeadOilPvt::default())
            }
            OilPvtApproach::ThermalOil => OilPvt::ThermalOil(ThermalOilPvt::default()),
            OilPvtApproach::BrineCo2 => OilPvt::BrineCo2(BrineCo2Pvt::default()),
            OilPvtApproach::BrineH2 => OilPvt::BrineH2(BrineH2Pvt::default()),
        }
    }

    pub fn approach(&self) -> OilPvtApproach {
        match self {
            OilPvt::NoOil => OilPvtApproach::NoOil,
            OilPvt::LiveOil(_) => OilPvtApproach::LiveOil,
            OilPvt::DeadOil(_) => OilPvtApproach::DeadOil,
            OilPvt::ConstantCompressibilityOil(_) => OilPvtApproach::ConstantCompressibilityOil,
            OilPvt::ConstantRsDeadOil(_) => OilPvtApproach::ConstantRsDeadOil,
            OilPvt::ThermalOil(_) => OilPvtApproach::ThermalOil,
            OilPvt::BrineCo2(_) => OilPvtApproach::BrineCo2,
            OilPvt::BrineH2(_) => OilPvtApproach::BrineH2,
        }
    }

    /// Replace the active law with a default-constructed one.
    pub fn set_approach(&mut self, approach: OilPvtApproach) {
        *self = Self::with_approach(approach);
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, OilPvt::NoOil)
    }

    /// The active law as its concrete type.
    pub fn real_pvt<T: OilPvtVariant>(&self) -> PvtResult<&T> {
        let active = self.approach();
        T::get(self).ok_or(PvtError::WrongApproach {
            requested: T::APPROACH.name(),
            active: active.name(),
        })
    }

    pub fn real_pvt_mut<T: OilPvtVariant>(&mut self) -> PvtResult<&mut T> {
        let active = self.approach();
        T::get_mut(self).ok_or(PvtError::WrongApproach {
            requested: T::APPROACH.name(),
            active: active.name(),
        })
    }
}

/// A concrete oil law that can sit inside [`OilPvt`].
pub trait OilPvtVariant: OilPvtLaw + Sized {
    const APPROACH: OilPvtApproach;

    fn get(pvt: &OilPvt) -> Option<&Self>;

    fn get_mut(pvt: &mut OilPvt) -> Option<&mut Self>;
}

macro_rules! oil_variants {
    ($($variant:ident => $law:ty),+ $(,)?) => {
        $(
            impl OilPvtVariant for $law {
                const APPROACH: OilPvtApproach = OilPvtApproach::$variant;

                fn get(pvt: &OilPvt) -> Option<&Self> {
                    match pvt {
                        OilPvt::$variant(law) => Some(law),
                        _ => None,
                    }
                }

                fn get_mut(pvt: &mut OilPvt) -> Option<&mut Self> {
                    match pvt {
                        OilPvt::$variant(law) => Some(law),
                        _ => None,
                    }
                }
            }

            impl From<$law> for OilPvt {
                fn from(law: $law) -> Self {
                    OilPvt::$variant(law)
                }
            }
        )+
    };
}

oil_variants! {
    LiveOil => LiveOilPvt,
    DeadOil => DeadOilPvt,
    ConstantCompressibilityOil => ConstantCompressibilityOilPvt,
    ConstantRsDeadOil => ConstantRsDeadOilPvt,
    ThermalOil => ThermalOilPvt,
    BrineCo2 => BrineCo2Pvt,
    BrineH2 => BrineH2Pvt,
}

impl OilPvtLaw for OilPvt {
    fn num_regions(&self) -> usize {
        dispatch!(self, law => law.num_regions(), 0)
    }

    fn inverse_formation_volume_factor(&self, reg: usize, t: Real, p: Real, rs: Real) -> PvtResult<Real> {
        dispatch!(self, law => law.inverse_formation_volume_factor(reg, t, p, rs), Err(no_oil()))
    }

    fn saturated_inverse_formation_volume_factor(&self, reg: usize, t: Real, p: Real) -> PvtResult<Real> {
        dispatch!(self, law => law.saturated_inverse_formation_volume_factor(reg, t, p), Err(no_oil()))
    }

    fn viscosity(&self, reg: usize, t: Real, p: Real, rs: Real) -> PvtResult<Real> {
        dispatch!(self, law => law.viscosity(reg, t, p, rs), Err(no_oil()))
    }

    fn saturated_viscosity(&self, reg: usize, t: Real, p: Real) -> PvtResult<Real> {
        dispatch!(self, law => OilPvtLaw::saturated_viscosity(law, reg, t, p), Err(no_oil()))
    }

    fn saturated_gas_dissolution_factor(&self, reg: usize, t: Real, p: Real) -> PvtResult<Real> {
        dispatch!(self, law => OilPvtLaw::saturated_gas_dissolution_factor(law, reg, t, p), Err(no_oil()))
    }

    fn saturated_gas_dissolution_factor_with_history(
        &self,
        reg: usize,
        t: Real,
        p: Real,
        so: Real,
        max_so: Real,
    ) -> PvtResult<Real> {
        dispatch!(
            self,
            law => law.saturated_gas_dissolution_factor_with_history(reg, t, p, so, max_so),
            Err(no_oil())
        )
    }

    fn saturation_pressure(&self, reg: usize, t: Real, rs: Real) -> PvtResult<Real> {
        dispatch!(self, law => OilPvtLaw::saturation_pressure(law, reg, t, rs), Err(no_oil()))
    }

    fn internal_energy(&self, reg: usize, t: Real, p: Real, rs: Real) -> PvtResult<Real> {
        dispatch!(self, law => OilPvtLaw::internal_energy(law, reg, t, p, rs), Err(no_oil()))
    }

    fn diffusion_coefficient(&self, t: Real, p: Real, comp: CompIdx) -> PvtResult<Real> {
        dispatch!(self, law => OilPvtLaw::diffusion_coefficient(law, t, p, comp), Err(no_oil()))
    }

    fn hvap(&self, reg: usize) -> PvtResult<Real> {
        dispatch!(self, law => OilPvtLaw::hvap(law, reg), Err(no_oil()))
    }

    fn mixing_energy(&self) -> bool {
        dispatch!(self, law => OilPvtLaw::mixing_energy(law), false)
    }

    fn set_vap_pars(&mut self, par1: Real, par2: Real) {
        dispatch!(self, law => OilPvtLaw::set_vap_pars(law, par1, par2), ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pressure_table::PvdRow;

    fn dead() -> DeadOilPvt {
        DeadOilPvt::from_regions(&[vec![PvdRow::new(1e5, 1.2, 1e-3), PvdRow::new(3e7, 1.1, 1.5e-3)]])
            .unwrap()
    }

    #[test]
    fn no_oil_fails_every_query() {
        let pvt = OilPvt::default();
        assert!(!pvt.is_active());
        assert_eq!(pvt.num_regions(), 0);
        let err = pvt.inverse_formation_volume_factor(0, 350.0, 2e7, 0.0).unwrap_err();
        assert_eq!(err.to_string(), "Not implemented: Oil PVT of this deck!");
        assert!(pvt.saturation_pressure(0, 350.0, 10.0).unwrap_err().is_not_implemented());
        assert!(pvt.hvap(0).is_err());
        assert!(!pvt.mixing_energy());
    }

    #[test]
    fn tag_follows_payload() {
        for approach in OilPvtApproach::ALL {
            let mut pvt = OilPvt::default();
            pvt.set_approach(approach);
            assert_eq!(pvt.approach(), approach);
            assert_eq!(pvt.is_active(), approach != OilPvtApproach::NoOil);
        }
        let pvt = OilPvt::from(dead());
        assert_eq!(pvt.approach(), OilPvtApproach::DeadOil);
    }

    #[test]
    fn typed_access_checks_the_tag() {
        let mut pvt = OilPvt::from(dead());
        assert_eq!(pvt.real_pvt::<DeadOilPvt>().unwrap().num_regions(), 1);
        let err = pvt.real_pvt::<LiveOilPvt>().unwrap_err();
        assert_eq!(
            err,
            PvtError::WrongApproach {
                requested: "LiveOil",
                active: "DeadOil"
            }
        );
        assert!(pvt.real_pvt_mut::<DeadOilPvt>().is_ok());
        assert!(pvt.real_pvt_mut::<BrineCo2Pvt>().is_err());
    }

    #[test]
    fn forwards_to_active_law() {
        let law = dead();
        let pvt = OilPvt::from(law.clone());
        assert_eq!(
            pvt.inverse_formation_volume_factor(0, 350.0, 1e7, 0.0).unwrap(),
            law.inverse_formation_volume_factor(0, 350.0, 1e7, 0.0).unwrap()
        );
        assert_eq!(pvt.num_regions(), 1);
    }

    #[test]
    fn clones_are_independent() {
        let mut a = OilPvt::from(dead());
        let b = a.clone();
        a.real_pvt_mut::<DeadOilPvt>()
            .unwrap()
            .add_region(&[PvdRow::new(1e5, 1.3, 2e-3)])
            .unwrap();
        assert_eq!(a.num_regions(), 2);
        assert_eq!(b.num_regions(), 1);
    }
}
