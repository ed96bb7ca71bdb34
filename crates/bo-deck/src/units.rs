//! Conversion of deck values to SI.

use crate::schema::UnitSystem;
use bo_core::units::deck;
use bo_core::{Diffusivity, MolarMass, Real};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitConverter {
    system: UnitSystem,
}

impl UnitConverter {
    pub fn new(system: UnitSystem) -> Self {
        Self { system }
    }

    fn metric(&self, v: Real, f: impl FnOnce(Real) -> Real) -> Real {
        match self.system {
            UnitSystem::Metric => f(v),
            UnitSystem::Si => v,
        }
    }

    pub fn pressure(&self, v: Real) -> Real {
        self.metric(v, deck::bar_to_pa)
    }

    pub fn viscosity(&self, v: Real) -> Real {
        self.metric(v, deck::centipoise_to_pa_s)
    }

    pub fn temperature(&self, v: Real) -> Real {
        self.metric(v, deck::celsius_to_kelvin)
    }

    /// Compressibility or viscosibility.
    pub fn compressibility(&self, v: Real) -> Real {
        self.metric(v, deck::per_bar_to_per_pa)
    }

    pub fn thermal_expansion(&self, v: Real) -> Real {
        self.metric(v, deck::per_celsius_to_per_kelvin)
    }

    /// Quadratic expansion coefficient, per degree squared.
    pub fn thermal_expansion2(&self, v: Real) -> Real {
        self.metric(v, |v| {
            deck::per_celsius_to_per_kelvin(deck::per_celsius_to_per_kelvin(v))
        })
    }

    /// Specific energy or specific heat (kJ based in METRIC).
    pub fn specific_energy(&self, v: Real) -> Real {
        self.metric(v, deck::kj_per_kg_to_j_per_kg)
    }

    /// Joule-Thomson coefficient, °C/bar in METRIC.
    pub fn joule_thomson(&self, v: Real) -> Real {
        self.metric(v, deck::per_bar_to_per_pa)
    }

    pub fn diffusivity(&self, v: Real) -> Real {
        self.metric(v, |v| {
            use uom::si::area::square_meter;
            use uom::si::diffusion_coefficient::square_meter_per_second;
            use uom::si::f64::{Area, Time};
            use uom::si::time::day;
            let d: Diffusivity = Area::new::<square_meter>(v) / Time::new::<day>(1.0);
            d.get::<square_meter_per_second>()
        })
    }

    pub fn molar_mass(&self, v: Real) -> Real {
        self.metric(v, |v| {
            use uom::si::molar_mass::{gram_per_mole, kilogram_per_mole};
            MolarMass::new::<gram_per_mole>(v).get::<kilogram_per_mole>()
        })
    }
}
