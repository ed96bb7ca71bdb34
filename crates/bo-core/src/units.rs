// bo-core/src/units.rs

use uom::si::f64::{
    AvailableEnergy as UomAvailableEnergy, DiffusionCoefficient as UomDiffusionCoefficient,
    DynamicViscosity as UomDynamicViscosity, MolarMass as UomMolarMass,
    Pressure as UomPressure, TemperatureInterval as UomTemperatureInterval,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Diffusivity = UomDiffusionCoefficient;
pub type DynVisc = UomDynamicViscosity;
pub type MolarMass = UomMolarMass;
pub type Pressure = UomPressure;
pub type SpecificEnergy = UomAvailableEnergy;
pub type TempInterval = UomTemperatureInterval;
pub type Temperature = UomThermodynamicTemperature;

/// Deck (METRIC) unit helpers. Each returns the plain SI magnitude.
pub mod deck {
    use super::*;

    #[inline]
    pub fn bar_to_pa(v: f64) -> f64 {
        use uom::si::pressure::{bar, pascal};
        Pressure::new::<bar>(v).get::<pascal>()
    }

    #[inline]
    pub fn pa_to_bar(v: f64) -> f64 {
        use uom::si::pressure::{bar, pascal};
        Pressure::new::<pascal>(v).get::<bar>()
    }

    /// Compressibility given per bar, returned per Pa.
    #[inline]
    pub fn per_bar_to_per_pa(v: f64) -> f64 {
        v / bar_to_pa(1.0)
    }

    #[inline]
    pub fn centipoise_to_pa_s(v: f64) -> f64 {
        use uom::si::dynamic_viscosity::{centipoise, pascal_second};
        DynVisc::new::<centipoise>(v).get::<pascal_second>()
    }

    #[inline]
    pub fn pa_s_to_centipoise(v: f64) -> f64 {
        use uom::si::dynamic_viscosity::{centipoise, pascal_second};
        DynVisc::new::<pascal_second>(v).get::<centipoise>()
    }

    #[inline]
    pub fn celsius_to_kelvin(v: f64) -> f64 {
        use uom::si::thermodynamic_temperature::{degree_celsius, kelvin};
        Temperature::new::<degree_celsius>(v).get::<kelvin>()
    }

    #[inline]
    pub fn kelvin_to_celsius(v: f64) -> f64 {
        use uom::si::thermodynamic_temperature::{degree_celsius, kelvin};
        Temperature::new::<kelvin>(v).get::<degree_celsius>()
    }

    /// Thermal expansion coefficients are per degree; Celsius and Kelvin
    /// intervals coincide.
    #[inline]
    pub fn per_celsius_to_per_kelvin(v: f64) -> f64 {
        use uom::si::temperature_interval::{degree_celsius, kelvin};
        v / TempInterval::new::<degree_celsius>(1.0).get::<kelvin>()
    }

    /// Specific heat in kJ/(kg·K), returned in J/(kg·K).
    #[inline]
    pub fn kj_per_kg_to_j_per_kg(v: f64) -> f64 {
        use uom::si::available_energy::{joule_per_kilogram, kilojoule_per_kilogram};
        SpecificEnergy::new::<kilojoule_per_kilogram>(v).get::<joule_per_kilogram>()
    }
}

pub mod constants {
    /// Universal gas constant [J/(mol K)]
    pub const R: f64 = 8.314472;

    /// Standard atmosphere [Pa]
    pub const ATMOSPHERE: f64 = 101_325.0;

    /// Surface (stock tank) temperature [K], 15.56 °C
    pub const SURFACE_TEMPERATURE: f64 = 288.71;

    /// Surface (stock tank) pressure [Pa]
    pub const SURFACE_PRESSURE: f64 = 1.01325e5;

    /// Reference temperature of the viscosity scaling tables [K]
    pub const VISCREF_TEMPERATURE: f64 = 293.15;
}

#[cfg(test)]
mod tests {
    use super::deck::*;

    #[test]
    fn deck_units_convert_to_si() {
        assert!((bar_to_pa(1.0) - 1e5).abs() < 1e-9);
        assert!((pa_to_bar(2e5) - 2.0).abs() < 1e-12);
        assert!((per_bar_to_per_pa(1e-5) - 1e-10).abs() < 1e-22);
        assert!((centipoise_to_pa_s(1.0) - 1e-3).abs() < 1e-15);
        assert!((celsius_to_kelvin(20.0) - 293.15).abs() < 1e-9);
        assert!((kelvin_to_celsius(273.15)).abs() < 1e-9);
        assert!((kj_per_kg_to_j_per_kg(4.2) - 4200.0).abs() < 1e-9);
    }
}
