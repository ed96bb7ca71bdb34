//! bo-pvt: black-oil PVT relations.
//!
//! Provides:
//! - Tabulated functions (1D, uniform-x 2D, regular 2D)
//! - Pure components (H2O, brine, CO2, H2) and brine-gas binaries
//! - The per-phase law contracts ([`OilPvtLaw`], [`GasPvtLaw`], [`WaterPvtLaw`])
//! - Every concrete oil, gas and water law
//! - The per-phase multiplexers [`OilPvt`], [`GasPvt`], [`WaterPvt`]
//!
//! # Example
//!
//! ```
//! use bo_pvt::{DeadOilPvt, OilPvt, OilPvtLaw, PvdRow};
//!
//! let dead = DeadOilPvt::from_regions(&[vec![
//!     PvdRow::new(1e5, 1.2, 1e-3),
//!     PvdRow::new(3e7, 1.1, 1.5e-3),
//! ]])
//! .unwrap();
//! let oil = OilPvt::from(dead);
//! let inv_b = oil.inverse_formation_volume_factor(0, 350.0, 2e7, 0.0).unwrap();
//! assert!(inv_b > 1.0 / 1.2);
//! ```

pub mod binary;
pub mod brine_gas;
pub mod components;
pub mod error;
pub mod gas;
pub mod law;
pub mod oil;
pub mod pressure_table;
pub(crate) mod saturation;
pub mod tabulated;
pub mod thermal;
pub mod undersaturated;
pub(crate) mod validation;
pub mod water;

pub use brine_gas::{
    BrineCo2Pvt, BrineGasPvt, BrineH2Pvt, Co2InBrine, EzrokhiCoefficients, H2InBrine, LiquidMixing,
    SaltMixing, SolubleGas,
};
pub use error::{PvtError, PvtResult};
pub use gas::{
    Co2GasPvt, DryGasPvt, DryHumidGasPvt, GasMixing, GasPvt, GasPvtApproach, GasPvtVariant, H2GasPvt,
    RwgSaltRecord, ThermalGasPvt, WetGasPvt, WetHumidGasPvt,
};
pub use law::{GasPvtLaw, OilPvtLaw, WaterPvtLaw};
pub use oil::{
    ConstantCompressibilityOilPvt, ConstantCompressibilityParams, ConstantRsDeadOilPvt, DeadOilPvt,
    LiveOilPvt, OilPvt, OilPvtApproach, OilPvtVariant, ThermalOilPvt,
};
pub use pressure_table::PvdRow;
pub use tabulated::{InterpolationPolicy, Tabulated1D, UniformTabulated2D, UniformXTabulated2D};
pub use thermal::{JouleThomson, ThermalExpansion};
pub use undersaturated::{PvtxRecord, PvtxSample};
pub use water::{
    BrineRow, ConstantCompressibilityBrinePvt, ConstantCompressibilityWaterPvt, ThermalWaterPvt,
    WaterPvt, WaterPvtApproach, WaterPvtVariant,
};
