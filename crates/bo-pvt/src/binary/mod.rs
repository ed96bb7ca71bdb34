//! Binary coefficients of the gas storage systems.
//!
//! - [`BrineCo2`]: CO2 solubility in brine and water vaporization (Duan-Sun,
//!   Spycher-Pruess), diffusion coefficients
//! - [`BrineH2`]: H2 solubility in brine (Li et al.), Fuller diffusion

pub mod brine_co2;
pub mod brine_h2;

pub use brine_co2::{BrineCo2, MoleFractions, SaltActivityModel};
pub use brine_h2::BrineH2;
