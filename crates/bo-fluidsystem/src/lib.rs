//! bo-fluidsystem: the black-oil fluid system.
//!
//! Combines one oil, gas and water multiplexer with per-region surface
//! densities and the feature switches (dissolved gas, vaporized oil, ...)
//! into phase properties of a [`FluidState`].
//!
//! # Example
//!
//! ```
//! use bo_core::PhaseIdx;
//! use bo_fluidsystem::{FluidSystem, SimpleFluidState};
//! use bo_pvt::{DeadOilPvt, PvdRow};
//!
//! let dead = DeadOilPvt::from_regions(&[vec![
//!     PvdRow::new(1e5, 1.2, 1e-3),
//!     PvdRow::new(3e7, 1.1, 1.5e-3),
//! ]])
//! .unwrap();
//!
//! let mut fs = FluidSystem::new(1);
//! fs.set_enable_dissolved_gas(false);
//! fs.set_reference_densities(800.0, 1000.0, 1.0, 0).unwrap();
//! fs.set_oil_pvt(dead.into());
//! fs.init_end().unwrap();
//!
//! let state = SimpleFluidState::new(3e7, 350.0);
//! let rho = fs.density(&state, PhaseIdx::Oil, 0).unwrap();
//! assert!((rho - 800.0 / 1.1).abs() < 1e-9);
//! ```

pub mod conversions;
pub mod error;
pub mod evaluation;
pub mod fluid_state;
pub mod fluid_system;
pub mod parameter_cache;

pub use error::{FluidSystemError, FluidSystemResult};
pub use fluid_state::{FluidState, SimpleFluidState};
pub use fluid_system::FluidSystem;
pub use parameter_cache::ParameterCache;
