//! bo-core: shared foundation for the black-oil PVT crates.
//!
//! Contains:
//! - units (uom SI types and deck-unit helpers)
//! - numeric (Real + tolerances + float helpers)
//! - indices (canonical phase and component indices)
//! - error (shared error types)

pub mod error;
pub mod indices;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use indices::*;
pub use numeric::*;
pub use units::*;
