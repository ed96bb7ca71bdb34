//! Pure components used by the correlation-based laws.

pub mod brine;
pub mod co2;
pub mod h2;
pub mod h2o;
pub mod tables;

pub use brine::Brine;
pub use co2::Co2;
pub use h2::H2;
pub use h2o::H2o;
pub use tables::{GasPropertyTables, co2_tables, h2_tables};
