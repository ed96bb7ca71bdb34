//! Density and enthalpy tables of the pure gases, built once per process.

use super::co2::Co2;
use super::h2::H2;
use crate::error::PvtResult;
use crate::tabulated::UniformTabulated2D;
use bo_core::Real;
use std::sync::{Arc, OnceLock};
use tracing::debug;

pub const TEMPERATURE_RANGE: (Real, Real) = (250.0, 600.0);
pub const PRESSURE_RANGE: (Real, Real) = (1e5, 1e8);

/// Gas density [kg/m³] and specific enthalpy [J/kg] over (T, p).
#[derive(Debug, Clone, PartialEq)]
pub struct GasPropertyTables {
    pub density: UniformTabulated2D,
    pub enthalpy: UniformTabulated2D,
}

impl GasPropertyTables {
    /// Sample `state(t, p) -> (density, enthalpy)` on an `nt × np` grid.
    pub fn sample(
        nt: usize,
        np: usize,
        state: impl Fn(Real, Real) -> PvtResult<(Real, Real)>,
    ) -> PvtResult<Self> {
        let (t_min, t_max) = TEMPERATURE_RANGE;
        let (p_min, p_max) = PRESSURE_RANGE;
        let density =
            UniformTabulated2D::from_fn((t_min, t_max, nt), (p_min, p_max, np), |t, p| {
                Ok(state(t, p)?.0)
            })?;
        let enthalpy =
            UniformTabulated2D::from_fn((t_min, t_max, nt), (p_min, p_max, np), |t, p| {
                Ok(state(t, p)?.1)
            })?;
        Ok(Self { density, enthalpy })
    }
}

type SharedTables = PvtResult<Arc<GasPropertyTables>>;

static CO2_TABLES: OnceLock<SharedTables> = OnceLock::new();
static H2_TABLES: OnceLock<SharedTables> = OnceLock::new();

pub fn co2_tables() -> SharedTables {
    CO2_TABLES
        .get_or_init(|| {
            debug!(target: "bo_pvt::tables", "sampling CO2 property tables");
            GasPropertyTables::sample(141, 400, Co2::eos_state).map(Arc::new)
        })
        .clone()
}

pub fn h2_tables() -> SharedTables {
    H2_TABLES
        .get_or_init(|| {
            debug!(target: "bo_pvt::tables", "sampling H2 property tables");
            GasPropertyTables::sample(36, 101, H2::eos_state).map(Arc::new)
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_shared() {
        let a = co2_tables().unwrap();
        let b = co2_tables().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.density.x_range(), TEMPERATURE_RANGE);
        assert_eq!(a.density.y_range(), PRESSURE_RANGE);
    }

    #[test]
    fn out_of_grid_needs_extrapolation() {
        let tables = h2_tables().unwrap();
        assert!(tables.density.eval(700.0, 1e6, false).is_err());
        assert!(tables.density.eval(700.0, 1e6, true).unwrap() > 0.0);
    }
}
