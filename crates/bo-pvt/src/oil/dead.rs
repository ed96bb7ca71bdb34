//! Dead oil (PVDO): no dissolved gas, properties depend on pressure only.

use crate::error::PvtResult;
use crate::law::OilPvtLaw;
use crate::pressure_table::{PressureTable, PvdRow};
use crate::validation::region;
use bo_core::Real;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct DeadOilPvt {
    tables: Arc<Vec<PressureTable>>,
}

impl DeadOilPvt {
    pub fn new() -> Self {
        Self::default()
    }

    /// One table of `(p, Bo, mu_o)` rows per region.
    pub fn from_regions(regions: &[Vec<PvdRow>]) -> PvtResult<Self> {
        let mut law = Self::new();
        for rows in regions {
            law.add_region(rows)?;
        }
        Ok(law)
    }

    pub fn add_region(&mut self, rows: &[PvdRow]) -> PvtResult<usize> {
        let table = PressureTable::from_rows(rows)?;
        let tables = Arc::make_mut(&mut self.tables);
        tables.push(table);
        Ok(tables.len() - 1)
    }

    fn table(&self, reg: usize) -> PvtResult<&PressureTable> {
        region(&self.tables, reg)
    }
}

impl OilPvtLaw for DeadOilPvt {
    fn num_regions(&self) -> usize {
        self.tables.len()
    }

    fn inverse_formation_volume_factor(&self, reg: usize, _t: Real, p: Real, _rs: Real) -> PvtResult<Real> {
        self.table(reg)?.inverse_b(p)
    }

    fn saturated_inverse_formation_volume_factor(&self, reg: usize, _t: Real, p: Real) -> PvtResult<Real> {
        self.table(reg)?.inverse_b(p)
    }

    fn viscosity(&self, reg: usize, t: Real, p: Real, _rs: Real) -> PvtResult<Real> {
        self.saturated_viscosity(reg, t, p)
    }

    fn saturated_viscosity(&self, reg: usize, _t: Real, p: Real) -> PvtResult<Real> {
        self.table(reg)?.viscosity(p)
    }

    fn saturated_gas_dissolution_factor(&self, reg: usize, _t: Real, _p: Real) -> PvtResult<Real> {
        self.table(reg)?;
        Ok(0.0)
    }

    fn saturation_pressure(&self, reg: usize, _t: Real, _rs: Real) -> PvtResult<Real> {
        self.table(reg)?;
        Ok(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PvtError;

    fn law() -> DeadOilPvt {
        DeadOilPvt::from_regions(&[vec![
            PvdRow::new(1e5, 1.2, 1.5e-3),
            PvdRow::new(2e7, 1.1, 2.0e-3),
            PvdRow::new(4e7, 1.05, 2.5e-3),
        ]])
        .unwrap()
    }

    #[test]
    fn pressure_only_dependence() {
        let law = law();
        let a = law.inverse_formation_volume_factor(0, 300.0, 2e7, 0.0).unwrap();
        let b = law.inverse_formation_volume_factor(0, 400.0, 2e7, 50.0).unwrap();
        assert_eq!(a, b);
        assert!((a - 1.0 / 1.1).abs() < 1e-14);
        assert!((law.viscosity(0, 350.0, 2e7, 10.0).unwrap() - 2e-3).abs() < 1e-15);
    }

    #[test]
    fn no_dissolved_gas() {
        let law = law();
        assert_eq!(law.saturated_gas_dissolution_factor(0, 350.0, 3e7).unwrap(), 0.0);
        assert_eq!(
            law.saturated_gas_dissolution_factor_with_history(0, 350.0, 3e7, 0.2, 0.8)
                .unwrap(),
            0.0
        );
        assert_eq!(law.saturation_pressure(0, 350.0, 10.0).unwrap(), 0.0);
    }

    #[test]
    fn thermal_queries_are_not_available() {
        let law = law();
        let err = law.internal_energy(0, 350.0, 1e7, 0.0).unwrap_err();
        assert!(err.is_not_implemented());
        assert!(err.to_string().contains("thermal option is not enabled"));
        assert_eq!(law.hvap(0).unwrap(), 0.0);
        assert!(!law.mixing_energy());
    }

    #[test]
    fn region_out_of_range() {
        assert_eq!(
            law().inverse_formation_volume_factor(3, 300.0, 1e7, 0.0),
            Err(PvtError::RegionOutOfRange {
                region: 3,
                num_regions: 1
            })
        );
    }
}
