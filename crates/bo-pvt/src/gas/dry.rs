//! Dry gas (PVDG): no vaporized oil or water, properties depend on pressure only.

use crate::error::PvtResult;
use crate::law::GasPvtLaw;
use crate::pressure_table::{PressureTable, PvdRow};
use crate::validation::region;
use bo_core::Real;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct DryGasPvt {
    tables: Arc<Vec<PressureTable>>,
}

impl DryGasPvt {
    pub fn new() -> Self {
        Self::default()
    }

    /// One table of `(p, Bg, mu_g)` rows per region.
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

impl GasPvtLaw for DryGasPvt {
    fn num_regions(&self) -> usize {
        self.tables.len()
    }

    fn inverse_formation_volume_factor(
        &self,
        reg: usize,
        _t: Real,
        p: Real,
        _rv: Real,
        _rvw: Real,
    ) -> PvtResult<Real> {
        self.table(reg)?.inverse_b(p)
    }

    fn saturated_inverse_formation_volume_factor(&self, reg: usize, _t: Real, p: Real) -> PvtResult<Real> {
        self.table(reg)?.inverse_b(p)
    }

    fn viscosity(&self, reg: usize, _t: Real, p: Real, _rv: Real, _rvw: Real) -> PvtResult<Real> {
        self.table(reg)?.viscosity(p)
    }

    fn saturated_viscosity(&self, reg: usize, _t: Real, p: Real) -> PvtResult<Real> {
        self.table(reg)?.viscosity(p)
    }

    fn saturated_oil_vaporization_factor(&self, reg: usize, _t: Real, _p: Real) -> PvtResult<Real> {
        self.table(reg)?;
        Ok(0.0)
    }

    fn saturated_water_vaporization_factor(&self, reg: usize, _t: Real, _p: Real) -> PvtResult<Real> {
        self.table(reg)?;
        Ok(0.0)
    }

    fn saturation_pressure(&self, reg: usize, _t: Real, _rv: Real) -> PvtResult<Real> {
        self.table(reg)?;
        Ok(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn law() -> DryGasPvt {
        DryGasPvt::from_regions(&[vec![
            PvdRow::new(1e6, 0.12, 1.3e-5),
            PvdRow::new(1e7, 0.011, 1.6e-5),
            PvdRow::new(3e7, 0.0042, 2.4e-5),
        ]])
        .unwrap()
    }

    #[test]
    fn pressure_only_dependence() {
        let law = law();
        let a = law.inverse_formation_volume_factor(0, 300.0, 1e7, 0.0, 0.0).unwrap();
        let b = law.inverse_formation_volume_factor(0, 400.0, 1e7, 1e-4, 1e-5).unwrap();
        assert_eq!(a, b);
        assert!((a - 1.0 / 0.011).abs() < 1e-10);
        assert!((law.saturated_viscosity(0, 350.0, 3e7).unwrap() - 2.4e-5).abs() < 1e-18);
    }

    #[test]
    fn nothing_vaporizes() {
        let law = law();
        assert_eq!(law.saturated_oil_vaporization_factor(0, 350.0, 2e7).unwrap(), 0.0);
        assert_eq!(
            law.saturated_oil_vaporization_factor_with_history(0, 350.0, 2e7, 0.1, 0.5)
                .unwrap(),
            0.0
        );
        assert_eq!(law.saturated_water_vaporization_factor_salt(0, 350.0, 2e7, 30.0).unwrap(), 0.0);
        assert_eq!(law.saturation_pressure(0, 350.0, 1e-4).unwrap(), 0.0);
        assert!(law.saturation_pressure(1, 350.0, 1e-4).is_err());
    }
}
