//! Dead oil tables with a fixed amount of dissolved gas (PVDO + RSCONST).

use super::dead::DeadOilPvt;
use crate::error::PvtResult;
use crate::law::OilPvtLaw;
use crate::pressure_table::PvdRow;
use crate::validation::validate_finite;
use bo_core::Real;

#[derive(Debug, Clone, Default)]
pub struct ConstantRsDeadOilPvt {
    dead: DeadOilPvt,
    constant_rs: Real,
    bubble_point: Real,
}

impl ConstantRsDeadOilPvt {
    pub fn new(constant_rs: Real, bubble_point: Real) -> PvtResult<Self> {
        Ok(Self {
            dead: DeadOilPvt::new(),
            constant_rs: validate_finite(constant_rs, "constant Rs")?,
            bubble_point: validate_finite(bubble_point, "bubble point pressure")?,
        })
    }

    pub fn from_regions(regions: &[Vec<PvdRow>], constant_rs: Real, bubble_point: Real) -> PvtResult<Self> {
        let mut law = Self::new(constant_rs, bubble_point)?;
        for rows in regions {
            law.add_region(rows)?;
        }
        Ok(law)
    }

    pub fn add_region(&mut self, rows: &[PvdRow]) -> PvtResult<usize> {
        self.dead.add_region(rows)
    }

    pub fn constant_rs(&self) -> Real {
        self.constant_rs
    }

    pub fn bubble_point_pressure(&self) -> Real {
        self.bubble_point
    }
}

impl OilPvtLaw for ConstantRsDeadOilPvt {
    fn num_regions(&self) -> usize {
        self.dead.num_regions()
    }

    fn inverse_formation_volume_factor(&self, reg: usize, t: Real, p: Real, rs: Real) -> PvtResult<Real> {
        self.dead.inverse_formation_volume_factor(reg, t, p, rs)
    }

    fn saturated_inverse_formation_volume_factor(&self, reg: usize, t: Real, p: Real) -> PvtResult<Real> {
        self.dead.saturated_inverse_formation_volume_factor(reg, t, p)
    }

    fn viscosity(&self, reg: usize, t: Real, p: Real, rs: Real) -> PvtResult<Real> {
        self.dead.viscosity(reg, t, p, rs)
    }

    fn saturated_viscosity(&self, reg: usize, t: Real, p: Real) -> PvtResult<Real> {
        self.dead.saturated_viscosity(reg, t, p)
    }

    fn saturated_gas_dissolution_factor(&self, reg: usize, t: Real, p: Real) -> PvtResult<Real> {
        self.dead.saturated_gas_dissolution_factor(reg, t, p)?;
        Ok(self.constant_rs)
    }

    fn saturation_pressure(&self, reg: usize, t: Real, rs: Real) -> PvtResult<Real> {
        self.dead.saturation_pressure(reg, t, rs)?;
        Ok(self.bubble_point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_ratio_and_bubble_point() {
        let law = ConstantRsDeadOilPvt::from_regions(
            &[vec![PvdRow::new(1e5, 1.3, 1e-3), PvdRow::new(3e7, 1.25, 1.2e-3)]],
            80.0,
            1.5e7,
        )
        .unwrap();
        assert_eq!(law.saturated_gas_dissolution_factor(0, 350.0, 1e6).unwrap(), 80.0);
        assert_eq!(
            law.saturated_gas_dissolution_factor_with_history(0, 350.0, 1e6, 0.1, 0.9)
                .unwrap(),
            80.0
        );
        assert_eq!(law.saturation_pressure(0, 350.0, 10.0).unwrap(), 1.5e7);
        let inv_b = law.inverse_formation_volume_factor(0, 350.0, 3e7, 80.0).unwrap();
        assert!((inv_b - 1.0 / 1.25).abs() < 1e-14);
    }
}
