//! Dead water with constant compressibility (PVTW).

use crate::error::PvtResult;
use crate::law::WaterPvtLaw;
use crate::oil::ConstantCompressibilityParams;
use crate::validation::region;
use bo_core::Real;

#[derive(Debug, Clone, Default)]
pub struct ConstantCompressibilityWaterPvt {
    params: Vec<ConstantCompressibilityParams>,
}

impl ConstantCompressibilityWaterPvt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_regions(params: &[ConstantCompressibilityParams]) -> PvtResult<Self> {
        let mut law = Self::new();
        for p in params {
            law.add_region(*p)?;
        }
        Ok(law)
    }

    pub fn add_region(&mut self, params: ConstantCompressibilityParams) -> PvtResult<usize> {
        self.params.push(params.validated()?);
        Ok(self.params.len() - 1)
    }

    pub fn params(&self, reg: usize) -> PvtResult<&ConstantCompressibilityParams> {
        region(&self.params, reg)
    }
}

impl WaterPvtLaw for ConstantCompressibilityWaterPvt {
    fn num_regions(&self) -> usize {
        self.params.len()
    }

    fn inverse_formation_volume_factor(
        &self,
        reg: usize,
        _t: Real,
        p: Real,
        _rsw: Real,
        _salt: Real,
    ) -> PvtResult<Real> {
        Ok(self.params(reg)?.inverse_b(p))
    }

    fn saturated_inverse_formation_volume_factor(
        &self,
        reg: usize,
        _t: Real,
        p: Real,
        _salt: Real,
    ) -> PvtResult<Real> {
        Ok(self.params(reg)?.inverse_b(p))
    }

    fn viscosity(&self, reg: usize, _t: Real, p: Real, _rsw: Real, _salt: Real) -> PvtResult<Real> {
        Ok(self.params(reg)?.viscosity(p))
    }

    fn saturated_viscosity(&self, reg: usize, _t: Real, p: Real, _salt: Real) -> PvtResult<Real> {
        Ok(self.params(reg)?.viscosity(p))
    }

    fn saturated_gas_dissolution_factor(
        &self,
        reg: usize,
        _t: Real,
        _p: Real,
        _salt: Real,
    ) -> PvtResult<Real> {
        self.params(reg)?;
        Ok(0.0)
    }

    fn saturation_pressure(&self, reg: usize, _t: Real, _rsw: Real, _salt: Real) -> PvtResult<Real> {
        self.params(reg)?;
        Ok(0.0)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn pvtw() -> ConstantCompressibilityParams {
        ConstantCompressibilityParams {
            p_ref: 2e7,
            b_ref: 1.02,
            compressibility: 4.5e-10,
            mu_ref: 5e-4,
            viscosibility: 1e-10,
        }
    }

    #[test]
    fn reference_state() {
        let law = ConstantCompressibilityWaterPvt::from_regions(&[pvtw()]).unwrap();
        let b = law.inverse_formation_volume_factor(0, 350.0, 2e7, 0.0, 0.0).unwrap();
        assert!((b - 1.0 / 1.02).abs() < 1e-14);
        let mu = law.viscosity(0, 350.0, 2e7, 0.0, 0.0).unwrap();
        assert!((mu - 5e-4).abs() < 1e-16);
        assert_eq!(law.saturated_gas_dissolution_factor(0, 350.0, 2e7, 0.0).unwrap(), 0.0);
        assert_eq!(law.saturation_pressure(0, 350.0, 0.0, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn compressed_water_is_denser() {
        let law = ConstantCompressibilityWaterPvt::from_regions(&[pvtw()]).unwrap();
        let low = law.saturated_inverse_formation_volume_factor(0, 350.0, 1e7, 0.0).unwrap();
        let high = law.saturated_inverse_formation_volume_factor(0, 350.0, 3e7, 0.0).unwrap();
        assert!(high > low);
        assert!(law.viscosity(1, 350.0, 1e7, 0.0, 0.0).is_err());
    }
}
