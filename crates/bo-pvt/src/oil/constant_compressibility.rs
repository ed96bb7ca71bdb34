//! Dead oil with constant compressibility (PVCDO).

use crate::error::PvtResult;
use crate::law::OilPvtLaw;
use crate::validation::{region, validate_finite, validate_positive};
use bo_core::Real;

/// Coefficients of one PVCDO record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantCompressibilityParams {
    /// Reference pressure [Pa].
    pub p_ref: Real,
    /// Formation volume factor at the reference pressure.
    pub b_ref: Real,
    /// Compressibility [1/Pa].
    pub compressibility: Real,
    /// Viscosity at the reference pressure [Pa·s].
    pub mu_ref: Real,
    /// Viscosibility [1/Pa].
    pub viscosibility: Real,
}

impl ConstantCompressibilityParams {
    pub(crate) fn validated(self) -> PvtResult<Self> {
        validate_finite(self.p_ref, "reference pressure")?;
        validate_positive(self.b_ref, "reference formation volume factor")?;
        validate_finite(self.compressibility, "compressibility")?;
        validate_positive(self.mu_ref, "reference viscosity")?;
        validate_finite(self.viscosibility, "viscosibility")?;
        Ok(self)
    }

    /// `(1 + X + X²/2) / B_ref` with `X = c (p - p_ref)`.
    pub(crate) fn inverse_b(&self, p: Real) -> Real {
        let x = self.compressibility * (p - self.p_ref);
        (1.0 + x * (1.0 + x / 2.0)) / self.b_ref
    }

    pub(crate) fn viscosity(&self, p: Real) -> Real {
        let y = (self.compressibility - self.viscosibility) * (p - self.p_ref);
        let inv_b_mu = (1.0 + y * (1.0 + y / 2.0)) / (self.b_ref * self.mu_ref);
        self.inverse_b(p) / inv_b_mu
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConstantCompressibilityOilPvt {
    params: Vec<ConstantCompressibilityParams>,
}

impl ConstantCompressibilityOilPvt {
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

impl OilPvtLaw for ConstantCompressibilityOilPvt {
    fn num_regions(&self) -> usize {
        self.params.len()
    }

    fn inverse_formation_volume_factor(&self, reg: usize, _t: Real, p: Real, _rs: Real) -> PvtResult<Real> {
        Ok(self.params(reg)?.inverse_b(p))
    }

    fn saturated_inverse_formation_volume_factor(&self, reg: usize, _t: Real, p: Real) -> PvtResult<Real> {
        Ok(self.params(reg)?.inverse_b(p))
    }

    fn viscosity(&self, reg: usize, _t: Real, p: Real, _rs: Real) -> PvtResult<Real> {
        Ok(self.params(reg)?.viscosity(p))
    }

    fn saturated_viscosity(&self, reg: usize, _t: Real, p: Real) -> PvtResult<Real> {
        Ok(self.params(reg)?.viscosity(p))
    }

    fn saturated_gas_dissolution_factor(&self, reg: usize, _t: Real, _p: Real) -> PvtResult<Real> {
        self.params(reg)?;
        Ok(0.0)
    }

    fn saturation_pressure(&self, reg: usize, _t: Real, _rs: Real) -> PvtResult<Real> {
        self.params(reg)?;
        Ok(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ConstantCompressibilityParams {
        ConstantCompressibilityParams {
            p_ref: 2e7,
            b_ref: 1.2,
            compressibility: 1e-9,
            mu_ref: 1e-3,
            viscosibility: 2e-9,
        }
    }

    #[test]
    fn reference_point_reproduces_inputs() {
        let law = ConstantCompressibilityOilPvt::from_regions(&[params()]).unwrap();
        let inv_b = law.inverse_formation_volume_factor(0, 350.0, 2e7, 0.0).unwrap();
        assert!((inv_b - 1.0 / 1.2).abs() < 1e-15);
        let mu = law.viscosity(0, 350.0, 2e7, 0.0).unwrap();
        assert!((mu - 1e-3).abs() < 1e-15);
    }

    #[test]
    fn second_order_expansion() {
        let law = ConstantCompressibilityOilPvt::from_regions(&[params()]).unwrap();
        let x: Real = 1e-9 * 1e7;
        let expected = (1.0 + x + x * x / 2.0) / 1.2;
        let inv_b = law.saturated_inverse_formation_volume_factor(0, 350.0, 3e7).unwrap();
        assert!((inv_b - expected).abs() < 1e-14);
        // viscosibility above compressibility: viscosity rises with pressure
        assert!(law.saturated_viscosity(0, 350.0, 3e7).unwrap() > 1e-3);
    }

    #[test]
    fn rejects_non_positive_reference_values() {
        let mut p = params();
        p.b_ref = 0.0;
        assert!(ConstantCompressibilityOilPvt::from_regions(&[p]).is_err());
    }
}
