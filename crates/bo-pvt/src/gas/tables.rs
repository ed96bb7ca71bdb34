//! PVTG / PVTGW style tables: gas pressure outside, a vaporized ratio inside.

use crate::error::{PvtError, PvtResult};
use crate::saturation::{invert_saturated_ratio, saturation_pressure_guess};
use crate::tabulated::{InterpolationPolicy, Tabulated1D, UniformXTabulated2D};
use crate::undersaturated::{PvtxRecord, build_undersaturated};
use bo_core::Real;

/// Tables of one region for one vaporized ratio.
#[derive(Debug, Clone)]
pub(crate) struct VaporizedRatioTables {
    inverse_b: UniformXTabulated2D,
    inverse_b_mu: UniformXTabulated2D,
    saturated_inverse_b: Tabulated1D,
    saturated_inverse_b_mu: Tabulated1D,
    saturated_ratio: Tabulated1D,
    saturation_pressure: Tabulated1D,
}

impl VaporizedRatioTables {
    /// `keyword` names the input table in error messages (PVTG, PVTGW).
    pub fn from_records(records: &[PvtxRecord], keyword: &str) -> PvtResult<Self> {
        if records.len() < 2 {
            return Err(PvtError::invalid_table(format!(
                "Saturated {keyword} table must have at least 2 rows."
            )));
        }

        let mut sat_p = Vec::with_capacity(records.len());
        let mut sat_ratio = Vec::with_capacity(records.len());
        let mut sat_inv_b = Vec::with_capacity(records.len());
        let mut sat_inv_b_mu = Vec::with_capacity(records.len());
        for record in records {
            let sat = record.saturated()?;
            sat_p.push(record.x);
            sat_ratio.push(sat.y);
            sat_inv_b.push(1.0 / sat.b);
            sat_inv_b_mu.push(1.0 / (sat.b * sat.mu));
        }

        let tables = build_undersaturated(
            records,
            InterpolationPolicy::RightExtreme,
            &format!(
                "{keyword} tables are invalid: The last table must exhibit at least one entry for undersaturated gas!"
            ),
        )?;
        let inverse_b_mu = tables.inverse_b_mu()?;
        let saturated_ratio = Tabulated1D::from_samples(&sat_p, &sat_ratio)?;
        let saturation_pressure = saturation_pressure_guess(&saturated_ratio)?;

        Ok(Self {
            inverse_b: tables.inverse_b,
            inverse_b_mu,
            saturated_inverse_b: Tabulated1D::from_samples(&sat_p, &sat_inv_b)?,
            saturated_inverse_b_mu: Tabulated1D::from_samples(&sat_p, &sat_inv_b_mu)?,
            saturated_ratio,
            saturation_pressure,
        })
    }

    pub fn inverse_b(&self, p: Real, ratio: Real) -> PvtResult<Real> {
        self.inverse_b.eval(p, ratio, true)
    }

    pub fn viscosity(&self, p: Real, ratio: Real) -> PvtResult<Real> {
        Ok(self.inverse_b.eval(p, ratio, true)? / self.inverse_b_mu.eval(p, ratio, true)?)
    }

    pub fn saturated_inverse_b(&self, p: Real) -> PvtResult<Real> {
        self.saturated_inverse_b.eval(p, true)
    }

    pub fn saturated_viscosity(&self, p: Real) -> PvtResult<Real> {
        Ok(self.saturated_inverse_b.eval(p, true)? / self.saturated_inverse_b_mu.eval(p, true)?)
    }

    pub fn saturated_ratio(&self, p: Real) -> PvtResult<Real> {
        self.saturated_ratio.eval(p, true)
    }

    /// Pressure at which `ratio` is the saturated value.
    pub fn saturation_pressure(&self, ratio: Real, label: &str) -> PvtResult<Real> {
        invert_saturated_ratio(&self.saturated_ratio, &self.saturation_pressure, ratio, label)
    }
}

/// One RWGSALT record: gas pressure and `(salt concentration, Rvw_sat)` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct RwgSaltRecord {
    pub p: Real,
    pub samples: Vec<(Real, Real)>,
}

impl RwgSaltRecord {
    pub fn new(p: Real, samples: Vec<(Real, Real)>) -> Self {
        Self { p, samples }
    }
}

/// Saturated Rvw as a function of gas pressure and salt concentration.
pub(crate) fn salt_dependent_rvw(records: &[RwgSaltRecord]) -> PvtResult<UniformXTabulated2D> {
    if records.len() < 2 {
        return Err(PvtError::invalid_table(
            "Saturated RWGSALT table must have at least 2 rows.",
        ));
    }
    let mut table = UniformXTabulated2D::new(InterpolationPolicy::Vertical);
    for record in records {
        if record.samples.is_empty() {
            return Err(PvtError::invalid_table(format!(
                "RWGSALT record at p = {} has no samples",
                record.p
            )));
        }
        let col = table.append_x_pos(record.p)?;
        for &(salt, rvw) in &record.samples {
            table.append_sample_point(col, salt, rvw)?;
        }
    }
    Ok(table)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::undersaturated::PvtxSample;

    /// PVTG-like records; the first sample of each is saturated, inner ratios
    /// are listed downwards.
    pub(crate) fn pvtg() -> Vec<PvtxRecord> {
        vec![
            PvtxRecord::new(
                5e6,
                vec![PvtxSample::new(5e-5, 0.025, 1.4e-5), PvtxSample::new(0.0, 0.0252, 1.35e-5)],
            ),
            PvtxRecord::new(1.5e7, vec![PvtxSample::new(1.2e-4, 0.008, 1.8e-5)]),
            PvtxRecord::new(
                3e7,
                vec![PvtxSample::new(2.5e-4, 0.0045, 2.5e-5), PvtxSample::new(0.0, 0.0046, 2.3e-5)],
            ),
        ]
    }

    #[test]
    fn saturated_boundary_matches_general_table() {
        let tables = VaporizedRatioTables::from_records(&pvtg(), "PVTG").unwrap();
        for &p in &[5e6, 1e7, 1.5e7, 2.2e7, 3e7] {
            let rv = tables.saturated_ratio(p).unwrap();
            let sat = tables.saturated_inverse_b(p).unwrap();
            let general = tables.inverse_b(p, rv).unwrap();
            assert!((sat - general).abs() / sat < 1e-10, "p = {p}: {sat} vs {general}");
            let mu_sat = tables.saturated_viscosity(p).unwrap();
            let mu_gen = tables.viscosity(p, rv).unwrap();
            assert!((mu_sat - mu_gen).abs() / mu_sat < 1e-10);
        }
    }

    #[test]
    fn dew_point_inverts_saturated_ratio() {
        let tables = VaporizedRatioTables::from_records(&pvtg(), "PVTG").unwrap();
        let p = tables.saturation_pressure(1.8e-4, "Rv").unwrap();
        assert!((tables.saturated_ratio(p).unwrap() - 1.8e-4).abs() < 1e-12);
    }

    #[test]
    fn keyword_appears_in_errors() {
        let err = VaporizedRatioTables::from_records(&pvtg()[..1], "PVTGW").unwrap_err();
        assert!(err.to_string().contains("PVTGW"));
        let mut rows = pvtg();
        rows[2].samples.truncate(1);
        let err = VaporizedRatioTables::from_records(&rows, "PVTG").unwrap_err();
        assert!(err.to_string().contains("undersaturated gas"));
    }

    #[test]
    fn rwgsalt_needs_two_rows() {
        let one = [RwgSaltRecord::new(1e7, vec![(0.0, 1e-5), (50.0, 0.8e-5)])];
        assert!(salt_dependent_rvw(&one).is_err());
        let two = [one[0].clone(), RwgSaltRecord::new(2e7, vec![(0.0, 2e-5), (50.0, 1.6e-5)])];
        let table = salt_dependent_rvw(&two).unwrap();
        assert!((table.eval(1.5e7, 25.0, true).unwrap() - 1.35e-5).abs() < 1e-15);
    }
}
