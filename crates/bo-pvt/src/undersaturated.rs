//! Record layout and table construction for PVTO / PVTG / PVTGW style input.
//!
//! Every record carries an outer key (Rs for PVTO, gas pressure for PVTG)
//! and a list of `(y, B, mu)` samples whose first entry is the saturated
//! state. Records with a single sample are extended with the compressibility
//! and viscosibility of the next record that has more than one.

use crate::error::{PvtError, PvtResult};
use crate::tabulated::{InterpolationPolicy, UniformXTabulated2D};
use bo_core::Real;

/// One `(y, B, mu)` line of an undersaturated record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PvtxSample {
    /// Inner axis value (pressure for PVTO, Rv or Rvw for PVTG/PVTGW).
    pub y: Real,
    /// Formation volume factor.
    pub b: Real,
    /// Dynamic viscosity [Pa·s].
    pub mu: Real,
}

impl PvtxSample {
    pub fn new(y: Real, b: Real, mu: Real) -> Self {
        Self { y, b, mu }
    }
}

/// One saturated record with its undersaturated extension.
#[derive(Debug, Clone, PartialEq)]
pub struct PvtxRecord {
    /// Outer key (Rs for PVTO, gas pressure for PVTG/PVTGW).
    pub x: Real,
    /// First sample is the saturated state.
    pub samples: Vec<PvtxSample>,
}

impl PvtxRecord {
    pub fn new(x: Real, samples: Vec<PvtxSample>) -> Self {
        Self { x, samples }
    }

    pub fn saturated(&self) -> PvtResult<&PvtxSample> {
        self.samples
            .first()
            .ok_or_else(|| PvtError::invalid_table(format!("record at {} has no samples", self.x)))
    }
}

/// The two tables read directly from the records.
#[derive(Debug, Clone)]
pub(crate) struct UndersaturatedTables {
    pub inverse_b: UniformXTabulated2D,
    pub mu: UniformXTabulated2D,
}

impl UndersaturatedTables {
    /// `1/(B mu)` on the same sample positions.
    pub fn inverse_b_mu(&self) -> PvtResult<UniformXTabulated2D> {
        self.inverse_b.zip_with(&self.mu, |inv_b, mu| inv_b / mu)
    }
}

/// Build `1/B(x, y)` and `mu(x, y)` from the records.
///
/// `missing_master` is the error text used when a single-sample record has no
/// later record to borrow its undersaturated behaviour from.
pub(crate) fn build_undersaturated(
    records: &[PvtxRecord],
    policy: InterpolationPolicy,
    missing_master: &str,
) -> PvtResult<UndersaturatedTables> {
    let mut inverse_b = UniformXTabulated2D::new(policy);
    let mut mu = UniformXTabulated2D::new(policy);

    for (idx, record) in records.iter().enumerate() {
        if record.samples.is_empty() {
            return Err(PvtError::invalid_table(format!(
                "record {idx} (x = {}) has no samples",
                record.x
            )));
        }
        for s in &record.samples {
            if !(s.b > 0.0) || !(s.mu > 0.0) {
                return Err(PvtError::invalid_table(format!(
                    "record {idx} has a non-positive formation volume factor or viscosity"
                )));
            }
        }

        let col_b = inverse_b.append_x_pos(record.x)?;
        let col_mu = mu.append_x_pos(record.x)?;
        for s in &record.samples {
            inverse_b.append_sample_point(col_b, s.y, 1.0 / s.b)?;
            mu.append_sample_point(col_mu, s.y, s.mu)?;
        }

        if record.samples.len() > 1 {
            continue;
        }
        let master = records[idx + 1..]
            .iter()
            .find(|r| r.samples.len() > 1)
            .ok_or_else(|| PvtError::invalid_table(missing_master))?;

        let mut last = record.samples[0];
        for pair in master.samples.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            let new_y = last.y + (next.y - prev.y);

            let x_b = (next.b - prev.b) / ((next.b + prev.b) / 2.0);
            let new_b = last.b * (1.0 + x_b / 2.0) / (1.0 - x_b / 2.0);

            let x_mu = (next.mu - prev.mu) / ((next.mu + prev.mu) / 2.0);
            let new_mu = last.mu * (1.0 + x_mu / 2.0) / (1.0 - x_mu / 2.0);

            inverse_b.append_sample_point(col_b, new_y, 1.0 / new_b)?;
            mu.append_sample_point(col_mu, new_y, new_mu)?;
            last = PvtxSample::new(new_y, new_b, new_mu);
        }
    }

    Ok(UndersaturatedTables { inverse_b, mu })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(y: Real, b: Real, mu: Real) -> PvtxSample {
        PvtxSample::new(y, b, mu)
    }

    #[test]
    fn single_sample_records_are_extended_from_master() {
        let records = vec![
            PvtxRecord::new(10.0, vec![s(1e6, 1.1, 1e-3)]),
            PvtxRecord::new(20.0, vec![s(2e6, 1.2, 0.9e-3), s(3e6, 1.18, 0.95e-3)]),
        ];
        let t = build_undersaturated(&records, InterpolationPolicy::LeftExtreme, "missing")
            .unwrap();
        let col = t.inverse_b.column(0).unwrap();
        assert_eq!(col.len(), 2);
        assert_eq!(col[1].0, 2e6);
        // same relative change as the master record
        let x = (1.18 - 1.2) / ((1.18 + 1.2) / 2.0);
        let b = 1.1 * (1.0 + x / 2.0) / (1.0 - x / 2.0);
        assert!((col[1].1 - 1.0 / b).abs() < 1e-14);
        assert!(t.mu.column(0).unwrap()[1].1 > 1e-3);
    }

    #[test]
    fn missing_master_is_an_error() {
        let records = vec![
            PvtxRecord::new(10.0, vec![s(1e6, 1.1, 1e-3)]),
            PvtxRecord::new(20.0, vec![s(2e6, 1.2, 0.9e-3)]),
        ];
        let err = build_undersaturated(&records, InterpolationPolicy::LeftExtreme, "no master")
            .unwrap_err();
        assert_eq!(err, PvtError::invalid_table("no master"));
    }

    #[test]
    fn descending_inner_axis_is_accepted() {
        // PVTG lists Rv from the saturated value downwards
        let records = vec![
            PvtxRecord::new(1e7, vec![s(1e-4, 0.01, 2e-5), s(0.0, 0.0101, 1.9e-5)]),
            PvtxRecord::new(2e7, vec![s(2e-4, 0.005, 2.5e-5), s(0.0, 0.0051, 2.4e-5)]),
        ];
        let t = build_undersaturated(&records, InterpolationPolicy::RightExtreme, "missing")
            .unwrap();
        let col = t.inverse_b.column(1).unwrap();
        assert_eq!(col.first().unwrap().0, 0.0);
        assert_eq!(col.last().unwrap().0, 2e-4);
        let ibm = t.inverse_b_mu().unwrap();
        let last = ibm.column(1).unwrap().last().unwrap().1;
        assert!((last - 1.0 / (0.005 * 2.5e-5)).abs() / last < 1e-12);
    }
}
