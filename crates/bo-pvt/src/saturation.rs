//! Helpers shared by the laws with a saturated ratio table.

use crate::error::{PvtError, PvtResult};
use crate::tabulated::Tabulated1D;
use bo_core::Real;
use tracing::debug;

const NEWTON_MAX_ITERATIONS: usize = 20;

/// VAPPARS style damping of a saturated ratio when the oil saturation has
/// not yet reached its historical maximum.
pub(crate) fn apply_vap_par(r_sat: Real, so: Real, max_so: Real, vap_par: Real) -> Real {
    let max_so = max_so.min(1.0);
    if vap_par > 0.0 && max_so > 0.01 && so < max_so {
        let so = so.max(0.001);
        r_sat * (so / max_so).powf(vap_par).max(1e-3)
    } else {
        r_sat
    }
}

/// Inverse table `ratio -> pressure` used as the starting guess of the Newton
/// inversion. The ratio table is sampled at `n + 1` evenly spaced pressures.
pub(crate) fn saturation_pressure_guess(ratio_of_p: &Tabulated1D) -> PvtResult<Tabulated1D> {
    let n = ratio_of_p.num_samples();
    if n == 0 {
        return Err(PvtError::invalid_table("saturated ratio table is empty"));
    }
    let (p_min, p_max) = (ratio_of_p.x_min(), ratio_of_p.x_max());
    let delta = (p_max - p_min) / (n + 1) as Real;
    let mut points: Vec<(Real, Real)> = Vec::with_capacity(n + 1);
    for i in 0..=n {
        let p = p_min + i as Real * delta;
        points.push((ratio_of_p.eval(p, true)?, p));
    }
    points.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut deduped: Vec<(Real, Real)> = Vec::with_capacity(points.len());
    for pt in points {
        if deduped.last().is_none_or(|last| last.0 != pt.0) {
            deduped.push(pt);
        }
    }
    Tabulated1D::from_pairs(deduped)
}

/// Newton inversion of `ratio_of_p` at `target`, starting from the guess table.
///
/// `label` names the ratio in the non-convergence message.
pub(crate) fn invert_saturated_ratio(
    ratio_of_p: &Tabulated1D,
    guess: &Tabulated1D,
    target: Real,
    label: &str,
) -> PvtResult<Real> {
    let eps = Real::EPSILON * 1e6;
    let mut p_sat = guess.eval(target, true)?;
    let mut on_probation = false;
    for _ in 0..NEWTON_MAX_ITERATIONS {
        let f = ratio_of_p.eval(p_sat, true)? - target;
        let f_prime = ratio_of_p.eval_derivative(p_sat, true)?;
        if f_prime.abs() < 1e-30 {
            return Ok(p_sat);
        }
        let delta = f / f_prime;
        p_sat -= delta;
        if p_sat < 0.0 {
            if on_probation {
                return Ok(0.0);
            }
            on_probation = true;
            p_sat = 0.0;
        }
        if delta.abs() < p_sat.abs() * eps {
            return Ok(p_sat);
        }
    }
    let message = format!(
        "Finding saturation pressure did not converge: pSat = {p_sat}, {label} = {target}"
    );
    debug!(target: "bo_pvt::saturation", "{message}");
    Err(PvtError::NumericalProblem { message })
}
