//! Carbon dioxide. Gas density and enthalpy come from the shared property
//! tables, which are sampled from the Peng-Robinson equation of state with a
//! Shomate ideal-gas heat capacity.

use super::tables::{GasPropertyTables, co2_tables};
use crate::error::{PvtError, PvtResult};
use bo_core::Real;
use bo_core::units::constants::R;
use std::f64::consts::SQRT_2;

#[derive(Debug, Clone, Copy, Default)]
pub struct Co2;

impl Co2 {
    pub const NAME: &'static str = "CO2";
    pub const MOLAR_MASS: Real = 44e-3;
    pub const CRITICAL_TEMPERATURE: Real = 273.15 + 30.95;
    pub const CRITICAL_PRESSURE: Real = 73.8e5;
    pub const TRIPLE_TEMPERATURE: Real = 273.15 - 56.35;
    pub const TRIPLE_PRESSURE: Real = 5.11e5;
    pub const ACENTRIC_FACTOR: Real = 0.22394;

    /// Vapour pressure [Pa] (Span and Wagner ancillary equation).
    pub fn vapor_pressure(t: Real) -> Real {
        const A: [Real; 4] = [-7.0602087, 1.9391218, -1.6463597, -3.2995634];
        const EXP: [Real; 4] = [1.0, 1.5, 2.0, 4.0];
        let t_red = t / Self::CRITICAL_TEMPERATURE;
        let exponent: Real = A
            .iter()
            .zip(EXP)
            .map(|(a, e)| a * (1.0 - t_red).powf(e))
            .sum::<Real>()
            / t_red;
        exponent.exp() * Self::CRITICAL_PRESSURE
    }

    pub fn tables() -> PvtResult<std::sync::Arc<GasPropertyTables>> {
        co2_tables()
    }

    pub fn gas_density(t: Real, p: Real, extrapolate: bool) -> PvtResult<Real> {
        co2_tables()?.density.eval(t, p, extrapolate)
    }

    pub fn gas_enthalpy(t: Real, p: Real, extrapolate: bool) -> PvtResult<Real> {
        co2_tables()?.enthalpy.eval(t, p, extrapolate)
    }

    pub fn gas_internal_energy(t: Real, p: Real, extrapolate: bool) -> PvtResult<Real> {
        let tables = co2_tables()?;
        let h = tables.enthalpy.eval(t, p, extrapolate)?;
        let rho = tables.density.eval(t, p, extrapolate)?;
        Ok(h - p / rho)
    }

    /// Gas viscosity after Fenghour, Wakeham and Vesovic [Pa·s]. Temperatures
    /// below 275 K use the 275 K value.
    pub fn gas_viscosity(t: Real, p: Real, extrapolate: bool) -> PvtResult<Real> {
        const A: [Real; 5] = [0.235156, -0.491266, 5.211155e-2, 5.347906e-2, -1.537102e-2];
        const D11: Real = 0.4071119e-2;
        const D21: Real = 0.7198037e-4;
        const D64: Real = 0.2411697e-16;
        const D81: Real = 0.2971072e-22;
        const D82: Real = -0.1627888e-22;
        const ESP: Real = 251.196;

        let t = t.max(275.0);
        let t_star = t / ESP;
        let ln_t = t_star.ln();
        let sigma_star = (A[0] + ln_t * (A[1] + ln_t * (A[2] + ln_t * (A[3] + ln_t * A[4])))).exp();
        let mu0 = 1.00697 * t.sqrt() / sigma_star;

        let rho = Self::gas_density(t, p, extrapolate)?;
        let dmu = D11 * rho
            + D21 * rho * rho
            + D64 * rho.powi(6) / t_star.powi(3)
            + D81 * rho.powi(8)
            + D82 * rho.powi(8) / t_star;
        Ok((mu0 + dmu) / 1e6)
    }

    /// Isobaric heat capacity [J/(kg K)] by central differences of the
    /// tabulated enthalpy.
    pub fn gas_heat_capacity(t: Real, p: Real) -> PvtResult<Real> {
        const EPS: Real = 1e-6;
        let h1 = Self::gas_enthalpy(t - EPS, p, true)?;
        let h2 = Self::gas_enthalpy(t + EPS, p, true)?;
        Ok((h2 - h1) / (2.0 * EPS))
    }

    /// Density [kg/m³] and specific enthalpy [J/kg] from the equation of
    /// state. Used to fill the property tables.
    pub(crate) fn eos_state(t: Real, p: Real) -> PvtResult<(Real, Real)> {
        let tc = Self::CRITICAL_TEMPERATURE;
        let pc = Self::CRITICAL_PRESSURE;
        let w = Self::ACENTRIC_FACTOR;
        let kappa = 0.37464 + 1.54226 * w - 0.26992 * w * w;
        let sqrt_alpha = 1.0 + kappa * (1.0 - (t / tc).sqrt());
        let a_c = 0.45724 * R * R * tc * tc / pc;
        let a = a_c * sqrt_alpha * sqrt_alpha;
        let da_dt = -a_c * kappa * sqrt_alpha / (t * tc).sqrt();
        let b = 0.07780 * R * tc / pc;

        let big_a = a * p / (R * t).powi(2);
        let big_b = b * p / (R * t);
        let ln_phi = |z: Real| {
            z - 1.0
                - (z - big_b).ln()
                - big_a / (2.0 * SQRT_2 * big_b)
                    * ((z + (1.0 + SQRT_2) * big_b) / (z + (1.0 - SQRT_2) * big_b)).ln()
        };
        let z = cubic_roots(
            -(1.0 - big_b),
            big_a - 3.0 * big_b * big_b - 2.0 * big_b,
            -(big_a * big_b - big_b * big_b - big_b.powi(3)),
        )
        .into_iter()
        .filter(|z| *z > big_b)
        .min_by(|x, y| ln_phi(*x).total_cmp(&ln_phi(*y)))
        .ok_or_else(|| PvtError::NumericalProblem {
            message: format!("no physical CO2 compressibility root at T = {t}, p = {p}"),
        })?;

        let rho = p * Self::MOLAR_MASS / (z * R * t);
        let h_dep = R * t * (z - 1.0)
            + (t * da_dt - a) / (2.0 * SQRT_2 * b)
                * ((z + (1.0 + SQRT_2) * big_b) / (z + (1.0 - SQRT_2) * big_b)).ln();
        let h = (ideal_gas_enthalpy(t) + h_dep) / Self::MOLAR_MASS;
        Ok((rho, h))
    }
}

/// Ideal gas molar enthalpy relative to 298.15 K [J/mol] (Shomate).
fn ideal_gas_enthalpy(t: Real) -> Real {
    const A: Real = 24.99735;
    const B: Real = 55.18696;
    const C: Real = -33.69137;
    const D: Real = 7.948387;
    const E: Real = -0.136638;
    const F: Real = -403.6075;
    const H: Real = -393.5224;
    let s = t / 1000.0;
    let kj = A * s + B * s * s / 2.0 + C * s.powi(3) / 3.0 + D * s.powi(4) / 4.0 - E / s + F - H;
    kj * 1e3
}

/// Real roots of `z³ + a2 z² + a1 z + a0`.
fn cubic_roots(a2: Real, a1: Real, a0: Real) -> Vec<Real> {
    let q = (3.0 * a1 - a2 * a2) / 9.0;
    let r = (9.0 * a2 * a1 - 27.0 * a0 - 2.0 * a2.powi(3)) / 54.0;
    let disc = q.powi(3) + r * r;
    if disc > 0.0 {
        let sq = disc.sqrt();
        vec![(r + sq).cbrt() + (r - sq).cbrt() - a2 / 3.0]
    } else {
        let theta = (r / (-q.powi(3)).sqrt()).clamp(-1.0, 1.0).acos();
        let m = 2.0 * (-q).sqrt();
        (0..3)
            .map(|k| m * ((theta + 2.0 * k as Real * std::f64::consts::PI) / 3.0).cos() - a2 / 3.0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubic_roots_of_known_polynomial() {
        // (z - 1)(z - 2)(z - 3)
        let mut roots = cubic_roots(-6.0, 11.0, -6.0);
        roots.sort_by(|a, b| a.total_cmp(b));
        for (r, e) in roots.iter().zip([1.0, 2.0, 3.0]) {
            assert!((r - e).abs() < 1e-9);
        }
        assert_eq!(cubic_roots(0.0, 0.0, -8.0).len(), 1);
    }

    #[test]
    fn surface_density_is_near_ideal() {
        let (rho, _) = Co2::eos_state(288.71, 101_325.0).unwrap();
        let ideal = 101_325.0 * Co2::MOLAR_MASS / (R * 288.71);
        assert!((rho - ideal).abs() / ideal < 0.01, "rho = {rho}");
    }

    #[test]
    fn dense_phase_density() {
        let (rho, _) = Co2::eos_state(350.0, 2e7).unwrap();
        assert!(rho > 500.0 && rho < 700.0, "rho = {rho}");
    }

    #[test]
    fn tabulated_density_matches_eos_on_nodes() {
        let (rho, h) = Co2::eos_state(300.0, 1e7).unwrap();
        let tab = Co2::gas_density(300.0, 1e7, false).unwrap();
        assert!((tab - rho).abs() / rho < 0.05, "tab = {tab}, eos = {rho}");
        let tab_h = Co2::gas_enthalpy(300.0, 1e7, false).unwrap();
        assert!((tab_h - h).abs() < 0.05 * h.abs().max(1e4));
    }

    #[test]
    fn viscosity_rises_with_density() {
        let low = Co2::gas_viscosity(320.0, 1e6, false).unwrap();
        let high = Co2::gas_viscosity(320.0, 3e7, false).unwrap();
        assert!(low > 1e-5 && low < 2.5e-5, "mu = {low}");
        assert!(high > low);
    }

    #[test]
    fn vapor_pressure_reaches_critical_point() {
        let p = Co2::vapor_pressure(Co2::CRITICAL_TEMPERATURE);
        assert!((p - Co2::CRITICAL_PRESSURE).abs() < 1.0);
        assert!(Co2::vapor_pressure(280.0) < p);
    }
}
