//! Normal hydrogen. Thermodynamic properties from the Leachman et al. (2009)
//! Helmholtz energy formulation, viscosity from Sutherland's law.

use super::tables::h2_tables;
use crate::error::{PvtError, PvtResult};
use bo_core::Real;
use bo_core::units::constants::R;

#[derive(Debug, Clone, Copy, Default)]
pub struct H2;

/// Residual Helmholtz energy coefficients: polynomial terms 0..7,
/// exponential terms 7..9, Gaussian bell terms 9..14.
const N: [Real; 14] = [
    -6.93643, 0.01, 2.1101, 4.52059, 0.732564, -1.34086, 0.130985, -0.777414, 0.351944,
    -0.0211716, 0.0226312, 0.032187, -0.0231752, 0.0557346,
];
const T_EXP: [Real; 14] = [
    0.6844, 1.0, 0.989, 0.489, 0.803, 1.1444, 1.409, 1.754, 1.311, 4.187, 5.646, 0.791, 7.249,
    2.986,
];
const D_EXP: [i32; 14] = [1, 4, 1, 1, 2, 2, 3, 1, 3, 2, 1, 3, 1, 1];
const PHI: [Real; 5] = [-1.685, -0.489, -0.103, -2.506, -1.607];
const BETA: [Real; 5] = [-0.1710, -0.2245, -0.1304, -0.2785, -0.3967];
const GAMMA: [Real; 5] = [0.7164, 1.3444, 1.4517, 0.7204, 1.5445];
const D_BELL: [Real; 5] = [1.506, 0.156, 1.736, 0.670, 1.662];

/// Ideal-gas part: `a1 + a2 τ + 1.5 ln τ + Σ a_k ln(1 - exp(b_k τ))`.
const IDEAL_A2: Real = 1.888076782;
const IDEAL_AK: [Real; 5] = [1.616, -0.4117, -0.792, 0.758, 1.217];
const IDEAL_BK: [Real; 5] = [
    -16.0205159149,
    -22.6580178006,
    -60.0090511389,
    -74.9434303817,
    -206.9392065168,
];

/// Residual Helmholtz energy and its scaled partial derivatives.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Residual {
    pub phi: Real,
    /// `δ ∂φ/∂δ`
    pub delta_d_delta: Real,
    /// `τ ∂φ/∂τ`
    pub tau_d_tau: Real,
}

impl H2 {
    pub const NAME: &'static str = "H2";
    pub const MOLAR_MASS: Real = 2.01588e-3;
    pub const CRITICAL_TEMPERATURE: Real = 33.145;
    pub const CRITICAL_PRESSURE: Real = 1.2964e6;
    /// Critical molar density [mol/m³].
    pub const CRITICAL_DENSITY: Real = 14.94e3;
    pub const TRIPLE_TEMPERATURE: Real = 13.957;
    pub const TRIPLE_PRESSURE: Real = 7.36e3;

    pub fn gas_density(t: Real, p: Real, extrapolate: bool) -> PvtResult<Real> {
        h2_tables()?.density.eval(t, p, extrapolate)
    }

    pub fn gas_enthalpy(t: Real, p: Real, extrapolate: bool) -> PvtResult<Real> {
        h2_tables()?.enthalpy.eval(t, p, extrapolate)
    }

    pub fn gas_internal_energy(t: Real, p: Real, extrapolate: bool) -> PvtResult<Real> {
        let tables = h2_tables()?;
        let h = tables.enthalpy.eval(t, p, extrapolate)?;
        let rho = tables.density.eval(t, p, extrapolate)?;
        Ok(h - p / rho)
    }

    /// Sutherland's law [Pa·s].
    pub fn gas_viscosity(t: Real, _p: Real) -> Real {
        const MU0: Real = 8.76e-6;
        const T0: Real = 293.85;
        const S: Real = 72.0;
        MU0 * (t / T0).powf(1.5) * (T0 + S) / (t + S)
    }

    /// Reduced density `δ = ρ/ρc` at `(t, p)` found by bisection.
    pub(crate) fn reduced_density(t: Real, p: Real) -> PvtResult<Real> {
        let tau = Self::CRITICAL_TEMPERATURE / t;
        let rho_c_rt = Self::CRITICAL_DENSITY * R * t;
        let objective = |delta: Real| delta * rho_c_rt * (1.0 + residual(tau, delta).delta_d_delta) - p;

        let (mut lo, mut hi) = (0.0, 5.0);
        if objective(hi) < 0.0 {
            return Err(PvtError::NumericalProblem {
                message: format!("hydrogen density above the bisection bracket at T = {t}, p = {p}"),
            });
        }
        for _ in 0..200 {
            let mid = 0.5 * (lo + hi);
            if objective(mid) < 0.0 {
                lo = mid;
            } else {
                hi = mid;
            }
            if hi - lo < 1e-14 {
                break;
            }
        }
        Ok(0.5 * (lo + hi))
    }

    /// `ln φ` of pure hydrogen at `(t, p)`.
    pub fn ln_fugacity_coefficient(t: Real, p: Real) -> PvtResult<Real> {
        let delta = Self::reduced_density(t, p)?;
        let res = residual(Self::CRITICAL_TEMPERATURE / t, delta);
        Ok(res.phi + res.delta_d_delta - (1.0 + res.delta_d_delta).ln())
    }

    /// Density [kg/m³] and specific enthalpy [J/kg] from the Helmholtz
    /// formulation. Used to fill the property tables.
    pub(crate) fn eos_state(t: Real, p: Real) -> PvtResult<(Real, Real)> {
        let delta = Self::reduced_density(t, p)?;
        let tau = Self::CRITICAL_TEMPERATURE / t;
        let res = residual(tau, delta);
        let rho = delta * Self::CRITICAL_DENSITY * Self::MOLAR_MASS;
        let h_over_rt = 1.0 + tau * ideal_d_tau(tau) + res.tau_d_tau + res.delta_d_delta;
        Ok((rho, h_over_rt * R * t / Self::MOLAR_MASS))
    }
}

fn ideal_d_tau(tau: Real) -> Real {
    let sum: Real = IDEAL_AK
        .iter()
        .zip(IDEAL_BK)
        .map(|(a, b)| {
            let e = (b * tau).exp();
            -a * b * e / (1.0 - e)
        })
        .sum();
    1.5 / tau + IDEAL_A2 + sum
}

pub(crate) fn residual(tau: Real, delta: Real) -> Residual {
    let mut out = Residual {
        phi: 0.0,
        delta_d_delta: 0.0,
        tau_d_tau: 0.0,
    };
    for i in 0..14 {
        let d = D_EXP[i] as Real;
        let term = N[i] * delta.powi(D_EXP[i]) * tau.powf(T_EXP[i]);
        match i {
            0..7 => {
                out.phi += term;
                out.delta_d_delta += d * term;
                out.tau_d_tau += T_EXP[i] * term;
            }
            7..9 => {
                let e = term * (-delta).exp();
                out.phi += e;
                out.delta_d_delta += e * (d - delta);
                out.tau_d_tau += T_EXP[i] * e;
            }
            _ => {
                let k = i - 9;
                let g = term
                    * (PHI[k] * (delta - D_BELL[k]).powi(2) + BETA[k] * (tau - GAMMA[k]).powi(2)).exp();
                out.phi += g;
                out.delta_d_delta += g * (d + 2.0 * PHI[k] * delta * (delta - D_BELL[k]));
                out.tau_d_tau += g * (T_EXP[i] + 2.0 * BETA[k] * tau * (tau - GAMMA[k]));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_reference_points() {
        // NIST webbook: 300 K, 10 MPa -> 7.64 kg/m³
        let (rho, _) = H2::eos_state(300.0, 1e7).unwrap();
        assert!((rho - 7.64).abs() < 0.1, "rho = {rho}");
        let (rho_surf, _) = H2::eos_state(288.71, 101_325.0).unwrap();
        assert!((rho_surf - 0.085).abs() < 0.001, "rho = {rho_surf}");
    }

    #[test]
    fn enthalpy_increases_with_temperature() {
        let (_, h1) = H2::eos_state(300.0, 1e7).unwrap();
        let (_, h2) = H2::eos_state(310.0, 1e7).unwrap();
        // cp of hydrogen is about 14.3 kJ/(kg K)
        let cp = (h2 - h1) / 10.0;
        assert!(cp > 13e3 && cp < 15.5e3, "cp = {cp}");
    }

    #[test]
    fn fugacity_coefficient_above_one_at_high_pressure() {
        let ln_phi = H2::ln_fugacity_coefficient(323.15, 3e7).unwrap();
        assert!(ln_phi > 0.0 && ln_phi < 0.5, "ln phi = {ln_phi}");
        assert!(H2::ln_fugacity_coefficient(323.15, 1e5).unwrap().abs() < 1e-2);
    }

    #[test]
    fn sutherland_reference_viscosity() {
        assert!((H2::gas_viscosity(293.85, 1e5) - 8.76e-6).abs() < 1e-18);
        assert!(H2::gas_viscosity(400.0, 1e5) > H2::gas_viscosity(300.0, 1e5));
    }
}
