//! Mutual solubility of CO2 and brine after Spycher and Pruess (2005, 2010)
//! with Duan and Sun salting-out coefficients.

use crate::components::brine::SALT_MOLAR_MASS;
use crate::components::{Co2, H2o};
use crate::error::{PvtError, PvtResult};
use bo_core::Real;
use bo_core::units::constants::R;

/// Molality of pure water [mol/kg].
const WATER_MOLALITY: Real = 55.508;
/// Above this temperature the high-temperature parameter set is used.
const HIGH_TEMPERATURE: Real = 372.15;
/// Width of the blending band between the two parameter sets.
const BLEND_WIDTH: Real = 10.0;

/// Salt activity coefficient model for dissolved CO2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaltActivityModel {
    /// Pressure dependent Pitzer parameters (Duan and Sun 2003).
    DuanSun,
    /// Temperature-only parameters (Spycher and Pruess 2005).
    SpycherPruess,
    /// Spycher and Pruess with the molality to mole fraction correction.
    #[default]
    SpycherPruessMolal,
}

impl TryFrom<i32> for SaltActivityModel {
    type Error = PvtError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::DuanSun),
            2 => Ok(Self::SpycherPruess),
            3 => Ok(Self::SpycherPruessMolal),
            _ => Err(PvtError::invalid_arg(
                "The salt activity model options are 1, 2 or 3",
            )),
        }
    }
}

impl From<SaltActivityModel> for i32 {
    fn from(model: SaltActivityModel) -> Self {
        match model {
            SaltActivityModel::DuanSun => 1,
            SaltActivityModel::SpycherPruess => 2,
            SaltActivityModel::SpycherPruessMolal => 3,
        }
    }
}

/// Equilibrium mole fractions of the two phases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoleFractions {
    /// CO2 in the aqueous phase.
    pub x_co2: Real,
    /// H2O in the gas phase.
    pub y_h2o: Real,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BrineCo2;

impl BrineCo2 {
    /// Binary diffusion coefficient in the gas phase [m²/s] (Stokes-Einstein).
    pub fn gas_diffusion_coefficient(t: Real, p: Real, extrapolate: bool) -> PvtResult<Real> {
        const BOLTZMANN: Real = 1.3806504e-23;
        const SLIP: Real = 4.0;
        const HYDRODYNAMIC_RADIUS: Real = 1.72e-10;
        let mu = Co2::gas_viscosity(t, p, extrapolate)?;
        Ok(BOLTZMANN / (SLIP * std::f64::consts::PI * HYDRODYNAMIC_RADIUS) * (t / mu))
    }

    /// Binary diffusion coefficient in the liquid phase [m²/s].
    pub fn liquid_diffusion_coefficient(_t: Real, _p: Real) -> Real {
        2e-9
    }

    /// Equilibrium composition at gas pressure `pg` for a brine of salt
    /// mass fraction `salinity`.
    pub fn mole_fractions(
        t: Real,
        pg: Real,
        salinity: Real,
        model: SaltActivityModel,
        extrapolate: bool,
    ) -> PvtResult<MoleFractions> {
        let molality = mole_fraction_to_molality(salinity_to_mole_fraction(salinity));
        let gamma_nacl = if molality > 0.0 {
            salt_activity(model, t, pg, molality)
        } else {
            1.0
        };

        if t > HIGH_TEMPERATURE {
            let mut y_h2o = H2o::vapor_pressure(t) / pg;
            let mut x_co2 = 0.009;
            for _ in 0..100 {
                let next = mutual_solubility(t, pg, x_co2, y_h2o, molality, gamma_nacl, true, extrapolate)?;
                let converged =
                    (next.x_co2 - x_co2).abs() < 1e-8 && (next.y_h2o - y_h2o).abs() < 1e-8;
                x_co2 = next.x_co2;
                y_h2o = next.y_h2o;
                if converged {
                    break;
                }
            }
            Ok(MoleFractions { x_co2, y_h2o })
        } else {
            mutual_solubility(t, pg, 0.0, 0.0, molality, gamma_nacl, false, extrapolate)
        }
    }

    /// Fugacity coefficient of CO2 in the CO2-rich phase (Redlich-Kwong).
    pub fn fugacity_coefficient_co2(
        t: Real,
        pg: Real,
        y_h2o: Real,
        high_temp: bool,
        extrapolate: bool,
    ) -> PvtResult<Real> {
        fugacity_coefficient(t, pg, y_h2o, high_temp, extrapolate, Species::Co2)
    }

    /// Fugacity coefficient of H2O in the CO2-rich phase (Redlich-Kwong).
    pub fn fugacity_coefficient_h2o(
        t: Real,
        pg: Real,
        y_h2o: Real,
        high_temp: bool,
        extrapolate: bool,
    ) -> PvtResult<Real> {
        fugacity_coefficient(t, pg, y_h2o, high_temp, extrapolate, Species::H2o)
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Species {
    Co2,
    H2o,
}

/// Gas constant in bar cm³/(K mol).
const R_BAR_CM3: Real = R * 10.0;

fn fugacity_coefficient(
    t: Real,
    pg: Real,
    y_h2o: Real,
    high_temp: bool,
    extrapolate: bool,
    species: Species,
) -> PvtResult<Real> {
    // molar volume [cm³/mol]
    let v = 1.0 / (Co2::gas_density(t, pg, extrapolate)? / Co2::MOLAR_MASS) * 1e6;
    let pg_bar = pg / 1e5;
    let a_co2_h2o = a_co2_h2o(t, y_h2o, high_temp);
    let a_mix = a_mix(t, y_h2o, high_temp);
    let b_mix = b_mix(y_h2o, high_temp);
    let (b_i, a_pair) = match species {
        Species::Co2 => (
            b_co2(high_temp),
            y_h2o * a_co2_h2o + (1.0 - y_h2o) * a_co2(t, high_temp),
        ),
        Species::H2o => (
            b_h2o(high_temp),
            y_h2o * a_h2o(t, high_temp) + (1.0 - y_h2o) * a_co2_h2o,
        ),
    };
    let rt15 = R_BAR_CM3 * t.powf(1.5);

    let mut ln_phi = (v / (v - b_mix)).ln();
    ln_phi += b_i / (v - b_mix);
    ln_phi -= 2.0 * a_pair / (rt15 * b_mix) * ((v + b_mix) / v).ln();
    ln_phi += a_mix * b_i / (rt15 * b_mix * b_mix) * (((v + b_mix) / v).ln() - b_mix / (v + b_mix));
    ln_phi -= (pg_bar * v / (R_BAR_CM3 * t)).ln();
    Ok(ln_phi.exp())
}

fn a_co2(t: Real, high_temp: bool) -> Real {
    if high_temp {
        8.008e7 - 4.984e4 * t
    } else {
        7.54e7 - 4.13e4 * t
    }
}

fn a_h2o(t: Real, high_temp: bool) -> Real {
    if high_temp { 1.337e8 - 1.4e4 * t } else { 0.0 }
}

fn a_co2_h2o(t: Real, y_h2o: Real, high_temp: bool) -> Real {
    if high_temp {
        let k_co2_h2o = 0.4228 - 7.422e-4 * t;
        let k_h2o_co2 = 1.427e-2 - 4.037e-4 * t;
        let k = y_h2o * k_h2o_co2 + (1.0 - y_h2o) * k_co2_h2o;
        (a_co2(t, true) * a_h2o(t, true)).sqrt() * (1.0 - k)
    } else {
        7.89e7
    }
}

fn a_mix(t: Real, y_h2o: Real, high_temp: bool) -> Real {
    if high_temp {
        let y_co2 = 1.0 - y_h2o;
        y_h2o * y_h2o * a_h2o(t, true)
            + 2.0 * y_h2o * y_co2 * a_co2_h2o(t, y_h2o, true)
            + y_co2 * y_co2 * a_co2(t, true)
    } else {
        a_co2(t, false)
    }
}

fn b_co2(high_temp: bool) -> Real {
    if high_temp { 28.25 } else { 27.8 }
}

fn b_h2o(high_temp: bool) -> Real {
    if high_temp { 15.7 } else { 18.18 }
}

fn b_mix(y_h2o: Real, high_temp: bool) -> Real {
    if high_temp {
        y_h2o * b_h2o(true) + (1.0 - y_h2o) * b_co2(true)
    } else {
        b_co2(false)
    }
}

/// Average partial molar volumes [cm³/mol].
fn v_avg_co2(t: Real, high_temp: bool) -> Real {
    if high_temp && t > 373.15 {
        32.6 + 3.413e-2 * (t - 373.15)
    } else {
        32.6
    }
}

fn v_avg_h2o(t: Real, high_temp: bool) -> Real {
    if high_temp && t > 373.15 {
        18.1 + 3.137e-2 * (t - 373.15)
    } else {
        18.1
    }
}

/// Margules parameter of the aqueous activity model.
fn margules(t: Real, high_temp: bool) -> Real {
    if high_temp && t > 373.15 {
        let dt = t - 373.15;
        dt * (-3.084e-2 + 1.927e-5 * dt)
    } else {
        0.0
    }
}

/// Reference pressure [bar].
fn reference_pressure(t: Real, high_temp: bool) -> Real {
    if high_temp && t > 373.15 {
        const C: [Real; 5] = [-1.9906e-1, 2.0471e-3, 1.0152e-4, -1.4234e-6, 1.4168e-8];
        let tc = t - 273.15;
        C[0] + tc * (C[1] + tc * (C[2] + tc * (C[3] + tc * C[4])))
    } else {
        1.0
    }
}

fn activity_co2(t: Real, x_co2: Real, high_temp: bool) -> Real {
    if high_temp {
        let am = margules(t, true);
        (2.0 * am * x_co2 * (1.0 - x_co2).powi(2)).exp()
    } else {
        1.0
    }
}

fn activity_h2o(t: Real, x_co2: Real, high_temp: bool) -> Real {
    if high_temp {
        let am = margules(t, true);
        ((1.0 - 2.0 * (1.0 - x_co2)) * am * x_co2 * x_co2).exp()
    } else {
        1.0
    }
}

fn salinity_to_mole_fraction(salinity: Real) -> Real {
    let mw = H2o::MOLAR_MASS;
    -mw * salinity / ((SALT_MOLAR_MASS - mw) * salinity - SALT_MOLAR_MASS)
}

fn mole_fraction_to_molality(x_nacl: Real) -> Real {
    WATER_MOLALITY * x_nacl / (1.0 - x_nacl)
}

fn salt_activity(model: SaltActivityModel, t: Real, pg: Real, molality: Real) -> Real {
    match model {
        SaltActivityModel::DuanSun => {
            const L: [Real; 6] = [
                -0.411370585,
                6.07632013e-4,
                97.5347708,
                -0.0237622469,
                0.0170656236,
                1.41335834e-5,
            ];
            const X: [Real; 4] = [3.36389723e-4, -1.98298980e-5, 2.12220830e-3, -5.24873303e-3];
            let pb = pg / 1e5;
            let lambda = L[0] + L[1] * t + L[2] / t + L[3] * pb / t + L[4] * pb / (630.0 - t)
                + L[5] * t * pb.ln();
            let xi = X[0] + X[1] * t + X[2] * pb / t + X[3] * pb / (630.0 - t);
            (2.0 * molality * lambda + xi * molality * molality).exp()
        }
        SaltActivityModel::SpycherPruess | SaltActivityModel::SpycherPruessMolal => {
            let lambda = 2.217e-4 * t + 1.074 / t + 2648.0 / (t * t);
            let xi = 1.3e-5 * t - 20.12 / t + 5259.0 / (t * t);
            let gamma = (2.0 * lambda * molality + xi * molality * molality).exp();
            if model == SaltActivityModel::SpycherPruessMolal {
                (1.0 + molality / WATER_MOLALITY) * gamma
            } else {
                gamma
            }
        }
    }
}

/// Equilibrium constant of CO2 at 1 bar.
fn k0_co2(t: Real, pg: Real, high_temp: bool) -> Real {
    let tc = t - 273.15;
    let c: [Real; 4] = if high_temp {
        [1.668, 3.992e-3, -1.156e-5, 1.593e-9]
    } else if tc < 31.0 && pg > Co2::vapor_pressure(t) {
        // liquid CO2
        [1.169, 1.368e-2, -5.38e-5, 0.0]
    } else {
        [1.189, 1.304e-2, -5.446e-5, 0.0]
    };
    Real::powf(10.0, c[0] + tc * (c[1] + tc * (c[2] + tc * c[3])))
}

/// Equilibrium constant of H2O at 1 bar.
fn k0_h2o(t: Real, high_temp: bool) -> Real {
    let tc = t - 273.15;
    let c: [Real; 5] = if high_temp {
        [-2.1077, 2.8127e-2, -8.4298e-5, 1.4969e-7, -1.1812e-10]
    } else {
        [-2.209, 3.097e-2, -1.098e-4, 2.048e-7, 0.0]
    };
    Real::powf(10.0, c[0] + tc * (c[1] + tc * (c[2] + tc * (c[3] + tc * c[4]))))
}

/// Weight of the low-temperature parameter set inside the blending band.
fn blend_weight(t: Real) -> Option<Real> {
    (t > HIGH_TEMPERATURE && t < HIGH_TEMPERATURE + BLEND_WIDTH)
        .then(|| (HIGH_TEMPERATURE + BLEND_WIDTH - t) / BLEND_WIDTH)
}

fn compute_a(t: Real, pg: Real, y_h2o: Real, x_co2: Real, high_temp: bool, extrapolate: bool) -> PvtResult<Real> {
    let dp = pg / 1e5 - reference_pressure(t, high_temp);
    let mut k0 = k0_h2o(t, high_temp);
    let mut phi = BrineCo2::fugacity_coefficient_h2o(t, pg, y_h2o, high_temp, extrapolate)?;
    let gamma = activity_h2o(t, x_co2, high_temp);
    if let Some(w) = blend_weight(t) {
        let k0_low = k0_h2o(t, false);
        let phi_low = BrineCo2::fugacity_coefficient_h2o(t, pg, 0.0, false, extrapolate)?;
        k0 = k0 * (1.0 - w) + k0_low * w;
        phi = phi * (1.0 - w) + phi_low * w;
    }
    let pg_bar = pg / 1e5;
    Ok(k0 * gamma / (phi * pg_bar) * (dp * v_avg_h2o(t, high_temp) / (R_BAR_CM3 * t)).exp())
}

fn compute_b(t: Real, pg: Real, y_h2o: Real, x_co2: Real, high_temp: bool, extrapolate: bool) -> PvtResult<Real> {
    let dp = pg / 1e5 - reference_pressure(t, high_temp);
    let mut k0 = k0_co2(t, pg, high_temp);
    let mut phi = BrineCo2::fugacity_coefficient_co2(t, pg, y_h2o, high_temp, extrapolate)?;
    let gamma = activity_co2(t, x_co2, high_temp);
    if let Some(w) = blend_weight(t) {
        let k0_low = k0_co2(t, pg, false);
        let phi_low = BrineCo2::fugacity_coefficient_co2(t, pg, 0.0, false, extrapolate)?;
        k0 = k0 * (1.0 - w) + k0_low * w;
        phi = phi * (1.0 - w) + phi_low * w;
    }
    let pg_bar = pg / 1e5;
    Ok(phi * pg_bar / (WATER_MOLALITY * k0 * gamma) * (-dp * v_avg_co2(t, high_temp) / (R_BAR_CM3 * t)).exp())
}

#[allow(clippy::too_many_arguments)]
fn mutual_solubility(
    t: Real,
    pg: Real,
    x_co2: Real,
    y_h2o: Real,
    molality: Real,
    gamma_nacl: Real,
    high_temp: bool,
    extrapolate: bool,
) -> PvtResult<MoleFractions> {
    let a = compute_a(t, pg, y_h2o, x_co2, high_temp, extrapolate)?;
    let b = compute_b(t, pg, y_h2o, x_co2, high_temp, extrapolate)? / gamma_nacl;
    let y_h2o_new = (1.0 - b) * WATER_MOLALITY
        / ((1.0 / a - b) * (2.0 * molality + WATER_MOLALITY) + 2.0 * molality * b);
    let x_co2_new = b * (1.0 - y_h2o_new);
    Ok(MoleFractions {
        x_co2: x_co2_new,
        y_h2o: y_h2o_new,
    })
}
