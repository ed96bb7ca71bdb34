//! NaCl brine with a salinity argument on every liquid property.

use super::h2o::H2o;
use crate::error::PvtResult;
use bo_core::Real;

/// Molar mass of NaCl [kg/mol].
pub const SALT_MOLAR_MASS: Real = 58.44e-3;

/// Brine whose salt mass fraction is passed per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Brine;

impl Brine {
    pub const NAME: &'static str = "Brine";

    /// Mean molar mass of brine with salt mass fraction `salinity`.
    pub fn molar_mass(salinity: Real) -> Real {
        let m1 = H2o::MOLAR_MASS;
        m1 * SALT_MOLAR_MASS / (SALT_MOLAR_MASS + salinity * (m1 - SALT_MOLAR_MASS))
    }

    pub fn vapor_pressure(t: Real) -> Real {
        H2o::vapor_pressure(t)
    }

    /// Batzle and Wang (1992) brine density on top of the pure water density.
    pub fn liquid_density(t: Real, p: Real, salinity: Real, extrapolate: bool) -> PvtResult<Real> {
        let rho_w = H2o::liquid_density(t, p, extrapolate)?;
        Ok(Self::liquid_density_from_water(t, p, salinity, rho_w))
    }

    pub fn liquid_density_from_water(t: Real, p: Real, salinity: Real, rho_w: Real) -> Real {
        let tc = t - 273.15;
        let p_mpa = p / 1e6;
        let s = salinity;
        rho_w
            + 1000.0
                * s
                * (0.668
                    + 0.44 * s
                    + 1e-6
                        * (300.0 * p_mpa - 2400.0 * p_mpa * s
                            + tc * (80.0 + 3.0 * tc - 3300.0 * s - 13.0 * p_mpa
                                + 47.0 * p_mpa * s)))
    }

    /// Batzle and Wang brine viscosity [Pa·s]. Temperatures below 275 K use
    /// the 275 K value.
    pub fn liquid_viscosity(t: Real, _p: Real, salinity: Real) -> Real {
        let tc = if t <= 275.0 { 275.0 } else { t - 273.15 };
        let a = (0.42 * (salinity.powf(0.8) - 0.17).powi(2) + 0.045) * tc.powf(0.8);
        let mu_cp = 0.1 + 0.333 * salinity + (1.65 + 91.9 * salinity.powi(3)) * (-a).exp();
        mu_cp / 1000.0
    }

    /// Specific enthalpy of brine [J/kg] (Michaelides).
    pub fn liquid_enthalpy(t: Real, p: Real, salinity: Real) -> Real {
        let hw = H2o::liquid_enthalpy(t, p) / 1e3;
        michaelides_enthalpy(t, hw, salinity) * 1e3
    }

    pub fn liquid_internal_energy(
        t: Real,
        p: Real,
        salinity: Real,
        extrapolate: bool,
    ) -> PvtResult<Real> {
        Ok(Self::liquid_enthalpy(t, p, salinity) - p / Self::liquid_density(t, p, salinity, extrapolate)?)
    }
}

/// Enthalpy of brine [kJ/kg] from the pure water enthalpy `hw` [kJ/kg].
///
/// Salinity is capped at the halite saturation limit (Palliser). Halite
/// enthalpy after Daubert and Danner, heat of dissolution after Michaelides.
pub(crate) fn michaelides_enthalpy(t: Real, hw: Real, salinity: Real) -> Real {
    const F: [Real; 4] = [2.63500e-1, 7.48368e-6, 1.44611e-6, -3.80860e-10];
    const A: [[Real; 3]; 4] = [
        [9633.6, -4080.0, 286.49],
        [166.58, 68.577, -4.6856],
        [-0.90963, -0.36524, 0.249667e-1],
        [0.17965e-2, 0.71924e-3, -0.4900e-4],
    ];

    let theta = t - 273.15;
    let s_sat = F[0] + theta * (F[1] + theta * (F[2] + theta * F[3]));
    let s = salinity.min(s_sat);

    let h_nacl = (3.6710e4 * t + 0.5 * 6.2770e1 * t * t - (6.6670e-2 / 3.0) * t.powi(3)
        + (2.8000e-5 / 4.0) * t.powi(4))
        / 58.44e3
        - 2.045698e2;

    let m = 1e3 / 58.44 * s / (1.0 - s);
    let mut d_h = 0.0;
    let mut theta_i = 1.0;
    for row in &A {
        let mut m_j = 1.0;
        for &a in row {
            d_h += a * theta_i * m_j;
            m_j *= m;
        }
        theta_i *= theta;
    }
    let delta_h = 4.184 / (1e3 + 58.44 * m) * d_h;

    (1.0 - s) * hw + s * h_nacl + s * delta_h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_water_limits() {
        assert!((Brine::molar_mass(0.0) - H2o::MOLAR_MASS).abs() < 1e-15);
        let rho_w = H2o::liquid_density(300.0, 1e7, false).unwrap();
        let rho = Brine::liquid_density(300.0, 1e7, 0.0, false).unwrap();
        assert_eq!(rho, rho_w);
        let h = Brine::liquid_enthalpy(320.0, 1e6, 0.0);
        let hw = H2o::liquid_enthalpy(320.0, 1e6);
        assert!((h - hw).abs() < 1e-9 * hw.abs());
    }

    #[test]
    fn salt_makes_brine_heavier_and_more_viscous() {
        let fresh = Brine::liquid_density(330.0, 2e7, 0.0, false).unwrap();
        let salty = Brine::liquid_density(330.0, 2e7, 0.1, false).unwrap();
        assert!(salty > fresh);
        assert!(Brine::molar_mass(0.1) > H2o::MOLAR_MASS);
        assert!(Brine::liquid_viscosity(330.0, 2e7, 0.1) > Brine::liquid_viscosity(330.0, 2e7, 0.0));
    }

    #[test]
    fn viscosity_is_clamped_below_275_kelvin() {
        assert_eq!(
            Brine::liquid_viscosity(260.0, 1e5, 0.05),
            Brine::liquid_viscosity(275.0, 1e5, 0.05)
        );
        let mu = Brine::liquid_viscosity(293.15, 1e5, 0.0);
        assert!(mu > 0.5e-3 && mu < 1.5e-3, "mu = {mu}");
    }

    #[test]
    fn salinity_is_capped_at_halite_saturation() {
        let capped = michaelides_enthalpy(350.0, 300.0, 0.9);
        let at_limit = {
            let theta: Real = 350.0 - 273.15;
            let s = 2.635e-1 + theta * (7.48368e-6 + theta * (1.44611e-6 - theta * 3.8086e-10));
            michaelides_enthalpy(350.0, 300.0, s)
        };
        assert!((capped - at_limit).abs() < 1e-9);
    }
}
