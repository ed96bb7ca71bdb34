//! Solubility of hydrogen in brine after Li et al. (2018).

use crate::components::{H2, H2o};
use crate::error::PvtResult;
use bo_core::Real;

const WATER_MOLALITY: Real = 55.51;

#[derive(Debug, Clone, Copy, Default)]
pub struct BrineH2;

impl BrineH2 {
    /// Mole fraction of H2 in the aqueous phase. `salinity` is the salt
    /// molality used by the Setchenow-type activity term.
    pub fn mole_fraction_h2(t: Real, pg: Real, salinity: Real) -> PvtResult<Real> {
        let ln_y_h2 = (1.0 - H2o::vapor_pressure(t) / pg).ln();
        let ln_pg = (pg / 1e6).ln();
        let ln_phi = H2::ln_fugacity_coefficient(t, pg)?;
        let ln_kh = henry_constant_ln(t);
        let poynting = poynting_factor(t, pg);
        let ln_gamma = activity_ln(t, salinity);
        // Henry's constant is per mole fraction, the solubility is a molality
        let molality =
            (ln_y_h2 + ln_pg + ln_phi - ln_kh - poynting - ln_gamma + WATER_MOLALITY.ln()).exp();
        Ok(molality / (WATER_MOLALITY + molality))
    }

    /// Gas phase binary diffusion coefficient [m²/s] (Fuller, Schettler and
    /// Giddings).
    pub fn gas_diffusion_coefficient(t: Real, p: Real) -> Real {
        const DIFFUSION_VOLUMES: [Real; 2] = [13.1, 7.07];
        let molar_masses = [H2o::MOLAR_MASS * 1e3, H2::MOLAR_MASS * 1e3];
        fuller(molar_masses, DIFFUSION_VOLUMES, t, p)
    }
}

fn poynting_factor(t: Real, pg: Real) -> Real {
    const A: [Real; 4] = [6.156755, -2.502396e-2, 4.140593e-5, -1.322988e-3];
    let p = pg / 1e6;
    A[0] * p / t + A[1] * p + A[2] * t * p + A[3] * p * p / t
}

fn activity_ln(t: Real, salinity: Real) -> Real {
    (0.64485 - 0.00142 * t) * salinity
}

fn henry_constant_ln(t: Real) -> Real {
    const A: [Real; 5] = [2.68721e-5, -0.05121, 33.55196, -3411.0432, -31258.74683];
    A[0] * t * t + A[1] * t + A[2] + A[3] / t + A[4] / (t * t)
}

/// Fuller's method [m²/s]; molar masses in g/mol, pressure in Pa.
pub(crate) fn fuller(molar_masses: [Real; 2], diffusion_volumes: [Real; 2], t: Real, p: Real) -> Real {
    let p_atm = p / 1.01325e5;
    let m_ab = 1.0 / molar_masses[0] + 1.0 / molar_masses[1];
    let sigma = diffusion_volumes[0].powf(1.0 / 3.0) + diffusion_volumes[1].powf(1.0 / 3.0);
    // cm²/s -> m²/s
    1e-4 * 1e-3 * t.powf(1.75) * m_ab.sqrt() / (p_atm * sigma * sigma)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solubility_is_small_and_grows_with_pressure() {
        let low = BrineH2::mole_fraction_h2(323.15, 5e6, 0.0).unwrap();
        let high = BrineH2::mole_fraction_h2(323.15, 2e7, 0.0).unwrap();
        // about 7e-4 at 50 °C and 50 bar
        assert!(low > 3e-4 && low < 1.5e-3, "x = {low}");
        assert!(high > low);
    }

    #[test]
    fn salt_reduces_solubility() {
        let fresh = BrineH2::mole_fraction_h2(323.15, 1e7, 0.0).unwrap();
        let salty = BrineH2::mole_fraction_h2(323.15, 1e7, 2.0).unwrap();
        assert!(salty < fresh);
    }

    #[test]
    fn fuller_scales_inversely_with_pressure() {
        let d1 = BrineH2::gas_diffusion_coefficient(300.0, 1e5);
        let d2 = BrineH2::gas_diffusion_coefficient(300.0, 2e5);
        assert!((d1 / d2 - 2.0).abs() < 1e-12);
        // order of 1e-4 m²/s at ambient conditions
        assert!(d1 > 1e-5 && d1 < 1e-3, "D = {d1}");
    }
}
