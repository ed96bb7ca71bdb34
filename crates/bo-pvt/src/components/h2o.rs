//! Water after Hu, Duan, Zhu and Chou (liquid density) with IAPWS vapour
//! pressure and viscosity.

use crate::error::{PvtError, PvtResult};
use bo_core::Real;
use bo_core::units::constants::R;
use tracing::warn;

/// Simplified water component.
#[derive(Debug, Clone, Copy, Default)]
pub struct H2o;

impl H2o {
    pub const NAME: &'static str = "H2O";
    pub const MOLAR_MASS: Real = 18e-3;
    pub const CRITICAL_TEMPERATURE: Real = 647.096;
    pub const CRITICAL_PRESSURE: Real = 22.064e6;
    pub const TRIPLE_TEMPERATURE: Real = 273.16;
    pub const TRIPLE_PRESSURE: Real = 611.657;

    /// Upper validity bounds of the liquid density correlation.
    const DENSITY_MAX_TEMPERATURE: Real = 647.0;
    const DENSITY_MAX_PRESSURE: Real = 100e6;
    /// Above this the Hu et al. viscosity departs from IAPWS.
    const VISCOSITY_MAX_TEMPERATURE: Real = 570.0;

    /// Vapour pressure [Pa] (IAPWS-97 region 4). Zero below the triple point,
    /// the critical pressure above the critical point.
    pub fn vapor_pressure(t: Real) -> Real {
        if t > Self::CRITICAL_TEMPERATURE {
            return Self::CRITICAL_PRESSURE;
        }
        if t < Self::TRIPLE_TEMPERATURE {
            return 0.0;
        }
        const N: [Real; 10] = [
            0.116_705_214_527_67e4,
            -0.724_213_167_032_06e6,
            -0.170_738_469_400_92e2,
            0.120_208_247_024_70e5,
            -0.323_255_503_223_33e7,
            0.149_151_086_135_30e2,
            -0.482_326_573_615_91e4,
            0.405_113_405_420_57e6,
            -0.238_555_575_678_49,
            0.650_175_348_447_98e3,
        ];
        let sigma = t + N[8] / (t - N[9]);
        let a = (sigma + N[0]) * sigma + N[1];
        let b = (N[2] * sigma + N[3]) * sigma + N[4];
        let c = (N[5] * sigma + N[6]) * sigma + N[7];
        let tmp = 2.0 * c / ((b * b - 4.0 * a * c).sqrt() - b);
        1e6 * tmp.powi(4)
    }

    /// Specific enthalpy of steam [J/kg].
    pub fn gas_enthalpy(t: Real, _p: Real) -> Real {
        1.976e3 * t + 40.65e3 / Self::MOLAR_MASS
    }

    /// Specific enthalpy of liquid water [J/kg], zero at surface temperature.
    pub fn liquid_enthalpy(t: Real, _p: Real) -> Real {
        let dt = t - 288.71;
        dt * (4.180_607_37e3 + 8.646_449_81e-2 * dt)
    }

    pub fn gas_internal_energy(t: Real, p: Real) -> Real {
        Self::gas_enthalpy(t, p) - R * t / Self::MOLAR_MASS
    }

    pub fn liquid_internal_energy(t: Real, p: Real, extrapolate: bool) -> PvtResult<Real> {
        Ok(Self::liquid_enthalpy(t, p) - p / Self::liquid_density(t, p, extrapolate)?)
    }

    /// Ideal gas density of steam [kg/m³].
    pub fn gas_density(t: Real, p: Real) -> Real {
        Self::MOLAR_MASS * p / (R * t)
    }

    pub fn gas_viscosity(_t: Real, _p: Real) -> Real {
        1e-5
    }

    /// Liquid density [kg/m³]. Valid below 647 K and 100 MPa; outside that
    /// domain it fails unless `extrapolate` is set.
    pub fn liquid_density(t: Real, p: Real, extrapolate: bool) -> PvtResult<Real> {
        if t > Self::DENSITY_MAX_TEMPERATURE || p > Self::DENSITY_MAX_PRESSURE {
            if !extrapolate {
                return Err(if t > Self::DENSITY_MAX_TEMPERATURE {
                    PvtError::OutOfRange {
                        what: "water density temperature",
                        value: t,
                        min: 0.0,
                        max: Self::DENSITY_MAX_TEMPERATURE,
                    }
                } else {
                    PvtError::OutOfRange {
                        what: "water density pressure",
                        value: p,
                        min: 0.0,
                        max: Self::DENSITY_MAX_PRESSURE,
                    }
                });
            }
            warn!(
                temperature = t,
                pressure = p,
                "water density is only valid below 647 K and 100 MPa, extrapolating"
            );
        }

        const K0: [Real; 5] = [3.27225e-07, -4.20950e-04, 2.32594e-01, -4.16920e+01, 5.71292e+03];
        const K1: [Real; 5] = [-2.32306e-10, 2.91138e-07, -1.49662e-04, 3.59860e-02, -3.55071];
        const K2: [Real; 3] = [2.57241e-14, -1.24336e-11, 5.42707e-07];
        const K3: [Real; 3] = [-4.42028e-18, 2.10007e-15, -8.11491e-11];

        let p_mpa = p / 1e6;
        let mw = Self::MOLAR_MASS * 1e3;
        let k0 = 1e-3 * (((K0[0] * t + K0[1]) * t + K0[2]) * t + K0[3] + K0[4] / t);
        let k1 = 1e-2 * (((K1[0] * t + K1[1]) * t + K1[2]) * t + K1[3] + K1[4] / t);
        let k2 = 1e-1 * ((K2[0] * t + K2[1]) * t * t + K2[2]);
        let k3 = (K3[0] * t + K3[1]) * t * t + K3[2];

        // molar volume [m³/kmol]
        let vw = ((k3 * p_mpa + k2) * p_mpa + k1) * p_mpa + k0;
        Ok(mw / vw)
    }

    /// Liquid viscosity [Pa·s]. Valid up to 570 K.
    pub fn liquid_viscosity(t: Real, p: Real, extrapolate: bool) -> PvtResult<Real> {
        if t > Self::VISCOSITY_MAX_TEMPERATURE {
            if !extrapolate {
                return Err(PvtError::OutOfRange {
                    what: "water viscosity temperature",
                    value: t,
                    min: 0.0,
                    max: Self::VISCOSITY_MAX_TEMPERATURE,
                });
            }
            warn!(
                temperature = t,
                "water viscosity departs from IAPWS above 570 K, extrapolating"
            );
        }
        let rho = Self::liquid_density(t, p, extrapolate)?;
        Ok(iapws_viscosity(t, rho))
    }
}

/// IAPWS 2008 viscosity (without the critical enhancement) [Pa·s].
pub(crate) fn iapws_viscosity(t: Real, rho: Real) -> Real {
    const H: [[Real; 7]; 6] = [
        [0.520094, 0.222531, -0.281378, 0.161913, -0.0325372, 0.0, 0.0],
        [0.0850895, 0.999115, -0.906851, 0.257399, 0.0, 0.0, 0.0],
        [-1.08374, 1.88797, -0.772479, 0.0, 0.0, 0.0, 0.0],
        [-0.289555, 1.26613, -0.489837, 0.0, 0.0698452, 0.0, -0.00435673],
        [0.0, 0.0, -0.257040, 0.0, 0.0, 0.00872102, 0.0],
        [0.0, 0.120573, 0.0, 0.0, 0.0, 0.0, -0.000593264],
    ];
    const H0: [Real; 4] = [1.67752, 2.20462, 0.6366564, -0.241605];

    let rho_bar = rho / 322.0;
    let t_bar = t / 647.096;

    let tmp_t = 1.0 / t_bar - 1.0;
    let tmp_rho = rho_bar - 1.0;
    let mut sum = 0.0;
    let mut tmp_ti = 1.0;
    for row in &H {
        let mut tmp_rhoj = 1.0;
        for &hij in row {
            sum += hij * tmp_ti * tmp_rhoj;
            tmp_rhoj *= tmp_rho;
        }
        tmp_ti *= tmp_t;
    }
    let mu1 = (rho_bar * sum).exp();

    let denom: Real = H0
        .iter()
        .enumerate()
        .map(|(i, h)| h / t_bar.powi(i as i32))
        .sum();
    let mu0 = 100.0 * t_bar.sqrt() / denom;

    1e-6 * mu0 * mu1
}
