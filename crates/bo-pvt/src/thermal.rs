//! Building blocks shared by the thermal wrappers of the three phases.

use crate::error::{PvtError, PvtResult};
use crate::tabulated::Tabulated1D;
use bo_core::Real;

/// Number of steps of the pressure integration of the Joule-Thomson term.
const JOULE_THOMSON_STEPS: usize = 100;

/// Quadratic thermal expansion around `t_ref` (OILDENT, GASDENT, WATDENT).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalExpansion {
    pub t_ref: Real,
    pub c1: Real,
    pub c2: Real,
}

impl ThermalExpansion {
    pub fn new(t_ref: Real, c1: Real, c2: Real) -> Self {
        Self { t_ref, c1, c2 }
    }

    /// `1 + (c1 + c2 Y) Y` with `Y = T - t_ref`; oil and gas divide B⁻¹ by it.
    pub fn volume_factor(&self, t: Real) -> Real {
        let y = t - self.t_ref;
        1.0 + (self.c1 + self.c2 * y) * y
    }

    /// Thermal expansion coefficient `d ln V / dT`.
    pub fn alpha(&self, t: Real) -> Real {
        let y = t - self.t_ref;
        (self.c1 + 2.0 * self.c2 * y) / (1.0 + self.c1 * y + self.c2 * y * y)
    }
}

/// Joule-Thomson input of one region. A zero coefficient means the
/// coefficient is derived from the thermal expansion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JouleThomson {
    pub p_ref: Real,
    pub coefficient: Real,
}

/// `u(T)` from a specific heat table: trapezoidal integral of `cv` starting
/// at `T0 cv(T0) + offset`.
pub(crate) fn internal_energy_curve(
    temperatures: &[Real],
    cv: &[Real],
    offset: Real,
) -> PvtResult<Tabulated1D> {
    if temperatures.len() != cv.len() || temperatures.is_empty() {
        return Err(PvtError::invalid_table(
            "specific heat table needs matching, non-empty temperature and cv columns",
        ));
    }
    let mut u = temperatures[0] * cv[0] + offset;
    let mut samples = Vec::with_capacity(temperatures.len());
    samples.push(u);
    for i in 1..temperatures.len() {
        u += 0.5 * (cv[i - 1] + cv[i]) * (temperatures[i] - temperatures[i - 1]);
        samples.push(u);
    }
    Tabulated1D::from_samples(temperatures, &samples)
}

/// Internal energy with the Joule-Thomson pressure term:
/// `Cp (T - t_ref) + h_p(p) - p/rho` with `Cp = u(T)/T`.
///
/// `density_at(p)` is the phase density at temperature `t`.
pub(crate) fn joule_thomson_internal_energy(
    u_curve: &Tabulated1D,
    t: Real,
    p: Real,
    t_ref: Real,
    jt: JouleThomson,
    expansion: Option<ThermalExpansion>,
    phase: &str,
    density_at: impl Fn(Real) -> PvtResult<Real>,
) -> PvtResult<Real> {
    let cp = u_curve.eval(t, true)? / t;
    let enthalpy_p = if jt.coefficient != 0.0 {
        -cp * jt.coefficient * (p - jt.p_ref)
    } else if let Some(expansion) = expansion {
        let alpha = expansion.alpha(t);
        let delta_p = (p - jt.p_ref) / JOULE_THOMSON_STEPS as Real;
        let mut h = 0.0;
        for i in 0..JOULE_THOMSON_STEPS {
            let rho = density_at(jt.p_ref + i as Real * delta_p)?;
            let coefficient = -(1.0 / cp) * (1.0 - alpha * t) / rho;
            h += -cp * coefficient * delta_p;
        }
        h
    } else {
        return Err(PvtError::not_implemented(format!(
            "Requested Joule-Thomson calculation but the thermal {phase} density is not provided"
        )));
    };
    Ok(cp * (t - t_ref) + enthalpy_p - p / density_at(p)?)
}

pub(crate) fn internal_energy_disabled(phase: &str) -> PvtError {
    PvtError::not_implemented(format!(
        "Requested the internal energy of {phase} but it is disabled"
    ))
}
