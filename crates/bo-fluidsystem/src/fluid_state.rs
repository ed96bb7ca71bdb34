//! The fluid state consumed by the fluid system.
//!
//! A state always knows pressure, temperature and saturation of each phase.
//! Composition comes either as explicit ratios (Rs, Rv, Rsw, Rvw) or as mass
//! fractions; explicit ratios win when both are present.

use bo_core::{CompIdx, NUM_COMPONENTS, NUM_PHASES, PhaseIdx, Real};

pub trait FluidState {
    /// Phase pressure [Pa].
    fn pressure(&self, phase: PhaseIdx) -> Real;

    /// Phase temperature [K].
    fn temperature(&self, phase: PhaseIdx) -> Real;

    fn saturation(&self, phase: PhaseIdx) -> Real;

    /// Dissolved gas-oil ratio.
    fn rs(&self) -> Option<Real> {
        None
    }

    /// Vaporized oil-gas ratio.
    fn rv(&self) -> Option<Real> {
        None
    }

    /// Dissolved gas-water ratio.
    fn rsw(&self) -> Option<Real> {
        None
    }

    /// Vaporized water-gas ratio.
    fn rvw(&self) -> Option<Real> {
        None
    }

    /// Salt concentration of the water phase [kg/m³].
    fn salt_concentration(&self) -> Option<Real> {
        None
    }

    /// Mass fraction of `comp` in `phase`.
    fn mass_fraction(&self, _phase: PhaseIdx, _comp: CompIdx) -> Option<Real> {
        None
    }
}

impl<S: FluidState + ?Sized> FluidState for &S {
    fn pressure(&self, phase: PhaseIdx) -> Real {
        (**self).pressure(phase)
    }

    fn temperature(&self, phase: PhaseIdx) -> Real {
        (**self).temperature(phase)
    }

    fn saturation(&self, phase: PhaseIdx) -> Real {
        (**self).saturation(phase)
    }

    fn rs(&self) -> Option<Real> {
        (**self).rs()
    }

    fn rv(&self) -> Option<Real> {
        (**self).rv()
    }

    fn rsw(&self) -> Option<Real> {
        (**self).rsw()
    }

    fn rvw(&self) -> Option<Real> {
        (**self).rvw()
    }

    fn salt_concentration(&self) -> Option<Real> {
        (**self).salt_concentration()
    }

    fn mass_fraction(&self, phase: PhaseIdx, comp: CompIdx) -> Option<Real> {
        (**self).mass_fraction(phase, comp)
    }
}

/// Plain value implementation of [`FluidState`], used by the CLI and tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimpleFluidState {
    pub pressure: [Real; NUM_PHASES],
    pub temperature: Real,
    pub saturation: [Real; NUM_PHASES],
    pub rs: Option<Real>,
    pub rv: Option<Real>,
    pub rsw: Option<Real>,
    pub rvw: Option<Real>,
    pub salt_concentration: Option<Real>,
    pub mass_fractions: Option<[[Real; NUM_COMPONENTS]; NUM_PHASES]>,
}

impl SimpleFluidState {
    /// All phases at pressure `p` and temperature `t`, no saturation.
    pub fn new(p: Real, t: Real) -> Self {
        Self {
            pressure: [p; NUM_PHASES],
            temperature: t,
            ..Self::default()
        }
    }

    pub fn with_phase_pressure(mut self, phase: PhaseIdx, p: Real) -> Self {
        self.pressure[phase.index()] = p;
        self
    }

    pub fn with_saturation(mut self, phase: PhaseIdx, s: Real) -> Self {
        self.saturation[phase.index()] = s;
        self
    }

    pub fn with_rs(mut self, rs: Real) -> Self {
        self.rs = Some(rs);
        self
    }

    pub fn with_rv(mut self, rv: Real) -> Self {
        self.rv = Some(rv);
        self
    }

    pub fn with_rsw(mut self, rsw: Real) -> Self {
        self.rsw = Some(rsw);
        self
    }

    pub fn with_rvw(mut self, rvw: Real) -> Self {
        self.rvw = Some(rvw);
        self
    }

    pub fn with_salt_concentration(mut self, salt: Real) -> Self {
        self.salt_concentration = Some(salt);
        self
    }

    /// Sets one mass fraction; the other entries start at zero.
    pub fn with_mass_fraction(mut self, phase: PhaseIdx, comp: CompIdx, x: Real) -> Self {
        let fractions = self
            .mass_fractions
            .get_or_insert([[0.0; NUM_COMPONENTS]; NUM_PHASES]);
        fractions[phase.index()][comp.index()] = x;
        self
    }
}

impl FluidState for SimpleFluidState {
    fn pressure(&self, phase: PhaseIdx) -> Real {
        self.pressure[phase.index()]
    }

    fn temperature(&self, _phase: PhaseIdx) -> Real {
        self.temperature
    }

    fn saturation(&self, phase: PhaseIdx) -> Real {
        self.saturation[phase.index()]
    }

    fn rs(&self) -> Option<Real> {
        self.rs
    }

    fn rv(&self) -> Option<Real> {
        self.rv
    }

    fn rsw(&self) -> Option<Real> {
        self.rsw
    }

    fn rvw(&self) -> Option<Real> {
        self.rvw
    }

    fn salt_concentration(&self) -> Option<Real> {
        self.salt_concentration
    }

    fn mass_fraction(&self, phase: PhaseIdx, comp: CompIdx) -> Option<Real> {
        self.mass_fractions
            .map(|fractions| fractions[phase.index()][comp.index()])
    }
}
