//! The black-oil fluid system: three phase multiplexers plus per-region
//! reference data and feature switches.
//!
//! Lifecycle is `FluidSystem::new(num_regions)`, setters, `init_end()`.
//! Evaluation needs an initialized system; structural setters (phase laws,
//! active phases, reference densities) require another `init_end()`.

use crate::error::{FluidSystemError, FluidSystemResult};
use crate::fluid_state::FluidState;
use bo_core::constants::{R, SURFACE_PRESSURE, SURFACE_TEMPERATURE};
use bo_core::{CompIdx, NUM_COMPONENTS, NUM_PHASES, PhaseIdx, Real};
use bo_pvt::{GasPvt, GasPvtLaw, OilPvt, OilPvtLaw, WaterPvt, WaterPvtLaw};
use tracing::debug;

const WATER_MOLAR_MASS: Real = 18e-3;
const OIL_MOLAR_MASS: Real = 175e-3;
/// Placeholder molar mass of the gas component when the gas phase is inactive.
const HYDROGEN_MOLAR_MASS: Real = 2e-3;

#[derive(Debug, Clone)]
pub struct FluidSystem {
    pub(crate) oil_pvt: OilPvt,
    pub(crate) gas_pvt: GasPvt,
    pub(crate) water_pvt: WaterPvt,

    pub(crate) reference_density: Vec<[Real; NUM_PHASES]>,
    pub(crate) molar_mass: Vec<[Real; NUM_COMPONENTS]>,
    /// Indexed by `NUM_PHASES * comp + phase`; empty until a value is set.
    pub(crate) diffusion_coefficients: Vec<[Real; NUM_PHASES * NUM_COMPONENTS]>,

    phase_is_active: [bool; NUM_PHASES],
    active_to_canonical: Vec<PhaseIdx>,
    canonical_to_active: [Option<usize>; NUM_PHASES],

    pub(crate) enable_dissolved_gas: bool,
    pub(crate) enable_dissolved_gas_in_water: bool,
    pub(crate) enable_vaporized_oil: bool,
    pub(crate) enable_vaporized_water: bool,
    pub(crate) enable_diffusion: bool,
    pub(crate) use_saturated_tables: bool,
    pub(crate) enthalpy_eq_energy: bool,

    surface_temperature: Real,
    surface_pressure: Real,
    reservoir_temperature: Real,

    initialized: bool,
}

impl FluidSystem {
    /// An uninitialized system with `num_regions` PVT regions.
    ///
    /// Dissolved gas is enabled, every other feature disabled and all three
    /// phases are active. A count of zero is raised to one region.
    pub fn new(num_regions: usize) -> Self {
        let num_regions = num_regions.max(1);
        Self {
            oil_pvt: OilPvt::default(),
            gas_pvt: GasPvt::default(),
            water_pvt: WaterPvt::default(),
            reference_density: vec![[0.0; NUM_PHASES]; num_regions],
            molar_mass: vec![[0.0; NUM_COMPONENTS]; num_regions],
            diffusion_coefficients: Vec::new(),
            phase_is_active: [true; NUM_PHASES],
            active_to_canonical: PhaseIdx::ALL.to_vec(),
            canonical_to_active: [Some(0), Some(1), Some(2)],
            enable_dissolved_gas: true,
            enable_dissolved_gas_in_water: false,
            enable_vaporized_oil: false,
            enable_vaporized_water: false,
            enable_diffusion: false,
            use_saturated_tables: true,
            enthalpy_eq_energy: false,
            surface_temperature: SURFACE_TEMPERATURE,
            surface_pressure: SURFACE_PRESSURE,
            reservoir_temperature: SURFACE_TEMPERATURE,
            initialized: false,
        }
    }

    /// Finishes the configuration: derives molar masses and the active phase
    /// maps and checks that every configured phase law has the same number of
    /// regions as the system.
    pub fn init_end(&mut self) -> FluidSystemResult<()> {
        let num_regions = self.num_regions();
        let law_regions = [
            ("oil", self.oil_pvt.is_active(), self.oil_pvt.num_regions()),
            ("gas", self.gas_pvt.is_active(), self.gas_pvt.num_regions()),
            ("water", self.water_pvt.is_active(), self.water_pvt.num_regions()),
        ];
        for (phase, active, n) in law_regions {
            if active && n != num_regions {
                return Err(FluidSystemError::invalid_arg(format!(
                    "{phase} PVT has {n} regions, the fluid system has {num_regions}"
                )));
            }
        }

        let gas_molar_mass = if self.phase_is_active(PhaseIdx::Gas) {
            // ideal gas at surface conditions
            let rho_g = self.reference_density[0][PhaseIdx::Gas.index()];
            R * self.surface_temperature * rho_g / self.surface_pressure
        } else {
            HYDROGEN_MOLAR_MASS
        };
        for masses in &mut self.molar_mass {
            masses[CompIdx::Water.index()] = WATER_MOLAR_MASS;
            masses[CompIdx::Gas.index()] = gas_molar_mass;
            masses[CompIdx::Oil.index()] = OIL_MOLAR_MASS;
        }

        self.active_to_canonical.clear();
        self.canonical_to_active = [None; NUM_PHASES];
        for phase in PhaseIdx::ALL {
            if self.phase_is_active[phase.index()] {
                self.canonical_to_active[phase.index()] = Some(self.active_to_canonical.len());
                self.active_to_canonical.push(phase);
            }
        }

        self.initialized = true;
        debug!(
            num_regions,
            oil = self.oil_pvt.approach().name(),
            gas = self.gas_pvt.approach().name(),
            water = self.water_pvt.approach().name(),
            active_phases = self.active_to_canonical.len(),
            "fluid system initialized"
        );
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // ---- setters -----------------------------------------------------------

    pub fn set_reference_densities(
        &mut self,
        rho_oil: Real,
        rho_water: Real,
        rho_gas: Real,
        region: usize,
    ) -> FluidSystemResult<()> {
        let num_regions = self.num_regions();
        let densities = self
            .reference_density
            .get_mut(region)
            .ok_or(FluidSystemError::RegionOutOfRange {
                region,
                num_regions,
            })?;
        densities[PhaseIdx::Oil.index()] = rho_oil;
        densities[PhaseIdx::Water.index()] = rho_water;
        densities[PhaseIdx::Gas.index()] = rho_gas;
        self.initialized = false;
        Ok(())
    }

    pub fn set_oil_pvt(&mut self, pvt: OilPvt) {
        self.oil_pvt = pvt;
        self.initialized = false;
    }

    pub fn set_gas_pvt(&mut self, pvt: GasPvt) {
        self.gas_pvt = pvt;
        self.initialized = false;
    }

    pub fn set_water_pvt(&mut self, pvt: WaterPvt) {
        self.water_pvt = pvt;
        self.initialized = false;
    }

    /// VAPPARS parameters, forwarded to all three phase laws.
    pub fn set_vap_pars(&mut self, par1: Real, par2: Real) {
        self.oil_pvt.set_vap_pars(par1, par2);
        self.gas_pvt.set_vap_pars(par1, par2);
        self.water_pvt.set_vap_pars(par1, par2);
    }

    pub fn set_enable_dissolved_gas(&mut self, yes: bool) {
        self.enable_dissolved_gas = yes;
    }

    pub fn set_enable_dissolved_gas_in_water(&mut self, yes: bool) {
        self.enable_dissolved_gas_in_water = yes;
    }

    pub fn set_enable_vaporized_oil(&mut self, yes: bool) {
        self.enable_vaporized_oil = yes;
    }

    pub fn set_enable_vaporized_water(&mut self, yes: bool) {
        self.enable_vaporized_water = yes;
    }

    pub fn set_enable_diffusion(&mut self, yes: bool) {
        self.enable_diffusion = yes;
    }

    pub fn set_use_saturated_tables(&mut self, yes: bool) {
        self.use_saturated_tables = yes;
    }

    pub fn set_energy_equal_enthalpy(&mut self, yes: bool) {
        self.enthalpy_eq_energy = yes;
    }

    pub fn set_reservoir_temperature(&mut self, t: Real) {
        self.reservoir_temperature = t;
    }

    /// Surface conditions used for the ideal-gas molar mass of the gas component.
    pub fn set_surface_conditions(&mut self, t: Real, p: Real) {
        self.surface_temperature = t;
        self.surface_pressure = p;
        self.initialized = false;
    }

    /// Activates exactly the listed phases.
    pub fn set_active_phases(&mut self, phases: &[PhaseIdx]) -> FluidSystemResult<()> {
        if phases.is_empty() {
            return Err(FluidSystemError::invalid_arg(
                "at least one phase must be active",
            ));
        }
        self.phase_is_active = [false; NUM_PHASES];
        for phase in phases {
            self.phase_is_active[phase.index()] = true;
        }
        self.initialized = false;
        Ok(())
    }

    /// Fixed diffusion coefficient [m²/s] of `comp` in `phase`; once any value
    /// is set the phase laws are no longer asked.
    pub fn set_diffusion_coefficient(
        &mut self,
        coefficient: Real,
        comp: CompIdx,
        phase: PhaseIdx,
        region: usize,
    ) -> FluidSystemResult<()> {
        self.check_region(region)?;
        if self.diffusion_coefficients.is_empty() {
            self.diffusion_coefficients =
                vec![[0.0; NUM_PHASES * NUM_COMPONENTS]; self.num_regions()];
        }
        self.diffusion_coefficients[region][NUM_PHASES * comp.index() + phase.index()] =
            coefficient;
        Ok(())
    }

    /// Overrides the molar mass [kg/mol] of one component. `init_end` resets
    /// all molar masses, so overrides go after it.
    pub fn set_molar_mass(&mut self, comp: CompIdx, region: usize, molar_mass: Real) -> FluidSystemResult<()> {
        self.check_region(region)?;
        if !(molar_mass.is_finite() && molar_mass > 0.0) {
            return Err(FluidSystemError::invalid_arg(format!(
                "molar mass of {} must be positive, got {molar_mass}",
                comp.name()
            )));
        }
        self.molar_mass[region][comp.index()] = molar_mass;
        Ok(())
    }

    // ---- phase laws ----------------------------------------------------------

    pub fn oil_pvt(&self) -> &OilPvt {
        &self.oil_pvt
    }

    pub fn gas_pvt(&self) -> &GasPvt {
        &self.gas_pvt
    }

    pub fn water_pvt(&self) -> &WaterPvt {
        &self.water_pvt
    }

    // ---- capability queries --------------------------------------------------

    pub fn enable_dissolved_gas(&self) -> bool {
        self.enable_dissolved_gas
    }

    pub fn enable_dissolved_gas_in_water(&self) -> bool {
        self.enable_dissolved_gas_in_water
    }

    pub fn enable_vaporized_oil(&self) -> bool {
        self.enable_vaporized_oil
    }

    pub fn enable_vaporized_water(&self) -> bool {
        self.enable_vaporized_water
    }

    pub fn enable_diffusion(&self) -> bool {
        self.enable_diffusion
    }

    pub fn use_saturated_tables(&self) -> bool {
        self.use_saturated_tables
    }

    pub fn enthalpy_equal_energy(&self) -> bool {
        self.enthalpy_eq_energy
    }

    pub fn num_regions(&self) -> usize {
        self.reference_density.len()
    }

    pub fn num_active_phases(&self) -> usize {
        self.phase_is_active.iter().filter(|&&a| a).count()
    }

    pub fn phase_is_active(&self, phase: PhaseIdx) -> bool {
        self.phase_is_active[phase.index()]
    }

    pub fn active_to_canonical_phase_idx(&self, active: usize) -> FluidSystemResult<PhaseIdx> {
        self.ensure_initialized()?;
        self.active_to_canonical
            .get(active)
            .copied()
            .ok_or(FluidSystemError::UnhandledIndex {
                what: "active phase",
                index: active,
            })
    }

    pub fn canonical_to_active_phase_idx(&self, phase: PhaseIdx) -> FluidSystemResult<usize> {
        self.ensure_initialized()?;
        self.canonical_to_active[phase.index()].ok_or(FluidSystemError::UnhandledIndex {
            what: "inactive phase",
            index: phase.index(),
        })
    }

    /// Name of a raw phase index.
    pub fn phase_name(index: usize) -> FluidSystemResult<&'static str> {
        Ok(PhaseIdx::try_from(index)?.name())
    }

    /// Name of a raw component index.
    pub fn component_name(index: usize) -> FluidSystemResult<&'static str> {
        Ok(CompIdx::try_from(index)?.name())
    }

    pub fn solvent_component_index(phase: PhaseIdx) -> CompIdx {
        phase.solvent_component()
    }

    /// Component dissolved or vaporized in `phase` under the current switches.
    pub fn solute_component_index(&self, phase: PhaseIdx) -> FluidSystemResult<CompIdx> {
        match phase {
            PhaseIdx::Water if self.enable_dissolved_gas_in_water => Ok(CompIdx::Gas),
            PhaseIdx::Water => Err(FluidSystemError::invalid_arg(
                "the water phase does not have any solutes in the black oil model",
            )),
            PhaseIdx::Oil => Ok(CompIdx::Gas),
            PhaseIdx::Gas if self.enable_vaporized_water => Ok(CompIdx::Water),
            PhaseIdx::Gas => Ok(CompIdx::Oil),
        }
    }

    pub fn is_liquid(phase: PhaseIdx) -> bool {
        phase.is_liquid()
    }

    pub fn is_ideal_mixture(_phase: PhaseIdx) -> bool {
        true
    }

    pub fn is_compressible(_phase: PhaseIdx) -> bool {
        true
    }

    pub fn is_ideal_gas(_phase: PhaseIdx) -> bool {
        false
    }

    /// Density at surface conditions [kg/m³].
    pub fn reference_density(&self, phase: PhaseIdx, region: usize) -> FluidSystemResult<Real> {
        self.check_region(region)?;
        Ok(self.reference_density[region][phase.index()])
    }

    /// Molar mass [kg/mol], available after `init_end()`.
    pub fn molar_mass(&self, comp: CompIdx, region: usize) -> FluidSystemResult<Real> {
        self.ensure_initialized()?;
        self.check_region(region)?;
        Ok(self.molar_mass[region][comp.index()])
    }

    pub fn reservoir_temperature(&self) -> Real {
        self.reservoir_temperature
    }

    pub fn surface_pressure(&self) -> Real {
        self.surface_pressure
    }

    pub fn surface_temperature(&self) -> Real {
        self.surface_temperature
    }

    // ---- helpers -------------------------------------------------------------

    pub(crate) fn ensure_initialized(&self) -> FluidSystemResult<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(FluidSystemError::NotInitialized)
        }
    }

    pub(crate) fn check_region(&self, region: usize) -> FluidSystemResult<()> {
        let num_regions = self.num_regions();
        if region < num_regions {
            Ok(())
        } else {
            Err(FluidSystemError::RegionOutOfRange {
                region,
                num_regions,
            })
        }
    }

    /// Initialized and in range: the precondition of every evaluation.
    pub(crate) fn check_eval(&self, region: usize) -> FluidSystemResult<()> {
        self.ensure_initialized()?;
        self.check_region(region)
    }

    pub(crate) fn rho_ref(&self, phase: PhaseIdx, region: usize) -> Real {
        self.reference_density[region][phase.index()]
    }

    pub(crate) fn rs_of<S: FluidState + ?Sized>(&self, fs: &S, region: usize) -> FluidSystemResult<Real> {
        match fs.rs() {
            Some(rs) => Ok(rs),
            None => fs
                .mass_fraction(PhaseIdx::Oil, CompIdx::Gas)
                .map(|x| self.xog_to_rs(x, region))
                .ok_or(FluidSystemError::MissingComposition { what: "Rs" }),
        }
    }

    pub(crate) fn rv_of<S: FluidState + ?Sized>(&self, fs: &S, region: usize) -> FluidSystemResult<Real> {
        match fs.rv() {
            Some(rv) => Ok(rv),
            None => fs
                .mass_fraction(PhaseIdx::Gas, CompIdx::Oil)
                .map(|x| self.xgo_to_rv(x, region))
                .ok_or(FluidSystemError::MissingComposition { what: "Rv" }),
        }
    }

    pub(crate) fn rsw_of<S: FluidState + ?Sized>(&self, fs: &S, region: usize) -> FluidSystemResult<Real> {
        match fs.rsw() {
            Some(rsw) => Ok(rsw),
            None => fs
                .mass_fraction(PhaseIdx::Water, CompIdx::Gas)
                .map(|x| self.xwg_to_rsw(x, region))
                .ok_or(FluidSystemError::MissingComposition { what: "Rsw" }),
        }
    }

    pub(crate) fn rvw_of<S: FluidState + ?Sized>(&self, fs: &S, region: usize) -> FluidSystemResult<Real> {
        match fs.rvw() {
            Some(rvw) => Ok(rvw),
            None => fs
                .mass_fraction(PhaseIdx::Gas, CompIdx::Water)
                .map(|x| self.xgw_to_rvw(x, region))
                .ok_or(FluidSystemError::MissingComposition { what: "Rvw" }),
        }
    }

    /// Rs if dissolved gas is enabled, else zero without touching the state.
    pub(crate) fn active_rs<S: FluidState + ?Sized>(&self, fs: &S, region: usize) -> FluidSystemResult<Real> {
        if self.enable_dissolved_gas {
            self.rs_of(fs, region)
        } else {
            Ok(0.0)
        }
    }

    pub(crate) fn active_rv<S: FluidState + ?Sized>(&self, fs: &S, region: usize) -> FluidSystemResult<Real> {
        if self.enable_vaporized_oil {
            self.rv_of(fs, region)
        } else {
            Ok(0.0)
        }
    }

    pub(crate) fn active_rsw<S: FluidState + ?Sized>(&self, fs: &S, region: usize) -> FluidSystemResult<Real> {
        if self.enable_dissolved_gas_in_water {
            self.rsw_of(fs, region)
        } else {
            Ok(0.0)
        }
    }

    pub(crate) fn active_rvw<S: FluidState + ?Sized>(&self, fs: &S, region: usize) -> FluidSystemResult<Real> {
        if self.enable_vaporized_water {
            self.rvw_of(fs, region)
        } else {
            Ok(0.0)
        }
    }

    /// Ratios handed to the component energies. These follow the state even
    /// when the feature is off; a state without the ratio then counts as zero.
    pub(crate) fn energy_rs<S: FluidState + ?Sized>(&self, fs: &S, region: usize) -> FluidSystemResult<Real> {
        or_zero_if_disabled(self.enable_dissolved_gas, self.rs_of(fs, region))
    }

    pub(crate) fn energy_rv<S: FluidState + ?Sized>(&self, fs: &S, region: usize) -> FluidSystemResult<Real> {
        or_zero_if_disabled(self.enable_vaporized_oil, self.rv_of(fs, region))
    }

    pub(crate) fn energy_rsw<S: FluidState + ?Sized>(&self, fs: &S, region: usize) -> FluidSystemResult<Real> {
        or_zero_if_disabled(self.enable_dissolved_gas_in_water, self.rsw_of(fs, region))
    }

    pub(crate) fn energy_rvw<S: FluidState + ?Sized>(&self, fs: &S, region: usize) -> FluidSystemResult<Real> {
        or_zero_if_disabled(self.enable_vaporized_water, self.rvw_of(fs, region))
    }

    pub(crate) fn salt_of<S: FluidState + ?Sized>(fs: &S) -> Real {
        fs.salt_concentration().unwrap_or(0.0)
    }
}

fn or_zero_if_disabled(enabled: bool, ratio: FluidSystemResult<Real>) -> FluidSystemResult<Real> {
    match ratio {
        Err(FluidSystemError::MissingComposition { .. }) if !enabled => Ok(0.0),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bo_pvt::{DeadOilPvt, PvdRow};

    fn dead_oil(num_regions: usize) -> OilPvt {
        let table = vec![PvdRow::new(1e5, 1.2, 1e-3), PvdRow::new(3e7, 1.1, 1.5e-3)];
        DeadOilPvt::from_regions(&vec![table; num_regions]).unwrap().into()
    }

    #[test]
    fn defaults() {
        let fs = FluidSystem::new(2);
        assert!(!fs.is_initialized());
        assert!(fs.enable_dissolved_gas());
        assert!(!fs.enable_vaporized_oil());
        assert!(!fs.enable_dissolved_gas_in_water());
        assert!(!fs.enable_vaporized_water());
        assert!(!fs.enable_diffusion());
        assert!(fs.use_saturated_tables());
        assert_eq!(fs.num_regions(), 2);
        assert_eq!(fs.num_active_phases(), 3);
        assert_eq!(fs.surface_temperature(), 288.71);
        assert_eq!(fs.surface_pressure(), 1.01325e5);
        assert_eq!(fs.reservoir_temperature(), fs.surface_temperature());
    }

    #[test]
    fn init_end_derives_molar_masses() {
        let mut fs = FluidSystem::new(1);
        fs.set_reference_densities(800.0, 1000.0, 0.9, 0).unwrap();
        assert_eq!(
            fs.molar_mass(CompIdx::Oil, 0).unwrap_err(),
            FluidSystemError::NotInitialized
        );
        fs.init_end().unwrap();
        assert_eq!(fs.molar_mass(CompIdx::Water, 0).unwrap(), 18e-3);
        assert_eq!(fs.molar_mass(CompIdx::Oil, 0).unwrap(), 175e-3);
        let expected = 8.314472 * 288.71 * 0.9 / 1.01325e5;
        assert_eq!(fs.molar_mass(CompIdx::Gas, 0).unwrap(), expected);

        fs.set_active_phases(&[PhaseIdx::Oil, PhaseIdx::Water]).unwrap();
        fs.init_end().unwrap();
        assert_eq!(fs.molar_mass(CompIdx::Gas, 0).unwrap(), 2e-3);
    }

    #[test]
    fn active_phase_maps() {
        let mut fs = FluidSystem::new(1);
        fs.set_active_phases(&[PhaseIdx::Oil, PhaseIdx::Gas]).unwrap();
        fs.init_end().unwrap();
        assert_eq!(fs.num_active_phases(), 2);
        assert_eq!(fs.active_to_canonical_phase_idx(0).unwrap(), PhaseIdx::Oil);
        assert_eq!(fs.active_to_canonical_phase_idx(1).unwrap(), PhaseIdx::Gas);
        assert!(fs.active_to_canonical_phase_idx(2).is_err());
        assert_eq!(fs.canonical_to_active_phase_idx(PhaseIdx::Gas).unwrap(), 1);
        assert!(matches!(
            fs.canonical_to_active_phase_idx(PhaseIdx::Water),
            Err(FluidSystemError::UnhandledIndex { .. })
        ));
        assert!(fs.set_active_phases(&[]).is_err());
    }

    #[test]
    fn region_count_must_match_phase_laws() {
        let mut fs = FluidSystem::new(2);
        fs.set_oil_pvt(dead_oil(1));
        let err = fs.init_end().unwrap_err();
        assert!(matches!(err, FluidSystemError::InvalidArg { .. }));
        fs.set_oil_pvt(dead_oil(2));
        fs.init_end().unwrap();
        assert!(fs.is_initialized());
    }

    #[test]
    fn structural_setters_require_init_end() {
        let mut fs = FluidSystem::new(1);
        fs.init_end().unwrap();
        fs.set_oil_pvt(dead_oil(1));
        assert!(!fs.is_initialized());
        fs.init_end().unwrap();
        fs.set_enable_vaporized_oil(true);
        assert!(fs.is_initialized());
    }

    #[test]
    fn names_and_indices() {
        assert_eq!(FluidSystem::phase_name(0).unwrap(), "water");
        assert_eq!(FluidSystem::phase_name(2).unwrap(), "gas");
        assert_eq!(FluidSystem::component_name(0).unwrap(), "Oil");
        let err = FluidSystem::phase_name(3).unwrap_err();
        assert!(err.to_string().contains("Unhandled"));
        assert!(FluidSystem::component_name(9).is_err());

        let mut fs = FluidSystem::new(1);
        assert!(fs.solute_component_index(PhaseIdx::Water).is_err());
        assert_eq!(fs.solute_component_index(PhaseIdx::Gas).unwrap(), CompIdx::Oil);
        fs.set_enable_dissolved_gas_in_water(true);
        fs.set_enable_vaporized_water(true);
        assert_eq!(fs.solute_component_index(PhaseIdx::Water).unwrap(), CompIdx::Gas);
        assert_eq!(fs.solute_component_index(PhaseIdx::Gas).unwrap(), CompIdx::Water);
        assert_eq!(FluidSystem::solvent_component_index(PhaseIdx::Oil), CompIdx::Oil);
        assert!(FluidSystem::is_liquid(PhaseIdx::Water));
        assert!(!FluidSystem::is_liquid(PhaseIdx::Gas));
        assert!(FluidSystem::is_ideal_mixture(PhaseIdx::Gas));
        assert!(FluidSystem::is_compressible(PhaseIdx::Oil));
        assert!(!FluidSystem::is_ideal_gas(PhaseIdx::Gas));
    }

    #[test]
    fn region_bounds_are_checked() {
        let mut fs = FluidSystem::new(1);
        assert_eq!(
            fs.set_reference_densities(800.0, 1000.0, 1.0, 1).unwrap_err(),
            FluidSystemError::RegionOutOfRange {
                region: 1,
                num_regions: 1
            }
        );
        assert!(fs.reference_density(PhaseIdx::Oil, 3).is_err());
        assert!(
            fs.set_diffusion_coefficient(1e-9, CompIdx::Gas, PhaseIdx::Oil, 1)
                .is_err()
        );
    }

    #[test]
    fn zero_regions_become_one() {
        let mut fs = FluidSystem::new(0);
        assert_eq!(fs.num_regions(), 1);
        fs.set_reference_densities(800.0, 1000.0, 0.9, 0).unwrap();
        assert!(fs.set_reference_densities(800.0, 1000.0, 0.9, 1).is_err());
    }

    #[test]
    fn molar_mass_override_survives_until_next_init() {
        let mut fs = FluidSystem::new(1);
        fs.set_reference_densities(800.0, 1000.0, 0.9, 0).unwrap();
        fs.init_end().unwrap();
        fs.set_molar_mass(CompIdx::Gas, 0, 44e-3).unwrap();
        assert_eq!(fs.molar_mass(CompIdx::Gas, 0).unwrap(), 44e-3);
        assert!(fs.set_molar_mass(CompIdx::Oil, 0, -1.0).is_err());
        fs.init_end().unwrap();
        assert!(fs.molar_mass(CompIdx::Gas, 0).unwrap() != 44e-3);
    }
}
