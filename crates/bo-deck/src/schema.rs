//! Deck schema definitions.
//!
//! Table values are stored in the unit system named by [`Deck::units`] and
//! only converted to SI by the builder. Per-region keywords are lists with one
//! entry per PVT region.

use bo_core::PhaseIdx;
use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Deck {
    pub version: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default)]
    pub units: UnitSystem,
    #[serde(default)]
    pub runspec: Runspec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stcond: Option<StandardConditions>,
    /// Initial reservoir temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rtemp: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub density: Vec<DensityRecord>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pvto: Vec<Vec<PvtxRecordDef>>,
    /// Rows of `(p, Bo, mu_o)`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pvdo: Vec<Vec<[f64; 3]>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pvcdo: Vec<PvcdRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsconst: Option<RsconstRecord>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pvtg: Vec<Vec<PvtxRecordDef>>,
    /// Rows of `(p, Bg, mu_g)`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pvdg: Vec<Vec<[f64; 3]>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pvtgw: Vec<Vec<PvtxRecordDef>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rwgsalt: Vec<Vec<RwgsaltRecordDef>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pvtw: Vec<PvcdRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pvtwsalt: Vec<PvtwsaltTable>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vappars: Option<VapparsRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diffc: Vec<DiffcRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thermal: Option<ThermalSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageOptions>,
}

impl Deck {
    /// An empty deck of the latest version with the given active phases.
    pub fn new(phases: &[PhaseIdx]) -> Self {
        Self {
            version: LATEST_VERSION,
            title: String::new(),
            units: UnitSystem::default(),
            runspec: Runspec {
                phases: phases.to_vec(),
                ..Runspec::default()
            },
            stcond: None,
            rtemp: None,
            density: Vec::new(),
            pvto: Vec::new(),
            pvdo: Vec::new(),
            pvcdo: Vec::new(),
            rsconst: None,
            pvtg: Vec::new(),
            pvdg: Vec::new(),
            pvtgw: Vec::new(),
            rwgsalt: Vec::new(),
            pvtw: Vec::new(),
            pvtwsalt: Vec::new(),
            vappars: None,
            diffc: Vec::new(),
            thermal: None,
            storage: None,
        }
    }

    pub fn phase_is_active(&self, phase: PhaseIdx) -> bool {
        self.runspec.phases.contains(&phase)
    }

    /// CO2STORE or H2STORE.
    pub fn is_storage(&self) -> bool {
        self.runspec.co2store || self.runspec.h2store
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum UnitSystem {
    /// bar, cP, °C, kJ/kg, m²/day, g/mol.
    #[default]
    Metric,
    /// Pa, Pa·s, K, J/kg, m²/s, kg/mol.
    Si,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Runspec {
    #[serde(default)]
    pub phases: Vec<PhaseIdx>,
    #[serde(default)]
    pub disgas: bool,
    #[serde(default)]
    pub vapoil: bool,
    #[serde(default)]
    pub disgasw: bool,
    #[serde(default)]
    pub vapwat: bool,
    #[serde(default)]
    pub diffuse: bool,
    #[serde(default)]
    pub thermal: bool,
    #[serde(default)]
    pub co2store: bool,
    #[serde(default)]
    pub h2store: bool,
    /// Salt concentration dependent water properties.
    #[serde(default)]
    pub brine: bool,
    #[serde(default = "default_true")]
    pub saturated_tables: bool,
    #[serde(default)]
    pub enthalpy_eq_energy: bool,
    #[serde(default = "default_num_regions")]
    pub num_regions: usize,
}

impl Default for Runspec {
    fn default() -> Self {
        Self {
            phases: Vec::new(),
            disgas: false,
            vapoil: false,
            disgasw: false,
            vapwat: false,
            diffuse: false,
            thermal: false,
            co2store: false,
            h2store: false,
            brine: false,
            saturated_tables: true,
            enthalpy_eq_energy: false,
            num_regions: 1,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_num_regions() -> usize {
    1
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StandardConditions {
    pub temperature: f64,
    pub pressure: f64,
}

/// Surface densities of one region.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DensityRecord {
    pub oil: f64,
    pub water: f64,
    pub gas: f64,
}

/// One PVTO/PVTG/PVTGW record: the outer key (Rs or gas pressure) and rows of
/// `(inner axis, B, mu)`, saturated row first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PvtxRecordDef {
    pub key: f64,
    pub rows: Vec<[f64; 3]>,
}

/// PVCDO or PVTW line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PvcdRecord {
    pub p_ref: f64,
    pub b_ref: f64,
    pub compressibility: f64,
    pub mu_ref: f64,
    #[serde(default)]
    pub viscosibility: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RsconstRecord {
    pub rs: f64,
    pub bubble_point: f64,
}

/// One RWGSALT record: gas pressure and `(salt concentration, Rvw)` rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RwgsaltRecordDef {
    pub p: f64,
    pub rows: Vec<[f64; 2]>,
}

/// PVTWSALT table of one region: reference pressure and rows of
/// `(salt, Bw, compressibility, mu_w, viscosibility)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PvtwsaltTable {
    pub p_ref: f64,
    pub rows: Vec<[f64; 5]>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct VapparsRecord {
    pub par1: f64,
    pub par2: f64,
}

/// DIFFC line of one region.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DiffcRecord {
    pub oil_mw: f64,
    pub gas_mw: f64,
    pub gas_in_gas: f64,
    pub oil_in_gas: f64,
    pub gas_in_oil: f64,
    pub oil_in_oil: f64,
    #[serde(default)]
    pub gas_in_oil_cross_phase: f64,
    #[serde(default)]
    pub oil_in_oil_cross_phase: f64,
}

/// Temperature dependence keywords, all per region.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ThermalSection {
    /// Rows of `(T, mu_o)`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub oilvisct: Vec<Vec<[f64; 2]>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gasvisct: Vec<Vec<[f64; 2]>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub watvisct: Vec<Vec<[f64; 2]>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub viscref: Vec<ViscrefRecord>,
    #[serde(default, alias = "thermex1", skip_serializing_if = "Vec::is_empty")]
    pub oildent: Vec<DentRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gasdent: Vec<DentRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub watdent: Vec<DentRecord>,
    /// Rows of `(T, cv_oil, cv_water, cv_gas)`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specheat: Vec<Vec<[f64; 4]>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub oiljt: Vec<JouleThomsonRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub watjt: Vec<JouleThomsonRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hvap: Vec<HvapRecord>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ViscrefRecord {
    pub pressure: f64,
    #[serde(default)]
    pub rs: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DentRecord {
    pub t_ref: f64,
    pub c1: f64,
    #[serde(default)]
    pub c2: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct JouleThomsonRecord {
    pub p_ref: f64,
    /// Zero derives the coefficient from the thermal expansion.
    #[serde(default)]
    pub coefficient: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct HvapRecord {
    #[serde(default)]
    pub oil: f64,
    #[serde(default)]
    pub gas: f64,
    #[serde(default)]
    pub water: f64,
}

/// CO2STORE / H2STORE options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StorageOptions {
    /// NaCl molality [mol/kg], one value for all regions or one per region.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub salinity: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_model: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brine_mixing: Option<BrineMixing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_mixing: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ezrokhi_density: Option<EzrokhiDensity>,
    /// NaCl coefficients of the Ezrokhi viscosity correction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ezrokhi_viscosity: Option<[f64; 3]>,
}

/// Thermal mixing selectors of the brine phase.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BrineMixing {
    pub salt: i32,
    pub liquid: i32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EzrokhiDensity {
    pub nacl: [f64; 3],
    pub co2: [f64; 3],
}
