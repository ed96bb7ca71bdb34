//! Turning a deck into phase laws and an initialized fluid system.
//!
//! Approach selection per phase:
//! - oil: CO2STORE, H2STORE, THERMAL (wrapping the isothermal choice), PVTO,
//!   PVDO (with RSCONST: constant-Rs dead oil), PVCDO
//! - gas: CO2STORE, H2STORE, THERMAL, PVTGW alone (dry humid), PVTGW with
//!   PVTG (wet humid), PVTG, PVDG
//! - water: CO2STORE, H2STORE, THERMAL, PVTWSALT, PVTW
//!
//! Inactive phases get the empty multiplexer.

use crate::schema::{
    Deck, DensityRecord, DentRecord, PvcdRecord, PvtxRecordDef, StorageOptions, ThermalSection,
};
use crate::units::UnitConverter;
use crate::validate::{ValidationError, validate_deck};
use crate::DeckResult;
use bo_core::constants::{SURFACE_PRESSURE, SURFACE_TEMPERATURE};
use bo_core::{CompIdx, PhaseIdx, Real};
use bo_fluidsystem::FluidSystem;
use bo_pvt::brine_gas::BrineGasPvt;
use bo_pvt::gas::StorageGasPvt;
use bo_pvt::components::{Brine, Co2, H2};
use bo_pvt::{
    BrineCo2Pvt, BrineH2Pvt, BrineRow, Co2InBrine, ConstantCompressibilityBrinePvt,
    ConstantCompressibilityOilPvt, ConstantCompressibilityParams, ConstantCompressibilityWaterPvt,
    ConstantRsDeadOilPvt, DeadOilPvt, DryGasPvt, DryHumidGasPvt, EzrokhiCoefficients, GasPvt,
    GasPvtLaw, H2InBrine, JouleThomson, LiveOilPvt, OilPvt, OilPvtLaw, PvdRow, PvtxRecord,
    PvtxSample, RwgSaltRecord, SolubleGas, ThermalExpansion, ThermalGasPvt, ThermalOilPvt,
    ThermalWaterPvt, WaterPvt, WaterPvtLaw, WetGasPvt, WetHumidGasPvt,
};
use tracing::{debug, info};

/// Surface densities used for phases without a law.
const DEFAULT_OIL_DENSITY: Real = 700.0;
const DEFAULT_WATER_DENSITY: Real = 1000.0;
const DEFAULT_GAS_DENSITY: Real = 2.0;

pub fn build_oil_pvt(deck: &Deck) -> DeckResult<OilPvt> {
    validate_deck(deck)?;
    oil_pvt(deck, &UnitConverter::new(deck.units))
}

pub fn build_gas_pvt(deck: &Deck) -> DeckResult<GasPvt> {
    validate_deck(deck)?;
    gas_pvt(deck, &UnitConverter::new(deck.units))
}

pub fn build_water_pvt(deck: &Deck) -> DeckResult<WaterPvt> {
    validate_deck(deck)?;
    water_pvt(deck, &UnitConverter::new(deck.units))
}

/// Builds all three phase laws, the reference data and the feature switches,
/// then initializes the system.
pub fn build_fluid_system(deck: &Deck) -> DeckResult<FluidSystem> {
    validate_deck(deck)?;
    let conv = UnitConverter::new(deck.units);
    let rs = &deck.runspec;
    let num_regions = rs.num_regions;

    let mut fs = FluidSystem::new(num_regions);
    fs.set_active_phases(&rs.phases)?;

    let (t_surface, p_surface) = match deck.stcond {
        Some(st) => (conv.temperature(st.temperature), conv.pressure(st.pressure)),
        None => (SURFACE_TEMPERATURE, SURFACE_PRESSURE),
    };
    fs.set_surface_conditions(t_surface, p_surface);
    if let Some(t) = deck.rtemp {
        fs.set_reservoir_temperature(conv.temperature(t));
    }

    fs.set_enable_dissolved_gas(rs.disgas);
    fs.set_enable_vaporized_oil(rs.vapoil);
    fs.set_enable_vaporized_water(rs.vapwat);
    fs.set_enable_dissolved_gas_in_water(rs.disgasw);
    fs.set_use_saturated_tables(rs.saturated_tables);
    fs.set_energy_equal_enthalpy(rs.enthalpy_eq_energy);

    let gas = gas_pvt(deck, &conv)?;
    let oil = oil_pvt(deck, &conv)?;
    let water = water_pvt(deck, &conv)?;

    for region in 0..num_regions {
        let density = deck.density.get(region);
        let rho_oil = oil_reference_density(&oil, density, region)?;
        let rho_water = water_reference_density(&water, density, region)?;
        let rho_gas = gas_reference_density(&gas, density, region)?;
        debug!(region, rho_oil, rho_water, rho_gas, "reference densities");
        fs.set_reference_densities(rho_oil, rho_water, rho_gas, region)?;
    }

    fs.set_oil_pvt(oil);
    fs.set_gas_pvt(gas);
    fs.set_water_pvt(water);
    if let Some(v) = deck.vappars {
        fs.set_vap_pars(v.par1, v.par2);
    }
    fs.init_end()?;

    if deck.is_storage() {
        let gas_molar_mass = if rs.co2store {
            Co2::MOLAR_MASS
        } else {
            H2::MOLAR_MASS
        };
        for (region, salinity) in salinities(deck).into_iter().enumerate() {
            let brine_molar_mass = Brine::molar_mass(salinity);
            // the oil component carries the brine when oil is active
            if deck.phase_is_active(PhaseIdx::Oil) {
                fs.set_molar_mass(CompIdx::Oil, region, brine_molar_mass)?;
            }
            if deck.phase_is_active(PhaseIdx::Water) {
                fs.set_molar_mass(CompIdx::Water, region, brine_molar_mass)?;
            }
            fs.set_molar_mass(CompIdx::Gas, region, gas_molar_mass)?;
        }
    }

    fs.set_enable_diffusion(rs.diffuse);
    if rs.diffuse {
        for (region, d) in deck.diffc.iter().enumerate() {
            fs.set_molar_mass(CompIdx::Oil, region, conv.molar_mass(d.oil_mw))?;
            fs.set_molar_mass(CompIdx::Gas, region, conv.molar_mass(d.gas_mw))?;
            for (value, comp, phase) in [
                (d.gas_in_gas, CompIdx::Gas, PhaseIdx::Gas),
                (d.oil_in_gas, CompIdx::Oil, PhaseIdx::Gas),
                (d.gas_in_oil, CompIdx::Gas, PhaseIdx::Oil),
                (d.oil_in_oil, CompIdx::Oil, PhaseIdx::Oil),
            ] {
                fs.set_diffusion_coefficient(conv.diffusivity(value), comp, phase, region)?;
            }
        }
    }

    info!(
        num_regions,
        active_phases = fs.num_active_phases(),
        oil = fs.oil_pvt().approach().name(),
        gas = fs.gas_pvt().approach().name(),
        water = fs.water_pvt().approach().name(),
        "fluid system built from deck"
    );
    Ok(fs)
}

// ---- oil ---------------------------------------------------------------------

fn oil_pvt(deck: &Deck, conv: &UnitConverter) -> DeckResult<OilPvt> {
    if !deck.phase_is_active(PhaseIdx::Oil) {
        return Ok(OilPvt::default());
    }
    let pvt: OilPvt = if deck.runspec.co2store {
        brine_co2(deck)?.into()
    } else if deck.runspec.h2store {
        brine_h2(deck)?.into()
    } else if deck.runspec.thermal {
        thermal_oil(deck, conv, isothermal_oil(deck, conv)?)?.into()
    } else {
        isothermal_oil(deck, conv)?
    };
    info!(
        approach = pvt.approach().name(),
        regions = pvt.num_regions(),
        "oil PVT"
    );
    Ok(pvt)
}

fn isothermal_oil(deck: &Deck, conv: &UnitConverter) -> DeckResult<OilPvt> {
    if !deck.pvto.is_empty() {
        let regions: Vec<Vec<PvtxRecord>> = deck
            .pvto
            .iter()
            .map(|records| pvtx_records(records, conv, false))
            .collect();
        return Ok(LiveOilPvt::from_regions(&regions)?.into());
    }
    if !deck.pvdo.is_empty() {
        let regions = pvd_regions(&deck.pvdo, conv);
        return Ok(match deck.rsconst {
            Some(c) => {
                ConstantRsDeadOilPvt::from_regions(&regions, c.rs, conv.pressure(c.bubble_point))?
                    .into()
            }
            None => DeadOilPvt::from_regions(&regions)?.into(),
        });
    }
    if !deck.pvcdo.is_empty() {
        let params: Vec<_> = deck.pvcdo.iter().map(|r| pvcd_params(r, conv)).collect();
        return Ok(ConstantCompressibilityOilPvt::from_regions(&params)?.into());
    }
    Err(missing_table("PVTO, PVDO or PVCDO", "oil phase is active"))
}

fn thermal_oil(deck: &Deck, conv: &UnitConverter, isothermal: OilPvt) -> DeckResult<ThermalOilPvt> {
    let mut law = ThermalOilPvt::new(isothermal)?;
    let Some(thermal) = &deck.thermal else {
        return Ok(law);
    };
    for region in 0..deck.runspec.num_regions {
        if let Some(rows) = thermal.oilvisct.get(region) {
            let viscref = viscref(thermal, region)?;
            let (t, mu) = viscosity_curve(rows, conv);
            law.set_viscosity_curve(region, &t, &mu, conv.pressure(viscref.pressure), viscref.rs)?;
        }
        if let Some(d) = thermal.oildent.get(region) {
            law.set_thermal_expansion(region, expansion(d, conv))?;
        }
        if let Some(rows) = thermal.specheat.get(region) {
            let (t, cv) = specific_heat(rows, 1, conv);
            law.set_specific_heat(region, &t, &cv)?;
        }
        if let Some(jt) = thermal.oiljt.get(region) {
            let rho = density_record(deck, region)?;
            law.set_joule_thomson(
                region,
                JouleThomson {
                    p_ref: conv.pressure(jt.p_ref),
                    coefficient: conv.joule_thomson(jt.coefficient),
                },
                rho.oil,
                rho.gas,
            )?;
        }
        if let Some(h) = thermal.hvap.get(region) {
            law.set_hvap(region, conv.specific_energy(h.oil))?;
        }
    }
    Ok(law)
}

// ---- gas ---------------------------------------------------------------------

fn gas_pvt(deck: &Deck, conv: &UnitConverter) -> DeckResult<GasPvt> {
    if !deck.phase_is_active(PhaseIdx::Gas) {
        return Ok(GasPvt::default());
    }
    let pvt: GasPvt = if deck.runspec.co2store {
        storage_gas::<Co2InBrine>(deck)?.into()
    } else if deck.runspec.h2store {
        storage_gas::<H2InBrine>(deck)?.into()
    } else if deck.runspec.thermal {
        thermal_gas(deck, conv, isothermal_gas(deck, conv)?)?.into()
    } else {
        isothermal_gas(deck, conv)?
    };
    info!(
        approach = pvt.approach().name(),
        regions = pvt.num_regions(),
        "gas PVT"
    );
    Ok(pvt)
}

fn isothermal_gas(deck: &Deck, conv: &UnitConverter) -> DeckResult<GasPvt> {
    let pvtgw: Vec<Vec<PvtxRecord>> = deck
        .pvtgw
        .iter()
        .map(|records| pvtx_records(records, conv, true))
        .collect();
    let pvtg: Vec<Vec<PvtxRecord>> = deck
        .pvtg
        .iter()
        .map(|records| pvtx_records(records, conv, true))
        .collect();

    match (pvtgw.is_empty(), pvtg.is_empty()) {
        (false, true) => {
            let mut law = DryHumidGasPvt::from_regions(&pvtgw)?;
            for (region, records) in rwgsalt_regions(deck, conv).iter().enumerate() {
                law.set_salt_dependent_rvw(region, records)?;
            }
            Ok(law.into())
        }
        (false, false) => {
            let mut law = WetHumidGasPvt::from_regions(&pvtgw, &pvtg)?;
            for (region, records) in rwgsalt_regions(deck, conv).iter().enumerate() {
                law.set_salt_dependent_rvw(region, records)?;
            }
            Ok(law.into())
        }
        (true, false) => Ok(WetGasPvt::from_regions(&pvtg)?.into()),
        (true, true) if !deck.pvdg.is_empty() => {
            Ok(DryGasPvt::from_regions(&pvd_regions(&deck.pvdg, conv))?.into())
        }
        (true, true) => Err(missing_table("PVTG, PVTGW or PVDG", "gas phase is active")),
    }
}

fn thermal_gas(deck: &Deck, conv: &UnitConverter, isothermal: GasPvt) -> DeckResult<ThermalGasPvt> {
    let mut law = ThermalGasPvt::new(isothermal)?;
    let Some(thermal) = &deck.thermal else {
        return Ok(law);
    };
    for region in 0..deck.runspec.num_regions {
        if let Some(rows) = thermal.gasvisct.get(region) {
            let (t, mu) = viscosity_curve(rows, conv);
            law.set_viscosity_curve(region, &t, &mu)?;
        }
        if let Some(d) = thermal.gasdent.get(region) {
            law.set_thermal_expansion(region, expansion(d, conv))?;
        }
        if let Some(rows) = thermal.specheat.get(region) {
            let (t, cv) = specific_heat(rows, 3, conv);
            law.set_specific_heat(region, &t, &cv)?;
        }
        if let Some(h) = thermal.hvap.get(region) {
            law.set_hvap(region, conv.specific_energy(h.gas))?;
        }
    }
    Ok(law)
}

// ---- water -------------------------------------------------------------------

fn water_pvt(deck: &Deck, conv: &UnitConverter) -> DeckResult<WaterPvt> {
    if !deck.phase_is_active(PhaseIdx::Water) {
        return Ok(WaterPvt::default());
    }
    let pvt: WaterPvt = if deck.runspec.co2store {
        brine_co2(deck)?.into()
    } else if deck.runspec.h2store {
        brine_h2(deck)?.into()
    } else if deck.runspec.thermal {
        thermal_water(deck, conv, isothermal_water(deck, conv)?)?.into()
    } else {
        isothermal_water(deck, conv)?
    };
    info!(
        approach = pvt.approach().name(),
        regions = pvt.num_regions(),
        "water PVT"
    );
    Ok(pvt)
}

fn isothermal_water(deck: &Deck, conv: &UnitConverter) -> DeckResult<WaterPvt> {
    if !deck.pvtwsalt.is_empty() {
        let regions: Vec<(Real, Vec<BrineRow>)> = deck
            .pvtwsalt
            .iter()
            .map(|table| {
                let rows = table
                    .rows
                    .iter()
                    .map(|r| BrineRow {
                        salt: r[0],
                        b_ref: r[1],
                        compressibility: conv.compressibility(r[2]),
                        mu_ref: conv.viscosity(r[3]),
                        viscosibility: conv.compressibility(r[4]),
                    })
                    .collect();
                (conv.pressure(table.p_ref), rows)
            })
            .collect();
        return Ok(ConstantCompressibilityBrinePvt::from_regions(&regions)?.into());
    }
    if !deck.pvtw.is_empty() {
        let params: Vec<_> = deck.pvtw.iter().map(|r| pvcd_params(r, conv)).collect();
        return Ok(ConstantCompressibilityWaterPvt::from_regions(&params)?.into());
    }
    Err(missing_table("PVTW or PVTWSALT", "water phase is active"))
}

fn thermal_water(deck: &Deck, conv: &UnitConverter, isothermal: WaterPvt) -> DeckResult<ThermalWaterPvt> {
    let mut law = ThermalWaterPvt::new(isothermal)?;
    let Some(thermal) = &deck.thermal else {
        return Ok(law);
    };
    for region in 0..deck.runspec.num_regions {
        if let Some(rows) = thermal.watvisct.get(region) {
            let viscref = viscref(thermal, region)?;
            let pvtw = pvtw_params(deck, region, conv)?;
            let (t, mu) = viscosity_curve(rows, conv);
            law.set_viscosity_curve(region, &t, &mu, conv.pressure(viscref.pressure), pvtw)?;
        }
        if let Some(d) = thermal.watdent.get(region) {
            let pvtw = pvtw_params(deck, region, conv)?;
            law.set_thermal_density(region, expansion(d, conv), pvtw)?;
        }
        if let Some(rows) = thermal.specheat.get(region) {
            let (t, cv) = specific_heat(rows, 2, conv);
            law.set_specific_heat(region, &t, &cv)?;
        }
        if let Some(jt) = thermal.watjt.get(region) {
            let rho = density_record(deck, region)?;
            law.set_joule_thomson(
                region,
                JouleThomson {
                    p_ref: conv.pressure(jt.p_ref),
                    coefficient: conv.joule_thomson(jt.coefficient),
                },
                rho.water,
            )?;
        }
        if let Some(h) = thermal.hvap.get(region) {
            law.set_hvap(region, conv.specific_energy(h.water))?;
        }
    }
    Ok(law)
}

// ---- CO2STORE / H2STORE ------------------------------------------------------

fn storage_options(deck: &Deck) -> StorageOptions {
    deck.storage.clone().unwrap_or_default()
}

/// NaCl mass fraction per region from the deck molalities.
fn salinities(deck: &Deck) -> Vec<Real> {
    let molalities = deck
        .storage
        .as_ref()
        .map(|s| s.salinity.as_slice())
        .unwrap_or_default();
    (0..deck.runspec.num_regions)
        .map(|region| {
            let m = match molalities {
                [] => 0.0,
                [single] => *single,
                many => many.get(region).copied().unwrap_or_default(),
            };
            let salt_per_kg_water = m * bo_pvt::components::brine::SALT_MOLAR_MASS;
            salt_per_kg_water / (1.0 + salt_per_kg_water)
        })
        .collect()
}

fn configure_brine<G: SolubleGas>(
    law: &mut BrineGasPvt<G>,
    deck: &Deck,
    options: &StorageOptions,
) -> DeckResult<()> {
    law.set_enable_dissolved_gas(deck.runspec.disgas || deck.runspec.disgasw);
    law.set_enable_salt_concentration(deck.runspec.brine);
    if let Some(model) = options.activity_model {
        law.set_activity_model_salt(model)?;
    }
    if let Some(mixing) = options.brine_mixing {
        law.set_thermal_mixing_model(mixing.salt, mixing.liquid)?;
    }
    Ok(())
}

fn brine_co2(deck: &Deck) -> DeckResult<BrineCo2Pvt> {
    let options = storage_options(deck);
    let mut law = BrineCo2Pvt::from_salinities(&salinities(deck))?;
    if let Some(ez) = options.ezrokhi_density {
        law.set_ezrokhi_density(EzrokhiCoefficients(ez.nacl), EzrokhiCoefficients(ez.co2))?;
    }
    if let Some(c) = options.ezrokhi_viscosity {
        law.set_ezrokhi_viscosity(EzrokhiCoefficients(c));
    }
    configure_brine(&mut law, deck, &options)?;
    Ok(law)
}

fn brine_h2(deck: &Deck) -> DeckResult<BrineH2Pvt> {
    let options = storage_options(deck);
    let mut law = BrineH2Pvt::from_salinities(&salinities(deck))?;
    configure_brine(&mut law, deck, &options)?;
    Ok(law)
}

/// Gas phase of CO2STORE / H2STORE.
fn storage_gas<G: SolubleGas>(deck: &Deck) -> DeckResult<StorageGasPvt<G>> {
    let options = storage_options(deck);
    let mut law = StorageGasPvt::<G>::from_salinities(&salinities(deck))?;
    law.set_enable_vaporization_water(deck.runspec.vapoil || deck.runspec.vapwat);
    if let Some(model) = options.activity_model {
        law.set_activity_model_salt(model)?;
    }
    if let Some(model) = options.gas_mixing {
        law.set_thermal_mixing_model(model)?;
    }
    Ok(law)
}

// ---- reference densities -----------------------------------------------------

fn oil_reference_density(oil: &OilPvt, density: Option<&DensityRecord>, region: usize) -> DeckResult<Real> {
    Ok(match oil {
        OilPvt::NoOil => DEFAULT_OIL_DENSITY,
        OilPvt::BrineCo2(law) => law.brine_reference_density(region)?,
        OilPvt::BrineH2(law) => law.brine_reference_density(region)?,
        _ => required_density(density, region)?.oil,
    })
}

fn water_reference_density(
    water: &WaterPvt,
    density: Option<&DensityRecord>,
    region: usize,
) -> DeckResult<Real> {
    Ok(match water {
        WaterPvt::NoWater => DEFAULT_WATER_DENSITY,
        WaterPvt::BrineCo2(law) => law.brine_reference_density(region)?,
        WaterPvt::BrineH2(law) => law.brine_reference_density(region)?,
        _ => required_density(density, region)?.water,
    })
}

fn gas_reference_density(gas: &GasPvt, density: Option<&DensityRecord>, region: usize) -> DeckResult<Real> {
    Ok(match gas {
        GasPvt::NoGas => DEFAULT_GAS_DENSITY,
        GasPvt::Co2Gas(law) => law.gas_reference_density(region)?,
        GasPvt::H2Gas(law) => law.gas_reference_density(region)?,
        _ => required_density(density, region)?.gas,
    })
}

fn required_density(density: Option<&DensityRecord>, region: usize) -> DeckResult<&DensityRecord> {
    density.ok_or_else(|| missing_table("DENSITY", &format!("no record for region {region}")))
}

fn density_record(deck: &Deck, region: usize) -> DeckResult<&DensityRecord> {
    required_density(deck.density.get(region), region)
}

// ---- table conversion --------------------------------------------------------

fn missing_table(keyword: &str, context: &str) -> crate::DeckError {
    ValidationError::MissingKeyword {
        keyword: keyword.to_string(),
        context: context.to_string(),
    }
    .into()
}

fn pvd_regions(regions: &[Vec<[f64; 3]>], conv: &UnitConverter) -> Vec<Vec<PvdRow>> {
    regions
        .iter()
        .map(|rows| {
            rows.iter()
                .map(|r| PvdRow::new(conv.pressure(r[0]), r[1], conv.viscosity(r[2])))
                .collect()
        })
        .collect()
}

/// PVTO keys are Rs with pressure rows; PVTG/PVTGW keys are pressures with
/// ratio rows.
fn pvtx_records(records: &[PvtxRecordDef], conv: &UnitConverter, key_is_pressure: bool) -> Vec<PvtxRecord> {
    records
        .iter()
        .map(|record| {
            let key = if key_is_pressure {
                conv.pressure(record.key)
            } else {
                record.key
            };
            let samples = record
                .rows
                .iter()
                .map(|r| {
                    let y = if key_is_pressure { r[0] } else { conv.pressure(r[0]) };
                    PvtxSample::new(y, r[1], conv.viscosity(r[2]))
                })
                .collect();
            PvtxRecord::new(key, samples)
        })
        .collect()
}

fn rwgsalt_regions(deck: &Deck, conv: &UnitConverter) -> Vec<Vec<RwgSaltRecord>> {
    deck.rwgsalt
        .iter()
        .map(|records| {
            records
                .iter()
                .map(|r| {
                    RwgSaltRecord::new(
                        conv.pressure(r.p),
                        r.rows.iter().map(|row| (row[0], row[1])).collect(),
                    )
                })
                .collect()
        })
        .collect()
}

fn pvcd_params(r: &PvcdRecord, conv: &UnitConverter) -> ConstantCompressibilityParams {
    ConstantCompressibilityParams {
        p_ref: conv.pressure(r.p_ref),
        b_ref: r.b_ref,
        compressibility: conv.compressibility(r.compressibility),
        mu_ref: conv.viscosity(r.mu_ref),
        viscosibility: conv.compressibility(r.viscosibility),
    }
}

fn pvtw_params(deck: &Deck, region: usize, conv: &UnitConverter) -> DeckResult<ConstantCompressibilityParams> {
    deck.pvtw
        .get(region)
        .map(|r| pvcd_params(r, conv))
        .ok_or_else(|| missing_table("PVTW", "WATVISCT and WATDENT are relative to PVTW"))
}

fn viscref(thermal: &ThermalSection, region: usize) -> DeckResult<crate::schema::ViscrefRecord> {
    thermal
        .viscref
        .get(region)
        .copied()
        .ok_or_else(|| missing_table("VISCREF", "viscosity curves are scaled at VISCREF"))
}

fn viscosity_curve(rows: &[[f64; 2]], conv: &UnitConverter) -> (Vec<Real>, Vec<Real>) {
    rows.iter()
        .map(|r| (conv.temperature(r[0]), conv.viscosity(r[1])))
        .unzip()
}

/// Temperature and one cv column of SPECHEAT.
fn specific_heat(rows: &[[f64; 4]], column: usize, conv: &UnitConverter) -> (Vec<Real>, Vec<Real>) {
    rows.iter()
        .map(|r| (conv.temperature(r[0]), conv.specific_energy(r[column])))
        .unzip()
}

fn expansion(d: &DentRecord, conv: &UnitConverter) -> ThermalExpansion {
    ThermalExpansion::new(
        conv.temperature(d.t_ref),
        conv.thermal_expansion(d.c1),
        conv.thermal_expansion2(d.c2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{
        DiffcRecord, PvtwsaltTable, RsconstRecord, StorageOptions, UnitSystem, ViscrefRecord,
    };
    use bo_pvt::{GasPvtApproach, OilPvtApproach, WaterPvtApproach};

    fn density() -> DensityRecord {
        DensityRecord {
            oil: 800.0,
            water: 1000.0,
            gas: 0.9,
        }
    }

    fn pvtw() -> PvcdRecord {
        PvcdRecord {
            p_ref: 200.0,
            b_ref: 1.02,
            compressibility: 4e-5,
            mu_ref: 0.5,
            viscosibility: 0.0,
        }
    }

    fn pvto() -> Vec<PvtxRecordDef> {
        vec![
            PvtxRecordDef {
                key: 20.0,
                rows: vec![[50.0, 1.10, 1.2], [200.0, 1.08, 1.4]],
            },
            PvtxRecordDef {
                key: 120.0,
                rows: vec![[200.0, 1.35, 0.7], [300.0, 1.33, 0.8]],
            },
        ]
    }

    fn pvtg() -> Vec<PvtxRecordDef> {
        vec![
            PvtxRecordDef {
                key: 50.0,
                rows: vec![[1e-4, 0.02, 0.015], [0.0, 0.021, 0.014]],
            },
            PvtxRecordDef {
                key: 300.0,
                rows: vec![[3e-4, 0.004, 0.025], [0.0, 0.0042, 0.024]],
            },
        ]
    }

    fn black_oil_deck() -> Deck {
        let mut deck = Deck::new(&[PhaseIdx::Water, PhaseIdx::Oil, PhaseIdx::Gas]);
        deck.runspec.disgas = true;
        deck.density = vec![density()];
        deck.pvto = vec![pvto()];
        deck.pvdg = vec![vec![[10.0, 0.1, 0.012], [300.0, 0.004, 0.025]]];
        deck.pvtw = vec![pvtw()];
        deck
    }

    #[test]
    fn selects_isothermal_approaches() {
        let mut deck = black_oil_deck();
        assert_eq!(build_oil_pvt(&deck).unwrap().approach(), OilPvtApproach::LiveOil);
        assert_eq!(build_gas_pvt(&deck).unwrap().approach(), GasPvtApproach::DryGas);
        assert_eq!(
            build_water_pvt(&deck).unwrap().approach(),
            WaterPvtApproach::ConstantCompressibilityWater
        );

        deck.pvtg = vec![pvtg()];
        assert_eq!(build_gas_pvt(&deck).unwrap().approach(), GasPvtApproach::WetGas);

        deck.pvto.clear();
        deck.pvdo = vec![vec![[1.0, 1.2, 1.0], [300.0, 1.1, 1.5]]];
        assert_eq!(build_oil_pvt(&deck).unwrap().approach(), OilPvtApproach::DeadOil);
        deck.rsconst = Some(RsconstRecord {
            rs: 50.0,
            bubble_point: 150.0,
        });
        assert_eq!(
            build_oil_pvt(&deck).unwrap().approach(),
            OilPvtApproach::ConstantRsDeadOil
        );

        deck.pvtwsalt = vec![PvtwsaltTable {
            p_ref: 200.0,
            rows: vec![[0.0, 1.02, 4e-5, 0.5, 0.0], [50.0, 1.01, 3.5e-5, 0.6, 0.0]],
        }];
        assert_eq!(
            build_water_pvt(&deck).unwrap().approach(),
            WaterPvtApproach::ConstantCompressibilityBrine
        );
    }

    #[test]
    fn humid_gas_needs_pvtgw() {
        let mut deck = black_oil_deck();
        deck.pvdg.clear();
        deck.pvtgw = vec![pvtg()];
        assert_eq!(build_gas_pvt(&deck).unwrap().approach(), GasPvtApproach::DryHumidGas);
        deck.pvtg = vec![pvtg()];
        assert_eq!(build_gas_pvt(&deck).unwrap().approach(), GasPvtApproach::WetHumidGas);
    }

    #[test]
    fn inactive_phases_get_the_empty_law() {
        let mut deck = black_oil_deck();
        deck.runspec.phases = vec![PhaseIdx::Oil];
        assert!(!build_gas_pvt(&deck).unwrap().is_active());
        assert!(!build_water_pvt(&deck).unwrap().is_active());
    }

    #[test]
    fn thermal_wraps_the_isothermal_laws() {
        let mut deck = black_oil_deck();
        deck.runspec.thermal = true;
        deck.thermal = Some(ThermalSection {
            oilvisct: vec![vec![[20.0, 1.5], [100.0, 0.5]]],
            viscref: vec![ViscrefRecord {
                pressure: 200.0,
                rs: 20.0,
            }],
            ..ThermalSection::default()
        });
        let oil = build_oil_pvt(&deck).unwrap();
        assert_eq!(oil.approach(), OilPvtApproach::ThermalOil);
        let inner = oil.real_pvt::<ThermalOilPvt>().unwrap().isothermal().approach();
        assert_eq!(inner, OilPvtApproach::LiveOil);
        assert_eq!(build_gas_pvt(&deck).unwrap().approach(), GasPvtApproach::ThermalGas);
        assert_eq!(build_water_pvt(&deck).unwrap().approach(), WaterPvtApproach::ThermalWater);
    }

    #[test]
    fn co2store_takes_precedence() {
        let mut deck = Deck::new(&[PhaseIdx::Water, PhaseIdx::Gas]);
        deck.runspec.co2store = true;
        deck.runspec.disgasw = true;
        deck.runspec.thermal = true;
        deck.storage = Some(StorageOptions {
            salinity: vec![1.0],
            ..StorageOptions::default()
        });
        assert_eq!(build_water_pvt(&deck).unwrap().approach(), WaterPvtApproach::BrineCo2);
        assert_eq!(build_gas_pvt(&deck).unwrap().approach(), GasPvtApproach::Co2Gas);

        let fs = build_fluid_system(&deck).unwrap();
        assert!(fs.enable_dissolved_gas_in_water());
        assert_eq!(fs.molar_mass(CompIdx::Gas, 0).unwrap(), Co2::MOLAR_MASS);
        let salinity = salinities(&deck)[0];
        assert_eq!(
            fs.molar_mass(CompIdx::Water, 0).unwrap(),
            Brine::molar_mass(salinity)
        );
        // reference densities come from the brine and CO2 correlations
        let rho_w = fs.reference_density(PhaseIdx::Water, 0).unwrap();
        assert!(rho_w > 1000.0 && rho_w < 1100.0, "{rho_w}");
        assert_eq!(fs.reference_density(PhaseIdx::Oil, 0).unwrap(), DEFAULT_OIL_DENSITY);
    }

    #[test]
    fn salinity_is_converted_from_molality() {
        let mut deck = Deck::new(&[PhaseIdx::Water, PhaseIdx::Gas]);
        deck.runspec.co2store = true;
        assert_eq!(salinities(&deck), vec![0.0]);
        deck.storage = Some(StorageOptions {
            salinity: vec![1.0],
            ..StorageOptions::default()
        });
        let expected = 1.0 / (1.0 + 1.0 / 58.44e-3);
        assert!((salinities(&deck)[0] - expected).abs() < 1e-15);
    }

    #[test]
    fn fluid_system_carries_deck_conditions() {
        let mut deck = black_oil_deck();
        deck.rtemp = Some(80.0);
        deck.runspec.vapoil = true;
        deck.runspec.saturated_tables = false;
        let fs = build_fluid_system(&deck).unwrap();
        assert!(fs.is_initialized());
        assert!((fs.reservoir_temperature() - 353.15).abs() < 1e-9);
        assert_eq!(fs.surface_temperature(), SURFACE_TEMPERATURE);
        assert!(fs.enable_dissolved_gas());
        assert!(fs.enable_vaporized_oil());
        assert!(!fs.use_saturated_tables());
        assert_eq!(fs.reference_density(PhaseIdx::Gas, 0).unwrap(), 0.9);
        assert_eq!(fs.num_active_phases(), 3);
    }

    #[test]
    fn missing_phase_defaults_reference_density() {
        let mut deck = black_oil_deck();
        deck.runspec.phases = vec![PhaseIdx::Oil, PhaseIdx::Water];
        let fs = build_fluid_system(&deck).unwrap();
        assert_eq!(fs.reference_density(PhaseIdx::Gas, 0).unwrap(), DEFAULT_GAS_DENSITY);
        assert!(!fs.phase_is_active(PhaseIdx::Gas));
    }

    #[test]
    fn diffc_sets_molar_masses_and_coefficients() {
        let mut deck = black_oil_deck();
        deck.units = UnitSystem::Si;
        deck.pvto = vec![
            pvto()
                .into_iter()
                .map(|mut r| {
                    for row in &mut r.rows {
                        row[0] *= 1e5;
                        row[2] *= 1e-3;
                    }
                    r
                })
                .collect(),
        ];
        deck.pvdg = vec![vec![[1e6, 0.1, 1.2e-5], [3e7, 0.004, 2.5e-5]]];
        deck.pvtw = vec![PvcdRecord {
            p_ref: 2e7,
            b_ref: 1.02,
            compressibility: 4e-10,
            mu_ref: 5e-4,
            viscosibility: 0.0,
        }];
        deck.runspec.diffuse = true;
        deck.diffc = vec![DiffcRecord {
            oil_mw: 0.1,
            gas_mw: 0.02,
            gas_in_gas: 1e-7,
            oil_in_gas: 2e-7,
            gas_in_oil: 3e-9,
            oil_in_oil: 4e-9,
            gas_in_oil_cross_phase: 0.0,
            oil_in_oil_cross_phase: 0.0,
        }];
        let fs = build_fluid_system(&deck).unwrap();
        assert!(fs.enable_diffusion());
        assert_eq!(fs.molar_mass(CompIdx::Oil, 0).unwrap(), 0.1);
        assert_eq!(fs.molar_mass(CompIdx::Gas, 0).unwrap(), 0.02);
        assert_eq!(
            fs.stored_diffusion_coefficient(CompIdx::Gas, PhaseIdx::Oil, 0).unwrap(),
            Some(3e-9)
        );
        assert_eq!(
            fs.stored_diffusion_coefficient(CompIdx::Oil, PhaseIdx::Gas, 0).unwrap(),
            Some(2e-7)
        );
    }
}
