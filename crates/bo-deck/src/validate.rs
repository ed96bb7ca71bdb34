//! Deck validation logic.

use crate::schema::{
    Deck, DensityRecord, DentRecord, PvcdRecord, PvtxRecordDef, StorageOptions, ThermalSection,
    LATEST_VERSION,
};
use bo_core::PhaseIdx;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing keyword: {keyword} ({context})")]
    MissingKeyword { keyword: String, context: String },

    #[error("Region count mismatch: {keyword} has {found} entries, expected {expected}")]
    RegionCount {
        keyword: String,
        found: usize,
        expected: usize,
    },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported feature: {feature} - {reason}")]
    Unsupported { feature: String, reason: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: impl ToString, reason: impl Into<String>) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn missing(keyword: &str, context: &str) -> ValidationError {
    ValidationError::MissingKeyword {
        keyword: keyword.to_string(),
        context: context.to_string(),
    }
}

fn unsupported(feature: &str, reason: &str) -> ValidationError {
    ValidationError::Unsupported {
        feature: feature.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_deck(deck: &Deck) -> Result<(), ValidationError> {
    if deck.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: deck.version,
        });
    }
    let n = deck.runspec.num_regions;
    if n == 0 {
        return Err(invalid("runspec.num_regions", n, "at least one PVT region"));
    }

    validate_runspec(deck)?;

    if let Some(st) = &deck.stcond {
        check_finite("stcond.temperature", st.temperature)?;
        check_positive("stcond.pressure", st.pressure)?;
    }
    if let Some(t) = deck.rtemp {
        check_finite("rtemp", t)?;
    }

    let storage = deck.is_storage();
    if !storage || !deck.density.is_empty() {
        check_region_count("DENSITY", deck.density.len(), n)?;
        for (i, d) in deck.density.iter().enumerate() {
            validate_density(i, d)?;
        }
    }

    if deck.phase_is_active(PhaseIdx::Oil) && !storage {
        validate_oil(deck)?;
    }
    if deck.phase_is_active(PhaseIdx::Gas) && !storage {
        validate_gas(deck)?;
    }
    if deck.phase_is_active(PhaseIdx::Water) && !storage {
        validate_water(deck)?;
    }

    if let Some(v) = &deck.vappars {
        check_finite("VAPPARS.par1", v.par1)?;
        check_finite("VAPPARS.par2", v.par2)?;
    }

    if !deck.diffc.is_empty() {
        if !deck.runspec.diffuse {
            return Err(unsupported("DIFFC", "requires DIFFUSE in the runspec"));
        }
        check_region_count("DIFFC", deck.diffc.len(), n)?;
        for (i, d) in deck.diffc.iter().enumerate() {
            check_positive(&format!("DIFFC[{i}].oil_mw"), d.oil_mw)?;
            check_positive(&format!("DIFFC[{i}].gas_mw"), d.gas_mw)?;
            for (name, v) in [
                ("gas_in_gas", d.gas_in_gas),
                ("oil_in_gas", d.oil_in_gas),
                ("gas_in_oil", d.gas_in_oil),
                ("oil_in_oil", d.oil_in_oil),
            ] {
                check_non_negative(&format!("DIFFC[{i}].{name}"), v)?;
            }
            if d.gas_in_oil_cross_phase > 0.0 || d.oil_in_oil_cross_phase > 0.0 {
                return Err(unsupported(
                    "DIFFC cross phase diffusion",
                    "default items 7 and 8 or set them to zero",
                ));
            }
        }
    }

    match (&deck.thermal, deck.runspec.thermal) {
        (Some(thermal), true) => validate_thermal(deck, thermal)?,
        (Some(_), false) => return Err(unsupported("thermal section", "requires THERMAL in the runspec")),
        (None, _) => {}
    }

    match (&deck.storage, storage) {
        (Some(options), true) => validate_storage(deck, options)?,
        (Some(_), false) => {
            return Err(unsupported(
                "storage options",
                "require CO2STORE or H2STORE in the runspec",
            ));
        }
        (None, _) => {}
    }

    Ok(())
}

fn validate_runspec(deck: &Deck) -> Result<(), ValidationError> {
    let rs = &deck.runspec;
    if rs.phases.is_empty() {
        return Err(missing("runspec.phases", "at least one phase must be active"));
    }
    let mut seen = HashSet::new();
    for phase in &rs.phases {
        if !seen.insert(phase) {
            return Err(invalid("runspec.phases", phase.name(), "listed twice"));
        }
    }
    if rs.co2store && rs.h2store {
        return Err(unsupported("CO2STORE + H2STORE", "only one storage gas per deck"));
    }
    if rs.disgasw && !rs.co2store {
        return Err(unsupported(
            "DISGASW",
            "only supported in combination with CO2STORE",
        ));
    }
    if deck.is_storage() && !deck.phase_is_active(PhaseIdx::Gas) {
        let keyword = if rs.co2store { "CO2STORE" } else { "H2STORE" };
        return Err(unsupported(keyword, "requires the gas phase"));
    }
    if deck.is_storage()
        && !deck.phase_is_active(PhaseIdx::Oil)
        && !deck.phase_is_active(PhaseIdx::Water)
    {
        return Err(unsupported("storage", "requires a brine phase (oil or water)"));
    }
    Ok(())
}

fn validate_density(region: usize, d: &DensityRecord) -> Result<(), ValidationError> {
    check_positive(&format!("DENSITY[{region}].oil"), d.oil)?;
    check_positive(&format!("DENSITY[{region}].water"), d.water)?;
    check_positive(&format!("DENSITY[{region}].gas"), d.gas)
}

fn validate_oil(deck: &Deck) -> Result<(), ValidationError> {
    let n = deck.runspec.num_regions;
    if !deck.pvto.is_empty() {
        check_region_count("PVTO", deck.pvto.len(), n)?;
        for (i, records) in deck.pvto.iter().enumerate() {
            validate_pvtx("PVTO", i, records)?;
        }
    } else if !deck.pvdo.is_empty() {
        check_region_count("PVDO", deck.pvdo.len(), n)?;
        for (i, rows) in deck.pvdo.iter().enumerate() {
            validate_pvd("PVDO", i, rows)?;
        }
    } else if !deck.pvcdo.is_empty() {
        check_region_count("PVCDO", deck.pvcdo.len(), n)?;
        for (i, r) in deck.pvcdo.iter().enumerate() {
            validate_pvcd("PVCDO", i, r)?;
        }
    } else {
        return Err(missing("PVTO, PVDO or PVCDO", "oil phase is active"));
    }
    if let Some(rsconst) = &deck.rsconst {
        if deck.pvdo.is_empty() || !deck.pvto.is_empty() {
            return Err(unsupported("RSCONST", "only used together with PVDO"));
        }
        check_non_negative("RSCONST.rs", rsconst.rs)?;
        check_positive("RSCONST.bubble_point", rsconst.bubble_point)?;
    }
    Ok(())
}

fn validate_gas(deck: &Deck) -> Result<(), ValidationError> {
    let n = deck.runspec.num_regions;
    if !deck.pvtgw.is_empty() {
        check_region_count("PVTGW", deck.pvtgw.len(), n)?;
        for (i, records) in deck.pvtgw.iter().enumerate() {
            validate_pvtx("PVTGW", i, records)?;
        }
    }
    if !deck.pvtg.is_empty() {
        check_region_count("PVTG", deck.pvtg.len(), n)?;
        for (i, records) in deck.pvtg.iter().enumerate() {
            validate_pvtx("PVTG", i, records)?;
        }
    } else if deck.pvtgw.is_empty() {
        if deck.pvdg.is_empty() {
            return Err(missing("PVTG, PVTGW or PVDG", "gas phase is active"));
        }
        check_region_count("PVDG", deck.pvdg.len(), n)?;
        for (i, rows) in deck.pvdg.iter().enumerate() {
            validate_pvd("PVDG", i, rows)?;
        }
    }
    if !deck.rwgsalt.is_empty() {
        if deck.pvtgw.is_empty() {
            return Err(unsupported("RWGSALT", "requires PVTGW"));
        }
        check_region_count("RWGSALT", deck.rwgsalt.len(), n)?;
        for (i, records) in deck.rwgsalt.iter().enumerate() {
            let keys: Vec<f64> = records.iter().map(|r| r.p).collect();
            check_increasing(&format!("RWGSALT[{i}] pressure"), &keys)?;
            for r in records {
                let salts: Vec<f64> = r.rows.iter().map(|row| row[0]).collect();
                check_increasing(&format!("RWGSALT[{i}] salt at p = {}", r.p), &salts)?;
            }
        }
    }
    Ok(())
}

fn validate_water(deck: &Deck) -> Result<(), ValidationError> {
    let n = deck.runspec.num_regions;
    if !deck.pvtwsalt.is_empty() {
        check_region_count("PVTWSALT", deck.pvtwsalt.len(), n)?;
        for (i, table) in deck.pvtwsalt.iter().enumerate() {
            check_positive(&format!("PVTWSALT[{i}].p_ref"), table.p_ref)?;
            let salts: Vec<f64> = table.rows.iter().map(|row| row[0]).collect();
            check_increasing(&format!("PVTWSALT[{i}] salt"), &salts)?;
            for row in &table.rows {
                check_positive(&format!("PVTWSALT[{i}] Bw"), row[1])?;
                check_positive(&format!("PVTWSALT[{i}] mu_w"), row[3])?;
            }
        }
    } else if !deck.pvtw.is_empty() {
        if deck.runspec.brine {
            return Err(missing("PVTWSALT", "BRINE needs salt dependent water tables"));
        }
        check_region_count("PVTW", deck.pvtw.len(), n)?;
        for (i, r) in deck.pvtw.iter().enumerate() {
            validate_pvcd("PVTW", i, r)?;
        }
    } else {
        return Err(missing("PVTW or PVTWSALT", "water phase is active"));
    }
    Ok(())
}

fn validate_thermal(deck: &Deck, thermal: &ThermalSection) -> Result<(), ValidationError> {
    let n = deck.runspec.num_regions;
    for (keyword, curves) in [
        ("OILVISCT", &thermal.oilvisct),
        ("GASVISCT", &thermal.gasvisct),
        ("WATVISCT", &thermal.watvisct),
    ] {
        if curves.is_empty() {
            continue;
        }
        check_region_count(keyword, curves.len(), n)?;
        for (i, rows) in curves.iter().enumerate() {
            let temps: Vec<f64> = rows.iter().map(|r| r[0]).collect();
            check_increasing(&format!("{keyword}[{i}] temperature"), &temps)?;
            for r in rows {
                check_positive(&format!("{keyword}[{i}] viscosity"), r[1])?;
            }
        }
    }
    if !thermal.oilvisct.is_empty() || !thermal.watvisct.is_empty() {
        if thermal.viscref.is_empty() {
            return Err(missing("VISCREF", "OILVISCT and WATVISCT are scaled at VISCREF"));
        }
        check_region_count("VISCREF", thermal.viscref.len(), n)?;
    }
    if (!thermal.watvisct.is_empty() || !thermal.watdent.is_empty()) && deck.pvtw.is_empty() {
        return Err(missing("PVTW", "WATVISCT and WATDENT are relative to PVTW"));
    }
    for (keyword, records) in [
        ("OILDENT", &thermal.oildent),
        ("GASDENT", &thermal.gasdent),
        ("WATDENT", &thermal.watdent),
    ] {
        validate_dent(keyword, records, n)?;
    }
    if !thermal.specheat.is_empty() {
        check_region_count("SPECHEAT", thermal.specheat.len(), n)?;
        for (i, rows) in thermal.specheat.iter().enumerate() {
            if rows.is_empty() {
                return Err(invalid(format!("SPECHEAT[{i}]"), "[]", "needs at least one row"));
            }
            let temps: Vec<f64> = rows.iter().map(|r| r[0]).collect();
            check_increasing(&format!("SPECHEAT[{i}] temperature"), &temps)?;
        }
    }
    for (keyword, records) in [("OILJT", &thermal.oiljt), ("WATJT", &thermal.watjt)] {
        if !records.is_empty() {
            check_region_count(keyword, records.len(), n)?;
        }
    }
    if !thermal.hvap.is_empty() {
        check_region_count("HVAP", thermal.hvap.len(), n)?;
    }
    Ok(())
}

fn validate_storage(deck: &Deck, options: &StorageOptions) -> Result<(), ValidationError> {
    let n = deck.runspec.num_regions;
    if options.salinity.len() > 1 {
        check_region_count("SALINITY", options.salinity.len(), n)?;
    }
    for (i, &s) in options.salinity.iter().enumerate() {
        check_non_negative(&format!("SALINITY[{i}]"), s)?;
    }
    if let Some(model) = options.activity_model
        && !(1..=3).contains(&model)
    {
        return Err(invalid("activity_model", model, "options are 1, 2 or 3"));
    }
    if let Some(mixing) = options.brine_mixing {
        if !(0..=1).contains(&mixing.salt) {
            return Err(invalid("brine_mixing.salt", mixing.salt, "options are 0 or 1"));
        }
        if !(0..=2).contains(&mixing.liquid) {
            return Err(invalid("brine_mixing.liquid", mixing.liquid, "options are 0, 1 or 2"));
        }
    }
    if let Some(model) = options.gas_mixing
        && !(0..=1).contains(&model)
    {
        return Err(invalid("gas_mixing", model, "options are 0 or 1"));
    }
    if deck.runspec.h2store
        && (options.ezrokhi_density.is_some() || options.ezrokhi_viscosity.is_some())
    {
        return Err(unsupported("Ezrokhi coefficients", "only available with CO2STORE"));
    }
    Ok(())
}

fn validate_pvd(keyword: &str, region: usize, rows: &[[f64; 3]]) -> Result<(), ValidationError> {
    if rows.len() < 2 {
        return Err(invalid(
            format!("{keyword}[{region}]"),
            rows.len(),
            "needs at least two rows",
        ));
    }
    let pressures: Vec<f64> = rows.iter().map(|r| r[0]).collect();
    check_increasing(&format!("{keyword}[{region}] pressure"), &pressures)?;
    for r in rows {
        check_positive(&format!("{keyword}[{region}] B"), r[1])?;
        check_positive(&format!("{keyword}[{region}] viscosity"), r[2])?;
    }
    Ok(())
}

fn validate_pvtx(keyword: &str, region: usize, records: &[PvtxRecordDef]) -> Result<(), ValidationError> {
    if records.len() < 2 {
        return Err(invalid(
            format!("{keyword}[{region}]"),
            records.len(),
            "needs at least two records",
        ));
    }
    let keys: Vec<f64> = records.iter().map(|r| r.key).collect();
    check_increasing(&format!("{keyword}[{region}] key"), &keys)?;
    for record in records {
        let field = format!("{keyword}[{region}] record {}", record.key);
        if record.rows.is_empty() {
            return Err(invalid(field, "[]", "needs at least the saturated row"));
        }
        let inner: Vec<f64> = record.rows.iter().map(|r| r[0]).collect();
        check_monotone(&field, &inner)?;
        for r in &record.rows {
            check_positive(&format!("{field} B"), r[1])?;
            check_positive(&format!("{field} viscosity"), r[2])?;
        }
    }
    Ok(())
}

fn validate_pvcd(keyword: &str, region: usize, r: &PvcdRecord) -> Result<(), ValidationError> {
    check_finite(&format!("{keyword}[{region}].p_ref"), r.p_ref)?;
    check_positive(&format!("{keyword}[{region}].b_ref"), r.b_ref)?;
    check_finite(&format!("{keyword}[{region}].compressibility"), r.compressibility)?;
    check_positive(&format!("{keyword}[{region}].mu_ref"), r.mu_ref)?;
    check_finite(&format!("{keyword}[{region}].viscosibility"), r.viscosibility)
}

fn validate_dent(keyword: &str, records: &[DentRecord], n: usize) -> Result<(), ValidationError> {
    if records.is_empty() {
        return Ok(());
    }
    check_region_count(keyword, records.len(), n)?;
    for (i, r) in records.iter().enumerate() {
        check_finite(&format!("{keyword}[{i}].t_ref"), r.t_ref)?;
        check_finite(&format!("{keyword}[{i}].c1"), r.c1)?;
        check_finite(&format!("{keyword}[{i}].c2"), r.c2)?;
    }
    Ok(())
}

fn check_region_count(keyword: &str, found: usize, expected: usize) -> Result<(), ValidationError> {
    if found != expected {
        return Err(ValidationError::RegionCount {
            keyword: keyword.to_string(),
            found,
            expected,
        });
    }
    Ok(())
}

fn check_finite(field: &str, v: f64) -> Result<(), ValidationError> {
    if !v.is_finite() {
        return Err(invalid(field, v, "must be finite"));
    }
    Ok(())
}

fn check_positive(field: &str, v: f64) -> Result<(), ValidationError> {
    if !(v.is_finite() && v > 0.0) {
        return Err(invalid(field, v, "must be positive"));
    }
    Ok(())
}

fn check_non_negative(field: &str, v: f64) -> Result<(), ValidationError> {
    if !(v.is_finite() && v >= 0.0) {
        return Err(invalid(field, v, "must not be negative"));
    }
    Ok(())
}

fn check_increasing(field: &str, values: &[f64]) -> Result<(), ValidationError> {
    for v in values {
        check_finite(field, *v)?;
    }
    if let Some(w) = values.windows(2).find(|w| w[1] <= w[0]) {
        return Err(invalid(field, w[1], "must be strictly increasing"));
    }
    Ok(())
}

/// Strictly increasing or strictly decreasing (PVTG lists Rv downwards).
fn check_monotone(field: &str, values: &[f64]) -> Result<(), ValidationError> {
    for v in values {
        check_finite(field, *v)?;
    }
    let up = values.windows(2).all(|w| w[1] > w[0]);
    let down = values.windows(2).all(|w| w[1] < w[0]);
    if !(up || down) {
        return Err(invalid(field, format!("{values:?}"), "must be strictly monotone"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Deck, RsconstRecord, StorageOptions, ThermalSection};

    fn dead_oil_deck() -> Deck {
        let mut deck = Deck::new(&[PhaseIdx::Oil]);
        deck.density = vec![DensityRecord {
            oil: 800.0,
            water: 1000.0,
            gas: 1.0,
        }];
        deck.pvdo = vec![vec![[1.0, 1.2, 1.0], [300.0, 1.1, 1.5]]];
        deck
    }

    #[test]
    fn dead_oil_deck_is_valid() {
        validate_deck(&dead_oil_deck()).unwrap();
    }

    #[test]
    fn rejects_future_versions() {
        let mut deck = dead_oil_deck();
        deck.version = LATEST_VERSION + 1;
        assert_eq!(
            validate_deck(&deck).unwrap_err(),
            ValidationError::UnsupportedVersion {
                version: LATEST_VERSION + 1
            }
        );
    }

    #[test]
    fn requires_a_phase() {
        let mut deck = dead_oil_deck();
        deck.runspec.phases.clear();
        assert!(matches!(
            validate_deck(&deck),
            Err(ValidationError::MissingKeyword { .. })
        ));
    }

    #[test]
    fn disgasw_requires_co2store() {
        let mut deck = dead_oil_deck();
        deck.runspec.disgasw = true;
        let err = validate_deck(&deck).unwrap_err();
        assert!(err.to_string().contains("CO2STORE"), "{err}");
    }

    #[test]
    fn storage_requires_gas() {
        let mut deck = Deck::new(&[PhaseIdx::Water]);
        deck.runspec.co2store = true;
        let err = validate_deck(&deck).unwrap_err();
        assert!(err.to_string().contains("gas phase"), "{err}");
    }

    #[test]
    fn region_counts_must_match() {
        let mut deck = dead_oil_deck();
        deck.runspec.num_regions = 2;
        assert_eq!(
            validate_deck(&deck).unwrap_err(),
            ValidationError::RegionCount {
                keyword: "DENSITY".to_string(),
                found: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn table_axes_must_increase() {
        let mut deck = dead_oil_deck();
        deck.pvdo = vec![vec![[300.0, 1.1, 1.5], [1.0, 1.2, 1.0]]];
        assert!(matches!(
            validate_deck(&deck),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn rsconst_needs_pvdo() {
        let mut deck = dead_oil_deck();
        deck.rsconst = Some(RsconstRecord {
            rs: 50.0,
            bubble_point: 150.0,
        });
        validate_deck(&deck).unwrap();
        deck.pvcdo = vec![PvcdRecord {
            p_ref: 100.0,
            b_ref: 1.1,
            compressibility: 1e-5,
            mu_ref: 1.0,
            viscosibility: 0.0,
        }];
        deck.pvdo.clear();
        assert!(matches!(
            validate_deck(&deck),
            Err(ValidationError::Unsupported { .. })
        ));
    }

    #[test]
    fn thermal_section_needs_thermal_runspec() {
        let mut deck = dead_oil_deck();
        deck.thermal = Some(ThermalSection::default());
        assert!(validate_deck(&deck).is_err());
        deck.runspec.thermal = true;
        validate_deck(&deck).unwrap();
    }

    #[test]
    fn storage_model_selectors_are_checked() {
        let mut deck = Deck::new(&[PhaseIdx::Water, PhaseIdx::Gas]);
        deck.runspec.co2store = true;
        deck.storage = Some(StorageOptions {
            activity_model: Some(4),
            ..StorageOptions::default()
        });
        assert!(matches!(
            validate_deck(&deck),
            Err(ValidationError::InvalidValue { .. })
        ));
        deck.storage = Some(StorageOptions {
            activity_model: Some(3),
            ..StorageOptions::default()
        });
        validate_deck(&deck).unwrap();
    }
}
