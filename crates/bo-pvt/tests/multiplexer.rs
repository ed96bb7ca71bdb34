//! Multiplexer behaviour across every phase: tag/payload lock-step, value
//! copies and continuity of the saturated and general relations.

use bo_pvt::{
    BrineCo2Pvt, DeadOilPvt, DryHumidGasPvt, GasPvt, GasPvtApproach, GasPvtLaw, LiveOilPvt, OilPvt,
    OilPvtApproach, OilPvtLaw, PvdRow, PvtError, PvtxRecord, PvtxSample, WaterPvt, WaterPvtApproach,
    WaterPvtLaw, WetGasPvt,
};

fn pvto() -> Vec<PvtxRecord> {
    vec![
        PvtxRecord::new(
            20.0,
            vec![PvtxSample::new(5e6, 1.10, 1.2e-3), PvtxSample::new(2e7, 1.08, 1.4e-3)],
        ),
        PvtxRecord::new(60.0, vec![PvtxSample::new(1.2e7, 1.20, 0.9e-3)]),
        PvtxRecord::new(
            120.0,
            vec![PvtxSample::new(2e7, 1.35, 0.7e-3), PvtxSample::new(3e7, 1.33, 0.8e-3)],
        ),
    ]
}

fn pvtg() -> Vec<PvtxRecord> {
    vec![
        PvtxRecord::new(
            5e6,
            vec![PvtxSample::new(5e-5, 0.025, 1.4e-5), PvtxSample::new(0.0, 0.0252, 1.35e-5)],
        ),
        PvtxRecord::new(1.5e7, vec![PvtxSample::new(1.2e-4, 0.008, 1.8e-5)]),
        PvtxRecord::new(
            3e7,
            vec![PvtxSample::new(2.5e-4, 0.0045, 2.5e-5), PvtxSample::new(0.0, 0.0046, 2.3e-5)],
        ),
    ]
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs())
}

#[test]
fn every_tag_round_trips() {
    for approach in OilPvtApproach::ALL {
        assert_eq!(OilPvt::with_approach(approach).approach(), approach);
    }
    for approach in GasPvtApproach::ALL {
        assert_eq!(GasPvt::with_approach(approach).approach(), approach);
    }
    for approach in WaterPvtApproach::ALL {
        assert_eq!(WaterPvt::with_approach(approach).approach(), approach);
    }
}

#[test]
fn wrong_typed_access_names_both_tags() {
    let oil = OilPvt::from(LiveOilPvt::from_regions(&[pvto()]).unwrap());
    let err = oil.real_pvt::<DeadOilPvt>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Wrong PVT approach: requested DeadOil, active LiveOil"
    );
}

#[test]
fn copies_do_not_share_mutations() {
    let mut a = GasPvt::from(WetGasPvt::from_regions(&[pvtg()]).unwrap());
    let b = a.clone();
    a.set_vap_pars(3.0, 0.0);
    a.real_pvt_mut::<WetGasPvt>().unwrap().add_region(&pvtg()).unwrap();
    assert_eq!(a.num_regions(), 2);
    assert_eq!(b.num_regions(), 1);
    assert_eq!(b.real_pvt::<WetGasPvt>().unwrap().vap_par1(), 0.0);
}

#[test]
fn oil_boundary_is_continuous_in_rs() {
    let oil = OilPvt::from(LiveOilPvt::from_regions(&[pvto()]).unwrap());
    for &p in &[6e6, 1e7, 1.5e7, 2e7] {
        let rs = oil.saturated_gas_dissolution_factor(0, 350.0, p).unwrap();
        let sat = oil.saturated_inverse_formation_volume_factor(0, 350.0, p).unwrap();
        let general = oil.inverse_formation_volume_factor(0, 350.0, p, rs).unwrap();
        assert!(close(sat, general), "p = {p}: {sat} vs {general}");
        let mu_sat = oil.saturated_viscosity(0, 350.0, p).unwrap();
        let mu = oil.viscosity(0, 350.0, p, rs).unwrap();
        assert!(close(mu_sat, mu), "p = {p}: {mu_sat} vs {mu}");
    }
}

#[test]
fn gas_boundary_is_continuous_in_rv() {
    let gas = GasPvt::from(WetGasPvt::from_regions(&[pvtg()]).unwrap());
    for &p in &[6e6, 1e7, 2e7, 2.8e7] {
        let rv = gas.saturated_oil_vaporization_factor(0, 350.0, p).unwrap();
        let sat = gas.saturated_inverse_formation_volume_factor(0, 350.0, p).unwrap();
        let general = gas.inverse_formation_volume_factor(0, 350.0, p, rv, 0.0).unwrap();
        assert!(close(sat, general), "p = {p}: {sat} vs {general}");
    }
}

#[test]
fn gas_boundary_is_continuous_in_rvw() {
    let gas = GasPvt::from(DryHumidGasPvt::from_regions(&[pvtg()]).unwrap());
    for &p in &[6e6, 1e7, 2e7, 2.8e7] {
        let rvw = gas.saturated_water_vaporization_factor(0, 350.0, p).unwrap();
        let sat = gas.saturated_inverse_formation_volume_factor(0, 350.0, p).unwrap();
        let general = gas.inverse_formation_volume_factor(0, 350.0, p, 0.0, rvw).unwrap();
        assert!(close(sat, general), "p = {p}: {sat} vs {general}");
    }
}

#[test]
fn water_boundary_is_continuous_in_rsw() {
    let water = WaterPvt::from(BrineCo2Pvt::from_salinities(&[0.05]).unwrap());
    for &p in &[5e6, 1e7, 2e7] {
        let rsw = water.saturated_gas_dissolution_factor(0, 330.0, p, 0.0).unwrap();
        let sat = water.saturated_inverse_formation_volume_factor(0, 330.0, p, 0.0).unwrap();
        let general = water.inverse_formation_volume_factor(0, 330.0, p, rsw, 0.0).unwrap();
        assert!(close(sat, general), "p = {p}: {sat} vs {general}");
    }
}

#[test]
fn brine_co2_has_no_saturation_pressure() {
    let oil = OilPvt::from(BrineCo2Pvt::from_salinities(&[0.1]).unwrap());
    let err = oil.saturation_pressure(0, 330.0, 10.0).unwrap_err();
    assert!(matches!(err, PvtError::NotImplemented { .. }));
}

#[test]
fn dead_oil_uses_the_pressure_table() {
    let oil = OilPvt::from(
        DeadOilPvt::from_regions(&[vec![PvdRow::new(1e5, 1.2, 1e-3), PvdRow::new(3e7, 1.1, 1.5e-3)]])
            .unwrap(),
    );
    assert_eq!(oil.saturated_gas_dissolution_factor(0, 350.0, 2e7).unwrap(), 0.0);
    let inv_b = oil.inverse_formation_volume_factor(0, 350.0, 3e7, 0.0).unwrap();
    assert!(close(inv_b, 1.0 / 1.1));
}
