//! Conversions between surface volume ratios, mass fractions and mole
//! fractions of the dissolved/vaporized component.
//!
//! Ratios relate surface volumes, so the mass fraction of the solute is
//! `R·ρ_solute / (ρ_solvent + R·ρ_solute)` with surface densities of the
//! region. Mole fractions additionally need the molar masses set up by
//! `init_end()`.

use crate::error::FluidSystemResult;
use crate::fluid_system::FluidSystem;
use bo_core::{CompIdx, PhaseIdx, Real};

#[inline]
fn mass_fraction_to_ratio(x: Real, rho_solvent: Real, rho_solute: Real) -> Real {
    x / (1.0 - x) * (rho_solvent / rho_solute)
}

#[inline]
fn ratio_to_mass_fraction(r: Real, rho_solvent: Real, rho_solute: Real) -> Real {
    let solute = r * rho_solute;
    solute / (rho_solvent + solute)
}

#[inline]
fn mass_to_mole_fraction(x: Real, m_solute: Real, m_solvent: Real) -> Real {
    x * m_solvent / (m_solute * (1.0 - x) + x * m_solvent)
}

#[inline]
fn mole_to_mass_fraction(x: Real, m_solute: Real, m_solvent: Real) -> Real {
    x * m_solute / (x * (m_solute - m_solvent) + m_solvent)
}

impl FluidSystem {
    pub(crate) fn xog_to_rs(&self, xog: Real, region: usize) -> Real {
        mass_fraction_to_ratio(
            xog,
            self.rho_ref(PhaseIdx::Oil, region),
            self.rho_ref(PhaseIdx::Gas, region),
        )
    }

    pub(crate) fn xwg_to_rsw(&self, xwg: Real, region: usize) -> Real {
        mass_fraction_to_ratio(
            xwg,
            self.rho_ref(PhaseIdx::Water, region),
            self.rho_ref(PhaseIdx::Gas, region),
        )
    }

    pub(crate) fn xgo_to_rv(&self, xgo: Real, region: usize) -> Real {
        mass_fraction_to_ratio(
            xgo,
            self.rho_ref(PhaseIdx::Gas, region),
            self.rho_ref(PhaseIdx::Oil, region),
        )
    }

    pub(crate) fn xgw_to_rvw(&self, xgw: Real, region: usize) -> Real {
        mass_fraction_to_ratio(
            xgw,
            self.rho_ref(PhaseIdx::Gas, region),
            self.rho_ref(PhaseIdx::Water, region),
        )
    }

    pub(crate) fn rs_to_xog(&self, rs: Real, region: usize) -> Real {
        ratio_to_mass_fraction(
            rs,
            self.rho_ref(PhaseIdx::Oil, region),
            self.rho_ref(PhaseIdx::Gas, region),
        )
    }

    pub(crate) fn rv_to_xgo(&self, rv: Real, region: usize) -> Real {
        ratio_to_mass_fraction(
            rv,
            self.rho_ref(PhaseIdx::Gas, region),
            self.rho_ref(PhaseIdx::Oil, region),
        )
    }

    pub(crate) fn rsw_to_xwg(&self, rsw: Real, region: usize) -> Real {
        ratio_to_mass_fraction(
            rsw,
            self.rho_ref(PhaseIdx::Water, region),
            self.rho_ref(PhaseIdx::Gas, region),
        )
    }

    pub(crate) fn rvw_to_xgw(&self, rvw: Real, region: usize) -> Real {
        ratio_to_mass_fraction(
            rvw,
            self.rho_ref(PhaseIdx::Gas, region),
            self.rho_ref(PhaseIdx::Water, region),
        )
    }

    fn molar_masses(&self, solute: CompIdx, solvent: CompIdx, region: usize) -> FluidSystemResult<(Real, Real)> {
        Ok((self.molar_mass(solute, region)?, self.molar_mass(solvent, region)?))
    }

    /// Mass fraction of gas in oil to Rs.
    pub fn convert_xog_to_rs(&self, xog: Real, region: usize) -> FluidSystemResult<Real> {
        self.check_region(region)?;
        Ok(self.xog_to_rs(xog, region))
    }

    /// Mass fraction of gas in water to Rsw.
    pub fn convert_xwg_to_rsw(&self, xwg: Real, region: usize) -> FluidSystemResult<Real> {
        self.check_region(region)?;
        Ok(self.xwg_to_rsw(xwg, region))
    }

    /// Mass fraction of oil in gas to Rv.
    pub fn convert_xgo_to_rv(&self, xgo: Real, region: usize) -> FluidSystemResult<Real> {
        self.check_region(region)?;
        Ok(self.xgo_to_rv(xgo, region))
    }

    /// Mass fraction of water in gas to Rvw.
    pub fn convert_xgw_to_rvw(&self, xgw: Real, region: usize) -> FluidSystemResult<Real> {
        self.check_region(region)?;
        Ok(self.xgw_to_rvw(xgw, region))
    }

    /// Rs to the mass fraction of gas in oil.
    pub fn convert_rs_to_xog(&self, rs: Real, region: usize) -> FluidSystemResult<Real> {
        self.check_region(region)?;
        Ok(self.rs_to_xog(rs, region))
    }

    /// Rsw to the mass fraction of gas in water.
    pub fn convert_rsw_to_xwg(&self, rsw: Real, region: usize) -> FluidSystemResult<Real> {
        self.check_region(region)?;
        Ok(self.rsw_to_xwg(rsw, region))
    }

    /// Rv to the mass fraction of oil in gas.
    pub fn convert_rv_to_xgo(&self, rv: Real, region: usize) -> FluidSystemResult<Real> {
        self.check_region(region)?;
        Ok(self.rv_to_xgo(rv, region))
    }

    /// Rvw to the mass fraction of water in gas.
    pub fn convert_rvw_to_xgw(&self, rvw: Real, region: usize) -> FluidSystemResult<Real> {
        self.check_region(region)?;
        Ok(self.rvw_to_xgw(rvw, region))
    }

    /// Mass fraction of gas in oil to its mole fraction.
    pub fn convert_xog_to_mole(&self, xog: Real, region: usize) -> FluidSystemResult<Real> {
        let (mg, mo) = self.molar_masses(CompIdx::Gas, CompIdx::Oil, region)?;
        Ok(mass_to_mole_fraction(xog, mg, mo))
    }

    pub fn convert_mole_to_xog(&self, xog_mole: Real, region: usize) -> FluidSystemResult<Real> {
        let (mg, mo) = self.molar_masses(CompIdx::Gas, CompIdx::Oil, region)?;
        Ok(mole_to_mass_fraction(xog_mole, mg, mo))
    }

    /// Mass fraction of oil in gas to its mole fraction.
    pub fn convert_xgo_to_mole(&self, xgo: Real, region: usize) -> FluidSystemResult<Real> {
        let (mo, mg) = self.molar_masses(CompIdx::Oil, CompIdx::Gas, region)?;
        Ok(mass_to_mole_fraction(xgo, mo, mg))
    }

    pub fn convert_mole_to_xgo(&self, xgo_mole: Real, region: usize) -> FluidSystemResult<Real> {
        let (mo, mg) = self.molar_masses(CompIdx::Oil, CompIdx::Gas, region)?;
        Ok(mole_to_mass_fraction(xgo_mole, mo, mg))
    }

    /// Mass fraction of water in gas to its mole fraction.
    pub fn convert_xgw_to_mole(&self, xgw: Real, region: usize) -> FluidSystemResult<Real> {
        let (mw, mg) = self.molar_masses(CompIdx::Water, CompIdx::Gas, region)?;
        Ok(mass_to_mole_fraction(xgw, mw, mg))
    }

    pub fn convert_mole_to_xgw(&self, xgw_mole: Real, region: usize) -> FluidSystemResult<Real> {
        let (mw, mg) = self.molar_masses(CompIdx::Water, CompIdx::Gas, region)?;
        Ok(mole_to_mass_fraction(xgw_mole, mw, mg))
    }

    /// Mass fraction of gas in water to its mole fraction.
    pub fn convert_xwg_to_mole(&self, xwg: Real, region: usize) -> FluidSystemResult<Real> {
        let (mg, mw) = self.molar_masses(CompIdx::Gas, CompIdx::Water, region)?;
        Ok(mass_to_mole_fraction(xwg, mg, mw))
    }

    pub fn convert_mole_to_xwg(&self, xwg_mole: Real, region: usize) -> FluidSystemResult<Real> {
        let (mg, mw) = self.molar_masses(CompIdx::Gas, CompIdx::Water, region)?;
        Ok(mole_to_mass_fraction(xwg_mole, mg, mw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FluidSystemError;

    fn system() -> FluidSystem {
        let mut fs = FluidSystem::new(1);
        fs.set_reference_densities(800.0, 1000.0, 0.9, 0).unwrap();
        fs.init_end().unwrap();
        fs
    }

    #[test]
    fn rs_mass_fraction_by_hand() {
        let fs = system();
        // 100 sm3 gas of 0.9 kg/sm3 in 1 sm3 oil of 800 kg/sm3
        let x = fs.convert_rs_to_xog(100.0, 0).unwrap();
        assert!((x - 90.0 / 890.0).abs() < 1e-15);
        let rs = fs.convert_xog_to_rs(x, 0).unwrap();
        assert!((rs - 100.0).abs() < 1e-10);
    }

    #[test]
    fn water_ratio_mass_fractions_by_hand() {
        let fs = system();
        // 10 sm3 gas of 0.9 kg/sm3 in 1 sm3 water of 1000 kg/sm3
        let xwg = fs.convert_rsw_to_xwg(10.0, 0).unwrap();
        assert!((xwg - 9.0 / 1009.0).abs() < 1e-15);
        // 1e-3 sm3 water per sm3 gas
        let xgw = fs.convert_rvw_to_xgw(1e-3, 0).unwrap();
        assert!((xgw - 1.0 / 1.9).abs() < 1e-15);
        assert!(fs.convert_rvw_to_xgw(1e-3, 1).is_err());
    }

    #[test]
    fn mole_fraction_by_hand() {
        let fs = system();
        let mg = fs.molar_mass(CompIdx::Gas, 0).unwrap();
        let x = 0.1;
        let expected = (x / mg) / (x / mg + (1.0 - x) / 175e-3);
        let mole = fs.convert_xog_to_mole(x, 0).unwrap();
        assert!((mole - expected).abs() < 1e-14);
        let water_in_gas = fs.convert_xgw_to_mole(0.5, 0).unwrap();
        let expected = (0.5 / 18e-3) / (0.5 / 18e-3 + 0.5 / mg);
        assert!((water_in_gas - expected).abs() < 1e-14);
    }

    #[test]
    fn mole_conversions_need_init() {
        let mut fs = FluidSystem::new(1);
        fs.set_reference_densities(800.0, 1000.0, 0.9, 0).unwrap();
        assert_eq!(
            fs.convert_xog_to_mole(0.1, 0).unwrap_err(),
            FluidSystemError::NotInitialized
        );
        assert!(fs.convert_xog_to_rs(0.1, 0).is_ok());
        assert!(fs.convert_xog_to_rs(0.1, 1).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn system(rho_o: Real, rho_w: Real, rho_g: Real) -> FluidSystem {
        let mut fs = FluidSystem::new(1);
        fs.set_reference_densities(rho_o, rho_w, rho_g, 0).unwrap();
        fs.init_end().unwrap();
        fs
    }

    fn close(a: Real, b: Real) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1e-12)
    }

    proptest! {
        #[test]
        fn ratio_round_trips(
            r in 0.0..500.0f64,
            rho_o in 600.0..950.0f64,
            rho_w in 990.0..1200.0f64,
            rho_g in 0.5..2.0f64,
        ) {
            let fs = system(rho_o, rho_w, rho_g);
            let rs = fs.convert_xog_to_rs(fs.convert_rs_to_xog(r, 0).unwrap(), 0).unwrap();
            prop_assert!(close(rs, r));
            let rsw = fs.convert_xwg_to_rsw(fs.convert_rsw_to_xwg(r, 0).unwrap(), 0).unwrap();
            prop_assert!(close(rsw, r));
            let rv = r * 1e-4;
            let back = fs.convert_xgo_to_rv(fs.convert_rv_to_xgo(rv, 0).unwrap(), 0).unwrap();
            prop_assert!(close(back, rv));
            let back = fs.convert_xgw_to_rvw(fs.convert_rvw_to_xgw(rv, 0).unwrap(), 0).unwrap();
            prop_assert!(close(back, rv));
        }

        #[test]
        fn mole_round_trips(x in 0.0..0.99f64, rho_g in 0.5..2.0f64) {
            let fs = system(800.0, 1000.0, rho_g);
            let back = fs.convert_mole_to_xog(fs.convert_xog_to_mole(x, 0).unwrap(), 0).unwrap();
            prop_assert!(close(back, x));
            let back = fs.convert_mole_to_xgo(fs.convert_xgo_to_mole(x, 0).unwrap(), 0).unwrap();
            prop_assert!(close(back, x));
            let back = fs.convert_mole_to_xgw(fs.convert_xgw_to_mole(x, 0).unwrap(), 0).unwrap();
            prop_assert!(close(back, x));
            let back = fs.convert_mole_to_xwg(fs.convert_xwg_to_mole(x, 0).unwrap(), 0).unwrap();
            prop_assert!(close(back, x));
        }

        #[test]
        fn mass_fractions_stay_in_unit_interval(r in 0.0..1e4f64) {
            let fs = system(800.0, 1000.0, 0.9);
            let x = fs.convert_rs_to_xog(r, 0).unwrap();
            prop_assert!((0.0..1.0).contains(&x));
        }
    }
}
