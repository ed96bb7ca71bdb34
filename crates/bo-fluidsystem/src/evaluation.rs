//! Phase properties of a fluid state.
//!
//! Every evaluation reads pressure and temperature of the requested phase,
//! resolves the composition ratios the enabled features need and forwards
//! to the phase laws. The formation volume factor and viscosity switch to
//! the saturated relations when the phase coexists with the phase its solute
//! comes from and the ratio is within `SATURATION_EPSILON` of saturation.

use crate::error::{FluidSystemError, FluidSystemResult};
use crate::fluid_state::FluidState;
use crate::fluid_system::FluidSystem;
use crate::parameter_cache::ParameterCache;
use bo_core::{CompIdx, NUM_PHASES, PhaseIdx, Real, at_saturation};
use bo_pvt::{GasPvtLaw, OilPvtLaw, WaterPvtLaw};

/// Fugacity scaling that keeps a component out of a phase it cannot enter.
const IMMISCIBLE: Real = 1e6;

/// Ratios of an undersaturated phase, or `None` for the saturated relations.
type Branch<R> = Option<R>;

impl FluidSystem {
    fn oil_branch<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        region: usize,
        t: Real,
        p: Real,
    ) -> FluidSystemResult<Branch<Real>> {
        if !self.enable_dissolved_gas {
            return Ok(Some(0.0));
        }
        let rs = self.rs_of(fs, region)?;
        if self.use_saturated_tables
            && fs.saturation(PhaseIdx::Gas) > 0.0
            && at_saturation(rs, self.oil_pvt.saturated_gas_dissolution_factor(region, t, p)?)
        {
            Ok(None)
        } else {
            Ok(Some(rs))
        }
    }

    fn gas_branch<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        region: usize,
        t: Real,
        p: Real,
    ) -> FluidSystemResult<Branch<(Real, Real)>> {
        let saturated_tables = self.use_saturated_tables;
        match (self.enable_vaporized_oil, self.enable_vaporized_water) {
            (true, true) => {
                let rvw = self.rvw_of(fs, region)?;
                let rv = self.rv_of(fs, region)?;
                if saturated_tables
                    && fs.saturation(PhaseIdx::Water) > 0.0
                    && at_saturation(rvw, self.gas_pvt.saturated_water_vaporization_factor(region, t, p)?)
                    && fs.saturation(PhaseIdx::Oil) > 0.0
                    && at_saturation(rv, self.gas_pvt.saturated_oil_vaporization_factor(region, t, p)?)
                {
                    Ok(None)
                } else {
                    Ok(Some((rv, rvw)))
                }
            }
            (true, false) => {
                let rv = self.rv_of(fs, region)?;
                if saturated_tables
                    && fs.saturation(PhaseIdx::Oil) > 0.0
                    && at_saturation(rv, self.gas_pvt.saturated_oil_vaporization_factor(region, t, p)?)
                {
                    Ok(None)
                } else {
                    Ok(Some((rv, 0.0)))
                }
            }
            (false, true) => {
                let rvw = self.rvw_of(fs, region)?;
                if saturated_tables
                    && fs.saturation(PhaseIdx::Water) > 0.0
                    && at_saturation(rvw, self.gas_pvt.saturated_water_vaporization_factor(region, t, p)?)
                {
                    Ok(None)
                } else {
                    Ok(Some((0.0, rvw)))
                }
            }
            (false, false) => Ok(Some((0.0, 0.0))),
        }
    }

    fn water_branch<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        region: usize,
        t: Real,
        p: Real,
        salt: Real,
    ) -> FluidSystemResult<Branch<Real>> {
        if !self.enable_dissolved_gas_in_water {
            return Ok(Some(0.0));
        }
        let rsw = self.rsw_of(fs, region)?;
        if self.use_saturated_tables
            && fs.saturation(PhaseIdx::Gas) > 0.0
            && at_saturation(
                rsw,
                self.water_pvt.saturated_gas_dissolution_factor(region, t, p, salt)?,
            )
        {
            Ok(None)
        } else {
            Ok(Some(rsw))
        }
    }

    /// Phase density [kg/m³] from the surface densities and the actual
    /// composition ratios.
    pub fn density<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        phase: PhaseIdx,
        region: usize,
    ) -> FluidSystemResult<Real> {
        self.check_eval(region)?;
        let p = fs.pressure(phase);
        let t = fs.temperature(phase);
        let rho_o = self.rho_ref(PhaseIdx::Oil, region);
        let rho_w = self.rho_ref(PhaseIdx::Water, region);
        let rho_g = self.rho_ref(PhaseIdx::Gas, region);

        match phase {
            PhaseIdx::Oil => {
                if self.enable_dissolved_gas {
                    let rs = self.rs_of(fs, region)?;
                    let bo = self.oil_pvt.inverse_formation_volume_factor(region, t, p, rs)?;
                    Ok(bo * rho_o + rs * bo * rho_g)
                } else {
                    let bo = self.oil_pvt.inverse_formation_volume_factor(region, t, p, 0.0)?;
                    Ok(rho_o * bo)
                }
            }
            PhaseIdx::Gas => {
                let rv = self.active_rv(fs, region)?;
                let rvw = self.active_rvw(fs, region)?;
                let bg = self.gas_pvt.inverse_formation_volume_factor(region, t, p, rv, rvw)?;
                Ok(gas_density(
                    bg,
                    rho_g,
                    self.enable_vaporized_oil.then_some((rv, rho_o)),
                    self.enable_vaporized_water.then_some((rvw, rho_w)),
                ))
            }
            PhaseIdx::Water => {
                let salt = Self::salt_of(fs);
                if self.enable_dissolved_gas_in_water {
                    let rsw = self.rsw_of(fs, region)?;
                    let bw = self
                        .water_pvt
                        .inverse_formation_volume_factor(region, t, p, rsw, salt)?;
                    Ok(bw * rho_w + rsw * bw * rho_g)
                } else {
                    let bw = self
                        .water_pvt
                        .inverse_formation_volume_factor(region, t, p, 0.0, salt)?;
                    Ok(rho_w * bw)
                }
            }
        }
    }

    /// Density of the phase saturated with its solute at the state's (T, p).
    pub fn saturated_density<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        phase: PhaseIdx,
        region: usize,
    ) -> FluidSystemResult<Real> {
        self.check_eval(region)?;
        let p = fs.pressure(phase);
        let t = fs.temperature(phase);
        let rho_o = self.rho_ref(PhaseIdx::Oil, region);
        let rho_w = self.rho_ref(PhaseIdx::Water, region);
        let rho_g = self.rho_ref(PhaseIdx::Gas, region);

        match phase {
            PhaseIdx::Oil => {
                if self.enable_dissolved_gas {
                    let rs = self.saturated_dissolution_factor(fs, PhaseIdx::Oil, region)?;
                    let bo = self.oil_pvt.inverse_formation_volume_factor(region, t, p, rs)?;
                    Ok(bo * rho_o + rs * bo * rho_g)
                } else {
                    let bo = self.oil_pvt.inverse_formation_volume_factor(region, t, p, 0.0)?;
                    Ok(rho_o * bo)
                }
            }
            PhaseIdx::Gas => {
                let rv = if self.enable_vaporized_oil {
                    self.saturated_dissolution_factor(fs, PhaseIdx::Gas, region)?
                } else {
                    0.0
                };
                let rvw = if self.enable_vaporized_water {
                    self.saturated_vaporization_factor(fs, PhaseIdx::Gas, region)?
                } else {
                    0.0
                };
                let bg = self.gas_pvt.inverse_formation_volume_factor(region, t, p, rv, rvw)?;
                Ok(gas_density(
                    bg,
                    rho_g,
                    self.enable_vaporized_oil.then_some((rv, rho_o)),
                    self.enable_vaporized_water.then_some((rvw, rho_w)),
                ))
            }
            PhaseIdx::Water => {
                let salt = Self::salt_of(fs);
                if self.enable_dissolved_gas_in_water {
                    let rsw = self.saturated_dissolution_factor(fs, PhaseIdx::Water, region)?;
                    let bw = self
                        .water_pvt
                        .inverse_formation_volume_factor(region, t, p, rsw, salt)?;
                    Ok(bw * rho_w + rsw * bw * rho_g)
                } else {
                    let bw = self
                        .water_pvt
                        .inverse_formation_volume_factor(region, t, p, 0.0, salt)?;
                    Ok(rho_w * bw)
                }
            }
        }
    }

    /// B⁻¹ of the phase, saturated or undersaturated depending on the state.
    pub fn inverse_formation_volume_factor<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        phase: PhaseIdx,
        region: usize,
    ) -> FluidSystemResult<Real> {
        self.check_eval(region)?;
        let p = fs.pressure(phase);
        let t = fs.temperature(phase);
        let value = match phase {
            PhaseIdx::Oil => match self.oil_branch(fs, region, t, p)? {
                None => self.oil_pvt.saturated_inverse_formation_volume_factor(region, t, p)?,
                Some(rs) => self.oil_pvt.inverse_formation_volume_factor(region, t, p, rs)?,
            },
            PhaseIdx::Gas => match self.gas_branch(fs, region, t, p)? {
                None => self.gas_pvt.saturated_inverse_formation_volume_factor(region, t, p)?,
                Some((rv, rvw)) => self
                    .gas_pvt
                    .inverse_formation_volume_factor(region, t, p, rv, rvw)?,
            },
            PhaseIdx::Water => {
                let salt = Self::salt_of(fs);
                match self.water_branch(fs, region, t, p, salt)? {
                    None => self
                        .water_pvt
                        .saturated_inverse_formation_volume_factor(region, t, p, salt)?,
                    Some(rsw) => self
                        .water_pvt
                        .inverse_formation_volume_factor(region, t, p, rsw, salt)?,
                }
            }
        };
        Ok(value)
    }

    /// B⁻¹ of the phase at saturation.
    pub fn saturated_inverse_formation_volume_factor<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        phase: PhaseIdx,
        region: usize,
    ) -> FluidSystemResult<Real> {
        self.check_eval(region)?;
        let p = fs.pressure(phase);
        let t = fs.temperature(phase);
        let value = match phase {
            PhaseIdx::Oil => self.oil_pvt.saturated_inverse_formation_volume_factor(region, t, p)?,
            PhaseIdx::Gas => self.gas_pvt.saturated_inverse_formation_volume_factor(region, t, p)?,
            PhaseIdx::Water => self.water_pvt.saturated_inverse_formation_volume_factor(
                region,
                t,
                p,
                Self::salt_of(fs),
            )?,
        };
        Ok(value)
    }

    /// Dynamic viscosity [Pa·s], same branch selection as the formation
    /// volume factor.
    pub fn viscosity<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        phase: PhaseIdx,
        region: usize,
    ) -> FluidSystemResult<Real> {
        self.check_eval(region)?;
        let p = fs.pressure(phase);
        let t = fs.temperature(phase);
        let value = match phase {
            PhaseIdx::Oil => match self.oil_branch(fs, region, t, p)? {
                None => self.oil_pvt.saturated_viscosity(region, t, p)?,
                Some(rs) => self.oil_pvt.viscosity(region, t, p, rs)?,
            },
            PhaseIdx::Gas => match self.gas_branch(fs, region, t, p)? {
                None => self.gas_pvt.saturated_viscosity(region, t, p)?,
                Some((rv, rvw)) => self.gas_pvt.viscosity(region, t, p, rv, rvw)?,
            },
            PhaseIdx::Water => {
                let salt = Self::salt_of(fs);
                match self.water_branch(fs, region, t, p, salt)? {
                    None => self.water_pvt.saturated_viscosity(region, t, p, salt)?,
                    Some(rsw) => self.water_pvt.viscosity(region, t, p, rsw, salt)?,
                }
            }
        };
        Ok(value)
    }

    /// Specific internal energy [J/kg].
    ///
    /// Laws that leave the mixing energy to the fluid system get the total
    /// energy of the phase divided by its density.
    pub fn internal_energy<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        phase: PhaseIdx,
        region: usize,
    ) -> FluidSystemResult<Real> {
        self.check_eval(region)?;
        let p = fs.pressure(phase);
        let t = fs.temperature(phase);
        match phase {
            PhaseIdx::Oil if !self.oil_pvt.mixing_energy() => {
                let rs = self.energy_rs(fs, region)?;
                return Ok(self.oil_pvt.internal_energy(region, t, p, rs)?);
            }
            PhaseIdx::Gas if !self.gas_pvt.mixing_energy() => {
                let rv = self.energy_rv(fs, region)?;
                let rvw = self.energy_rvw(fs, region)?;
                return Ok(self.gas_pvt.internal_energy(region, t, p, rv, rvw)?);
            }
            PhaseIdx::Water if !self.water_pvt.mixing_energy() => {
                let rsw = self.energy_rsw(fs, region)?;
                let salt = Self::salt_of(fs);
                return Ok(self.water_pvt.internal_energy(region, t, p, rsw, salt)?);
            }
            _ => {}
        }
        Ok(self.internal_mixing_total_energy(fs, phase, region)? / self.density(fs, phase, region)?)
    }

    /// Internal energy per unit volume of the phase [J/m³], including the
    /// latent heat of the dissolved or vaporized component.
    ///
    /// Gas dissolved in oil carries `u_gas - hvap_gas`; oil and water
    /// vaporized into gas carry `u + hvap` of their own phase. The component
    /// energies see the ratios stored in the state, while formation volume
    /// factors of a disabled feature are taken at zero. Gas dissolved in
    /// water is counted at the saturated Rsw.
    pub fn internal_mixing_total_energy<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        phase: PhaseIdx,
        region: usize,
    ) -> FluidSystemResult<Real> {
        self.check_eval(region)?;
        let p = fs.pressure(phase);
        let t = fs.temperature(phase);
        let rho_o = self.rho_ref(PhaseIdx::Oil, region);
        let rho_w = self.rho_ref(PhaseIdx::Water, region);
        let rho_g = self.rho_ref(PhaseIdx::Gas, region);
        let salt = Self::salt_of(fs);

        match phase {
            PhaseIdx::Oil => {
                let rs = self.active_rs(fs, region)?;
                let uo = self
                    .oil_pvt
                    .internal_energy(region, t, p, self.energy_rs(fs, region)?)?;
                let bo = self.oil_pvt.inverse_formation_volume_factor(region, t, p, rs)?;
                if self.enable_dissolved_gas {
                    let ug = self.gas_internal_energy(fs, region, t, p)?;
                    let hvap_g = self.gas_pvt.hvap(region)?;
                    Ok(uo * bo * rho_o + (ug - hvap_g) * rs * bo * rho_g)
                } else {
                    Ok(uo * rho_o * bo)
                }
            }
            PhaseIdx::Gas => {
                let rv = self.active_rv(fs, region)?;
                let rvw = self.active_rvw(fs, region)?;
                let ug = self.gas_internal_energy(fs, region, t, p)?;
                let bg = self.gas_pvt.inverse_formation_volume_factor(region, t, p, rv, rvw)?;
                let mut total = ug * bg * rho_g;
                if self.enable_vaporized_oil {
                    let uo = self
                        .oil_pvt
                        .internal_energy(region, t, p, self.energy_rs(fs, region)?)?;
                    let hvap_o = self.oil_pvt.hvap(region)?;
                    total += (uo + hvap_o) * rv * bg * rho_o;
                }
                if self.enable_vaporized_water {
                    let uw = self.water_pvt.internal_energy(
                        region,
                        t,
                        p,
                        self.energy_rsw(fs, region)?,
                        salt,
                    )?;
                    let hvap_w = self.water_pvt.hvap(region)?;
                    total += (uw + hvap_w) * rvw * bg * rho_w;
                }
                Ok(total)
            }
            PhaseIdx::Water => {
                let uw = self
                    .water_pvt
                    .internal_energy(region, t, p, self.energy_rsw(fs, region)?, salt)?;
                if self.enable_dissolved_gas_in_water {
                    let rsw_sat = self.saturated_dissolution_factor(fs, PhaseIdx::Water, region)?;
                    let bw = self
                        .water_pvt
                        .inverse_formation_volume_factor(region, t, p, rsw_sat, salt)?;
                    let ug = self.gas_internal_energy(fs, region, t, p)?;
                    Ok(uw * bw * rho_w + ug * rsw_sat * bw * rho_g)
                } else {
                    let bw = self
                        .water_pvt
                        .inverse_formation_volume_factor(region, t, p, 0.0, salt)?;
                    Ok(uw * rho_w * bw)
                }
            }
        }
    }

    fn gas_internal_energy<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        region: usize,
        t: Real,
        p: Real,
    ) -> FluidSystemResult<Real> {
        let rv = self.energy_rv(fs, region)?;
        let rvw = self.energy_rvw(fs, region)?;
        Ok(self.gas_pvt.internal_energy(region, t, p, rv, rvw)?)
    }

    /// Specific enthalpy [J/kg]: `u + p/ρ`, or `u` when energy and enthalpy
    /// are configured to be equal.
    pub fn enthalpy<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        phase: PhaseIdx,
        region: usize,
    ) -> FluidSystemResult<Real> {
        let u = self.internal_energy(fs, phase, region)?;
        if self.enthalpy_eq_energy {
            return Ok(u);
        }
        Ok(u + fs.pressure(phase) / self.density(fs, phase, region)?)
    }

    /// Fugacity coefficient of `comp` in `phase`.
    ///
    /// Combinations the model treats as immiscible get a coefficient scaled
    /// by 1e6 instead of an error.
    pub fn fugacity_coefficient<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        phase: PhaseIdx,
        comp: CompIdx,
        region: usize,
    ) -> FluidSystemResult<Real> {
        self.check_eval(region)?;
        let p = fs.pressure(phase);
        let t = fs.temperature(phase);

        // pseudo vapour pressures of oil and water, ideal gas
        let phi_oo = 20e3 / p;
        let phi_gg = 1.0;
        let phi_ww = 30e3 / p;

        let value = match (phase, comp) {
            (PhaseIdx::Gas, CompIdx::Gas) => phi_gg,
            (PhaseIdx::Gas, CompIdx::Oil) => {
                if !self.enable_vaporized_oil {
                    return Ok(phi_gg * IMMISCIBLE);
                }
                let (x_go_sat, x_og_sat) = self.saturated_mole_fractions(region, t, p)?;
                let x_oo_sat = 1.0 - x_og_sat;
                let p_o = fs.pressure(PhaseIdx::Oil);
                let p_g = fs.pressure(PhaseIdx::Gas);
                phi_oo * p_o * x_oo_sat / (p_g * x_go_sat)
            }
            (PhaseIdx::Gas, CompIdx::Water) => phi_gg * IMMISCIBLE,
            (PhaseIdx::Oil, CompIdx::Oil) => phi_oo,
            (PhaseIdx::Oil, CompIdx::Gas) => {
                if !self.enable_dissolved_gas {
                    return Ok(phi_oo * IMMISCIBLE);
                }
                let (x_go_sat, x_og_sat) = self.saturated_mole_fractions(region, t, p)?;
                let x_gg_sat = 1.0 - x_go_sat;
                let p_o = fs.pressure(PhaseIdx::Oil);
                let p_g = fs.pressure(PhaseIdx::Gas);
                phi_gg * p_g * x_gg_sat / (p_o * x_og_sat)
            }
            (PhaseIdx::Oil, CompIdx::Water) => phi_oo * IMMISCIBLE,
            (PhaseIdx::Water, CompIdx::Water) => phi_ww,
            (PhaseIdx::Water, CompIdx::Oil) => 1.1 * IMMISCIBLE * phi_ww,
            (PhaseIdx::Water, CompIdx::Gas) => IMMISCIBLE * phi_ww,
        };
        Ok(value)
    }

    /// Mole fractions of oil in saturated gas and gas in saturated oil.
    fn saturated_mole_fractions(&self, region: usize, t: Real, p: Real) -> FluidSystemResult<(Real, Real)> {
        let rv_sat = self.gas_pvt.saturated_oil_vaporization_factor(region, t, p)?;
        let x_go_sat = self.convert_xgo_to_mole(self.rv_to_xgo(rv_sat, region), region)?;
        let rs_sat = self.oil_pvt.saturated_gas_dissolution_factor(region, t, p)?;
        let x_og_sat = self.convert_xog_to_mole(self.rs_to_xog(rs_sat, region), region)?;
        Ok((x_go_sat, x_og_sat))
    }

    /// Rs of saturated oil, Rv of saturated gas or Rsw of saturated water.
    pub fn saturated_dissolution_factor<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        phase: PhaseIdx,
        region: usize,
    ) -> FluidSystemResult<Real> {
        self.check_eval(region)?;
        let p = fs.pressure(phase);
        let t = fs.temperature(phase);
        let value = match phase {
            PhaseIdx::Oil => self.oil_pvt.saturated_gas_dissolution_factor(region, t, p)?,
            PhaseIdx::Gas => self.gas_pvt.saturated_oil_vaporization_factor(region, t, p)?,
            PhaseIdx::Water => self.water_pvt.saturated_gas_dissolution_factor(
                region,
                t,
                p,
                Self::salt_of(fs),
            )?,
        };
        Ok(value)
    }

    /// Like [`saturated_dissolution_factor`](Self::saturated_dissolution_factor)
    /// but damped by the oil saturation history (VAPPARS).
    pub fn saturated_dissolution_factor_with_history<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        phase: PhaseIdx,
        region: usize,
        max_oil_saturation: Real,
    ) -> FluidSystemResult<Real> {
        self.check_eval(region)?;
        let p = fs.pressure(phase);
        let t = fs.temperature(phase);
        let so = if phase == PhaseIdx::Water {
            0.0
        } else {
            fs.saturation(PhaseIdx::Oil)
        };
        let value = match phase {
            PhaseIdx::Oil => self.oil_pvt.saturated_gas_dissolution_factor_with_history(
                region,
                t,
                p,
                so,
                max_oil_saturation,
            )?,
            PhaseIdx::Gas => self.gas_pvt.saturated_oil_vaporization_factor_with_history(
                region,
                t,
                p,
                so,
                max_oil_saturation,
            )?,
            PhaseIdx::Water => self.water_pvt.saturated_gas_dissolution_factor(
                region,
                t,
                p,
                Self::salt_of(fs),
            )?,
        };
        Ok(value)
    }

    /// Rvw of saturated gas; zero for the liquid phases.
    pub fn saturated_vaporization_factor<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        phase: PhaseIdx,
        region: usize,
    ) -> FluidSystemResult<Real> {
        self.check_eval(region)?;
        match phase {
            PhaseIdx::Gas => Ok(self.gas_pvt.saturated_water_vaporization_factor_salt(
                region,
                fs.temperature(phase),
                fs.pressure(phase),
                Self::salt_of(fs),
            )?),
            PhaseIdx::Oil | PhaseIdx::Water => Ok(0.0),
        }
    }

    /// Pressure at which the phase with the state's composition is saturated.
    pub fn saturation_pressure<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        phase: PhaseIdx,
        region: usize,
    ) -> FluidSystemResult<Real> {
        self.check_eval(region)?;
        let t = fs.temperature(phase);
        let value = match phase {
            PhaseIdx::Oil => self
                .oil_pvt
                .saturation_pressure(region, t, self.rs_of(fs, region)?)?,
            PhaseIdx::Gas => self
                .gas_pvt
                .saturation_pressure(region, t, self.rv_of(fs, region)?)?,
            PhaseIdx::Water => self.water_pvt.saturation_pressure(
                region,
                t,
                self.rsw_of(fs, region)?,
                Self::salt_of(fs),
            )?,
        };
        Ok(value)
    }

    pub fn bubble_point_pressure<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        region: usize,
    ) -> FluidSystemResult<Real> {
        self.saturation_pressure(fs, PhaseIdx::Oil, region)
    }

    pub fn dew_point_pressure<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        region: usize,
    ) -> FluidSystemResult<Real> {
        self.saturation_pressure(fs, PhaseIdx::Gas, region)
    }

    /// Diffusion coefficient [m²/s] of `comp` in `phase`: zero with diffusion
    /// disabled, the configured value if any was set, else the phase law's.
    pub fn diffusion_coefficient<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        phase: PhaseIdx,
        comp: CompIdx,
        region: usize,
    ) -> FluidSystemResult<Real> {
        self.check_eval(region)?;
        if !self.enable_diffusion {
            return Ok(0.0);
        }
        if let Some(d) = self.stored_diffusion_coefficient(comp, phase, region)? {
            return Ok(d);
        }
        let p = fs.pressure(phase);
        let t = fs.temperature(phase);
        let value = match phase {
            PhaseIdx::Oil => self.oil_pvt.diffusion_coefficient(t, p, comp)?,
            PhaseIdx::Gas => self.gas_pvt.diffusion_coefficient(t, p, comp)?,
            PhaseIdx::Water => self.water_pvt.diffusion_coefficient(t, p, comp)?,
        };
        Ok(value)
    }

    /// Value set with `set_diffusion_coefficient`, `None` if none was set.
    pub fn stored_diffusion_coefficient(
        &self,
        comp: CompIdx,
        phase: PhaseIdx,
        region: usize,
    ) -> FluidSystemResult<Option<Real>> {
        self.check_region(region)?;
        Ok(self
            .diffusion_coefficients
            .get(region)
            .map(|d| d[NUM_PHASES * comp.index() + phase.index()]))
    }

    // ---- parameter cache variants -------------------------------------------

    pub fn density_cached<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        cache: &ParameterCache,
        phase: PhaseIdx,
    ) -> FluidSystemResult<Real> {
        self.density(fs, phase, cache.region_index())
    }

    pub fn inverse_formation_volume_factor_cached<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        cache: &ParameterCache,
        phase: PhaseIdx,
    ) -> FluidSystemResult<Real> {
        self.inverse_formation_volume_factor(fs, phase, cache.region_index())
    }

    pub fn viscosity_cached<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        cache: &ParameterCache,
        phase: PhaseIdx,
    ) -> FluidSystemResult<Real> {
        self.viscosity(fs, phase, cache.region_index())
    }

    pub fn internal_energy_cached<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        cache: &ParameterCache,
        phase: PhaseIdx,
    ) -> FluidSystemResult<Real> {
        self.internal_energy(fs, phase, cache.region_index())
    }

    pub fn enthalpy_cached<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        cache: &ParameterCache,
        phase: PhaseIdx,
    ) -> FluidSystemResult<Real> {
        self.enthalpy(fs, phase, cache.region_index())
    }

    pub fn fugacity_coefficient_cached<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        cache: &ParameterCache,
        phase: PhaseIdx,
        comp: CompIdx,
    ) -> FluidSystemResult<Real> {
        self.fugacity_coefficient(fs, phase, comp, cache.region_index())
    }

    /// Saturated ratio using the cache's oil saturation history.
    pub fn saturated_dissolution_factor_cached<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        cache: &ParameterCache,
        phase: PhaseIdx,
    ) -> FluidSystemResult<Real> {
        self.saturated_dissolution_factor_with_history(
            fs,
            phase,
            cache.region_index(),
            cache.max_oil_sat(),
        )
    }

    pub fn diffusion_coefficient_cached<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        cache: &ParameterCache,
        phase: PhaseIdx,
        comp: CompIdx,
    ) -> FluidSystemResult<Real> {
        self.diffusion_coefficient(fs, phase, comp, cache.region_index())
    }

    /// Raw-index entry point for [`density`](Self::density).
    pub fn density_by_index<S: FluidState + ?Sized>(
        &self,
        fs: &S,
        phase: usize,
        region: usize,
    ) -> FluidSystemResult<Real> {
        let phase = PhaseIdx::try_from(phase).map_err(FluidSystemError::from)?;
        self.density(fs, phase, region)
    }
}

/// `bg·ρg` plus the vaporized oil and water terms that are enabled.
fn gas_density(bg: Real, rho_g: Real, oil: Option<(Real, Real)>, water: Option<(Real, Real)>) -> Real {
    let mut rho = bg * rho_g;
    if let Some((rv, rho_o)) = oil {
        rho += rv * bg * rho_o;
    }
    if let Some((rvw, rho_w)) = water {
        rho += rvw * bg * rho_w;
    }
    rho
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fluid_state::SimpleFluidState;
    use bo_pvt::{DeadOilPvt, DryGasPvt, LiveOilPvt, PvdRow, PvtxRecord, PvtxSample};

    fn live_oil_system() -> FluidSystem {
        let pvto = vec![
            PvtxRecord::new(
                20.0,
                vec![PvtxSample::new(5e6, 1.10, 1.2e-3), PvtxSample::new(2e7, 1.08, 1.4e-3)],
            ),
            PvtxRecord::new(
                120.0,
                vec![PvtxSample::new(2e7, 1.35, 0.7e-3), PvtxSample::new(3e7, 1.33, 0.8e-3)],
            ),
        ];
        let pvdg = vec![PvdRow::new(1e6, 0.1, 1.2e-5), PvdRow::new(3e7, 0.004, 2.5e-5)];
        let mut fs = FluidSystem::new(1);
        fs.set_reference_densities(800.0, 1000.0, 0.9, 0).unwrap();
        fs.set_oil_pvt(LiveOilPvt::from_regions(&[pvto]).unwrap().into());
        fs.set_gas_pvt(DryGasPvt::from_regions(&[pvdg]).unwrap().into());
        fs.init_end().unwrap();
        fs
    }

    #[test]
    fn evaluation_needs_init() {
        let fs = FluidSystem::new(1);
        let state = SimpleFluidState::new(1e7, 350.0);
        assert_eq!(
            fs.density(&state, PhaseIdx::Oil, 0).unwrap_err(),
            FluidSystemError::NotInitialized
        );
    }

    #[test]
    fn missing_phase_law_is_a_configuration_error() {
        let fs = live_oil_system();
        let state = SimpleFluidState::new(1e7, 350.0);
        let err = fs.density(&state, PhaseIdx::Water, 0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "PVT error: Not implemented: Water PVT of this deck!"
        );
    }

    #[test]
    fn missing_composition() {
        let fs = live_oil_system();
        let state = SimpleFluidState::new(1e7, 350.0);
        assert_eq!(
            fs.density(&state, PhaseIdx::Oil, 0).unwrap_err(),
            FluidSystemError::MissingComposition { what: "Rs" }
        );
        // dry gas needs no composition
        assert!(fs.density(&state, PhaseIdx::Gas, 0).is_ok());
    }

    #[test]
    fn ratio_from_mass_fraction() {
        let fs = live_oil_system();
        let rs = 50.0;
        let x = fs.convert_rs_to_xog(rs, 0).unwrap();
        let by_ratio = SimpleFluidState::new(2e7, 350.0).with_rs(rs);
        let by_fraction =
            SimpleFluidState::new(2e7, 350.0).with_mass_fraction(PhaseIdx::Oil, CompIdx::Gas, x);
        let a = fs.density(&by_ratio, PhaseIdx::Oil, 0).unwrap();
        let b = fs.density(&by_fraction, PhaseIdx::Oil, 0).unwrap();
        assert!((a - b).abs() < 1e-9 * a);
    }

    #[test]
    fn undersaturated_oil_without_free_gas() {
        let fs = live_oil_system();
        let rs_sat = fs
            .saturated_dissolution_factor(&SimpleFluidState::new(2e7, 350.0), PhaseIdx::Oil, 0)
            .unwrap();
        // at saturation but no free gas: the general relation is used
        let state = SimpleFluidState::new(2e7, 350.0).with_rs(rs_sat);
        let b = fs
            .inverse_formation_volume_factor(&state, PhaseIdx::Oil, 0)
            .unwrap();
        let expected = fs
            .oil_pvt()
            .inverse_formation_volume_factor(0, 350.0, 2e7, rs_sat)
            .unwrap();
        assert_eq!(b, expected);
    }

    #[test]
    fn fugacity_sentinels() {
        let mut fs = live_oil_system();
        fs.set_enable_dissolved_gas(false);
        let p = 2e7;
        let state = SimpleFluidState::new(p, 350.0);
        let phi = |phase, comp| fs.fugacity_coefficient(&state, phase, comp, 0).unwrap();
        assert_eq!(phi(PhaseIdx::Gas, CompIdx::Gas), 1.0);
        assert_eq!(phi(PhaseIdx::Gas, CompIdx::Oil), 1e6);
        assert_eq!(phi(PhaseIdx::Gas, CompIdx::Water), 1e6);
        assert_eq!(phi(PhaseIdx::Oil, CompIdx::Oil), 20e3 / p);
        assert_eq!(phi(PhaseIdx::Oil, CompIdx::Gas), 20e3 / p * 1e6);
        assert_eq!(phi(PhaseIdx::Oil, CompIdx::Water), 20e3 / p * 1e6);
        assert_eq!(phi(PhaseIdx::Water, CompIdx::Water), 30e3 / p);
        assert_eq!(phi(PhaseIdx::Water, CompIdx::Oil), 1.1e6 * (30e3 / p));
        assert_eq!(phi(PhaseIdx::Water, CompIdx::Gas), 1e6 * (30e3 / p));
    }

    #[test]
    fn gas_in_oil_fugacity_follows_saturation() {
        let fs = live_oil_system();
        let state = SimpleFluidState::new(2e7, 350.0);
        let phi = fs
            .fugacity_coefficient(&state, PhaseIdx::Oil, CompIdx::Gas, 0)
            .unwrap();
        // dry gas: x_gG = 1, so phi = p_g / (p_o x_oG) = 1 / x_oG
        let x = fs.convert_rs_to_xog(120.0, 0).unwrap();
        let x_og = fs.convert_xog_to_mole(x, 0).unwrap();
        assert!((phi - 1.0 / x_og).abs() < 1e-9 * phi);
    }

    #[test]
    fn vaporization_factor_of_liquids_is_zero() {
        let fs = live_oil_system();
        let state = SimpleFluidState::new(2e7, 350.0);
        assert_eq!(
            fs.saturated_vaporization_factor(&state, PhaseIdx::Oil, 0).unwrap(),
            0.0
        );
        assert_eq!(
            fs.saturated_vaporization_factor(&state, PhaseIdx::Water, 0).unwrap(),
            0.0
        );
        assert_eq!(
            fs.saturated_vaporization_factor(&state, PhaseIdx::Gas, 0).unwrap(),
            0.0
        );
    }

    #[test]
    fn bubble_point_inverts_rs() {
        let fs = live_oil_system();
        let state = SimpleFluidState::new(2e7, 350.0).with_rs(120.0);
        let pb = fs.bubble_point_pressure(&state, 0).unwrap();
        assert!((pb - 2e7).abs() < 1.0);
        assert!(fs.dew_point_pressure(&state, 0).is_err());
    }

    #[test]
    fn diffusion_sources() {
        let mut fs = live_oil_system();
        let state = SimpleFluidState::new(2e7, 350.0);
        assert_eq!(
            fs.diffusion_coefficient(&state, PhaseIdx::Oil, CompIdx::Gas, 0).unwrap(),
            0.0
        );
        fs.set_enable_diffusion(true);
        assert!(
            fs.diffusion_coefficient(&state, PhaseIdx::Oil, CompIdx::Gas, 0)
                .unwrap_err()
                .to_string()
                .contains("diffusionCoefficient")
        );
        fs.set_diffusion_coefficient(2e-9, CompIdx::Gas, PhaseIdx::Oil, 0)
            .unwrap();
        assert_eq!(
            fs.diffusion_coefficient(&state, PhaseIdx::Oil, CompIdx::Gas, 0).unwrap(),
            2e-9
        );
        let cache = ParameterCache::default();
        assert_eq!(
            fs.diffusion_coefficient_cached(&state, &cache, PhaseIdx::Water, CompIdx::Oil)
                .unwrap(),
            0.0
        );
    }

    #[test]
    fn region_out_of_range() {
        let fs = live_oil_system();
        let state = SimpleFluidState::new(2e7, 350.0).with_rs(10.0);
        assert_eq!(
            fs.viscosity(&state, PhaseIdx::Oil, 1).unwrap_err(),
            FluidSystemError::RegionOutOfRange {
                region: 1,
                num_regions: 1
            }
        );
        assert!(matches!(
            fs.density_by_index(&state, 5, 0),
            Err(FluidSystemError::UnhandledIndex { what: "phase", index: 5 })
        ));
    }

    #[test]
    fn enthalpy_adds_flow_work() {
        let table = vec![PvdRow::new(1e5, 1.2, 1e-3), PvdRow::new(3e7, 1.1, 1.5e-3)];
        let dead = DeadOilPvt::from_regions(&[table]).unwrap();
        let mut thermal = bo_pvt::ThermalOilPvt::new(dead.into()).unwrap();
        thermal
            .set_specific_heat(0, &[300.0, 400.0], &[2000.0, 2000.0])
            .unwrap();
        let mut fs = FluidSystem::new(1);
        fs.set_enable_dissolved_gas(false);
        fs.set_reference_densities(800.0, 1000.0, 0.9, 0).unwrap();
        fs.set_oil_pvt(thermal.into());
        fs.init_end().unwrap();

        let state = SimpleFluidState::new(2e7, 350.0);
        let u = fs.internal_energy(&state, PhaseIdx::Oil, 0).unwrap();
        let rho = fs.density(&state, PhaseIdx::Oil, 0).unwrap();
        let h = fs.enthalpy(&state, PhaseIdx::Oil, 0).unwrap();
        assert!((h - (u + 2e7 / rho)).abs() < 1e-6);
        fs.set_energy_equal_enthalpy(true);
        assert_eq!(fs.enthalpy(&state, PhaseIdx::Oil, 0).unwrap(), u);
    }
}
