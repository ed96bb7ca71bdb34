use bo_core::PhaseIdx;
use bo_core::units::deck as units;
use bo_deck::{Deck, DeckError, build_fluid_system};
use bo_fluidsystem::{FluidSystem, FluidSystemError, SimpleFluidState};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "bo")]
#[command(about = "Black-oil PVT evaluation tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a deck, then print a summary
    Validate {
        /// Path to the deck (YAML or JSON)
        deck_path: PathBuf,
    },
    /// Evaluate the properties of one phase at a single state
    Eval {
        /// Path to the deck (YAML or JSON)
        deck_path: PathBuf,
        #[arg(long, value_enum)]
        phase: PhaseArg,
        #[arg(long)]
        pressure_bar: f64,
        #[arg(long)]
        temperature_c: f64,
        #[command(flatten)]
        composition: CompositionArgs,
    },
    /// Evaluate one phase over a pressure range
    Sweep {
        /// Path to the deck (YAML or JSON)
        deck_path: PathBuf,
        #[arg(long, value_enum)]
        phase: PhaseArg,
        /// Lowest pressure in bar
        #[arg(long)]
        p_min: f64,
        /// Highest pressure in bar
        #[arg(long)]
        p_max: f64,
        /// Number of pressure points, at least 2
        #[arg(long, default_value_t = 20)]
        steps: usize,
        /// Temperature in °C (defaults to the reservoir temperature)
        #[arg(long)]
        temperature_c: Option<f64>,
        #[command(flatten)]
        composition: CompositionArgs,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

#[derive(Args, Clone, Copy)]
struct CompositionArgs {
    /// Dissolved gas-oil ratio
    #[arg(long)]
    rs: Option<f64>,
    /// Vaporized oil-gas ratio
    #[arg(long)]
    rv: Option<f64>,
    /// Dissolved gas-water ratio
    #[arg(long)]
    rsw: Option<f64>,
    /// Vaporized water-gas ratio
    #[arg(long)]
    rvw: Option<f64>,
    /// Salt concentration in kg/m³
    #[arg(long)]
    salt: Option<f64>,
    /// Gas saturation
    #[arg(long)]
    sg: Option<f64>,
    #[arg(long, default_value_t = 0)]
    region: usize,
}

#[derive(Clone, Copy, ValueEnum)]
enum PhaseArg {
    Oil,
    Gas,
    Water,
}

impl From<PhaseArg> for PhaseIdx {
    fn from(p: PhaseArg) -> Self {
        match p {
            PhaseArg::Oil => PhaseIdx::Oil,
            PhaseArg::Gas => PhaseIdx::Gas,
            PhaseArg::Water => PhaseIdx::Water,
        }
    }
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error(transparent)]
    FluidSystem(#[from] FluidSystemError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Usage(String),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { deck_path } => cmd_validate(&deck_path),
        Commands::Eval {
            deck_path,
            phase,
            pressure_bar,
            temperature_c,
            composition,
        } => cmd_eval(
            &deck_path,
            phase.into(),
            pressure_bar,
            temperature_c,
            composition,
        ),
        Commands::Sweep {
            deck_path,
            phase,
            p_min,
            p_max,
            steps,
            temperature_c,
            composition,
            csv,
        } => cmd_sweep(
            &deck_path,
            phase.into(),
            (p_min, p_max, steps),
            temperature_c,
            composition,
            csv.as_deref(),
        ),
    }
}

fn load_system(deck_path: &Path) -> CliResult<(Deck, FluidSystem)> {
    let deck = bo_deck::load(deck_path)?;
    let fs = build_fluid_system(&deck)?;
    Ok((deck, fs))
}

fn cmd_validate(deck_path: &Path) -> CliResult<()> {
    println!("Validating deck: {}", deck_path.display());
    let (deck, fs) = load_system(deck_path)?;
    println!("✓ Deck is valid");

    if !deck.title.is_empty() {
        println!("  Title:   {}", deck.title);
    }
    println!("  Units:   {:?}", deck.units);
    println!("  Regions: {}", fs.num_regions());
    println!("  Phases:");
    for phase in PhaseIdx::ALL {
        if !fs.phase_is_active(phase) {
            continue;
        }
        let approach = match phase {
            PhaseIdx::Oil => fs.oil_pvt().approach().name(),
            PhaseIdx::Gas => fs.gas_pvt().approach().name(),
            PhaseIdx::Water => fs.water_pvt().approach().name(),
        };
        let rho = fs.reference_density(phase, 0)?;
        println!("    {:<6} {:<30} ρ_ref = {:.4} kg/m³", phase.name(), approach, rho);
    }

    let mut features = Vec::new();
    for (on, name) in [
        (fs.enable_dissolved_gas(), "DISGAS"),
        (fs.enable_vaporized_oil(), "VAPOIL"),
        (fs.enable_dissolved_gas_in_water(), "DISGASW"),
        (fs.enable_vaporized_water(), "VAPWAT"),
        (fs.enable_diffusion(), "DIFFUSE"),
        (deck.runspec.thermal, "THERMAL"),
    ] {
        if on {
            features.push(name);
        }
    }
    if !features.is_empty() {
        println!("  Features: {}", features.join(" "));
    }
    println!(
        "  Reservoir temperature: {:.2} °C",
        units::kelvin_to_celsius(fs.reservoir_temperature())
    );
    Ok(())
}

fn build_state(p: f64, t: f64, c: CompositionArgs) -> SimpleFluidState {
    let mut state = SimpleFluidState::new(p, t);
    if let Some(rs) = c.rs {
        state = state.with_rs(rs);
    }
    if let Some(rv) = c.rv {
        state = state.with_rv(rv);
    }
    if let Some(rsw) = c.rsw {
        state = state.with_rsw(rsw);
    }
    if let Some(rvw) = c.rvw {
        state = state.with_rvw(rvw);
    }
    if let Some(salt) = c.salt {
        state = state.with_salt_concentration(salt);
    }
    if let Some(sg) = c.sg {
        state = state.with_saturation(PhaseIdx::Gas, sg);
    }
    state
}

/// Properties of one phase at one state, SI units.
#[derive(Debug, Clone, Copy)]
struct PhaseRow {
    pressure: f64,
    inverse_b: f64,
    density: f64,
    viscosity: f64,
    saturated_ratio: f64,
}

fn evaluate(
    fs: &FluidSystem,
    phase: PhaseIdx,
    p: f64,
    t: f64,
    c: CompositionArgs,
) -> CliResult<PhaseRow> {
    let state = build_state(p, t, c);
    Ok(PhaseRow {
        pressure: p,
        inverse_b: fs.inverse_formation_volume_factor(&state, phase, c.region)?,
        density: fs.density(&state, phase, c.region)?,
        viscosity: fs.viscosity(&state, phase, c.region)?,
        saturated_ratio: fs.saturated_dissolution_factor(&state, phase, c.region)?,
    })
}

fn ratio_label(phase: PhaseIdx) -> &'static str {
    match phase {
        PhaseIdx::Oil => "Rs_sat",
        PhaseIdx::Gas => "Rv_sat",
        PhaseIdx::Water => "Rsw_sat",
    }
}

fn cmd_eval(
    deck_path: &Path,
    phase: PhaseIdx,
    pressure_bar: f64,
    temperature_c: f64,
    composition: CompositionArgs,
) -> CliResult<()> {
    let (deck, fs) = load_system(deck_path)?;
    let p = units::bar_to_pa(pressure_bar);
    let t = units::celsius_to_kelvin(temperature_c);
    let row = evaluate(&fs, phase, p, t, composition)?;

    println!(
        "{} at {:.3} bar, {:.2} °C (region {}):",
        phase.name(),
        pressure_bar,
        temperature_c,
        composition.region
    );
    println!("  1/B:       {:.6}", row.inverse_b);
    println!("  Density:   {:.4} kg/m³", row.density);
    println!("  Viscosity: {:.6} cP", units::pa_s_to_centipoise(row.viscosity));
    println!("  {:<9}  {:.6}", format!("{}:", ratio_label(phase)), row.saturated_ratio);
    if phase == PhaseIdx::Gas && fs.enable_vaporized_water() {
        let state = build_state(p, t, composition);
        let rvw = fs.saturated_vaporization_factor(&state, phase, composition.region)?;
        println!("  Rvw_sat:   {:.6e}", rvw);
    }
    if deck.runspec.thermal {
        let state = build_state(p, t, composition);
        let h = fs.enthalpy(&state, phase, composition.region)?;
        println!("  Enthalpy:  {:.4} kJ/kg", h / 1e3);
    }
    Ok(())
}

fn cmd_sweep(
    deck_path: &Path,
    phase: PhaseIdx,
    (p_min, p_max, steps): (f64, f64, usize),
    temperature_c: Option<f64>,
    composition: CompositionArgs,
    csv_path: Option<&Path>,
) -> CliResult<()> {
    if steps < 2 {
        return Err(CliError::Usage(format!("--steps must be at least 2, got {steps}")));
    }
    if !(p_min.is_finite() && p_max.is_finite() && p_min < p_max) {
        return Err(CliError::Usage(format!(
            "pressure range must satisfy p_min < p_max, got [{p_min}, {p_max}]"
        )));
    }

    let (_deck, fs) = load_system(deck_path)?;
    let t = temperature_c
        .map(units::celsius_to_kelvin)
        .unwrap_or_else(|| fs.reservoir_temperature());
    info!(phase = phase.name(), steps, t, "running pressure sweep");

    let dp = (p_max - p_min) / (steps - 1) as f64;
    let rows = (0..steps)
        .into_par_iter()
        .map(|i| {
            let p = units::bar_to_pa(p_min + dp * i as f64);
            evaluate(&fs, phase, p, t, composition)
        })
        .collect::<CliResult<Vec<_>>>()?;

    let mut csv = format!(
        "pressure_bar,inverse_b,density_kg_m3,viscosity_cp,{}\n",
        ratio_label(phase).to_lowercase()
    );
    for row in &rows {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            units::pa_to_bar(row.pressure),
            row.inverse_b,
            row.density,
            units::pa_s_to_centipoise(row.viscosity),
            row.saturated_ratio
        ));
    }

    if let Some(path) = csv_path {
        std::fs::write(path, csv)?;
        println!("✓ Wrote {} points to {}", rows.len(), path.display());
    } else {
        print!("{}", csv);
    }
    Ok(())
}
