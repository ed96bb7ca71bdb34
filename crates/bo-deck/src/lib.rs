//! bo-deck: black-oil deck format, validation and fluid system construction.
//!
//! A deck is a YAML or JSON document holding the runspec switches and the
//! PVT keyword tables of every region. [`build_fluid_system`] turns a valid
//! deck into an initialized [`bo_fluidsystem::FluidSystem`].

pub mod builder;
pub mod schema;
pub mod units;
pub mod validate;

pub use builder::{build_fluid_system, build_gas_pvt, build_oil_pvt, build_water_pvt};
pub use schema::*;
pub use units::UnitConverter;
pub use validate::{ValidationError, validate_deck};

pub type DeckResult<T> = Result<T, DeckError>;

#[derive(thiserror::Error, Debug)]
pub enum DeckError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("PVT error: {0}")]
    Pvt(#[from] bo_pvt::PvtError),

    #[error("Fluid system error: {0}")]
    FluidSystem(#[from] bo_fluidsystem::FluidSystemError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> DeckResult<Deck> {
    let content = std::fs::read_to_string(path)?;
    let deck: Deck = serde_yaml::from_str(&content)?;
    validate_deck(&deck)?;
    Ok(deck)
}

pub fn save_yaml(path: &std::path::Path, deck: &Deck) -> DeckResult<()> {
    validate_deck(deck)?;
    let content = serde_yaml::to_string(deck)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> DeckResult<Deck> {
    let content = std::fs::read_to_string(path)?;
    let deck: Deck = serde_json::from_str(&content)?;
    validate_deck(&deck)?;
    Ok(deck)
}

pub fn save_json(path: &std::path::Path, deck: &Deck) -> DeckResult<()> {
    validate_deck(deck)?;
    let content = serde_json::to_string_pretty(deck)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Loads a deck, picking the format from the file extension (`.json` or YAML).
pub fn load(path: &std::path::Path) -> DeckResult<Deck> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        _ => load_yaml(path),
    }
}
