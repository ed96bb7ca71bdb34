//! Fluid system errors.

use bo_core::CoreError;
use bo_pvt::PvtError;
use thiserror::Error;

/// Result type for fluid system operations.
pub type FluidSystemResult<T> = Result<T, FluidSystemError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidSystemError {
    /// Error raised by one of the phase laws.
    #[error("PVT error: {0}")]
    Pvt(#[from] PvtError),

    /// Invalid phase or component index.
    #[error("Unhandled {what} index {index}")]
    UnhandledIndex { what: &'static str, index: usize },

    /// Evaluation before `init_end()` (or after a structural setter).
    #[error("Fluid system is not initialized, call init_end() first")]
    NotInitialized,

    #[error("PVT region {region} out of range (num_regions={num_regions})")]
    RegionOutOfRange { region: usize, num_regions: usize },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    /// The fluid state provides neither the ratio nor the mass fraction it
    /// is derived from.
    #[error("Fluid state provides neither {what} nor the mass fraction it is derived from")]
    MissingComposition { what: &'static str },
}

impl FluidSystemError {
    pub fn invalid_arg(what: impl Into<String>) -> Self {
        FluidSystemError::InvalidArg { what: what.into() }
    }
}

impl From<CoreError> for FluidSystemError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnhandledIndex { what, index } => {
                FluidSystemError::UnhandledIndex { what, index }
            }
            other => FluidSystemError::InvalidArg {
                what: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bo_core::PhaseIdx;

    #[test]
    fn index_errors_say_unhandled() {
        let err: FluidSystemError = PhaseIdx::try_from(7).unwrap_err().into();
        assert_eq!(
            err,
            FluidSystemError::UnhandledIndex {
                what: "phase",
                index: 7
            }
        );
        assert!(err.to_string().contains("Unhandled"));
    }

    #[test]
    fn pvt_errors_convert() {
        let err: FluidSystemError = PvtError::not_implemented("Gas PVT of this deck!").into();
        assert_eq!(
            err.to_string(),
            "PVT error: Not implemented: Gas PVT of this deck!"
        );
    }
}
