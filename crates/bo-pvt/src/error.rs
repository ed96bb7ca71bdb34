//! PVT evaluation errors.

use bo_core::{CoreError, Real};
use thiserror::Error;

/// Result type for PVT evaluations.
pub type PvtResult<T> = Result<T, PvtError>;

/// Errors raised by phase laws, tabulated functions and multiplexers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PvtError {
    /// Configuration error: no law selected, or the active law does not
    /// provide the requested quantity.
    #[error("Not implemented: {what}")]
    NotImplemented { what: String },

    /// Input outside a table or correlation domain with extrapolation disabled.
    #[error("Value out of range for {what}: {value} (valid range [{min}, {max}])")]
    OutOfRange {
        what: &'static str,
        value: Real,
        min: Real,
        max: Real,
    },

    /// An iterative inversion did not converge.
    #[error("Numerical problem: {message}")]
    NumericalProblem { message: String },

    /// Malformed tabulated input.
    #[error("Invalid table: {what}")]
    InvalidTable { what: String },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    /// Non-physical values (negative formation volume factor, viscosity, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Checked typed accessor used with a tag that is not active.
    #[error("Wrong PVT approach: requested {requested}, active {active}")]
    WrongApproach {
        requested: &'static str,
        active: &'static str,
    },

    /// Region index past the number of configured regions.
    #[error("PVT region {region} out of range (num_regions={num_regions})")]
    RegionOutOfRange { region: usize, num_regions: usize },
}

impl PvtError {
    pub fn not_implemented(what: impl Into<String>) -> Self {
        PvtError::NotImplemented { what: what.into() }
    }

    pub fn invalid_table(what: impl Into<String>) -> Self {
        PvtError::InvalidTable { what: what.into() }
    }

    pub fn invalid_arg(what: impl Into<String>) -> Self {
        PvtError::InvalidArg { what: what.into() }
    }

    /// `true` for configuration errors (as opposed to data problems).
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, PvtError::NotImplemented { .. })
    }
}

impl From<PvtError> for CoreError {
    fn from(err: PvtError) -> Self {
        match err {
            PvtError::NonPhysical { what } => CoreError::Invariant { what },
            PvtError::RegionOutOfRange {
                region,
                num_regions,
            } => CoreError::IndexOob {
                what: "PVT region",
                index: region,
                len: num_regions,
            },
            other => CoreError::InvalidArg {
                what: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PvtError::not_implemented("Oil PVT of this deck!");
        assert_eq!(err.to_string(), "Not implemented: Oil PVT of this deck!");

        let err = PvtError::OutOfRange {
            what: "temperature",
            value: 700.0,
            min: 273.15,
            max: 647.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("temperature"));
        assert!(msg.contains("700"));
        assert!(msg.contains("647"));
    }

    #[test]
    fn error_to_core_error() {
        let err: CoreError = PvtError::NonPhysical { what: "viscosity" }.into();
        assert!(matches!(err, CoreError::Invariant { .. }));

        let err: CoreError = PvtError::RegionOutOfRange {
            region: 3,
            num_regions: 2,
        }
        .into();
        assert!(matches!(err, CoreError::IndexOob { index: 3, len: 2, .. }));

        let err: CoreError = PvtError::invalid_table("PVTO").into();
        assert!(err.to_string().contains("PVTO"));
    }
}
