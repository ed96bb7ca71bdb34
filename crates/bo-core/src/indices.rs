//! Canonical phase and component indices.
//!
//! The numbering is fixed: phases are ordered water, oil, gas and components
//! oil, water, gas. Raw `usize` indices coming from callers go through
//! `TryFrom` and fail with [`CoreError::UnhandledIndex`].

use core::fmt;

use crate::CoreError;

pub const NUM_PHASES: usize = 3;
pub const NUM_COMPONENTS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PhaseIdx {
    Water = 0,
    Oil = 1,
    Gas = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompIdx {
    Oil = 0,
    Water = 1,
    Gas = 2,
}

impl PhaseIdx {
    pub const ALL: [PhaseIdx; NUM_PHASES] = [PhaseIdx::Water, PhaseIdx::Oil, PhaseIdx::Gas];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            PhaseIdx::Water => "water",
            PhaseIdx::Oil => "oil",
            PhaseIdx::Gas => "gas",
        }
    }

    pub fn is_liquid(self) -> bool {
        self != PhaseIdx::Gas
    }

    /// Component that makes up the bulk of the phase.
    pub fn solvent_component(self) -> CompIdx {
        match self {
            PhaseIdx::Water => CompIdx::Water,
            PhaseIdx::Oil => CompIdx::Oil,
            PhaseIdx::Gas => CompIdx::Gas,
        }
    }

    /// Component that dissolves into (or vaporizes into) the phase.
    pub fn solute_component(self) -> CompIdx {
        match self {
            PhaseIdx::Water | PhaseIdx::Oil => CompIdx::Gas,
            PhaseIdx::Gas => CompIdx::Oil,
        }
    }
}

impl CompIdx {
    pub const ALL: [CompIdx; NUM_COMPONENTS] = [CompIdx::Oil, CompIdx::Water, CompIdx::Gas];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            CompIdx::Water => "Water",
            CompIdx::Oil => "Oil",
            CompIdx::Gas => "Gas",
        }
    }

    /// Phase in which the component is the solvent.
    pub fn host_phase(self) -> PhaseIdx {
        match self {
            CompIdx::Water => PhaseIdx::Water,
            CompIdx::Oil => PhaseIdx::Oil,
            CompIdx::Gas => PhaseIdx::Gas,
        }
    }
}

impl TryFrom<usize> for PhaseIdx {
    type Error = CoreError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(PhaseIdx::Water),
            1 => Ok(PhaseIdx::Oil),
            2 => Ok(PhaseIdx::Gas),
            _ => Err(CoreError::UnhandledIndex {
                what: "phase",
                index,
            }),
        }
    }
}

impl TryFrom<usize> for CompIdx {
    type Error = CoreError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(CompIdx::Oil),
            1 => Ok(CompIdx::Water),
            2 => Ok(CompIdx::Gas),
            _ => Err(CoreError::UnhandledIndex {
                what: "component",
                index,
            }),
        }
    }
}

impl fmt::Display for PhaseIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for CompIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trip() {
        for phase in PhaseIdx::ALL {
            assert_eq!(PhaseIdx::try_from(phase.index()).unwrap(), phase);
        }
        for comp in CompIdx::ALL {
            assert_eq!(CompIdx::try_from(comp.index()).unwrap(), comp);
        }
    }

    #[test]
    fn out_of_range_index_is_unhandled() {
        let err = PhaseIdx::try_from(3).unwrap_err();
        assert!(format!("{err}").contains("Unhandled"));
        let err = CompIdx::try_from(7).unwrap_err();
        assert!(format!("{err}").contains("Unhandled component index 7"));
    }

    #[test]
    fn names_and_solvents() {
        assert_eq!(PhaseIdx::Water.name(), "water");
        assert_eq!(CompIdx::Gas.name(), "Gas");
        assert_eq!(PhaseIdx::Gas.solute_component(), CompIdx::Oil);
        assert_eq!(PhaseIdx::Oil.solute_component(), CompIdx::Gas);
        assert_eq!(PhaseIdx::Water.solvent_component(), CompIdx::Water);
        assert!(PhaseIdx::Oil.is_liquid());
        assert!(!PhaseIdx::Gas.is_liquid());
    }
}
