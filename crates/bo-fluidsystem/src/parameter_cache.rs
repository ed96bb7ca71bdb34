//! Per-evaluation parameters that are not part of the fluid state.

use bo_core::Real;

/// PVT region and oil saturation history of one evaluation point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterCache {
    region_index: usize,
    max_oil_sat: Real,
}

impl Default for ParameterCache {
    fn default() -> Self {
        Self::new(0, 1.0)
    }
}

impl ParameterCache {
    pub fn new(region_index: usize, max_oil_sat: Real) -> Self {
        Self {
            region_index,
            max_oil_sat,
        }
    }

    pub fn region_index(&self) -> usize {
        self.region_index
    }

    pub fn set_region_index(&mut self, region_index: usize) {
        self.region_index = region_index;
    }

    /// Largest oil saturation seen so far (VAPPARS history).
    pub fn max_oil_sat(&self) -> Real {
        self.max_oil_sat
    }

    pub fn set_max_oil_sat(&mut self, max_oil_sat: Real) {
        self.max_oil_sat = max_oil_sat;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_region_zero_without_history() {
        let mut cache = ParameterCache::default();
        assert_eq!(cache.region_index(), 0);
        assert_eq!(cache.max_oil_sat(), 1.0);
        cache.set_region_index(2);
        cache.set_max_oil_sat(0.4);
        assert_eq!(cache, ParameterCache::new(2, 0.4));
    }
}
