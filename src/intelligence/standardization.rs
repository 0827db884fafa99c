// ABOUTME: Weight standardization across the compound lifts
// ABOUTME: Divides raw bar weight by a per-lift strength ratio so lifts are comparable
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::config::StrengthRatios;
use crate::models::Exercise;

/// Standardizes raw lift weights using the configured strength ratios.
///
/// A 100 kg bench press and a 150 kg deadlift represent similar relative
/// effort; dividing by the per-lift ratio (bench 3.0, squat 4.0, deadlift 4.5
/// by default) puts them on one scale. Exercise names are validated at the
/// parsing boundary, so standardization itself cannot fail.
#[derive(Debug, Clone)]
pub struct WeightStandardizer {
    ratios: StrengthRatios,
}

impl WeightStandardizer {
    /// Create a standardizer with the given ratio table.
    #[must_use]
    pub const fn new(ratios: StrengthRatios) -> Self {
        Self { ratios }
    }

    /// Standardized weight for one lift: raw weight divided by the ratio.
    #[must_use]
    pub fn standardize(&self, exercise: Exercise, weight_kg: f64) -> f64 {
        weight_kg / self.ratios.ratio_for(exercise)
    }
}

impl Default for WeightStandardizer {
    fn default() -> Self {
        Self::new(StrengthRatios::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standardizes_each_lift_by_its_ratio() {
        let standardizer = WeightStandardizer::default();
        assert!((standardizer.standardize(Exercise::BenchPress, 90.0) - 30.0).abs() < 1e-9);
        assert!((standardizer.standardize(Exercise::Squat, 120.0) - 30.0).abs() < 1e-9);
        // 150 / 4.5
        assert!((standardizer.standardize(Exercise::Deadlift, 150.0) - 33.333_333_333).abs() < 1e-6);
    }

    #[test]
    fn test_custom_ratios_are_honored() {
        let standardizer = WeightStandardizer::new(StrengthRatios {
            bench_press: 2.0,
            squat: 4.0,
            deadlift: 5.0,
        });
        assert!((standardizer.standardize(Exercise::BenchPress, 100.0) - 50.0).abs() < 1e-9);
        assert!((standardizer.standardize(Exercise::Deadlift, 150.0) - 30.0).abs() < 1e-9);
    }
}
