// ABOUTME: Analysis configuration: strength ratios and category-bin thresholds
// ABOUTME: Defaults hold the published constants; validation catches inverted or non-positive values
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Analysis Configuration
//!
//! Thresholds and ratios used by metric derivation. Defaults reproduce the
//! published constants; a custom configuration must pass [`AnalysisConfig::validate`]
//! before use.

use crate::errors::{AnalysisError, AnalysisResult};
use crate::models::{CalorieCategory, Exercise, IntensityCategory};
use serde::{Deserialize, Serialize};

/// Strength ratios used to standardize weight across lifts.
///
/// A lift's standardized weight is the raw weight divided by its ratio, making
/// numbers comparable between exercises with very different absolute loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrengthRatios {
    /// Bench press ratio: 3.0
    pub bench_press: f64,
    /// Squat ratio: 4.0
    pub squat: f64,
    /// Deadlift ratio: 4.5
    pub deadlift: f64,
}

impl Default for StrengthRatios {
    fn default() -> Self {
        Self {
            bench_press: 3.0,
            squat: 4.0,
            deadlift: 4.5,
        }
    }
}

impl StrengthRatios {
    /// The ratio for a given lift.
    #[must_use]
    pub const fn ratio_for(&self, exercise: Exercise) -> f64 {
        match exercise {
            Exercise::BenchPress => self.bench_press,
            Exercise::Squat => self.squat,
            Exercise::Deadlift => self.deadlift,
        }
    }
}

/// Total-volume thresholds for the intensity bins.
///
/// Bins are left-closed half-open intervals: `[0, medium_floor)` is Low,
/// `[medium_floor, high_floor)` is Medium, `[high_floor, ∞)` is High.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntensityThresholds {
    /// Lower edge of the Medium bin: 5000.0
    pub medium_floor: f64,
    /// Lower edge of the High bin: 10000.0
    pub high_floor: f64,
}

impl Default for IntensityThresholds {
    fn default() -> Self {
        Self {
            medium_floor: 5000.0,
            high_floor: 10_000.0,
        }
    }
}

impl IntensityThresholds {
    /// Bin a total-volume value.
    #[must_use]
    pub fn categorize(&self, total_volume: f64) -> IntensityCategory {
        if total_volume >= self.high_floor {
            IntensityCategory::High
        } else if total_volume >= self.medium_floor {
            IntensityCategory::Medium
        } else {
            IntensityCategory::Low
        }
    }
}

/// Daily-calorie thresholds for the intake bins.
///
/// Same interval convention as [`IntensityThresholds`]: a value on a threshold
/// belongs to the higher bin (2000 kcal is Medium, 3000 kcal is High).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalorieThresholds {
    /// Lower edge of the Medium bin: 2000.0
    pub medium_floor: f64,
    /// Lower edge of the High bin: 3000.0
    pub high_floor: f64,
}

impl Default for CalorieThresholds {
    fn default() -> Self {
        Self {
            medium_floor: 2000.0,
            high_floor: 3000.0,
        }
    }
}

impl CalorieThresholds {
    /// Bin a daily calorie intake.
    #[must_use]
    pub fn categorize(&self, calories: f64) -> CalorieCategory {
        if calories >= self.high_floor {
            CalorieCategory::High
        } else if calories >= self.medium_floor {
            CalorieCategory::Medium
        } else {
            CalorieCategory::Low
        }
    }
}

/// Complete configuration for metric derivation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Per-lift strength ratios
    pub strength_ratios: StrengthRatios,
    /// Total-volume bin thresholds
    pub intensity: IntensityThresholds,
    /// Calorie bin thresholds
    pub calories: CalorieThresholds,
}

impl AnalysisConfig {
    /// Validate ratio and threshold values.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::MalformedInput`] if any strength ratio is not
    /// strictly positive, or if a threshold pair is not strictly increasing
    /// from a non-negative medium floor.
    pub fn validate(&self) -> AnalysisResult<()> {
        for exercise in Exercise::ALL {
            let ratio = self.strength_ratios.ratio_for(exercise);
            if ratio <= 0.0 || !ratio.is_finite() {
                return Err(AnalysisError::malformed_input(format!(
                    "strength ratio for {exercise} must be strictly positive, got {ratio}"
                )));
            }
        }
        Self::validate_floors("intensity", self.intensity.medium_floor, self.intensity.high_floor)?;
        Self::validate_floors("calorie", self.calories.medium_floor, self.calories.high_floor)?;
        Ok(())
    }

    fn validate_floors(label: &str, medium: f64, high: f64) -> AnalysisResult<()> {
        if medium < 0.0 || !medium.is_finite() || !high.is_finite() {
            return Err(AnalysisError::malformed_input(format!(
                "{label} thresholds must be finite and non-negative, got {medium} and {high}"
            )));
        }
        if medium >= high {
            return Err(AnalysisError::malformed_input(format!(
                "{label} thresholds must increase: medium floor {medium} is not below high floor {high}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_ratios() {
        let ratios = StrengthRatios::default();
        assert!((ratios.ratio_for(Exercise::BenchPress) - 3.0).abs() < f64::EPSILON);
        assert!((ratios.ratio_for(Exercise::Squat) - 4.0).abs() < f64::EPSILON);
        assert!((ratios.ratio_for(Exercise::Deadlift) - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_intensity_bins_are_left_closed() {
        let thresholds = IntensityThresholds::default();
        assert_eq!(thresholds.categorize(4999.99), IntensityCategory::Low);
        assert_eq!(thresholds.categorize(5000.0), IntensityCategory::Medium);
        assert_eq!(thresholds.categorize(9999.99), IntensityCategory::Medium);
        assert_eq!(thresholds.categorize(10_000.0), IntensityCategory::High);
        assert_eq!(thresholds.categorize(0.0), IntensityCategory::Low);
    }

    #[test]
    fn test_calorie_bins_are_left_closed() {
        let thresholds = CalorieThresholds::default();
        assert_eq!(thresholds.categorize(1500.0), CalorieCategory::Low);
        assert_eq!(thresholds.categorize(2000.0), CalorieCategory::Medium);
        assert_eq!(thresholds.categorize(2500.0), CalorieCategory::Medium);
        assert_eq!(thresholds.categorize(3000.0), CalorieCategory::High);
        assert_eq!(thresholds.categorize(3500.0), CalorieCategory::High);
    }

    #[test]
    fn test_non_positive_ratio_is_rejected() {
        let mut config = AnalysisConfig::default();
        config.strength_ratios.squat = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_thresholds_are_rejected() {
        let mut config = AnalysisConfig::default();
        config.calories.medium_floor = 3500.0;
        assert!(config.validate().is_err());
    }
}
