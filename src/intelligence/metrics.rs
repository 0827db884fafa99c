// ABOUTME: Metric derivation for logged entries: standardized weight, total volume, category bins
// ABOUTME: Drops zero-weight workout entries before any metric is computed
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Metric derivation
//!
//! Turns parsed sheet entries into analysis-ready records. Workout entries
//! logged with a zero weight (skipped sessions, placeholder rows) are dropped
//! up front; surviving entries get a standardized weight, a total volume, and
//! an intensity bin. Dietary entries get a calorie bin.

use crate::config::AnalysisConfig;
use crate::intelligence::standardization::WeightStandardizer;
use crate::models::{DietEntry, DietRecord, WorkoutEntry, WorkoutRecord};
use tracing::debug;

/// Derives training and dietary metrics using one [`AnalysisConfig`].
#[derive(Debug, Clone, Default)]
pub struct MetricsCalculator {
    config: AnalysisConfig,
    standardizer: WeightStandardizer,
}

impl MetricsCalculator {
    /// Create a calculator from a configuration.
    #[must_use]
    pub fn new(config: AnalysisConfig) -> Self {
        let standardizer = WeightStandardizer::new(config.strength_ratios.clone());
        Self {
            config,
            standardizer,
        }
    }

    /// The configuration this calculator derives with.
    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Derive workout records from logged entries.
    ///
    /// Entries with a zero weight are excluded; everything else is carried
    /// through in input order with standardized weight, total volume
    /// (sets × reps × standardized weight), and the intensity bin attached.
    #[must_use]
    pub fn process_workout(&self, entries: Vec<WorkoutEntry>) -> Vec<WorkoutRecord> {
        let total = entries.len();
        let records: Vec<WorkoutRecord> = entries
            .into_iter()
            .filter(|entry| entry.weight_kg != 0.0)
            .map(|entry| {
                let standardized_weight_kg =
                    self.standardizer.standardize(entry.exercise, entry.weight_kg);
                let total_volume =
                    f64::from(entry.sets) * f64::from(entry.reps) * standardized_weight_kg;
                WorkoutRecord {
                    date: entry.date,
                    exercise: entry.exercise,
                    sets: entry.sets,
                    reps: entry.reps,
                    weight_kg: entry.weight_kg,
                    standardized_weight_kg,
                    total_volume,
                    intensity: self.config.intensity.categorize(total_volume),
                }
            })
            .collect();
        let dropped = total - records.len();
        if dropped > 0 {
            debug!(dropped, kept = records.len(), "filtered zero-weight workout entries");
        }
        records
    }

    /// Derive dietary records from logged entries.
    #[must_use]
    pub fn process_diet(&self, entries: Vec<DietEntry>) -> Vec<DietRecord> {
        entries
            .into_iter()
            .map(|entry| DietRecord {
                date: entry.date,
                calories: entry.calories,
                protein_g: entry.protein_g,
                carbs_g: entry.carbs_g,
                fats_g: entry.fats_g,
                calorie_level: self.config.calories.categorize(entry.calories),
            })
            .collect()
    }
}
