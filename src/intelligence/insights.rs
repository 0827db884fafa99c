// ABOUTME: Chart-ready insight producers: macro distribution, strength-gain series, goal progress
// ABOUTME: Pure data transforms over loaded records; rendering is left to callers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::errors::{AnalysisError, AnalysisResult};
use crate::intelligence::performance_prediction::WeightPoint;
use crate::models::{AlignedRecord, Exercise, WorkoutRecord};
use serde::{Deserialize, Serialize};

/// Mean macro intake over the combined data, with each macro's share of the
/// total. Pie-chart data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroDistribution {
    /// Mean daily protein, grams
    pub mean_protein_g: f64,
    /// Mean daily carbohydrates, grams
    pub mean_carbs_g: f64,
    /// Mean daily fats, grams
    pub mean_fats_g: f64,
    /// Protein share of the macro total, percent
    pub protein_percent: f64,
    /// Carbohydrate share of the macro total, percent
    pub carbs_percent: f64,
    /// Fat share of the macro total, percent
    pub fats_percent: f64,
}

/// One lift's raw-weight history in record order. Line-chart data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrengthGainSeries {
    /// Lift the series belongs to
    pub exercise: Exercise,
    /// (date, raw weight) per session, in record order
    pub points: Vec<WeightPoint>,
}

/// Standing of one lift against a target weight. Bar-chart data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalProgress {
    /// Lift being tracked
    pub exercise: Exercise,
    /// Target raw weight, kilograms
    pub goal_weight_kg: f64,
    /// Most recently recorded raw weight; zero with no sessions on record
    pub current_weight_kg: f64,
    /// Weight still to gain, never negative
    pub remaining_kg: f64,
    /// Whether the current weight meets or exceeds the goal
    pub achieved: bool,
}

/// Mean macro intake and per-macro shares over the combined data.
///
/// Means skip non-finite values per column, so a stray unusable cell does not
/// poison the whole distribution.
///
/// # Errors
///
/// Returns [`AnalysisError::InsufficientData`] when there are no records, a
/// macro column has no usable values, or the macro means sum to zero.
pub fn macro_distribution(records: &[AlignedRecord]) -> AnalysisResult<MacroDistribution> {
    if records.is_empty() {
        return Err(AnalysisError::insufficient_data(
            "macro distribution requires at least one combined record",
        ));
    }

    let mean_protein_g = finite_mean(records.iter().map(|r| r.protein_g))
        .ok_or_else(|| AnalysisError::insufficient_data("no usable protein values"))?;
    let mean_carbs_g = finite_mean(records.iter().map(|r| r.carbs_g))
        .ok_or_else(|| AnalysisError::insufficient_data("no usable carbohydrate values"))?;
    let mean_fats_g = finite_mean(records.iter().map(|r| r.fats_g))
        .ok_or_else(|| AnalysisError::insufficient_data("no usable fat values"))?;

    let total = mean_protein_g + mean_carbs_g + mean_fats_g;
    if total == 0.0 {
        return Err(AnalysisError::insufficient_data(
            "macro means sum to zero; shares are undefined",
        ));
    }

    Ok(MacroDistribution {
        mean_protein_g,
        mean_carbs_g,
        mean_fats_g,
        protein_percent: mean_protein_g / total * 100.0,
        carbs_percent: mean_carbs_g / total * 100.0,
        fats_percent: mean_fats_g / total * 100.0,
    })
}

/// Raw-weight history per compound lift, in record order.
///
/// Lifts with no recorded sessions are omitted.
#[must_use]
pub fn strength_gains(records: &[WorkoutRecord]) -> Vec<StrengthGainSeries> {
    Exercise::ALL
        .iter()
        .filter_map(|&exercise| {
            let points: Vec<WeightPoint> = records
                .iter()
                .filter(|r| r.exercise == exercise)
                .map(|r| WeightPoint {
                    date: r.date,
                    weight_kg: r.weight_kg,
                })
                .collect();
            if points.is_empty() {
                None
            } else {
                Some(StrengthGainSeries { exercise, points })
            }
        })
        .collect()
}

/// Where one lift stands against a target weight.
///
/// Current weight is the latest recorded session's raw weight; with several
/// sessions on the same day the later record wins. No sessions at all leaves
/// the current weight at zero, which still renders as an empty bar.
///
/// # Errors
///
/// Returns [`AnalysisError::MalformedInput`] when the goal weight is negative
/// or not finite.
pub fn goal_progress(
    records: &[AlignedRecord],
    exercise: Exercise,
    goal_weight_kg: f64,
) -> AnalysisResult<GoalProgress> {
    if !goal_weight_kg.is_finite() || goal_weight_kg < 0.0 {
        return Err(AnalysisError::malformed_input(format!(
            "goal weight must be a non-negative number, got {goal_weight_kg}"
        )));
    }

    let mut latest: Option<(chrono::NaiveDate, f64)> = None;
    for record in records.iter().filter(|r| r.exercise == exercise) {
        match latest {
            Some((date, _)) if record.date < date => {}
            _ => latest = Some((record.date, record.weight_kg)),
        }
    }
    let current_weight_kg = latest.map_or(0.0, |(_, weight)| weight);

    Ok(GoalProgress {
        exercise,
        goal_weight_kg,
        current_weight_kg,
        remaining_kg: (goal_weight_kg - current_weight_kg).max(0.0),
        achieved: current_weight_kg >= goal_weight_kg,
    })
}

fn finite_mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0_usize;
    for value in values.filter(|v| v.is_finite()) {
        sum += value;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
