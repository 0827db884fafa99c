// ABOUTME: The date-aligned join row combining one workout record with one diet record
// ABOUTME: Produced fresh per analysis request; carries both the training day and the diet day
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::diet::{CalorieCategory, DietRecord};
use super::workout::{Exercise, IntensityCategory, WorkoutRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One workout record joined with one diet record under an alignment policy.
///
/// `date` is always the training day. For same-day alignment `diet_date`
/// equals `date`; for lagged alignment it is the previous calendar day.
/// Aligned rows are ephemeral: analyses build them on demand and drop them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedRecord {
    /// Training day
    pub date: NaiveDate,
    /// Day the joined dietary intake was logged
    pub diet_date: NaiveDate,
    /// The lift performed
    pub exercise: Exercise,
    /// Number of sets
    pub sets: u32,
    /// Repetitions per set
    pub reps: u32,
    /// Weight on the bar, kilograms
    pub weight_kg: f64,
    /// Weight divided by the lift's strength ratio
    pub standardized_weight_kg: f64,
    /// Sets × reps × standardized weight
    pub total_volume: f64,
    /// Training-volume bin
    pub intensity: IntensityCategory,
    /// Total energy intake, kilocalories
    pub calories: f64,
    /// Protein intake, grams
    pub protein_g: f64,
    /// Carbohydrate intake, grams
    pub carbs_g: f64,
    /// Fat intake, grams
    pub fats_g: f64,
    /// Calorie-intake bin
    pub calorie_level: CalorieCategory,
}

impl AlignedRecord {
    /// Join one workout record with one diet record.
    #[must_use]
    pub fn joined(workout: &WorkoutRecord, diet: &DietRecord) -> Self {
        Self {
            date: workout.date,
            diet_date: diet.date,
            exercise: workout.exercise,
            sets: workout.sets,
            reps: workout.reps,
            weight_kg: workout.weight_kg,
            standardized_weight_kg: workout.standardized_weight_kg,
            total_volume: workout.total_volume,
            intensity: workout.intensity,
            calories: diet.calories,
            protein_g: diet.protein_g,
            carbs_g: diet.carbs_g,
            fats_g: diet.fats_g,
            calorie_level: diet.calorie_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workout() -> WorkoutRecord {
        WorkoutRecord {
            date: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
            exercise: Exercise::Squat,
            sets: 3,
            reps: 5,
            weight_kg: 140.0,
            standardized_weight_kg: 35.0,
            total_volume: 525.0,
            intensity: IntensityCategory::Low,
        }
    }

    fn diet(date: NaiveDate) -> DietRecord {
        DietRecord {
            date,
            calories: 2800.0,
            protein_g: 150.0,
            carbs_g: 320.0,
            fats_g: 80.0,
            calorie_level: CalorieCategory::Medium,
        }
    }

    #[test]
    fn test_joined_carries_both_sides() {
        let w = workout();
        let d = diet(w.date);
        let row = AlignedRecord::joined(&w, &d);
        assert_eq!(row.date, w.date);
        assert_eq!(row.diet_date, d.date);
        assert_eq!(row.exercise, Exercise::Squat);
        assert!((row.total_volume - 525.0).abs() < f64::EPSILON);
        assert!((row.calories - 2800.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lagged_join_keeps_distinct_dates() {
        let w = workout();
        let d = diet(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        let row = AlignedRecord::joined(&w, &d);
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
        assert_eq!(row.diet_date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
    }
}
