// ABOUTME: Workout-side domain types: the compound-lift enum, logged entries, derived records
// ABOUTME: Derived records carry standardized weight, total volume, and the intensity bin
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::errors::AnalysisError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The compound lifts tracked by the workout sheet.
///
/// Exercise names are validated here, at the parsing boundary; everything past
/// this enum can rely on the name being one of the supported lifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Exercise {
    /// Barbell bench press
    #[serde(rename = "Bench Press")]
    BenchPress,
    /// Barbell back squat
    #[serde(rename = "Squat")]
    Squat,
    /// Conventional deadlift
    #[serde(rename = "Deadlift")]
    Deadlift,
}

impl Exercise {
    /// All supported lifts, in sheet order.
    pub const ALL: [Self; 3] = [Self::BenchPress, Self::Squat, Self::Deadlift];

    /// The sheet spelling of this lift.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BenchPress => "Bench Press",
            Self::Squat => "Squat",
            Self::Deadlift => "Deadlift",
        }
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Exercise {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bench press" => Ok(Self::BenchPress),
            "squat" => Ok(Self::Squat),
            "deadlift" => Ok(Self::Deadlift),
            _ => Err(AnalysisError::unknown_exercise(s.trim())),
        }
    }
}

/// Training-volume bin for a single workout record.
///
/// Bins are left-closed: a volume sitting exactly on a threshold belongs to
/// the higher bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntensityCategory {
    /// Total volume below the medium threshold
    Low,
    /// Total volume in the medium band
    Medium,
    /// Total volume at or above the high threshold
    High,
}

impl IntensityCategory {
    /// Bin label as it appears in reports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for IntensityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the workout sheet, as logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEntry {
    /// Training day
    pub date: NaiveDate,
    /// The lift performed
    pub exercise: Exercise,
    /// Number of sets
    pub sets: u32,
    /// Repetitions per set
    pub reps: u32,
    /// Weight on the bar, kilograms
    pub weight_kg: f64,
}

/// A workout entry with the derived training metrics attached.
///
/// Produced by metric derivation; entries logged with a zero weight never
/// become records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Training day
    pub date: NaiveDate,
    /// The lift performed
    pub exercise: Exercise,
    /// Number of sets
    pub sets: u32,
    /// Repetitions per set
    pub reps: u32,
    /// Weight on the bar, kilograms
    pub weight_kg: f64,
    /// Weight divided by the lift's strength ratio, comparable across lifts
    pub standardized_weight_kg: f64,
    /// Sets × reps × standardized weight
    pub total_volume: f64,
    /// Training-volume bin
    pub intensity: IntensityCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_parses_sheet_spellings() {
        assert_eq!("Bench Press".parse::<Exercise>().unwrap(), Exercise::BenchPress);
        assert_eq!("Squat".parse::<Exercise>().unwrap(), Exercise::Squat);
        assert_eq!("Deadlift".parse::<Exercise>().unwrap(), Exercise::Deadlift);
    }

    #[test]
    fn test_exercise_parse_is_case_insensitive_and_trimmed() {
        assert_eq!("  bench press ".parse::<Exercise>().unwrap(), Exercise::BenchPress);
        assert_eq!("SQUAT".parse::<Exercise>().unwrap(), Exercise::Squat);
    }

    #[test]
    fn test_unknown_exercise_is_rejected() {
        let err = "Overhead Press".parse::<Exercise>().unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownExercise { name } if name == "Overhead Press"));
    }

    #[test]
    fn test_exercise_serializes_as_sheet_spelling() {
        let json = serde_json::to_string(&Exercise::BenchPress).unwrap();
        assert_eq!(json, "\"Bench Press\"");
        let back: Exercise = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Exercise::BenchPress);
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for exercise in Exercise::ALL {
            assert_eq!(exercise.to_string().parse::<Exercise>().unwrap(), exercise);
        }
    }
}
