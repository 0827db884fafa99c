// ABOUTME: Date-based joining of workout and diet records, same-day or lagged by one day
// ABOUTME: Inner-join semantics: unmatched dates drop, duplicated dates fan out
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Dataset alignment
//!
//! Analyses need workout and diet rows on a shared timeline. Same-day
//! alignment pairs records logged on the same date; lagged alignment pairs a
//! workout with the previous day's intake, on the premise that yesterday's
//! food fuels today's session.

use crate::models::{AlignedRecord, DietRecord, WorkoutRecord};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// How a workout date is matched against a diet date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentPolicy {
    /// Pair records logged on the same calendar day.
    SameDay,
    /// Pair a workout with the dietary intake of the previous calendar day.
    PreviousDayDiet,
}

impl AlignmentPolicy {
    /// Label used in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SameDay => "same_day",
            Self::PreviousDayDiet => "previous_day_diet",
        }
    }

    // The training day a diet record feeds under this policy.
    fn training_day_for(self, diet_date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::SameDay => Some(diet_date),
            Self::PreviousDayDiet => diet_date.checked_add_days(Days::new(1)),
        }
    }
}

/// Inner-join workout records with diet records under the given policy.
///
/// Workout-side input order is preserved. A date appearing on only one side
/// drops; a date duplicated on either side fans out into one row per pairing.
#[must_use]
pub fn align(
    workouts: &[WorkoutRecord],
    diet: &[DietRecord],
    policy: AlignmentPolicy,
) -> Vec<AlignedRecord> {
    let mut by_training_day: HashMap<NaiveDate, Vec<&DietRecord>> = HashMap::new();
    for record in diet {
        if let Some(day) = policy.training_day_for(record.date) {
            by_training_day.entry(day).or_default().push(record);
        }
    }

    let mut aligned = Vec::new();
    for workout in workouts {
        if let Some(matches) = by_training_day.get(&workout.date) {
            for diet_record in matches {
                aligned.push(AlignedRecord::joined(workout, diet_record));
            }
        }
    }

    debug!(
        policy = policy.as_str(),
        workouts = workouts.len(),
        diet = diet.len(),
        aligned = aligned.len(),
        "aligned datasets"
    );
    aligned
}
