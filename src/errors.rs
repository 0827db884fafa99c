// ABOUTME: Unified error type for the analysis pipeline and its boundaries
// ABOUTME: Covers sheet ingestion failures, boundary validation, and degenerate statistics
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Error Handling
//!
//! All fallible operations in this crate return [`AnalysisResult`]. Errors are
//! raised at the boundary (sheet loading, user-input parsing) or when an
//! analysis cannot produce a meaningful answer; the core never silently
//! recovers. An empty before/after partition in the diet-effectiveness test is
//! deliberately *not* an error; see
//! [`EffectivenessReport::NotApplicable`](crate::intelligence::statistical_analysis::EffectivenessReport).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result alias used throughout the crate.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// The dataset a session operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    /// The workout sheet (lifts, sets, reps, weights).
    Workout,
    /// The dietary sheet (calories and macros).
    Diet,
}

impl DatasetKind {
    /// Lowercase label used in error messages and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Workout => "workout",
            Self::Diet => "diet",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced by sheet ingestion, request validation, and analysis.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AnalysisError {
    /// An input sheet could not be parsed into records.
    #[error("malformed input: {reason}")]
    MalformedInput {
        /// What was wrong, including the offending row where known.
        reason: String,
    },

    /// An exercise name outside the supported compound lifts.
    #[error("unknown exercise '{name}' (expected one of: Bench Press, Squat, Deadlift)")]
    UnknownExercise {
        /// The unrecognized name as supplied.
        name: String,
    },

    /// A user-supplied date string that matches no accepted format.
    #[error("invalid date '{input}': {reason}")]
    InvalidDate {
        /// The raw input string.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An analysis was requested before the dataset it reads was loaded.
    #[error("no {dataset} data loaded; load the {dataset} sheet first")]
    MissingDataset {
        /// Which sheet is missing.
        dataset: DatasetKind,
    },

    /// Not enough usable rows to compute the requested statistic.
    #[error("insufficient data: {reason}")]
    InsufficientData {
        /// What was needed and what was available.
        reason: String,
    },
}

impl AnalysisError {
    /// Create a malformed-input error.
    #[must_use]
    pub fn malformed_input(reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            reason: reason.into(),
        }
    }

    /// Create an unknown-exercise error.
    #[must_use]
    pub fn unknown_exercise(name: impl Into<String>) -> Self {
        Self::UnknownExercise { name: name.into() }
    }

    /// Create an invalid-date error.
    #[must_use]
    pub fn invalid_date(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDate {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing-dataset error.
    #[must_use]
    pub const fn missing_dataset(dataset: DatasetKind) -> Self {
        Self::MissingDataset { dataset }
    }

    /// Create an insufficient-data error.
    #[must_use]
    pub fn insufficient_data(reason: impl Into<String>) -> Self {
        Self::InsufficientData {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_problem() {
        let err = AnalysisError::unknown_exercise("Overhead Press");
        assert!(err.to_string().contains("Overhead Press"));

        let err = AnalysisError::invalid_date("not-a-date", "unrecognized format");
        assert!(err.to_string().contains("not-a-date"));

        let err = AnalysisError::missing_dataset(DatasetKind::Diet);
        assert!(err.to_string().contains("diet"));
    }

    #[test]
    fn test_dataset_kind_labels() {
        assert_eq!(DatasetKind::Workout.as_str(), "workout");
        assert_eq!(DatasetKind::Diet.as_str(), "diet");
        assert_eq!(DatasetKind::Diet.to_string(), "diet");
    }
}
