// ABOUTME: Analysis session owning the loaded datasets and dispatching analysis requests
// ABOUTME: Loads parse and derive in one step; analyses read, nothing caches combined data
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Analysis session
//!
//! [`AnalysisSession`] owns the configuration and the two loaded datasets and
//! is the single entry point for running analyses. Loading a sheet parses it
//! and derives the per-record metrics in one step; every analysis reads the
//! stored records and recombines them on demand, so there is no stale joined
//! state to invalidate.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::errors::{AnalysisError, AnalysisResult, DatasetKind};
use crate::ingest;
use crate::intelligence::alignment::{self, AlignmentPolicy};
use crate::intelligence::insights::{self, GoalProgress, MacroDistribution, StrengthGainSeries};
use crate::intelligence::intervention;
use crate::intelligence::metrics::MetricsCalculator;
use crate::intelligence::performance_prediction::{
    LiftForecast, PerformanceForecast, PerformancePredictor,
};
use crate::intelligence::statistical_analysis::{
    CorrelationMatrix, EffectivenessReport, StatisticalAnalyzer,
};
use crate::models::{AlignedRecord, DietRecord, Exercise, WorkoutRecord};

/// One of the four analyses the session can run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "analysis", rename_all = "snake_case")]
pub enum AnalysisRequest {
    /// Pairwise correlations between training volume and the diet columns
    DietCorrelation,
    /// Volume-on-calories trend plus a forward calorie grid
    PerformancePrediction,
    /// Before/after volume comparison around a diet change
    DietEffectiveness {
        /// First day the new diet counts as active
        intervention_date: NaiveDate,
    },
    /// Standardized-weight regression on the previous day's macros
    NutritionAnalysis {
        /// Lift to restrict the regression to
        exercise: Exercise,
    },
}

/// Standardized weight regressed on the previous day's macro intake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionRegression {
    /// Lift the regression was restricted to
    pub exercise: Exercise,
    /// Predicted standardized weight with zero intake
    pub intercept: f64,
    /// Change in standardized weight per gram of protein
    pub protein_coefficient: f64,
    /// Change in standardized weight per gram of carbohydrate
    pub carbs_coefficient: f64,
    /// Change in standardized weight per gram of fat
    pub fats_coefficient: f64,
    /// Change in standardized weight per kilocalorie
    pub calories_coefficient: f64,
    /// Fraction of weight variance the intake explains (0-1)
    pub r_squared: f64,
    /// Lagged-aligned sessions the fit was trained on
    pub sample_count: usize,
}

/// Result of a dispatched analysis, one variant per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "analysis", rename_all = "snake_case")]
pub enum AnalysisReport {
    /// Pairwise correlation matrix over the shared metric columns
    DietCorrelation {
        /// The computed matrix
        matrix: CorrelationMatrix,
    },
    /// Volume forecast over a calorie grid
    PerformancePrediction {
        /// Fit and grid projections
        forecast: PerformanceForecast,
    },
    /// Before/after effectiveness comparison
    DietEffectiveness {
        /// T-test outcome, or the not-applicable sentinel
        report: EffectivenessReport,
    },
    /// Macro regression for one lift
    NutritionAnalysis {
        /// Fitted coefficients and quality
        regression: NutritionRegression,
    },
}

/// In-memory analysis state: configuration plus the loaded datasets.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    calculator: MetricsCalculator,
    workout: Option<Vec<WorkoutRecord>>,
    diet: Option<Vec<DietRecord>>,
}

impl AnalysisSession {
    /// Session with the published default thresholds and ratios.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session with custom thresholds and ratios.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::MalformedInput`] when the configuration fails
    /// validation.
    pub fn with_config(config: AnalysisConfig) -> AnalysisResult<Self> {
        config.validate()?;
        Ok(Self {
            calculator: MetricsCalculator::new(config),
            workout: None,
            diet: None,
        })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        self.calculator.config()
    }

    /// Load and derive the workout sheet, replacing any previous one.
    ///
    /// Returns the number of stored records. On failure nothing is stored and
    /// any previously loaded workout data stays intact.
    ///
    /// # Errors
    ///
    /// Propagates parse failures from the sheet: [`AnalysisError::MalformedInput`],
    /// [`AnalysisError::UnknownExercise`].
    pub fn load_workout_csv(&mut self, path: &Path) -> AnalysisResult<usize> {
        let entries = ingest::load_workout_sheet(path)?;
        let records = self.calculator.process_workout(entries);
        let count = records.len();
        self.workout = Some(records);
        info!(path = %path.display(), records = count, "loaded workout sheet");
        Ok(count)
    }

    /// Load and derive the diet sheet, replacing any previous one.
    ///
    /// Returns the number of stored records. On failure nothing is stored and
    /// any previously loaded diet data stays intact.
    ///
    /// # Errors
    ///
    /// Propagates parse failures from the sheet: [`AnalysisError::MalformedInput`].
    pub fn load_diet_csv(&mut self, path: &Path) -> AnalysisResult<usize> {
        let entries = ingest::load_diet_sheet(path)?;
        let records = self.calculator.process_diet(entries);
        let count = records.len();
        self.diet = Some(records);
        info!(path = %path.display(), records = count, "loaded diet sheet");
        Ok(count)
    }

    /// The loaded workout records.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::MissingDataset`] when no workout sheet has
    /// been loaded.
    pub fn workout_records(&self) -> AnalysisResult<&[WorkoutRecord]> {
        self.workout
            .as_deref()
            .ok_or(AnalysisError::missing_dataset(DatasetKind::Workout))
    }

    /// The loaded diet records.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::MissingDataset`] when no diet sheet has been
    /// loaded.
    pub fn diet_records(&self) -> AnalysisResult<&[DietRecord]> {
        self.diet
            .as_deref()
            .ok_or(AnalysisError::missing_dataset(DatasetKind::Diet))
    }

    /// Workout and diet records joined on the same calendar day.
    ///
    /// Recomputed from the stored records on every call; loading a new sheet
    /// is immediately reflected.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::MissingDataset`] when either sheet is not
    /// loaded.
    pub fn combined(&self) -> AnalysisResult<Vec<AlignedRecord>> {
        self.aligned_with(AlignmentPolicy::SameDay)
    }

    /// Workout and diet records joined under an explicit alignment policy.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::MissingDataset`] when either sheet is not
    /// loaded.
    pub fn aligned_with(&self, policy: AlignmentPolicy) -> AnalysisResult<Vec<AlignedRecord>> {
        let workouts = self.workout_records()?;
        let diet = self.diet_records()?;
        Ok(alignment::align(workouts, diet, policy))
    }

    /// Run one of the four analyses against the loaded data.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::MissingDataset`] when a needed sheet is not
    /// loaded, and [`AnalysisError::InsufficientData`] when the combined data
    /// cannot support the requested fit or test.
    pub fn run_analysis(&self, request: &AnalysisRequest) -> AnalysisResult<AnalysisReport> {
        debug!(?request, "running analysis");
        match request {
            AnalysisRequest::DietCorrelation => {
                let combined = self.combined()?;
                Ok(AnalysisReport::DietCorrelation {
                    matrix: StatisticalAnalyzer::correlation_matrix(&combined),
                })
            }
            AnalysisRequest::PerformancePrediction => {
                let combined = self.combined()?;
                Ok(AnalysisReport::PerformancePrediction {
                    forecast: PerformancePredictor::forecast_volume_from_calories(&combined)?,
                })
            }
            AnalysisRequest::DietEffectiveness { intervention_date } => {
                let combined = self.combined()?;
                let split = intervention::split_at_intervention(combined, *intervention_date);
                Ok(AnalysisReport::DietEffectiveness {
                    report: StatisticalAnalyzer::diet_effectiveness(&split),
                })
            }
            AnalysisRequest::NutritionAnalysis { exercise } => {
                let lagged = self.aligned_with(AlignmentPolicy::PreviousDayDiet)?;
                Ok(AnalysisReport::NutritionAnalysis {
                    regression: Self::nutrition_regression(&lagged, *exercise)?,
                })
            }
        }
    }

    /// Mean macro intake and shares over the same-day combined data.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::MissingDataset`] or
    /// [`AnalysisError::InsufficientData`] per [`insights::macro_distribution`].
    pub fn macro_distribution(&self) -> AnalysisResult<MacroDistribution> {
        let combined = self.combined()?;
        insights::macro_distribution(&combined)
    }

    /// Raw-weight history per lift from the workout sheet.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::MissingDataset`] when no workout sheet is
    /// loaded.
    pub fn strength_gains(&self) -> AnalysisResult<Vec<StrengthGainSeries>> {
        Ok(insights::strength_gains(self.workout_records()?))
    }

    /// One lift's standing against a target weight, over the combined data.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::MissingDataset`] or
    /// [`AnalysisError::MalformedInput`] per [`insights::goal_progress`].
    pub fn goal_progress(
        &self,
        exercise: Exercise,
        goal_weight_kg: f64,
    ) -> AnalysisResult<GoalProgress> {
        let combined = self.combined()?;
        insights::goal_progress(&combined, exercise, goal_weight_kg)
    }

    /// Project one lift's weight over future sessions, from the combined data.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::MissingDataset`] or
    /// [`AnalysisError::InsufficientData`] per
    /// [`PerformancePredictor::forecast_lift_progression`].
    pub fn forecast_lift(
        &self,
        exercise: Exercise,
        future_sessions: u32,
    ) -> AnalysisResult<LiftForecast> {
        let combined = self.combined()?;
        PerformancePredictor::forecast_lift_progression(&combined, exercise, future_sessions)
    }

    fn nutrition_regression(
        lagged: &[AlignedRecord],
        exercise: Exercise,
    ) -> AnalysisResult<NutritionRegression> {
        let mut features: Vec<Vec<f64>> = Vec::new();
        let mut targets: Vec<f64> = Vec::new();
        for record in lagged.iter().filter(|r| r.exercise == exercise) {
            let row = [record.protein_g, record.carbs_g, record.fats_g, record.calories];
            if record.standardized_weight_kg.is_finite() && row.iter().all(|v| v.is_finite()) {
                features.push(row.to_vec());
                targets.push(record.standardized_weight_kg);
            }
        }

        let fit = StatisticalAnalyzer::multi_linear_fit(&features, &targets)?;
        match fit.coefficients[..] {
            [protein, carbs, fats, calories] => Ok(NutritionRegression {
                exercise,
                intercept: fit.intercept,
                protein_coefficient: protein,
                carbs_coefficient: carbs,
                fats_coefficient: fats,
                calories_coefficient: calories,
                r_squared: fit.r_squared,
                sample_count: targets.len(),
            }),
            _ => Err(AnalysisError::insufficient_data(
                "macro regression produced an unexpected coefficient count",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn sheet_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn loaded_session() -> AnalysisSession {
        let workout = sheet_file(
            "Date,Exercise,Sets,Reps,Weight (kg)\n\
             01/02/2023,Bench Press,3,10,100\n\
             01/03/2023,Squat,4,8,140\n\
             01/05/2023,Deadlift,2,6,180\n\
             02/01/2023,Bench Press,3,10,105\n\
             02/03/2023,Squat,4,8,145\n",
        );
        let diet = sheet_file(
            "Date,Calories,Protein (g),Carbs (g),Fats (g)\n\
             01/01/2023,2400,50,310,70\n\
             01/02/2023,2650,62,280,85\n\
             01/03/2023,2350,55,330,65\n\
             01/04/2023,2700,48,295,90\n\
             01/05/2023,2500,67,305,75\n\
             02/01/2023,2600,59,320,80\n\
             02/03/2023,2550,61,315,78\n",
        );
        let mut session = AnalysisSession::new();
        session.load_workout_csv(workout.path()).unwrap();
        session.load_diet_csv(diet.path()).unwrap();
        session
    }

    #[test]
    fn test_loading_reports_stored_record_counts() {
        let workout = sheet_file(
            "Date,Exercise,Sets,Reps,Weight (kg)\n\
             01/02/2023,Bench Press,3,10,100\n\
             01/03/2023,Squat,4,8,0\n",
        );
        let mut session = AnalysisSession::new();
        // The zero-weight row is dropped during derivation.
        assert_eq!(session.load_workout_csv(workout.path()).unwrap(), 1);
        assert_eq!(session.workout_records().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_datasets_are_explicit_errors() {
        let session = AnalysisSession::new();
        assert!(matches!(
            session.workout_records().unwrap_err(),
            AnalysisError::MissingDataset { .. }
        ));
        assert!(matches!(
            session.combined().unwrap_err(),
            AnalysisError::MissingDataset { .. }
        ));
        let requests = [
            AnalysisRequest::DietCorrelation,
            AnalysisRequest::PerformancePrediction,
            AnalysisRequest::DietEffectiveness {
                intervention_date: NaiveDate::from_ymd_opt(2023, 1, 20).unwrap(),
            },
            AnalysisRequest::NutritionAnalysis {
                exercise: Exercise::Squat,
            },
        ];
        for request in requests {
            assert!(matches!(
                session.run_analysis(&request).unwrap_err(),
                AnalysisError::MissingDataset { .. }
            ));
        }
    }

    #[test]
    fn test_failed_load_keeps_previous_data() {
        let good = sheet_file(
            "Date,Exercise,Sets,Reps,Weight (kg)\n\
             01/02/2023,Bench Press,3,10,100\n",
        );
        let bad = sheet_file(
            "Date,Exercise,Sets,Reps,Weight (kg)\n\
             01/02/2023,Curl,3,10,40\n",
        );
        let mut session = AnalysisSession::new();
        session.load_workout_csv(good.path()).unwrap();
        assert!(matches!(
            session.load_workout_csv(bad.path()).unwrap_err(),
            AnalysisError::UnknownExercise { .. }
        ));
        assert_eq!(session.workout_records().unwrap().len(), 1);
    }

    #[test]
    fn test_combined_joins_on_the_same_day() {
        let session = loaded_session();
        let combined = session.combined().unwrap();
        assert_eq!(combined.len(), 5);
        let bench = &combined[0];
        assert_eq!(bench.exercise, Exercise::BenchPress);
        assert!((bench.standardized_weight_kg - 100.0 / 3.0).abs() < 1e-9);
        assert!((bench.total_volume - 1000.0).abs() < 1e-9);
        assert!((bench.calories - 2650.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_correlation_analysis_produces_a_full_matrix() {
        let session = loaded_session();
        let report = session.run_analysis(&AnalysisRequest::DietCorrelation).unwrap();
        match report {
            AnalysisReport::DietCorrelation { matrix } => {
                assert!((matrix.values[0][0] - 1.0).abs() < 1e-12);
                assert!((matrix.values[1][3] - matrix.values[3][1]).abs() < 1e-12);
            }
            other => panic!("unexpected report: {other:?}"),
        }
    }

    #[test]
    fn test_prediction_analysis_builds_the_calorie_grid() {
        let session = loaded_session();
        let report = session
            .run_analysis(&AnalysisRequest::PerformancePrediction)
            .unwrap();
        match report {
            AnalysisReport::PerformancePrediction { forecast } => {
                assert_eq!(forecast.projections.len(), 20);
                // Highest same-day calorie value in the fixture is 2650.
                assert_eq!(forecast.projections[0].calories, 2651);
            }
            other => panic!("unexpected report: {other:?}"),
        }
    }

    #[test]
    fn test_effectiveness_analysis_splits_and_tests() {
        let session = loaded_session();
        let request = AnalysisRequest::DietEffectiveness {
            intervention_date: NaiveDate::from_ymd_opt(2023, 1, 20).unwrap(),
        };
        match session.run_analysis(&request).unwrap() {
            AnalysisReport::DietEffectiveness {
                report:
                    EffectivenessReport::Tested {
                        before_count,
                        after_count,
                        ..
                    },
            } => {
                assert_eq!(before_count, 3);
                assert_eq!(after_count, 2);
            }
            other => panic!("unexpected report: {other:?}"),
        }
    }

    #[test]
    fn test_nutrition_analysis_regresses_on_lagged_macros() {
        let workout = sheet_file(
            "Date,Exercise,Sets,Reps,Weight (kg)\n\
             01/02/2023,Bench Press,3,10,100\n\
             01/03/2023,Bench Press,3,10,101\n\
             01/04/2023,Bench Press,3,10,102.5\n\
             01/05/2023,Bench Press,3,10,101.5\n\
             01/06/2023,Bench Press,3,10,104\n\
             01/07/2023,Bench Press,3,10,103\n",
        );
        let diet = sheet_file(
            "Date,Calories,Protein (g),Carbs (g),Fats (g)\n\
             01/01/2023,2400,50,310,70\n\
             01/02/2023,2650,62,280,85\n\
             01/03/2023,2350,55,330,65\n\
             01/04/2023,2700,48,295,90\n\
             01/05/2023,2500,67,305,75\n\
             01/06/2023,2600,59,320,80\n",
        );
        let mut session = AnalysisSession::new();
        session.load_workout_csv(workout.path()).unwrap();
        session.load_diet_csv(diet.path()).unwrap();

        let request = AnalysisRequest::NutritionAnalysis {
            exercise: Exercise::BenchPress,
        };
        match session.run_analysis(&request).unwrap() {
            AnalysisReport::NutritionAnalysis { regression } => {
                assert_eq!(regression.sample_count, 6);
                assert!(regression.r_squared.is_finite());
                assert!(regression.r_squared <= 1.0 + 1e-9);
                assert!(regression.protein_coefficient.is_finite());
                assert!(regression.calories_coefficient.is_finite());
            }
            other => panic!("unexpected report: {other:?}"),
        }
    }

    #[test]
    fn test_insight_wrappers_run_over_the_loaded_data() {
        let session = loaded_session();

        let distribution = session.macro_distribution().unwrap();
        assert!(distribution.mean_protein_g > 0.0);

        let gains = session.strength_gains().unwrap();
        assert_eq!(gains.len(), 3);

        let progress = session.goal_progress(Exercise::BenchPress, 120.0).unwrap();
        assert!((progress.current_weight_kg - 105.0).abs() < f64::EPSILON);

        let forecast = session.forecast_lift(Exercise::Squat, 2).unwrap();
        assert_eq!(forecast.history.len(), 2);
        assert_eq!(forecast.projected.len(), 2);
    }

    #[test]
    fn test_custom_config_must_validate() {
        let mut config = AnalysisConfig::default();
        config.intensity.medium_floor = -1.0;
        assert!(matches!(
            AnalysisSession::with_config(config).unwrap_err(),
            AnalysisError::MalformedInput { .. }
        ));
    }
}
