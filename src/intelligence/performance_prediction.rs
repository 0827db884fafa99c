// ABOUTME: Performance forecasting from training history via least-squares trend fits
// ABOUTME: Projects training volume over a calorie grid and per-lift weight over future sessions
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::errors::{AnalysisError, AnalysisResult};
use crate::intelligence::statistical_analysis::{LinearFit, StatisticalAnalyzer};
use crate::models::{AlignedRecord, Exercise};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Spacing between calorie grid points, kilocalories.
const CALORIE_GRID_STEP: i64 = 50;

/// Width of the calorie grid beyond the observed maximum, kilocalories.
const CALORIE_GRID_SPAN: i64 = 1_000;

/// Assumed days between future sessions of the same lift.
const DAYS_BETWEEN_SESSIONS: u64 = 30;

/// Predicted training volume at one calorie intake level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalorieProjection {
    /// Hypothetical daily intake, kilocalories
    pub calories: i64,
    /// Volume the fit predicts at that intake
    pub predicted_volume: f64,
}

/// Training volume forecast across calorie intakes just above the observed range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceForecast {
    /// Underlying volume-on-calories fit
    pub fit: LinearFit,
    /// Aligned records the fit was trained on
    pub sample_count: usize,
    /// Grid of predictions, lowest intake first
    pub projections: Vec<CalorieProjection>,
}

/// One observed or projected session of a lift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightPoint {
    /// Session date
    pub date: NaiveDate,
    /// Raw (non-standardized) weight lifted, kilograms
    pub weight_kg: f64,
}

/// Weight-progression forecast for a single lift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiftForecast {
    /// Lift being projected
    pub exercise: Exercise,
    /// Underlying weight-on-session-index fit
    pub fit: LinearFit,
    /// Observed sessions, oldest first
    pub history: Vec<WeightPoint>,
    /// Projected future sessions at the assumed interval
    pub projected: Vec<WeightPoint>,
}

/// Forecasting engine built on the least-squares fits.
pub struct PerformancePredictor;

impl PerformancePredictor {
    /// Forecast training volume over a grid of calorie intakes.
    ///
    /// Fits volume on calories across the aligned records, then evaluates the
    /// fit on a grid starting just above the highest observed intake and
    /// stepping by [`CALORIE_GRID_STEP`] until [`CALORIE_GRID_SPAN`] is
    /// covered. Records with non-finite calories or volume are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InsufficientData`] when fewer than 2 usable
    /// records remain.
    pub fn forecast_volume_from_calories(
        records: &[AlignedRecord],
    ) -> AnalysisResult<PerformanceForecast> {
        let points: Vec<(f64, f64)> = records
            .iter()
            .filter(|r| r.calories.is_finite() && r.total_volume.is_finite())
            .map(|r| (r.calories, r.total_volume))
            .collect();

        let fit = StatisticalAnalyzer::linear_fit(&points)?;

        let max_calories = points.iter().map(|(c, _)| *c).fold(f64::NEG_INFINITY, f64::max);
        let grid_base = max_calories.floor() as i64;
        let projections: Vec<CalorieProjection> = ((grid_base + 1)..(grid_base + CALORIE_GRID_SPAN))
            .step_by(CALORIE_GRID_STEP as usize)
            .map(|calories| CalorieProjection {
                calories,
                predicted_volume: fit.predict(calories as f64),
            })
            .collect();

        debug!(
            samples = points.len(),
            grid_base,
            grid_points = projections.len(),
            "forecast volume over calorie grid"
        );

        Ok(PerformanceForecast {
            fit,
            sample_count: points.len(),
            projections,
        })
    }

    /// Project a lift's working weight over future sessions.
    ///
    /// History is the lift's aligned sessions in date order; the fit
    /// regresses raw weight on session index. Future sessions are assumed
    /// [`DAYS_BETWEEN_SESSIONS`] apart, starting after the last observed
    /// session. `future_sessions` of zero yields an empty projection.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InsufficientData`] when the lift has fewer
    /// than 2 recorded sessions, and [`AnalysisError::InvalidDate`] if a
    /// projected date would overflow the calendar range.
    pub fn forecast_lift_progression(
        records: &[AlignedRecord],
        exercise: Exercise,
        future_sessions: u32,
    ) -> AnalysisResult<LiftForecast> {
        let mut history: Vec<WeightPoint> = records
            .iter()
            .filter(|r| r.exercise == exercise)
            .map(|r| WeightPoint {
                date: r.date,
                weight_kg: r.weight_kg,
            })
            .collect();
        history.sort_by_key(|point| point.date);

        if history.len() < 2 {
            return Err(AnalysisError::insufficient_data(format!(
                "lift forecast for {exercise} requires at least 2 sessions, got {}",
                history.len()
            )));
        }

        let points: Vec<(f64, f64)> = history
            .iter()
            .enumerate()
            .map(|(index, point)| (index as f64, point.weight_kg))
            .collect();
        let fit = StatisticalAnalyzer::linear_fit(&points)?;

        let last_date = history[history.len() - 1].date;
        let mut projected = Vec::with_capacity(future_sessions as usize);
        for offset in 0..future_sessions {
            let sessions_ahead = u64::from(offset) + 1;
            let date = last_date
                .checked_add_days(Days::new(DAYS_BETWEEN_SESSIONS * sessions_ahead))
                .ok_or_else(|| {
                    AnalysisError::invalid_date(
                        last_date.to_string(),
                        "projected session date overflows the calendar range",
                    )
                })?;
            let session_index = history.len() as f64 + f64::from(offset);
            projected.push(WeightPoint {
                date,
                weight_kg: fit.predict(session_index),
            });
        }

        debug!(
            exercise = exercise.as_str(),
            sessions = history.len(),
            projected = projected.len(),
            "forecast lift progression"
        );

        Ok(LiftForecast {
            exercise,
            fit,
            history,
            projected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CalorieCategory, IntensityCategory};

    fn aligned(day: u32, calories: f64, total_volume: f64) -> AlignedRecord {
        let date = NaiveDate::from_ymd_opt(2023, 3, day).unwrap();
        AlignedRecord {
            date,
            diet_date: date,
            exercise: Exercise::BenchPress,
            sets: 3,
            reps: 10,
            weight_kg: 100.0,
            standardized_weight_kg: 100.0 / 3.0,
            total_volume,
            intensity: IntensityCategory::Low,
            calories,
            protein_g: 50.0,
            carbs_g: 300.0,
            fats_g: 70.0,
            calorie_level: CalorieCategory::Medium,
        }
    }

    fn session(date: (i32, u32, u32), exercise: Exercise, weight_kg: f64) -> AlignedRecord {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        AlignedRecord {
            date,
            diet_date: date,
            exercise,
            sets: 3,
            reps: 5,
            weight_kg,
            standardized_weight_kg: weight_kg / 3.0,
            total_volume: 15.0 * weight_kg / 3.0,
            intensity: IntensityCategory::Low,
            calories: 2400.0,
            protein_g: 55.0,
            carbs_g: 310.0,
            fats_g: 72.0,
            calorie_level: CalorieCategory::Medium,
        }
    }

    #[test]
    fn test_calorie_grid_starts_above_observed_maximum() {
        let records = vec![
            aligned(1, 2000.0, 1000.0),
            aligned(2, 2300.0, 1150.0),
            aligned(3, 2500.7, 1250.0),
        ];
        let forecast = PerformancePredictor::forecast_volume_from_calories(&records).unwrap();
        assert_eq!(forecast.sample_count, 3);
        assert_eq!(forecast.projections.len(), 20);
        assert_eq!(forecast.projections[0].calories, 2501);
        assert_eq!(forecast.projections[1].calories, 2551);
        assert_eq!(forecast.projections[19].calories, 3451);
    }

    #[test]
    fn test_projected_volume_follows_a_rising_trend() {
        // Volume is exactly half the calorie intake.
        let records: Vec<AlignedRecord> = (1..=5)
            .map(|d| aligned(d, 2000.0 + f64::from(d) * 100.0, 1000.0 + f64::from(d) * 50.0))
            .collect();
        let forecast = PerformancePredictor::forecast_volume_from_calories(&records).unwrap();
        assert!((forecast.fit.slope - 0.5).abs() < 1e-9);
        for pair in forecast.projections.windows(2) {
            assert!(pair[1].predicted_volume > pair[0].predicted_volume);
        }
        let first = &forecast.projections[0];
        assert!((first.predicted_volume - first.calories as f64 / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_volume_forecast_requires_two_usable_records() {
        let records = vec![aligned(1, 2000.0, 1000.0), aligned(2, f64::NAN, 1100.0)];
        let err = PerformancePredictor::forecast_volume_from_calories(&records).unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData { .. }));
    }

    #[test]
    fn test_lift_forecast_projects_thirty_day_sessions() {
        let records = vec![
            session((2023, 1, 1), Exercise::BenchPress, 100.0),
            session((2023, 1, 8), Exercise::BenchPress, 102.5),
            session((2023, 1, 15), Exercise::BenchPress, 105.0),
            session((2023, 1, 15), Exercise::Squat, 140.0),
        ];
        let forecast =
            PerformancePredictor::forecast_lift_progression(&records, Exercise::BenchPress, 2)
                .unwrap();
        assert_eq!(forecast.history.len(), 3);
        assert!((forecast.fit.slope - 2.5).abs() < 1e-9);
        assert_eq!(forecast.projected.len(), 2);
        assert_eq!(
            forecast.projected[0].date,
            NaiveDate::from_ymd_opt(2023, 2, 14).unwrap()
        );
        assert_eq!(
            forecast.projected[1].date,
            NaiveDate::from_ymd_opt(2023, 3, 16).unwrap()
        );
        assert!((forecast.projected[0].weight_kg - 107.5).abs() < 1e-9);
        assert!((forecast.projected[1].weight_kg - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_lift_forecast_sorts_history_by_date() {
        let records = vec![
            session((2023, 1, 15), Exercise::Deadlift, 180.0),
            session((2023, 1, 1), Exercise::Deadlift, 170.0),
            session((2023, 1, 8), Exercise::Deadlift, 175.0),
        ];
        let forecast =
            PerformancePredictor::forecast_lift_progression(&records, Exercise::Deadlift, 1)
                .unwrap();
        let dates: Vec<NaiveDate> = forecast.history.iter().map(|p| p.date).collect();
        assert!(dates.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!((forecast.fit.slope - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_lift_forecast_with_zero_future_sessions_is_history_only() {
        let records = vec![
            session((2023, 1, 1), Exercise::Squat, 120.0),
            session((2023, 1, 8), Exercise::Squat, 125.0),
        ];
        let forecast =
            PerformancePredictor::forecast_lift_progression(&records, Exercise::Squat, 0).unwrap();
        assert!(forecast.projected.is_empty());
        assert_eq!(forecast.history.len(), 2);
    }

    #[test]
    fn test_lift_forecast_needs_two_sessions_of_that_lift() {
        let records = vec![
            session((2023, 1, 1), Exercise::BenchPress, 100.0),
            session((2023, 1, 8), Exercise::BenchPress, 102.5),
            session((2023, 1, 8), Exercise::Squat, 140.0),
        ];
        let err = PerformancePredictor::forecast_lift_progression(&records, Exercise::Squat, 3)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData { .. }));
    }
}
