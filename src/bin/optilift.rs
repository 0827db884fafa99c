// ABOUTME: OptiLift CLI - runs the fitness analyses over workout and diet CSV sheets
// ABOUTME: Loads the sheets into a session, dispatches one analysis, prints a JSON report
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! OptiLift command-line interface.
//!
//! Usage:
//! ```bash
//! # Correlate training volume with the diet columns
//! optilift --workout workouts.csv --diet diet.csv correlate
//!
//! # Forecast volume over a calorie grid
//! optilift --workout workouts.csv --diet diet.csv predict
//!
//! # Test a diet change that started on a given day
//! optilift --workout workouts.csv --diet diet.csv effectiveness --date 2023-01-20
//!
//! # Regress one lift on the previous day's macros
//! optilift --workout workouts.csv --diet diet.csv nutrition --exercise "Bench Press"
//!
//! # Chart data: macro shares, per-lift history, goal standing, lift forecast
//! optilift --workout workouts.csv --diet diet.csv macros
//! optilift --workout workouts.csv gains
//! optilift --workout workouts.csv --diet diet.csv progress --exercise Squat --goal 180
//! optilift --workout workouts.csv --diet diet.csv forecast --exercise Deadlift --sessions 3
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use optilift::errors::{AnalysisError, AnalysisResult};
use optilift::intelligence::parse_intervention_date;
use optilift::models::Exercise;
use optilift::session::{AnalysisRequest, AnalysisSession};

#[derive(Parser)]
#[command(
    name = "optilift",
    about = "OptiLift Fitness Analysis CLI",
    long_about = "Analyze workout and diet CSV sheets: correlations, forecasts, diet effectiveness, and chart-ready insight data."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Workout sheet CSV (Date, Exercise, Sets, Reps, Weight (kg))
    #[arg(long, global = true)]
    workout: Option<PathBuf>,

    /// Diet sheet CSV (Date, Calories, Protein (g), Carbs (g), Fats (g))
    #[arg(long, global = true)]
    diet: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Correlate training volume with calories and macros
    Correlate,

    /// Fit volume on calories and project it over a forward calorie grid
    Predict,

    /// Compare volume before and after a diet change
    Effectiveness {
        /// First day the new diet counts as active (YYYY-MM-DD or MM/DD/YYYY)
        #[arg(long)]
        date: String,
    },

    /// Regress one lift's standardized weight on the previous day's macros
    Nutrition {
        /// Lift name: Bench Press, Squat, or Deadlift
        #[arg(long)]
        exercise: String,
    },

    /// Mean macro intake and per-macro shares
    Macros,

    /// Raw-weight history per lift
    Gains,

    /// One lift's standing against a goal weight
    Progress {
        /// Lift name: Bench Press, Squat, or Deadlift
        #[arg(long)]
        exercise: String,

        /// Target raw weight in kilograms
        #[arg(long)]
        goal: f64,
    },

    /// Project one lift's weight over future sessions
    Forecast {
        /// Lift name: Bench Press, Squat, or Deadlift
        #[arg(long)]
        exercise: String,

        /// Future sessions to project, 30 days apart
        #[arg(long, default_value_t = 3)]
        sessions: u32,
    },
}

fn main() -> AnalysisResult<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    let mut session = AnalysisSession::new();
    if let Some(path) = cli.workout.as_deref() {
        session.load_workout_csv(path)?;
    }
    if let Some(path) = cli.diet.as_deref() {
        session.load_diet_csv(path)?;
    }

    match cli.command {
        Command::Correlate => {
            let report = session.run_analysis(&AnalysisRequest::DietCorrelation)?;
            print_json(&report)
        }
        Command::Predict => {
            let report = session.run_analysis(&AnalysisRequest::PerformancePrediction)?;
            print_json(&report)
        }
        Command::Effectiveness { date } => {
            let intervention_date = parse_intervention_date(&date)?;
            let report =
                session.run_analysis(&AnalysisRequest::DietEffectiveness { intervention_date })?;
            print_json(&report)
        }
        Command::Nutrition { exercise } => {
            let exercise: Exercise = exercise.parse()?;
            let report = session.run_analysis(&AnalysisRequest::NutritionAnalysis { exercise })?;
            print_json(&report)
        }
        Command::Macros => print_json(&session.macro_distribution()?),
        Command::Gains => print_json(&session.strength_gains()?),
        Command::Progress { exercise, goal } => {
            let exercise: Exercise = exercise.parse()?;
            print_json(&session.goal_progress(exercise, goal)?)
        }
        Command::Forecast { exercise, sessions } => {
            let exercise: Exercise = exercise.parse()?;
            print_json(&session.forecast_lift(exercise, sessions)?)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> AnalysisResult<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(|e| {
        AnalysisError::malformed_input(format!("failed to render report as JSON: {e}"))
    })?;
    println!("{rendered}");
    Ok(())
}
