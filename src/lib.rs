// ABOUTME: Library entry point for the OptiLift fitness analysis crate
// ABOUTME: CSV ingestion, derived metrics, date alignment, statistics, and forecasts
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # OptiLift
//!
//! Offline analysis for a personal training log: load workout and diet CSV
//! sheets, derive per-record metrics, and run correlation, regression,
//! effectiveness, and forecasting analyses over the combined data.
//!
//! ## Features
//!
//! - **Sheet ingestion**: Typed CSV parsing with row-level error reporting
//! - **Derived metrics**: Standardized weight, training volume, intensity and calorie bins
//! - **Date alignment**: Same-day and previous-day-diet joins of the two sheets
//! - **Statistics**: Correlation matrix, least-squares fits, Welch's t-test
//! - **Forecasting**: Volume over a calorie grid, per-lift weight projections
//!
//! ## Architecture
//!
//! The crate follows a load-then-analyze flow:
//! - **Ingest**: Parse the CSV sheets into typed entries
//! - **Metrics**: Derive standardized weight, volume, and category bins
//! - **Alignment**: Join the two sheets by date, same-day or lagged
//! - **Intelligence**: Statistics, forecasting, and insight producers
//! - **Session**: Owns the loaded data and dispatches analysis requests
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use optilift::errors::AnalysisResult;
//! use optilift::session::{AnalysisRequest, AnalysisSession};
//! use std::path::Path;
//!
//! fn main() -> AnalysisResult<()> {
//!     let mut session = AnalysisSession::new();
//!     session.load_workout_csv(Path::new("workouts.csv"))?;
//!     session.load_diet_csv(Path::new("diet.csv"))?;
//!
//!     let report = session.run_analysis(&AnalysisRequest::DietCorrelation)?;
//!     println!("{report:?}");
//!
//!     Ok(())
//! }
//! ```

/// Strength ratios and category thresholds with their published defaults
pub mod config;

/// Unified error handling for ingestion and analysis
pub mod errors;

/// CSV sheet parsing into typed workout and diet entries
pub mod ingest;

/// Analytics over the loaded data: metrics, alignment, statistics, forecasts
pub mod intelligence;

/// Common data models for workout, diet, and combined records
pub mod models;

/// Analysis session owning the loaded datasets and dispatching requests
pub mod session;
