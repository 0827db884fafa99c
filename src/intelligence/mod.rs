// ABOUTME: Analysis engine modules: derived metrics, alignment, statistics, forecasting, insights
// ABOUTME: Everything downstream of ingestion lives here; the session wires these together
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Intelligence Module
//!
//! Analytics over the loaded training and diet data: weight standardization,
//! derived metrics, date alignment of the two sheets, the statistical engine,
//! performance forecasting, and chart-ready insight producers.

/// Date alignment of workout and diet records
pub mod alignment;
/// Chart-ready insight data producers
pub mod insights;
/// Before/after partitioning around an intervention date
pub mod intervention;
/// Derived per-record metrics (standardized weight, volume, categories)
pub mod metrics;
/// Volume and lift forecasting from least-squares trends
pub mod performance_prediction;
/// Weight standardization across the compound lifts
pub mod standardization;
/// Correlations, regressions, and the effectiveness t-test
pub mod statistical_analysis;

pub use alignment::{align, AlignmentPolicy};
pub use insights::{
    goal_progress, macro_distribution, strength_gains, GoalProgress, MacroDistribution,
    StrengthGainSeries,
};
pub use intervention::{parse_intervention_date, split_at_intervention, InterventionSplit};
pub use metrics::MetricsCalculator;
pub use performance_prediction::{
    CalorieProjection, LiftForecast, PerformanceForecast, PerformancePredictor, WeightPoint,
};
pub use standardization::WeightStandardizer;
pub use statistical_analysis::{
    CorrelationMatrix, EffectivenessReport, LinearFit, MetricColumn, MultiLinearFit,
    SignificanceLevel, StatisticalAnalyzer, TTestResult,
};
