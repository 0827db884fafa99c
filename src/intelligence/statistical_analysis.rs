// ABOUTME: Statistical engine: Pearson correlations, OLS fits, and Welch's t-test
// ABOUTME: Hand-rolled f64 implementations sized for a few hundred rows of personal data
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Statistical analysis
//!
//! The numeric core behind the diet/workout analyses: a pairwise Pearson
//! correlation matrix over the shared metric columns, single- and
//! multi-feature least-squares fits, and Welch's unequal-variance t-test for
//! the before/after intervention comparison. P-values use a normal
//! approximation of the t distribution; at the sample sizes a personal
//! training log produces the error is well under the decision thresholds.

use crate::errors::{AnalysisError, AnalysisResult};
use crate::intelligence::intervention::InterventionSplit;
use crate::models::AlignedRecord;
use serde::{Deserialize, Serialize};

/// Pivots smaller than this are treated as a rank deficiency.
const SINGULAR_PIVOT_THRESHOLD: f64 = 1e-10;

/// The metric columns shared by every aligned record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricColumn {
    /// Sets × reps × standardized weight
    #[serde(rename = "Total Volume")]
    TotalVolume,
    /// Daily energy intake, kilocalories
    #[serde(rename = "Calories")]
    Calories,
    /// Daily protein intake, grams
    #[serde(rename = "Protein (g)")]
    Protein,
    /// Daily carbohydrate intake, grams
    #[serde(rename = "Carbs (g)")]
    Carbs,
    /// Daily fat intake, grams
    #[serde(rename = "Fats (g)")]
    Fats,
}

impl MetricColumn {
    /// All correlated columns, in report order.
    pub const ALL: [Self; 5] = [
        Self::TotalVolume,
        Self::Calories,
        Self::Protein,
        Self::Carbs,
        Self::Fats,
    ];

    /// Column label as it appears in reports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TotalVolume => "Total Volume",
            Self::Calories => "Calories",
            Self::Protein => "Protein (g)",
            Self::Carbs => "Carbs (g)",
            Self::Fats => "Fats (g)",
        }
    }

    /// Pull this column's value out of an aligned record.
    #[must_use]
    pub const fn extract(&self, record: &AlignedRecord) -> f64 {
        match self {
            Self::TotalVolume => record.total_volume,
            Self::Calories => record.calories,
            Self::Protein => record.protein_g,
            Self::Carbs => record.carbs_g,
            Self::Fats => record.fats_g,
        }
    }

    fn position(self) -> usize {
        match self {
            Self::TotalVolume => 0,
            Self::Calories => 1,
            Self::Protein => 2,
            Self::Carbs => 3,
            Self::Fats => 4,
        }
    }
}

impl std::fmt::Display for MetricColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pairwise Pearson correlations over the five shared metric columns.
///
/// Symmetric with a unit diagonal. Any pair involving a zero-variance column
/// is NaN, as is everything when no records were supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    /// Column order for `values`
    pub columns: [MetricColumn; 5],
    /// `values[i][j]` is the correlation between `columns[i]` and `columns[j]`
    pub values: [[f64; 5]; 5],
}

impl CorrelationMatrix {
    /// Look up a single pairwise correlation.
    #[must_use]
    pub fn get(&self, row: MetricColumn, column: MetricColumn) -> f64 {
        self.values[row.position()][column.position()]
    }
}

/// Single-feature least-squares fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearFit {
    /// Rate of change per unit of the feature
    pub slope: f64,
    /// Predicted value at feature zero
    pub intercept: f64,
    /// Fraction of target variance the fit explains (0-1)
    pub r_squared: f64,
}

impl LinearFit {
    /// Predicted target value for a feature value.
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope.mul_add(x, self.intercept)
    }
}

/// Multi-feature least-squares fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiLinearFit {
    /// Predicted value when every feature is zero
    pub intercept: f64,
    /// One coefficient per feature, in input order
    pub coefficients: Vec<f64>,
    /// Fraction of target variance the fit explains (0-1)
    pub r_squared: f64,
}

/// Welch's t-test outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TTestResult {
    /// Welch's t-statistic; positive when the first sample's mean is larger
    pub t_statistic: f64,
    /// Two-sided p-value
    pub p_value: f64,
    /// Welch-Satterthwaite degrees of freedom
    pub degrees_of_freedom: f64,
    /// Classification of the p-value
    pub significance: SignificanceLevel,
}

/// Statistical significance levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignificanceLevel {
    /// No statistical significance (p >= 0.1)
    NotSignificant,
    /// Weak significance (p < 0.1)
    Weak,
    /// Moderate significance (p < 0.05)
    Moderate,
    /// Strong significance (p < 0.01)
    Strong,
    /// Very strong significance (p < 0.001)
    VeryStrong,
}

impl SignificanceLevel {
    /// Get the alpha threshold for this significance level
    #[must_use]
    pub const fn alpha_threshold(self) -> f64 {
        match self {
            Self::NotSignificant => 1.0,
            Self::Weak => 0.1,
            Self::Moderate => 0.05,
            Self::Strong => 0.01,
            Self::VeryStrong => 0.001,
        }
    }

    /// Create significance level from p-value
    #[must_use]
    pub fn from_p_value(p_value: f64) -> Self {
        if p_value < 0.001 {
            Self::VeryStrong
        } else if p_value < 0.01 {
            Self::Strong
        } else if p_value < 0.05 {
            Self::Moderate
        } else if p_value < 0.1 {
            Self::Weak
        } else {
            Self::NotSignificant
        }
    }
}

/// Outcome of the diet-effectiveness comparison.
///
/// `NotApplicable` is a defined result, not an error: with every usable
/// record on one side of the intervention date there is nothing to compare.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EffectivenessReport {
    /// One or both partitions had no usable total-volume values.
    NotApplicable {
        /// Usable records before the intervention
        before_count: usize,
        /// Usable records on or after the intervention
        after_count: usize,
    },
    /// Both partitions were non-empty and the t-test ran.
    Tested {
        /// Welch's t-statistic; positive when volume rose after the intervention
        t_statistic: f64,
        /// Two-sided p-value
        p_value: f64,
        /// Welch-Satterthwaite degrees of freedom
        degrees_of_freedom: f64,
        /// Classification of the p-value
        significance: SignificanceLevel,
        /// Usable records before the intervention
        before_count: usize,
        /// Usable records on or after the intervention
        after_count: usize,
    },
}

/// Statistical analyzer with hand-rolled implementations of the tests the
/// analyses need.
pub struct StatisticalAnalyzer;

impl StatisticalAnalyzer {
    /// Pearson correlation between two equally long samples.
    ///
    /// Returns NaN when either sample has zero variance or no data.
    #[must_use]
    pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
        let n = x.len().min(y.len());
        if n == 0 {
            return f64::NAN;
        }
        let n_f = n as f64;
        let mean_x = x[..n].iter().sum::<f64>() / n_f;
        let mean_y = y[..n].iter().sum::<f64>() / n_f;

        let mut sum_xx = 0.0;
        let mut sum_yy = 0.0;
        let mut sum_x_y = 0.0;
        for (&xi, &yi) in x[..n].iter().zip(&y[..n]) {
            let dx = xi - mean_x;
            let dy = yi - mean_y;
            sum_xx = dx.mul_add(dx, sum_xx);
            sum_yy = dy.mul_add(dy, sum_yy);
            sum_x_y = dx.mul_add(dy, sum_x_y);
        }

        let denominator = (sum_xx * sum_yy).sqrt();
        if denominator == 0.0 {
            f64::NAN
        } else {
            sum_x_y / denominator
        }
    }

    /// Pairwise correlation matrix over the five shared metric columns.
    #[must_use]
    pub fn correlation_matrix(records: &[AlignedRecord]) -> CorrelationMatrix {
        let series: Vec<Vec<f64>> = MetricColumn::ALL
            .iter()
            .map(|column| records.iter().map(|r| column.extract(r)).collect())
            .collect();

        let mut values = [[f64::NAN; 5]; 5];
        for (i, xs) in series.iter().enumerate() {
            for (j, ys) in series.iter().enumerate() {
                if i == j {
                    values[i][j] = if records.is_empty() { f64::NAN } else { 1.0 };
                } else if i < j {
                    let r = Self::pearson_correlation(xs, ys);
                    values[i][j] = r;
                    values[j][i] = r;
                }
            }
        }

        CorrelationMatrix {
            columns: MetricColumn::ALL,
            values,
        }
    }

    /// Least-squares fit of `y = slope * x + intercept` over (x, y) pairs.
    ///
    /// A zero-variance feature degenerates to a flat fit through the target
    /// mean rather than an error, matching how least-squares backends treat
    /// constant columns.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InsufficientData`] with fewer than 2 points.
    pub fn linear_fit(points: &[(f64, f64)]) -> AnalysisResult<LinearFit> {
        if points.len() < 2 {
            return Err(AnalysisError::insufficient_data(format!(
                "linear fit requires at least 2 data points, got {}",
                points.len()
            )));
        }

        let n = points.len() as f64;
        let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
        let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

        let mut sum_xx = 0.0;
        let mut sum_yy = 0.0;
        let mut sum_x_y = 0.0;
        for &(x, y) in points {
            let dx = x - mean_x;
            let dy = y - mean_y;
            sum_xx = dx.mul_add(dx, sum_xx);
            sum_yy = dy.mul_add(dy, sum_yy);
            sum_x_y = dx.mul_add(dy, sum_x_y);
        }

        if sum_xx.abs() < f64::EPSILON {
            return Ok(LinearFit {
                slope: 0.0,
                intercept: mean_y,
                r_squared: 0.0,
            });
        }

        let slope = sum_x_y / sum_xx;
        let intercept = slope.mul_add(-mean_x, mean_y);
        let denominator = (sum_xx * sum_yy).sqrt();
        let correlation = if denominator == 0.0 {
            0.0
        } else {
            sum_x_y / denominator
        };

        Ok(LinearFit {
            slope,
            intercept,
            r_squared: correlation * correlation,
        })
    }

    /// Least-squares fit of a target on several features at once.
    ///
    /// `feature_rows[i]` holds the feature values for `targets[i]`; every row
    /// must have the same width. Coefficients come back in feature order.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::MalformedInput`] for mismatched or ragged
    /// inputs, and [`AnalysisError::InsufficientData`] when there are fewer
    /// than 2 rows or the feature matrix is rank-deficient (collinear
    /// features, or fewer rows than features).
    pub fn multi_linear_fit(
        feature_rows: &[Vec<f64>],
        targets: &[f64],
    ) -> AnalysisResult<MultiLinearFit> {
        if feature_rows.len() != targets.len() {
            return Err(AnalysisError::malformed_input(format!(
                "feature rows ({}) and targets ({}) must have equal length",
                feature_rows.len(),
                targets.len()
            )));
        }
        if feature_rows.len() < 2 {
            return Err(AnalysisError::insufficient_data(format!(
                "multi-feature fit requires at least 2 data points, got {}",
                feature_rows.len()
            )));
        }
        let width = feature_rows[0].len();
        if width == 0 || feature_rows.iter().any(|row| row.len() != width) {
            return Err(AnalysisError::malformed_input(
                "feature rows must be non-empty and uniform in width",
            ));
        }

        // Normal equations over the design matrix [1, features...].
        let dims = width + 1;
        let mut xt_x = vec![vec![0.0_f64; dims]; dims];
        let mut xt_y = vec![0.0_f64; dims];
        for (row, &y) in feature_rows.iter().zip(targets) {
            let mut design = Vec::with_capacity(dims);
            design.push(1.0);
            design.extend_from_slice(row);
            for i in 0..dims {
                xt_y[i] = design[i].mul_add(y, xt_y[i]);
                for j in 0..dims {
                    xt_x[i][j] = design[i].mul_add(design[j], xt_x[i][j]);
                }
            }
        }

        let solution = Self::solve_linear_system(xt_x, xt_y).ok_or_else(|| {
            AnalysisError::insufficient_data(
                "feature matrix is rank-deficient; features are collinear or rows too few",
            )
        })?;
        let (intercept, coefficients) = match solution.split_first() {
            Some((&first, rest)) => (first, rest.to_vec()),
            None => (0.0, Vec::new()),
        };

        let n = targets.len() as f64;
        let mean_y = targets.iter().sum::<f64>() / n;
        let mut ss_res = 0.0;
        let mut ss_tot = 0.0;
        for (row, &y) in feature_rows.iter().zip(targets) {
            let predicted = coefficients
                .iter()
                .zip(row)
                .fold(intercept, |acc, (&c, &f)| c.mul_add(f, acc));
            let residual = y - predicted;
            let deviation = y - mean_y;
            ss_res = residual.mul_add(residual, ss_res);
            ss_tot = deviation.mul_add(deviation, ss_tot);
        }
        let r_squared = if ss_tot == 0.0 {
            // A constant target is either fit exactly or not at all.
            if ss_res.abs() < f64::EPSILON {
                1.0
            } else {
                0.0
            }
        } else {
            1.0 - ss_res / ss_tot
        };

        Ok(MultiLinearFit {
            intercept,
            coefficients,
            r_squared,
        })
    }

    /// Welch's unequal-variance t-test, two-sided.
    ///
    /// The first sample is the comparison group: a positive t-statistic means
    /// its mean exceeds the second sample's.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InsufficientData`] when either sample is
    /// empty.
    pub fn welch_t_test(sample_a: &[f64], sample_b: &[f64]) -> AnalysisResult<TTestResult> {
        if sample_a.is_empty() || sample_b.is_empty() {
            return Err(AnalysisError::insufficient_data(format!(
                "t-test requires non-empty samples, got {} and {}",
                sample_a.len(),
                sample_b.len()
            )));
        }

        let na = sample_a.len() as f64;
        let nb = sample_b.len() as f64;
        let mean_a = sample_a.iter().sum::<f64>() / na;
        let mean_b = sample_b.iter().sum::<f64>() / nb;
        let var_a = Self::sample_variance(sample_a, mean_a);
        let var_b = Self::sample_variance(sample_b, mean_b);

        let se_a = var_a / na;
        let se_b = var_b / nb;
        let pooled = se_a + se_b;
        let t_statistic = (mean_a - mean_b) / pooled.sqrt();

        // Welch-Satterthwaite approximation; fractional df is expected.
        let degrees_of_freedom =
            pooled * pooled / (se_a * se_a / (na - 1.0) + se_b * se_b / (nb - 1.0));

        let p_value = Self::t_test_p_value(t_statistic.abs(), degrees_of_freedom);
        Ok(TTestResult {
            t_statistic,
            p_value,
            degrees_of_freedom,
            significance: SignificanceLevel::from_p_value(p_value),
        })
    }

    /// Compare training volume after an intervention against before it.
    ///
    /// Non-finite volumes are discarded first. With every usable value on one
    /// side the comparison is undefined and the report says so instead of
    /// failing; the t-test runs with the after-partition as the first sample,
    /// so a positive t-statistic means volume rose.
    #[must_use]
    pub fn diet_effectiveness(split: &InterventionSplit) -> EffectivenessReport {
        let before: Vec<f64> = Self::usable_volumes(&split.before);
        let after: Vec<f64> = Self::usable_volumes(&split.after);

        if before.is_empty() || after.is_empty() {
            return EffectivenessReport::NotApplicable {
                before_count: before.len(),
                after_count: after.len(),
            };
        }

        match Self::welch_t_test(&after, &before) {
            Ok(result) => EffectivenessReport::Tested {
                t_statistic: result.t_statistic,
                p_value: result.p_value,
                degrees_of_freedom: result.degrees_of_freedom,
                significance: result.significance,
                before_count: before.len(),
                after_count: after.len(),
            },
            // Unreachable: both samples are non-empty here.
            Err(_) => EffectivenessReport::NotApplicable {
                before_count: before.len(),
                after_count: after.len(),
            },
        }
    }

    fn usable_volumes(records: &[AlignedRecord]) -> Vec<f64> {
        records
            .iter()
            .map(|r| r.total_volume)
            .filter(|v| v.is_finite())
            .collect()
    }

    fn sample_variance(values: &[f64], mean: f64) -> f64 {
        let n = values.len() as f64;
        let sum_sq = values.iter().fold(0.0, |acc, &v| {
            let d = v - mean;
            d.mul_add(d, acc)
        });
        sum_sq / (n - 1.0)
    }

    /// Two-tailed p-value from a t-statistic via a normal approximation.
    fn t_test_p_value(t_stat: f64, df: f64) -> f64 {
        if df <= 0.0 {
            return 1.0;
        }
        let z_equivalent = t_stat / (1.0 + t_stat * t_stat / (4.0 * df)).sqrt();
        2.0 * (1.0 - Self::standard_normal_cdf(z_equivalent.abs()))
    }

    /// Standard normal CDF for non-negative inputs (Abramowitz and Stegun).
    fn standard_normal_cdf(x: f64) -> f64 {
        let t = 1.0 / 0.231_641_9_f64.mul_add(x, 1.0);
        let poly = t.mul_add(
            t.mul_add(
                t.mul_add(t.mul_add(1.330_274_429, -1.821_255_978), 1.781_477_937),
                -0.356_563_782,
            ),
            0.319_381_530,
        );
        (0.398_942_3 * (x * x * -0.5).exp()).mul_add(-poly, 1.0)
    }

    fn solve_linear_system(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
        let n = b.len();
        for col in 0..n {
            // Partial pivoting keeps the elimination stable.
            let pivot_row = (col..n).max_by(|&i, &j| {
                a[i][col]
                    .abs()
                    .partial_cmp(&a[j][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })?;
            if a[pivot_row][col].abs() < SINGULAR_PIVOT_THRESHOLD {
                return None;
            }
            a.swap(col, pivot_row);
            b.swap(col, pivot_row);

            for row in (col + 1)..n {
                let factor = a[row][col] / a[col][col];
                for k in col..n {
                    a[row][k] -= factor * a[col][k];
                }
                b[row] -= factor * b[col];
            }
        }

        let mut solution = vec![0.0_f64; n];
        for row in (0..n).rev() {
            let mut sum = b[row];
            for col in (row + 1)..n {
                sum -= a[row][col] * solution[col];
            }
            solution[row] = sum / a[row][row];
        }
        Some(solution)
    }
}
