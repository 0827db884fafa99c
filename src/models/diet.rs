// ABOUTME: Diet-side domain types: logged dietary entries and the calorie-binned record
// ABOUTME: Macros are tracked in grams, energy in kilocalories
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Daily calorie-intake bin.
///
/// Bins are left-closed: an intake sitting exactly on a threshold belongs to
/// the higher bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalorieCategory {
    /// Intake below the medium threshold
    Low,
    /// Intake in the medium band
    Medium,
    /// Intake at or above the high threshold
    High,
}

impl CalorieCategory {
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

impl fmt::Display for CalorieCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the dietary sheet, as logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietEntry {
    /// Day the intake was logged
    pub date: NaiveDate,
    /// Total energy intake, kilocalories
    pub calories: f64,
    /// Protein intake, grams
    pub protein_g: f64,
    /// Carbohydrate intake, grams
    pub carbs_g: f64,
    /// Fat intake, grams
    pub fats_g: f64,
}

/// A dietary entry with its calorie bin attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietRecord {
    /// Day the intake was logged
    pub date: NaiveDate,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels() {
        assert_eq!(CalorieCategory::Low.as_str(), "Low");
        assert_eq!(CalorieCategory::Medium.to_string(), "Medium");
        assert_eq!(CalorieCategory::High.as_str(), "High");
    }

    #[test]
    fn test_diet_record_serialization_keeps_field_names() {
        let record = DietRecord {
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            calories: 2500.0,
            protein_g: 120.0,
            carbs_g: 300.0,
            fats_g: 70.0,
            calorie_level: CalorieCategory::Medium,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["calories"], 2500.0);
        assert_eq!(json["protein_g"], 120.0);
        assert_eq!(json["calorie_level"], "Medium");
    }
}
