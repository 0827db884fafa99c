// ABOUTME: Before/after partitioning of aligned records around a dietary intervention date
// ABOUTME: Also parses the user-supplied intervention date string
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::errors::{AnalysisError, AnalysisResult};
use crate::ingest::SHEET_DATE_FORMAT;
use crate::models::AlignedRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date formats accepted for a user-supplied intervention date.
const INTERVENTION_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", SHEET_DATE_FORMAT];

/// Aligned records partitioned around an intervention date.
///
/// `before` holds records dated strictly before the intervention; `after`
/// holds records on or after it. Every input record lands in exactly one
/// side, in its original order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterventionSplit {
    /// Records dated before the intervention
    pub before: Vec<AlignedRecord>,
    /// Records dated on or after the intervention
    pub after: Vec<AlignedRecord>,
}

impl InterventionSplit {
    /// Total number of records across both sides.
    #[must_use]
    pub fn total(&self) -> usize {
        self.before.len() + self.after.len()
    }
}

/// Partition aligned records around the intervention date.
///
/// The training day decides the side: strictly earlier dates go to `before`,
/// the intervention day itself and everything later to `after`.
#[must_use]
pub fn split_at_intervention(
    records: Vec<AlignedRecord>,
    intervention: NaiveDate,
) -> InterventionSplit {
    let (after, before): (Vec<AlignedRecord>, Vec<AlignedRecord>) = records
        .into_iter()
        .partition(|record| record.date >= intervention);
    InterventionSplit { before, after }
}

/// Parse a user-supplied intervention date.
///
/// Accepts ISO dates (`2023-01-20`) and the sheet format (`01/20/2023`).
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidDate`] when the input matches neither
/// format.
pub fn parse_intervention_date(input: &str) -> AnalysisResult<NaiveDate> {
    let trimmed = input.trim();
    for format in INTERVENTION_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }
    Err(AnalysisError::invalid_date(
        trimmed,
        "expected YYYY-MM-DD or MM/DD/YYYY",
    ))
}
