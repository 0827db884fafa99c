// ABOUTME: CSV ingestion for the curated workout and dietary sheets
// ABOUTME: Parses sheet rows into typed entries; all validation failures surface here
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Sheet Ingestion
//!
//! The input sheets are CSV exports with a header row. Workout columns:
//! `Date`, `Exercise`, `Sets`, `Reps`, `Weight (kg)`; dietary columns:
//! `Date`, `Calories`, `Protein (g)`, `Carbs (g)`, `Fats (g)`. Dates use the
//! sheet format `%m/%d/%Y`.
//!
//! Parsing is the validation boundary: malformed cells, missing columns, and
//! unknown exercise names are rejected here with the offending row named, and
//! nothing partial is returned.

use crate::errors::{AnalysisError, AnalysisResult};
use crate::models::{DietEntry, Exercise, WorkoutEntry};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Date format used by both input sheets.
pub const SHEET_DATE_FORMAT: &str = "%m/%d/%Y";

#[derive(Debug, Deserialize)]
struct WorkoutRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Exercise")]
    exercise: String,
    #[serde(rename = "Sets")]
    sets: u32,
    #[serde(rename = "Reps")]
    reps: u32,
    #[serde(rename = "Weight (kg)")]
    weight_kg: f64,
}

#[derive(Debug, Deserialize)]
struct DietRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Calories")]
    calories: f64,
    #[serde(rename = "Protein (g)")]
    protein_g: f64,
    #[serde(rename = "Carbs (g)")]
    carbs_g: f64,
    #[serde(rename = "Fats (g)")]
    fats_g: f64,
}

/// Read the workout sheet from any reader.
///
/// # Errors
///
/// Returns [`AnalysisError::MalformedInput`] for unreadable CSV, missing
/// columns, and unparsable cells, and [`AnalysisError::UnknownExercise`] for
/// exercise names outside the supported lifts.
pub fn read_workout_sheet<R: Read>(reader: R) -> AnalysisResult<Vec<WorkoutEntry>> {
    let mut csv_reader = sheet_reader(reader);
    let mut entries = Vec::new();
    for (index, row) in csv_reader.deserialize::<WorkoutRow>().enumerate() {
        let row = row.map_err(|e| malformed_row("workout", index, &e))?;
        entries.push(WorkoutEntry {
            date: parse_sheet_date("workout", index, &row.date)?,
            exercise: row.exercise.parse::<Exercise>()?,
            sets: row.sets,
            reps: row.reps,
            weight_kg: row.weight_kg,
        });
    }
    debug!(rows = entries.len(), "parsed workout sheet");
    Ok(entries)
}

/// Read the dietary sheet from any reader.
///
/// # Errors
///
/// Returns [`AnalysisError::MalformedInput`] for unreadable CSV, missing
/// columns, and unparsable cells.
pub fn read_diet_sheet<R: Read>(reader: R) -> AnalysisResult<Vec<DietEntry>> {
    let mut csv_reader = sheet_reader(reader);
    let mut entries = Vec::new();
    for (index, row) in csv_reader.deserialize::<DietRow>().enumerate() {
        let row = row.map_err(|e| malformed_row("dietary", index, &e))?;
        entries.push(DietEntry {
            date: parse_sheet_date("dietary", index, &row.date)?,
            calories: row.calories,
            protein_g: row.protein_g,
            carbs_g: row.carbs_g,
            fats_g: row.fats_g,
        });
    }
    debug!(rows = entries.len(), "parsed dietary sheet");
    Ok(entries)
}

/// Load the workout sheet from a file path.
///
/// # Errors
///
/// Same failure modes as [`read_workout_sheet`], plus
/// [`AnalysisError::MalformedInput`] when the file cannot be opened.
pub fn load_workout_sheet(path: &Path) -> AnalysisResult<Vec<WorkoutEntry>> {
    read_workout_sheet(open_sheet(path)?)
}

/// Load the dietary sheet from a file path.
///
/// # Errors
///
/// Same failure modes as [`read_diet_sheet`], plus
/// [`AnalysisError::MalformedInput`] when the file cannot be opened.
pub fn load_diet_sheet(path: &Path) -> AnalysisResult<Vec<DietEntry>> {
    read_diet_sheet(open_sheet(path)?)
}

fn open_sheet(path: &Path) -> AnalysisResult<File> {
    File::open(path).map_err(|e| {
        AnalysisError::malformed_input(format!("failed to open sheet '{}': {e}", path.display()))
    })
}

fn sheet_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

// Sheet rows are 1-based and the header occupies the first row.
fn sheet_row_number(index: usize) -> usize {
    index + 2
}

fn malformed_row(sheet: &str, index: usize, err: &csv::Error) -> AnalysisError {
    AnalysisError::malformed_input(format!(
        "{sheet} sheet row {}: {err}",
        sheet_row_number(index)
    ))
}

fn parse_sheet_date(sheet: &str, index: usize, raw: &str) -> AnalysisResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), SHEET_DATE_FORMAT).map_err(|e| {
        AnalysisError::malformed_input(format!(
            "{sheet} sheet row {}: invalid Date '{raw}' ({e}); expected MM/DD/YYYY",
            sheet_row_number(index)
        ))
    })
}
