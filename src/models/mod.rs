// ABOUTME: Domain records for the analysis pipeline
// ABOUTME: Workout and diet entries, derived records, and the date-aligned join row
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Domain Models
//!
//! Two-stage record types: `*Entry` structs hold a parsed sheet row exactly as
//! logged; `*Record` structs add the derived fields (standardized weight,
//! total volume, category bins). [`AlignedRecord`] is the row-wise join of one
//! workout record and one diet record under a temporal alignment policy.

pub mod aligned;
pub mod diet;
pub mod workout;

pub use aligned::AlignedRecord;
pub use diet::{CalorieCategory, DietEntry, DietRecord};
pub use workout::{Exercise, IntensityCategory, WorkoutEntry, WorkoutRecord};
