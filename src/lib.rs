//! Timesheet billing summary generator.
//!
//! This crate turns a timesheet export (one row per employee time entry) into
//! a billing summary with an Overtime and a Regular line for every employee
//! and job activity, sorted and currency-formatted for presentation.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod table;
