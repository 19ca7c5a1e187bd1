//! Attendance-to-Payroll Calculation Engine
//!
//! This crate converts raw attendance timestamps and company policy
//! configuration into a verified payroll breakdown for one employee in one
//! pay period: timestamp rounding, break compliance, working-hours splitting,
//! overtime classification, allowance/deduction evaluation, and final
//! gross/net aggregation. Identical inputs always produce an identical
//! result, which the preview-before-finalize flow depends on.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
