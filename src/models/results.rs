//! Calculation result models for the payroll engine.
//!
//! This module contains the result types produced at each stage of the
//! calculation chain, the final [`PayrollResult`], and the batch
//! [`PayrollPreviewResponse`], including the audit trace structures that
//! record every stage for transparency.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AllowanceType;

use super::AttendanceSummary;

/// Warning code: daily overtime cap exceeded.
pub const WARN_CAP_EXCEEDED_DAY: &str = "CAP_EXCEEDED_DAY";
/// Warning code: monthly overtime cap exceeded.
pub const WARN_CAP_EXCEEDED_MONTH: &str = "CAP_EXCEEDED_MONTH";
/// Warning code: break compliance not met.
pub const WARN_BREAK_NON_COMPLIANT: &str = "BREAK_NON_COMPLIANT";
/// Warning code: configuration resolved with documented defaults.
pub const WARN_DEFAULTS_APPLIED: &str = "DEFAULTS_APPLIED";

/// The evaluation of one day's breaks against the break policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakEvaluation {
    /// Sum of recorded break durations, in minutes.
    pub total_break_minutes: i64,
    /// Break minutes counted after the minimum/maximum clamp.
    pub effective_break_minutes: i64,
    /// Whether the recorded breaks satisfy the policy minimum.
    pub compliant: bool,
    /// Number of break records, numbered chronologically from 1.
    pub break_count: u32,
    /// Whether the night-shift minimum/default was used.
    pub night_rules_applied: bool,
}

/// The split of one day's worked time.
///
/// Invariants: `net_working_minutes = gross_working_minutes -
/// (effective_break_minutes when breaks are unpaid)` and
/// `night_minutes + regular_minutes == net_working_minutes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHoursResult {
    /// Minutes between check-in and check-out.
    pub gross_working_minutes: i64,
    /// Gross minutes minus unpaid effective break minutes.
    pub net_working_minutes: i64,
    /// Sum of recorded break durations.
    pub total_break_minutes: i64,
    /// Break minutes counted after clamping.
    pub effective_break_minutes: i64,
    /// Whether break compliance was met.
    pub break_compliant: bool,
    /// Whether any minutes fall inside the night window.
    pub is_night_shift: bool,
    /// Whether the shift crossed midnight.
    pub is_overnight_shift: bool,
    /// Net minutes overlapping the night window.
    pub night_minutes: i64,
    /// Net minutes outside the night window.
    pub regular_minutes: i64,
}

/// Overtime classification for a day or a period aggregate.
///
/// The five overtime categories are mutually exclusive; their minutes sum to
/// `total_overtime_minutes` and their amounts to `total_overtime_amount`.
/// Night work inside the standard threshold is a premium, not overtime, and
/// is carried separately in `night_work_minutes` / `night_work_amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeResult {
    /// Ordinary weekday overtime minutes.
    pub regular_overtime_minutes: i64,
    /// Weekday overtime minutes overlapping the night window.
    pub night_overtime_minutes: i64,
    /// Holiday work minutes outside the night window.
    pub holiday_overtime_minutes: i64,
    /// Holiday work minutes inside the night window.
    pub holiday_night_overtime_minutes: i64,
    /// Weekend work minutes.
    pub weekend_overtime_minutes: i64,

    /// Amount for ordinary weekday overtime.
    pub regular_overtime_amount: Decimal,
    /// Amount for weekday night overtime.
    pub night_overtime_amount: Decimal,
    /// Amount for holiday work outside the night window.
    pub holiday_overtime_amount: Decimal,
    /// Amount for holiday work inside the night window.
    pub holiday_night_overtime_amount: Decimal,
    /// Amount for weekend work.
    pub weekend_overtime_amount: Decimal,

    /// Within-threshold minutes overlapping the night window.
    pub night_work_minutes: i64,
    /// Premium amount for within-threshold night work.
    pub night_work_amount: Decimal,

    /// Overtime minutes beyond the advisory cap; never deducted from pay.
    pub over_cap_minutes: i64,

    /// Sum of the five category minutes.
    pub total_overtime_minutes: i64,
    /// Sum of the five category amounts.
    pub total_overtime_amount: Decimal,
}

impl OvertimeResult {
    /// An all-zero result (a day with overtime classification disabled).
    pub fn zero() -> Self {
        Self {
            regular_overtime_minutes: 0,
            night_overtime_minutes: 0,
            holiday_overtime_minutes: 0,
            holiday_night_overtime_minutes: 0,
            weekend_overtime_minutes: 0,
            regular_overtime_amount: Decimal::ZERO,
            night_overtime_amount: Decimal::ZERO,
            holiday_overtime_amount: Decimal::ZERO,
            holiday_night_overtime_amount: Decimal::ZERO,
            weekend_overtime_amount: Decimal::ZERO,
            night_work_minutes: 0,
            night_work_amount: Decimal::ZERO,
            over_cap_minutes: 0,
            total_overtime_minutes: 0,
            total_overtime_amount: Decimal::ZERO,
        }
    }

    /// Adds another result into this one, category by category.
    ///
    /// Used to build the period aggregate from per-day results.
    pub fn accumulate(&mut self, other: &Self) {
        self.regular_overtime_minutes += other.regular_overtime_minutes;
        self.night_overtime_minutes += other.night_overtime_minutes;
        self.holiday_overtime_minutes += other.holiday_overtime_minutes;
        self.holiday_night_overtime_minutes += other.holiday_night_overtime_minutes;
        self.weekend_overtime_minutes += other.weekend_overtime_minutes;
        self.regular_overtime_amount += other.regular_overtime_amount;
        self.night_overtime_amount += other.night_overtime_amount;
        self.holiday_overtime_amount += other.holiday_overtime_amount;
        self.holiday_night_overtime_amount += other.holiday_night_overtime_amount;
        self.weekend_overtime_amount += other.weekend_overtime_amount;
        self.night_work_minutes += other.night_work_minutes;
        self.night_work_amount += other.night_work_amount;
        self.over_cap_minutes += other.over_cap_minutes;
        self.total_overtime_minutes += other.total_overtime_minutes;
        self.total_overtime_amount += other.total_overtime_amount;
    }

    /// Total pay contributed by this result: overtime plus the night-work
    /// premium.
    pub fn total_pay(&self) -> Decimal {
        self.total_overtime_amount + self.night_work_amount
    }
}

/// One evaluated allowance rule, included or skipped.
///
/// Skipped items are never dropped; `ineligible_reason` explains why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceItem {
    /// The rule code.
    pub code: String,
    /// The rule name.
    pub name: String,
    /// The rule kind.
    pub rule_type: AllowanceType,
    /// The rule amount in minor units.
    pub amount: Decimal,
    /// Whether the allowance is taxable.
    pub taxable: bool,
    /// Whether the item counts toward the totals.
    pub included: bool,
    /// Why the item was excluded, when it was.
    pub ineligible_reason: Option<String>,
}

/// The evaluated allowances for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceResult {
    /// Every evaluated rule, included or not.
    pub items: Vec<AllowanceItem>,
    /// Sum of included item amounts.
    pub total_allowances: Decimal,
    /// Sum of included taxable item amounts.
    pub taxable_allowances: Decimal,
    /// Sum of included non-taxable item amounts.
    pub non_taxable_allowances: Decimal,
}

/// One applied deduction rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionItem {
    /// The rule code.
    pub code: String,
    /// The rule name.
    pub name: String,
    /// The deducted amount in minor units.
    pub amount: Decimal,
    /// The rule's application order.
    pub order: u32,
}

/// The evaluated deductions for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionResult {
    /// Applied rules in application order.
    pub items: Vec<DeductionItem>,
    /// Penalty for late arrival minutes.
    pub late_penalty: Decimal,
    /// Penalty for early leave minutes.
    pub early_leave_penalty: Decimal,
    /// Deduction for absence days.
    pub absence_deduction: Decimal,
    /// Sum of item amounts plus the three penalty terms.
    pub total_deductions: Decimal,
}

/// The fully processed calculation for a single attendance day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayResult {
    /// The attendance date.
    pub date: NaiveDate,
    /// Check-in after rounding.
    pub check_in: NaiveDateTime,
    /// Check-out after rounding (and overnight adjustment).
    pub check_out: NaiveDateTime,
    /// Whether the date was a holiday.
    pub is_holiday: bool,
    /// Whether the date was a weekend day.
    pub is_weekend: bool,
    /// The day's working-hours split.
    pub working_hours: WorkingHoursResult,
    /// The day's overtime classification.
    pub overtime: OvertimeResult,
}

/// The date range of a payroll computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// First day of the period (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Checks if a date falls within this period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// A single step in the audit trace recording a calculation stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The identifier of the stage that ran.
    pub rule_id: String,
    /// The human-readable name of the stage.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the outcome.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate conditions that do not prevent calculation but require
/// downstream attention (e.g. an approval workflow).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationWarning {
    /// A code identifying the warning type.
    pub code: String,
    /// A human-readable description.
    pub message: String,
    /// Severity level ("low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for one payroll calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of stage steps.
    pub steps: Vec<AuditStep>,
    /// Warnings generated during calculation.
    pub warnings: Vec<CalculationWarning>,
}

/// The final payroll breakdown for one employee and one pay period.
///
/// Invariants: `gross_salary = base_salary + total_overtime_pay +
/// total_allowances` and `net_salary = gross_salary - total_deductions`,
/// within one minor unit after the single final rounding. All nested
/// sub-results retain full decimal precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub calculated_at: DateTime<Utc>,
    /// The engine version that produced the result.
    pub engine_version: String,
    /// The employee the result is for.
    pub employee_id: String,
    /// The pay period covered.
    pub period: PayPeriod,

    /// Base salary per the employee's salary type.
    pub base_salary: Decimal,
    /// Overtime amount plus night-work premium.
    pub total_overtime_pay: Decimal,
    /// Sum of included allowances.
    pub total_allowances: Decimal,
    /// Sum of deductions and penalties.
    pub total_deductions: Decimal,
    /// `base_salary + total_overtime_pay + total_allowances`, rounded for
    /// display at the minor unit.
    pub gross_salary: Decimal,
    /// `gross_salary - total_deductions`, rounded once at the minor unit.
    pub net_salary: Decimal,

    /// The period attendance summary.
    pub summary: AttendanceSummary,
    /// Per-day calculations.
    pub days: Vec<DayResult>,
    /// Period aggregate of the per-day overtime results.
    pub overtime: OvertimeResult,
    /// The evaluated allowances.
    pub allowances: AllowanceResult,
    /// The evaluated deductions.
    pub deductions: DeductionResult,

    /// Dotted paths of configuration fields that fell back to defaults.
    pub computed_with_defaults: Vec<String>,
    /// Complete audit trace of calculation stages.
    pub audit_trace: AuditTrace,
}

/// One employee's line in a batch preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewItem {
    /// The employee.
    pub employee_id: String,
    /// Gross salary for the period.
    pub gross_salary: Decimal,
    /// Net salary for the period.
    pub net_salary: Decimal,
    /// Total overtime minutes for the period.
    pub total_overtime_minutes: i64,
    /// Number of warnings attached to the calculation.
    pub warning_count: usize,
}

/// A per-employee failure in a batch preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewError {
    /// The employee whose calculation failed.
    pub employee_id: String,
    /// The error message.
    pub message: String,
}

/// The aggregate preview over many employees, for UI display before
/// finalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPreviewResponse {
    /// When the preview was generated.
    pub generated_at: DateTime<Utc>,
    /// The pay period covered.
    pub period: PayPeriod,
    /// Successful per-employee previews.
    pub items: Vec<PreviewItem>,
    /// Per-employee failures; a failed employee never blocks the batch.
    pub errors: Vec<PreviewError>,
    /// Sum of gross salaries across items.
    pub total_gross: Decimal,
    /// Sum of net salaries across items.
    pub total_net: Decimal,
}
