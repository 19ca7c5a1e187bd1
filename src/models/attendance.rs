//! Attendance models: raw per-day records and period summaries.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single break taken during an attendance day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakRecord {
    /// The start of the break.
    pub start: NaiveDateTime,
    /// The end of the break.
    pub end: NaiveDateTime,
}

impl BreakRecord {
    /// Returns the signed duration of the break in minutes.
    ///
    /// A negative value indicates inconsistent data; the break evaluator
    /// rejects it rather than clamping.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// One day of raw attendance for one employee.
///
/// Timestamps are wall-clock values as recorded; rounding is applied by the
/// engine according to the company's rounding configuration. Holiday and
/// weekend flags are supplied by the caller (the attendance store knows the
/// company calendar; the engine does not).
///
/// # Example
///
/// ```
/// use payroll_engine::models::AttendanceDay;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let day = AttendanceDay {
///     date,
///     check_in: date.and_hms_opt(8, 58, 0).unwrap(),
///     check_out: date.and_hms_opt(18, 5, 0).unwrap(),
///     breaks: vec![],
///     is_holiday: false,
///     is_weekend: false,
/// };
/// assert!(!day.is_holiday);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceDay {
    /// The attendance date (the day the shift started).
    pub date: NaiveDate,
    /// Raw check-in timestamp.
    pub check_in: NaiveDateTime,
    /// Raw check-out timestamp.
    pub check_out: NaiveDateTime,
    /// Breaks taken during the day.
    #[serde(default)]
    pub breaks: Vec<BreakRecord>,
    /// Whether the date is a company holiday.
    #[serde(default)]
    pub is_holiday: bool,
    /// Whether the date is a weekend day.
    #[serde(default)]
    pub is_weekend: bool,
}

/// Period-level attendance exceptions supplied by the caller.
///
/// Lateness and absence are judged against the employee's schedule, which
/// lives outside the engine; the attendance store evaluates them and passes
/// the totals in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceExceptions {
    /// Days absent in the period.
    pub absence_days: u32,
    /// Number of late arrivals.
    pub late_count: u32,
    /// Total minutes late across the period.
    pub total_late_minutes: i64,
    /// Number of early leaves.
    pub early_leave_count: u32,
    /// Total minutes left early across the period.
    pub total_early_leave_minutes: i64,
}

/// Aggregated attendance figures for one employee over one pay period.
///
/// The working-time fields are derived from the processed attendance days;
/// the exception fields are merged from [`AttendanceExceptions`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// Days with a processed attendance record.
    pub working_days: u32,
    /// Net working hours over the period.
    pub working_hours: Decimal,
    /// Net working minutes over the period.
    pub net_working_minutes: i64,
    /// Number of shifts worked (one per attendance day).
    pub number_of_shifts: u32,
    /// Days absent.
    pub absence_days: u32,
    /// Number of late arrivals.
    pub late_count: u32,
    /// Total minutes late.
    pub total_late_minutes: i64,
    /// Number of early leaves.
    pub early_leave_count: u32,
    /// Total minutes left early.
    pub total_early_leave_minutes: i64,
}
