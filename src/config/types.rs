//! Fully-resolved configuration types for payroll calculation.
//!
//! Every type in this module is an immutable, fully-populated value: optional
//! fields and fallback defaults exist only in the raw configuration layer
//! (see [`crate::config::resolver`]). Calculators receive these types and
//! never null-check.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Rounding direction for timestamps and for the final salary amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingDirection {
    /// Ceil to the next boundary.
    Up,
    /// Floor to the previous boundary.
    Down,
    /// Round to the closest boundary; an exact tie rounds up.
    Nearest,
}

/// The rounding intervals a [`RoundingPolicy`] may use, in minutes.
pub const SUPPORTED_ROUNDING_INTERVALS: [u32; 5] = [5, 10, 15, 30, 60];

/// Rounding rule for a single attendance checkpoint.
///
/// # Example
///
/// ```
/// use payroll_engine::config::{RoundingDirection, RoundingPolicy};
///
/// let policy = RoundingPolicy {
///     interval_minutes: 15,
///     direction: RoundingDirection::Nearest,
/// };
/// assert!(policy.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundingPolicy {
    /// The rounding interval in minutes (5, 10, 15, 30, or 60).
    pub interval_minutes: u32,
    /// Which way to round.
    pub direction: RoundingDirection,
}

impl RoundingPolicy {
    /// Checks the interval is one of the supported values.
    pub fn validate(&self) -> Result<(), String> {
        if SUPPORTED_ROUNDING_INTERVALS.contains(&self.interval_minutes) {
            Ok(())
        } else {
            Err(format!(
                "unsupported rounding interval {} (expected one of {:?})",
                self.interval_minutes, SUPPORTED_ROUNDING_INTERVALS
            ))
        }
    }
}

/// Rounding rule plus enable flag for one checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointRounding {
    /// Whether rounding is applied at this checkpoint.
    pub enabled: bool,
    /// The rounding rule used when enabled.
    pub policy: RoundingPolicy,
}

/// Timestamp rounding configuration for all four attendance checkpoints.
///
/// Each checkpoint is independently toggleable; the master `enabled` switch
/// turns the whole feature off, in which case raw timestamps pass through
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundingConfig {
    /// Master switch for timestamp rounding.
    pub enabled: bool,
    /// Rounding applied to check-in timestamps.
    pub check_in: CheckpointRounding,
    /// Rounding applied to check-out timestamps.
    pub check_out: CheckpointRounding,
    /// Rounding applied to break-start timestamps.
    pub break_start: CheckpointRounding,
    /// Rounding applied to break-end timestamps.
    pub break_end: CheckpointRounding,
}

/// A half-open clock interval `[start, end)` that may wrap midnight.
///
/// Work falling inside the window earns a night premium independent of
/// overtime status. `start == end` denotes the empty window.
///
/// # Example
///
/// ```
/// use payroll_engine::config::NightWindow;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let window = NightWindow {
///     start: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
///     end: NaiveTime::from_hms_opt(5, 0, 0).unwrap(),
/// };
/// assert!(window.wraps_midnight());
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let shift_start = date.and_hms_opt(22, 0, 0).unwrap();
/// let shift_end = date.succ_opt().unwrap().and_hms_opt(6, 0, 0).unwrap();
/// assert_eq!(window.overlap_minutes(shift_start, shift_end), 420);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightWindow {
    /// Start of the window (inclusive).
    pub start: NaiveTime,
    /// End of the window (exclusive).
    pub end: NaiveTime,
}

impl NightWindow {
    /// Returns true if the window crosses midnight (e.g. 22:00–05:00).
    pub fn wraps_midnight(&self) -> bool {
        self.end < self.start
    }

    /// Returns true if the window contains no time at all.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Total overlap, in minutes, between `[interval_start, interval_end)`
    /// and every instance of this window touching that interval.
    ///
    /// The interval may span several calendar days; each day contributes its
    /// own window instance, anchored so that a wrapping window starting on
    /// day `d` ends on day `d + 1`.
    pub fn overlap_minutes(&self, interval_start: NaiveDateTime, interval_end: NaiveDateTime) -> i64 {
        if self.is_empty() || interval_end <= interval_start {
            return 0;
        }

        let mut total = 0i64;
        // A wrapping window anchored the day before the interval begins can
        // still reach into it, so start one day early.
        let first = interval_start.date() - Duration::days(1);
        let last = interval_end.date();
        let mut day = first;
        while day <= last {
            let window_start = day.and_time(self.start);
            let window_end = if self.wraps_midnight() {
                (day + Duration::days(1)).and_time(self.end)
            } else {
                day.and_time(self.end)
            };

            let overlap_start = window_start.max(interval_start);
            let overlap_end = window_end.min(interval_end);
            if overlap_end > overlap_start {
                total += (overlap_end - overlap_start).num_minutes();
            }
            day += Duration::days(1);
        }
        total
    }
}

/// Whether break time is paid or deducted from worked time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakType {
    /// Break minutes count as worked time.
    Paid,
    /// Break minutes are deducted from gross working time.
    Unpaid,
}

/// A named break slot within the working day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakPeriod {
    /// Display name of the period (e.g. "lunch").
    pub name: String,
    /// Scheduled start of the period.
    pub start: NaiveTime,
    /// Scheduled end of the period.
    pub end: NaiveTime,
    /// Expected duration in minutes.
    pub duration_minutes: u32,
    /// Whether the employee may take the break outside the scheduled slot.
    pub flexible: bool,
    /// Position of this period within the day, starting at 1.
    pub order: u32,
}

/// Break policy for a company.
///
/// Invariants (enforced at configuration-resolve time):
/// `minimum_minutes <= maximum_minutes`, `default_minutes` within
/// `[minimum, maximum]`, `max_breaks_per_day >= 1`,
/// `periods_per_attendance >= 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakPolicy {
    /// Whether breaks are paid or unpaid.
    pub break_type: BreakType,
    /// Minimum break minutes required per attendance day.
    pub minimum_minutes: i64,
    /// Maximum break minutes counted per attendance day.
    pub maximum_minutes: i64,
    /// Break minutes assumed when breaks are not tracked.
    pub default_minutes: i64,
    /// Whether actual break records are tracked and summed.
    pub tracking_enabled: bool,
    /// Whether the fixed (non-tracked) mode applies the default minutes.
    pub fixed_mode: bool,
    /// Maximum number of break records allowed per day.
    pub max_breaks_per_day: u32,
    /// Number of break periods scheduled per attendance.
    pub periods_per_attendance: u32,
    /// Ordered break period schedule.
    pub periods: Vec<BreakPeriod>,
    /// Night window used to select the night-specific break minimums.
    pub night_window: NightWindow,
    /// Minimum break minutes when the shift overlaps the night window.
    pub night_minimum_minutes: i64,
    /// Default break minutes when the shift overlaps the night window.
    pub night_default_minutes: i64,
}

/// Per-category overtime multipliers, each at least 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeMultipliers {
    /// Ordinary weekday overtime.
    pub regular: Decimal,
    /// Night work inside the standard threshold (premium, not overtime).
    pub night_work: Decimal,
    /// Overtime overlapping the night window.
    pub night_overtime: Decimal,
    /// Work on a holiday (non-night portion).
    pub holiday_overtime: Decimal,
    /// Work on a holiday overlapping the night window.
    pub holiday_night_overtime: Decimal,
    /// Work on a weekend day.
    pub weekend_overtime: Decimal,
}

/// Overtime classification policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimePolicy {
    /// Whether overtime classification is applied at all.
    pub enabled: bool,
    /// Standard working minutes per day before overtime begins (e.g. 480).
    pub standard_working_minutes_per_day: i64,
    /// The night premium window.
    pub night_window: NightWindow,
    /// The configured rate multipliers.
    pub multipliers: OvertimeMultipliers,
    /// Advisory cap on overtime minutes per day.
    pub max_overtime_minutes_per_day: i64,
    /// Advisory cap on overtime minutes per month.
    pub max_overtime_minutes_per_month: i64,
    /// Substitute the locale's legal minimum multipliers for the configured ones.
    pub use_legal_minimum: bool,
    /// Locale code selecting the legal minimum table (e.g. "jp").
    pub locale: String,
}

/// The kind of an allowance rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowanceType {
    /// Always paid.
    Fixed,
    /// Paid only when the attendance condition is met.
    Conditional,
    /// Paid once; cross-period consumption is tracked by the caller.
    OneTime,
}

/// Attendance condition gating a conditional allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceCondition {
    /// Minimum working days in the period.
    pub min_working_days: u32,
    /// Minimum working hours in the period.
    pub min_working_hours: Decimal,
    /// Requires zero absence days.
    pub no_absence: bool,
    /// Requires zero late arrivals.
    pub no_late_arrival: bool,
    /// Requires zero early leaves.
    pub no_early_leave: bool,
}

/// A single allowance rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceRule {
    /// Stable rule code (e.g. "commute").
    pub code: String,
    /// Display name.
    pub name: String,
    /// The kind of rule.
    pub rule_type: AllowanceType,
    /// Amount in minor currency units.
    pub amount: Decimal,
    /// Whether the allowance is taxable.
    pub taxable: bool,
    /// Condition for `Conditional` rules; `None` for the other kinds.
    pub condition: Option<AllowanceCondition>,
}

/// The full allowance rule set for a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceConfig {
    /// Rules in declaration order.
    pub rules: Vec<AllowanceRule>,
}

/// How a deduction rule computes its amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeductionKind {
    /// Subtract a fixed amount in minor units.
    Fixed {
        /// The amount to subtract.
        amount: Decimal,
    },
    /// Subtract a percentage of the base salary.
    Percentage {
        /// The percentage applied against the base salary (e.g. 10 for 10%).
        percentage: Decimal,
    },
}

/// A single deduction rule.
///
/// Rules apply in ascending `order`; ties are broken by declaration order
/// (the evaluator sorts stably).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRule {
    /// Stable rule code (e.g. "health_insurance").
    pub code: String,
    /// Display name.
    pub name: String,
    /// How the amount is computed.
    pub kind: DeductionKind,
    /// Application order (ascending).
    pub order: u32,
}

/// The full deduction rule set plus attendance penalty settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionConfig {
    /// Rules in declaration order.
    pub rules: Vec<DeductionRule>,
    /// Whether late arrival is penalized per minute.
    pub enable_late_penalty: bool,
    /// Penalty per late minute, in minor units.
    pub late_penalty_per_minute: Decimal,
    /// Whether early leave is penalized per minute.
    pub enable_early_leave_penalty: bool,
    /// Penalty per early-leave minute, in minor units.
    pub early_leave_penalty_per_minute: Decimal,
    /// Whether absence days are deducted from salary.
    pub enable_absence_deduction: bool,
    /// Divisor for the per-day absence deduction (e.g. 20).
    pub standard_working_days_per_month: u32,
}

/// Company-level payroll settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollConfig {
    /// Rounding applied exactly once to the final salary figures,
    /// at the currency's minor unit.
    pub salary_rounding: RoundingDirection,
}

/// The complete, resolved engine configuration for one company.
///
/// Produced by [`crate::config::resolve`]; all invariants hold and no field
/// is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Timestamp rounding configuration.
    pub rounding: RoundingConfig,
    /// Break policy.
    pub break_policy: BreakPolicy,
    /// Overtime policy.
    pub overtime: OvertimePolicy,
    /// Allowance rules.
    pub allowances: AllowanceConfig,
    /// Deduction rules and penalties.
    pub deductions: DeductionConfig,
    /// Payroll aggregation settings.
    pub payroll: PayrollConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rounding_policy_accepts_supported_intervals() {
        for interval in SUPPORTED_ROUNDING_INTERVALS {
            let policy = RoundingPolicy {
                interval_minutes: interval,
                direction: RoundingDirection::Nearest,
            };
            assert!(policy.validate().is_ok());
        }
    }

    #[test]
    fn test_rounding_policy_rejects_unsupported_interval() {
        let policy = RoundingPolicy {
            interval_minutes: 7,
            direction: RoundingDirection::Down,
        };
        let err = policy.validate().unwrap_err();
        assert!(err.contains("unsupported rounding interval 7"));
    }

    #[test]
    fn test_night_window_wraps_midnight() {
        let wrapping = NightWindow {
            start: time(22, 0),
            end: time(5, 0),
        };
        assert!(wrapping.wraps_midnight());

        let same_day = NightWindow {
            start: time(0, 0),
            end: time(5, 0),
        };
        assert!(!same_day.wraps_midnight());
    }

    #[test]
    fn test_empty_night_window_has_no_overlap() {
        let window = NightWindow {
            start: time(22, 0),
            end: time(22, 0),
        };
        assert!(window.is_empty());

        let d = date(2025, 3, 10);
        let overlap = window.overlap_minutes(
            d.and_hms_opt(20, 0, 0).unwrap(),
            d.and_hms_opt(23, 0, 0).unwrap(),
        );
        assert_eq!(overlap, 0);
    }

    #[test]
    fn test_overlap_overnight_shift_with_wrapping_window() {
        // Shift 22:00 -> 06:00 next day, window 22:00-05:00: 420 minutes.
        let window = NightWindow {
            start: time(22, 0),
            end: time(5, 0),
        };
        let d = date(2025, 3, 10);
        let overlap = window.overlap_minutes(
            d.and_hms_opt(22, 0, 0).unwrap(),
            d.succ_opt().unwrap().and_hms_opt(6, 0, 0).unwrap(),
        );
        assert_eq!(overlap, 420);
    }

    #[test]
    fn test_overlap_day_shift_touching_window_start() {
        // Shift 13:00 -> 23:00, window 22:00-05:00: only the 22:00-23:00 hour.
        let window = NightWindow {
            start: time(22, 0),
            end: time(5, 0),
        };
        let d = date(2025, 3, 10);
        let overlap = window.overlap_minutes(
            d.and_hms_opt(13, 0, 0).unwrap(),
            d.and_hms_opt(23, 0, 0).unwrap(),
        );
        assert_eq!(overlap, 60);
    }

    #[test]
    fn test_overlap_shift_starting_before_window_end() {
        // Early shift 04:00 -> 09:00 catches the tail of the previous
        // night's window instance (wrapping 22:00-05:00): 60 minutes.
        let window = NightWindow {
            start: time(22, 0),
            end: time(5, 0),
        };
        let d = date(2025, 3, 10);
        let overlap = window.overlap_minutes(
            d.and_hms_opt(4, 0, 0).unwrap(),
            d.and_hms_opt(9, 0, 0).unwrap(),
        );
        assert_eq!(overlap, 60);
    }

    #[test]
    fn test_overlap_non_wrapping_window() {
        let window = NightWindow {
            start: time(0, 0),
            end: time(5, 0),
        };
        let d = date(2025, 3, 10);
        let overlap = window.overlap_minutes(
            d.and_hms_opt(3, 0, 0).unwrap(),
            d.and_hms_opt(8, 0, 0).unwrap(),
        );
        assert_eq!(overlap, 120);
    }

    #[test]
    fn test_overlap_zero_length_interval() {
        let window = NightWindow {
            start: time(22, 0),
            end: time(5, 0),
        };
        let t = date(2025, 3, 10).and_hms_opt(23, 0, 0).unwrap();
        assert_eq!(window.overlap_minutes(t, t), 0);
    }

    #[test]
    fn test_overlap_multi_day_interval() {
        // 48-hour interval against a wrapping 22:00-05:00 window:
        // 00:00-05:00 tail of the previous instance (300), one full
        // instance (420), and 22:00-24:00 of the last day (120).
        let window = NightWindow {
            start: time(22, 0),
            end: time(5, 0),
        };
        let d = date(2025, 3, 10);
        let overlap = window.overlap_minutes(
            d.and_hms_opt(0, 0, 0).unwrap(),
            (d + Duration::days(2)).and_hms_opt(0, 0, 0).unwrap(),
        );
        assert_eq!(overlap, 300 + 420 + 120);
    }

    #[test]
    fn test_deduction_kind_serialization() {
        let fixed = DeductionKind::Fixed {
            amount: Decimal::new(5000, 0),
        };
        let json = serde_json::to_string(&fixed).unwrap();
        assert!(json.contains("\"type\":\"fixed\""));

        let pct: DeductionKind =
            serde_json::from_str(r#"{"type":"percentage","percentage":"10"}"#).unwrap();
        assert_eq!(
            pct,
            DeductionKind::Percentage {
                percentage: Decimal::new(10, 0)
            }
        );
    }

    #[test]
    fn test_allowance_type_serialization() {
        assert_eq!(
            serde_json::to_string(&AllowanceType::OneTime).unwrap(),
            "\"one_time\""
        );
        let parsed: AllowanceType = serde_json::from_str("\"conditional\"").unwrap();
        assert_eq!(parsed, AllowanceType::Conditional);
    }

    #[test]
    fn test_rounding_direction_serialization() {
        assert_eq!(
            serde_json::to_string(&RoundingDirection::Nearest).unwrap(),
            "\"nearest\""
        );
        let parsed: RoundingDirection = serde_json::from_str("\"down\"").unwrap();
        assert_eq!(parsed, RoundingDirection::Down);
    }
}
