//! Break evaluation functionality.
//!
//! This module computes the actual and effective break minutes for one
//! attendance day and judges compliance against the break policy. Tracked
//! breaks are summed and clamped to the policy's minimum/maximum; fixed-mode
//! policies apply the default minutes without tracking. When the shift
//! overlaps the policy's night window, the night-specific minimum and
//! default replace the day values.

use chrono::NaiveDate;

use crate::config::BreakPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{BreakEvaluation, BreakRecord};

/// Evaluates one day's break records against the break policy.
///
/// Behavior:
/// - With `tracking_enabled`, actual per-break durations are summed,
///   `effective = clamp(actual, minimum, maximum)` and `compliant = actual >=
///   minimum`. With zero recorded breaks the clamp still raises the effective
///   minutes to the policy minimum (the statutory break is deducted whether
///   or not it was taken) and the day is non-compliant.
/// - With `fixed_mode` (non-tracked), `effective = default_minutes` and the
///   day is compliant by definition.
/// - With neither, break handling is disabled: zero effective minutes,
///   compliant.
///
/// Breaks are numbered chronologically starting at 1; a record count above
/// `max_breaks_per_day` or a break ending before it starts is a
/// data-integrity failure for the day, never silently clamped.
///
/// # Arguments
///
/// * `date` - The attendance date, for error reporting
/// * `breaks` - The day's (rounded) break records
/// * `policy` - The break policy
/// * `shift_overlaps_night` - Whether the working interval overlaps the
///   policy's night window, selecting the night minimum/default
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::evaluate_breaks;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::BreakRecord;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::from_yaml_str("{}").unwrap();
/// let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let records = vec![BreakRecord {
///     start: date.and_hms_opt(12, 0, 0).unwrap(),
///     end: date.and_hms_opt(12, 55, 0).unwrap(),
/// }];
///
/// let eval = evaluate_breaks(date, &records, &loader.config().break_policy, false).unwrap();
/// assert_eq!(eval.total_break_minutes, 55);
/// assert_eq!(eval.effective_break_minutes, 55);
/// assert!(eval.compliant);
/// ```
pub fn evaluate_breaks(
    date: NaiveDate,
    breaks: &[BreakRecord],
    policy: &BreakPolicy,
    shift_overlaps_night: bool,
) -> EngineResult<BreakEvaluation> {
    let break_count = breaks.len() as u32;
    if break_count > policy.max_breaks_per_day {
        return Err(EngineError::DataIntegrity {
            date,
            field: "breaks".to_string(),
            message: format!(
                "{} break records exceed the policy maximum of {} per day",
                break_count, policy.max_breaks_per_day
            ),
        });
    }

    // Number breaks chronologically from 1 for error reporting.
    let mut ordered: Vec<(usize, &BreakRecord)> = breaks.iter().enumerate().collect();
    ordered.sort_by_key(|(_, b)| b.start);

    let mut actual_total = 0i64;
    for (number, (index, record)) in ordered.iter().enumerate() {
        let duration = record.duration_minutes();
        if duration < 0 {
            return Err(EngineError::DataIntegrity {
                date,
                field: format!("breaks[{index}].end"),
                message: format!(
                    "break {} ends {} minutes before it starts",
                    number + 1,
                    -duration
                ),
            });
        }
        actual_total += duration;
    }

    let (minimum, default) = if shift_overlaps_night {
        (policy.night_minimum_minutes, policy.night_default_minutes)
    } else {
        (policy.minimum_minutes, policy.default_minutes)
    };

    let evaluation = if policy.tracking_enabled {
        BreakEvaluation {
            total_break_minutes: actual_total,
            effective_break_minutes: actual_total.clamp(minimum, policy.maximum_minutes),
            compliant: actual_total >= minimum,
            break_count,
            night_rules_applied: shift_overlaps_night,
        }
    } else if policy.fixed_mode {
        BreakEvaluation {
            total_break_minutes: actual_total,
            effective_break_minutes: default,
            compliant: true,
            break_count,
            night_rules_applied: shift_overlaps_night,
        }
    } else {
        BreakEvaluation {
            total_break_minutes: actual_total,
            effective_break_minutes: 0,
            compliant: true,
            break_count,
            night_rules_applied: false,
        }
    };

    Ok(evaluation)
}
