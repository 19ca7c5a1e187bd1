//! Timestamp rounding functionality.
//!
//! This module rounds raw attendance timestamps to a configured interval
//! boundary, measured from local midnight. Rounding that lands on 24:00
//! rolls the date forward; the date component is never truncated.

use chrono::{Duration, NaiveDateTime};

use crate::config::{CheckpointRounding, RoundingConfig, RoundingDirection, RoundingPolicy};
use crate::models::{AttendanceDay, BreakRecord};

/// Rounds a timestamp to the policy's interval boundary.
///
/// Boundaries are multiples of `interval_minutes` counted from the
/// timestamp's local midnight. `Down` floors, `Up` ceils, and `Nearest`
/// rounds to the closest boundary with an exact tie rounding up.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_timestamp;
/// use payroll_engine::config::{RoundingDirection, RoundingPolicy};
/// use chrono::NaiveDate;
///
/// let policy = RoundingPolicy {
///     interval_minutes: 15,
///     direction: RoundingDirection::Nearest,
/// };
/// let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
///
/// // 08:58 rounds up to 09:00.
/// let rounded = round_timestamp(date.and_hms_opt(8, 58, 0).unwrap(), &policy);
/// assert_eq!(rounded, date.and_hms_opt(9, 0, 0).unwrap());
///
/// // 18:05 rounds down to 18:00.
/// let rounded = round_timestamp(date.and_hms_opt(18, 5, 0).unwrap(), &policy);
/// assert_eq!(rounded, date.and_hms_opt(18, 0, 0).unwrap());
/// ```
pub fn round_timestamp(timestamp: NaiveDateTime, policy: &RoundingPolicy) -> NaiveDateTime {
    let interval_secs = i64::from(policy.interval_minutes) * 60;
    let midnight = timestamp
        .date()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always a valid time");
    let elapsed_secs = (timestamp - midnight).num_seconds();

    let floored = elapsed_secs / interval_secs * interval_secs;
    let remainder = elapsed_secs - floored;

    let rounded_secs = match policy.direction {
        RoundingDirection::Down => floored,
        RoundingDirection::Up => {
            if remainder > 0 {
                floored + interval_secs
            } else {
                floored
            }
        }
        // An exact tie (precisely half an interval) rounds up.
        RoundingDirection::Nearest => {
            if remainder * 2 >= interval_secs {
                floored + interval_secs
            } else {
                floored
            }
        }
    };

    // Adding to midnight rolls the date forward when rounding reaches 24:00.
    midnight + Duration::seconds(rounded_secs)
}

/// Applies one checkpoint's rounding, honoring both the master switch and
/// the checkpoint's own enable flag.
fn round_checkpoint(
    timestamp: NaiveDateTime,
    master_enabled: bool,
    checkpoint: &CheckpointRounding,
) -> NaiveDateTime {
    if master_enabled && checkpoint.enabled {
        round_timestamp(timestamp, &checkpoint.policy)
    } else {
        timestamp
    }
}

/// An attendance day's timestamps after checkpoint rounding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundedAttendance {
    /// Check-in after rounding.
    pub check_in: NaiveDateTime,
    /// Check-out after rounding.
    pub check_out: NaiveDateTime,
    /// Break records after rounding.
    pub breaks: Vec<BreakRecord>,
}

/// Rounds all four checkpoint kinds of an attendance day.
///
/// Each checkpoint (check-in, check-out, break-start, break-end) has its own
/// policy and enable flag; the master `enabled` switch turns the feature off
/// entirely, passing raw timestamps through unchanged.
pub fn apply_checkpoint_rounding(day: &AttendanceDay, config: &RoundingConfig) -> RoundedAttendance {
    RoundedAttendance {
        check_in: round_checkpoint(day.check_in, config.enabled, &config.check_in),
        check_out: round_checkpoint(day.check_out, config.enabled, &config.check_out),
        breaks: day
            .breaks
            .iter()
            .map(|b| BreakRecord {
                start: round_checkpoint(b.start, config.enabled, &config.break_start),
                end: round_checkpoint(b.end, config.enabled, &config.break_end),
            })
            .collect(),
    }
}
