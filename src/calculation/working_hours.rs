//! Working-hours calculation functionality.
//!
//! This module combines rounded check-in/check-out timestamps and the break
//! evaluation into the day's gross/net working minutes, split into night and
//! regular portions against the configured night window. Shifts whose
//! check-out wall-clock time is earlier than check-in are treated as
//! overnight.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::config::{BreakType, NightWindow};
use crate::error::{EngineError, EngineResult};
use crate::models::{BreakEvaluation, WorkingHoursResult};

/// Normalizes a shift's check-out against its check-in.
///
/// If check-out is earlier than check-in, the shift crossed midnight with
/// both timestamps recorded on the same date: 24 hours are added once and
/// the shift is flagged overnight. A check-out that is still not after
/// check-in afterwards is inconsistent data and fails the day.
///
/// Returns the adjusted check-out and whether the shift is overnight.
pub fn normalize_shift(
    date: NaiveDate,
    check_in: NaiveDateTime,
    check_out: NaiveDateTime,
) -> EngineResult<(NaiveDateTime, bool)> {
    if check_out >= check_in {
        return Ok((check_out, check_out.date() > check_in.date()));
    }

    let adjusted = check_out + Duration::hours(24);
    if adjusted <= check_in {
        return Err(EngineError::DataIntegrity {
            date,
            field: "check_out".to_string(),
            message: format!(
                "check-out {} precedes check-in {} by more than a day",
                check_out, check_in
            ),
        });
    }
    Ok((adjusted, true))
}

/// Computes the day's working-hours split.
///
/// `check_out` must already be normalized (see [`normalize_shift`]).
/// Gross minutes are the check-in/check-out difference; net minutes deduct
/// the effective break only for unpaid break types. Night minutes are the
/// overlap of the worked interval with the night window, capped at the net
/// minutes so the regular portion can never go negative; `night_minutes +
/// regular_minutes == net_working_minutes` always holds.
///
/// # Errors
///
/// An unpaid effective break exceeding the gross minutes is a
/// data-integrity failure, not something to clamp silently.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{calculate_working_hours, normalize_shift};
/// use payroll_engine::config::{BreakType, NightWindow};
/// use payroll_engine::models::BreakEvaluation;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let check_in = date.and_hms_opt(9, 0, 0).unwrap();
/// let (check_out, overnight) =
///     normalize_shift(date, check_in, date.and_hms_opt(18, 0, 0).unwrap()).unwrap();
/// let breaks = BreakEvaluation {
///     total_break_minutes: 55,
///     effective_break_minutes: 55,
///     compliant: true,
///     break_count: 1,
///     night_rules_applied: false,
/// };
/// let window = NightWindow {
///     start: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
///     end: NaiveTime::from_hms_opt(5, 0, 0).unwrap(),
/// };
///
/// let result = calculate_working_hours(
///     date, check_in, check_out, overnight, &breaks, BreakType::Unpaid, &window,
/// ).unwrap();
/// assert_eq!(result.gross_working_minutes, 540);
/// assert_eq!(result.net_working_minutes, 485);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn calculate_working_hours(
    date: NaiveDate,
    check_in: NaiveDateTime,
    check_out: NaiveDateTime,
    is_overnight: bool,
    break_eval: &BreakEvaluation,
    break_type: BreakType,
    night_window: &NightWindow,
) -> EngineResult<WorkingHoursResult> {
    let gross_working_minutes = (check_out - check_in).num_minutes();

    let deducted = match break_type {
        BreakType::Unpaid => break_eval.effective_break_minutes,
        BreakType::Paid => 0,
    };
    if deducted > gross_working_minutes {
        return Err(EngineError::DataIntegrity {
            date,
            field: "effective_break_minutes".to_string(),
            message: format!(
                "unpaid effective break ({deducted} min) exceeds gross working time ({gross_working_minutes} min)"
            ),
        });
    }
    let net_working_minutes = gross_working_minutes - deducted;

    let overlap = night_window.overlap_minutes(check_in, check_out);
    let night_minutes = overlap.min(net_working_minutes);
    let regular_minutes = net_working_minutes - night_minutes;

    Ok(WorkingHoursResult {
        gross_working_minutes,
        net_working_minutes,
        total_break_minutes: break_eval.total_break_minutes,
        effective_break_minutes: break_eval.effective_break_minutes,
        break_compliant: break_eval.compliant,
        is_night_shift: night_minutes > 0,
        is_overnight_shift: is_overnight,
        night_minutes,
        regular_minutes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn dt(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn window() -> NightWindow {
        NightWindow {
            start: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(5, 0, 0).unwrap(),
        }
    }

    fn break_eval(total: i64, effective: i64) -> BreakEvaluation {
        BreakEvaluation {
            total_break_minutes: total,
            effective_break_minutes: effective,
            compliant: true,
            break_count: 1,
            night_rules_applied: false,
        }
    }

    // ==========================================================================
    // WH-001: standard day shift, unpaid break deducted
    // 09:00-18:00 with 55 effective break minutes: gross 540, net 485
    // ==========================================================================
    #[test]
    fn test_wh_001_standard_day_shift() {
        let result = calculate_working_hours(
            date(),
            dt("2025-03-10", "09:00:00"),
            dt("2025-03-10", "18:00:00"),
            false,
            &break_eval(55, 55),
            BreakType::Unpaid,
            &window(),
        )
        .unwrap();

        assert_eq!(result.gross_working_minutes, 540);
        assert_eq!(result.net_working_minutes, 485);
        assert_eq!(result.night_minutes, 0);
        assert_eq!(result.regular_minutes, 485);
        assert!(!result.is_night_shift);
        assert!(!result.is_overnight_shift);
    }

    // ==========================================================================
    // WH-002: paid breaks do not reduce net minutes
    // ==========================================================================
    #[test]
    fn test_wh_002_paid_break_not_deducted() {
        let result = calculate_working_hours(
            date(),
            dt("2025-03-10", "09:00:00"),
            dt("2025-03-10", "18:00:00"),
            false,
            &break_eval(55, 55),
            BreakType::Paid,
            &window(),
        )
        .unwrap();

        assert_eq!(result.gross_working_minutes, 540);
        assert_eq!(result.net_working_minutes, 540);
    }

    // ==========================================================================
    // WH-003: overnight shift 22:00 -> 06:00 next day
    // gross 480, night 420 (22:00-05:00), regular 60 (05:00-06:00)
    // ==========================================================================
    #[test]
    fn test_wh_003_overnight_shift_night_split() {
        let check_in = dt("2025-03-10", "22:00:00");
        let (check_out, overnight) =
            normalize_shift(date(), check_in, dt("2025-03-11", "06:00:00")).unwrap();
        assert!(overnight);

        let result = calculate_working_hours(
            date(),
            check_in,
            check_out,
            overnight,
            &break_eval(0, 0),
            BreakType::Paid,
            &window(),
        )
        .unwrap();

        assert_eq!(result.gross_working_minutes, 480);
        assert_eq!(result.net_working_minutes, 480);
        assert_eq!(result.night_minutes, 420);
        assert_eq!(result.regular_minutes, 60);
        assert!(result.is_night_shift);
        assert!(result.is_overnight_shift);
    }

    // ==========================================================================
    // WH-004: same-date overnight wall-clock times get 24h added once
    // ==========================================================================
    #[test]
    fn test_wh_004_normalize_infers_overnight() {
        // Both stamps recorded on the shift's start date.
        let (check_out, overnight) = normalize_shift(
            date(),
            dt("2025-03-10", "22:00:00"),
            dt("2025-03-10", "06:00:00"),
        )
        .unwrap();

        assert!(overnight);
        assert_eq!(check_out, dt("2025-03-11", "06:00:00"));
    }

    // ==========================================================================
    // WH-005: check-out more than a day before check-in fails
    // ==========================================================================
    #[test]
    fn test_wh_005_inconsistent_check_out_is_error() {
        let err = normalize_shift(
            date(),
            dt("2025-03-10", "09:00:00"),
            dt("2025-03-09", "08:00:00"),
        )
        .unwrap_err();

        match err {
            EngineError::DataIntegrity { field, .. } => assert_eq!(field, "check_out"),
            other => panic!("expected DataIntegrity, got {other:?}"),
        }
    }

    // ==========================================================================
    // WH-006: unpaid effective break exceeding gross fails the day
    // ==========================================================================
    #[test]
    fn test_wh_006_break_exceeding_gross_is_error() {
        let err = calculate_working_hours(
            date(),
            dt("2025-03-10", "09:00:00"),
            dt("2025-03-10", "09:30:00"),
            false,
            &break_eval(0, 45),
            BreakType::Unpaid,
            &window(),
        )
        .unwrap_err();

        match err {
            EngineError::DataIntegrity { field, message, .. } => {
                assert_eq!(field, "effective_break_minutes");
                assert!(message.contains("exceeds gross"));
            }
            other => panic!("expected DataIntegrity, got {other:?}"),
        }
    }

    #[test]
    fn test_night_minutes_capped_at_net() {
        // Full-night shift 22:00 -> 05:00 (gross 420, all in window) with a
        // 60-minute unpaid break: net 360, so night caps at 360 and regular
        // stays zero instead of going negative.
        let check_in = dt("2025-03-10", "22:00:00");
        let (check_out, overnight) =
            normalize_shift(date(), check_in, dt("2025-03-11", "05:00:00")).unwrap();

        let result = calculate_working_hours(
            date(),
            check_in,
            check_out,
            overnight,
            &break_eval(60, 60),
            BreakType::Unpaid,
            &window(),
        )
        .unwrap();

        assert_eq!(result.net_working_minutes, 360);
        assert_eq!(result.night_minutes, 360);
        assert_eq!(result.regular_minutes, 0);
        assert_eq!(
            result.night_minutes + result.regular_minutes,
            result.net_working_minutes
        );
    }

    #[test]
    fn test_normalize_passes_through_ordinary_shift() {
        let (check_out, overnight) = normalize_shift(
            date(),
            dt("2025-03-10", "09:00:00"),
            dt("2025-03-10", "18:00:00"),
        )
        .unwrap();
        assert!(!overnight);
        assert_eq!(check_out, dt("2025-03-10", "18:00:00"));
    }

    #[test]
    fn test_zero_duration_shift() {
        let t = dt("2025-03-10", "09:00:00");
        let (check_out, overnight) = normalize_shift(date(), t, t).unwrap();
        assert!(!overnight);

        let result = calculate_working_hours(
            date(),
            t,
            check_out,
            overnight,
            &break_eval(0, 0),
            BreakType::Paid,
            &window(),
        )
        .unwrap();
        assert_eq!(result.gross_working_minutes, 0);
        assert_eq!(result.net_working_minutes, 0);
    }

    #[test]
    fn test_evening_shift_partial_night_overlap() {
        // 13:00 -> 23:00: one hour falls inside the 22:00-05:00 window.
        let result = calculate_working_hours(
            date(),
            dt("2025-03-10", "13:00:00"),
            dt("2025-03-10", "23:00:00"),
            false,
            &break_eval(60, 60),
            BreakType::Unpaid,
            &window(),
        )
        .unwrap();

        assert_eq!(result.gross_working_minutes, 600);
        assert_eq!(result.net_working_minutes, 540);
        assert_eq!(result.night_minutes, 60);
        assert_eq!(result.regular_minutes, 480);
        assert!(result.is_night_shift);
    }
}
