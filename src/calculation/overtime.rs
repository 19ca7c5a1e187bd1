//! Overtime classification functionality.
//!
//! This module splits one day's net working minutes into the five overtime
//! categories (regular, night, holiday, holiday-night, weekend) plus the
//! within-threshold night-work premium, and prices each category from the
//! employee's hourly rate and the policy multipliers.
//!
//! ## Classification order
//!
//! 1. **Holiday**: the entire worked day carries the holiday premium, split
//!    by night overlap. Regular/weekend classification does not apply.
//! 2. **Weekend**: the entire worked day is weekend overtime.
//! 3. **Ordinary weekday**: minutes up to the standard threshold are covered
//!    by base pay, with any night overlap earning the night-work premium;
//!    minutes beyond the threshold become overtime, attributed to the night
//!    category up to the day's night overlap and to the regular category
//!    for the rest.
//!
//! Amounts accumulate at full decimal precision; rounding happens exactly
//! once, at final aggregation.

use rust_decimal::Decimal;

use crate::config::OvertimePolicy;
use crate::models::{OvertimeResult, WorkingHoursResult};

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Prices a category: `(minutes / 60) x hourly_rate x multiplier`.
///
/// Multiplication happens before the division so amounts with exact
/// minor-unit representations stay exact.
fn category_amount(minutes: i64, hourly_rate: Decimal, multiplier: Decimal) -> Decimal {
    Decimal::from(minutes) * hourly_rate * multiplier / MINUTES_PER_HOUR
}

/// Classifies one day's worked minutes into overtime categories.
///
/// The advisory caps are never applied to pay: minutes beyond
/// `max_overtime_minutes_per_day` are reported in `over_cap_minutes` for an
/// approval workflow to act on. With the policy disabled, the result is all
/// zeros and the day contributes nothing beyond base pay.
///
/// # Arguments
///
/// * `hours` - The day's working-hours split
/// * `is_holiday` - Whether the day is a company holiday
/// * `is_weekend` - Whether the day is a weekend day
/// * `policy` - The overtime policy (resolved multipliers)
/// * `hourly_rate` - The employee's effective hourly rate in minor units
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::classify_overtime;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::WorkingHoursResult;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::from_yaml_str("{}").unwrap();
/// let hours = WorkingHoursResult {
///     gross_working_minutes: 540,
///     net_working_minutes: 485,
///     total_break_minutes: 55,
///     effective_break_minutes: 55,
///     break_compliant: true,
///     is_night_shift: false,
///     is_overnight_shift: false,
///     night_minutes: 0,
///     regular_minutes: 485,
/// };
///
/// let result = classify_overtime(
///     &hours, false, false, &loader.config().overtime, Decimal::new(1_500, 0),
/// );
/// assert_eq!(result.regular_overtime_minutes, 5);
/// assert_eq!(result.total_overtime_minutes, 5);
/// ```
pub fn classify_overtime(
    hours: &WorkingHoursResult,
    is_holiday: bool,
    is_weekend: bool,
    policy: &OvertimePolicy,
    hourly_rate: Decimal,
) -> OvertimeResult {
    if !policy.enabled {
        return OvertimeResult::zero();
    }

    let net = hours.net_working_minutes;
    let night = hours.night_minutes;
    let multipliers = &policy.multipliers;
    let mut result = OvertimeResult::zero();

    if is_holiday {
        // The entire holiday day carries the holiday premium, split by
        // night overlap. Weekday/weekend classification does not apply.
        let holiday_night = night;
        let holiday_day = net - holiday_night;
        result.holiday_overtime_minutes = holiday_day;
        result.holiday_night_overtime_minutes = holiday_night;
        result.holiday_overtime_amount =
            category_amount(holiday_day, hourly_rate, multipliers.holiday_overtime);
        result.holiday_night_overtime_amount = category_amount(
            holiday_night,
            hourly_rate,
            multipliers.holiday_night_overtime,
        );
    } else if is_weekend {
        result.weekend_overtime_minutes = net;
        result.weekend_overtime_amount =
            category_amount(net, hourly_rate, multipliers.weekend_overtime);
    } else {
        let standard = policy.standard_working_minutes_per_day;
        let overtime = (net - standard).max(0);

        // Overtime accrues at the end of the shift, which is where the night
        // window sits for evening work: attribute overtime to the night
        // category first, up to the day's night overlap.
        let night_overtime = night.min(overtime);
        let regular_overtime = overtime - night_overtime;
        let night_work = night - night_overtime;

        result.regular_overtime_minutes = regular_overtime;
        result.night_overtime_minutes = night_overtime;
        result.regular_overtime_amount =
            category_amount(regular_overtime, hourly_rate, multipliers.regular);
        result.night_overtime_amount =
            category_amount(night_overtime, hourly_rate, multipliers.night_overtime);

        // Within-threshold night minutes earn the night premium without
        // being overtime.
        result.night_work_minutes = night_work;
        result.night_work_amount = category_amount(night_work, hourly_rate, multipliers.night_work);
    }

    result.total_overtime_minutes = result.regular_overtime_minutes
        + result.night_overtime_minutes
        + result.holiday_overtime_minutes
        + result.holiday_night_overtime_minutes
        + result.weekend_overtime_minutes;
    result.total_overtime_amount = result.regular_overtime_amount
        + result.night_overtime_amount
        + result.holiday_overtime_amount
        + result.holiday_night_overtime_amount
        + result.weekend_overtime_amount;

    result.over_cap_minutes =
        (result.total_overtime_minutes - policy.max_overtime_minutes_per_day).max(0);

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NightWindow, OvertimeMultipliers};
    use chrono::NaiveTime;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn policy() -> OvertimePolicy {
        OvertimePolicy {
            enabled: true,
            standard_working_minutes_per_day: 480,
            night_window: NightWindow {
                start: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
                end: NaiveTime::from_hms_opt(5, 0, 0).unwrap(),
            },
            multipliers: OvertimeMultipliers {
                regular: dec("1.25"),
                night_work: dec("1.25"),
                night_overtime: dec("1.50"),
                holiday_overtime: dec("1.35"),
                holiday_night_overtime: dec("1.60"),
                weekend_overtime: dec("1.35"),
            },
            max_overtime_minutes_per_day: 240,
            max_overtime_minutes_per_month: 2700,
            use_legal_minimum: false,
            locale: "jp".to_string(),
        }
    }

    fn hours(net: i64, night: i64) -> WorkingHoursResult {
        WorkingHoursResult {
            gross_working_minutes: net,
            net_working_minutes: net,
            total_break_minutes: 0,
            effective_break_minutes: 0,
            break_compliant: true,
            is_night_shift: night > 0,
            is_overnight_shift: false,
            night_minutes: night,
            regular_minutes: net - night,
        }
    }

    fn category_minutes_sum(result: &OvertimeResult) -> i64 {
        result.regular_overtime_minutes
            + result.night_overtime_minutes
            + result.holiday_overtime_minutes
            + result.holiday_night_overtime_minutes
            + result.weekend_overtime_minutes
    }

    // ==========================================================================
    // OC-001: 485 net weekday minutes, threshold 480: 5 minutes regular OT
    // ==========================================================================
    #[test]
    fn test_oc_001_small_weekday_overtime() {
        let result = classify_overtime(&hours(485, 0), false, false, &policy(), dec("1500"));

        assert_eq!(result.regular_overtime_minutes, 5);
        assert_eq!(result.night_overtime_minutes, 0);
        assert_eq!(result.total_overtime_minutes, 5);
        // 5/60 x 1500 x 1.25 = 156.25, kept at full precision.
        assert_eq!(result.regular_overtime_amount, dec("156.25"));
        assert_eq!(result.total_overtime_amount, dec("156.25"));
    }

    // ==========================================================================
    // OC-002: overnight shift at exactly the threshold: night premium only
    // net 480, night 420 -> zero overtime, 420 night-work minutes
    // ==========================================================================
    #[test]
    fn test_oc_002_night_shift_at_threshold() {
        let result = classify_overtime(&hours(480, 420), false, false, &policy(), dec("1500"));

        assert_eq!(result.total_overtime_minutes, 0);
        assert_eq!(result.total_overtime_amount, Decimal::ZERO);
        assert_eq!(result.night_work_minutes, 420);
        // 420/60 x 1500 x 1.25 = 13125.
        assert_eq!(result.night_work_amount, dec("13125"));
        assert_eq!(result.total_pay(), dec("13125"));
    }

    // ==========================================================================
    // OC-003: holiday classifies the whole day, split by night overlap
    // 540 net minutes, 60 in the window -> 480 holiday + 60 holiday-night
    // ==========================================================================
    #[test]
    fn test_oc_003_holiday_covers_entire_day() {
        let result = classify_overtime(&hours(540, 60), true, false, &policy(), dec("1500"));

        assert_eq!(result.holiday_overtime_minutes, 480);
        assert_eq!(result.holiday_night_overtime_minutes, 60);
        assert_eq!(
            result.holiday_overtime_minutes + result.holiday_night_overtime_minutes,
            540
        );
        assert_eq!(result.regular_overtime_minutes, 0);
        assert_eq!(result.weekend_overtime_minutes, 0);
        // 480/60 x 1500 x 1.35 = 16200; 60/60 x 1500 x 1.60 = 2400.
        assert_eq!(result.holiday_overtime_amount, dec("16200"));
        assert_eq!(result.holiday_night_overtime_amount, dec("2400"));
        assert_eq!(result.total_overtime_amount, dec("18600"));
    }

    // ==========================================================================
    // OC-004: weekend classifies the whole day at the weekend rate
    // ==========================================================================
    #[test]
    fn test_oc_004_weekend_covers_entire_day() {
        let result = classify_overtime(&hours(300, 0), false, true, &policy(), dec("1500"));

        assert_eq!(result.weekend_overtime_minutes, 300);
        assert_eq!(result.total_overtime_minutes, 300);
        // 300/60 x 1500 x 1.35 = 10125.
        assert_eq!(result.weekend_overtime_amount, dec("10125"));
    }

    // ==========================================================================
    // OC-005: holiday takes precedence over weekend
    // ==========================================================================
    #[test]
    fn test_oc_005_holiday_beats_weekend() {
        let result = classify_overtime(&hours(480, 0), true, true, &policy(), dec("1500"));

        assert_eq!(result.holiday_overtime_minutes, 480);
        assert_eq!(result.weekend_overtime_minutes, 0);
    }

    // ==========================================================================
    // OC-006: weekday overtime overlapping the night window
    // net 600, night 90: overtime 120 -> 90 night OT + 30 regular OT
    // ==========================================================================
    #[test]
    fn test_oc_006_overtime_attributed_to_night_first() {
        let result = classify_overtime(&hours(600, 90), false, false, &policy(), dec("1500"));

        assert_eq!(result.night_overtime_minutes, 90);
        assert_eq!(result.regular_overtime_minutes, 30);
        assert_eq!(result.night_work_minutes, 0);
        assert_eq!(result.total_overtime_minutes, 120);
        // 90/60 x 1500 x 1.50 = 3375; 30/60 x 1500 x 1.25 = 937.5.
        assert_eq!(result.night_overtime_amount, dec("3375"));
        assert_eq!(result.regular_overtime_amount, dec("937.5"));
    }

    // ==========================================================================
    // OC-007: night overlap larger than overtime leaves a night-work remainder
    // net 540, night 180: overtime 60 night OT, 120 night-work premium
    // ==========================================================================
    #[test]
    fn test_oc_007_night_work_remainder() {
        let result = classify_overtime(&hours(540, 180), false, false, &policy(), dec("1500"));

        assert_eq!(result.night_overtime_minutes, 60);
        assert_eq!(result.regular_overtime_minutes, 0);
        assert_eq!(result.night_work_minutes, 120);
        assert_eq!(result.total_overtime_minutes, 60);
    }

    // ==========================================================================
    // OC-008: caps are advisory: over-cap minutes flagged, pay untouched
    // ==========================================================================
    #[test]
    fn test_oc_008_cap_is_advisory() {
        // net 780 -> 300 minutes of overtime against a 240-minute cap.
        let result = classify_overtime(&hours(780, 0), false, false, &policy(), dec("1500"));

        assert_eq!(result.total_overtime_minutes, 300);
        assert_eq!(result.over_cap_minutes, 60);
        // All 300 minutes are priced: 300/60 x 1500 x 1.25 = 9375.
        assert_eq!(result.total_overtime_amount, dec("9375"));
    }

    // ==========================================================================
    // OC-009: disabled policy produces an all-zero result
    // ==========================================================================
    #[test]
    fn test_oc_009_disabled_policy() {
        let disabled = OvertimePolicy {
            enabled: false,
            ..policy()
        };
        let result = classify_overtime(&hours(600, 120), false, false, &disabled, dec("1500"));
        assert_eq!(result, OvertimeResult::zero());
    }

    #[test]
    fn test_under_threshold_no_overtime() {
        let result = classify_overtime(&hours(400, 0), false, false, &policy(), dec("1500"));
        assert_eq!(result.total_overtime_minutes, 0);
        assert_eq!(result.total_overtime_amount, Decimal::ZERO);
        assert_eq!(result.over_cap_minutes, 0);
    }

    #[test]
    fn test_category_sum_invariant_across_shapes() {
        let cases = [
            (hours(485, 0), false, false),
            (hours(480, 420), false, false),
            (hours(540, 60), true, false),
            (hours(300, 0), false, true),
            (hours(600, 90), false, false),
            (hours(780, 0), false, false),
        ];
        for (h, holiday, weekend) in cases {
            let result = classify_overtime(&h, holiday, weekend, &policy(), dec("1500"));
            assert_eq!(
                category_minutes_sum(&result),
                result.total_overtime_minutes,
                "case net={} holiday={holiday} weekend={weekend}",
                h.net_working_minutes
            );
            let amount_sum = result.regular_overtime_amount
                + result.night_overtime_amount
                + result.holiday_overtime_amount
                + result.holiday_night_overtime_amount
                + result.weekend_overtime_amount;
            assert_eq!(amount_sum, result.total_overtime_amount);
        }
    }

    #[test]
    fn test_amounts_keep_full_precision() {
        // 7 minutes at 1333/h x 1.25 has a repeating fraction; no
        // per-category rounding may occur.
        let result = classify_overtime(&hours(487, 0), false, false, &policy(), dec("1333"));
        let expected = Decimal::from(7) * dec("1333") * dec("1.25") / dec("60");
        assert_eq!(result.regular_overtime_amount, expected);
    }
}
