//! Legal minimum overtime multipliers by locale.
//!
//! Labor law sets a floor under overtime rates. Custom configuration must
//! not go below the floor for its locale; with `use_legal_minimum` set, the
//! floor values are substituted wholesale for the configured ones.

use rust_decimal::Decimal;

use crate::config::OvertimeMultipliers;

/// Returns the legal minimum multipliers for a locale.
///
/// Unknown locales return an all-1.0 table (no statutory floor configured),
/// which permits any multiplier that passes the general `>= 1.0` check.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::legal_minimum_multipliers;
/// use rust_decimal::Decimal;
///
/// let jp = legal_minimum_multipliers("jp");
/// assert_eq!(jp.regular, Decimal::new(125, 2));
/// ```
pub fn legal_minimum_multipliers(locale: &str) -> OvertimeMultipliers {
    match locale {
        "jp" => OvertimeMultipliers {
            regular: Decimal::new(125, 2),
            night_work: Decimal::new(125, 2),
            night_overtime: Decimal::new(150, 2),
            holiday_overtime: Decimal::new(135, 2),
            holiday_night_overtime: Decimal::new(160, 2),
            weekend_overtime: Decimal::new(135, 2),
        },
        "kr" => OvertimeMultipliers {
            regular: Decimal::new(150, 2),
            night_work: Decimal::new(150, 2),
            night_overtime: Decimal::new(200, 2),
            holiday_overtime: Decimal::new(150, 2),
            holiday_night_overtime: Decimal::new(200, 2),
            weekend_overtime: Decimal::new(150, 2),
        },
        _ => OvertimeMultipliers {
            regular: Decimal::ONE,
            night_work: Decimal::ONE,
            night_overtime: Decimal::ONE,
            holiday_overtime: Decimal::ONE,
            holiday_night_overtime: Decimal::ONE,
            weekend_overtime: Decimal::ONE,
        },
    }
}

/// Checks every configured multiplier against the locale's legal floor.
///
/// Returns `false` if any category is below its legal minimum.
pub fn validate_multipliers(multipliers: &OvertimeMultipliers, locale: &str) -> bool {
    let floor = legal_minimum_multipliers(locale);
    multipliers.regular >= floor.regular
        && multipliers.night_work >= floor.night_work
        && multipliers.night_overtime >= floor.night_overtime
        && multipliers.holiday_overtime >= floor.holiday_overtime
        && multipliers.holiday_night_overtime >= floor.holiday_night_overtime
        && multipliers.weekend_overtime >= floor.weekend_overtime
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_jp_table_values() {
        let jp = legal_minimum_multipliers("jp");
        assert_eq!(jp.regular, dec("1.25"));
        assert_eq!(jp.night_work, dec("1.25"));
        assert_eq!(jp.night_overtime, dec("1.50"));
        assert_eq!(jp.holiday_overtime, dec("1.35"));
        assert_eq!(jp.holiday_night_overtime, dec("1.60"));
        assert_eq!(jp.weekend_overtime, dec("1.35"));
    }

    #[test]
    fn test_unknown_locale_has_no_floor() {
        let table = legal_minimum_multipliers("zz");
        assert_eq!(table.regular, Decimal::ONE);
        assert_eq!(table.holiday_night_overtime, Decimal::ONE);
    }

    #[test]
    fn test_validate_accepts_exact_floor() {
        let floor = legal_minimum_multipliers("jp");
        assert!(validate_multipliers(&floor, "jp"));
    }

    #[test]
    fn test_validate_accepts_above_floor() {
        let generous = OvertimeMultipliers {
            regular: dec("1.5"),
            night_work: dec("1.5"),
            night_overtime: dec("1.75"),
            holiday_overtime: dec("1.5"),
            holiday_night_overtime: dec("2.0"),
            weekend_overtime: dec("1.5"),
        };
        assert!(validate_multipliers(&generous, "jp"));
    }

    #[test]
    fn test_validate_rejects_single_low_category() {
        let mut multipliers = legal_minimum_multipliers("jp");
        multipliers.night_overtime = dec("1.4");
        assert!(!validate_multipliers(&multipliers, "jp"));
    }

    #[test]
    fn test_kr_floor_is_stricter_than_jp() {
        let jp = legal_minimum_multipliers("jp");
        assert!(!validate_multipliers(&jp, "kr"));
    }
}
