//! Deduction evaluation functionality.
//!
//! This module applies the company's deduction rules in ascending order and
//! computes the three attendance penalty terms (late arrival, early leave,
//! absence). Percentage rules apply against the base salary supplied by the
//! caller; the absence deduction divides the monthly salary by the standard
//! working days per month.

use rust_decimal::Decimal;

use crate::config::{DeductionConfig, DeductionKind};
use crate::models::{AttendanceSummary, DeductionItem, DeductionResult};

const PERCENT: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Evaluates all deduction rules and penalties for the period.
///
/// Rules apply in ascending `order`, ties broken by declaration order
/// (stable sort). The absence deduction applies only when a monthly salary
/// is supplied: for daily/hourly/shift-based employees absence is already
/// reflected in fewer paid units.
///
/// # Arguments
///
/// * `config` - The deduction rules and penalty settings
/// * `summary` - The period attendance summary
/// * `base_salary` - The base salary percentage rules apply against
/// * `monthly_salary` - The monthly salary for the absence formula, when the
///   employee is monthly-salaried
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::evaluate_deductions;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::AttendanceSummary;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::from_yaml_str("{}").unwrap();
/// let summary = AttendanceSummary {
///     working_days: 20,
///     working_hours: Decimal::new(160, 0),
///     net_working_minutes: 9_600,
///     number_of_shifts: 20,
///     absence_days: 0,
///     late_count: 0,
///     total_late_minutes: 0,
///     early_leave_count: 0,
///     total_early_leave_minutes: 0,
/// };
///
/// let result = evaluate_deductions(
///     &loader.config().deductions,
///     &summary,
///     Decimal::new(300_000, 0),
///     Some(Decimal::new(300_000, 0)),
/// );
/// assert_eq!(result.total_deductions, Decimal::ZERO);
/// ```
pub fn evaluate_deductions(
    config: &DeductionConfig,
    summary: &AttendanceSummary,
    base_salary: Decimal,
    monthly_salary: Option<Decimal>,
) -> DeductionResult {
    // Ascending order; Vec::sort_by_key is stable, so declaration order
    // breaks ties.
    let mut rules: Vec<_> = config.rules.iter().collect();
    rules.sort_by_key(|rule| rule.order);

    let mut items = Vec::with_capacity(rules.len());
    let mut rule_total = Decimal::ZERO;
    for rule in rules {
        let amount = match rule.kind {
            DeductionKind::Fixed { amount } => amount,
            DeductionKind::Percentage { percentage } => percentage / PERCENT * base_salary,
        };
        rule_total += amount;
        items.push(DeductionItem {
            code: rule.code.clone(),
            name: rule.name.clone(),
            amount,
            order: rule.order,
        });
    }

    let late_penalty = if config.enable_late_penalty {
        Decimal::from(summary.total_late_minutes) * config.late_penalty_per_minute
    } else {
        Decimal::ZERO
    };

    let early_leave_penalty = if config.enable_early_leave_penalty {
        Decimal::from(summary.total_early_leave_minutes) * config.early_leave_penalty_per_minute
    } else {
        Decimal::ZERO
    };

    let absence_deduction = match (config.enable_absence_deduction, monthly_salary) {
        (true, Some(monthly)) => {
            Decimal::from(summary.absence_days) * monthly
                / Decimal::from(config.standard_working_days_per_month)
        }
        _ => Decimal::ZERO,
    };

    DeductionResult {
        items,
        late_penalty,
        early_leave_penalty,
        absence_deduction,
        total_deductions: rule_total + late_penalty + early_leave_penalty + absence_deduction,
    }
}
