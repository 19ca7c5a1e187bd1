//! Allowance evaluation functionality.
//!
//! This module evaluates the company's allowance rules against a period
//! attendance summary. Fixed and one-time rules always pay; conditional
//! rules pay only when every configured attendance condition is met.
//! Ineligible items are kept on the result with a human-readable reason,
//! never silently dropped.

use rust_decimal::Decimal;

use crate::config::{AllowanceCondition, AllowanceConfig, AllowanceType};
use crate::models::{AllowanceItem, AllowanceResult, AttendanceSummary};

/// Collects every unmet condition as a human-readable reason fragment.
fn unmet_conditions(condition: &AllowanceCondition, summary: &AttendanceSummary) -> Vec<String> {
    let mut reasons = Vec::new();
    if summary.working_days < condition.min_working_days {
        reasons.push(format!(
            "requires at least {} working days (had {})",
            condition.min_working_days, summary.working_days
        ));
    }
    if summary.working_hours < condition.min_working_hours {
        reasons.push(format!(
            "requires at least {} working hours (had {})",
            condition.min_working_hours,
            summary.working_hours.normalize()
        ));
    }
    if condition.no_absence && summary.absence_days > 0 {
        reasons.push(format!(
            "requires zero absence days (had {})",
            summary.absence_days
        ));
    }
    if condition.no_late_arrival && summary.late_count > 0 {
        reasons.push(format!(
            "requires zero late arrivals (had {})",
            summary.late_count
        ));
    }
    if condition.no_early_leave && summary.early_leave_count > 0 {
        reasons.push(format!(
            "requires zero early leaves (had {})",
            summary.early_leave_count
        ));
    }
    reasons
}

/// Evaluates all allowance rules against the period summary.
///
/// Totals cover included items only and are partitioned by each item's
/// taxable flag. One-time rules are included on every evaluation; ensuring
/// they are not paid twice across periods is the caller's bookkeeping.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::evaluate_allowances;
/// use payroll_engine::config::{AllowanceConfig, AllowanceRule, AllowanceType};
/// use payroll_engine::models::AttendanceSummary;
/// use rust_decimal::Decimal;
///
/// let config = AllowanceConfig {
///     rules: vec![AllowanceRule {
///         code: "commute".to_string(),
///         name: "Commuting allowance".to_string(),
///         rule_type: AllowanceType::Fixed,
///         amount: Decimal::new(10_000, 0),
///         taxable: false,
///         condition: None,
///     }],
/// };
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
/// let result = evaluate_allowances(&config, &summary);
/// assert_eq!(result.total_allowances, Decimal::new(10_000, 0));
/// assert_eq!(result.non_taxable_allowances, Decimal::new(10_000, 0));
/// ```
pub fn evaluate_allowances(config: &AllowanceConfig, summary: &AttendanceSummary) -> AllowanceResult {
    let mut items = Vec::with_capacity(config.rules.len());
    let mut total = Decimal::ZERO;
    let mut taxable_total = Decimal::ZERO;
    let mut non_taxable_total = Decimal::ZERO;

    for rule in &config.rules {
        let ineligible_reason = match (rule.rule_type, rule.condition.as_ref()) {
            (AllowanceType::Conditional, Some(condition)) => {
                let reasons = unmet_conditions(condition, summary);
                if reasons.is_empty() {
                    None
                } else {
                    Some(reasons.join("; "))
                }
            }
            // Fixed and one-time rules always pay; the resolver guarantees
            // conditional rules carry a condition.
            _ => None,
        };

        let included = ineligible_reason.is_none();
        if included {
            total += rule.amount;
            if rule.taxable {
                taxable_total += rule.amount;
            } else {
                non_taxable_total += rule.amount;
            }
        }

        items.push(AllowanceItem {
            code: rule.code.clone(),
            name: rule.name.clone(),
            rule_type: rule.rule_type,
            amount: rule.amount,
            taxable: rule.taxable,
            included,
            ineligible_reason,
        });
    }

    AllowanceResult {
        items,
        total_allowances: total,
        taxable_allowances: taxable_total,
        non_taxable_allowances: non_taxable_total,
    }
}
