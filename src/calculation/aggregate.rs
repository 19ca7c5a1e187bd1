//! Payroll aggregation functionality.
//!
//! This module derives the base salary from the employee's salary type and
//! combines base salary, overtime pay, allowances, and deductions into the
//! final gross/net figures. The currency's minor-unit rounding is applied
//! exactly once, here; every intermediate sub-result retains full decimal
//! precision for audit.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::{PayrollConfig, RoundingDirection};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AllowanceResult, AttendanceSummary, DeductionResult, EmployeeSalaryInfo, OvertimeResult,
    SalaryBasis,
};

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// The aggregated salary figures for one payroll calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayrollTotals {
    /// Base salary per the employee's salary type, full precision.
    pub base_salary: Decimal,
    /// Overtime amount plus night-work premium, full precision.
    pub total_overtime_pay: Decimal,
    /// Included allowances, full precision.
    pub total_allowances: Decimal,
    /// Deductions and penalties, full precision.
    pub total_deductions: Decimal,
    /// Base + overtime + allowances, rounded at the minor unit for display.
    pub gross_salary: Decimal,
    /// Gross - deductions, rounded once at the minor unit.
    pub net_salary: Decimal,
}

/// Derives the base salary for the period from the salary type.
///
/// - Monthly: the configured amount, unprorated (absence is reflected via
///   the absence deduction, never by prorating the base).
/// - Daily: `daily_rate x working_days`.
/// - Hourly: `hourly_rate x net working hours`.
/// - Shift-based: `shift_rate x number_of_shifts`.
///
/// # Errors
///
/// A negative rate is rejected as invalid salary info.
pub fn calculate_base_salary(
    salary: &EmployeeSalaryInfo,
    summary: &AttendanceSummary,
) -> EngineResult<Decimal> {
    let rate_error = |field: &str| EngineError::InvalidSalaryInfo {
        salary_type: salary.basis.type_name().to_string(),
        message: format!("{field} must not be negative"),
    };

    let base = match salary.basis {
        SalaryBasis::Monthly { monthly_salary } => {
            if monthly_salary < Decimal::ZERO {
                return Err(rate_error("monthly_salary"));
            }
            monthly_salary
        }
        SalaryBasis::Daily { daily_rate } => {
            if daily_rate < Decimal::ZERO {
                return Err(rate_error("daily_rate"));
            }
            daily_rate * Decimal::from(summary.working_days)
        }
        SalaryBasis::Hourly { hourly_rate } => {
            if hourly_rate < Decimal::ZERO {
                return Err(rate_error("hourly_rate"));
            }
            hourly_rate * Decimal::from(summary.net_working_minutes) / MINUTES_PER_HOUR
        }
        SalaryBasis::ShiftBased { shift_rate } => {
            if shift_rate < Decimal::ZERO {
                return Err(rate_error("shift_rate"));
            }
            shift_rate * Decimal::from(summary.number_of_shifts)
        }
    };
    Ok(base)
}

/// Rounds an amount to the currency's minor unit in the configured
/// direction.
pub fn round_amount(amount: Decimal, direction: RoundingDirection) -> Decimal {
    let strategy = match direction {
        RoundingDirection::Up => RoundingStrategy::ToPositiveInfinity,
        RoundingDirection::Down => RoundingStrategy::ToNegativeInfinity,
        RoundingDirection::Nearest => RoundingStrategy::MidpointAwayFromZero,
    };
    amount.round_dp_with_strategy(0, strategy)
}

/// Combines the sub-results into the final gross/net salary figures.
///
/// `gross = base + overtime pay + allowances` and `net = gross -
/// deductions`; the company's single rounding policy applies once to the
/// final net (and to gross for display). The unrounded components are
/// carried on the totals so the invariants remain checkable to full
/// precision.
pub fn aggregate_payroll(
    base_salary: Decimal,
    overtime: &OvertimeResult,
    allowances: &AllowanceResult,
    deductions: &DeductionResult,
    config: &PayrollConfig,
) -> PayrollTotals {
    let total_overtime_pay = overtime.total_pay();
    let total_allowances = allowances.total_allowances;
    let total_deductions = deductions.total_deductions;

    let gross_full = base_salary + total_overtime_pay + total_allowances;
    let net_full = gross_full - total_deductions;

    PayrollTotals {
        base_salary,
        total_overtime_pay,
        total_allowances,
        total_deductions,
        gross_salary: round_amount(gross_full, config.salary_rounding),
        net_salary: round_amount(net_full, config.salary_rounding),
    }
}
