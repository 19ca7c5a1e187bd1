//! Payroll calculation orchestration.
//!
//! This module wires the pure calculators together: each attendance day runs
//! through rounding, break evaluation, working-hours computation, and
//! overtime classification; the period summary feeds the allowance and
//! deduction evaluators; and the aggregator produces the final figures. The
//! orchestrator also assembles the audit trace and warning stream, so the
//! calculators themselves stay pure.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{
    aggregate_payroll, apply_checkpoint_rounding, calculate_base_salary, calculate_working_hours,
    classify_overtime, evaluate_allowances, evaluate_breaks, evaluate_deductions, normalize_shift,
};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceDay, AttendanceExceptions, AttendanceSummary, AuditStep, AuditTrace,
    CalculationWarning, DayResult, EmployeeSalaryInfo, OvertimeResult, PayPeriod,
    PayrollPreviewResponse, PayrollResult, PreviewError, PreviewItem, WARN_BREAK_NON_COMPLIANT,
    WARN_CAP_EXCEEDED_DAY, WARN_CAP_EXCEEDED_MONTH, WARN_DEFAULTS_APPLIED,
};

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Everything needed to compute one employee's payroll for one period.
///
/// Attendance data comes from the attendance store, salary info from the
/// salary store, and the exception totals (absence, lateness) from whatever
/// judges attendance against the employee's schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollInput {
    /// The employee being calculated.
    pub employee_id: String,
    /// The pay period.
    pub period: PayPeriod,
    /// Raw attendance days within the period.
    pub days: Vec<AttendanceDay>,
    /// Period exception totals.
    pub exceptions: AttendanceExceptions,
    /// Effective salary information.
    pub salary: EmployeeSalaryInfo,
}

/// Runs one attendance day through the rounding -> breaks -> hours ->
/// overtime chain.
fn process_day(
    day: &AttendanceDay,
    config: &EngineConfig,
    hourly_rate: Decimal,
) -> EngineResult<DayResult> {
    let rounded = apply_checkpoint_rounding(day, &config.rounding);
    let (check_out, is_overnight) = normalize_shift(day.date, rounded.check_in, rounded.check_out)?;

    // The break policy has its own night window for selecting night-specific
    // break minimums, independent of the overtime premium window.
    let overlaps_break_night = config
        .break_policy
        .night_window
        .overlap_minutes(rounded.check_in, check_out)
        > 0;
    let break_eval = evaluate_breaks(
        day.date,
        &rounded.breaks,
        &config.break_policy,
        overlaps_break_night,
    )?;

    let working_hours = calculate_working_hours(
        day.date,
        rounded.check_in,
        check_out,
        is_overnight,
        &break_eval,
        config.break_policy.break_type,
        &config.overtime.night_window,
    )?;

    let overtime = classify_overtime(
        &working_hours,
        day.is_holiday,
        day.is_weekend,
        &config.overtime,
        hourly_rate,
    );

    debug!(
        date = %day.date,
        net_minutes = working_hours.net_working_minutes,
        overtime_minutes = overtime.total_overtime_minutes,
        "processed attendance day"
    );

    Ok(DayResult {
        date: day.date,
        check_in: rounded.check_in,
        check_out,
        is_holiday: day.is_holiday,
        is_weekend: day.is_weekend,
        working_hours,
        overtime,
    })
}

/// Builds the period summary from the processed days and the caller-supplied
/// exception totals.
fn build_summary(days: &[DayResult], exceptions: &AttendanceExceptions) -> AttendanceSummary {
    let net_working_minutes: i64 = days
        .iter()
        .map(|d| d.working_hours.net_working_minutes)
        .sum();
    AttendanceSummary {
        working_days: days.len() as u32,
        working_hours: Decimal::from(net_working_minutes) / MINUTES_PER_HOUR,
        net_working_minutes,
        number_of_shifts: days.len() as u32,
        absence_days: exceptions.absence_days,
        late_count: exceptions.late_count,
        total_late_minutes: exceptions.total_late_minutes,
        early_leave_count: exceptions.early_leave_count,
        total_early_leave_minutes: exceptions.total_early_leave_minutes,
    }
}

/// Collects the warning stream for the processed days and period aggregate.
fn collect_warnings(
    days: &[DayResult],
    period_overtime: &OvertimeResult,
    config: &EngineConfig,
    defaults_applied: &[String],
) -> Vec<CalculationWarning> {
    let mut warnings = Vec::new();

    for day in days {
        if !day.working_hours.break_compliant {
            warnings.push(CalculationWarning {
                code: WARN_BREAK_NON_COMPLIANT.to_string(),
                message: format!(
                    "breaks on {} total {} minutes, below the required minimum",
                    day.date, day.working_hours.total_break_minutes
                ),
                severity: "low".to_string(),
            });
        }
        if day.overtime.over_cap_minutes > 0 {
            warnings.push(CalculationWarning {
                code: WARN_CAP_EXCEEDED_DAY.to_string(),
                message: format!(
                    "overtime on {} exceeds the daily cap of {} minutes by {}",
                    day.date,
                    config.overtime.max_overtime_minutes_per_day,
                    day.overtime.over_cap_minutes
                ),
                severity: "medium".to_string(),
            });
        }
    }

    let monthly_overage =
        period_overtime.total_overtime_minutes - config.overtime.max_overtime_minutes_per_month;
    if monthly_overage > 0 {
        warnings.push(CalculationWarning {
            code: WARN_CAP_EXCEEDED_MONTH.to_string(),
            message: format!(
                "period overtime of {} minutes exceeds the monthly cap of {} by {}",
                period_overtime.total_overtime_minutes,
                config.overtime.max_overtime_minutes_per_month,
                monthly_overage
            ),
            severity: "high".to_string(),
        });
    }

    if !defaults_applied.is_empty() {
        warnings.push(CalculationWarning {
            code: WARN_DEFAULTS_APPLIED.to_string(),
            message: format!(
                "configuration resolved with {} defaulted field(s)",
                defaults_applied.len()
            ),
            severity: "low".to_string(),
        });
    }

    warnings
}

/// Computes one employee's payroll for one pay period.
///
/// Identical inputs always yield an identical breakdown (apart from the
/// calculation id and timestamp), which the preview-before-finalize flow
/// relies on. A data-integrity failure on any single day fails the whole
/// call with a field-level error; the caller fixes the data and retries.
///
/// `defaults_applied` is the record from configuration resolution (see
/// [`crate::config::ConfigLoader::defaults_applied`]); pass an empty slice
/// when the configuration was fully specified.
///
/// # Example
///
/// ```
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::engine::{calculate_payroll, PayrollInput};
/// use payroll_engine::models::{
///     AttendanceDay, AttendanceExceptions, EmployeeSalaryInfo, PayPeriod, SalaryBasis,
/// };
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::from_yaml_str("{}").unwrap();
/// let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let input = PayrollInput {
///     employee_id: "emp_001".to_string(),
///     period: PayPeriod {
///         start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
///         end_date: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
///     },
///     days: vec![AttendanceDay {
///         date,
///         check_in: date.and_hms_opt(9, 0, 0).unwrap(),
///         check_out: date.and_hms_opt(18, 0, 0).unwrap(),
///         breaks: vec![],
///         is_holiday: false,
///         is_weekend: false,
///     }],
///     exceptions: AttendanceExceptions::default(),
///     salary: EmployeeSalaryInfo {
///         employee_id: "emp_001".to_string(),
///         basis: SalaryBasis::Monthly {
///             monthly_salary: Decimal::new(300_000, 0),
///         },
///         hourly_rate: Decimal::new(1_875, 0),
///     },
/// };
///
/// let result = calculate_payroll(&input, loader.config(), loader.defaults_applied()).unwrap();
/// assert_eq!(result.base_salary, Decimal::new(300_000, 0));
/// ```
pub fn calculate_payroll(
    input: &PayrollInput,
    config: &EngineConfig,
    defaults_applied: &[String],
) -> EngineResult<PayrollResult> {
    info!(
        employee_id = %input.employee_id,
        start = %input.period.start_date,
        end = %input.period.end_date,
        days = input.days.len(),
        "calculating payroll"
    );

    let mut steps = Vec::new();
    let mut step_number = 0u32;
    let mut next_step = || {
        step_number += 1;
        step_number
    };

    // Stage 1: per-day attendance processing.
    let mut days = Vec::with_capacity(input.days.len());
    for day in &input.days {
        if !input.period.contains_date(day.date) {
            return Err(EngineError::DataIntegrity {
                date: day.date,
                field: "date".to_string(),
                message: format!(
                    "attendance date outside pay period {} to {}",
                    input.period.start_date, input.period.end_date
                ),
            });
        }
        days.push(process_day(day, config, input.salary.hourly_rate)?);
    }

    let summary = build_summary(&days, &input.exceptions);
    steps.push(AuditStep {
        step_number: next_step(),
        rule_id: "attendance_processing".to_string(),
        rule_name: "Attendance Processing".to_string(),
        input: serde_json::json!({
            "days": input.days.len(),
            "rounding_enabled": config.rounding.enabled,
        }),
        output: serde_json::json!({
            "working_days": summary.working_days,
            "net_working_minutes": summary.net_working_minutes,
            "night_minutes": days.iter().map(|d| d.working_hours.night_minutes).sum::<i64>(),
        }),
        reasoning: format!(
            "Processed {} attendance day(s) into {} net working minutes",
            days.len(),
            summary.net_working_minutes
        ),
    });

    // Stage 2: period overtime aggregation.
    let mut period_overtime = OvertimeResult::zero();
    for day in &days {
        period_overtime.accumulate(&day.overtime);
    }
    steps.push(AuditStep {
        step_number: next_step(),
        rule_id: "overtime_aggregation".to_string(),
        rule_name: "Overtime Aggregation".to_string(),
        input: serde_json::json!({
            "standard_working_minutes_per_day": config.overtime.standard_working_minutes_per_day,
            "locale": config.overtime.locale,
        }),
        output: serde_json::json!({
            "total_overtime_minutes": period_overtime.total_overtime_minutes,
            "night_work_minutes": period_overtime.night_work_minutes,
            "total_overtime_amount": period_overtime.total_overtime_amount.normalize().to_string(),
            "night_work_amount": period_overtime.night_work_amount.normalize().to_string(),
        }),
        reasoning: format!(
            "{} overtime minute(s) and {} night-work minute(s) across the period",
            period_overtime.total_overtime_minutes, period_overtime.night_work_minutes
        ),
    });

    // Stage 3: allowances.
    let allowances = evaluate_allowances(&config.allowances, &summary);
    let excluded = allowances.items.iter().filter(|i| !i.included).count();
    steps.push(AuditStep {
        step_number: next_step(),
        rule_id: "allowance_evaluation".to_string(),
        rule_name: "Allowance Evaluation".to_string(),
        input: serde_json::json!({ "rules": config.allowances.rules.len() }),
        output: serde_json::json!({
            "total_allowances": allowances.total_allowances.normalize().to_string(),
            "excluded_items": excluded,
        }),
        reasoning: format!(
            "{} of {} allowance rule(s) included",
            allowances.items.len() - excluded,
            allowances.items.len()
        ),
    });

    // Stage 4: deductions, against the base salary.
    let base_salary = calculate_base_salary(&input.salary, &summary)?;
    let deductions = evaluate_deductions(
        &config.deductions,
        &summary,
        base_salary,
        input.salary.basis.monthly_salary(),
    );
    steps.push(AuditStep {
        step_number: next_step(),
        rule_id: "deduction_evaluation".to_string(),
        rule_name: "Deduction Evaluation".to_string(),
        input: serde_json::json!({
            "rules": config.deductions.rules.len(),
            "base_salary": base_salary.normalize().to_string(),
        }),
        output: serde_json::json!({
            "total_deductions": deductions.total_deductions.normalize().to_string(),
            "late_penalty": deductions.late_penalty.normalize().to_string(),
            "absence_deduction": deductions.absence_deduction.normalize().to_string(),
        }),
        reasoning: format!(
            "{} deduction rule(s) plus penalties total {}",
            deductions.items.len(),
            deductions.total_deductions.normalize()
        ),
    });

    // Stage 5: final aggregation, single minor-unit rounding.
    let totals = aggregate_payroll(
        base_salary,
        &period_overtime,
        &allowances,
        &deductions,
        &config.payroll,
    );
    steps.push(AuditStep {
        step_number: next_step(),
        rule_id: "payroll_aggregation".to_string(),
        rule_name: "Payroll Aggregation".to_string(),
        input: serde_json::json!({
            "base_salary": totals.base_salary.normalize().to_string(),
            "total_overtime_pay": totals.total_overtime_pay.normalize().to_string(),
            "total_allowances": totals.total_allowances.normalize().to_string(),
            "total_deductions": totals.total_deductions.normalize().to_string(),
        }),
        output: serde_json::json!({
            "gross_salary": totals.gross_salary.normalize().to_string(),
            "net_salary": totals.net_salary.normalize().to_string(),
        }),
        reasoning: format!(
            "gross {} minus deductions {} nets {}",
            totals.gross_salary.normalize(),
            totals.total_deductions.normalize(),
            totals.net_salary.normalize()
        ),
    });

    let warnings = collect_warnings(&days, &period_overtime, config, defaults_applied);
    if !warnings.is_empty() {
        warn!(
            employee_id = %input.employee_id,
            count = warnings.len(),
            "payroll calculated with warnings"
        );
    }

    Ok(PayrollResult {
        calculation_id: Uuid::new_v4(),
        calculated_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        employee_id: input.employee_id.clone(),
        period: input.period,
        base_salary: totals.base_salary,
        total_overtime_pay: totals.total_overtime_pay,
        total_allowances: totals.total_allowances,
        total_deductions: totals.total_deductions,
        gross_salary: totals.gross_salary,
        net_salary: totals.net_salary,
        summary,
        days,
        overtime: period_overtime,
        allowances,
        deductions,
        computed_with_defaults: defaults_applied.to_vec(),
        audit_trace: AuditTrace { steps, warnings },
    })
}

/// Computes the aggregate preview over many employees.
///
/// Each employee is calculated independently (a batch run is embarrassingly
/// parallel; this sequential fold is the reference orchestration). A failed
/// employee becomes a [`PreviewError`] and never blocks the rest of the
/// batch.
pub fn calculate_preview(
    period: PayPeriod,
    inputs: &[PayrollInput],
    config: &EngineConfig,
    defaults_applied: &[String],
) -> PayrollPreviewResponse {
    let mut items = Vec::with_capacity(inputs.len());
    let mut errors = Vec::new();
    let mut total_gross = Decimal::ZERO;
    let mut total_net = Decimal::ZERO;

    for input in inputs {
        match calculate_payroll(input, config, defaults_applied) {
            Ok(result) => {
                total_gross += result.gross_salary;
                total_net += result.net_salary;
                items.push(PreviewItem {
                    employee_id: result.employee_id.clone(),
                    gross_salary: result.gross_salary,
                    net_salary: result.net_salary,
                    total_overtime_minutes: result.overtime.total_overtime_minutes,
                    warning_count: result.audit_trace.warnings.len(),
                });
            }
            Err(error) => {
                warn!(employee_id = %input.employee_id, %error, "preview item failed");
                errors.push(PreviewError {
                    employee_id: input.employee_id.clone(),
                    message: error.to_string(),
                });
            }
        }
    }

    PayrollPreviewResponse {
        generated_at: Utc::now(),
        period,
        items,
        errors,
        total_gross,
        total_net,
    }
}
