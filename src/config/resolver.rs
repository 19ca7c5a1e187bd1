//! Raw configuration and the resolve/default step.
//!
//! Policy configuration arrives with optional fields (a company may configure
//! only what it cares about). This module performs the single explicit
//! defaulting and validation pass that turns a [`RawEngineConfig`] into a
//! fully-populated [`EngineConfig`], recording every substituted default so
//! the caller can flag results as computed-with-defaults. Nothing downstream
//! of this module ever null-checks configuration.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::{legal_minimum_multipliers, validate_multipliers};
use crate::error::{EngineError, EngineResult};

use super::types::{
    AllowanceConfig, AllowanceCondition, AllowanceRule, AllowanceType, BreakPeriod, BreakPolicy,
    BreakType, CheckpointRounding, DeductionConfig, DeductionKind, DeductionRule, EngineConfig,
    NightWindow, OvertimeMultipliers, OvertimePolicy, PayrollConfig, RoundingConfig,
    RoundingDirection, RoundingPolicy,
};

/// Default rounding interval in minutes.
pub const DEFAULT_ROUNDING_INTERVAL: u32 = 15;
/// Default break minimum per day, in minutes.
pub const DEFAULT_BREAK_MINIMUM: i64 = 45;
/// Default break maximum per day, in minutes.
pub const DEFAULT_BREAK_MAXIMUM: i64 = 90;
/// Default break minutes assumed when not tracking.
pub const DEFAULT_BREAK_MINUTES: i64 = 60;
/// Default standard working minutes per day (8 hours).
pub const DEFAULT_STANDARD_MINUTES: i64 = 480;
/// Default advisory overtime cap per day, in minutes.
pub const DEFAULT_MAX_OVERTIME_PER_DAY: i64 = 240;
/// Default advisory overtime cap per month, in minutes (45 hours).
pub const DEFAULT_MAX_OVERTIME_PER_MONTH: i64 = 2700;
/// Default legal-minimum locale.
pub const DEFAULT_LOCALE: &str = "jp";
/// Default divisor for per-day absence deduction.
pub const DEFAULT_STANDARD_WORKING_DAYS: u32 = 20;

fn default_night_window() -> NightWindow {
    NightWindow {
        start: NaiveTime::from_hms_opt(22, 0, 0).expect("valid time"),
        end: NaiveTime::from_hms_opt(5, 0, 0).expect("valid time"),
    }
}

fn default_multipliers() -> OvertimeMultipliers {
    OvertimeMultipliers {
        regular: Decimal::new(125, 2),
        night_work: Decimal::new(125, 2),
        night_overtime: Decimal::new(150, 2),
        holiday_overtime: Decimal::new(135, 2),
        holiday_night_overtime: Decimal::new(160, 2),
        weekend_overtime: Decimal::new(135, 2),
    }
}

/// Raw rounding rule with optional fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRoundingPolicy {
    /// Rounding interval in minutes.
    #[serde(default)]
    pub interval_minutes: Option<u32>,
    /// Rounding direction.
    #[serde(default)]
    pub direction: Option<RoundingDirection>,
}

/// Raw per-checkpoint rounding settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCheckpointRounding {
    /// Whether this checkpoint rounds at all.
    #[serde(default)]
    pub enabled: Option<bool>,
    /// The rounding rule for this checkpoint.
    #[serde(default)]
    pub policy: Option<RawRoundingPolicy>,
}

/// Raw timestamp-rounding configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRoundingConfig {
    /// Master switch.
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Check-in checkpoint.
    #[serde(default)]
    pub check_in: Option<RawCheckpointRounding>,
    /// Check-out checkpoint.
    #[serde(default)]
    pub check_out: Option<RawCheckpointRounding>,
    /// Break-start checkpoint.
    #[serde(default)]
    pub break_start: Option<RawCheckpointRounding>,
    /// Break-end checkpoint.
    #[serde(default)]
    pub break_end: Option<RawCheckpointRounding>,
}

/// Raw break policy.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBreakPolicy {
    /// Paid or unpaid breaks.
    #[serde(default)]
    pub break_type: Option<BreakType>,
    /// Minimum break minutes per day.
    #[serde(default)]
    pub minimum_minutes: Option<i64>,
    /// Maximum break minutes per day.
    #[serde(default)]
    pub maximum_minutes: Option<i64>,
    /// Break minutes assumed when not tracked.
    #[serde(default)]
    pub default_minutes: Option<i64>,
    /// Whether break records are tracked.
    #[serde(default)]
    pub tracking_enabled: Option<bool>,
    /// Whether fixed mode applies the default minutes.
    #[serde(default)]
    pub fixed_mode: Option<bool>,
    /// Maximum break records per day.
    #[serde(default)]
    pub max_breaks_per_day: Option<u32>,
    /// Break periods per attendance.
    #[serde(default)]
    pub periods_per_attendance: Option<u32>,
    /// Scheduled break periods.
    #[serde(default)]
    pub periods: Vec<BreakPeriod>,
    /// Night window for night-specific break minimums.
    #[serde(default)]
    pub night_window: Option<NightWindow>,
    /// Night-shift minimum break minutes.
    #[serde(default)]
    pub night_minimum_minutes: Option<i64>,
    /// Night-shift default break minutes.
    #[serde(default)]
    pub night_default_minutes: Option<i64>,
}

/// Raw overtime policy.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOvertimePolicy {
    /// Whether overtime classification applies.
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Standard working minutes per day.
    #[serde(default)]
    pub standard_working_minutes_per_day: Option<i64>,
    /// Night premium window.
    #[serde(default)]
    pub night_window: Option<NightWindow>,
    /// Configured multipliers.
    #[serde(default)]
    pub multipliers: Option<OvertimeMultipliers>,
    /// Advisory daily overtime cap.
    #[serde(default)]
    pub max_overtime_minutes_per_day: Option<i64>,
    /// Advisory monthly overtime cap.
    #[serde(default)]
    pub max_overtime_minutes_per_month: Option<i64>,
    /// Substitute legal minimum multipliers.
    #[serde(default)]
    pub use_legal_minimum: Option<bool>,
    /// Legal-minimum locale code.
    #[serde(default)]
    pub locale: Option<String>,
}

/// Raw allowance rule (condition fields inline).
#[derive(Debug, Clone, Deserialize)]
pub struct RawAllowanceRule {
    /// Stable rule code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Rule kind.
    pub rule_type: AllowanceType,
    /// Amount in minor units.
    pub amount: Decimal,
    /// Whether taxable.
    #[serde(default)]
    pub taxable: Option<bool>,
    /// Condition for conditional rules.
    #[serde(default)]
    pub condition: Option<RawAllowanceCondition>,
}

/// Raw allowance condition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAllowanceCondition {
    /// Minimum working days.
    #[serde(default)]
    pub min_working_days: Option<u32>,
    /// Minimum working hours.
    #[serde(default)]
    pub min_working_hours: Option<Decimal>,
    /// Requires zero absences.
    #[serde(default)]
    pub no_absence: Option<bool>,
    /// Requires zero late arrivals.
    #[serde(default)]
    pub no_late_arrival: Option<bool>,
    /// Requires zero early leaves.
    #[serde(default)]
    pub no_early_leave: Option<bool>,
}

/// Raw allowance configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAllowanceConfig {
    /// Rules in declaration order.
    #[serde(default)]
    pub rules: Vec<RawAllowanceRule>,
}

/// Raw deduction rule carrying the amount-xor-percentage pair.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDeductionRule {
    /// Stable rule code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// "fixed" or "percentage".
    pub rule_type: RawDeductionType,
    /// Fixed amount in minor units.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Percentage of base salary.
    #[serde(default)]
    pub percentage: Option<Decimal>,
    /// Application order.
    #[serde(default)]
    pub order: Option<u32>,
}

/// Raw deduction rule kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawDeductionType {
    /// Fixed amount.
    Fixed,
    /// Percentage of base salary.
    Percentage,
}

/// Raw deduction configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDeductionConfig {
    /// Rules in declaration order.
    #[serde(default)]
    pub rules: Vec<RawDeductionRule>,
    /// Enable the late-arrival penalty.
    #[serde(default)]
    pub enable_late_penalty: Option<bool>,
    /// Penalty per late minute.
    #[serde(default)]
    pub late_penalty_per_minute: Option<Decimal>,
    /// Enable the early-leave penalty.
    #[serde(default)]
    pub enable_early_leave_penalty: Option<bool>,
    /// Penalty per early-leave minute.
    #[serde(default)]
    pub early_leave_penalty_per_minute: Option<Decimal>,
    /// Enable the absence deduction.
    #[serde(default)]
    pub enable_absence_deduction: Option<bool>,
    /// Divisor for per-day absence deduction.
    #[serde(default)]
    pub standard_working_days_per_month: Option<u32>,
}

/// Raw payroll settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPayrollConfig {
    /// Final salary rounding direction.
    #[serde(default)]
    pub salary_rounding: Option<RoundingDirection>,
}

/// The complete raw configuration as deserialized from YAML.
///
/// Every section is optional; [`resolve`] substitutes documented defaults for
/// whatever is missing and records each substitution.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEngineConfig {
    /// Timestamp rounding section.
    #[serde(default)]
    pub rounding: Option<RawRoundingConfig>,
    /// Break policy section.
    #[serde(default)]
    pub break_policy: Option<RawBreakPolicy>,
    /// Overtime policy section.
    #[serde(default)]
    pub overtime: Option<RawOvertimePolicy>,
    /// Allowance rules section.
    #[serde(default)]
    pub allowances: Option<RawAllowanceConfig>,
    /// Deduction rules section.
    #[serde(default)]
    pub deductions: Option<RawDeductionConfig>,
    /// Payroll settings section.
    #[serde(default)]
    pub payroll: Option<RawPayrollConfig>,
}

/// A resolved configuration plus the record of defaults that were applied.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The fully-populated configuration.
    pub config: EngineConfig,
    /// Dotted paths of every field that fell back to its documented default.
    pub defaults_applied: Vec<String>,
}

/// Tracks which fields fell back to defaults during resolution.
struct Defaults {
    applied: Vec<String>,
}

impl Defaults {
    fn new() -> Self {
        Self {
            applied: Vec::new(),
        }
    }

    fn field<T>(&mut self, value: Option<T>, default: T, name: &str) -> T {
        match value {
            Some(v) => v,
            None => {
                self.applied.push(name.to_string());
                default
            }
        }
    }
}

/// Resolves a raw configuration into a fully-populated [`EngineConfig`].
///
/// This is the ONLY place defaults are substituted; the engine itself never
/// invents one. Validation errors (minimum above maximum, unsupported
/// rounding interval, multiplier below the legal minimum) are rejected here,
/// at configuration-write time, rather than surfacing as calculation
/// failures later.
///
/// # Errors
///
/// Returns [`EngineError::InvalidPolicy`] naming the offending field.
///
/// # Example
///
/// ```
/// use payroll_engine::config::{resolve, RawEngineConfig};
///
/// let resolved = resolve(RawEngineConfig::default()).unwrap();
/// assert!(resolved.config.overtime.enabled);
/// assert!(!resolved.defaults_applied.is_empty());
/// ```
pub fn resolve(raw: RawEngineConfig) -> EngineResult<ResolvedConfig> {
    let mut defaults = Defaults::new();

    let rounding = resolve_rounding(raw.rounding, &mut defaults)?;
    let break_policy = resolve_break_policy(raw.break_policy, &mut defaults)?;
    let overtime = resolve_overtime(raw.overtime, &mut defaults)?;
    let allowances = resolve_allowances(raw.allowances, &mut defaults)?;
    let deductions = resolve_deductions(raw.deductions, &mut defaults)?;

    let payroll_raw = raw.payroll.unwrap_or_default();
    let payroll = PayrollConfig {
        salary_rounding: defaults.field(
            payroll_raw.salary_rounding,
            RoundingDirection::Nearest,
            "payroll.salary_rounding",
        ),
    };

    Ok(ResolvedConfig {
        config: EngineConfig {
            rounding,
            break_policy,
            overtime,
            allowances,
            deductions,
            payroll,
        },
        defaults_applied: defaults.applied,
    })
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidPolicy {
        field: field.to_string(),
        message: message.into(),
    }
}

fn resolve_checkpoint(
    raw: Option<RawCheckpointRounding>,
    name: &str,
    defaults: &mut Defaults,
) -> EngineResult<CheckpointRounding> {
    let raw = match raw {
        Some(r) => r,
        None => {
            defaults.applied.push(name.to_string());
            RawCheckpointRounding::default()
        }
    };
    let policy_raw = raw.policy.unwrap_or_default();
    let policy = RoundingPolicy {
        interval_minutes: defaults.field(
            policy_raw.interval_minutes,
            DEFAULT_ROUNDING_INTERVAL,
            &format!("{name}.policy.interval_minutes"),
        ),
        direction: defaults.field(
            policy_raw.direction,
            RoundingDirection::Nearest,
            &format!("{name}.policy.direction"),
        ),
    };
    policy
        .validate()
        .map_err(|m| invalid(&format!("{name}.policy.interval_minutes"), m))?;
    Ok(CheckpointRounding {
        enabled: defaults.field(raw.enabled, true, &format!("{name}.enabled")),
        policy,
    })
}

fn resolve_rounding(
    raw: Option<RawRoundingConfig>,
    defaults: &mut Defaults,
) -> EngineResult<RoundingConfig> {
    let raw = match raw {
        Some(r) => r,
        None => {
            defaults.applied.push("rounding".to_string());
            RawRoundingConfig::default()
        }
    };
    Ok(RoundingConfig {
        enabled: defaults.field(raw.enabled, false, "rounding.enabled"),
        check_in: resolve_checkpoint(raw.check_in, "rounding.check_in", defaults)?,
        check_out: resolve_checkpoint(raw.check_out, "rounding.check_out", defaults)?,
        break_start: resolve_checkpoint(raw.break_start, "rounding.break_start", defaults)?,
        break_end: resolve_checkpoint(raw.break_end, "rounding.break_end", defaults)?,
    })
}

fn resolve_break_policy(
    raw: Option<RawBreakPolicy>,
    defaults: &mut Defaults,
) -> EngineResult<BreakPolicy> {
    let raw = match raw {
        Some(r) => r,
        None => {
            defaults.applied.push("break_policy".to_string());
            RawBreakPolicy::default()
        }
    };

    let minimum_minutes = defaults.field(
        raw.minimum_minutes,
        DEFAULT_BREAK_MINIMUM,
        "break_policy.minimum_minutes",
    );
    let maximum_minutes = defaults.field(
        raw.maximum_minutes,
        DEFAULT_BREAK_MAXIMUM,
        "break_policy.maximum_minutes",
    );
    let default_minutes = defaults.field(
        raw.default_minutes,
        DEFAULT_BREAK_MINUTES,
        "break_policy.default_minutes",
    );

    if minimum_minutes < 0 {
        return Err(invalid("break_policy.minimum_minutes", "must not be negative"));
    }
    if minimum_minutes > maximum_minutes {
        return Err(invalid(
            "break_policy.minimum_minutes",
            format!("minimum ({minimum_minutes}) exceeds maximum ({maximum_minutes})"),
        ));
    }
    if default_minutes < minimum_minutes || default_minutes > maximum_minutes {
        return Err(invalid(
            "break_policy.default_minutes",
            format!(
                "default ({default_minutes}) outside [{minimum_minutes}, {maximum_minutes}]"
            ),
        ));
    }

    let max_breaks_per_day = defaults.field(
        raw.max_breaks_per_day,
        3,
        "break_policy.max_breaks_per_day",
    );
    if max_breaks_per_day < 1 {
        return Err(invalid("break_policy.max_breaks_per_day", "must be at least 1"));
    }
    let periods_per_attendance = defaults.field(
        raw.periods_per_attendance,
        1,
        "break_policy.periods_per_attendance",
    );
    if periods_per_attendance < 1 {
        return Err(invalid(
            "break_policy.periods_per_attendance",
            "must be at least 1",
        ));
    }

    let periods = raw.periods;
    for pair in periods.windows(2) {
        if pair[1].order <= pair[0].order {
            return Err(invalid(
                "break_policy.periods",
                format!(
                    "period '{}' order {} does not increase over '{}' order {}",
                    pair[1].name, pair[1].order, pair[0].name, pair[0].order
                ),
            ));
        }
    }

    let night_minimum_minutes = defaults.field(
        raw.night_minimum_minutes,
        30,
        "break_policy.night_minimum_minutes",
    );
    let night_default_minutes = defaults.field(
        raw.night_default_minutes,
        45,
        "break_policy.night_default_minutes",
    );
    if night_minimum_minutes > maximum_minutes {
        return Err(invalid(
            "break_policy.night_minimum_minutes",
            format!("night minimum ({night_minimum_minutes}) exceeds maximum ({maximum_minutes})"),
        ));
    }
    if night_default_minutes < night_minimum_minutes || night_default_minutes > maximum_minutes {
        return Err(invalid(
            "break_policy.night_default_minutes",
            format!(
                "night default ({night_default_minutes}) outside [{night_minimum_minutes}, {maximum_minutes}]"
            ),
        ));
    }

    Ok(BreakPolicy {
        break_type: defaults.field(raw.break_type, BreakType::Unpaid, "break_policy.break_type"),
        minimum_minutes,
        maximum_minutes,
        default_minutes,
        tracking_enabled: defaults.field(
            raw.tracking_enabled,
            true,
            "break_policy.tracking_enabled",
        ),
        fixed_mode: defaults.field(raw.fixed_mode, false, "break_policy.fixed_mode"),
        max_breaks_per_day,
        periods_per_attendance,
        periods,
        night_window: defaults.field(
            raw.night_window,
            default_night_window(),
            "break_policy.night_window",
        ),
        night_minimum_minutes,
        night_default_minutes,
    })
}

fn resolve_overtime(
    raw: Option<RawOvertimePolicy>,
    defaults: &mut Defaults,
) -> EngineResult<OvertimePolicy> {
    let raw = match raw {
        Some(r) => r,
        None => {
            defaults.applied.push("overtime".to_string());
            RawOvertimePolicy::default()
        }
    };

    let standard = defaults.field(
        raw.standard_working_minutes_per_day,
        DEFAULT_STANDARD_MINUTES,
        "overtime.standard_working_minutes_per_day",
    );
    if standard <= 0 {
        return Err(invalid(
            "overtime.standard_working_minutes_per_day",
            "must be positive",
        ));
    }

    let locale = defaults.field(
        raw.locale,
        DEFAULT_LOCALE.to_string(),
        "overtime.locale",
    );
    let use_legal_minimum =
        defaults.field(raw.use_legal_minimum, false, "overtime.use_legal_minimum");
    let configured = defaults.field(raw.multipliers, default_multipliers(), "overtime.multipliers");

    let one = Decimal::ONE;
    for (name, value) in [
        ("regular", configured.regular),
        ("night_work", configured.night_work),
        ("night_overtime", configured.night_overtime),
        ("holiday_overtime", configured.holiday_overtime),
        ("holiday_night_overtime", configured.holiday_night_overtime),
        ("weekend_overtime", configured.weekend_overtime),
    ] {
        if value < one {
            return Err(invalid(
                &format!("overtime.multipliers.{name}"),
                format!("multiplier {value} is below 1.0"),
            ));
        }
    }

    // Custom multipliers below the locale's legal minimum are a
    // configuration-write-time rejection, not a calculation failure.
    let multipliers = if use_legal_minimum {
        legal_minimum_multipliers(&locale)
    } else {
        if !validate_multipliers(&configured, &locale) {
            return Err(invalid(
                "overtime.multipliers",
                format!("one or more multipliers are below the legal minimum for locale '{locale}'"),
            ));
        }
        configured
    };

    Ok(OvertimePolicy {
        enabled: defaults.field(raw.enabled, true, "overtime.enabled"),
        standard_working_minutes_per_day: standard,
        night_window: defaults.field(
            raw.night_window,
            default_night_window(),
            "overtime.night_window",
        ),
        multipliers,
        max_overtime_minutes_per_day: defaults.field(
            raw.max_overtime_minutes_per_day,
            DEFAULT_MAX_OVERTIME_PER_DAY,
            "overtime.max_overtime_minutes_per_day",
        ),
        max_overtime_minutes_per_month: defaults.field(
            raw.max_overtime_minutes_per_month,
            DEFAULT_MAX_OVERTIME_PER_MONTH,
            "overtime.max_overtime_minutes_per_month",
        ),
        use_legal_minimum,
        locale,
    })
}

fn resolve_allowances(
    raw: Option<RawAllowanceConfig>,
    defaults: &mut Defaults,
) -> EngineResult<AllowanceConfig> {
    let raw = match raw {
        Some(r) => r,
        None => {
            defaults.applied.push("allowances".to_string());
            RawAllowanceConfig::default()
        }
    };

    let mut rules = Vec::with_capacity(raw.rules.len());
    for rule in raw.rules {
        if rule.amount < Decimal::ZERO {
            return Err(invalid(
                &format!("allowances.rules[{}].amount", rule.code),
                "must not be negative",
            ));
        }
        let condition = match (rule.rule_type, rule.condition) {
            (AllowanceType::Conditional, Some(c)) => Some(AllowanceCondition {
                min_working_days: c.min_working_days.unwrap_or(0),
                min_working_hours: c.min_working_hours.unwrap_or(Decimal::ZERO),
                no_absence: c.no_absence.unwrap_or(false),
                no_late_arrival: c.no_late_arrival.unwrap_or(false),
                no_early_leave: c.no_early_leave.unwrap_or(false),
            }),
            (AllowanceType::Conditional, None) => {
                return Err(invalid(
                    &format!("allowances.rules[{}].condition", rule.code),
                    "conditional rules require a condition",
                ));
            }
            (_, Some(_)) => {
                return Err(invalid(
                    &format!("allowances.rules[{}].condition", rule.code),
                    "condition is only valid on conditional rules",
                ));
            }
            (_, None) => None,
        };
        rules.push(AllowanceRule {
            code: rule.code,
            name: rule.name,
            rule_type: rule.rule_type,
            amount: rule.amount,
            taxable: rule.taxable.unwrap_or(true),
            condition,
        });
    }

    Ok(AllowanceConfig { rules })
}

fn resolve_deductions(
    raw: Option<RawDeductionConfig>,
    defaults: &mut Defaults,
) -> EngineResult<DeductionConfig> {
    let raw = match raw {
        Some(r) => r,
        None => {
            defaults.applied.push("deductions".to_string());
            RawDeductionConfig::default()
        }
    };

    let mut rules = Vec::with_capacity(raw.rules.len());
    for rule in raw.rules {
        let kind = match (rule.rule_type, rule.amount, rule.percentage) {
            (RawDeductionType::Fixed, Some(amount), None) => {
                if amount < Decimal::ZERO {
                    return Err(invalid(
                        &format!("deductions.rules[{}].amount", rule.code),
                        "must not be negative",
                    ));
                }
                DeductionKind::Fixed { amount }
            }
            (RawDeductionType::Percentage, None, Some(percentage)) => {
                if percentage <= Decimal::ZERO || percentage > Decimal::new(100, 0) {
                    return Err(invalid(
                        &format!("deductions.rules[{}].percentage", rule.code),
                        format!("percentage {percentage} outside (0, 100]"),
                    ));
                }
                DeductionKind::Percentage { percentage }
            }
            _ => {
                return Err(invalid(
                    &format!("deductions.rules[{}]", rule.code),
                    "exactly one of amount (fixed) or percentage (percentage) must be set",
                ));
            }
        };
        rules.push(DeductionRule {
            code: rule.code,
            name: rule.name,
            kind,
            order: rule.order.unwrap_or(0),
        });
    }

    let standard_working_days = defaults.field(
        raw.standard_working_days_per_month,
        DEFAULT_STANDARD_WORKING_DAYS,
        "deductions.standard_working_days_per_month",
    );
    if standard_working_days < 1 {
        return Err(invalid(
            "deductions.standard_working_days_per_month",
            "must be at least 1",
        ));
    }

    Ok(DeductionConfig {
        rules,
        enable_late_penalty: defaults.field(
            raw.enable_late_penalty,
            false,
            "deductions.enable_late_penalty",
        ),
        late_penalty_per_minute: defaults.field(
            raw.late_penalty_per_minute,
            Decimal::ZERO,
            "deductions.late_penalty_per_minute",
        ),
        enable_early_leave_penalty: defaults.field(
            raw.enable_early_leave_penalty,
            false,
            "deductions.enable_early_leave_penalty",
        ),
        early_leave_penalty_per_minute: defaults.field(
            raw.early_leave_penalty_per_minute,
            Decimal::ZERO,
            "deductions.early_leave_penalty_per_minute",
        ),
        enable_absence_deduction: defaults.field(
            raw.enable_absence_deduction,
            false,
            "deductions.enable_absence_deduction",
        ),
        standard_working_days_per_month: standard_working_days,
    })
}
