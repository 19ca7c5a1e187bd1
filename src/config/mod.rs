//! Configuration model for payroll calculation.
//!
//! Raw configuration (optional fields, YAML) is resolved through a single
//! explicit defaulting/validation step into immutable, fully-populated
//! policy values. Calculators only ever see the resolved types.

mod loader;
mod resolver;
mod types;

pub use loader::ConfigLoader;
pub use resolver::{
    resolve, RawAllowanceConfig, RawAllowanceCondition, RawAllowanceRule, RawBreakPolicy,
    RawCheckpointRounding, RawDeductionConfig, RawDeductionRule, RawDeductionType,
    RawEngineConfig, RawOvertimePolicy, RawPayrollConfig, RawRoundingConfig, RawRoundingPolicy,
    ResolvedConfig, DEFAULT_BREAK_MAXIMUM, DEFAULT_BREAK_MINIMUM, DEFAULT_BREAK_MINUTES,
    DEFAULT_LOCALE, DEFAULT_MAX_OVERTIME_PER_DAY, DEFAULT_MAX_OVERTIME_PER_MONTH,
    DEFAULT_ROUNDING_INTERVAL, DEFAULT_STANDARD_MINUTES, DEFAULT_STANDARD_WORKING_DAYS,
};
pub use types::{
    AllowanceConfig, AllowanceCondition, AllowanceRule, AllowanceType, BreakPeriod, BreakPolicy,
    BreakType, CheckpointRounding, DeductionConfig, DeductionKind, DeductionRule, EngineConfig,
    NightWindow, OvertimeMultipliers, OvertimePolicy, PayrollConfig, RoundingConfig,
    RoundingDirection, RoundingPolicy, SUPPORTED_ROUNDING_INTERVALS,
};
