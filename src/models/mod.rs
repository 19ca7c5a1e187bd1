//! Core data models for the payroll calculation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod results;
mod salary;

pub use attendance::{AttendanceDay, AttendanceExceptions, AttendanceSummary, BreakRecord};
pub use results::{
    AllowanceItem, AllowanceResult, AuditStep, AuditTrace, BreakEvaluation, CalculationWarning,
    DayResult, DeductionItem, DeductionResult, OvertimeResult, PayPeriod, PayrollPreviewResponse,
    PayrollResult, PreviewError, PreviewItem, WorkingHoursResult, WARN_BREAK_NON_COMPLIANT,
    WARN_CAP_EXCEEDED_DAY, WARN_CAP_EXCEEDED_MONTH, WARN_DEFAULTS_APPLIED,
};
pub use salary::{EmployeeSalaryInfo, SalaryBasis};
