//! Employee salary information supplied by the external salary store.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the base salary for a period is derived.
///
/// The tag names match the salary types used in configuration and storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "salary_type", rename_all = "snake_case")]
pub enum SalaryBasis {
    /// A fixed monthly amount, unprorated (absence is handled by deduction).
    Monthly {
        /// The monthly salary in minor units.
        monthly_salary: Decimal,
    },
    /// A daily rate multiplied by days worked.
    Daily {
        /// The rate per working day in minor units.
        daily_rate: Decimal,
    },
    /// An hourly rate multiplied by net working hours.
    Hourly {
        /// The rate per hour in minor units.
        hourly_rate: Decimal,
    },
    /// A per-shift rate multiplied by the number of shifts.
    ShiftBased {
        /// The rate per shift in minor units.
        shift_rate: Decimal,
    },
}

impl SalaryBasis {
    /// Returns the salary type tag as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            SalaryBasis::Monthly { .. } => "monthly",
            SalaryBasis::Daily { .. } => "daily",
            SalaryBasis::Hourly { .. } => "hourly",
            SalaryBasis::ShiftBased { .. } => "shift_based",
        }
    }

    /// Returns the monthly salary when this basis is monthly.
    ///
    /// The absence deduction divides a monthly salary by the standard
    /// working days; for the other bases absence is already reflected in
    /// fewer paid days/hours/shifts.
    pub fn monthly_salary(&self) -> Option<Decimal> {
        match self {
            SalaryBasis::Monthly { monthly_salary } => Some(*monthly_salary),
            _ => None,
        }
    }
}

/// Effective salary information for one employee.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{EmployeeSalaryInfo, SalaryBasis};
/// use rust_decimal::Decimal;
///
/// let info = EmployeeSalaryInfo {
///     employee_id: "emp_001".to_string(),
///     basis: SalaryBasis::Monthly {
///         monthly_salary: Decimal::new(300_000, 0),
///     },
///     hourly_rate: Decimal::new(1_875, 0),
/// };
/// assert_eq!(info.basis.type_name(), "monthly");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSalaryInfo {
    /// The employee this salary applies to.
    pub employee_id: String,
    /// How the base salary is derived.
    #[serde(flatten)]
    pub basis: SalaryBasis,
    /// The effective hourly rate used to price overtime and night premiums.
    pub hourly_rate: Decimal,
}
