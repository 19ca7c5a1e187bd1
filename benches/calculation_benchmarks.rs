//! Performance benchmarks for the payroll calculation engine.
//!
//! This benchmark suite tracks the calculation core:
//! - Single attendance day through the full pipeline
//! - One employee over a 22-day month
//! - A 100-employee batch preview
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use payroll_engine::config::ConfigLoader;
use payroll_engine::engine::{calculate_payroll, calculate_preview, PayrollInput};
use payroll_engine::models::{
    AttendanceDay, AttendanceExceptions, BreakRecord, EmployeeSalaryInfo, PayPeriod, SalaryBasis,
};

const CONFIG_YAML: &str = r#"
rounding:
  enabled: true
  break_start:
    enabled: false
  break_end:
    enabled: false
break_policy:
  break_type: unpaid
  minimum_minutes: 45
  maximum_minutes: 90
  default_minutes: 60
  tracking_enabled: true
overtime:
  standard_working_minutes_per_day: 480
  locale: jp
deductions:
  rules:
    - code: income_tax
      name: Income tax withholding
      rule_type: percentage
      percentage: 10
      order: 1
payroll:
  salary_rounding: nearest
"#;

fn loader() -> ConfigLoader {
    ConfigLoader::from_yaml_str(CONFIG_YAML).expect("benchmark config resolves")
}

fn attendance_day(date: NaiveDate) -> AttendanceDay {
    AttendanceDay {
        date,
        check_in: date.and_hms_opt(8, 58, 0).unwrap(),
        check_out: date.and_hms_opt(19, 5, 0).unwrap(),
        breaks: vec![BreakRecord {
            start: date.and_hms_opt(12, 0, 0).unwrap(),
            end: date.and_hms_opt(12, 55, 0).unwrap(),
        }],
        is_holiday: false,
        is_weekend: false,
    }
}

fn input_with_days(employee_id: &str, day_count: usize) -> PayrollInput {
    let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let days: Vec<_> = (0..day_count)
        .map(|offset| attendance_day(start + chrono::Duration::days(offset as i64)))
        .collect();
    PayrollInput {
        employee_id: employee_id.to_string(),
        period: PayPeriod {
            start_date: start,
            end_date: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
        },
        days,
        exceptions: AttendanceExceptions::default(),
        salary: EmployeeSalaryInfo {
            employee_id: employee_id.to_string(),
            basis: SalaryBasis::Monthly {
                monthly_salary: Decimal::new(300_000, 0),
            },
            hourly_rate: Decimal::new(1_875, 0),
        },
    }
}

fn bench_single_day(c: &mut Criterion) {
    let loader = loader();
    let input = input_with_days("emp_bench", 1);

    c.bench_function("payroll_single_day", |b| {
        b.iter(|| {
            calculate_payroll(
                black_box(&input),
                loader.config(),
                loader.defaults_applied(),
            )
            .expect("calculation succeeds")
        })
    });
}

fn bench_full_month(c: &mut Criterion) {
    let loader = loader();
    let mut group = c.benchmark_group("payroll_period");

    for day_count in [5usize, 22] {
        let input = input_with_days("emp_bench", day_count);
        group.throughput(Throughput::Elements(day_count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(day_count),
            &input,
            |b, input| {
                b.iter(|| {
                    calculate_payroll(
                        black_box(input),
                        loader.config(),
                        loader.defaults_applied(),
                    )
                    .expect("calculation succeeds")
                })
            },
        );
    }
    group.finish();
}

fn bench_batch_preview(c: &mut Criterion) {
    let loader = loader();
    let inputs: Vec<_> = (0..100)
        .map(|i| input_with_days(&format!("emp_{i:03}"), 22))
        .collect();
    let period = inputs[0].period;

    let mut group = c.benchmark_group("payroll_preview");
    group.throughput(Throughput::Elements(inputs.len() as u64));
    group.bench_function("100_employees", |b| {
        b.iter(|| {
            calculate_preview(
                black_box(period),
                black_box(&inputs),
                loader.config(),
                loader.defaults_applied(),
            )
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_single_day,
    bench_full_month,
    bench_batch_preview
);
criterion_main!(benches);
