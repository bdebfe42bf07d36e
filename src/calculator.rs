//! Employer contribution arithmetic.
//!
//! Salary records are bucketed by `(employee_id, employee_name)`, averaged,
//! clamped into the city's `[base_min, base_max]` bracket and multiplied by the
//! employer rate. Nothing here touches the database.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

use crate::{
    error::AppError,
    model::{city::CityStandard, result::CalculationResult, salary::SalaryRecord},
};

/// Rounds to cents, half away from zero.
///
/// Rounding looks at the exact value the `f64` holds, so a decimal half that
/// cannot be stored exactly (`2.675` is `2.67499…`) rounds down. Non-finite
/// values come back unchanged.
pub fn round2(value: f64) -> f64 {
    let Some(exact) = Decimal::from_f64_retain(value) else {
        return value;
    };
    let cents = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        * Decimal::ONE_HUNDRED;

    match cents.to_i64() {
        Some(cents) => cents as f64 / 100.0,
        None => value,
    }
}

/// Clamps an average salary into the closed bracket of `standard`.
pub fn clamp_base(avg_salary: f64, standard: &CityStandard) -> f64 {
    if avg_salary < standard.base_min {
        standard.base_min
    } else if avg_salary > standard.base_max {
        standard.base_max
    } else {
        avg_salary
    }
}

struct Bucket<'a> {
    employee_name: &'a str,
    total: f64,
    months: usize,
}

/// One result per distinct `(employee_id, employee_name)`, in the order each
/// pair first appears in `records`.
pub fn compute_contributions(
    standard: &CityStandard,
    records: &[SalaryRecord],
) -> Result<Vec<CalculationResult>, AppError> {
    if records.is_empty() {
        return Err(AppError::NoSalaryData);
    }
    standard.validate()?;

    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut buckets: Vec<Bucket<'_>> = Vec::new();

    for record in records {
        let key = (record.employee_id.as_str(), record.employee_name.as_str());
        let slot = *index.entry(key).or_insert_with(|| {
            buckets.push(Bucket {
                employee_name: &record.employee_name,
                total: 0.0,
                months: 0,
            });
            buckets.len() - 1
        });
        let bucket = &mut buckets[slot];
        bucket.total += record.salary_amount;
        bucket.months += 1;
    }

    Ok(buckets
        .into_iter()
        .map(|bucket| {
            let avg_salary = bucket.total / bucket.months as f64;
            let contribution_base = clamp_base(avg_salary, standard);
            let company_fee = contribution_base * standard.rate;

            CalculationResult {
                employee_name: bucket.employee_name.to_string(),
                avg_salary: round2(avg_salary),
                contribution_base: round2(contribution_base),
                company_fee: round2(company_fee),
            }
        })
        .collect())
}

/// Names shared by more than one employee id, sorted.
///
/// Results are stored by name alone, so each of these names keeps only one of
/// its employees' results after a save.
pub fn colliding_names(records: &[SalaryRecord]) -> Vec<String> {
    let mut ids_by_name: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for record in records {
        ids_by_name
            .entry(record.employee_name.as_str())
            .or_default()
            .insert(record.employee_id.as_str());
    }

    ids_by_name
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|(name, _)| name.to_string())
        .collect()
}
