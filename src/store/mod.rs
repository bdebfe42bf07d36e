use std::future::Future;

use crate::{
    error::AppError,
    model::{
        city::CityStandard,
        result::{CalculationResult, ResultRecord},
        salary::SalaryRecord,
    },
};

#[cfg(test)]
pub mod memory;
pub mod mysql;

pub use mysql::MySqlStore;

/// Persistence the contribution pipeline runs against.
///
/// Handles are built once at startup and passed in; nothing here is global.
pub trait ContributionStore {
    /// Exact `(city_name, year)` match.
    fn find_standard(
        &self,
        city_name: &str,
        year: &str,
    ) -> impl Future<Output = Result<Option<CityStandard>, AppError>>;

    fn list_salaries(&self) -> impl Future<Output = Result<Vec<SalaryRecord>, AppError>>;

    /// Month of the earliest stored salary row.
    fn first_salary_month(&self) -> impl Future<Output = Result<Option<String>, AppError>>;

    /// Distinct city names, sorted.
    fn list_cities(&self) -> impl Future<Output = Result<Vec<String>, AppError>>;

    /// Inserts or overwrites by `employee_name`; all rows or none.
    fn upsert_results(
        &self,
        results: &[CalculationResult],
    ) -> impl Future<Output = Result<(), AppError>>;

    /// Ordered by `employee_name`.
    fn list_results(&self) -> impl Future<Output = Result<Vec<ResultRecord>, AppError>>;

    /// Replaces every salary row; returns the number inserted.
    fn replace_salaries(
        &self,
        records: &[SalaryRecord],
    ) -> impl Future<Output = Result<u64, AppError>>;

    /// Replaces every city standard; returns the number inserted.
    fn replace_cities(
        &self,
        standards: &[CityStandard],
    ) -> impl Future<Output = Result<u64, AppError>>;
}
