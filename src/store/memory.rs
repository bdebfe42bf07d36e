use std::{cell::RefCell, collections::BTreeMap};

use chrono::Utc;

use super::ContributionStore;
use crate::{
    error::AppError,
    model::{
        city::CityStandard,
        result::{CalculationResult, ResultRecord},
        salary::SalaryRecord,
    },
};

/// Table-per-field stand-in for MySQL, upsert semantics included.
#[derive(Default)]
pub struct MemoryStore {
    pub cities: RefCell<Vec<CityStandard>>,
    pub salaries: RefCell<Vec<SalaryRecord>>,
    pub results: RefCell<BTreeMap<String, ResultRecord>>,
    next_id: RefCell<u64>,
}

impl MemoryStore {
    pub fn with_data(cities: Vec<CityStandard>, salaries: Vec<SalaryRecord>) -> Self {
        Self {
            cities: RefCell::new(cities),
            salaries: RefCell::new(salaries),
            ..Self::default()
        }
    }
}

impl ContributionStore for MemoryStore {
    async fn find_standard(
        &self,
        city_name: &str,
        year: &str,
    ) -> Result<Option<CityStandard>, AppError> {
        Ok(self
            .cities
            .borrow()
            .iter()
            .find(|c| c.city_name == city_name && c.year == year)
            .cloned())
    }

    async fn list_salaries(&self) -> Result<Vec<SalaryRecord>, AppError> {
        Ok(self.salaries.borrow().clone())
    }

    async fn first_salary_month(&self) -> Result<Option<String>, AppError> {
        Ok(self.salaries.borrow().first().map(|s| s.month.clone()))
    }

    async fn list_cities(&self) -> Result<Vec<String>, AppError> {
        let mut names: Vec<String> = self
            .cities
            .borrow()
            .iter()
            .map(|c| c.city_name.clone())
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    async fn upsert_results(&self, results: &[CalculationResult]) -> Result<(), AppError> {
        let mut table = self.results.borrow_mut();
        let mut next_id = self.next_id.borrow_mut();

        for result in results {
            let id = match table.get(&result.employee_name) {
                Some(existing) => existing.id,
                None => {
                    *next_id += 1;
                    *next_id
                }
            };
            table.insert(
                result.employee_name.clone(),
                ResultRecord {
                    id,
                    employee_name: result.employee_name.clone(),
                    avg_salary: result.avg_salary,
                    contribution_base: result.contribution_base,
                    company_fee: result.company_fee,
                    created_at: Utc::now(),
                },
            );
        }
        Ok(())
    }

    async fn list_results(&self) -> Result<Vec<ResultRecord>, AppError> {
        Ok(self.results.borrow().values().cloned().collect())
    }

    async fn replace_salaries(&self, records: &[SalaryRecord]) -> Result<u64, AppError> {
        *self.salaries.borrow_mut() = records.to_vec();
        Ok(records.len() as u64)
    }

    async fn replace_cities(&self, standards: &[CityStandard]) -> Result<u64, AppError> {
        *self.cities.borrow_mut() = standards.to_vec();
        Ok(standards.len() as u64)
    }
}
