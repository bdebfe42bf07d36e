use sqlx::{MySql, MySqlPool, QueryBuilder};
use tracing::debug;

use super::ContributionStore;
use crate::{
    error::AppError,
    model::{
        city::CityStandard,
        result::{CalculationResult, ResultRecord},
        salary::SalaryRecord,
    },
};

/// Rows per multi-row INSERT; keeps bind counts far below MySQL's 65535 limit.
const INSERT_BATCH: usize = 1000;

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

impl ContributionStore for MySqlStore {
    async fn find_standard(
        &self,
        city_name: &str,
        year: &str,
    ) -> Result<Option<CityStandard>, AppError> {
        let standard = sqlx::query_as::<_, CityStandard>(
            r#"
            SELECT city_name, year, base_min, base_max, rate
            FROM cities
            WHERE city_name = ? AND year = ?
            "#,
        )
        .bind(city_name)
        .bind(year)
        .fetch_optional(&self.pool)
        .await?;

        Ok(standard)
    }

    async fn list_salaries(&self) -> Result<Vec<SalaryRecord>, AppError> {
        let records = sqlx::query_as::<_, SalaryRecord>(
            r#"
            SELECT employee_id, employee_name, month, salary_amount
            FROM salaries
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = records.len(), "Fetched salary records");
        Ok(records)
    }

    async fn first_salary_month(&self) -> Result<Option<String>, AppError> {
        let month = sqlx::query_scalar::<_, String>(
            "SELECT month FROM salaries ORDER BY id LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(month)
    }

    async fn list_cities(&self) -> Result<Vec<String>, AppError> {
        let cities = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT city_name FROM cities ORDER BY city_name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(cities)
    }

    async fn upsert_results(&self, results: &[CalculationResult]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        for chunk in results.chunks(INSERT_BATCH) {
            let mut query: QueryBuilder<MySql> = QueryBuilder::new(
                "INSERT INTO results (employee_name, avg_salary, contribution_base, company_fee) ",
            );
            query.push_values(chunk, |mut row, result| {
                row.push_bind(result.employee_name.clone())
                    .push_bind(result.avg_salary)
                    .push_bind(result.contribution_base)
                    .push_bind(result.company_fee);
            });
            query.push(
                r#"
                ON DUPLICATE KEY UPDATE
                    avg_salary = VALUES(avg_salary),
                    contribution_base = VALUES(contribution_base),
                    company_fee = VALUES(company_fee),
                    created_at = CURRENT_TIMESTAMP
                "#,
            );
            query.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn list_results(&self) -> Result<Vec<ResultRecord>, AppError> {
        let results = sqlx::query_as::<_, ResultRecord>(
            r#"
            SELECT id, employee_name, avg_salary, contribution_base, company_fee, created_at
            FROM results
            ORDER BY employee_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(results)
    }

    async fn replace_salaries(&self, records: &[SalaryRecord]) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM salaries")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let mut inserted = 0;
        for chunk in records.chunks(INSERT_BATCH) {
            let mut query: QueryBuilder<MySql> = QueryBuilder::new(
                "INSERT INTO salaries (employee_id, employee_name, month, salary_amount) ",
            );
            query.push_values(chunk, |mut row, record| {
                row.push_bind(record.employee_id.clone())
                    .push_bind(record.employee_name.clone())
                    .push_bind(record.month.clone())
                    .push_bind(record.salary_amount);
            });
            inserted += query.build().execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;
        debug!(removed, inserted, "Replaced salary rows");
        Ok(inserted)
    }

    async fn replace_cities(&self, standards: &[CityStandard]) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM cities")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let mut inserted = 0;
        for chunk in standards.chunks(INSERT_BATCH) {
            let mut query: QueryBuilder<MySql> = QueryBuilder::new(
                "INSERT INTO cities (city_name, year, base_min, base_max, rate) ",
            );
            query.push_values(chunk, |mut row, standard| {
                row.push_bind(standard.city_name.clone())
                    .push_bind(standard.year.clone())
                    .push_bind(standard.base_min)
                    .push_bind(standard.base_max)
                    .push_bind(standard.rate);
            });
            inserted += query.build().execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;
        debug!(removed, inserted, "Replaced city standards");
        Ok(inserted)
    }
}
