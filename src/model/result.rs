use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Employer contribution for one employee, every amount rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CalculationResult {
    #[schema(example = "Zhang San")]
    pub employee_name: String,

    #[schema(example = 8000.0)]
    pub avg_salary: f64,

    #[schema(example = 8000.0)]
    pub contribution_base: f64,

    #[schema(example = 1280.0)]
    pub company_fee: f64,
}

/// A persisted result row; `created_at` is refreshed on every overwrite.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct ResultRecord {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "Zhang San")]
    pub employee_name: String,

    pub avg_salary: f64,
    pub contribution_base: f64,
    pub company_fee: f64,

    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}
