use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One employee's pay for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "employee_id": "E001",
        "employee_name": "Zhang San",
        "month": "202401",
        "salary_amount": 8000.0
    })
)]
pub struct SalaryRecord {
    #[schema(example = "E001")]
    pub employee_id: String,

    #[schema(example = "Zhang San")]
    pub employee_name: String,

    /// `YYYYMM`
    #[schema(example = "202401")]
    pub month: String,

    #[schema(example = 8000.0)]
    pub salary_amount: f64,
}

/// `202401` -> `2024`. Months shorter than four characters come back whole.
pub fn extract_year(month: &str) -> &str {
    month.get(..4).unwrap_or(month)
}
