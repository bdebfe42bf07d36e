use crate::api::calculate::CalculateRequest;
use crate::db::{SchemaStatus, TableStatus};
use crate::model::{
    city::CityStandard,
    result::{CalculationResult, ResultRecord},
    salary::SalaryRecord,
};
use crate::service::CalculationSummary;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Social Insurance Contribution API",
        version = "1.0.0",
        description = r#"
## Employer Social Insurance Calculator

Computes the employer's social-insurance contribution for every employee from
uploaded payroll and city-rate sheets.

### 🔹 Workflow
1. **Upload** the city standards (`cities`) and monthly salaries (`salaries`)
2. **Extract** the payroll year and pick a city
3. **Calculate**: each employee's average monthly salary is clamped into the
   city's `[base_min, base_max]` bracket and multiplied by the employer rate
4. **Review** saved results, ordered by employee name

### 📐 Rounding
Average salary, contribution base and company fee are rounded to 2 decimals,
half away from zero.

### 📦 Response Format
- JSON-based RESTful responses
- Errors carry `{"error": <kind>, "message": <text>}`

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::upload::upload,

        crate::api::cities::list_cities,
        crate::api::cities::extract_year,

        crate::api::calculate::calculate,
        crate::api::results::list_results,

        crate::api::schema::schema_status,
        crate::api::schema::init_schema
    ),
    components(
        schemas(
            CalculateRequest,
            CalculationSummary,
            CalculationResult,
            ResultRecord,
            CityStandard,
            SalaryRecord,
            SchemaStatus,
            TableStatus
        )
    ),
    tags(
        (name = "Data", description = "Sheet upload and lookup APIs"),
        (name = "Calculation", description = "Contribution calculation APIs"),
        (name = "Admin", description = "Schema provisioning APIs"),
    )
)]
pub struct ApiDoc;
