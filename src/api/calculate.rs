use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::{error::AppError, service, store::MySqlStore};

#[derive(Deserialize, ToSchema)]
pub struct CalculateRequest {
    #[schema(example = "Foshan")]
    pub city_name: String,

    #[schema(example = "2024")]
    pub year: String,
}

/// Compute and save every employee's employer contribution
#[utoipa::path(
    post,
    path = "/api/calculate",
    request_body = CalculateRequest,
    responses(
        (status = 200, description = "Contributions calculated and saved", body = Object, example = json!({
            "success": true,
            "count": 2,
            "message": "Calculated contributions for 2 employees",
            "name_collisions": [],
            "results": [
                { "employee_name": "Li Si", "avg_salary": 25000.0, "contribution_base": 20000.0, "company_fee": 3200.0 },
                { "employee_name": "Zhang San", "avg_salary": 3000.0, "contribution_base": 5000.0, "company_fee": 800.0 }
            ]
        })),
        (status = 400, description = "Missing city name or year"),
        (status = 404, description = "No standard for the city/year, or no salary data"),
        (status = 422, description = "Stored standard is invalid"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Calculation"
)]
pub async fn calculate(
    store: web::Data<MySqlStore>,
    payload: web::Json<CalculateRequest>,
) -> Result<HttpResponse, AppError> {
    let summary = service::calculate_and_save(store.get_ref(), &payload.city_name, &payload.year).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "count": summary.count,
        "message": format!("Calculated contributions for {} employees", summary.count),
        "name_collisions": summary.name_collisions,
        "results": summary.results,
    })))
}
