use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::{error::AppError, service, store::MySqlStore};

/// Distinct city names with an uploaded standard
#[utoipa::path(
    get,
    path = "/api/cities",
    responses(
        (status = 200, body = [String], example = json!(["Foshan", "Guangzhou"])),
        (status = 500, description = "Internal server error")
    ),
    tag = "Data"
)]
pub async fn list_cities(store: web::Data<MySqlStore>) -> Result<HttpResponse, AppError> {
    let cities = service::list_cities(store.get_ref()).await?;
    tracing::debug!(count = cities.len(), "Listed cities");
    Ok(HttpResponse::Ok().json(cities))
}

/// Year of the uploaded payroll, read from its first month
#[utoipa::path(
    get,
    path = "/api/extract-year",
    responses(
        (status = 200, body = Object, example = json!({ "year": "2024" })),
        (status = 404, description = "No salary data uploaded yet")
    ),
    tag = "Data"
)]
pub async fn extract_year(store: web::Data<MySqlStore>) -> Result<HttpResponse, AppError> {
    let year = service::detect_year(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(json!({ "year": year })))
}
