use actix_web::{HttpResponse, web};

use crate::{error::AppError, model::result::ResultRecord, service, store::MySqlStore};

/// List saved results ordered by employee name
#[utoipa::path(
    get,
    path = "/api/results",
    responses(
        (status = 200, body = [ResultRecord]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Calculation"
)]
pub async fn list_results(store: web::Data<MySqlStore>) -> Result<HttpResponse, AppError> {
    let results = service::list_results(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(results))
}
