use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::{
    db::{self, SchemaStatus},
    error::AppError,
    store::MySqlStore,
};

/// Report which tables exist
#[utoipa::path(
    get,
    path = "/api/init-db",
    responses(
        (status = 200, body = SchemaStatus),
        (status = 500, description = "Internal server error")
    ),
    tag = "Admin"
)]
pub async fn schema_status(store: web::Data<MySqlStore>) -> Result<HttpResponse, AppError> {
    let status = db::schema_status(store.pool()).await?;
    Ok(HttpResponse::Ok().json(status))
}

/// Create missing tables and indexes
#[utoipa::path(
    post,
    path = "/api/init-db",
    responses(
        (status = 200, description = "Schema ready", body = Object, example = json!({
            "success": true,
            "message": "Database initialized",
            "initialized": true
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Admin"
)]
pub async fn init_schema(store: web::Data<MySqlStore>) -> Result<HttpResponse, AppError> {
    db::ensure_schema(store.pool()).await?;
    let status = db::schema_status(store.pool()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Database initialized",
        "initialized": status.initialized,
        "tables": status.tables,
    })))
}
