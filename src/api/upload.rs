use std::str::FromStr;

use actix_web::{HttpResponse, web};
use serde_json::{Value, json};

use crate::{error::AppError, ingest::UploadTable, service, store::MySqlStore};

/// Replace the `cities` or `salaries` table with uploaded sheet rows
#[utoipa::path(
    post,
    path = "/api/upload/{table}",
    params(
        ("table" = String, Path, description = "`cities` or `salaries`")
    ),
    request_body(content = Object, description = "Sheet rows keyed by column header", example = json!({
        "rows": [
            { "employee_id": "E001", "employee_name": "Zhang San", "month": "202401", "salary_amount": 8000 }
        ]
    })),
    responses(
        (status = 200, description = "Table replaced", body = Object, example = json!({
            "success": true,
            "count": 1,
            "message": "Uploaded 1 rows to salaries"
        })),
        (status = 400, description = "Unknown table, empty sheet or malformed row"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Data"
)]
pub async fn upload(
    store: web::Data<MySqlStore>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let table_name = path.into_inner();
    let table =
        UploadTable::from_str(&table_name).map_err(|_| AppError::UnknownTable(table_name))?;

    let rows = service::rows_from_json(body.into_inner())?;
    let count = service::import_rows(store.get_ref(), table, &rows).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "count": count,
        "message": format!("Uploaded {count} rows to {table}"),
    })))
}
