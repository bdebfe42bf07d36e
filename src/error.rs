use actix_web::{HttpRequest, HttpResponse, ResponseError, error::JsonPayloadError, http::StatusCode};
use derive_more::Display;
use serde_json::json;
use strum::AsRefStr;

/// Every failure a contribution run or an upload can surface.
///
/// Runs are all-or-nothing: once one of these is returned nothing has been
/// persisted for that request.
#[derive(Debug, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum AppError {
    /// No city-rate row for the requested `(city_name, year)` pair.
    #[display(fmt = "no social insurance standard found for city {} in {}", city_name, year)]
    StandardNotFound { city_name: String, year: String },

    #[display(fmt = "no salary data found, upload salaries first")]
    NoSalaryData,

    #[display(fmt = "invalid city standard: {}", reason)]
    InvalidStandard { reason: String },

    /// `row` is 1-based, as a spreadsheet user would count it.
    #[display(fmt = "row {}: {}", row, reason)]
    MalformedInput { row: usize, reason: String },

    /// The request body as a whole could not be used; no row to point at.
    #[display(fmt = "invalid request body: {}", _0)]
    InvalidBody(String),

    #[display(fmt = "missing required parameter `{}`", _0)]
    MissingParameter(&'static str),

    #[display(fmt = "unknown table `{}`, expected `cities` or `salaries`", _0)]
    UnknownTable(String),

    #[display(fmt = "database error: {}", _0)]
    Database(sqlx::Error),
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Database(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Database(e)
    }
}

impl AppError {
    pub fn kind(&self) -> &str {
        self.as_ref()
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::StandardNotFound { .. } | AppError::NoSalaryData => StatusCode::NOT_FOUND,
            AppError::InvalidStandard { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::MalformedInput { .. }
            | AppError::InvalidBody(_)
            | AppError::MissingParameter(_)
            | AppError::UnknownTable(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database operation failed");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({
            "error": self.kind(),
            "message": message,
        }))
    }
}

/// `JsonConfig` error handler: malformed JSON answers in the same shape as
/// every other error.
pub fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::InvalidBody(err.to_string()).into()
}
