use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

use crate::{
    calculator::{colliding_names, compute_contributions},
    error::AppError,
    ingest::{self, Row, UploadTable},
    model::{
        result::{CalculationResult, ResultRecord},
        salary::extract_year,
    },
    store::ContributionStore,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct CalculationSummary {
    #[schema(example = 3)]
    pub count: usize,

    pub results: Vec<CalculationResult>,

    /// Names used by more than one employee id. Only one result per name is
    /// kept once saved.
    #[schema(example = json!([]))]
    pub name_collisions: Vec<String>,
}

/// Resolve the standard, compute every employee's contribution and save it.
///
/// Nothing is written unless every step before the upsert succeeds.
#[instrument(name = "calculate_contributions", skip(store))]
pub async fn calculate_and_save<S: ContributionStore>(
    store: &S,
    city_name: &str,
    year: &str,
) -> Result<CalculationSummary, AppError> {
    let city_name = city_name.trim();
    let year = year.trim();
    if city_name.is_empty() {
        return Err(AppError::MissingParameter("city_name"));
    }
    if year.is_empty() {
        return Err(AppError::MissingParameter("year"));
    }

    let standard = store
        .find_standard(city_name, year)
        .await?
        .ok_or_else(|| AppError::StandardNotFound {
            city_name: city_name.to_string(),
            year: year.to_string(),
        })?;

    let salaries = store.list_salaries().await?;
    if salaries.is_empty() {
        return Err(AppError::NoSalaryData);
    }

    let results = compute_contributions(&standard, &salaries)?;

    let name_collisions = colliding_names(&salaries);
    for name in &name_collisions {
        warn!(employee_name = %name, "Several employee ids share this name; only one result will be kept");
    }

    store.upsert_results(&results).await?;

    info!(
        employees = results.len(),
        salary_rows = salaries.len(),
        base_min = standard.base_min,
        base_max = standard.base_max,
        rate = standard.rate,
        "Contributions calculated and saved"
    );

    Ok(CalculationSummary {
        count: results.len(),
        results,
        name_collisions,
    })
}

pub async fn list_results<S: ContributionStore>(store: &S) -> Result<Vec<ResultRecord>, AppError> {
    store.list_results().await
}

pub async fn list_cities<S: ContributionStore>(store: &S) -> Result<Vec<String>, AppError> {
    store.list_cities().await
}

/// Year of the payroll currently loaded, taken from the first salary month.
pub async fn detect_year<S: ContributionStore>(store: &S) -> Result<String, AppError> {
    let month = store
        .first_salary_month()
        .await?
        .ok_or(AppError::NoSalaryData)?;

    Ok(extract_year(&month).to_string())
}

/// Validate uploaded rows and replace the whole table with them.
#[instrument(skip(store, rows), fields(rows = rows.len()))]
pub async fn import_rows<S: ContributionStore>(
    store: &S,
    table: UploadTable,
    rows: &[Row],
) -> Result<u64, AppError> {
    let inserted = match table {
        UploadTable::Salaries => {
            let records = ingest::salary_records(rows)?;
            store.replace_salaries(&records).await?
        }
        UploadTable::Cities => {
            let standards = ingest::city_standards(rows)?;
            store.replace_cities(&standards).await?
        }
    };

    info!(inserted, "Upload stored");
    Ok(inserted)
}

/// Upload bodies may send rows either bare or wrapped as `{"rows": [...]}`.
pub fn rows_from_json(body: Value) -> Result<Vec<Row>, AppError> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("rows") {
            Some(Value::Array(items)) => items,
            _ => return Err(AppError::MissingParameter("rows")),
        },
        _ => return Err(AppError::MissingParameter("rows")),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(row) => Ok(row),
            _ => Err(AppError::MalformedInput {
                row: index + 1,
                reason: "row must be an object of column -> value".into(),
            }),
        })
        .collect()
}
