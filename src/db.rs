use serde::Serialize;
use sqlx::{MySqlPool, mysql::MySqlPoolOptions};
use tracing::info;
use utoipa::ToSchema;

pub async fn init_db(database_url: &str, max_connections: u32) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

// Names, ids and years compare byte-exact (`utf8mb4_bin`): lookups, the results
// unique key and ORDER BY must not fold case or accents.
const CREATE_CITIES: &str = r#"
CREATE TABLE IF NOT EXISTS cities (
    id BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY,
    city_name VARCHAR(64) COLLATE utf8mb4_bin NOT NULL,
    year CHAR(4) COLLATE utf8mb4_bin NOT NULL,
    base_min DOUBLE NOT NULL,
    base_max DOUBLE NOT NULL,
    rate DOUBLE NOT NULL,
    UNIQUE KEY uq_cities_city_year (city_name, year)
)
"#;

const CREATE_SALARIES: &str = r#"
CREATE TABLE IF NOT EXISTS salaries (
    id BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY,
    employee_id VARCHAR(64) COLLATE utf8mb4_bin NOT NULL,
    employee_name VARCHAR(128) COLLATE utf8mb4_bin NOT NULL,
    month CHAR(6) NOT NULL,
    salary_amount DOUBLE NOT NULL,
    INDEX idx_salaries_employee (employee_id, employee_name)
)
"#;

const CREATE_RESULTS: &str = r#"
CREATE TABLE IF NOT EXISTS results (
    id BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY,
    employee_name VARCHAR(128) COLLATE utf8mb4_bin NOT NULL UNIQUE,
    avg_salary DOUBLE NOT NULL,
    contribution_base DOUBLE NOT NULL,
    company_fee DOUBLE NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

/// Which of the three tables exist in the connected schema.
#[derive(Debug, Serialize, ToSchema)]
pub struct SchemaStatus {
    pub initialized: bool,
    pub tables: TableStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TableStatus {
    pub cities: bool,
    pub salaries: bool,
    pub results: bool,
}

/// Creates the tables and index if missing. Safe to run on every start.
pub async fn ensure_schema(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    for ddl in [CREATE_CITIES, CREATE_SALARIES, CREATE_RESULTS] {
        sqlx::query(ddl).execute(pool).await?;
    }
    info!("Database schema ensured");
    Ok(())
}

async fn table_exists(pool: &MySqlPool, table: &str) -> Result<bool, sqlx::Error> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM information_schema.tables
        WHERE table_schema = DATABASE() AND table_name = ?
        "#,
    )
    .bind(table)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

pub async fn schema_status(pool: &MySqlPool) -> Result<SchemaStatus, sqlx::Error> {
    let (cities, salaries, results) = futures::try_join!(
        table_exists(pool, "cities"),
        table_exists(pool, "salaries"),
        table_exists(pool, "results"),
    )?;

    Ok(SchemaStatus {
        initialized: cities && salaries && results,
        tables: TableStatus {
            cities,
            salaries,
            results,
        },
    })
}
