//! Adapts loosely-shaped upload rows into validated records.
//!
//! Rows arrive as JSON objects keyed by whatever the spreadsheet header said.
//! Header names are trimmed, lowercased and stripped of inner whitespace
//! before lookup, and a few known misspellings are accepted.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde_json::{Map, Value};
use strum::{AsRefStr, Display, EnumString};

use crate::{
    error::AppError,
    model::{city::CityStandard, salary::SalaryRecord},
};

pub type Row = Map<String, Value>;

/// Tables an upload may replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum UploadTable {
    Cities,
    Salaries,
}

const CITY_NAME_ALIASES: &[&str] = &["city_name", "city_namte", "cityname"];

fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// One row with normalized headers, remembering its 1-based position.
struct Cells<'a> {
    row: usize,
    cells: Vec<(String, &'a Value)>,
}

impl<'a> Cells<'a> {
    fn new(index: usize, row: &'a Row) -> Self {
        Self {
            row: index + 1,
            cells: row.iter().map(|(k, v)| (normalize_header(k), v)).collect(),
        }
    }

    fn malformed(&self, reason: impl Into<String>) -> AppError {
        AppError::MalformedInput {
            row: self.row,
            reason: reason.into(),
        }
    }

    fn lookup(&self, aliases: &[&str]) -> Option<&'a Value> {
        self.cells
            .iter()
            .find(|(key, _)| aliases.contains(&key.as_str()))
            .map(|(_, value)| *value)
            .filter(|value| !value.is_null())
    }

    fn text(&self, aliases: &[&str]) -> Result<String, AppError> {
        let value = self
            .lookup(aliases)
            .ok_or_else(|| self.malformed(format!("missing column `{}`", aliases[0])))?;

        let text = match value {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return Err(self.malformed(format!("`{}` must be text", aliases[0]))),
        };

        if text.is_empty() {
            return Err(self.malformed(format!("`{}` is empty", aliases[0])));
        }
        Ok(text)
    }

    fn number(&self, column: &str) -> Result<f64, AppError> {
        let value = self
            .lookup(&[column])
            .ok_or_else(|| self.malformed(format!("missing column `{column}`")))?;

        let number = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
            _ => None,
        };

        number
            .filter(|n| n.is_finite())
            .ok_or_else(|| self.malformed(format!("`{column}` is not a number: {value}")))
    }
}

/// `YYYYMM` with a real calendar month.
fn valid_month(month: &str) -> bool {
    month.len() == 6
        && month.bytes().all(|b| b.is_ascii_digit())
        && NaiveDate::parse_from_str(&format!("{month}01"), "%Y%m%d").is_ok()
}

/// `YYYY`, accepting numeric cells such as `2024` or `2024.0`.
fn normalize_year(year: &str) -> Option<String> {
    let year = year.strip_suffix(".0").unwrap_or(year);
    (year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit())).then(|| year.to_string())
}

pub fn salary_records(rows: &[Row]) -> Result<Vec<SalaryRecord>, AppError> {
    if rows.is_empty() {
        return Err(AppError::InvalidBody("uploaded sheet is empty".into()));
    }

    rows.iter()
        .enumerate()
        .map(|(index, row)| -> Result<SalaryRecord, AppError> {
            let cells = Cells::new(index, row);

            let employee_id = cells.text(&["employee_id"])?;
            let employee_name = cells.text(&["employee_name"])?;

            let month = cells.text(&["month"])?;
            let month = month.strip_suffix(".0").unwrap_or(&month).to_string();
            if !valid_month(&month) {
                return Err(cells.malformed(format!("month `{month}` is not YYYYMM")));
            }

            let salary_amount = cells.number("salary_amount")?;
            if salary_amount < 0.0 {
                return Err(cells.malformed(format!("salary_amount {salary_amount} is negative")));
            }

            Ok(SalaryRecord {
                employee_id,
                employee_name,
                month,
                salary_amount,
            })
        })
        .collect()
}

pub fn city_standards(rows: &[Row]) -> Result<Vec<CityStandard>, AppError> {
    if rows.is_empty() {
        return Err(AppError::InvalidBody("uploaded sheet is empty".into()));
    }

    let mut seen = HashSet::new();
    let mut standards = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let cells = Cells::new(index, row);

        let city_name = cells.text(CITY_NAME_ALIASES).map_err(|_| {
            cells.malformed("no city name column (city_name / city_namte / cityname)")
        })?;

        let year = cells.text(&["year"])?;
        let year = normalize_year(&year)
            .ok_or_else(|| cells.malformed(format!("year `{year}` is not YYYY")))?;

        let standard = CityStandard {
            city_name,
            year,
            base_min: cells.number("base_min")?,
            base_max: cells.number("base_max")?,
            rate: cells.number("rate")?,
        };
        standard
            .validate()
            .map_err(|e| cells.malformed(e.to_string()))?;

        if !seen.insert((standard.city_name.clone(), standard.year.clone())) {
            return Err(cells.malformed(format!(
                "duplicate standard for {} {}",
                standard.city_name, standard.year
            )));
        }
        standards.push(standard);
    }

    Ok(standards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn rows(value: Value) -> Vec<Row> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn upload_table_parses_from_path() {
        assert_eq!(UploadTable::from_str("cities").unwrap(), UploadTable::Cities);
        assert_eq!(UploadTable::from_str("salaries").unwrap(), UploadTable::Salaries);
        assert!(UploadTable::from_str("results").is_err());
        assert_eq!(UploadTable::Salaries.to_string(), "salaries");
    }

    #[test]
    fn salary_rows_are_trimmed_and_coerced() {
        let input = rows(json!([
            { " employee_id ": " E001 ", "Employee_Name": " Zhang San ", "month": 202401, "salary_amount": "8,000.50" },
            { "employee_id": 2, "employee_name": "Li Si", "month": "202402", "salary_amount": 9000 }
        ]));

        let records = salary_records(&input).unwrap();
        assert_eq!(
            records[0],
            SalaryRecord {
                employee_id: "E001".into(),
                employee_name: "Zhang San".into(),
                month: "202401".into(),
                salary_amount: 8000.5,
            }
        );
        assert_eq!(records[1].employee_id, "2");
        assert_eq!(records[1].salary_amount, 9000.0);
    }

    #[test]
    fn salary_month_must_be_calendar_month() {
        let input = rows(json!([
            { "employee_id": "E1", "employee_name": "A", "month": "202401", "salary_amount": 1 },
            { "employee_id": "E1", "employee_name": "A", "month": "202413", "salary_amount": 1 }
        ]));

        match salary_records(&input).unwrap_err() {
            AppError::MalformedInput { row, reason } => {
                assert_eq!(row, 2);
                assert!(reason.contains("202413"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn negative_salary_is_rejected() {
        let input = rows(json!([
            { "employee_id": "E1", "employee_name": "A", "month": "202401", "salary_amount": -5 }
        ]));
        let err = salary_records(&input).unwrap_err();
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn missing_column_is_reported() {
        let input = rows(json!([
            { "employee_id": "E1", "month": "202401", "salary_amount": 10 }
        ]));
        let err = salary_records(&input).unwrap_err();
        assert_eq!(err.to_string(), "row 1: missing column `employee_name`");
    }

    #[test]
    fn empty_sheet_is_rejected_without_row_number() {
        for err in [salary_records(&[]).unwrap_err(), city_standards(&[]).unwrap_err()] {
            assert!(matches!(err, AppError::InvalidBody(_)));
            assert_eq!(err.to_string(), "invalid request body: uploaded sheet is empty");
        }
    }

    #[test]
    fn city_name_accepts_known_misspellings() {
        let input = rows(json!([
            { "city_namte ": "Foshan", "year": 2024, "base_min": 4546, "base_max": 26421, "rate": 0.14 },
            { "City Name": "Guangzhou", "year": "2024", "base_min": "5284", "base_max": "26421", "rate": "0.14" }
        ]));

        let standards = city_standards(&input).unwrap();
        assert_eq!(standards[0].city_name, "Foshan");
        assert_eq!(standards[0].year, "2024");
        assert_eq!(standards[1].city_name, "Guangzhou");
        assert_eq!(standards[1].base_min, 5284.0);
    }

    #[test]
    fn city_without_name_column_is_rejected() {
        let input = rows(json!([
            { "town": "Foshan", "year": 2024, "base_min": 4546, "base_max": 26421, "rate": 0.14 }
        ]));
        let err = city_standards(&input).unwrap_err();
        assert!(err.to_string().contains("no city name column"));
    }

    #[test]
    fn invalid_bracket_is_malformed_input() {
        let input = rows(json!([
            { "city_name": "Foshan", "year": 2024, "base_min": 30000, "base_max": 26421, "rate": 0.14 }
        ]));
        let err = city_standards(&input).unwrap_err();
        assert!(matches!(err, AppError::MalformedInput { row: 1, .. }));
    }

    #[test]
    fn duplicate_city_year_is_rejected() {
        let input = rows(json!([
            { "city_name": "Foshan", "year": 2024, "base_min": 4546, "base_max": 26421, "rate": 0.14 },
            { "city_name": "Foshan", "year": 2024, "base_min": 4600, "base_max": 26421, "rate": 0.14 }
        ]));
        let err = city_standards(&input).unwrap_err();
        assert!(matches!(err, AppError::MalformedInput { row: 2, .. }));
    }
}
