pub mod appointments;
pub mod carwashes;
pub mod dashboard;
pub mod health;
pub mod load;
pub mod search;
pub mod washbays;

use chrono::NaiveDate;

use crate::errors::AppError;

/// Browsers send empty strings for unset form fields; treat them as absent.
fn param(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_id(name: &str, raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::Validation(format!("Некорректный параметр {name}: {raw}")))
}

fn parse_date(name: &str, raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Некорректная дата {name}: {raw}")))
}
