pub mod price_point;
pub mod product;

use serde::{Deserialize, Deserializer};

use crate::error::AppError;
use crate::money::is_valid_price;

/// Optional field that may be omitted but not sent as `null`.
///
/// Use with `#[serde(default, deserialize_with = "non_null")]`.
pub(crate) fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

pub(crate) fn validate_text(field: &str, value: &str, max_chars: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len == 0 {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if len > max_chars {
        return Err(AppError::validation(format!(
            "{field} must be at most {max_chars} characters"
        )));
    }
    Ok(())
}

pub(crate) fn validate_price(field: &str, value: f64) -> Result<(), AppError> {
    if !is_valid_price(value) {
        return Err(AppError::validation(format!(
            "{field} must be a finite number greater than or equal to 0"
        )));
    }
    Ok(())
}
