//! Query-string helpers.

use std::collections::HashMap;
use std::str::FromStr;

use saveurl_core::error::AppError;

/// Parse a required query parameter, failing with `missing` when it is
/// absent or blank.
pub fn required_param<T: FromStr>(
    params: &HashMap<String, String>,
    key: &str,
    missing: &str,
) -> Result<T, AppError> {
    let raw = params
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::validation(missing))?;

    raw.parse::<T>()
        .map_err(|_| AppError::validation(format!("Invalid {key}")))
}
