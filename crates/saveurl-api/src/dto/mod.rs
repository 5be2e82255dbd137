//! Data transfer objects for API requests and responses.

pub mod request;
pub mod response;

use validator::Validate;

use saveurl_core::error::AppError;

/// Run `validator` rules on a request body, reporting the first failing
/// field's message.
pub fn validate_body<T: Validate>(body: &T) -> Result<(), AppError> {
    body.validate().map_err(|errors| {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        let message = fields
            .first()
            .and_then(|(_, errs)| errs.first())
            .and_then(|e| e.message.as_ref())
            .map(|m| m.to_string())
            .unwrap_or_else(|| "Invalid request".to_string());
        AppError::validation(message)
    })
}
