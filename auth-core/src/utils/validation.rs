use uuid::Uuid;
use validator::ValidationErrors;

/// Render the first failing field, in `field_order`, as a human-readable reason.
///
/// `ValidationErrors` is map-backed, so the order of checks is fixed here
/// rather than by struct declaration.
pub fn first_error_message(errors: &ValidationErrors, field_order: &[&str]) -> String {
    let field_errors = errors.field_errors();

    for field in field_order {
        if let Some(error) = field_errors.get(*field).and_then(|errs| errs.first()) {
            return match &error.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            };
        }
    }

    errors.to_string()
}

/// Whether `value` is a hyphenated or simple UUID string.
pub fn is_valid_uuid(value: &str) -> bool {
    Uuid::parse_str(value).is_ok()
}
