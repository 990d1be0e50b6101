//! Common validation rules shared across request payloads.

use validator::ValidationError;

/// Validates an organization or person name.
///
/// Requirements:
/// - Non-empty after trimming
/// - At most 100 characters
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.len() > 100 {
        return Err(ValidationError::new("name_invalid_length"));
    }
    Ok(())
}

/// Validates a phone number.
///
/// Requirements:
/// - 6-20 characters
/// - Digits, spaces, and the characters `+ - / ( )`
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if !(6..=20).contains(&phone.len()) {
        return Err(ValidationError::new("phone_invalid_length"));
    }

    let allowed = |c: char| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '/' | '(' | ')');
    if !phone.chars().all(allowed) {
        return Err(ValidationError::new("phone_invalid_characters"));
    }

    Ok(())
}
