//! Input validation helpers
//!
//! Centralized text length constants and validation functions for the
//! checkout boundary. Field caps follow the order schema; SQLite TEXT has no
//! built-in length enforcement.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Customer name
pub const MAX_NAME_LEN: usize = 100;

/// Email addresses
pub const MAX_EMAIL_LEN: usize = 100;

/// Phone numbers
pub const MAX_PHONE_LEN: usize = 20;

/// Shipping addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Free-text order comment
pub const MAX_COMMENT_LEN: usize = 1000;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional/free string is within the length limit.
pub fn validate_text_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Minimal email format check: one `@`, non-empty local part, dotted domain.
pub fn validate_email(value: &str, field: &str) -> Result<(), AppError> {
    validate_required_text(value, field, MAX_EMAIL_LEN)?;
    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.ends_with('.') {
        return Err(AppError::validation(format!(
            "{field} is not a valid email address"
        )));
    }
    Ok(())
}

/// Phone format check: optional leading `+`, separators stripped, 5-15 digits.
pub fn validate_phone(value: &str, field: &str) -> Result<(), AppError> {
    validate_required_text(value, field, MAX_PHONE_LEN)?;
    let trimmed = value.trim();
    let digits: String = trimmed
        .strip_prefix('+')
        .unwrap_or(trimmed)
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::validation(format!(
            "{field} is not a valid phone number"
        )));
    }
    if !(5..=15).contains(&digits.len()) {
        return Err(AppError::validation(format!(
            "{field} is not a valid phone number"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_blank_and_oversized() {
        assert!(validate_required_text("  ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(101), "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("Alice", "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn email_format() {
        assert!(validate_email("alice@example.com", "email").is_ok());
        assert!(validate_email("alice", "email").is_err());
        assert!(validate_email("@example.com", "email").is_err());
        assert!(validate_email("alice@com", "email").is_err());
        assert!(validate_email("alice@example.", "email").is_err());
    }

    #[test]
    fn phone_format() {
        assert!(validate_phone("+7 (912) 345-67-89", "phone").is_ok());
        assert!(validate_phone("89123456789", "phone").is_ok());
        assert!(validate_phone("12ab34", "phone").is_err());
        assert!(validate_phone("123", "phone").is_err());
    }
}
