//! Input rules shared by registration, login and checkout.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AppError, AppResult};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?\d{10,15}$").expect("phone pattern is valid")
});

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 100;
pub const PASSWORD_MIN_LEN: usize = 8;

pub fn validate_name(field: &str, value: &str) -> AppResult<()> {
    let len = value.trim().chars().count();
    if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
        return Err(AppError::bad_request(format!(
            "{field} must be between {NAME_MIN_LEN} and {NAME_MAX_LEN} characters."
        )));
    }
    Ok(())
}

/// Emails are stored and compared in this form.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_email(email: &str, allowed_domain: &str) -> AppResult<()> {
    if !EMAIL_RE.is_match(email) {
        return Err(AppError::bad_request("Invalid email format."));
    }
    let suffix = format!("@{}", allowed_domain.to_lowercase());
    if !email.to_lowercase().ends_with(&suffix) {
        return Err(AppError::bad_request(format!(
            "Email must end with @{allowed_domain}."
        )));
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> AppResult<()> {
    if !PHONE_RE.is_match(phone) {
        return Err(AppError::bad_request(
            "Phone number must be 10 to 15 digits, optionally prefixed with '+'.",
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str, confirm_password: &str) -> AppResult<()> {
    // No lookaheads in `regex`, so the classes are checked one by one.
    let strong = password.chars().count() >= PASSWORD_MIN_LEN
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit());
    if !strong {
        return Err(AppError::bad_request(
            "Password must be at least 8 characters and contain an uppercase letter, a lowercase letter and a digit.",
        ));
    }
    if password != confirm_password {
        return Err(AppError::bad_request("Passwords do not match."));
    }
    Ok(())
}

pub fn require_non_blank(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::bad_request(format!("{field} is required.")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_email_lowercases_and_trims() {
        assert_eq!(normalize_email("  Jane.Doe@Marketplace.COM "), "jane.doe@marketplace.com");
    }

    #[test]
    fn email_must_use_allowed_domain() {
        assert!(validate_email("user@other.com", "marketplace.com").is_err());
        assert!(validate_email("user@marketplace.com", "marketplace.com").is_ok());
        assert!(validate_email("User@Marketplace.com", "marketplace.com").is_ok());
        assert!(validate_email("not an email", "marketplace.com").is_err());
    }

    #[test]
    fn phone_format() {
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("+201234567890").is_ok());
        assert!(validate_phone("01234567890").is_ok());
        assert!(validate_phone("+2012345678901234").is_err());
        assert!(validate_phone("0123-456-789").is_err());
    }

    #[test]
    fn password_strength_and_confirmation() {
        assert!(validate_password("Passw0rd", "Passw0rd").is_ok());
        assert!(validate_password("password1", "password1").is_err());
        assert!(validate_password("PASSWORD1", "PASSWORD1").is_err());
        assert!(validate_password("Password", "Password").is_err());
        assert!(validate_password("Pa0", "Pa0").is_err());
        assert!(validate_password("Passw0rd", "Passw0rd!").is_err());
    }

    #[test]
    fn name_length_bounds() {
        assert!(validate_name("Full name", "Al").is_err());
        assert!(validate_name("Full name", "Ali").is_ok());
        assert!(validate_name("Full name", &"a".repeat(100)).is_ok());
        assert!(validate_name("Full name", &"a".repeat(101)).is_err());
    }
}
