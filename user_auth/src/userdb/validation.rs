//! Field rules for user records. Each check returns human-readable messages
//! that pages show in their error list.

use regex::Regex;
use std::sync::LazyLock;

pub const NAME_MAX_LEN: usize = 50;
pub const EMAIL_MAX_LEN: usize = 255;
pub const PASSWORD_MIN_LEN: usize = 6;

static VALID_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[\w+\-.]+@[a-z\d\-]+(\.[a-z\d\-]+)*\.[a-z]+$")
        .expect("email pattern is a valid regex")
});

/// Canonical form used for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_name(name: &str) -> Vec<String> {
    let name = name.trim();
    let mut errors = Vec::new();
    if name.is_empty() {
        errors.push("Name can't be blank".to_string());
    } else if name.chars().count() > NAME_MAX_LEN {
        errors.push(format!(
            "Name is too long (maximum is {NAME_MAX_LEN} characters)"
        ));
    }
    errors
}

pub fn validate_email(email: &str) -> Vec<String> {
    let email = email.trim();
    let mut errors = Vec::new();
    if email.is_empty() {
        errors.push("Email can't be blank".to_string());
        return errors;
    }
    if email.chars().count() > EMAIL_MAX_LEN {
        errors.push(format!(
            "Email is too long (maximum is {EMAIL_MAX_LEN} characters)"
        ));
    }
    // "foo@bar..com" passes the pattern's character classes
    if !VALID_EMAIL.is_match(email) || email.contains("..") {
        errors.push("Email is invalid".to_string());
    }
    errors
}

pub fn validate_password(password: &str, confirmation: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if password.trim().is_empty() {
        errors.push("Password can't be blank".to_string());
    } else if password.chars().count() < PASSWORD_MIN_LEN {
        errors.push(format!(
            "Password is too short (minimum is {PASSWORD_MIN_LEN} characters)"
        ));
    }
    if password != confirmation {
        errors.push("Password confirmation doesn't match Password".to_string());
    }
    errors
}
