//! Validation helpers for account fields

use regex::Regex;
use validator::ValidationError;

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum username length
pub const MAX_USERNAME_LENGTH: usize = 150;

lazy_static::lazy_static! {
    /// Letters, digits and `@ . + - _`
    pub static ref USERNAME_REGEX: Regex =
        Regex::new(r"^[\w.@+-]+$").unwrap();
}

/// Validate a username for `validator` derives
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() || username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::new("username_length")
            .with_message("Username must be between 1 and 150 characters.".into()));
    }
    if !USERNAME_REGEX.is_match(username) {
        return Err(ValidationError::new("username_format").with_message(
            "Username may contain only letters, digits and @/./+/-/_ characters.".into(),
        ));
    }
    Ok(())
}

/// Collect every password policy violation.
///
/// Empty result means the password is acceptable.
pub fn password_problems(password: &str, username: &str) -> Vec<&'static str> {
    let mut problems = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        problems.push("This password is too short. It must contain at least 8 characters.");
    }
    if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
        problems.push("This password is entirely numeric.");
    }
    if !username.is_empty() && password.eq_ignore_ascii_case(username) {
        problems.push("The password is too similar to the username.");
    }

    problems
}
