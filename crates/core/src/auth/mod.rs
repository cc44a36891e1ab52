//! Authentication: password hashing and registration rules.

mod password;

pub use password::{PasswordError, hash_password, verify_password};

use tally_shared::RegisterRequest;
use thiserror::Error;

/// Minimum password length in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Allowed username length in characters.
pub const USERNAME_LEN: std::ops::RangeInclusive<usize> = 3..=50;

/// Reasons a registration is rejected before touching storage.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    /// Username too short or too long.
    #[error("Username must be between 3 and 50 characters")]
    InvalidUsername,

    /// Email is not plausibly an address.
    #[error("Invalid email address")]
    InvalidEmail,

    /// Password shorter than [`MIN_PASSWORD_LEN`].
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
}

/// Validates a registration and returns it with trimmed username and a
/// lowercased, trimmed email.
///
/// # Errors
///
/// Returns the first `RegistrationError` that applies.
pub fn validate_registration(req: RegisterRequest) -> Result<RegisterRequest, RegistrationError> {
    let username = req.username.trim().to_string();
    if !USERNAME_LEN.contains(&username.chars().count()) {
        return Err(RegistrationError::InvalidUsername);
    }

    let email = req.email.trim().to_lowercase();
    let valid_email = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid_email {
        return Err(RegistrationError::InvalidEmail);
    }

    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(RegistrationError::PasswordTooShort);
    }

    Ok(RegisterRequest {
        username,
        email,
        password: req.password,
    })
}
