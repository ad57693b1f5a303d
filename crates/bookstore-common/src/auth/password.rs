//! Password hashing and verification
//!
//! Argon2id with a random salt per hash.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AppError;

const MIN_PASSWORD_LENGTH: usize = 8;

/// Character classes every password must contain
const REQUIRED_CLASSES: [(&str, fn(char) -> bool); 3] = [
    ("an uppercase letter", char::is_uppercase),
    ("a lowercase letter", char::is_lowercase),
    ("a digit", |c| c.is_ascii_digit()),
];

/// Hash a password using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verify a password against a stored hash
///
/// # Errors
/// Returns an error if the stored hash cannot be parsed
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Check the registration password policy: at least 8 characters with an
/// uppercase letter, a lowercase letter, and a digit
///
/// # Errors
/// Returns a validation error naming the first rule that fails
pub fn validate_password_strength(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }

    for (label, matches) in REQUIRED_CLASSES {
        if !password.chars().any(matches) {
            return Err(AppError::Validation(format!(
                "Password must contain {label}"
            )));
        }
    }

    Ok(())
}

/// Password service for dependency injection
#[derive(Debug, Clone, Default)]
pub struct PasswordService;

impl PasswordService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Enforce the policy, then hash
    ///
    /// # Errors
    /// Returns a validation error for a weak password or an internal error if hashing fails
    pub fn hash_new(&self, password: &str) -> Result<String, AppError> {
        validate_password_strength(password)?;
        hash_password(password)
    }

    /// Verify a login attempt
    ///
    /// # Errors
    /// Returns `AppError::InvalidCredentials` if the password doesn't match
    pub fn verify_or_error(&self, password: &str, hash: &str) -> Result<(), AppError> {
        if verify_password(password, hash)? {
            Ok(())
        } else {
            Err(AppError::InvalidCredentials)
        }
    }
}
