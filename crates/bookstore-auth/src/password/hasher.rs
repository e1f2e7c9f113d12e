//! bcrypt password hashing and verification.

use bookstore_core::config::auth::AuthConfig;
use bookstore_core::error::AppError;
use tracing::warn;

/// Handles password hashing and verification using bcrypt.
///
/// The work factor is fixed at construction time (cost 12 by default), and
/// bcrypt embeds a random salt in every hash, so hashing the same password
/// twice produces different strings.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    /// bcrypt work factor.
    cost: u32,
}

impl PasswordHasher {
    /// Creates a new password hasher from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            cost: config.bcrypt_cost,
        }
    }

    /// Hashes a plaintext password with a random salt.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
    }

    /// Verifies a plaintext password against a stored bcrypt hash.
    ///
    /// Returns `Ok(false)` for a non-matching password and also for an
    /// unparseable hash, so callers cannot distinguish a wrong password from
    /// a corrupt credential record.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        match bcrypt::verify(password, hash) {
            Ok(matches) => Ok(matches),
            Err(e) => {
                warn!(error = %e, "Password verification failed on stored hash");
                Ok(false)
            }
        }
    }
}
