use fiszki_core::domain::Password;

use super::AuthError;
use crate::config::PasswordScheme;

/// Stores and checks passwords according to the configured scheme.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    scheme: PasswordScheme,
    cost: u32,
}

impl PasswordHasher {
    pub fn new(scheme: PasswordScheme) -> Self {
        Self::with_cost(scheme, bcrypt::DEFAULT_COST)
    }

    /// Lower costs are only meant for tests.
    pub fn with_cost(scheme: PasswordScheme, cost: u32) -> Self {
        Self { scheme, cost }
    }

    /// Returns the value to persist for `password`.
    pub async fn hash(&self, password: &Password) -> Result<String, AuthError> {
        match self.scheme {
            PasswordScheme::Plain => Ok(password.as_str().to_string()),
            PasswordScheme::Bcrypt => {
                let plain = password.as_str().to_string();
                let cost = self.cost;
                tokio::task::spawn_blocking(move || bcrypt::hash(plain, cost))
                    .await
                    .map_err(|e| AuthError::Hashing(e.to_string()))?
                    .map_err(AuthError::from)
            }
        }
    }

    /// bcrypt-looking stored values are always checked with bcrypt. Anything
    /// else is compared verbatim, and only under the plain scheme.
    pub async fn verify(&self, candidate: &str, stored: &str) -> Result<bool, AuthError> {
        if is_bcrypt_hash(stored) {
            let candidate = candidate.to_string();
            let stored = stored.to_string();
            return tokio::task::spawn_blocking(move || bcrypt::verify(candidate, &stored))
                .await
                .map_err(|e| AuthError::Hashing(e.to_string()))?
                .map_err(AuthError::from);
        }

        Ok(self.scheme == PasswordScheme::Plain && candidate == stored)
    }
}

fn is_bcrypt_hash(value: &str) -> bool {
    ["$2a$", "$2b$", "$2x$", "$2y$"]
        .iter()
        .any(|prefix| value.starts_with(prefix))
}
