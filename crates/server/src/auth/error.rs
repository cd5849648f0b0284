use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token subject no longer exists")]
    UnknownSubject,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("password hashing failed: {0}")]
    Hashing(String),
}

impl AuthError {
    /// Whether the failure is the caller's fault (401) rather than ours (500).
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            AuthError::MissingToken
                | AuthError::InvalidToken(_)
                | AuthError::UnknownSubject
                | AuthError::InvalidCredentials
        )
    }
}

impl From<bcrypt::BcryptError> for AuthError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AuthError::Hashing(err.to_string())
    }
}
