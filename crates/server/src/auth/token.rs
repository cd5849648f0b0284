use chrono::{DateTime, Duration, Utc};
use fiszki_core::domain::AdminId;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::AuthError;

/// Role claim carried by every administrator token.
pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Administrator id, as a decimal string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies HS256 administrator tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl TokenService {
    pub fn new(secret: &str, lifetime: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact: a token is accepted up to `exp` and not after.
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            lifetime,
        }
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    pub fn issue(&self, admin_id: AdminId) -> Result<String, AuthError> {
        self.issue_at(admin_id, Utc::now())
    }

    pub fn issue_at(&self, admin_id: AdminId, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims {
            sub: Some(admin_id.to_string()),
            role: Some(ADMIN_ROLE.to_string()),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.lifetime).timestamp(),
        };
        self.sign(&claims)
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &self.encoding_key,
        )?)
    }

    /// Verifies signature and expiry, then requires the admin role and a
    /// numeric subject.
    pub fn verify(&self, token: &str) -> Result<AdminId, AuthError> {
        let claims = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        if claims.role.as_deref() != Some(ADMIN_ROLE) {
            return Err(AuthError::InvalidToken("role claim is not admin".to_string()));
        }

        let subject = claims
            .sub
            .ok_or_else(|| AuthError::InvalidToken("missing subject".to_string()))?;
        subject
            .parse::<AdminId>()
            .map_err(|_| AuthError::InvalidToken(format!("malformed subject '{subject}'")))
    }
}
