use std::net::SocketAddr;

use anyhow::{Context, bail};
use chrono::Duration;
type Result<T> = anyhow::Result<T>;

const DEV_SECRET_KEY: &str = "dev-secret";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub auth: AuthConfig,
    pub cors_origins: Vec<String>,
    pub default_admin: Option<DefaultAdmin>,
}

#[derive(Clone)]
pub struct AuthConfig {
    pub secret_key: String,
    pub token_lifetime: Duration,
    pub reset_code: String,
    pub password_scheme: PasswordScheme,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret_key", &"***")
            .field("token_lifetime", &self.token_lifetime)
            .field("reset_code", &"***")
            .field("password_scheme", &self.password_scheme)
            .finish()
    }
}

impl AuthConfig {
    pub fn uses_dev_secret(&self) -> bool {
        self.secret_key == DEV_SECRET_KEY
    }
}

/// How new passwords are stored and which stored forms are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordScheme {
    Bcrypt,
    Plain,
}

impl std::str::FromStr for PasswordScheme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bcrypt" => Ok(PasswordScheme::Bcrypt),
            "plain" | "plaintext" => Ok(PasswordScheme::Plain),
            other => bail!("unknown password scheme '{other}', expected 'bcrypt' or 'plain'"),
        }
    }
}

#[derive(Clone)]
pub struct DefaultAdmin {
    pub login: String,
    pub password: String,
}

impl std::fmt::Debug for DefaultAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultAdmin")
            .field("login", &self.login)
            .finish_non_exhaustive()
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Unset and empty values
    /// fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = get("DATABASE_URL").context("DATABASE_URL is not set")?;

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(default_bind_addr)
            .parse()
            .context("failed to parse BIND_ADDR")?;

        let token_minutes: i64 = match get("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("invalid ACCESS_TOKEN_EXPIRE_MINUTES: {raw}"))?,
            None => default_token_minutes(),
        };
        if token_minutes <= 0 {
            bail!("ACCESS_TOKEN_EXPIRE_MINUTES must be positive, got {token_minutes}");
        }

        let password_scheme = match get("PASSWORD_SCHEME") {
            Some(raw) => raw.parse().context("invalid PASSWORD_SCHEME")?,
            None => PasswordScheme::Bcrypt,
        };

        let cors_origins = get("CORS_ORIGINS")
            .unwrap_or_else(default_cors_origins)
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let default_admin = match (get("DEFAULT_ADMIN_LOGIN"), get("DEFAULT_ADMIN_PASSWORD")) {
            (Some(login), Some(password)) => Some(DefaultAdmin { login, password }),
            (None, None) => None,
            _ => bail!("DEFAULT_ADMIN_LOGIN and DEFAULT_ADMIN_PASSWORD must be set together"),
        };

        Ok(Self {
            database_url,
            bind_addr,
            auth: AuthConfig {
                secret_key: get("SECRET_KEY").unwrap_or_else(|| DEV_SECRET_KEY.to_string()),
                token_lifetime: Duration::minutes(token_minutes),
                reset_code: get("RESET_CODE").unwrap_or_else(default_reset_code),
                password_scheme,
            },
            cors_origins,
            default_admin,
        })
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_token_minutes() -> i64 {
    60
}

fn default_cors_origins() -> String {
    "http://localhost:8002".to_string()
}

fn default_reset_code() -> String {
    "1111".to_string()
}
