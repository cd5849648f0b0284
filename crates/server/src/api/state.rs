//! Shared application state.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::auth::{PasswordHasher, TokenService};
use crate::config::AuthConfig;
use crate::repository::{
    AdminRepository, AnswerRepository, LevelRepository, QuestionRepository, SeaOrmAdminRepository,
    SeaOrmAnswerRepository, SeaOrmLevelRepository, SeaOrmQuestionRepository, SeaOrmUserRepository,
    UserRepository,
};

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub levels: Arc<dyn LevelRepository>,
    pub questions: Arc<dyn QuestionRepository>,
    pub answers: Arc<dyn AnswerRepository>,
    pub users: Arc<dyn UserRepository>,
    pub admins: Arc<dyn AdminRepository>,
    pub tokens: TokenService,
    pub passwords: PasswordHasher,
    /// Shared code that authorizes a password reset for any user.
    pub reset_code: String,
}

impl AppState {
    /// Wires the sea-orm repositories over one connection pool.
    pub fn new(db: DatabaseConnection, auth: &AuthConfig) -> Self {
        Self::with_password_hasher(db, auth, PasswordHasher::new(auth.password_scheme))
    }

    pub fn with_password_hasher(
        db: DatabaseConnection,
        auth: &AuthConfig,
        passwords: PasswordHasher,
    ) -> Self {
        Self {
            levels: Arc::new(SeaOrmLevelRepository::new(db.clone())),
            questions: Arc::new(SeaOrmQuestionRepository::new(db.clone())),
            answers: Arc::new(SeaOrmAnswerRepository::new(db.clone())),
            users: Arc::new(SeaOrmUserRepository::new(db.clone())),
            admins: Arc::new(SeaOrmAdminRepository::new(db)),
            tokens: TokenService::new(&auth.secret_key, auth.token_lifetime),
            passwords,
            reset_code: auth.reset_code.clone(),
        }
    }
}
