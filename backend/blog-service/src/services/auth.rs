/// Auth service - registration and login checks
use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::models::{LoginForm, RegisterForm, User};
use crate::security::password;
use sqlx::SqlitePool;

#[derive(Debug)]
pub enum RegisterOutcome {
    Registered(User),
    PasswordMismatch,
    EmailTaken,
}

#[derive(Debug)]
pub enum LoginOutcome {
    LoggedIn(User),
    UnknownEmail,
    WrongPassword,
}

pub struct AuthService {
    pool: SqlitePool,
}

impl AuthService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a new account from an already validated, normalized form
    pub async fn register(&self, form: &RegisterForm) -> Result<RegisterOutcome> {
        if !form.passwords_match() {
            return Ok(RegisterOutcome::PasswordMismatch);
        }

        if user_repo::email_exists(&self.pool, &form.email).await? {
            return Ok(RegisterOutcome::EmailTaken);
        }

        let password_hash = password::hash_password(&form.password)?;

        // a concurrent registration can still win the race to the unique index
        match user_repo::create_user(&self.pool, &form.email, &form.name, &password_hash).await {
            Ok(user) => {
                tracing::info!(user_id = user.id, "User registered");
                Ok(RegisterOutcome::Registered(user))
            }
            Err(AppError::Conflict(_)) => Ok(RegisterOutcome::EmailTaken),
            Err(e) => Err(e),
        }
    }

    /// Check credentials from an already validated, normalized form
    pub async fn login(&self, form: &LoginForm) -> Result<LoginOutcome> {
        let Some(user) = user_repo::find_by_email(&self.pool, &form.email).await? else {
            tracing::info!("Login attempt for unknown email");
            return Ok(LoginOutcome::UnknownEmail);
        };

        if !password::verify_password(&form.password, &user.password)? {
            tracing::info!(user_id = user.id, "Login attempt with wrong password");
            return Ok(LoginOutcome::WrongPassword);
        }

        tracing::info!(user_id = user.id, "User logged in");
        Ok(LoginOutcome::LoggedIn(user))
    }
}
