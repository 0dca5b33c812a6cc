//! Account lifecycle: registration, the two gates, and session login.
//!
//! An account starts with both gates closed. `confirm_email` and
//! `approve_account` each open one gate, in either order, exactly once.
//! Login succeeds only when both are open; the email gate is checked first.

use std::sync::Arc;

use entity::user::Model as UserModel;
use thiserror::Error;

use crate::config::EnvConfig;
use crate::db::database_service::DatabaseService;
use crate::types::error::AppError;
use crate::utils::mail::Mailer;
use crate::utils::signer::TokenSigner;

mod gates;
mod login;
mod register;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("username must be set")]
    UsernameRequired,
    #[error("username already exists")]
    UsernameTaken,
    #[error("HOSTNAME environment variable not set")]
    MissingHostname,
    #[error("link is invalid or has expired")]
    InvalidToken,
    #[error("user not found")]
    UserNotFound,
    #[error("token email does not match the account")]
    EmailMismatch,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("email address not confirmed")]
    EmailNotConfirmed,
    #[error("account pending admin approval")]
    PendingApproval,
    #[error(transparent)]
    App(#[from] AppError),
}

// Outcomes a route does not turn into a notice surface as server errors.
impl From<FlowError> for AppError {
    fn from(e: FlowError) -> Self {
        match e {
            FlowError::App(inner) => inner,
            other => AppError::Internal(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Opened,
    AlreadyOpen,
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub user_id: i32,
    pub confirm_url: String,
    pub approve_url: String,
}

#[derive(Debug, Clone)]
pub struct LoginSession {
    pub user: UserModel,
    /// Raw session token for the cookie.
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct FlowSettings {
    pub public_hostname: Option<String>,
    pub admin_email: Option<String>,
    pub mail_from: String,
}

impl FlowSettings {
    pub fn from_config(config: &EnvConfig) -> Self {
        Self {
            public_hostname: config.public_hostname.clone(),
            admin_email: config.admin_email.clone(),
            mail_from: config.mail.from.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AccountFlow {
    db: Arc<DatabaseService>,
    mailer: Arc<dyn Mailer>,
    signer: TokenSigner,
    settings: FlowSettings,
}

impl AccountFlow {
    pub fn new(
        db: Arc<DatabaseService>,
        mailer: Arc<dyn Mailer>,
        signer: TokenSigner,
        settings: FlowSettings,
    ) -> Self {
        Self { db, mailer, signer, settings }
    }

    pub fn from_config(db: Arc<DatabaseService>, mailer: Arc<dyn Mailer>, config: &EnvConfig) -> Self {
        Self::new(
            db,
            mailer,
            TokenSigner::confirmation(&config.secret_key),
            FlowSettings::from_config(config),
        )
    }

    pub fn signer(&self) -> &TokenSigner {
        &self.signer
    }
}
