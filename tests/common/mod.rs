#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::dev::ServiceResponse;
use actix_web::http::header::LOCATION;
use async_trait::async_trait;
use localghost_auth::{
    config::{EnvConfig, MailConfig},
    db::database_service::DatabaseService,
    flow::AccountFlow,
    types::{error::AppError, mail::SendEmail, notice::Notice, user::DBUserCreate},
    utils::{mail::Mailer, token::hash_password, webutils::{NOTICE_COOKIE, SESSION_COOKIE}},
};

pub mod client;

pub const TEST_HOST: &str = "localghost.test";
pub const TEST_ADMIN: &str = "admin@localghost.test";

/// Captures outgoing mail instead of talking to a transport.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SendEmail>>,
    fail: AtomicBool,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<SendEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn fail_next_sends(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: SendEmail) -> Result<(), AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Mail("connection refused".into()));
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

pub struct TestContext {
    pub db: Arc<DatabaseService>,
    pub mailer: Arc<RecordingMailer>,
    pub config: EnvConfig,
    pub flow: AccountFlow,
}

impl TestContext {
    pub async fn new() -> TestContext {
        Self::with_config(get_test_config()).await
    }

    pub async fn with_config(config: EnvConfig) -> TestContext {
        let db = Arc::new(
            DatabaseService::new("sqlite::memory:")
                .await
                .expect("Failed to initialize DatabaseService")
        );
        let mailer = Arc::new(RecordingMailer::default());
        let transport: Arc<dyn Mailer> = mailer.clone();
        let flow = AccountFlow::from_config(Arc::clone(&db), transport, &config);

        TestContext { db, mailer, config, flow }
    }

    /// Account with both gates open, created without going through mail.
    pub async fn create_usable_user(&self, username: &str, password: &str) -> i32 {
        let id = self.db.create_user(DBUserCreate {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            password_hash: hash_password(password).expect("Failed to hash password"),
        }).await.expect("Failed to create user");
        self.db.mark_email_confirmed(id).await.unwrap();
        self.db.mark_admin_approved(id).await.unwrap();
        id
    }
}

pub fn get_test_config() -> EnvConfig {
    EnvConfig {
        port: 8080,
        db_url: "sqlite::memory:".to_string(),
        secret_key: "test-secret-key".to_string(),
        public_hostname: Some(TEST_HOST.to_string()),
        admin_email: Some(TEST_ADMIN.to_string()),
        mail: MailConfig {
            api_key: "test".to_string(),
            endpoint: "http://127.0.0.1:9/unused".to_string(),
            from: "noreply@localghost.test".to_string(),
        },
    }
}

/// Token segment of a `https://host/<route>/<token>` link inside a mail body.
pub fn token_from_mail(body: &str, route: &str) -> String {
    let marker = format!("https://{TEST_HOST}/{route}/");
    let start = body.find(&marker).expect("link not found in mail") + marker.len();
    body[start..]
        .split(|c: char| c.is_whitespace() || c == '"' || c == '<')
        .next()
        .unwrap()
        .to_string()
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(LOCATION)
        .expect("no Location header")
        .to_str()
        .unwrap()
        .to_string()
}

pub fn notice_of<B>(resp: &ServiceResponse<B>) -> Option<Notice> {
    resp.response()
        .cookies()
        .find(|c| c.name() == NOTICE_COOKIE)
        .and_then(|c| Notice::from_cookie_value(c.value()))
}

pub fn session_of<B>(resp: &ServiceResponse<B>) -> Option<String> {
    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.value().to_string())
}

// Test data helpers
pub mod test_data {
    use localghost_auth::types::user::{RLogin, RRegister};

    pub fn sample_registration() -> RRegister {
        RRegister {
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "correct horse battery staple".to_string(),
        }
    }

    pub fn login_form(username: &str, password: &str) -> RLogin {
        RLogin {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}
