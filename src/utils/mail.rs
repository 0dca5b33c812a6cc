use crate::config::MailConfig;
use crate::types::{error::AppError, mail::SendEmail};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Outbound mail transport.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: SendEmail) -> Result<(), AppError>;
}

/// Delivers through the Resend HTTP API.
pub struct ResendMailer {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl ResendMailer {
    pub fn new(config: &MailConfig) -> Result<Self, AppError> {
        let client: Client = ClientBuilder::new()
            .user_agent("localghost/1.0 (+reqwest)")
            .tcp_nodelay(true)
            .pool_idle_timeout(Duration::from_secs(30))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::Mail(format!("build client failed: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: SendEmail) -> Result<(), AppError> {
        debug!("[mail] -> POST {} to {:?} subject {:?}", self.endpoint, email.to, email.subject);

        let t0 = Instant::now();
        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key) // do NOT log the key
            .json(&email)
            .send()
            .await
            .map_err(|e| AppError::Mail(format!("send failed: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| AppError::Mail(format!("read body failed: {e}")))?;
        debug!("[mail] <- status: {status} in {} ms", t0.elapsed().as_millis());

        if status.is_success() {
            info!("mail {:?} delivered to {} recipient(s)", email.subject, email.to.len());
            Ok(())
        } else {
            Err(AppError::Mail(format!("Resend API error: HTTP {status}: {body}")))
        }
    }
}

/// Sends one message with plaintext and HTML alternatives to every recipient.
pub async fn send_email(
    mailer: &dyn Mailer,
    from: &str,
    subject: &str,
    recipients: Vec<String>,
    text: String,
    html: String,
) -> Result<(), AppError> {
    mailer
        .send(SendEmail {
            from: from.to_string(),
            to: recipients,
            subject: subject.to_string(),
            text: Some(text),
            html: Some(html),
            ..Default::default()
        })
        .await
}
