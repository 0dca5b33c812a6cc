use std::env;

pub const DEFAULT_MAIL_ENDPOINT: &str = "https://api.resend.com/emails";

#[derive(Clone, Debug)]
pub struct EnvConfig {
    pub port: u16,
    pub db_url: String,
    pub secret_key: String,
    /// Public hostname used for absolute links. Registration cannot finish without it.
    pub public_hostname: Option<String>,
    /// Admin notification address; the approval mail is skipped when unset.
    pub admin_email: Option<String>,
    pub mail: MailConfig,
}

#[derive(Clone, Debug)]
pub struct MailConfig {
    pub api_key: String,
    pub endpoint: String,
    pub from: String,
}

impl EnvConfig {
    fn get_env(key: &str) -> String {
        env::var(key).unwrap_or_else(|_| panic!("Environment variable {} not set", key))
    }

    fn get_env_opt(key: &str) -> Option<String> {
        env::var(key)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let db_url: String = Self::get_env("DATABASE_URL");
        let resend_key: String = Self::get_env("RESEND_KEY");

        EnvConfig {
            port: Self::get_env_opt("PORT").and_then(|p| p.parse().ok()).unwrap_or(8080),
            db_url,
            secret_key: Self::get_env("SECRET_KEY"),
            public_hostname: Self::get_env_opt("HOSTNAME"),
            admin_email: Self::get_env_opt("ADMIN_EMAIL"),
            mail: MailConfig {
                api_key: resend_key,
                endpoint: Self::get_env_opt("MAIL_ENDPOINT")
                    .unwrap_or_else(|| DEFAULT_MAIL_ENDPOINT.to_string()),
                from: Self::get_env_opt("MAIL_FROM")
                    .unwrap_or_else(|| "noreply@localhost".to_string()),
            },
        }
    }
}
