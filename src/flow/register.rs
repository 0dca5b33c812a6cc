use tracing::{debug, error, info};

use super::{AccountFlow, FlowError, Registration};
use crate::types::{error::AppError, token::ConfirmationClaims, user::DBUserCreate};
use crate::utils::mail::send_email;
use crate::utils::token::hash_password;

const SUBJECT_USER: &str = "Please confirm your email";
const SUBJECT_ADMIN: &str = "New user registration approval required";

impl AccountFlow {
    /// Creates the account with both gates closed and mails the confirmation
    /// and approval links.
    ///
    /// Without a public hostname this fails after the account row exists and
    /// before any mail is sent. A transport failure likewise leaves the
    /// account in place.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Registration, FlowError> {
        if username.trim().is_empty() {
            return Err(FlowError::UsernameRequired);
        }
        if self.db.user_exists_by_username(username).await? {
            return Err(FlowError::UsernameTaken);
        }

        let password_hash = hash_password(password)
            .map_err(|e| AppError::Internal(format!("hash password failed: {e}")))?;

        let user_id = match self
            .db
            .create_user(DBUserCreate {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await
        {
            Ok(id) => id,
            Err(AppError::AlreadyExists) => return Err(FlowError::UsernameTaken),
            Err(e) => return Err(e.into()),
        };
        info!("registered user {user_id} ({username})");

        let claims = ConfirmationClaims { user_id, email: email.to_string() };
        let user_token = self.signer.issue(&claims).map_err(token_failure)?;
        let admin_token = self.signer.issue(&claims).map_err(token_failure)?;

        let Some(host) = self.settings.public_hostname.as_deref() else {
            error!("CRITICAL: HOSTNAME environment variable not set for URL generation (user {user_id} cannot be confirmed)");
            return Err(FlowError::MissingHostname);
        };
        let confirm_url = absolute_url(host, "confirm", &user_token);
        let approve_url = absolute_url(host, "approve", &admin_token);

        send_email(
            self.mailer.as_ref(),
            &self.settings.mail_from,
            SUBJECT_USER,
            vec![email.to_string()],
            format!(
                "Welcome, {username}!\n\nPlease confirm your email by clicking the following link:\n{confirm_url}"
            ),
            format!(
                "<p>Welcome, {name}!</p>\n<p>Please confirm your email by clicking on the following link:</p>\n<p><a href=\"{confirm_url}\">{confirm_url}</a></p>\n",
                name = escape_html(username),
            ),
        )
        .await?;

        match self.settings.admin_email.as_deref() {
            Some(admin) => {
                send_email(
                    self.mailer.as_ref(),
                    &self.settings.mail_from,
                    SUBJECT_ADMIN,
                    vec![admin.to_string()],
                    format!(
                        "A new user has registered with the email {email}.\n\nPlease review and approve their account by clicking the following link:\n{approve_url}"
                    ),
                    format!(
                        "<p>Hey, localghost admin!</p>\n<p>A new user has registered with the username {name} and the email {mail}.</p>\n<p>Please review and approve their account by clicking on the following link:</p>\n<p><a href=\"{approve_url}\">{approve_url}</a></p>\n",
                        name = escape_html(username),
                        mail = escape_html(email),
                    ),
                )
                .await?;
            }
            None => debug!("ADMIN_EMAIL not set, skipping approval request for user {user_id}"),
        }

        Ok(Registration { user_id, confirm_url, approve_url })
    }
}

fn token_failure(e: crate::utils::signer::TokenError) -> AppError {
    AppError::Internal(format!("issue confirmation token failed: {e}"))
}

fn absolute_url(host: &str, route: &str, token: &str) -> String {
    format!("https://{host}/{route}/{}", urlencoding::encode(token))
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_are_https_on_the_public_host() {
        assert_eq!(
            absolute_url("example.org", "confirm", "abc.def.ghi"),
            "https://example.org/confirm/abc.def.ghi"
        );
    }

    #[test]
    fn html_is_escaped() {
        assert_eq!(escape_html("<b>\"ada\" & 'bob'</b>"), "&lt;b&gt;&quot;ada&quot; &amp; &#x27;bob&#x27;&lt;/b&gt;");
    }
}
