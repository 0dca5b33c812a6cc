use tracing::{info, warn};

use super::{AccountFlow, FlowError, LoginSession};
use crate::utils::token::{verify_against_dummy, verify_password};

impl AccountFlow {
    /// Checks credentials, then the email gate, then the approval gate.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginSession, FlowError> {
        let Some(user) = self.db.find_user_by_username(username).await? else {
            // unknown usernames must cost as much as a wrong password
            verify_against_dummy(password);
            return Err(FlowError::InvalidCredentials);
        };

        let matches = verify_password(password, &user.password_hash).unwrap_or_else(|e| {
            warn!("unusable password hash for user {}: {e}", user.id);
            false
        });
        if !matches {
            return Err(FlowError::InvalidCredentials);
        }

        if !user.email_confirmed {
            return Err(FlowError::EmailNotConfirmed);
        }
        if !user.admin_approved {
            return Err(FlowError::PendingApproval);
        }

        let token = self.db.create_session(user.id).await?;
        info!("user {} logged in", user.id);
        Ok(LoginSession { user, token })
    }

    /// Returns whether a live session was torn down.
    pub async fn logout(&self, token: &str) -> Result<bool, FlowError> {
        Ok(self.db.delete_session(token).await?)
    }
}
