use entity::user::Model as UserModel;
use tracing::info;

use super::{AccountFlow, FlowError, GateOutcome};
use crate::types::error::AppError;
use crate::utils::signer::CONFIRMATION_MAX_AGE;

impl AccountFlow {
    pub async fn confirm_email(&self, token: &str) -> Result<GateOutcome, FlowError> {
        let user = self.resolve_link(token).await?;
        if user.email_confirmed {
            return Ok(GateOutcome::AlreadyOpen);
        }
        if self.db.mark_email_confirmed(user.id).await? {
            info!("user {} confirmed their email", user.id);
            Ok(GateOutcome::Opened)
        } else {
            Ok(GateOutcome::AlreadyOpen)
        }
    }

    // Any holder of a valid link can approve; the registrant's own link works too.
    pub async fn approve_account(&self, token: &str) -> Result<GateOutcome, FlowError> {
        let user = self.resolve_link(token).await?;
        if user.admin_approved {
            return Ok(GateOutcome::AlreadyOpen);
        }
        if self.db.mark_admin_approved(user.id).await? {
            info!("user {} approved", user.id);
            Ok(GateOutcome::Opened)
        } else {
            Ok(GateOutcome::AlreadyOpen)
        }
    }

    async fn resolve_link(&self, token: &str) -> Result<UserModel, FlowError> {
        let claims = self
            .signer
            .verify(token, CONFIRMATION_MAX_AGE)
            .ok_or(FlowError::InvalidToken)?;

        let user = match self.db.get_user_by_id(claims.user_id).await {
            Ok(user) => user,
            Err(AppError::NotFound) => return Err(FlowError::UserNotFound),
            Err(e) => return Err(e.into()),
        };

        if user.email != claims.email {
            return Err(FlowError::EmailMismatch);
        }
        Ok(user)
    }
}
