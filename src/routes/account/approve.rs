use actix_web::{get, web, HttpResponse};

use crate::flow::{AccountFlow, FlowError, GateOutcome};
use crate::types::{error::AppError, notice::Notice};
use crate::utils::webutils::redirect_with;

pub const INVALID_LINK: &str = "The approval link is invalid or has expired.";
pub const USER_NOT_FOUND: &str = "User not found.";
pub const EMAIL_MISMATCH: &str = "Email mismatch.";
pub const ALREADY_APPROVED: &str = "Account already approved.";
pub const APPROVED: &str = "User account approved.";

// Not restricted to admins: the link itself is the credential.
#[get("/approve/{token}")]
pub async fn approve(
    flow: web::Data<AccountFlow>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let token = path.into_inner();

    let notice = match flow.approve_account(&token).await {
        Ok(GateOutcome::Opened) => Notice::success(APPROVED),
        Ok(GateOutcome::AlreadyOpen) => Notice::success(ALREADY_APPROVED),
        Err(FlowError::InvalidToken) => Notice::error(INVALID_LINK),
        Err(FlowError::UserNotFound) => Notice::error(USER_NOT_FOUND),
        Err(FlowError::EmailMismatch) => Notice::error(EMAIL_MISMATCH),
        Err(other) => return Err(other.into()),
    };

    Ok(redirect_with("/login", Some(notice)))
}
