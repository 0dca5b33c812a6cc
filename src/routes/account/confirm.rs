use actix_web::{get, web, HttpResponse};

use crate::flow::{AccountFlow, FlowError, GateOutcome};
use crate::types::{error::AppError, notice::Notice};
use crate::utils::webutils::redirect_with;

pub const INVALID_LINK: &str = "The confirmation link is invalid or has expired.";
pub const USER_NOT_FOUND: &str = "User not found.";
pub const EMAIL_MISMATCH: &str = "Email does not match.";
pub const ALREADY_CONFIRMED: &str = "Account already confirmed. Please login.";
pub const CONFIRMED: &str = "You have confirmed your email. Your account is now pending admin approval.";

#[get("/confirm/{token}")]
pub async fn confirm(
    flow: web::Data<AccountFlow>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let token = path.into_inner();

    let notice = match flow.confirm_email(&token).await {
        Ok(GateOutcome::Opened) => Notice::success(CONFIRMED),
        Ok(GateOutcome::AlreadyOpen) => Notice::success(ALREADY_CONFIRMED),
        Err(FlowError::InvalidToken) => Notice::error(INVALID_LINK),
        Err(FlowError::UserNotFound) => Notice::error(USER_NOT_FOUND),
        Err(FlowError::EmailMismatch) => Notice::error(EMAIL_MISMATCH),
        Err(other) => return Err(other.into()),
    };

    Ok(redirect_with("/login", Some(notice)))
}
