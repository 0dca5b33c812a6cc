use actix_web::{post, web, HttpResponse};

use crate::flow::{AccountFlow, FlowError};
use crate::types::{
    error::AppError,
    notice::Notice,
    user::{RLogin, RNext},
};
use crate::utils::webutils::{redirect_with, safe_next, session_cookie};

pub const INVALID_CREDENTIALS: &str = "Invalid username or password.";
pub const CONFIRM_FIRST: &str = "Please confirm your email address before logging in.";
pub const PENDING_APPROVAL: &str = "Your account is pending admin approval.";
pub const LOGGED_IN: &str = "Login successful!";

#[post("/login")]
pub async fn login(
    flow: web::Data<AccountFlow>,
    query: web::Query<RNext>,
    body: web::Form<RLogin>,
) -> Result<HttpResponse, AppError> {
    let session = match flow.login(&body.username, &body.password).await {
        Ok(session) => session,
        Err(FlowError::InvalidCredentials) => {
            return Ok(redirect_with("/login", Some(Notice::error(INVALID_CREDENTIALS))))
        }
        Err(FlowError::EmailNotConfirmed) => {
            return Ok(redirect_with("/login", Some(Notice::warning(CONFIRM_FIRST))))
        }
        Err(FlowError::PendingApproval) => {
            return Ok(redirect_with("/login", Some(Notice::warning(PENDING_APPROVAL))))
        }
        Err(other) => return Err(other.into()),
    };

    let mut res = redirect_with(safe_next(query.next.as_deref()), Some(Notice::success(LOGGED_IN)));
    res.add_cookie(&session_cookie(session.token))
        .map_err(|e| AppError::Internal(format!("set session cookie failed: {e}")))?;
    Ok(res)
}
