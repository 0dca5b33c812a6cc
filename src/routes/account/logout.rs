use actix_web::{post, web, HttpRequest, HttpResponse};
use std::sync::Arc;
use tracing::info;

use crate::db::database_service::DatabaseService;
use crate::flow::AccountFlow;
use crate::types::{error::AppError, notice::Notice};
use crate::utils::webutils::{redirect_with, removal_cookie, session_token, SESSION_COOKIE};

pub const LOGGED_OUT: &str = "Logged out successfully.";

// Anonymous callers go to plain /login: a `next=/logout` would be followed with a GET.
#[post("/logout")]
pub async fn logout(
    req: HttpRequest,
    flow: web::Data<AccountFlow>,
    db: web::Data<Arc<DatabaseService>>,
) -> Result<HttpResponse, AppError> {
    let Some(token) = session_token(&req) else {
        return Ok(redirect_with("/login", None));
    };
    let Some(user) = db.find_session_user(&token).await? else {
        return Ok(redirect_with("/login", None));
    };

    flow.logout(&token).await?;
    info!("user {} logged out", user.id);

    let mut res = redirect_with("/", Some(Notice::info(LOGGED_OUT)));
    res.add_cookie(&removal_cookie(SESSION_COOKIE))
        .map_err(|e| AppError::Internal(format!("clear session cookie failed: {e}")))?;
    Ok(res)
}
