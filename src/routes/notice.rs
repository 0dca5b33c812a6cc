use actix_web::{get, HttpRequest, HttpResponse};

use crate::types::{error::AppError, notice::Notice};
use crate::utils::webutils::{removal_cookie, NOTICE_COOKIE};

/// Pops the pending notice: 200 with the notice, or 204 when there is none.
#[get("/notice")]
pub async fn pop_notice(req: HttpRequest) -> Result<HttpResponse, AppError> {
    let Some(cookie) = req.cookie(NOTICE_COOKIE) else {
        return Ok(HttpResponse::NoContent().finish());
    };

    let mut res = match Notice::from_cookie_value(cookie.value()) {
        Some(notice) => HttpResponse::Ok().json(notice),
        None => HttpResponse::NoContent().finish(),
    };
    res.add_cookie(&removal_cookie(NOTICE_COOKIE))
        .map_err(|e| AppError::Internal(format!("clear notice cookie failed: {e}")))?;
    Ok(res)
}
