use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    http::header::LOCATION,
    HttpRequest, HttpResponse,
};
use entity::user::Model as UserModel;

use crate::db::{database_service::DatabaseService, session::SESSION_TTL_SECONDS};
use crate::types::{error::AppError, notice::Notice};

pub const SESSION_COOKIE: &str = "sessionid";
pub const NOTICE_COOKIE: &str = "notice";

/// `303 See Other` carrying an optional one-shot notice.
pub fn redirect_with(location: &str, notice: Option<Notice>) -> HttpResponse {
    let mut res = HttpResponse::SeeOther();
    res.insert_header((LOCATION, location));
    if let Some(notice) = notice {
        res.cookie(
            Cookie::build(NOTICE_COOKIE, notice.to_cookie_value())
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .finish(),
        );
    }
    res.finish()
}

pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(SESSION_TTL_SECONDS))
        .finish()
}

pub fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::build(name, "").path("/").finish();
    cookie.make_removal();
    cookie
}

pub fn session_token(req: &HttpRequest) -> Option<String> {
    req.cookie(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// The logged-in user behind the request's session cookie, if any.
pub async fn session_user(req: &HttpRequest, db: &DatabaseService) -> Result<Option<UserModel>, AppError> {
    match session_token(req) {
        Some(token) => db.find_session_user(&token).await,
        None => Ok(None),
    }
}

/// Where anonymous callers of a login-gated path are sent.
pub fn login_redirect(req: &HttpRequest) -> HttpResponse {
    let next = urlencoding::encode(req.path());
    redirect_with(&format!("/login?next={next}"), None)
}

/// Only same-site absolute paths are honoured as post-login targets.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(n) if n.starts_with('/') && !n.starts_with("//") && !n.contains('\\') => n,
        _ => "/",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_next_rejects_offsite_targets() {
        assert_eq!(safe_next(Some("/services")), "/services");
        assert_eq!(safe_next(Some("//evil.example")), "/");
        assert_eq!(safe_next(Some("https://evil.example")), "/");
        assert_eq!(safe_next(Some("/\\evil.example")), "/");
        assert_eq!(safe_next(None), "/");
    }

    #[test]
    fn redirect_sets_location_and_notice() {
        let res = redirect_with("/login", Some(Notice::success("ok")));
        assert_eq!(res.status(), actix_web::http::StatusCode::SEE_OTHER);
        assert_eq!(res.headers().get(LOCATION).unwrap(), "/login");
        let cookie = res.cookies().find(|c| c.name() == NOTICE_COOKIE).unwrap();
        assert_eq!(Notice::from_cookie_value(cookie.value()), Some(Notice::success("ok")));
    }
}
