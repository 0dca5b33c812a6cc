use actix_web::get;

use crate::types::{error::AppError, response::ApiResult};

/// Target of the reverse proxy's ban rule.
#[get("/ban")]
pub async fn ban() -> ApiResult<()> {
    Err(AppError::Forbidden)
}
