use actix_web::{post, web, HttpResponse};

use crate::flow::{AccountFlow, FlowError};
use crate::types::{error::AppError, notice::Notice, user::RRegister};
use crate::utils::webutils::redirect_with;

pub const REGISTERED: &str = "Registration successful! Please check your email to confirm your account. Your account will be activated after admin approval.";
pub const USERNAME_REQUIRED: &str = "The given username must be set.";
pub const USERNAME_TAKEN: &str = "Username already exists.";
pub const MISSING_HOSTNAME: &str = "Server configuration error: HOSTNAME environment variable not set.";

#[post("/register")]
pub async fn register(
    flow: web::Data<AccountFlow>,
    body: web::Form<RRegister>,
) -> Result<HttpResponse, AppError> {
    let RRegister { username, email, password } = body.into_inner();

    Ok(match flow.register(&username, &email, &password).await {
        Ok(_) => redirect_with("/login", Some(Notice::success(REGISTERED))),
        Err(FlowError::UsernameRequired) => {
            redirect_with("/register", Some(Notice::error(USERNAME_REQUIRED)))
        }
        Err(FlowError::UsernameTaken) => redirect_with("/register", Some(Notice::error(USERNAME_TAKEN))),
        Err(FlowError::MissingHostname) => {
            redirect_with("/register", Some(Notice::error(MISSING_HOSTNAME)))
        }
        Err(other) => return Err(other.into()),
    })
}
