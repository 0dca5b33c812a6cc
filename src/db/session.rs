use crate::db::database_service::DatabaseService;
use crate::types::error::AppError;
use crate::utils::token::{new_token, token_digest};
use chrono::{Duration, Utc};
use entity::session::{ActiveModel as SessionActive, Column as SessionColumn, Entity as Session};
use entity::user::{Entity as User, Model as UserModel};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};
use tracing::debug;

/// Two weeks, same as a typical browser session cookie.
pub const SESSION_TTL_SECONDS: i64 = 1_209_600;

impl DatabaseService {
    /// Creates a session and returns the raw token for the cookie.
    pub async fn create_session(&self, user_id: i32) -> Result<String, AppError> {
        self.create_session_with_ttl(user_id, Duration::seconds(SESSION_TTL_SECONDS)).await
    }

    /// Like [`Self::create_session`] with an explicit lifetime. Prunes expired rows first.
    pub async fn create_session_with_ttl(&self, user_id: i32, ttl: Duration) -> Result<String, AppError> {
        let token = new_token();
        let now = Utc::now();

        let pruned = Session::delete_many()
            .filter(SessionColumn::ExpiresAt.lt(now))
            .exec(&self.database_connection)
            .await?;
        if pruned.rows_affected > 0 {
            debug!("pruned {} expired session(s)", pruned.rows_affected);
        }

        Session::insert(SessionActive {
            id: Set(token_digest(&token)),
            user_id: Set(user_id),
            created_at: Set(now),
            expires_at: Set(now + ttl),
        })
        .exec(&self.database_connection)
        .await?;

        Ok(token)
    }

    /// Resolves a cookie token to its user. Expired or unknown sessions yield `None`.
    pub async fn find_session_user(&self, token: &str) -> Result<Option<UserModel>, AppError> {
        let found = Session::find_by_id(token_digest(token))
            .find_also_related(User)
            .one(&self.database_connection)
            .await?;

        match found {
            Some((session, user)) if session.expires_at > Utc::now() => Ok(user),
            Some((session, _)) => {
                Session::delete_by_id(session.id)
                    .exec(&self.database_connection)
                    .await?;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    pub async fn delete_session(&self, token: &str) -> Result<bool, AppError> {
        let res = Session::delete_by_id(token_digest(token))
            .exec(&self.database_connection)
            .await?;
        Ok(res.rows_affected > 0)
    }
}
