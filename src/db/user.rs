use crate::db::database_service::DatabaseService;
use crate::types::{error::AppError, user::DBUserCreate};
use chrono::Utc;
use entity::user::{ActiveModel as UserActive, Column, Entity as User, Model as UserModel};
use sea_orm::{
    sea_query::Expr, ColumnTrait, DbErr, EntityTrait, NotSet, PaginatorTrait, QueryFilter,
    Set,
};

impl DatabaseService {
    /// Case-sensitive exact match.
    pub async fn user_exists_by_username(&self, username: &str) -> Result<bool, AppError> {
        Ok(User::find()
            .filter(Column::Username.eq(username))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    pub async fn get_user_by_id(&self, id: i32) -> Result<UserModel, AppError> {
        Ok(User::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<UserModel>, AppError> {
        Ok(User::find()
            .filter(Column::Username.eq(username))
            .one(&self.database_connection)
            .await?)
    }

    /// Signup: both gates start closed. A taken username surfaces as
    /// `AlreadyExists` through the unique index.
    pub async fn create_user(&self, payload: DBUserCreate) -> Result<i32, AppError> {
        let now = Utc::now();

        let res = User::insert(UserActive {
            id: NotSet,
            username: Set(payload.username),
            email: Set(payload.email),
            password_hash: Set(payload.password_hash),
            email_confirmed: Set(false),
            admin_approved: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .exec(&self.database_connection)
        .await?;

        Ok(res.last_insert_id)
    }

    /// Opens the email gate. Returns `false` when it was already open.
    pub async fn mark_email_confirmed(&self, user_id: i32) -> Result<bool, AppError> {
        self.open_gate(user_id, Column::EmailConfirmed).await
    }

    /// Opens the approval gate. Returns `false` when it was already open.
    pub async fn mark_admin_approved(&self, user_id: i32) -> Result<bool, AppError> {
        self.open_gate(user_id, Column::AdminApproved).await
    }

    // Single conditional UPDATE: concurrent flips converge and only one reports the change.
    async fn open_gate(&self, user_id: i32, gate: Column) -> Result<bool, AppError> {
        let res = User::update_many()
            .col_expr(gate, Expr::value(true))
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(Column::Id.eq(user_id))
            .filter(gate.eq(false))
            .exec(&self.database_connection)
            .await?;
        Ok(res.rows_affected > 0)
    }
}
