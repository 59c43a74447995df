use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
};
use sea_orm::sea_query::Expr;
use time::OffsetDateTime;
use users::Model as User;

use crate::domain::Role;
use crate::entities::users;
use crate::error::AppError;

pub async fn find_by_email(
    conn: &impl ConnectionTrait,
    email: &str,
) -> Result<Option<User>, AppError> {
    Ok(users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await?)
}

/// Insert a new user with the `user` role.
pub async fn create(
    conn: &impl ConnectionTrait,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, AppError> {
    let user = users::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        role: Set(Role::User.as_str().to_string()),
        password_hash: Set(password_hash.to_string()),
        created_at: Set(OffsetDateTime::now_utc()),
    };

    Ok(user.insert(conn).await?)
}

/// Every user except admins.
pub async fn list_non_admin(conn: &impl ConnectionTrait) -> Result<Vec<User>, AppError> {
    Ok(users::Entity::find()
        .filter(users::Column::Role.ne(Role::Admin.as_str()))
        .all(conn)
        .await?)
}

pub async fn list_officials(conn: &impl ConnectionTrait) -> Result<Vec<User>, AppError> {
    Ok(users::Entity::find()
        .filter(users::Column::Role.eq(Role::Official.as_str()))
        .all(conn)
        .await?)
}

/// Set a user's role. Returns false when no row matched the id.
pub async fn update_role(
    conn: &impl ConnectionTrait,
    id: i64,
    role: Role,
) -> Result<bool, AppError> {
    let result = users::Entity::update_many()
        .col_expr(users::Column::Role, Expr::val(role.as_str()).into())
        .filter(users::Column::Id.eq(id))
        .exec(conn)
        .await?;

    Ok(result.rows_affected > 0)
}
