use common::{
    error::{AppError, Res},
    jwt::JwtClaims,
};
use db::models::user::User;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn get_me(pool: &PgPool, user_id: Uuid) -> Res<User> {
    db::users::get_user_by_id(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not synced".to_string()))
}

pub async fn sync(pool: &PgPool, claims: JwtClaims) -> Res<User> {
    db::users::upsert_user(pool, claims.user_id, &claims.email).await
}
