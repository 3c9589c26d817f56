use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::user::User;

pub async fn get_user_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

/// Materializes the external identity into the local users table.
/// Idempotent; a changed email on the identity side wins.
pub async fn upsert_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    email: &str,
) -> Res<User> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, email)
        VALUES ($1, $2)
        ON CONFLICT (id) DO UPDATE SET email = EXCLUDED.email, updated_at = now()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(email)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}
