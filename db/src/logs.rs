use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};

use crate::dtos::log::RequestLogCreate;

pub async fn insert_request_log<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    log: RequestLogCreate,
) -> Res<()> {
    sqlx::query(
        "INSERT INTO request_logs (timestamp, method, path, status_code, user_id, params, ip_address, user_agent)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(log.timestamp)
    .bind(&log.method)
    .bind(&log.path)
    .bind(log.status_code)
    .bind(log.user_id)
    .bind(log.params)
    .bind(log.ip_address)
    .bind(log.user_agent)
    .execute(executor)
    .await
    .map_err(AppError::from)?;

    Ok(())
}
