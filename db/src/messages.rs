use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};

use crate::{dtos::reminder::OutreachCreateRequest, models::message::OutreachMessage};

pub async fn insert_outreach<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: OutreachCreateRequest,
) -> Res<OutreachMessage> {
    sqlx::query_as::<_, OutreachMessage>(
        r#"
        INSERT INTO outreach_messages (user_id, lead_id, reminder_id, context, body)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(data.user_id)
    .bind(data.lead_id)
    .bind(data.reminder_id)
    .bind(data.context)
    .bind(data.body)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}
