use chrono::NaiveDateTime;
use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::reminder::{DueReminderRow, ReminderCreateRequest, ReminderUpdateRequest},
    models::reminder::Reminder,
};

pub async fn insert_reminder<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: ReminderCreateRequest,
) -> Res<Reminder> {
    sqlx::query_as::<_, Reminder>(
        r#"
        INSERT INTO reminders (user_id, lead_id, remind_at, kind)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(data.user_id)
    .bind(data.lead_id)
    .bind(data.remind_at)
    .bind(data.kind)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Owner-scoped fetch. `None` covers both "does not exist" and "not yours".
pub async fn get_reminder_scoped<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    reminder_id: Uuid,
    user_id: Uuid,
) -> Res<Option<Reminder>> {
    sqlx::query_as::<_, Reminder>("SELECT * FROM reminders WHERE id = $1 AND user_id = $2")
        .bind(reminder_id)
        .bind(user_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_reminders_by_user_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Vec<Reminder>> {
    sqlx::query_as::<_, Reminder>(
        "SELECT * FROM reminders WHERE user_id = $1 ORDER BY remind_at ASC",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

/// The sweep's selection: due, not completed by the user, not yet emailed.
/// Earliest-due-first, bounded. The `email_sent_at IS NULL` predicate is only
/// a narrowing filter; the claim in [`claim_email`] is what authorizes a send.
pub async fn get_due_batch<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    now: NaiveDateTime,
    limit: i64,
) -> Res<Vec<Reminder>> {
    sqlx::query_as::<_, Reminder>(
        r#"
        SELECT * FROM reminders
        WHERE remind_at <= $1 AND sent = FALSE AND email_sent_at IS NULL
        ORDER BY remind_at ASC
        LIMIT $2
        "#,
    )
    .bind(now)
    .bind(limit)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

/// Due, unsent reminders for one user joined with lead display fields,
/// for the notification feed.
pub async fn get_due_feed<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    now: NaiveDateTime,
    limit: i64,
) -> Res<Vec<DueReminderRow>> {
    sqlx::query_as::<_, DueReminderRow>(
        r#"
        SELECT r.id, r.lead_id, r.remind_at, r.message, l.client_name, l.job_title
        FROM reminders r
        JOIN leads l ON l.id = r.lead_id
        WHERE r.user_id = $1 AND r.remind_at <= $2 AND r.sent = FALSE
        ORDER BY r.remind_at ASC
        LIMIT $3
        "#,
    )
    .bind(user_id)
    .bind(now)
    .bind(limit)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

/// Last-writer-wins partial update scoped by (id, user_id).
/// Returns `None` when no row matched the scope.
pub async fn update_reminder_scoped<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    reminder_id: Uuid,
    user_id: Uuid,
    data: ReminderUpdateRequest,
) -> Res<Option<Reminder>> {
    sqlx::query_as::<_, Reminder>(
        r#"
        UPDATE reminders
        SET remind_at = COALESCE($3, remind_at),
            kind = COALESCE($4, kind),
            message = COALESCE($5, message),
            sent = COALESCE($6, sent),
            updated_at = now()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(reminder_id)
    .bind(user_id)
    .bind(data.remind_at)
    .bind(data.kind)
    .bind(data.message)
    .bind(data.sent)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

/// Persists a generated draft. The `message IS NULL` predicate keeps the
/// pipeline's null→text transition append-only; user edits go through
/// [`update_reminder_scoped`].
pub async fn set_message_scoped<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    reminder_id: Uuid,
    user_id: Uuid,
    message: &str,
) -> Res<()> {
    sqlx::query(
        r#"
        UPDATE reminders
        SET message = $3, updated_at = now()
        WHERE id = $1 AND user_id = $2 AND message IS NULL
        "#,
    )
    .bind(reminder_id)
    .bind(user_id)
    .bind(message)
    .execute(executor)
    .await
    .map_err(AppError::from)?;
    Ok(())
}

/// Claims the right to send the automated email for one reminder.
/// The conditional write is the concurrency guard: of any number of
/// overlapping sweep runs, exactly one sees an affected row.
pub async fn claim_email<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    reminder_id: Uuid,
    now: NaiveDateTime,
) -> Res<bool> {
    let result = sqlx::query(
        r#"
        UPDATE reminders
        SET email_sent_at = $2, updated_at = $2
        WHERE id = $1 AND email_sent_at IS NULL
        "#,
    )
    .bind(reminder_id)
    .bind(now)
    .execute(executor)
    .await
    .map_err(AppError::from)?;
    Ok(result.rows_affected() == 1)
}

/// Releases a claim after a failed send so the next sweep run retries.
pub async fn release_email_claim<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    reminder_id: Uuid,
) -> Res<()> {
    sqlx::query("UPDATE reminders SET email_sent_at = NULL WHERE id = $1")
        .bind(reminder_id)
        .execute(executor)
        .await
        .map_err(AppError::from)?;
    Ok(())
}

pub async fn delete_reminder_scoped<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    reminder_id: Uuid,
    user_id: Uuid,
) -> Res<bool> {
    let result = sqlx::query("DELETE FROM reminders WHERE id = $1 AND user_id = $2")
        .bind(reminder_id)
        .bind(user_id)
        .execute(executor)
        .await
        .map_err(AppError::from)?;
    Ok(result.rows_affected() > 0)
}
