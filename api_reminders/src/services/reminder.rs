use common::error::{AppError, Res};
use db::{
    dtos::reminder::{ReminderCreateRequest, ReminderUpdateRequest},
    models::reminder::Reminder,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::reminder::{CreateReminderRequest, UpdateReminderRequest};

pub async fn create_reminder(
    pool: &PgPool,
    user_id: Uuid,
    req: CreateReminderRequest,
) -> Res<Reminder> {
    let lead_id = req
        .lead_id
        .ok_or_else(|| AppError::BadRequest("lead_id is required".to_string()))?;
    let remind_at = req
        .remind_at
        .ok_or_else(|| AppError::BadRequest("remind_at is required".to_string()))?;

    // the reminder must attach to a lead the caller owns
    if db::leads::get_lead_scoped(pool, lead_id, user_id)
        .await?
        .is_none()
    {
        return Err(AppError::BadRequest(
            "lead_id does not reference one of your leads".to_string(),
        ));
    }

    db::reminders::insert_reminder(
        pool,
        ReminderCreateRequest {
            user_id,
            lead_id,
            remind_at,
            kind: req.kind,
        },
    )
    .await
}

/// 404 both for a nonexistent reminder and for another user's reminder;
/// existence is never leaked through a different status.
pub async fn update_reminder(
    pool: &PgPool,
    reminder_id: Uuid,
    user_id: Uuid,
    req: UpdateReminderRequest,
) -> Res<Reminder> {
    db::reminders::update_reminder_scoped(
        pool,
        reminder_id,
        user_id,
        ReminderUpdateRequest {
            remind_at: req.remind_at,
            kind: req.kind,
            message: req.message,
            sent: req.sent,
        },
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Reminder not found".to_string()))
}

pub async fn delete_reminder(pool: &PgPool, reminder_id: Uuid, user_id: Uuid) -> Res<()> {
    let deleted = db::reminders::delete_reminder_scoped(pool, reminder_id, user_id).await?;
    if deleted {
        Ok(())
    } else {
        Err(AppError::NotFound("Reminder not found".to_string()))
    }
}
