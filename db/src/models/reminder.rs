use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

/// A scheduled follow-up obligation tied to one lead.
///
/// `sent` is the user-facing completion flag; `email_sent_at` records the
/// automated dispatch and is written at most once via a conditional claim.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Reminder {
    pub id: Uuid,
    pub user_id: Uuid,
    pub lead_id: Uuid,
    pub remind_at: NaiveDateTime,
    pub kind: Option<String>,
    pub message: Option<String>,
    pub sent: bool,
    pub email_sent_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
