use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

pub struct ReminderCreateRequest {
    pub user_id: Uuid,
    pub lead_id: Uuid,
    pub remind_at: NaiveDateTime,
    pub kind: Option<String>,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Default)]
pub struct ReminderUpdateRequest {
    pub remind_at: Option<NaiveDateTime>,
    pub kind: Option<String>,
    pub message: Option<String>,
    pub sent: Option<bool>,
}

pub struct OutreachCreateRequest {
    pub user_id: Uuid,
    pub lead_id: Uuid,
    pub reminder_id: Uuid,
    pub context: String,
    pub body: String,
}

/// Due reminder joined with the lead fields the notification feed displays.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct DueReminderRow {
    pub id: Uuid,
    pub lead_id: Uuid,
    pub remind_at: NaiveDateTime,
    pub message: Option<String>,
    pub client_name: String,
    pub job_title: String,
}
