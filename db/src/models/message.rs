use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

/// Audit record of one AI draft generation performed by the sweep.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct OutreachMessage {
    pub id: Uuid,
    pub user_id: Uuid,
    pub lead_id: Uuid,
    pub reminder_id: Uuid,
    pub context: String,
    pub body: String,
    pub created_at: NaiveDateTime,
}
