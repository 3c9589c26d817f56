use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wire shape for reminder creation. Required fields arrive as options so
/// the service can answer 400 with a field-specific message.
#[derive(Debug, Deserialize)]
pub struct CreateReminderRequest {
    pub lead_id: Option<Uuid>,
    pub remind_at: Option<NaiveDateTime>,
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateReminderRequest {
    pub remind_at: Option<NaiveDateTime>,
    pub kind: Option<String>,
    pub message: Option<String>,
    pub sent: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub draft: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub id: Uuid,
    pub lead_id: Uuid,
    pub reminder_at: NaiveDateTime,
    pub message: Option<String>,
    pub client_name: String,
    pub job_title: String,
}

#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub count: usize,
    pub items: Vec<FeedItem>,
}
