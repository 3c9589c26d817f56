use chrono::NaiveDateTime;
use sqlx::types::{JsonValue, ipnetwork::IpNetwork};
use uuid::Uuid;

/// One request-log row to insert; the row id is database-generated.
pub struct RequestLogCreate {
    pub timestamp: NaiveDateTime,
    pub method: String,
    pub path: String,
    pub status_code: i32,
    pub user_id: Option<Uuid>,
    pub params: Option<JsonValue>,
    pub ip_address: IpNetwork,
    pub user_agent: String,
}
