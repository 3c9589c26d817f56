use chrono::NaiveDateTime;
use common::error::Res;
use db::store::ReminderStore;
use uuid::Uuid;

use crate::dtos::reminder::{FeedItem, FeedResponse};

pub const DEFAULT_FEED_LIMIT: i64 = 8;
pub const MAX_FEED_LIMIT: i64 = 50;

/// Clamps a caller-supplied page size into [1, MAX_FEED_LIMIT].
pub fn clamp_limit(raw: Option<i64>) -> i64 {
    raw.unwrap_or(DEFAULT_FEED_LIMIT).clamp(1, MAX_FEED_LIMIT)
}

/// Due, unsent reminders for one user with lead display fields, earliest
/// first. Pure read; "already seen" tracking belongs to the caller.
pub async fn due_notifications(
    store: &dyn ReminderStore,
    user_id: Uuid,
    now: NaiveDateTime,
    limit: i64,
) -> Res<FeedResponse> {
    let rows = store.due_feed(user_id, now, limit).await?;
    let items: Vec<FeedItem> = rows
        .into_iter()
        .map(|row| FeedItem {
            id: row.id,
            lead_id: row.lead_id,
            reminder_at: row.remind_at,
            message: row.message,
            client_name: row.client_name,
            job_title: row.job_title,
        })
        .collect();

    Ok(FeedResponse {
        count: items.len(),
        items,
    })
}
