use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use common::error::Res;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::reminder::{DueReminderRow, OutreachCreateRequest},
    models::{lead::Lead, message::OutreachMessage, reminder::Reminder, user::User},
};

/// The store operations the follow-up pipeline (sweep + lazy draft ensurer)
/// is written against. Handlers receive this as an injected dependency so
/// tests can substitute an in-memory fake for the Postgres-backed [`PgStore`].
#[async_trait]
pub trait ReminderStore: Send + Sync {
    /// Due, unsent, unclaimed reminders, earliest first, bounded.
    async fn due_batch(&self, now: NaiveDateTime, limit: i64) -> Res<Vec<Reminder>>;

    /// Due, unsent reminders for one user joined with lead display fields,
    /// earliest first, bounded.
    async fn due_feed(
        &self,
        user_id: Uuid,
        now: NaiveDateTime,
        limit: i64,
    ) -> Res<Vec<DueReminderRow>>;

    async fn reminder_for_user(&self, id: Uuid, user_id: Uuid) -> Res<Option<Reminder>>;

    async fn lead_by_id(&self, id: Uuid) -> Res<Option<Lead>>;

    async fn lead_for_user(&self, id: Uuid, user_id: Uuid) -> Res<Option<Lead>>;

    async fn user_by_id(&self, id: Uuid) -> Res<Option<User>>;

    /// Persists a draft; a no-op when the reminder already carries one.
    async fn set_draft(&self, id: Uuid, user_id: Uuid, text: &str) -> Res<()>;

    /// Conditional claim of the automated send; `true` means this caller
    /// owns the dispatch.
    async fn claim_email(&self, id: Uuid, now: NaiveDateTime) -> Res<bool>;

    async fn release_email_claim(&self, id: Uuid) -> Res<()>;

    async fn record_outreach(&self, data: OutreachCreateRequest) -> Res<OutreachMessage>;
}

#[derive(Clone)]
pub struct PgStore {
    pool: Arc<PgPool>,
}

impl PgStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReminderStore for PgStore {
    async fn due_batch(&self, now: NaiveDateTime, limit: i64) -> Res<Vec<Reminder>> {
        crate::reminders::get_due_batch(&*self.pool, now, limit).await
    }

    async fn due_feed(
        &self,
        user_id: Uuid,
        now: NaiveDateTime,
        limit: i64,
    ) -> Res<Vec<DueReminderRow>> {
        crate::reminders::get_due_feed(&*self.pool, user_id, now, limit).await
    }

    async fn reminder_for_user(&self, id: Uuid, user_id: Uuid) -> Res<Option<Reminder>> {
        crate::reminders::get_reminder_scoped(&*self.pool, id, user_id).await
    }

    async fn lead_by_id(&self, id: Uuid) -> Res<Option<Lead>> {
        crate::leads::get_lead_by_id(&*self.pool, id).await
    }

    async fn lead_for_user(&self, id: Uuid, user_id: Uuid) -> Res<Option<Lead>> {
        crate::leads::get_lead_scoped(&*self.pool, id, user_id).await
    }

    async fn user_by_id(&self, id: Uuid) -> Res<Option<User>> {
        crate::users::get_user_by_id(&*self.pool, id).await
    }

    async fn set_draft(&self, id: Uuid, user_id: Uuid, text: &str) -> Res<()> {
        crate::reminders::set_message_scoped(&*self.pool, id, user_id, text).await
    }

    async fn claim_email(&self, id: Uuid, now: NaiveDateTime) -> Res<bool> {
        crate::reminders::claim_email(&*self.pool, id, now).await
    }

    async fn release_email_claim(&self, id: Uuid) -> Res<()> {
        crate::reminders::release_email_claim(&*self.pool, id).await
    }

    async fn record_outreach(&self, data: OutreachCreateRequest) -> Res<OutreachMessage> {
        crate::messages::insert_outreach(&*self.pool, data).await
    }
}
