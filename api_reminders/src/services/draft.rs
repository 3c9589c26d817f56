use ai::{DraftGenerator, DraftInput};
use chrono::NaiveDate;
use common::error::Res;
use db::store::ReminderStore;
use uuid::Uuid;

/// Guarantees a due reminder has a draft, generating at most once.
///
/// Invoked inline while a follow-ups list renders, once per displayed due
/// reminder lacking a draft. Already-drafted, already-actioned, foreign and
/// not-yet-due reminders are no-ops; a failed generation leaves the row
/// untouched so the next view (or sweep tick) retries.
pub async fn ensure_draft(
    store: &dyn ReminderStore,
    drafter: &dyn DraftGenerator,
    reminder_id: Uuid,
    user_id: Uuid,
    today: NaiveDate,
) -> Res<Option<String>> {
    let Some(reminder) = store.reminder_for_user(reminder_id, user_id).await? else {
        return Ok(None);
    };
    if reminder.sent {
        return Ok(None);
    }

    // idempotent short-circuit, never regenerate
    if let Some(message) = reminder.message {
        return Ok(Some(message));
    }

    // calendar-day cutoff: no pre-drafting, the client's last message may
    // still change before the due date
    if reminder.remind_at.date() > today {
        return Ok(None);
    }

    let Some(lead) = store.lead_for_user(reminder.lead_id, user_id).await? else {
        return Ok(None);
    };

    let input = DraftInput::with_placeholders(
        Some(&lead.client_name),
        Some(&lead.job_title),
        lead.notes.as_deref(),
    );
    let Some(text) = drafter.draft(&input).await else {
        return Ok(None);
    };

    store.set_draft(reminder_id, user_id, &text).await?;
    Ok(Some(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration, NaiveDateTime, Utc};
    use db::{
        dtos::reminder::{DueReminderRow, OutreachCreateRequest},
        models::{
            lead::{Lead, LeadStatus},
            message::OutreachMessage,
            reminder::Reminder,
            user::User,
        },
    };
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    fn now() -> NaiveDateTime {
        Utc::now().naive_utc()
    }

    fn lead(id: Uuid, user_id: Uuid) -> Lead {
        Lead {
            id,
            user_id,
            client_name: "Acme Studio".into(),
            job_title: "Landing page redesign".into(),
            platform: None,
            status: LeadStatus::FollowUp,
            last_contact: None,
            notes: Some("We liked your portfolio.".into()),
            proposal: None,
            created_at: now(),
            updated_at: now(),
        }
    }

    fn reminder(id: Uuid, user_id: Uuid, lead_id: Uuid, remind_at: NaiveDateTime) -> Reminder {
        Reminder {
            id,
            user_id,
            lead_id,
            remind_at,
            kind: None,
            message: None,
            sent: false,
            email_sent_at: None,
            created_at: now(),
            updated_at: now(),
        }
    }

    struct MemStore {
        reminders: Mutex<Vec<Reminder>>,
        leads: Vec<Lead>,
    }

    #[async_trait]
    impl ReminderStore for MemStore {
        async fn due_batch(&self, _now: NaiveDateTime, _limit: i64) -> Res<Vec<Reminder>> {
            Ok(Vec::new())
        }

        async fn due_feed(
            &self,
            _user_id: Uuid,
            _now: NaiveDateTime,
            _limit: i64,
        ) -> Res<Vec<DueReminderRow>> {
            Ok(Vec::new())
        }

        async fn reminder_for_user(&self, id: Uuid, user_id: Uuid) -> Res<Option<Reminder>> {
            Ok(self
                .reminders
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == id && r.user_id == user_id)
                .cloned())
        }

        async fn lead_by_id(&self, id: Uuid) -> Res<Option<Lead>> {
            Ok(self.leads.iter().find(|l| l.id == id).cloned())
        }

        async fn lead_for_user(&self, id: Uuid, user_id: Uuid) -> Res<Option<Lead>> {
            Ok(self
                .leads
                .iter()
                .find(|l| l.id == id && l.user_id == user_id)
                .cloned())
        }

        async fn user_by_id(&self, _id: Uuid) -> Res<Option<User>> {
            Ok(None)
        }

        async fn set_draft(&self, id: Uuid, user_id: Uuid, text: &str) -> Res<()> {
            let mut reminders = self.reminders.lock().unwrap();
            if let Some(r) = reminders
                .iter_mut()
                .find(|r| r.id == id && r.user_id == user_id && r.message.is_none())
            {
                r.message = Some(text.to_string());
            }
            Ok(())
        }

        async fn claim_email(&self, _id: Uuid, _now: NaiveDateTime) -> Res<bool> {
            Ok(false)
        }

        async fn release_email_claim(&self, _id: Uuid) -> Res<()> {
            Ok(())
        }

        async fn record_outreach(&self, data: OutreachCreateRequest) -> Res<OutreachMessage> {
            Ok(OutreachMessage {
                id: Uuid::new_v4(),
                user_id: data.user_id,
                lead_id: data.lead_id,
                reminder_id: data.reminder_id,
                context: data.context,
                body: data.body,
                created_at: now(),
            })
        }
    }

    struct CountingDrafter {
        calls: AtomicUsize,
        reply: Option<String>,
    }

    impl CountingDrafter {
        fn replying(text: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reply: Some(text.to_string()),
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reply: None,
            }
        }
    }

    #[async_trait]
    impl DraftGenerator for CountingDrafter {
        async fn draft(&self, _input: &DraftInput) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    fn setup(remind_at: NaiveDateTime) -> (MemStore, Uuid, Uuid) {
        let user_id = Uuid::new_v4();
        let lead_id = Uuid::new_v4();
        let reminder_id = Uuid::new_v4();
        let store = MemStore {
            reminders: Mutex::new(vec![reminder(reminder_id, user_id, lead_id, remind_at)]),
            leads: vec![lead(lead_id, user_id)],
        };
        (store, reminder_id, user_id)
    }

    #[tokio::test]
    async fn due_reminder_generates_once_and_persists() {
        let (store, reminder_id, user_id) = setup(now() - Duration::days(1));
        let drafter = CountingDrafter::replying("Hi, just checking in.");
        let today = Utc::now().date_naive();

        let first = ensure_draft(&store, &drafter, reminder_id, user_id, today)
            .await
            .unwrap();
        assert_eq!(first.as_deref(), Some("Hi, just checking in."));

        let second = ensure_draft(&store, &drafter, reminder_id, user_id, today)
            .await
            .unwrap();
        assert_eq!(second, first);
        assert_eq!(drafter.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn future_reminder_is_not_drafted_early() {
        let (store, reminder_id, user_id) = setup(now() + Duration::days(3));
        let drafter = CountingDrafter::replying("too early");

        let result = ensure_draft(&store, &drafter, reminder_id, user_id, Utc::now().date_naive())
            .await
            .unwrap();
        assert!(result.is_none());
        assert_eq!(drafter.calls.load(Ordering::SeqCst), 0);
        assert!(
            store.reminders.lock().unwrap()[0].message.is_none(),
            "message must stay untouched"
        );
    }

    #[tokio::test]
    async fn sent_reminder_is_a_noop() {
        let (store, reminder_id, user_id) = setup(now() - Duration::days(1));
        store.reminders.lock().unwrap()[0].sent = true;
        let drafter = CountingDrafter::replying("nope");

        let result = ensure_draft(&store, &drafter, reminder_id, user_id, Utc::now().date_naive())
            .await
            .unwrap();
        assert!(result.is_none());
        assert_eq!(drafter.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn foreign_reminder_is_invisible() {
        let (store, reminder_id, _user_id) = setup(now() - Duration::days(1));
        let drafter = CountingDrafter::replying("nope");

        let result = ensure_draft(
            &store,
            &drafter,
            reminder_id,
            Uuid::new_v4(),
            Utc::now().date_naive(),
        )
        .await
        .unwrap();
        assert!(result.is_none());
        assert_eq!(drafter.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_generation_leaves_state_for_retry() {
        let (store, reminder_id, user_id) = setup(now() - Duration::days(1));
        let failing = CountingDrafter::failing();
        let today = Utc::now().date_naive();

        let result = ensure_draft(&store, &failing, reminder_id, user_id, today)
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(store.reminders.lock().unwrap()[0].message.is_none());

        // a later view retries and succeeds
        let drafter = CountingDrafter::replying("second try");
        let result = ensure_draft(&store, &drafter, reminder_id, user_id, today)
            .await
            .unwrap();
        assert_eq!(result.as_deref(), Some("second try"));
    }
}
