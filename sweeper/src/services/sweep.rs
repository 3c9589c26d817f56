use ai::{DraftGenerator, DraftInput, build_prompt};
use chrono::Utc;
use common::error::Res;
use db::{
    dtos::reminder::OutreachCreateRequest, models::reminder::Reminder, store::ReminderStore,
};
use mailer::{EmailSender, OutgoingEmail, compose_reminder_email};
use serde::Serialize;
use uuid::Uuid;

/// Upper bound on reminders handled per invocation; anything beyond waits
/// for the next trigger.
pub const SWEEP_BATCH_SIZE: i64 = 25;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepFailure {
    pub reminder_id: Uuid,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct SweepReport {
    pub processed: u32,
    pub failures: Vec<SweepFailure>,
}

enum ItemOutcome {
    Sent,
    Skipped,
}

/// One sweep invocation: pull the due batch (earliest first), then for each
/// reminder independently ensure a draft, claim the send, dispatch the email.
/// Individual failures are collected into the report; only the batch read
/// itself can fail the invocation.
pub async fn run_sweep(
    store: &dyn ReminderStore,
    drafter: &dyn DraftGenerator,
    mailer: &dyn EmailSender,
    app_base_url: &str,
) -> Res<SweepReport> {
    let now = Utc::now().naive_utc();
    let due = store.due_batch(now, SWEEP_BATCH_SIZE).await?;
    log::info!("sweep: {} due reminder(s)", due.len());

    let mut processed = 0u32;
    let mut failures = Vec::new();

    for reminder in due {
        let reminder_id = reminder.id;
        match process_one(store, drafter, mailer, app_base_url, reminder).await {
            Ok(ItemOutcome::Sent) => processed += 1,
            Ok(ItemOutcome::Skipped) => {}
            Err(error) => {
                log::warn!("sweep: reminder {} failed: {}", reminder_id, error);
                failures.push(SweepFailure { reminder_id, error });
            }
        }
    }

    Ok(SweepReport { processed, failures })
}

async fn process_one(
    store: &dyn ReminderStore,
    drafter: &dyn DraftGenerator,
    mailer: &dyn EmailSender,
    app_base_url: &str,
    reminder: Reminder,
) -> Result<ItemOutcome, String> {
    // lead gone: treat as already handled
    let Some(lead) = store
        .lead_by_id(reminder.lead_id)
        .await
        .map_err(|e| e.to_string())?
    else {
        return Ok(ItemOutcome::Skipped);
    };

    let email = store
        .user_by_id(reminder.user_id)
        .await
        .map_err(|e| e.to_string())?
        .map(|user| user.email)
        .filter(|email| !email.is_empty())
        .ok_or_else(|| "Missing user email".to_string())?;

    // best-effort draft: the due notice goes out either way
    let mut draft = reminder.message.clone();
    if draft.is_none() {
        let input = DraftInput::with_placeholders(
            Some(&lead.client_name),
            Some(&lead.job_title),
            lead.notes.as_deref(),
        );
        if let Some(text) = drafter.draft(&input).await {
            let audit = store
                .record_outreach(OutreachCreateRequest {
                    user_id: reminder.user_id,
                    lead_id: lead.id,
                    reminder_id: reminder.id,
                    context: build_prompt(&input),
                    body: text.clone(),
                })
                .await;
            if let Err(error) = audit {
                log::warn!("sweep: outreach audit for {} not recorded: {}", reminder.id, error);
            }
            if let Err(error) = store.set_draft(reminder.id, reminder.user_id, &text).await {
                log::warn!("sweep: draft for {} not persisted: {}", reminder.id, error);
            }
            draft = Some(text);
        }
    }

    // claim-then-act: the conditional stamp decides which run sends;
    // stamped with the moment of this item's claim, not the batch start
    let claimed = store
        .claim_email(reminder.id, Utc::now().naive_utc())
        .await
        .map_err(|e| e.to_string())?;
    if !claimed {
        return Ok(ItemOutcome::Skipped);
    }

    let (subject, text) = compose_reminder_email(
        app_base_url,
        &lead.client_name,
        &lead.job_title,
        reminder.remind_at,
        lead.id,
        draft.as_deref(),
    );

    if let Err(error) = mailer
        .send(&OutgoingEmail { to: email, subject, text })
        .await
    {
        // give the claim back so the next tick retries this reminder
        if let Err(release_error) = store.release_email_claim(reminder.id).await {
            log::error!(
                "sweep: could not release claim on {}: {}",
                reminder.id,
                release_error
            );
        }
        return Err(error.to_string());
    }

    Ok(ItemOutcome::Sent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai::DraftGenerator;
    use async_trait::async_trait;
    use chrono::{Duration, NaiveDateTime};
    use common::error::AppError;
    use db::{
        dtos::reminder::DueReminderRow,
        models::{
            lead::{Lead, LeadStatus},
            message::OutreachMessage,
            user::User,
        },
    };
    use std::sync::Mutex;

    fn now() -> NaiveDateTime {
        Utc::now().naive_utc()
    }

    fn user(id: Uuid, email: &str) -> User {
        User {
            id,
            email: email.to_string(),
            created_at: now(),
            updated_at: now(),
        }
    }

    fn lead(id: Uuid, user_id: Uuid, client: &str) -> Lead {
        Lead {
            id,
            user_id,
            client_name: client.to_string(),
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

    fn reminder(user_id: Uuid, lead_id: Uuid, remind_at: NaiveDateTime) -> Reminder {
        Reminder {
            id: Uuid::new_v4(),
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

    #[derive(Default)]
    struct MemStore {
        reminders: Mutex<Vec<Reminder>>,
        leads: Vec<Lead>,
        users: Vec<User>,
        outreach: Mutex<Vec<OutreachMessage>>,
        refuse_claims: bool,
    }

    #[async_trait]
    impl ReminderStore for MemStore {
        async fn due_batch(&self, now: NaiveDateTime, limit: i64) -> Res<Vec<Reminder>> {
            let mut due: Vec<Reminder> = self
                .reminders
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.remind_at <= now && !r.sent && r.email_sent_at.is_none())
                .cloned()
                .collect();
            due.sort_by_key(|r| r.remind_at);
            due.truncate(limit as usize);
            Ok(due)
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

        async fn user_by_id(&self, id: Uuid) -> Res<Option<User>> {
            Ok(self.users.iter().find(|u| u.id == id).cloned())
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

        async fn claim_email(&self, id: Uuid, now: NaiveDateTime) -> Res<bool> {
            if self.refuse_claims {
                return Ok(false);
            }
            let mut reminders = self.reminders.lock().unwrap();
            match reminders
                .iter_mut()
                .find(|r| r.id == id && r.email_sent_at.is_none())
            {
                Some(r) => {
                    r.email_sent_at = Some(now);
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn release_email_claim(&self, id: Uuid) -> Res<()> {
            let mut reminders = self.reminders.lock().unwrap();
            if let Some(r) = reminders.iter_mut().find(|r| r.id == id) {
                r.email_sent_at = None;
            }
            Ok(())
        }

        async fn record_outreach(&self, data: OutreachCreateRequest) -> Res<OutreachMessage> {
            let message = OutreachMessage {
                id: Uuid::new_v4(),
                user_id: data.user_id,
                lead_id: data.lead_id,
                reminder_id: data.reminder_id,
                context: data.context,
                body: data.body,
                created_at: now(),
            };
            self.outreach.lock().unwrap().push(message.clone());
            Ok(message)
        }
    }

    struct StubDrafter {
        reply: Option<String>,
    }

    #[async_trait]
    impl DraftGenerator for StubDrafter {
        async fn draft(&self, _input: &DraftInput) -> Option<String> {
            self.reply.clone()
        }
    }

    struct RecordingMailer {
        sent: Mutex<Vec<OutgoingEmail>>,
        fail: bool,
        delay_ms: u64,
    }

    impl RecordingMailer {
        fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail: false,
                delay_ms: 0,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }

        fn slow() -> Self {
            Self {
                delay_ms: 10,
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl EmailSender for RecordingMailer {
        async fn send(&self, email: &OutgoingEmail) -> Res<()> {
            if self.delay_ms > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(self.delay_ms)).await;
            }
            if self.fail {
                return Err(AppError::Internal("smtp down".to_string()));
            }
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }
    }

    fn drafter() -> StubDrafter {
        StubDrafter {
            reply: Some("Hi, just checking in.".to_string()),
        }
    }

    #[tokio::test]
    async fn one_missing_email_does_not_block_siblings() {
        let user_ok = Uuid::new_v4();
        let user_no_email = Uuid::new_v4();
        let lead_a = Uuid::new_v4();
        let lead_b = Uuid::new_v4();
        let lead_c = Uuid::new_v4();

        let r1 = reminder(user_ok, lead_a, now() - Duration::hours(3));
        let r2 = reminder(user_no_email, lead_b, now() - Duration::hours(2));
        let r3 = reminder(user_ok, lead_c, now() - Duration::hours(1));
        let broken_id = r2.id;

        let store = MemStore {
            reminders: Mutex::new(vec![r1, r2, r3]),
            leads: vec![
                lead(lead_a, user_ok, "Acme"),
                lead(lead_b, user_no_email, "Globex"),
                lead(lead_c, user_ok, "Initech"),
            ],
            users: vec![user(user_ok, "me@example.com"), user(user_no_email, "")],
            ..Default::default()
        };
        let mailer = RecordingMailer::new();

        let report = run_sweep(&store, &drafter(), &mailer, "https://app.example.com")
            .await
            .unwrap();

        assert_eq!(report.processed, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].reminder_id, broken_id);
        assert_eq!(report.failures[0].error, "Missing user email");

        let reminders = store.reminders.lock().unwrap();
        assert!(reminders[0].email_sent_at.is_some());
        assert!(reminders[1].email_sent_at.is_none());
        assert!(reminders[2].email_sent_at.is_some());
    }

    #[tokio::test]
    async fn batch_is_bounded_to_earliest_due() {
        let user_id = Uuid::new_v4();
        let lead_id = Uuid::new_v4();
        let reminders: Vec<Reminder> = (0..40)
            .map(|i| reminder(user_id, lead_id, now() - Duration::minutes(40 - i)))
            .collect();
        let earliest: Vec<Uuid> = {
            let mut sorted = reminders.clone();
            sorted.sort_by_key(|r| r.remind_at);
            sorted.iter().take(25).map(|r| r.id).collect()
        };

        let store = MemStore {
            reminders: Mutex::new(reminders),
            leads: vec![lead(lead_id, user_id, "Acme")],
            users: vec![user(user_id, "me@example.com")],
            ..Default::default()
        };
        let mailer = RecordingMailer::new();

        let report = run_sweep(&store, &drafter(), &mailer, "https://app.example.com")
            .await
            .unwrap();

        assert_eq!(report.processed, 25);
        let reminders = store.reminders.lock().unwrap();
        let stamped: Vec<Uuid> = reminders
            .iter()
            .filter(|r| r.email_sent_at.is_some())
            .map(|r| r.id)
            .collect();
        assert_eq!(stamped.len(), 25);
        for id in &earliest {
            assert!(stamped.contains(id), "earliest 25 must be the ones sent");
        }
    }

    #[tokio::test]
    async fn already_dispatched_reminder_is_never_reselected() {
        let user_id = Uuid::new_v4();
        let lead_id = Uuid::new_v4();
        let mut r = reminder(user_id, lead_id, now() - Duration::hours(1));
        r.email_sent_at = Some(now() - Duration::minutes(30));

        let store = MemStore {
            reminders: Mutex::new(vec![r]),
            leads: vec![lead(lead_id, user_id, "Acme")],
            users: vec![user(user_id, "me@example.com")],
            ..Default::default()
        };
        let mailer = RecordingMailer::new();

        let report = run_sweep(&store, &drafter(), &mailer, "https://app.example.com")
            .await
            .unwrap();

        assert_eq!(report.processed, 0);
        assert!(report.failures.is_empty());
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn refused_claim_suppresses_the_send() {
        let user_id = Uuid::new_v4();
        let lead_id = Uuid::new_v4();
        let store = MemStore {
            reminders: Mutex::new(vec![reminder(user_id, lead_id, now() - Duration::hours(1))]),
            leads: vec![lead(lead_id, user_id, "Acme")],
            users: vec![user(user_id, "me@example.com")],
            refuse_claims: true,
            ..Default::default()
        };
        let mailer = RecordingMailer::new();

        let report = run_sweep(&store, &drafter(), &mailer, "https://app.example.com")
            .await
            .unwrap();

        assert_eq!(report.processed, 0);
        assert!(report.failures.is_empty());
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_send_releases_the_claim_for_retry() {
        let user_id = Uuid::new_v4();
        let lead_id = Uuid::new_v4();
        let r = reminder(user_id, lead_id, now() - Duration::hours(1));
        let reminder_id = r.id;

        let store = MemStore {
            reminders: Mutex::new(vec![r]),
            leads: vec![lead(lead_id, user_id, "Acme")],
            users: vec![user(user_id, "me@example.com")],
            ..Default::default()
        };
        let mailer = RecordingMailer::failing();

        let report = run_sweep(&store, &drafter(), &mailer, "https://app.example.com")
            .await
            .unwrap();

        assert_eq!(report.processed, 0);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].reminder_id, reminder_id);
        assert!(
            store.reminders.lock().unwrap()[0].email_sent_at.is_none(),
            "claim must be released so the next run retries"
        );
    }

    #[tokio::test]
    async fn each_claim_is_stamped_at_its_own_dispatch_time() {
        let user_id = Uuid::new_v4();
        let lead_id = Uuid::new_v4();
        let store = MemStore {
            reminders: Mutex::new(vec![
                reminder(user_id, lead_id, now() - Duration::hours(2)),
                reminder(user_id, lead_id, now() - Duration::hours(1)),
            ]),
            leads: vec![lead(lead_id, user_id, "Acme")],
            users: vec![user(user_id, "me@example.com")],
            ..Default::default()
        };
        let mailer = RecordingMailer::slow();

        let report = run_sweep(&store, &drafter(), &mailer, "https://app.example.com")
            .await
            .unwrap();

        assert_eq!(report.processed, 2);
        let reminders = store.reminders.lock().unwrap();
        let first = reminders[0].email_sent_at.unwrap();
        let second = reminders[1].email_sent_at.unwrap();
        assert!(
            second > first,
            "later item must carry a later stamp, not the batch start time"
        );
    }

    #[tokio::test]
    async fn missing_lead_is_skipped_silently() {
        let user_id = Uuid::new_v4();
        let store = MemStore {
            reminders: Mutex::new(vec![reminder(
                user_id,
                Uuid::new_v4(),
                now() - Duration::hours(1),
            )]),
            leads: vec![],
            users: vec![user(user_id, "me@example.com")],
            ..Default::default()
        };
        let mailer = RecordingMailer::new();

        let report = run_sweep(&store, &drafter(), &mailer, "https://app.example.com")
            .await
            .unwrap();

        assert_eq!(report.processed, 0);
        assert!(report.failures.is_empty());
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn generated_draft_is_audited_persisted_and_mailed() {
        let user_id = Uuid::new_v4();
        let lead_id = Uuid::new_v4();
        let store = MemStore {
            reminders: Mutex::new(vec![reminder(user_id, lead_id, now() - Duration::hours(1))]),
            leads: vec![lead(lead_id, user_id, "Acme")],
            users: vec![user(user_id, "me@example.com")],
            ..Default::default()
        };
        let mailer = RecordingMailer::new();

        let report = run_sweep(&store, &drafter(), &mailer, "https://app.example.com")
            .await
            .unwrap();

        assert_eq!(report.processed, 1);
        assert_eq!(store.outreach.lock().unwrap().len(), 1);
        assert_eq!(
            store.reminders.lock().unwrap()[0].message.as_deref(),
            Some("Hi, just checking in.")
        );
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "me@example.com");
        assert!(sent[0].text.contains("Hi, just checking in."));
    }

    #[tokio::test]
    async fn failed_draft_still_delivers_the_notice() {
        let user_id = Uuid::new_v4();
        let lead_id = Uuid::new_v4();
        let store = MemStore {
            reminders: Mutex::new(vec![reminder(user_id, lead_id, now() - Duration::hours(1))]),
            leads: vec![lead(lead_id, user_id, "Acme")],
            users: vec![user(user_id, "me@example.com")],
            ..Default::default()
        };
        let mailer = RecordingMailer::new();
        let failing_drafter = StubDrafter { reply: None };

        let report = run_sweep(&store, &failing_drafter, &mailer, "https://app.example.com")
            .await
            .unwrap();

        assert_eq!(report.processed, 1);
        assert!(store.outreach.lock().unwrap().is_empty());
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(!sent[0].text.contains("Suggested message"));
    }
}
