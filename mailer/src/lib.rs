use async_trait::async_trait;
use chrono::NaiveDateTime;
use common::{
    env_config::EmailConfig,
    error::{AppError, Res},
};
use serde_json::json;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// Transactional email dispatch. Failures come back as explicit errors so
/// callers record them instead of silently losing sends.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Res<()>;
}

/// Client for a Resend-style transactional email API
/// (`POST {base}/emails` with a bearer key).
#[derive(Clone)]
pub struct HttpMailer {
    http: reqwest::Client,
    api_key: String,
    from_address: String,
    base_url: String,
}

impl HttpMailer {
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            from_address: config.from_address.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.from_address.is_empty()
    }

    /// Names of the unset variables this mailer needs, for the sweep's
    /// fail-fast configuration report.
    pub fn missing_config(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_key.is_empty() {
            missing.push("EMAIL_API_KEY");
        }
        if self.from_address.is_empty() {
            missing.push("EMAIL_FROM");
        }
        missing
    }
}

#[async_trait]
impl EmailSender for HttpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Res<()> {
        let url = format!("{}/emails", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "from": self.from_address,
                "to": [email.to],
                "subject": email.subject,
                "text": email.text,
            }))
            .send()
            .await?;

        if response.status().is_success() {
            log::info!("reminder email sent to {}", email.to);
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("email send failed ({}): {}", status, body);
            Err(AppError::Internal(format!(
                "Email provider returned {}: {}",
                status, body
            )))
        }
    }
}

/// Builds the due-notice email for one reminder: client, role, formatted due
/// date, a deep link back to the lead, and the draft when one exists.
pub fn compose_reminder_email(
    app_base_url: &str,
    client_name: &str,
    job_title: &str,
    remind_at: NaiveDateTime,
    lead_id: Uuid,
    draft: Option<&str>,
) -> (String, String) {
    let subject = format!("Follow up with {}", client_name);
    let due_date = remind_at.format("%B %-d, %Y");
    let link = format!("{}/leads/{}", app_base_url.trim_end_matches('/'), lead_id);

    let mut body = format!(
        "Your follow-up with {} about \"{}\" is due ({}).\n\nOpen the lead: {}\n",
        client_name, job_title, due_date, link
    );
    if let Some(draft) = draft {
        body.push_str(&format!("\nSuggested message:\n\n{}\n", draft));
    }

    (subject, body)
}
