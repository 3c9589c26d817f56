use async_trait::async_trait;
use common::env_config::AiConfig;
use serde::Deserialize;
use serde_json::{Value, json};

/// Prompt material for one follow-up draft. Callers substitute placeholders
/// ("Unknown client", "Untitled role", "None") when lead data is missing.
#[derive(Debug, Clone)]
pub struct DraftInput {
    pub client_name: String,
    pub job_title: String,
    pub last_message: String,
}

impl DraftInput {
    /// Builds prompt material from possibly-missing lead fields, applying
    /// the standard placeholders.
    pub fn with_placeholders(
        client_name: Option<&str>,
        job_title: Option<&str>,
        last_message: Option<&str>,
    ) -> Self {
        fn non_empty(value: Option<&str>) -> Option<&str> {
            value.map(str::trim).filter(|v| !v.is_empty())
        }
        Self {
            client_name: non_empty(client_name).unwrap_or("Unknown client").to_string(),
            job_title: non_empty(job_title).unwrap_or("Untitled role").to_string(),
            last_message: non_empty(last_message).unwrap_or("None").to_string(),
        }
    }
}

/// Best-effort draft generation. `None` means "no draft produced"; callers
/// never treat that as fatal, the due-date notice goes out without a
/// suggested message.
#[async_trait]
pub trait DraftGenerator: Send + Sync {
    async fn draft(&self, input: &DraftInput) -> Option<String>;
}

/// Client for an OpenAI-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct OpenAiDrafter {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiDrafter {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Whether a credential is present. The lazy-ensure endpoint refuses to
    /// run without one; the sweep just degrades to draft-less notices.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn request_body(&self, input: &DraftInput) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": build_prompt(input) }
            ],
            "max_tokens": 300,
            "temperature": 0.7,
        })
    }
}

const SYSTEM_PROMPT: &str = "You write short follow-up messages for freelancers \
checking in with prospective clients. Keep it under 120 words. Tone: warm, \
confident, offers a clear next step. Plain text only, no subject line.";

/// User-turn prompt for one draft. Pure so the shape is testable.
pub fn build_prompt(input: &DraftInput) -> String {
    format!(
        "Write a follow-up message to {} about the \"{}\" role.\n\
         Their last message to me was:\n{}",
        input.client_name, input.job_title, input.last_message
    )
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

#[async_trait]
impl DraftGenerator for OpenAiDrafter {
    async fn draft(&self, input: &DraftInput) -> Option<String> {
        if !self.is_configured() {
            log::warn!("draft generation skipped: AI_API_KEY is not configured");
            return None;
        }

        let url = format!("{}/chat/completions", self.base_url);
        let response = match self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(input))
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => {
                log::warn!("draft generation request failed: {}", error);
                return None;
            }
        };

        if !response.status().is_success() {
            log::warn!("draft generation returned status {}", response.status());
            return None;
        }

        let completion = match response.json::<CompletionResponse>().await {
            Ok(completion) => completion,
            Err(error) => {
                log::warn!("draft generation response unreadable: {}", error);
                return None;
            }
        };

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
    }
}
