use chrono::NaiveDate;
use db::models::lead::LeadStatus;
use serde::Deserialize;

/// Wire shape for lead creation. Required fields arrive as options so the
/// service can answer 400 with a field-specific message instead of a
/// deserialization error.
#[derive(Debug, Deserialize)]
pub struct CreateLeadRequest {
    pub client_name: Option<String>,
    pub job_title: Option<String>,
    pub platform: Option<String>,
    pub status: Option<LeadStatus>,
    pub last_contact: Option<NaiveDate>,
    pub notes: Option<String>,
    pub proposal: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateLeadRequest {
    pub client_name: Option<String>,
    pub job_title: Option<String>,
    pub platform: Option<String>,
    pub status: Option<LeadStatus>,
    pub last_contact: Option<NaiveDate>,
    pub notes: Option<String>,
    pub proposal: Option<String>,
}
