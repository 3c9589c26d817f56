use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::lead::LeadStatus;

pub struct LeadCreateRequest {
    pub user_id: Uuid,
    pub client_name: String,
    pub job_title: String,
    pub platform: Option<String>,
    pub status: LeadStatus,
    pub last_contact: Option<NaiveDate>,
    pub notes: Option<String>,
    pub proposal: Option<String>,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Default)]
pub struct LeadUpdateRequest {
    pub client_name: Option<String>,
    pub job_title: Option<String>,
    pub platform: Option<String>,
    pub status: Option<LeadStatus>,
    pub last_contact: Option<NaiveDate>,
    pub notes: Option<String>,
    pub proposal: Option<String>,
}
