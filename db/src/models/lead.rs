use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pipeline position of a lead. One canonical in-memory form; the storage
/// encoding (uppercase underscored) and the wire encoding (kebab-case) are
/// produced only at the serialization boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeadStatus {
    New,
    Proposal,
    Waiting,
    FollowUp,
    Won,
    Lost,
}

impl LeadStatus {
    /// Storage encoding used in the `leads.status` column.
    pub fn encode(&self) -> &'static str {
        match self {
            LeadStatus::New => "NEW",
            LeadStatus::Proposal => "PROPOSAL",
            LeadStatus::Waiting => "WAITING",
            LeadStatus::FollowUp => "FOLLOW_UP",
            LeadStatus::Won => "WON",
            LeadStatus::Lost => "LOST",
        }
    }
}

#[derive(Debug)]
pub struct ParseLeadStatusError(String);

impl fmt::Display for ParseLeadStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown lead status: {}", self.0)
    }
}

impl std::error::Error for ParseLeadStatusError {}

impl TryFrom<String> for LeadStatus {
    type Error = ParseLeadStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "NEW" => Ok(LeadStatus::New),
            "PROPOSAL" => Ok(LeadStatus::Proposal),
            "WAITING" => Ok(LeadStatus::Waiting),
            "FOLLOW_UP" => Ok(LeadStatus::FollowUp),
            "WON" => Ok(LeadStatus::Won),
            "LOST" => Ok(LeadStatus::Lost),
            _ => Err(ParseLeadStatusError(value)),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Lead {
    pub id: Uuid,
    pub user_id: Uuid,
    pub client_name: String,
    pub job_title: String,
    pub platform: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: LeadStatus,
    pub last_contact: Option<NaiveDate>,
    pub notes: Option<String>,
    pub proposal: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_storage_encoding() {
        for status in [
            LeadStatus::New,
            LeadStatus::Proposal,
            LeadStatus::Waiting,
            LeadStatus::FollowUp,
            LeadStatus::Won,
            LeadStatus::Lost,
        ] {
            let decoded = LeadStatus::try_from(status.encode().to_string()).unwrap();
            assert_eq!(decoded, status);
        }
    }

    #[test]
    fn status_wire_encoding_is_kebab_case() {
        let json = serde_json::to_string(&LeadStatus::FollowUp).unwrap();
        assert_eq!(json, "\"follow-up\"");
        let back: LeadStatus = serde_json::from_str("\"follow-up\"").unwrap();
        assert_eq!(back, LeadStatus::FollowUp);
    }

    #[test]
    fn unknown_storage_value_is_rejected() {
        assert!(LeadStatus::try_from("follow-up".to_string()).is_err());
        assert!(LeadStatus::try_from("ARCHIVED".to_string()).is_err());
    }
}
