use common::error::{AppError, Res};
use db::{
    dtos::lead::{LeadCreateRequest, LeadUpdateRequest},
    models::lead::{Lead, LeadStatus},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::lead::{CreateLeadRequest, UpdateLeadRequest};

pub async fn create_lead(pool: &PgPool, user_id: Uuid, req: CreateLeadRequest) -> Res<Lead> {
    let client_name = req
        .client_name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("client_name is required".to_string()))?;
    let job_title = req
        .job_title
        .filter(|title| !title.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("job_title is required".to_string()))?;

    db::leads::insert_lead(
        pool,
        LeadCreateRequest {
            user_id,
            client_name,
            job_title,
            platform: req.platform,
            status: req.status.unwrap_or(LeadStatus::New),
            last_contact: req.last_contact,
            notes: req.notes,
            proposal: req.proposal,
        },
    )
    .await
}

pub async fn get_lead(pool: &PgPool, lead_id: Uuid, user_id: Uuid) -> Res<Lead> {
    db::leads::get_lead_scoped(pool, lead_id, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Lead not found".to_string()))
}

/// 404 both for a nonexistent lead and for another user's lead; existence is
/// never leaked through a different status.
pub async fn update_lead(
    pool: &PgPool,
    lead_id: Uuid,
    user_id: Uuid,
    req: UpdateLeadRequest,
) -> Res<Lead> {
    db::leads::update_lead_scoped(
        pool,
        lead_id,
        user_id,
        LeadUpdateRequest {
            client_name: req.client_name,
            job_title: req.job_title,
            platform: req.platform,
            status: req.status,
            last_contact: req.last_contact,
            notes: req.notes,
            proposal: req.proposal,
        },
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Lead not found".to_string()))
}

pub async fn delete_lead(pool: &PgPool, lead_id: Uuid, user_id: Uuid) -> Res<()> {
    let deleted = db::leads::delete_lead_scoped(pool, lead_id, user_id).await?;
    if deleted {
        Ok(())
    } else {
        Err(AppError::NotFound("Lead not found".to_string()))
    }
}
