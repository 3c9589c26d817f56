use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::lead::{LeadCreateRequest, LeadUpdateRequest},
    models::lead::Lead,
};

pub async fn insert_lead<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: LeadCreateRequest,
) -> Res<Lead> {
    sqlx::query_as::<_, Lead>(
        r#"
        INSERT INTO leads (user_id, client_name, job_title, platform, status, last_contact, notes, proposal)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(data.user_id)
    .bind(data.client_name)
    .bind(data.job_title)
    .bind(data.platform)
    .bind(data.status.encode())
    .bind(data.last_contact)
    .bind(data.notes)
    .bind(data.proposal)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Owner-scoped fetch. `None` covers both "does not exist" and "not yours".
pub async fn get_lead_scoped<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    lead_id: Uuid,
    user_id: Uuid,
) -> Res<Option<Lead>> {
    sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE id = $1 AND user_id = $2")
        .bind(lead_id)
        .bind(user_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

/// Unscoped fetch for the sweep, which resolves ownership transitively
/// through the reminder it is processing.
pub async fn get_lead_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    lead_id: Uuid,
) -> Res<Option<Lead>> {
    sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE id = $1")
        .bind(lead_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_leads_by_user_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Vec<Lead>> {
    sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE user_id = $1 ORDER BY created_at DESC")
        .bind(user_id)
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

/// Last-writer-wins partial update scoped by (id, user_id).
/// Returns `None` when no row matched the scope.
pub async fn update_lead_scoped<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    lead_id: Uuid,
    user_id: Uuid,
    data: LeadUpdateRequest,
) -> Res<Option<Lead>> {
    sqlx::query_as::<_, Lead>(
        r#"
        UPDATE leads
        SET client_name = COALESCE($3, client_name),
            job_title = COALESCE($4, job_title),
            platform = COALESCE($5, platform),
            status = COALESCE($6, status),
            last_contact = COALESCE($7, last_contact),
            notes = COALESCE($8, notes),
            proposal = COALESCE($9, proposal),
            updated_at = now()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(lead_id)
    .bind(user_id)
    .bind(data.client_name)
    .bind(data.job_title)
    .bind(data.platform)
    .bind(data.status.map(|s| s.encode()))
    .bind(data.last_contact)
    .bind(data.notes)
    .bind(data.proposal)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn delete_lead_scoped<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    lead_id: Uuid,
    user_id: Uuid,
) -> Res<bool> {
    let result = sqlx::query("DELETE FROM leads WHERE id = $1 AND user_id = $2")
        .bind(lead_id)
        .bind(user_id)
        .execute(executor)
        .await
        .map_err(AppError::from)?;
    Ok(result.rows_affected() > 0)
}
