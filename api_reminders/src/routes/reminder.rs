use std::sync::Arc;

use actix_web::{
    Responder, delete, get, patch, post,
    web::{self},
};
use ai::OpenAiDrafter;
use chrono::Utc;
use common::{
    error::{AppError, Res},
    http::Success,
    jwt::JwtClaims,
};
use db::store::PgStore;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::reminder::{CreateReminderRequest, DraftResponse, UpdateReminderRequest},
    services,
};

#[post("")]
pub async fn post_create(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
    req: web::Json<CreateReminderRequest>,
) -> Res<impl Responder> {
    let reminder =
        services::reminder::create_reminder(&pool, claims.user_id, req.into_inner()).await?;
    Success::created(reminder)
}

#[get("")]
pub async fn get_list(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let reminders = db::reminders::get_reminders_by_user_id(&***pool, claims.user_id).await?;
    Success::ok(reminders)
}

#[patch("/{id}")]
pub async fn patch_update(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateReminderRequest>,
) -> Res<impl Responder> {
    let reminder = services::reminder::update_reminder(
        &pool,
        path.into_inner(),
        claims.user_id,
        req.into_inner(),
    )
    .await?;
    Success::ok(reminder)
}

#[delete("/{id}")]
pub async fn delete_one(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
) -> Res<impl Responder> {
    services::reminder::delete_reminder(&pool, path.into_inner(), claims.user_id).await?;
    Success::no_content()
}

/// On-demand draft guarantee for one displayed reminder: generates at most
/// once, returns the existing draft otherwise. Requires AI credentials;
/// their absence is a configuration fault, not a per-item one.
#[post("/{id}/draft")]
pub async fn post_draft(
    claims: web::ReqData<JwtClaims>,
    store: web::Data<PgStore>,
    drafter: web::Data<OpenAiDrafter>,
    path: web::Path<Uuid>,
) -> Res<impl Responder> {
    if !drafter.is_configured() {
        return Err(AppError::Internal("AI_API_KEY is not configured".to_string()));
    }
    let draft = services::draft::ensure_draft(
        store.get_ref(),
        drafter.get_ref(),
        path.into_inner(),
        claims.user_id,
        Utc::now().date_naive(),
    )
    .await?;
    Success::ok(DraftResponse { draft })
}
