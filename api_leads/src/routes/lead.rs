use std::sync::Arc;

use actix_web::{
    Responder, delete, get, patch, post,
    web::{self},
};
use common::{error::Res, http::Success, jwt::JwtClaims};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::lead::{CreateLeadRequest, UpdateLeadRequest},
    services,
};

#[post("")]
pub async fn post_create(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
    req: web::Json<CreateLeadRequest>,
) -> Res<impl Responder> {
    let lead = services::lead::create_lead(&pool, claims.user_id, req.into_inner()).await?;
    Success::created(lead)
}

#[get("")]
pub async fn get_list(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let leads = db::leads::get_leads_by_user_id(&***pool, claims.user_id).await?;
    Success::ok(leads)
}

#[get("/{id}")]
pub async fn get_one(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
) -> Res<impl Responder> {
    let lead = services::lead::get_lead(&pool, path.into_inner(), claims.user_id).await?;
    Success::ok(lead)
}

#[patch("/{id}")]
pub async fn patch_update(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateLeadRequest>,
) -> Res<impl Responder> {
    let lead =
        services::lead::update_lead(&pool, path.into_inner(), claims.user_id, req.into_inner())
            .await?;
    Success::ok(lead)
}

#[delete("/{id}")]
pub async fn delete_one(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
) -> Res<impl Responder> {
    services::lead::delete_lead(&pool, path.into_inner(), claims.user_id).await?;
    Success::no_content()
}
