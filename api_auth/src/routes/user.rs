use std::sync::Arc;

use actix_web::{Responder, get, post, web};
use common::{http::Success, jwt::JwtClaims};
use sqlx::PgPool;

use crate::services;

/// Endpoint to retrieve the current authenticated user's information.
///
/// # Input
/// - `claims`: The JWT claims extracted from the authentication token
/// - `pool`: A database connection pool
///
/// # Output
/// - Success: the user's local record
/// - Error: 401 without a valid token, 404 if the user has not been synced yet
#[get("/me")]
pub async fn get_me(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> common::error::Res<impl Responder> {
    let user = services::user::get_me(&pool, claims.user_id).await?;
    Success::ok(user)
}

/// Materializes the external identity into the local users table so the
/// pipeline can resolve a delivery address. Idempotent.
#[post("/sync")]
pub async fn post_sync(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> common::error::Res<impl Responder> {
    let user = services::user::sync(&pool, claims.into_inner()).await?;
    Success::ok(user)
}
