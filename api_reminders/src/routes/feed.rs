use actix_web::{Responder, get, web};
use chrono::Utc;
use common::{error::Res, http::Success, jwt::JwtClaims};
use db::store::PgStore;

use crate::{dtos::reminder::FeedQuery, services};

/// Near-real-time notices for the authenticated user: due, unsent reminders
/// joined with lead display fields. Polled by the client.
#[get("")]
pub async fn get_notifications(
    claims: web::ReqData<JwtClaims>,
    store: web::Data<PgStore>,
    query: web::Query<FeedQuery>,
) -> Res<impl Responder> {
    let limit = services::feed::clamp_limit(query.limit);
    let feed = services::feed::due_notifications(
        store.get_ref(),
        claims.user_id,
        Utc::now().naive_utc(),
        limit,
    )
    .await?;
    Success::ok(feed)
}
