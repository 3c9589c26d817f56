use std::sync::Arc;

use actix_web::{HttpRequest, Responder, get, web};
use ai::OpenAiDrafter;
use common::{
    env_config::Config,
    error::{AppError, Res},
    http::Success,
};
use db::store::PgStore;
use mailer::HttpMailer;

use crate::services;

/// Trigger for one sweep invocation, called by an external scheduler.
///
/// Authorization happens before any work: the configured shared secret must
/// arrive in the `x-sweep-secret` header or as a bearer token. An empty
/// configured secret skips the check. Missing email configuration fails the
/// whole invocation with the list of unset variables.
#[get("/run")]
pub async fn get_run(
    req: HttpRequest,
    config: web::Data<Arc<Config>>,
    store: web::Data<PgStore>,
    drafter: web::Data<OpenAiDrafter>,
    mailer: web::Data<HttpMailer>,
) -> Res<impl Responder> {
    authorize(&req, &config.sweep_secret)?;

    if !mailer.is_configured() {
        return Err(AppError::Internal(format!(
            "Missing required configuration: {}",
            mailer.missing_config().join(", ")
        )));
    }

    let report = services::sweep::run_sweep(
        store.get_ref(),
        drafter.get_ref(),
        mailer.get_ref(),
        &config.app_base_url,
    )
    .await?;
    Success::ok(report)
}

fn authorize(req: &HttpRequest, secret: &str) -> Res<()> {
    if secret.is_empty() {
        // no secret configured: trusted scheduler, open endpoint
        return Ok(());
    }

    let supplied = req
        .headers()
        .get("x-sweep-secret")
        .and_then(|h| h.to_str().ok())
        .or_else(|| {
            req.headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
        });

    if supplied == Some(secret) {
        Ok(())
    } else {
        Err(AppError::Unauthorized("Invalid sweep secret".to_string()))
    }
}
