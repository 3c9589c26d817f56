mod cors;

use actix_web::{
    App, HttpServer,
    web::{self},
};
use ai::OpenAiDrafter;
use common::env_config::Config;
use db::store::PgStore;
use mailer::HttpMailer;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();
    let config_data = config.clone();

    // get info
    let is_production = config.environment == "production";
    let origin = config.cors_allowed_origin.clone();

    // init logger
    if config.console_logging_enabled {
        logger::setup().expect("Failed to set up logger");
    }

    // init db connection
    let pool = db::setup(&config.database_url, is_production)
        .await
        .expect("Failed to set up database");

    // external capability clients, injected into handlers rather than
    // constructed per call
    let store = PgStore::new(pool.clone());
    let drafter = OpenAiDrafter::new(&config.ai);
    let mailer = HttpMailer::new(&config.email);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config_data.clone()))
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(drafter.clone()))
            .app_data(web::Data::new(mailer.clone()))
            .wrap(logger::middleware()) // 3rd
            .wrap(extractor::middleware()) // 2nd
            .wrap(cors::middleware(&origin)) // 1st
            .service(
                web::scope("/api")
                    .service(sweeper::mount_sweep())
                    .service(
                        web::scope("/dashboard")
                            .wrap(api_auth::auth_middleware())
                            .service(api_auth::mount_user())
                            .service(api_leads::mount_leads())
                            .service(api_reminders::mount_reminders())
                            .service(api_reminders::mount_notifications()),
                    ),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
