use actix_web::web;
use middleware::auth::AuthMiddleware;

pub mod middleware {
    pub mod auth;
}
pub mod routes {
    pub mod user;
}
mod services {
    pub(crate) mod user;
}

pub fn auth_middleware() -> AuthMiddleware {
    AuthMiddleware::new()
}

pub fn mount_user() -> actix_web::Scope {
    web::scope("/user")
        .service(routes::user::get_me)
        .service(routes::user::post_sync)
}
