use actix_web::web;

pub mod routes {
    pub mod sweep;
}
pub mod services {
    pub mod sweep;
}

pub fn mount_sweep() -> actix_web::Scope {
    web::scope("/sweep").service(routes::sweep::get_run)
}
