use actix_web::web;

pub mod routes {
    pub mod lead;
}
mod services {
    pub(crate) mod lead;
}
pub mod dtos {
    pub mod lead;
}

pub fn mount_leads() -> actix_web::Scope {
    web::scope("/leads")
        .service(routes::lead::post_create)
        .service(routes::lead::get_list)
        .service(routes::lead::get_one)
        .service(routes::lead::patch_update)
        .service(routes::lead::delete_one)
}
