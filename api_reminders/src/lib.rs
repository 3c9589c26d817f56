use actix_web::web;

pub mod routes {
    pub mod feed;
    pub mod reminder;
}
pub mod services {
    pub mod draft;
    pub(crate) mod feed;
    pub(crate) mod reminder;
}
pub mod dtos {
    pub mod reminder;
}

pub fn mount_reminders() -> actix_web::Scope {
    web::scope("/reminders")
        .service(routes::reminder::post_create)
        .service(routes::reminder::get_list)
        .service(routes::reminder::patch_update)
        .service(routes::reminder::delete_one)
        .service(routes::reminder::post_draft)
}

pub fn mount_notifications() -> actix_web::Scope {
    web::scope("/notifications").service(routes::feed::get_notifications)
}
