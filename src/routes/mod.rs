use actix_web::web;

pub mod account;
pub mod ban;
pub mod health;
pub mod notice;
pub mod services;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/health").service(health::health)
    );
    cfg.service(account::register::register)
        .service(account::confirm::confirm)
        .service(account::approve::approve)
        .service(account::login::login)
        .service(account::logout::logout)
        .service(notice::pop_notice)
        .service(ban::ban)
        .service(services::services)
        .service(services::nextcloud)
        .service(services::jellyfin)
        .service(services::ghostblog);
}
