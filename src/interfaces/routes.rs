use actix_web::web;

use crate::handlers::{home::home, system::health_check};

mod accounts;
mod auth;
mod photos;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);
    cfg.service(health_check);

    cfg.configure(auth::config_routes);
    cfg.configure(accounts::config_routes);
    cfg.configure(photos::config_routes);
}
