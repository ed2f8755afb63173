use actix_web::web;

use crate::handlers::accounts;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(accounts::delete_account);
    cfg.service(accounts::upload_profile_photo);
    cfg.service(accounts::get_profile_photo);
}
