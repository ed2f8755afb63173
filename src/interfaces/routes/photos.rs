use actix_web::web;

use crate::handlers::photos;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(photos::upload_photo);
    cfg.service(photos::delete_photo);
    cfg.service(photos::get_all_photos);
}
