use actix_web::{delete, get, post, web, HttpResponse, Responder};
use uuid::Uuid;

use crate::entities::photo::{ListPhotosQuery, NewPhoto};
use crate::errors::AppError;
use crate::AppState;

#[post("/upload-photo")]
pub async fn upload_photo(
    state: web::Data<AppState>,
    body: web::Json<NewPhoto>,
) -> impl Responder {
    match state.photo_handler.upload_photo(body.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.to_http_response(),
    }
}

#[delete("/delete-photo/{id}")]
pub async fn delete_photo(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    // A non-UUID path segment cannot name a stored photo.
    let id = match Uuid::parse_str(&path.into_inner()) {
        Ok(id) => id,
        Err(_) => return AppError::NotFound("Photo not found".into()).to_http_response(),
    };

    match state.photo_handler.delete_photo(&id).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Photo deleted successfully"
        })),
        Err(e) => e.to_http_response(),
    }
}

#[get("/get-all-photos")]
pub async fn get_all_photos(
    state: web::Data<AppState>,
    query: web::Query<ListPhotosQuery>,
) -> impl Responder {
    match state.photo_handler.list_photos(query.into_inner()).await {
        Ok(photos) => HttpResponse::Ok().json(photos),
        Err(e) => e.to_http_response(),
    }
}
