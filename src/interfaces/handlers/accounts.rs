use actix_multipart::form::MultipartForm;
use actix_web::{delete, get, http::StatusCode, post, web, HttpResponse, Responder};

use crate::entities::surveyor::{DeleteAccountRequest, ProfilePhotoQuery, ProfilePhotoUpload};
use crate::handlers::json_error::json_error;
use crate::AppState;

#[delete("/delete-account")]
pub async fn delete_account(
    state: web::Data<AppState>,
    body: web::Json<DeleteAccountRequest>,
) -> impl Responder {
    match state.account_handler.delete_account(&body.surveyor_id).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Account and all associated photos deleted"
        })),
        Err(e) => e.to_http_response(),
    }
}

#[post("/upload-profile-photo")]
pub async fn upload_profile_photo(
    state: web::Data<AppState>,
    form: Result<MultipartForm<ProfilePhotoUpload>, actix_web::Error>,
) -> impl Responder {
    // A malformed or incomplete multipart body never reaches the use case.
    let form = match form {
        Ok(form) => form.into_inner(),
        Err(_) => {
            return json_error(
                StatusCode::BAD_REQUEST,
                "profilePhoto file and surveyorId are required",
            )
        }
    };

    let file_bytes = match tokio::fs::read(form.profile_photo.file.path()).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("failed to read uploaded temp file: {}", e);
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    };

    match state
        .account_handler
        .upload_profile_photo(&form.surveyor_id, file_bytes)
        .await
    {
        Ok(blob) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Profile photo updated",
            "photoUrl": blob.url
        })),
        Err(e) => e.to_http_response(),
    }
}

#[get("/get-profile-photo")]
pub async fn get_profile_photo(
    state: web::Data<AppState>,
    query: web::Query<ProfilePhotoQuery>,
) -> impl Responder {
    match state
        .account_handler
        .get_profile_photo(&query.surveyor_id)
        .await
    {
        Ok(url) => HttpResponse::Ok().json(serde_json::json!({ "profilePhotoUrl": url })),
        Err(e) => e.to_http_response(),
    }
}
