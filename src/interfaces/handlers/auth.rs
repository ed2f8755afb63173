use actix_web::{post, web, HttpResponse, Responder};

use crate::entities::surveyor::{LoginRequest, NewSurveyor};
use crate::AppState;

#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<NewSurveyor>,
) -> impl Responder {
    match state.auth_handler.register(body.into_inner()).await {
        Ok(response) => HttpResponse::Created().json(response),
        Err(e) => e.to_http_response(),
    }
}

#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> impl Responder {
    match state.auth_handler.login(body.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.to_http_response(),
    }
}
