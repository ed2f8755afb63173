mod common;

use actix_web::{error::ResponseError, http::StatusCode};
use common::*;
use uuid::Uuid;

use roadwatch_backend::auth::jwt::JwtService;
use roadwatch_backend::auth::password::hash_password;
use roadwatch_backend::entities::surveyor::{LoginRequest, NewSurveyor};
use roadwatch_backend::errors::{AppError, AuthError};
use roadwatch_backend::use_cases::auth::AuthHandler;

fn registration(surveyor_id: &str, email: &str, password: &str) -> NewSurveyor {
    NewSurveyor {
        fullname: "Ada Okafor".to_string(),
        email: email.to_string(),
        surveyor_id: surveyor_id.to_string(),
        password: password.to_string(),
        confirm_password: password.to_string(),
    }
}

#[tokio::test]
async fn register_hashes_the_password_and_normalizes_identity() {
    let mut repo = MockSurveyorRepo::new();
    repo.expect_create_surveyor()
        .withf(|s| {
            s.surveyor_id == "SVR-001"
                && s.email == "ada@example.com"
                && s.password_hash.starts_with("$argon2id$")
                && s.password_hash != "hunter2!"
        })
        .returning(|_| Ok(Uuid::new_v4()));

    let handler = AuthHandler::new(repo, JwtService::new(&test_config()));

    let response = handler
        .register(registration(" SVR-001 ", "Ada@Example.COM", "hunter2!"))
        .await
        .expect("registration should succeed");

    assert_eq!(response.message, "Surveyor registered successfully");
}

#[tokio::test]
async fn register_rejects_mismatched_passwords_without_touching_the_store() {
    let repo = MockSurveyorRepo::new();
    let handler = AuthHandler::new(repo, JwtService::new(&test_config()));

    let mut request = registration("SVR-001", "ada@example.com", "hunter2!");
    request.confirm_password = "something else".to_string();

    let err = handler.register(request).await.unwrap_err();

    assert!(matches!(err, AppError::ValidationError(_)));
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_rejects_missing_fields() {
    let repo = MockSurveyorRepo::new();
    let handler = AuthHandler::new(repo, JwtService::new(&test_config()));

    let err = handler
        .register(NewSurveyor {
            fullname: String::new(),
            email: String::new(),
            surveyor_id: String::new(),
            password: String::new(),
            confirm_password: String::new(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn register_surfaces_duplicate_surveyor_id_as_bad_request() {
    let mut repo = MockSurveyorRepo::new();
    repo.expect_create_surveyor()
        .returning(|_| Err(AppError::DuplicateKey("Surveyor ID already exists".into())));

    let handler = AuthHandler::new(repo, JwtService::new(&test_config()));

    let err = handler
        .register(registration("SVR-001", "ada@example.com", "hunter2!"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::DuplicateKey(ref msg) if msg == "Surveyor ID already exists"));
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_issues_a_token_carrying_the_surveyor_id() {
    let password_hash = hash_password("hunter2!").unwrap();
    let mut repo = MockSurveyorRepo::new();
    repo.expect_find_by_surveyor_id()
        .withf(|id| id == "SVR-001")
        .returning(move |_| Ok(Some(surveyor_with_hash("SVR-001", &password_hash))));

    let jwt_service = JwtService::new(&test_config());
    let handler = AuthHandler::new(repo, jwt_service.clone());

    let response = handler
        .login(LoginRequest {
            surveyor_id: " SVR-001 ".to_string(),
            password: "hunter2!".to_string(),
        })
        .await
        .expect("login should succeed");

    assert_eq!(response.token_type, "Bearer");
    assert_eq!(response.surveyor_id, "SVR-001");
    assert_eq!(response.email, "ada@example.com");
    assert_eq!(response.profile_photo_url, "");

    let decoded = jwt_service.decode_jwt(&response.token).unwrap();
    assert_eq!(decoded.claims.sub, "SVR-001");
}

#[tokio::test]
async fn unknown_id_and_wrong_password_are_indistinguishable() {
    let mut unknown_repo = MockSurveyorRepo::new();
    unknown_repo
        .expect_find_by_surveyor_id()
        .returning(|_| Ok(None));

    let handler = AuthHandler::new(unknown_repo, JwtService::new(&test_config()));
    let unknown_err = handler
        .login(LoginRequest {
            surveyor_id: "NO-SUCH-ID".to_string(),
            password: "whatever".to_string(),
        })
        .await
        .unwrap_err();

    let password_hash = hash_password("correct password").unwrap();
    let mut known_repo = MockSurveyorRepo::new();
    known_repo
        .expect_find_by_surveyor_id()
        .returning(move |_| Ok(Some(surveyor_with_hash("SVR-001", &password_hash))));

    let handler = AuthHandler::new(known_repo, JwtService::new(&test_config()));
    let wrong_password_err = handler
        .login(LoginRequest {
            surveyor_id: "SVR-001".to_string(),
            password: "wrong password".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(unknown_err, AuthError::InvalidCredentials));
    assert!(matches!(wrong_password_err, AuthError::InvalidCredentials));
    assert_eq!(unknown_err.to_string(), wrong_password_err.to_string());
    assert_eq!(unknown_err.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(wrong_password_err.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn store_failure_during_login_keeps_the_uniform_message() {
    let mut repo = MockSurveyorRepo::new();
    repo.expect_find_by_surveyor_id()
        .returning(|_| Err(AppError::UpstreamFailure("connection reset".into())));

    let handler = AuthHandler::new(repo, JwtService::new(&test_config()));

    let err = handler
        .login(LoginRequest {
            surveyor_id: "SVR-001".to_string(),
            password: "hunter2!".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn login_requires_both_fields() {
    let repo = MockSurveyorRepo::new();
    let handler = AuthHandler::new(repo, JwtService::new(&test_config()));

    let err = handler
        .login(LoginRequest {
            surveyor_id: "SVR-001".to_string(),
            password: String::new(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::MissingCredentials));
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
}
