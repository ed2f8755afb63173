use validator::Validate;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::TokenService;
use crate::entities::surveyor::{normalize_surveyor_id, LoginRequest, NewSurveyor, RegisteredResponse};
use crate::entities::token::LoginResponse;
use crate::errors::{AppError, AuthError};
use crate::repositories::surveyor::SurveyorRepository;

pub struct AuthHandler<R, T>
where
    R: SurveyorRepository,
    T: TokenService,
{
    pub surveyor_repo: R,
    pub token_service: T,
}

impl<R, T> AuthHandler<R, T>
where
    R: SurveyorRepository,
    T: TokenService,
{
    pub fn new(surveyor_repo: R, token_service: T) -> Self {
        AuthHandler {
            surveyor_repo,
            token_service,
        }
    }

    /// Registers a new surveyor after validation and password hashing.
    /// Uniqueness of the surveyor id and email is enforced by the insert
    /// itself; a duplicate comes back as `DuplicateKey`.
    pub async fn register(&self, request: NewSurveyor) -> Result<RegisteredResponse, AppError> {
        request.validate()?;

        let password_hash = hash_password(&request.password)?;
        let insert = request.prepare_for_insert(password_hash);

        let id = self.surveyor_repo.create_surveyor(&insert).await?;

        tracing::info!(surveyor_id = %insert.surveyor_id, "surveyor registered");
        Ok(RegisteredResponse {
            id,
            message: "Surveyor registered successfully".to_string(),
        })
    }

    /// Checks credentials and issues a bearer token. Unknown id and wrong
    /// password are indistinguishable from the outside.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AuthError> {
        request.validate()?;

        let surveyor = self
            .surveyor_repo
            .find_by_surveyor_id(&normalize_surveyor_id(&request.surveyor_id))
            .await
            .map_err(|_| AuthError::InvalidCredentials)?
            .ok_or(AuthError::InvalidCredentials)?;

        let password_valid = verify_password(&request.password, &surveyor.password_hash)?;
        if !password_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self
            .token_service
            .create_jwt(&surveyor.surveyor_id)
            .map_err(|e| {
                tracing::warn!("failed to create JWT: {}", e);
                AuthError::TokenCreation
            })?;

        tracing::info!(surveyor_id = %surveyor.surveyor_id, "surveyor logged in");
        Ok(LoginResponse::new(token, &surveyor))
    }
}
