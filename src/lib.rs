mod domain;
mod infrastructure;
mod interfaces;

pub mod constants;
pub mod errors;
pub mod graceful_shutdown;
pub mod settings;

pub use domain::{entities, use_cases};
pub use infrastructure::{auth, db, storage};
pub use interfaces::{handlers, repositories, routes};

use crate::auth::jwt::JwtService;
use crate::repositories::sqlx_repo::{SqlxPhotoRepo, SqlxSurveyorRepo};
use crate::storage::cloudinary::CloudinaryStorage;
use crate::use_cases::{accounts::AccountHandler, auth::AuthHandler, photos::PhotoHandler};

pub type AppAuthHandler = AuthHandler<SqlxSurveyorRepo, JwtService>;
pub type AppAccountHandler = AccountHandler<SqlxSurveyorRepo, SqlxPhotoRepo, CloudinaryStorage>;
pub type AppPhotoHandler = PhotoHandler<SqlxPhotoRepo, CloudinaryStorage>;

/// Per-process wiring. Every collaborator is constructed here and handed
/// to the use-case handlers explicitly, so tests can assemble the same
/// handlers around fakes.
pub struct AppState {
    pub auth_handler: AppAuthHandler,
    pub account_handler: AppAccountHandler,
    pub photo_handler: AppPhotoHandler,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Self {
        let jwt_service = JwtService::new(config);
        let surveyor_repo = SqlxSurveyorRepo::new(pool.clone());
        let photo_repo = SqlxPhotoRepo::new(pool);
        let cloudinary = CloudinaryStorage::new(config);

        AppState {
            auth_handler: AuthHandler::new(surveyor_repo.clone(), jwt_service),
            account_handler: AccountHandler::new(
                surveyor_repo,
                photo_repo.clone(),
                cloudinary.clone(),
                config.profile_folder.clone(),
            ),
            photo_handler: PhotoHandler::new(photo_repo, cloudinary, config.capture_folder.clone()),
        }
    }
}
