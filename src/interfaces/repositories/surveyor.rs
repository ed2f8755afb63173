use async_trait::async_trait;
use std::borrow::Cow;
use uuid::Uuid;

use crate::{
    entities::surveyor::{Surveyor, SurveyorInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxSurveyorRepo,
};

#[async_trait]
pub trait SurveyorRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;
    async fn find_by_surveyor_id(&self, surveyor_id: &str) -> Result<Option<Surveyor>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Surveyor>, AppError>;
    async fn create_surveyor(&self, surveyor: &SurveyorInsert) -> Result<Uuid, AppError>;
    async fn update_profile_photo(&self, surveyor_id: &str, url: &str) -> Result<(), AppError>;
    async fn delete_surveyor(&self, surveyor_id: &str) -> Result<(), AppError>;
}

impl SqlxSurveyorRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxSurveyorRepo { pool }
    }
}

#[async_trait]
impl SurveyorRepository for SqlxSurveyorRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn find_by_surveyor_id(&self, surveyor_id: &str) -> Result<Option<Surveyor>, AppError> {
        sqlx::query_as::<_, Surveyor>("SELECT * FROM surveyors WHERE surveyor_id = $1")
            .bind(surveyor_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Surveyor>, AppError> {
        sqlx::query_as::<_, Surveyor>("SELECT * FROM surveyors WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn create_surveyor(&self, surveyor: &SurveyorInsert) -> Result<Uuid, AppError> {
        // The unique indexes do the duplicate checking; a violation comes
        // back as 23505 and is mapped by constraint name.
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO surveyors (
                surveyor_id,
                fullname,
                email,
                password_hash,
                profile_photo_url,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6) RETURNING id
            "#,
        )
        .bind(&surveyor.surveyor_id)
        .bind(&surveyor.fullname)
        .bind(&surveyor.email)
        .bind(&surveyor.password_hash)
        .bind(&surveyor.profile_photo_url)
        .bind(surveyor.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23505")) => {
                match db_err.constraint() {
                    Some("surveyors_surveyor_id_key") => {
                        AppError::DuplicateKey("Surveyor ID already exists".to_string())
                    }
                    Some("surveyors_email_key") => {
                        AppError::DuplicateKey("Email already exists".to_string())
                    }
                    _ => AppError::DuplicateKey("Surveyor already exists".to_string()),
                }
            }
            _ => AppError::from(e),
        })?;

        Ok(id)
    }

    async fn update_profile_photo(&self, surveyor_id: &str, url: &str) -> Result<(), AppError> {
        // Unconditional field update; an unknown id is a no-op, not an error.
        sqlx::query("UPDATE surveyors SET profile_photo_url = $2 WHERE surveyor_id = $1")
            .bind(surveyor_id)
            .bind(url)
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn delete_surveyor(&self, surveyor_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM surveyors WHERE surveyor_id = $1")
            .bind(surveyor_id)
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }
}
