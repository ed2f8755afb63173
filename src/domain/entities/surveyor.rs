use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Surveyor {
    pub id: Uuid,
    pub surveyor_id: String,
    pub fullname: String,
    pub email: String,
    pub password_hash: String,
    pub profile_photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct SurveyorInsert {
    pub surveyor_id: String,
    pub fullname: String,
    pub email: String,
    pub password_hash: String,
    pub profile_photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewSurveyor {
    #[serde(default)]
    #[validate(length(min = 1, message = "Full name is required"))]
    pub fullname: String,

    #[serde(default)]
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Invalid email format")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Surveyor ID is required"))]
    pub surveyor_id: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[serde(default)]
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

impl NewSurveyor {
    pub fn prepare_for_insert(&self, password_hash: String) -> SurveyorInsert {
        SurveyorInsert {
            surveyor_id: normalize_surveyor_id(&self.surveyor_id),
            fullname: self.fullname.trim().to_string(),
            email: normalize_email(&self.email),
            password_hash,
            profile_photo_url: None,
            created_at: Utc::now(),
        }
    }
}

/// The email is the identity field, stored lowercased and trimmed.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn normalize_surveyor_id(surveyor_id: &str) -> String {
    surveyor_id.trim().to_string()
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub surveyor_id: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisteredResponse {
    pub id: Uuid,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAccountRequest {
    #[serde(default)]
    pub surveyor_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePhotoQuery {
    #[serde(default)]
    pub surveyor_id: String,
}

#[derive(Debug, MultipartForm)]
pub struct ProfilePhotoUpload {
    #[multipart(rename = "profilePhoto", limit = "5MB")]
    pub profile_photo: TempFile,

    #[multipart(rename = "surveyorId")]
    pub surveyor_id: Text<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_lowercased_and_trimmed() {
        assert_eq!(normalize_email("  Surveyor@Example.COM "), "surveyor@example.com");
    }

    #[test]
    fn registration_requires_matching_passwords() {
        let request = NewSurveyor {
            fullname: "A".into(),
            email: "a@example.com".into(),
            surveyor_id: "S1".into(),
            password: "p".into(),
            confirm_password: "q".into(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn registration_requires_all_fields() {
        let request = NewSurveyor {
            fullname: String::new(),
            email: String::new(),
            surveyor_id: String::new(),
            password: String::new(),
            confirm_password: String::new(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().len() >= 4);
    }
}
