use crate::errors::AppError;
use crate::repositories::photo::PhotoRepository;
use crate::repositories::surveyor::SurveyorRepository;
use crate::storage::{BlobStorage, ImagePayload, UploadedBlob};

pub struct AccountHandler<R, P, B>
where
    R: SurveyorRepository,
    P: PhotoRepository,
    B: BlobStorage,
{
    pub surveyor_repo: R,
    pub photo_repo: P,
    pub storage: B,
    profile_folder: String,
}

impl<R, P, B> AccountHandler<R, P, B>
where
    R: SurveyorRepository,
    P: PhotoRepository,
    B: BlobStorage,
{
    pub fn new(surveyor_repo: R, photo_repo: P, storage: B, profile_folder: String) -> Self {
        AccountHandler {
            surveyor_repo,
            photo_repo,
            storage,
            profile_folder,
        }
    }

    /// Removes the account and every photo record it owns. The cascade is
    /// application-level: photo records go first, then the account row.
    /// Backing blobs are left behind.
    pub async fn delete_account(&self, surveyor_id: &str) -> Result<(), AppError> {
        let surveyor_id = surveyor_id.trim();
        if surveyor_id.is_empty() {
            return Err(AppError::ValidationError("Surveyor ID is required".into()));
        }

        let removed = self.photo_repo.delete_photos_by_surveyor(surveyor_id).await?;
        self.surveyor_repo.delete_surveyor(surveyor_id).await?;

        tracing::info!(surveyor_id, photos_removed = removed, "account deleted");
        Ok(())
    }

    /// Stores a new profile image and points the account at it. A previous
    /// profile blob, if any, is not destroyed.
    pub async fn upload_profile_photo(
        &self,
        surveyor_id: &str,
        file_bytes: Vec<u8>,
    ) -> Result<UploadedBlob, AppError> {
        let surveyor_id = surveyor_id.trim();
        if surveyor_id.is_empty() {
            return Err(AppError::ValidationError("Surveyor ID is required".into()));
        }
        if file_bytes.is_empty() {
            return Err(AppError::ValidationError("Profile photo file is required".into()));
        }
        if !infer::is_image(&file_bytes) {
            return Err(AppError::ValidationError(
                "Profile photo must be an image file".into(),
            ));
        }

        let blob = self
            .storage
            .upload(&ImagePayload::Bytes(file_bytes), &self.profile_folder)
            .await?;

        self.surveyor_repo
            .update_profile_photo(surveyor_id, &blob.url)
            .await?;

        tracing::info!(surveyor_id, image_id = %blob.id, "profile photo updated");
        Ok(blob)
    }

    /// Returns the account's profile photo URL, empty if none has been set.
    pub async fn get_profile_photo(&self, surveyor_id: &str) -> Result<String, AppError> {
        let surveyor = self
            .surveyor_repo
            .find_by_surveyor_id(surveyor_id.trim())
            .await?
            .ok_or_else(|| AppError::NotFound("Surveyor not found".into()))?;

        Ok(surveyor.profile_photo_url.unwrap_or_default())
    }
}
