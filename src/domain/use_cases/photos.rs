use uuid::Uuid;
use validator::Validate;

use crate::entities::photo::{
    ListPhotosQuery, NewPhoto, PhotoFilter, PhotoResponse, PhotoUploadedResponse,
};
use crate::errors::AppError;
use crate::repositories::photo::PhotoRepository;
use crate::storage::{BlobStorage, ImagePayload};

pub struct PhotoHandler<P, B>
where
    P: PhotoRepository,
    B: BlobStorage,
{
    pub photo_repo: P,
    pub storage: B,
    capture_folder: String,
}

impl<P, B> PhotoHandler<P, B>
where
    P: PhotoRepository,
    B: BlobStorage,
{
    pub fn new(photo_repo: P, storage: B, capture_folder: String) -> Self {
        PhotoHandler {
            photo_repo,
            storage,
            capture_folder,
        }
    }

    /// Pushes the capture image to the blob store, then records its
    /// metadata. If the record write fails the uploaded blob is left
    /// orphaned rather than rolled back.
    pub async fn upload_photo(&self, request: NewPhoto) -> Result<PhotoUploadedResponse, AppError> {
        request.validate()?;

        let blob = self
            .storage
            .upload(
                &ImagePayload::Inline(request.image_data.clone()),
                &self.capture_folder,
            )
            .await?;

        let insert = request.prepare_for_insert(&blob);

        let id = self.photo_repo.create_photo(&insert).await.map_err(|e| {
            tracing::warn!(image_id = %blob.id, "photo record insert failed; blob orphaned");
            e
        })?;

        tracing::info!(surveyor_id = %insert.surveyor_id, image_id = %blob.id, "photo uploaded");
        Ok(PhotoUploadedResponse {
            id,
            photo_url: blob.url,
            message: "Photo uploaded successfully".to_string(),
        })
    }

    /// Deletes one photo. The blob destroy is issued first and is
    /// best-effort: an orphaned blob beats a record pointing at a deleted
    /// image.
    pub async fn delete_photo(&self, id: &Uuid) -> Result<(), AppError> {
        let photo = self
            .photo_repo
            .get_photo_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Photo not found".into()))?;

        if let Err(e) = self.storage.delete(&photo.image_id).await {
            tracing::warn!(image_id = %photo.image_id, "blob destroy failed: {}", e);
        }

        self.photo_repo.delete_photo(id).await?;

        tracing::info!(image_id = %photo.image_id, "photo deleted");
        Ok(())
    }

    pub async fn list_photos(
        &self,
        query: ListPhotosQuery,
    ) -> Result<Vec<PhotoResponse>, AppError> {
        let filter = PhotoFilter::try_from(&query)?;
        let photos = self.photo_repo.list_photos(&filter).await?;

        Ok(photos.into_iter().map(PhotoResponse::from).collect())
    }
}
