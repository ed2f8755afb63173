use async_trait::async_trait;
use derive_more::Display;

pub mod cloudinary;

/// Stable handle returned by the image host after an upload.
#[derive(Debug, Clone)]
pub struct UploadedBlob {
    pub id: String,
    pub url: String,
}

/// Image payload handed to the gateway. Capture photos arrive from the
/// client already inline-encoded (a base64 data URI); profile photos come
/// off the multipart form as raw bytes.
#[derive(Debug, Clone)]
pub enum ImagePayload {
    Inline(String),
    Bytes(Vec<u8>),
}

/// External image host. Uploads return a stable identifier plus a
/// retrieval URL; deletes are issued by identifier.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    async fn upload(&self, payload: &ImagePayload, folder: &str)
        -> Result<UploadedBlob, StorageError>;

    async fn delete(&self, image_id: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Display)]
pub enum StorageError {
    #[display("image host transport error: {_0}")]
    Transport(String),

    #[display("image host rejected the request: {_0}")]
    Provider(String),
}

impl From<reqwest::Error> for StorageError {
    fn from(err: reqwest::Error) -> Self {
        StorageError::Transport(err.to_string())
    }
}
