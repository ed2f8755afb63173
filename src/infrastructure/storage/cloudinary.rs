use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Utc;
use serde::Deserialize;
use sha1::{Digest, Sha1};

use super::{BlobStorage, ImagePayload, StorageError, UploadedBlob};
use crate::settings::AppConfig;

const API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Cloudinary-backed blob store. Every request is signed with the account
/// secret; uploads land in the folder the caller names.
#[derive(Clone)]
pub struct CloudinaryStorage {
    client: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorMessage,
}

#[derive(Debug, Deserialize)]
struct ApiErrorMessage {
    message: String,
}

impl CloudinaryStorage {
    pub fn new(config: &AppConfig) -> Self {
        CloudinaryStorage {
            client: reqwest::Client::new(),
            cloud_name: config.cloudinary_cloud_name.clone(),
            api_key: config.cloudinary_api_key.clone(),
            api_secret: config.cloudinary_api_secret.clone(),
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/{}/image/{}", API_BASE, self.cloud_name, action)
    }

    /// SHA-1 over the alphabetically sorted `key=value` params joined with
    /// `&`, with the API secret appended, hex-encoded.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        let mut sorted: Vec<(&str, &str)> = params.to_vec();
        sorted.sort_by_key(|entry| entry.0);

        let to_sign = sorted
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha1::new();
        hasher.update(to_sign.as_bytes());
        hasher.update(self.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    async fn provider_error(response: reqwest::Response) -> StorageError {
        let status = response.status();
        let message = response
            .json::<ApiErrorBody>()
            .await
            .map(|body| body.error.message)
            .unwrap_or_else(|_| format!("HTTP {}", status));
        StorageError::Provider(message)
    }
}

#[async_trait]
impl BlobStorage for CloudinaryStorage {
    async fn upload(
        &self,
        payload: &ImagePayload,
        folder: &str,
    ) -> Result<UploadedBlob, StorageError> {
        let file = match payload {
            ImagePayload::Inline(encoded) => encoded.clone(),
            ImagePayload::Bytes(bytes) => to_data_uri(bytes),
        };

        let timestamp = Utc::now().timestamp().to_string();
        let signature = self.sign(&[("folder", folder), ("timestamp", timestamp.as_str())]);

        let response = self
            .client
            .post(self.endpoint("upload"))
            .form(&[
                ("file", file.as_str()),
                ("folder", folder),
                ("timestamp", timestamp.as_str()),
                ("api_key", self.api_key.as_str()),
                ("signature", signature.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::provider_error(response).await);
        }

        let uploaded: UploadResponse = response.json().await?;
        Ok(UploadedBlob {
            id: uploaded.public_id,
            url: uploaded.secure_url,
        })
    }

    async fn delete(&self, image_id: &str) -> Result<(), StorageError> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = self.sign(&[("public_id", image_id), ("timestamp", timestamp.as_str())]);

        let response = self
            .client
            .post(self.endpoint("destroy"))
            .form(&[
                ("public_id", image_id),
                ("timestamp", timestamp.as_str()),
                ("api_key", self.api_key.as_str()),
                ("signature", signature.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::provider_error(response).await);
        }

        let destroyed: DestroyResponse = response.json().await?;
        if destroyed.result != "ok" {
            return Err(StorageError::Provider(format!(
                "destroy of {} returned {}",
                image_id, destroyed.result
            )));
        }

        Ok(())
    }
}

/// Wraps raw bytes in the data-URI form the upload endpoint accepts.
fn to_data_uri(bytes: &[u8]) -> String {
    let mime = infer::get(bytes)
        .map(|kind| kind.mime_type())
        .unwrap_or("application/octet-stream");
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{AppConfig, AppEnvironment};

    fn storage_with_secret(secret: &str) -> CloudinaryStorage {
        CloudinaryStorage::new(&AppConfig {
            env: AppEnvironment::Testing,
            name: "test".into(),
            port: 0,
            host: "127.0.0.1".into(),
            worker_count: 1,
            database_url: "postgres://localhost/test".into(),
            cors_allowed_origins: vec!["*".into()],
            jwt_secret: "test_jwt_secret_that_is_long_enough_for_hs512_123".into(),
            jwt_expiration_hours: 12,
            cloudinary_cloud_name: "demo".into(),
            cloudinary_api_key: "key".into(),
            cloudinary_api_secret: secret.into(),
            capture_folder: "road-damage".into(),
            profile_folder: "profile-photos".into(),
        })
    }

    #[test]
    fn signature_is_independent_of_param_order() {
        let storage = storage_with_secret("abcd");

        let a = storage.sign(&[("folder", "road-damage"), ("timestamp", "1315060510")]);
        let b = storage.sign(&[("timestamp", "1315060510"), ("folder", "road-damage")]);

        assert_eq!(a, b);
        assert_eq!(a.len(), 40);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn signature_depends_on_the_secret() {
        let params = [("folder", "road-damage"), ("timestamp", "1315060510")];

        let a = storage_with_secret("abcd").sign(&params);
        let b = storage_with_secret("efgh").sign(&params);

        assert_ne!(a, b);
    }

    #[test]
    fn raw_bytes_become_a_typed_data_uri() {
        let png_header = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
        let uri = to_data_uri(&png_header);
        assert!(uri.starts_with("data:image/png;base64,"));
    }
}
