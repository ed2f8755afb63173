use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::storage::UploadedBlob;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Photo {
    pub id: Uuid,
    pub surveyor_id: String,
    pub fullname: String,
    pub email: String,
    pub image_id: String,
    pub photo_url: String,
    pub street: String,
    pub city: String,
    pub region: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub road_name: String,
    pub damage_class: String,
    pub comment: String,
    pub local_time: String,
    pub date_created: DateTime<Utc>,
}

#[derive(Debug)]
pub struct PhotoInsert {
    pub surveyor_id: String,
    pub fullname: String,
    pub email: String,
    pub image_id: String,
    pub photo_url: String,
    pub location: PhotoLocation,
    pub road_name: String,
    pub damage_class: String,
    pub comment: String,
    pub local_time: String,
    pub date_created: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoLocation {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewPhoto {
    #[serde(default)]
    pub surveyor_id: String,

    #[serde(default)]
    pub fullname: String,

    #[serde(default)]
    pub email: String,

    /// Inline-encoded capture image, as sent by the client camera screen.
    #[serde(default)]
    #[validate(length(min = 1, message = "No image data provided"))]
    pub image_data: String,

    #[serde(default)]
    pub location: PhotoLocation,

    #[serde(default)]
    pub road_name: String,

    #[serde(default)]
    pub damage_class: String,

    #[serde(default)]
    pub comment: String,

    #[serde(default)]
    pub local_time: String,
}

impl NewPhoto {
    /// Snapshots the uploader's identity into the record. The copy is
    /// deliberate: photos keep the identity as it was at upload time.
    pub fn prepare_for_insert(&self, blob: &UploadedBlob) -> PhotoInsert {
        PhotoInsert {
            surveyor_id: self.surveyor_id.trim().to_string(),
            fullname: self.fullname.clone(),
            email: self.email.trim().to_lowercase(),
            image_id: blob.id.clone(),
            photo_url: blob.url.clone(),
            location: self.location.clone(),
            road_name: self.road_name.clone(),
            damage_class: self.damage_class.clone(),
            comment: self.comment.clone(),
            local_time: self.local_time.clone(),
            date_created: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoResponse {
    pub id: Uuid,
    pub surveyor_id: String,
    pub fullname: String,
    pub email: String,
    pub image_id: String,
    pub photo_url: String,
    pub location: PhotoLocation,
    pub road_name: String,
    pub damage_class: String,
    pub comment: String,
    pub local_time: String,
    pub date_created: DateTime<Utc>,
}

impl From<Photo> for PhotoResponse {
    fn from(photo: Photo) -> Self {
        PhotoResponse {
            id: photo.id,
            surveyor_id: photo.surveyor_id,
            fullname: photo.fullname,
            email: photo.email,
            image_id: photo.image_id,
            photo_url: photo.photo_url,
            location: PhotoLocation {
                street: photo.street,
                city: photo.city,
                region: photo.region,
                country: photo.country,
                latitude: photo.latitude,
                longitude: photo.longitude,
            },
            road_name: photo.road_name,
            damage_class: photo.damage_class,
            comment: photo.comment,
            local_time: photo.local_time,
            date_created: photo.date_created,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoUploadedResponse {
    pub id: Uuid,
    pub photo_url: String,
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPhotosQuery {
    pub damage_class: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Listing filter with resolved timestamp bounds. `end_exclusive` is the
/// day after the requested end date, so the whole end day is included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoFilter {
    pub damage_class: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end_exclusive: Option<DateTime<Utc>>,
}

impl TryFrom<&ListPhotosQuery> for PhotoFilter {
    type Error = AppError;

    fn try_from(query: &ListPhotosQuery) -> Result<Self, Self::Error> {
        let damage_class = query
            .damage_class
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let start = parse_query_date(query.start_date.as_deref(), "startDate")?
            .map(|date| date.and_time(NaiveTime::MIN).and_utc());

        let end_exclusive = match parse_query_date(query.end_date.as_deref(), "endDate")? {
            Some(date) => {
                let next = date.checked_add_days(Days::new(1)).ok_or_else(|| {
                    AppError::ValidationError("endDate is out of range".into())
                })?;
                Some(next.and_time(NaiveTime::MIN).and_utc())
            }
            None => None,
        };

        Ok(PhotoFilter {
            damage_class,
            start,
            end_exclusive,
        })
    }
}

// Empty query values ("?startDate=") count as absent.
fn parse_query_date(value: Option<&str>, field: &str) -> Result<Option<NaiveDate>, AppError> {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                AppError::ValidationError(format!("{} must be a YYYY-MM-DD date", field))
            }),
    }
}
