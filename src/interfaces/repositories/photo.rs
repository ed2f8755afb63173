use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use std::borrow::Cow;
use uuid::Uuid;

use crate::{
    entities::photo::{Photo, PhotoFilter, PhotoInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxPhotoRepo,
};

#[async_trait]
pub trait PhotoRepository: Send + Sync {
    async fn create_photo(&self, photo: &PhotoInsert) -> Result<Uuid, AppError>;
    async fn get_photo_by_id(&self, id: &Uuid) -> Result<Option<Photo>, AppError>;
    async fn delete_photo(&self, id: &Uuid) -> Result<(), AppError>;
    async fn delete_photos_by_surveyor(&self, surveyor_id: &str) -> Result<u64, AppError>;
    async fn list_photos(&self, filter: &PhotoFilter) -> Result<Vec<Photo>, AppError>;
}

impl SqlxPhotoRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxPhotoRepo { pool }
    }
}

#[async_trait]
impl PhotoRepository for SqlxPhotoRepo {
    async fn create_photo(&self, photo: &PhotoInsert) -> Result<Uuid, AppError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO photos (
                surveyor_id, fullname, email, image_id, photo_url,
                street, city, region, country, latitude, longitude,
                road_name, damage_class, comment, local_time, date_created
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING id
            "#,
        )
        .bind(&photo.surveyor_id)
        .bind(&photo.fullname)
        .bind(&photo.email)
        .bind(&photo.image_id)
        .bind(&photo.photo_url)
        .bind(&photo.location.street)
        .bind(&photo.location.city)
        .bind(&photo.location.region)
        .bind(&photo.location.country)
        .bind(photo.location.latitude)
        .bind(photo.location.longitude)
        .bind(&photo.road_name)
        .bind(&photo.damage_class)
        .bind(&photo.comment)
        .bind(&photo.local_time)
        .bind(photo.date_created)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23505")) => {
                AppError::DuplicateKey("Image ID already exists".to_string())
            }
            _ => AppError::from(e),
        })?;

        Ok(id)
    }

    async fn get_photo_by_id(&self, id: &Uuid) -> Result<Option<Photo>, AppError> {
        sqlx::query_as::<_, Photo>("SELECT * FROM photos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn delete_photo(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Photo not found".to_string()));
        }

        Ok(())
    }

    async fn delete_photos_by_surveyor(&self, surveyor_id: &str) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM photos WHERE surveyor_id = $1")
            .bind(surveyor_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected())
    }

    async fn list_photos(&self, filter: &PhotoFilter) -> Result<Vec<Photo>, AppError> {
        let mut query = build_list_query(filter);
        query
            .build_query_as::<Photo>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }
}

/// Assembles the listing query: exact damage-class match, inclusive date
/// bounds (the exclusive upper bound already covers the whole end day),
/// newest first.
fn build_list_query(filter: &PhotoFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new("SELECT * FROM photos");
    let mut prefix = " WHERE ";

    if let Some(damage_class) = &filter.damage_class {
        query.push(prefix).push("damage_class = ").push_bind(damage_class.clone());
        prefix = " AND ";
    }
    if let Some(start) = filter.start {
        query.push(prefix).push("date_created >= ").push_bind(start);
        prefix = " AND ";
    }
    if let Some(end_exclusive) = filter.end_exclusive {
        query.push(prefix).push("date_created < ").push_bind(end_exclusive);
    }

    query.push(" ORDER BY date_created DESC");
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn unfiltered_listing_selects_everything_newest_first() {
        let sql = build_list_query(&PhotoFilter::default()).into_sql();
        assert_eq!(sql, "SELECT * FROM photos ORDER BY date_created DESC");
    }

    #[test]
    fn both_filters_are_combined_with_and() {
        let filter = PhotoFilter {
            damage_class: Some("pothole".into()),
            start: Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
            end_exclusive: Some(Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap()),
        };

        let sql = build_list_query(&filter).into_sql();
        assert_eq!(
            sql,
            "SELECT * FROM photos WHERE damage_class = $1 \
             AND date_created >= $2 AND date_created < $3 \
             ORDER BY date_created DESC"
        );
    }

    #[test]
    fn date_bounds_apply_without_a_damage_class() {
        let filter = PhotoFilter {
            damage_class: None,
            start: None,
            end_exclusive: Some(Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap()),
        };

        let sql = build_list_query(&filter).into_sql();
        assert_eq!(
            sql,
            "SELECT * FROM photos WHERE date_created < $1 ORDER BY date_created DESC"
        );
    }
}
