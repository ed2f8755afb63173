use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxSurveyorRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxPhotoRepo {
    pub pool: PgPool,
}
