pub mod photo;
pub mod sqlx_repo;
pub mod surveyor;
