use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    features::professors::model::{Professor, PROFESSOR_COLUMNS},
};

#[derive(Debug, Clone, Deserialize)]
pub struct GetProfessorQuery {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum GetProfessorError {
    #[error("Professor {0} not found")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<GetProfessorError> for AppError {
    fn from(err: GetProfessorError) -> Self {
        match err {
            GetProfessorError::NotFound(_) => AppError::NotFound(err.to_string()),
            GetProfessorError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: SqlitePool, query: GetProfessorQuery) -> Result<Professor, GetProfessorError> {
    let sql = format!("SELECT {} FROM professors WHERE id = ?", PROFESSOR_COLUMNS);
    sqlx::query_as::<_, Professor>(&sql)
        .bind(query.id)
        .fetch_optional(&pool)
        .await?
        .ok_or(GetProfessorError::NotFound(query.id))
}
