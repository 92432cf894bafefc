use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    features::{
        professors::model::{Professor, PROFESSOR_COLUMNS},
        shared::{Paginated, PaginationError, PaginationParams},
    },
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListProfessorsQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl ListProfessorsQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.skip, self.limit)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ListProfessorsError {
    #[error(transparent)]
    Pagination(#[from] PaginationError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ListProfessorsError> for AppError {
    fn from(err: ListProfessorsError) -> Self {
        match err {
            ListProfessorsError::Pagination(e) => AppError::Validation(e.to_string()),
            ListProfessorsError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: SqlitePool,
    query: ListProfessorsQuery,
) -> Result<Paginated<Professor>, ListProfessorsError> {
    let page = query.pagination();
    page.validate()?;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM professors")
        .fetch_one(&pool)
        .await?;

    let sql = format!(
        "SELECT {} FROM professors ORDER BY name, id LIMIT ? OFFSET ?",
        PROFESSOR_COLUMNS
    );
    let professors = sqlx::query_as::<_, Professor>(&sql)
        .bind(page.limit())
        .bind(page.skip())
        .fetch_all(&pool)
        .await?;

    Ok(Paginated::from_items(professors, &page, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::TestProfessor;

    #[sqlx::test]
    async fn test_list_sorted_by_name(pool: SqlitePool) -> sqlx::Result<()> {
        for name in ["Pedro Ferreira", "Ana Costa", "Maria Santos"] {
            TestProfessor::new(name).insert(&pool).await?;
        }

        let page = handle(pool, ListProfessorsQuery::default()).await.unwrap();
        let names: Vec<_> = page.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Ana Costa", "Maria Santos", "Pedro Ferreira"]);
        assert_eq!(page.pagination.total, 3);
        Ok(())
    }
}
