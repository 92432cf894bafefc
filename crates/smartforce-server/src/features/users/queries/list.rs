//! Paginated student listing

use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    features::{
        shared::{Paginated, PaginationError, PaginationParams},
        users::model::{User, USER_COLUMNS},
    },
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl ListUsersQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.skip, self.limit)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ListUsersError {
    #[error(transparent)]
    Pagination(#[from] PaginationError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ListUsersError> for AppError {
    fn from(err: ListUsersError) -> Self {
        match err {
            ListUsersError::Pagination(e) => AppError::Validation(e.to_string()),
            ListUsersError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: SqlitePool, query: ListUsersQuery) -> Result<Paginated<User>, ListUsersError> {
    let page = query.pagination();
    page.validate()?;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await?;

    let sql = format!(
        "SELECT {} FROM users ORDER BY id LIMIT ? OFFSET ?",
        USER_COLUMNS
    );
    let users = sqlx::query_as::<_, User>(&sql)
        .bind(page.limit())
        .bind(page.skip())
        .fetch_all(&pool)
        .await?;

    Ok(Paginated::from_items(users, &page, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::TestUser;

    #[sqlx::test]
    async fn test_list_paginates(pool: SqlitePool) -> sqlx::Result<()> {
        for i in 0..5 {
            TestUser::new(&format!("user{}@smartforce.app", i))
                .insert(&pool)
                .await?;
        }

        let query = ListUsersQuery {
            skip: Some(3),
            limit: Some(2),
        };
        let page = handle(pool, query).await.unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].email, "user3@smartforce.app");
        assert_eq!(page.pagination.total, 5);
        assert!(!page.pagination.has_more);
        Ok(())
    }

    #[sqlx::test]
    async fn test_limit_out_of_range(pool: SqlitePool) -> sqlx::Result<()> {
        let query = ListUsersQuery {
            skip: None,
            limit: Some(1001),
        };
        assert!(matches!(
            handle(pool, query).await,
            Err(ListUsersError::Pagination(_))
        ));
        Ok(())
    }
}
