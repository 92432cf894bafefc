//! Paginated exercise listing with optional name search
//!
//! `name` matches a case-insensitive substring; `%` and `_` in the filter
//! are matched literally.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    cache::SharedCache,
    error::AppError,
    features::{
        exercises::{
            list_cache_key,
            model::{Exercise, EXERCISE_COLUMNS},
        },
        shared::{Paginated, PaginationError, PaginationMetadata, PaginationParams},
    },
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListExercisesQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub name: Option<String>,
}

impl ListExercisesQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.skip, self.limit)
    }

    /// SQLite's `LOWER()` only folds ASCII, so the filter folds the same way
    fn name_filter(&self) -> Option<String> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_ascii_lowercase)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ListExercisesError {
    #[error(transparent)]
    Pagination(#[from] PaginationError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ListExercisesError> for AppError {
    fn from(err: ListExercisesError) -> Self {
        match err {
            ListExercisesError::Pagination(e) => AppError::Validation(e.to_string()),
            ListExercisesError::Database(e) => AppError::Database(e),
        }
    }
}

/// Cached form of one page
#[derive(Serialize, Deserialize)]
struct CachedPage {
    items: Vec<Exercise>,
    pagination: PaginationMetadata,
}

fn like_pattern(filter: &str) -> String {
    let escaped = filter
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[tracing::instrument(skip(pool, cache))]
pub async fn handle(
    pool: SqlitePool,
    cache: &SharedCache,
    query: ListExercisesQuery,
) -> Result<Paginated<Exercise>, ListExercisesError> {
    let page = query.pagination();
    page.validate()?;

    let filter = query.name_filter();
    let key = list_cache_key(page.skip(), page.limit(), filter.as_deref());
    if let Some(cached) = cache.get_json::<CachedPage>(&key).await {
        return Ok(Paginated {
            items: cached.items,
            pagination: cached.pagination,
        });
    }

    let pattern = filter.as_deref().map(like_pattern);

    let total: i64 = sqlx::query_scalar(
        r"SELECT COUNT(*) FROM exercises
          WHERE ?1 IS NULL OR LOWER(name) LIKE ?1 ESCAPE '\'",
    )
    .bind(&pattern)
    .fetch_one(&pool)
    .await?;

    let sql = format!(
        r"SELECT {} FROM exercises
          WHERE ?1 IS NULL OR LOWER(name) LIKE ?1 ESCAPE '\'
          ORDER BY name, id
          LIMIT ?2 OFFSET ?3",
        EXERCISE_COLUMNS
    );
    let exercises = sqlx::query_as::<_, Exercise>(&sql)
        .bind(&pattern)
        .bind(page.limit())
        .bind(page.skip())
        .fetch_all(&pool)
        .await?;

    let result = Paginated::from_items(exercises, &page, total);
    cache
        .put_json(
            &key,
            &CachedPage {
                items: result.items.clone(),
                pagination: result.pagination.clone(),
            },
        )
        .await;

    Ok(result)
}
