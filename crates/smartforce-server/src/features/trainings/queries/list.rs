//! Trainings of one student or authored by one professor
//!
//! Only that student (or that professor) may list them.

use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    auth::AuthUser,
    error::AppError,
    features::{
        shared::{Paginated, PaginationError, PaginationParams},
        trainings::model::{materialize, Training, TrainingRecord, TRAINING_COLUMNS},
    },
};

/// Whose trainings to list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingOwner {
    User(i64),
    Professor(i64),
}

impl TrainingOwner {
    fn column(self) -> &'static str {
        match self {
            TrainingOwner::User(_) => "user_id",
            TrainingOwner::Professor(_) => "professor_id",
        }
    }

    fn id(self) -> i64 {
        match self {
            TrainingOwner::User(id) | TrainingOwner::Professor(id) => id,
        }
    }

    fn is(self, caller: &AuthUser) -> bool {
        match self {
            TrainingOwner::User(id) => caller.is_student(id),
            TrainingOwner::Professor(id) => caller.is_professor(id),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTrainingsQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl ListTrainingsQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.skip, self.limit)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ListTrainingsError {
    #[error(transparent)]
    Pagination(#[from] PaginationError),

    #[error("You can only list your own trainings")]
    Forbidden,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ListTrainingsError> for AppError {
    fn from(err: ListTrainingsError) -> Self {
        match err {
            ListTrainingsError::Pagination(e) => AppError::Validation(e.to_string()),
            ListTrainingsError::Forbidden => AppError::Forbidden(err.to_string()),
            ListTrainingsError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool, caller), fields(caller = caller.id))]
pub async fn handle(
    pool: SqlitePool,
    caller: &AuthUser,
    owner: TrainingOwner,
    query: ListTrainingsQuery,
) -> Result<Paginated<Training>, ListTrainingsError> {
    let page = query.pagination();
    page.validate()?;

    if !owner.is(caller) {
        return Err(ListTrainingsError::Forbidden);
    }

    let mut conn = pool.acquire().await?;

    let count_sql = format!("SELECT COUNT(*) FROM trainings WHERE {} = ?", owner.column());
    let total: i64 = sqlx::query_scalar(&count_sql)
        .bind(owner.id())
        .fetch_one(&mut *conn)
        .await?;

    let sql = format!(
        "SELECT {} FROM trainings WHERE {} = ?
         ORDER BY created_at DESC, id DESC
         LIMIT ? OFFSET ?",
        TRAINING_COLUMNS,
        owner.column()
    );
    let records = sqlx::query_as::<_, TrainingRecord>(&sql)
        .bind(owner.id())
        .bind(page.limit())
        .bind(page.skip())
        .fetch_all(&mut *conn)
        .await?;

    let mut trainings = Vec::with_capacity(records.len());
    for record in records {
        trainings.push(materialize(&mut conn, record).await?);
    }

    Ok(Paginated::from_items(trainings, &page, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{
        shared::test_helpers::{professor, student, TestProfessor, TestUser},
        trainings::commands::create::{self, CreateTrainingCommand},
    };

    async fn create_training(
        pool: &SqlitePool,
        name: &str,
        user_id: i64,
        professor_id: i64,
    ) -> Training {
        create::handle(
            pool.clone(),
            &student(user_id),
            CreateTrainingCommand {
                name: name.to_string(),
                description: None,
                user_id,
                professor_id,
                exercises: vec![],
            },
        )
        .await
        .unwrap()
    }

    #[sqlx::test]
    async fn test_lists_by_user_and_professor(pool: SqlitePool) -> sqlx::Result<()> {
        let ana = TestUser::new("ana@smartforce.app").insert(&pool).await?;
        let joao = TestUser::new("joao@smartforce.app").insert(&pool).await?;
        let maria = TestProfessor::new("Maria").insert(&pool).await?;
        let pedro = TestProfessor::new("Pedro").insert(&pool).await?;

        create_training(&pool, "A1", ana, maria).await;
        create_training(&pool, "A2", ana, pedro).await;
        create_training(&pool, "J1", joao, maria).await;

        let anas = handle(
            pool.clone(),
            &student(ana),
            TrainingOwner::User(ana),
            ListTrainingsQuery::default(),
        )
        .await
        .unwrap();
        assert_eq!(anas.pagination.total, 2);
        assert!(anas.items.iter().all(|t| t.user_id == ana));

        let marias = handle(
            pool.clone(),
            &professor(maria),
            TrainingOwner::Professor(maria),
            ListTrainingsQuery::default(),
        )
        .await
        .unwrap();
        let mut names: Vec<_> = marias.items.iter().map(|t| t.name.clone()).collect();
        names.sort();
        assert_eq!(names, ["A1", "J1"]);
        Ok(())
    }

    #[sqlx::test]
    async fn test_cannot_list_for_someone_else(pool: SqlitePool) -> sqlx::Result<()> {
        let result = handle(
            pool.clone(),
            &student(1),
            TrainingOwner::User(2),
            ListTrainingsQuery::default(),
        )
        .await;
        assert!(matches!(result, Err(ListTrainingsError::Forbidden)));

        // A student id is not a professor id.
        let result = handle(
            pool,
            &student(1),
            TrainingOwner::Professor(1),
            ListTrainingsQuery::default(),
        )
        .await;
        assert!(matches!(result, Err(ListTrainingsError::Forbidden)));
        Ok(())
    }
}
