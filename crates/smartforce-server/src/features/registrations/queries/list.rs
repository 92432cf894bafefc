//! Registrations recorded against one training, newest first

use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    auth::{can_access_training, AuthUser},
    error::AppError,
    features::{
        registrations::model::{TrainingRegistration, REGISTRATION_COLUMNS},
        shared::{Paginated, PaginationError, PaginationParams},
        trainings::model::load_owners,
    },
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListRegistrationsQuery {
    #[serde(skip)]
    pub training_id: i64,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl ListRegistrationsQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.skip, self.limit)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ListRegistrationsError {
    #[error(transparent)]
    Pagination(#[from] PaginationError),

    #[error("Training {0} not found")]
    TrainingNotFound(i64),

    #[error("You can only view registrations of your own trainings")]
    Forbidden,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ListRegistrationsError> for AppError {
    fn from(err: ListRegistrationsError) -> Self {
        match err {
            ListRegistrationsError::Pagination(e) => AppError::Validation(e.to_string()),
            ListRegistrationsError::TrainingNotFound(_) => AppError::NotFound(err.to_string()),
            ListRegistrationsError::Forbidden => AppError::Forbidden(err.to_string()),
            ListRegistrationsError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool, caller), fields(caller = caller.id))]
pub async fn handle(
    pool: SqlitePool,
    caller: &AuthUser,
    query: ListRegistrationsQuery,
) -> Result<Paginated<TrainingRegistration>, ListRegistrationsError> {
    let page = query.pagination();
    page.validate()?;

    let mut conn = pool.acquire().await?;

    let owners = load_owners(&mut conn, query.training_id)
        .await?
        .ok_or(ListRegistrationsError::TrainingNotFound(query.training_id))?;
    if !can_access_training(caller, owners).is_allowed() {
        return Err(ListRegistrationsError::Forbidden);
    }

    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM training_registrations WHERE training_id = ?")
            .bind(query.training_id)
            .fetch_one(&mut *conn)
            .await?;

    let sql = format!(
        "SELECT {} FROM training_registrations WHERE training_id = ?
         ORDER BY created_at DESC, id DESC
         LIMIT ? OFFSET ?",
        REGISTRATION_COLUMNS
    );
    let registrations = sqlx::query_as::<_, TrainingRegistration>(&sql)
        .bind(query.training_id)
        .bind(page.limit())
        .bind(page.skip())
        .fetch_all(&mut *conn)
        .await?;

    Ok(Paginated::from_items(registrations, &page, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{
        registrations::commands::create::{self as register, CreateRegistrationCommand},
        shared::test_helpers::{student, TestExercise, TestProfessor, TestUser},
        trainings::{
            commands::create::{self, CreateTrainingCommand},
            model::ExerciseEntry,
        },
    };

    #[sqlx::test]
    async fn test_list_newest_first(pool: SqlitePool) -> sqlx::Result<()> {
        let user_id = TestUser::new("ana@smartforce.app").insert(&pool).await?;
        let professor_id = TestProfessor::new("Maria").insert(&pool).await?;
        let squats = TestExercise::new("Squats").insert(&pool).await?;
        let training = create::handle(
            pool.clone(),
            &student(user_id),
            CreateTrainingCommand {
                name: "Legs".to_string(),
                description: None,
                user_id,
                professor_id,
                exercises: vec![ExerciseEntry {
                    exercise_id: squats,
                    sets: 3,
                    repetitions: 10,
                }],
            },
        )
        .await
        .unwrap();

        for load in [10.0, 12.5] {
            register::handle(
                pool.clone(),
                &student(user_id),
                CreateRegistrationCommand {
                    training_id: training.id,
                    exercise_id: squats,
                    repetitions: 10,
                    sets: 3,
                    load,
                    intensity: 0.6,
                },
            )
            .await
            .unwrap();
        }

        let page = handle(
            pool.clone(),
            &student(user_id),
            ListRegistrationsQuery {
                training_id: training.id,
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(page.pagination.total, 2);
        assert_eq!(page.items[0].load, 12.5);

        let stranger = handle(
            pool,
            &student(user_id + 1),
            ListRegistrationsQuery {
                training_id: training.id,
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(stranger, Err(ListRegistrationsError::Forbidden)));
        Ok(())
    }
}
