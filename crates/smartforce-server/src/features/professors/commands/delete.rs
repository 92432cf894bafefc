//! Delete a professor
//!
//! Their trainings are removed by `ON DELETE CASCADE`, so anyone other than
//! the professor themself may only delete a professor no training refers to.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    api::response::Deleted,
    auth::AuthUser,
    error::AppError,
    features::professors::model::{check_record_access, has_trainings, RecordAccess},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteProfessorCommand {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteProfessorError {
    #[error("Professor {0} not found")]
    NotFound(i64),

    #[error("You can only delete your own professor profile")]
    Forbidden,

    #[error("Professor {0} still has trainings")]
    HasTrainings(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<DeleteProfessorError> for AppError {
    fn from(err: DeleteProfessorError) -> Self {
        match err {
            DeleteProfessorError::NotFound(_) => AppError::NotFound(err.to_string()),
            DeleteProfessorError::Forbidden => AppError::Forbidden(err.to_string()),
            DeleteProfessorError::HasTrainings(_) => AppError::Conflict(err.to_string()),
            DeleteProfessorError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool, caller))]
pub async fn handle(
    pool: SqlitePool,
    caller: &AuthUser,
    command: DeleteProfessorCommand,
) -> Result<Deleted, DeleteProfessorError> {
    let mut tx = pool.begin().await?;

    match check_record_access(&mut tx, caller, command.id).await? {
        RecordAccess::Missing => return Err(DeleteProfessorError::NotFound(command.id)),
        RecordAccess::Denied => return Err(DeleteProfessorError::Forbidden),
        RecordAccess::Allowed => {},
    }

    if !caller.is_professor(command.id) && has_trainings(&mut tx, command.id).await? {
        return Err(DeleteProfessorError::HasTrainings(command.id));
    }

    let result = sqlx::query("DELETE FROM professors WHERE id = ?")
        .bind(command.id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DeleteProfessorError::NotFound(command.id));
    }

    tx.commit().await?;

    tracing::info!(professor_id = command.id, "Professor deleted");
    Ok(Deleted::new(command.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{
        count_rows, professor, student, TestProfessor, TestUser,
    };

    async fn insert_training(pool: &SqlitePool, user_id: i64, professor_id: i64) -> sqlx::Result<()> {
        sqlx::query(
            "INSERT INTO trainings (name, user_id, professor_id, created_at, updated_at)
             VALUES ('Leg Day', ?, ?, '2026-01-01T00:00:00Z', '2026-01-01T00:00:00Z')",
        )
        .bind(user_id)
        .bind(professor_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    #[sqlx::test]
    async fn test_delete_unused_catalog_professor(pool: SqlitePool) -> sqlx::Result<()> {
        let id = TestProfessor::new("Pedro").insert(&pool).await?;
        handle(pool.clone(), &student(1), DeleteProfessorCommand { id })
            .await
            .unwrap();
        assert_eq!(count_rows(&pool, "professors").await?, 0);
        Ok(())
    }

    #[sqlx::test]
    async fn test_stranger_cannot_cascade_foreign_trainings(pool: SqlitePool) -> sqlx::Result<()> {
        let ana = TestUser::new("ana@smartforce.app").insert(&pool).await?;
        let bruno = TestUser::new("bruno@smartforce.app").insert(&pool).await?;
        let id = TestProfessor::new("Pedro").insert(&pool).await?;
        insert_training(&pool, ana, id).await?;

        let result = handle(pool.clone(), &student(bruno), DeleteProfessorCommand { id }).await;
        assert!(matches!(result, Err(DeleteProfessorError::HasTrainings(p)) if p == id));

        // Not even the trainee may remove the professor and every other plan with it.
        let result = handle(pool.clone(), &student(ana), DeleteProfessorCommand { id }).await;
        assert!(matches!(result, Err(DeleteProfessorError::HasTrainings(_))));

        assert_eq!(count_rows(&pool, "professors").await?, 1);
        assert_eq!(count_rows(&pool, "trainings").await?, 1);
        Ok(())
    }

    #[sqlx::test]
    async fn test_professor_deletes_own_account_with_trainings(pool: SqlitePool) -> sqlx::Result<()> {
        let ana = TestUser::new("ana@smartforce.app").insert(&pool).await?;
        let id = TestProfessor::new("Maria")
            .with_email("maria@smartforce.app")
            .insert(&pool)
            .await?;
        insert_training(&pool, ana, id).await?;

        handle(pool.clone(), &professor(id), DeleteProfessorCommand { id })
            .await
            .unwrap();
        assert_eq!(count_rows(&pool, "trainings").await?, 0);
        Ok(())
    }

    #[sqlx::test]
    async fn test_account_of_other_professor_is_forbidden(pool: SqlitePool) -> sqlx::Result<()> {
        let id = TestProfessor::new("Maria")
            .with_email("maria@smartforce.app")
            .insert(&pool)
            .await?;

        let result = handle(pool.clone(), &professor(id + 1), DeleteProfessorCommand { id }).await;
        assert!(matches!(result, Err(DeleteProfessorError::Forbidden)));
        assert_eq!(count_rows(&pool, "professors").await?, 1);
        Ok(())
    }

    #[sqlx::test]
    async fn test_delete_missing(pool: SqlitePool) -> sqlx::Result<()> {
        let result = handle(pool, &student(1), DeleteProfessorCommand { id: 9 }).await;
        assert!(matches!(result, Err(DeleteProfessorError::NotFound(9))));
        Ok(())
    }
}
