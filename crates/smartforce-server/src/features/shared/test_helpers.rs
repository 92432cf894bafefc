//! Fixture builders for database tests
//!
//! ```rust,ignore
//! #[sqlx::test]
//! async fn test_something(pool: SqlitePool) -> sqlx::Result<()> {
//!     let user = TestUser::new("ana@smartforce.app").insert(&pool).await?;
//!     let professor = TestProfessor::new("Maria Santos").insert(&pool).await?;
//!     let squats = TestExercise::new("Squats").insert(&pool).await?;
//!     Ok(())
//! }
//! ```

use chrono::Utc;
use smartforce_common::Role;
use sqlx::SqlitePool;

use crate::auth::AuthUser;

/// Cheap placeholder hash; fixtures never log in with it
pub const FIXTURE_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$fixture$fixture";

#[derive(Debug, Clone)]
pub struct TestUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

impl TestUser {
    pub fn new(email: &str) -> Self {
        Self {
            email: email.to_string(),
            name: email.split('@').next().unwrap_or(email).to_string(),
            password_hash: FIXTURE_PASSWORD_HASH.to_string(),
        }
    }

    pub fn with_password_hash(mut self, hash: &str) -> Self {
        self.password_hash = hash.to_string();
        self
    }

    /// Insert and return the new id
    pub async fn insert(self, pool: &SqlitePool) -> sqlx::Result<i64> {
        sqlx::query_scalar(
            "INSERT INTO users (email, name, password_hash, created_at)
             VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(self.email)
        .bind(self.name)
        .bind(self.password_hash)
        .bind(Utc::now())
        .fetch_one(pool)
        .await
    }
}

#[derive(Debug, Clone)]
pub struct TestProfessor {
    pub name: String,
    pub email: Option<String>,
}

impl TestProfessor {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    pub async fn insert(self, pool: &SqlitePool) -> sqlx::Result<i64> {
        let password_hash = self.email.as_ref().map(|_| FIXTURE_PASSWORD_HASH);
        sqlx::query_scalar(
            "INSERT INTO professors (name, email, password_hash, created_at)
             VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(self.name)
        .bind(self.email)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(pool)
        .await
    }
}

#[derive(Debug, Clone)]
pub struct TestExercise {
    pub name: String,
    pub description: String,
    pub muscle_group: Option<String>,
}

impl TestExercise {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: format!("{} description", name),
            muscle_group: None,
        }
    }

    pub fn with_muscle_group(mut self, group: &str) -> Self {
        self.muscle_group = Some(group.to_string());
        self
    }

    pub async fn insert(self, pool: &SqlitePool) -> sqlx::Result<i64> {
        let now = Utc::now();
        sqlx::query_scalar(
            "INSERT INTO exercises (name, description, muscle_group, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(self.name)
        .bind(self.description)
        .bind(self.muscle_group)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
    }
}

pub fn student(id: i64) -> AuthUser {
    AuthUser {
        id,
        email: format!("student{}@smartforce.app", id),
        role: Role::Student,
    }
}

pub fn professor(id: i64) -> AuthUser {
    AuthUser {
        id,
        email: format!("professor{}@smartforce.app", id),
        role: Role::Professor,
    }
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> sqlx::Result<i64> {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
}
