//! Sample catalog data for development databases
//!
//! Seeding is idempotent: rows whose name already exists are skipped, so
//! running a seed twice leaves the catalog unchanged.

use chrono::Utc;
use sqlx::SqlitePool;

/// `(name, description, muscle_group)`
pub const SAMPLE_EXERCISES: &[(&str, &str, &str)] = &[
    ("Dumbbell Press", "Press dumbbells up from chest level on a flat bench", "Chest"),
    ("Squats", "Lower the hips from standing and return, keeping the back straight", "Legs"),
    ("Deadlift", "Lift a loaded barbell from the floor to hip level", "Back"),
    ("Bench Press", "Press a barbell up from the chest while lying on a bench", "Chest"),
    ("Pull-ups", "Pull the body up until the chin passes the bar", "Back"),
    ("Push-ups", "Lower and raise the body with the arms from a plank position", "Chest"),
    ("Lunges", "Step forward and lower the back knee toward the floor", "Legs"),
    ("Plank", "Hold a straight body position supported on the forearms", "Core"),
    ("Bicep Curls", "Curl dumbbells toward the shoulders keeping the elbows fixed", "Arms"),
    ("Tricep Dips", "Lower and raise the body between parallel bars", "Arms"),
    ("Shoulder Press", "Press weights overhead from shoulder height", "Shoulders"),
    ("Leg Press", "Push a weighted platform away with the legs", "Legs"),
    ("Lat Pulldown", "Pull a cable bar down to the upper chest", "Back"),
    ("Chest Flyes", "Open and close the arms in a wide arc holding dumbbells", "Chest"),
    ("Leg Extensions", "Extend the knees against resistance while seated", "Legs"),
];

pub const SAMPLE_PROFESSORS: &[&str] = &[
    "João Silva",
    "Maria Santos",
    "Carlos Oliveira",
    "Ana Costa",
    "Pedro Ferreira",
];

/// Rows inserted and skipped by one seed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
}

pub async fn seed_exercises(pool: &SqlitePool) -> sqlx::Result<SeedReport> {
    let mut tx = pool.begin().await?;
    let mut report = SeedReport::default();

    for (name, description, muscle_group) in SAMPLE_EXERCISES {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM exercises WHERE name = ?)")
            .bind(name)
            .fetch_one(&mut *tx)
            .await?;
        if exists {
            report.skipped += 1;
            continue;
        }

        let now = Utc::now();
        sqlx::query(
            "INSERT INTO exercises (name, description, muscle_group, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(name)
        .bind(description)
        .bind(muscle_group)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;
        report.inserted += 1;
    }

    tx.commit().await?;
    tracing::info!(inserted = report.inserted, skipped = report.skipped, "Exercises seeded");
    Ok(report)
}

pub async fn seed_professors(pool: &SqlitePool) -> sqlx::Result<SeedReport> {
    let mut tx = pool.begin().await?;
    let mut report = SeedReport::default();

    for name in SAMPLE_PROFESSORS {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM professors WHERE name = ?)")
                .bind(name)
                .fetch_one(&mut *tx)
                .await?;
        if exists {
            report.skipped += 1;
            continue;
        }

        sqlx::query("INSERT INTO professors (name, created_at) VALUES (?, ?)")
            .bind(name)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;
        report.inserted += 1;
    }

    tx.commit().await?;
    tracing::info!(inserted = report.inserted, skipped = report.skipped, "Professors seeded");
    Ok(report)
}

/// Delete every row of every table, children first
pub async fn reset(pool: &SqlitePool) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;

    for table in [
        "training_registrations",
        "training_exercises",
        "trainings",
        "exercises",
        "professors",
        "users",
    ] {
        let deleted = sqlx::query(&format!("DELETE FROM {}", table))
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tracing::info!(table, deleted, "Table cleared");
    }

    tx.commit().await
}
