//! SmartForce Server Library
//!
//! REST backend for a fitness-training platform: students, professors, an
//! exercise catalog, and training plans a professor prescribes to a student.
//!
//! # Architecture
//!
//! The API is organized in feature slices under [`features`], each split
//! into **commands** (write operations, run in a transaction when they touch
//! several rows) and **queries** (read operations, some served through the
//! [`cache`]).
//!
//! - **Auth**: Argon2id passwords and HS256 bearer tokens ([`auth`])
//! - **Persistence**: SQLite through SQLx with embedded migrations ([`db`])
//! - **Middleware**: request ids, tracing, CORS, compression, rate limiting
//!   ([`middleware`]) and Prometheus request metrics ([`metrics`])
//! - **Errors**: per-workflow `thiserror` enums converging on [`AppError`]
//!
//! # Example
//!
//! ```no_run
//! use smartforce_server::{api, config::Config, db};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let pool = db::create_pool(&config.database).await?;
//!     db::run_migrations(&pool).await?;
//!
//!     let state = api::AppState::new(pool, &config)?;
//!     let app = api::create_router(state, &config)?;
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod features;
pub mod metrics;
pub mod middleware;
pub mod seed;

pub use error::{ApiResult, AppError};
