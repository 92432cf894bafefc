//! Account registration, login and token refresh
//!
//! Students are stored in `users`, professors in `professors`. A token's
//! `role` claim says which table its subject id points into.

pub mod commands;
pub mod queries;
pub mod routes;
pub mod session;

pub use commands::{
    LoginCommand, LoginError, RefreshCommand, RefreshError, RegisterCommand, RegisterError,
};
pub use queries::{MeError, MeQuery};
pub use routes::auth_routes;
pub use session::{AccountProfile, TokenResponse};
