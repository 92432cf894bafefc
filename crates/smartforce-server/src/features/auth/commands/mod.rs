pub mod login;
pub mod refresh;
pub mod register;

pub use login::{LoginCommand, LoginError};
pub use refresh::{RefreshCommand, RefreshError};
pub use register::{RegisterCommand, RegisterError};
