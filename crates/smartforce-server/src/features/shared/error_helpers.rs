//! Database constraint classification

use sqlx::Error as SqlxError;

pub fn is_unique_violation(error: &SqlxError) -> bool {
    matches!(error, SqlxError::Database(db_err) if db_err.is_unique_violation())
}

pub fn is_foreign_key_violation(error: &SqlxError) -> bool {
    matches!(error, SqlxError::Database(db_err) if db_err.is_foreign_key_violation())
}

/// Replace a unique violation with `on_duplicate`, wrap anything else
pub fn map_unique_violation<E, F>(error: SqlxError, on_duplicate: E, wrap: F) -> E
where
    F: FnOnce(SqlxError) -> E,
{
    if is_unique_violation(&error) {
        on_duplicate
    } else {
        wrap(error)
    }
}
