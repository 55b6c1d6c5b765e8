//! Error mapping and SQL helpers shared by the Diesel adapters.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::outbound::document_store::DocumentStoreError;

use super::pool::PoolError;

/// Map pool checkout failures to connection errors.
pub fn map_pool_error(error: PoolError) -> DocumentStoreError {
    DocumentStoreError::connection(error.into_message())
}

/// Map Diesel failures to document store errors, logging the operation.
///
/// Dropped connections are reported as connection errors; everything else is
/// a query error.
pub fn map_diesel_error(error: DieselError, operation: &str) -> DocumentStoreError {
    let message = error.to_string();
    debug!(%message, %operation, "diesel operation failed");
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => DocumentStoreError::connection(message),
        _ => DocumentStoreError::query(message),
    }
}

/// Escape `LIKE` metacharacters so `text` matches literally.
///
/// Pair with `ESCAPE '\'` in the query.
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Build an `ILIKE` pattern matching values that contain `text`.
pub fn contains_pattern(text: &str) -> String {
    format!("%{}%", escape_like(text))
}
