//! Mapping from SQLite driver errors to the typed [`StoreError`].

use clima_core::store::StoreError;

/// Classify a driver error. Unique-index violations become
/// [`StoreError::UniqueViolation`]; everything else is passed through as an
/// opaque backend error. Classification is by SQLite extended result code,
/// never by message text.
pub(crate) fn map_db_err(e: tokio_rusqlite::Error) -> StoreError {
  match e {
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(f, msg))
      if is_unique_violation(f.extended_code) =>
    {
      StoreError::UniqueViolation(msg.unwrap_or_else(|| f.to_string()))
    }
    other => StoreError::Backend(Box::new(other)),
  }
}

fn is_unique_violation(extended_code: std::os::raw::c_int) -> bool {
  extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    || extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
}
