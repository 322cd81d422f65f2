// ==========================================
// Customer Analytics - SQLite connection setup
// ==========================================
// Single place for Connection::open so every connection carries the
// same PRAGMA behavior.
// ==========================================

use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// Default busy_timeout in milliseconds.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Applies the uniform PRAGMAs to a connection.
///
/// foreign_keys and busy_timeout are per-connection settings in SQLite,
/// so this must run for every connection, not once per database.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Opens a SQLite connection with the uniform configuration applied.
pub fn open_sqlite_connection(db_path: &Path) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreign_keys_enabled() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        let on: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(on, 1);
    }
}
