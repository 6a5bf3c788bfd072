//! Database schema versioning.
//!
//! The schema version lives in the `metadata` table. A database without one
//! is fresh and gets every step in [`MIGRATIONS`] applied in order.

use rusqlite::{Connection, OptionalExtension};
use tracing::debug;

use crate::error::{Error, Result};

use super::schema::{CREATE_METADATA_TABLE, SCHEMA_STATEMENTS};

/// Schema version this build reads and writes.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const CURRENT_VERSION: i32 = MIGRATIONS.len() as i32;

const VERSION_KEY: &str = "schema_version";

/// Ordered schema steps; step `n` (1-based) upgrades version `n - 1` to `n`.
const MIGRATIONS: &[&[&str]] = &[SCHEMA_STATEMENTS];

/// Bring the schema up to [`CURRENT_VERSION`].
///
/// # Errors
///
/// Returns an error if a step fails, or if the database was written by a
/// newer version of jotter.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    // The metadata table has to exist before the version can be read.
    conn.execute(CREATE_METADATA_TABLE, [])?;

    let found = stored_version(conn)?;
    if found > CURRENT_VERSION {
        return Err(Error::DatabaseMigration {
            message: format!(
                "database schema version {found} is newer than supported version {CURRENT_VERSION}"
            ),
        });
    }

    let applied = usize::try_from(found).unwrap_or(0);
    for (step, statements) in MIGRATIONS.iter().enumerate().skip(applied) {
        let version = i32::try_from(step + 1).unwrap_or(i32::MAX);
        debug!(version, "Applying schema step");
        apply_step(conn, version, statements)?;
    }

    Ok(())
}

/// 0 when nothing has been recorded yet.
fn stored_version(conn: &Connection) -> Result<i32> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE key = ?1",
            [VERSION_KEY],
            |row| row.get(0),
        )
        .optional()?;

    match raw {
        None => Ok(0),
        Some(value) => value.parse().map_err(|_| Error::DatabaseMigration {
            message: format!("invalid schema version: {value}"),
        }),
    }
}

fn apply_step(conn: &Connection, version: i32, statements: &[&str]) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    for statement in statements {
        tx.execute(statement, [])?;
    }
    tx.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        (VERSION_KEY, version.to_string()),
    )?;
    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_db() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    fn has_table(conn: &Connection, name: &str) -> bool {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |row| row.get::<_, i32>(0),
        )
        .unwrap()
            == 1
    }

    fn force_version(conn: &Connection, value: &str) {
        conn.execute(
            "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
            [VERSION_KEY, value],
        )
        .unwrap();
    }

    #[test]
    fn test_fresh_database_gets_every_table() {
        let conn = memory_db();
        initialize_schema(&conn).unwrap();

        assert!(has_table(&conn, "kv"));
        assert!(has_table(&conn, "metadata"));
        assert_eq!(stored_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_reopening_is_a_no_op() {
        let conn = memory_db();
        initialize_schema(&conn).unwrap();
        conn.execute("INSERT INTO kv (key, value) VALUES ('notes', '[]')", [])
            .unwrap();

        initialize_schema(&conn).unwrap();

        let kept: String = conn
            .query_row("SELECT value FROM kv WHERE key = 'notes'", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(kept, "[]");
    }

    #[test]
    fn test_unversioned_database_reads_as_zero() {
        let conn = memory_db();
        conn.execute(CREATE_METADATA_TABLE, []).unwrap();

        assert_eq!(stored_version(&conn).unwrap(), 0);
    }

    #[test]
    fn test_newer_schema_rejected() {
        let conn = memory_db();
        initialize_schema(&conn).unwrap();
        force_version(&conn, &(CURRENT_VERSION + 1).to_string());

        let err = initialize_schema(&conn).unwrap_err();
        assert!(err.to_string().contains("newer than supported"));
    }

    #[test]
    fn test_garbage_version_rejected() {
        let conn = memory_db();
        initialize_schema(&conn).unwrap();
        force_version(&conn, "abc");

        let err = initialize_schema(&conn).unwrap_err();
        assert!(err.to_string().contains("invalid schema version"));
    }
}
