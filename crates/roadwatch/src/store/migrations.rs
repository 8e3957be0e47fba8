//! Database migration system for roadwatch.
//!
//! The schema version lives in the `metadata` table. Each migration runs in
//! its own transaction together with the version bump, so a crash between
//! steps leaves the database at the last completed version.

use rusqlite::{Connection, OptionalExtension};

use crate::error::{Error, Result};

use super::schema::{CREATE_ENTRIES_TABLE, CREATE_METADATA_TABLE};

/// Key used to store the schema version in the metadata table.
const VERSION_KEY: &str = "schema_version";

/// A single schema step.
#[derive(Debug)]
struct Migration {
    version: i32,
    description: &'static str,
    sql: &'static str,
}

/// Every migration, in application order.
const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    description: "create entries table",
    sql: CREATE_ENTRIES_TABLE,
}];

/// The schema version a fully migrated database reports.
pub const CURRENT_VERSION: i32 = 1;

/// Bring the database schema up to [`CURRENT_VERSION`].
///
/// # Errors
///
/// Returns an error if the stored version is unreadable, newer than this
/// build understands, or a migration fails.
pub fn initialize_schema(conn: &mut Connection) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;

    let version = schema_version(conn)?;
    if version > CURRENT_VERSION {
        return Err(Error::DatabaseMigration {
            message: format!(
                "database schema version {version} is newer than supported version {CURRENT_VERSION}"
            ),
        });
    }

    for migration in MIGRATIONS.iter().filter(|m| m.version > version) {
        tracing::debug!(
            "Applying migration {}: {}",
            migration.version,
            migration.description
        );
        let tx = conn.transaction()?;
        tx.execute_batch(migration.sql)?;
        set_schema_version(&tx, migration.version)?;
        tx.commit()?;
    }

    Ok(())
}

/// Read the schema version, 0 for a fresh database.
fn schema_version(conn: &Connection) -> Result<i32> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE key = ?1",
            [VERSION_KEY],
            |row| row.get(0),
        )
        .optional()?;

    match value {
        None => Ok(0),
        Some(value) => value.parse().map_err(|_| Error::DatabaseMigration {
            message: format!("invalid schema version: {value}"),
        }),
    }
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        (VERSION_KEY, version.to_string()),
    )?;
    Ok(())
}
