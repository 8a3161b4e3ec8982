//! Schema migrations for the key-value database.
//!
//! Each migration runs in its own transaction and is recorded in
//! `schema_migrations`, so partially-applied upgrades cannot occur.

use rusqlite::Connection;

use super::{StoreError, StoreResult};

pub const CURRENT_SCHEMA_VERSION: i32 = 2;

#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i32,
    pub name: &'static str,
    pub sql: &'static str,
}

fn migrations() -> Vec<Migration> {
    vec![
        Migration {
            version: 1,
            name: "initial kv_store",
            sql: r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key        TEXT PRIMARY KEY,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            "#,
        },
        Migration {
            version: 2,
            name: "recency index for snapshot export",
            sql: r#"
            CREATE INDEX IF NOT EXISTS idx_kv_store_updated_at
                ON kv_store(updated_at);
            "#,
        },
    ]
}

pub fn run_migrations(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version    INTEGER PRIMARY KEY,
            name       TEXT NOT NULL,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )?;

    let applied: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;

    for migration in migrations() {
        if migration.version <= applied {
            continue;
        }

        conn.execute_batch("BEGIN")?;
        let result = conn
            .execute_batch(migration.sql)
            .and_then(|_| {
                conn.execute(
                    "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
                    rusqlite::params![migration.version, migration.name],
                )
                .map(|_| ())
            });

        match result {
            Ok(()) => {
                conn.execute_batch("COMMIT")?;
                tracing::info!(version = migration.version, name = migration.name, "migration applied");
            }
            Err(err) => {
                let _ = conn.execute_batch("ROLLBACK");
                return Err(StoreError::Migration(format!(
                    "migration {} ({}) failed: {err}",
                    migration.version, migration.name
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_ordered_and_current() {
        let all = migrations();
        for pair in all.windows(2) {
            assert!(pair[0].version < pair[1].version);
        }
        assert_eq!(all.last().map(|m| m.version), Some(CURRENT_SCHEMA_VERSION));
    }

    #[test]
    fn run_twice_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let version: i32 = conn
            .query_row(
                "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(version, CURRENT_SCHEMA_VERSION);
    }
}
