//! Schema bootstrap and non-destructive upgrades.
//!
//! Bootstrapping is idempotent (`CREATE TABLE IF NOT EXISTS`). Upgrades only
//! ever add columns, so databases created by older builds keep their data.

use crate::constants::{ODONTOGRAM_DOCUMENTS_TABLE, ODONTOGRAM_ENTRIES_TABLE, PATIENTS_TABLE};
use crate::{OdontoError, OdontoResult};
use rusqlite::Connection;
use std::collections::HashSet;

pub(crate) fn bootstrap(conn: &Connection) -> OdontoResult<()> {
    let statements = [
        format!(
            "CREATE TABLE IF NOT EXISTS {PATIENTS_TABLE} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                full_name TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )"
        ),
        // One row per charted tooth, written by the per-tooth save action.
        // `surface_data` is added by `upgrade`, same as for older databases.
        format!(
            "CREATE TABLE IF NOT EXISTS {ODONTOGRAM_ENTRIES_TABLE} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                patient_id INTEGER NOT NULL,
                tooth_code TEXT NOT NULL,
                status TEXT,
                notes TEXT,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                UNIQUE(patient_id, tooth_code),
                FOREIGN KEY(patient_id) REFERENCES {PATIENTS_TABLE}(id) ON DELETE CASCADE
            )"
        ),
        // Whole multi-surface payload, replaced on each form submission.
        format!(
            "CREATE TABLE IF NOT EXISTS {ODONTOGRAM_DOCUMENTS_TABLE} (
                patient_id INTEGER PRIMARY KEY,
                payload TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY(patient_id) REFERENCES {PATIENTS_TABLE}(id) ON DELETE CASCADE
            )"
        ),
    ];

    for sql in &statements {
        conn.execute(sql, []).map_err(OdontoError::SchemaBootstrap)?;
    }

    Ok(())
}

pub(crate) fn upgrade(conn: &Connection) -> OdontoResult<()> {
    let entry_columns = table_columns(conn, ODONTOGRAM_ENTRIES_TABLE)?;
    if !entry_columns.contains("surface_data") {
        tracing::info!("adding surface_data column to {ODONTOGRAM_ENTRIES_TABLE}");
        conn.execute(
            &format!("ALTER TABLE {ODONTOGRAM_ENTRIES_TABLE} ADD COLUMN surface_data TEXT"),
            [],
        )
        .map_err(OdontoError::SchemaUpgrade)?;
    }

    Ok(())
}

fn table_columns(conn: &Connection, table: &str) -> OdontoResult<HashSet<String>> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table})"))
        .map_err(OdontoError::SchemaUpgrade)?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>("name"))
        .map_err(OdontoError::SchemaUpgrade)?;

    names
        .collect::<rusqlite::Result<HashSet<_>>>()
        .map_err(OdontoError::SchemaUpgrade)
}
