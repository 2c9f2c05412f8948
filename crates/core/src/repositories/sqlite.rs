use super::schema;
use super::store::{OdontogramStore, PatientId, ToothRecordRow, ToothUpsert};
use crate::config::CoreConfig;
use crate::constants::EMPTY_DOCUMENT_SENTINEL;
use crate::{OdontoError, OdontoResult};
use chrono::NaiveDateTime;
use odonto_types::{ToothCode, ToothStatus};
use rusqlite::{params, Connection, OptionalExtension};
use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// [`OdontogramStore`] backed by a single SQLite connection.
///
/// Every call takes the connection lock for its whole duration, so writes
/// from concurrent requests are applied one at a time; the last one wins.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (creating if needed) the database named by the configuration.
    pub fn open(cfg: &CoreConfig) -> OdontoResult<Self> {
        Self::open_path(cfg.database_path())
    }

    pub fn open_path(path: &Path) -> OdontoResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(OdontoError::StorageDirCreation)?;
        }

        let conn = Connection::open(path).map_err(OdontoError::DatabaseOpen)?;
        tracing::debug!(path = %path.display(), "opened odontogram database");
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> OdontoResult<Self> {
        let conn = Connection::open_in_memory().map_err(OdontoError::DatabaseOpen)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> OdontoResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON")
            .map_err(OdontoError::DatabaseOpen)?;
        schema::bootstrap(&conn)?;
        schema::upgrade(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Round-trips a trivial query.
    pub fn ping(&self) -> OdontoResult<()> {
        self.conn()
            .query_row("SELECT 1", [], |_| Ok(()))
            .map_err(OdontoError::Query)
    }

    /// A panic while holding the lock cannot leave SQLite half-written, so a
    /// poisoned lock is still usable.
    pub(crate) fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl OdontogramStore for SqliteStore {
    fn patient_exists(&self, patient: PatientId) -> OdontoResult<bool> {
        self.conn()
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM patients WHERE id = ?1)",
                params![patient],
                |row| row.get(0),
            )
            .map_err(OdontoError::Query)
    }

    fn load_document(&self, patient: PatientId) -> OdontoResult<String> {
        let payload: Option<String> = self
            .conn()
            .query_row(
                "SELECT payload FROM odontogram_documents WHERE patient_id = ?1",
                params![patient],
                |row| row.get(0),
            )
            .optional()
            .map_err(OdontoError::Query)?;

        Ok(payload.unwrap_or_else(|| EMPTY_DOCUMENT_SENTINEL.to_string()))
    }

    fn replace_document(&self, patient: PatientId, raw: &str) -> OdontoResult<()> {
        self.conn()
            .execute(
                "INSERT INTO odontogram_documents (patient_id, payload)
                 VALUES (?1, ?2)
                 ON CONFLICT(patient_id)
                 DO UPDATE SET payload = excluded.payload,
                               updated_at = CURRENT_TIMESTAMP",
                params![patient, raw],
            )
            .map_err(OdontoError::Query)?;

        tracing::info!(patient_id = patient, bytes = raw.len(), "replaced odontogram document");
        Ok(())
    }

    fn upsert_tooth(
        &self,
        patient: PatientId,
        tooth: ToothCode,
        update: &ToothUpsert,
    ) -> OdontoResult<()> {
        self.conn()
            .execute(
                "INSERT INTO odontogram_entries (patient_id, tooth_code, status, surface_data, notes)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(patient_id, tooth_code)
                 DO UPDATE SET status = excluded.status,
                               surface_data = COALESCE(excluded.surface_data, odontogram_entries.surface_data),
                               notes = excluded.notes,
                               updated_at = CURRENT_TIMESTAMP",
                params![
                    patient,
                    tooth.to_string(),
                    update.status.map(ToothStatus::key),
                    update.surface_data,
                    update.notes,
                ],
            )
            .map_err(OdontoError::Query)?;

        tracing::info!(patient_id = patient, tooth = %tooth, "upserted odontogram entry");
        Ok(())
    }

    fn list_tooth_records(&self, patient: PatientId) -> OdontoResult<Vec<ToothRecordRow>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare(
                "SELECT tooth_code, status, notes, surface_data, updated_at
                 FROM odontogram_entries
                 WHERE patient_id = ?1
                 ORDER BY tooth_code",
            )
            .map_err(OdontoError::Query)?;

        let rows = stmt
            .query_map(params![patient], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, NaiveDateTime>(4)?,
                ))
            })
            .map_err(OdontoError::Query)?;

        let mut records = Vec::new();
        for row in rows {
            let (code, status, notes, surface_data, updated_at) =
                row.map_err(OdontoError::Query)?;

            let Ok(tooth) = ToothCode::parse(&code) else {
                tracing::warn!(patient_id = patient, code = %code, "skipping entry with unknown tooth code");
                continue;
            };

            records.push(ToothRecordRow {
                tooth,
                status: status.and_then(|s| s.parse::<ToothStatus>().ok()),
                notes: notes.filter(|n| !n.trim().is_empty()),
                surface_data,
                updated_at,
            });
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tooth(code: &str) -> ToothCode {
        ToothCode::parse(code).unwrap()
    }

    #[test]
    fn open_path_creates_parent_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("data").join("clinic.sqlite");

        let store = SqliteStore::open_path(&path).unwrap();
        let patient = store.create_patient("Ana Pérez").unwrap();
        drop(store);

        assert!(path.is_file());
        let reopened = SqliteStore::open_path(&path).unwrap();
        assert!(reopened.patient_exists(patient).unwrap());
    }

    #[test]
    fn in_memory_store_answers_ping() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.ping().is_ok());
    }

    #[test]
    fn missing_document_loads_as_sentinel() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .conn()
            .execute("INSERT INTO patients (id, full_name) VALUES (7, 'Legacy')", [])
            .unwrap();

        assert_eq!(store.load_document(7).unwrap(), EMPTY_DOCUMENT_SENTINEL);
    }

    #[test]
    fn replace_document_overwrites_payload() {
        let store = SqliteStore::open_in_memory().unwrap();
        let patient = store.create_patient("Luis Rojas").unwrap();

        store.replace_document(patient, r#"{"general":{}}"#).unwrap();
        store.replace_document(patient, r#"{"evolution":{}}"#).unwrap();

        assert_eq!(store.load_document(patient).unwrap(), r#"{"evolution":{}}"#);
    }

    #[test]
    fn upsert_overwrites_status_and_notes_but_keeps_surface_data() {
        let store = SqliteStore::open_in_memory().unwrap();
        let patient = store.create_patient("Marta Díaz").unwrap();

        store
            .upsert_tooth(
                patient,
                tooth("16"),
                &ToothUpsert {
                    status: Some(ToothStatus::Caries),
                    notes: Some("occlusal".into()),
                    surface_data: Some(r#"{"top":{"color":"red","mark":""}}"#.into()),
                },
            )
            .unwrap();
        store
            .upsert_tooth(
                patient,
                tooth("16"),
                &ToothUpsert {
                    status: Some(ToothStatus::Filled),
                    notes: None,
                    surface_data: None,
                },
            )
            .unwrap();

        let records = store.list_tooth_records(patient).unwrap();
        assert_eq!(records.len(), 1);
        let row = &records[0];
        assert_eq!(row.tooth, tooth("16"));
        assert_eq!(row.status, Some(ToothStatus::Filled));
        assert_eq!(row.notes, None);
        assert_eq!(
            row.surface_data.as_deref(),
            Some(r#"{"top":{"color":"red","mark":""}}"#)
        );
    }

    #[test]
    fn rows_are_unique_per_patient_and_tooth() {
        let store = SqliteStore::open_in_memory().unwrap();
        let a = store.create_patient("A").unwrap();
        let b = store.create_patient("B").unwrap();
        let update = ToothUpsert {
            status: Some(ToothStatus::Healthy),
            ..ToothUpsert::default()
        };

        store.upsert_tooth(a, tooth("11"), &update).unwrap();
        store.upsert_tooth(a, tooth("11"), &update).unwrap();
        store.upsert_tooth(b, tooth("11"), &update).unwrap();

        assert_eq!(store.list_tooth_records(a).unwrap().len(), 1);
        assert_eq!(store.list_tooth_records(b).unwrap().len(), 1);
    }

    #[test]
    fn unknown_stored_values_are_tolerated() {
        let store = SqliteStore::open_in_memory().unwrap();
        let patient = store.create_patient("C").unwrap();
        store
            .conn()
            .execute(
                "INSERT INTO odontogram_entries (patient_id, tooth_code, status, notes)
                 VALUES (?1, '99', 'caries', NULL), (?1, '21', 'rotten', '  ')",
                params![patient],
            )
            .unwrap();

        let records = store.list_tooth_records(patient).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tooth, tooth("21"));
        assert_eq!(records[0].status, None);
        assert_eq!(records[0].notes, None);
    }
}
