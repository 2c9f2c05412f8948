//! Patient rows owning odontogram state.
//!
//! Patient management proper (demographics, search) lives elsewhere; this
//! store only needs enough of a patient to hang charts off and to cascade
//! deletion.

use super::store::PatientId;
use super::SqliteStore;
use crate::chart::OdontogramDocument;
use crate::validation::validate_patient_name;
use crate::{OdontoError, OdontoResult};
use rusqlite::params;

impl SqliteStore {
    /// Creates a patient together with an empty odontogram document.
    ///
    /// Both rows are written in one transaction.
    pub fn create_patient(&self, full_name: &str) -> OdontoResult<PatientId> {
        let full_name = validate_patient_name(full_name)?;
        let empty = OdontogramDocument::default().serialize()?;

        let mut conn = self.conn();
        let tx = conn.transaction().map_err(OdontoError::Query)?;
        tx.execute(
            "INSERT INTO patients (full_name) VALUES (?1)",
            params![full_name],
        )
        .map_err(OdontoError::Query)?;
        let id = tx.last_insert_rowid();
        tx.execute(
            "INSERT INTO odontogram_documents (patient_id, payload) VALUES (?1, ?2)",
            params![id, empty],
        )
        .map_err(OdontoError::Query)?;
        tx.commit().map_err(OdontoError::Query)?;

        tracing::info!(patient_id = id, "created patient");
        Ok(id)
    }

    /// Deletes a patient and, by cascade, all of their odontogram state.
    ///
    /// Returns `false` if no such patient existed.
    pub fn delete_patient(&self, patient: PatientId) -> OdontoResult<bool> {
        let removed = self
            .conn()
            .execute("DELETE FROM patients WHERE id = ?1", params![patient])
            .map_err(OdontoError::Query)?;

        if removed > 0 {
            tracing::info!(patient_id = patient, "deleted patient");
        }
        Ok(removed > 0)
    }
}
