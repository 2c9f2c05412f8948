use crate::OdontoResult;
use chrono::NaiveDateTime;
use odonto_types::{ToothCode, ToothStatus};
use serde::Serialize;

/// Row id of the owning patient.
pub type PatientId = i64;

/// Fields written by a per-tooth save.
///
/// `surface_data: None` means "leave whatever is stored"; it never clears the column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToothUpsert {
    pub status: Option<ToothStatus>,
    pub notes: Option<String>,
    pub surface_data: Option<String>,
}

/// A persisted per-tooth row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToothRecordRow {
    pub tooth: ToothCode,
    pub status: Option<ToothStatus>,
    pub notes: Option<String>,
    pub surface_data: Option<String>,
    pub updated_at: NaiveDateTime,
}

/// Durable owner of odontogram state between editing sessions.
pub trait OdontogramStore: Send + Sync {
    fn patient_exists(&self, patient: PatientId) -> OdontoResult<bool>;

    /// The last submitted payload, or the empty-document sentinel.
    fn load_document(&self, patient: PatientId) -> OdontoResult<String>;

    /// Overwrites the stored payload.
    fn replace_document(&self, patient: PatientId, raw: &str) -> OdontoResult<()>;

    /// Inserts or updates the row for `(patient, tooth)`.
    fn upsert_tooth(
        &self,
        patient: PatientId,
        tooth: ToothCode,
        update: &ToothUpsert,
    ) -> OdontoResult<()>;

    fn list_tooth_records(&self, patient: PatientId) -> OdontoResult<Vec<ToothRecordRow>>;
}
